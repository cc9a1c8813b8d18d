//! # 命令历史记录数据模型
//!
//! 对应 `qa-tester-history` 记录中的每一项，以及前端 `CommandHistoryItem` 接口。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 历史记录条目
///
/// 由模拟执行完成后追加，从不更新。
/// `projectId` 缺失表示全局（无项目作用域）历史。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface CommandHistoryItem {
///   id: string;
///   command: string;
///   timestamp: Date;
///   status: "success" | "error";
///   projectId?: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,

    /// 执行的命令文本
    pub command: String,

    /// 追加时刻
    pub timestamp: DateTime<Utc>,

    pub status: CommandStatus,

    /// 所属项目 ID；项目删除后不级联清理，可能指向不存在的项目
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl HistoryItem {
    /// 是否属于全局作用域
    ///
    /// 与浏览器版的真值判断一致：空字符串的 projectId 同样视为全局。
    pub fn is_global(&self) -> bool {
        self.project_id.as_deref().is_none_or(str::is_empty)
    }

    /// 是否属于指定项目作用域
    pub fn belongs_to(&self, project_id: &str) -> bool {
        self.project_id.as_deref() == Some(project_id)
    }
}

/// 执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Success,
    Error,
}
