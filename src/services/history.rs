//! # 命令历史记录服务
//!
//! 维护 `qa-tester-history` 记录：一个容量固定为 50 的先进先出列表，
//! 按时间倒序存储（最新的条目位于下标 0）。
//!
//! 容量上限作用于所有作用域合并后的整个列表，而不是每个项目单独计算：
//! 某个项目（或全局）的大量执行会挤掉其他作用域中较旧的记录。

use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::models::history::{CommandStatus, HistoryItem};
use crate::services::store::{HISTORY_KEY, RecordStore};

/// 历史记录的最大条数（所有作用域合计）
pub const HISTORY_CAPACITY: usize = 50;

/// 命令历史记录
#[derive(Clone)]
pub struct HistoryLog {
    records: RecordStore,
}

impl HistoryLog {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    /// 按作用域列出历史记录
    ///
    /// # 参数
    /// - `project_id` - `Some(id)` 仅返回该项目的记录；
    ///   `None`（或空字符串）仅返回没有 `projectId` 的全局记录，而不是全部记录
    ///
    /// # 返回值
    /// 按时间倒序排列的记录
    pub fn list(&self, project_id: Option<&str>) -> Result<Vec<HistoryItem>> {
        let history: Vec<HistoryItem> = self.records.load(HISTORY_KEY)?;

        let scoped: Vec<HistoryItem> = match scope(project_id) {
            Some(id) => history.into_iter().filter(|h| h.belongs_to(id)).collect(),
            None => history.into_iter().filter(HistoryItem::is_global).collect(),
        };
        Ok(scoped)
    }

    /// 追加一条历史记录
    ///
    /// 新记录插入完整列表的头部，然后从尾部截断到最近 50 条后写回。
    ///
    /// # 返回值
    /// 新追加的记录
    pub fn append(
        &self,
        command: &str,
        status: CommandStatus,
        project_id: Option<&str>,
    ) -> Result<HistoryItem> {
        let mut history: Vec<HistoryItem> = self.records.load(HISTORY_KEY)?;

        let item = HistoryItem {
            id: Uuid::new_v4().to_string(),
            command: command.to_string(),
            timestamp: Utc::now(),
            status,
            project_id: scope(project_id).map(String::from),
        };

        history.insert(0, item.clone());
        if history.len() > HISTORY_CAPACITY {
            log::debug!("历史记录超出上限，淘汰 {} 条", history.len() - HISTORY_CAPACITY);
            history.truncate(HISTORY_CAPACITY);
        }
        self.records.save(HISTORY_KEY, &history)?;

        Ok(item)
    }
}

/// 空字符串的项目 ID 视为全局作用域
fn scope(project_id: Option<&str>) -> Option<&str> {
    project_id.filter(|id| !id.is_empty())
}
