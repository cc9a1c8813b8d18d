//! # 应用配置数据模型
//!
//! 定义了 QA Console 自身配置（ConsoleConfig）的 Rust 结构体，
//! 对应前端 TypeScript 中的 `ConsoleConfig` 接口。

use serde::{Deserialize, Serialize};

/// 默认的模拟执行延迟（毫秒），与浏览器版的 `setTimeout(resolve, 1000)` 一致
pub const DEFAULT_EXECUTION_DELAY_MS: u64 = 1000;

/// 控制台配置
///
/// 存储在数据目录的 `qa-tester-config` 记录中。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ConsoleConfig {
///   executionDelayMs: number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// 模拟执行的固定延迟（毫秒）
    #[serde(default = "default_execution_delay_ms")]
    pub execution_delay_ms: u64,
}

fn default_execution_delay_ms() -> u64 {
    DEFAULT_EXECUTION_DELAY_MS
}

/// ConsoleConfig 默认值：1 秒执行延迟
impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            execution_delay_ms: DEFAULT_EXECUTION_DELAY_MS,
        }
    }
}
