//! # 模拟执行器
//!
//! 接收命令文本，等待固定延迟后无条件报告成功。
//! 不调用任何进程、不访问网络，也不写历史记录：追加历史由调用方负责。
//!
//! ## 状态机
//! `Idle -> Running -> Succeeded`（终态）。
//! 空命令在进入 `Running` 之前就被校验拒绝，执行本身没有失败路径；
//! 不支持取消、重试，也没有独立于固定延迟的超时。
//!
//! ## 并发
//! 执行器本身不禁止重叠调用（由 UI 在执行期间禁用按钮），
//! 只统计进行中的执行数量，供前端展示状态。

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, ValidationError, is_blank};
use crate::models::settings::DEFAULT_EXECUTION_DELAY_MS;

/// 执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    Idle,
    Running,
    Succeeded,
}

/// 单次执行的结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutcome {
    pub command: String,
    /// 总是 `Succeeded`
    pub state: ExecutionState,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// 模拟执行器
#[derive(Debug)]
pub struct SimulatedExecutor {
    delay_ms: AtomicU64,
    in_flight: AtomicUsize,
}

impl SimulatedExecutor {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay_ms: AtomicU64::new(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// 当前的固定延迟
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.load(Ordering::Relaxed))
    }

    /// 修改后续执行使用的延迟，已在等待中的执行不受影响
    pub fn set_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.delay_ms.store(millis, Ordering::Relaxed);
    }

    /// 是否有执行正在等待中
    pub fn state(&self) -> ExecutionState {
        if self.in_flight.load(Ordering::SeqCst) == 0 {
            ExecutionState::Idle
        } else {
            ExecutionState::Running
        }
    }

    /// 模拟执行一条命令
    ///
    /// # 错误
    /// 命令为空或仅含空白时立即返回 `ValidationError::EmptyCommand`，不进入等待
    pub async fn execute(&self, command: &str) -> Result<ExecutionOutcome> {
        if is_blank(command) {
            return Err(ValidationError::EmptyCommand.into());
        }

        let delay = self.delay();
        let started_at = Utc::now();
        let _running = InFlight::enter(&self.in_flight);

        tokio::time::sleep(delay).await;

        Ok(ExecutionOutcome {
            command: command.to_string(),
            state: ExecutionState::Succeeded,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_EXECUTION_DELAY_MS))
    }
}

/// 进行中计数的守卫：future 完成或被丢弃时都会减一
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
