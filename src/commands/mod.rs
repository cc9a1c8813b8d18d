//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `projects` - 项目与保存命令的增删改查
//! - `history` - 历史记录读取
//! - `console` - 命令的模拟执行
//! - `settings` - 数据目录与控制台配置
//!
//! 所有 command 返回 `Result<T, String>`，错误文本由前端以 toast 形式展示。
//! 存储是同步文件 I/O，纯存储操作通过 `blocking` 移到阻塞线程池执行，
//! 避免占用 async runtime 的工作线程。

pub mod console;
pub mod history;
pub mod projects;
pub mod settings;

use crate::services::console::Console;

/// 在阻塞线程池中执行一次同步的存储操作
///
/// # 错误
/// 操作返回的错误，或阻塞任务 panic，均转换为错误文本
pub(crate) async fn blocking<T, F>(console: &Console, op: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce(&Console) -> crate::error::Result<T> + Send + 'static,
{
    let console = console.clone();
    tauri::async_runtime::spawn_blocking(move || op(&console))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
}
