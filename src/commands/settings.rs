//! # 设置和配置 Tauri Commands
//!
//! 提供数据目录与控制台配置的 Tauri command 处理函数：
//! - `get_data_path` - 获取 `~/.mo/QAConsole/` 路径
//! - `read_console_config` / `save_console_config` / `reset_console_config` - 控制台配置读写

use tauri::State;

use super::blocking;
use crate::models::settings::ConsoleConfig;
use crate::services::console::Console;
use crate::utils::path;

/// 获取数据目录的绝对路径
///
/// 前端在设置面板中展示，方便用户定位记录文件。
///
/// # 错误
/// 如果无法确定用户主目录，返回错误信息
#[tauri::command]
pub async fn get_data_path() -> Result<String, String> {
    let path = path::get_data_path()?;
    Ok(path.to_string_lossy().to_string())
}

/// 读取控制台配置
///
/// 配置记录不存在或已损坏时返回默认配置（执行延迟 1000 毫秒）。
#[tauri::command]
pub async fn read_console_config(console: State<'_, Console>) -> Result<ConsoleConfig, String> {
    blocking(console.inner(), |c| Ok(c.config())).await
}

/// 保存控制台配置
///
/// 新的执行延迟对之后的执行立即生效。
///
/// # 错误
/// 序列化失败或写入失败时返回错误
#[tauri::command]
pub async fn save_console_config(
    config: ConsoleConfig,
    console: State<'_, Console>,
) -> Result<(), String> {
    blocking(console.inner(), move |c| c.save_config(&config)).await
}

/// 恢复默认配置
///
/// # 返回值
/// 恢复后的默认配置
#[tauri::command]
pub async fn reset_console_config(console: State<'_, Console>) -> Result<ConsoleConfig, String> {
    blocking(console.inner(), |c| c.reset_config()).await
}
