//! # 历史记录 Tauri Commands

use tauri::State;

use super::blocking;
use crate::models::history::HistoryItem;
use crate::services::console::Console;

/// 读取历史记录
///
/// # 参数
/// - `project_id` - 项目 ID；省略时只返回全局（无项目）记录
///
/// # 返回值
/// 按时间倒序排列的 HistoryItem 数组
#[tauri::command]
pub async fn read_history(
    project_id: Option<String>,
    console: State<'_, Console>,
) -> Result<Vec<HistoryItem>, String> {
    blocking(console.inner(), move |c| c.history().list(project_id.as_deref())).await
}
