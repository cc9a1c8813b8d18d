//! # 命令执行 Tauri Commands
//!
//! 提供命令模拟执行相关的 Tauri command 处理函数：
//! - `execute_command` - 执行输入框中的命令（也用于从历史记录重新执行）
//! - `run_saved_command` - 执行项目中的保存命令
//! - `save_last_command` - 将项目最近执行的命令保存为命名命令
//! - `get_executor_state` - 查询执行器是否空闲
//!
//! 执行期间前端应禁用执行按钮；后端不阻止重叠调用。

use tauri::State;

use super::blocking;
use crate::models::history::HistoryItem;
use crate::models::project::Project;
use crate::services::console::Console;
use crate::services::executor::ExecutionState;

/// 模拟执行命令并记录成功的历史
///
/// 等待固定延迟（默认 1 秒）后追加一条 `success` 记录。
///
/// # 参数
/// - `command` - 命令文本
/// - `project_id` - 项目作用域；首页调用时省略
///
/// # 返回值
/// 追加的 HistoryItem
///
/// # 错误
/// 命令为空时立即返回错误（"请输入要执行的命令"），不写历史
#[tauri::command]
pub async fn execute_command(
    command: String,
    project_id: Option<String>,
    console: State<'_, Console>,
) -> Result<HistoryItem, String> {
    console
        .run_command(&command, project_id.as_deref())
        .await
        .map_err(|e| e.to_string())
}

/// 执行项目中的保存命令
///
/// # 返回值
/// 追加的 HistoryItem；项目或命令不存在时返回 `null`
#[tauri::command]
pub async fn run_saved_command(
    project_id: String,
    command_id: String,
    console: State<'_, Console>,
) -> Result<Option<HistoryItem>, String> {
    console
        .run_saved_command(&project_id, &command_id)
        .await
        .map_err(|e| e.to_string())
}

/// 保存项目最近一次执行的命令
///
/// # 返回值
/// 更新后的 Project；没有可保存的历史或项目不存在时返回 `null`
#[tauri::command]
pub async fn save_last_command(
    project_id: String,
    name: String,
    console: State<'_, Console>,
) -> Result<Option<Project>, String> {
    blocking(console.inner(), move |c| {
        if c.save_last_command(&project_id, &name)?.is_none() {
            return Ok(None);
        }
        c.projects().get(&project_id)
    })
    .await
}

/// 查询执行器状态：`idle` 或 `running`
#[tauri::command]
pub async fn get_executor_state(console: State<'_, Console>) -> Result<ExecutionState, String> {
    Ok(console.executor().state())
}
