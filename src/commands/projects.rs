//! # 项目和保存命令 Tauri Commands
//!
//! 提供项目管理相关的 Tauri command 处理函数：
//! - `list_projects` / `get_project` - 读取项目
//! - `create_project` / `update_project` / `delete_project` - 修改项目
//! - `add_saved_command` / `delete_saved_command` - 管理项目内的保存命令
//!
//! 修改类 command 直接返回页面刷新所需的最新数据，前端无需再次读取。
//! 针对不存在的 ID 的操作静默跳过，与浏览器版行为一致。

use tauri::State;

use super::blocking;
use crate::models::project::{NewProject, Project, ProjectPatch};
use crate::services::console::Console;

/// 获取所有项目
///
/// # 返回值
/// 按创建顺序排列的 Project 数组
///
/// # 错误
/// 项目记录无法读取或已损坏时返回错误
#[tauri::command]
pub async fn list_projects(console: State<'_, Console>) -> Result<Vec<Project>, String> {
    blocking(console.inner(), |c| c.projects().list()).await
}

/// 按 ID 获取项目
///
/// 项目详情页加载时调用；返回 `null` 时前端跳转回项目列表。
#[tauri::command]
pub async fn get_project(
    id: String,
    console: State<'_, Console>,
) -> Result<Option<Project>, String> {
    blocking(console.inner(), move |c| c.projects().get(&id)).await
}

/// 创建项目
///
/// # 参数
/// - `name` - 项目名称（不能为空）
/// - `cover_image` - 封面图片 URL，空字符串视为未提供
///
/// # 返回值
/// 新建的 Project
///
/// # 错误
/// 名称为空或写入失败时返回错误
#[tauri::command]
pub async fn create_project(
    name: String,
    cover_image: Option<String>,
    console: State<'_, Console>,
) -> Result<Project, String> {
    blocking(console.inner(), move |c| {
        c.projects().create(NewProject { name, cover_image })
    })
    .await
}

/// 部分更新项目
///
/// # 返回值
/// 更新后的 Project；项目不存在时返回 `null`
#[tauri::command]
pub async fn update_project(
    id: String,
    patch: ProjectPatch,
    console: State<'_, Console>,
) -> Result<Option<Project>, String> {
    blocking(console.inner(), move |c| {
        let repo = c.projects();
        if !repo.update(&id, patch)? {
            return Ok(None);
        }
        repo.get(&id)
    })
    .await
}

/// 删除项目
///
/// 项目作用域的历史记录保留不动。
///
/// # 返回值
/// 删除后的项目列表
#[tauri::command]
pub async fn delete_project(
    id: String,
    console: State<'_, Console>,
) -> Result<Vec<Project>, String> {
    blocking(console.inner(), move |c| {
        let repo = c.projects();
        repo.delete(&id)?;
        repo.list()
    })
    .await
}

/// 向项目添加保存命令
///
/// # 参数
/// - `project_id` - 目标项目 ID
/// - `name` - 命令名称（不能为空）
/// - `command` - 命令文本
///
/// # 返回值
/// 更新后的 Project；项目不存在时返回 `null`
#[tauri::command]
pub async fn add_saved_command(
    project_id: String,
    name: String,
    command: String,
    console: State<'_, Console>,
) -> Result<Option<Project>, String> {
    blocking(console.inner(), move |c| {
        let repo = c.projects();
        repo.add_saved_command(&project_id, &name, &command)?;
        repo.get(&project_id)
    })
    .await
}

/// 从项目中删除保存命令
///
/// # 返回值
/// 更新后的 Project；项目不存在时返回 `null`
#[tauri::command]
pub async fn delete_saved_command(
    project_id: String,
    command_id: String,
    console: State<'_, Console>,
) -> Result<Option<Project>, String> {
    blocking(console.inner(), move |c| {
        let repo = c.projects();
        repo.delete_saved_command(&project_id, &command_id)?;
        repo.get(&project_id)
    })
    .await
}
