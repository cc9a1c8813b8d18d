//! # QA Console - 应用核心初始化模块
//!
//! 按项目组织、保存和重放手动输入的测试命令，并记录执行历史。
//! "执行"是模拟的：固定延迟后记录一条成功结果，不调用任何真实进程。
//!
//! 本模块负责：
//! - 暴露核心库（存储、项目仓库、历史记录、模拟执行器），可脱离桌面外壳单独测试
//! - 在 `desktop` feature 下完成 Tauri 应用的初始化：
//!   注册日志插件、初始化应用全局状态、注册 IPC commands、启动事件循环
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层，仅 desktop）
//! - `models/` - 数据模型（对应前端 TypeScript 类型）
//! - `services/` - 核心业务逻辑（存储、仓库、历史、执行器）
//! - `error` - 错误类型
//! - `utils/` - 通用工具函数

#[cfg(feature = "desktop")]
mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{ConsoleError, StoreError, ValidationError};
pub use services::console::Console;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 构建并运行 Tauri 应用实例。该函数完成以下工作：
/// 1. 解析数据目录（`~/.mo/QAConsole/`）并打开文件存储
/// 2. 将 `Console` 注册为应用全局状态
/// 3. 注册所有自定义 Tauri commands
/// 4. 在 `setup` 钩子中按需注册调试专用插件（日志）
/// 5. 生成应用上下文并启动主事件循环
///
/// # Panics
/// 如果无法确定数据目录、数据目录无法创建或 Tauri 应用启动失败，
/// 将通过 `.expect()` 触发 panic 并输出错误信息。
pub fn run() {
    let data_path = utils::path::get_data_path().expect("无法确定数据目录");
    let console = Console::open(&data_path).expect("无法打开数据目录");

    tauri::Builder::default()
        // === 应用全局状态初始化 ===
        // 所有 command 函数可通过 `State<Console>` 参数注入访问
        .manage(console)
        // === 自定义 Tauri Commands 注册 ===
        .invoke_handler(tauri::generate_handler![
            // 设置和配置 commands
            commands::settings::get_data_path,
            commands::settings::read_console_config,
            commands::settings::save_console_config,
            commands::settings::reset_console_config,
            // 项目 commands
            commands::projects::list_projects,
            commands::projects::get_project,
            commands::projects::create_project,
            commands::projects::update_project,
            commands::projects::delete_project,
            commands::projects::add_saved_command,
            commands::projects::delete_saved_command,
            // 历史记录 commands
            commands::history::read_history,
            // 执行 commands
            commands::console::execute_command,
            commands::console::run_saved_command,
            commands::console::save_last_command,
            commands::console::get_executor_state,
        ])
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
