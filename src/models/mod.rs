//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型一一对应的 Rust 数据结构。
//! 所有结构体均派生 `Serialize` 和 `Deserialize`，用于 Tauri IPC 传输和 JSON 记录读写。
//! - `project` - 项目和保存命令的数据结构
//! - `history` - 命令历史记录的数据结构
//! - `settings` - 控制台配置的数据结构

pub mod history;
pub mod project;
pub mod settings;
