//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与 Tauri command 层解耦：
//! - `store` - 持久化存储适配层（文件存储 / 内存存储 + JSON 编解码）
//! - `repository` - 项目仓库：项目与保存命令的增删改查
//! - `history` - 命令历史记录：容量 50 的全局先进先出列表
//! - `executor` - 模拟执行器：固定延迟后无条件成功
//! - `config` - 控制台配置读写
//! - `console` - 应用服务：组合上述组件，作为 Tauri managed state 注入

pub mod config;
pub mod console;
pub mod executor;
pub mod history;
pub mod repository;
pub mod store;
