//! # 通用工具模块
//!
//! - `path` - 应用数据目录路径解析

pub mod path;
