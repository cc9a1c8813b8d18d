//! # 错误类型
//!
//! 核心库的错误分类：
//! - `StoreError` - 持久化存储层错误（I/O、JSON 编解码、非法键名）
//! - `ValidationError` - 输入校验失败，在任何状态修改之前拒绝
//! - `ConsoleError` - 仓库 / 历史 / 执行器对外暴露的统一错误
//!
//! "未找到"（项目或保存命令 ID 不存在）不属于错误：
//! 相关操作静默跳过，仅通过 `bool` / `Option` 返回值告知调用方。
//!
//! Tauri command 层统一通过 `to_string()` 将错误转换为 `String` 传给前端，
//! 由前端以 toast 形式展示。

use std::path::PathBuf;

use thiserror::Error;

/// 持久化存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 文件读写失败
    #[error("存储文件读写失败 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 记录内容不是合法 JSON，或结构与模型不符
    ///
    /// 不做恢复、不重试：损坏的记录会让每次读取都失败，直到记录被覆盖。
    #[error("解析存储记录 '{key}' 失败: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// 序列化记录失败
    #[error("序列化存储记录 '{key}' 失败: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// 键名包含不允许的字符（仅允许 ASCII 字母数字、`-`、`_`）
    #[error("非法的存储键名: '{0}'")]
    InvalidKey(String),

    /// 内存存储的锁被污染（持锁线程 panic）
    #[error("存储锁已失效")]
    Poisoned,
}

/// 输入校验错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("请输入要执行的命令")]
    EmptyCommand,

    #[error("请输入项目名称")]
    EmptyProjectName,

    #[error("请输入命令名称")]
    EmptySavedCommandName,
}

/// 核心操作的统一错误类型
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = ConsoleError> = std::result::Result<T, E>;

/// 判断文本是否为空（仅包含空白字符也视为空）
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
