//! # 路径工具函数
//!
//! 提供与应用数据目录相关的工具函数：
//! - 获取 QA Console 数据目录路径（`~/.mo/QAConsole/`）

use std::path::{Path, PathBuf};

/// 数据目录相对于用户主目录的位置
const DATA_DIR_SEGMENTS: [&str; 2] = [".mo", "QAConsole"];

/// 获取 QA Console 数据目录的绝对路径
///
/// 项目、历史记录和配置三个记录文件都存放在此目录下。
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 返回值
/// 返回 `~/.mo/QAConsole/` 目录的绝对路径。
///
/// # 错误
/// 如果无法确定用户主目录（极端情况，如无 HOME 环境变量），返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\.mo\QAConsole`
/// - Linux/macOS: `/home/username/.mo/QAConsole`
pub fn get_data_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "无法获取用户主目录".to_string())?;
    Ok(data_path_under(&home))
}

/// 在指定的主目录下拼接数据目录路径
pub fn data_path_under(home: &Path) -> PathBuf {
    DATA_DIR_SEGMENTS
        .iter()
        .fold(home.to_path_buf(), |path, segment| path.join(segment))
}
