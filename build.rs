//! # QA Console - Tauri Cargo 构建脚本
//!
//! 仅在启用 `desktop` feature 时调用 `tauri_build::build()`，
//! 生成 Tauri 运行时所需的资源绑定代码（图标、权限清单、Windows 资源文件）。
//! 核心库（存储、仓库、历史、执行器）的构建与测试不依赖此步骤。

/// 构建脚本入口函数
fn main() {
  #[cfg(feature = "desktop")]
  tauri_build::build();
}
