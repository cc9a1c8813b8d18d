//! # 控制台配置服务
//!
//! 读写 `qa-tester-config` 记录。读取永不失败：
//! 记录不存在、无法读取或已损坏时静默回退到默认配置。

use crate::error::StoreError;
use crate::models::settings::ConsoleConfig;
use crate::services::store::{CONFIG_KEY, RecordStore};

/// 读取控制台配置，失败时返回默认值
pub fn read_config(records: &RecordStore) -> ConsoleConfig {
    match records.load::<ConsoleConfig>(CONFIG_KEY) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("读取控制台配置失败，使用默认配置: {}", e);
            ConsoleConfig::default()
        }
    }
}

/// 保存控制台配置
pub fn save_config(records: &RecordStore, config: &ConsoleConfig) -> Result<(), StoreError> {
    records.save(CONFIG_KEY, config)
}

/// 删除已保存的配置，恢复默认值
pub fn reset_config(records: &RecordStore) -> Result<ConsoleConfig, StoreError> {
    records.remove(CONFIG_KEY)?;
    Ok(ConsoleConfig::default())
}
