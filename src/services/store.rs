//! # 持久化存储适配层
//!
//! 以命名记录为单位读写 JSON 文本，对应浏览器版的 `localStorage`：
//! - `KeyValueStore` - 键值文本存储接口（`get_item` / `set_item` / `remove_item`）
//! - `FileStore` - 每个键一个 `<key>.json` 文件，位于应用数据目录下
//! - `MemoryStore` - 进程内存储，测试时替换 `FileStore`
//! - `RecordStore` - 在键值存储之上做类型化的 JSON 编解码
//!
//! ## 一致性
//! 单次 `set_item` 对调用方是原子的（`FileStore` 先写临时文件再 rename）。
//! 读-改-写之间没有锁、没有版本号，两个记录之间也没有事务：
//! 并发写入者之间可能丢失更新，这是沿用的已知行为。

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// 项目列表记录的键名
pub const PROJECTS_KEY: &str = "qa-tester-projects";

/// 历史记录的键名
pub const HISTORY_KEY: &str = "qa-tester-history";

/// 控制台配置记录的键名
pub const CONFIG_KEY: &str = "qa-tester-config";

/// 临时文件序号，保证同一进程内每次写入使用不同的临时文件
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// 键值文本存储
///
/// 与浏览器 `localStorage` 同构：值是不透明文本，键不存在时返回 `None`。
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// 校验键名：仅允许 ASCII 字母数字、`-`、`_`
///
/// `FileStore` 直接用键名拼接文件名，此校验同时防止路径穿越。
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// ============ 文件存储 ============

/// 基于文件的键值存储
///
/// 目录结构：
/// ```text
/// ~/.mo/QAConsole/
/// ├── qa-tester-projects.json
/// ├── qa-tester-history.json
/// └── qa-tester-config.json
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// 打开（必要时递归创建）数据目录
    ///
    /// # 错误
    /// 目录创建失败时返回 `StoreError::Io`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// 数据目录路径
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// 本次写入专用的临时文件：`.<key>.json.tmp.<pid>.<seq>`
    fn tmp_path(&self, key: &str) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{key}.json.tmp.{}.{seq}", std::process::id()))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.record_path(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            // 记录不存在与 localStorage.getItem 返回 null 等价
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.record_path(key)?;
        let tmp_path = self.tmp_path(key);

        // 先写临时文件，再整体替换目标文件，读方不会看到写了一半的记录。
        // 并发写入同一个键时各自使用独立的临时文件，后完成的 rename 覆盖先完成的
        if let Err(source) = fs::write(&tmp_path, value) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io {
                path: tmp_path,
                source,
            });
        }

        fs::rename(&tmp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io { path, source }
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.record_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

// ============ 内存存储 ============

/// 进程内键值存储
///
/// 使用 `RwLock` 保护内部映射，允许多读单写。
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

// ============ 类型化记录存储 ============

/// 类型化 JSON 记录存储
///
/// 在任意 `KeyValueStore` 之上提供 `load` / `save`。
/// 克隆开销很小（内部是 `Arc`），仓库、历史记录、配置服务共享同一个实例。
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// 基于内存存储创建记录存储
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// 读取并解码记录
    ///
    /// # 返回值
    /// 记录不存在时返回 `T::default()`（两个列表记录即为空数组）
    ///
    /// # 错误
    /// 读取失败返回 `StoreError::Io`；记录内容无法解码为 `T` 时返回
    /// `StoreError::Decode`，不做任何修复
    pub fn load<T>(&self, key: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        match self.backend.get_item(key)? {
            Some(content) => serde_json::from_str(&content).map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            }),
            None => Ok(T::default()),
        }
    }

    /// 序列化完整的值并一次性覆盖记录
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let content = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &content)
    }

    /// 读取原始文本（不解码）
    #[cfg(test)]
    pub(crate) fn raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.backend.get_item(key)
    }

    /// 写入原始文本（不编码）
    #[cfg(test)]
    pub(crate) fn put_raw(&self, key: &str, content: &str) -> Result<(), StoreError> {
        self.backend.set_item(key, content)
    }

    /// 删除记录；记录不存在时不报错
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove_item(key)
    }
}
