//! # 控制台应用服务
//!
//! 将项目仓库、历史记录和模拟执行器组合为一个显式的应用对象。
//! 桌面端通过 Tauri 的 `manage()` 注册为全局状态，生命周期与应用一致；
//! 测试中基于 `MemoryStore` 构建，无需触碰文件系统。
//!
//! 页面层的组合操作也在这里实现：
//! - `run_command` - 执行命令并追加成功记录（首页为全局作用域，项目页为项目作用域）
//! - `run_saved_command` - 执行项目中的保存命令
//! - `save_last_command` - 将项目最近一次执行的命令保存为命名命令

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, StoreError, ValidationError, is_blank};
use crate::models::history::{CommandStatus, HistoryItem};
use crate::models::project::SavedCommand;
use crate::models::settings::ConsoleConfig;
use crate::services::config;
use crate::services::executor::SimulatedExecutor;
use crate::services::history::HistoryLog;
use crate::services::repository::ProjectRepository;
use crate::services::store::{FileStore, RecordStore};

/// 控制台应用状态
///
/// 克隆后的实例共享同一个存储和执行器，可移入阻塞任务中使用。
#[derive(Clone)]
pub struct Console {
    records: RecordStore,
    projects: ProjectRepository,
    history: HistoryLog,
    executor: Arc<SimulatedExecutor>,
}

impl Console {
    /// 基于给定的记录存储构建，执行延迟取自已保存的配置
    pub fn new(records: RecordStore) -> Self {
        let config = config::read_config(&records);

        Self {
            projects: ProjectRepository::new(records.clone()),
            history: HistoryLog::new(records.clone()),
            executor: Arc::new(SimulatedExecutor::new(Duration::from_millis(
                config.execution_delay_ms,
            ))),
            records,
        }
    }

    /// 打开数据目录下的文件存储
    ///
    /// # 错误
    /// 数据目录无法创建时返回 `StoreError::Io`
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let store = FileStore::open(data_dir)?;
        log::info!("数据目录: {}", store.dir().display());
        Ok(Self::new(RecordStore::new(Arc::new(store))))
    }

    pub fn projects(&self) -> &ProjectRepository {
        &self.projects
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn executor(&self) -> &SimulatedExecutor {
        &self.executor
    }

    // ======== 配置 ========

    pub fn config(&self) -> ConsoleConfig {
        config::read_config(&self.records)
    }

    /// 保存配置并立即应用到执行器
    pub fn save_config(&self, config: &ConsoleConfig) -> Result<()> {
        config::save_config(&self.records, config)?;
        self.executor
            .set_delay(Duration::from_millis(config.execution_delay_ms));
        Ok(())
    }

    /// 恢复默认配置
    pub fn reset_config(&self) -> Result<ConsoleConfig> {
        let config = config::reset_config(&self.records)?;
        self.executor
            .set_delay(Duration::from_millis(config.execution_delay_ms));
        Ok(config)
    }

    // ======== 执行 ========

    /// 执行命令并追加一条成功的历史记录
    ///
    /// # 参数
    /// - `command` - 命令文本
    /// - `project_id` - 项目作用域；`None` 为全局历史
    ///
    /// # 返回值
    /// 追加的历史记录
    ///
    /// # 错误
    /// 命令为空时返回校验错误，不等待、不写历史
    pub async fn run_command(
        &self,
        command: &str,
        project_id: Option<&str>,
    ) -> Result<HistoryItem> {
        let outcome = self.executor.execute(command).await?;
        let item = self
            .history
            .append(&outcome.command, CommandStatus::Success, project_id)?;

        log::info!(
            "命令执行完成（{}）: {}",
            project_id.unwrap_or("全局"),
            outcome.command
        );
        Ok(item)
    }

    /// 在项目作用域内执行一条保存的命令
    ///
    /// # 返回值
    /// 追加的历史记录；项目或保存命令不存在时返回 `None`，不执行
    pub async fn run_saved_command(
        &self,
        project_id: &str,
        command_id: &str,
    ) -> Result<Option<HistoryItem>> {
        let saved = self
            .projects
            .get(project_id)?
            .and_then(|p| p.saved_command(command_id).cloned());

        let Some(saved) = saved else {
            log::debug!("未找到保存命令 {}/{}，已跳过", project_id, command_id);
            return Ok(None);
        };

        self.run_command(&saved.command, Some(project_id))
            .await
            .map(Some)
    }

    /// 将项目作用域中最近执行的命令保存为命名命令
    ///
    /// # 返回值
    /// 新建的保存命令；项目没有历史记录或项目不存在时返回 `None`
    ///
    /// # 错误
    /// 名称为空时返回 `ValidationError::EmptySavedCommandName`
    pub fn save_last_command(&self, project_id: &str, name: &str) -> Result<Option<SavedCommand>> {
        if is_blank(name) {
            return Err(ValidationError::EmptySavedCommandName.into());
        }

        let Some(last) = self.history.list(Some(project_id))?.into_iter().next() else {
            return Ok(None);
        };

        self.projects
            .add_saved_command(project_id, name, &last.command)
    }
}

#[cfg(test)]
mod tests {
    use tokio::task::JoinSet;
    use tokio::time::Instant;

    use super::*;
    use crate::error::ConsoleError;
    use crate::models::project::NewProject;
    use crate::services::executor::ExecutionState;
    use crate::services::history::HISTORY_CAPACITY;

    fn console() -> Console {
        Console::new(RecordStore::in_memory())
    }

    fn create_project(console: &Console, name: &str) -> String {
        console
            .projects()
            .create(NewProject {
                name: name.into(),
                cover_image: None,
            })
            .unwrap()
            .id
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_command_appends_success_in_scope() {
        let console = console();
        let project_id = create_project(&console, "Checkout");

        let global = console.run_command("open home", None).await.unwrap();
        let scoped = console
            .run_command("click button", Some(&project_id))
            .await
            .unwrap();

        assert_eq!(global.status, CommandStatus::Success);
        assert_eq!(global.project_id, None);
        assert_eq!(scoped.project_id.as_deref(), Some(project_id.as_str()));

        assert_eq!(console.history().list(None).unwrap(), vec![global]);
        assert_eq!(
            console.history().list(Some(&project_id)).unwrap(),
            vec![scoped]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_command_rejects_blank_without_history() {
        let console = console();
        let start = Instant::now();

        for command in ["", "   "] {
            let err = console.run_command(command, None).await.unwrap_err();
            assert!(matches!(
                err,
                ConsoleError::Validation(ValidationError::EmptyCommand)
            ));
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(console.history().list(None).unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_runs_each_record_once() {
        let console = Arc::new(console());
        let project_id = create_project(&console, "Stress");
        let runs = 30;

        let mut join_set = JoinSet::new();
        for i in 0..runs {
            let console = Arc::clone(&console);
            let project_id = project_id.clone();
            join_set.spawn(async move {
                let scope = (i % 2 == 0).then_some(project_id.as_str());
                console.run_command(&format!("cmd {i}"), scope).await
            });
        }

        let mut ids = Vec::new();
        while let Some(result) = join_set.join_next().await {
            ids.push(result.unwrap().unwrap().id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), runs);

        let global = console.history().list(None).unwrap();
        let scoped = console.history().list(Some(&project_id)).unwrap();
        assert_eq!(global.len() + scoped.len(), runs);
        assert_eq!(scoped.len(), runs / 2);
        assert_eq!(console.executor().state(), ExecutionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_runs_respect_global_capacity() {
        let console = Arc::new(console());
        let mut join_set = JoinSet::new();

        for i in 0..HISTORY_CAPACITY + 15 {
            let console = Arc::clone(&console);
            join_set.spawn(async move { console.run_command(&format!("cmd {i}"), None).await });
        }
        while let Some(result) = join_set.join_next().await {
            result.unwrap().unwrap();
        }

        assert_eq!(console.history().list(None).unwrap().len(), HISTORY_CAPACITY);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_runs_against_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let console = Arc::new(Console::open(dir.path()).unwrap());
        console
            .save_config(&ConsoleConfig {
                execution_delay_ms: 1,
            })
            .unwrap();
        let project_id = create_project(&console, "Parallel");

        let runs = 40;
        let barrier = Arc::new(tokio::sync::Barrier::new(runs));
        let mut join_set = JoinSet::new();
        for i in 0..runs {
            let console = Arc::clone(&console);
            let barrier = Arc::clone(&barrier);
            let project_id = project_id.clone();
            join_set.spawn(async move {
                barrier.wait().await;
                let scope = (i % 2 == 0).then_some(project_id.as_str());
                console.run_command(&format!("cmd {i}"), scope).await
            });
        }

        // 每次执行都成功返回；读-改-写之间没有锁，允许丢失更新
        while let Some(result) = join_set.join_next().await {
            result.unwrap().unwrap();
        }

        let global = console.history().list(None).unwrap();
        let scoped = console.history().list(Some(&project_id)).unwrap();
        assert!(!global.is_empty() || !scoped.is_empty());
        assert!(global.len() + scoped.len() <= runs);
        assert_eq!(console.executor().state(), ExecutionState::Idle);

        // 重新打开后记录仍可完整解码
        let reopened = Console::open(dir.path()).unwrap();
        assert_eq!(reopened.history().list(None).unwrap(), global);
        assert!(reopened.projects().get(&project_id).unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_saved_command() {
        let console = console();
        let project_id = create_project(&console, "Login");
        let saved = console
            .projects()
            .add_saved_command(&project_id, "Admin login", "login as admin")
            .unwrap()
            .unwrap();

        let item = console
            .run_saved_command(&project_id, &saved.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.command, "login as admin");
        assert_eq!(item.project_id.as_deref(), Some(project_id.as_str()));

        assert!(console
            .run_saved_command(&project_id, "missing")
            .await
            .unwrap()
            .is_none());
        assert!(console
            .run_saved_command("missing", &saved.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(console.history().list(Some(&project_id)).unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_last_command_uses_newest_project_history() {
        let console = console();
        let project_id = create_project(&console, "Search");

        // 没有历史记录时不保存
        assert!(console
            .save_last_command(&project_id, "Latest")
            .unwrap()
            .is_none());

        console.run_command("search foo", Some(&project_id)).await.unwrap();
        console.run_command("search bar", Some(&project_id)).await.unwrap();
        console.run_command("global only", None).await.unwrap();

        let saved = console
            .save_last_command(&project_id, "Latest")
            .unwrap()
            .unwrap();
        assert_eq!(saved.command, "search bar");
        assert_eq!(saved.name, "Latest");

        let err = console.save_last_command(&project_id, " ").unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::Validation(ValidationError::EmptySavedCommandName)
        ));

        let project = console.projects().get(&project_id).unwrap().unwrap();
        assert_eq!(project.saved_commands, vec![saved]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleting_project_keeps_orphaned_history() {
        let console = console();
        let project_id = create_project(&console, "Temp");
        console.run_command("cmd", Some(&project_id)).await.unwrap();

        assert!(console.projects().delete(&project_id).unwrap());
        assert_eq!(console.history().list(Some(&project_id)).unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_config_applies_delay() {
        let console = console();
        console
            .save_config(&ConsoleConfig {
                execution_delay_ms: 200,
            })
            .unwrap();
        assert_eq!(console.config().execution_delay_ms, 200);
        assert_eq!(console.executor().delay(), Duration::from_millis(200));

        let start = Instant::now();
        console.run_command("fast", None).await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(1000));

        let config = console.reset_config().unwrap();
        assert_eq!(console.executor().delay(), Duration::from_millis(config.execution_delay_ms));
    }

    #[test]
    fn test_open_file_backed_console_persists() {
        let dir = tempfile::tempdir().unwrap();

        let project_id = {
            let console = Console::open(dir.path()).unwrap();
            console
                .save_config(&ConsoleConfig {
                    execution_delay_ms: 5,
                })
                .unwrap();
            create_project(&console, "Persisted")
        };

        let reopened = Console::open(dir.path()).unwrap();
        assert_eq!(reopened.executor().delay(), Duration::from_millis(5));
        assert_eq!(
            reopened.projects().get(&project_id).unwrap().unwrap().name,
            "Persisted"
        );
    }
}
