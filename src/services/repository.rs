//! # 项目仓库服务
//!
//! 对 `qa-tester-projects` 记录的增删改查，并管理每个项目内嵌的保存命令列表。
//!
//! ## 读-改-写策略
//! 每次修改都重新读取完整项目列表，在内存副本上修改后整体写回。
//! 小数据量、单用户场景下足够；并发写入者之间没有保护（见 `store` 模块说明）。
//!
//! ## 未找到的处理
//! 针对不存在的项目 / 保存命令 ID 的操作静默跳过，不返回错误，
//! 通过 `bool` / `Option` 返回值让调用方自行判断。

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Result, ValidationError, is_blank};
use crate::models::project::{NewProject, Project, ProjectPatch, SavedCommand};
use crate::services::store::{PROJECTS_KEY, RecordStore};

/// 项目仓库
#[derive(Clone)]
pub struct ProjectRepository {
    records: RecordStore,
}

impl ProjectRepository {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    /// 获取所有项目，保持存储顺序（即创建顺序）
    pub fn list(&self) -> Result<Vec<Project>> {
        Ok(self.records.load(PROJECTS_KEY)?)
    }

    /// 按 ID 获取单个项目
    pub fn get(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// 创建项目并追加到列表末尾
    ///
    /// 生成新的 `id` 和 `createdAt`，`savedCommands` 初始化为空。
    /// 名称按输入原样保存；去除首尾空白后为空的封面 URL 视为未提供。
    ///
    /// # 错误
    /// - 名称为空（或仅含空白）时返回 `ValidationError::EmptyProjectName`，不写入任何数据
    /// - 存储读写失败时返回 `StoreError`
    pub fn create(&self, input: NewProject) -> Result<Project> {
        if is_blank(&input.name) {
            return Err(ValidationError::EmptyProjectName.into());
        }

        let mut projects = self.list()?;
        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            cover_image: input.cover_image.filter(|url| !is_blank(url)),
            created_at: Utc::now(),
            saved_commands: Vec::new(),
        };

        projects.push(project.clone());
        self.records.save(PROJECTS_KEY, &projects)?;

        log::info!("创建项目 {} ({})", project.name, project.id);
        Ok(project)
    }

    /// 部分更新项目
    ///
    /// 将补丁中提供的字段浅合并到现有项目上，未提供的字段保持不变，
    /// 项目在列表中的位置不变。
    ///
    /// # 返回值
    /// - `true` - 找到项目并已写回
    /// - `false` - 项目不存在，静默跳过，不写入
    ///
    /// # 错误
    /// 补丁中的名称为空时返回 `ValidationError::EmptyProjectName`
    pub fn update(&self, id: &str, patch: ProjectPatch) -> Result<bool> {
        if patch.name.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::EmptyProjectName.into());
        }

        let mut projects = self.list()?;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            log::debug!("更新项目时未找到 {}，已跳过", id);
            return Ok(false);
        };

        patch.apply(project);
        self.records.save(PROJECTS_KEY, &projects)?;
        Ok(true)
    }

    /// 删除项目
    ///
    /// 与浏览器版一致：无论是否找到都会写回列表。
    /// 项目作用域的历史记录不会被级联删除。
    ///
    /// # 返回值
    /// 是否实际删除了项目
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut projects = self.list()?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        let removed = projects.len() != before;

        self.records.save(PROJECTS_KEY, &projects)?;

        if removed {
            log::info!("删除项目 {}", id);
        }
        Ok(removed)
    }

    /// 向项目追加一条保存命令
    ///
    /// # 参数
    /// - `project_id` - 目标项目 ID
    /// - `name` - 命令显示名称（不能为空）
    /// - `command` - 命令文本
    ///
    /// # 返回值
    /// 新建的保存命令；项目不存在时返回 `None`，不写入
    ///
    /// # 错误
    /// 名称为空时返回 `ValidationError::EmptySavedCommandName`
    pub fn add_saved_command(
        &self,
        project_id: &str,
        name: &str,
        command: &str,
    ) -> Result<Option<SavedCommand>> {
        if is_blank(name) {
            return Err(ValidationError::EmptySavedCommandName.into());
        }

        let mut projects = self.list()?;
        let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
            log::debug!("保存命令时未找到项目 {}，已跳过", project_id);
            return Ok(None);
        };

        let saved = SavedCommand {
            id: Uuid::new_v4().to_string(),
            command: command.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        project.saved_commands.push(saved.clone());
        self.records.save(PROJECTS_KEY, &projects)?;

        Ok(Some(saved))
    }

    /// 从项目中移除指定的保存命令
    ///
    /// 只要项目存在就会写回列表，即使其中没有匹配的命令。
    ///
    /// # 返回值
    /// 项目是否存在；项目不存在时静默跳过
    pub fn delete_saved_command(&self, project_id: &str, command_id: &str) -> Result<bool> {
        let mut projects = self.list()?;
        let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
            log::debug!("删除保存命令时未找到项目 {}，已跳过", project_id);
            return Ok(false);
        };

        project.saved_commands.retain(|c| c.id != command_id);
        self.records.save(PROJECTS_KEY, &projects)?;
        Ok(true)
    }
}
