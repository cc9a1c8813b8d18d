//! # 项目和保存命令数据模型
//!
//! 定义了项目（Project）和保存命令（SavedCommand）的 Rust 结构体，
//! 对应前端 TypeScript 中的 `Project` 和 `SavedCommand` 接口。
//!
//! 这些结构体通过 `serde` 的 Serialize/Deserialize 特征实现：
//! - Tauri IPC 序列化（Rust → JS）
//! - `qa-tester-projects` 记录的 JSON 读写（字段名与浏览器版一致，均为 camelCase）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 项目数据结构
///
/// 一组命名的保存命令，以及（可选的）项目作用域历史记录的归属。
/// `savedCommands` 完全由项目拥有，保持插入顺序。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Project {
///   id: string;
///   name: string;
///   coverImage?: string;
///   createdAt: Date;
///   savedCommands: SavedCommand[];
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// 唯一标识符：创建时生成的 UUID，之后不可变
    pub id: String,

    /// 项目名称：非空的显示名称（按用户输入原样保存）
    pub name: String,

    /// 封面图片 URL（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// 创建时间：创建时写入一次，之后不可变
    pub created_at: DateTime<Utc>,

    /// 保存的命令列表，按添加顺序排列
    #[serde(default)]
    pub saved_commands: Vec<SavedCommand>,
}

impl Project {
    /// 按 ID 查找保存的命令
    pub fn saved_command(&self, command_id: &str) -> Option<&SavedCommand> {
        self.saved_commands.iter().find(|c| c.id == command_id)
    }
}

/// 保存命令数据结构
///
/// 只能通过"向项目添加保存命令"创建，通过"从项目删除保存命令"删除，
/// 从不原地修改。ID 只保证在所属项目内唯一。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCommand {
    pub id: String,

    /// 命令文本
    pub command: String,

    /// 用户为命令取的显示名称
    pub name: String,

    pub created_at: DateTime<Utc>,
}

/// 创建项目的输入参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// 项目的部分更新
///
/// 未提供的字段保持不变。`coverImage` 区分三种情况：
/// - 字段缺失：不修改封面
/// - `null`：清除封面
/// - 字符串：替换封面
///
/// `id`、`createdAt`、`savedCommands` 不允许通过更新修改。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present_field")]
    pub cover_image: Option<Option<String>>,
}

impl ProjectPatch {
    /// 将补丁浅合并到项目上
    pub(crate) fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(cover_image) = self.cover_image {
            project.cover_image = cover_image;
        }
    }
}

/// 字段出现即为 `Some`，其值（含 `null`）作为内层 Option
fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_decodes_browser_record() {
        // 浏览器版 JSON.stringify(Date) 输出毫秒精度的 ISO 字符串
        let json = r#"{
            "id": "3f1c2b9e-6a43-4d0b-9f57-1c0e2f6d8a11",
            "name": "Checkout",
            "coverImage": "https://example.com/cover.png",
            "createdAt": "2024-05-01T12:30:00.000Z",
            "savedCommands": [{
                "id": "b8a7",
                "command": "click button",
                "name": "Login",
                "createdAt": "2024-05-02T08:00:00.000Z"
            }]
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "Checkout");
        assert_eq!(
            project.cover_image.as_deref(),
            Some("https://example.com/cover.png")
        );
        assert_eq!(project.saved_commands.len(), 1);
        assert_eq!(project.saved_command("b8a7").unwrap().name, "Login");
        assert!(project.saved_command("missing").is_none());
    }

    #[test]
    fn test_project_omits_absent_cover_image() {
        let project = Project {
            id: "p1".into(),
            name: "Smoke".into(),
            cover_image: None,
            created_at: Utc::now(),
            saved_commands: vec![],
        };

        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("coverImage").is_none());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["savedCommands"], serde_json::json!([]));
    }

    #[test]
    fn test_patch_distinguishes_missing_and_null_cover() {
        let missing: ProjectPatch = serde_json::from_str(r#"{"name": "New"}"#).unwrap();
        assert_eq!(missing.name.as_deref(), Some("New"));
        assert_eq!(missing.cover_image, None);

        let cleared: ProjectPatch = serde_json::from_str(r#"{"coverImage": null}"#).unwrap();
        assert_eq!(cleared.cover_image, Some(None));

        let replaced: ProjectPatch =
            serde_json::from_str(r#"{"coverImage": "https://x/y.png"}"#).unwrap();
        assert_eq!(replaced.cover_image, Some(Some("https://x/y.png".into())));
    }

    #[test]
    fn test_patch_apply_leaves_missing_fields_untouched() {
        let mut project = Project {
            id: "p1".into(),
            name: "Old".into(),
            cover_image: Some("https://x/cover.png".into()),
            created_at: Utc::now(),
            saved_commands: vec![],
        };

        ProjectPatch {
            name: Some("New".into()),
            cover_image: None,
        }
        .apply(&mut project);

        assert_eq!(project.name, "New");
        assert_eq!(project.cover_image.as_deref(), Some("https://x/cover.png"));
    }
}
