//! Form bodies posted to `/new_project` and `/edit_project`.

use serde::Serialize;

use crate::domain::project::Category;
use crate::shared::ProjectId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProjectFields {
    #[serde(rename = "projectCategory")]
    pub category: Category,
    #[serde(rename = "projectGoal")]
    pub goal: u64,
    #[serde(rename = "projectName")]
    pub name: String,
    #[serde(rename = "projectExpireDate")]
    pub expire_date: String,
    #[serde(rename = "projectDescription")]
    pub description: String,
    #[serde(rename = "base64Image")]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditProjectFields {
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    #[serde(rename = "newCategory")]
    pub category: Category,
    #[serde(rename = "newGoal")]
    pub goal: u64,
    #[serde(rename = "newName")]
    pub name: String,
    #[serde(rename = "newExpireDate")]
    pub expire_date: String,
    #[serde(rename = "newDescription")]
    pub description: String,
}
