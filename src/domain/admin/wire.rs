//! Wire types for the admin control panel endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::serde_util;
use crate::shared::{ProjectId, PublicKey};

/// Request body for `POST /control_panel`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlPanelRequest {
    pub selected_projects_ids: Vec<ProjectId>,
}

/// Response from `POST /control_panel`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlPanelResponse {
    #[serde(default)]
    pub admin_action_projects: Vec<AdminActionProject>,
}

/// One reviewed payment row.
///
/// For `fund` the public key is the project owner's account; for `refund`
/// the backend returns one row per donor with the donor's account and the
/// donor's total, so several rows can share a `project_id`.
///
/// Rows are echoed to `/build_admin_transaction` with `project_id` exactly as
/// the backend sent it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawAdminActionProject", into = "RawAdminActionProject")]
pub struct AdminActionProject {
    pub project_id: ProjectId,
    pub name: String,
    pub public_key: PublicKey,
    pub total_donations: u64,
    wire_id: Value,
}

impl AdminActionProject {
    /// A row built locally. Canonical numeric ids go on the wire as numbers,
    /// like the backend's own SQLite ids.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        public_key: PublicKey,
        total_donations: u64,
    ) -> Self {
        let wire_id = match project_id.as_u64() {
            Some(n) if n.to_string() == project_id.as_str() => Value::from(n),
            _ => Value::from(project_id.as_str()),
        };
        Self {
            project_id,
            name: name.into(),
            public_key,
            total_donations,
            wire_id,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawAdminActionProject {
    project_id: Value,
    #[serde(default)]
    name: String,
    public_key: PublicKey,
    #[serde(deserialize_with = "lenient_u64")]
    total_donations: u64,
}

impl TryFrom<RawAdminActionProject> for AdminActionProject {
    type Error = serde_json::Error;

    fn try_from(raw: RawAdminActionProject) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: ProjectId::deserialize(&raw.project_id)?,
            name: raw.name,
            public_key: raw.public_key,
            total_donations: raw.total_donations,
            wire_id: raw.project_id,
        })
    }
}

impl From<AdminActionProject> for RawAdminActionProject {
    fn from(row: AdminActionProject) -> Self {
        Self {
            project_id: row.wire_id,
            name: row.name,
            public_key: row.public_key,
            total_donations: row.total_donations,
        }
    }
}

/// Request body for `POST /build_admin_transaction`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildAdminTransactionRequest {
    pub admin_operations: Vec<AdminActionProject>,
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_util::string_or_number::deserialize(deserializer)?;
    raw.parse::<u64>()
        .map_err(|_| serde::de::Error::custom(format!("invalid total_donations: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_panel_request_shape() {
        let req = ControlPanelRequest {
            selected_projects_ids: vec![ProjectId::from("1"), ProjectId::from("2")],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"selected_projects_ids": ["1", "2"]})
        );
    }

    #[test]
    fn test_control_panel_response_deserialize() {
        let json = r#"{
            "admin_action_projects": [
                {"project_id": 1, "name": "Library", "public_key": "GOWNER1", "total_donations": 120},
                {"project_id": 4, "name": "Solar", "public_key": "GOWNER4", "total_donations": 35.0,
                 "status": "fund", "goal": 100}
            ]
        }"#;
        let resp: ControlPanelResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.admin_action_projects.len(), 2);
        assert_eq!(resp.admin_action_projects[0].project_id, ProjectId::from("1"));
        assert_eq!(resp.admin_action_projects[1].total_donations, 35);
    }

    #[test]
    fn test_local_rows_send_numeric_ids() {
        let body = BuildAdminTransactionRequest {
            admin_operations: vec![
                AdminActionProject::new(ProjectId::from("9"), "Books", PublicKey::from("GDONOR"), 10),
                AdminActionProject::new(ProjectId::from("007"), "Bonds", PublicKey::from("GDONOR"), 3),
            ],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"admin_operations": [
                {"project_id": 9, "name": "Books", "public_key": "GDONOR", "total_donations": 10},
                {"project_id": "007", "name": "Bonds", "public_key": "GDONOR", "total_donations": 3}
            ]})
        );
    }

    #[test]
    fn test_reviewed_rows_echo_ids_as_received() {
        let json = r#"{"admin_action_projects": [
            {"project_id": "007", "name": "A", "public_key": "GA", "total_donations": 1},
            {"project_id": 7, "name": "B", "public_key": "GB", "total_donations": "2"}
        ]}"#;
        let resp: ControlPanelResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.admin_action_projects[0].project_id, ProjectId::from("007"));
        assert_eq!(resp.admin_action_projects[1].project_id, ProjectId::from("7"));

        let body = BuildAdminTransactionRequest {
            admin_operations: resp.admin_action_projects,
        };
        let echoed = serde_json::to_value(&body).unwrap();
        assert_eq!(echoed["admin_operations"][0]["project_id"], serde_json::json!("007"));
        assert_eq!(echoed["admin_operations"][1]["project_id"], serde_json::json!(7));
        assert_eq!(echoed["admin_operations"][1]["total_donations"], serde_json::json!(2));
    }

    #[test]
    fn test_row_id_must_be_string_or_number() {
        let json = r#"{"project_id": null, "public_key": "GA", "total_donations": 1}"#;
        assert!(serde_json::from_str::<AdminActionProject>(json).is_err());
    }
}
