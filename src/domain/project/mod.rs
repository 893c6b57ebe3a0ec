//! Project domain — categories, statuses, and the create/edit forms.
//!
//! Form validation mirrors what the backend enforces so bad input is caught
//! before a request is made: no empty fields, a known category, a positive
//! whole goal, and an expiry date that is not in the past.

pub mod client;
pub mod image;
pub mod selection;
pub mod wire;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::{Amount, ProjectId};
use image::ProjectImage;
use wire::{EditProjectFields, NewProjectFields};

/// Date format of the expiry date picker.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Category ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Books,
    Education,
    Environment,
    Finance,
    Games,
    Music,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Books,
        Category::Education,
        Category::Environment,
        Category::Finance,
        Category::Games,
        Category::Music,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Books => "books",
            Category::Education => "education",
            Category::Environment => "environment",
            Category::Finance => "finance",
            Category::Games => "games",
            Category::Music => "music",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ProjectFormError;

    /// Case-insensitive, like the backend.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| ProjectFormError::InvalidValue {
                field: "category",
                value: s.to_string(),
            })
    }
}

// ─── ProjectStatus ───────────────────────────────────────────────────────────

/// Project lifecycle status.
///
/// `active` projects accept donations. Expired projects move to `fund` or
/// `refund`, which the admin settles into `successful` / `unsuccessful`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Fund,
    Refund,
    Successful,
    Unsuccessful,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Fund => "fund",
            ProjectStatus::Refund => "refund",
            ProjectStatus::Successful => "successful",
            ProjectStatus::Unsuccessful => "unsuccessful",
        }
    }

    pub fn accepts_donations(&self) -> bool {
        *self == ProjectStatus::Active
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectFormError {
    #[error("Field {0} is empty.")]
    EmptyField(&'static str),

    #[error("Value '{value}' is not a valid {field}.")]
    InvalidValue { field: &'static str, value: String },

    #[error("Invalid date {0}: incorrect format.")]
    InvalidDateFormat(String),

    #[error("Invalid date {0}: past expiration dates are not allowed.")]
    PastDate(String),
}

/// Earliest selectable expiry date, `YYYY-MM-DD` (UTC).
pub fn min_expire_date() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Parse a date-picker value and reject dates before `today`.
///
/// Projects expire at the end of their last day, so `today` itself is valid.
pub fn parse_expire_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ProjectFormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ProjectFormError::EmptyField("expire_date"));
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ProjectFormError::InvalidDateFormat(raw.to_string()))?;
    if date < today {
        return Err(ProjectFormError::PastDate(raw.to_string()));
    }
    Ok(date)
}

fn required<'s>(field: &'static str, value: &'s str) -> Result<&'s str, ProjectFormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ProjectFormError::EmptyField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_goal(raw: &str) -> Result<Amount, ProjectFormError> {
    let raw = required("goal", raw)?;
    Amount::parse(raw).map_err(|_| ProjectFormError::InvalidValue {
        field: "goal",
        value: raw.to_string(),
    })
}

/// Raw values of the "start a project" form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProjectForm {
    pub name: String,
    pub category: String,
    pub goal: String,
    pub expire_date: String,
    pub description: String,
    pub image: Option<ProjectImage>,
}

impl NewProjectForm {
    pub fn validate(&self, today: NaiveDate) -> Result<NewProjectFields, ProjectFormError> {
        let name = required("name", &self.name)?;
        let category = Category::from_str(required("category", &self.category)?)?;
        let goal = parse_goal(&self.goal)?;
        let expire_date = parse_expire_date(&self.expire_date, today)?;
        let description = required("description", &self.description)?;
        let image = self
            .image
            .as_ref()
            .ok_or(ProjectFormError::EmptyField("image"))?;

        Ok(NewProjectFields {
            category,
            goal: goal.value(),
            name: name.to_string(),
            expire_date: expire_date.format(DATE_FORMAT).to_string(),
            description: description.to_string(),
            image: image.data_url(),
        })
    }
}

/// Raw values of the owner's edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProjectForm {
    pub project_id: ProjectId,
    pub name: String,
    pub category: String,
    pub goal: String,
    pub expire_date: String,
    pub description: String,
}

impl EditProjectForm {
    pub fn validate(&self, today: NaiveDate) -> Result<EditProjectFields, ProjectFormError> {
        if self.project_id.as_str().trim().is_empty() {
            return Err(ProjectFormError::EmptyField("id"));
        }
        let name = required("name", &self.name)?;
        let category = Category::from_str(required("category", &self.category)?)?;
        let goal = parse_goal(&self.goal)?;
        let expire_date = parse_expire_date(&self.expire_date, today)?;
        let description = required("description", &self.description)?;

        Ok(EditProjectFields {
            project_id: self.project_id.clone(),
            category,
            goal: goal.value(),
            name: name.to_string(),
            expire_date: expire_date.format(DATE_FORMAT).to_string(),
            description: description.to_string(),
        })
    }
}

/// Extract the id from a project page path (`/project/<id>`).
pub fn project_id_from_path(path: &str) -> Option<ProjectId> {
    let id = path.trim_end_matches('/').strip_prefix("/project/")?;
    (!id.is_empty() && id.chars().all(|c| c.is_ascii_digit())).then(|| ProjectId::from(id))
}
