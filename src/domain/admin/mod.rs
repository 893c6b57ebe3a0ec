//! Admin domain — batch fund/refund of projects from the control panel.
//!
//! A batch runs in two steps. [`client::Admin::review`] sends the selection to
//! the backend and shows the rows it is willing to pay in a confirmation
//! table. Nothing is committed until [`client::Admin::confirm`] is called
//! with the resulting [`AdminReview`].

pub mod client;
pub mod wire;

use std::collections::HashSet;

use thiserror::Error;

use crate::modal::ConfirmationTable;
use crate::shared::{OperationType, ProjectId};

pub use wire::AdminActionProject;

/// Alert raised when the admin submits an empty selection.
pub const EMPTY_SELECTION_ALERT: &str = "Please select at least one project.";

/// Column headers of the confirmation table.
pub const REVIEW_HEADERS: [&str; 4] = ["ID", "Name", "Destination Account", "Donations"];

/// A validated batch request: a non-empty selection and an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminBatchRequest {
    selected: Vec<ProjectId>,
    operation: OperationType,
}

impl AdminBatchRequest {
    /// Duplicate ids are dropped, keeping the first occurrence.
    pub fn new(selected: &[ProjectId], operation: OperationType) -> Result<Self, ReviewError> {
        let mut seen = HashSet::new();
        let selected: Vec<ProjectId> = selected
            .iter()
            .filter(|id| seen.insert((*id).clone()))
            .cloned()
            .collect();
        if selected.is_empty() {
            return Err(ReviewError::EmptySelection);
        }
        Ok(Self {
            selected,
            operation,
        })
    }

    pub fn selected(&self) -> &[ProjectId] {
        &self.selected
    }

    pub fn operation(&self) -> OperationType {
        self.operation
    }
}

/// Why a review was rejected before signing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("no project selected")]
    EmptySelection,

    #[error("none of the selected projects can be processed for {0}")]
    NothingEligible(OperationType),

    #[error("backend returned project {0}, which was not selected")]
    UnselectedProject(ProjectId),
}

/// Rows the backend returned for a selection, ready to be confirmed.
///
/// Only [`client::Admin::review`] builds one, after checking that every row
/// belongs to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminReview {
    operation: OperationType,
    selected: Vec<ProjectId>,
    rows: Vec<AdminActionProject>,
}

impl AdminReview {
    pub(crate) fn new(
        request: AdminBatchRequest,
        rows: Vec<AdminActionProject>,
    ) -> Result<Self, ReviewError> {
        reconcile(&request, &rows)?;
        Ok(Self {
            operation: request.operation,
            selected: request.selected,
            rows,
        })
    }

    pub fn operation(&self) -> OperationType {
        self.operation
    }

    pub fn selected(&self) -> &[ProjectId] {
        &self.selected
    }

    pub fn rows(&self) -> &[AdminActionProject] {
        &self.rows
    }

    /// Sum of all payments in the batch.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.total_donations).sum()
    }

    /// Selected projects the backend left out (wrong status, no donations).
    pub fn skipped(&self) -> Vec<ProjectId> {
        let returned: HashSet<&ProjectId> = self.rows.iter().map(|r| &r.project_id).collect();
        self.selected
            .iter()
            .filter(|id| !returned.contains(id))
            .cloned()
            .collect()
    }

    pub fn table(&self) -> ConfirmationTable {
        confirmation_table(&self.rows)
    }
}

/// The backend may drop selected projects it cannot process, but it may not
/// add any. An empty result leaves nothing to sign.
pub fn reconcile(request: &AdminBatchRequest, rows: &[AdminActionProject]) -> Result<(), ReviewError> {
    if rows.is_empty() {
        return Err(ReviewError::NothingEligible(request.operation));
    }
    let selected: HashSet<&ProjectId> = request.selected.iter().collect();
    match rows.iter().find(|row| !selected.contains(&row.project_id)) {
        Some(row) => Err(ReviewError::UnselectedProject(row.project_id.clone())),
        None => Ok(()),
    }
}

pub fn confirmation_table(rows: &[AdminActionProject]) -> ConfirmationTable {
    let mut table = ConfirmationTable::new(&REVIEW_HEADERS);
    for row in rows {
        table.push_row(vec![
            row.project_id.to_string(),
            row.name.clone(),
            row.public_key.to_string(),
            row.total_donations.to_string(),
        ]);
    }
    table
}
