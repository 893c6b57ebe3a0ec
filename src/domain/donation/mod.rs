//! Donation domain — a single payment from the connected wallet to a project.

pub mod client;

use serde::Serialize;

use crate::shared::{Amount, AmountError, ProjectId};

/// Alert raised when the donation amount is rejected locally.
pub const INVALID_AMOUNT_ALERT: &str =
    "The minimum donation amount is 1 lumen and must be an integer.";

/// A validated donation. Also the `POST /donate` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationRequest {
    pub project_id: ProjectId,
    pub amount: Amount,
}

impl DonationRequest {
    pub fn new(project_id: impl Into<ProjectId>, amount: Amount) -> Self {
        Self {
            project_id: project_id.into(),
            amount,
        }
    }

    /// Build a request from the raw form value of the amount field.
    pub fn parse(project_id: impl Into<ProjectId>, raw_amount: &str) -> Result<Self, AmountError> {
        Ok(Self::new(project_id, Amount::parse(raw_amount)?))
    }
}
