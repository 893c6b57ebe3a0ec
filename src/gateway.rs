//! Backend gateway — the contract consumed from the crowdfunding backend.
//!
//! One method per endpoint. [`crate::http::CrowdfundHttp`] implements it over
//! `reqwest`; tests and alternative transports provide their own.

use crate::domain::admin::AdminActionProject;
use crate::domain::donation::DonationRequest;
use crate::domain::project::wire::{EditProjectFields, NewProjectFields};
use crate::domain::transaction::SubmitTransactionResponse;
use crate::error::HttpError;
use crate::shared::{OperationType, ProjectId, PublicKey, TransactionXdr};

#[allow(async_fn_in_trait)]
pub trait BackendGateway {
    /// `POST /`: register the wallet's public key with the session.
    async fn login(&self, public_key: &PublicKey) -> Result<(), HttpError>;

    /// `GET /logout`
    async fn logout(&self) -> Result<(), HttpError>;

    /// `POST /donate`: unsigned payment envelope for a donation.
    async fn build_donation(&self, request: &DonationRequest) -> Result<TransactionXdr, HttpError>;

    /// `POST /control_panel`: rows the backend is willing to fund/refund
    /// among `selected`.
    async fn review_admin_operations(
        &self,
        operation: OperationType,
        selected: &[ProjectId],
    ) -> Result<Vec<AdminActionProject>, HttpError>;

    /// `POST /build_admin_transaction`: one payment per reviewed row.
    async fn build_admin_transaction(
        &self,
        operation: OperationType,
        rows: &[AdminActionProject],
    ) -> Result<TransactionXdr, HttpError>;

    /// `POST /send_transaction`: submit a signed envelope to the ledger.
    async fn send_transaction(
        &self,
        signed: &TransactionXdr,
    ) -> Result<SubmitTransactionResponse, HttpError>;

    /// `POST /new_project`: returns the id of the created project.
    async fn create_project(&self, fields: &NewProjectFields) -> Result<ProjectId, HttpError>;

    /// `POST /edit_project`
    async fn edit_project(&self, fields: &EditProjectFields) -> Result<ProjectId, HttpError>;

    /// `POST /project/<id>`: cancel a project. Returns the backend's message.
    async fn cancel_project(&self, project_id: &ProjectId) -> Result<String, HttpError>;
}
