//! Admin sub-client — control panel fund/refund batches.

use crate::client::CrowdfundClient;
use crate::domain::admin::{AdminBatchRequest, AdminReview, ReviewError, EMPTY_SELECTION_ALERT};
use crate::domain::project::selection::ProjectSelection;
use crate::error::SdkError;
use crate::gateway::BackendGateway;
use crate::shared::{OperationType, ProjectId, TransactionHash};
use crate::wallet::WalletBridge;
use crate::workflow::EnvelopeRequest;

/// Sub-client for admin operations.
pub struct Admin<'a, G, W> {
    pub(crate) client: &'a CrowdfundClient<G, W>,
}

impl<'a, G: BackendGateway, W: WalletBridge> Admin<'a, G, W> {
    /// Ask the backend which of `selected` can be processed and show them in
    /// the confirmation table. Commits nothing.
    pub async fn review(
        &self,
        selected: &[ProjectId],
        operation: OperationType,
    ) -> Result<AdminReview, SdkError> {
        let modal = &self.client.modal;

        let request = match AdminBatchRequest::new(selected, operation) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(operation = %operation, "empty admin selection");
                modal.alert(EMPTY_SELECTION_ALERT);
                return Err(SdkError::Validation(e.to_string()));
            }
        };

        tracing::debug!(operation = %operation, selected = request.selected().len(), "reviewing admin batch");
        let rows = self
            .client
            .gateway
            .review_admin_operations(operation, request.selected())
            .await
            .map_err(|e| {
                tracing::error!(operation = %operation, error = %e, "control panel request failed");
                e
            })?;

        let review = match AdminReview::new(request, rows) {
            Ok(review) => review,
            Err(e) => {
                tracing::warn!(operation = %operation, error = %e, "admin review rejected");
                modal.alert(&review_alert(&e));
                return Err(e.into());
            }
        };

        if !review.skipped().is_empty() {
            tracing::info!(skipped = ?review.skipped(), "backend skipped selected projects");
        }
        modal.show_table(review.table());
        Ok(review)
    }

    /// Review the checked boxes of the group matching `operation`.
    pub async fn review_selection(
        &self,
        selection: &ProjectSelection,
        operation: OperationType,
    ) -> Result<AdminReview, SdkError> {
        self.review(&selection.selected(operation), operation).await
    }

    /// The confirmation click: build, sign and submit one transaction paying
    /// every reviewed row.
    pub async fn confirm(&self, review: &AdminReview) -> Result<TransactionHash, SdkError> {
        self.client
            .flow()
            .run(EnvelopeRequest::AdminBatch {
                operation: review.operation(),
                rows: review.rows(),
            })
            .await
    }
}

fn review_alert(error: &ReviewError) -> String {
    match error {
        ReviewError::EmptySelection => EMPTY_SELECTION_ALERT.to_string(),
        ReviewError::NothingEligible(operation) => {
            format!("None of the selected projects is eligible for {operation}.")
        }
        ReviewError::UnselectedProject(id) => {
            format!("The server returned project {id}, which was not selected. Nothing was signed.")
        }
    }
}
