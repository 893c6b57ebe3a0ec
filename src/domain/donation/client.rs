//! Donations sub-client.

use crate::client::CrowdfundClient;
use crate::domain::donation::{DonationRequest, INVALID_AMOUNT_ALERT};
use crate::error::SdkError;
use crate::gateway::BackendGateway;
use crate::shared::{ProjectId, TransactionHash};
use crate::wallet::WalletBridge;
use crate::workflow::{EnvelopeRequest, FlowPhase};

pub struct Donations<'a, G, W> {
    pub(crate) client: &'a CrowdfundClient<G, W>,
}

impl<'a, G: BackendGateway, W: WalletBridge> Donations<'a, G, W> {
    /// Donate `raw_amount` (the amount field's value) to a project.
    ///
    /// The amount is checked before anything is sent. The modal is locked
    /// only while the signed envelope is being submitted and is unlocked
    /// again whether submission succeeds or fails.
    pub async fn submit(
        &self,
        project_id: impl Into<ProjectId>,
        raw_amount: &str,
    ) -> Result<TransactionHash, SdkError> {
        let mut flow = self.client.flow();
        flow.enter(FlowPhase::Validating);

        let request = match DonationRequest::parse(project_id, raw_amount) {
            Ok(request) => request,
            Err(e) => return Err(flow.reject(INVALID_AMOUNT_ALERT, e.to_string())),
        };

        flow.run(EnvelopeRequest::Donation(&request)).await
    }

    /// Donate an already validated request.
    pub async fn submit_request(
        &self,
        request: &DonationRequest,
    ) -> Result<TransactionHash, SdkError> {
        self.client
            .flow()
            .run(EnvelopeRequest::Donation(request))
            .await
    }
}
