//! Transaction workflow — envelope → signature → locked submission → result.
//!
//! Shared by donations and admin batches. One [`TransactionFlow`] drives one
//! user action through
//!
//! ```text
//! Idle → Validating → AwaitingEnvelope → AwaitingSignature → Submitting → Success | Failed
//! ```
//!
//! Nothing is retried. The modal is locked only once a signed envelope
//! exists, and the [`ModalLock`](crate::modal::ModalLock) guard guarantees it
//! is released whichever way submission ends.

use std::fmt;

use crate::domain::admin::AdminActionProject;
use crate::domain::donation::DonationRequest;
use crate::error::{HttpError, SdkError, WalletError};
use crate::gateway::BackendGateway;
use crate::modal::Modal;
use crate::shared::{OperationType, TransactionHash, TransactionXdr};
use crate::wallet::{sign_envelope, WalletBridge};

/// Body shown while the signed envelope is being submitted.
pub const PROCESSING_BODY: &str = "Please wait while we process your transaction.";

/// Title shown when submission fails after signing.
pub const FAILED_TITLE: &str = "Transaction failed";

/// Alert raised when the wallet extension is missing.
pub const WALLET_MISSING_ALERT: &str =
    "You need to install Freighter extension first. Click on 'Create Wallet'";

/// Phase of a single flow invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    Validating,
    AwaitingEnvelope,
    AwaitingSignature,
    Submitting,
    Success,
    Failed,
}

impl FlowPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowPhase::Success | FlowPhase::Failed)
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowPhase::Idle => "idle",
            FlowPhase::Validating => "validating",
            FlowPhase::AwaitingEnvelope => "awaiting_envelope",
            FlowPhase::AwaitingSignature => "awaiting_signature",
            FlowPhase::Submitting => "submitting",
            FlowPhase::Success => "success",
            FlowPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// What the envelope is built from.
#[derive(Debug, Clone, Copy)]
pub enum EnvelopeRequest<'r> {
    Donation(&'r DonationRequest),
    AdminBatch {
        operation: OperationType,
        rows: &'r [AdminActionProject],
    },
}

impl EnvelopeRequest<'_> {
    fn label(&self) -> &'static str {
        match self {
            EnvelopeRequest::Donation(_) => "donation",
            EnvelopeRequest::AdminBatch { .. } => "admin_batch",
        }
    }

    fn processing_title(&self) -> &'static str {
        match self {
            EnvelopeRequest::Donation(_) => "Processing your donation...",
            EnvelopeRequest::AdminBatch { .. } => "Processing your transfer...",
        }
    }

    fn completed_title(&self) -> &'static str {
        match self {
            EnvelopeRequest::Donation(_) => "Donation completed!",
            EnvelopeRequest::AdminBatch { .. } => "Transaction completed!",
        }
    }

    fn completed_body(&self, hash: &TransactionHash) -> String {
        match self {
            EnvelopeRequest::Donation(_) => format!(
                "Here is your hash:{}. This transaction will be available on your account page.",
                hash
            ),
            EnvelopeRequest::AdminBatch { .. } => format!("Here is your hash:\n{}", hash),
        }
    }
}

/// Alert text for a wallet failure during signing.
pub fn signing_alert(error: &WalletError) -> String {
    match error {
        WalletError::NotInstalled => WALLET_MISSING_ALERT.to_string(),
        other => format!("The transaction was not signed ({other}). No funds were moved."),
    }
}

/// One transaction flow over a gateway, a wallet and the shared modal.
pub struct TransactionFlow<'a, G, W> {
    gateway: &'a G,
    wallet: &'a W,
    modal: &'a Modal,
    network: &'a str,
    phase: FlowPhase,
}

impl<'a, G: BackendGateway, W: WalletBridge> TransactionFlow<'a, G, W> {
    pub fn new(gateway: &'a G, wallet: &'a W, modal: &'a Modal, network: &'a str) -> Self {
        Self {
            gateway,
            wallet,
            modal,
            network,
            phase: FlowPhase::Idle,
        }
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub(crate) fn enter(&mut self, phase: FlowPhase) {
        tracing::debug!(from = %self.phase, to = %phase, "transaction flow");
        self.phase = phase;
    }

    /// Abort during local validation: alert and fail without touching the network.
    pub(crate) fn reject(&mut self, alert: &str, reason: String) -> SdkError {
        tracing::warn!(reason = %reason, "rejected before any request");
        self.modal.alert(alert);
        self.enter(FlowPhase::Failed);
        SdkError::Validation(reason)
    }

    /// Build, sign and submit the envelope for `request`.
    pub async fn run(&mut self, request: EnvelopeRequest<'_>) -> Result<TransactionHash, SdkError> {
        let flow = request.label();

        self.enter(FlowPhase::AwaitingEnvelope);
        let envelope = match self.build_envelope(&request).await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(flow, error = %e, "failed to build transaction envelope");
                self.enter(FlowPhase::Failed);
                return Err(e.into());
            }
        };

        self.enter(FlowPhase::AwaitingSignature);
        let signed = match sign_envelope(self.wallet, &envelope, self.network).await {
            Ok(signed) => signed,
            Err(e) => {
                tracing::warn!(flow, error = %e, "wallet did not sign");
                self.modal.alert(&signing_alert(&e));
                self.enter(FlowPhase::Failed);
                return Err(e.into());
            }
        };

        self.enter(FlowPhase::Submitting);
        let modal = self.modal;
        let lock = modal.lock();
        modal.show(request.processing_title(), PROCESSING_BODY);

        match self.gateway.send_transaction(&signed).await {
            Ok(response) => {
                tracing::info!(flow, hash = %response.hash, "transaction submitted");
                lock.finish(
                    request.completed_title(),
                    &request.completed_body(&response.hash),
                );
                self.enter(FlowPhase::Success);
                Ok(response.hash)
            }
            Err(e) => {
                tracing::error!(flow, error = %e, "failed to submit signed transaction");
                lock.finish(FAILED_TITLE, &e.to_string());
                self.enter(FlowPhase::Failed);
                Err(e.into())
            }
        }
    }

    async fn build_envelope(&self, request: &EnvelopeRequest<'_>) -> Result<TransactionXdr, HttpError> {
        match request {
            EnvelopeRequest::Donation(donation) => {
                tracing::debug!(
                    project_id = %donation.project_id,
                    amount = donation.amount.value(),
                    "requesting donation envelope"
                );
                self.gateway.build_donation(donation).await
            }
            EnvelopeRequest::AdminBatch { operation, rows } => {
                tracing::debug!(operation = %operation, rows = rows.len(), "requesting admin envelope");
                self.gateway.build_admin_transaction(*operation, rows).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ModalState;
    use crate::testing::{StubGateway, StubWallet};

    fn donation() -> DonationRequest {
        DonationRequest::parse("3", "5").unwrap()
    }

    #[tokio::test]
    async fn test_successful_flow_ends_unlocked() {
        let gateway = StubGateway::new().with_envelope("XDR1").with_hash("abc123");
        let wallet = StubWallet::new().signing_as("SIGNED1");
        let modal = Modal::new();
        let mut flow = TransactionFlow::new(&gateway, &wallet, &modal, "TESTNET");

        let request = donation();
        let hash = flow.run(EnvelopeRequest::Donation(&request)).await.unwrap();

        assert_eq!(hash.as_str(), "abc123");
        assert_eq!(flow.phase(), FlowPhase::Success);
        assert_eq!(modal.state(), ModalState::Idle);
        assert_eq!(gateway.sent(), vec![TransactionXdr::from("SIGNED1")]);
        assert_eq!(wallet.signed(), vec![("XDR1".to_string(), "TESTNET".to_string())]);
    }

    #[tokio::test]
    async fn test_submit_failure_still_unlocks() {
        let gateway = StubGateway::new().with_envelope("XDR1").failing_submit();
        let wallet = StubWallet::new().signing_as("SIGNED1");
        let modal = Modal::new();
        let mut flow = TransactionFlow::new(&gateway, &wallet, &modal, "TESTNET");

        let request = donation();
        let err = flow.run(EnvelopeRequest::Donation(&request)).await.unwrap_err();

        assert!(matches!(err, SdkError::Http(_)));
        assert_eq!(flow.phase(), FlowPhase::Failed);
        let snapshot = modal.snapshot();
        assert_eq!(snapshot.state, ModalState::Idle);
        assert_eq!(snapshot.title, FAILED_TITLE);
    }

    #[tokio::test]
    async fn test_envelope_failure_shows_nothing() {
        let gateway = StubGateway::new().failing_envelope();
        let wallet = StubWallet::new();
        let modal = Modal::new();
        let mut flow = TransactionFlow::new(&gateway, &wallet, &modal, "TESTNET");

        let request = donation();
        assert!(flow.run(EnvelopeRequest::Donation(&request)).await.is_err());

        assert!(wallet.signed().is_empty());
        assert!(gateway.sent().is_empty());
        assert_eq!(modal.snapshot().title, "");
    }

    #[tokio::test]
    async fn test_missing_wallet_alerts_install_hint() {
        let gateway = StubGateway::new().with_envelope("XDR1");
        let wallet = StubWallet::new().not_installed();
        let modal = Modal::new();
        let mut flow = TransactionFlow::new(&gateway, &wallet, &modal, "TESTNET");

        let request = donation();
        let err = flow.run(EnvelopeRequest::Donation(&request)).await.unwrap_err();

        assert!(matches!(err, SdkError::Wallet(WalletError::NotInstalled)));
        assert_eq!(modal.snapshot().last_alert.as_deref(), Some(WALLET_MISSING_ALERT));
        assert!(gateway.sent().is_empty());
    }

    #[test]
    fn test_terminal_phases() {
        assert!(FlowPhase::Success.is_terminal());
        assert!(FlowPhase::Failed.is_terminal());
        assert!(!FlowPhase::Submitting.is_terminal());
        assert_eq!(FlowPhase::AwaitingSignature.to_string(), "awaiting_signature");
    }
}
