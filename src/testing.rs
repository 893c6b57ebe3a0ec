//! In-memory gateway and wallet for tests. Enabled by the `testing` feature.
//!
//! Both record every call so a test can assert what reached the backend and
//! what the wallet was asked to sign.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::admin::AdminActionProject;
use crate::domain::donation::DonationRequest;
use crate::domain::project::wire::{EditProjectFields, NewProjectFields};
use crate::domain::transaction::SubmitTransactionResponse;
use crate::error::{HttpError, WalletError};
use crate::gateway::BackendGateway;
use crate::shared::{OperationType, ProjectId, PublicKey, TransactionXdr};
use crate::wallet::WalletBridge;

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Login(PublicKey),
    Logout,
    BuildDonation(DonationRequest),
    ReviewAdmin {
        operation: OperationType,
        selected: Vec<ProjectId>,
    },
    BuildAdmin {
        operation: OperationType,
        rows: Vec<AdminActionProject>,
    },
    SendTransaction(TransactionXdr),
    CreateProject(NewProjectFields),
    EditProject(EditProjectFields),
    CancelProject(ProjectId),
}

// ─── StubGateway ─────────────────────────────────────────────────────────────

/// A [`BackendGateway`] answering from canned values.
pub struct StubGateway {
    envelope: TransactionXdr,
    hash: String,
    review_rows: Option<Vec<AdminActionProject>>,
    created_project: ProjectId,
    fail_envelope: bool,
    fail_submit: bool,
    login_error: Mutex<Option<HttpError>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            envelope: TransactionXdr::from("XDR"),
            hash: "HASH".to_string(),
            review_rows: None,
            created_project: ProjectId::from("1"),
            fail_envelope: false,
            fail_submit: false,
            login_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_envelope(mut self, xdr: &str) -> Self {
        self.envelope = TransactionXdr::from(xdr);
        self
    }

    pub fn failing_envelope(mut self) -> Self {
        self.fail_envelope = true;
        self
    }

    pub fn with_hash(mut self, hash: &str) -> Self {
        self.hash = hash.to_string();
        self
    }

    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    /// Rows returned by `/control_panel`. By default every selected id is
    /// echoed back with 10 donated.
    pub fn with_review_rows(mut self, rows: Vec<AdminActionProject>) -> Self {
        self.review_rows = Some(rows);
        self
    }

    /// The next login fails with `error`.
    pub fn failing_login(self, error: HttpError) -> Self {
        *locked(&self.login_error) = Some(error);
        self
    }

    pub fn with_created_project(mut self, id: &str) -> Self {
        self.created_project = ProjectId::from(id);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        locked(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Signed envelopes submitted through `/send_transaction`.
    pub fn sent(&self) -> Vec<TransactionXdr> {
        locked(&self.calls)
            .iter()
            .filter_map(|c| match c {
                GatewayCall::SendTransaction(xdr) => Some(xdr.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        locked(&self.calls).push(call);
    }

    fn envelope(&self) -> Result<TransactionXdr, HttpError> {
        if self.fail_envelope {
            return Err(HttpError::UnexpectedResponse {
                body: "<h1>Project is not active</h1>".to_string(),
            });
        }
        Ok(self.envelope.clone())
    }
}

impl BackendGateway for StubGateway {
    async fn login(&self, public_key: &PublicKey) -> Result<(), HttpError> {
        self.record(GatewayCall::Login(public_key.clone()));
        match locked(&self.login_error).take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn logout(&self) -> Result<(), HttpError> {
        self.record(GatewayCall::Logout);
        Ok(())
    }

    async fn build_donation(&self, request: &DonationRequest) -> Result<TransactionXdr, HttpError> {
        self.record(GatewayCall::BuildDonation(request.clone()));
        self.envelope()
    }

    async fn review_admin_operations(
        &self,
        operation: OperationType,
        selected: &[ProjectId],
    ) -> Result<Vec<AdminActionProject>, HttpError> {
        self.record(GatewayCall::ReviewAdmin {
            operation,
            selected: selected.to_vec(),
        });
        let rows = match &self.review_rows {
            Some(rows) => rows.clone(),
            None => selected
                .iter()
                .map(|id| {
                    AdminActionProject::new(
                        id.clone(),
                        format!("Project {id}"),
                        PublicKey::from("GOWNER"),
                        10,
                    )
                })
                .collect(),
        };
        Ok(rows)
    }

    async fn build_admin_transaction(
        &self,
        operation: OperationType,
        rows: &[AdminActionProject],
    ) -> Result<TransactionXdr, HttpError> {
        self.record(GatewayCall::BuildAdmin {
            operation,
            rows: rows.to_vec(),
        });
        self.envelope()
    }

    async fn send_transaction(
        &self,
        signed: &TransactionXdr,
    ) -> Result<SubmitTransactionResponse, HttpError> {
        self.record(GatewayCall::SendTransaction(signed.clone()));
        if self.fail_submit {
            return Err(HttpError::ServerError {
                status: 500,
                body: "tx_failed".to_string(),
            });
        }
        Ok(SubmitTransactionResponse::new(self.hash.as_str()))
    }

    async fn create_project(&self, fields: &NewProjectFields) -> Result<ProjectId, HttpError> {
        self.record(GatewayCall::CreateProject(fields.clone()));
        Ok(self.created_project.clone())
    }

    async fn edit_project(&self, fields: &EditProjectFields) -> Result<ProjectId, HttpError> {
        self.record(GatewayCall::EditProject(fields.clone()));
        Ok(fields.project_id.clone())
    }

    async fn cancel_project(&self, project_id: &ProjectId) -> Result<String, HttpError> {
        self.record(GatewayCall::CancelProject(project_id.clone()));
        Ok(format!("Project {project_id} was cancelled."))
    }
}

// ─── StubWallet ──────────────────────────────────────────────────────────────

/// A [`WalletBridge`] with a fixed account.
pub struct StubWallet {
    installed: bool,
    public_key: Option<PublicKey>,
    signature: Result<TransactionXdr, WalletError>,
    signed: Mutex<Vec<(String, String)>>,
}

impl Default for StubWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl StubWallet {
    /// Installed, account `GDONOR`, signs everything as `SIGNED`.
    pub fn new() -> Self {
        Self {
            installed: true,
            public_key: Some(PublicKey::from("GDONOR")),
            signature: Ok(TransactionXdr::from("SIGNED")),
            signed: Mutex::new(Vec::new()),
        }
    }

    pub fn signing_as(mut self, xdr: &str) -> Self {
        self.signature = Ok(TransactionXdr::from(xdr));
        self
    }

    /// The user rejects every signature request.
    pub fn declining(mut self) -> Self {
        self.signature = Err(WalletError::Rejected("User declined access".to_string()));
        self
    }

    /// The user refuses to share the public key.
    pub fn refusing_key(mut self) -> Self {
        self.public_key = None;
        self
    }

    pub fn not_installed(mut self) -> Self {
        self.installed = false;
        self
    }

    /// `(envelope, network)` of every signing request.
    pub fn signed(&self) -> Vec<(String, String)> {
        locked(&self.signed).clone()
    }
}

impl WalletBridge for StubWallet {
    async fn is_connected(&self) -> Result<bool, WalletError> {
        Ok(self.installed)
    }

    async fn get_public_key(&self) -> Result<PublicKey, WalletError> {
        if !self.installed {
            return Err(WalletError::NotInstalled);
        }
        self.public_key
            .clone()
            .ok_or_else(|| WalletError::Rejected("User declined access".to_string()))
    }

    async fn sign_transaction(
        &self,
        envelope: &TransactionXdr,
        network: &str,
        _public_key: &PublicKey,
    ) -> Result<TransactionXdr, WalletError> {
        if !self.installed {
            return Err(WalletError::NotInstalled);
        }
        locked(&self.signed).push((envelope.to_string(), network.to_string()));
        self.signature.clone()
    }
}
