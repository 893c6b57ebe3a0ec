//! Low-level HTTP client — `CrowdfundHttp`.
//!
//! One method per backend endpoint. Nothing is retried: every endpoint either
//! moves funds or builds an envelope that is about to be signed.

use crate::domain::admin::wire::{
    BuildAdminTransactionRequest, ControlPanelRequest, ControlPanelResponse,
};
use crate::domain::admin::AdminActionProject;
use crate::domain::donation::DonationRequest;
use crate::domain::project::project_id_from_path;
use crate::domain::project::wire::{EditProjectFields, NewProjectFields};
use crate::domain::transaction::{SubmitTransactionResponse, TransactionXdrResponse};
use crate::error::HttpError;
use crate::gateway::BackendGateway;
use crate::network::OPERATION_TYPE_HEADER;
use crate::shared::{OperationType, ProjectId, PublicKey, TransactionXdr};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest response body kept in an error.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for the crowdfunding backend.
pub struct CrowdfundHttp {
    base_url: String,
    client: Client,
}

impl CrowdfundHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// `timeout` applies on native targets only; the browser's fetch has no
    /// per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;
        #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
        {
            builder = builder.cookie_store(true);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    /// Send and turn a non-2xx status into an error.
    async fn send(&self, req: RequestBuilder) -> Result<Response, HttpError> {
        let resp = req.send().await?;
        let status = resp.status();
        tracing::debug!(status = status.as_u16(), url = %resp.url(), "backend response");
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, HttpError> {
        let resp = self.send(req).await?;
        let text = resp.text().await?;
        parse_json(&text)
    }

    /// Post a project form and read the created/edited id from the page the
    /// backend redirects to.
    async fn send_project_form(&self, req: RequestBuilder) -> Result<ProjectId, HttpError> {
        let resp = self.send(req).await?;
        if let Some(id) = project_id_from_path(resp.url().path()) {
            return Ok(id);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(HttpError::UnexpectedResponse {
            body: truncate_body(&body),
        })
    }
}

impl BackendGateway for CrowdfundHttp {
    async fn login(&self, public_key: &PublicKey) -> Result<(), HttpError> {
        let req = self
            .client
            .post(self.url("/"))
            .header(CONTENT_TYPE, "multipart/form-data")
            .body(public_key.as_str().to_string());
        self.send(req).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), HttpError> {
        self.send(self.client.get(self.url("/logout"))).await?;
        Ok(())
    }

    async fn build_donation(&self, request: &DonationRequest) -> Result<TransactionXdr, HttpError> {
        let req = self.client.post(self.url("/donate")).json(request);
        let resp: TransactionXdrResponse = self.send_json(req).await?;
        Ok(resp.transaction_xdr)
    }

    async fn review_admin_operations(
        &self,
        operation: OperationType,
        selected: &[ProjectId],
    ) -> Result<Vec<AdminActionProject>, HttpError> {
        let body = ControlPanelRequest {
            selected_projects_ids: selected.to_vec(),
        };
        let req = self
            .client
            .post(self.url("/control_panel"))
            .header(OPERATION_TYPE_HEADER, operation.as_str())
            .json(&body);
        let resp: ControlPanelResponse = self.send_json(req).await?;
        Ok(resp.admin_action_projects)
    }

    async fn build_admin_transaction(
        &self,
        operation: OperationType,
        rows: &[AdminActionProject],
    ) -> Result<TransactionXdr, HttpError> {
        let body = BuildAdminTransactionRequest {
            admin_operations: rows.to_vec(),
        };
        let req = self
            .client
            .post(self.url("/build_admin_transaction"))
            .header(OPERATION_TYPE_HEADER, operation.as_str())
            .json(&body);
        let resp: TransactionXdrResponse = self.send_json(req).await?;
        Ok(resp.transaction_xdr)
    }

    async fn send_transaction(
        &self,
        signed: &TransactionXdr,
    ) -> Result<SubmitTransactionResponse, HttpError> {
        let req = self.client.post(self.url("/send_transaction")).json(signed);
        self.send_json(req).await
    }

    async fn create_project(&self, fields: &NewProjectFields) -> Result<ProjectId, HttpError> {
        let req = self.client.post(self.url("/new_project")).form(fields);
        self.send_project_form(req).await
    }

    async fn edit_project(&self, fields: &EditProjectFields) -> Result<ProjectId, HttpError> {
        let req = self.client.post(self.url("/edit_project")).form(fields);
        self.send_project_form(req).await
    }

    async fn cancel_project(&self, project_id: &ProjectId) -> Result<String, HttpError> {
        let path = format!("/project/{}", urlencoding::encode(project_id.as_str()));
        let resp = self.send(self.client.post(self.url(&path))).await?;
        Ok(resp.text().await?.trim().to_string())
    }
}

// ── Response helpers ─────────────────────────────────────────────────────────

fn status_error(status: u16, body: &str) -> HttpError {
    let body = truncate_body(body);
    match status {
        401 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

/// Parse a 2xx body. Anything that is not the expected JSON is the
/// backend's rendered message page.
fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, HttpError> {
    serde_json::from_str(text).map_err(|e| {
        tracing::debug!(error = %e, "response is not the expected JSON");
        HttpError::UnexpectedResponse {
            body: truncate_body(text),
        }
    })
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}
