//! High-level client — `CrowdfundClient` with nested sub-client accessors.
//!
//! The client is the page controller: it is constructed once and owns every
//! piece of state the page used to keep in globals (the shared modal, the
//! wallet session, the gateway and the wallet bridge). Each domain has its own
//! sub-client in `domain/<name>/client.rs`.

use crate::auth::client::Auth;
use crate::auth::Session;
use crate::domain::admin::client::Admin;
use crate::domain::donation::client::Donations;
use crate::domain::project::client::Projects;
use crate::error::SdkError;
use crate::gateway::BackendGateway;
use crate::modal::{Modal, ModalListener};
use crate::wallet::WalletBridge;
use crate::workflow::TransactionFlow;

#[cfg(feature = "http")]
use crate::http::CrowdfundHttp;

use async_lock::RwLock;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::admin::client::Admin as AdminClient;
pub use crate::domain::donation::client::Donations as DonationsClient;
pub use crate::domain::project::client::Projects as ProjectsClient;

/// A client talking to the real backend over HTTP.
#[cfg(feature = "http")]
pub type HttpCrowdfundClient<W> = CrowdfundClient<CrowdfundHttp, W>;

/// The primary entry point for the Lumenfund SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.donations()`, `client.admin()`, etc.
pub struct CrowdfundClient<G, W> {
    pub(crate) gateway: G,
    pub(crate) wallet: W,
    pub(crate) modal: Modal,
    pub(crate) network: String,
    /// Connected wallet, set by `auth().connect_wallet()`.
    pub(crate) session: RwLock<Option<Session>>,
}

impl CrowdfundClient<(), ()> {
    pub fn builder() -> CrowdfundClientBuilder {
        CrowdfundClientBuilder::default()
    }
}

impl<G, W> CrowdfundClient<G, W> {
    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_, G, W> {
        Auth { client: self }
    }

    pub fn donations(&self) -> Donations<'_, G, W> {
        Donations { client: self }
    }

    pub fn admin(&self) -> Admin<'_, G, W> {
        Admin { client: self }
    }

    pub fn projects(&self) -> Projects<'_, G, W> {
        Projects { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Network name passed to the wallet when signing.
    pub fn network(&self) -> &str {
        &self.network
    }
}

impl<G: BackendGateway, W: WalletBridge> CrowdfundClient<G, W> {
    pub(crate) fn flow(&self) -> TransactionFlow<'_, G, W> {
        TransactionFlow::new(&self.gateway, &self.wallet, &self.modal, &self.network)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CrowdfundClientBuilder {
    base_url: String,
    network: String,
    request_timeout: Duration,
    modal_listener: Option<ModalListener>,
    session: Option<Session>,
}

impl Default for CrowdfundClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_BASE_URL.to_string(),
            network: crate::network::DEFAULT_NETWORK.to_string(),
            request_timeout: Duration::from_secs(30),
            modal_listener: None,
            session: None,
        }
    }
}

impl CrowdfundClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn network(mut self, network: &str) -> Self {
        self.network = network.to_string();
        self
    }

    /// Per-request timeout (native only; the browser's fetch has its own).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Receive every modal change, e.g. to render it into the DOM.
    pub fn modal_listener(mut self, listener: ModalListener) -> Self {
        self.modal_listener = Some(listener);
        self
    }

    /// Start with an already connected wallet (e.g. a server-rendered session).
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Build a client over the HTTP gateway.
    #[cfg(feature = "http")]
    pub fn build<W: WalletBridge>(self, wallet: W) -> Result<HttpCrowdfundClient<W>, SdkError> {
        let gateway = CrowdfundHttp::with_timeout(&self.base_url, self.request_timeout)?;
        Ok(self.build_with_gateway(gateway, wallet))
    }

    /// Build a client over any gateway implementation.
    pub fn build_with_gateway<G: BackendGateway, W: WalletBridge>(
        self,
        gateway: G,
        wallet: W,
    ) -> CrowdfundClient<G, W> {
        let modal = match self.modal_listener {
            Some(listener) => Modal::with_listener(listener),
            None => Modal::new(),
        };
        CrowdfundClient {
            gateway,
            wallet,
            modal,
            network: self.network,
            session: RwLock::new(self.session),
        }
    }
}
