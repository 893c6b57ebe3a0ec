//! # Lumenfund SDK
//!
//! Client-side workflows of the Lumenfund crowdfunding app for native and
//! WASM targets: donations, admin fund/refund batches, project forms and the
//! wallet session.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Newtypes, domain types and validation (always available, WASM-safe)
//! 2. **Boundaries** — `WalletBridge` (key custody, signing) and `BackendGateway` (endpoints)
//! 3. **Workflow** — `TransactionFlow` and the lockable `Modal`
//! 4. **HTTP API** — `CrowdfundHttp`, the reqwest gateway
//! 5. **High-Level Client** — `CrowdfundClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lumenfund_sdk::prelude::*;
//! use lumenfund_sdk::wallet::freighter::FreighterBridge;
//!
//! let client = CrowdfundClient::builder()
//!     .base_url("http://127.0.0.1:5000")
//!     .build(FreighterBridge)?;
//!
//! client.auth().connect_wallet().await?;
//! let hash = client.donations().submit("7", "25").await?;
//!
//! let review = client.admin().review(&["1".into(), "2".into()], OperationType::Refund).await?;
//! let hash = client.admin().confirm(&review).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network and backend constants.
pub mod network;

// ── Layer 2: Boundaries ──────────────────────────────────────────────────────

/// Wallet extension contract and the Freighter bridge.
pub mod wallet;

/// Backend endpoint contract.
pub mod gateway;

/// Wallet login and page session.
pub mod auth;

// ── Layer 3: Workflow ────────────────────────────────────────────────────────

/// Shared progress dialog with scoped locking.
pub mod modal;

/// Envelope → signature → submission state machine.
pub mod workflow;

// ── Layer 4: HTTP API ────────────────────────────────────────────────────────

/// reqwest implementation of the backend gateway.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `CrowdfundClient` — the primary entry point.
pub mod client;

/// In-memory gateway and wallet.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{
        Amount, OperationType, ProjectId, PublicKey, TransactionHash, TransactionXdr,
    };

    // Domain types
    pub use crate::domain::admin::{AdminActionProject, AdminBatchRequest, AdminReview};
    pub use crate::domain::donation::DonationRequest;
    pub use crate::domain::project::image::ProjectImage;
    pub use crate::domain::project::selection::ProjectSelection;
    pub use crate::domain::project::{
        Category, EditProjectForm, NewProjectForm, ProjectFormError, ProjectStatus,
    };

    // Errors
    pub use crate::error::{HttpError, SdkError, WalletError};

    // Network
    pub use crate::network::{DEFAULT_BASE_URL, DEFAULT_NETWORK};

    // Boundaries
    pub use crate::auth::Session;
    pub use crate::gateway::BackendGateway;
    pub use crate::wallet::WalletBridge;

    // Workflow
    pub use crate::modal::{
        ConfirmationTable, Modal, ModalEvent, ModalListener, ModalSnapshot, ModalState,
    };
    pub use crate::workflow::{FlowPhase, TransactionFlow};

    // Client + sub-clients
    pub use crate::client::{
        AdminClient, AuthClient, CrowdfundClient, CrowdfundClientBuilder, DonationsClient,
        ProjectsClient,
    };
    #[cfg(feature = "http")]
    pub use crate::client::HttpCrowdfundClient;
    #[cfg(feature = "http")]
    pub use crate::http::CrowdfundHttp;
}
