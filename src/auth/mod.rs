//! Authentication — wallet login, logout, and the page session.
//!
//! ## Session Model
//!
//! The backend keeps the logged-in public key in its own session cookie.
//! In the browser the cookie travels automatically; on native targets the
//! `native` feature enables reqwest's cookie store so it survives between
//! calls. The SDK additionally keeps a [`Session`] so page actions can check
//! for a connected wallet without a round trip.
//!
//! Login never signs anything. The wallet only has to share its public key.

pub mod client;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::PublicKey;

/// Alert raised when the wallet refuses to share its public key.
pub const SHARE_KEY_ALERT: &str = "You have to share your key to log in";

/// Alert raised when login fails on the way to the backend.
pub const WALLET_ISSUE_ALERT: &str = "Freighter ran through some issue. Please try again later";

/// Body shown when a page action needs a connected wallet.
pub const CONNECT_WALLET_BODY: &str = "You need to connect you wallet first!";

/// The connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub public_key: PublicKey,
    pub connected_at: DateTime<Utc>,
}

impl Session {
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            connected_at: Utc::now(),
        }
    }
}
