//! Auth sub-client — connect wallet, check user, logout.

use crate::auth::{Session, CONNECT_WALLET_BODY, SHARE_KEY_ALERT, WALLET_ISSUE_ALERT};
use crate::client::CrowdfundClient;
use crate::error::{SdkError, WalletError};
use crate::gateway::BackendGateway;
use crate::shared::PublicKey;
use crate::wallet::WalletBridge;
use crate::workflow::WALLET_MISSING_ALERT;

/// Sub-client for authentication operations.
pub struct Auth<'a, G, W> {
    pub(crate) client: &'a CrowdfundClient<G, W>,
}

impl<'a, G: BackendGateway, W: WalletBridge> Auth<'a, G, W> {
    /// Log in with the wallet's public key.
    ///
    /// Asks the extension for the active account and registers it with the
    /// backend session. Every failure raises an alert and leaves the client
    /// logged out.
    pub async fn connect_wallet(&self) -> Result<Session, SdkError> {
        let client = self.client;

        match client.wallet.is_connected().await {
            Ok(true) => {}
            Ok(false) | Err(WalletError::NotInstalled) => {
                tracing::warn!("wallet extension not installed");
                client.modal.alert(WALLET_MISSING_ALERT);
                return Err(WalletError::NotInstalled.into());
            }
            Err(e) => {
                tracing::warn!(error = %e, "wallet extension unavailable");
                client.modal.alert(WALLET_ISSUE_ALERT);
                return Err(e.into());
            }
        }

        let public_key = match client.wallet.get_public_key().await {
            Ok(key) if !key.is_empty() => key,
            Ok(_) => {
                tracing::warn!("wallet returned an empty public key");
                client.modal.alert(SHARE_KEY_ALERT);
                return Err(WalletError::Rejected("empty public key".into()).into());
            }
            Err(e) => {
                tracing::warn!(error = %e, "wallet refused to share its public key");
                client.modal.alert(SHARE_KEY_ALERT);
                return Err(e.into());
            }
        };

        if let Err(e) = client.gateway.login(&public_key).await {
            tracing::error!(public_key = %public_key, error = %e, "Public key was NOT sent.");
            if e.is_transport() {
                client.modal.alert(WALLET_ISSUE_ALERT);
            }
            return Err(e.into());
        }

        tracing::info!(public_key = %public_key, "wallet connected");
        let session = Session::new(public_key);
        *client.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Whether a wallet is connected. Shows the "connect your wallet" dialog
    /// when it is not.
    pub async fn check_user(&self) -> bool {
        if self.client.session.read().await.is_some() {
            return true;
        }
        self.client.modal.show("", CONNECT_WALLET_BODY);
        false
    }

    /// End the backend session. The local session is cleared even if the
    /// request fails.
    pub async fn logout(&self) -> Result<(), SdkError> {
        let result = self.client.gateway.logout().await;
        *self.client.session.write().await = None;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "logout request failed");
        }
        result.map_err(SdkError::from)
    }

    pub async fn session(&self) -> Option<Session> {
        self.client.session.read().await.clone()
    }

    pub async fn public_key(&self) -> Option<PublicKey> {
        self.client
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.public_key.clone())
    }

    pub async fn is_connected(&self) -> bool {
        self.client.session.read().await.is_some()
    }

    /// Like [`Auth::check_user`], but as an error for `?`.
    pub(crate) async fn require_session(&self) -> Result<Session, SdkError> {
        if let Some(session) = self.session().await {
            return Ok(session);
        }
        self.client.modal.show("", CONNECT_WALLET_BODY);
        Err(SdkError::NotConnected)
    }
}
