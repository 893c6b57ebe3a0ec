//! Wallet bridge — key custody and transaction signing live outside the app.
//!
//! The SDK only defines the contract it expects from the wallet extension.
//! In the browser the `freighter` feature provides [`freighter::FreighterBridge`],
//! backed by the `window.freighterApi` object the extension injects. Anything
//! else (a hardware signer, a test stub) can implement [`WalletBridge`].
//!
//! Every error a bridge returns is read as "the user declined or the extension
//! is unavailable". The workflow aborts the current action and leaves the
//! client usable.

#[cfg(all(feature = "freighter", target_arch = "wasm32"))]
pub mod freighter;

use crate::error::WalletError;
use crate::shared::{PublicKey, TransactionXdr};

/// Contract expected from the wallet extension.
#[allow(async_fn_in_trait)]
pub trait WalletBridge {
    /// Whether the extension is installed and reachable.
    async fn is_connected(&self) -> Result<bool, WalletError>;

    /// The active account's public key. Fails if the user refuses to share it.
    async fn get_public_key(&self) -> Result<PublicKey, WalletError>;

    /// Sign `envelope` for `network` with the account `public_key`.
    async fn sign_transaction(
        &self,
        envelope: &TransactionXdr,
        network: &str,
        public_key: &PublicKey,
    ) -> Result<TransactionXdr, WalletError>;
}

/// Look up the active account and have it sign `envelope`.
pub async fn sign_envelope<W: WalletBridge + ?Sized>(
    wallet: &W,
    envelope: &TransactionXdr,
    network: &str,
) -> Result<TransactionXdr, WalletError> {
    let public_key = wallet.get_public_key().await?;
    tracing::debug!(public_key = %public_key, network, "requesting wallet signature");
    wallet
        .sign_transaction(envelope, network, &public_key)
        .await
}
