//! Freighter bridge over `window.freighterApi`.
//!
//! Calls are resolved dynamically through `js_sys::Reflect` so a missing
//! extension surfaces as [`WalletError::NotInstalled`] instead of a JS
//! `ReferenceError`. Both the bare-value API (`getPublicKey() -> string`) and
//! the object API (`getPublicKey() -> { publicKey }`) are understood.

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::WalletError;
use crate::shared::{PublicKey, TransactionXdr};
use crate::wallet::WalletBridge;

const API_OBJECT: &str = "freighterApi";

/// Wallet bridge backed by the Freighter browser extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreighterBridge;

impl FreighterBridge {
    pub fn new() -> Self {
        Self
    }

    /// Whether the extension has injected its API object.
    pub fn is_installed() -> bool {
        api().is_ok()
    }
}

impl WalletBridge for FreighterBridge {
    async fn is_connected(&self) -> Result<bool, WalletError> {
        let value = match call("isConnected", &Array::new()).await {
            Ok(value) => value,
            Err(WalletError::NotInstalled) => return Ok(false),
            Err(e) => return Err(e),
        };
        if let Some(connected) = value.as_bool() {
            return Ok(connected);
        }
        Ok(field(&value, "isConnected")
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    async fn get_public_key(&self) -> Result<PublicKey, WalletError> {
        let value = call("getPublicKey", &Array::new()).await?;
        let key = string_result(&value, &["publicKey", "address"])?;
        if key.is_empty() {
            return Err(WalletError::Rejected("no public key shared".to_string()));
        }
        Ok(PublicKey::from(key))
    }

    async fn sign_transaction(
        &self,
        envelope: &TransactionXdr,
        network: &str,
        public_key: &PublicKey,
    ) -> Result<TransactionXdr, WalletError> {
        let args = Array::of3(
            &JsValue::from_str(envelope.as_str()),
            &JsValue::from_str(network),
            &JsValue::from_str(public_key.as_str()),
        );
        let value = call("signTransaction", &args).await?;
        let signed = string_result(&value, &["signedTxXdr", "signedTransaction"])?;
        Ok(TransactionXdr::from(signed))
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn api() -> Result<JsValue, WalletError> {
    let window = web_sys::window()
        .ok_or_else(|| WalletError::Unavailable("no window object".to_string()))?;
    let api = Reflect::get(&window, &JsValue::from_str(API_OBJECT))
        .map_err(|e| WalletError::Unavailable(extract_js_error(&e)))?;
    if api.is_undefined() || api.is_null() {
        return Err(WalletError::NotInstalled);
    }
    Ok(api)
}

async fn call(method: &str, args: &Array) -> Result<JsValue, WalletError> {
    let api = api()?;
    let function: Function = Reflect::get(&api, &JsValue::from_str(method))
        .map_err(|e| WalletError::Unavailable(extract_js_error(&e)))?
        .dyn_into()
        .map_err(|_| WalletError::Unavailable(format!("{API_OBJECT}.{method} is not a function")))?;

    let returned = function
        .apply(&api, args)
        .map_err(|e| WalletError::Rejected(extract_js_error(&e)))?;
    JsFuture::from(Promise::resolve(&returned))
        .await
        .map_err(|e| WalletError::Rejected(extract_js_error(&e)))
}

fn field(value: &JsValue, name: &str) -> Option<JsValue> {
    if !value.is_object() {
        return None;
    }
    Reflect::get(value, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Unwrap a bare string result or one of `keys` on an object result,
/// honouring an `error` field if the extension reports one.
fn string_result(value: &JsValue, keys: &[&str]) -> Result<String, WalletError> {
    if let Some(s) = value.as_string() {
        return Ok(s);
    }
    if let Some(error) = field(value, "error") {
        return Err(WalletError::Rejected(extract_js_error(&error)));
    }
    keys.iter()
        .find_map(|key| field(value, key).and_then(|v| v.as_string()))
        .ok_or_else(|| WalletError::Unavailable("unexpected wallet response".to_string()))
}

fn extract_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        let name = error.name().as_string().unwrap_or_else(|| "Error".to_string());
        let message = error.message().as_string().unwrap_or_default();

        if !message.is_empty() {
            return format!("{}: {}", name, message);
        } else {
            return name;
        }
    }

    if let Some(s) = err.as_string() {
        if !s.is_empty() {
            return s;
        }
    }

    if let Ok(json_str) = js_sys::JSON::stringify(err) {
        if let Some(s) = json_str.as_string() {
            if !s.is_empty() && s != "null" && s != "undefined" {
                return s;
            }
        }
    }

    if err.is_undefined() {
        return "undefined error".to_string();
    }

    "Unknown wallet error".to_string()
}
