//! Network constants for the Lumenfund SDK.

/// Default backend base URL (the Flask app's development address).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Network name passed to the wallet when signing.
pub const DEFAULT_NETWORK: &str = "TESTNET";

/// Header carrying the admin operation type (`fund` / `refund`).
pub const OPERATION_TYPE_HEADER: &str = "Operation-Type";
