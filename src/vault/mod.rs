//! Vault module — encrypted record storage.
//!
//! This module provides:
//! - `Record` and `RecordUpdate` types (`record`)
//! - The SQLite `accounts` schema (`schema`)
//! - `RecordStore` for CRUD over encrypted records (`store`)
//! - `VaultSession` for opening and closing a vault (`session`)

pub mod record;
pub mod schema;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use record::{Record, RecordUpdate};
pub use session::VaultSession;
pub use store::RecordStore;
