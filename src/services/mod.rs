// Service exports
pub mod providers;
pub mod sessions;

pub use providers::{sample_providers, ProviderStore, StoreError};
pub use sessions::{SessionError, SessionKey, SessionStore};
