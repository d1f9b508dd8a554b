// Service exports
pub mod backend;
pub mod cache;

pub use backend::{BackendClient, BackendError};
pub use cache::{normalize_email, ContextCache, CacheKey, CacheError, CacheStats};
