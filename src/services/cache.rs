use crate::models::UserContext;
use crate::services::backend::{BackendClient, BackendError};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while resolving a user context
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-memory cache of derived recommendation contexts
///
/// Entries are rebuilt from the backend after the TTL expires, so a changed
/// follow list or label set shows up within one TTL.
pub struct ContextCache {
    contexts: moka::future::Cache<String, UserContext>,
}

impl ContextCache {
    /// Create a new context cache
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let contexts = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { contexts }
    }

    /// Get a cached context
    pub async fn get(&self, email: &str) -> Result<UserContext, CacheError> {
        let key = CacheKey::context(email);
        match self.contexts.get(&key).await {
            Some(ctx) => {
                tracing::trace!("Context cache hit: {}", key);
                Ok(ctx)
            }
            None => {
                tracing::trace!("Context cache miss: {}", key);
                Err(CacheError::CacheMiss(key))
            }
        }
    }

    /// Store a context, overwriting any previous entry
    pub async fn set(&self, email: &str, context: UserContext) {
        let key = CacheKey::context(email);
        self.contexts.insert(key.clone(), context).await;
        tracing::trace!("Context cache set: {}", key);
    }

    /// Drop a user's cached context
    pub async fn invalidate(&self, email: &str) {
        self.contexts.invalidate(&CacheKey::context(email)).await;
    }

    /// Return the cached context or derive it from the profile and follow list
    ///
    /// The email is normalised before both the cache lookup and the backend
    /// calls. Failed lookups are not cached.
    pub async fn resolve(
        &self,
        email: &str,
        backend: &BackendClient,
    ) -> Result<UserContext, CacheError> {
        let email = normalize_email(email);
        if let Ok(ctx) = self.get(&email).await {
            return Ok(ctx);
        }

        let (profile, following) =
            tokio::try_join!(backend.get_profile(&email), backend.get_following(&email))?;

        let context = UserContext::from_profile(&profile.user_label, &following);
        tracing::debug!(
            "Derived context for {}: {} followed, {} labels",
            email,
            context.followed.len(),
            context.labels.len()
        );

        self.set(&email, context.clone()).await;
        Ok(context)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.contexts.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Emails compare case-insensitively and ignore surrounding whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a user's recommendation context
    pub fn context(email: &str) -> String {
        format!("context:{}", normalize_email(email))
    }
}
