//! Per-call token options

use std::sync::Arc;

use super::ttl::TokenTtlResolver;

/// Options that change how tokens are issued
#[derive(Clone, Default)]
pub struct TokenOptions {
    /// Replaces the service's resolver when set
    pub ttl_resolver: Option<Arc<dyn TokenTtlResolver>>,
}

impl TokenOptions {
    pub fn with_ttl_resolver(ttl_resolver: Arc<dyn TokenTtlResolver>) -> Self {
        Self {
            ttl_resolver: Some(ttl_resolver),
        }
    }
}

impl std::fmt::Debug for TokenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenOptions")
            .field("ttl_resolver", &self.ttl_resolver.is_some())
            .finish()
    }
}
