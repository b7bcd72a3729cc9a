//! Resolver context: wires a [`ResolverConfig`] into a working chain.

use super::cache::MemoryCache;
use super::config::{Backend, ResolverConfig};
use super::gai::GaiResolver;
use super::hickory::HickoryResolver;
use super::overrides::OverrideResolver;
use super::resolve::Resolve;
use super::scheduler::Schedule;
use super::strategy::OrderedResolverStrategy;
use crate::base::neterror::NetError;
use std::borrow::Cow;
use std::sync::Arc;

/// An ordered resolver built from configuration.
///
/// The chain is, in order:
/// - Override table (when overrides are configured)
/// - Memory cache (when enabled)
/// - Upstream backend (unless `Backend::None`)
///
/// The cache is exposed so the application can populate it; the strategy
/// itself only reads from it.
pub struct ResolverContext {
    strategy: Arc<OrderedResolverStrategy>,
    cache: Option<Arc<MemoryCache>>,
    config: ResolverConfig,
}

impl ResolverContext {
    /// Build the chain described by `config`.
    ///
    /// Fails with [`NetError::EmptyResolverChain`] when the config enables
    /// nothing.
    pub fn with_config(
        config: ResolverConfig,
        scheduler: Arc<dyn Schedule>,
    ) -> Result<Self, NetError> {
        let mut chain: Vec<Arc<dyn Resolve>> = Vec::new();

        if !config.overrides.is_empty() {
            let overrides = config
                .overrides
                .iter()
                .map(|(host, addrs)| (Cow::Owned(host.clone()), addrs.clone()))
                .collect();
            chain.push(Arc::new(OverrideResolver::new(overrides)));
        }

        let cache = if config.cache.enabled {
            let cache = Arc::new(MemoryCache::with_capacity(config.cache.max_entries));
            chain.push(cache.clone());
            Some(cache)
        } else {
            None
        };

        match config.backend {
            Backend::Hickory => {
                chain.push(Arc::new(HickoryResolver::with_nameservers(
                    &config.nameservers,
                )));
            }
            Backend::System => chain.push(Arc::new(GaiResolver::new())),
            Backend::None => {}
        }

        tracing::debug!(
            resolvers = chain.len(),
            cache = cache.is_some(),
            backend = ?config.backend,
            "resolver context built"
        );

        let strategy =
            OrderedResolverStrategy::new(scheduler, Arc::new(config.validator()), chain)?;

        Ok(Self {
            strategy: Arc::new(strategy),
            cache,
            config,
        })
    }

    /// Get the ordered strategy.
    pub fn strategy(&self) -> &Arc<OrderedResolverStrategy> {
        &self.strategy
    }

    /// Get the cache, if enabled.
    pub fn cache(&self) -> Option<&Arc<MemoryCache>> {
        self.cache.as_ref()
    }

    /// Get the configuration the context was built from.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl std::fmt::Debug for ResolverContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverContext")
            .field("strategy", &self.strategy)
            .field("cache", &self.cache.is_some())
            .field("backend", &self.config.backend)
            .finish()
    }
}
