//! Ordered resolver strategy.
//!
//! Composes several resolvers into one that tries them in priority order,
//! stopping at the first success.
//!
//! # Resolution steps
//!
//! 1. IP literals (`192.0.2.1`, `2001:db8::1`) resolve to themselves without
//!    consulting any resolver.
//! 2. The name is lower-cased and checked by the [`ValidateName`]
//!    implementation. Invalid names fail with [`NetError::InvalidName`].
//! 3. Resolvers are tried one at a time, in the order given at
//!    construction. The first record wins. If every resolver fails, the
//!    error of the last one is returned unchanged.

use super::resolve::{AddressMode, AddressRecord, Name, Resolution, Resolve, Resolving};
use super::scheduler::Schedule;
use super::validator::ValidateName;
use crate::base::neterror::NetError;
use futures::future::{self, FutureExt};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Ordered, non-empty, immutable list of resolvers.
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Arc<[Arc<dyn Resolve>]>,
}

impl ResolverChain {
    /// Captures `resolvers` in the order given.
    ///
    /// Fails with [`NetError::EmptyResolverChain`] if there are none.
    pub fn new<I>(resolvers: I) -> Result<Self, NetError>
    where
        I: IntoIterator<Item = Arc<dyn Resolve>>,
    {
        let resolvers: Arc<[Arc<dyn Resolve>]> = resolvers.into_iter().collect();
        if resolvers.is_empty() {
            return Err(NetError::EmptyResolverChain);
        }
        Ok(Self { resolvers })
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Never true for a constructed chain.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Walks the chain for an already-validated name.
    async fn walk(self, name: Name, mode: AddressMode) -> Resolution {
        let mut last = NetError::EmptyResolverChain;
        for (index, resolver) in self.resolvers.iter().enumerate() {
            match resolver.resolve(name.clone(), mode).await {
                Ok(record) => {
                    tracing::trace!(domain = %name, index, address = %record, "resolver hit");
                    return Ok(record);
                }
                Err(e) => {
                    tracing::trace!(domain = %name, index, error = %e, "resolver missed");
                    last = e;
                }
            }
        }
        tracing::trace!(domain = %name, error = %last, "resolver chain exhausted");
        Err(last)
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("len", &self.resolvers.len())
            .finish_non_exhaustive()
    }
}

/// Resolver that tries a fixed list of resolvers in priority order.
///
/// Earlier resolvers are expected to be cheaper (an in-memory cache, a
/// static override table) and pre-empt later, costlier ones (network
/// lookups). At most one resolver is in flight per request, and each one
/// is asked at most once.
///
/// # Example
///
/// ```rust,ignore
/// use addrnet::dns::{
///     AddressMode, HickoryResolver, HostnameValidator, MemoryCache,
///     OrderedResolverStrategy, TokioScheduler,
/// };
/// use std::sync::Arc;
///
/// let strategy = OrderedResolverStrategy::builder(
///     Arc::new(TokioScheduler::current()),
///     Arc::new(HostnameValidator::new()),
/// )
/// .with_resolver(Arc::new(MemoryCache::new()))
/// .with_resolver(Arc::new(HickoryResolver::new()))
/// .build()?;
///
/// strategy.resolve_with("example.com", AddressMode::PreferInet4, |result| {
///     println!("{result:?}");
/// });
/// ```
pub struct OrderedResolverStrategy {
    scheduler: Arc<dyn Schedule>,
    validator: Arc<dyn ValidateName>,
    chain: ResolverChain,
}

impl OrderedResolverStrategy {
    /// Creates a strategy over `resolvers`, tried in the order given.
    ///
    /// Fails with [`NetError::EmptyResolverChain`] if `resolvers` is empty.
    pub fn new<I>(
        scheduler: Arc<dyn Schedule>,
        validator: Arc<dyn ValidateName>,
        resolvers: I,
    ) -> Result<Self, NetError>
    where
        I: IntoIterator<Item = Arc<dyn Resolve>>,
    {
        Ok(Self {
            scheduler,
            validator,
            chain: ResolverChain::new(resolvers)?,
        })
    }

    pub fn builder(
        scheduler: Arc<dyn Schedule>,
        validator: Arc<dyn ValidateName>,
    ) -> OrderedResolverStrategyBuilder {
        OrderedResolverStrategyBuilder {
            scheduler,
            validator,
            resolvers: Vec::new(),
        }
    }

    pub fn chain(&self) -> &ResolverChain {
        &self.chain
    }

    /// Resolves `name`, returning a future for the outcome.
    ///
    /// Nothing runs until the future is polled.
    pub fn lookup(&self, name: Name, mode: AddressMode) -> Resolving {
        if let Some(address) = parse_ip_literal(name.as_str()) {
            tracing::trace!(domain = %name, "ip literal, skipping resolvers");
            return future::ready(Ok(AddressRecord::new(address))).boxed();
        }

        let name = name.to_normalized();
        if !self.validator.validate(name.as_str()) {
            tracing::trace!(domain = %name, "invalid host name");
            return future::ready(Err(NetError::InvalidName)).boxed();
        }

        self.chain.clone().walk(name, mode).boxed()
    }

    /// Resolves `name` and reports the outcome to `callback`.
    ///
    /// Returns before the outcome is known. `callback` runs exactly once,
    /// from a task handed to the scheduler, never inline in this call. That
    /// holds for the IP literal and invalid name shortcuts too.
    pub fn resolve_with<F>(&self, name: impl Into<Name>, mode: AddressMode, callback: F)
    where
        F: FnOnce(Resolution) + Send + 'static,
    {
        let resolving = self.lookup(name.into(), mode);
        self.scheduler.defer(Box::pin(async move {
            callback(resolving.await);
        }));
    }
}

impl Resolve for OrderedResolverStrategy {
    fn resolve(&self, name: Name, mode: AddressMode) -> Resolving {
        self.lookup(name, mode)
    }
}

impl fmt::Debug for OrderedResolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedResolverStrategy")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

/// Builder for [`OrderedResolverStrategy`].
pub struct OrderedResolverStrategyBuilder {
    scheduler: Arc<dyn Schedule>,
    validator: Arc<dyn ValidateName>,
    resolvers: Vec<Arc<dyn Resolve>>,
}

impl OrderedResolverStrategyBuilder {
    /// Appends a resolver. Resolvers are tried in the order they are added.
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Fails with [`NetError::EmptyResolverChain`] if no resolver was added.
    pub fn build(self) -> Result<OrderedResolverStrategy, NetError> {
        OrderedResolverStrategy::new(self.scheduler, self.validator, self.resolvers)
    }
}

/// IPv4 is tried before IPv6, so dotted quads never reach the IPv6 parser.
fn parse_ip_literal(host: &str) -> Option<IpAddr> {
    if let Ok(v4) = host.parse::<Ipv4Addr>() {
        return Some(IpAddr::V4(v4));
    }
    if let Ok(v6) = host.parse::<Ipv6Addr>() {
        return Some(IpAddr::V6(v6));
    }
    None
}
