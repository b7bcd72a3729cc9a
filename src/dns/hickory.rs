//! Async DNS resolver using hickory-dns.
//!
//! This resolver provides fully async upstream resolution with support for:
//! - System DNS configuration auto-detection
//! - Explicit nameservers
//! - IPv4 and IPv6 lookups, filtered by [`AddressMode`]
//!
//! # Performance
//!
//! Unlike `GaiResolver`, this resolver is fully async and doesn't require
//! spawning blocking tasks. It maintains connection pools to DNS servers
//! for better performance under load.

use super::resolve::{AddressMode, AddressRecord, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use hickory_resolver::{
    config::{LookupIpStrategy, NameServerConfigGroup, ResolverConfig},
    name_server::TokioConnectionProvider,
    proto::{op::ResponseCode, ProtoErrorKind},
    ResolveError, ResolveErrorKind, TokioResolver,
};
use std::{
    net::SocketAddr,
    sync::{Arc, LazyLock},
};

/// Async DNS resolver backed by hickory-dns.
///
/// [`HickoryResolver::new`] shares one lazily initialized, system-configured
/// resolver across all instances. [`HickoryResolver::with_nameservers`]
/// builds a dedicated one.
///
/// # Example
///
/// ```rust,ignore
/// use addrnet::dns::{AddressMode, HickoryResolver, Name, Resolve};
///
/// let resolver = HickoryResolver::new();
/// let record = resolver.resolve(Name::new("example.com"), AddressMode::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: Arc<TokioResolver>,
}

impl HickoryResolver {
    /// Creates a new `HickoryResolver` using the system configuration.
    ///
    /// The underlying resolver is lazily initialized on first use. It will
    /// attempt to read system DNS configuration; if that fails, it falls back
    /// to sensible defaults.
    pub fn new() -> Self {
        static RESOLVER: LazyLock<Arc<TokioResolver>> = LazyLock::new(|| {
            let mut builder = match TokioResolver::builder_tokio() {
                Ok(builder) => {
                    tracing::debug!("Using system DNS configuration");
                    builder
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to read system DNS config, using defaults"
                    );
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                }
            };

            // Both families, so AddressMode can choose
            builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

            Arc::new(builder.build())
        });

        Self {
            resolver: Arc::clone(&RESOLVER),
        }
    }

    /// Creates a resolver that queries `nameservers` over UDP (with TCP
    /// fallback) instead of the system configuration.
    ///
    /// An empty list means the system configuration, same as [`Self::new`].
    pub fn with_nameservers(nameservers: &[SocketAddr]) -> Self {
        if nameservers.is_empty() {
            return Self::new();
        }

        let mut group = NameServerConfigGroup::new();
        for server in nameservers {
            group.merge(NameServerConfigGroup::from_ips_clear(
                &[server.ip()],
                server.port(),
                true,
            ));
        }

        let config = ResolverConfig::from_parts(None, vec![], group);
        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

        tracing::debug!(count = nameservers.len(), "Using explicit DNS nameservers");
        Self {
            resolver: Arc::new(builder.build()),
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a hickory failure onto the resolver error contract.
///
/// Server-side failure codes are checked before the generic no-records
/// case, since hickory reports SERVFAIL and FORMERR answers as empty
/// responses too.
fn map_resolve_error(error: &ResolveError) -> NetError {
    if let ResolveErrorKind::Proto(proto) = error.kind() {
        match proto.kind() {
            ProtoErrorKind::Timeout => return NetError::DnsTimedOut,
            ProtoErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
                ResponseCode::ServFail => return NetError::DnsServerFailed,
                ResponseCode::FormErr => return NetError::DnsMalformedResponse,
                _ => {}
            },
            _ => {}
        }
    }

    if error.is_no_records_found() || error.is_nx_domain() {
        NetError::NameNotResolved
    } else {
        NetError::NameResolutionFailed
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name, mode: AddressMode) -> Resolving {
        let resolver = Arc::clone(&self.resolver);
        Box::pin(async move {
            let domain = name.as_str();
            tracing::debug!(domain = %domain, ?mode, "resolving via hickory-dns");

            let lookup = resolver.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
                map_resolve_error(&e)
            })?;

            match mode.select(lookup.iter()) {
                Some(address) => {
                    tracing::debug!(domain = %domain, address = %address, "hickory-dns resolution complete");
                    Ok(AddressRecord::new(address))
                }
                None => {
                    tracing::debug!(domain = %domain, ?mode, "no address of requested family");
                    Err(NetError::NameNotResolved)
                }
            }
        })
    }
}
