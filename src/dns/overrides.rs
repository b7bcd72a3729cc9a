//! Static hostname overrides.

use super::resolve::{AddressMode, AddressRecord, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use std::{borrow::Cow, collections::HashMap, fmt, net::IpAddr, sync::Arc};

/// Resolver that answers from a fixed hostname-to-address table.
///
/// Names missing from the table report [`NetError::NameNotResolved`], so
/// in an ordered chain the next resolver gets its turn. Useful for:
/// - Testing without real DNS
/// - Forcing specific IPs for certain domains
/// - Local development with custom hostnames
///
/// # Example
///
/// ```rust,ignore
/// use addrnet::dns::OverrideResolver;
/// use std::collections::HashMap;
///
/// let mut overrides = HashMap::new();
/// overrides.insert("api.local".into(), vec!["127.0.0.1".parse().unwrap()]);
///
/// let resolver = OverrideResolver::new(overrides);
/// ```
#[derive(Clone)]
pub struct OverrideResolver {
    overrides: Arc<HashMap<Cow<'static, str>, Vec<IpAddr>>>,
}

impl OverrideResolver {
    /// Creates a resolver with the given overrides.
    ///
    /// Keys are lower-cased and lookups normalize the queried name, so
    /// matching is ASCII case-insensitive.
    pub fn new(overrides: HashMap<Cow<'static, str>, Vec<IpAddr>>) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(host, addrs)| {
                let host = if host.bytes().any(|b| b.is_ascii_uppercase()) {
                    Cow::Owned(host.to_ascii_lowercase())
                } else {
                    host
                };
                (host, addrs)
            })
            .collect();
        Self {
            overrides: Arc::new(overrides),
        }
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Resolve for OverrideResolver {
    fn resolve(&self, name: Name, mode: AddressMode) -> Resolving {
        let name = name.to_normalized();
        let result = self
            .overrides
            .get(name.as_str())
            .and_then(|addrs| mode.select(addrs.iter().copied()))
            .map(AddressRecord::new)
            .ok_or(NetError::NameNotResolved);
        if let Ok(record) = &result {
            tracing::debug!(domain = %name, address = %record, "override hit");
        }
        Box::pin(std::future::ready(result))
    }
}

impl fmt::Debug for OverrideResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideResolver")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}
