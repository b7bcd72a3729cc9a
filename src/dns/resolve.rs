//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the foundation of the DNS abstraction layer.

use crate::base::neterror::NetError;
use std::{fmt, future::Future, net::IpAddr, pin::Pin, sync::Arc};

/// A domain name to resolve into an IP address.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }

    /// Returns the name with ASCII letters lower-cased.
    ///
    /// Host names compare case-insensitively, so resolvers and caches only
    /// ever see the normalized form.
    pub fn to_normalized(&self) -> Self {
        if self.host.bytes().any(|b| b.is_ascii_uppercase()) {
            Self::new(self.host.to_ascii_lowercase())
        } else {
            self.clone()
        }
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Address family of a resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4 (`A` record).
    Inet4,
    /// IPv6 (`AAAA` record).
    Inet6,
}

impl AddressFamily {
    /// Returns the family of `address`.
    pub fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => AddressFamily::Inet4,
            IpAddr::V6(_) => AddressFamily::Inet6,
        }
    }
}

/// Which address families a caller wants back.
///
/// This is a hint: each resolver decides how to honour it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    /// IPv4 addresses only.
    Inet4,
    /// IPv6 addresses only.
    Inet6,
    /// Any family, IPv4 first.
    #[default]
    PreferInet4,
    /// Any family, IPv6 first.
    PreferInet6,
}

impl AddressMode {
    /// Families to try, in preference order.
    pub fn families(self) -> &'static [AddressFamily] {
        match self {
            AddressMode::Inet4 => &[AddressFamily::Inet4],
            AddressMode::Inet6 => &[AddressFamily::Inet6],
            AddressMode::PreferInet4 => &[AddressFamily::Inet4, AddressFamily::Inet6],
            AddressMode::PreferInet6 => &[AddressFamily::Inet6, AddressFamily::Inet4],
        }
    }

    /// Picks one address out of `candidates` according to this mode.
    ///
    /// Within a family the first candidate wins, so upstream ordering is
    /// preserved.
    pub fn select<I>(self, candidates: I) -> Option<IpAddr>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let candidates: Vec<IpAddr> = candidates.into_iter().collect();
        self.families().iter().find_map(|family| {
            candidates
                .iter()
                .find(|ip| AddressFamily::of(ip) == *family)
                .copied()
        })
    }
}

/// A successfully resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRecord {
    address: IpAddr,
}

impl AddressRecord {
    pub fn new(address: IpAddr) -> Self {
        Self { address }
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.address)
    }
}

impl From<IpAddr> for AddressRecord {
    fn from(address: IpAddr) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.address, f)
    }
}

/// Outcome of a single resolution.
pub type Resolution = Result<AddressRecord, NetError>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Resolution> + Send>>;

/// Trait for DNS resolution.
///
/// Implementations must be thread-safe.
///
/// # Contract
///
/// - The returned future completes exactly once, with a record or an error.
/// - A resolver with no answer for `name` reports
///   [`NetError::NameNotResolved`]. Any other code is a backend failure.
/// - Nothing is delivered before the caller polls the future.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to an address, guided by `mode`.
    fn resolve(&self, name: Name, mode: AddressMode) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name, mode: AddressMode) -> Resolving {
        (**self).resolve(name, mode)
    }
}
