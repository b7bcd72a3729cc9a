//! Ergonomic error context helpers.
//!
//! Provides extension traits for converting IO errors from system lookups
//! into `NetError` codes.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Map a failed system lookup for `domain` onto a resolution error.
    ///
    /// Timeouts become [`NetError::DnsTimedOut`] and names the system
    /// refuses outright (such as ones with an interior NUL) become
    /// [`NetError::AddressInvalid`]. Everything else becomes the miss code
    /// [`NetError::NameNotResolved`], since `getaddrinfo` failures do not
    /// carry a portable error kind.
    ///
    /// # Example
    /// ```ignore
    /// use addrnet::base::context::IoResultExt;
    ///
    /// let addrs = ("example.com", 0).to_socket_addrs().dns_context("example.com")?;
    /// ```
    fn dns_context(self, domain: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| {
            tracing::debug!(domain = %domain, error = %e, "system lookup failed");
            match e.kind() {
                io::ErrorKind::TimedOut => NetError::DnsTimedOut,
                io::ErrorKind::InvalidInput => NetError::AddressInvalid,
                _ => NetError::NameNotResolved,
            }
        })
    }
}
