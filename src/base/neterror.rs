use thiserror::Error;

/// Resolution error codes.
///
/// Codes follow Chromium's `net_error_list.h` where a matching entry exists.
/// Codes specific to this crate start at -900.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NetError {
    // Host resolution
    /// The resolver has no answer for the name. Every backend reports a miss
    /// with this code.
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Address invalid")]
    AddressInvalid,
    #[error("Name resolution failed")]
    NameResolutionFailed,

    // DNS
    #[error("DNS malformed response")]
    DnsMalformedResponse,
    #[error("DNS server failed")]
    DnsServerFailed,
    #[error("DNS timed out")]
    DnsTimedOut,

    // Custom codes
    #[error("Invalid host name")]
    InvalidName,
    #[error("Resolver chain is empty")]
    EmptyResolverChain,

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::NameNotResolved => -105,
            NetError::AddressInvalid => -108,
            NetError::NameResolutionFailed => -137,

            NetError::DnsMalformedResponse => -800,
            NetError::DnsServerFailed => -802,
            NetError::DnsTimedOut => -803,

            NetError::InvalidName => -900,
            NetError::EmptyResolverChain => -901,
            NetError::Unknown(code) => *code,
        }
    }

    /// Whether this is the resolver-agnostic miss code.
    pub fn is_miss(&self) -> bool {
        matches!(self, NetError::NameNotResolved)
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -105 => NetError::NameNotResolved,
            -108 => NetError::AddressInvalid,
            -137 => NetError::NameResolutionFailed,

            -800 => NetError::DnsMalformedResponse,
            -802 => NetError::DnsServerFailed,
            -803 => NetError::DnsTimedOut,

            -900 => NetError::InvalidName,
            -901 => NetError::EmptyResolverChain,
            _ => NetError::Unknown(code),
        }
    }
}
