//! Host name syntax validation.

/// Tests whether a string is syntactically a legal host name.
///
/// Implementations must be pure: no I/O, no side effects.
pub trait ValidateName: Send + Sync {
    fn validate(&self, name: &str) -> bool;
}

/// Maximum length of a name in presentation form, without the root dot.
const MAX_NAME_LEN: usize = 253;
/// Maximum length of a single label.
const MAX_LABEL_LEN: usize = 63;

/// RFC 1123 host name validator.
///
/// Accepts names whose labels are 1 to 63 characters of ASCII letters,
/// digits and `-`, with no label starting or ending in `-`. A single
/// trailing dot (fully qualified form) is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameValidator {
    allow_underscore: bool,
}

impl HostnameValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept `_` inside labels (`_sip._tcp.example.com`).
    pub fn allow_underscore(mut self, allow: bool) -> Self {
        self.allow_underscore = allow;
        self
    }

    fn valid_label(&self, label: &str) -> bool {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || (self.allow_underscore && b == b'_'))
    }
}

impl ValidateName for HostnameValidator {
    fn validate(&self, name: &str) -> bool {
        let name = name.strip_suffix('.').unwrap_or(name);
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return false;
        }
        name.split('.').all(|label| self.valid_label(label))
    }
}

impl<F> ValidateName for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn validate(&self, name: &str) -> bool {
        self(name)
    }
}
