//! Base types and error handling.
//!
//! Provides foundational types mirroring Chromium's `net/base/`:
//! - [`NetError`](neterror::NetError): resolution error codes matching `net_error_list.h`
//! - [`IoResultExt`](context::IoResultExt): mapping system lookup failures onto those codes

pub mod context;
pub mod neterror;
