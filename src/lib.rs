//! # addrnet
//!
//! Asynchronous, priority-ordered host name resolution for Rust.
//!
//! `addrnet` composes several resolver backends (a static override table,
//! an in-memory cache, an upstream DNS client) into one resolver that tries
//! them in a fixed order and stops at the first answer, without blocking
//! the calling task.
//!
//! ## Features
//!
//! - **Ordered fallback**: first success wins; on total failure the last
//!   resolver's error is reported
//! - **IP literal fast path**: `192.0.2.1` and `2001:db8::1` never reach a resolver
//! - **Validation**: names are lower-cased and checked against RFC 1123 before lookup
//! - **Deferred callbacks**: callback delivery always goes through a scheduler,
//!   never inline
//! - **Backends**: hickory-dns, getaddrinfo, memory cache, overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use addrnet::dns::{
//!     AddressMode, GaiResolver, HostnameValidator, MemoryCache, Name,
//!     OrderedResolverStrategy, TokioScheduler,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let strategy = OrderedResolverStrategy::builder(
//!         Arc::new(TokioScheduler::current()),
//!         Arc::new(HostnameValidator::new()),
//!     )
//!     .with_resolver(Arc::new(MemoryCache::new()))
//!     .with_resolver(Arc::new(GaiResolver::new()))
//!     .build()
//!     .unwrap();
//!
//!     let record = strategy
//!         .lookup(Name::new("localhost"), AddressMode::default())
//!         .await
//!         .unwrap();
//!     println!("Resolved: {record}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error codes and error context helpers
//! - [`dns`] - Resolver trait, ordered strategy, backends and configuration
//!
//! Resolvers are statically typed, so a chain can only hold `Resolve`
//! implementations:
//!
//! ```compile_fail
//! use addrnet::dns::{HostnameValidator, ManualScheduler, OrderedResolverStrategy};
//! use std::sync::Arc;
//!
//! let _ = OrderedResolverStrategy::new(
//!     Arc::new(ManualScheduler::new()),
//!     Arc::new(HostnameValidator::new()),
//!     vec![Arc::new("not a resolver")],
//! );
//! ```

pub mod base;
pub mod dns;
