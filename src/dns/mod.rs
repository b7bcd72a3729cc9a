//! DNS Resolution Module
//!
//! Provides ordered, pluggable DNS resolution:
//! - [`OrderedResolverStrategy`]: tries resolvers in priority order until one answers
//! - In-memory cache ([`MemoryCache`])
//! - Static hostname overrides ([`OverrideResolver`])
//! - Async hickory-dns resolver and system resolver (getaddrinfo via thread pool)
//!
//! # Architecture
//!
//! The `Resolve` trait is the core abstraction that allows different
//! resolver implementations to be used interchangeably. The strategy is
//! itself a `Resolve`, so chains nest. Host name validation
//! ([`ValidateName`]) and deferred callback delivery ([`Schedule`]) are
//! injected at construction.
//!
//! # Example
//!
//! ```rust,ignore
//! use addrnet::dns::{AddressMode, ResolverConfig, ResolverContext, TokioScheduler};
//! use std::sync::Arc;
//!
//! let context = ResolverContext::with_config(
//!     ResolverConfig::default(),
//!     Arc::new(TokioScheduler::current()),
//! )?;
//! context.strategy().resolve_with("example.com", AddressMode::default(), |result| {
//!     println!("Resolved: {result:?}");
//! });
//! ```

mod cache;
mod config;
mod context;
mod gai;
mod hickory;
mod overrides;
mod resolve;
mod scheduler;
mod strategy;
mod validator;

pub use cache::{Cache, MemoryCache};
pub use config::{Backend, CacheConfig, ConfigError, ResolverConfig};
pub use context::ResolverContext;
pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use overrides::OverrideResolver;
pub use resolve::{AddressFamily, AddressMode, AddressRecord, Name, Resolution, Resolve, Resolving};
pub use scheduler::{ManualScheduler, Schedule, Task, TokioScheduler};
pub use strategy::{OrderedResolverStrategy, OrderedResolverStrategyBuilder, ResolverChain};
pub use validator::{HostnameValidator, ValidateName};
