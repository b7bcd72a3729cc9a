//! Ordered Strategy Tests
//!
//! Covers:
//! - IP literal and invalid name shortcuts
//! - First-hit and exhaustion behavior over a three-resolver chain
//! - Exactly-once, never-inline callback delivery
//! - Case-insensitive traversal
//! - The cache-then-network scenario

use addrnet::base::neterror::NetError;
use addrnet::dns::{
    AddressFamily, AddressMode, AddressRecord, Cache, HostnameValidator, ManualScheduler, Name,
    OrderedResolverStrategy, Resolution, Resolve, Resolving, TokioScheduler,
};

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Resolver double: fixed outcome, counts calls and records names seen.
struct MockResolver {
    outcome: Resolution,
    calls: AtomicUsize,
    names: Mutex<Vec<String>>,
}

impl MockResolver {
    fn new(outcome: Resolution) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            names: Mutex::new(Vec::new()),
        })
    }

    fn hit(ip: &str) -> Arc<Self> {
        Self::new(Ok(AddressRecord::new(ip.parse().unwrap())))
    }

    fn miss() -> Arc<Self> {
        Self::new(Err(NetError::NameNotResolved))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Resolve for MockResolver {
    fn resolve(&self, name: Name, _mode: AddressMode) -> Resolving {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.lock().unwrap().push(name.as_str().to_string());
        let outcome = self.outcome;
        Box::pin(async move {
            tokio::task::yield_now().await;
            outcome
        })
    }
}

/// Cache double that fails the test if anything stores into it.
struct NoStoreCache {
    inner: Arc<MockResolver>,
    stores: AtomicUsize,
}

impl Resolve for NoStoreCache {
    fn resolve(&self, name: Name, mode: AddressMode) -> Resolving {
        self.inner.resolve(name, mode)
    }
}

impl Cache for NoStoreCache {
    fn store(&self, _name: Name, _record: AddressRecord, _ttl: Duration) {
        self.stores.fetch_add(1, Ordering::SeqCst);
    }
}

fn build(resolvers: Vec<Arc<MockResolver>>) -> (Arc<ManualScheduler>, OrderedResolverStrategy) {
    build_chain(
        resolvers
            .into_iter()
            .map(|r| r as Arc<dyn Resolve>)
            .collect(),
    )
}

fn build_chain(
    resolvers: Vec<Arc<dyn Resolve>>,
) -> (Arc<ManualScheduler>, OrderedResolverStrategy) {
    let scheduler = Arc::new(ManualScheduler::new());
    let strategy = OrderedResolverStrategy::new(
        scheduler.clone(),
        Arc::new(HostnameValidator::new()),
        resolvers,
    )
    .unwrap();
    (scheduler, strategy)
}

/// Runs `resolve_with` and returns every callback invocation.
async fn resolve_collect(
    scheduler: &ManualScheduler,
    strategy: &OrderedResolverStrategy,
    name: &str,
) -> Vec<Resolution> {
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&results);
    strategy.resolve_with(name, AddressMode::PreferInet4, move |result| {
        sink.lock().unwrap().push(result);
    });
    assert!(
        results.lock().unwrap().is_empty(),
        "callback fired inline for {name}"
    );
    scheduler.run_pending().await;
    let results = results.lock().unwrap().clone();
    results
}

#[tokio::test]
async fn test_ipv4_literals_bypass_chain() {
    let r0 = MockResolver::hit("198.51.100.1");
    let (scheduler, strategy) = build(vec![r0.clone()]);

    for literal in ["127.0.0.1", "0.0.0.0", "255.255.255.255", "192.0.2.33"] {
        let results = resolve_collect(&scheduler, &strategy, literal).await;
        assert_eq!(results.len(), 1);
        let record = results[0].unwrap();
        assert_eq!(record.address(), literal.parse::<IpAddr>().unwrap());
        assert_eq!(record.family(), AddressFamily::Inet4);
    }
    assert_eq!(r0.calls(), 0);
}

#[tokio::test]
async fn test_ipv6_literals_bypass_chain() {
    let r0 = MockResolver::hit("198.51.100.1");
    let (scheduler, strategy) = build(vec![r0.clone()]);

    for literal in ["::1", "::", "2001:db8::8a2e:370:7334", "FE80::1", "::ffff:192.0.2.1"] {
        let results = resolve_collect(&scheduler, &strategy, literal).await;
        assert_eq!(results.len(), 1);
        let record = results[0].unwrap();
        assert_eq!(record.address(), literal.parse::<IpAddr>().unwrap());
        assert_eq!(record.family(), AddressFamily::Inet6);
    }
    assert_eq!(r0.calls(), 0);
}

#[tokio::test]
async fn test_invalid_names_bypass_chain() {
    let r0 = MockResolver::hit("198.51.100.1");
    let (scheduler, strategy) = build(vec![r0.clone()]);

    for name in ["", "has space.com", "-lead.example", "a..b", "under_score.example"] {
        let results = resolve_collect(&scheduler, &strategy, name).await;
        assert_eq!(results, vec![Err(NetError::InvalidName)]);
    }
    assert_eq!(r0.calls(), 0);
}

#[tokio::test]
async fn test_custom_validator_is_used() {
    let r0 = MockResolver::hit("198.51.100.1");
    let scheduler = Arc::new(ManualScheduler::new());
    let only_internal = |name: &str| name.ends_with(".internal");
    let strategy = OrderedResolverStrategy::new(
        scheduler.clone(),
        Arc::new(only_internal),
        vec![r0.clone() as Arc<dyn Resolve>],
    )
    .unwrap();

    let results = resolve_collect(&scheduler, &strategy, "example.com").await;
    assert_eq!(results, vec![Err(NetError::InvalidName)]);
    let results = resolve_collect(&scheduler, &strategy, "db.INTERNAL").await;
    assert!(results[0].is_ok());
    assert_eq!(r0.calls(), 1);
}

#[tokio::test]
async fn test_second_resolver_hit_stops_chain() {
    let r0 = MockResolver::miss();
    let r1 = MockResolver::hit("192.0.2.1");
    let r2 = MockResolver::hit("192.0.2.2");
    let (scheduler, strategy) = build(vec![r0.clone(), r1.clone(), r2.clone()]);

    let results = resolve_collect(&scheduler, &strategy, "example.com").await;
    assert_eq!(
        results,
        vec![Ok(AddressRecord::new("192.0.2.1".parse().unwrap()))]
    );
    assert_eq!(r0.calls(), 1);
    assert_eq!(r1.calls(), 1);
    assert_eq!(r2.calls(), 0);
}

#[tokio::test]
async fn test_all_miss_reports_last_code() {
    let r0 = MockResolver::new(Err(NetError::DnsTimedOut));
    let r1 = MockResolver::new(Err(NetError::NameResolutionFailed));
    let r2 = MockResolver::new(Err(NetError::Unknown(-4242)));
    let (scheduler, strategy) = build(vec![r0.clone(), r1.clone(), r2.clone()]);

    let results = resolve_collect(&scheduler, &strategy, "example.com").await;
    assert_eq!(results, vec![Err(NetError::Unknown(-4242))]);
    assert_eq!((r0.calls(), r1.calls(), r2.calls()), (1, 1, 1));
}

#[tokio::test]
async fn test_case_insensitive_traversal() {
    let r0 = MockResolver::miss();
    let r1 = MockResolver::miss();
    let (scheduler, strategy) = build(vec![r0.clone(), r1.clone()]);

    let upper = resolve_collect(&scheduler, &strategy, "EXAMPLE.com").await;
    let lower = resolve_collect(&scheduler, &strategy, "example.com").await;

    assert_eq!(upper, lower);
    assert_eq!(*r0.names.lock().unwrap(), vec!["example.com", "example.com"]);
    assert_eq!(*r1.names.lock().unwrap(), vec!["example.com", "example.com"]);
}

#[test]
fn test_empty_chain_fails_construction() {
    let result = OrderedResolverStrategy::new(
        Arc::new(ManualScheduler::new()),
        Arc::new(HostnameValidator::new()),
        Vec::<Arc<dyn Resolve>>::new(),
    );
    assert_eq!(result.unwrap_err(), NetError::EmptyResolverChain);
}

#[tokio::test]
async fn test_cache_then_network_scenario() {
    let cache = Arc::new(NoStoreCache {
        inner: MockResolver::miss(),
        stores: AtomicUsize::new(0),
    });
    let network = MockResolver::hit("93.184.216.34");
    let (scheduler, strategy) = build_chain(vec![
        cache.clone() as Arc<dyn Resolve>,
        network.clone() as Arc<dyn Resolve>,
    ]);

    let results = resolve_collect(&scheduler, &strategy, "EXAMPLE.com").await;

    assert_eq!(results.len(), 1);
    let record = results[0].unwrap();
    assert_eq!(record.address(), "93.184.216.34".parse::<IpAddr>().unwrap());
    assert_eq!(record.family(), AddressFamily::Inet4);
    assert_eq!(*cache.inner.names.lock().unwrap(), vec!["example.com"]);
    assert_eq!(*network.names.lock().unwrap(), vec!["example.com"]);
    assert_eq!(cache.stores.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let r0 = MockResolver::miss();
    let r1 = MockResolver::hit("192.0.2.1");
    let (scheduler, strategy) = build(vec![r0.clone(), r1.clone()]);
    let count = Arc::new(AtomicUsize::new(0));

    for i in 0..16 {
        let count = Arc::clone(&count);
        strategy.resolve_with(format!("host{i}.example"), AddressMode::default(), move |r| {
            assert!(r.is_ok());
            count.fetch_add(1, Ordering::SeqCst);
        });
    }

    assert_eq!(scheduler.run_pending().await, 16);
    assert_eq!(count.load(Ordering::SeqCst), 16);
    assert_eq!((r0.calls(), r1.calls()), (16, 16));
}

#[tokio::test]
async fn test_tokio_scheduler_delivers_once() {
    let r0 = MockResolver::miss();
    let r1 = MockResolver::hit("192.0.2.1");
    let strategy = OrderedResolverStrategy::new(
        Arc::new(TokioScheduler::current()),
        Arc::new(HostnameValidator::new()),
        vec![r0 as Arc<dyn Resolve>, r1 as Arc<dyn Resolve>],
    )
    .unwrap();

    let (tx, rx) = tokio::sync::oneshot::channel();
    strategy.resolve_with("example.com", AddressMode::default(), move |result| {
        tx.send(result).unwrap();
    });

    let result = rx.await.unwrap();
    assert_eq!(result.unwrap().address(), "192.0.2.1".parse::<IpAddr>().unwrap());
}
