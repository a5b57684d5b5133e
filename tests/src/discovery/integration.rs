#![cfg(test)]
use async_trait::async_trait;
use pnet::ipnetwork::Ipv4Network;
use std::collections::HashSet;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use sweepr_common::config::Config;
use sweepr_common::error::ScanError;
use sweepr_common::network::interface::LocalNetworkInfo;
use sweepr_common::network::probe::ProbeResult;
use sweepr_core::discovery::{DiscoveryObserver, DiscoveryService, LocalNetworkSource};
use sweepr_core::network::tcp::{Connector, TcpConnector};
use sweepr_core::scanner::Scanner;
use tokio::net::TcpListener;

/*************************************************************
                        Test doubles
**************************************************************/

struct StaticSource(Result<LocalNetworkInfo, ScanError>);

impl LocalNetworkSource for StaticSource {
    fn local_network(&self) -> Result<LocalNetworkInfo, ScanError> {
        self.0.clone()
    }
}

/// Opens the listed sockets, never answers for `silent` hosts, refuses the rest.
#[derive(Default)]
struct FakeLan {
    open: HashSet<SocketAddr>,
    silent: HashSet<Ipv4Addr>,
    attempts: AtomicUsize,
}

impl FakeLan {
    fn with_open(open: &[(Ipv4Addr, u16)]) -> Self {
        Self {
            open: open.iter().map(|&(ip, port)| SocketAddr::from((ip, port))).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Connector for FakeLan {
    async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let SocketAddr::V4(v4) = addr {
            if self.silent.contains(v4.ip()) {
                std::future::pending::<()>().await;
            }
        }
        if self.open.contains(&addr) {
            Ok(())
        } else {
            Err(io::ErrorKind::ConnectionRefused.into())
        }
    }
}

#[derive(Default)]
struct RecordingObserver {
    local: Mutex<Option<LocalNetworkInfo>>,
    found: Mutex<Vec<ProbeResult>>,
}

impl RecordingObserver {
    fn found(&self) -> Vec<ProbeResult> {
        self.found.lock().unwrap().clone()
    }
}

impl DiscoveryObserver for RecordingObserver {
    fn local_network(&self, local: &LocalNetworkInfo) {
        *self.local.lock().unwrap() = Some(*local);
    }

    fn host_found(&self, result: &ProbeResult) {
        self.found.lock().unwrap().push(*result);
    }
}

fn home_lan() -> LocalNetworkInfo {
    LocalNetworkInfo::new(Ipv4Network::new(Ipv4Addr::new(192, 168, 1, 42), 24).unwrap())
}

fn service<C: Connector + 'static>(
    source: StaticSource,
    connector: Arc<C>,
    cfg: &Config,
) -> DiscoveryService<C> {
    let scanner = Scanner::with_shared(connector, cfg);
    DiscoveryService::new(Box::new(source), scanner, cfg).unwrap()
}

fn as_pairs(results: &[ProbeResult]) -> HashSet<(Ipv4Addr, u16)> {
    results
        .iter()
        .filter_map(|r| r.open_port().map(|port| (r.address, port)))
        .collect()
}

/*************************************************************
                          Scenarios
**************************************************************/

#[tokio::test]
async fn discovery_reports_only_open_hosts() {
    let gateway = Ipv4Addr::new(192, 168, 1, 1);
    let nas = Ipv4Addr::new(192, 168, 1, 5);
    let lan = Arc::new(FakeLan::with_open(&[(gateway, 443), (nas, 22)]));
    let cfg = Config::default();
    let service = service(StaticSource(Ok(home_lan())), Arc::clone(&lan), &cfg);

    let observer = RecordingObserver::default();
    let summary = service.perform_discovery(&observer).await.unwrap();

    assert_eq!(*observer.local.lock().unwrap(), Some(home_lan()));

    let found = observer.found();
    assert_eq!(found.len(), 2);
    assert_eq!(as_pairs(&found), HashSet::from([(gateway, 443), (nas, 22)]));

    let lines: HashSet<String> = found.iter().map(ToString::to_string).collect();
    assert!(lines.contains("Active IP: 192.168.1.1 (port 443 open)"));
    assert!(lines.contains("Active IP: 192.168.1.5 (port 22 open)"));

    assert_eq!(summary.scanned, 254);
    assert_eq!(summary.reachable, 2);
}

#[tokio::test]
async fn discovery_prefers_earlier_port() {
    let host = Ipv4Addr::new(192, 168, 1, 80);
    let lan = Arc::new(FakeLan::with_open(&[(host, 80), (host, 443)]));
    let cfg = Config::default();
    let service = service(StaticSource(Ok(home_lan())), lan, &cfg);

    let observer = RecordingObserver::default();
    service.perform_discovery(&observer).await.unwrap();

    assert_eq!(observer.found(), vec![ProbeResult::open(host, 80)]);
}

#[tokio::test]
async fn discovery_without_interface_sends_nothing() {
    let lan = Arc::new(FakeLan::default());
    let cfg = Config::default();
    let source = StaticSource(Err(ScanError::NoSuitableInterface));
    let service = service(source, Arc::clone(&lan), &cfg);

    let observer = RecordingObserver::default();
    let err = service.perform_discovery(&observer).await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<ScanError>(),
        Some(&ScanError::NoSuitableInterface)
    );
    assert_eq!(err.to_string(), "no suitable IP address found");
    assert_eq!(lan.attempts.load(Ordering::SeqCst), 0);
    assert!(observer.local.lock().unwrap().is_none());
    assert!(observer.found().is_empty());
}

#[tokio::test]
async fn discovery_waits_for_slowest_host() {
    let slow = Ipv4Addr::new(192, 168, 1, 200);
    let fast = Ipv4Addr::new(192, 168, 1, 3);
    let mut lan = FakeLan::with_open(&[(fast, 22)]);
    lan.silent.insert(slow);
    let lan = Arc::new(lan);

    let cfg = Config {
        timeout: Duration::from_millis(60),
        ..Config::default()
    };
    let service = service(StaticSource(Ok(home_lan())), Arc::clone(&lan), &cfg);

    let observer = RecordingObserver::default();
    let start = Instant::now();
    let summary = service.perform_discovery(&observer).await.unwrap();

    assert!(start.elapsed() >= cfg.timeout * 3);
    assert_eq!(summary.scanned, 254);
    assert_eq!(observer.found(), vec![ProbeResult::open(fast, 22)]);
}

#[tokio::test]
async fn discovery_is_repeatable_on_static_network() {
    let open = [
        (Ipv4Addr::new(192, 168, 1, 10), 80),
        (Ipv4Addr::new(192, 168, 1, 11), 443),
        (Ipv4Addr::new(192, 168, 1, 254), 22),
    ];
    let lan = Arc::new(FakeLan::with_open(&open));
    let cfg = Config::default();
    let service = service(StaticSource(Ok(home_lan())), lan, &cfg);

    let first = RecordingObserver::default();
    let second = RecordingObserver::default();
    service.perform_discovery(&first).await.unwrap();
    service.perform_discovery(&second).await.unwrap();

    assert_eq!(as_pairs(&first.found()), as_pairs(&second.found()));
    assert_eq!(as_pairs(&first.found()), HashSet::from(open));
}

#[tokio::test]
async fn discovery_honors_prefix_override() {
    let far = Ipv4Addr::new(192, 168, 0, 7);
    let lan = Arc::new(FakeLan::with_open(&[(far, 443)]));
    let cfg = Config {
        prefix: Some(23),
        ..Config::default()
    };
    let service = service(StaticSource(Ok(home_lan())), lan, &cfg);

    let observer = RecordingObserver::default();
    let summary = service.perform_discovery(&observer).await.unwrap();

    assert_eq!(summary.scanned, 510);
    assert_eq!(observer.found(), vec![ProbeResult::open(far, 443)]);
}

#[tokio::test]
async fn discovery_over_loopback_finds_listener() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let loopback = LocalNetworkInfo::new(Ipv4Network::new(Ipv4Addr::LOCALHOST, 8).unwrap());
    let cfg = Config {
        ports: vec![port],
        timeout: Duration::from_millis(200),
        ..Config::default()
    };
    let service = service(StaticSource(Ok(loopback)), Arc::new(TcpConnector), &cfg);

    let observer = RecordingObserver::default();
    let summary = service.perform_discovery(&observer).await.unwrap();

    assert_eq!(summary.scanned, 254);
    assert_eq!(observer.found(), vec![ProbeResult::open(Ipv4Addr::LOCALHOST, port)]);
}

#[test]
fn discovery_rejects_invalid_config() {
    let cfg = Config {
        ports: vec![],
        ..Config::default()
    };
    let scanner = Scanner::new(TcpConnector, &cfg);
    let result = DiscoveryService::new(Box::new(StaticSource(Ok(home_lan()))), scanner, &cfg);
    assert!(result.is_err());
}
