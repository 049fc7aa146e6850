//! End-to-end probe cycles against a local HTTP server.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use httpcheck_core::{EngineConfig, ProbeOutcome, ProbeResult, TargetSet};
use httpcheck_probe::{Engine, HttpTransport, TransportSettings, stop_signal};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serves HEAD requests: `/unavailable` answers 503, anything else 200.
async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(serve_connection(socket));
        }
    });
    addr
}

async fn serve_connection(mut socket: TcpStream) {
    let mut pending = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let Some(end) = pending.windows(4).position(|w| w == b"\r\n\r\n") else {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => {
                    pending.extend_from_slice(&buf[..n]);
                    continue;
                }
            }
        };
        let head: Vec<u8> = pending.drain(..end + 4).collect();
        let head = String::from_utf8_lossy(&head);
        let status = if head.starts_with("HEAD /unavailable ") {
            "503 Service Unavailable"
        } else {
            "200 OK"
        };
        let response = format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\n\r\n");
        if socket.write_all(response.as_bytes()).await.is_err() {
            return;
        }
    }
}

async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn collecting() -> (
    Arc<Mutex<Vec<ProbeOutcome>>>,
    impl Fn(&ProbeOutcome) + Send + Sync + 'static,
) {
    let emitted = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let emitted = Arc::clone(&emitted);
        move |outcome: &ProbeOutcome| emitted.lock().unwrap().push(outcome.clone())
    };
    (emitted, sink)
}

#[tokio::test]
async fn test_mixed_targets_single_cycle() {
    let up = spawn_server().await;
    let down = closed_port().await;
    let targets = TargetSet::new([
        format!("http://{up}/"),
        format!("http://{up}/unavailable"),
        format!("http://{down}/"),
    ]);

    let config = EngineConfig::new(2, Duration::ZERO, false).unwrap();
    let transport = HttpTransport::new(
        &TransportSettings::from_config(&config).with_timeout(Some(Duration::from_secs(5))),
    )
    .unwrap();
    let (emitted, sink) = collecting();
    let engine = Engine::new(targets, config, Arc::new(transport), Arc::new(sink)).unwrap();

    let report = engine.run_once().await;

    assert_eq!(report.probed, 3);
    assert_eq!(report.failures, 1);

    let emitted = emitted.lock().unwrap();
    let by_target = |suffix: &str| {
        emitted
            .iter()
            .find(|o| o.target.as_str().ends_with(suffix))
            .unwrap()
            .clone()
    };
    assert_eq!(
        by_target(&format!("{up}/")).result,
        ProbeResult::Success(200)
    );
    assert_eq!(
        by_target("/unavailable").result,
        ProbeResult::Success(503)
    );

    let refused = by_target(&format!("{down}/"));
    assert!(!refused.is_success());
    assert!(refused.to_string().starts_with("ERROR:\thttp://"));
}

#[tokio::test]
async fn test_repeated_cycles_without_keep_alive() {
    let up = spawn_server().await;
    let targets = TargetSet::new([
        format!("http://{up}/a"),
        format!("http://{up}/b"),
        format!("http://{up}/c"),
    ]);

    let config = EngineConfig::new(2, Duration::from_millis(10), true).unwrap();
    let transport = HttpTransport::new(&TransportSettings::from_config(&config)).unwrap();

    let (handle, signal) = stop_signal();
    let emitted = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let emitted = Arc::clone(&emitted);
        move |outcome: &ProbeOutcome| {
            let mut emitted = emitted.lock().unwrap();
            emitted.push(outcome.clone());
            if emitted.len() >= 6 {
                handle.stop();
            }
        }
    };
    let engine = Engine::new(targets, config, Arc::new(transport), Arc::new(sink)).unwrap();

    let cycles = tokio::time::timeout(Duration::from_secs(10), engine.run(signal))
        .await
        .unwrap();

    assert_eq!(cycles, 2);
    let emitted = emitted.lock().unwrap();
    assert_eq!(emitted.len(), 6);
    assert!(emitted.iter().all(|o| o.status() == Some(200)));
}
