//! Delivery against a local fixture collector.

use std::net::SocketAddr;

use anyhow::Result;
use pagepulse_collector::{MetricsDocument, NavigationSnapshot, WebVitals};
use pagepulse_report::{DeliveryMode, ReportError, Reporter};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use url::Url;

struct CapturedRequest {
    head: String,
    body: String,
}

/// Minimal HTTP/1.1 collector answering every request with `status_line`.
async fn start_fixture_collector(
    status_line: &'static str,
) -> Result<(SocketAddr, mpsc::UnboundedReceiver<CapturedRequest>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Ok(request) = read_request(&mut stream).await {
                    let _ = tx.send(request);
                }
                let response = format!(
                    "HTTP/1.1 {status_line}\r\n\
                     Content-Length: 0\r\n\
                     Connection: close\r\n\
                     \r\n"
                );
                let _ = stream.write_all(response.as_bytes()).await;
            });
        }
    });

    Ok((addr, rx))
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<CapturedRequest> {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        raw.extend_from_slice(&buf[..read]);
        if let Some(pos) = raw.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while raw.len() < header_end + content_length {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..read]);
    }

    let body = String::from_utf8_lossy(&raw[header_end..]).to_string();
    Ok(CapturedRequest { head, body })
}

fn document() -> MetricsDocument {
    MetricsDocument {
        navigation: NavigationSnapshot {
            load_time: 50.0,
            ..NavigationSnapshot::default()
        },
        web_vitals: WebVitals {
            lcp: 500.0,
            ..WebVitals::default()
        },
        resources: Vec::new(),
        ratings: None,
    }
}

#[tokio::test]
async fn report_is_posted_as_json() -> Result<()> {
    let (addr, mut requests) = start_fixture_collector("204 No Content").await?;
    let endpoint = Url::parse(&format!("http://{addr}/perf"))?;
    let reporter = Reporter::new("docs-site", endpoint)?.with_mode(DeliveryMode::Request);

    let payload = reporter.payload("https://docs.test/intro", document());
    reporter.try_send(&payload).await?;

    let captured = requests.recv().await.expect("fixture saw the request");
    assert!(captured.head.starts_with("POST /perf HTTP/1.1"));
    assert!(captured
        .head
        .to_ascii_lowercase()
        .contains("content-type: application/json"));

    let body: serde_json::Value = serde_json::from_str(&captured.body)?;
    assert_eq!(body["common"]["appId"], "docs-site");
    assert_eq!(body["metrics"]["navigation"]["loadTime"], 50.0);
    assert_eq!(body["metrics"]["webVitals"]["lcp"], 500.0);
    Ok(())
}

#[tokio::test]
async fn error_status_is_reported_but_not_raised() -> Result<()> {
    let (addr, mut requests) = start_fixture_collector("500 Internal Server Error").await?;
    let endpoint = Url::parse(&format!("http://{addr}/perf"))?;
    let reporter = Reporter::new("docs-site", endpoint)?.with_mode(DeliveryMode::Request);
    let payload = reporter.payload("https://docs.test/", document());

    let err = reporter.try_send(&payload).await.unwrap_err();
    assert!(matches!(err, ReportError::Status(500)));

    reporter.report(&payload).await;
    assert!(requests.recv().await.is_some());
    assert!(requests.recv().await.is_some());
    Ok(())
}

#[tokio::test]
async fn unreachable_collector_is_swallowed() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let endpoint = Url::parse(&format!("http://{addr}/perf"))?;
    let reporter = Reporter::new("docs-site", endpoint)?;
    let payload = reporter.payload("https://docs.test/", document());

    assert!(matches!(
        reporter.try_send(&payload).await,
        Err(ReportError::Transport(_))
    ));
    if let Some(task) = reporter.deliver(payload).await {
        task.await?;
    }
    Ok(())
}
