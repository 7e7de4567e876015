use std::net::SocketAddr;
use std::time::Duration;

use tally_core::{ALL_REGIONS, DepartmentMetric, TimeSeriesPoint};
use tally_metrics::{DashboardView, FetchError, MetricsClient, MetricsData};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const DEPARTMENTS: &str = r#"[
  {"region":"Malaysia","department_name":"Retail","total_transactions":10,"total_revenue":"1000.00","total_margin":"200.00"},
  {"region":"New Zealand","department_name":"Wholesale","total_transactions":"5","total_revenue":500,"total_margin":50}
]"#;

const TIMESERIES: &str = r#"[
  {"year":2024,"month":1,"revenue":"700.5","margin":"120"},
  {"year":2024,"month":2,"revenue":800,"margin":null}
]"#;

/// Minimal HTTP/1.1 responder: routes by request path, closes after each reply.
async fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut sock, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match sock.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&buf);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, s, b)| (*s, *b))
                    .unwrap_or((404, "not found"));
                let reply = format!(
                    "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = sock.write_all(reply.as_bytes()).await;
                let _ = sock.shutdown().await;
            });
        }
    });

    addr
}

fn client(addr: SocketAddr) -> MetricsClient {
    MetricsClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_all_normalizes_string_numbers() {
    let addr = serve(vec![
        ("/api/v1/metrics/departments", 200, DEPARTMENTS),
        ("/api/v1/metrics/timeseries", 200, TIMESERIES),
    ])
    .await;

    let data = client(addr).fetch_all().await.unwrap();
    assert_eq!(
        data.departments,
        vec![
            DepartmentMetric::new("Malaysia", "Retail", 10.0, 1000.0, 200.0),
            DepartmentMetric::new("New Zealand", "Wholesale", 5.0, 500.0, 50.0),
        ]
    );
    assert_eq!(
        data.time_series,
        vec![
            TimeSeriesPoint::new(2024, 1, 700.5, 120.0),
            TimeSeriesPoint::new(2024, 2, 800.0, 0.0),
        ]
    );

    let view = DashboardView::build(&data, ALL_REGIONS);
    assert_eq!(view.derived.margin_percentage, "16.7");
    assert_eq!(view.trend[0].label, "Jan 2024");
}

#[tokio::test]
async fn test_one_failing_endpoint_fails_the_whole_fetch() {
    let addr = serve(vec![
        ("/api/v1/metrics/departments", 200, DEPARTMENTS),
        ("/api/v1/metrics/timeseries", 500, "{\"detail\":\"boom\"}"),
    ])
    .await;

    let c = client(addr);
    let err = c.fetch_all().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { .. }), "got {err:?}");

    let data = c.fetch_or_empty().await;
    assert!(data.departments.is_empty());
    assert!(data.time_series.is_empty());
}

#[tokio::test]
async fn test_non_array_body_is_decode_error() {
    let addr = serve(vec![
        ("/api/v1/metrics/departments", 200, "{\"status\":\"ok\"}"),
        ("/api/v1/metrics/timeseries", 200, TIMESERIES),
    ])
    .await;

    let err = client(addr).fetch_departments().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_host_falls_back_to_empty() {
    // Grab a free port, then close it so nothing is listening.
    let addr = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };

    let c = client(addr);
    assert!(matches!(
        c.fetch_all().await,
        Err(FetchError::Transport { .. })
    ));
    assert_eq!(c.fetch_or_empty().await, MetricsData::default());
}
