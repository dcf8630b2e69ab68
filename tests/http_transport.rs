//! End-to-end tests of `SecureClient` over the reqwest transport against a
//! scripted TCP backend.

use std::sync::Arc;
use std::time::Duration;

use oidc_tab_client::{CookieJar, Error, MemoryTabStore, SecureClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A request as the backend saw it.
#[derive(Debug)]
struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn http_response(status: &str, extra_headers: &[&str], body: &str) -> String {
    let mut response = format!("HTTP/1.1 {status}\r\nContent-Type: application/json\r\n");
    for header in extra_headers {
        response.push_str(header);
        response.push_str("\r\n");
    }
    response.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    ));
    response
}

async fn read_request(socket: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8(buf[..header_end].to_vec()).unwrap();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .map_or(0, |(_, v)| v.parse::<usize>().unwrap());

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending body");
        body.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

/// Serves one scripted response per accepted connection, reporting each
/// request it received.
async fn start_backend(
    responses: Vec<String>,
) -> (String, mpsc::UnboundedReceiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let _ = tx.send(request);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}/app/"), rx)
}

#[tokio::test]
async fn test_csrf_cookie_set_by_backend_is_echoed_next_request() {
    let (base_url, mut requests) = start_backend(vec![
        http_response(
            "200 OK",
            &[
                "Set-Cookie: XSRF-TOKEN=tok1; Path=/",
                "Set-Cookie: JSESSIONID=s1; Path=/; HttpOnly",
            ],
            r#"{"success":true,"authenticated":false}"#,
        ),
        http_response(
            "401 Unauthorized",
            &[],
            r#"{"success":false,"message":"Authentication failed"}"#,
        ),
    ])
    .await;

    let jar = Arc::new(CookieJar::new());
    let client = SecureClient::builder()
        .base_url(base_url)
        .cookie_jar(Arc::clone(&jar))
        .build()
        .unwrap();

    let session = client.fetch_session().await.unwrap();
    assert!(!session.authenticated);

    let first = requests.recv().await.unwrap();
    assert_eq!(first.request_line, "GET /app/api/session HTTP/1.1");
    assert_eq!(first.header("x-tab-id"), Some(client.tab_id().as_str()));
    assert_eq!(first.header("x-xsrf-token"), None);

    assert_eq!(client.csrf_token().as_deref(), Some("tok1"));

    let err = client.login("alice", "s3cret").await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 401, .. }));
    assert_eq!(err.to_string(), "Authentication failed");

    let second = requests.recv().await.unwrap();
    assert_eq!(second.request_line, "POST /app/api/login HTTP/1.1");
    assert_eq!(second.header("x-tab-id"), Some(client.tab_id().as_str()));
    assert_eq!(second.header("x-xsrf-token"), Some("tok1"));
    assert_eq!(
        second.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert!(second.header("cookie").unwrap().contains("JSESSIONID=s1"));
    assert_eq!(second.body, "username=alice&password=s3cret");
}

#[tokio::test]
async fn test_non_json_error_body_over_the_wire() {
    let (base_url, mut requests) = start_backend(vec![http_response(
        "500 Internal Server Error",
        &[],
        "<html>boom</html>",
    )])
    .await;

    let client = SecureClient::builder().base_url(base_url).build().unwrap();

    let err = client.fetch_providers().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500");
    assert!(requests.recv().await.is_some());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SecureClient::builder()
        .base_url(format!("http://{addr}/"))
        .build()
        .unwrap();

    let err = client.fetch_session().await.unwrap_err();
    assert!(err.is_transport_error(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_clients_sharing_tab_storage_share_tab_id() {
    let (base_url, mut requests) = start_backend(vec![
        http_response("200 OK", &[], "[]"),
        http_response("200 OK", &[], "[]"),
    ])
    .await;

    let tab = Arc::new(MemoryTabStore::new());
    let before_reload = SecureClient::builder()
        .base_url(base_url.clone())
        .tab_store(tab.clone())
        .build()
        .unwrap();
    let after_reload = SecureClient::builder()
        .base_url(base_url)
        .tab_store(tab)
        .build()
        .unwrap();

    before_reload.fetch_providers().await.unwrap();
    after_reload.fetch_providers().await.unwrap();

    let a = requests.recv().await.unwrap();
    let b = requests.recv().await.unwrap();
    assert_eq!(a.header("x-tab-id"), b.header("x-tab-id"));
    assert_eq!(a.header("x-tab-id"), Some(before_reload.tab_id().as_str()));
}

#[tokio::test]
async fn test_redirect_to_other_origin_is_not_followed() {
    let (other_base, mut other_requests) =
        start_backend(vec![http_response("200 OK", &[], "{}")]).await;
    let location = format!("Location: {other_base}steal");
    let (base_url, mut requests) = start_backend(vec![http_response(
        "302 Found",
        &["Set-Cookie: XSRF-TOKEN=tok1; Path=/", location.as_str()],
        "",
    )])
    .await;

    let client = SecureClient::builder().base_url(base_url).build().unwrap();

    let err = client.fetch_session().await.unwrap_err();
    assert_eq!(err.status(), Some(302));
    assert_eq!(err.to_string(), "HTTP 302");
    assert!(requests.recv().await.is_some());

    let leaked = tokio::time::timeout(Duration::from_millis(300), other_requests.recv()).await;
    assert!(leaked.is_err(), "redirect target was contacted: {leaked:?}");
}
