//! `CrowdfundHttp` against a local socket.
//!
//! The server answers canned responses in order and records the raw request
//! line, headers and body of every connection.

#![cfg(feature = "http")]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_test::{assert_err, assert_ok};

use lumenfund_sdk::domain::admin::AdminActionProject;
use lumenfund_sdk::domain::donation::DonationRequest;
use lumenfund_sdk::domain::project::wire::{EditProjectFields, NewProjectFields};
use lumenfund_sdk::domain::project::Category;
use lumenfund_sdk::error::HttpError;
use lumenfund_sdk::gateway::BackendGateway;
use lumenfund_sdk::http::CrowdfundHttp;
use lumenfund_sdk::shared::{Amount, OperationType, ProjectId, PublicKey, TransactionXdr};

#[derive(Debug)]
struct Captured {
    line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn reply(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn json(body: &str) -> String {
    reply("200 OK", "application/json", body)
}

fn html(status: &str, body: &str) -> String {
    reply(status, "text/html; charset=utf-8", body)
}

fn redirect(location: &str) -> String {
    format!("HTTP/1.1 302 Found\r\nLocation: {location}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
}

async fn read_request(stream: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the headers ended");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let len: usize = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .map(|(_, v)| v.parse().unwrap())
        .unwrap_or(0);
    while buf.len() < head_end + len {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the body ended");
        buf.extend_from_slice(&chunk[..n]);
    }

    Captured {
        line,
        headers,
        body: String::from_utf8_lossy(&buf[head_end..head_end + len]).to_string(),
    }
}

/// Serve one connection per reply and hand back what was received.
async fn serve(replies: Vec<String>) -> (CrowdfundHttp, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for reply in replies {
            let (mut stream, _) = listener.accept().await.unwrap();
            seen.push(read_request(&mut stream).await);
            stream.write_all(reply.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
        seen
    });
    (CrowdfundHttp::new(&base_url).unwrap(), handle)
}

fn ids(raw: &[&str]) -> Vec<ProjectId> {
    raw.iter().map(|s| ProjectId::from(*s)).collect()
}

// ── Admin batches ────────────────────────────────────────────────────────────

#[tokio::test]
async fn refund_review_posts_selection_with_operation_header() {
    let (http, server) = serve(vec![json(
        r#"{"admin_action_projects":[{"project_id":"007","name":"Library","public_key":"GDONOR1","total_donations":15.0}]}"#,
    )])
    .await;

    let rows = assert_ok!(
        http.review_admin_operations(OperationType::Refund, &ids(&["1", "2"]))
            .await
    );

    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /control_panel HTTP/1.1");
    assert_eq!(seen[0].header("operation-type"), Some("refund"));
    assert_eq!(seen[0].header("content-type"), Some("application/json"));
    assert_eq!(seen[0].body, r#"{"selected_projects_ids":["1","2"]}"#);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].project_id, ProjectId::from("007"));
    assert_eq!(rows[0].total_donations, 15);
}

#[tokio::test]
async fn admin_transaction_echoes_rows() {
    let (http, server) = serve(vec![json(r#"{"transaction_xdr":"BATCHXDR"}"#)]).await;
    let rows = vec![AdminActionProject::new(
        ProjectId::from("3"),
        "Solar",
        PublicKey::from("GOWNER"),
        40,
    )];

    let xdr = assert_ok!(http.build_admin_transaction(OperationType::Fund, &rows).await);

    assert_eq!(xdr, TransactionXdr::from("BATCHXDR"));
    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /build_admin_transaction HTTP/1.1");
    assert_eq!(seen[0].header("operation-type"), Some("fund"));
    assert_eq!(
        seen[0].body,
        r#"{"admin_operations":[{"project_id":3,"name":"Solar","public_key":"GOWNER","total_donations":40}]}"#
    );
}

// ── Donations and submission ─────────────────────────────────────────────────

#[tokio::test]
async fn donation_posts_json_body() {
    let (http, server) = serve(vec![json(r#"{"transaction_xdr":"XDR1"}"#)]).await;
    let request = DonationRequest::new("7", Amount::parse("25").unwrap());

    let xdr = assert_ok!(http.build_donation(&request).await);

    assert_eq!(xdr, TransactionXdr::from("XDR1"));
    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /donate HTTP/1.1");
    assert_eq!(seen[0].body, r#"{"project_id":"7","amount":25}"#);
}

#[tokio::test]
async fn signed_envelope_is_sent_as_a_json_string() {
    let (http, server) = serve(vec![json(r#"{"hash":"abc123","successful":true,"ledger":77}"#)]).await;

    let resp = assert_ok!(http.send_transaction(&TransactionXdr::from("SIGNED1")).await);

    assert_eq!(resp.hash.as_str(), "abc123");
    assert_eq!(resp.ledger, Some(77));
    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /send_transaction HTTP/1.1");
    assert_eq!(seen[0].header("content-type"), Some("application/json"));
    assert_eq!(seen[0].body, r#""SIGNED1""#);
}

#[tokio::test]
async fn html_message_page_is_unexpected_response() {
    let (http, _server) = serve(vec![html("200 OK", "<h1>Project is not active</h1>")]).await;
    let request = DonationRequest::new("7", Amount::parse("25").unwrap());

    let err = assert_err!(http.build_donation(&request).await);

    match err {
        HttpError::UnexpectedResponse { body } => assert_eq!(body, "<h1>Project is not active</h1>"),
        other => panic!("expected an unexpected-response error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_failure_keeps_status_and_body() {
    let (http, _server) = serve(vec![html("500 Internal Server Error", "tx_bad_seq")]).await;

    let err = assert_err!(http.send_transaction(&TransactionXdr::from("SIGNED1")).await);

    assert!(matches!(err, HttpError::ServerError { status: 500, ref body } if body == "tx_bad_seq"));
    assert!(!err.is_transport());
}

// ── Session ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_posts_key_as_multipart_body() {
    let (http, server) = serve(vec![html("200 OK", "<html>home</html>")]).await;

    assert_ok!(http.login(&PublicKey::from("GDONOR")).await);

    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST / HTTP/1.1");
    assert_eq!(seen[0].header("content-type"), Some("multipart/form-data"));
    assert_eq!(seen[0].body, "GDONOR");
}

#[tokio::test]
async fn logout_is_a_get() {
    let (http, server) = serve(vec![redirect("/home"), html("200 OK", "<html>home</html>")]).await;

    assert_ok!(http.logout().await);

    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "GET /logout HTTP/1.1");
    assert_eq!(seen[1].line, "GET /home HTTP/1.1");
}

// ── Projects ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn new_project_reads_id_from_redirect() {
    let (http, server) = serve(vec![redirect("/project/17"), html("200 OK", "<h1>Reading Room</h1>")]).await;
    let fields = NewProjectFields {
        category: Category::Books,
        goal: 300,
        name: "Reading Room".into(),
        expire_date: "2027-03-01".into(),
        description: "Shelves.".into(),
        image: "data:image/png;base64,AA==".into(),
    };

    let id = assert_ok!(http.create_project(&fields).await);

    assert_eq!(id, ProjectId::from("17"));
    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /new_project HTTP/1.1");
    assert_eq!(
        seen[0].header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    let pairs: Vec<&str> = seen[0].body.split('&').collect();
    assert!(pairs.contains(&"projectCategory=books"));
    assert!(pairs.contains(&"projectGoal=300"));
    assert!(pairs.contains(&"projectName=Reading+Room"));
    assert!(pairs.contains(&"projectExpireDate=2027-03-01"));
    assert!(pairs.contains(&"base64Image=data%3Aimage%2Fpng%3Bbase64%2CAA%3D%3D"));
    assert_eq!(seen[1].line, "GET /project/17 HTTP/1.1");
}

#[tokio::test]
async fn edit_without_project_redirect_is_unexpected_response() {
    let (http, server) = serve(vec![html("200 OK", "<p>Goal must be larger</p>")]).await;
    let fields = EditProjectFields {
        project_id: ProjectId::from("4"),
        category: Category::Games,
        goal: 90,
        name: "Arcade".into(),
        expire_date: "2027-02-01".into(),
        description: "Cabinets.".into(),
    };

    let err = assert_err!(http.edit_project(&fields).await);

    assert!(matches!(err, HttpError::UnexpectedResponse { ref body } if body == "<p>Goal must be larger</p>"));
    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /edit_project HTTP/1.1");
    assert!(seen[0].body.split('&').any(|p| p == "projectId=4"));
    assert!(seen[0].body.split('&').any(|p| p == "newCategory=games"));
}

#[tokio::test]
async fn cancel_returns_trimmed_message() {
    let (http, server) = serve(vec![html("200 OK", "  Project 8 cancelled\n")]).await;

    let message = assert_ok!(http.cancel_project(&ProjectId::from("8")).await);

    assert_eq!(message, "Project 8 cancelled");
    let seen = server.await.unwrap();
    assert_eq!(seen[0].line, "POST /project/8 HTTP/1.1");
}
