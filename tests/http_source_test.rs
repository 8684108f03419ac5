// HttpSource against a local mock server.
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use user_directory::source::HttpSettings;
use user_directory::{FetchError, HttpSource, RecordSource, UserDirectoryView};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERS_BODY: &str = r#"[
  {
    "id": 1,
    "name": "Leanne Graham",
    "username": "Bret",
    "email": "Sincere@april.biz",
    "address": { "street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough", "zipcode": "92998-3874" },
    "phone": "1-770-736-8031 x56442",
    "website": "hildegard.org",
    "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered client-server neural-net" }
  },
  {
    "id": 2,
    "name": "Ervin Howell",
    "username": "Antonette",
    "email": "Shanna@melissa.tv",
    "address": { "city": "Wisokyburgh" },
    "phone": "010-692-6593 x09125",
    "website": "anastasia.net",
    "company": { "name": "Deckow-Crist" }
  }
]"#;

fn source_for(url: String) -> HttpSource {
    HttpSource::new(HttpSettings {
        url,
        request_timeout: Duration::from_millis(500),
        ..HttpSettings::default()
    })
    .expect("build source")
}

async fn mount(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_records_in_response_order() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_raw(USERS_BODY, "application/json")).await;

    let source = source_for(format!("{}/users", server.uri()));
    let records = source.fetch_all().await.expect("fetch ok");

    assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(records[0].address.city, "Gwenborough");
    assert_eq!(records[1].company.name, "Deckow-Crist");
    assert_eq!(source.describe(), format!("{}/users", server.uri()));
}

#[tokio::test]
async fn non_success_status_is_status_error() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500).set_body_string("internal detail")).await;

    let err = source_for(format!("{}/users", server.uri())).fetch_all().await.unwrap_err();
    assert_eq!(err, FetchError::Status(500));
    assert_eq!(err.to_string(), "Failed to fetch users");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_raw("{not json", "application/json")).await;

    let err = source_for(format!("{}/users", server.uri())).fetch_all().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_raw(USERS_BODY, "application/json")
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let err = source_for(format!("{}/users", server.uri())).fetch_all().await.unwrap_err();
    assert_eq!(err.to_string(), "timeout");
}

#[tokio::test]
async fn body_stalling_after_headers_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf);
        let _ = stream.write_all(
            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n[",
        );
        let _ = stream.flush();
        // hold the connection open past the client timeout
        std::thread::sleep(Duration::from_secs(3));
    });

    let err = source_for(format!("http://{addr}/users")).fetch_all().await.unwrap_err();
    assert_eq!(err.to_string(), "timeout");
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    // port 9 (discard) is not expected to be listening
    let err = source_for("http://127.0.0.1:9/users".to_string()).fetch_all().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn view_over_http_maps_status_failure() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(404)).await;

    let view = UserDirectoryView::new(Arc::new(source_for(format!("{}/users", server.uri()))));
    view.load_records().await;

    let s = view.state();
    assert!(!s.loading);
    assert_eq!(s.error.as_deref(), Some("Failed to fetch users"));
    assert!(s.records.is_empty());
}
