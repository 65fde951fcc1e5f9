//! Push/fetch lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP: first by executing built requests with ureq,
//! then through `BilingualClient` over `ReqwestTransport`.

use bilingual_core::{
    ApiClient, ApiError, BilingualClient, ClientConfig, HttpMethod, HttpRequest, HttpResponse,
    LanguageStrings, ReqwestTransport, StringRecord,
};
use mock_server::{Store, DEFAULT_PROJECT_KEY};
use serde_json::json;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data, letting the core client interpret them.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&req.url);
            for (k, v) in &req.headers {
                builder = builder.header(k.as_str(), v.as_str());
            }
            builder.call()
        }
        (HttpMethod::Post, body) => {
            let mut builder = agent.post(&req.url);
            for (k, v) in &req.headers {
                builder = builder.header(k.as_str(), v.as_str());
            }
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on its own runtime thread and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, Store::default()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn record(key: &str, value: &str) -> StringRecord {
    StringRecord::from([
        ("key".to_string(), key.to_string()),
        ("value".to_string(), value.to_string()),
    ])
}

#[test]
fn sync_lifecycle_over_ureq() {
    let base_url = spawn_server();
    let client = ApiClient::with_config(DEFAULT_PROJECT_KEY, &base_url, ClientConfig::new("false"));

    // Step 1: project.
    let project = client.parse_get_project(execute(client.build_get_project())).unwrap();
    assert_eq!(project.into_inner(), json!({"id": 1, "name": "Demo"}));

    // Step 2: languages.
    let languages = client
        .parse_get_project_languages(execute(client.build_get_project_languages()))
        .unwrap();
    let codes: Vec<_> = languages.iter().filter_map(|l| l.code()).collect();
    assert_eq!(codes, ["en", "fr"]);

    // Step 3: French starts empty.
    let strings = client
        .parse_get_language_strings(execute(client.build_get_language_strings("fr")))
        .unwrap();
    assert_eq!(strings, LanguageStrings::Flat(Vec::new()));

    // Step 4: push one string.
    let req = client
        .build_push_language_strings("fr", &[record("hello", "bonjour")])
        .unwrap();
    let reply = client.parse_push_language_strings(execute(req)).unwrap();
    assert_eq!(reply, json!({"status": "ok", "synced": 1}));

    // Step 5: fetch reflects the push.
    let strings = client
        .parse_get_language_strings(execute(client.build_get_language_strings("fr")))
        .unwrap()
        .into_entries();
    assert_eq!(strings.len(), 1);
    assert_eq!(strings[0].key(), Some("hello"));
    assert_eq!(strings[0].value(), Some("bonjour"));

    // Step 6: unknown language is a remote error on fetch and push.
    let err = client
        .parse_get_language_strings(execute(client.build_get_language_strings("xx")))
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    let req = client.build_push_language_strings("xx", &[]).unwrap();
    let err = client.parse_push_language_strings(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::Remote { status: 404, ref message, .. }
        if message == "Error pushing language strings"));
}

#[test]
fn wrong_key_is_invalid_api_key() {
    let base_url = spawn_server();
    let client = ApiClient::with_config("wrong", &base_url, ClientConfig::default());

    let err = client.parse_get_project(execute(client.build_get_project())).unwrap_err();
    match err {
        ApiError::Remote {
            status,
            message,
            details,
        } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid api key");
            assert_eq!(details, json!({"error": "invalid project key"}));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client
        .parse_get_project_languages(execute(client.build_get_project_languages()))
        .unwrap_err();
    assert_eq!(err.to_string(), "Error retrieving project languages (HTTP 401)");
}

#[tokio::test]
async fn async_client_over_reqwest() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(mock_server::run(listener, Store::default()));

    let client = BilingualClient::with_transport(
        ApiClient::with_config(DEFAULT_PROJECT_KEY, &base_url, ClientConfig::new("true")),
        ReqwestTransport::new(),
    );

    let (project, languages) = tokio::join!(client.get_project(), client.get_project_languages());
    assert_eq!(project.unwrap().name(), Some("Demo"));
    assert_eq!(languages.unwrap().len(), 2);

    let strings = client.get_language_strings("en").await.unwrap();
    match strings {
        LanguageStrings::Grouped(groups) => {
            assert_eq!(groups["greetings"][0]["key"], "hello");
        }
        other => panic!("expected grouped strings, got {other:?}"),
    }

    let reply = client
        .push_language_strings("en", &[record("hello", "Hi")])
        .await
        .unwrap();
    assert_eq!(reply["synced"], 1);

    let entries = client.get_language_strings("en").await.unwrap().into_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].value(), Some("Hi"));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind then drop to get a port nobody is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BilingualClient::with_transport(
        ApiClient::with_config("k", &format!("http://{addr}"), ClientConfig::default()),
        ReqwestTransport::new(),
    );
    let err = client.get_project().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}
