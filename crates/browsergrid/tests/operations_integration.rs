// Integration tests for the endpoint operations against a local mock of
// the REST surface. Covers the dispatch URL/header policy, the three-way
// response decoding, and error classification from live responses.


use browsergrid::api::{
    ContentRequest, CreateSessionRequest, FunctionRequest, PdfRequest, PerformanceRequest,
    ScrapeRequest, ScrapeTarget, ScreenshotRequest, SessionStatus,
};
use browsergrid::{BrowserFlavor, Client, ClientConfig, ErrorKind};
use test_server::TestServer;

fn client_for(server: &TestServer) -> Client {
    let config = ClientConfig::builder()
        .token("tok_test")
        .base_url(server.url())
        .build()
        .unwrap();
    Client::new(config)
}

#[tokio::test]
async fn test_render_pdf_returns_exact_bytes_from_flavor_scoped_url() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    let request = PdfRequest::builder().url("https://example.com").build();
    let document = client.render_pdf(request).await.unwrap();

    assert_eq!(&document[..], test_server::expected_pdf_bytes());

    let recorded = server.recorder.last();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/chrome/pdf");
    assert_eq!(recorded.authorization.as_deref(), Some("Bearer tok_test"));
    assert_eq!(recorded.content_type.as_deref(), Some("application/json"));
    assert!(recorded.body.contains("https://example.com"));
    server.shutdown();
}

#[tokio::test]
async fn test_screenshot_returns_image_bytes() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    let request = ScreenshotRequest::builder()
        .url("https://example.com")
        .full_page(true)
        .build();
    let image = client.screenshot(request).await.unwrap();

    assert_eq!(&image[..], test_server::expected_png_bytes());
    assert_eq!(server.recorder.last().path, "/chrome/screenshot");
    server.shutdown();
}

#[tokio::test]
async fn test_validation_failure_never_reaches_the_network() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    // No url and no html: rejected locally
    let err = client.render_pdf(PdfRequest::builder().build()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(server.recorder.requests().is_empty());
    server.shutdown();
}

#[tokio::test]
async fn test_flavor_override_reaches_overridden_route() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    // The firefox pdf route is a canned 401
    let request = PdfRequest::builder()
        .url("https://example.com")
        .flavor(BrowserFlavor::Firefox)
        .build();
    let err = client.render_pdf(request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status(), Some(401));
    assert_eq!(server.recorder.last().path, "/firefox/pdf");

    // The default flavor is untouched for the next call
    let request = PdfRequest::builder().url("https://example.com").build();
    client.render_pdf(request).await.unwrap();
    assert_eq!(server.recorder.last().path, "/chrome/pdf");
    server.shutdown();
}

#[tokio::test]
async fn test_remote_failures_are_classified_by_status() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    let request = PdfRequest::builder()
        .url("https://example.com")
        .flavor(BrowserFlavor::Webkit)
        .build();
    let err = client.render_pdf(request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.status(), Some(429));
    // The raw response body is preserved for inspection
    assert!(err.body().unwrap_or_default().contains("concurrency"));

    let request = PdfRequest::builder()
        .url("https://example.com")
        .flavor(BrowserFlavor::Edge)
        .build();
    let err = client.render_pdf(request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.status(), Some(502));
    server.shutdown();
}

#[tokio::test]
async fn test_content_decodes_json_envelope() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    let content = client
        .extract_content(ContentRequest::for_url("https://example.com"))
        .await
        .unwrap();
    assert!(content.contains("rendered"));
    server.shutdown();
}

#[tokio::test]
async fn test_function_and_scrape_results_are_typed() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    let result = client
        .run_function(FunctionRequest::new("export default () => ({ sum: 42 })"))
        .await
        .unwrap();
    assert_eq!(result.kind.as_deref(), Some("object"));
    assert_eq!(result.data["sum"], 42);

    let scraped = client
        .scrape(ScrapeRequest::for_url(
            "https://example.com",
            vec![ScrapeTarget::new("h1")],
        ))
        .await
        .unwrap();
    assert_eq!(scraped.data[0].selector, "h1");
    assert_eq!(
        scraped.data[0].results[0].text.as_deref(),
        Some("Example Domain")
    );
    server.shutdown();
}

#[tokio::test]
async fn test_unexpected_content_kind_is_a_generic_error() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    // The mock export route answers text/plain; export expects JSON
    let err = client
        .export(browsergrid::api::ExportRequest::for_url(
            "https://example.com",
            browsergrid::api::ExportFormat::Markdown,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert!(err.to_string().contains("expected a JSON response"));
    server.shutdown();
}

#[tokio::test]
async fn test_download_returns_octet_stream_as_bytes() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    let file = client
        .download(browsergrid::api::DownloadRequest::for_url(
            "https://example.com/report",
        ))
        .await
        .unwrap();
    assert!(file.starts_with(b"csv,data"));
    server.shutdown();
}

#[tokio::test]
async fn test_flavor_agnostic_paths_have_no_flavor_segment() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(server.recorder.last().path, "/health");

    let metrics = client.metrics().await.unwrap();
    assert_eq!(metrics["sessions"]["running"], 2);
    assert_eq!(server.recorder.last().path, "/metrics");

    let config = client.server_config().await.unwrap();
    assert_eq!(config["maxConcurrent"], 10);
    assert_eq!(server.recorder.last().path, "/config");
    server.shutdown();
}

#[tokio::test]
async fn test_session_lifecycle() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    let session = client
        .create_session(CreateSessionRequest::new())
        .await
        .unwrap();
    assert_eq!(session.id, "sess_1");
    assert_eq!(session.status, SessionStatus::Running);
    assert_eq!(server.recorder.last().path, "/sessions");

    let read_back = client.get_session(&session.id).await.unwrap();
    assert_eq!(read_back.status, SessionStatus::Running);
    assert_eq!(server.recorder.last().path, "/sessions/sess_1");

    client.close_session(&session.id).await.unwrap();
    assert_eq!(server.recorder.last().method, "DELETE");

    // Closing an unknown id forwards the remote rejection, classified
    let err = client.close_session("sess_unknown").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.status(), Some(404));
    server.shutdown();
}

#[tokio::test]
async fn test_timeout_aborts_the_in_flight_call() {
    let server = TestServer::start().await;
    let config = ClientConfig::builder()
        .token("tok_test")
        .base_url(server.url())
        .timeout_ms(1_000)
        .build()
        .unwrap();
    let client = Client::new(config);

    let started = std::time::Instant::now();
    let err = client
        .performance(PerformanceRequest::for_url("https://example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    // Must abort near the configured deadline, nowhere near the mock's sleep
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    server.shutdown();
}

#[tokio::test]
async fn test_unreachable_service_is_a_network_error() {
    // Bind and immediately drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::builder()
        .token("tok_test")
        .base_url(format!("http://{addr}"))
        .build()
        .unwrap();
    let client = Client::new(config);

    let err = client.health().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_fan_out_and_collect() {
    let server = TestServer::start().await;
    let client = client_for(&server);

    // Concurrent operations on one client race independently; callers
    // gather settled results and partition them
    let flavors = [
        BrowserFlavor::Chrome,
        BrowserFlavor::Chrome,
        BrowserFlavor::Firefox, // canned 401 route
    ];
    let results = futures_util::future::join_all(flavors.iter().map(|&flavor| {
        client.render_pdf(
            PdfRequest::builder()
                .url("https://example.com")
                .flavor(flavor)
                .build(),
        )
    }))
    .await;

    let (ok, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    assert_eq!(ok.len(), 2);
    assert_eq!(failed.len(), 1);
    assert_eq!(server.recorder.requests().len(), 3);
    server.shutdown();
}
