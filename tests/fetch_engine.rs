//! Integration tests for the fetch engine backend against a local HTTP
//! server.

use std::sync::Once;

use rfrenderd::{FetchEngine, Page, RenderEngine, RenderOutcome, Renderer, RendererConfig};
use tiny_http::{Response, Server};

static INIT: Once = Once::new();

/// Start a simple test HTTP server
fn start_test_server() -> String {
    INIT.call_once(|| {
        std::thread::spawn(|| {
            let server = Server::http("127.0.0.1:18090").unwrap();
            for request in server.incoming_requests() {
                let path = request.url().to_string();
                let response = match path.as_str() {
                    "/" => Response::from_string(
                        r#"<!DOCTYPE html>
<html>
<head><title>Test Page</title></head>
<body>
<h1>Hello from Test Server</h1>
<p>This is a test page.</p>
</body>
</html>"#,
                    )
                    .with_header(
                        "Content-Type: text/html; charset=utf-8"
                            .parse::<tiny_http::Header>()
                            .unwrap(),
                    ),
                    _ => Response::from_string("Not Found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });
        // Give the server time to start
        std::thread::sleep(std::time::Duration::from_millis(100));
    });

    "http://127.0.0.1:18090".to_string()
}

#[test]
fn test_fetch_engine_returns_dom_serialization() {
    let base_url = start_test_server();
    let engine =
        FetchEngine::new(&RendererConfig::default()).expect("Failed to create FetchEngine");

    let mut page = engine.open_page().expect("Failed to open page");
    let content = page.load(&base_url).expect("Failed to load URL");

    assert!(content.contains("<title>Test Page</title>"));
    assert!(content.contains("Hello from Test Server"));
}

#[test]
fn test_fetch_engine_reports_http_errors_as_load_failures() {
    let base_url = start_test_server();
    let engine =
        FetchEngine::new(&RendererConfig::default()).expect("Failed to create FetchEngine");

    let mut page = engine.open_page().expect("Failed to open page");
    let err = page
        .load(&format!("{}/missing", base_url))
        .expect_err("404 should fail the load");
    assert!(err.to_string().contains("404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_render_pipeline_end_to_end() {
    let base_url = start_test_server();
    let config = RendererConfig::default();
    // reqwest's blocking client must be built outside the async context
    let engine = tokio::task::spawn_blocking({
        let config = config.clone();
        move || FetchEngine::new(&config)
    })
    .await
    .unwrap()
    .expect("Failed to create FetchEngine");
    let renderer = Renderer::new(engine, &config);

    match renderer.render(&base_url).await {
        RenderOutcome::Success { content } => {
            assert!(content.contains("Hello from Test Server"));
        }
        RenderOutcome::Failure { reason } => panic!("render failed: {}", reason),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_host_is_a_failure_outcome() {
    let config = RendererConfig {
        timeout_ms: 5000,
        ..Default::default()
    };
    // reqwest's blocking client must be built outside the async context
    let engine = tokio::task::spawn_blocking({
        let config = config.clone();
        move || FetchEngine::new(&config)
    })
    .await
    .unwrap()
    .expect("Failed to create FetchEngine");
    let renderer = Renderer::new(engine, &config);

    // Nothing listens on port 1
    let outcome = renderer.render("http://127.0.0.1:1/").await;
    assert!(matches!(outcome, RenderOutcome::Failure { .. }));
}
