mod common;

use axum::http::{StatusCode, header::SET_COOKIE};
use axum_test::TestServer;
use common::{
    StubBackend, StubResponse, analytics_json, lead_json, leads_page_json, session,
    session_cookie_header, web_server,
};
use serde_json::json;

fn stub_dashboard(backend: &StubBackend, pages: u32) {
    backend.on(
        "GET",
        "/api/leads",
        StubResponse::json(
            200,
            leads_page_json(
                vec![
                    lead_json("l1", "Acme Corp", "New"),
                    lead_json("l2", "Globex", "Converted"),
                ],
                pages,
            ),
        ),
    );
    backend.on(
        "GET",
        "/api/leads/analytics",
        StubResponse::json(200, analytics_json(40, 10)),
    );
}

async fn get_with_session(server: &TestServer, path: &str) -> axum_test::TestResponse {
    let (name, value) = session_cookie_header(&session());
    server.get(path).add_header(name, value).await
}

fn next_href(html: &str) -> String {
    let end = html.find("\" rel=\"next\"").expect("next link");
    let start = html[..end].rfind("href=\"").expect("href") + "href=\"".len();
    html[start..end].replace("&amp;", "&")
}

#[tokio::test]
async fn test_dashboard_renders_leads_and_analytics() {
    let backend = StubBackend::start().await;
    stub_dashboard(&backend, 5);
    let server = web_server(&backend);

    let response = get_with_session(&server, "/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Acme Corp"));
    assert!(html.contains("data-href=\"/leads/l1\""));
    assert!(html.contains("badge badge-new"));
    assert!(html.contains("badge badge-converted"));
    assert!(html.contains("1/15/2024"));
    assert!(html.contains("25.0%"));
    assert!(html.contains("Page <strong>1</strong> of <strong>5</strong>"));
    assert!(!html.contains("rel=\"prev\""));
    assert!(html.contains("data-theme-toggle"));
}

#[tokio::test]
async fn test_dashboard_forwards_session_to_both_requests() {
    let backend = StubBackend::start().await;
    stub_dashboard(&backend, 1);
    let server = web_server(&backend);

    get_with_session(&server, "/").await.assert_status_ok();

    let leads = backend.requests_to("/api/leads");
    let analytics = backend.requests_to("/api/leads/analytics");
    assert_eq!(leads.len(), 1);
    assert_eq!(analytics.len(), 1);
    for request in leads.iter().chain(analytics.iter()) {
        assert_eq!(request.header("cookie"), Some("sid=abc123"));
        assert_eq!(request.header("authorization"), Some("Bearer tok-1"));
    }

    let query = leads[0].query_pairs();
    assert_eq!(query["page"], "1");
    assert_eq!(query["limit"], "10");
    assert_eq!(query["search"], "");
    assert_eq!(query["status"], "");
    assert_eq!(query["sort"], "-createdAt");
}

#[tokio::test]
async fn test_next_page_keeps_filters() {
    let backend = StubBackend::start().await;
    stub_dashboard(&backend, 5);
    let server = web_server(&backend);

    let first = get_with_session(&server, "/?search=acme&status=New&sort=name").await;
    first.assert_status_ok();
    let href = next_href(&first.text());
    assert!(href.starts_with("/?page=2"));

    get_with_session(&server, &href).await.assert_status_ok();

    let leads = backend.requests_to("/api/leads");
    assert_eq!(leads.len(), 2);
    let query = leads[1].query_pairs();
    assert_eq!(query["page"], "2");
    assert_eq!(query["search"], "acme");
    assert_eq!(query["status"], "New");
    assert_eq!(query["sort"], "name");
}

#[tokio::test]
async fn test_empty_filter_values_are_ignored() {
    let backend = StubBackend::start().await;
    stub_dashboard(&backend, 1);
    let server = web_server(&backend);

    get_with_session(&server, "/?page=&search=&status=&sort=")
        .await
        .assert_status_ok();

    let query = backend.requests_to("/api/leads")[0].query_pairs();
    assert_eq!(query["page"], "1");
    assert_eq!(query["status"], "");
    assert_eq!(query["sort"], "-createdAt");
}

#[tokio::test]
async fn test_unknown_status_uses_default_badge() {
    let backend = StubBackend::start().await;
    backend.on(
        "GET",
        "/api/leads",
        StubResponse::json(
            200,
            leads_page_json(vec![lead_json("l9", "Initech", "Nurturing")], 1),
        ),
    );
    backend.on(
        "GET",
        "/api/leads/analytics",
        StubResponse::json(200, analytics_json(1, 0)),
    );
    let server = web_server(&backend);

    let html = get_with_session(&server, "/").await.text();

    assert!(html.contains("<span class=\"badge badge-default\">Nurturing</span>"));
}

#[tokio::test]
async fn test_empty_list_shows_placeholder() {
    let backend = StubBackend::start().await;
    backend.on(
        "GET",
        "/api/leads",
        StubResponse::json(200, json!({ "leads": [], "pagination": { "pages": 0 } })),
    );
    backend.on(
        "GET",
        "/api/leads/analytics",
        StubResponse::json(200, analytics_json(0, 0)),
    );
    let server = web_server(&backend);

    let response = get_with_session(&server, "/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("No leads found"));
    assert!(html.contains("Page <strong>1</strong> of <strong>1</strong>"));
    assert!(!html.contains("rel=\"next\""));
}

#[tokio::test]
async fn test_expired_session_redirects_to_login() {
    let backend = StubBackend::start().await;
    backend.on(
        "GET",
        "/api/leads",
        StubResponse::json(401, json!({ "message": "Not authorized" })),
    );
    backend.on(
        "GET",
        "/api/leads/analytics",
        StubResponse::json(200, analytics_json(1, 0)),
    );
    let server = web_server(&backend);

    let response = get_with_session(&server, "/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
    let cleared = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|c| c.starts_with("lm_session=;") && c.contains("Max-Age=0"));
    assert!(cleared);
}

#[tokio::test]
async fn test_backend_failure_also_redirects_to_login() {
    let backend = StubBackend::start().await;
    stub_dashboard(&backend, 1);
    backend.on(
        "GET",
        "/api/leads/analytics",
        StubResponse::json(500, json!({ "message": "Database down" })),
    );
    let server = web_server(&backend);

    let response = get_with_session(&server, "/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_visitor_without_session_is_sent_to_login() {
    let backend = StubBackend::start().await;
    backend.on(
        "GET",
        "/api/leads",
        StubResponse::json(401, json!({ "message": "Not authorized" })),
    );
    backend.on(
        "GET",
        "/api/leads/analytics",
        StubResponse::json(401, json!({ "message": "Not authorized" })),
    );
    let server = web_server(&backend);

    let response = server.get("/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
    assert!(backend.requests().iter().all(|r| r.header("cookie").is_none()));
}

#[tokio::test]
async fn test_page_past_the_end_redirects_to_last_page() {
    let backend = StubBackend::start().await;
    stub_dashboard(&backend, 10);
    let server = web_server(&backend);

    let response = get_with_session(&server, "/?page=20&status=New").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/?page=10&status=New&sort=-createdAt");
}

#[tokio::test]
async fn test_huge_page_number_redirects_to_last_page() {
    let backend = StubBackend::start().await;
    stub_dashboard(&backend, 10);
    let server = web_server(&backend);

    let response = get_with_session(&server, "/?page=4294967295").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/?page=10&sort=-createdAt");

    let last = get_with_session(&server, "/?page=10").await;
    last.assert_status_ok();
    let html = last.text();
    assert!(html.contains("Page <strong>10</strong> of <strong>10</strong>"));
    assert!(html.contains("href=\"/?page=8&amp;sort=-createdAt\">8</a>"));
}
