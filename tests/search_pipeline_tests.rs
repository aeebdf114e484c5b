use anyhow::Result;
use std::time::{Duration, Instant};

use chat_search::fetcher::BROWSER_USER_AGENT;
use chat_search::search::{
    ENRICHED_RESULTS, MAX_SUMMARY_CHARS, NO_RESULTS_SUMMARY, WebSearch,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod test_helpers {
    use super::*;

    pub const PROVIDER_PATH: &str = "/html/";

    pub fn result_block(title: &str, href: &str, snippet: &str) -> String {
        format!(
            r#"<div class="result results_links web-result">
                 <h2 class="result__title"><a rel="nofollow" class="result__a" href="{href}">{title}</a></h2>
                 <div class="result__extras"><span class="result__url">{href}</span></div>
                 <a class="result__snippet" href="{href}">{snippet}</a>
               </div>"#
        )
    }

    pub fn results_page(blocks: &[String]) -> String {
        format!(
            r#"<!DOCTYPE html><html><head><title>results</title></head>
               <body><div id="links" class="results">{}</div></body></html>"#,
            blocks.join("\n")
        )
    }

    /// `count` results, each pointing at `/page/{i}` on the mock server.
    pub fn results_for_server(server: &MockServer, count: usize) -> String {
        let blocks = (0..count)
            .map(|i| {
                result_block(
                    &format!("Steel report {i}"),
                    &format!("{}/page/{i}", server.uri()),
                    &format!("snippet {i}"),
                )
            })
            .collect::<Vec<String>>();
        results_page(&blocks)
    }

    pub fn article_page(text: &str) -> String {
        format!(
            r#"<html><body>
                 <nav>Menu Home About</nav>
                 <article><p>{text}</p></article>
                 <footer>Footer links</footer>
               </body></html>"#
        )
    }

    pub async fn mount_provider(server: &MockServer, html: String) {
        Mock::given(method("GET"))
            .and(path(PROVIDER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(server)
            .await;
    }

    pub async fn mount_page(server: &MockServer, page_path: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(response)
            .mount(server)
            .await;
    }

    pub fn web_search(server: &MockServer) -> WebSearch {
        WebSearch::new()
            .with_endpoint(format!("{}{PROVIDER_PATH}", server.uri()))
            .with_enrich_timeout(Duration::from_secs(2))
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_end_to_end_fetches_top_three() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .and(query_param("q", "current steel prices"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_for_server(&server, 5)))
        .expect(1)
        .mount(&server)
        .await;

    for i in 0..3 {
        mount_page(
            &server,
            &format!("/page/{i}"),
            ResponseTemplate::new(200).set_body_string(article_page(&format!("Page body {i}"))),
        )
        .await;
    }
    for i in 3..5 {
        Mock::given(method("GET"))
            .and(path(format!("/page/{i}")))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
    }

    let response = web_search(&server).search("current steel prices").await;

    assert_eq!(response.query, "current steel prices");
    assert_eq!(response.results.len(), ENRICHED_RESULTS);
    for (i, result) in response.results.iter().enumerate() {
        assert_eq!(result.title, format!("Steel report {i}"));
        assert_eq!(result.content.as_deref(), Some(format!("Page body {i}").as_str()));
    }
    assert_eq!(
        response.summary,
        "Steel report 0: Page body 0\n\nSteel report 1: Page body 1\n\nSteel report 2: Page body 2"
    );
    Ok(())
}

#[tokio::test]
async fn test_long_pages_are_capped() -> Result<()> {
    let server = MockServer::start().await;
    mount_provider(&server, results_for_server(&server, 3)).await;
    for i in 0..3 {
        mount_page(
            &server,
            &format!("/page/{i}"),
            ResponseTemplate::new(200).set_body_string(article_page(&"word ".repeat(2000))),
        )
        .await;
    }

    let response = web_search(&server).search("steel").await;

    assert_eq!(response.results.len(), 3);
    for result in &response.results {
        let content = result.content.as_deref().unwrap_or_default();
        assert_eq!(content.chars().count(), 2000);
    }
    assert_eq!(response.summary.chars().count(), MAX_SUMMARY_CHARS);
    assert!(response.summary.starts_with("Steel report 0: word word"));
    Ok(())
}

#[tokio::test]
async fn test_fewer_results_than_enrichment_cap() -> Result<()> {
    let server = MockServer::start().await;
    mount_provider(&server, results_for_server(&server, 2)).await;
    for i in 0..2 {
        mount_page(
            &server,
            &format!("/page/{i}"),
            ResponseTemplate::new(200).set_body_string(article_page("text")),
        )
        .await;
    }

    let response = web_search(&server).search("steel").await;
    assert_eq!(response.results.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_no_results_skips_enrichment() -> Result<()> {
    let server = MockServer::start().await;
    mount_provider(&server, results_page(&[])).await;

    let response = web_search(&server).search("nothing to see").await;

    assert!(response.results.is_empty());
    assert_eq!(response.summary, NO_RESULTS_SUMMARY);
    // only the provider was hit
    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_provider_error_status_degrades_to_no_results() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string(results_for_server(&server, 5)))
        .mount(&server)
        .await;

    let response = web_search(&server).search("steel").await;

    assert!(response.results.is_empty());
    assert_eq!(response.summary, NO_RESULTS_SUMMARY);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_provider_degrades_to_no_results() -> Result<()> {
    let response = WebSearch::new()
        .with_endpoint("http://127.0.0.1:1/html/")
        .search("steel")
        .await;

    assert_eq!(response.query, "steel");
    assert!(response.results.is_empty());
    assert_eq!(response.summary, NO_RESULTS_SUMMARY);
    Ok(())
}

#[tokio::test]
async fn test_requests_carry_browser_user_agent() -> Result<()> {
    let server = MockServer::start().await;
    mount_provider(&server, results_for_server(&server, 1)).await;
    mount_page(
        &server,
        "/page/0",
        ResponseTemplate::new(200).set_body_string(article_page("from page")),
    )
    .await;

    let response = web_search(&server).search("steel").await;
    assert_eq!(response.results[0].content.as_deref(), Some("from page"));

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 2);
    for request in &received {
        let user_agent = request
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok());
        assert_eq!(user_agent, Some(BROWSER_USER_AGENT), "for {}", request.url);
    }
    Ok(())
}

#[tokio::test]
async fn test_failed_enrichment_falls_back_to_snippet() -> Result<()> {
    let server = MockServer::start().await;
    mount_provider(&server, results_for_server(&server, 3)).await;
    mount_page(
        &server,
        "/page/0",
        ResponseTemplate::new(200).set_body_string(article_page("good page")),
    )
    .await;
    mount_page(&server, "/page/1", ResponseTemplate::new(500)).await;
    mount_page(
        &server,
        "/page/2",
        ResponseTemplate::new(200).set_body_string("<html><body>   </body></html>"),
    )
    .await;

    let response = web_search(&server).search("steel").await;

    let contents = response
        .results
        .iter()
        .map(|r| r.content.clone().unwrap_or_default())
        .collect::<Vec<String>>();
    assert_eq!(contents, vec!["good page", "snippet 1", "snippet 2"]);
    assert!(response.results.iter().all(|r| !r.content.as_deref().unwrap_or("").is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_slow_page_times_out_without_blocking_others() -> Result<()> {
    let server = MockServer::start().await;
    mount_provider(&server, results_for_server(&server, 3)).await;
    mount_page(
        &server,
        "/page/0",
        ResponseTemplate::new(200).set_body_string(article_page("fast zero")),
    )
    .await;
    mount_page(
        &server,
        "/page/1",
        ResponseTemplate::new(200)
            .set_body_string(article_page("too late"))
            .set_delay(Duration::from_secs(6)),
    )
    .await;
    mount_page(
        &server,
        "/page/2",
        ResponseTemplate::new(200)
            .set_body_string(article_page("fast two"))
            .set_delay(Duration::from_millis(300)),
    )
    .await;

    let search = web_search(&server).with_enrich_timeout(Duration::from_secs(1));
    let start = Instant::now();
    let response = search.search("steel").await;
    let elapsed = start.elapsed();

    // bounded by the single timeout, not the slow page's delay
    assert!(elapsed < Duration::from_secs(4), "took {elapsed:?}");
    assert!(elapsed >= Duration::from_secs(1), "took {elapsed:?}");

    let contents = response
        .results
        .iter()
        .map(|r| r.content.clone().unwrap_or_default())
        .collect::<Vec<String>>();
    assert_eq!(contents, vec!["fast zero", "snippet 1", "fast two"]);
    Ok(())
}

#[tokio::test]
async fn test_protocol_relative_urls_are_normalized() -> Result<()> {
    let server = MockServer::start().await;
    mount_provider(
        &server,
        results_page(&[
            result_block("Relative", "//127.0.0.1:1/steel", "relative snippet"),
            result_block("Absolute", &format!("{}/page/0", server.uri()), "absolute snippet"),
        ]),
    )
    .await;
    mount_page(
        &server,
        "/page/0",
        ResponseTemplate::new(200).set_body_string(article_page("absolute page")),
    )
    .await;

    let response = web_search(&server).search("steel").await;

    assert_eq!(response.results[0].url, "https://127.0.0.1:1/steel");
    assert_eq!(response.results[0].content.as_deref(), Some("relative snippet"));
    assert_eq!(response.results[1].url, format!("{}/page/0", server.uri()));
    assert_eq!(response.results[1].content.as_deref(), Some("absolute page"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_endpoint_degrades_to_no_results() -> Result<()> {
    let response = WebSearch::new()
        .with_endpoint("not a url")
        .search("steel")
        .await;

    assert!(response.results.is_empty());
    assert_eq!(response.summary, NO_RESULTS_SUMMARY);
    Ok(())
}
