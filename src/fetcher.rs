use reqwest::RequestBuilder;
use reqwest::header::USER_AGENT;

use crate::error::SearchError;

/// Desktop browser UA. The search provider serves different markup (or
/// nothing) to clients it does not recognise.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Send the request with the browser UA and return the body of a 2xx response.
pub async fn fetch_html(request: RequestBuilder) -> Result<String, SearchError> {
    let res = request.header(USER_AGENT, BROWSER_USER_AGENT).send().await?;

    let status = res.status();
    if !status.is_success() {
        return Err(SearchError::Status {
            status: status.as_u16(),
            url: res.url().to_string(),
        });
    }

    let body = res.text().await?;
    Ok(body)
}
