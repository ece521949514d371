use error_cat_core::{ErrorBuilder, Result};
use reqwest::Response;
use tracing::warn;

/// Turn a Rollbar API response into success or a transport error
pub(crate) async fn handle_rollbar_response(response: Response) -> Result<()> {
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        warn!(
            url = %url,
            status = %status,
            "Reporting service rejected item"
        );
        Err(ErrorBuilder::transport().rejected(status.as_u16(), body))
    }
}
