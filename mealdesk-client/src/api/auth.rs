//! Session endpoints

use serde_json::Value;
use shared::Envelope;

use super::open;
use crate::ClientResult;
use crate::http::HttpClient;

/// POST /api/auth/logout
pub(super) async fn logout<H: HttpClient>(http: &H) -> ClientResult<()> {
    let value: Value = http.post_empty("/api/auth/logout").await?;
    open::<Envelope>(value).map(|_| ())
}
