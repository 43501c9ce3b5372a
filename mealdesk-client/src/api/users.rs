//! User endpoints

use serde::Deserialize;
use serde_json::Value;
use shared::models::{PasswordReset, User, UserCreate, UserUpdate};
use shared::{Envelope, ListPage};

use super::{Counts, open};
use crate::ClientResult;
use crate::http::HttpClient;
use crate::query::SearchQuery;

const BASE: &str = "/api/admin/users";

#[derive(Deserialize)]
struct UsersBody {
    users: Vec<User>,
    #[serde(flatten)]
    counts: Counts,
}

#[derive(Deserialize)]
struct UserBody {
    user: User,
}

/// GET /api/admin/users
pub(super) async fn list<H: HttpClient>(http: &H, query: &SearchQuery) -> ClientResult<ListPage<User>> {
    let value: Value = http.get(&query.to_query().to_path(BASE)).await?;
    let body: UsersBody = open(value)?;
    Ok(body.counts.page(body.users))
}

/// POST /api/admin/users
pub(super) async fn create<H: HttpClient>(http: &H, data: &UserCreate) -> ClientResult<User> {
    let value: Value = http.post(BASE, data).await?;
    open::<UserBody>(value).map(|b| b.user)
}

/// PUT /api/admin/users/{id}
pub(super) async fn update<H: HttpClient>(http: &H, id: i64, data: &UserUpdate) -> ClientResult<User> {
    let value: Value = http.put(&format!("{}/{}", BASE, id), data).await?;
    open::<UserBody>(value).map(|b| b.user)
}

/// DELETE /api/admin/users/{id}
pub(super) async fn delete<H: HttpClient>(http: &H, id: i64) -> ClientResult<()> {
    let value: Value = http.delete(&format!("{}/{}", BASE, id)).await?;
    open::<Envelope>(value).map(|_| ())
}

/// POST /api/admin/users/{id}/reset-password
pub(super) async fn reset_password<H: HttpClient>(
    http: &H,
    id: i64,
    new_password: &str,
) -> ClientResult<()> {
    let body = PasswordReset {
        new_password: new_password.to_string(),
    };
    let value: Value = http
        .post(&format!("{}/{}/reset-password", BASE, id), &body)
        .await?;
    open::<Envelope>(value).map(|_| ())
}
