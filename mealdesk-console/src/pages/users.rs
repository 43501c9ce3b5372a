//! 사용자 관리

use mealdesk_client::{AdminApi, SearchQuery};
use shared::models::{User, UserCreate, UserRole, UserUpdate};
use std::sync::Arc;

use super::{Listing, non_blank, report};
use crate::error::{ConsoleError, ConsoleResult};
use crate::notice::Notice;
use crate::view::{Badge, Cell, Row, Table};

const MIN_PASSWORD_LEN: usize = 4;

/// User form; `id` is set when editing an existing account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub id: Option<i64>,
    pub username: String,
    /// Only sent on create
    pub password: String,
    pub role: UserRole,
    pub department: String,
    pub phone_number: String,
    pub managed_site: String,
    pub is_active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            id: None,
            username: String::new(),
            password: String::new(),
            role: UserRole::Nutritionist,
            department: String::new(),
            phone_number: String::new(),
            managed_site: String::new(),
            is_active: true,
        }
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id),
            username: user.username.clone(),
            password: String::new(),
            role: user.role.clone(),
            department: user.department.clone().unwrap_or_default(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            managed_site: user.managed_site.clone().unwrap_or_default(),
            is_active: user.is_active,
        }
    }
}

impl UserForm {
    fn validate(&self) -> ConsoleResult<()> {
        if self.username.trim().is_empty() {
            return Err(ConsoleError::validation("아이디를 입력하세요"));
        }
        if self.id.is_none() && self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ConsoleError::validation(format!(
                "비밀번호는 {}자 이상이어야 합니다",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    fn to_create(&self) -> UserCreate {
        UserCreate {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            role: self.role.clone(),
            department: non_blank(&self.department),
            phone_number: non_blank(&self.phone_number),
            managed_site: non_blank(&self.managed_site),
            is_active: Some(self.is_active),
        }
    }

    fn to_update(&self) -> UserUpdate {
        UserUpdate {
            username: Some(self.username.trim().to_string()),
            role: Some(self.role.clone()),
            department: Some(non_blank(&self.department)),
            phone_number: Some(non_blank(&self.phone_number)),
            managed_site: Some(non_blank(&self.managed_site)),
            is_active: Some(self.is_active),
        }
    }
}

pub struct UsersPage {
    api: Arc<dyn AdminApi>,
    pub listing: Listing<User>,
    pub search: Option<String>,
    pub form: Option<UserForm>,
    pub notice: Option<Notice>,
}

impl UsersPage {
    pub fn new(api: Arc<dyn AdminApi>, per_page: u32) -> Self {
        Self {
            api,
            listing: Listing::new(per_page),
            search: None,
            form: None,
            notice: None,
        }
    }

    pub async fn load(&mut self) -> ConsoleResult<()> {
        let mut query = SearchQuery::new(self.listing.page, self.listing.per_page);
        query.search = self.search.clone();
        match self.api.list_users(&query).await {
            Ok(list) => {
                self.listing.apply(list);
                Ok(())
            }
            Err(err) => {
                let err = ConsoleError::from(err);
                self.listing.fail(err.user_message());
                Err(report(&mut self.notice, err))
            }
        }
    }

    /// New search from the first page
    pub async fn search(&mut self, term: &str) -> ConsoleResult<()> {
        self.search = non_blank(term);
        self.listing.page = 1;
        self.load().await
    }

    pub async fn go_to(&mut self, page: u32) -> ConsoleResult<()> {
        self.listing.go_to(page);
        self.load().await
    }

    pub fn new_form(&mut self) -> &mut UserForm {
        self.form.insert(UserForm::default())
    }

    /// Open the form for a row of the current page
    pub fn edit(&mut self, id: i64) -> ConsoleResult<&mut UserForm> {
        let user = self
            .listing
            .rows
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| ConsoleError::NotFound(format!("User {}", id)))?;
        Ok(self.form.insert(UserForm::from(user)))
    }

    /// Create or update from `form`; the form stays open on failure
    pub async fn submit_form(&mut self, form: UserForm) -> ConsoleResult<()> {
        if let Err(err) = form.validate() {
            self.form = Some(form);
            return Err(report(&mut self.notice, err));
        }

        let result = match form.id {
            Some(id) => self.api.update_user(id, &form.to_update()).await,
            None => self.api.create_user(&form.to_create()).await,
        };
        match result {
            Ok(user) => {
                tracing::info!(id = user.id, "user saved");
                self.form = None;
                self.notice = Some(Notice::success(format!("{} 저장되었습니다", user.username)));
                self.load().await
            }
            Err(err) => {
                self.form = Some(form);
                Err(report(&mut self.notice, err.into()))
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> ConsoleResult<()> {
        if let Err(err) = self.api.delete_user(id).await {
            return Err(report(&mut self.notice, err.into()));
        }
        tracing::info!(id, "user deleted");
        self.notice = Some(Notice::success("사용자가 삭제되었습니다"));
        self.load().await
    }

    pub async fn reset_password(&mut self, id: i64, new_password: &str) -> ConsoleResult<()> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            let err = ConsoleError::validation(format!(
                "비밀번호는 {}자 이상이어야 합니다",
                MIN_PASSWORD_LEN
            ));
            return Err(report(&mut self.notice, err));
        }
        if let Err(err) = self.api.reset_password(id, new_password).await {
            return Err(report(&mut self.notice, err.into()));
        }
        self.notice = Some(Notice::success("비밀번호가 초기화되었습니다"));
        Ok(())
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new(
            vec!["ID", "아이디", "역할", "부서", "연락처", "담당 사업장", "상태"],
            "등록된 사용자가 없습니다",
        );
        table.rows = self
            .listing
            .rows
            .iter()
            .map(|user| Row {
                key: Some(user.id),
                cells: vec![
                    Cell::text(user.id.to_string()),
                    Cell::text(&user.username),
                    Cell::text(user.role.label()),
                    Cell::opt(user.department.as_deref()),
                    Cell::opt(user.phone_number.as_deref()),
                    Cell::text(match user.managed_site.as_deref() {
                        Some(site) if !site.trim().is_empty() => site.to_string(),
                        _ => format!("{}곳", user.assigned_sites_count),
                    }),
                    Cell::Badge(Badge::active(user.is_active)),
                ],
            })
            .collect();
        table.pagination = Some(self.listing.pagination);
        table.state = self.listing.state.clone();
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::FakeApi;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            username: name.to_string(),
            role: UserRole::Admin,
            department: None,
            phone_number: None,
            managed_site: None,
            is_active: true,
            assigned_sites_count: 2,
        }
    }

    #[tokio::test]
    async fn test_unpaginated_server_is_sliced_locally() {
        let api = Arc::new(FakeApi {
            users: (1..=45).map(|i| user(i, &format!("u{}", i))).collect(),
            ..FakeApi::default()
        });
        let mut page = UsersPage::new(api, 20);
        page.load().await.unwrap();
        assert_eq!(page.listing.pagination.total_pages, 3);
        assert_eq!(page.listing.rows.len(), 20);

        page.go_to(3).await.unwrap();
        assert_eq!(page.listing.rows.len(), 5);
        assert_eq!(page.listing.rows[0].id, 41);

        page.go_to(9).await.unwrap();
        assert_eq!(page.listing.page, 3);
    }

    #[tokio::test]
    async fn test_short_password_sends_nothing() {
        let api = Arc::new(FakeApi::default());
        let mut page = UsersPage::new(api.clone(), 20);
        let form = UserForm {
            username: "lee".to_string(),
            password: "12".to_string(),
            ..UserForm::default()
        };
        assert!(matches!(
            page.submit_form(form).await,
            Err(ConsoleError::Validation(_))
        ));
        assert!(api.calls().is_empty());
        assert!(page.form.is_some());
        assert!(page.notice.as_ref().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_form() {
        let api = Arc::new(FakeApi {
            reject: Some("이미 존재하는 아이디입니다".to_string()),
            ..FakeApi::default()
        });
        let mut page = UsersPage::new(api.clone(), 20);
        let form = UserForm {
            username: "kim".to_string(),
            password: "secret".to_string(),
            ..UserForm::default()
        };
        assert!(page.submit_form(form.clone()).await.is_err());
        assert_eq!(page.form, Some(form));
        assert_eq!(
            page.notice.as_ref().map(|n| n.message.as_str()),
            Some("이미 존재하는 아이디입니다")
        );
        assert_eq!(api.calls(), vec!["create_user"]);
    }

    #[tokio::test]
    async fn test_blank_department_is_cleared() {
        let mut stored = user(7, "park");
        stored.department = Some("영양팀".to_string());
        let api = Arc::new(FakeApi {
            users: vec![stored],
            ..FakeApi::default()
        });
        let mut page = UsersPage::new(api.clone(), 20);
        page.load().await.unwrap();

        let mut form = page.edit(7).unwrap().clone();
        form.department = "  ".to_string();
        page.submit_form(form).await.unwrap();

        let (target, body) = api.sent().pop().unwrap();
        assert_eq!(target, "update_user/7");
        assert!(body["department"].is_null());
        assert!(body.get("department").is_some());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_table_shows_role_labels() {
        let api = Arc::new(FakeApi {
            users: vec![user(1, "admin")],
            ..FakeApi::default()
        });
        let mut page = UsersPage::new(api, 20);
        page.load().await.unwrap();
        let table = page.table();
        assert_eq!(table.rows[0].cells[2], Cell::text("관리자"));
        assert_eq!(table.rows[0].cells[5], Cell::text("2곳"));
    }
}
