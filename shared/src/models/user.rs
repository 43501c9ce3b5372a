//! User Model

use serde::{Deserialize, Serialize};

/// Admin console account role
///
/// Only drives the display label; authorization is the backend's job.
/// Unknown roles are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Nutritionist,
    Admin,
    SuperAdmin,
    Other(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Nutritionist => "nutritionist",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
            Self::Other(raw) => raw,
        }
    }

    /// Korean display label, raw value for unknown roles
    pub fn label(&self) -> &str {
        match self {
            Self::Nutritionist => "영양사",
            Self::Admin => "관리자",
            Self::SuperAdmin => "최고관리자",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "nutritionist" => Self::Nutritionist,
            "admin" => Self::Admin,
            "super_admin" => Self::SuperAdmin,
            _ => Self::Other(value),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::str::FromStr for UserRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// User entity (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Name of the site the user manages
    #[serde(default)]
    pub managed_site: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub assigned_sites_count: u32,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub phone_number: Option<String>,
    pub managed_site: Option<String>,
    pub is_active: Option<bool>,
}

/// Update user payload
///
/// Nullable fields are `Option<Option<_>>`; `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub department: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub phone_number: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub managed_site: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Reset password payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(UserRole::Nutritionist.label(), "영양사");
        assert_eq!(UserRole::Admin.label(), "관리자");
        assert_eq!(UserRole::SuperAdmin.label(), "최고관리자");
        assert_eq!(UserRole::from("auditor".to_string()).label(), "auditor");
    }

    #[test]
    fn test_user_defaults() {
        let user: User =
            serde_json::from_str(r#"{"id": 1, "username": "kim", "role": "super_admin"}"#).unwrap();
        assert_eq!(user.role, UserRole::SuperAdmin);
        assert!(user.is_active);
        assert_eq!(user.assigned_sites_count, 0);
    }
}
