//! Site Model
//!
//! Sites form a three-tier hierarchy: head office → detail branch →
//! customer (or period / business-category) leaf.

use serde::{Deserialize, Serialize};

/// Site type as sent by the backend
///
/// Besides the hierarchy types the backend also uses Korean business
/// categories. Anything else is kept verbatim in [`SiteType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteType {
    Head,
    Detail,
    Customer,
    Period,
    /// 도시락
    LunchBox,
    /// 운반
    Delivery,
    /// 학교
    School,
    /// 요양원
    NursingHome,
    /// 위탁
    Contract,
    /// 일반음식점
    Restaurant,
    /// 기타
    Etc,
    Other(String),
}

/// Position of a site type in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteTier {
    Head,
    Detail,
    Customer,
}

impl SiteTier {
    /// Tier a child of this tier belongs to
    pub fn child(&self) -> Option<SiteTier> {
        match self {
            Self::Head => Some(Self::Detail),
            Self::Detail => Some(Self::Customer),
            Self::Customer => None,
        }
    }

    /// Tier a parent of this tier must belong to
    pub fn parent(&self) -> Option<SiteTier> {
        match self {
            Self::Head => None,
            Self::Detail => Some(Self::Head),
            Self::Customer => Some(Self::Detail),
        }
    }

    /// Site type used when creating a site of this tier
    pub fn default_type(&self) -> SiteType {
        match self {
            Self::Head => SiteType::Head,
            Self::Detail => SiteType::Detail,
            Self::Customer => SiteType::Customer,
        }
    }
}

impl SiteType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Head => "head",
            Self::Detail => "detail",
            Self::Customer => "customer",
            Self::Period => "period",
            Self::LunchBox => "도시락",
            Self::Delivery => "운반",
            Self::School => "학교",
            Self::NursingHome => "요양원",
            Self::Contract => "위탁",
            Self::Restaurant => "일반음식점",
            Self::Etc => "기타",
            Self::Other(raw) => raw,
        }
    }

    /// Hierarchy tier; `None` for unknown types
    ///
    /// Period sites and the business categories are leaves, like customers.
    pub fn tier(&self) -> Option<SiteTier> {
        match self {
            Self::Head => Some(SiteTier::Head),
            Self::Detail => Some(SiteTier::Detail),
            Self::Customer
            | Self::Period
            | Self::LunchBox
            | Self::Delivery
            | Self::School
            | Self::NursingHome
            | Self::Contract
            | Self::Restaurant
            | Self::Etc => Some(SiteTier::Customer),
            Self::Other(_) => None,
        }
    }

    /// Korean display label
    pub fn label(&self) -> &str {
        match self {
            Self::Head => "본사",
            Self::Detail => "사업장",
            Self::Customer => "고객사",
            Self::Period => "기간제",
            Self::Other(raw) if raw.trim().is_empty() => UNCLASSIFIED,
            other => other.as_str(),
        }
    }
}

/// Label used for sites without a type
pub const UNCLASSIFIED: &str = "미분류";

/// Display label for an optional site type
///
/// Known types get their fixed Korean label, unknown types are shown raw,
/// and a missing or blank type reads "미분류".
pub fn site_type_display(site_type: Option<&SiteType>) -> &str {
    site_type.map(SiteType::label).unwrap_or(UNCLASSIFIED)
}

impl From<String> for SiteType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "head" => Self::Head,
            "detail" => Self::Detail,
            "customer" => Self::Customer,
            "period" => Self::Period,
            "도시락" => Self::LunchBox,
            "운반" => Self::Delivery,
            "학교" => Self::School,
            "요양원" => Self::NursingHome,
            "위탁" => Self::Contract,
            "일반음식점" => Self::Restaurant,
            "기타" => Self::Etc,
            _ => Self::Other(value),
        }
    }
}

impl From<SiteType> for String {
    fn from(site_type: SiteType) -> Self {
        site_type.as_str().to_string()
    }
}

impl std::str::FromStr for SiteType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// Site entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub site_type: Option<SiteType>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,

    // -- Relations (populated by the tree endpoint) --
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Site>,
}

impl Site {
    pub fn tier(&self) -> Option<SiteTier> {
        self.site_type.as_ref().and_then(SiteType::tier)
    }

    pub fn type_label(&self) -> &str {
        site_type_display(self.site_type.as_ref())
    }
}

/// Create site payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteCreate {
    pub name: String,
    pub site_type: SiteType,
    pub code: Option<String>,
    pub parent_id: Option<i64>,
    pub is_active: Option<bool>,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

/// Update site payload
///
/// Nullable fields are `Option<Option<_>>`; `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_type: Option<SiteType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub code: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub contact_person: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub contact_phone: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub address: Option<Option<String>>,
}

/// Reparent payload (`PATCH /api/admin/sites/{id}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteReparent {
    pub parent_id: Option<i64>,
}
