//! Mock backend state

use axum::http::Method;
use rust_decimal::Decimal;
use shared::models::{
    MealPlanType, MealPricing, Site, SiteType, Supplier, SupplierMapping, User, UserRole,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type SharedBackend = Arc<MockBackend>;

/// Everything the mock backend stores
///
/// Sites are kept flat (`children` empty); the tree endpoint nests them on
/// the way out.
#[derive(Debug, Clone)]
pub struct MockData {
    pub users: Vec<User>,
    pub passwords: HashMap<i64, String>,
    pub sites: Vec<Site>,
    pub suppliers: Vec<Supplier>,
    pub mappings: Vec<SupplierMapping>,
    pub meal_pricing: Vec<MealPricing>,
    /// Ingredient names seen by earlier uploads
    pub ingredients: HashSet<String>,
    /// When false, list endpoints ignore `page`/`limit` and send no counts
    pub paginate: bool,
    /// Cleared by logout; admin endpoints then answer 401
    pub session_active: bool,
}

impl Default for MockData {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            passwords: HashMap::new(),
            sites: Vec::new(),
            suppliers: Vec::new(),
            mappings: Vec::new(),
            meal_pricing: Vec::new(),
            ingredients: HashSet::new(),
            paginate: true,
            session_active: true,
        }
    }
}

impl MockData {
    /// Small but complete data set: one head office, two branches, three
    /// customer sites, two suppliers, one mapping and two price plans.
    pub fn seeded() -> Self {
        let mut data = Self::default();

        data.users = vec![
            user(1, "admin", UserRole::Admin, Some("본사"), None),
            user(2, "kim", UserRole::Nutritionist, Some("영양팀"), Some("행복요양원")),
            user(3, "root", UserRole::SuperAdmin, None, None),
        ];
        for u in &data.users {
            data.passwords.insert(u.id, "changeme".to_string());
        }

        data.sites = vec![
            site(1, "본사", SiteType::Head, None),
            site(2, "서울사업장", SiteType::Detail, Some(1)),
            site(3, "부산사업장", SiteType::Detail, Some(1)),
            site(4, "행복요양원", SiteType::NursingHome, Some(2)),
            site(5, "한빛초등학교", SiteType::School, Some(2)),
            site(6, "부산도시락", SiteType::LunchBox, Some(3)),
        ];
        data.sites[0].code = Some("HQ".to_string());

        data.suppliers = vec![
            supplier(1, "푸드머스", Some("FM")),
            supplier(2, "CJ프레시웨이", Some("CJ")),
        ];

        data.mappings = vec![SupplierMapping {
            id: 1,
            supplier_id: 1,
            customer_id: 4,
            supplier_code: "FM-0042".to_string(),
            delivery_code: Some("D1".to_string()),
            is_active: true,
            created_at: Some("2024-03-01T09:00:00".to_string()),
            supplier_name: None,
            customer_name: None,
        }];

        data.meal_pricing = vec![
            pricing(1, "행복요양원", MealPlanType::Lunch, "기본 중식", 5000, 2250),
            pricing(2, "행복요양원", MealPlanType::Dinner, "기본 석식", 6000, 1800),
        ];

        data
    }

    pub fn site(&self, id: i64) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn supplier(&self, id: i64) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }
}

/// Next free id of a collection
pub(crate) fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

fn user(
    id: i64,
    username: &str,
    role: UserRole,
    department: Option<&str>,
    managed_site: Option<&str>,
) -> User {
    User {
        id,
        username: username.to_string(),
        role,
        department: department.map(str::to_string),
        phone_number: None,
        managed_site: managed_site.map(str::to_string),
        is_active: true,
        assigned_sites_count: u32::from(managed_site.is_some()),
    }
}

fn site(id: i64, name: &str, site_type: SiteType, parent_id: Option<i64>) -> Site {
    Site {
        id,
        name: name.to_string(),
        site_type: Some(site_type),
        code: None,
        parent_id,
        is_active: true,
        contact_person: None,
        contact_phone: None,
        address: None,
        children: Vec::new(),
    }
}

fn supplier(id: i64, name: &str, parent_code: Option<&str>) -> Supplier {
    Supplier {
        id,
        name: name.to_string(),
        parent_code: parent_code.map(str::to_string),
        business_number: None,
        representative: None,
        headquarters_address: None,
        headquarters_phone: None,
        email: None,
        is_active: true,
    }
}

fn pricing(
    id: i64,
    location: &str,
    plan: MealPlanType,
    plan_name: &str,
    selling: i64,
    cost: i64,
) -> MealPricing {
    MealPricing {
        id,
        location_name: location.to_string(),
        meal_plan_type: plan,
        meal_type: None,
        plan_name: plan_name.to_string(),
        apply_date_start: None,
        apply_date_end: None,
        selling_price: Decimal::new(selling, 0),
        material_cost_guideline: Decimal::new(cost, 0),
        is_active: true,
    }
}

#[derive(Debug, Clone)]
struct Fault {
    method: Method,
    path_prefix: String,
    message: String,
}

/// Mock backend shared by every handler
#[derive(Debug, Default)]
pub struct MockBackend {
    data: RwLock<MockData>,
    faults: Mutex<Vec<Fault>>,
    requests: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new(data: MockData) -> Self {
        Self {
            data: RwLock::new(data),
            faults: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// New backend behind an `Arc`, ready for [`crate::router`]
    pub fn shared(data: MockData) -> SharedBackend {
        Arc::new(Self::new(data))
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, MockData> {
        self.data.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, MockData> {
        self.data.write().await
    }

    /// Answer the next `method` request under `path_prefix` with
    /// `{"success": false, "message": message}` and status 200
    pub async fn reject_next(
        &self,
        method: Method,
        path_prefix: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.faults.lock().await.push(Fault {
            method,
            path_prefix: path_prefix.into(),
            message: message.into(),
        });
    }

    pub(crate) async fn take_fault(&self, method: &Method, path: &str) -> Option<String> {
        let mut faults = self.faults.lock().await;
        let index = faults
            .iter()
            .position(|f| &f.method == method && path.starts_with(&f.path_prefix))?;
        Some(faults.remove(index).message)
    }

    pub(crate) async fn record(&self, line: String) {
        self.requests.lock().await.push(line);
    }

    /// Every request seen so far, as `"METHOD /path?query"`
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    pub async fn clear_requests(&self) {
        self.requests.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(std::iter::empty()), 1);
        assert_eq!(next_id([3, 9, 4].into_iter()), 10);
    }

    #[test]
    fn test_seeded_hierarchy_is_consistent() {
        let data = MockData::seeded();
        for site in &data.sites {
            if let Some(parent_id) = site.parent_id {
                let parent = data.site(parent_id).unwrap();
                assert_eq!(site.tier().and_then(|t| t.parent()), parent.tier());
            }
        }
        assert_eq!(data.meal_pricing[0].cost_ratio(), Some(Decimal::new(45, 0)));
    }

    #[tokio::test]
    async fn test_fault_matches_once() {
        let backend = MockBackend::new(MockData::default());
        backend
            .reject_next(Method::PATCH, "/api/admin/sites", "nope")
            .await;
        assert!(backend.take_fault(&Method::GET, "/api/admin/sites").await.is_none());
        assert_eq!(
            backend
                .take_fault(&Method::PATCH, "/api/admin/sites/3")
                .await
                .as_deref(),
            Some("nope")
        );
        assert!(backend.take_fault(&Method::PATCH, "/api/admin/sites/3").await.is_none());
    }
}
