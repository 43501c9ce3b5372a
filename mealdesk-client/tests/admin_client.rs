//! AdminClient against the mock backend served on a loopback socket

use axum::http::Method;
use mealdesk_client::{
    AdminApi, AdminClient, ClientConfig, ClientError, FileUpload, MappingQuery, NetworkHttpClient,
    PricingQuery, SearchQuery,
};
use mealdesk_mock::{MockBackend, MockData, SharedBackend};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    MealPlanType, MealPricingCreate, SiteType, SupplierMappingCreate, User, UserRole,
};

async fn serve(data: MockData) -> (AdminClient<NetworkHttpClient>, SharedBackend) {
    let backend = MockBackend::shared(data);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = mealdesk_mock::router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = ClientConfig::new(format!("http://{}", addr))
        .with_timeout(5)
        .build_admin_client()
        .unwrap();
    (client, backend)
}

fn many_users(count: i64) -> MockData {
    let mut data = MockData::default();
    data.users = (1..=count)
        .map(|id| User {
            id,
            username: format!("user{:02}", id),
            role: UserRole::Nutritionist,
            department: None,
            phone_number: None,
            managed_site: None,
            is_active: true,
            assigned_sites_count: 0,
        })
        .collect();
    data
}

#[tokio::test]
async fn test_user_list_reports_counts() {
    let (client, _) = serve(many_users(45)).await;

    let page = client.list_users(&SearchQuery::new(3, 20)).await.unwrap();
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_count, Some(45));
    assert_eq!(page.total_pages, Some(3));
    assert_eq!(page.pagination(3, 20).label(), "3 / 3");
}

#[tokio::test]
async fn test_search_is_encoded_and_filters() {
    let (client, backend) = serve(MockData::seeded()).await;

    let page = client
        .list_users(&SearchQuery::new(1, 20).with_search("영양"))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].username, "kim");

    let requests = backend.requests().await;
    assert_eq!(
        requests.last().map(String::as_str),
        Some("GET /api/admin/users?page=1&limit=20&search=%EC%98%81%EC%96%91")
    );
}

#[tokio::test]
async fn test_site_tree_is_nested() {
    let (client, _) = serve(MockData::seeded()).await;

    let roots = client.site_tree().await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].site_type, Some(SiteType::Head));
    assert_eq!(roots[0].children.len(), 2);
    assert_eq!(roots[0].children[0].children[0].name, "행복요양원");

    let flat = client.list_sites().await.unwrap();
    assert_eq!(flat.len(), 6);
    assert!(flat.iter().all(|s| s.children.is_empty()));
}

#[tokio::test]
async fn test_reparent_and_rejection() {
    let (client, backend) = serve(MockData::seeded()).await;

    // 한빛초등학교 moves from 서울사업장 to 부산사업장
    let moved = client.reparent_site(5, Some(3)).await.unwrap();
    assert_eq!(moved.parent_id, Some(3));

    // a customer site cannot sit under the head office
    let err = client.reparent_site(5, Some(1)).await.unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::InvalidSiteParent));

    backend
        .reject_next(Method::PATCH, "/api/admin/sites", "다른 관리자가 수정 중입니다")
        .await;
    let err = client.reparent_site(5, Some(2)).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected(ref m) if m == "다른 관리자가 수정 중입니다"));
}

#[tokio::test]
async fn test_duplicate_mapping_is_a_conflict() {
    let (client, _) = serve(MockData::seeded()).await;

    let err = client
        .create_mapping(&SupplierMappingCreate {
            supplier_id: 1,
            customer_id: 4,
            supplier_code: "FM-9".to_string(),
            delivery_code: None,
            is_active: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 409, .. }));
    assert_eq!(err.error_code(), Some(ErrorCode::MappingDuplicate));

    let created = client
        .create_mapping(&SupplierMappingCreate {
            supplier_id: 2,
            customer_id: 4,
            supplier_code: " CJ-77 ".to_string(),
            delivery_code: Some(String::new()),
            is_active: None,
        })
        .await
        .unwrap();
    assert_eq!(created.supplier_code, "CJ-77");
    assert_eq!(created.delivery_code, None);
    assert_eq!(created.supplier_name.as_deref(), Some("CJ프레시웨이"));

    let only_cj = client
        .list_mappings(&MappingQuery {
            page: 1,
            limit: 20,
            supplier_id: Some(2),
            ..MappingQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(only_cj.items.len(), 1);
    assert_eq!(only_cj.items[0].customer_name.as_deref(), Some("행복요양원"));
}

#[tokio::test]
async fn test_meal_pricing_create_and_filter() {
    let (client, _) = serve(MockData::seeded()).await;

    let created = client
        .create_meal_pricing(&MealPricingCreate {
            location_name: "부산도시락".to_string(),
            meal_plan_type: MealPlanType::Breakfast,
            meal_type: None,
            plan_name: "조식 A".to_string(),
            apply_date_start: None,
            apply_date_end: None,
            selling_price: Decimal::new(4000, 0),
            material_cost_guideline: Decimal::new(1000, 0),
            is_active: None,
        })
        .await
        .unwrap();
    assert_eq!(created.cost_ratio(), Some(Decimal::new(25, 0)));

    let rows = client
        .list_meal_pricing(&PricingQuery {
            location_name: Some("부산".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].plan_name, "조식 A");
}

#[tokio::test]
async fn test_ingredient_upload_summary() {
    let (client, _) = serve(MockData::seeded()).await;

    let sheet = "name,unit,price\n양파,kg,1200\n,kg,100\n".as_bytes().to_vec();
    let result = client
        .upload_ingredients(FileUpload::new("식자재.csv", sheet))
        .await
        .unwrap();
    assert_eq!(result.file_name, "식자재.csv");
    assert_eq!(result.total_rows, 2);
    assert_eq!(result.new_count, 1);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 3);

    let err = client
        .upload_ingredients(FileUpload::new("menu.pdf", b"%PDF".to_vec()))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::UnsupportedFileFormat));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (client, _) = serve(MockData::seeded()).await;

    client.logout().await.unwrap();
    let err = client.list_sites().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
    assert_eq!(err.error_code(), Some(ErrorCode::NotAuthenticated));
}
