//! Page flows of the console against the in-process mock backend

use axum::http::Method;
use mealdesk_client::{AdminClient, OneshotHttpClient};
use mealdesk_console::pages::{MappingForm, PricingField};
use mealdesk_console::site_tree::Toggle;
use mealdesk_console::view::{Badge, Cell, Tone};
use mealdesk_console::{Console, Page};
use mealdesk_mock::{MockBackend, MockData, SharedBackend};
use chrono::NaiveDate;
use shared::models::{User, UserRole};
use std::io::Write;
use std::sync::Arc;

fn console(data: MockData) -> (Console, SharedBackend) {
    let backend = MockBackend::shared(data);
    let http = OneshotHttpClient::new(mealdesk_mock::router(backend.clone()));
    let console = Console::new(Arc::new(AdminClient::new(http)), 20);
    (console, backend)
}

fn many_users(count: i64, paginate: bool) -> MockData {
    let mut data = MockData {
        paginate,
        ..MockData::default()
    };
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
async fn test_site_tree_renders_head_with_two_branches() {
    let (mut console, _) = console(MockData::seeded());
    assert_eq!(console.show_page("sites").await.unwrap(), Page::Sites);

    let view = console.sites.view();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "본사");
    assert_eq!(view[0].toggle, Toggle::Expanded);
    let branches: Vec<&str> = view[0].children.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(branches, vec!["서울사업장", "부산사업장"]);

    let stats = console.sites.stats();
    assert_eq!((stats.total, stats.head, stats.detail, stats.customer), (6, 1, 2, 3));
}

#[tokio::test]
async fn test_drag_customer_to_other_branch() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("sites").await.unwrap();

    console.sites.drag_start(4).unwrap();
    assert!(console.sites.drag_over(3));
    assert!(console.sites.drop().await.unwrap());

    assert_eq!(console.sites.tree.find(4).unwrap().parent_id, Some(3));
    assert_eq!(backend.read().await.site(4).unwrap().parent_id, Some(3));
    assert!(
        backend
            .requests()
            .await
            .contains(&"PATCH /api/admin/sites/4".to_string())
    );
}

#[tokio::test]
async fn test_invalid_drop_sends_nothing() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("sites").await.unwrap();
    backend.clear_requests().await;

    console.sites.drag_start(2).unwrap();
    assert!(!console.sites.drag_over(4));
    assert!(!console.sites.drop().await.unwrap());

    assert!(console.sites.move_site(2, 5).await.is_err());
    assert!(backend.requests().await.is_empty());
}

#[tokio::test]
async fn test_failed_move_keeps_tree_and_retries() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("sites").await.unwrap();
    backend
        .reject_next(Method::PATCH, "/api/admin/sites", "잠시 후 다시 시도하세요")
        .await;

    assert!(console.sites.move_site(4, 3).await.is_err());
    assert_eq!(console.sites.tree.find(4).unwrap().parent_id, Some(2));
    assert!(console.sites.pending_move.is_some());
    assert_eq!(
        console.sites.notice.as_ref().unwrap().message,
        "잠시 후 다시 시도하세요"
    );

    console.sites.retry_move().await.unwrap();
    assert!(console.sites.pending_move.is_none());
    assert_eq!(console.sites.tree.find(4).unwrap().parent_id, Some(3));
}

#[tokio::test]
async fn test_users_paginate_45_by_20() {
    for paginate in [true, false] {
        let (mut console, _) = console(many_users(45, paginate));
        console.show_page("users").await.unwrap();
        assert_eq!(console.users.listing.pagination.total_pages, 3);
        assert_eq!(console.users.listing.rows.len(), 20);

        console.users.go_to(3).await.unwrap();
        assert_eq!(console.users.listing.rows.len(), 5);
        assert_eq!(console.users.listing.rows[0].username, "user41");
        assert_eq!(console.users.table().pagination.unwrap().label(), "3 / 3");
    }
}

#[tokio::test]
async fn test_empty_supplier_code_sends_no_request() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("mappings").await.unwrap();
    backend.clear_requests().await;

    *console.mappings.new_form() = MappingForm {
        supplier_id: Some(2),
        customer_id: Some(5),
        supplier_code: String::new(),
        ..MappingForm::default()
    };
    assert!(console.mappings.save().await.is_err());
    assert!(backend.requests().await.is_empty());
    assert!(console.mappings.notice.as_ref().unwrap().is_error());
}

#[tokio::test]
async fn test_mapping_create_and_duplicate() {
    let (mut console, _) = console(MockData::seeded());
    console.show_page("mappings").await.unwrap();

    *console.mappings.new_form() = MappingForm {
        supplier_id: Some(2),
        customer_id: Some(5),
        supplier_code: "CJ-7".to_string(),
        ..MappingForm::default()
    };
    console.mappings.save().await.unwrap();
    assert_eq!(console.mappings.listing.rows.len(), 2);
    let row = &console.mappings.table().rows[1];
    assert_eq!(row.cells[1], Cell::text("CJ프레시웨이"));
    assert_eq!(row.cells[2], Cell::text("한빛초등학교"));

    *console.mappings.new_form() = MappingForm {
        supplier_id: Some(1),
        customer_id: Some(4),
        supplier_code: "FM-9".to_string(),
        ..MappingForm::default()
    };
    assert!(console.mappings.save().await.is_err());
    assert!(console.mappings.form.is_some());
    assert_eq!(console.mappings.listing.rows.len(), 2);
}

#[tokio::test]
async fn test_pricing_ratio_and_inline_edit() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("meal-pricing").await.unwrap();

    let table = console.meal_pricing.table();
    assert_eq!(
        table.rows[0].cells[5],
        Cell::Badge(Badge::new("45.0%", Tone::Danger))
    );
    assert_eq!(
        table.rows[1].cells[5],
        Cell::Badge(Badge::new("30.0%", Tone::Good))
    );

    console
        .meal_pricing
        .begin_edit(0, PricingField::SellingPrice)
        .unwrap();
    console.meal_pricing.input("7,500원");
    console.meal_pricing.commit_edit().await.unwrap();

    assert!(
        backend
            .requests()
            .await
            .contains(&"PUT /api/admin/meal-pricing/1".to_string())
    );
    assert_eq!(
        console.meal_pricing.table().rows[0].cells[5],
        Cell::Badge(Badge::new("30.0%", Tone::Good))
    );
}

#[tokio::test]
async fn test_pricing_draft_created_when_complete() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("meal-pricing").await.unwrap();

    let row = console.meal_pricing.add_draft();
    console
        .meal_pricing
        .begin_edit(row, PricingField::SellingPrice)
        .unwrap();
    console.meal_pricing.input("4000");
    assert!(console.meal_pricing.commit_edit().await.is_err());
    assert_eq!(backend.read().await.meal_pricing.len(), 2);

    console.meal_pricing.rows[row].location_name = "한빛초등학교".to_string();
    console
        .meal_pricing
        .begin_edit(row, PricingField::PlanName)
        .unwrap();
    console.meal_pricing.input("급식");
    console.meal_pricing.commit_edit().await.unwrap();

    let stored = backend.read().await.meal_pricing.clone();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[2].plan_name, "급식");
    assert!(console.meal_pricing.rows.iter().all(|r| !r.is_draft()));
}

#[tokio::test]
async fn test_refused_draft_is_created_on_retry() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("meal-pricing").await.unwrap();

    let row = console.meal_pricing.add_draft();
    console.meal_pricing.rows[row].location_name = "한빛초등학교".to_string();
    console
        .meal_pricing
        .begin_edit(row, PricingField::PlanName)
        .unwrap();
    console.meal_pricing.input("급식");
    backend
        .reject_next(Method::POST, "/api/admin/meal-pricing", "잠시 후 다시 시도하세요")
        .await;
    assert!(console.meal_pricing.commit_edit().await.is_err());
    assert_eq!(backend.read().await.meal_pricing.len(), 2);
    assert!(console.meal_pricing.rows[row].is_draft());

    console.meal_pricing.retry_edit().await.unwrap();

    let stored = backend.read().await.meal_pricing.clone();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[2].plan_name, "급식");
    assert!(console.meal_pricing.failed_edit.is_none());
    assert!(console.meal_pricing.rows.iter().all(|r| !r.is_draft()));
}

#[tokio::test]
async fn test_retry_after_delete_saves_the_refused_record() {
    let mut data = MockData::seeded();
    let mut special = data.meal_pricing[1].clone();
    special.id = 3;
    special.plan_name = "특식".to_string();
    data.meal_pricing.push(special);
    let (mut console, backend) = console(data);
    console.show_page("meal-pricing").await.unwrap();

    console
        .meal_pricing
        .begin_edit(1, PricingField::PlanName)
        .unwrap();
    console.meal_pricing.input("바뀐이름");
    backend
        .reject_next(Method::PUT, "/api/admin/meal-pricing/2", "잠시 후 다시 시도하세요")
        .await;
    assert!(console.meal_pricing.commit_edit().await.is_err());

    console.meal_pricing.delete(0).await.unwrap();
    assert_eq!(console.meal_pricing.rows[1].id(), Some(3));
    console.meal_pricing.retry_edit().await.unwrap();

    let stored = backend.read().await.meal_pricing.clone();
    let names: Vec<(i64, &str)> = stored.iter().map(|p| (p.id, p.plan_name.as_str())).collect();
    assert_eq!(names, vec![(2, "바뀐이름"), (3, "특식")]);
    assert!(
        !backend
            .requests()
            .await
            .contains(&"PUT /api/admin/meal-pricing/3".to_string())
    );
}

#[tokio::test]
async fn test_deleted_record_has_nothing_to_retry() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("meal-pricing").await.unwrap();

    console
        .meal_pricing
        .begin_edit(1, PricingField::PlanName)
        .unwrap();
    console.meal_pricing.input("바뀐이름");
    backend
        .reject_next(Method::PUT, "/api/admin/meal-pricing/2", "잠시 후 다시 시도하세요")
        .await;
    assert!(console.meal_pricing.commit_edit().await.is_err());
    console.meal_pricing.delete(1).await.unwrap();

    assert!(console.meal_pricing.retry_edit().await.is_err());
    assert_eq!(backend.read().await.meal_pricing.len(), 1);
}

#[tokio::test]
async fn test_blank_date_clears_stored_date() {
    let mut data = MockData::seeded();
    data.meal_pricing[0].apply_date_start = NaiveDate::from_ymd_opt(2026, 3, 1);
    data.meal_pricing[0].apply_date_end = NaiveDate::from_ymd_opt(2026, 12, 31);
    let (mut console, backend) = console(data);
    console.show_page("meal-pricing").await.unwrap();

    console
        .meal_pricing
        .begin_edit(0, PricingField::ApplyDateStart)
        .unwrap();
    console.meal_pricing.input("");
    console.meal_pricing.commit_edit().await.unwrap();

    let stored = backend.read().await.meal_pricing[0].clone();
    assert_eq!(stored.apply_date_start, None);
    assert_eq!(stored.apply_date_end, NaiveDate::from_ymd_opt(2026, 12, 31));
}

#[tokio::test]
async fn test_blank_department_clears_stored_value() {
    let (mut console, backend) = console(MockData::seeded());
    console.show_page("users").await.unwrap();

    let mut form = console.users.edit(1).unwrap().clone();
    form.department = String::new();
    console.users.submit_form(form).await.unwrap();

    let stored = backend.read().await.users[0].clone();
    assert_eq!(stored.username, "admin");
    assert_eq!(stored.department, None);
}

#[tokio::test]
async fn test_ingredient_upload_reports_row_errors() {
    let (mut console, _) = console(MockData::seeded());
    console.show_page("ingredients").await.unwrap();

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "name,unit,price\n양파,kg,1200\n당근,kg,abc").unwrap();

    let result = console.ingredients.upload(file.path()).await.unwrap();
    assert_eq!(result.total_rows, 2);
    assert_eq!(result.new_count, 1);
    assert_eq!(result.errors[0].row, 3);
    assert_eq!(result.errors[0].column.as_deref(), Some("C"));
    assert!(console.notice().unwrap().is_error());
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (mut console, _) = console(MockData::seeded());
    console.show_page("users").await.unwrap();
    console.logout().await.unwrap();

    let err = console.show_page("suppliers").await.unwrap_err();
    assert!(!err.is_local());
    assert_eq!(console.shell().active(), Some(Page::Suppliers));
    assert!(console.notice().unwrap().is_error());
}
