//! Meal pricing handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use shared::Envelope;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MealPricing, MealPricingCreate, MealPricingUpdate};

use super::{data, done, matches_any};
use crate::state::{SharedBackend, next_id};

#[derive(Debug, Default, Deserialize)]
pub struct PricingParams {
    pub location_name: Option<String>,
}

fn check_prices(selling_price: Decimal, material_cost: Decimal) -> AppResult<()> {
    if selling_price.is_sign_negative() || material_cost.is_sign_negative() {
        return Err(AppError::coded(
            ErrorCode::InvalidPrice,
            "Prices cannot be negative",
        ));
    }
    Ok(())
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            Err(AppError::validation("apply_date_end is before apply_date_start")
                .on_field("apply_date_end"))
        }
        _ => Ok(()),
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::required(field));
    }
    Ok(value.to_string())
}

/// GET /api/admin/meal-pricing
pub async fn list(
    State(backend): State<SharedBackend>,
    Query(params): Query<PricingParams>,
) -> AppResult<Json<Value>> {
    let store = backend.read().await;
    let needle = params
        .location_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let rows: Vec<&MealPricing> = store
        .meal_pricing
        .iter()
        .filter(|p| matches_any(needle.as_deref(), &[Some(p.location_name.as_str())]))
        .collect();
    data("meal_pricing", rows)
}

/// POST /api/admin/meal-pricing
pub async fn create(
    State(backend): State<SharedBackend>,
    Json(payload): Json<MealPricingCreate>,
) -> AppResult<Json<Value>> {
    let location_name = required(&payload.location_name, "location_name")?;
    let plan_name = required(&payload.plan_name, "plan_name")?;
    check_prices(payload.selling_price, payload.material_cost_guideline)?;
    check_dates(payload.apply_date_start, payload.apply_date_end)?;

    let mut store = backend.write().await;
    let pricing = MealPricing {
        id: next_id(store.meal_pricing.iter().map(|p| p.id)),
        location_name,
        meal_plan_type: payload.meal_plan_type,
        meal_type: payload.meal_type,
        plan_name,
        apply_date_start: payload.apply_date_start,
        apply_date_end: payload.apply_date_end,
        selling_price: payload.selling_price,
        material_cost_guideline: payload.material_cost_guideline,
        is_active: payload.is_active.unwrap_or(true),
    };
    store.meal_pricing.push(pricing.clone());

    tracing::info!(id = pricing.id, plan = %pricing.plan_name, "meal pricing created");
    data("pricing", pricing)
}

/// PUT /api/admin/meal-pricing/{id}
pub async fn update(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
    Json(payload): Json<MealPricingUpdate>,
) -> AppResult<Json<Value>> {
    let mut store = backend.write().await;
    let pricing = store
        .meal_pricing
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::missing(ErrorCode::PricingNotFound, id))?;

    let selling_price = payload.selling_price.unwrap_or(pricing.selling_price);
    let material_cost = payload
        .material_cost_guideline
        .unwrap_or(pricing.material_cost_guideline);
    check_prices(selling_price, material_cost)?;
    let start = payload.apply_date_start.unwrap_or(pricing.apply_date_start);
    let end = payload.apply_date_end.unwrap_or(pricing.apply_date_end);
    check_dates(start, end)?;
    let location_name = payload
        .location_name
        .map(|v| required(&v, "location_name"))
        .transpose()?;
    let plan_name = payload
        .plan_name
        .map(|v| required(&v, "plan_name"))
        .transpose()?;

    if let Some(location_name) = location_name {
        pricing.location_name = location_name;
    }
    if let Some(plan_name) = plan_name {
        pricing.plan_name = plan_name;
    }
    if let Some(meal_plan_type) = payload.meal_plan_type {
        pricing.meal_plan_type = meal_plan_type;
    }
    if let Some(meal_type) = payload.meal_type {
        pricing.meal_type = meal_type;
    }
    if let Some(is_active) = payload.is_active {
        pricing.is_active = is_active;
    }
    pricing.selling_price = selling_price;
    pricing.material_cost_guideline = material_cost;
    pricing.apply_date_start = start;
    pricing.apply_date_end = end;

    tracing::info!(id, "meal pricing updated");
    data("pricing", pricing.clone())
}

/// DELETE /api/admin/meal-pricing/{id}
pub async fn delete(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope>> {
    let mut store = backend.write().await;
    let before = store.meal_pricing.len();
    store.meal_pricing.retain(|p| p.id != id);
    if store.meal_pricing.len() == before {
        return Err(AppError::missing(ErrorCode::PricingNotFound, id));
    }
    tracing::info!(id, "meal pricing deleted");
    Ok(done("Meal pricing deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_and_date_checks() {
        assert!(check_prices(Decimal::new(5000, 0), Decimal::ZERO).is_ok());
        assert_eq!(
            check_prices(Decimal::new(-1, 0), Decimal::ZERO)
                .unwrap_err()
                .code,
            ErrorCode::InvalidPrice
        );
        let march = NaiveDate::from_ymd_opt(2024, 3, 1);
        let april = NaiveDate::from_ymd_opt(2024, 4, 1);
        assert!(check_dates(march, april).is_ok());
        assert!(check_dates(april, march).is_err());
        assert!(check_dates(None, march).is_ok());
    }

    #[tokio::test]
    async fn test_null_clears_and_absent_keeps() {
        use crate::state::{MockBackend, MockData};

        let backend = MockBackend::shared(MockData::seeded());
        let june = NaiveDate::from_ymd_opt(2024, 6, 30);
        {
            let mut store = backend.write().await;
            store.meal_pricing[0].apply_date_start = NaiveDate::from_ymd_opt(2024, 3, 1);
            store.meal_pricing[0].apply_date_end = june;
        }

        let payload: MealPricingUpdate =
            serde_json::from_str(r#"{"apply_date_start": null}"#).unwrap();
        update(State(backend.clone()), Path(1), Json(payload))
            .await
            .unwrap();

        let stored = backend.read().await.meal_pricing[0].clone();
        assert_eq!(stored.apply_date_start, None);
        assert_eq!(stored.apply_date_end, june);
    }
}
