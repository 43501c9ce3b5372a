//! Meal pricing endpoints

use serde::Deserialize;
use serde_json::Value;
use shared::Envelope;
use shared::models::{MealPricing, MealPricingCreate, MealPricingUpdate};

use super::open;
use crate::ClientResult;
use crate::http::HttpClient;
use crate::query::PricingQuery;

const BASE: &str = "/api/admin/meal-pricing";

#[derive(Deserialize)]
struct PricingListBody {
    meal_pricing: Vec<MealPricing>,
}

#[derive(Deserialize)]
struct PricingBody {
    pricing: MealPricing,
}

pub(super) async fn list<H: HttpClient>(
    http: &H,
    query: &PricingQuery,
) -> ClientResult<Vec<MealPricing>> {
    let value: Value = http.get(&query.to_query().to_path(BASE)).await?;
    open::<PricingListBody>(value).map(|b| b.meal_pricing)
}

pub(super) async fn create<H: HttpClient>(
    http: &H,
    data: &MealPricingCreate,
) -> ClientResult<MealPricing> {
    let value: Value = http.post(BASE, data).await?;
    open::<PricingBody>(value).map(|b| b.pricing)
}

pub(super) async fn update<H: HttpClient>(
    http: &H,
    id: i64,
    data: &MealPricingUpdate,
) -> ClientResult<MealPricing> {
    let value: Value = http.put(&format!("{}/{}", BASE, id), data).await?;
    open::<PricingBody>(value).map(|b| b.pricing)
}

pub(super) async fn delete<H: HttpClient>(http: &H, id: i64) -> ClientResult<()> {
    let value: Value = http.delete(&format!("{}/{}", BASE, id)).await?;
    open::<Envelope>(value).map(|_| ())
}
