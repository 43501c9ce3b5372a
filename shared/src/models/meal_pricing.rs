//! Meal Pricing Model

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Ratio (in percent) from which a cost ratio is flagged
pub const COST_RATIO_DANGER_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Meal slot of a pricing record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealPlanType {
    /// 조식
    Breakfast,
    /// 중식
    Lunch,
    /// 석식
    Dinner,
    /// 야식
    LateNight,
    Other(String),
}

impl MealPlanType {
    pub const ALL: [MealPlanType; 4] = [
        MealPlanType::Breakfast,
        MealPlanType::Lunch,
        MealPlanType::Dinner,
        MealPlanType::LateNight,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Breakfast => "조식",
            Self::Lunch => "중식",
            Self::Dinner => "석식",
            Self::LateNight => "야식",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for MealPlanType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "조식" => Self::Breakfast,
            "중식" => Self::Lunch,
            "석식" => Self::Dinner,
            "야식" => Self::LateNight,
            _ => Self::Other(value),
        }
    }
}

impl From<MealPlanType> for String {
    fn from(plan: MealPlanType) -> Self {
        plan.as_str().to_string()
    }
}

/// Classification of a cost ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostRatioLevel {
    /// Below the threshold (green)
    Good,
    /// At or above the threshold (red)
    Danger,
}

impl CostRatioLevel {
    pub fn classify(ratio: Decimal) -> Self {
        if ratio >= COST_RATIO_DANGER_THRESHOLD {
            Self::Danger
        } else {
            Self::Good
        }
    }
}

/// `material_cost / selling_price × 100`, `None` when the price is not positive
pub fn cost_ratio(selling_price: Decimal, material_cost: Decimal) -> Option<Decimal> {
    if selling_price <= Decimal::ZERO {
        return None;
    }
    Some(material_cost * Decimal::ONE_HUNDRED / selling_price)
}

/// Percentage with one decimal, e.g. `45.0%`
pub fn format_ratio(ratio: Decimal) -> String {
    let rounded = ratio.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}

/// Meal pricing entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPricing {
    pub id: i64,
    pub location_name: String,
    pub meal_plan_type: MealPlanType,
    #[serde(default)]
    pub meal_type: Option<String>,
    pub plan_name: String,
    #[serde(default)]
    pub apply_date_start: Option<NaiveDate>,
    #[serde(default)]
    pub apply_date_end: Option<NaiveDate>,
    pub selling_price: Decimal,
    pub material_cost_guideline: Decimal,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

impl MealPricing {
    /// Derived on every render, never persisted
    pub fn cost_ratio(&self) -> Option<Decimal> {
        cost_ratio(self.selling_price, self.material_cost_guideline)
    }
}

/// Create meal pricing payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPricingCreate {
    pub location_name: String,
    pub meal_plan_type: MealPlanType,
    pub meal_type: Option<String>,
    pub plan_name: String,
    pub apply_date_start: Option<NaiveDate>,
    pub apply_date_end: Option<NaiveDate>,
    pub selling_price: Decimal,
    pub material_cost_guideline: Decimal,
    pub is_active: Option<bool>,
}

/// Update meal pricing payload
///
/// Nullable fields are `Option<Option<_>>`; `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPricingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan_type: Option<MealPlanType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub meal_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub apply_date_start: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub apply_date_end: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_cost_guideline: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_ratio_danger() {
        let ratio = cost_ratio(Decimal::from(10000), Decimal::from(4500)).unwrap();
        assert_eq!(format_ratio(ratio), "45.0%");
        assert_eq!(CostRatioLevel::classify(ratio), CostRatioLevel::Danger);
    }

    #[test]
    fn test_cost_ratio_good() {
        let ratio = cost_ratio(Decimal::from(10000), Decimal::from(3000)).unwrap();
        assert_eq!(format_ratio(ratio), "30.0%");
        assert_eq!(CostRatioLevel::classify(ratio), CostRatioLevel::Good);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(
            CostRatioLevel::classify(Decimal::from(40)),
            CostRatioLevel::Danger
        );
        assert_eq!(
            CostRatioLevel::classify(Decimal::new(399, 1)),
            CostRatioLevel::Good
        );
    }

    #[test]
    fn test_ratio_undefined_without_price() {
        assert!(cost_ratio(Decimal::ZERO, Decimal::from(3000)).is_none());
    }

    #[test]
    fn test_ratio_rounding() {
        let ratio = cost_ratio(Decimal::from(3000), Decimal::from(1000)).unwrap();
        assert_eq!(format_ratio(ratio), "33.3%");
    }

    #[test]
    fn test_parse_pricing_row() {
        let row: MealPricing = serde_json::from_str(
            r#"{"id": 5, "location_name": "본관", "meal_plan_type": "중식",
                "plan_name": "기본", "apply_date_start": "2024-03-01",
                "selling_price": 5500, "material_cost_guideline": 2200.5}"#,
        )
        .unwrap();
        assert_eq!(row.meal_plan_type, MealPlanType::Lunch);
        assert_eq!(row.selling_price, Decimal::from(5500));
        assert_eq!(row.material_cost_guideline, Decimal::new(22005, 1));
        assert_eq!(
            row.apply_date_start,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert!(row.is_active);
    }

    #[test]
    fn test_update_sends_null_to_clear_dates() {
        let update = MealPricingUpdate {
            apply_date_start: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json["apply_date_start"].is_null());
        assert!(json.get("apply_date_end").is_none());

        let parsed: MealPricingUpdate =
            serde_json::from_str(r#"{"apply_date_end": "2024-12-31", "meal_type": null}"#)
                .unwrap();
        assert_eq!(parsed.apply_date_end, Some(NaiveDate::from_ymd_opt(2024, 12, 31)));
        assert_eq!(parsed.meal_type, Some(None));
        assert_eq!(parsed.apply_date_start, None);
    }
}
