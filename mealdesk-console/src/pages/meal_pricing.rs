//! 식단가 관리
//!
//! Spreadsheet-like table with one inline editing cell at a time. Rows not
//! yet saved are [`RecordState::Draft`] and are POSTed once complete; saved
//! rows are PUT one field at a time. A refused save is kept as a
//! [`PendingEdit`] addressed by record, so it survives reloads and deletes.

use chrono::NaiveDate;
use mealdesk_client::{AdminApi, PricingQuery};
use rust_decimal::Decimal;
use shared::models::{
    CostRatioLevel, MealPlanType, MealPricing, MealPricingCreate, MealPricingUpdate, cost_ratio,
    format_ratio,
};
use std::str::FromStr;
use std::sync::Arc;

use super::{non_blank, report};
use crate::error::{ConsoleError, ConsoleResult};
use crate::notice::Notice;
use crate::view::{Badge, Cell, LoadState, Row, Table, Tone};

/// Whether a row exists on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Local only; `key` is unique among the drafts of one page
    Draft { key: u32 },
    Persisted { id: i64 },
}

/// One line of the pricing table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRow {
    pub state: RecordState,
    pub location_name: String,
    pub meal_plan_type: MealPlanType,
    pub meal_type: Option<String>,
    pub plan_name: String,
    pub apply_date_start: Option<NaiveDate>,
    pub apply_date_end: Option<NaiveDate>,
    pub selling_price: Decimal,
    pub material_cost_guideline: Decimal,
    pub is_active: bool,
}

impl From<&MealPricing> for PricingRow {
    fn from(p: &MealPricing) -> Self {
        Self {
            state: RecordState::Persisted { id: p.id },
            location_name: p.location_name.clone(),
            meal_plan_type: p.meal_plan_type.clone(),
            meal_type: p.meal_type.clone(),
            plan_name: p.plan_name.clone(),
            apply_date_start: p.apply_date_start,
            apply_date_end: p.apply_date_end,
            selling_price: p.selling_price,
            material_cost_guideline: p.material_cost_guideline,
            is_active: p.is_active,
        }
    }
}

impl PricingRow {
    /// Empty unsaved row for `location_name`
    pub fn draft(key: u32, location_name: impl Into<String>) -> Self {
        Self {
            state: RecordState::Draft { key },
            location_name: location_name.into(),
            meal_plan_type: MealPlanType::Lunch,
            meal_type: None,
            plan_name: String::new(),
            apply_date_start: None,
            apply_date_end: None,
            selling_price: Decimal::ZERO,
            material_cost_guideline: Decimal::ZERO,
            is_active: true,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self.state, RecordState::Draft { .. })
    }

    pub fn id(&self) -> Option<i64> {
        match self.state {
            RecordState::Persisted { id } => Some(id),
            RecordState::Draft { .. } => None,
        }
    }

    pub fn cost_ratio(&self) -> Option<Decimal> {
        cost_ratio(self.selling_price, self.material_cost_guideline)
    }

    /// `45.0%` in red from 40%, green below, `-` without a selling price
    pub fn ratio_badge(&self) -> Badge {
        match self.cost_ratio() {
            Some(ratio) => {
                let tone = match CostRatioLevel::classify(ratio) {
                    CostRatioLevel::Danger => Tone::Danger,
                    CostRatioLevel::Good => Tone::Good,
                };
                Badge::new(format_ratio(ratio), tone)
            }
            None => Badge::new("-", Tone::Muted),
        }
    }

    /// Text shown in the editor for `field`
    pub fn value(&self, field: PricingField) -> String {
        match field {
            PricingField::PlanName => self.plan_name.clone(),
            PricingField::MealPlanType => self.meal_plan_type.as_str().to_string(),
            PricingField::SellingPrice => self.selling_price.normalize().to_string(),
            PricingField::MaterialCost => self.material_cost_guideline.normalize().to_string(),
            PricingField::ApplyDateStart => date_text(self.apply_date_start),
            PricingField::ApplyDateEnd => date_text(self.apply_date_end),
            PricingField::IsActive => self.is_active.to_string(),
        }
    }

    /// Parse `input` into `field`
    pub fn set(&mut self, field: PricingField, input: &str) -> ConsoleResult<()> {
        let input = input.trim();
        match field {
            PricingField::PlanName => self.plan_name = input.to_string(),
            PricingField::MealPlanType => {
                if input.is_empty() {
                    return Err(ConsoleError::validation("식단 구분을 입력하세요"));
                }
                self.meal_plan_type = MealPlanType::from(input.to_string());
            }
            PricingField::SellingPrice => self.selling_price = parse_money(input)?,
            PricingField::MaterialCost => self.material_cost_guideline = parse_money(input)?,
            PricingField::ApplyDateStart => self.apply_date_start = parse_date(input)?,
            PricingField::ApplyDateEnd => self.apply_date_end = parse_date(input)?,
            PricingField::IsActive => self.is_active = parse_flag(input)?,
        }
        check_period(self.apply_date_start, self.apply_date_end)
    }

    /// Payload for a draft, `None` fields refused
    pub fn to_create(&self) -> ConsoleResult<MealPricingCreate> {
        let location_name = non_blank(&self.location_name)
            .ok_or_else(|| ConsoleError::validation("사업장을 입력하세요"))?;
        let plan_name = non_blank(&self.plan_name)
            .ok_or_else(|| ConsoleError::validation("식단명을 입력하세요"))?;
        Ok(MealPricingCreate {
            location_name,
            meal_plan_type: self.meal_plan_type.clone(),
            meal_type: self.meal_type.clone(),
            plan_name,
            apply_date_start: self.apply_date_start,
            apply_date_end: self.apply_date_end,
            selling_price: self.selling_price,
            material_cost_guideline: self.material_cost_guideline,
            is_active: Some(self.is_active),
        })
    }

    /// Update carrying only `field`
    pub fn field_update(&self, field: PricingField) -> MealPricingUpdate {
        let mut update = MealPricingUpdate::default();
        match field {
            PricingField::PlanName => update.plan_name = Some(self.plan_name.clone()),
            PricingField::MealPlanType => {
                update.meal_plan_type = Some(self.meal_plan_type.clone())
            }
            PricingField::SellingPrice => update.selling_price = Some(self.selling_price),
            PricingField::MaterialCost => {
                update.material_cost_guideline = Some(self.material_cost_guideline)
            }
            PricingField::ApplyDateStart => update.apply_date_start = Some(self.apply_date_start),
            PricingField::ApplyDateEnd => update.apply_date_end = Some(self.apply_date_end),
            PricingField::IsActive => update.is_active = Some(self.is_active),
        }
        update
    }
}

/// Editable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricingField {
    PlanName,
    MealPlanType,
    SellingPrice,
    MaterialCost,
    ApplyDateStart,
    ApplyDateEnd,
    IsActive,
}

impl PricingField {
    pub const ALL: [PricingField; 7] = [
        PricingField::PlanName,
        PricingField::MealPlanType,
        PricingField::SellingPrice,
        PricingField::MaterialCost,
        PricingField::ApplyDateStart,
        PricingField::ApplyDateEnd,
        PricingField::IsActive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PlanName => "plan_name",
            Self::MealPlanType => "meal_plan_type",
            Self::SellingPrice => "selling_price",
            Self::MaterialCost => "material_cost_guideline",
            Self::ApplyDateStart => "apply_date_start",
            Self::ApplyDateEnd => "apply_date_end",
            Self::IsActive => "is_active",
        }
    }

    /// Table column showing this field
    fn column(&self) -> usize {
        match self {
            Self::MealPlanType => 1,
            Self::PlanName => 2,
            Self::SellingPrice => 3,
            Self::MaterialCost => 4,
            Self::ApplyDateStart | Self::ApplyDateEnd => 6,
            Self::IsActive => 7,
        }
    }
}

impl FromStr for PricingField {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s.trim())
            .ok_or_else(|| ConsoleError::validation(format!("알 수 없는 항목: {}", s)))
    }
}

/// The cell being edited and the text typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingCell {
    /// Index into the page rows, valid until the next reload
    pub row: usize,
    pub field: PricingField,
    pub value: String,
    pub original: String,
}

/// A save the server refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingEdit {
    /// One field of a saved record
    Update {
        id: i64,
        field: PricingField,
        update: MealPricingUpdate,
    },
    /// A completed draft
    Create { key: u32, create: MealPricingCreate },
}

impl PendingEdit {
    fn targets(&self, state: RecordState) -> bool {
        match (self, state) {
            (Self::Update { id, .. }, RecordState::Persisted { id: other }) => *id == other,
            (Self::Create { key, .. }, RecordState::Draft { key: other }) => *key == other,
            _ => false,
        }
    }
}

/// Modal form for a whole record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingForm {
    pub id: Option<i64>,
    pub location_name: String,
    pub meal_plan_type: MealPlanType,
    pub meal_type: String,
    pub plan_name: String,
    pub apply_date_start: String,
    pub apply_date_end: String,
    pub selling_price: String,
    pub material_cost_guideline: String,
    pub is_active: bool,
}

impl Default for PricingForm {
    fn default() -> Self {
        Self {
            id: None,
            location_name: String::new(),
            meal_plan_type: MealPlanType::Lunch,
            meal_type: String::new(),
            plan_name: String::new(),
            apply_date_start: String::new(),
            apply_date_end: String::new(),
            selling_price: String::new(),
            material_cost_guideline: String::new(),
            is_active: true,
        }
    }
}

impl From<&PricingRow> for PricingForm {
    fn from(row: &PricingRow) -> Self {
        Self {
            id: row.id(),
            location_name: row.location_name.clone(),
            meal_plan_type: row.meal_plan_type.clone(),
            meal_type: row.meal_type.clone().unwrap_or_default(),
            plan_name: row.plan_name.clone(),
            apply_date_start: date_text(row.apply_date_start),
            apply_date_end: date_text(row.apply_date_end),
            selling_price: row.selling_price.normalize().to_string(),
            material_cost_guideline: row.material_cost_guideline.normalize().to_string(),
            is_active: row.is_active,
        }
    }
}

impl PricingForm {
    pub fn validate(&self) -> ConsoleResult<MealPricingCreate> {
        let location_name = non_blank(&self.location_name)
            .ok_or_else(|| ConsoleError::validation("사업장을 입력하세요"))?;
        let plan_name = non_blank(&self.plan_name)
            .ok_or_else(|| ConsoleError::validation("식단명을 입력하세요"))?;
        let apply_date_start = parse_date(&self.apply_date_start)?;
        let apply_date_end = parse_date(&self.apply_date_end)?;
        check_period(apply_date_start, apply_date_end)?;
        Ok(MealPricingCreate {
            location_name,
            meal_plan_type: self.meal_plan_type.clone(),
            meal_type: non_blank(&self.meal_type),
            plan_name,
            apply_date_start,
            apply_date_end,
            selling_price: parse_money(&self.selling_price)?,
            material_cost_guideline: parse_money(&self.material_cost_guideline)?,
            is_active: Some(self.is_active),
        })
    }
}

/// Full update carrying every form field
fn full_update(c: MealPricingCreate) -> MealPricingUpdate {
    MealPricingUpdate {
        location_name: Some(c.location_name),
        meal_plan_type: Some(c.meal_plan_type),
        meal_type: Some(c.meal_type),
        plan_name: Some(c.plan_name),
        apply_date_start: Some(c.apply_date_start),
        apply_date_end: Some(c.apply_date_end),
        selling_price: Some(c.selling_price),
        material_cost_guideline: Some(c.material_cost_guideline),
        is_active: c.is_active,
    }
}

pub struct MealPricingPage {
    api: Arc<dyn AdminApi>,
    pub rows: Vec<PricingRow>,
    pub filter: PricingQuery,
    pub editing: Option<EditingCell>,
    /// Last save the server refused, kept for [`Self::retry_edit`]
    pub failed_edit: Option<PendingEdit>,
    pub form: Option<PricingForm>,
    pub notice: Option<Notice>,
    pub state: LoadState,
    next_draft_key: u32,
}

impl MealPricingPage {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            rows: Vec::new(),
            filter: PricingQuery::default(),
            editing: None,
            failed_edit: None,
            form: None,
            notice: None,
            state: LoadState::NotLoaded,
            next_draft_key: 0,
        }
    }

    /// Reload saved rows; drafts stay at the end of the table
    pub async fn load(&mut self) -> ConsoleResult<()> {
        match self.api.list_meal_pricing(&self.filter).await {
            Ok(list) => {
                let drafts = self.rows.drain(..).filter(PricingRow::is_draft);
                let mut rows: Vec<PricingRow> = list.iter().map(PricingRow::from).collect();
                rows.extend(drafts);
                self.rows = rows;
                self.editing = None;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                let err = ConsoleError::from(err);
                self.state = LoadState::Failed(err.user_message());
                Err(report(&mut self.notice, err))
            }
        }
    }

    pub async fn set_location_filter(&mut self, location: Option<String>) -> ConsoleResult<()> {
        self.filter.location_name = location.as_deref().and_then(non_blank);
        self.load().await
    }

    /// Append an unsaved row for the filtered location; returns its index
    pub fn add_draft(&mut self) -> usize {
        let location = self.filter.location_name.clone().unwrap_or_default();
        let key = self.next_draft_key;
        self.next_draft_key += 1;
        self.rows.push(PricingRow::draft(key, location));
        self.rows.len() - 1
    }

    pub fn discard_draft(&mut self, row: usize) -> ConsoleResult<()> {
        match self.rows.get(row) {
            Some(r) if r.is_draft() => {
                let removed = self.rows.remove(row);
                self.forget_pending(removed.state);
                self.editing = None;
                Ok(())
            }
            Some(_) => Err(ConsoleError::validation("저장된 행은 삭제로 지워야 합니다")),
            None => Err(ConsoleError::NotFound(format!("Row {}", row))),
        }
    }

    /// Put a cell into edit mode, dropping any other edit in progress
    pub fn begin_edit(&mut self, row: usize, field: PricingField) -> ConsoleResult<()> {
        let Some(current) = self.rows.get(row) else {
            return Err(ConsoleError::NotFound(format!("Row {}", row)));
        };
        if let Some(previous) = self.editing.take() {
            tracing::debug!(row = previous.row, field = previous.field.name(), "edit aborted");
        }
        let original = current.value(field);
        self.editing = Some(EditingCell {
            row,
            field,
            value: original.clone(),
            original,
        });
        Ok(())
    }

    pub fn input(&mut self, value: impl Into<String>) {
        if let Some(cell) = self.editing.as_mut() {
            cell.value = value.into();
        }
    }

    /// Revert the editing cell without a request
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the editing cell
    ///
    /// Persisted rows send only the edited field. A draft is kept locally
    /// until plan name and location are filled in, then created.
    pub async fn commit_edit(&mut self) -> ConsoleResult<()> {
        let Some(cell) = self.editing.take() else {
            return Ok(());
        };
        let Some(current) = self.rows.get(cell.row) else {
            return Err(ConsoleError::NotFound(format!("Row {}", cell.row)));
        };

        let mut updated = current.clone();
        if let Err(err) = updated.set(cell.field, &cell.value) {
            self.editing = Some(cell);
            return Err(report(&mut self.notice, err));
        }
        if updated.value(cell.field) == current.value(cell.field) {
            return Ok(());
        }

        let pending = match updated.state {
            RecordState::Persisted { id } => PendingEdit::Update {
                id,
                field: cell.field,
                update: updated.field_update(cell.field),
            },
            RecordState::Draft { key } => {
                let create = updated.to_create();
                self.rows[cell.row] = updated;
                match create {
                    Ok(create) => PendingEdit::Create { key, create },
                    Err(err) => return Err(report(&mut self.notice, err)),
                }
            }
        };
        self.send(pending).await
    }

    /// Send the last refused save again
    ///
    /// A refused draft is re-created from its current contents.
    pub async fn retry_edit(&mut self) -> ConsoleResult<()> {
        let pending = self.failed_edit.take().ok_or(ConsoleError::NothingToRetry)?;
        let pending = match pending {
            PendingEdit::Create { key, create } => {
                let draft = self
                    .rows
                    .iter()
                    .find(|r| r.state == RecordState::Draft { key });
                match draft.map(PricingRow::to_create) {
                    Some(Ok(create)) => PendingEdit::Create { key, create },
                    Some(Err(err)) => {
                        self.failed_edit = Some(PendingEdit::Create { key, create });
                        return Err(report(&mut self.notice, err));
                    }
                    None => PendingEdit::Create { key, create },
                }
            }
            update => update,
        };
        self.send(pending).await
    }

    async fn send(&mut self, pending: PendingEdit) -> ConsoleResult<()> {
        let result = match &pending {
            PendingEdit::Update { id, update, .. } => self
                .api
                .update_meal_pricing(*id, update)
                .await
                .map(|saved| saved.id),
            PendingEdit::Create { create, .. } => self
                .api
                .create_meal_pricing(create)
                .await
                .map(|saved| saved.id),
        };
        match result {
            Ok(id) => {
                if let PendingEdit::Create { key, .. } = pending {
                    self.rows.retain(|r| r.state != RecordState::Draft { key });
                }
                tracing::info!(id, "meal pricing saved");
                self.failed_edit = None;
                self.notice = Some(Notice::success("저장되었습니다"));
                self.load().await
            }
            Err(err) => {
                self.failed_edit = Some(pending);
                Err(report(&mut self.notice, err.into()))
            }
        }
    }

    fn forget_pending(&mut self, state: RecordState) {
        if self.failed_edit.as_ref().is_some_and(|p| p.targets(state)) {
            self.failed_edit = None;
        }
    }

    pub fn new_form(&mut self) -> &mut PricingForm {
        let form = PricingForm {
            location_name: self.filter.location_name.clone().unwrap_or_default(),
            ..PricingForm::default()
        };
        self.form.insert(form)
    }

    pub fn edit(&mut self, row: usize) -> ConsoleResult<&mut PricingForm> {
        let row = self
            .rows
            .get(row)
            .ok_or_else(|| ConsoleError::NotFound(format!("Row {}", row)))?;
        Ok(self.form.insert(PricingForm::from(row)))
    }

    pub async fn submit_form(&mut self) -> ConsoleResult<()> {
        let form = self
            .form
            .clone()
            .ok_or_else(|| ConsoleError::validation("열린 식단가 양식이 없습니다"))?;
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(err) => return Err(report(&mut self.notice, err)),
        };
        let result = match form.id {
            Some(id) => self.api.update_meal_pricing(id, &full_update(payload)).await,
            None => self.api.create_meal_pricing(&payload).await,
        };
        match result {
            Ok(saved) => {
                tracing::info!(id = saved.id, "meal pricing saved");
                self.form = None;
                self.notice = Some(Notice::success("저장되었습니다"));
                self.load().await
            }
            Err(err) => Err(report(&mut self.notice, err.into())),
        }
    }

    /// Delete a row; drafts are dropped without a request
    pub async fn delete(&mut self, row: usize) -> ConsoleResult<()> {
        let Some(target) = self.rows.get(row) else {
            return Err(ConsoleError::NotFound(format!("Row {}", row)));
        };
        let Some(id) = target.id() else {
            return self.discard_draft(row);
        };
        if let Err(err) = self.api.delete_meal_pricing(id).await {
            return Err(report(&mut self.notice, err.into()));
        }
        tracing::info!(id, "meal pricing deleted");
        self.forget_pending(RecordState::Persisted { id });
        self.notice = Some(Notice::success("삭제되었습니다"));
        self.load().await
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new(
            vec![
                "사업장",
                "식단 구분",
                "식단명",
                "판매가",
                "재료비 기준",
                "원가율",
                "적용 기간",
                "상태",
            ],
            "등록된 식단가가 없습니다",
        );
        table.rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let mut cells = vec![
                    Cell::opt(Some(row.location_name.as_str())),
                    Cell::text(row.meal_plan_type.as_str()),
                    Cell::opt(Some(row.plan_name.as_str())),
                    Cell::text(format_money(row.selling_price)),
                    Cell::text(format_money(row.material_cost_guideline)),
                    Cell::Badge(row.ratio_badge()),
                    Cell::text(period_text(row.apply_date_start, row.apply_date_end)),
                    Cell::Badge(Badge::active(row.is_active)),
                ];
                if let Some(cell) = self.editing.as_ref().filter(|c| c.row == index) {
                    cells[cell.field.column()] = Cell::Editing(cell.value.clone());
                }
                Row {
                    key: row.id(),
                    cells,
                }
            })
            .collect();
        table.state = self.state.clone();
        table
    }
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

fn period_text(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (None, None) => "-".to_string(),
        (start, end) => format!(
            "{} ~ {}",
            start.map(|d| d.to_string()).unwrap_or_default(),
            end.map(|d| d.to_string()).unwrap_or_default()
        )
        .trim()
        .to_string(),
    }
}

/// `5000`, `5,000` and `5,000원` all read as 5000; negatives are refused
fn parse_money(input: &str) -> ConsoleResult<Decimal> {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != ',' && *c != '원' && !c.is_whitespace())
        .collect();
    let value = Decimal::from_str(&cleaned)
        .map_err(|_| ConsoleError::validation(format!("금액이 올바르지 않습니다: {}", input)))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConsoleError::validation("금액은 0 이상이어야 합니다"));
    }
    Ok(value)
}

/// `YYYY-MM-DD`; blank clears the date
fn parse_date(input: &str) -> ConsoleResult<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ConsoleError::validation(format!("날짜 형식은 YYYY-MM-DD 입니다: {}", input)))
}

fn parse_flag(input: &str) -> ConsoleResult<bool> {
    match input.trim().to_lowercase().as_str() {
        "true" | "1" | "y" | "사용" | "활성" => Ok(true),
        "false" | "0" | "n" | "미사용" | "비활성" => Ok(false),
        other => Err(ConsoleError::validation(format!(
            "사용 여부가 올바르지 않습니다: {}",
            other
        ))),
    }
}

fn check_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ConsoleResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ConsoleError::validation(
            "적용 종료일은 시작일 이후여야 합니다",
        )),
        _ => Ok(()),
    }
}

/// `5000` → `5,000원`
fn format_money(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let digits: Vec<char> = int.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    match frac {
        Some(frac) => format!("{}{}.{}원", sign, grouped, frac),
        None => format!("{}{}원", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::FakeApi;

    fn pricing(id: i64, price: i64, cost: i64) -> MealPricing {
        MealPricing {
            id,
            location_name: "행복요양원".to_string(),
            meal_plan_type: MealPlanType::Lunch,
            meal_type: None,
            plan_name: "기본".to_string(),
            apply_date_start: NaiveDate::from_ymd_opt(2024, 3, 1),
            apply_date_end: None,
            selling_price: Decimal::from(price),
            material_cost_guideline: Decimal::from(cost),
            is_active: true,
        }
    }

    async fn loaded(rows: Vec<MealPricing>) -> (Arc<FakeApi>, MealPricingPage) {
        let api = Arc::new(FakeApi {
            pricing: rows,
            ..FakeApi::default()
        });
        let mut page = MealPricingPage::new(api.clone());
        page.load().await.unwrap();
        (api, page)
    }

    #[tokio::test]
    async fn test_ratio_badges() {
        let (_, page) = loaded(vec![pricing(1, 10000, 4500), pricing(2, 10000, 3000)]).await;
        let table = page.table();
        assert_eq!(
            table.rows[0].cells[5],
            Cell::Badge(Badge::new("45.0%", Tone::Danger))
        );
        assert_eq!(
            table.rows[1].cells[5],
            Cell::Badge(Badge::new("30.0%", Tone::Good))
        );
        assert_eq!(table.rows[0].cells[3], Cell::text("10,000원"));
    }

    #[test]
    fn test_ratio_without_price_is_muted() {
        let row = PricingRow::draft(0, "본관");
        assert_eq!(row.ratio_badge(), Badge::new("-", Tone::Muted));
    }

    #[tokio::test]
    async fn test_only_one_cell_edits() {
        let (_, mut page) = loaded(vec![pricing(1, 5000, 2000), pricing(2, 6000, 2000)]).await;
        page.begin_edit(0, PricingField::SellingPrice).unwrap();
        page.input("5500");
        page.begin_edit(1, PricingField::PlanName).unwrap();

        let editing: Vec<_> = page
            .table()
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| matches!(c, Cell::Editing(_)))
            .cloned()
            .collect();
        assert_eq!(editing, vec![Cell::Editing("기본".to_string())]);
        assert_eq!(page.rows[0].selling_price, Decimal::from(5000));
    }

    #[tokio::test]
    async fn test_cancel_and_unchanged_send_nothing() {
        let (api, mut page) = loaded(vec![pricing(1, 5000, 2000)]).await;
        page.begin_edit(0, PricingField::SellingPrice).unwrap();
        page.input("9999");
        page.cancel_edit();
        assert!(page.editing.is_none());

        page.begin_edit(0, PricingField::SellingPrice).unwrap();
        page.input("5,000원");
        page.commit_edit().await.unwrap();

        assert_eq!(api.calls(), vec!["list_meal_pricing"]);
    }

    #[tokio::test]
    async fn test_persisted_row_puts_and_reloads() {
        let (api, mut page) = loaded(vec![pricing(1, 5000, 2000)]).await;
        page.begin_edit(0, PricingField::MaterialCost).unwrap();
        page.input("2,500");
        page.commit_edit().await.unwrap();

        assert_eq!(
            api.calls(),
            vec!["list_meal_pricing", "update_meal_pricing", "list_meal_pricing"]
        );
        assert!(page.editing.is_none());
    }

    #[tokio::test]
    async fn test_bad_number_keeps_editing() {
        let (api, mut page) = loaded(vec![pricing(1, 5000, 2000)]).await;
        page.begin_edit(0, PricingField::SellingPrice).unwrap();
        page.input("-100");
        assert!(page.commit_edit().await.is_err());

        assert_eq!(page.editing.as_ref().map(|c| c.value.as_str()), Some("-100"));
        assert!(page.notice.as_ref().unwrap().is_error());
        assert_eq!(api.calls(), vec!["list_meal_pricing"]);
    }

    #[tokio::test]
    async fn test_incomplete_draft_stays_local() {
        let (api, mut page) = loaded(vec![]).await;
        let row = page.add_draft();
        page.begin_edit(row, PricingField::SellingPrice).unwrap();
        page.input("4000");

        let err = page.commit_edit().await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(page.rows[row].selling_price, Decimal::from(4000));
        assert!(page.rows[row].is_draft());
        assert_eq!(api.calls(), vec!["list_meal_pricing"]);
    }

    #[tokio::test]
    async fn test_complete_draft_is_created() {
        let (api, mut page) = loaded(vec![]).await;
        page.filter.location_name = Some("행복요양원".to_string());
        let row = page.add_draft();
        page.begin_edit(row, PricingField::PlanName).unwrap();
        page.input("일반식");
        page.commit_edit().await.unwrap();

        assert_eq!(
            api.calls(),
            vec!["list_meal_pricing", "create_meal_pricing", "list_meal_pricing"]
        );
        assert!(page.rows.iter().all(|r| !r.is_draft()));
    }

    #[tokio::test]
    async fn test_refused_edit_can_be_retried() {
        let api = Arc::new(FakeApi {
            pricing: vec![pricing(1, 5000, 2000)],
            reject: Some("권한이 없습니다".to_string()),
            ..FakeApi::default()
        });
        let mut page = MealPricingPage::new(api.clone());
        page.load().await.unwrap();
        page.begin_edit(0, PricingField::IsActive).unwrap();
        page.input("미사용");

        assert!(page.commit_edit().await.is_err());
        assert!(matches!(
            page.failed_edit,
            Some(PendingEdit::Update {
                id: 1,
                field: PricingField::IsActive,
                ..
            })
        ));
        assert!(page.rows[0].is_active);

        assert!(page.retry_edit().await.is_err());
        assert_eq!(
            api.calls(),
            vec!["list_meal_pricing", "update_meal_pricing", "update_meal_pricing"]
        );
    }

    #[tokio::test]
    async fn test_refused_draft_is_created_on_retry() {
        let (api, mut page) = loaded(vec![]).await;
        page.filter.location_name = Some("행복요양원".to_string());
        let row = page.add_draft();
        api.reject_next("잠시 후 다시 시도하세요");

        page.begin_edit(row, PricingField::PlanName).unwrap();
        page.input("야간식");
        assert!(page.commit_edit().await.is_err());
        assert_eq!(page.rows[row].plan_name, "야간식");
        assert!(page.rows[row].is_draft());
        assert!(matches!(page.failed_edit, Some(PendingEdit::Create { .. })));

        page.retry_edit().await.unwrap();
        assert_eq!(
            api.calls(),
            vec![
                "list_meal_pricing",
                "create_meal_pricing",
                "create_meal_pricing",
                "list_meal_pricing"
            ]
        );
        let sent = api.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].1["plan_name"], "야간식");
        assert!(page.rows.iter().all(|r| !r.is_draft()));
        assert!(page.failed_edit.is_none());
    }

    #[tokio::test]
    async fn test_retry_follows_record_not_row() {
        let (api, mut page) = loaded(vec![
            pricing(1, 5000, 2000),
            pricing(2, 6000, 2000),
            pricing(3, 7000, 2000),
        ])
        .await;
        api.reject_next("권한이 없습니다");
        page.begin_edit(1, PricingField::PlanName).unwrap();
        page.input("바뀐이름");
        assert!(page.commit_edit().await.is_err());

        page.delete(0).await.unwrap();
        page.retry_edit().await.unwrap();

        let (target, body) = api.sent().last().cloned().unwrap();
        assert_eq!(target, "update_meal_pricing/2");
        assert_eq!(body, serde_json::json!({"plan_name": "바뀐이름"}));
    }

    #[tokio::test]
    async fn test_deleting_the_record_drops_its_retry() {
        let (api, mut page) = loaded(vec![pricing(1, 5000, 2000), pricing(2, 6000, 2000)]).await;
        api.reject_next("권한이 없습니다");
        page.begin_edit(0, PricingField::SellingPrice).unwrap();
        page.input("5500");
        assert!(page.commit_edit().await.is_err());

        page.delete(0).await.unwrap();
        assert!(matches!(
            page.retry_edit().await,
            Err(ConsoleError::NothingToRetry)
        ));
    }

    #[tokio::test]
    async fn test_discarding_refused_draft_drops_its_retry() {
        let (api, mut page) = loaded(vec![]).await;
        page.filter.location_name = Some("본관".to_string());
        let row = page.add_draft();
        api.reject_next("잠시 후 다시 시도하세요");
        page.begin_edit(row, PricingField::PlanName).unwrap();
        page.input("간식");
        assert!(page.commit_edit().await.is_err());

        page.discard_draft(row).unwrap();
        assert!(page.failed_edit.is_none());
    }

    #[tokio::test]
    async fn test_clearing_a_date_sends_null() {
        let (api, mut page) = loaded(vec![pricing(1, 5000, 2000)]).await;
        page.begin_edit(0, PricingField::ApplyDateStart).unwrap();
        page.input("");
        page.commit_edit().await.unwrap();

        assert_eq!(
            api.sent(),
            vec![(
                "update_meal_pricing/1".to_string(),
                serde_json::json!({"apply_date_start": null})
            )]
        );
    }

    #[tokio::test]
    async fn test_delete_draft_is_local() {
        let (api, mut page) = loaded(vec![pricing(1, 5000, 2000)]).await;
        let row = page.add_draft();
        page.delete(row).await.unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(api.calls(), vec!["list_meal_pricing"]);
    }

    #[test]
    fn test_form_validation() {
        let form = PricingForm {
            location_name: "본관".to_string(),
            plan_name: "기본".to_string(),
            selling_price: "5,000".to_string(),
            material_cost_guideline: "2000".to_string(),
            apply_date_start: "2024-03-01".to_string(),
            apply_date_end: "2024-02-01".to_string(),
            ..PricingForm::default()
        };
        assert!(form.validate().is_err());

        let form = PricingForm {
            apply_date_end: String::new(),
            ..form
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.selling_price, Decimal::from(5000));
        assert_eq!(payload.apply_date_end, None);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(
            "material_cost_guideline".parse::<PricingField>().unwrap(),
            PricingField::MaterialCost
        );
        assert!("price".parse::<PricingField>().is_err());
        assert!(parse_flag("사용").unwrap());
        assert_eq!(format_money(Decimal::new(12345678, 1)), "1,234,567.8원");
        assert_eq!(format_money(Decimal::from(-500)), "-500원");
        assert_eq!(format_money(Decimal::new(-12345, 1)), "-1,234.5원");
    }
}
