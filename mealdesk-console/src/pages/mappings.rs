//! 협력업체 매핑
//!
//! Supplier codes per customer site. The form is validated before any
//! request; a failed save keeps the form open so it can be sent again.

use mealdesk_client::{AdminApi, MappingQuery, SearchQuery};
use shared::models::{
    Site, Supplier, SupplierMapping, SupplierMappingCreate, SupplierMappingUpdate,
};
use std::sync::Arc;

use super::{Listing, non_blank, report};
use crate::error::{ConsoleError, ConsoleResult};
use crate::notice::Notice;
use crate::view::{Badge, Cell, Row, Table};

/// Suppliers offered in the form's select box
const SUPPLIER_OPTIONS_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingFilter {
    pub supplier_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingForm {
    pub id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub supplier_code: String,
    pub delivery_code: String,
    pub is_active: bool,
}

impl Default for MappingForm {
    fn default() -> Self {
        Self {
            id: None,
            supplier_id: None,
            customer_id: None,
            supplier_code: String::new(),
            delivery_code: String::new(),
            is_active: true,
        }
    }
}

impl From<&SupplierMapping> for MappingForm {
    fn from(m: &SupplierMapping) -> Self {
        Self {
            id: Some(m.id),
            supplier_id: Some(m.supplier_id),
            customer_id: Some(m.customer_id),
            supplier_code: m.supplier_code.clone(),
            delivery_code: m.delivery_code.clone().unwrap_or_default(),
            is_active: m.is_active,
        }
    }
}

impl MappingForm {
    /// Check required fields and build the create payload
    pub fn validate(&self) -> ConsoleResult<SupplierMappingCreate> {
        let supplier_id = self
            .supplier_id
            .ok_or_else(|| ConsoleError::validation("협력업체를 선택하세요"))?;
        let customer_id = self
            .customer_id
            .ok_or_else(|| ConsoleError::validation("사업장을 선택하세요"))?;
        let supplier_code = non_blank(&self.supplier_code)
            .ok_or_else(|| ConsoleError::validation("협력업체 코드를 입력하세요"))?;
        Ok(SupplierMappingCreate {
            supplier_id,
            customer_id,
            supplier_code,
            delivery_code: non_blank(&self.delivery_code),
            is_active: Some(self.is_active),
        })
    }
}

pub struct MappingsPage {
    api: Arc<dyn AdminApi>,
    pub listing: Listing<SupplierMapping>,
    pub filter: MappingFilter,
    pub form: Option<MappingForm>,
    pub notice: Option<Notice>,
    /// Select box options
    pub suppliers: Vec<Supplier>,
    pub sites: Vec<Site>,
}

impl MappingsPage {
    pub fn new(api: Arc<dyn AdminApi>, per_page: u32) -> Self {
        Self {
            api,
            listing: Listing::new(per_page),
            filter: MappingFilter::default(),
            form: None,
            notice: None,
            suppliers: Vec::new(),
            sites: Vec::new(),
        }
    }

    /// Load the select box options and the current page
    pub async fn load(&mut self) -> ConsoleResult<()> {
        if let Err(err) = self.load_options().await {
            self.listing.fail(err.user_message());
            return Err(report(&mut self.notice, err));
        }
        self.load_mappings().await
    }

    async fn load_options(&mut self) -> ConsoleResult<()> {
        let suppliers = self
            .api
            .list_suppliers(&SearchQuery::new(1, SUPPLIER_OPTIONS_LIMIT))
            .await?;
        self.suppliers = suppliers.items;
        self.sites = self.api.list_sites().await?;
        Ok(())
    }

    pub async fn load_mappings(&mut self) -> ConsoleResult<()> {
        let query = MappingQuery {
            page: self.listing.page,
            limit: self.listing.per_page,
            supplier_id: self.filter.supplier_id,
            customer_id: self.filter.customer_id,
            is_active: self.filter.is_active,
        };
        match self.api.list_mappings(&query).await {
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

    /// Apply filters from the first page
    pub async fn set_filter(&mut self, filter: MappingFilter) -> ConsoleResult<()> {
        self.filter = filter;
        self.listing.page = 1;
        self.load_mappings().await
    }

    pub async fn go_to(&mut self, page: u32) -> ConsoleResult<()> {
        self.listing.go_to(page);
        self.load_mappings().await
    }

    pub fn new_form(&mut self) -> &mut MappingForm {
        self.form.insert(MappingForm::default())
    }

    /// Open the form from the cached row of the last list
    pub fn edit(&mut self, id: i64) -> ConsoleResult<&mut MappingForm> {
        let mapping = self
            .listing
            .rows
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ConsoleError::NotFound(format!("Mapping {}", id)))?;
        Ok(self.form.insert(MappingForm::from(mapping)))
    }

    /// Validate and send the open form
    pub async fn save(&mut self) -> ConsoleResult<()> {
        let form = self
            .form
            .clone()
            .ok_or_else(|| ConsoleError::validation("열린 매핑 양식이 없습니다"))?;
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(err) => return Err(report(&mut self.notice, err)),
        };

        let result = match form.id {
            Some(id) => {
                let update = SupplierMappingUpdate {
                    supplier_id: Some(payload.supplier_id),
                    customer_id: Some(payload.customer_id),
                    supplier_code: Some(payload.supplier_code),
                    delivery_code: Some(payload.delivery_code),
                    is_active: payload.is_active,
                };
                self.api.update_mapping(id, &update).await
            }
            None => self.api.create_mapping(&payload).await,
        };
        match result {
            Ok(mapping) => {
                tracing::info!(id = mapping.id, "mapping saved");
                self.form = None;
                self.notice = Some(Notice::success("매핑이 저장되었습니다"));
                self.load_mappings().await
            }
            Err(err) => Err(report(&mut self.notice, err.into())),
        }
    }

    pub async fn toggle_active(&mut self, id: i64) -> ConsoleResult<()> {
        let Some(current) = self.listing.rows.iter().find(|m| m.id == id) else {
            let err = ConsoleError::NotFound(format!("Mapping {}", id));
            return Err(report(&mut self.notice, err));
        };
        let update = SupplierMappingUpdate {
            is_active: Some(!current.is_active),
            ..SupplierMappingUpdate::default()
        };
        if let Err(err) = self.api.update_mapping(id, &update).await {
            return Err(report(&mut self.notice, err.into()));
        }
        self.load_mappings().await
    }

    pub async fn delete(&mut self, id: i64) -> ConsoleResult<()> {
        if let Err(err) = self.api.delete_mapping(id).await {
            return Err(report(&mut self.notice, err.into()));
        }
        tracing::info!(id, "mapping deleted");
        self.notice = Some(Notice::success("매핑이 삭제되었습니다"));
        self.load_mappings().await
    }

    fn supplier_name(&self, mapping: &SupplierMapping) -> String {
        mapping
            .supplier_name
            .clone()
            .or_else(|| {
                self.suppliers
                    .iter()
                    .find(|s| s.id == mapping.supplier_id)
                    .map(|s| s.name.clone())
            })
            .unwrap_or_else(|| format!("#{}", mapping.supplier_id))
    }

    fn customer_name(&self, mapping: &SupplierMapping) -> String {
        mapping
            .customer_name
            .clone()
            .or_else(|| {
                self.sites
                    .iter()
                    .find(|s| s.id == mapping.customer_id)
                    .map(|s| s.name.clone())
            })
            .unwrap_or_else(|| format!("#{}", mapping.customer_id))
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new(
            vec!["ID", "협력업체", "사업장", "협력업체 코드", "배송 코드", "상태", "등록일"],
            "등록된 매핑이 없습니다",
        );
        table.rows = self
            .listing
            .rows
            .iter()
            .map(|m| Row {
                key: Some(m.id),
                cells: vec![
                    Cell::text(m.id.to_string()),
                    Cell::text(self.supplier_name(m)),
                    Cell::text(self.customer_name(m)),
                    Cell::text(&m.supplier_code),
                    Cell::opt(m.delivery_code.as_deref()),
                    Cell::Badge(Badge::active(m.is_active)),
                    Cell::opt(m.created_at.as_deref().map(|d| d.get(..10).unwrap_or(d))),
                ],
            })
            .collect();
        table.pagination = Some(self.listing.pagination);
        table.state = self.listing.state.clone();
        table
    }
}
