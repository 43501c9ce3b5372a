//! 협력업체 관리

use mealdesk_client::{AdminApi, SearchQuery};
use shared::models::{Supplier, SupplierCreate, SupplierUpdate};
use std::sync::Arc;

use super::{Listing, non_blank, report};
use crate::error::{ConsoleError, ConsoleResult};
use crate::notice::Notice;
use crate::view::{Badge, Cell, Row, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierForm {
    pub id: Option<i64>,
    pub name: String,
    pub parent_code: String,
    pub business_number: String,
    pub representative: String,
    pub headquarters_address: String,
    pub headquarters_phone: String,
    pub email: String,
    pub is_active: bool,
}

impl Default for SupplierForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            parent_code: String::new(),
            business_number: String::new(),
            representative: String::new(),
            headquarters_address: String::new(),
            headquarters_phone: String::new(),
            email: String::new(),
            is_active: true,
        }
    }
}

impl From<&Supplier> for SupplierForm {
    fn from(s: &Supplier) -> Self {
        Self {
            id: Some(s.id),
            name: s.name.clone(),
            parent_code: s.parent_code.clone().unwrap_or_default(),
            business_number: s.business_number.clone().unwrap_or_default(),
            representative: s.representative.clone().unwrap_or_default(),
            headquarters_address: s.headquarters_address.clone().unwrap_or_default(),
            headquarters_phone: s.headquarters_phone.clone().unwrap_or_default(),
            email: s.email.clone().unwrap_or_default(),
            is_active: s.is_active,
        }
    }
}

impl SupplierForm {
    fn to_create(&self) -> SupplierCreate {
        SupplierCreate {
            name: self.name.trim().to_string(),
            parent_code: non_blank(&self.parent_code),
            business_number: non_blank(&self.business_number),
            representative: non_blank(&self.representative),
            headquarters_address: non_blank(&self.headquarters_address),
            headquarters_phone: non_blank(&self.headquarters_phone),
            email: non_blank(&self.email),
            is_active: Some(self.is_active),
        }
    }

    fn to_update(&self) -> SupplierUpdate {
        SupplierUpdate {
            name: Some(self.name.trim().to_string()),
            parent_code: Some(non_blank(&self.parent_code)),
            business_number: Some(non_blank(&self.business_number)),
            representative: Some(non_blank(&self.representative)),
            headquarters_address: Some(non_blank(&self.headquarters_address)),
            headquarters_phone: Some(non_blank(&self.headquarters_phone)),
            email: Some(non_blank(&self.email)),
            is_active: Some(self.is_active),
        }
    }
}

pub struct SuppliersPage {
    api: Arc<dyn AdminApi>,
    pub listing: Listing<Supplier>,
    pub search: Option<String>,
    pub form: Option<SupplierForm>,
    pub notice: Option<Notice>,
}

impl SuppliersPage {
    pub fn new(api: Arc<dyn AdminApi>, per_page: u32) -> Self {
        Self {
            api,
            listing: Listing::new(per_page),
            search: None,
            form: None,
            notice: None,
        }
    }

    pub async fn load(&mut self) -> ConsoleResult<()> {
        let mut query = SearchQuery::new(self.listing.page, self.listing.per_page);
        query.search = self.search.clone();
        match self.api.list_suppliers(&query).await {
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

    pub async fn search(&mut self, term: &str) -> ConsoleResult<()> {
        self.search = non_blank(term);
        self.listing.page = 1;
        self.load().await
    }

    pub async fn go_to(&mut self, page: u32) -> ConsoleResult<()> {
        self.listing.go_to(page);
        self.load().await
    }

    pub fn new_form(&mut self) -> &mut SupplierForm {
        self.form.insert(SupplierForm::default())
    }

    pub fn edit(&mut self, id: i64) -> ConsoleResult<&mut SupplierForm> {
        let supplier = self
            .listing
            .rows
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ConsoleError::NotFound(format!("Supplier {}", id)))?;
        Ok(self.form.insert(SupplierForm::from(supplier)))
    }

    pub async fn submit_form(&mut self, form: SupplierForm) -> ConsoleResult<()> {
        if form.name.trim().is_empty() {
            self.form = Some(form);
            return Err(report(
                &mut self.notice,
                ConsoleError::validation("업체명을 입력하세요"),
            ));
        }

        let result = match form.id {
            Some(id) => self.api.update_supplier(id, &form.to_update()).await,
            None => self.api.create_supplier(&form.to_create()).await,
        };
        match result {
            Ok(supplier) => {
                tracing::info!(id = supplier.id, "supplier saved");
                self.form = None;
                self.notice = Some(Notice::success(format!("{} 저장되었습니다", supplier.name)));
                self.load().await
            }
            Err(err) => {
                self.form = Some(form);
                Err(report(&mut self.notice, err.into()))
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> ConsoleResult<()> {
        if let Err(err) = self.api.delete_supplier(id).await {
            return Err(report(&mut self.notice, err.into()));
        }
        tracing::info!(id, "supplier deleted");
        self.notice = Some(Notice::success("협력업체가 삭제되었습니다"));
        self.load().await
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new(
            vec!["ID", "업체명", "상위 코드", "사업자번호", "대표자", "연락처", "상태"],
            "등록된 협력업체가 없습니다",
        );
        table.rows = self
            .listing
            .rows
            .iter()
            .map(|s| Row {
                key: Some(s.id),
                cells: vec![
                    Cell::text(s.id.to_string()),
                    Cell::text(&s.name),
                    Cell::opt(s.parent_code.as_deref()),
                    Cell::opt(s.business_number.as_deref()),
                    Cell::opt(s.representative.as_deref()),
                    Cell::opt(s.headquarters_phone.as_deref()),
                    Cell::Badge(Badge::active(s.is_active)),
                ],
            })
            .collect();
        table.pagination = Some(self.listing.pagination);
        table.state = self.listing.state.clone();
        table
    }
}
