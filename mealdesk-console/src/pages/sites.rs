//! 사업장 관리
//!
//! The site tree with statistics, the site form, and drag-and-drop moves.
//! A failed move leaves the tree as last loaded and is kept for retry.

use mealdesk_client::AdminApi;
use serde::Serialize;
use shared::models::{Site, SiteCreate, SiteTier, SiteType, SiteUpdate};
use std::sync::Arc;

use super::{non_blank, report};
use crate::error::{ConsoleError, ConsoleResult};
use crate::notice::Notice;
use crate::site_tree::{DragController, Reparent, SiteTree, TreeNodeView, can_drop_on};
use crate::view::LoadState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    pub total: usize,
    pub head: usize,
    pub detail: usize,
    pub customer: usize,
    pub unclassified: usize,
    pub active: usize,
    pub inactive: usize,
}

impl SiteStats {
    pub fn of(tree: &SiteTree) -> Self {
        let mut stats = Self::default();
        for site in tree.iter() {
            stats.total += 1;
            match site.tier() {
                Some(SiteTier::Head) => stats.head += 1,
                Some(SiteTier::Detail) => stats.detail += 1,
                Some(SiteTier::Customer) => stats.customer += 1,
                None => stats.unclassified += 1,
            }
            if site.is_active {
                stats.active += 1;
            } else {
                stats.inactive += 1;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteForm {
    pub id: Option<i64>,
    pub name: String,
    /// `None` for a stored site that never had a type
    pub site_type: Option<SiteType>,
    pub code: String,
    pub parent_id: Option<i64>,
    pub is_active: bool,
    pub contact_person: String,
    pub contact_phone: String,
    pub address: String,
}

impl SiteForm {
    fn new(site_type: SiteType, parent_id: Option<i64>) -> Self {
        Self {
            id: None,
            name: String::new(),
            site_type: Some(site_type),
            code: String::new(),
            parent_id,
            is_active: true,
            contact_person: String::new(),
            contact_phone: String::new(),
            address: String::new(),
        }
    }

    fn to_create(&self) -> ConsoleResult<SiteCreate> {
        let site_type = self
            .site_type
            .clone()
            .ok_or_else(|| ConsoleError::validation("사업장 구분을 선택하세요"))?;
        Ok(SiteCreate {
            name: self.name.trim().to_string(),
            site_type,
            code: non_blank(&self.code),
            parent_id: self.parent_id,
            is_active: Some(self.is_active),
            contact_person: non_blank(&self.contact_person),
            contact_phone: non_blank(&self.contact_phone),
            address: non_blank(&self.address),
        })
    }

    /// Blank text fields clear the stored value; an absent type is left alone
    fn to_update(&self) -> SiteUpdate {
        SiteUpdate {
            name: Some(self.name.trim().to_string()),
            site_type: self.site_type.clone(),
            code: Some(non_blank(&self.code)),
            is_active: Some(self.is_active),
            contact_person: Some(non_blank(&self.contact_person)),
            contact_phone: Some(non_blank(&self.contact_phone)),
            address: Some(non_blank(&self.address)),
        }
    }
}

impl From<&Site> for SiteForm {
    fn from(site: &Site) -> Self {
        Self {
            id: Some(site.id),
            name: site.name.clone(),
            site_type: site.site_type.clone(),
            code: site.code.clone().unwrap_or_default(),
            parent_id: site.parent_id,
            is_active: site.is_active,
            contact_person: site.contact_person.clone().unwrap_or_default(),
            contact_phone: site.contact_phone.clone().unwrap_or_default(),
            address: site.address.clone().unwrap_or_default(),
        }
    }
}

pub struct SitesPage {
    api: Arc<dyn AdminApi>,
    pub tree: SiteTree,
    pub state: LoadState,
    pub drag: DragController,
    /// Move that failed and can be sent again
    pub pending_move: Option<Reparent>,
    pub form: Option<SiteForm>,
    pub notice: Option<Notice>,
}

impl SitesPage {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            tree: SiteTree::default(),
            state: LoadState::NotLoaded,
            drag: DragController::default(),
            pending_move: None,
            form: None,
            notice: None,
        }
    }

    /// Reload the whole tree
    pub async fn load(&mut self) -> ConsoleResult<()> {
        match self.api.site_tree().await {
            Ok(sites) => {
                self.tree.replace(sites);
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

    pub fn view(&self) -> Vec<TreeNodeView> {
        self.tree.view()
    }

    pub fn stats(&self) -> SiteStats {
        SiteStats::of(&self.tree)
    }

    pub fn toggle(&mut self, id: i64) -> bool {
        self.tree.toggle(id)
    }

    // ========== Drag and drop ==========

    pub fn drag_start(&mut self, site_id: i64) -> ConsoleResult<()> {
        self.drag.start(&self.tree, site_id)
    }

    pub fn drag_over(&mut self, target_id: i64) -> bool {
        self.drag.over(&self.tree, target_id)
    }

    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Release the dragged site; a valid drop is sent to the server
    ///
    /// Returns `Ok(false)` when the drop was not on a valid target.
    pub async fn drop(&mut self) -> ConsoleResult<bool> {
        let Some(reparent) = self.drag.drop() else {
            return Ok(false);
        };
        self.reparent(reparent).await?;
        Ok(true)
    }

    /// Move a site without dragging, checked by the same rule
    pub async fn move_site(&mut self, site_id: i64, parent_id: i64) -> ConsoleResult<()> {
        let allowed = match (self.tree.find(site_id), self.tree.find(parent_id)) {
            (Some(site), Some(parent)) => can_drop_on(site, parent),
            (None, _) => {
                let err = ConsoleError::NotFound(format!("Site {}", site_id));
                return Err(report(&mut self.notice, err));
            }
            (_, None) => {
                let err = ConsoleError::NotFound(format!("Site {}", parent_id));
                return Err(report(&mut self.notice, err));
            }
        };
        if !allowed {
            let err = ConsoleError::validation("이 위치로 이동할 수 없습니다");
            return Err(report(&mut self.notice, err));
        }
        self.reparent(Reparent { site_id, parent_id }).await
    }

    /// Send the last failed move again
    pub async fn retry_move(&mut self) -> ConsoleResult<()> {
        let reparent = self.pending_move.ok_or(ConsoleError::NothingToRetry)?;
        self.reparent(reparent).await
    }

    async fn reparent(&mut self, reparent: Reparent) -> ConsoleResult<()> {
        let result = self
            .api
            .reparent_site(reparent.site_id, Some(reparent.parent_id))
            .await;
        self.drag.reset();
        match result {
            Ok(site) => {
                tracing::info!(
                    site_id = reparent.site_id,
                    parent_id = reparent.parent_id,
                    "site moved"
                );
                self.pending_move = None;
                self.notice = Some(Notice::success(format!("{} 이동되었습니다", site.name)));
                self.load().await
            }
            Err(err) => {
                self.pending_move = Some(reparent);
                Err(report(&mut self.notice, err.into()))
            }
        }
    }

    // ========== Site form ==========

    /// Form for a new head office
    pub fn new_root_form(&mut self) -> &mut SiteForm {
        self.form.insert(SiteForm::new(SiteType::Head, None))
    }

    /// Form for a child of `parent_id`, with the child type preselected
    pub fn add_child_form(&mut self, parent_id: i64) -> ConsoleResult<&mut SiteForm> {
        let parent = self
            .tree
            .find(parent_id)
            .ok_or_else(|| ConsoleError::NotFound(format!("Site {}", parent_id)))?;
        let child_tier = parent
            .tier()
            .and_then(|tier| tier.child())
            .ok_or_else(|| ConsoleError::validation("하위 사업장을 추가할 수 없습니다"))?;
        Ok(self
            .form
            .insert(SiteForm::new(child_tier.default_type(), Some(parent_id))))
    }

    pub fn edit(&mut self, id: i64) -> ConsoleResult<&mut SiteForm> {
        let site = self
            .tree
            .find(id)
            .ok_or_else(|| ConsoleError::NotFound(format!("Site {}", id)))?;
        Ok(self.form.insert(SiteForm::from(site)))
    }

    pub async fn submit_form(&mut self, form: SiteForm) -> ConsoleResult<()> {
        if form.name.trim().is_empty() {
            self.form = Some(form);
            return Err(report(
                &mut self.notice,
                ConsoleError::validation("사업장명을 입력하세요"),
            ));
        }

        let result = match form.id {
            Some(id) => self.api.update_site(id, &form.to_update()).await,
            None => match form.to_create() {
                Ok(create) => self.api.create_site(&create).await,
                Err(err) => {
                    self.form = Some(form);
                    return Err(report(&mut self.notice, err));
                }
            },
        };
        match result {
            Ok(site) => {
                tracing::info!(id = site.id, "site saved");
                self.form = None;
                self.notice = Some(Notice::success(format!("{} 저장되었습니다", site.name)));
                self.load().await
            }
            Err(err) => {
                self.form = Some(form);
                Err(report(&mut self.notice, err.into()))
            }
        }
    }

    /// Delete a leaf site; sites with children are refused locally
    pub async fn delete(&mut self, id: i64) -> ConsoleResult<()> {
        let site = match self.tree.find(id) {
            Some(site) => site,
            None => {
                let err = ConsoleError::NotFound(format!("Site {}", id));
                return Err(report(&mut self.notice, err));
            }
        };
        if !site.children.is_empty() {
            let err = ConsoleError::validation("하위 사업장이 있는 사업장은 삭제할 수 없습니다");
            return Err(report(&mut self.notice, err));
        }
        if let Err(err) = self.api.delete_site(id).await {
            return Err(report(&mut self.notice, err.into()));
        }
        tracing::info!(id, "site deleted");
        self.notice = Some(Notice::success("사업장이 삭제되었습니다"));
        self.load().await
    }
}
