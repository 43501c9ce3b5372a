//! Drag-and-drop reparenting
//!
//! `Idle → Dragging → (HoverValid | HoverInvalid) → Dropped | Cancelled`.
//! Validity is re-evaluated on every hover.

use shared::models::{Site, SiteTier};

use super::SiteTree;
use crate::error::{ConsoleError, ConsoleResult};

/// Whether `dragged` may be dropped onto `target`
///
/// Only detail → head and customer → detail moves are allowed. Head offices
/// never move and sites of an unknown type have no tier, so they never drop.
pub fn can_drop_on(dragged: &Site, target: &Site) -> bool {
    if dragged.id == target.id {
        return false;
    }
    matches!(
        (dragged.tier(), target.tier()),
        (Some(SiteTier::Detail), Some(SiteTier::Head))
            | (Some(SiteTier::Customer), Some(SiteTier::Detail))
    )
}

/// A move to send to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reparent {
    pub site_id: i64,
    pub parent_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        site_id: i64,
    },
    HoverValid {
        site_id: i64,
        target_id: i64,
    },
    HoverInvalid {
        site_id: i64,
        target_id: i64,
    },
    Dropped(Reparent),
    Cancelled {
        site_id: i64,
    },
}

impl DragState {
    fn dragged(&self) -> Option<i64> {
        match *self {
            Self::Dragging { site_id }
            | Self::HoverValid { site_id, .. }
            | Self::HoverInvalid { site_id, .. } => Some(site_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Pick up a site
    pub fn start(&mut self, tree: &SiteTree, site_id: i64) -> ConsoleResult<()> {
        if tree.find(site_id).is_none() {
            return Err(ConsoleError::NotFound(format!("Site {}", site_id)));
        }
        self.state = DragState::Dragging { site_id };
        Ok(())
    }

    /// Hover over `target_id`; returns whether a drop there is valid
    ///
    /// Outside of a drag this does nothing and returns `false`.
    pub fn over(&mut self, tree: &SiteTree, target_id: i64) -> bool {
        let Some(site_id) = self.state.dragged() else {
            return false;
        };
        let valid = match (tree.find(site_id), tree.find(target_id)) {
            (Some(dragged), Some(target)) => can_drop_on(dragged, target),
            _ => false,
        };
        self.state = if valid {
            DragState::HoverValid { site_id, target_id }
        } else {
            DragState::HoverInvalid { site_id, target_id }
        };
        valid
    }

    /// Pointer left the hovered node
    pub fn leave(&mut self) {
        if let Some(site_id) = self.state.dragged() {
            self.state = DragState::Dragging { site_id };
        }
    }

    /// Release; a drop on a valid target yields the move to send
    pub fn drop(&mut self) -> Option<Reparent> {
        match self.state {
            DragState::HoverValid { site_id, target_id } => {
                let reparent = Reparent {
                    site_id,
                    parent_id: target_id,
                };
                self.state = DragState::Dropped(reparent);
                Some(reparent)
            }
            state => {
                if let Some(site_id) = state.dragged() {
                    self.state = DragState::Cancelled { site_id };
                }
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if let Some(site_id) = self.state.dragged() {
            self.state = DragState::Cancelled { site_id };
        }
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
