//! Site hierarchy tree
//!
//! Builds a forest from flat (`parent_id`) or nested (`children`) site
//! records, tracks which nodes are expanded and produces [`TreeNodeView`]s.
//! The tree is only replaced by a fresh load, never patched locally.

mod drag;

pub use drag::{DragController, DragState, Reparent, can_drop_on};

use shared::models::{Site, SiteTier};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::view::Badge;

/// Expand/collapse control of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Toggle {
    /// No children, no control
    Leaf,
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeAction {
    AddChild,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNodeView {
    pub id: i64,
    pub name: String,
    pub depth: usize,
    pub icon: &'static str,
    pub type_label: String,
    pub status: Badge,
    pub toggle: Toggle,
    pub actions: Vec<NodeAction>,
    /// Rendered children; empty while collapsed
    pub children: Vec<TreeNodeView>,
}

fn icon_for(tier: Option<SiteTier>) -> &'static str {
    match tier {
        Some(SiteTier::Head) => "🏢",
        Some(SiteTier::Detail) => "🏬",
        Some(SiteTier::Customer) => "🏫",
        None => "📍",
    }
}

#[derive(Debug, Clone, Default)]
pub struct SiteTree {
    roots: Vec<Site>,
    collapsed: HashSet<i64>,
}

impl SiteTree {
    /// Build from flat or nested records
    ///
    /// Records are flattened first (a nested child without `parent_id` takes
    /// its container's id), then nested by `parent_id`. Sites whose parent is
    /// missing become roots. Duplicate ids keep the first record.
    pub fn build(sites: Vec<Site>) -> Self {
        let mut flat = Vec::new();
        let mut seen = HashSet::new();
        flatten(sites, None, &mut flat, &mut seen);

        let ids: HashSet<i64> = flat.iter().map(|s| s.id).collect();
        let mut by_parent: HashMap<i64, Vec<Site>> = HashMap::new();
        let mut roots = Vec::new();
        for site in flat {
            match site.parent_id.filter(|pid| ids.contains(pid) && *pid != site.id) {
                Some(parent_id) => by_parent.entry(parent_id).or_default().push(site),
                None => roots.push(site),
            }
        }

        let roots = roots
            .into_iter()
            .map(|root| attach(root, &mut by_parent))
            .collect();
        Self {
            roots,
            collapsed: HashSet::new(),
        }
    }

    pub fn roots(&self) -> &[Site] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every site, depth first
    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        let mut stack: Vec<&Site> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let site = stack.pop()?;
            stack.extend(site.children.iter().rev());
            Some(site)
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn find(&self, id: i64) -> Option<&Site> {
        self.iter().find(|s| s.id == id)
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        !self.collapsed.contains(&id)
    }

    /// Flip one node; returns the new expanded flag
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.collapsed.remove(&id) {
            true
        } else {
            self.collapsed.insert(id);
            false
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn collapse_all(&mut self) {
        let parents: Vec<i64> = self
            .iter()
            .filter(|s| !s.children.is_empty())
            .map(|s| s.id)
            .collect();
        self.collapsed.extend(parents);
    }

    /// Replace the records, keeping expand/collapse state of surviving ids
    pub fn replace(&mut self, sites: Vec<Site>) {
        let collapsed = std::mem::take(&mut self.collapsed);
        *self = Self::build(sites);
        let ids: HashSet<i64> = self.iter().map(|s| s.id).collect();
        self.collapsed = collapsed.into_iter().filter(|id| ids.contains(id)).collect();
    }

    pub fn view(&self) -> Vec<TreeNodeView> {
        self.roots.iter().map(|site| self.node_view(site, 0)).collect()
    }

    fn node_view(&self, site: &Site, depth: usize) -> TreeNodeView {
        let expanded = self.is_expanded(site.id);
        let toggle = match (site.children.is_empty(), expanded) {
            (true, _) => Toggle::Leaf,
            (false, true) => Toggle::Expanded,
            (false, false) => Toggle::Collapsed,
        };
        let tier = site.tier();

        let mut actions = Vec::with_capacity(3);
        if tier.and_then(|t| t.child()).is_some() {
            actions.push(NodeAction::AddChild);
        }
        actions.push(NodeAction::Edit);
        actions.push(NodeAction::Delete);

        let children = if toggle == Toggle::Expanded {
            site.children
                .iter()
                .map(|child| self.node_view(child, depth + 1))
                .collect()
        } else {
            Vec::new()
        };

        TreeNodeView {
            id: site.id,
            name: site.name.clone(),
            depth,
            icon: icon_for(tier),
            type_label: site.type_label().to_string(),
            status: Badge::active(site.is_active),
            toggle,
            actions,
            children,
        }
    }
}

fn flatten(sites: Vec<Site>, parent_id: Option<i64>, out: &mut Vec<Site>, seen: &mut HashSet<i64>) {
    for mut site in sites {
        let children = std::mem::take(&mut site.children);
        if site.parent_id.is_none() {
            site.parent_id = parent_id;
        }
        let id = site.id;
        if seen.insert(id) {
            out.push(site);
        }
        flatten(children, Some(id), out, seen);
    }
}

fn attach(mut site: Site, by_parent: &mut HashMap<i64, Vec<Site>>) -> Site {
    let children = by_parent.remove(&site.id).unwrap_or_default();
    site.children = children
        .into_iter()
        .map(|child| attach(child, by_parent))
        .collect();
    site
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use shared::models::SiteType;

    pub(crate) fn site(id: i64, name: &str, site_type: SiteType, parent_id: Option<i64>) -> Site {
        Site {
            id,
            name: name.to_string(),
            site_type: Some(site_type),
            code: None,
            parent_id,
            is_active: true,
            contact_person: None,
            contact_phone: None,
            address: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_head_with_two_details_renders_nested() {
        let tree = SiteTree::build(vec![
            site(1, "본사", SiteType::Head, None),
            site(2, "서울사업장", SiteType::Detail, Some(1)),
            site(3, "부산사업장", SiteType::Detail, Some(1)),
        ]);

        let view = tree.view();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].toggle, Toggle::Expanded);
        assert_eq!(view[0].type_label, "본사");
        assert_eq!(view[0].children.len(), 2);
        assert!(view[0].children.iter().all(|c| c.depth == 1));
        assert_eq!(view[0].children[0].toggle, Toggle::Leaf);
    }

    #[test]
    fn test_nested_input_is_accepted() {
        let mut head = site(1, "본사", SiteType::Head, None);
        let mut detail = site(2, "서울사업장", SiteType::Detail, None);
        detail.children = vec![site(4, "행복요양원", SiteType::NursingHome, None)];
        head.children = vec![detail];

        let tree = SiteTree::build(vec![head]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.find(4).and_then(|s| s.parent_id), Some(2));
        assert_eq!(tree.roots()[0].children[0].children[0].id, 4);
    }

    #[test]
    fn test_orphans_become_roots() {
        let tree = SiteTree::build(vec![
            site(1, "본사", SiteType::Head, None),
            site(7, "떠돌이", SiteType::Customer, Some(99)),
        ]);
        assert_eq!(tree.roots().len(), 2);
    }

    #[test]
    fn test_toggle_hides_children() {
        let mut tree = SiteTree::build(vec![
            site(1, "본사", SiteType::Head, None),
            site(2, "서울사업장", SiteType::Detail, Some(1)),
        ]);
        assert!(!tree.toggle(1));
        let view = tree.view();
        assert_eq!(view[0].toggle, Toggle::Collapsed);
        assert!(view[0].children.is_empty());

        tree.expand_all();
        assert!(tree.is_expanded(1));
        tree.collapse_all();
        assert!(!tree.is_expanded(1));
        // leaves never collapse
        assert!(tree.is_expanded(2));
    }

    #[test]
    fn test_customer_nodes_offer_no_add_child() {
        let tree = SiteTree::build(vec![
            site(2, "서울사업장", SiteType::Detail, None),
            site(4, "행복요양원", SiteType::NursingHome, Some(2)),
        ]);
        let view = tree.view();
        assert_eq!(view[0].actions[0], NodeAction::AddChild);
        assert_eq!(
            view[0].children[0].actions,
            vec![NodeAction::Edit, NodeAction::Delete]
        );
    }

    #[test]
    fn test_replace_keeps_collapsed_state() {
        let mut tree = SiteTree::build(vec![
            site(1, "본사", SiteType::Head, None),
            site(2, "서울사업장", SiteType::Detail, Some(1)),
        ]);
        tree.toggle(1);
        tree.replace(vec![
            site(1, "본사", SiteType::Head, None),
            site(2, "서울사업장", SiteType::Detail, Some(1)),
            site(3, "부산사업장", SiteType::Detail, Some(1)),
        ]);
        assert!(!tree.is_expanded(1));
        assert_eq!(tree.len(), 3);
    }
}
