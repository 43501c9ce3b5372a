//! View models
//!
//! Plain data describing what a page shows. Controllers build them from
//! their state; [`crate::render`] turns them into text.

use shared::Pagination;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Neutral,
    Good,
    Danger,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }

    /// 활성 / 비활성
    pub fn active(is_active: bool) -> Self {
        if is_active {
            Self::new("활성", Tone::Good)
        } else {
            Self::new("비활성", Tone::Muted)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cell {
    Text(String),
    Badge(Badge),
    /// Cell currently being edited, holding the typed value
    Editing(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text of an optional value, `-` when missing or blank
    pub fn opt(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => Self::Text(value.to_string()),
            None => Self::Text("-".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Row key: the record id, or `None` for unsaved rows
    pub key: Option<i64>,
    pub cells: Vec<Cell>,
}

/// Whether the list behind a table could be loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Row>,
    pub pagination: Option<Pagination>,
    pub state: LoadState,
    /// Shown instead of rows when the list is empty
    pub empty_message: &'static str,
}

impl Table {
    pub fn new(headers: Vec<&'static str>, empty_message: &'static str) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            pagination: None,
            state: LoadState::NotLoaded,
            empty_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_cells() {
        assert_eq!(Cell::opt(None), Cell::text("-"));
        assert_eq!(Cell::opt(Some("  ")), Cell::text("-"));
        assert_eq!(Cell::opt(Some(" 영양팀 ")), Cell::text("영양팀"));
    }
}
