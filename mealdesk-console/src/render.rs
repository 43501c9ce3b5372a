//! Plain-text rendering of view models for the terminal

use shared::models::IngredientUploadResult;
use std::fmt::Write;

use crate::navigation::NavItem;
use crate::notice::{Notice, NoticeLevel};
use crate::pages::SiteStats;
use crate::site_tree::{Toggle, TreeNodeView};
use crate::view::{Cell, LoadState, Table};

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Badge(badge) => format!("[{}]", badge.label),
        Cell::Editing(value) => format!("✎ {}_", value),
    }
}

/// Columns padded to the widest value, one row per line
pub fn render_table(table: &Table) -> String {
    if let LoadState::Failed(message) = &table.state {
        return format!("목록을 불러오지 못했습니다: {}\n", message);
    }
    if table.rows.is_empty() {
        return format!("{}\n", table.empty_message);
    }

    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(cell_text).collect())
        .collect();
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (i, text) in cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(text.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = table.headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    if let Some(p) = &table.pagination {
        let _ = writeln!(out, "{} 페이지 (총 {}건)", p.label(), p.total);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let width = widths.get(i).copied().unwrap_or(0);
            let pad = width.saturating_sub(text.chars().count());
            format!("{}{}", text, " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

/// Indented tree with ▾ / ▸ / • markers
pub fn render_tree(nodes: &[TreeNodeView]) -> String {
    if nodes.is_empty() {
        return "등록된 사업장이 없습니다\n".to_string();
    }
    let mut out = String::new();
    for node in nodes {
        push_node(&mut out, node);
    }
    out
}

fn push_node(out: &mut String, node: &TreeNodeView) {
    let marker = match node.toggle {
        Toggle::Expanded => "▾",
        Toggle::Collapsed => "▸",
        Toggle::Leaf => "•",
    };
    let _ = writeln!(
        out,
        "{}{} {} {} #{} ({}) [{}]",
        "  ".repeat(node.depth),
        marker,
        node.icon,
        node.name,
        node.id,
        node.type_label,
        node.status.label
    );
    for child in &node.children {
        push_node(out, child);
    }
}

pub fn render_stats(stats: &SiteStats) -> String {
    format!(
        "전체 {} | 본사 {} | 사업장 {} | 고객사 {} | 미분류 {} | 활성 {} | 비활성 {}\n",
        stats.total,
        stats.head,
        stats.detail,
        stats.customer,
        stats.unclassified,
        stats.active,
        stats.inactive
    )
}

pub fn render_notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Success => "✔",
        NoticeLevel::Error => "✖",
    };
    format!("{} {}\n", prefix, notice.message)
}

/// Upload summary followed by the row errors
pub fn render_upload(result: &IngredientUploadResult) -> String {
    let mut out = format!(
        "{}: 전체 {}행, 성공 {} (신규 {}, 수정 {}), 오류 {}\n",
        result.file_name,
        result.total_rows,
        result.success_count,
        result.new_count,
        result.updated_count,
        result.error_count
    );
    for err in &result.errors {
        let _ = write!(out, "  {}행", err.row);
        if let Some(column) = &err.column {
            let _ = write!(out, " {}열", column);
        }
        if let Some(field) = &err.field {
            let _ = write!(out, " [{}]", field);
        }
        let _ = write!(out, ": {}", err.error);
        if let Some(value) = &err.value {
            let _ = write!(out, " (값: {})", value);
        }
        out.push('\n');
    }
    out
}

/// Navigation bar with the active page in brackets
pub fn render_nav(items: &[NavItem]) -> String {
    let titles: Vec<String> = items
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.title)
            } else {
                item.title.to_string()
            }
        })
        .collect();
    format!("{}\n", titles.join("  "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site_tree::NodeAction;
    use crate::view::{Badge, Row, Tone};
    use shared::Pagination;
    use shared::models::RowError;

    fn node(id: i64, depth: usize, toggle: Toggle, children: Vec<TreeNodeView>) -> TreeNodeView {
        TreeNodeView {
            id,
            name: format!("사업장{}", id),
            depth,
            icon: "🏬",
            type_label: "사업장".to_string(),
            status: Badge::active(true),
            toggle,
            actions: vec![NodeAction::Edit],
            children,
        }
    }

    #[test]
    fn test_table_layout() {
        let mut table = Table::new(vec!["이름", "상태"], "없음");
        table.rows = vec![Row {
            key: Some(1),
            cells: vec![Cell::text("푸드머스"), Cell::Badge(Badge::new("활성", Tone::Good))],
        }];
        table.pagination = Some(Pagination::new(1, 20, 1));
        table.state = LoadState::Loaded;

        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "이름   | 상태");
        assert_eq!(lines[2], "푸드머스 | [활성]");
        assert_eq!(lines[3], "1 / 1 페이지 (총 1건)");
    }

    #[test]
    fn test_failed_and_empty_tables() {
        let mut table = Table::new(vec!["이름"], "등록된 협력업체가 없습니다");
        assert_eq!(render_table(&table), "등록된 협력업체가 없습니다\n");
        table.state = LoadState::Failed("서버 오류".to_string());
        assert!(render_table(&table).contains("서버 오류"));
    }

    #[test]
    fn test_tree_indents_children() {
        let tree = vec![node(
            1,
            0,
            Toggle::Expanded,
            vec![node(2, 1, Toggle::Leaf, vec![]), node(3, 1, Toggle::Collapsed, vec![])],
        )];
        let text = render_tree(&tree);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("▾ 🏬 사업장1 #1"));
        assert!(lines[1].starts_with("  • "));
        assert!(lines[2].starts_with("  ▸ "));
    }

    #[test]
    fn test_upload_errors_listed() {
        let result = IngredientUploadResult {
            file_name: "식자재.csv".to_string(),
            total_rows: 2,
            success_count: 1,
            new_count: 1,
            error_count: 1,
            errors: vec![RowError {
                row: 3,
                column: Some("C".to_string()),
                field: Some("price".to_string()),
                error: "숫자가 아닙니다".to_string(),
                value: Some("abc".to_string()),
            }],
            ..IngredientUploadResult::default()
        };
        let text = render_upload(&result);
        assert!(text.contains("  3행 C열 [price]: 숫자가 아닙니다 (값: abc)"));
    }
}
