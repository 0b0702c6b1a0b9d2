//! Plain-text rendering of a view snapshot.

use std::fmt::Write;

use chrono::DateTime;
use listview::{CheckState, PageButton, Record, SortDirection, Value, ViewSnapshot};

use crate::payroll::SELECT_COLUMN;

const GAP: &str = "  ";

fn check_box(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Indeterminate => "[-]",
        CheckState::Checked => "[x]",
    }
}

/// Display text for one cell.
pub fn cell_text(value: &Value<'_>) -> String {
    match value {
        Value::String(s) | Value::Enum(s) => s.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Timestamp(ts) => DateTime::from_timestamp_millis(ts.as_millis())
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::None => "-".to_string(),
    }
}

fn header<T>(snapshot: &ViewSnapshot<'_, T>, column: &listview::Column) -> String {
    if column.name == SELECT_COLUMN {
        return check_box(snapshot.page_check_state).to_string();
    }
    match snapshot.sort.direction_of(&column.name) {
        Some(SortDirection::Asc) => format!("{} ^", column.title()),
        Some(SortDirection::Desc) => format!("{} v", column.title()),
        None => column.title().to_string(),
    }
}

/// Renders the visible columns of the current page followed by the
/// pagination footer.
pub fn render<T: Record>(snapshot: &ViewSnapshot<'_, T>) -> String {
    let headers: Vec<String> = snapshot
        .columns
        .iter()
        .map(|column| header(snapshot, column))
        .collect();

    let rows: Vec<Vec<String>> = snapshot
        .rows
        .iter()
        .map(|row| {
            snapshot
                .columns
                .iter()
                .map(|column| {
                    if column.name == SELECT_COLUMN {
                        let state = if row.selected {
                            CheckState::Checked
                        } else {
                            CheckState::Unchecked
                        };
                        check_box(state).to_string()
                    } else {
                        cell_text(&row.record.field_value(&column.name))
                    }
                })
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    if snapshot.options.show_filters {
        out.push_str(&filter_line(snapshot));
        out.push('\n');
    }

    push_row(&mut out, &headers, &widths);
    if rows.is_empty() {
        out.push_str("No results.\n");
    }
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    if snapshot.options.show_pagination {
        out.push('\n');
        out.push_str(&footer(snapshot));
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

fn filter_line<T>(snapshot: &ViewSnapshot<'_, T>) -> String {
    let predicates = snapshot.predicates;
    let mut parts = Vec::new();

    if snapshot.options.searchable && !snapshot.search_input.is_empty() {
        parts.push(format!("search: {}", snapshot.search_input));
    }
    for (name, value) in predicates.active_filters() {
        parts.push(format!("{name}: {value}"));
    }
    if predicates.date_range.is_active() {
        parts.push(format!("date: {}", predicates.date_range.label()));
    }
    if !snapshot.sort.is_empty() {
        parts.push(format!("sort: {}", snapshot.sort));
    }

    if parts.is_empty() {
        "No filters".to_string()
    } else {
        parts.join(" | ")
    }
}

/// "Showing X to Y of Z entries", the page buttons and the selection count.
pub fn footer<T>(snapshot: &ViewSnapshot<'_, T>) -> String {
    let mut out = String::new();
    let summary = &snapshot.summary;

    let _ = writeln!(out, "{}", snapshot.showing);
    if summary.page_count > 0 {
        let buttons: Vec<String> = snapshot
            .page_buttons
            .iter()
            .map(|button| match button {
                PageButton::Page(index) if button.is_current(summary.page_index) => {
                    format!("[{}]", index + 1)
                }
                other => other.to_string(),
            })
            .collect();
        let _ = writeln!(
            out,
            "{} {} {}",
            if snapshot.can_previous_page { "<" } else { " " },
            buttons.join(" "),
            if snapshot.can_next_page { ">" } else { " " },
        );
    }
    let _ = writeln!(
        out,
        "Rows per page: {} of {:?}",
        summary.page_size, snapshot.page_sizes
    );
    if snapshot.selected_count > 0 {
        let _ = writeln!(
            out,
            "{} of {} row(s) selected",
            snapshot.selected_count, summary.total_filtered
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use listview::{Number, Timestamp};

    #[test]
    fn cell_text_formats_values() {
        assert_eq!(cell_text(&Value::String("Alice")), "Alice");
        assert_eq!(cell_text(&Value::Number(Number::U64(2500))), "2500");
        assert_eq!(
            cell_text(&Value::Timestamp(Timestamp(1_509_821_326_250))),
            "2017-11-04"
        );
        assert_eq!(cell_text(&Value::Bool(false)), "no");
        assert_eq!(cell_text(&Value::None), "-");
    }

    #[test]
    fn check_boxes() {
        assert_eq!(check_box(CheckState::Checked), "[x]");
        assert_eq!(check_box(CheckState::Indeterminate), "[-]");
        assert_eq!(check_box(CheckState::Unchecked), "[ ]");
    }
}
