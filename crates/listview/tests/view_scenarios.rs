//! End-to-end scenarios for the view controller, driven through a manual
//! clock the way an event loop would drive it.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone};
use listview::{
    CheckState, Column, DateRange, FilterValue, ManualClock, PageButton, Record, RecordEnum,
    RecordKey, SortKey, ViewConfig, ViewController, ViewError,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Pending,
    Received,
}

impl RecordEnum for Status {
    fn label(&self) -> &str {
        match self {
            Status::Pending => "pending",
            Status::Received => "received",
        }
    }
}

#[derive(Debug, Clone, Record)]
struct Payroll {
    #[record(String, key)]
    payroll_id: String,
    #[record(String)]
    employee_name: String,
    #[record(Number)]
    total_amount: u32,
    #[record(Enum)]
    status: Status,
    #[record(Timestamp)]
    processed_at: Option<i64>,
}

fn payroll(n: usize, name: &str, status: Status) -> Payroll {
    Payroll {
        payroll_id: format!("PR-{n:03}"),
        employee_name: name.to_string(),
        total_amount: 1000 + n as u32 * 10,
        status,
        processed_at: None,
    }
}

fn config() -> ViewConfig {
    ViewConfig::new([
        Column::new("select").unsortable().always_visible(),
        Column::new(Payroll::PAYROLL_ID).label("Payroll ID"),
        Column::new(Payroll::EMPLOYEE_NAME).label("Employee"),
        Column::new(Payroll::TOTAL_AMOUNT).label("Total"),
        Column::new(Payroll::STATUS).label("Status"),
        Column::new(Payroll::PROCESSED_AT).hidden(),
    ])
    .with_searchable([Payroll::PAYROLL_ID, Payroll::EMPLOYEE_NAME])
    .with_timestamp_field(Payroll::PROCESSED_AT)
    .with_categorical([Payroll::STATUS])
}

fn noon() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .unwrap()
}

fn twelve_payrolls() -> Vec<Payroll> {
    (0..12)
        .map(|i| {
            let status = if i < 5 {
                Status::Pending
            } else {
                Status::Received
            };
            payroll(i, &format!("Employee {i}"), status)
        })
        .collect()
}

fn controller(records: Vec<Payroll>) -> (ViewController<Payroll, ManualClock>, ManualClock) {
    let clock = ManualClock::at(noon());
    let view = ViewController::with_clock(records, config(), clock.clone()).unwrap();
    (view, clock)
}

#[test]
fn status_filter_resets_to_single_page() {
    let (mut view, _) = controller(twelve_payrolls());
    view.next_page();
    assert_eq!(view.summary().page_index, 1);

    view.set_categorical_filter(Payroll::STATUS, FilterValue::only("pending"))
        .unwrap();

    let snapshot = view.view();
    assert_eq!(snapshot.rows.len(), 5);
    assert_eq!(snapshot.summary.page_count, 1);
    assert_eq!(snapshot.summary.page_index, 0);
    assert!(snapshot
        .records()
        .all(|p| p.status == Status::Pending));
}

#[test]
fn search_matches_name_case_insensitively() {
    let (mut view, clock) = controller(vec![
        payroll(1, "Alice", Status::Pending),
        payroll(2, "Bob", Status::Received),
    ]);

    view.set_search_text("ali");
    assert_eq!(view.filtered_len(), 2);

    clock.advance(Duration::from_millis(500));
    assert!(view.poll());

    let names: Vec<&str> = view
        .filtered()
        .iter()
        .map(|p| p.employee_name.as_str())
        .collect();
    assert_eq!(names, vec!["Alice"]);
    assert_eq!(view.query_string(), "?search=ali");
}

#[test]
fn search_matches_payroll_id() {
    let (mut view, _) = controller(twelve_payrolls());
    view.set_search_text("pr-01");
    view.flush_search();

    assert_eq!(view.filtered_len(), 2);
}

#[test]
fn today_excludes_missing_timestamps() {
    let mut records = vec![
        payroll(1, "Alice", Status::Pending),
        payroll(2, "Bob", Status::Pending),
    ];
    records[1].processed_at = Some(noon().timestamp_millis() - 60_000);

    let (mut view, _) = controller(records);
    view.set_date_range(DateRange::Today).unwrap();

    let ids: Vec<&str> = view.filtered().iter().map(|p| p.payroll_id.as_str()).collect();
    assert_eq!(ids, vec!["PR-002"]);
}

#[test]
fn yesterday_window_tracks_the_clock() {
    let mut records = vec![payroll(1, "Alice", Status::Pending)];
    records[0].processed_at = Some(noon().timestamp_millis() - 60_000);

    let (mut view, clock) = controller(records);
    view.set_date_range(DateRange::Yesterday).unwrap();
    assert_eq!(view.filtered_len(), 0);

    clock.advance(Duration::from_secs(24 * 60 * 60));
    view.refresh();
    assert_eq!(view.filtered_len(), 1);
}

#[test]
fn page_size_change_out_of_range_resets_page() {
    let records: Vec<Payroll> = (0..18)
        .map(|i| payroll(i, "Employee", Status::Received))
        .collect();
    let (mut view, _) = controller(records);

    view.set_page_size(5).unwrap();
    view.set_page_index(3);
    assert_eq!(view.summary().page_index, 3);

    view.set_page_size(20).unwrap();
    assert_eq!(view.summary().page_index, 0);
    assert_eq!(view.summary().page_count, 1);
}

#[test]
fn page_size_outside_allowed_set_fails() {
    let (mut view, _) = controller(twelve_payrolls());
    match view.set_page_size(15) {
        Err(ViewError::PageSizeNotAllowed { requested, allowed }) => {
            assert_eq!(requested, 15);
            assert_eq!(allowed, vec![5, 8, 10, 20, 50]);
        }
        other => panic!("expected PageSizeNotAllowed, got {other:?}"),
    }
}

#[test]
fn debounce_coalesces_keystrokes() {
    let (mut view, clock) = controller(twelve_payrolls());
    let mut commits = 0;

    for prefix in ["E", "Em", "Emp", "Employee", "Employee 1"] {
        view.set_search_text(prefix);
        clock.advance(Duration::from_millis(120));
        if view.poll() {
            commits += 1;
        }
    }
    clock.advance(Duration::from_millis(500));
    if view.poll() {
        commits += 1;
    }

    assert_eq!(commits, 1);
    assert_eq!(view.search_text(), "Employee 1");
    // Employee 1, Employee 10, Employee 11
    assert_eq!(view.filtered_len(), 3);
}

#[test]
fn url_round_trip() {
    let (view, _) = controller(twelve_payrolls());
    let mut view = view.with_query_string("tab=payroll&search=Employee+1");
    assert_eq!(view.filtered_len(), 3);

    view.clear_all_filters();
    assert_eq!(view.query_string(), "?tab=payroll");
    assert_eq!(view.filtered_len(), 12);
}

#[test]
fn sort_by_amount_descending() {
    let (mut view, _) = controller(twelve_payrolls());
    view.set_sort(Payroll::TOTAL_AMOUNT).unwrap();
    view.set_sort(Payroll::TOTAL_AMOUNT).unwrap();

    assert_eq!(view.sort_spec().keys(), &[SortKey::desc("total_amount")]);
    assert_eq!(view.view().rows[0].record.payroll_id, "PR-011");
}

#[test]
fn select_all_touches_current_page_only() {
    let (mut view, _) = controller(twelve_payrolls());

    view.toggle_select_all_on_page();
    assert_eq!(view.selected_count(), 8);
    assert_eq!(view.page_check_state(), CheckState::Checked);

    view.next_page();
    assert_eq!(view.page_check_state(), CheckState::Unchecked);
    view.toggle_selection(&RecordKey::from("PR-010")).unwrap();
    assert_eq!(view.view().page_check_state, CheckState::Indeterminate);

    let snapshot = view.view();
    let selected: Vec<bool> = snapshot.rows.iter().map(|r| r.selected).collect();
    assert_eq!(selected, vec![false, false, true, false]);
}

#[test]
fn pagination_bar() {
    let records: Vec<Payroll> = (0..100)
        .map(|i| payroll(i, "Employee", Status::Received))
        .collect();
    let (mut view, _) = controller(records);
    view.set_page_size(10).unwrap();
    view.set_page_index(4);

    let snapshot = view.view();
    assert_eq!(
        snapshot.page_buttons,
        vec![
            PageButton::Page(0),
            PageButton::Page(1),
            PageButton::Page(2),
            PageButton::Page(3),
            PageButton::Page(4),
            PageButton::Ellipsis,
            PageButton::Page(9),
        ]
    );
    assert!(snapshot.page_buttons[4].is_current(4));
    assert_eq!(
        snapshot.showing.to_string(),
        "Showing 41 to 50 of 100 entries"
    );
}

#[test]
fn empty_view() {
    let (mut view, _) = controller(twelve_payrolls());
    view.set_search_text("nobody");
    view.flush_search();

    let snapshot = view.view();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.summary.page_count, 0);
    assert!(!snapshot.can_next_page);
    assert!(!snapshot.can_previous_page);
    assert_eq!(snapshot.page_check_state, CheckState::Unchecked);
    assert_eq!(snapshot.showing.to_string(), "Showing 0 to 0 of 0 entries");
}
