//! Mock payroll records and the table configuration that shows them.

use chrono::{DateTime, Duration, FixedOffset};
use listview::{Column, Record, RecordEnum, ViewConfig};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    Received,
    Pending,
    Processed,
    Failed,
}

impl PayrollStatus {
    pub const ALL: [PayrollStatus; 4] = [
        PayrollStatus::Received,
        PayrollStatus::Pending,
        PayrollStatus::Processed,
        PayrollStatus::Failed,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PayrollStatus::Received => "Received",
            PayrollStatus::Pending => "Pending",
            PayrollStatus::Processed => "Processed",
            PayrollStatus::Failed => "Failed",
        }
    }
}

impl RecordEnum for PayrollStatus {
    fn label(&self) -> &str {
        match self {
            PayrollStatus::Received => "received",
            PayrollStatus::Pending => "pending",
            PayrollStatus::Processed => "processed",
            PayrollStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentMethod {
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Direct Deposit")]
    DirectDeposit,
    #[serde(rename = "Wire Transfer")]
    WireTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::BankTransfer,
        PaymentMethod::DirectDeposit,
        PaymentMethod::WireTransfer,
    ];
}

impl RecordEnum for PaymentMethod {
    fn label(&self) -> &str {
        match self {
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::DirectDeposit => "Direct Deposit",
            PaymentMethod::WireTransfer => "Wire Transfer",
        }
    }
}

#[derive(Debug, Clone, Serialize, Record)]
pub struct Payroll {
    #[record(String, key)]
    pub payroll_id: String,

    #[record(Number)]
    pub total_amount: u32,

    #[record(String)]
    pub employee_name: String,

    #[record(String)]
    pub pay_period: String,

    #[record(Enum)]
    pub payment_method: PaymentMethod,

    #[record(String)]
    pub processed_date: Option<String>,

    #[record(Timestamp)]
    pub processed_timestamp: Option<i64>,

    #[record(Enum)]
    pub status: PayrollStatus,
}

/// Column holding the row checkboxes.
pub const SELECT_COLUMN: &str = "select";

/// Table layout for payrolls: search by id or employee, filter by status,
/// payment method and processing date.
pub fn config() -> ViewConfig {
    ViewConfig::new([
        Column::new(SELECT_COLUMN).unsortable().always_visible(),
        Column::new(Payroll::PAYROLL_ID).label("Payroll ID"),
        Column::new(Payroll::TOTAL_AMOUNT).label("Total Amount"),
        Column::new(Payroll::EMPLOYEE_NAME).label("Employee"),
        Column::new(Payroll::PAY_PERIOD).label("Pay Period"),
        Column::new(Payroll::PAYMENT_METHOD).label("Payment Method"),
        Column::new(Payroll::PROCESSED_DATE).label("Processed Date"),
        Column::new(Payroll::PROCESSED_TIMESTAMP).hidden(),
        Column::new(Payroll::STATUS).label("Status"),
    ])
    .with_searchable([Payroll::PAYROLL_ID, Payroll::EMPLOYEE_NAME])
    .with_categorical([Payroll::STATUS, Payroll::PAYMENT_METHOD])
    .with_timestamp_field(Payroll::PROCESSED_TIMESTAMP)
}

const EMPLOYEES: [&str; 12] = [
    "Alice Johnson",
    "Bob Smith",
    "Carla Mendes",
    "David Kim",
    "Elena Petrova",
    "Farid Haddad",
    "Grace Liu",
    "Hiro Tanaka",
    "Isabel Costa",
    "Jamal Wright",
    "Kofi Mensah",
    "Lena Fischer",
];

/// Deterministic mock data anchored at `now`.
///
/// Pending payrolls have no processing date. The rest are spread over the
/// last six weeks so every date range has something to show.
pub fn mock_payrolls(count: usize, now: DateTime<FixedOffset>) -> Vec<Payroll> {
    (0..count)
        .map(|i| {
            let status = PayrollStatus::ALL[(i * 7 + i / 3) % PayrollStatus::ALL.len()];
            let processed = match status {
                PayrollStatus::Pending => None,
                _ => Some(now - Duration::hours((i as i64 * 29) % (42 * 24))),
            };
            let period_end = processed.unwrap_or(now);
            let period_start = period_end - Duration::days(14);

            Payroll {
                payroll_id: format!("PAY-{:04}", 1001 + i),
                total_amount: 2_500 + ((i as u32 * 137) % 4_000),
                employee_name: EMPLOYEES[i % EMPLOYEES.len()].to_string(),
                pay_period: format!(
                    "{} - {}",
                    period_start.format("%b %d"),
                    period_end.format("%b %d, %Y")
                ),
                payment_method: PaymentMethod::ALL[i % PaymentMethod::ALL.len()],
                processed_date: processed.map(|at| at.format("%b %d, %Y").to_string()),
                processed_timestamp: processed.map(|at| at.timestamp_millis()),
                status,
            }
        })
        .collect()
}
