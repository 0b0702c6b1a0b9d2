//! Proc macros for listview.
//!
//! - [`Record`] - Derive the `Record` trait and field-name constants
//!
//! Use the re-export from the `listview` crate rather than depending on this
//! crate directly; the generated code refers to `::listview` paths.
//!
//! # Examples
//!
//! See `listview/tests/record_derive.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `listview::Record` for a struct with named fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Text field (`String`, `&str`, or `Option` of either). Searchable. |
/// | `Number` | Any primitive number. Searchable as rendered text. |
/// | `Timestamp` | Field implementing `RecordTimestamp` (`i64` millis, `DateTime`, `Option`). |
/// | `Enum` | Field implementing `RecordEnum`; filters compare its label. |
/// | `Bool` | Boolean field |
/// | `key` | Record identity, rendered with `ToString`. Exactly one field. |
/// | `skip` | Do not expose this field |
/// | `rename = "..."` | Column name to use instead of the field name |
/// | `kind = "..."` | Field kind as a string, e.g. `kind = "enum"` |
///
/// Fields without a kind are not exposed. A `key` field without a kind
/// provides identity only.
///
/// # Generated Code
///
/// 1. One constant per exposed field (`Payroll::STATUS == "status"`)
/// 2. `Record::field_value()` matching column names to values
/// 3. `Record::key()`
///
/// # Example
///
/// ```ignore
/// use listview::{Record, RecordEnum};
///
/// #[derive(Clone, Copy)]
/// enum PaymentMethod { BankTransfer, DirectDeposit }
///
/// impl RecordEnum for PaymentMethod {
///     fn label(&self) -> &str {
///         match self {
///             PaymentMethod::BankTransfer => "Bank Transfer",
///             PaymentMethod::DirectDeposit => "Direct Deposit",
///         }
///     }
/// }
///
/// #[derive(Record)]
/// struct Payroll {
///     #[record(String, key)]
///     payroll_id: String,
///
///     #[record(Number)]
///     total_amount: u32,
///
///     #[record(Enum)]
///     payment_method: PaymentMethod,
///
///     #[record(Timestamp)]
///     processed_at: Option<i64>,
///
///     #[record(skip)]
///     notes: String,
/// }
///
/// assert_eq!(Payroll::PAYMENT_METHOD, "payment_method");
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
