//! Terminal demo for `listview`.
//!
//! Two tables share one engine: a mock payroll list with selection and
//! three filters, and a saved page of Rick and Morty characters.

pub mod character;
pub mod payroll;
pub mod request;
pub mod table;

pub use request::{render, OutputFormat, ViewRequest};
