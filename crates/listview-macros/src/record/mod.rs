//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates the field accessor, record key and field-name constants from
//! struct annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
