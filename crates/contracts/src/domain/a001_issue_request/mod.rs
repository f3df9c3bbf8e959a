//! Indent/Issue Request: header + item rows submitted to the store spreadsheet.

pub mod aggregate;
pub mod form_state;
pub mod prefill;
pub mod reference_data;
pub mod submission;
