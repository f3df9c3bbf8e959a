//! Indent/Issue Request form
//!
//! - model.rs: endpoint calls
//! - view_model.rs: state signal, startup loaders, submit command
//! - view.rs / item_row.rs: Leptos components

mod item_row;
mod model;
mod view;
mod view_model;

pub use view::IssueRequestForm;
