//! Form state store for the indent/issue request.
//!
//! `IssueFormState` owns every piece of editable view state: the header, the
//! item rows, which row has its suggestion list open and the submission phase.
//! Its methods are the only mutators; the UI keeps one instance in a signal.

use super::aggregate::{HeaderField, HeaderInfo, ItemField, ItemRow};
use super::reference_data::{ItemCatalog, StockIndex};
use super::submission::SubmissionPhase;

#[derive(Debug, Clone, PartialEq)]
pub struct IssueFormState {
    pub header: HeaderInfo,
    items: Vec<ItemRow>,
    open_dropdown: Option<usize>,
    catalog: ItemCatalog,
    stock: StockIndex,
    pub(crate) phase: SubmissionPhase,
}

impl Default for IssueFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueFormState {
    pub fn new() -> Self {
        Self {
            header: HeaderInfo::default(),
            items: vec![ItemRow::default()],
            open_dropdown: None,
            catalog: ItemCatalog::default(),
            stock: StockIndex::default(),
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn items(&self) -> &[ItemRow] {
        &self.items
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Install the catalog and stock index loaded at startup.
    /// Rows typed before the data arrived are re-derived against it.
    pub fn set_reference_data(&mut self, catalog: ItemCatalog, stock: StockIndex) {
        self.catalog = catalog;
        self.stock = stock;
        for index in 0..self.items.len() {
            self.derive_stock(index);
        }
    }

    pub fn set_header_field(&mut self, field: HeaderField, value: impl Into<String>) {
        *self.header.slot_mut(field) = value.into();
    }

    /// Replace one field of row `index`. Out-of-range indices are ignored.
    pub fn set_item_field(&mut self, index: usize, field: ItemField, value: impl Into<String>) {
        let Some(row) = self.items.get_mut(index) else {
            return;
        };
        *row.slot_mut(field) = value.into();
        if field.affects_stock() {
            self.derive_stock(index);
        }
    }

    pub fn add_item_row(&mut self) {
        self.items.push(ItemRow::default());
    }

    /// Remove row `index`; the last remaining row is never removed.
    pub fn remove_item_row(&mut self, index: usize) {
        if self.items.len() <= 1 || index >= self.items.len() {
            return;
        }
        self.items.remove(index);
        self.open_dropdown = match self.open_dropdown {
            Some(open) if open == index => None,
            Some(open) if open > index => Some(open - 1),
            other => other,
        };
    }

    /// Opening one row's suggestions closes every other row's; closing closes all.
    pub fn set_dropdown_open(&mut self, index: usize, open: bool) {
        self.open_dropdown = if open && index < self.items.len() {
            Some(index)
        } else {
            None
        };
    }

    pub fn is_dropdown_open(&self, index: usize) -> bool {
        self.open_dropdown == Some(index)
    }

    /// Pick a catalog suggestion for a row and close its list
    pub fn select_suggestion(&mut self, index: usize, item_name: impl Into<String>) {
        self.set_item_field(index, ItemField::ItemName, item_name);
        self.open_dropdown = None;
    }

    /// Suggestions for row `index`, filtered by what is typed in it
    pub fn suggestions_for(&self, index: usize) -> Vec<String> {
        let query = self
            .items
            .get(index)
            .map(|row| row.item_name.as_str())
            .unwrap_or_default();
        self.catalog.suggestions(query)
    }

    /// Back to empty header and a single empty row. Reference data is kept.
    pub fn reset(&mut self) {
        self.header = HeaderInfo::default();
        self.items = vec![ItemRow::default()];
        self.open_dropdown = None;
    }

    fn derive_stock(&mut self, index: usize) {
        let Some(row) = self.items.get_mut(index) else {
            return;
        };
        let current = self.stock.stock_of(&row.item_name);
        row.current_stock = current;
        row.stock_after_purchase = current + parse_quantity(&row.quantity) as f64;
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits.
/// Anything unparseable or negative counts as zero.
pub fn parse_quantity(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if negative || digits_end == 0 {
        return 0;
    }
    rest[..digits_end].parse().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn state_with_stock() -> IssueFormState {
        let mut state = IssueFormState::new();
        let stock = HashMap::from([("Cement".to_string(), 10.0), ("Sand".to_string(), 3.0)]);
        state.set_reference_data(
            ItemCatalog::new(vec!["Cement".into(), "Sand".into()]),
            StockIndex::new(stock),
        );
        state
    }

    #[test]
    fn test_new_state_has_one_empty_row() {
        let state = IssueFormState::new();
        assert_eq!(state.items(), &[ItemRow::default()]);
        assert_eq!(state.header, HeaderInfo::default());
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_stock_follows_latest_name_and_quantity() {
        let mut state = state_with_stock();

        state.set_item_field(0, ItemField::Quantity, "4");
        assert_eq!(state.items()[0].current_stock, 0.0);
        assert_eq!(state.items()[0].stock_after_purchase, 4.0);

        state.set_item_field(0, ItemField::ItemName, "Cement");
        assert_eq!(state.items()[0].current_stock, 10.0);
        assert_eq!(state.items()[0].stock_after_purchase, 14.0);

        state.set_item_field(0, ItemField::Quantity, "abc");
        assert_eq!(state.items()[0].stock_after_purchase, 10.0);

        state.set_item_field(0, ItemField::ItemName, "Sand");
        state.set_item_field(0, ItemField::Quantity, "7");
        assert_eq!(state.items()[0].current_stock, 3.0);
        assert_eq!(state.items()[0].stock_after_purchase, 10.0);

        state.set_item_field(0, ItemField::ItemName, "Unknown");
        assert_eq!(state.items()[0].current_stock, 0.0);
        assert_eq!(state.items()[0].stock_after_purchase, 7.0);
    }

    #[test]
    fn test_other_fields_do_not_touch_stock() {
        let mut state = state_with_stock();
        state.set_item_field(0, ItemField::ItemName, "Cement");
        let before = state.items()[0].clone();
        state.set_item_field(0, ItemField::Remarks, "urgent");
        state.set_item_field(0, ItemField::Au, "bag");
        assert_eq!(state.items()[0].current_stock, before.current_stock);
        assert_eq!(state.items()[0].remarks, "urgent");
        assert_eq!(state.items()[0].au, "bag");
    }

    #[test]
    fn test_reference_data_arriving_late_rederives_rows() {
        let mut state = IssueFormState::new();
        state.set_item_field(0, ItemField::ItemName, "Cement");
        state.set_item_field(0, ItemField::Quantity, "2");
        assert_eq!(state.items()[0].stock_after_purchase, 2.0);

        let stock = HashMap::from([("Cement".to_string(), 10.0)]);
        state.set_reference_data(ItemCatalog::default(), StockIndex::new(stock));
        assert_eq!(state.items()[0].current_stock, 10.0);
        assert_eq!(state.items()[0].stock_after_purchase, 12.0);
    }

    #[test]
    fn test_set_item_field_out_of_range_is_ignored() {
        let mut state = IssueFormState::new();
        state.set_item_field(3, ItemField::ItemName, "Cement");
        assert_eq!(state.items(), &[ItemRow::default()]);
    }

    #[test]
    fn test_remove_only_row_is_noop() {
        let mut state = IssueFormState::new();
        state.set_item_field(0, ItemField::ItemName, "Cement");
        state.remove_item_row(0);
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].item_name, "Cement");
    }

    #[test]
    fn test_add_then_remove_restores_rows() {
        let mut state = state_with_stock();
        state.set_item_field(0, ItemField::ItemName, "Cement");
        state.add_item_row();
        state.set_item_field(1, ItemField::ItemName, "Sand");
        let before = state.items().to_vec();

        state.add_item_row();
        assert_eq!(state.items().len(), 3);
        state.remove_item_row(2);
        assert_eq!(state.items(), before.as_slice());
    }

    #[test]
    fn test_remove_middle_row_keeps_order() {
        let mut state = IssueFormState::new();
        state.add_item_row();
        state.add_item_row();
        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            state.set_item_field(i, ItemField::ItemName, *name);
        }
        state.remove_item_row(1);
        let names: Vec<&str> = state.items().iter().map(|r| r.item_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_dropdowns_are_mutually_exclusive() {
        let mut state = IssueFormState::new();
        state.add_item_row();
        state.add_item_row();

        state.set_dropdown_open(0, true);
        state.set_dropdown_open(2, true);
        assert!(!state.is_dropdown_open(0));
        assert!(state.is_dropdown_open(2));

        state.set_dropdown_open(1, false);
        assert_eq!(state.open_dropdown, None);

        state.set_dropdown_open(7, true);
        assert_eq!(state.open_dropdown, None);
    }

    #[test]
    fn test_removing_rows_moves_open_dropdown() {
        let mut state = IssueFormState::new();
        state.add_item_row();
        state.add_item_row();

        state.set_dropdown_open(2, true);
        state.remove_item_row(0);
        assert!(state.is_dropdown_open(1));

        state.remove_item_row(1);
        assert_eq!(state.open_dropdown, None);
    }

    #[test]
    fn test_select_suggestion_sets_name_and_closes() {
        let mut state = state_with_stock();
        state.set_item_field(0, ItemField::Quantity, "1");
        state.set_dropdown_open(0, true);
        state.set_item_field(0, ItemField::ItemName, "san");
        assert_eq!(state.suggestions_for(0), vec!["Sand"]);

        state.select_suggestion(0, "Sand");
        assert_eq!(state.items()[0].item_name, "Sand");
        assert_eq!(state.items()[0].stock_after_purchase, 4.0);
        assert_eq!(state.open_dropdown, None);
    }

    #[test]
    fn test_reset_keeps_reference_data() {
        let mut state = state_with_stock();
        state.set_header_field(HeaderField::StoreName, "Garden");
        state.set_header_field(HeaderField::IndentNumber, "I-042");
        state.add_item_row();
        state.set_item_field(1, ItemField::ItemName, "Cement");

        state.reset();
        assert_eq!(state.header, HeaderInfo::default());
        assert_eq!(state.items(), &[ItemRow::default()]);
        assert_eq!(state.catalog.len(), 2);
        assert_eq!(state.stock.stock_of("Cement"), 10.0);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), 5);
        assert_eq!(parse_quantity("  12 bags"), 12);
        assert_eq!(parse_quantity("+3"), 3);
        assert_eq!(parse_quantity("-3"), 0);
        assert_eq!(parse_quantity("2.9"), 2);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("x1"), 0);
    }
}
