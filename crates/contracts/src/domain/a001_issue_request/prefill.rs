//! Query-string prefill, e.g. `?storeName=Garden&itemName=Cement&quantity=5`.
//!
//! Header keys fill the header, item keys fill the first row only.

use super::aggregate::{HeaderField, ItemField};
use super::form_state::IssueFormState;
use std::collections::HashMap;

/// Header fields accepted from the query string. `byWhomOrders` is not one of them.
const HEADER_KEYS: [HeaderField; 8] = [
    HeaderField::StoreName,
    HeaderField::RequestedBy,
    HeaderField::Purpose,
    HeaderField::GatePass,
    HeaderField::IndentNumber,
    HeaderField::NatureOfDemand,
    HeaderField::ProjectName,
    HeaderField::StoreRequiredByDate,
];

const ITEM_KEYS: [ItemField; 4] = [
    ItemField::ItemName,
    ItemField::Quantity,
    ItemField::Au,
    ItemField::Remarks,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPrefill {
    pub header: Vec<(HeaderField, String)>,
    pub first_item: Vec<(ItemField, String)>,
}

impl QueryPrefill {
    /// Parse `location.search` (leading `?` optional) as flat
    /// `application/x-www-form-urlencoded` pairs. The first value of a repeated
    /// key wins; bracketed or otherwise unrecognized keys are simply not read.
    pub fn parse(search: &str) -> Self {
        let mut params: HashMap<String, String> = HashMap::new();
        for (key, value) in form_pairs(search.trim_start_matches('?')) {
            params.entry(key).or_insert(value);
        }
        Self::from_params(&params)
    }

    /// Keep recognized, non-empty keys; everything else is ignored
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let value_of = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

        let header = HEADER_KEYS
            .iter()
            .filter_map(|field| value_of(field.key()).map(|v| (*field, v)))
            .collect();
        let first_item = ITEM_KEYS
            .iter()
            .filter_map(|field| value_of(field.key()).map(|v| (*field, v)))
            .collect();

        Self { header, first_item }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.first_item.is_empty()
    }

    pub fn apply_to(&self, state: &mut IssueFormState) {
        for (field, value) in &self.header {
            state.set_header_field(*field, value.clone());
        }
        for (field, value) in &self.first_item {
            state.set_item_field(0, *field, value.clone());
        }
    }
}

/// Split a query into decoded `(key, value)` pairs in order of appearance
fn form_pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
}

/// `+` is a space in form encoding; invalid UTF-8 becomes U+FFFD like the browser does
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_issue_request::aggregate::HeaderInfo;

    #[test]
    fn test_prefills_store_and_first_row_quantity() {
        let prefill = QueryPrefill::parse("?storeName=Garden&quantity=5");
        let mut state = IssueFormState::new();
        prefill.apply_to(&mut state);

        assert_eq!(state.header.store_name, "Garden");
        assert_eq!(state.items()[0].quantity, "5");
        assert_eq!(state.items()[0].stock_after_purchase, 5.0);
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let prefill =
            QueryPrefill::parse("projectName=Tower%20B&itemName=White+Cement&storeName=ONE%20AMG");
        let mut state = IssueFormState::new();
        prefill.apply_to(&mut state);

        assert_eq!(state.header.project_name, "Tower B");
        assert_eq!(state.header.store_name, "ONE AMG");
        assert_eq!(state.items()[0].item_name, "White Cement");
    }

    #[test]
    fn test_unknown_and_empty_keys_are_ignored() {
        let prefill = QueryPrefill::parse("?foo=bar&purpose=&byWhomOrders=Boss&StoreName=Garden");
        assert!(prefill.is_empty());

        let mut state = IssueFormState::new();
        prefill.apply_to(&mut state);
        assert_eq!(state.header, HeaderInfo::default());
    }

    #[test]
    fn test_empty_query() {
        assert!(QueryPrefill::parse("").is_empty());
        assert!(QueryPrefill::parse("?").is_empty());
        assert!(QueryPrefill::parse("?&&").is_empty());
    }

    #[test]
    fn test_all_item_keys_target_first_row() {
        let prefill = QueryPrefill::parse("itemName=Sand&quantity=2&au=kg&remarks=asap");
        let mut state = IssueFormState::new();
        state.add_item_row();
        prefill.apply_to(&mut state);

        let row = &state.items()[0];
        assert_eq!((row.item_name.as_str(), row.quantity.as_str()), ("Sand", "2"));
        assert_eq!((row.au.as_str(), row.remarks.as_str()), ("kg", "asap"));
        assert_eq!(state.items()[1].item_name, "");
    }

    #[test]
    fn test_repeated_unrelated_key_keeps_prefill() {
        let prefill = QueryPrefill::parse("?utm=a&utm=b&storeName=Garden");
        assert_eq!(prefill.header, vec![(HeaderField::StoreName, "Garden".to_string())]);
    }

    #[test]
    fn test_bracketed_unrelated_key_keeps_prefill() {
        let prefill = QueryPrefill::parse("?filter[x]=1&filter%5By%5D=2&storeName=Garden&quantity=3");
        assert_eq!(prefill.header, vec![(HeaderField::StoreName, "Garden".to_string())]);
        assert_eq!(prefill.first_item, vec![(ItemField::Quantity, "3".to_string())]);
    }

    #[test]
    fn test_repeated_recognized_key_takes_first_value() {
        let prefill = QueryPrefill::parse("?itemName=Sand&itemName=Cement&storeName=Garden&storeName=Palm%20Walk");
        assert_eq!(prefill.header, vec![(HeaderField::StoreName, "Garden".to_string())]);
        assert_eq!(prefill.first_item, vec![(ItemField::ItemName, "Sand".to_string())]);
    }

    #[test]
    fn test_malformed_escapes_do_not_drop_other_keys() {
        let prefill = QueryPrefill::parse("?remarks=100%&junk=%ZZ&storeName=Garden");
        assert_eq!(prefill.header, vec![(HeaderField::StoreName, "Garden".to_string())]);
        assert_eq!(prefill.first_item, vec![(ItemField::Remarks, "100%".to_string())]);
    }
}
