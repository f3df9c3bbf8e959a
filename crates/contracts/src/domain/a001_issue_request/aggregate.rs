use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Header of an indent/issue request, shared by every line of one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInfo {
    pub store_name: String,
    pub requested_by: String,
    pub by_whom_orders: String,
    pub purpose: String,
    /// Empty when the request has no gate pass
    pub gate_pass: String,
    /// Assigned by the endpoint, read-only in the form
    pub indent_number: String,
    pub nature_of_demand: String,
    pub project_name: String,
    /// Calendar date, YYYY-MM-DD
    pub store_required_by_date: String,
}

impl HeaderInfo {
    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::StoreName => &self.store_name,
            HeaderField::RequestedBy => &self.requested_by,
            HeaderField::ByWhomOrders => &self.by_whom_orders,
            HeaderField::Purpose => &self.purpose,
            HeaderField::GatePass => &self.gate_pass,
            HeaderField::IndentNumber => &self.indent_number,
            HeaderField::NatureOfDemand => &self.nature_of_demand,
            HeaderField::ProjectName => &self.project_name,
            HeaderField::StoreRequiredByDate => &self.store_required_by_date,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: HeaderField) -> &mut String {
        match field {
            HeaderField::StoreName => &mut self.store_name,
            HeaderField::RequestedBy => &mut self.requested_by,
            HeaderField::ByWhomOrders => &mut self.by_whom_orders,
            HeaderField::Purpose => &mut self.purpose,
            HeaderField::GatePass => &mut self.gate_pass,
            HeaderField::IndentNumber => &mut self.indent_number,
            HeaderField::NatureOfDemand => &mut self.nature_of_demand,
            HeaderField::ProjectName => &mut self.project_name,
            HeaderField::StoreRequiredByDate => &mut self.store_required_by_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    StoreName,
    RequestedBy,
    ByWhomOrders,
    Purpose,
    GatePass,
    IndentNumber,
    NatureOfDemand,
    ProjectName,
    StoreRequiredByDate,
}

impl HeaderField {
    /// Wire name, used both for query-string prefill and the submitted record
    pub fn key(&self) -> &'static str {
        match self {
            HeaderField::StoreName => "storeName",
            HeaderField::RequestedBy => "requestedBy",
            HeaderField::ByWhomOrders => "byWhomOrders",
            HeaderField::Purpose => "purpose",
            HeaderField::GatePass => "gatePass",
            HeaderField::IndentNumber => "indentNumber",
            HeaderField::NatureOfDemand => "natureOfDemand",
            HeaderField::ProjectName => "projectName",
            HeaderField::StoreRequiredByDate => "storeRequiredByDate",
        }
    }
}

/// One line of the "Items Required" table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub item_name: String,
    /// Entered as text; parsed leniently when deriving stock
    pub quantity: String,
    /// Unit of measure (A/U)
    pub au: String,
    pub remarks: String,
    #[serde(serialize_with = "whole_as_integer")]
    pub current_stock: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub stock_after_purchase: f64,
}

/// Stock cells go out as `14`, not `14.0`; fractional values stay floats
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let in_range = value.abs() < i64::MAX as f64;
    if value.fract() == 0.0 && in_range {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl ItemRow {
    /// A row is submitted only when both item name and quantity are filled
    pub fn is_submittable(&self) -> bool {
        !self.item_name.is_empty() && !self.quantity.is_empty()
    }

    pub fn get(&self, field: ItemField) -> &str {
        match field {
            ItemField::ItemName => &self.item_name,
            ItemField::Quantity => &self.quantity,
            ItemField::Au => &self.au,
            ItemField::Remarks => &self.remarks,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: ItemField) -> &mut String {
        match field {
            ItemField::ItemName => &mut self.item_name,
            ItemField::Quantity => &mut self.quantity,
            ItemField::Au => &mut self.au,
            ItemField::Remarks => &mut self.remarks,
        }
    }
}

/// User-editable row fields. Stock columns are derived and have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    ItemName,
    Quantity,
    Au,
    Remarks,
}

impl ItemField {
    pub fn key(&self) -> &'static str {
        match self {
            ItemField::ItemName => "itemName",
            ItemField::Quantity => "quantity",
            ItemField::Au => "au",
            ItemField::Remarks => "remarks",
        }
    }

    /// Editing these fields re-derives the stock columns
    pub fn affects_stock(&self) -> bool {
        matches!(self, ItemField::ItemName | ItemField::Quantity)
    }
}

/// One spreadsheet row: the header repeated for every submitted item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub header: HeaderInfo,
    #[serde(flatten)]
    pub item: ItemRow,
    pub timestamp: String,
}

impl SubmissionRecord {
    pub fn new(header: HeaderInfo, item: ItemRow, captured_at: DateTime<Utc>) -> Self {
        Self {
            header,
            item,
            timestamp: format_timestamp(captured_at),
        }
    }
}

/// ISO 8601 with milliseconds and a `Z` suffix, e.g. "2024-03-15T14:02:26.123Z"
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
