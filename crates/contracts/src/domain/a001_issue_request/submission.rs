//! Submission pipeline: validation, flattening into spreadsheet records and
//! the Idle/Submitting state machine.

use super::aggregate::SubmissionRecord;
use super::form_state::IssueFormState;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Form field name the endpoint reads the JSON batch from
pub const SUBMISSION_FIELD: &str = "submissionData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    Busy,
    #[error("Please fill in all required fields including at least one item")]
    MissingRequiredFields,
}

/// Result of handing the batch to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Failed(String),
}

/// Records sent in a single request, one per filled item row
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionBatch {
    pub records: Vec<SubmissionRecord>,
}

impl SubmissionBatch {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }

    /// `application/x-www-form-urlencoded` body carrying the JSON batch
    pub fn to_form_body(&self) -> serde_json::Result<String> {
        let json = self.to_json()?;
        Ok(format!("{}={}", SUBMISSION_FIELD, urlencoding::encode(&json)))
    }
}

impl IssueFormState {
    /// Presence checks only: store, required-by date and one filled item row
    pub fn validate(&self) -> Result<(), SubmitError> {
        let has_item = self.items().iter().any(|row| row.is_submittable());
        if self.header.store_name.is_empty()
            || self.header.store_required_by_date.is_empty()
            || !has_item
        {
            return Err(SubmitError::MissingRequiredFields);
        }
        Ok(())
    }

    /// One record per filled row; rows missing name or quantity are dropped
    pub fn build_batch(&self, captured_at: DateTime<Utc>) -> SubmissionBatch {
        let records = self
            .items()
            .iter()
            .filter(|row| row.is_submittable())
            .map(|row| SubmissionRecord::new(self.header.clone(), row.clone(), captured_at))
            .collect();
        SubmissionBatch { records }
    }

    /// Idle -> Submitting. On error nothing changes.
    pub fn begin_submit(&mut self, captured_at: DateTime<Utc>) -> Result<SubmissionBatch, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::Busy);
        }
        self.validate()?;
        self.phase = SubmissionPhase::Submitting;
        Ok(self.build_batch(captured_at))
    }

    /// Submitting -> Idle. A delivered batch clears the form; a failed one
    /// keeps everything so the user can retry.
    pub fn finish_submit(&mut self, outcome: &DispatchOutcome) {
        if !self.is_submitting() {
            return;
        }
        self.phase = SubmissionPhase::Idle;
        if *outcome == DispatchOutcome::Delivered {
            self.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_issue_request::aggregate::{HeaderField, HeaderInfo, ItemField, ItemRow};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()
    }

    fn filled_state() -> IssueFormState {
        let mut state = IssueFormState::new();
        state.set_header_field(HeaderField::StoreName, "Garden");
        state.set_header_field(HeaderField::StoreRequiredByDate, "2024-01-01");
        state.set_item_field(0, ItemField::ItemName, "A");
        state.set_item_field(0, ItemField::Quantity, "2");
        state
    }

    #[test]
    fn test_rejects_missing_store() {
        let mut state = filled_state();
        state.set_header_field(HeaderField::StoreName, "");
        let before = state.clone();
        assert_eq!(state.begin_submit(now()), Err(SubmitError::MissingRequiredFields));
        assert_eq!(state, before);
    }

    #[test]
    fn test_rejects_missing_date() {
        let mut state = filled_state();
        state.set_header_field(HeaderField::StoreRequiredByDate, "");
        let before = state.clone();
        assert_eq!(state.begin_submit(now()), Err(SubmitError::MissingRequiredFields));
        assert_eq!(state, before);
    }

    #[test]
    fn test_rejects_when_no_row_is_complete() {
        let mut state = filled_state();
        state.set_item_field(0, ItemField::Quantity, "");
        state.add_item_row();
        state.set_item_field(1, ItemField::Quantity, "5");
        let before = state.clone();
        assert_eq!(state.begin_submit(now()), Err(SubmitError::MissingRequiredFields));
        assert_eq!(state, before);
        assert_eq!(state.phase, SubmissionPhase::Idle);
    }

    #[test]
    fn test_batch_drops_incomplete_rows() {
        let mut state = filled_state();
        state.add_item_row();
        state.set_item_field(1, ItemField::Quantity, "5");
        state.add_item_row();
        state.set_item_field(2, ItemField::ItemName, "B");
        state.set_item_field(2, ItemField::Quantity, "3");

        let batch = state.begin_submit(now()).unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].item.item_name, "A");
        assert_eq!(batch.records[1].item.item_name, "B");
        for record in &batch.records {
            assert_eq!(record.header, state.header);
            assert_eq!(record.header.store_name, "Garden");
            assert_eq!(record.header.store_required_by_date, "2024-01-01");
            assert_eq!(record.timestamp, "2024-01-01T09:30:00.000Z");
        }
        assert!(state.is_submitting());
    }

    #[test]
    fn test_duplicate_item_names_are_kept_separate() {
        let mut state = filled_state();
        state.add_item_row();
        state.set_item_field(1, ItemField::ItemName, "A");
        state.set_item_field(1, ItemField::Quantity, "1");
        assert_eq!(state.build_batch(now()).records.len(), 2);
    }

    #[test]
    fn test_second_submit_while_submitting_is_rejected() {
        let mut state = filled_state();
        state.begin_submit(now()).unwrap();
        let before = state.clone();
        assert_eq!(state.begin_submit(now()), Err(SubmitError::Busy));
        assert_eq!(state, before);
    }

    #[test]
    fn test_delivered_submission_resets_form() {
        let mut state = filled_state();
        state.set_header_field(HeaderField::IndentNumber, "I-007");
        state.add_item_row();
        state.begin_submit(now()).unwrap();

        state.finish_submit(&DispatchOutcome::Delivered);
        assert_eq!(state.phase, SubmissionPhase::Idle);
        assert_eq!(state.header, HeaderInfo::default());
        assert_eq!(state.header.indent_number, "");
        assert_eq!(state.items(), &[ItemRow::default()]);
    }

    #[test]
    fn test_failed_submission_keeps_data() {
        let mut state = filled_state();
        state.begin_submit(now()).unwrap();
        state.finish_submit(&DispatchOutcome::Failed("offline".into()));
        assert_eq!(state.phase, SubmissionPhase::Idle);
        assert_eq!(state.header.store_name, "Garden");
        assert_eq!(state.items()[0].item_name, "A");
    }

    #[test]
    fn test_finish_without_begin_is_ignored() {
        let mut state = filled_state();
        state.finish_submit(&DispatchOutcome::Delivered);
        assert_eq!(state.header.store_name, "Garden");
    }

    #[test]
    fn test_form_body_encodes_json_array() {
        let state = filled_state();
        let body = state.build_batch(now()).to_form_body().unwrap();
        assert!(body.starts_with("submissionData=%5B%7B"));
        let encoded = body.trim_start_matches("submissionData=");
        let json = urlencoding::decode(encoded).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["itemName"], "A");
        assert_eq!(value[0]["storeName"], "Garden");
    }
}
