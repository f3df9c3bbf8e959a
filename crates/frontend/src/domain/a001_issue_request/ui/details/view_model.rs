//! ViewModel for the Indent/Issue Request form
//!
//! Holds the whole form in one `IssueFormState` signal and exposes the
//! startup loaders and the submit command. All mutations go through the
//! state's own methods.

use super::model;
use crate::shared::config::AppConfig;
use crate::shared::notification::NotificationService;
use chrono::Utc;
use contracts::domain::a001_issue_request::aggregate::{HeaderField, ItemField, ItemRow};
use contracts::domain::a001_issue_request::form_state::IssueFormState;
use contracts::domain::a001_issue_request::prefill::QueryPrefill;
use contracts::domain::a001_issue_request::reference_data::{ItemCatalog, StockIndex};
use contracts::domain::a001_issue_request::submission::DispatchOutcome;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct IssueRequestVm {
    pub form: RwSignal<IssueFormState>,
    config: StoredValue<AppConfig>,
    notifications: NotificationService,
}

impl IssueRequestVm {
    pub fn new(config: AppConfig, notifications: NotificationService) -> Self {
        Self {
            form: RwSignal::new(IssueFormState::new()),
            config: StoredValue::new(config),
            notifications,
        }
    }

    /// Prefill synchronously, then start both remote loads side by side
    pub fn init(&self) {
        self.apply_prefill();
        self.load_reference_data();
        self.generate_indent_number();
    }

    fn endpoint(&self) -> String {
        self.config.with_value(|c| c.endpoint.base_url.clone())
    }

    // === Startup ===

    pub fn apply_prefill(&self) {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();

        let prefill = QueryPrefill::parse(&search);
        if prefill.is_empty() {
            return;
        }
        log::debug!(
            "Prefilling {} header and {} item fields from query string",
            prefill.header.len(),
            prefill.first_item.len()
        );
        self.form.update(|state| prefill.apply_to(state));
    }

    /// Master data first; on any failure fall back to the bare item list
    pub fn load_reference_data(&self) {
        let form = self.form;
        let url = self.endpoint();
        spawn_local(async move {
            match model::fetch_master_data(&url).await {
                Ok(data) => {
                    let (catalog, stock) = data.into_parts();
                    if catalog.is_empty() || stock.is_empty() {
                        log::warn!("Master data is incomplete, suggestions or stock may be missing");
                    }
                    log::info!(
                        "Loaded master data: {} items, {} stock entries",
                        catalog.len(),
                        stock.len()
                    );
                    form.update(|state| state.set_reference_data(catalog, stock));
                }
                Err(e) => {
                    log::warn!("Could not load master data: {}", e);
                    match model::fetch_item_names(&url).await {
                        Ok(names) => {
                            log::info!("Loaded {} item names without stock", names.len());
                            form.update(|state| {
                                state.set_reference_data(ItemCatalog::new(names), StockIndex::default())
                            });
                        }
                        Err(e) => log::warn!("Could not load item names: {}", e),
                    }
                }
            }
        });
    }

    pub fn generate_indent_number(&self) {
        let form = self.form;
        let url = self.endpoint();
        let fallback = self.config.with_value(|c| c.indent.fallback_number.clone());
        spawn_local(async move {
            let number = match model::fetch_next_indent_number(&url).await {
                Ok(number) => number,
                Err(e) => {
                    log::warn!("Could not generate indent number, using {}: {}", fallback, e);
                    fallback
                }
            };
            form.update(|state| state.set_header_field(HeaderField::IndentNumber, number));
        });
    }

    // === Field access ===

    pub fn header_value(&self, field: HeaderField) -> Signal<String> {
        let form = self.form;
        Signal::derive(move || form.with(|state| state.header.get(field).to_string()))
    }

    pub fn set_header(&self, field: HeaderField, value: String) {
        self.form.update(|state| state.set_header_field(field, value));
    }

    pub fn row(&self, index: usize) -> Signal<Option<ItemRow>> {
        let form = self.form;
        Signal::derive(move || form.with(|state| state.items().get(index).cloned()))
    }

    pub fn set_item(&self, index: usize, field: ItemField, value: String) {
        self.form.update(|state| state.set_item_field(index, field, value));
    }

    pub fn row_count(&self) -> Signal<usize> {
        let form = self.form;
        Signal::derive(move || form.with(|state| state.items().len()))
    }

    pub fn add_row(&self) {
        self.form.update(|state| state.add_item_row());
    }

    pub fn remove_row(&self, index: usize) {
        self.form.update(|state| state.remove_item_row(index));
    }

    // === Suggestions ===

    pub fn is_dropdown_open(&self, index: usize) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|state| state.is_dropdown_open(index)))
    }

    pub fn set_dropdown_open(&self, index: usize, open: bool) {
        // Skip no-op writes so focus/blur churn does not re-render every row
        if self.form.with_untracked(|state| state.is_dropdown_open(index)) == open {
            return;
        }
        self.form.update(|state| state.set_dropdown_open(index, open));
    }

    pub fn suggestions(&self, index: usize) -> Signal<Vec<String>> {
        let form = self.form;
        Signal::derive(move || form.with(|state| state.suggestions_for(index)))
    }

    pub fn select_suggestion(&self, index: usize, item_name: String) {
        self.form.update(|state| state.select_suggestion(index, item_name));
    }

    // === Submission ===

    pub fn is_submitting(&self) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|state| state.is_submitting()))
    }

    /// Validate, send the batch, then after the settle delay reset the form.
    /// A transport error keeps the entered data and re-enables the form.
    pub fn submit(&self) {
        let notifications = self.notifications;
        let batch = match self.form.try_update(|state| state.begin_submit(Utc::now())) {
            Some(Ok(batch)) => batch,
            Some(Err(e)) => {
                notifications.error("Validation Error", e.to_string());
                return;
            }
            None => return,
        };

        let form = self.form;
        let body = match batch.to_form_body() {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Could not encode submission: {}", e);
                form.update(|state| state.finish_submit(&DispatchOutcome::Failed(e.to_string())));
                notifications.error("Submission Failed", "The request could not be prepared.");
                return;
            }
        };

        let url = self.endpoint();
        let settle_delay_ms = self.config.with_value(|c| c.submission.settle_delay_ms);
        let rows = batch.records.len();
        log::info!("Submitting {} item rows", rows);

        spawn_local(async move {
            let outcome = match model::submit_batch(&url, body).await {
                Ok(()) => {
                    TimeoutFuture::new(settle_delay_ms).await;
                    DispatchOutcome::Delivered
                }
                Err(e) => {
                    log::warn!("Submission failed: {}", e);
                    DispatchOutcome::Failed(e)
                }
            };

            form.update(|state| state.finish_submit(&outcome));

            match outcome {
                DispatchOutcome::Delivered => {
                    log::info!("Submitted {} rows, form reset", rows);
                    notifications.success(
                        "✅ Submitted Successfully!",
                        "Your indent/issue request has been submitted and saved to the spreadsheet.",
                    );
                }
                DispatchOutcome::Failed(_) => {
                    notifications.error(
                        "Submission Failed",
                        "The request could not be sent. Check your connection and try again.",
                    );
                }
            }
        });
    }
}
