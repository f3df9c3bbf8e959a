use super::item_row::ItemRowEditor;
use super::view_model::IssueRequestVm;
use crate::shared::components::form_field::{DateField, SelectField, TextAreaField, TextField};
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::shared::notification::NotificationService;
use contracts::domain::a001_issue_request::aggregate::HeaderField;
use contracts::enums::store_name::StoreName;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn IssueRequestForm() -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    let vm = IssueRequestVm::new(config, notifications);
    vm.init();

    let is_submitting = vm.is_submitting();
    let row_count = vm.row_count();
    let setter = move |field: HeaderField| Callback::new(move |value: String| vm.set_header(field, value));
    let stores: Vec<String> = StoreName::all()
        .iter()
        .map(|s| s.display_name().to_string())
        .collect();

    view! {
        <div class="issue-form">
            <div class="issue-form__brand">
                <h1 class="issue-form__brand-title">"AMG Reality"</h1>
                <p class="issue-form__brand-subtitle">"Indent/Issue Request form"</p>
            </div>

            <Card>
                <form
                    class="issue-form__body"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        vm.submit();
                    }
                >
                    <div class="issue-form__intro">
                        <h2>"Indent/Issue Request Form"</h2>
                        <p>"Please fill in the details below to submit an indent/issue request"</p>
                    </div>

                    <section class="issue-form__section">
                        <h3 class="issue-form__section-title">"General Information"</h3>

                        <TextField
                            label="Indent Number (Auto-generated)"
                            id="indentNumber"
                            value=vm.header_value(HeaderField::IndentNumber)
                            placeholder="Auto-generated"
                            readonly=true
                        />

                        <div class="issue-form__grid">
                            <SelectField
                                label="Store Name"
                                id="storeName"
                                value=vm.header_value(HeaderField::StoreName)
                                on_change=setter(HeaderField::StoreName)
                                options=stores
                                placeholder="Select Store"
                                required=true
                            />
                            <TextField
                                label="Requested By"
                                id="requestedBy"
                                value=vm.header_value(HeaderField::RequestedBy)
                                on_input=setter(HeaderField::RequestedBy)
                                placeholder="Enter requester name"
                            />
                            <TextField
                                label="By Whom Orders/Instruction"
                                id="byWhomOrders"
                                value=vm.header_value(HeaderField::ByWhomOrders)
                                on_input=setter(HeaderField::ByWhomOrders)
                                placeholder="Enter orders/instruction source"
                            />
                        </div>

                        <div class="issue-form__grid">
                            <TextField
                                label="Project Name (if any)"
                                id="projectName"
                                value=vm.header_value(HeaderField::ProjectName)
                                on_input=setter(HeaderField::ProjectName)
                                placeholder="Enter project name"
                            />
                            <DateField
                                label="Store Required by Date"
                                id="storeRequiredByDate"
                                value=vm.header_value(HeaderField::StoreRequiredByDate)
                                on_change=setter(HeaderField::StoreRequiredByDate)
                                required=true
                            />
                            <TextField
                                label="Nature of Demand"
                                id="natureOfDemand"
                                value=vm.header_value(HeaderField::NatureOfDemand)
                                on_input=setter(HeaderField::NatureOfDemand)
                                placeholder="Enter nature of demand"
                            />
                        </div>

                        <div class="issue-form__grid">
                            <TextField
                                label="Gate Pass (if any)"
                                id="gatePass"
                                value=vm.header_value(HeaderField::GatePass)
                                on_input=setter(HeaderField::GatePass)
                                placeholder="Enter gate pass number"
                            />
                        </div>

                        <TextAreaField
                            label="Purpose"
                            id="purpose"
                            value=vm.header_value(HeaderField::Purpose)
                            on_input=setter(HeaderField::Purpose)
                            placeholder="Enter purpose of request"
                        />
                    </section>

                    <section class="issue-form__section">
                        <h3 class="issue-form__section-title">"Items Required"</h3>

                        <For
                            each=move || 0..row_count.get()
                            key=|index| *index
                            children=move |index| view! { <ItemRowEditor vm=vm index=index /> }
                        />

                        <div class="issue-form__actions issue-form__actions--end">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                button_type=ButtonType::Button
                                on_click=move |_| vm.add_row()
                            >
                                {icon("plus")}
                                "Add Another Item"
                            </Button>
                        </div>
                    </section>

                    <div class="issue-form__actions issue-form__actions--end">
                        <button class="button button--primary issue-form__submit" type="submit" prop:disabled=is_submitting>
                            {move || if is_submitting.get() {
                                view! { "Submitting..." }.into_any()
                            } else {
                                view! { {icon("send")} "Submit Request" }.into_any()
                            }}
                        </button>
                    </div>
                </form>
            </Card>
        </div>
    }
}
