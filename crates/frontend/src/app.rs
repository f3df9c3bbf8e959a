use crate::domain::a001_issue_request::ui::details::IssueRequestForm;
use crate::shared::config::load_config;
use crate::shared::notification::{NotificationBar, NotificationService};
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    provide_context(load_config());

    // Success and validation messages for the whole page
    provide_context(NotificationService::new());

    view! {
        <ConfigProvider>
            <main class="app">
                <NotificationBar />
                <IssueRequestForm />
            </main>
        </ConfigProvider>
    }
}
