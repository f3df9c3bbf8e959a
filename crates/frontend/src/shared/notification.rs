use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// How long a notice stays on screen
const DISMISS_AFTER_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
    seq: u64,
}

/// Single-slot notification area shared through context.
/// A newer notice replaces the current one; each dismisses itself.
#[derive(Clone, Copy)]
pub struct NotificationService {
    current: RwSignal<Option<Notice>>,
    seq: StoredValue<u64>,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            seq: StoredValue::new(0),
        }
    }

    pub fn success(&self, title: impl Into<String>, body: impl Into<String>) {
        self.show(NoticeKind::Success, title.into(), body.into());
    }

    pub fn error(&self, title: impl Into<String>, body: impl Into<String>) {
        self.show(NoticeKind::Error, title.into(), body.into());
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }

    fn show(&self, kind: NoticeKind, title: String, body: String) {
        self.seq.update_value(|s| *s += 1);
        let seq = self.seq.get_value();
        self.current.set(Some(Notice {
            kind,
            title,
            body,
            seq,
        }));

        let current = self.current;
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            // Leave a newer notice alone
            if current.get_untracked().map(|n| n.seq) == Some(seq) {
                current.set(None);
            }
        });
    }
}

#[component]
pub fn NotificationBar() -> impl IntoView {
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    view! {
        {move || notifications.current.get().map(|notice| {
            let intent = match notice.kind {
                NoticeKind::Success => MessageBarIntent::Success,
                NoticeKind::Error => MessageBarIntent::Error,
            };
            view! {
                <div class="notification-bar" role="status">
                    <MessageBar intent=intent>
                        <div style="display: flex; align-items: center; gap: var(--spacing-sm); width: 100%;">
                            <div style="flex: 1;">
                                <strong>{notice.title}</strong>
                                <div>{notice.body}</div>
                            </div>
                            <Button
                                appearance=ButtonAppearance::Transparent
                                size=ButtonSize::Small
                                on_click=move |_| notifications.dismiss()
                            >
                                "✕"
                            </Button>
                        </div>
                    </MessageBar>
                </div>
            }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_starts_empty() {
        let service = NotificationService::default();
        assert_eq!(service.current.get_untracked(), None);
        service.dismiss();
        assert_eq!(service.current.get_untracked(), None);
    }
}
