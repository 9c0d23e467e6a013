use dioxus::prelude::*;

use crate::t;

/// One-shot feedback for a user action. Replaced by the next action,
/// cleared by the dismiss button.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    fn class_name(&self) -> &'static str {
        match self {
            Notice::Success(_) => "notice notice--success",
            Notice::Warning(_) => "notice notice--warning",
            Notice::Error(_) => "notice notice--error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Notice::Success(_) => "✅",
            Notice::Warning(_) => "⚠️",
            Notice::Error(_) => "⛔",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Warning(msg) | Notice::Error(msg) => msg,
        }
    }
}

#[component]
pub fn NoticeBanner(mut notice: Signal<Option<Notice>>) -> Element {
    let Some(current) = notice() else {
        return rsx! {};
    };

    let class_name = current.class_name();
    let icon = current.icon();
    let message = current.message().to_string();
    let dismiss_label = t!("notice-dismiss");

    rsx! {
        div { class: "{class_name}", role: "status",
            span { class: "notice__icon", aria_hidden: "true", "{icon}" }
            p { class: "notice__message", "{message}" }
            button {
                r#type: "button",
                class: "button button--ghost notice__dismiss",
                aria_label: "{dismiss_label}",
                onclick: move |_| notice.set(None),
                "×"
            }
        }
    }
}
