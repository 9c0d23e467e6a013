use dioxus::prelude::*;

use crate::components::app_navbar::dashboard_link;
use crate::t;

#[component]
pub fn Home() -> Element {
    // Subscribe to the shell's language code so strings refresh on switch.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang = lang_code.map(|code| code()).unwrap_or_default();
    tracing::trace!(%lang, "home render");

    rsx! {
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { class: "page-home__lead", {t!("home-intro")} }

            ul { class: "page-home__features",
                li { {t!("home-feature-upload")} }
                li { {t!("home-feature-charts")} }
                li { {t!("home-feature-reports")} }
            }
            p { class: "page-home__cta", {t!("home-cta")} }
            if let Some(link) = dashboard_link(&t!("nav-dashboard")) {
                div { class: "page-home__actions", {link} }
            }
        }
    }
}
