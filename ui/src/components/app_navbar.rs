use crate::i18n;
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

/// Route links supplied by the platform shell, so `ui` never sees its
/// `Route` enum. Each builder gets the localized label and returns a `Link`:
///
/// ```ignore
/// register_nav(NavBuilder {
///     home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///     dashboard: |label| rsx!( Link { class: "navbar__link", to: Route::Dashboard {}, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub dashboard: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins.
pub fn register_nav(builder: NavBuilder) {
    if NAV_BUILDER.set(builder).is_err() {
        tracing::trace!("navigation already registered");
    }
}

/// Link to the dashboard route, if a platform registered one.
pub fn dashboard_link(label: &str) -> Option<Element> {
    NAV_BUILDER.get().map(|b| (b.dashboard)(label))
}

/// Brand, route links and the language switcher. Without a registered
/// [`NavBuilder`] the `children` are shown in place of the links.
#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    // Shells provide the active tag as context and key their routed subtree
    // on it, so writing here re-renders every page in the new language.
    let shell_lang = try_use_context::<Signal<String>>();
    let mut selected = use_signal(i18n::current_language);
    let locales = use_hook(i18n::available_languages);

    let switch_language = move |evt: FormEvent| {
        let tag = evt.value();
        if let Err(err) = i18n::set_language(&tag) {
            tracing::warn!(%tag, %err, "language switch failed");
            return;
        }
        tracing::info!(%tag, "language switched");
        selected.set(tag.clone());
        if let Some(mut shell_lang) = shell_lang {
            shell_lang.set(tag);
        }
    };

    let links = NAV_BUILDER.get().map(|b| {
        let home = (b.home)(&t!("nav-home"));
        let dashboard = (b.dashboard)(&t!("nav-dashboard"));
        rsx! {
            {home}
            {dashboard}
        }
    });

    let options: Vec<(String, String)> = locales
        .iter()
        .map(|tag| (tag.clone(), i18n::language_name(tag).to_string()))
        .collect();

    rsx! {
        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "esgview" }
                    }
                    span { class: "navbar__brand-subtitle", {t!("tagline")} }
                }

                nav { class: "navbar__links", {links.unwrap_or(children)} }

                if options.len() > 1 {
                    div { class: "navbar__locale",
                        label { class: "visually-hidden", r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{selected()}",
                            oninput: switch_language,
                            for (tag, name) in options {
                                option { key: "{tag}", value: "{tag}", "{name}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
