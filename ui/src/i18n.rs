//! Localized strings for the dashboard.
//!
//! Fluent bundles live in `ui/i18n/<lang>/esgview-ui.ftl` and are embedded
//! at compile time; `en-US` is the fallback and the reference for every
//! other locale. Lookups go through [`t!`](crate::t), which the
//! `i18n-embed-fl` macro checks against the fallback bundle at build time.
//!
//! Desktop picks the initial language from the OS, web from
//! `navigator.languages`. [`set_language`] switches at runtime.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Looks a message up in the shared loader, with optional `name = value` arguments.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

const DOMAIN: &str = "esgview-ui";
pub const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Bundles;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .unwrap_or_else(|_| LanguageIdentifier::default());
    FluentLanguageLoader::new(DOMAIN, fallback)
});

/// Notices embed filenames and paths; bidi isolation marks would end up in
/// them. The flag lives on the loaded bundles, so it is reapplied after
/// every selection.
fn disable_isolation() {
    LOADER.set_use_isolating(false);
}

static INIT: Once = Once::new();

/// Load the bundles matching the user's preferred languages. Safe to call
/// from every component; only the first call does any work.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Bundles, &requested) {
            Ok(selected) => {
                disable_isolation();
                tracing::debug!(?selected, "i18n bundles loaded");
            }
            Err(err) => tracing::warn!(%err, "language selection failed; using fallback strings"),
        }
    });
}

/// Switch to `tag`. An unparseable tag is ignored and leaves the current
/// language in place.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Bundles, &[lang])?;
    disable_isolation();
    Ok(())
}

/// Tag of the language strings are currently resolved in.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded locale tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut tags: Vec<String> = Bundles::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Name of a locale in its own language, for the switcher.
pub fn language_name(tag: &str) -> &str {
    match tag {
        "en-US" => "English",
        "es-ES" => "Español",
        "fr-FR" => "Français",
        other => other,
    }
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shipped_locale_is_embedded() {
        assert_eq!(available_languages(), ["en-US", "es-ES", "fr-FR"]);
    }

    #[test]
    fn fallback_resolves_navigation_labels() {
        init();
        set_language(FALLBACK_LANGUAGE).unwrap();
        assert_eq!(fl!(&*LOADER, "nav-home"), "Home");
        assert_eq!(current_language(), "en-US");
    }

    #[test]
    fn arguments_are_interpolated_without_isolation_marks() {
        init();
        set_language(FALLBACK_LANGUAGE).unwrap();
        let message = fl!(&*LOADER, "notice-report-saved", filename = "esg.pdf");
        assert_eq!(message, "Report downloaded as esg.pdf");
    }

    #[test]
    fn reselecting_language_keeps_paths_clean() {
        init();
        set_language(FALLBACK_LANGUAGE).unwrap();
        set_language(FALLBACK_LANGUAGE).unwrap();
        let message = fl!(&*LOADER, "notice-report-saved-to", path = "/tmp/esg.pdf");

        assert!(message.ends_with("/tmp/esg.pdf"));
        assert!(!message.contains('\u{2068}') && !message.contains('\u{2069}'));
    }

    #[test]
    fn unparseable_tag_keeps_current_strings() {
        init();
        let before = fl!(&*LOADER, "nav-dashboard");
        set_language("not a tag!").unwrap();
        assert_eq!(fl!(&*LOADER, "nav-dashboard"), before);
    }

    #[test]
    fn switcher_names_fall_back_to_tag() {
        assert_eq!(language_name("es-ES"), "Español");
        assert_eq!(language_name("de-DE"), "de-DE");
    }
}
