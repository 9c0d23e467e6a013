use std::collections::{BTreeSet, HashSet};

/// Every non-fallback locale must define at least the keys of
/// `en-US/esgview-ui.ftl`, and no bundle may define a key twice.
///
/// New locale: add `ui/i18n/<locale>/esgview-ui.ftl`, register it in
/// `LOCALES` below, then run `cargo test -p esgview-ui`.
const EN_US: &str = include_str!("../i18n/en-US/esgview-ui.ftl");
const LOCALES: &[(&str, &str)] = &[
    ("es-ES", include_str!("../i18n/es-ES/esgview-ui.ftl")),
    ("fr-FR", include_str!("../i18n/fr-FR/esgview-ui.ftl")),
];

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback: HashSet<String> = message_ids(EN_US).collect();
    assert!(!fallback.is_empty(), "fallback (en-US) contains no keys");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        let keys: HashSet<String> = message_ids(src).collect();
        let missing: BTreeSet<_> = fallback.difference(&keys).cloned().collect();
        let extra: BTreeSet<_> = keys.difference(&fallback).cloned().collect();

        if !missing.is_empty() {
            failures.push(format!(
                "{locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().collect::<Vec<_>>().join("\n  ")
            ));
        }
        if !extra.is_empty() {
            failures.push(format!(
                "{locale} defines keys absent from en-US:\n  {}",
                extra.into_iter().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "translation completeness check failed:\n\n{}",
        failures.join("\n\n")
    );
}

#[test]
fn no_bundle_defines_a_key_twice() {
    for (locale, src) in std::iter::once(&("en-US", EN_US)).chain(LOCALES) {
        let mut seen = HashSet::new();
        let dups: BTreeSet<String> = message_ids(src).filter(|id| !seen.insert(id.clone())).collect();
        assert!(dups.is_empty(), "duplicate keys in {locale}: {dups:?}");
    }
}

#[test]
fn translations_are_not_blank() {
    for (locale, src) in std::iter::once(&("en-US", EN_US)).chain(LOCALES) {
        for line in src.lines().filter(|line| is_message(line)) {
            let (id, value) = line.split_once('=').unwrap_or((line, ""));
            assert!(!value.trim().is_empty(), "{locale}: `{}` has no value", id.trim());
        }
    }
}

fn is_message(line: &str) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty()
        && !trimmed.starts_with('#')
        && !trimmed.starts_with('-')
        && !trimmed.starts_with('.')
        && line.len() == trimmed.len()
        && trimmed.contains('=')
}

fn message_ids(src: &str) -> impl Iterator<Item = String> + '_ {
    src.lines()
        .filter(|line| is_message(line))
        .filter_map(|line| line.split_once('=').map(|(id, _)| id.trim().to_string()))
        .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
}
