// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Localized name strings and the locale preference chain
//!
//! Platform font services report name strings (PostScript name, family,
//! style) per locale. Picking the best string for the current user is a
//! pure function over such a set and lives here, keeping the matching and
//! deduplication logic locale-agnostic.

use smallvec::SmallVec;

pub use fontdb::Language;

/// Localized variants of one name string
///
/// An ordered collection of `(Language, String)` entries. Most fonts carry
/// one or two variants of each name, so entries are stored inline.
#[derive(Clone, Debug, Default)]
pub struct LocalizedStrings {
    entries: SmallVec<[(Language, String); 2]>,
}

impl LocalizedStrings {
    /// Construct an empty set
    ///
    /// An empty set means the informational string category is entirely
    /// absent for a face; resolution yields no string.
    #[inline]
    pub fn new() -> Self {
        LocalizedStrings::default()
    }

    /// Construct a set holding a single string without locale information
    ///
    /// The string is filed under US English, the fixed fallback locale, so
    /// that resolution always reaches it.
    pub fn unlocalized(value: impl Into<String>) -> Self {
        let mut strings = LocalizedStrings::new();
        strings.push(Language::English_UnitedStates, value);
        strings
    }

    /// Append a localized variant
    pub fn push(&mut self, language: Language, value: impl Into<String>) {
        self.entries.push((language, value.into()));
    }

    /// Whether the set holds no strings
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The string for `language`, if present
    pub fn get(&self, language: Language) -> Option<&str> {
        self.entries
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, s)| s.as_str())
    }

    /// The first string in the set, if any
    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, s)| s.as_str())
    }
}

impl<S: Into<String>> FromIterator<(Language, S)> for LocalizedStrings {
    fn from_iter<I: IntoIterator<Item = (Language, S)>>(iter: I) -> Self {
        LocalizedStrings {
            entries: iter.into_iter().map(|(l, s)| (l, s.into())).collect(),
        }
    }
}

/// The preference chain used to pick one string from a localized set
///
/// Resolution tries, in order:
///
/// 1.  the user's locale, when one is configured;
/// 2.  US English, the fixed fallback locale;
/// 3.  whatever string comes first in the set.
///
/// Only an empty set resolves to nothing.
///
/// Detecting the user's locale is the host's concern; pass it to
/// [`LocalePreference::new`] or fall back on [`Default`], which skips
/// straight to US English.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalePreference {
    user: Option<Language>,
}

impl LocalePreference {
    /// Construct with the user's locale
    #[inline]
    pub fn new(user: Option<Language>) -> Self {
        LocalePreference { user }
    }

    /// Pick the best string from `strings`
    ///
    /// Returns `None` only when `strings` is empty.
    pub fn resolve<'a>(&self, strings: &'a LocalizedStrings) -> Option<&'a str> {
        if let Some(user) = self.user {
            if let Some(s) = strings.get(user) {
                return Some(s);
            }
        }
        strings
            .get(Language::English_UnitedStates)
            .or_else(|| strings.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocalizedStrings {
        [
            (Language::German_Germany, "Fett"),
            (Language::English_UnitedStates, "Bold"),
            (Language::French_France, "Gras"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn user_locale_preferred() {
        let pref = LocalePreference::new(Some(Language::French_France));
        assert_eq!(pref.resolve(&sample()), Some("Gras"));
    }

    #[test]
    fn falls_back_to_us_english() {
        let pref = LocalePreference::new(Some(Language::Japanese_Japan));
        assert_eq!(pref.resolve(&sample()), Some("Bold"));
        assert_eq!(LocalePreference::default().resolve(&sample()), Some("Bold"));
    }

    #[test]
    fn falls_back_to_first_entry() {
        let strings: LocalizedStrings =
            [(Language::German_Germany, "Fett")].into_iter().collect();
        let pref = LocalePreference::new(Some(Language::French_France));
        assert_eq!(pref.resolve(&strings), Some("Fett"));
    }

    #[test]
    fn empty_set_resolves_to_nothing() {
        let pref = LocalePreference::default();
        assert_eq!(pref.resolve(&LocalizedStrings::new()), None);
    }

    #[test]
    fn unlocalized_always_resolves() {
        let strings = LocalizedStrings::unlocalized("Arial");
        assert_eq!(LocalePreference::default().resolve(&strings), Some("Arial"));
        let pref = LocalePreference::new(Some(Language::Japanese_Japan));
        assert_eq!(pref.resolve(&strings), Some("Arial"));
    }
}
