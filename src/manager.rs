// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font enumeration, matching and substitution operations

use crate::fallback::CaptureSink;
use crate::locale::{Language, LocalePreference};
use crate::{matcher, Error, FallbackEngine, FontDescriptor, FontSource, ResultSet};
use crate::{SystemFallbackEngine, SystemSource};
use log::debug;

/// Entry point for font queries
///
/// Holds the two platform collaborators (a [`FontSource`] and a
/// [`FallbackEngine`]) and the user's locale preference. It holds no other
/// state: every operation re-enumerates the installed font set, so results
/// always reflect the system as it is *now*. Concurrent use from multiple
/// threads is safe to the extent the collaborators are.
pub struct FontManager {
    source: Box<dyn FontSource>,
    engine: Box<dyn FallbackEngine>,
    locale: LocalePreference,
}

impl FontManager {
    /// Construct over the system's own font services
    pub fn system() -> Self {
        FontManager::new(
            Box::new(SystemSource::new()),
            Box::new(SystemFallbackEngine::new()),
        )
    }

    /// Construct over explicit collaborators
    pub fn new(source: Box<dyn FontSource>, engine: Box<dyn FallbackEngine>) -> Self {
        FontManager {
            source,
            engine,
            locale: LocalePreference::default(),
        }
    }

    /// Set the user's locale, preferred when resolving name strings
    pub fn with_locale(mut self, user: Language) -> Self {
        self.locale = LocalePreference::new(Some(user));
        self
    }

    /// Enumerate installed fonts
    ///
    /// Walks every face of every family the source reports, extracts a
    /// descriptor per face and deduplicates by [`FontDescriptor::dedup_key`]
    /// (first seen wins, order preserved). Faces which fail extraction are
    /// skipped; the result is best-effort and possibly partial. Failure to
    /// acquire the collection itself is fatal.
    pub fn available_fonts(&self) -> Result<ResultSet, Error> {
        let mut set = ResultSet::new();
        for family in self.source.collection()? {
            for face in family.faces {
                match face {
                    Ok(record) => {
                        set.push(record.descriptor(&self.locale));
                    }
                    Err(err) => debug!("skipping face: {err}"),
                }
            }
        }
        debug!("enumerated {} fonts", set.len());
        Ok(set)
    }

    /// All installed fonts satisfying `query`
    ///
    /// Candidates are tested with exact per-field comparison; empty string
    /// fields and zero axes in `query` are wildcards while `italic` and
    /// `monospace` always constrain. Enumeration order is preserved. An
    /// empty result is not an error.
    pub fn find_fonts(&self, query: &FontDescriptor) -> Result<ResultSet, Error> {
        let mut set = ResultSet::new();
        for font in self.available_fonts()? {
            if matcher::matches(&font, query) {
                set.push(font);
            }
        }
        Ok(set)
    }

    /// The single best match for `query`
    ///
    /// Tries three tiers, each only when the previous found nothing:
    ///
    /// 1.  the full query as given;
    /// 2.  the query relaxed to its general traits (weight, width, italic;
    ///     names dropped);
    /// 3.  no filter at all — the first installed font.
    ///
    /// Returns the first descriptor of the first non-empty tier. Ties break
    /// by enumeration order, so the result is stable within one platform
    /// state but not across systems. [`Error::NotFound`] is returned only
    /// when not a single font is installed.
    pub fn find_font(&self, query: &FontDescriptor) -> Result<FontDescriptor, Error> {
        if let Some(font) = self.find_fonts(query)?.first() {
            return Ok(font.clone());
        }

        debug!("no match, retrying with traits only");
        let relaxed = matcher::relax_to_traits(query);
        if let Some(font) = self.find_fonts(&relaxed)?.first() {
            return Ok(font.clone());
        }

        // Nothing with those traits either; shouldn't happen often. Settle
        // for the first font installed.
        debug!("no match, falling back to the first installed font");
        self.available_fonts()?.first().cloned().ok_or(Error::NotFound)
    }

    /// The physical font that will draw `text`, starting from a named font
    ///
    /// Resolves `postscript_name` to an installed font, lays `text` out in
    /// it and reports the face the shaping engine actually used for the
    /// first glyph run, after any glyph-level fallback. The answer goes
    /// through the same extraction as enumeration.
    ///
    /// If the name resolves to nothing at all (no fonts installed), the
    /// probe is seeded with the platform's default font identity instead;
    /// the requested traits are not carried over. `Ok(None)` means no glyph
    /// run was drawn, e.g. for empty `text` — nothing to report.
    pub fn substitute_font(
        &self,
        postscript_name: &str,
        text: &str,
    ) -> Result<Option<FontDescriptor>, Error> {
        let query = FontDescriptor::new().with_postscript_name(postscript_name);
        let seed = match self.find_font(&query) {
            Ok(font) => (&font).into(),
            // Let the engine pick the platform default.
            Err(Error::NotFound) => Default::default(),
            Err(err) => return Err(err),
        };

        let mut sink = CaptureSink::default();
        self.engine.layout(&seed, text, &mut sink)?;
        Ok(sink.into_face().map(|face| face.descriptor(&self.locale)))
    }
}
