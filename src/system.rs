// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! System-backed collaborators
//!
//! [`SystemSource`] and [`SystemFallbackEngine`] implement the two
//! collaborator traits over [`fontdb`]. Both construct a fresh database per
//! call: nothing is cached, so answers always reflect the currently
//! installed fonts. The fallback engine consults the same installed set the
//! source enumerates.

use crate::locale::LocalizedStrings;
use crate::{Error, FaceError, FaceFamily, FaceRecord, FallbackEngine, FontSource};
use crate::{LayoutSeed, RunSink, Weight, Width};
use fontdb::{Database, Family, Query, Source, Style};
use log::debug;
use std::collections::HashMap;
use std::path::PathBuf;
use ttf_parser::name_id;

fn load_database() -> Database {
    let mut db = Database::new();
    db.load_system_fonts();
    db
}

/// Subfamily name records from a face's name table
///
/// Prefers the typographic subfamily names when present (they distinguish
/// e.g. "Semibold" where the legacy subfamily collapses to "Regular").
fn subfamily_names(face: &ttf_parser::Face) -> LocalizedStrings {
    let mut names = LocalizedStrings::new();
    for id in [name_id::TYPOGRAPHIC_SUBFAMILY, name_id::SUBFAMILY] {
        for name in face.names().into_iter() {
            if name.name_id == id && name.is_unicode() {
                if let Some(value) = name.to_string() {
                    names.push(name.language(), value);
                }
            }
        }
        if !names.is_empty() {
            break;
        }
    }
    names
}

fn width_from_stretch(stretch: fontdb::Stretch) -> Width {
    use fontdb::Stretch::*;
    match stretch {
        UltraCondensed => Width::ULTRA_CONDENSED,
        ExtraCondensed => Width::EXTRA_CONDENSED,
        Condensed => Width::CONDENSED,
        SemiCondensed => Width::SEMI_CONDENSED,
        Normal => Width::NORMAL,
        SemiExpanded => Width::SEMI_EXPANDED,
        Expanded => Width::EXPANDED,
        ExtraExpanded => Width::EXTRA_EXPANDED,
        UltraExpanded => Width::ULTRA_EXPANDED,
    }
}

fn stretch_from_width(width: Width) -> fontdb::Stretch {
    use fontdb::Stretch::*;
    match width {
        Width::ULTRA_CONDENSED => UltraCondensed,
        Width::EXTRA_CONDENSED => ExtraCondensed,
        Width::CONDENSED => Condensed,
        Width::SEMI_CONDENSED => SemiCondensed,
        Width::SEMI_EXPANDED => SemiExpanded,
        Width::EXPANDED => Expanded,
        Width::EXTRA_EXPANDED => ExtraExpanded,
        Width::ULTRA_EXPANDED => UltraExpanded,
        _ => Normal,
    }
}

/// Extract a [`FaceRecord`] for one discovered face
///
/// Family names and properties come straight from the database; the style
/// (subfamily) names require parsing the face's name table. A face whose
/// data cannot be read or parsed yields a [`FaceError`] and is skipped by
/// the caller.
fn face_record(db: &Database, info: &fontdb::FaceInfo) -> Result<FaceRecord, FaceError> {
    let style = db
        .with_face_data(info.id, |data, index| {
            ttf_parser::Face::parse(data, index)
                .map(|face| subfamily_names(&face))
                .map_err(|err| FaceError(err.to_string()))
        })
        .ok_or_else(|| FaceError(format!("no face data for {}", info.post_script_name)))??;

    let path = match &info.source {
        Source::File(path) | Source::SharedFile(path, _) => path.clone(),
        Source::Binary(_) => PathBuf::new(),
    };

    Ok(FaceRecord {
        path,
        postscript_name: LocalizedStrings::unlocalized(info.post_script_name.clone()),
        family: info
            .families
            .iter()
            .map(|(name, language)| (*language, name.clone()))
            .collect(),
        style,
        weight: Weight(info.weight.0),
        width: width_from_stretch(info.stretch),
        // Oblique faces are not italic, matching platform convention.
        italic: info.style == Style::Italic,
    })
}

/// The installed-font catalogue, via [`fontdb`]
///
/// Every [`collection`] call re-scans the system font directories.
///
/// [`collection`]: FontSource::collection
#[derive(Clone, Debug, Default)]
pub struct SystemSource;

impl SystemSource {
    /// Construct; the system is only consulted per call
    #[inline]
    pub fn new() -> Self {
        SystemSource
    }
}

impl FontSource for SystemSource {
    fn collection(&self) -> Result<Vec<FaceFamily>, Error> {
        let db = load_database();
        debug!("system font scan found {} faces", db.len());

        // Group faces by their first family name, keeping discovery order
        // of both families and faces.
        let mut families: Vec<FaceFamily> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for info in db.faces() {
            let name = info
                .families
                .first()
                .map(|(name, _)| name.clone())
                .unwrap_or_default();
            let index = *by_name.entry(name).or_insert_with(|| {
                families.push(FaceFamily::default());
                families.len() - 1
            });
            families[index].faces.push(face_record(&db, info));
        }
        Ok(families)
    }
}

/// The platform's glyph-level font fallback, via [`fontdb`] + [`ttf-parser`]
///
/// Resolves the seed to a primary face, then walks the text: characters the
/// primary face covers stay on it, anything else falls back to the first
/// installed face with a glyph for that character. Consecutive characters
/// sharing a face coalesce into one run.
///
/// [`ttf-parser`]: ttf_parser
#[derive(Clone, Debug, Default)]
pub struct SystemFallbackEngine;

impl SystemFallbackEngine {
    /// Construct; the system is only consulted per call
    #[inline]
    pub fn new() -> Self {
        SystemFallbackEngine
    }
}

fn covers(db: &Database, id: fontdb::ID, c: char) -> bool {
    db.with_face_data(id, |data, index| {
        ttf_parser::Face::parse(data, index)
            .ok()
            .and_then(|face| face.glyph_index(c))
            .is_some()
    })
    .unwrap_or(false)
}

impl FallbackEngine for SystemFallbackEngine {
    fn layout(&self, seed: &LayoutSeed, text: &str, sink: &mut dyn RunSink) -> Result<(), Error> {
        let db = load_database();

        let named;
        let families: &[Family] = if seed.family.is_empty() {
            // The platform default.
            &[Family::SansSerif]
        } else {
            named = [Family::Name(&seed.family)];
            &named
        };
        let weight = match seed.weight {
            Weight::UNSPECIFIED => fontdb::Weight::NORMAL,
            Weight(value) => fontdb::Weight(value),
        };
        let query = Query {
            families,
            weight,
            stretch: stretch_from_width(seed.width),
            style: if seed.italic { Style::Italic } else { Style::Normal },
        };

        let primary = db.query(&query).or_else(|| db.faces().next().map(|f| f.id));
        let Some(primary) = primary else {
            // Zero fonts installed: nothing can be drawn.
            return Ok(());
        };

        // TODO: parsing faces per character is slow; cache parsed faces if
        // this probe ever runs on long strings.
        let mut fallback_cache: HashMap<char, Option<fontdb::ID>> = HashMap::new();
        let mut current: Option<fontdb::ID> = None;
        let mut runs: Vec<fontdb::ID> = Vec::new();
        for c in text.chars() {
            // Keep the current face where possible, so a space amid foreign
            // text does not split the run.
            let face = if current.map(|id| covers(&db, id, c)).unwrap_or(false) {
                current
            } else if covers(&db, primary, c) {
                Some(primary)
            } else {
                *fallback_cache
                    .entry(c)
                    .or_insert_with(|| db.faces().map(|f| f.id).find(|id| covers(&db, *id, c)))
            };
            // No coverage anywhere: stay put rather than break the run.
            let face = face.or(current).unwrap_or(primary);
            if current != Some(face) {
                runs.push(face);
                current = Some(face);
            }
        }

        for id in runs {
            let Some(info) = db.face(id) else { continue };
            match face_record(&db, info) {
                Ok(record) => sink.draw_run(record),
                Err(err) => debug!("skipping run face: {err}"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_mapping_round_trips() {
        for stretch in [
            fontdb::Stretch::UltraCondensed,
            fontdb::Stretch::Condensed,
            fontdb::Stretch::Normal,
            fontdb::Stretch::Expanded,
            fontdb::Stretch::UltraExpanded,
        ] {
            assert_eq!(stretch_from_width(width_from_stretch(stretch)), stretch);
        }
        // The query wildcard maps to a normal-width request
        assert_eq!(stretch_from_width(Width::UNSPECIFIED), fontdb::Stretch::Normal);
    }
}
