// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Enumeration, matching and substitution over in-memory collaborators

use font_query::{
    Error, FaceError, FaceFamily, FaceRecord, FallbackEngine, FontDescriptor, FontManager,
    FontSource, LayoutSeed, LocalizedStrings, RunSink, Weight, Width,
};
use std::path::PathBuf;

fn strings(s: &str) -> LocalizedStrings {
    if s.is_empty() {
        LocalizedStrings::new()
    } else {
        LocalizedStrings::unlocalized(s)
    }
}

fn record(ps: &str, family: &str, style: &str, weight: Weight, italic: bool) -> FaceRecord {
    FaceRecord {
        path: PathBuf::from(format!("/fonts/{ps}.ttf")),
        postscript_name: strings(ps),
        family: strings(family),
        style: strings(style),
        weight,
        width: Width::NORMAL,
        italic,
    }
}

/// A scripted font catalogue: one family per inner vec
struct FakeSource {
    families: Vec<Vec<Result<FaceRecord, String>>>,
    unavailable: bool,
}

impl FakeSource {
    fn new(families: Vec<Vec<Result<FaceRecord, String>>>) -> Self {
        FakeSource {
            families,
            unavailable: false,
        }
    }

    fn flat(faces: Vec<FaceRecord>) -> Self {
        FakeSource::new(faces.into_iter().map(|f| vec![Ok(f)]).collect())
    }

    fn empty() -> Self {
        FakeSource::new(Vec::new())
    }

    fn unavailable() -> Self {
        FakeSource {
            families: Vec::new(),
            unavailable: true,
        }
    }
}

impl FontSource for FakeSource {
    fn collection(&self) -> Result<Vec<FaceFamily>, Error> {
        if self.unavailable {
            return Err(Error::PlatformUnavailable("fake outage".into()));
        }
        Ok(self
            .families
            .iter()
            .map(|faces| FaceFamily {
                faces: faces
                    .iter()
                    .map(|f| f.clone().map_err(FaceError))
                    .collect(),
            })
            .collect())
    }
}

/// A scripted shaping engine: each face covers the chars listed with it
struct FakeEngine {
    faces: Vec<(FaceRecord, String)>,
}

impl FakeEngine {
    fn new(faces: Vec<(FaceRecord, String)>) -> Self {
        FakeEngine { faces }
    }

    fn none() -> Self {
        FakeEngine::new(Vec::new())
    }
}

impl FallbackEngine for FakeEngine {
    fn layout(&self, seed: &LayoutSeed, text: &str, sink: &mut dyn RunSink) -> Result<(), Error> {
        if self.faces.is_empty() {
            return Ok(());
        }
        // An empty seed family means the platform default, i.e. face 0.
        let primary = self
            .faces
            .iter()
            .position(|(face, _)| face.family.first() == Some(seed.family.as_str()))
            .unwrap_or(0);

        let mut current: Option<usize> = None;
        for c in text.chars() {
            let covering = if self.faces[primary].1.contains(c) {
                primary
            } else {
                match self.faces.iter().position(|(_, cover)| cover.contains(c)) {
                    Some(i) => i,
                    None => current.unwrap_or(primary),
                }
            };
            if current != Some(covering) {
                sink.draw_run(self.faces[covering].0.clone());
                current = Some(covering);
            }
        }
        Ok(())
    }
}

fn arial_like_system() -> Vec<FaceRecord> {
    vec![
        record("Arial-Bold", "Arial", "Bold", Weight::BOLD, false),
        record("Arial", "Arial", "Regular", Weight::NORMAL, false),
        record("Arial-Italic", "Arial", "Italic", Weight::NORMAL, true),
        record("Times-Bold", "Times", "Bold", Weight::BOLD, false),
    ]
}

fn manager(source: FakeSource, engine: FakeEngine) -> FontManager {
    FontManager::new(Box::new(source), Box::new(engine))
}

#[test]
fn enumeration_dedup_keys_are_distinct() {
    let mut faces = arial_like_system();
    faces.push(record("Arial", "Arial Copy", "Regular", Weight::NORMAL, false));
    let mgr = manager(FakeSource::flat(faces), FakeEngine::none());

    let fonts = mgr.available_fonts().unwrap();
    assert_eq!(fonts.len(), 4);
    let keys: Vec<_> = fonts.iter().map(|d| d.dedup_key().unwrap()).collect();
    for (i, a) in keys.iter().enumerate() {
        for b in &keys[i + 1..] {
            assert_ne!(a, b);
        }
    }
    // first seen wins
    assert_eq!(fonts.iter().find(|d| d.postscript_name == "Arial").unwrap().family, "Arial");
}

#[test]
fn enumeration_discards_nameless_faces() {
    let faces = vec![
        record("", "", "Mystery", Weight::NORMAL, false),
        record("", "Times", "Regular", Weight::NORMAL, false),
    ];
    let mgr = manager(FakeSource::flat(faces), FakeEngine::none());

    let fonts = mgr.available_fonts().unwrap();
    assert_eq!(fonts.len(), 1);
    assert_eq!(fonts.first().unwrap().family, "Times");
}

#[test]
fn enumeration_skips_failed_faces() {
    let families = vec![vec![
        Ok(record("Arial", "Arial", "Regular", Weight::NORMAL, false)),
        Err("corrupt face".to_string()),
        Ok(record("Arial-Bold", "Arial", "Bold", Weight::BOLD, false)),
    ]];
    let mgr = manager(FakeSource::new(families), FakeEngine::none());

    let fonts = mgr.available_fonts().unwrap();
    let names: Vec<_> = fonts.iter().map(|d| d.postscript_name.as_str()).collect();
    assert_eq!(names, ["Arial", "Arial-Bold"]);
}

#[test]
fn collection_outage_is_fatal() {
    let mgr = manager(FakeSource::unavailable(), FakeEngine::none());
    assert!(matches!(
        mgr.available_fonts(),
        Err(Error::PlatformUnavailable(_))
    ));
    assert!(matches!(
        mgr.find_font(&FontDescriptor::new()),
        Err(Error::PlatformUnavailable(_))
    ));
}

#[test]
fn find_fonts_is_a_subset_preserving_order() {
    let mgr = manager(FakeSource::flat(arial_like_system()), FakeEngine::none());
    let all = mgr.available_fonts().unwrap();

    let query = FontDescriptor::new().with_weight(Weight::BOLD);
    let bold = mgr.find_fonts(&query).unwrap();
    let names: Vec<_> = bold.iter().map(|d| d.postscript_name.as_str()).collect();
    assert_eq!(names, ["Arial-Bold", "Times-Bold"]);
    for font in &bold {
        assert!(all.iter().any(|d| d == font));
    }
}

#[test]
fn every_enumerated_font_matches_itself() {
    let mgr = manager(FakeSource::flat(arial_like_system()), FakeEngine::none());
    for font in &mgr.available_fonts().unwrap() {
        let found = mgr.find_fonts(font).unwrap();
        assert!(found.iter().any(|d| d == font), "no self-match: {font:?}");
    }
}

#[test]
fn italic_matches_exactly_in_both_directions() {
    let mgr = manager(FakeSource::flat(arial_like_system()), FakeEngine::none());

    let italics = mgr.find_fonts(&FontDescriptor::new().with_italic(true)).unwrap();
    assert!(!italics.is_empty());
    assert!(italics.iter().all(|d| d.italic));

    let uprights = mgr.find_fonts(&FontDescriptor::new()).unwrap();
    assert!(!uprights.is_empty());
    assert!(uprights.iter().all(|d| !d.italic));
}

#[test]
fn find_fonts_may_be_empty_without_error() {
    let mgr = manager(FakeSource::flat(arial_like_system()), FakeEngine::none());
    let query = FontDescriptor::new().with_family("No Such Family");
    assert!(mgr.find_fonts(&query).unwrap().is_empty());
}

#[test]
fn find_font_relaxes_to_traits() {
    let mgr = manager(FakeSource::flat(arial_like_system()), FakeEngine::none());
    // Wrong name, but bold traits: tier 2 must find a bold face.
    let query = FontDescriptor::new()
        .with_family("No Such Family")
        .with_weight(Weight::BOLD);
    let font = mgr.find_font(&query).unwrap();
    assert_eq!(font.postscript_name, "Arial-Bold");
}

#[test]
fn find_font_falls_through_to_first_installed() {
    let mgr = manager(FakeSource::flat(arial_like_system()), FakeEngine::none());
    // Nothing matches the name nor the traits.
    let query = FontDescriptor::new()
        .with_postscript_name("No-Such-Font")
        .with_weight(Weight::THIN);
    let font = mgr.find_font(&query).unwrap();
    assert_eq!(font.postscript_name, "Arial-Bold");
}

#[test]
fn find_font_reports_not_found_only_when_nothing_installed() {
    let mgr = manager(FakeSource::empty(), FakeEngine::none());
    assert!(matches!(
        mgr.find_font(&FontDescriptor::new()),
        Err(Error::NotFound)
    ));
}

fn substitution_setup() -> FontManager {
    let arial = record("Arial", "Arial", "Regular", Weight::NORMAL, false);
    let mincho = record("Mincho", "Mincho", "Regular", Weight::NORMAL, false);
    let engine = FakeEngine::new(vec![
        (arial.clone(), "ABC abc".to_string()),
        (mincho.clone(), "字体".to_string()),
    ]);
    manager(FakeSource::flat(vec![arial, mincho]), engine)
}

#[test]
fn substitute_keeps_covering_font() {
    let mgr = substitution_setup();
    let font = mgr.substitute_font("Arial", "A").unwrap().unwrap();
    assert_eq!(font.postscript_name, "Arial");
}

#[test]
fn substitute_switches_for_missing_glyphs() {
    let mgr = substitution_setup();
    let font = mgr.substitute_font("Arial", "字").unwrap().unwrap();
    assert_ne!(font.postscript_name, "Arial");
    assert_eq!(font.postscript_name, "Mincho");
}

#[test]
fn substitute_reports_first_run_of_mixed_text() {
    let mgr = substitution_setup();
    let font = mgr.substitute_font("Arial", "A字").unwrap().unwrap();
    assert_eq!(font.postscript_name, "Arial");
}

#[test]
fn substitute_empty_text_reports_nothing() {
    let mgr = substitution_setup();
    assert!(mgr.substitute_font("Arial", "").unwrap().is_none());
}

#[test]
fn substitute_on_empty_system_reports_nothing() {
    // find_font yields NotFound, the probe is seeded with the platform
    // default, and an engine with no fonts draws no run at all.
    let mgr = manager(FakeSource::empty(), FakeEngine::none());
    assert!(mgr.substitute_font("Arial", "text").unwrap().is_none());
}
