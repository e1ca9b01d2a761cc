// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The text shaping/fallback engine boundary
//!
//! Answering "which font will actually draw this text?" requires a probe of
//! the platform's shaping engine: a requested font may lack glyphs for some
//! characters, in which case the engine silently substitutes another
//! installed font for those runs. The engine is opaque to this crate; it is
//! driven through [`FallbackEngine`] and observed through a [`RunSink`].

use crate::{Error, FaceRecord, FontDescriptor, Weight, Width};

/// Style attributes seeding a layout probe
///
/// Derived from the descriptor the probe starts from. An empty `family`
/// asks the engine for the platform's default font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutSeed {
    /// Family to lay the text out in; empty for the platform default
    pub family: String,
    /// Weight of the requested face
    pub weight: Weight,
    /// Width of the requested face
    pub width: Width,
    /// Whether an italic face is requested
    pub italic: bool,
}

impl Default for LayoutSeed {
    /// The platform's generic default font identity
    fn default() -> Self {
        LayoutSeed {
            family: String::new(),
            weight: Weight::NORMAL,
            width: Width::NORMAL,
            italic: false,
        }
    }
}

impl From<&FontDescriptor> for LayoutSeed {
    fn from(desc: &FontDescriptor) -> Self {
        LayoutSeed {
            family: desc.family.clone(),
            weight: desc.weight,
            width: desc.width,
            italic: desc.italic,
        }
    }
}

/// Receives the physical faces an engine draws with
///
/// The native callback surface this stands in for has many methods; only
/// glyph-run observation matters here, so the trait has exactly one. Runs
/// are reported in drawing order.
pub trait RunSink {
    /// Called once per glyph run with the face actually used
    fn draw_run(&mut self, face: FaceRecord);
}

/// A text shaping engine capable of reporting per-run font fallback
///
/// [`SystemFallbackEngine`] is the default implementation; tests substitute
/// scripted fakes.
///
/// The core adds no locking of its own: implementations must be safely
/// callable from multiple threads.
///
/// [`SystemFallbackEngine`]: crate::SystemFallbackEngine
pub trait FallbackEngine: Send + Sync {
    /// Lay out `text` starting from `seed`, reporting each run to `sink`
    ///
    /// When `text` is empty no run is drawn and `sink` is never called;
    /// that is not an error.
    fn layout(&self, seed: &LayoutSeed, text: &str, sink: &mut dyn RunSink) -> Result<(), Error>;
}

/// Records the first face observed, ignoring the rest
#[derive(Debug, Default)]
pub(crate) struct CaptureSink {
    first: Option<FaceRecord>,
}

impl CaptureSink {
    pub(crate) fn into_face(self) -> Option<FaceRecord> {
        self.first
    }
}

impl RunSink for CaptureSink {
    fn draw_run(&mut self, face: FaceRecord) {
        if self.first.is_none() {
            self.first = Some(face);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedStrings;

    #[test]
    fn capture_keeps_first_run() {
        let mut sink = CaptureSink::default();
        sink.draw_run(FaceRecord {
            postscript_name: LocalizedStrings::unlocalized("First"),
            ..Default::default()
        });
        sink.draw_run(FaceRecord {
            postscript_name: LocalizedStrings::unlocalized("Second"),
            ..Default::default()
        });
        let face = sink.into_face().unwrap();
        assert_eq!(face.postscript_name.first(), Some("First"));
    }

    #[test]
    fn capture_empty_when_nothing_drawn() {
        assert!(CaptureSink::default().into_face().is_none());
    }
}
