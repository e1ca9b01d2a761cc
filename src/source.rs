// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The font enumeration provider boundary

use crate::locale::{LocalePreference, LocalizedStrings};
use crate::{Error, FontDescriptor, Weight, Width};
use std::path::PathBuf;

/// Metadata extraction failed for one font face
///
/// Raised by a [`FontSource`] for a single malformed face or family entry.
/// Never fatal: enumeration skips the item and continues, yielding a
/// best-effort, possibly-partial set.
#[derive(thiserror::Error, Debug)]
#[error("face metadata extraction failed: {0}")]
pub struct FaceError(pub String);

/// Raw metadata for one font face, as handed over by a [`FontSource`]
///
/// Name strings are kept as localized sets; resolution to plain strings
/// happens during descriptor extraction via the locale preference chain.
#[derive(Clone, Debug, Default)]
pub struct FaceRecord {
    /// Path of the backing font file; empty for in-memory faces
    pub path: PathBuf,
    /// Localized PostScript name strings
    pub postscript_name: LocalizedStrings,
    /// Localized family name strings
    pub family: LocalizedStrings,
    /// Localized style (subfamily) name strings
    pub style: LocalizedStrings,
    /// Weight reported by the provider
    pub weight: Weight,
    /// Width reported by the provider
    pub width: Width,
    /// Whether the face is italic
    pub italic: bool,
}

impl FaceRecord {
    /// Extract a [`FontDescriptor`], resolving name strings via `locale`
    ///
    /// A string field whose localized set is entirely absent becomes the
    /// empty string; this is deliberate, not a failure. The result is
    /// always fully populated.
    pub fn descriptor(&self, locale: &LocalePreference) -> FontDescriptor {
        let resolve = |s: &LocalizedStrings| locale.resolve(s).unwrap_or_default().to_string();
        FontDescriptor {
            path: self.path.clone(),
            postscript_name: resolve(&self.postscript_name),
            family: resolve(&self.family),
            style: resolve(&self.style),
            weight: self.weight,
            width: self.width,
            italic: self.italic,
            // Monospace detection is not implemented: the capability is not
            // available on every platform provider.
            monospace: false,
        }
    }
}

/// One font family from a [`FontSource`] collection
///
/// Individual faces may fail extraction; such entries carry the error in
/// place of the record so that enumeration can skip exactly that face.
#[derive(Debug, Default)]
pub struct FaceFamily {
    /// The family's faces, in discovery order
    pub faces: Vec<Result<FaceRecord, FaceError>>,
}

/// Access to the platform's installed-font catalogue
///
/// Implementations enumerate whatever the host system considers installed.
/// [`SystemSource`] is the default, backed by [`fontdb`]; tests substitute
/// in-memory fakes.
///
/// The core adds no locking of its own: implementations must be safely
/// callable from multiple threads.
///
/// [`SystemSource`]: crate::SystemSource
pub trait FontSource: Send + Sync {
    /// Acquire the full font collection
    ///
    /// Families and their faces are reported in the provider's discovery
    /// order, which fixes the order of every result set produced from them.
    ///
    /// Failure to acquire the collection itself is fatal to the calling
    /// operation ([`Error::PlatformUnavailable`]). An unavailable *face* is
    /// not: it is reported as an [`Err`] entry within its family.
    fn collection(&self) -> Result<Vec<FaceFamily>, Error>;
}
