// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! System font enumeration, matching and fallback resolution
//!
//! This library sits between a text/UI layer and the platform's font
//! services. It answers three questions:
//!
//! 1.  Which fonts are installed? ([`FontManager::available_fonts`])
//! 2.  Which installed font(s) best match a partial style query?
//!     ([`FontManager::find_fonts`], [`FontManager::find_font`])
//! 3.  Which physical font will *actually* draw a given piece of text, once
//!     the platform substitutes for glyphs the requested font lacks?
//!     ([`FontManager::substitute_font`])
//!
//! The platform is reached through two collaborator traits, [`FontSource`]
//! and [`FallbackEngine`]. Default implementations backed by [`fontdb`] are
//! provided ([`SystemSource`], [`SystemFallbackEngine`]); tests and
//! embedders may substitute their own.
//!
//! No state is cached between calls: every operation re-enumerates the
//! installed set. Callers needing performance should cache at a higher
//! layer.

use thiserror::Error;

mod descriptor;
pub use descriptor::{FontDescriptor, ResultSet, Weight, Width};

mod locale;
pub use locale::{Language, LocalePreference, LocalizedStrings};

mod source;
pub use source::{FaceError, FaceFamily, FaceRecord, FontSource};

mod matcher;

mod fallback;
pub use fallback::{FallbackEngine, LayoutSeed, RunSink};

mod system;
pub use system::{SystemFallbackEngine, SystemSource};

mod manager;
pub use manager::FontManager;

/// Errors reported by [`FontManager`] operations
///
/// Failures affecting a single font face during enumeration are not errors;
/// those faces are skipped (see [`FaceError`]).
#[derive(Error, Debug)]
pub enum Error {
    /// The platform's font collection or a shaping context could not be
    /// acquired. Fatal for the current call; there is no retry.
    #[error("platform font services unavailable: {0}")]
    PlatformUnavailable(String),
    /// No installed font exists at all
    ///
    /// Only reachable when the whole system font set is empty.
    #[error("no font installed")]
    NotFound,
}
