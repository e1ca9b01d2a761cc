// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Query matching
//!
//! A query is itself a [`FontDescriptor`]: empty string fields and
//! zero-valued axes mean "don't constrain". The two booleans are always
//! constraints; `italic: false` demands an upright face.

use crate::FontDescriptor;

/// Whether `candidate` satisfies every constraint of `query`
///
/// A conjunction of per-field tests, short-circuiting on the first failure.
/// All comparisons are exact; there is no scoring or nearest-match logic,
/// and `path` is never consulted.
pub(crate) fn matches(candidate: &FontDescriptor, query: &FontDescriptor) -> bool {
    if !query.postscript_name.is_empty() && query.postscript_name != candidate.postscript_name {
        return false;
    }
    if !query.family.is_empty() && query.family != candidate.family {
        return false;
    }
    if !query.style.is_empty() && query.style != candidate.style {
        return false;
    }
    if !query.weight.is_unspecified() && query.weight != candidate.weight {
        return false;
    }
    if !query.width.is_unspecified() && query.width != candidate.width {
        return false;
    }
    if query.italic != candidate.italic {
        return false;
    }
    if query.monospace != candidate.monospace {
        return false;
    }
    true
}

/// Relax `query` to its general traits
///
/// Keeps weight, width and italic; drops all names and forces monospace
/// off. Used as the second matching tier: "find something with these
/// general traits, ignoring names".
pub(crate) fn relax_to_traits(query: &FontDescriptor) -> FontDescriptor {
    FontDescriptor {
        weight: query.weight,
        width: query.width,
        italic: query.italic,
        ..Default::default()
    }
}
