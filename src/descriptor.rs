// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font descriptors and result sets

use std::collections::HashSet;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The degree of blackness or stroke thickness of a font
///
/// Values follow the OpenType `usWeightClass` scale, from 100 (thin) to
/// 900 (black). The value 0 is reserved: in a query it means "any weight".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Weight(pub u16);

impl Weight {
    /// No constraint (query wildcard). This is the default value.
    pub const UNSPECIFIED: Weight = Weight(0);
    /// Thin weight (100), the thinnest value.
    pub const THIN: Weight = Weight(100);
    /// Extra light weight (200).
    pub const EXTRA_LIGHT: Weight = Weight(200);
    /// Light weight (300).
    pub const LIGHT: Weight = Weight(300);
    /// Normal (400).
    pub const NORMAL: Weight = Weight(400);
    /// Medium weight (500, higher than normal).
    pub const MEDIUM: Weight = Weight(500);
    /// Semibold weight (600).
    pub const SEMIBOLD: Weight = Weight(600);
    /// Bold weight (700).
    pub const BOLD: Weight = Weight(700);
    /// Extra-bold weight (800).
    pub const EXTRA_BOLD: Weight = Weight(800);
    /// Black weight (900), the thickest value.
    pub const BLACK: Weight = Weight(900);

    /// Whether this is the query wildcard
    #[inline]
    pub fn is_unspecified(self) -> bool {
        self.0 == 0
    }
}

/// The width of a font relative to the normal aspect ratio
///
/// Values are the nine OpenType `usWidthClass` ordinals, from 1
/// (ultra-condensed) to 9 (ultra-expanded). The value 0 is reserved: in a
/// query it means "any width".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Width(pub u16);

impl Width {
    /// No constraint (query wildcard). This is the default value.
    pub const UNSPECIFIED: Width = Width(0);
    /// Ultra-condensed width (50%), the narrowest possible.
    pub const ULTRA_CONDENSED: Width = Width(1);
    /// Extra-condensed width (62.5%).
    pub const EXTRA_CONDENSED: Width = Width(2);
    /// Condensed width (75%).
    pub const CONDENSED: Width = Width(3);
    /// Semi-condensed width (87.5%).
    pub const SEMI_CONDENSED: Width = Width(4);
    /// Normal width (100%).
    pub const NORMAL: Width = Width(5);
    /// Semi-expanded width (112.5%).
    pub const SEMI_EXPANDED: Width = Width(6);
    /// Expanded width (125%).
    pub const EXPANDED: Width = Width(7);
    /// Extra-expanded width (150%).
    pub const EXTRA_EXPANDED: Width = Width(8);
    /// Ultra-expanded width (200%), the widest possible.
    pub const ULTRA_EXPANDED: Width = Width(9);

    /// Whether this is the query wildcard
    #[inline]
    pub fn is_unspecified(self) -> bool {
        self.0 == 0
    }
}

/// Identity and style traits of one font
///
/// A descriptor plays two roles:
///
/// -   returned from enumeration, it describes one installed font face; in
///     this role at least one of `postscript_name` and `family` is non-empty
///     (see [`FontDescriptor::dedup_key`]);
/// -   used as a *query*, any string field may be empty and any of
///     `weight`/`width` may be [unspecified], meaning "don't constrain".
///     The booleans `italic` and `monospace` are never wildcards: `false`
///     is a meaningful constraint.
///
/// Descriptors are plain values with no back-references; they are freely
/// cloned and independently dropped.
///
/// [unspecified]: Weight::UNSPECIFIED
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontDescriptor {
    /// Path of the backing font file; empty for in-memory fonts
    ///
    /// Never consulted during matching.
    pub path: PathBuf,
    /// PostScript name, the globally distinguishing identifier
    pub postscript_name: String,
    /// Family name, e.g. "Arial"
    pub family: String,
    /// Style (subfamily) name, e.g. "Bold Italic"
    pub style: String,
    /// Weight axis
    pub weight: Weight,
    /// Width (stretch) axis
    pub width: Width,
    /// Whether the face is italic
    pub italic: bool,
    /// Whether the face is monospaced
    pub monospace: bool,
}

impl FontDescriptor {
    /// An unconstrained query descriptor
    ///
    /// Synonym for default: all string fields empty, both axes unspecified,
    /// `italic` and `monospace` false (which *does* constrain; see above).
    #[inline]
    pub fn new() -> Self {
        FontDescriptor::default()
    }

    /// Set the PostScript name constraint
    #[inline]
    pub fn with_postscript_name(mut self, name: impl Into<String>) -> Self {
        self.postscript_name = name.into();
        self
    }

    /// Set the family name constraint
    #[inline]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Set the style name constraint
    #[inline]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the weight constraint
    #[inline]
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Set the width constraint
    #[inline]
    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    /// Require an italic face
    #[inline]
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// The key under which this descriptor is deduplicated
    ///
    /// This is the PostScript name if non-empty, else the family name if
    /// non-empty, else `None`. A descriptor with no key cannot be
    /// meaningfully distinguished or matched and is never retained in a
    /// [`ResultSet`].
    pub fn dedup_key(&self) -> Option<&str> {
        if !self.postscript_name.is_empty() {
            Some(&self.postscript_name)
        } else if !self.family.is_empty() {
            Some(&self.family)
        } else {
            None
        }
    }
}

/// An ordered, duplicate-free sequence of font descriptors
///
/// Insertion order is preserved. Uniqueness is enforced at insertion time
/// over [`FontDescriptor::dedup_key`]: the first descriptor seen under a
/// key wins and later ones are discarded, as are descriptors without a key.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    fonts: Vec<FontDescriptor>,
    keys: HashSet<String>,
}

impl ResultSet {
    /// Construct an empty set
    #[inline]
    pub fn new() -> Self {
        ResultSet::default()
    }

    /// Append `font`, unless its dedup key is absent or already present
    ///
    /// Returns whether the descriptor was retained.
    pub fn push(&mut self, font: FontDescriptor) -> bool {
        let Some(key) = font.dedup_key() else {
            return false;
        };
        if !self.keys.insert(key.to_string()) {
            return false;
        }
        self.fonts.push(font);
        true
    }

    /// Number of descriptors in the set
    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether the set is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The first descriptor, in insertion order
    #[inline]
    pub fn first(&self) -> Option<&FontDescriptor> {
        self.fonts.first()
    }

    /// Access the descriptors as a slice, in insertion order
    #[inline]
    pub fn as_slice(&self) -> &[FontDescriptor] {
        &self.fonts
    }

    /// Iterate over the descriptors, in insertion order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, FontDescriptor> {
        self.fonts.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = FontDescriptor;
    type IntoIter = std::vec::IntoIter<FontDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fonts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a FontDescriptor;
    type IntoIter = std::slice::Iter<'a, FontDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fonts.iter()
    }
}
