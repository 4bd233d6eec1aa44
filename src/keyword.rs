//! Shader Keyword Catalog
//!
//! The set of preprocessor keywords the stripping rules know about, as a
//! closed bit-set. Keyword membership tests are the hot path of the filter
//! (one test per rule per variant), so keywords are resolved to bits once at
//! the compiler boundary and never compared as strings afterwards.
//!
//! The canonical source-level spelling of each keyword (the string the shader
//! compiler reports) is available through [`KeywordSet::from_name`] and
//! [`KeywordSet::names`]; unknown spellings are an error at the boundary,
//! never a panic.

use bitflags::bitflags;

use crate::errors::{Result, StripError};

bitflags! {
    /// Set of enabled shader preprocessor keywords for one variant.
    ///
    /// Each flag corresponds to one keyword the Aurora shader library
    /// declares via `#pragma multi_compile` / `shader_feature`. Keywords
    /// outside this catalog are irrelevant to stripping and are dropped by
    /// the caller before descriptors are built.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeywordSet: u32 {
        /// `_MAIN_LIGHT_SHADOWS`: main directional light shadow sampling.
        const MAIN_LIGHT_SHADOWS = 1 << 0;
        /// `_MAIN_LIGHT_SHADOWS_CASCADE`: cascaded shadow maps for the main light.
        const MAIN_LIGHT_SHADOWS_CASCADE = 1 << 1;
        /// `_ADDITIONAL_LIGHTS_VERTEX`: additional lights shaded per vertex.
        const ADDITIONAL_LIGHTS_VERTEX = 1 << 2;
        /// `_ADDITIONAL_LIGHTS_PIXEL`: additional lights shaded per pixel.
        const ADDITIONAL_LIGHTS_PIXEL = 1 << 3;
        /// `_ADDITIONAL_LIGHT_SHADOWS`: shadow sampling for additional lights.
        const ADDITIONAL_LIGHT_SHADOWS = 1 << 4;
        /// `_SOFT_SHADOWS`: PCF-filtered shadow sampling.
        const SOFT_SHADOWS = 1 << 5;
        /// `_MIXED_LIGHTING_SUBTRACTIVE`: subtractive baked/realtime mixing.
        const MIXED_LIGHTING_SUBTRACTIVE = 1 << 6;
        /// `LIGHTMAP_ON`: baked lightmap sampling.
        const LIGHTMAP_ON = 1 << 7;
        /// `DIRLIGHTMAP_COMBINED`: directional baked lightmaps.
        const DIRLIGHTMAP_COMBINED = 1 << 8;
        /// `_ALPHATEST_ON`: alpha-clip discard.
        const ALPHATEST_ON = 1 << 9;
        /// `_SHADER_QUALITY_LOW`
        const SHADER_QUALITY_LOW = 1 << 10;
        /// `_SHADER_QUALITY_MEDIUM`
        const SHADER_QUALITY_MEDIUM = 1 << 11;
        /// `_SHADER_QUALITY_HIGH`
        const SHADER_QUALITY_HIGH = 1 << 12;

        // Keywords from the pre-release shader library. Still reported by
        // older shaders in user projects; always stripped.

        /// `_VERTEX_LIGHTS` (deprecated)
        const VERTEX_LIGHTS = 1 << 13;
        /// `_SHADOWS_ENABLED` (deprecated)
        const SHADOWS_ENABLED = 1 << 14;
        /// `_SHADOWS_CASCADE` (deprecated)
        const SHADOWS_CASCADE = 1 << 15;
        /// `_LOCAL_SHADOWS_ENABLED` (deprecated)
        const LOCAL_SHADOWS_ENABLED = 1 << 16;

        /// Union of all deprecated keywords.
        const DEPRECATED = Self::VERTEX_LIGHTS.bits()
            | Self::SHADOWS_ENABLED.bits()
            | Self::SHADOWS_CASCADE.bits()
            | Self::LOCAL_SHADOWS_ENABLED.bits();
    }
}

/// Canonical (flag, source spelling) table, in declaration order.
const NAME_TABLE: &[(KeywordSet, &str)] = &[
    (KeywordSet::MAIN_LIGHT_SHADOWS, "_MAIN_LIGHT_SHADOWS"),
    (
        KeywordSet::MAIN_LIGHT_SHADOWS_CASCADE,
        "_MAIN_LIGHT_SHADOWS_CASCADE",
    ),
    (
        KeywordSet::ADDITIONAL_LIGHTS_VERTEX,
        "_ADDITIONAL_LIGHTS_VERTEX",
    ),
    (
        KeywordSet::ADDITIONAL_LIGHTS_PIXEL,
        "_ADDITIONAL_LIGHTS_PIXEL",
    ),
    (
        KeywordSet::ADDITIONAL_LIGHT_SHADOWS,
        "_ADDITIONAL_LIGHT_SHADOWS",
    ),
    (KeywordSet::SOFT_SHADOWS, "_SOFT_SHADOWS"),
    (
        KeywordSet::MIXED_LIGHTING_SUBTRACTIVE,
        "_MIXED_LIGHTING_SUBTRACTIVE",
    ),
    (KeywordSet::LIGHTMAP_ON, "LIGHTMAP_ON"),
    (KeywordSet::DIRLIGHTMAP_COMBINED, "DIRLIGHTMAP_COMBINED"),
    (KeywordSet::ALPHATEST_ON, "_ALPHATEST_ON"),
    (KeywordSet::SHADER_QUALITY_LOW, "_SHADER_QUALITY_LOW"),
    (KeywordSet::SHADER_QUALITY_MEDIUM, "_SHADER_QUALITY_MEDIUM"),
    (KeywordSet::SHADER_QUALITY_HIGH, "_SHADER_QUALITY_HIGH"),
    (KeywordSet::VERTEX_LIGHTS, "_VERTEX_LIGHTS"),
    (KeywordSet::SHADOWS_ENABLED, "_SHADOWS_ENABLED"),
    (KeywordSet::SHADOWS_CASCADE, "_SHADOWS_CASCADE"),
    (
        KeywordSet::LOCAL_SHADOWS_ENABLED,
        "_LOCAL_SHADOWS_ENABLED",
    ),
];

impl KeywordSet {
    /// Resolve one source-level keyword spelling to its flag.
    ///
    /// Matching is exact and case-sensitive, mirroring how the shader
    /// compiler reports enabled keywords.
    pub fn from_name(name: &str) -> Result<Self> {
        NAME_TABLE
            .iter()
            .find(|(_, n)| *n == name)
            .map(|&(kw, _)| kw)
            .ok_or_else(|| StripError::UnknownKeyword(name.to_string()))
    }

    /// Build a set from a list of source-level spellings.
    ///
    /// Fails on the first unknown spelling.
    pub fn from_names<'a, I>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::empty();
        for name in names {
            set |= Self::from_name(name)?;
        }
        Ok(set)
    }

    /// Iterate the source-level spellings of all keywords in this set,
    /// in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let set = *self;
        NAME_TABLE
            .iter()
            .filter(move |(kw, _)| set.contains(*kw))
            .map(|&(_, n)| n)
    }

    /// `true` when any deprecated keyword is enabled.
    #[inline]
    #[must_use]
    pub fn has_deprecated(&self) -> bool {
        self.intersects(Self::DEPRECATED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_resolves_catalog_spellings() {
        assert_eq!(
            KeywordSet::from_name("_MAIN_LIGHT_SHADOWS").unwrap(),
            KeywordSet::MAIN_LIGHT_SHADOWS
        );
        assert_eq!(
            KeywordSet::from_name("LIGHTMAP_ON").unwrap(),
            KeywordSet::LIGHTMAP_ON
        );
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert!(KeywordSet::from_name("lightmap_on").is_err());
        assert!(KeywordSet::from_name("_main_light_shadows").is_err());
    }

    #[test]
    fn from_names_collects_and_fails_on_unknown() {
        let set =
            KeywordSet::from_names(["_MAIN_LIGHT_SHADOWS", "_SOFT_SHADOWS"]).unwrap();
        assert!(set.contains(KeywordSet::MAIN_LIGHT_SHADOWS | KeywordSet::SOFT_SHADOWS));

        let err = KeywordSet::from_names(["_MAIN_LIGHT_SHADOWS", "_NOT_A_KEYWORD"]);
        assert!(matches!(err, Err(StripError::UnknownKeyword(n)) if n == "_NOT_A_KEYWORD"));
    }

    #[test]
    fn names_round_trip() {
        let set = KeywordSet::ADDITIONAL_LIGHTS_PIXEL
            | KeywordSet::ADDITIONAL_LIGHT_SHADOWS
            | KeywordSet::ALPHATEST_ON;
        let names: Vec<_> = set.names().collect();
        assert_eq!(KeywordSet::from_names(names.iter().copied()).unwrap(), set);
    }

    #[test]
    fn deprecated_union_covers_all_legacy_keywords() {
        for kw in [
            KeywordSet::VERTEX_LIGHTS,
            KeywordSet::SHADOWS_ENABLED,
            KeywordSet::SHADOWS_CASCADE,
            KeywordSet::LOCAL_SHADOWS_ENABLED,
        ] {
            assert!(kw.has_deprecated());
        }
        assert!(!KeywordSet::MAIN_LIGHT_SHADOWS.has_deprecated());
    }

    #[test]
    fn name_table_matches_catalog() {
        // Every single-bit flag must have exactly one spelling.
        let all: KeywordSet = NAME_TABLE
            .iter()
            .fold(KeywordSet::empty(), |acc, &(kw, _)| acc | kw);
        assert_eq!(all, KeywordSet::all());
        assert_eq!(NAME_TABLE.len(), KeywordSet::all().iter().count());
    }
}
