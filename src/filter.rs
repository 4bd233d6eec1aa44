//! Variant Filter
//!
//! The stripping rule engine. For each candidate variant the filter
//! evaluates six independent rule groups and discards the variant as soon
//! as one matches:
//!
//! 1. [`UnusedShader`](StripReason::UnusedShader): whole shader families
//!    whose top-level feature is off.
//! 2. [`UnusedPass`](StripReason::UnusedPass): pass kinds the build never
//!    executes.
//! 3. [`UnusedFeature`](StripReason::UnusedFeature): keywords whose
//!    backing pipeline feature is off.
//! 4. [`UnsupportedVariant`](StripReason::UnsupportedVariant): combinations
//!    the runtime cannot execute on the compile target.
//! 5. [`InvalidCombination`](StripReason::InvalidCombination): keyword
//!    combinations that are meaningless regardless of configuration.
//! 6. [`DeprecatedKeyword`](StripReason::DeprecatedKeyword): legacy
//!    keywords, stripped unconditionally.
//!
//! The groups do not overlap in effect, so evaluation order only matters
//! for performance (cheap name/pass checks first). [`VariantFilter::explain`]
//! evaluates every group without short-circuiting for diagnostics.
//!
//! The filter is constructed once per build session from the active
//! configuration and then invoked once per (shader, pass) compilation unit.
//! There is no global state: the feature mask is computed up front and owned
//! by the filter, and the session counters live next to it.

use smallvec::SmallVec;

use crate::config::{BuildConfig, StripSettings};
use crate::features::ShaderFeatures;
use crate::keyword::KeywordSet;
use crate::report::{self, PassReport, RunStats};
use crate::variant::{PassType, VariantDescriptor};

/// Which rule group discarded a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripReason {
    /// Shader family is unused under the active feature mask.
    UnusedShader,
    /// Pass kind is never executed by this build.
    UnusedPass,
    /// A keyword's backing pipeline feature is disabled.
    UnusedFeature,
    /// The compile target cannot execute this combination.
    UnsupportedVariant,
    /// Keyword combination is meaningless in any configuration.
    InvalidCombination,
    /// A legacy keyword from the pre-release shader library is enabled.
    DeprecatedKeyword,
}

/// The stripping rule engine. See the [module docs](self) for the rule
/// catalog.
#[derive(Debug, Clone)]
pub struct VariantFilter {
    features: ShaderFeatures,
    settings: StripSettings,
    stats: RunStats,
}

impl VariantFilter {
    /// Filter over an explicit feature mask.
    #[must_use]
    pub fn new(features: ShaderFeatures, settings: StripSettings) -> Self {
        Self {
            features,
            settings,
            stats: RunStats::default(),
        }
    }

    /// Filter for a build session described by `config`.
    ///
    /// Returns `None` when no pipeline asset is configured: stripping must
    /// not run at all in that case, and the caller passes every variant
    /// list through untouched. Re-invoke once configuration is available.
    #[must_use]
    pub fn from_config(config: &BuildConfig) -> Option<Self> {
        if config.is_empty() {
            return None;
        }
        let features = ShaderFeatures::union_of(config.assets());
        Some(Self::new(features, config.settings.clone()))
    }

    /// The session feature mask this filter gates against.
    #[inline]
    #[must_use]
    pub fn features(&self) -> ShaderFeatures {
        self.features
    }

    /// Session counters accumulated so far.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    // ─── Rule groups ─────────────────────────────────────────────────────────

    fn strip_unused_shader(&self, variant: &VariantDescriptor) -> bool {
        !self.features.contains(ShaderFeatures::MAIN_LIGHT_SHADOWS)
            && variant
                .shader_name
                .contains(&self.settings.screen_space_shadows_family)
    }

    fn strip_unused_pass(&self, variant: &VariantDescriptor) -> bool {
        if variant.pass_type == PassType::Meta {
            return true;
        }

        variant.pass_type == PassType::ShadowCaster
            && !self.features.intersects(
                ShaderFeatures::MAIN_LIGHT_SHADOWS | ShaderFeatures::ADDITIONAL_LIGHT_SHADOWS,
            )
    }

    #[allow(clippy::similar_names)]
    fn strip_unused_features(&self, variant: &VariantDescriptor) -> bool {
        let keywords = variant.keywords;

        for (feature, keyword) in [
            (
                ShaderFeatures::SHADER_QUALITY_LOW,
                KeywordSet::SHADER_QUALITY_LOW,
            ),
            (
                ShaderFeatures::SHADER_QUALITY_MEDIUM,
                KeywordSet::SHADER_QUALITY_MEDIUM,
            ),
            (
                ShaderFeatures::SHADER_QUALITY_HIGH,
                KeywordSet::SHADER_QUALITY_HIGH,
            ),
        ] {
            if !self.features.contains(feature) && keywords.contains(keyword) {
                return true;
            }
        }

        // Main light shadow and cascade variants.
        if !self.features.contains(ShaderFeatures::MAIN_LIGHT_SHADOWS)
            && keywords.intersects(
                KeywordSet::MAIN_LIGHT_SHADOWS | KeywordSet::MAIN_LIGHT_SHADOWS_CASCADE,
            )
        {
            return true;
        }

        let per_vertex = keywords.contains(KeywordSet::ADDITIONAL_LIGHTS_VERTEX);
        let per_pixel = keywords.contains(KeywordSet::ADDITIONAL_LIGHTS_PIXEL);
        let shadow = keywords.contains(KeywordSet::ADDITIONAL_LIGHT_SHADOWS);

        // Additional lights are shaded per vertex: per-pixel and shadow
        // variants can never be selected.
        if (per_pixel || shadow)
            && self.features.contains(ShaderFeatures::VERTEX_LIGHTING)
        {
            return true;
        }

        // No additional lights at all.
        if (per_vertex || per_pixel || shadow)
            && !self.features.contains(ShaderFeatures::ADDITIONAL_LIGHTS)
        {
            return true;
        }

        // No additional light shadows.
        if shadow && !self.features.contains(ShaderFeatures::ADDITIONAL_LIGHT_SHADOWS) {
            return true;
        }

        if !self.features.contains(ShaderFeatures::SOFT_SHADOWS)
            && keywords.contains(KeywordSet::SOFT_SHADOWS)
        {
            return true;
        }

        if !self.features.contains(ShaderFeatures::MIXED_LIGHTING)
            && keywords.contains(KeywordSet::MIXED_LIGHTING_SUBTRACTIVE)
        {
            return true;
        }

        // Terrain hole clipping only exists in the terrain shader family.
        if !self.features.contains(ShaderFeatures::TERRAIN_HOLES)
            && variant.shader_name.contains(&self.settings.terrain_family)
            && keywords.contains(KeywordSet::ALPHATEST_ON)
        {
            return true;
        }

        false
    }

    fn strip_unsupported_variants(&self, variant: &VariantDescriptor) -> bool {
        let keywords = variant.keywords;

        // Directional lightmaps are meaningless without the base lightmap.
        if keywords.contains(KeywordSet::DIRLIGHTMAP_COMBINED)
            && !keywords.contains(KeywordSet::LIGHTMAP_ON)
        {
            return true;
        }

        self.settings
            .cascade_unsupported_platforms
            .contains(&variant.platform)
            && keywords.contains(KeywordSet::MAIN_LIGHT_SHADOWS_CASCADE)
    }

    fn strip_invalid_variants(&self, variant: &VariantDescriptor) -> bool {
        let keywords = variant.keywords;
        let main_shadow = keywords.contains(KeywordSet::MAIN_LIGHT_SHADOWS);
        let additional_shadow = keywords.contains(KeywordSet::ADDITIONAL_LIGHT_SHADOWS);
        let shadow_variant = main_shadow || additional_shadow;

        // Cascades imply main light shadows.
        if !main_shadow && keywords.contains(KeywordSet::MAIN_LIGHT_SHADOWS_CASCADE) {
            return true;
        }

        // Soft shadows are a filter over some shadow variant.
        if !shadow_variant && keywords.contains(KeywordSet::SOFT_SHADOWS) {
            return true;
        }

        // Additional light shadows require per-pixel additional lights.
        if additional_shadow && !keywords.contains(KeywordSet::ADDITIONAL_LIGHTS_PIXEL) {
            return true;
        }

        false
    }

    fn strip_deprecated(&self, variant: &VariantDescriptor) -> bool {
        variant.keywords.has_deprecated()
    }

    // ─── Decisions ───────────────────────────────────────────────────────────

    /// First rule group that discards `variant`, in evaluation order, or
    /// `None` to keep it. Pure: no counters, no logging.
    #[must_use]
    pub fn strip_reason(&self, variant: &VariantDescriptor) -> Option<StripReason> {
        if self.strip_unused_shader(variant) {
            return Some(StripReason::UnusedShader);
        }
        if self.strip_unused_pass(variant) {
            return Some(StripReason::UnusedPass);
        }
        if self.strip_unused_features(variant) {
            return Some(StripReason::UnusedFeature);
        }
        if self.strip_unsupported_variants(variant) {
            return Some(StripReason::UnsupportedVariant);
        }
        if self.strip_invalid_variants(variant) {
            return Some(StripReason::InvalidCombination);
        }
        if self.strip_deprecated(variant) {
            return Some(StripReason::DeprecatedKeyword);
        }
        None
    }

    /// Keep/discard decision for one variant. Pure.
    #[inline]
    #[must_use]
    pub fn should_strip(&self, variant: &VariantDescriptor) -> bool {
        self.strip_reason(variant).is_some()
    }

    /// Every rule group that would discard `variant`, without
    /// short-circuiting. Diagnostic companion to [`strip_reason`]
    /// (which reports only the first match).
    ///
    /// [`strip_reason`]: Self::strip_reason
    #[must_use]
    pub fn explain(&self, variant: &VariantDescriptor) -> SmallVec<[StripReason; 4]> {
        let rules: [(fn(&Self, &VariantDescriptor) -> bool, StripReason); 6] = [
            (Self::strip_unused_shader, StripReason::UnusedShader),
            (Self::strip_unused_pass, StripReason::UnusedPass),
            (Self::strip_unused_features, StripReason::UnusedFeature),
            (
                Self::strip_unsupported_variants,
                StripReason::UnsupportedVariant,
            ),
            (
                Self::strip_invalid_variants,
                StripReason::InvalidCombination,
            ),
            (Self::strip_deprecated, StripReason::DeprecatedKeyword),
        ];
        rules
            .iter()
            .filter(|(rule, _)| rule(self, variant))
            .map(|&(_, reason)| reason)
            .collect()
    }

    // ─── Batch processing ────────────────────────────────────────────────────

    /// Filter one (shader, pass) compilation unit in place.
    ///
    /// `variants` is the compiler's candidate list for a single shader pass;
    /// discarded entries are removed, relative order of the survivors is
    /// preserved. Session counters advance by the list's before/after
    /// counts, and one diagnostic line is logged per invocation when the
    /// configured [`VariantLogLevel`](crate::report::VariantLogLevel) asks
    /// for this shader.
    ///
    /// An empty list is a no-op: no counters, no log line.
    pub fn process(&mut self, variants: &mut Vec<VariantDescriptor>) -> PassReport {
        let before = variants.len();
        if before == 0 {
            return PassReport {
                before: 0,
                after: 0,
                totals: self.stats,
            };
        }

        // All entries in one unit share shader/pass identity; the first one
        // labels the log line.
        let shader_name = variants[0].shader_name.clone();
        let pass_name = variants[0].pass_name.clone();
        let pass_type = variants[0].pass_type;
        let stage = variants[0].stage;

        variants.retain(|variant| self.strip_reason(variant).is_none());
        let after = variants.len();

        self.stats.seen += before as u64;
        self.stats.kept += after as u64;

        let pass_report = PassReport {
            before,
            after,
            totals: self.stats,
        };

        if self
            .settings
            .log_level
            .wants(&shader_name, &self.settings.pipeline_family)
        {
            report::log_pass(&shader_name, &pass_name, pass_type, stage, &pass_report);
        }

        pass_report
    }
}
