//! Build Configuration
//!
//! Pipeline asset configuration consumed by the variant filter.
//!
//! A project configures one default pipeline asset plus one asset per
//! quality tier; the filter unions the feature requirements of all of them
//! ([`ShaderFeatures::union_of`](crate::features::ShaderFeatures::union_of))
//! so a single player build can serve every configured tier.
//!
//! All types here deserialize from the build system's JSON description, the
//! same way the pipeline's other baked settings travel. Missing fields fall
//! back to the defaults below, so a minimal `{}` asset is valid.
//!
//! # Example
//!
//! ```rust,ignore
//! use aurora_strip::config::BuildConfig;
//!
//! let config = BuildConfig::from_json(r#"{
//!     "default_asset": { "shader_quality": "high" },
//!     "quality_assets": [ { "shader_quality": "low", "supports_soft_shadows": false } ]
//! }"#)?;
//! ```

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::report::VariantLogLevel;
use crate::variant::CompilerPlatform;

// ---------------------------------------------------------------------------
// Per-asset settings
// ---------------------------------------------------------------------------

/// How additional (point/spot) lights are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalLightsMode {
    /// No additional lights at all.
    Disabled,
    /// One lighting evaluation per vertex. Cheapest; no shadows.
    PerVertex,
    /// One lighting evaluation per pixel.
    #[default]
    PerPixel,
}

/// Shader library quality tier selected by one asset.
///
/// Each asset selects exactly one tier; a build that spans assets with
/// different tiers keeps the variants of every selected tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderQuality {
    Low,
    #[default]
    Medium,
    High,
}

/// Support flags declared by one pipeline asset (one quality tier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineAssetConfig {
    /// Shadow maps for the main directional light.
    pub supports_main_light_shadows: bool,
    /// Shading mode for additional lights.
    pub additional_lights: AdditionalLightsMode,
    /// Shadow maps for additional lights. Only honored in per-pixel mode.
    pub supports_additional_light_shadows: bool,
    /// PCF-filtered shadow sampling.
    pub supports_soft_shadows: bool,
    /// Mixed (baked + realtime) lighting.
    pub supports_mixed_lighting: bool,
    /// Terrain hole clipping.
    pub supports_terrain_holes: bool,
    /// Shader library quality tier.
    pub shader_quality: ShaderQuality,
}

impl Default for PipelineAssetConfig {
    fn default() -> Self {
        Self {
            supports_main_light_shadows: true,
            additional_lights: AdditionalLightsMode::PerPixel,
            supports_additional_light_shadows: false,
            supports_soft_shadows: false,
            supports_mixed_lighting: true,
            supports_terrain_holes: true,
            shader_quality: ShaderQuality::Medium,
        }
    }
}

// ---------------------------------------------------------------------------
// Session settings
// ---------------------------------------------------------------------------

/// Session-level stripping knobs.
///
/// Shader family matching is substring containment, case-sensitive, against
/// the full shader name (e.g. `"Aurora/Terrain/Lit"`). Which compile
/// targets cannot host cascade shadow maps is configuration data rather
/// than a hardcoded platform check, so downstream pipelines with a
/// different target catalog can reuse the filter unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripSettings {
    /// Diagnostic log verbosity. Never affects strip decisions.
    pub log_level: VariantLogLevel,
    /// Family tag identifying this pipeline's own shaders in log filtering.
    pub pipeline_family: String,
    /// Family tag of the terrain shaders whose alpha-test variants are tied
    /// to terrain-hole support.
    pub terrain_family: String,
    /// Family tag of the screen-space shadow resolve shaders.
    pub screen_space_shadows_family: String,
    /// Compile targets that cannot host cascade shadow maps.
    pub cascade_unsupported_platforms: FxHashSet<CompilerPlatform>,
}

impl Default for StripSettings {
    fn default() -> Self {
        Self {
            log_level: VariantLogLevel::Disabled,
            pipeline_family: "Aurora".to_string(),
            terrain_family: "Aurora/Terrain/Lit".to_string(),
            screen_space_shadows_family: "ScreenSpaceShadows".to_string(),
            cascade_unsupported_platforms: [CompilerPlatform::GlEs20].into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// BuildConfig
// ---------------------------------------------------------------------------

/// Everything the stripping session needs, in one deserializable unit.
///
/// `default_asset` mirrors the project-wide pipeline asset;
/// `quality_assets` mirrors the per-quality-tier overrides. A config with
/// neither means no pipeline is active and the filter must not run; see
/// [`VariantFilter::from_config`](crate::filter::VariantFilter::from_config).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub default_asset: Option<PipelineAssetConfig>,
    pub quality_assets: Vec<PipelineAssetConfig>,
    pub settings: StripSettings,
}

impl BuildConfig {
    /// Parse a build configuration from its JSON description.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a build configuration from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// All configured assets: the default asset (if any) followed by the
    /// quality-tier assets.
    pub fn assets(&self) -> impl Iterator<Item = &PipelineAssetConfig> {
        self.default_asset.iter().chain(self.quality_assets.iter())
    }

    /// `true` when no pipeline asset is configured at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default_asset.is_none() && self.quality_assets.is_empty()
    }
}
