//! Pipeline Feature Mask
//!
//! The set of high-level capabilities the active pipeline configuration
//! supports, used to gate whole families of keyword combinations during
//! stripping.
//!
//! A build can target several quality tiers at once, so the session mask is
//! the union of the features of the default pipeline asset and every
//! quality-tier asset ([`ShaderFeatures::union_of`]). The mask is computed
//! once at session start and is immutable afterwards; it travels by value
//! into [`VariantFilter`](crate::filter::VariantFilter).

use bitflags::bitflags;

use crate::config::{AdditionalLightsMode, PipelineAssetConfig, ShaderQuality};

bitflags! {
    /// Capabilities declared by the active pipeline configuration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShaderFeatures: u32 {
        /// Main directional light. Always present.
        const MAIN_LIGHT = 1 << 0;
        /// Shadow maps for the main light.
        const MAIN_LIGHT_SHADOWS = 1 << 1;
        /// Additional (point/spot) lights.
        const ADDITIONAL_LIGHTS = 1 << 2;
        /// Shadow maps for additional lights.
        const ADDITIONAL_LIGHT_SHADOWS = 1 << 3;
        /// Additional lights are shaded per vertex rather than per pixel.
        const VERTEX_LIGHTING = 1 << 4;
        /// PCF-filtered shadow sampling.
        const SOFT_SHADOWS = 1 << 5;
        /// Mixed (baked + realtime) lighting.
        const MIXED_LIGHTING = 1 << 6;
        /// Terrain hole clipping.
        const TERRAIN_HOLES = 1 << 7;
        const SHADER_QUALITY_LOW = 1 << 8;
        const SHADER_QUALITY_MEDIUM = 1 << 9;
        const SHADER_QUALITY_HIGH = 1 << 10;
    }
}

impl ShaderFeatures {
    /// Features a single pipeline asset requires from the shader library.
    ///
    /// Soft shadows are only meaningful when some shadow feature is present,
    /// so `SOFT_SHADOWS` is withheld unless the asset also supports main- or
    /// additional-light shadows. Exactly one quality flag is set per asset;
    /// tiers accumulate across assets in [`union_of`](Self::union_of).
    #[must_use]
    pub fn from_asset(asset: &PipelineAssetConfig) -> Self {
        let mut features = Self::MAIN_LIGHT;

        if asset.supports_main_light_shadows {
            features |= Self::MAIN_LIGHT_SHADOWS;
        }

        match asset.additional_lights {
            AdditionalLightsMode::PerVertex => {
                features |= Self::ADDITIONAL_LIGHTS | Self::VERTEX_LIGHTING;
            }
            AdditionalLightsMode::PerPixel => {
                features |= Self::ADDITIONAL_LIGHTS;
                if asset.supports_additional_light_shadows {
                    features |= Self::ADDITIONAL_LIGHT_SHADOWS;
                }
            }
            AdditionalLightsMode::Disabled => {}
        }

        let any_shadows = asset.supports_main_light_shadows
            || features.contains(Self::ADDITIONAL_LIGHT_SHADOWS);
        if asset.supports_soft_shadows && any_shadows {
            features |= Self::SOFT_SHADOWS;
        }

        if asset.supports_mixed_lighting {
            features |= Self::MIXED_LIGHTING;
        }

        if asset.supports_terrain_holes {
            features |= Self::TERRAIN_HOLES;
        }

        features |= match asset.shader_quality {
            ShaderQuality::Low => Self::SHADER_QUALITY_LOW,
            ShaderQuality::Medium => Self::SHADER_QUALITY_MEDIUM,
            ShaderQuality::High => Self::SHADER_QUALITY_HIGH,
        };

        features
    }

    /// Union of the feature requirements of every configured asset.
    #[must_use]
    pub fn union_of<'a, I>(assets: I) -> Self
    where
        I: IntoIterator<Item = &'a PipelineAssetConfig>,
    {
        assets
            .into_iter()
            .fold(Self::empty(), |acc, asset| acc | Self::from_asset(asset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_asset() -> PipelineAssetConfig {
        PipelineAssetConfig::default()
    }

    #[test]
    fn main_light_always_present() {
        let features = ShaderFeatures::from_asset(&base_asset());
        assert!(features.contains(ShaderFeatures::MAIN_LIGHT));
    }

    #[test]
    fn per_vertex_mode_sets_vertex_lighting_without_shadows() {
        let asset = PipelineAssetConfig {
            additional_lights: AdditionalLightsMode::PerVertex,
            supports_additional_light_shadows: true,
            ..base_asset()
        };
        let features = ShaderFeatures::from_asset(&asset);
        assert!(
            features.contains(ShaderFeatures::ADDITIONAL_LIGHTS | ShaderFeatures::VERTEX_LIGHTING)
        );
        // Per-vertex additional lights never sample shadow maps.
        assert!(!features.contains(ShaderFeatures::ADDITIONAL_LIGHT_SHADOWS));
    }

    #[test]
    fn per_pixel_mode_gates_additional_shadows_on_support() {
        let with = PipelineAssetConfig {
            additional_lights: AdditionalLightsMode::PerPixel,
            supports_additional_light_shadows: true,
            ..base_asset()
        };
        let without = PipelineAssetConfig {
            additional_lights: AdditionalLightsMode::PerPixel,
            supports_additional_light_shadows: false,
            ..base_asset()
        };
        assert!(
            ShaderFeatures::from_asset(&with).contains(ShaderFeatures::ADDITIONAL_LIGHT_SHADOWS)
        );
        assert!(
            !ShaderFeatures::from_asset(&without)
                .contains(ShaderFeatures::ADDITIONAL_LIGHT_SHADOWS)
        );
    }

    #[test]
    fn soft_shadows_require_a_shadow_feature() {
        let soft_only = PipelineAssetConfig {
            supports_soft_shadows: true,
            supports_main_light_shadows: false,
            ..base_asset()
        };
        assert!(
            !ShaderFeatures::from_asset(&soft_only).contains(ShaderFeatures::SOFT_SHADOWS)
        );

        let soft_with_main = PipelineAssetConfig {
            supports_soft_shadows: true,
            supports_main_light_shadows: true,
            ..base_asset()
        };
        assert!(
            ShaderFeatures::from_asset(&soft_with_main).contains(ShaderFeatures::SOFT_SHADOWS)
        );

        let soft_with_additional = PipelineAssetConfig {
            supports_soft_shadows: true,
            supports_main_light_shadows: false,
            additional_lights: AdditionalLightsMode::PerPixel,
            supports_additional_light_shadows: true,
            ..base_asset()
        };
        assert!(
            ShaderFeatures::from_asset(&soft_with_additional)
                .contains(ShaderFeatures::SOFT_SHADOWS)
        );
    }

    #[test]
    fn quality_tiers_accumulate_across_assets() {
        let low = PipelineAssetConfig {
            shader_quality: ShaderQuality::Low,
            ..base_asset()
        };
        let high = PipelineAssetConfig {
            shader_quality: ShaderQuality::High,
            ..base_asset()
        };
        let features = ShaderFeatures::union_of([&low, &high]);
        assert!(features.contains(
            ShaderFeatures::SHADER_QUALITY_LOW | ShaderFeatures::SHADER_QUALITY_HIGH
        ));
        assert!(!features.contains(ShaderFeatures::SHADER_QUALITY_MEDIUM));
    }

    #[test]
    fn union_of_nothing_is_empty() {
        assert_eq!(
            ShaderFeatures::union_of(std::iter::empty()),
            ShaderFeatures::empty()
        );
    }
}
