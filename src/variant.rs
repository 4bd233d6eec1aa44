//! Variant Descriptors
//!
//! Plain-data mirrors of what the shader compiler hands the build pipeline
//! for each candidate variant: which shader, which pass, which stage, which
//! compile target, and which keywords are enabled. Descriptors are transient
//! (the compiler owns them, the filter only reads them).

use serde::{Deserialize, Serialize};

use crate::keyword::KeywordSet;

/// Rendering purpose of a shader pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassType {
    /// Regular forward rendering pass.
    Forward,
    /// Depth-only prepass.
    DepthOnly,
    /// Shadow map rendering pass.
    ShadowCaster,
    /// Lightmapper metadata pass. Editor-only; never shipped.
    Meta,
}

/// Shader stage a variant is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
}

/// Compile target reported by the shader compiler.
///
/// The catalog is open-ended; stripping rules never compare platforms
/// directly, they consult the configured platform sets in
/// [`StripSettings`](crate::config::StripSettings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilerPlatform {
    Vulkan,
    Metal,
    D3d11,
    GlEs20,
    GlEs3x,
    WebGpu,
}

/// One candidate shader variant: a (shader, pass, keyword combination)
/// triple plus compile target and stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantDescriptor {
    /// Full shader name, e.g. `"Aurora/Lit"`.
    pub shader_name: String,
    /// Name of the pass within the shader, e.g. `"ShadowCaster"`.
    pub pass_name: String,
    pub pass_type: PassType,
    pub stage: ShaderStage,
    pub platform: CompilerPlatform,
    /// Keywords enabled for this particular combination.
    pub keywords: KeywordSet,
}

impl VariantDescriptor {
    /// Descriptor with no keywords, targeting Vulkan, vertex stage.
    #[must_use]
    pub fn new(shader_name: impl Into<String>, pass_type: PassType) -> Self {
        Self {
            shader_name: shader_name.into(),
            pass_name: String::new(),
            pass_type,
            stage: ShaderStage::Vertex,
            platform: CompilerPlatform::Vulkan,
            keywords: KeywordSet::empty(),
        }
    }

    #[must_use]
    pub fn with_pass_name(mut self, pass_name: impl Into<String>) -> Self {
        self.pass_name = pass_name.into();
        self
    }

    #[must_use]
    pub fn with_stage(mut self, stage: ShaderStage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: CompilerPlatform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }
}
