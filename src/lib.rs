#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Build-time shader variant stripping for the Aurora render pipeline.
//!
//! For every shader the build compiles, the shader compiler enumerates one
//! candidate variant per declared keyword combination, most of which the
//! shipped player can never select. This crate decides, per variant, whether
//! to keep or discard it, gated on the capabilities the active pipeline
//! configuration actually declares.
//!
//! The entry point is [`VariantFilter`]: construct it once per build session
//! from a [`BuildConfig`], then hand it each (shader, pass) candidate list
//! as compilation proceeds.
//!
//! ```rust
//! use aurora_strip::{BuildConfig, VariantFilter};
//!
//! let config = BuildConfig::from_json(r#"{ "default_asset": {} }"#)?;
//! // `None` means no pipeline is configured: pass variants through untouched.
//! let mut filter = VariantFilter::from_config(&config).expect("asset configured");
//!
//! let mut variants = vec![/* from the shader compiler */];
//! let report = filter.process(&mut variants);
//! println!("kept {}/{}", report.after, report.before);
//! # Ok::<(), aurora_strip::StripError>(())
//! ```

pub mod config;
pub mod errors;
pub mod features;
pub mod filter;
pub mod keyword;
pub mod report;
pub mod variant;

pub use config::{AdditionalLightsMode, BuildConfig, PipelineAssetConfig, ShaderQuality, StripSettings};
pub use errors::{Result, StripError};
pub use features::ShaderFeatures;
pub use filter::{StripReason, VariantFilter};
pub use keyword::KeywordSet;
pub use report::{PassReport, RunStats, VariantLogLevel};
pub use variant::{CompilerPlatform, PassType, ShaderStage, VariantDescriptor};
