//! Adaptive wave-field background pipeline
//!
//! Draws an animated, parallax-reactive field of points behind web content
//! and degrades across three rendering tiers based on what the browser can
//! do:
//! - GPU point rendering (wgpu over WebGPU or WebGL2)
//! - DOM elements positioned with CSS 3D transforms
//! - A static CSS background
//!
//! ## Architecture
//!
//! - [`config`]: Presets, overrides and the immutable [`RenderConfig`]
//! - [`geometry`]: Position and scale buffers and the closed-form wave
//! - [`math`]: Screen-space types and the perspective camera
//! - [`interaction`]: Pointer tracking and parallax smoothing
//! - [`tier`]: Tier state machine, the [`TierRenderer`] trait and tier math
//! - [`platform`]: The host seam ([`Platform`])
//! - [`pipeline`]: [`PipelineController`], which ties everything together
//!
//! ## Example
//!
//! ```rust,ignore
//! use wavefield::{InitOptions, PipelineController};
//!
//! let mut pipeline = PipelineController::new(platform);
//! pipeline.init(&InitOptions::with_preset("waves")).await;
//! // host calls pipeline.frame(now_ms) from its animation callback
//! // and pipeline.handle(event) from its event listeners
//! pipeline.destroy();
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: State machine, geometry and config are testable without a browser
//! 2. **One Seam**: Every browser call goes through [`Platform`]
//! 3. **Monotonic Degradation**: A tier that fails is never re-entered

pub mod capability;
pub mod config;
pub mod geometry;
pub mod interaction;
pub mod math;
pub mod pipeline;
pub mod platform;
pub mod tier;

// Browser platform and tier renderers (only available with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod web;

pub use capability::Capability;
pub use config::{resolve, Color, ConfigError, ConfigOverrides, Preset, RenderConfig, MAX_POINTS};
pub use geometry::{FieldGeometry, GridLayout};
pub use interaction::{InteractionState, InteractionTracker};
pub use math::{CameraState, Size, Vec2};
pub use pipeline::{AnchorIds, InitOptions, InteractionEvent, PipelineController};
pub use platform::{FrameHandle, Platform};
pub use tier::{FrameInput, TierError, TierKind, TierRenderer, TierState, Viewport};
