//! Pointer tracking and parallax smoothing
//!
//! Event handlers write raw pointer positions and viewport sizes into
//! [`InteractionState`]. The render loop calls [`InteractionTracker::step`]
//! exactly once per frame, so the smoothed offset advances at the frame
//! rate regardless of how many events arrived in between.

use crate::math::{Size, Vec2};

/// Raw interaction inputs written by event handlers
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionState {
    /// Last pointer position relative to the viewport center
    pub pointer_offset: Vec2,
    /// Half of the last known viewport size
    pub half_viewport: Vec2,
}

/// Accumulates pointer input and exposes a smoothed parallax offset
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionTracker {
    state: InteractionState,
    offset: Vec2,
    weight: f32,
    smoothing: f32,
}

impl InteractionTracker {
    /// Create a tracker for a viewport of `viewport` CSS pixels
    pub fn new(viewport: Size, weight: f32, smoothing: f32) -> Self {
        Self {
            state: InteractionState {
                pointer_offset: Vec2::ZERO,
                half_viewport: viewport.half(),
            },
            offset: Vec2::ZERO,
            weight,
            smoothing: smoothing.clamp(0.0, 1.0),
        }
    }

    /// Record a pointer or touch position in client coordinates
    pub fn record_pointer(&mut self, client_x: f32, client_y: f32) {
        if !client_x.is_finite() || !client_y.is_finite() {
            return;
        }
        self.state.pointer_offset = Vec2::new(client_x, client_y) - self.state.half_viewport;
    }

    /// Record a new viewport size
    pub fn record_resize(&mut self, viewport: Size) {
        self.state.half_viewport = viewport.half();
    }

    /// Advance the smoothed offset by one frame and return it
    ///
    /// `offset += (raw * weight - offset) * smoothing`
    pub fn step(&mut self) -> Vec2 {
        let target = self.state.pointer_offset * self.weight;
        self.offset += (target - self.offset) * self.smoothing;
        self.offset
    }

    /// Current smoothed offset without advancing
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Raw inputs
    #[inline]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }
}
