//! Closed-form wave function shared by every tier

/// Angular frequency applied to `column + t`
pub const COLUMN_FREQUENCY: f32 = 0.3;

/// Angular frequency applied to `row + t`
pub const ROW_FREQUENCY: f32 = 0.5;

/// Wave output for one grid point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSample {
    /// Vertical displacement in world units
    pub height: f32,
    /// Animation scale in [0, 2], 1 on average
    pub scale: f32,
}

/// Evaluate the traveling wave at grid point `(ix, iy)` and time cursor `t`
#[inline]
pub fn wave_sample(ix: u32, iy: u32, t: f32, wave_height: f32) -> WaveSample {
    let a = ((ix as f32 + t) * COLUMN_FREQUENCY).sin();
    let b = ((iy as f32 + t) * ROW_FREQUENCY).sin();
    WaveSample {
        height: (a + b) * wave_height,
        scale: (a + b + 2.0) * 0.5,
    }
}
