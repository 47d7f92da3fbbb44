//! Point field geometry
//!
//! Flat buffers laid out for direct upload: `positions` holds `x, y, z` per
//! point and `scales` one float per point, both in row-major grid order.
//! Only `y` and `scale` change after construction.

mod layout;
mod wave;

pub use layout::{GridLayout, DOM_MAX_COUNT_X, DOM_MAX_COUNT_Y, DOM_SPACING_FACTOR};
pub use wave::{wave_sample, WaveSample, COLUMN_FREQUENCY, ROW_FREQUENCY};

use crate::config::RenderConfig;

/// Position and scale buffers for one tier activation
#[derive(Clone, Debug, PartialEq)]
pub struct FieldGeometry {
    layout: GridLayout,
    positions: Vec<f32>,
    scales: Vec<f32>,
}

impl FieldGeometry {
    /// Build the full-resolution field for `config`
    pub fn build(config: &RenderConfig) -> Self {
        Self::with_layout(GridLayout::full(config))
    }

    /// Build a field for an explicit layout
    ///
    /// The grid is centered on the origin in the x/z plane with `y = 0` and
    /// `scale = 1` everywhere.
    pub fn with_layout(layout: GridLayout) -> Self {
        let count = layout.point_count();
        let mut positions = Vec::with_capacity(count.saturating_mul(3));
        let half_width = layout.count_x as f32 * layout.separation / 2.0;
        let half_depth = layout.count_y as f32 * layout.separation / 2.0;

        for ix in 0..layout.count_x {
            for iy in 0..layout.count_y {
                positions.push(ix as f32 * layout.separation - half_width);
                positions.push(0.0);
                positions.push(iy as f32 * layout.separation - half_depth);
            }
        }

        Self {
            layout,
            positions,
            scales: vec![1.0; count],
        }
    }

    /// Recompute `y` and `scale` for every point at time cursor `t`
    ///
    /// A closed-form function of `(column, row, t)`: calling it twice with the
    /// same `t` yields identical buffers.
    pub fn advance(&mut self, config: &RenderConfig, t: f32) {
        let mut i = 0;
        for ix in 0..self.layout.count_x {
            for iy in 0..self.layout.count_y {
                let sample = wave_sample(ix, iy, t, config.wave_height);
                self.positions[i * 3 + 1] = sample.height;
                self.scales[i] = sample.scale;
                i += 1;
            }
        }
    }

    /// Grid layout backing these buffers
    #[inline]
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Number of points
    #[inline]
    pub fn point_count(&self) -> usize {
        self.scales.len()
    }

    /// Flat `x, y, z` buffer
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Per-point animation scale
    #[inline]
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    /// Position of point `index` as `[x, y, z]`
    pub fn point(&self, index: usize) -> Option<[f32; 3]> {
        let base = index.checked_mul(3)?;
        self.positions
            .get(base..base + 3)
            .map(|p| [p[0], p[1], p[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    fn config(count_x: u32, count_y: u32, separation: f32) -> RenderConfig {
        RenderConfig {
            count_x,
            count_y,
            separation,
            ..Preset::Baseline.config()
        }
    }

    #[test]
    fn test_build_two_by_two_at_rest() {
        let geometry = FieldGeometry::build(&config(2, 2, 10.0));

        assert_eq!(geometry.positions().len(), 12);
        assert_eq!(geometry.scales().len(), 4);
        for i in 0..4 {
            let [_, y, _] = geometry.point(i).unwrap();
            assert!(y.abs() < 0.001);
        }
        assert!(geometry.scales().iter().all(|s| (s - 1.0).abs() < 0.001));
    }

    #[test]
    fn test_build_is_centered() {
        let geometry = FieldGeometry::build(&config(2, 2, 10.0));
        // x and z run from -10 to 0 for a 2x2 grid with spacing 10
        assert_eq!(geometry.point(0), Some([-10.0, 0.0, -10.0]));
        assert_eq!(geometry.point(1), Some([-10.0, 0.0, 0.0]));
        assert_eq!(geometry.point(2), Some([0.0, 0.0, -10.0]));
        assert_eq!(geometry.point(3), Some([0.0, 0.0, 0.0]));
        assert_eq!(geometry.point(4), None);
    }

    #[test]
    fn test_advance_only_touches_y_and_scale() {
        let cfg = config(4, 3, 25.0);
        let rest = FieldGeometry::build(&cfg);
        let mut moved = rest.clone();
        moved.advance(&cfg, 1.7);

        for i in 0..rest.point_count() {
            let [x0, _, z0] = rest.point(i).unwrap();
            let [x1, _, z1] = moved.point(i).unwrap();
            assert_eq!(x0, x1);
            assert_eq!(z0, z1);
        }
        assert_ne!(rest.positions(), moved.positions());
    }

    #[test]
    fn test_advance_is_idempotent() {
        let cfg = config(5, 5, 50.0);
        let mut once = FieldGeometry::build(&cfg);
        once.advance(&cfg, 3.25);
        let mut twice = once.clone();
        twice.advance(&cfg, 3.25);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_advance_restarts_from_any_time() {
        let cfg = config(3, 3, 50.0);
        let mut a = FieldGeometry::build(&cfg);
        a.advance(&cfg, 0.5);
        a.advance(&cfg, 9.0);

        let mut b = FieldGeometry::build(&cfg);
        b.advance(&cfg, 9.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_wave_height_stays_flat() {
        let cfg = RenderConfig {
            wave_height: 0.0,
            ..config(3, 3, 10.0)
        };
        let mut geometry = FieldGeometry::build(&cfg);
        geometry.advance(&cfg, 4.0);
        assert!(geometry.positions().chunks(3).all(|p| p[1] == 0.0));
    }
}
