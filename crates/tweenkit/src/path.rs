//! Waypoint paths: pure interpolation across `[start, waypoints.., target]`.

/// Path function selector for waypoint-based tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TweenPath {
    /// Piecewise-linear through every point.
    #[default]
    Linear,
    /// Catmull-Rom spline with duplicated endpoints.
    CatmullRom,
}

#[inline]
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

impl TweenPath {
    /// Interpolate along `points` at overall progress `t`.
    ///
    /// `points[0]` is the start value, the last entry the target, and
    /// interior entries are waypoints in order. `t` outside [0, 1]
    /// extrapolates the first/last segment (overshoot easing relies on
    /// this).
    pub fn compute(&self, t: f32, points: &[f32]) -> f32 {
        let n = points.len();
        match n {
            0 => 0.0,
            1 => points[0],
            _ => {
                let segments = (n - 1) as f32;
                let scaled = t * segments;
                // Clamp the segment index, not the local time, so the
                // edge segments extrapolate.
                let seg = (scaled.floor() as isize).clamp(0, n as isize - 2) as usize;
                let local = scaled - seg as f32;
                match self {
                    TweenPath::Linear => lerp_f32(points[seg], points[seg + 1], local),
                    TweenPath::CatmullRom => {
                        let p0 = if seg == 0 { points[0] } else { points[seg - 1] };
                        let p1 = points[seg];
                        let p2 = points[seg + 1];
                        let p3 = if seg + 2 < n { points[seg + 2] } else { points[n - 1] };
                        catmull_rom(p0, p1, p2, p3, local)
                    }
                }
            }
        }
    }
}
