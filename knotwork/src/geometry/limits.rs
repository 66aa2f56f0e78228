// Bounds for values that arrive from the host (options, pointer input)

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 = 10_000_000.0;
pub const WIDTH_MAX: f32 = 10_000.0;

// Tolerances below this make flattening and fitting explode
pub const TOL_MIN: f32 = 0.01;
pub const TOL_MAX: f32 = 1_000.0;

// Freehand strokes stop growing past this many points
pub const MAX_STROKE_POINTS: usize = 20_000;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool {
    x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x)
}

#[inline]
pub fn in_width_bounds(w: f32) -> bool {
    w.is_finite() && w > 0.0 && w <= WIDTH_MAX
}
