// Centralized tolerances and helpers for robust geometry

// Point coincidence threshold (px)
pub const EPS_POS: f32 = 1e-4;
// Zero-length vector threshold
pub const EPS_LEN: f32 = 1e-6;
// Denominator guard for least squares and ratios
pub const EPS_DENOM: f32 = 1e-8;
// Slack for curve box rejection (px)
pub const EPS_BBOX: f32 = 1e-3;

// Adaptive flattening cap
pub const MAX_FLATTEN_DEPTH: u32 = 16;

// Least-squares fitting
pub const MAX_FIT_REPARAM: usize = 4;
pub const MAX_FIT_DEPTH: u32 = 24;

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
