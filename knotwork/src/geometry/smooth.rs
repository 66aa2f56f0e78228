// Continuous (C2) handle smoothing through existing anchor points.
//
// Solves the tridiagonal system for the first control point of every segment
// by Gauss-Seidel sweeps; the rows are diagonally dominant so sweeps converge.

use crate::model::{Anchor, Vec2};

const MAX_SWEEPS: usize = 64;
const SWEEP_EPS: f32 = 1e-4;

/// Replace the handles of `anchors` so the curve through their points is C2.
pub fn smooth_continuous(anchors: &mut [Anchor], closed: bool) {
    let n = anchors.len();
    if n < 3 {
        for a in anchors.iter_mut() {
            a.handle_in = Vec2::ZERO;
            a.handle_out = Vec2::ZERO;
        }
        return;
    }
    let k: Vec<Vec2> = anchors.iter().map(|a| a.point).collect();
    if closed {
        smooth_closed(anchors, &k);
    } else {
        smooth_open(anchors, &k);
    }
}

fn smooth_closed(anchors: &mut [Anchor], k: &[Vec2]) {
    let n = k.len();
    let next = |i: usize| (i + 1) % n;
    let prev = |i: usize| (i + n - 1) % n;

    // Catmull-Rom start
    let mut p1: Vec<Vec2> = (0..n).map(|i| k[i] + (k[next(i)] - k[prev(i)]) * (1.0 / 6.0)).collect();
    for _ in 0..MAX_SWEEPS {
        let mut delta = 0.0f32;
        for i in 0..n {
            let rhs = k[i] * 4.0 + k[next(i)] * 2.0 - p1[prev(i)] - p1[next(i)];
            let v = rhs * 0.25;
            delta = delta.max(v.dist_sq(p1[i]));
            p1[i] = v;
        }
        if delta <= SWEEP_EPS * SWEEP_EPS {
            break;
        }
    }
    for i in 0..n {
        let out = p1[i] - k[i];
        anchors[i].handle_out = out;
        anchors[i].handle_in = -out;
    }
}

fn smooth_open(anchors: &mut [Anchor], k: &[Vec2]) {
    let m = k.len() - 1; // segment count, >= 2
    let mut p1: Vec<Vec2> = (0..m).map(|i| k[i] + (k[i + 1] - k[i]) * (1.0 / 3.0)).collect();
    for _ in 0..MAX_SWEEPS {
        let mut delta = 0.0f32;
        for i in 0..m {
            let v = if i == 0 {
                (k[0] + k[1] * 2.0 - p1[1]) * 0.5
            } else if i == m - 1 {
                (k[m - 1] * 8.0 + k[m] - p1[m - 2] * 2.0) * (1.0 / 7.0)
            } else {
                (k[i] * 4.0 + k[i + 1] * 2.0 - p1[i - 1] - p1[i + 1]) * 0.25
            };
            delta = delta.max(v.dist_sq(p1[i]));
            p1[i] = v;
        }
        if delta <= SWEEP_EPS * SWEEP_EPS {
            break;
        }
    }
    anchors[0].handle_in = Vec2::ZERO;
    anchors[m].handle_out = Vec2::ZERO;
    for i in 0..m {
        anchors[i].handle_out = p1[i] - k[i];
        let p2 = if i + 1 < m { k[i + 1] * 2.0 - p1[i + 1] } else { (k[m] + p1[m - 1]) * 0.5 };
        anchors[i + 1].handle_in = p2 - k[i + 1];
    }
}
