//! Line and area paths through data points.
//!
//! Curves are monotone in x (cubic Hermite with Fritsch–Carlson style
//! tangents), so a series never overshoots its own values.

use scene::svg::num;

fn sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else if v > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Tangent at the middle of three points.
fn interior_slope(p0: [f64; 2], p1: [f64; 2], p2: [f64; 2]) -> f64 {
    let h0 = p1[0] - p0[0];
    let h1 = p2[0] - p1[0];
    let s0 = if h0 != 0.0 { (p1[1] - p0[1]) / h0 } else { 0.0 };
    let s1 = if h1 != 0.0 { (p2[1] - p1[1]) / h1 } else { 0.0 };
    let p = if h0 + h1 != 0.0 {
        (s0 * h1 + s1 * h0) / (h0 + h1)
    } else {
        0.0
    };
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() { t } else { 0.0 }
}

/// Tangent at an end point, from the neighbouring tangent.
fn end_slope(p0: [f64; 2], p1: [f64; 2], t: f64) -> f64 {
    let h = p1[0] - p0[0];
    if h != 0.0 {
        (3.0 * (p1[1] - p0[1]) / h - t) / 2.0
    } else {
        t
    }
}

fn tangents(points: &[[f64; 2]]) -> Vec<f64> {
    let n = points.len();
    let mut t = vec![0.0; n];
    for i in 1..n - 1 {
        t[i] = interior_slope(points[i - 1], points[i], points[i + 1]);
    }
    t[0] = end_slope(points[0], points[1], t[1]);
    t[n - 1] = end_slope(points[n - 1], points[n - 2], t[n - 2]);
    t
}

/// Path segments after the initial move-to.
fn curve_segments(points: &[[f64; 2]], out: &mut String) {
    match points.len() {
        0 | 1 => {}
        2 => out.push_str(&format!("L{},{}", num(points[1][0]), num(points[1][1]))),
        _ => {
            let t = tangents(points);
            for i in 0..points.len() - 1 {
                let (a, b) = (points[i], points[i + 1]);
                let dx = (b[0] - a[0]) / 3.0;
                out.push_str(&format!(
                    "C{},{},{},{},{},{}",
                    num(a[0] + dx),
                    num(a[1] + dx * t[i]),
                    num(b[0] - dx),
                    num(b[1] - dx * t[i + 1]),
                    num(b[0]),
                    num(b[1])
                ));
            }
        }
    }
}

/// Smooth line through `points` (sorted by x). Empty input gives an empty
/// path.
pub fn line_path(points: &[[f64; 2]]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut d = format!("M{},{}", num(first[0]), num(first[1]));
    curve_segments(points, &mut d);
    d
}

/// Area between the smooth line through `points` and the horizontal
/// `baseline`.
pub fn area_path(points: &[[f64; 2]], baseline: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    let mut d = format!("M{},{}", num(first[0]), num(baseline));
    d.push_str(&format!("L{},{}", num(first[0]), num(first[1])));
    curve_segments(points, &mut d);
    d.push_str(&format!("L{},{}Z", num(last[0]), num(baseline)));
    d
}

#[cfg(test)]
mod tests {
    use super::{area_path, line_path, tangents};

    #[test]
    fn two_points_are_a_straight_line() {
        assert_eq!(line_path(&[[0.0, 10.0], [5.0, 0.0]]), "M0,10L5,0");
        assert_eq!(line_path(&[]), "");
    }

    #[test]
    fn local_extremum_has_flat_tangent() {
        let t = tangents(&[[0.0, 0.0], [1.0, 5.0], [2.0, 0.0]]);
        assert_eq!(t[1], 0.0);
    }

    #[test]
    fn monotone_data_keeps_tangent_signs() {
        let t = tangents(&[[0.0, 0.0], [1.0, 1.0], [2.0, 4.0], [3.0, 9.0]]);
        assert!(t.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn area_closes_on_baseline() {
        let d = area_path(&[[0.0, 2.0], [4.0, 1.0]], 10.0);
        assert_eq!(d, "M0,10L0,2L4,1L4,10Z");
    }
}
