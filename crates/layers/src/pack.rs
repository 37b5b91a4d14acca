//! Greedy circle packing.

use foundation::bounds::Size;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PackedCircle {
    pub center: [f64; 2],
    pub r: f64,
}

/// Packs one circle per value (area proportional to the value) into `size`.
///
/// Circles are placed largest first, each at the candidate position closest
/// to the centre that touches already placed circles without overlapping
/// them. The cluster is then scaled to fit and every radius shrunk by half of
/// `padding`, so neighbours are at least `padding` apart. Output is in input
/// order; zero values get a zero radius at the centre.
pub fn pack(values: &[u64], size: Size, padding: f64) -> Vec<PackedCircle> {
    let centre = [size.width / 2.0, size.height / 2.0];
    let mut out = vec![PackedCircle { center: centre, r: 0.0 }; values.len()];

    let mut order: Vec<usize> = (0..values.len()).filter(|&i| values[i] > 0).collect();
    order.sort_by(|&a, &b| values[b].cmp(&values[a]));
    if order.is_empty() || size.is_degenerate() {
        return out;
    }

    let mut placed: Vec<PackedCircle> = Vec::with_capacity(order.len());
    for &i in &order {
        let r = (values[i] as f64).sqrt();
        let center = if placed.is_empty() {
            [0.0, 0.0]
        } else {
            best_position(&placed, r)
        };
        placed.push(PackedCircle { center, r });
    }

    // Enclosing circle around the bounding-box centre of the cluster.
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for c in &placed {
        min_x = min_x.min(c.center[0] - c.r);
        min_y = min_y.min(c.center[1] - c.r);
        max_x = max_x.max(c.center[0] + c.r);
        max_y = max_y.max(c.center[1] + c.r);
    }
    let mid = [(min_x + max_x) / 2.0, (min_y + max_y) / 2.0];
    let radius = placed
        .iter()
        .map(|c| distance(c.center, mid) + c.r)
        .fold(0.0, f64::max);
    let k = size.width.min(size.height) / 2.0 / radius;

    for (slot, c) in order.iter().zip(placed) {
        out[*slot] = PackedCircle {
            center: [
                centre[0] + (c.center[0] - mid[0]) * k,
                centre[1] + (c.center[1] - mid[1]) * k,
            ],
            r: (c.r * k - padding / 2.0).max(0.0),
        };
    }
    out
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

fn fits(placed: &[PackedCircle], center: [f64; 2], r: f64) -> bool {
    placed
        .iter()
        .all(|c| distance(c.center, center) >= c.r + r - 1e-9)
}

fn best_position(placed: &[PackedCircle], r: f64) -> [f64; 2] {
    let mut candidates: Vec<[f64; 2]> = Vec::new();
    for (i, a) in placed.iter().enumerate() {
        // Touching a single circle on its right side.
        candidates.push([a.center[0] + a.r + r, a.center[1]]);
        for b in &placed[i + 1..] {
            candidates.extend(tangent_to_both(a, b, r));
        }
    }
    candidates
        .into_iter()
        .filter(|p| fits(placed, *p, r))
        .min_by(|p, q| distance(*p, [0.0, 0.0]).total_cmp(&distance(*q, [0.0, 0.0])))
        .unwrap_or_else(|| {
            // Unreachable in practice: the point right of the outermost circle
            // always fits.
            let far = placed
                .iter()
                .map(|c| c.center[0] + c.r)
                .fold(f64::MIN, f64::max);
            [far + r, 0.0]
        })
}

/// Centres of a circle of radius `r` touching both `a` and `b`.
fn tangent_to_both(a: &PackedCircle, b: &PackedCircle, r: f64) -> Vec<[f64; 2]> {
    let da = a.r + r;
    let db = b.r + r;
    let d = distance(a.center, b.center);
    if d == 0.0 || d > da + db || d < (da - db).abs() {
        return Vec::new();
    }
    let along = (da * da - db * db + d * d) / (2.0 * d);
    let h = (da * da - along * along).max(0.0).sqrt();
    let ux = (b.center[0] - a.center[0]) / d;
    let uy = (b.center[1] - a.center[1]) / d;
    let base = [a.center[0] + ux * along, a.center[1] + uy * along];
    vec![
        [base[0] - uy * h, base[1] + ux * h],
        [base[0] + uy * h, base[1] - ux * h],
    ]
}
