//! Squarified treemap layout of a flat list of weights.

use foundation::bounds::Rect;

/// Lays `weights` out over `area`, largest first.
///
/// Returns one rectangle per weight in input order. Gaps of `padding_inner`
/// pixels separate neighbouring cells. Non-positive weights get an empty
/// rectangle at the area origin.
pub fn squarify(weights: &[f64], area: Rect, padding_inner: f64) -> Vec<Rect> {
    let mut out = vec![Rect::new(area.x, area.y, 0.0, 0.0); weights.len()];
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 || area.area() <= 0.0 {
        return out;
    }

    let mut order: Vec<usize> = (0..weights.len()).filter(|&i| weights[i] > 0.0).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));

    // Grow the area by the padding so that shrinking every cell by half of it
    // on each side leaves exact gaps between cells and none on the border.
    let half = padding_inner / 2.0;
    let mut free = Rect::new(
        area.x - half,
        area.y - half,
        area.width + padding_inner,
        area.height + padding_inner,
    );
    let scale = free.area() / total;
    let scaled: Vec<f64> = order.iter().map(|&i| weights[i] * scale).collect();

    let mut start = 0;
    while start < scaled.len() {
        let side = free.width.min(free.height);
        let mut end = start + 1;
        let mut row_sum = scaled[start];
        let mut current = worst_ratio(&scaled[start..end], row_sum, side);
        while end < scaled.len() {
            let next_sum = row_sum + scaled[end];
            let next = worst_ratio(&scaled[start..=end], next_sum, side);
            if next > current {
                break;
            }
            row_sum = next_sum;
            current = next;
            end += 1;
        }
        let last_row = end == scaled.len();
        let placed = layout_row(&scaled[start..end], row_sum, &mut free, last_row);
        for (k, rect) in placed.into_iter().enumerate() {
            out[order[start + k]] = shrink(rect, half);
        }
        start = end;
    }
    out
}

fn worst_ratio(row: &[f64], sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 {
        return f64::MAX;
    }
    let max = row.iter().copied().fold(0.0, f64::max);
    let min = row.iter().copied().fold(f64::INFINITY, f64::min);
    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}

/// Places one strip along the short side of `free` and removes it.
fn layout_row(row: &[f64], sum: f64, free: &mut Rect, last_row: bool) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(row.len());
    if free.width >= free.height {
        // Vertical strip at the left edge.
        let thickness = if last_row { free.width } else { sum / free.height };
        let mut y = free.y;
        for (i, a) in row.iter().enumerate() {
            let h = if i + 1 == row.len() {
                free.bottom() - y
            } else {
                a / thickness
            };
            rects.push(Rect::new(free.x, y, thickness, h));
            y += h;
        }
        free.x += thickness;
        free.width = (free.width - thickness).max(0.0);
    } else {
        let thickness = if last_row { free.height } else { sum / free.width };
        let mut x = free.x;
        for (i, a) in row.iter().enumerate() {
            let w = if i + 1 == row.len() {
                free.right() - x
            } else {
                a / thickness
            };
            rects.push(Rect::new(x, free.y, w, thickness));
            x += w;
        }
        free.y += thickness;
        free.height = (free.height - thickness).max(0.0);
    }
    rects
}

fn shrink(r: Rect, by: f64) -> Rect {
    Rect::new(
        r.x + by,
        r.y + by,
        (r.width - 2.0 * by).max(0.0),
        (r.height - 2.0 * by).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::squarify;
    use foundation::bounds::Rect;

    fn overlaps(a: &Rect, b: &Rect) -> bool {
        a.x < b.right() - 1e-9
            && b.x < a.right() - 1e-9
            && a.y < b.bottom() - 1e-9
            && b.y < a.bottom() - 1e-9
    }

    #[test]
    fn single_weight_fills_area() {
        let r = squarify(&[5.0], Rect::new(0.0, 0.0, 400.0, 300.0), 0.0);
        assert_eq!(r, vec![Rect::new(0.0, 0.0, 400.0, 300.0)]);
    }

    #[test]
    fn areas_are_proportional_without_padding() {
        let area = Rect::new(0.0, 0.0, 600.0, 400.0);
        let r = squarify(&[6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0], area, 0.0);
        let total: f64 = r.iter().map(Rect::area).sum();
        assert!((total - area.area()).abs() < 1e-6);
        assert!((r[0].area() - area.area() * 6.0 / 24.0).abs() < 1e-6);
        assert!((r[6].area() - area.area() / 24.0).abs() < 1e-6);
    }

    #[test]
    fn padded_cells_stay_inside_and_do_not_overlap() {
        let area = Rect::new(0.0, 0.0, 400.0, 300.0);
        let r = squarify(&[10.0, 3.0, 3.0, 1.0], area, 2.0);
        for (i, a) in r.iter().enumerate() {
            assert!(a.x >= -1e-9 && a.y >= -1e-9);
            assert!(a.right() <= 400.0 + 1e-9 && a.bottom() <= 300.0 + 1e-9);
            for b in &r[i + 1..] {
                assert!(!overlaps(a, b));
            }
        }
    }

    #[test]
    fn empty_or_zero_input_yields_empty_cells() {
        assert!(squarify(&[], Rect::new(0.0, 0.0, 10.0, 10.0), 2.0).is_empty());
        let r = squarify(&[0.0, 0.0], Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        assert!(r.iter().all(|c| c.area() == 0.0));
    }
}
