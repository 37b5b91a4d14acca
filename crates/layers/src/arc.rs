//! Pie layout and annular sector paths.
//!
//! Angles are in radians, measured clockwise from twelve o'clock.

use std::f64::consts::TAU;

use scene::svg::num;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PieSlice {
    /// Index of the value in the input.
    pub index: usize,
    pub value: u64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn is_empty(&self) -> bool {
        self.end_angle <= self.start_angle
    }
}

/// Splits the full circle between `values`.
///
/// With `largest_first` the angular order is by descending value (ties keep
/// input order); otherwise the input order is kept. The output is always in
/// input order. A zero total yields no slices.
pub fn pie(values: &[u64], largest_first: bool) -> Vec<PieSlice> {
    let total = values.iter().fold(0u64, |acc, v| acc.saturating_add(*v));
    if total == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..values.len()).collect();
    if largest_first {
        order.sort_by(|&a, &b| values[b].cmp(&values[a]));
    }
    let mut slices: Vec<Option<PieSlice>> = vec![None; values.len()];
    let mut angle = 0.0;
    for i in order {
        let sweep = values[i] as f64 / total as f64 * TAU;
        slices[i] = Some(PieSlice {
            index: i,
            value: values[i],
            start_angle: angle,
            end_angle: angle + sweep,
        });
        angle += sweep;
    }
    slices.into_iter().flatten().collect()
}

fn point(r: f64, angle: f64) -> [f64; 2] {
    [r * angle.sin(), -r * angle.cos()]
}

/// Path of an annular sector centred on the origin; `inner == 0` draws a
/// plain pie wedge.
pub fn arc_path(inner: f64, outer: f64, start: f64, end: f64) -> String {
    let sweep = end - start;
    if sweep >= TAU - 1e-9 {
        return ring_path(inner, outer);
    }
    let large = if sweep > std::f64::consts::PI { 1 } else { 0 };
    let o0 = point(outer, start);
    let o1 = point(outer, end);
    let mut d = format!(
        "M{},{}A{},{} 0 {} 1 {},{}",
        num(o0[0]),
        num(o0[1]),
        num(outer),
        num(outer),
        large,
        num(o1[0]),
        num(o1[1])
    );
    if inner > 0.0 {
        let i1 = point(inner, end);
        let i0 = point(inner, start);
        d.push_str(&format!(
            "L{},{}A{},{} 0 {} 0 {},{}",
            num(i1[0]),
            num(i1[1]),
            num(inner),
            num(inner),
            large,
            num(i0[0]),
            num(i0[1])
        ));
    } else {
        d.push_str("L0,0");
    }
    d.push('Z');
    d
}

/// Full ring (or disc) drawn as two half arcs per edge.
fn ring_path(inner: f64, outer: f64) -> String {
    let mut d = format!(
        "M0,{}A{r},{r} 0 1 1 0,{}A{r},{r} 0 1 1 0,{}Z",
        num(-outer),
        num(outer),
        num(-outer),
        r = num(outer)
    );
    if inner > 0.0 {
        d.push_str(&format!(
            "M0,{}A{r},{r} 0 1 0 0,{}A{r},{r} 0 1 0 0,{}Z",
            num(-inner),
            num(inner),
            num(-inner),
            r = num(inner)
        ));
    }
    d
}
