use crate::scale::LinearScale;
use crate::view::Domain1D;

// Rough per-character label width used for collision thinning.
pub const AVG_LABEL_CHAR_WIDTH_PX: f64 = 6.0;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub px: f64,
    pub label: String,
}

/// Evenly spaced ticks along a horizontal axis.
pub fn build_bottom_ticks<F>(
    domain: Domain1D,
    plot_x: f64,
    plot_w: f64,
    tick_count: usize,
    formatter: F,
) -> Vec<AxisTick>
where
    F: Fn(f64) -> String,
{
    if tick_count == 0 || !domain.is_valid() || plot_w <= 0.0 {
        return Vec::new();
    }
    let s = LinearScale::new(domain.min, domain.max, plot_x, plot_x + plot_w);
    s.ticks(tick_count)
        .into_iter()
        .map(|v| AxisTick {
            value: v,
            px: s.map(v),
            label: formatter(v),
        })
        .collect()
}

/// Ticks along a vertical axis at the given `values`; values outside the
/// domain are dropped.
pub fn build_left_ticks<F>(
    domain: Domain1D,
    plot_y: f64,
    plot_h: f64,
    values: &[f64],
    formatter: F,
) -> Vec<AxisTick>
where
    F: Fn(f64) -> String,
{
    if !domain.is_valid() || plot_h <= 0.0 {
        return Vec::new();
    }
    // Invert so larger values are visually higher.
    let s = LinearScale::new(domain.min, domain.max, plot_y + plot_h, plot_y);
    values
        .iter()
        .copied()
        .filter(|&v| domain.contains(v))
        .map(|v| AxisTick {
            value: v,
            px: s.map(v),
            label: formatter(v),
        })
        .collect()
}

/// Drop ticks whose labels would overlap the previously kept one.
pub fn thin_overlapping(ticks: Vec<AxisTick>, min_gap_px: f64) -> Vec<AxisTick> {
    let mut out: Vec<AxisTick> = Vec::with_capacity(ticks.len());
    let mut last_right = f64::NEG_INFINITY;
    for t in ticks {
        let half = t.label.chars().count() as f64 * AVG_LABEL_CHAR_WIDTH_PX * 0.5;
        if t.px - half >= last_right + min_gap_px {
            last_right = t.px + half;
            out.push(t);
        }
    }
    out
}
