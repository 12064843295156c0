//! SVG line paths from x/y sequences

use std::fmt::Write as _;

use statchart_core::{ChartError, Result, Size};

use crate::format::float_round;
use crate::view::Domain1D;

/// Build an SVG path (`M x,yLx,y...`) through the points of `xs`/`ys` that
/// fall inside both domains, scaled into a `size` canvas with y pointing up.
///
/// Missing domains default to the data extremes. An empty visible set gives
/// an empty string.
pub fn line_path_by_values(
    xs: &[f64],
    ys: &[f64],
    size: Size,
    x_domain: Option<Domain1D>,
    y_domain: Option<Domain1D>,
) -> Result<String> {
    if xs.len() != ys.len() {
        return Err(ChartError::invalid_argument(format!(
            "x/y length mismatch: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    let x_domain = resolve_domain(x_domain, xs)?;
    let y_domain = resolve_domain(y_domain, ys)?;

    let x_scale = size.width / x_domain.span();
    let y_scale = size.height / y_domain.span();

    let mut path = String::with_capacity(xs.len() * 14);
    for (&x, &y) in xs.iter().zip(ys) {
        if !x_domain.contains(x) || !y_domain.contains(y) {
            continue;
        }
        let px = float_round((x - x_domain.min) * x_scale, 1) + 0.0;
        let py = float_round(size.height - (y - y_domain.min) * y_scale, 1) + 0.0;
        let cmd = if path.is_empty() { 'M' } else { 'L' };
        // Writing into a String cannot fail.
        let _ = write!(path, "{cmd}{px},{py}");
    }
    Ok(path)
}

fn resolve_domain(domain: Option<Domain1D>, values: &[f64]) -> Result<Domain1D> {
    let domain = domain.unwrap_or_else(|| {
        let (min, max) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Domain1D::new(min, max)
    });
    ChartError::check_domain(domain.min, domain.max)?;
    Ok(domain)
}
