//! Closest-value lookup over numeric sequences

use statchart_core::{ChartError, Result};

/// Index of the element of `array` nearest to `needle`.
///
/// With `is_sorted` the array must be ascending and the search is a binary
/// narrowing in `O(log n)`. Otherwise a sorted copy is searched and the
/// result is mapped back to the first element of `array` holding the chosen
/// value.
///
/// Needles at or beyond either end resolve to that end. On equal distances
/// the result follows the narrowing order: the first candidate found stays.
pub fn find_closest_index(array: &[f64], needle: f64, is_sorted: bool) -> Result<usize> {
    if !needle.is_finite() {
        return Err(ChartError::invalid_argument(format!(
            "needle must be a finite number, got {needle}"
        )));
    }
    if array.is_empty() {
        return Err(ChartError::invalid_argument(
            "cannot search for the closest value in an empty array",
        ));
    }

    if is_sorted {
        return Ok(closest_in_sorted(array, needle));
    }

    let mut sorted = array.to_vec();
    sorted.sort_by(f64::total_cmp);
    let value = sorted[closest_in_sorted(&sorted, needle)];
    array
        .iter()
        .position(|&v| v == value)
        .ok_or_else(|| ChartError::invalid_argument("array contains NaN values"))
}

fn closest_in_sorted(array: &[f64], needle: f64) -> usize {
    let mut start = 0;
    let mut end = array.len() - 1;

    if needle <= array[start] {
        return start;
    }
    if needle >= array[end] {
        return end;
    }

    let distance = |i: usize| (array[i] - needle).abs();
    let mut closest = if distance(start) < distance(end) {
        start
    } else {
        end
    };

    while end > start + 1 {
        let middle = (start + end) / 2;
        if array[middle] == needle {
            return middle;
        }
        if distance(middle) < distance(closest) {
            closest = middle;
        }
        if needle > array[middle] {
            start = middle;
        } else {
            end = middle;
        }
    }

    closest
}
