//! Time axis labelling for unix-second x values

use chrono::DateTime;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_YEAR: f64 = 3600.0 * 24.0 * 365.24;

/// Date label layouts, coarsest last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateFormat {
    YearMonthDayHourMinute,
    YearMonthDay,
    YearMonth,
    Year,
}

impl DateFormat {
    /// `strftime` pattern.
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::YearMonthDayHourMinute => "%Y/%m/%d %H:%M",
            DateFormat::YearMonthDay => "%Y/%m/%d",
            DateFormat::YearMonth => "%Y/%m",
            DateFormat::Year => "%Y",
        }
    }
}

/// Label styling for x axis ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickStyle {
    /// Rotation in degrees
    pub angle: f64,
    pub font_size: f64,
    pub dx: f64,
    pub dy: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XAxisOptions {
    pub date_format: DateFormat,
    pub tick: TickStyle,
}

/// Pick the label layout for a visible range of `range_seconds`.
pub fn x_axis_options(range_seconds: f64) -> XAxisOptions {
    let (date_format, tick) = if range_seconds < 10.0 * SECONDS_PER_DAY {
        (
            DateFormat::YearMonthDayHourMinute,
            TickStyle {
                angle: -25.0,
                font_size: 10.0,
                dx: -10.0,
                dy: 10.0,
            },
        )
    } else if range_seconds < SECONDS_PER_YEAR {
        (
            DateFormat::YearMonthDay,
            TickStyle {
                angle: 0.0,
                font_size: 11.0,
                dx: -5.0,
                dy: 10.0,
            },
        )
    } else if range_seconds < 10.0 * SECONDS_PER_YEAR {
        (
            DateFormat::YearMonth,
            TickStyle {
                angle: 0.0,
                font_size: 12.0,
                dx: -5.0,
                dy: 5.0,
            },
        )
    } else {
        (
            DateFormat::Year,
            TickStyle {
                angle: 0.0,
                font_size: 12.0,
                dx: 0.0,
                dy: 0.0,
            },
        )
    };
    XAxisOptions { date_format, tick }
}

/// Format unix seconds (UTC). Out-of-range or non-finite input gives `"--"`.
pub fn format_timestamp(seconds: f64, format: DateFormat) -> String {
    if !seconds.is_finite() {
        return "--".to_string();
    }
    let secs = seconds.floor();
    let nanos = ((seconds - secs) * 1e9) as u32;
    match DateTime::from_timestamp(secs as i64, nanos.min(999_999_999)) {
        Some(dt) => dt.format(format.pattern()).to_string(),
        None => "--".to_string(),
    }
}
