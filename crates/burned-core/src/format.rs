//! Time display and progress helpers

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Text for the time display: `current / duration`
pub fn time_display(current: f64, duration: Option<f64>) -> String {
    format!(
        "{} / {}",
        format_time(current),
        format_time(duration.unwrap_or(0.0))
    )
}

/// Fraction of the progress bar to fill, or `None` while duration is unknown
pub fn progress_fraction(current: f64, duration: Option<f64>) -> Option<f64> {
    match duration {
        Some(duration) if duration > 0.0 => Some((current / duration).clamp(0.0, 1.0)),
        _ => None,
    }
}

/// Seek target for a click at `fraction` of the progress bar
pub fn seek_target(fraction: f64, duration: Option<f64>) -> Option<f64> {
    let duration = duration.filter(|d| *d > 0.0)?;
    if !fraction.is_finite() {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * duration)
}
