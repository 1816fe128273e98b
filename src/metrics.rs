//! Pure formatting of raw run measurements into the strings shown on the
//! tracker screen. No side effects, deterministic, tolerant of malformed
//! input from old data files.

/// Renders elapsed seconds as `H:MM:SS`, dropping the hours field when it
/// is zero. NaN and negative inputs render as the `00:00` sentinel.
pub fn format_duration(total_seconds: f64) -> String {
    if total_seconds.is_nan() || total_seconds < 0.0 {
        return String::from("00:00");
    }

    let total = total_seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Pace in minutes and seconds per kilometer, rendered `M' S''`.
/// Non-positive (or NaN) distance or time yields the `0' 0''` sentinel.
/// A remainder that rounds up to 60 carries into the minutes field, so
/// 299.6 s/km is `5' 0''` rather than `4' 60''`.
pub fn format_pace(distance: f64, time: f64) -> String {
    if !(distance > 0.0 && time > 0.0) {
        return String::from("0' 0''");
    }

    let secs_per_km = time / distance;
    let mut minutes = (secs_per_km / 60.0).floor() as u64;
    let mut seconds = (secs_per_km % 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }

    format!("{}' {}''", minutes, seconds)
}

/// Speed in kilometers per hour with two decimals and a comma as the
/// decimal separator. Non-positive (or NaN) input yields `0,00`.
pub fn format_speed(distance: f64, time: f64) -> String {
    if !(distance > 0.0 && time > 0.0) {
        return String::from("0,00");
    }

    let speed = distance / (time / 3600.0);
    format!("{:.2}", speed).replace('.', ",")
}
