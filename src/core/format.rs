use chrono::{DateTime, Datelike, Utc};

const BAR_WIDTH: usize = 20;

pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Human-friendly age of an RFC 3339 timestamp. Unparseable input is shown
/// verbatim rather than dropped.
pub fn format_relative_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let then = parsed.with_timezone(&Utc);

    let minutes = (now - then).num_minutes();
    let hours = (now - then).num_hours();
    let days = (now - then).num_days();

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    if days < 7 {
        return format!("{days} day{} ago", plural(days));
    }

    if then.year() == now.year() {
        format!("{} {}", month_name(then.month()), then.day())
    } else {
        format!("{} {}, {}", month_name(then.month()), then.day(), then.year())
    }
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

/// Normalize a reported confidence score to a 0-100 integer. Scores at or
/// below 1.0 are treated as fractions; both scales yield the same value.
pub fn confidence_percentage(score: f64) -> u8 {
    let percentage = if score <= 1.0 { score * 100.0 } else { score };
    percentage.round().clamp(0.0, 100.0) as u8
}

/// ASCII rendering of a 0-100 confidence value.
pub fn confidence_bar(percentage: u8) -> String {
    let percentage = percentage.min(100);
    let filled = (percentage as usize * BAR_WIDTH) / 100;
    let mut bar = String::with_capacity(BAR_WIDTH + 8);
    bar.push('[');
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    format!("{bar} {percentage}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn file_sizes_pick_sensible_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn relative_times_step_through_units() {
        let now = DateTime::parse_from_rfc3339("2026-08-26T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let at = |delta: Duration| (now - delta).to_rfc3339();

        assert_eq!(format_relative_time(&at(Duration::seconds(20)), now), "just now");
        assert_eq!(format_relative_time(&at(Duration::minutes(5)), now), "5 min ago");
        assert_eq!(format_relative_time(&at(Duration::hours(1)), now), "1 hour ago");
        assert_eq!(format_relative_time(&at(Duration::hours(3)), now), "3 hours ago");
        assert_eq!(format_relative_time(&at(Duration::days(2)), now), "2 days ago");
        assert_eq!(format_relative_time(&at(Duration::days(30)), now), "Jul 27");
        assert_eq!(
            format_relative_time(&at(Duration::days(400)), now),
            "Jul 22, 2025"
        );
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        let now = Utc::now();
        assert_eq!(format_relative_time("yesterday-ish", now), "yesterday-ish");
    }

    #[test]
    fn confidence_percentage_accepts_both_scales() {
        assert_eq!(confidence_percentage(0.85), 85);
        assert_eq!(confidence_percentage(85.0), 85);
        assert_eq!(confidence_percentage(1.0), 100);
        assert_eq!(confidence_percentage(240.0), 100);
        assert_eq!(confidence_percentage(-3.0), 0);
    }

    #[test]
    fn confidence_bar_scales_fill() {
        assert_eq!(confidence_bar(0), "[--------------------] 0%");
        assert_eq!(confidence_bar(50), "[##########----------] 50%");
        assert_eq!(confidence_bar(100), "[####################] 100%");
    }
}
