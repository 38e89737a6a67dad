/// Countdown display: whole seconds, rounded up so the bell rings on
/// "00" and not a second early.
pub fn format_countdown(secs: f64) -> String {
    let whole = secs.max(0.0).ceil() as u64;
    format!("{:02}", whole)
}

/// Accuracy of a session as a whole-number percentage.
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_rounds_up_and_pads() {
        assert_eq!(format_countdown(60.0), "60");
        assert_eq!(format_countdown(9.4), "10");
        assert_eq!(format_countdown(0.1), "01");
        assert_eq!(format_countdown(0.0), "00");
        assert_eq!(format_countdown(-1.0), "00");
    }

    #[test]
    fn percent_handles_edges() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(0, 10), 0);
        assert_eq!(percent(10, 10), 100);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
    }
}
