//! Clock formatting for timer displays

/// Render seconds as zero-padded `MM:SS`; minutes keep growing past 99
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(180), "03:00");
        assert_eq!(format_clock(1199), "19:59");
        assert_eq!(format_clock(6000), "100:00");
    }
}
