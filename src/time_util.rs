use chrono::{DateTime, Utc};

/// 格式化为 HH:MM:SS
pub fn hhmmss(datetime: DateTime<Utc>) -> String {
    datetime.format("%H:%M:%S").to_string()
}

/// 秒数转人类可读的年龄描述
pub fn age_human(seconds: i64) -> String {
    if seconds < 60 {
        format!("{}s ago", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s ago", seconds / 60, seconds % 60)
    } else {
        format!("{}h {:02}m ago", seconds / 3600, (seconds % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_human() {
        assert_eq!(age_human(42), "42s ago");
        assert_eq!(age_human(125), "2m 5s ago");
        assert_eq!(age_human(3720), "1h 02m ago");
    }
}
