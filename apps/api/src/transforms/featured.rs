//! "Tool of the day" — rotates the featured tool by weekday.

use chrono::{Datelike, Weekday};

pub const TOOLS: [&str; 7] = [
    "AI Output Cleaner",
    "Email Formatter",
    "Resume Optimizer",
    "Social Media Prep",
    "Code Cleaner",
    "Text Normalizer",
    "Case Converter",
];

/// Sunday features the first tool, Saturday the last.
pub fn tool_for_weekday(weekday: Weekday) -> &'static str {
    TOOLS[weekday.num_days_from_sunday() as usize % TOOLS.len()]
}

/// Uses the server's local weekday.
pub fn tool_of_the_day() -> &'static str {
    tool_for_weekday(chrono::Local::now().weekday())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_by_weekday() {
        assert_eq!(tool_for_weekday(Weekday::Sun), "AI Output Cleaner");
        assert_eq!(tool_for_weekday(Weekday::Wed), "Social Media Prep");
        assert_eq!(tool_for_weekday(Weekday::Sat), "Case Converter");
    }

    #[test]
    fn test_tool_of_the_day_follows_local_weekday() {
        let before = chrono::Local::now().weekday();
        let tool = tool_of_the_day();
        let after = chrono::Local::now().weekday();
        assert!(tool == tool_for_weekday(before) || tool == tool_for_weekday(after));
    }

    #[test]
    fn test_every_weekday_has_a_distinct_tool() {
        let week = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        let mut picked: Vec<_> = week.iter().map(|d| tool_for_weekday(*d)).collect();
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 7);
    }
}
