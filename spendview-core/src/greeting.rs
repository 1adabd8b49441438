//! Time-of-day greeting classification.

use serde::Serialize;

/// Part of the day, classified from the local wall-clock hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPart {
    #[serde(rename = "morning")]
    Morning,
    #[serde(rename = "afternoon")]
    Afternoon,
    #[serde(rename = "evening")]
    Evening,
    #[serde(rename = "night")]
    Night,
}

impl DayPart {
    /// Classify an hour (0..=23). Bands are right-exclusive:
    /// 06-11 morning, 12-17 afternoon, 18-22 evening, else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => DayPart::Morning,
            12..=17 => DayPart::Afternoon,
            18..=22 => DayPart::Evening,
            _ => DayPart::Night,
        }
    }

    /// Greeting phrase for the home page.
    pub fn greeting(&self) -> &'static str {
        match self {
            DayPart::Morning => "Good morning",
            DayPart::Afternoon => "Good afternoon",
            DayPart::Evening => "Good evening",
            DayPart::Night => "Good night",
        }
    }
}
