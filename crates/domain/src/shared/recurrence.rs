use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// How a recurring `Reminder` repeats
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceType {
    #[serde(rename = "daily")]
    Daily,
    /// On the selected days of the week
    #[serde(rename = "weekly")]
    Weekly,
    /// Every `every_x_days` days counted from the last run
    #[serde(rename = "everyX")]
    EveryX,
}

impl RecurrenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::EveryX => "everyX",
        }
    }
}

impl Display for RecurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence type: {0}")]
pub struct InvalidRecurrenceTypeError(pub String);

impl FromStr for RecurrenceType {
    type Err = InvalidRecurrenceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "everyX" => Ok(Self::EveryX),
            _ => Err(InvalidRecurrenceTypeError(s.to_string())),
        }
    }
}

/// A wall clock time in 24h format, e.g. "08:30"
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

#[derive(Error, Debug, PartialEq)]
#[error("Malformed time of day: {0}, expected HH:MM")]
pub struct InvalidTimeOfDayError(pub String);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDayError;

    fn from_str(time: &str) -> Result<Self, Self::Err> {
        let e = || InvalidTimeOfDayError(time.to_string());
        let (hour, minute) = time.trim().split_once(':').ok_or_else(e)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(e());
        }
        let hour = hour.parse::<u32>().map_err(|_| e())?;
        let minute = minute.parse::<u32>().map_err(|_| e())?;
        Self::new(hour, minute).ok_or_else(e)
    }
}

/// Maps a weekday name to its number with Sunday = 0 .. Saturday = 6.
/// Both short ("Mon") and full ("Monday") names are accepted in any case.
pub fn parse_weekday(name: &str) -> Option<u32> {
    let day = match name.trim().to_lowercase().as_str() {
        "sun" | "sunday" => 0,
        "mon" | "monday" => 1,
        "tue" | "tuesday" => 2,
        "wed" | "wednesday" => 3,
        "thu" | "thursday" => 4,
        "fri" | "friday" => 5,
        "sat" | "saturday" => 6,
        _ => return None,
    };
    Some(day)
}

/// Recognized weekday numbers of `days`, unknown names are skipped
pub fn parse_weekdays(days: &[String]) -> Vec<u32> {
    days.iter().filter_map(|d| parse_weekday(d)).collect()
}
