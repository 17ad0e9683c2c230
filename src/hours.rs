//! Opening-hours feasibility.
//!
//! A venue is open at an instant when some entry for that instant's weekday
//! satisfies `open <= t <= close`, both bounds inclusive, compared at minute
//! granularity. A day with no entry is closed.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::venue::{ClockTime, HoursEntry};

/// Check `at` against a raw weekly hours table.
pub fn is_open_at(hours: &[HoursEntry], at: NaiveDateTime) -> bool {
    let day = at.weekday();
    let time = clock_time_of(at);
    hours
        .iter()
        .filter(|entry| entry.day == day)
        .any(|entry| entry.open <= time && time <= entry.close)
}

fn clock_time_of(at: NaiveDateTime) -> ClockTime {
    // hour() and minute() are always in range
    ClockTime {
        hour: at.hour() as u8,
        minute: at.minute() as u8,
    }
}

/// Weekly hours bucketed by day.
///
/// The search checks the same venue many times at different arrival instants;
/// bucketing once avoids rescanning the whole table on every check.
#[derive(Debug, Clone, Default)]
pub struct WeeklyHours {
    days: [Vec<(ClockTime, ClockTime)>; 7],
}

impl WeeklyHours {
    pub fn new(hours: &[HoursEntry]) -> Self {
        let mut days: [Vec<(ClockTime, ClockTime)>; 7] = Default::default();
        for entry in hours {
            days[entry.day.num_days_from_monday() as usize].push((entry.open, entry.close));
        }
        Self { days }
    }

    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        let time = clock_time_of(at);
        self.windows(at.weekday())
            .iter()
            .any(|(open, close)| *open <= time && time <= *close)
    }

    pub fn windows(&self, day: Weekday) -> &[(ClockTime, ClockTime)] {
        &self.days[day.num_days_from_monday() as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }
}
