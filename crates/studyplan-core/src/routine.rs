//! Weekly study routine: available minutes per weekday.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Minutes available for study on each weekday. `0` means unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Routine {
    #[serde(default, alias = "segunda")]
    pub monday: u32,
    #[serde(default, alias = "terca")]
    pub tuesday: u32,
    #[serde(default, alias = "quarta")]
    pub wednesday: u32,
    #[serde(default, alias = "quinta")]
    pub thursday: u32,
    #[serde(default, alias = "sexta")]
    pub friday: u32,
    #[serde(default, alias = "sabado")]
    pub saturday: u32,
    #[serde(default, alias = "domingo")]
    pub sunday: u32,
}

impl Routine {
    /// Same number of minutes every day of the week.
    pub fn uniform(minutes: u32) -> Self {
        Self {
            monday: minutes,
            tuesday: minutes,
            wednesday: minutes,
            thursday: minutes,
            friday: minutes,
            saturday: minutes,
            sunday: minutes,
        }
    }

    pub fn with_day(mut self, day: Weekday, minutes: u32) -> Self {
        self.set(day, minutes);
        self
    }

    pub fn minutes_for(&self, day: Weekday) -> u32 {
        match day {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    pub fn set(&mut self, day: Weekday, minutes: u32) {
        let slot = match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = minutes;
    }

    fn days(&self) -> [u32; 7] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
    }

    /// True if at least one weekday has time available.
    pub fn has_availability(&self) -> bool {
        self.days().iter().any(|&minutes| minutes > 0)
    }

    pub fn weekly_minutes(&self) -> u64 {
        self.days().iter().map(|&minutes| u64::from(minutes)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_days_default_to_zero() {
        let routine: Routine = serde_json::from_str(r#"{"monday": 60}"#).unwrap();
        assert_eq!(routine.minutes_for(Weekday::Mon), 60);
        assert_eq!(routine.minutes_for(Weekday::Sun), 0);
        assert!(routine.has_availability());
    }

    #[test]
    fn portuguese_day_names_are_accepted() {
        let routine: Routine = toml::from_str("segunda = 90\nsabado = 30\n").unwrap();
        assert_eq!(routine.monday, 90);
        assert_eq!(routine.saturday, 30);
        assert_eq!(routine.weekly_minutes(), 120);
    }

    #[test]
    fn empty_routine_has_no_availability() {
        assert!(!Routine::default().has_availability());
    }

    #[test]
    fn set_updates_a_single_day() {
        let routine = Routine::uniform(30).with_day(Weekday::Wed, 0);
        assert_eq!(routine.minutes_for(Weekday::Wed), 0);
        assert_eq!(routine.minutes_for(Weekday::Thu), 30);
        assert_eq!(routine.weekly_minutes(), 180);
    }

    #[test]
    fn huge_days_do_not_wrap_the_week() {
        let routine = Routine::default()
            .with_day(Weekday::Mon, u32::MAX)
            .with_day(Weekday::Tue, 1);
        assert!(routine.has_availability());
        assert_eq!(routine.weekly_minutes(), u64::from(u32::MAX) + 1);
    }
}
