use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("mood must be between {min} and {max}, got {0}", min = MoodScore::MIN, max = MoodScore::MAX)]
    MoodOutOfRange(u8),
    #[error("unknown city `{0}`")]
    UnknownCity(String),
    #[error("unknown coach style `{0}` (expected sparta, mentor or game-master)")]
    UnknownCoachStyle(String),
}

/// The five tracked daily habits, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Habit {
    Wake,
    Hydrate,
    Study,
    Exercise,
    Sleep,
}

impl Habit {
    pub const ALL: [Habit; 5] = [
        Habit::Wake,
        Habit::Hydrate,
        Habit::Study,
        Habit::Exercise,
        Habit::Sleep,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Habit::Wake => "Wake-up mission",
            Habit::Hydrate => "Drink water",
            Habit::Study => "Study/reading",
            Habit::Exercise => "Exercise",
            Habit::Sleep => "Sleep",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Habit::Wake => "🌅",
            Habit::Hydrate => "💧",
            Habit::Study => "📚",
            Habit::Exercise => "🏃",
            Habit::Sleep => "😴",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Today's check-off state for every habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HabitSet {
    done: [bool; 5],
}

impl HabitSet {
    pub const TOTAL: usize = Habit::ALL.len();

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, habit: Habit, done: bool) -> Self {
        self.set(habit, done);
        self
    }

    pub fn set(&mut self, habit: Habit, done: bool) {
        self.done[habit.index()] = done;
    }

    pub fn is_done(&self, habit: Habit) -> bool {
        self.done[habit.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Habit, bool)> + '_ {
        Habit::ALL.iter().map(|&habit| (habit, self.is_done(habit)))
    }

    pub fn completed(&self) -> impl Iterator<Item = Habit> + '_ {
        self.iter().filter(|(_, done)| *done).map(|(habit, _)| habit)
    }

    pub fn completed_count(&self) -> usize {
        self.done.iter().filter(|done| **done).count()
    }

    /// Percentage of habits completed, rounded to the nearest integer.
    pub fn achievement_rate(&self) -> u8 {
        achievement_rate(self.completed_count())
    }
}

impl FromIterator<Habit> for HabitSet {
    fn from_iter<I: IntoIterator<Item = Habit>>(iter: I) -> Self {
        let mut set = HabitSet::new();
        for habit in iter {
            set.set(habit, true);
        }
        set
    }
}

impl Serialize for HabitSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Self::TOTAL))?;
        for (habit, done) in self.iter() {
            map.serialize_entry(&habit, &done)?;
        }
        map.end()
    }
}

pub fn achievement_rate(completed: usize) -> u8 {
    let completed = completed.min(HabitSet::TOTAL);
    ((completed as f64 / HabitSet::TOTAL as f64) * 100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, InputError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InputError::MoodOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for MoodScore {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for MoodScore {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for MoodScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn achievement_rate_rounds_to_percent() {
        let expected = [0, 20, 40, 60, 80, 100];
        for (count, rate) in expected.into_iter().enumerate() {
            assert_eq!(achievement_rate(count), rate, "count {count}");
        }
    }

    #[test]
    fn completed_follows_fixed_order() {
        let set: HabitSet = [Habit::Sleep, Habit::Wake, Habit::Study].into_iter().collect();
        let done: Vec<_> = set.completed().collect();
        assert_eq!(done, vec![Habit::Wake, Habit::Study, Habit::Sleep]);
        assert_eq!(set.completed_count(), 3);
        assert_eq!(set.achievement_rate(), 60);
    }

    #[test]
    fn unchecking_a_habit_clears_it() {
        let mut set = HabitSet::new().with(Habit::Hydrate, true);
        set.set(Habit::Hydrate, false);
        assert_eq!(set.completed_count(), 0);
    }

    #[test]
    fn mood_bounds() {
        assert_eq!(MoodScore::new(0), Err(InputError::MoodOutOfRange(0)));
        assert_eq!(MoodScore::new(11), Err(InputError::MoodOutOfRange(11)));
        assert_eq!(MoodScore::new(1).unwrap().get(), 1);
        assert_eq!(MoodScore::new(10).unwrap().get(), 10);
        assert_eq!(MoodScore::default().get(), 5);
    }

    #[test]
    fn habit_set_serializes_as_map() {
        let set = HabitSet::new().with(Habit::Exercise, true);
        let json = serde_json::to_value(set).unwrap();
        assert_eq!(json["exercise"], true);
        assert_eq!(json["wake"], false);
    }
}
