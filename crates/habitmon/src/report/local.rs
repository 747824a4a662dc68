use anyhow::Result;
use async_trait::async_trait;

use super::{ReportGenerator, ReportInput};

pub const NO_HABITS_PLACEHOLDER: &str = "none yet";
pub const WEATHER_PLACEHOLDER: &str = "weather data unavailable";
pub const NEXT_DAY_GOAL: &str = "complete at least 3 habits";

/// Rule-based report. Same input, same text.
pub struct LocalReportGenerator;

impl LocalReportGenerator {
    pub fn render(input: &ReportInput<'_>) -> String {
        let completed = input
            .habits
            .completed()
            .map(|habit| habit.label())
            .collect::<Vec<_>>();
        let completed = if completed.is_empty() {
            NO_HABITS_PLACEHOLDER.to_string()
        } else {
            completed.join(", ")
        };

        let weather = input
            .weather
            .map(ToString::to_string)
            .unwrap_or_else(|| WEATHER_PLACEHOLDER.to_string());

        let creature = input.creature;
        let (stat, value) = creature.stats.highest();

        format!(
            "Condition grade: {grade}\n\n\
            Habit analysis:\n\
            Completed today ({count}/5): {completed}\n\
            Mood: {mood}/10\n\n\
            Weather:\n{weather}\n\n\
            Tomorrow's mission:\n{goal}\n\n\
            Today's partner creature:\n\
            {name} ({types}), strongest stat {stat} {value}\n\
            → {closing}\n",
            grade = input.grade(),
            count = input.habits.completed_count(),
            mood = input.mood,
            goal = NEXT_DAY_GOAL,
            name = creature.name,
            types = creature.type_list(),
            closing = input.style.closing_line(),
        )
    }
}

#[async_trait]
impl ReportGenerator for LocalReportGenerator {
    async fn generate(&self, input: &ReportInput<'_>) -> Result<String> {
        Ok(Self::render(input))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
