use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    chart::{SeriesMetric, WeeklySeries},
    creature::{Creature, CreatureFetcher},
    habits::{HabitSet, MoodScore},
    report::{CoachStyle, Grade, ReportInput, SharedGenerator},
    weather::{City, SharedWeather, WeatherInfo},
};

/// One submission's inputs.
#[derive(Debug, Clone, Default)]
pub struct CheckIn {
    pub habits: HabitSet,
    pub mood: MoodScore,
    pub city: City,
    pub style: CoachStyle,
    /// Pin the partner creature instead of drawing a random one.
    pub creature_id: Option<u32>,
    pub metric: SeriesMetric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub achievement_rate: u8,
    pub completed: usize,
    pub total: usize,
    pub mood: MoodScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    Generated { generator: String, text: String },
    /// Skipped: there is no creature to report on.
    CreatureUnavailable,
    Failed { generator: String, reason: String },
}

impl ReportOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            ReportOutcome::Generated { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Everything rendered for one submission.
#[derive(Debug, Clone, Serialize)]
pub struct ConditionCard {
    pub habits: HabitSet,
    pub metrics: Metrics,
    pub grade: Grade,
    pub series: WeeklySeries,
    pub city: City,
    pub style: CoachStyle,
    pub weather: Option<WeatherInfo>,
    pub creature: Option<Creature>,
    pub report: ReportOutcome,
}

pub struct ConditionSession {
    creatures: CreatureFetcher,
    weather: SharedWeather,
    generator: SharedGenerator,
}

impl ConditionSession {
    pub fn new(creatures: CreatureFetcher, weather: SharedWeather, generator: SharedGenerator) -> Self {
        Self {
            creatures,
            weather,
            generator,
        }
    }

    pub async fn submit(&self, check_in: &CheckIn) -> ConditionCard {
        self.submit_on(check_in, Local::now().date_naive()).await
    }

    pub async fn submit_on(&self, check_in: &CheckIn, today: NaiveDate) -> ConditionCard {
        let completed = check_in.habits.completed_count();
        let metrics = Metrics {
            achievement_rate: check_in.habits.achievement_rate(),
            completed,
            total: HabitSet::TOTAL,
            mood: check_in.mood,
        };
        info!(
            completed,
            mood = check_in.mood.get(),
            city = %check_in.city,
            style = %check_in.style,
            "Generating condition report"
        );

        let creature_id = check_in
            .creature_id
            .unwrap_or_else(|| self.creatures.random_id());
        let (creature, weather) = tokio::join!(
            self.creatures.fetch(creature_id),
            self.weather.resolve(check_in.city.name()),
        );

        let report = match &creature {
            None => ReportOutcome::CreatureUnavailable,
            Some(creature) => self.run_generator(check_in, weather.as_ref(), creature).await,
        };

        ConditionCard {
            habits: check_in.habits,
            metrics,
            grade: Grade::assign(completed, check_in.mood),
            series: WeeklySeries::build(completed, today, check_in.metric),
            city: check_in.city,
            style: check_in.style,
            weather,
            creature,
            report,
        }
    }

    async fn run_generator(
        &self,
        check_in: &CheckIn,
        weather: Option<&WeatherInfo>,
        creature: &Creature,
    ) -> ReportOutcome {
        let input = ReportInput {
            habits: check_in.habits,
            mood: check_in.mood,
            weather,
            creature,
            style: check_in.style,
        };
        let generator = self.generator.name().to_string();
        match self.generator.generate(&input).await {
            Ok(text) => ReportOutcome::Generated { generator, text },
            Err(err) => {
                warn!(?err, %generator, "Report generation failed");
                ReportOutcome::Failed {
                    generator,
                    reason: err.to_string(),
                }
            }
        }
    }
}
