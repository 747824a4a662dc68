//! Condition report generation.
//!
//! Two strategies sit behind [`ReportGenerator`]: the rule-based
//! [`LocalReportGenerator`] and the chat-completion backed
//! [`LlmReportGenerator`]. Configuration picks one; callers never branch on
//! whether an API key happens to be present.

mod coach;
mod local;
mod remote;

use std::{fmt, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

pub use coach::CoachStyle;
pub use local::{LocalReportGenerator, NEXT_DAY_GOAL, NO_HABITS_PLACEHOLDER, WEATHER_PLACEHOLDER};
pub use remote::LlmReportGenerator;

use crate::{
    config::{GeneratorKind, HttpConfig, ReportConfig},
    creature::Creature,
    habits::{HabitSet, MoodScore},
    llm,
    weather::WeatherInfo,
};

pub type SharedGenerator = Arc<dyn ReportGenerator>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Ordered rules, first match wins.
    pub fn assign(completed: usize, mood: MoodScore) -> Self {
        match completed {
            n if n >= 5 && mood.get() >= 8 => Grade::S,
            n if n >= 4 => Grade::A,
            3 => Grade::B,
            2 => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Everything a generator may look at for one submission.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub habits: HabitSet,
    pub mood: MoodScore,
    pub weather: Option<&'a WeatherInfo>,
    pub creature: &'a Creature,
    pub style: CoachStyle,
}

impl ReportInput<'_> {
    pub fn grade(&self) -> Grade {
        Grade::assign(self.habits.completed_count(), self.mood)
    }
}

#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, input: &ReportInput<'_>) -> Result<String>;

    fn name(&self) -> &'static str;
}

pub fn create_generator(
    config: &ReportConfig,
    http: &HttpConfig,
    api_key_override: Option<String>,
) -> Result<SharedGenerator> {
    match config.generator {
        GeneratorKind::Local => Ok(Arc::new(LocalReportGenerator)),
        GeneratorKind::Llm => {
            let client = llm::create_client(&config.provider, http, api_key_override)?;
            Ok(Arc::new(LlmReportGenerator::new(
                client,
                config.model.clone(),
                config.system_prompt.clone(),
            )))
        }
    }
}
