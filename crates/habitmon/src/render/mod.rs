//! Plain-text rendering of a [`ConditionCard`] for the terminal.

use std::fmt::Write;

use crate::{
    chart::WeeklySeries,
    creature::Creature,
    habits::HabitSet,
    report::WEATHER_PLACEHOLDER,
    session::{ConditionCard, ReportOutcome},
};

pub const CREATURE_PLACEHOLDER: &str = "⚠ creature data unavailable";
pub const REPORT_PLACEHOLDER: &str = "⚠ report unavailable";

const BAR_WIDTH: usize = 20;

pub fn render_card(card: &ConditionCard) -> String {
    let mut out = String::new();

    heading(&mut out, "🎮 Habit tracker, creature edition");
    render_habits(&mut out, &card.habits);
    let _ = writeln!(
        out,
        "📈 Achievement {rate}%   ✅ Habits {done}/{total}   😊 Mood {mood}",
        rate = card.metrics.achievement_rate,
        done = card.metrics.completed,
        total = card.metrics.total,
        mood = card.metrics.mood,
    );

    heading(&mut out, "📊 Last 7 days");
    render_series(&mut out, &card.series);

    heading(&mut out, "🤖 Condition report");
    match &card.weather {
        Some(weather) => {
            let _ = writeln!(out, "🌤 {}: {}", card.city, weather);
        }
        None => {
            let _ = writeln!(out, "🌤 {}: {}", card.city, WEATHER_PLACEHOLDER);
        }
    }
    out.push('\n');

    match &card.creature {
        Some(creature) => render_creature(&mut out, creature),
        None => {
            let _ = writeln!(out, "{CREATURE_PLACEHOLDER}");
        }
    }

    heading(&mut out, "📋 Report");
    match &card.report {
        ReportOutcome::Generated { text, .. } => {
            out.push_str(text.trim_end());
            out.push('\n');
        }
        ReportOutcome::CreatureUnavailable => {
            let _ = writeln!(out, "{REPORT_PLACEHOLDER} (no partner creature)");
        }
        ReportOutcome::Failed { generator, reason } => {
            let _ = writeln!(out, "{REPORT_PLACEHOLDER} ({generator}: {reason})");
        }
    }

    out
}

fn heading(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "─".repeat(40));
}

fn render_habits(out: &mut String, habits: &HabitSet) {
    for (habit, done) in habits.iter() {
        let mark = if done { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "{mark} {} {}", habit.icon(), habit.label());
    }
}

fn render_series(out: &mut String, series: &WeeklySeries) {
    let ceiling = series.metric.ceiling();
    for point in &series.points {
        let _ = writeln!(
            out,
            "{:>6} {} {}{}",
            point.label,
            bar(point.value, ceiling),
            point.value,
            series.metric.unit()
        );
    }
}

fn render_creature(out: &mut String, creature: &Creature) {
    let _ = writeln!(out, "#{} {} ({})", creature.id, creature.name, creature.type_list());
    if let Some(url) = &creature.image_url {
        let _ = writeln!(out, "🖼 {url}");
    }
    let ceiling = creature.stats.max_value();
    for (name, value) in creature.stats.iter() {
        let _ = writeln!(out, "{:>15} {} {}", name.label(), bar(value, ceiling), value);
    }
}

/// Fixed-width bar, proportional to `value / ceiling`.
fn bar(value: u32, ceiling: u32) -> String {
    let filled = if ceiling == 0 {
        0
    } else {
        ((value.min(ceiling) as f64 / ceiling as f64) * BAR_WIDTH as f64).round() as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        chart::SeriesMetric,
        creature::fixtures,
        habits::{Habit, MoodScore},
        report::{CoachStyle, Grade},
        session::Metrics,
        weather::{City, WeatherInfo},
    };

    fn card(creature: Option<Creature>, report: ReportOutcome) -> ConditionCard {
        let habits = HabitSet::new().with(Habit::Wake, true);
        ConditionCard {
            habits,
            metrics: Metrics {
                achievement_rate: 20,
                completed: 1,
                total: 5,
                mood: MoodScore::new(4).unwrap(),
            },
            grade: Grade::D,
            series: WeeklySeries::build(
                1,
                NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
                SeriesMetric::Percent,
            ),
            city: City::Daegu,
            style: CoachStyle::Mentor,
            weather: None,
            creature,
            report,
        }
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(0, 5), "░".repeat(20));
        assert_eq!(bar(5, 5), "█".repeat(20));
        assert_eq!(bar(9, 5), "█".repeat(20));
        assert_eq!(bar(3, 0), "░".repeat(20));
        assert!(bar(1, 2).starts_with(&"█".repeat(10)));
    }

    #[test]
    fn degraded_card_shows_placeholders() {
        let text = render_card(&card(None, ReportOutcome::CreatureUnavailable));
        assert!(text.contains(CREATURE_PLACEHOLDER));
        assert!(text.contains(REPORT_PLACEHOLDER));
        assert!(text.contains("Daegu: weather data unavailable"));
        assert!(text.contains("[x] 🌅 Wake-up mission"));
        assert!(text.contains("Achievement 20%"));
        assert!(text.contains("01/02"));
    }

    #[test]
    fn full_card_shows_creature_and_report() {
        let weather = WeatherInfo::Live {
            description: "haze".into(),
            temperature_c: 30.0,
        };
        let mut card = card(
            Some(fixtures::bulbasaur()),
            ReportOutcome::Generated {
                generator: "local".into(),
                text: "Condition grade: D\n".into(),
            },
        );
        card.weather = Some(weather);

        let text = render_card(&card);
        assert!(text.contains("Daegu: haze / 30.0℃"));
        assert!(text.contains("#1 Bulbasaur (grass, poison)"));
        assert!(text.contains("https://img.example/1.png"));
        assert!(text.contains("Special Defense"));
        assert!(text.contains("Condition grade: D"));
        assert!(!text.contains(REPORT_PLACEHOLDER));
    }

    #[test]
    fn failed_report_names_generator() {
        let text = render_card(&card(
            Some(fixtures::bulbasaur()),
            ReportOutcome::Failed {
                generator: "llm".into(),
                reason: "401 Unauthorized".into(),
            },
        ));
        assert!(text.contains("(llm: 401 Unauthorized)"));
    }
}
