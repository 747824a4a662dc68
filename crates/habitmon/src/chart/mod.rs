use chrono::NaiveDate;
use serde::Serialize;

use crate::habits::{HabitSet, achievement_rate};

/// Demo history shown before today's real value, oldest first.
pub const DEMO_HISTORY: [usize; 6] = [3, 4, 2, 5, 4, 3];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMetric {
    #[default]
    Count,
    Percent,
}

impl SeriesMetric {
    pub fn ceiling(self) -> u32 {
        match self {
            SeriesMetric::Count => HabitSet::TOTAL as u32,
            SeriesMetric::Percent => 100,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SeriesMetric::Count => "",
            SeriesMetric::Percent => "%",
        }
    }

    fn value_for(self, completed: usize) -> u32 {
        match self {
            SeriesMetric::Count => completed as u32,
            SeriesMetric::Percent => achievement_rate(completed) as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySeries {
    pub metric: SeriesMetric,
    pub points: Vec<SeriesPoint>,
}

impl WeeklySeries {
    /// Six demo days followed by today's real completion.
    pub fn build(today_completed: usize, today: NaiveDate, metric: SeriesMetric) -> Self {
        let history = DEMO_HISTORY.iter().enumerate().map(|(i, &completed)| SeriesPoint {
            label: format!("D-{}", DEMO_HISTORY.len() - i),
            value: metric.value_for(completed),
        });
        let today = SeriesPoint {
            label: today.format("%m/%d").to_string(),
            value: metric.value_for(today_completed),
        };

        Self {
            metric,
            points: history.chain(std::iter::once(today)).collect(),
        }
    }

    pub fn today(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    #[test]
    fn count_series_appends_today() {
        let series = WeeklySeries::build(2, date(), SeriesMetric::Count);
        let labels: Vec<_> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["D-6", "D-5", "D-4", "D-3", "D-2", "D-1", "03/07"]);
        let values: Vec<_> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, [3, 4, 2, 5, 4, 3, 2]);
        assert_eq!(series.metric.ceiling(), 5);
    }

    #[test]
    fn percent_series_converts_every_point() {
        let series = WeeklySeries::build(5, date(), SeriesMetric::Percent);
        let values: Vec<_> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, [60, 80, 40, 100, 80, 60, 100]);
        assert_eq!(series.today().unwrap().value, 100);
        assert_eq!(series.metric.ceiling(), 100);
    }
}
