use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::habits::InputError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoachStyle {
    Sparta,
    #[default]
    Mentor,
    GameMaster,
}

impl CoachStyle {
    pub const ALL: [CoachStyle; 3] = [
        CoachStyle::Sparta,
        CoachStyle::Mentor,
        CoachStyle::GameMaster,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CoachStyle::Sparta => "sparta",
            CoachStyle::Mentor => "mentor",
            CoachStyle::GameMaster => "game-master",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CoachStyle::Sparta => "Sparta coach",
            CoachStyle::Mentor => "Warm mentor",
            CoachStyle::GameMaster => "Game master",
        }
    }

    pub fn closing_line(self) -> &'static str {
        match self {
            CoachStyle::Sparta => "No excuses. Keep moving forward.",
            CoachStyle::Mentor => "It's okay, one step at a time.",
            CoachStyle::GameMaster => "The quest has already begun!",
        }
    }
}

impl fmt::Display for CoachStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CoachStyle {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "sparta" => Ok(CoachStyle::Sparta),
            "mentor" => Ok(CoachStyle::Mentor),
            "game-master" | "gamemaster" => Ok(CoachStyle::GameMaster),
            _ => Err(InputError::UnknownCoachStyle(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("Sparta".parse::<CoachStyle>().unwrap(), CoachStyle::Sparta);
        assert_eq!("game_master".parse::<CoachStyle>().unwrap(), CoachStyle::GameMaster);
        assert_eq!("Game Master".parse::<CoachStyle>().unwrap(), CoachStyle::GameMaster);
        assert!("drill-sergeant".parse::<CoachStyle>().is_err());
    }

    #[test]
    fn key_round_trips() {
        for style in CoachStyle::ALL {
            assert_eq!(style.key().parse::<CoachStyle>().unwrap(), style);
        }
    }

    #[test]
    fn closing_lines_are_distinct() {
        let [a, b, c] = CoachStyle::ALL.map(CoachStyle::closing_line);
        assert!(a != b && b != c && a != c);
    }
}
