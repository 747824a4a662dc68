//! Partner creature lookup against the public species API.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    config::CreatureConfig,
    http::{FetchError, SharedFetcher},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatName {
    #[serde(rename = "HP")]
    Hp,
    Attack,
    Defense,
    #[serde(rename = "Special Attack")]
    SpecialAttack,
    #[serde(rename = "Special Defense")]
    SpecialDefense,
    Speed,
}

impl StatName {
    pub const ALL: [StatName; 6] = [
        StatName::Hp,
        StatName::Attack,
        StatName::Defense,
        StatName::SpecialAttack,
        StatName::SpecialDefense,
        StatName::Speed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatName::Hp => "HP",
            StatName::Attack => "Attack",
            StatName::Defense => "Defense",
            StatName::SpecialAttack => "Special Attack",
            StatName::SpecialDefense => "Special Defense",
            StatName::Speed => "Speed",
        }
    }

    /// Key used by the species API.
    fn api_key(self) -> &'static str {
        match self {
            StatName::Hp => "hp",
            StatName::Attack => "attack",
            StatName::Defense => "defense",
            StatName::SpecialAttack => "special-attack",
            StatName::SpecialDefense => "special-defense",
            StatName::Speed => "speed",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreatureStats {
    values: [u32; 6],
}

impl CreatureStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: StatName, value: u32) -> Self {
        self.values[name as usize] = value;
        self
    }

    pub fn get(&self, name: StatName) -> u32 {
        self.values[name as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatName, u32)> + '_ {
        StatName::ALL.iter().map(|&name| (name, self.get(name)))
    }

    /// Highest base stat; ties go to the stat listed first.
    pub fn highest(&self) -> (StatName, u32) {
        self.iter()
            .fold((StatName::Hp, self.get(StatName::Hp)), |best, current| {
                if current.1 > best.1 { current } else { best }
            })
    }

    pub fn max_value(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

impl Serialize for CreatureStats {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(StatName::ALL.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(&name, &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub stats: CreatureStats,
    pub image_url: Option<String>,
}

impl Creature {
    pub fn from_json(value: serde_json::Value) -> Result<Self, FetchError> {
        let raw: RawSpecies = serde_json::from_value(value)?;
        raw.try_into()
    }

    pub fn type_list(&self) -> String {
        if self.types.is_empty() {
            "unknown type".into()
        } else {
            self.types.join(", ")
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSpecies {
    id: Option<u32>,
    name: Option<String>,
    #[serde(default)]
    types: Vec<RawTypeSlot>,
    stats: Option<Vec<RawStat>>,
    #[serde(default)]
    sprites: Option<RawSprites>,
}

#[derive(Debug, Deserialize)]
struct RawTypeSlot {
    #[serde(default)]
    slot: u32,
    #[serde(rename = "type")]
    kind: RawNamed,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawStat {
    base_stat: u32,
    stat: RawNamed,
}

#[derive(Debug, Default, Deserialize)]
struct RawSprites {
    #[serde(default)]
    other: Option<RawOtherSprites>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOtherSprites {
    #[serde(rename = "official-artwork", default)]
    official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Default, Deserialize)]
struct RawArtwork {
    #[serde(default)]
    front_default: Option<String>,
}

impl TryFrom<RawSpecies> for Creature {
    type Error = FetchError;

    fn try_from(raw: RawSpecies) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(FetchError::MissingField("id"))?;
        let name = raw
            .name
            .filter(|name| !name.is_empty())
            .ok_or(FetchError::MissingField("name"))?;
        let raw_stats = raw.stats.ok_or(FetchError::MissingField("stats"))?;

        let mut stats = CreatureStats::new();
        for name in StatName::ALL {
            let entry = raw_stats
                .iter()
                .find(|s| s.stat.name == name.api_key())
                .ok_or(FetchError::MissingField(name.api_key()))?;
            stats = stats.with(name, entry.base_stat);
        }

        let mut slots = raw.types;
        slots.sort_by_key(|slot| slot.slot);
        let types = slots.into_iter().map(|slot| slot.kind.name).collect();

        let image_url = raw
            .sprites
            .and_then(|s| s.other)
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default);

        Ok(Self {
            id,
            name: capitalize(&name),
            types,
            stats,
            image_url,
        })
    }
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub struct CreatureFetcher {
    http: SharedFetcher,
    config: CreatureConfig,
}

impl CreatureFetcher {
    pub fn new(http: SharedFetcher, config: CreatureConfig) -> Self {
        Self { http, config }
    }

    pub fn random_id(&self) -> u32 {
        rand::thread_rng().gen_range(1..=self.config.max_id.max(1))
    }

    /// Fetch a creature by id. Any failure yields `None`.
    pub async fn fetch(&self, id: u32) -> Option<Creature> {
        match self.try_fetch(id).await {
            Ok(creature) => {
                tracing::info!(id, name = %creature.name, "Partner creature fetched");
                Some(creature)
            }
            Err(err) => {
                tracing::warn!(id, %err, "Creature unavailable");
                None
            }
        }
    }

    async fn try_fetch(&self, id: u32) -> Result<Creature, FetchError> {
        let url = self.url(id);
        let body = self.http.get_json(&url, &[]).await?;
        Creature::from_json(body)
    }

    fn url(&self, id: u32) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "types": [
            {"slot": 2, "type": {"name": "poison", "url": ""}},
            {"slot": 1, "type": {"name": "grass", "url": ""}}
        ],
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp"}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack"}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "defense"}},
            {"base_stat": 65, "effort": 1, "stat": {"name": "special-attack"}},
            {"base_stat": 65, "effort": 0, "stat": {"name": "special-defense"}},
            {"base_stat": 45, "effort": 0, "stat": {"name": "speed"}}
        ],
        "sprites": {
            "other": {
                "official-artwork": {
                    "front_default": "https://img.example/1.png"
                }
            }
        }
    }"#;

    pub fn bulbasaur() -> Creature {
        Creature::from_json(serde_json::from_str(BULBASAUR).unwrap()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::http::fake::FakeFetcher;

    #[test]
    fn parses_species_payload() {
        let creature = fixtures::bulbasaur();
        assert_eq!(creature.id, 1);
        assert_eq!(creature.name, "Bulbasaur");
        assert_eq!(creature.types, vec!["grass", "poison"]);
        assert_eq!(creature.stats.get(StatName::SpecialAttack), 65);
        assert_eq!(
            creature.image_url.as_deref(),
            Some("https://img.example/1.png")
        );
    }

    #[test]
    fn highest_stat_prefers_first_on_tie() {
        let stats = CreatureStats::new()
            .with(StatName::Hp, 50)
            .with(StatName::Attack, 50);
        for _ in 0..10 {
            assert_eq!(stats.highest(), (StatName::Hp, 50));
        }

        // Special Attack is enumerated before Special Defense.
        let creature = fixtures::bulbasaur();
        assert_eq!(creature.stats.highest(), (StatName::SpecialAttack, 65));
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let creature = Creature::from_json(json!({
            "id": 25,
            "name": "PIKACHU",
            "stats": StatName::ALL
                .iter()
                .map(|s| json!({"base_stat": 10, "stat": {"name": s.api_key()}}))
                .collect::<Vec<_>>(),
            "sprites": {"other": {"official-artwork": {"front_default": null}}}
        }))
        .unwrap();
        assert_eq!(creature.name, "Pikachu");
        assert!(creature.types.is_empty());
        assert_eq!(creature.type_list(), "unknown type");
        assert_eq!(creature.image_url, None);
    }

    #[test]
    fn missing_stat_is_an_error() {
        let err = Creature::from_json(json!({
            "id": 7,
            "name": "squirtle",
            "stats": [{"base_stat": 44, "stat": {"name": "hp"}}]
        }))
        .unwrap_err();
        assert!(matches!(err, FetchError::MissingField("attack")));
    }

    #[test]
    fn missing_id_is_an_error() {
        let err = Creature::from_json(json!({"name": "mew", "stats": []})).unwrap_err();
        assert!(matches!(err, FetchError::MissingField("id")));
    }

    #[tokio::test]
    async fn fetch_hits_endpoint_with_id() {
        let fake = Arc::new(FakeFetcher::default().with(
            "https://species.test/api/1",
            fixtures::BULBASAUR,
        ));
        let fetcher = CreatureFetcher::new(
            fake.clone(),
            CreatureConfig {
                endpoint: "https://species.test/api/".into(),
                max_id: 151,
            },
        );

        let creature = fetcher.fetch(1).await.expect("creature");
        assert_eq!(creature.name, "Bulbasaur");
        assert_eq!(fake.request_count(), 1);
    }

    #[tokio::test]
    async fn fetch_degrades_to_none() {
        let fake = Arc::new(
            FakeFetcher::default().with("https://species.test/api/2", r#"{"id": "two"}"#),
        );
        let fetcher = CreatureFetcher::new(
            fake,
            CreatureConfig {
                endpoint: "https://species.test/api".into(),
                max_id: 151,
            },
        );

        // malformed payload
        assert_eq!(fetcher.fetch(2).await, None);
        // unreachable
        assert_eq!(fetcher.fetch(3).await, None);
    }

    #[test]
    fn random_id_stays_in_range() {
        let fetcher = CreatureFetcher::new(
            Arc::new(FakeFetcher::default()),
            CreatureConfig::default(),
        );
        for _ in 0..500 {
            let id = fetcher.random_id();
            assert!((1..=151).contains(&id));
        }
    }
}
