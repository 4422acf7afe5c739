//! Decoded records of the superhero API.
//!
//! # Design
//! These are the in-process shapes, not the wire shapes: `image.url` is
//! flattened into `image_url` and hyphenated wire keys become snake_case
//! fields. The wire structs and the renames live in `decode`. Records are
//! request-scoped and immutable; a newer fetch supersedes them rather than
//! mutating them.

use serde::Serialize;

/// Outcome of a name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// The provider's in-band `response` field, e.g. `"success"`.
    pub status: String,
    pub items: Vec<HeroSummary>,
}

/// Minimal identity of a hero, used for list rows and as the lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSummary {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

/// Full record returned by an id lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroDetail {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub stats: StatBlock,
    pub biography: BiographyBlock,
    pub appearance: AppearanceBlock,
    pub work: WorkBlock,
    pub connections: ConnectionsBlock,
}

impl HeroDetail {
    pub fn summary(&self) -> HeroSummary {
        HeroSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// The six power stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Intelligence,
    Strength,
    Speed,
    Durability,
    Power,
    Combat,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Intelligence,
        Stat::Strength,
        Stat::Speed,
        Stat::Durability,
        Stat::Power,
        Stat::Combat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stat::Intelligence => "Intelligence",
            Stat::Strength => "Strength",
            Stat::Speed => "Speed",
            Stat::Durability => "Durability",
            Stat::Power => "Power",
            Stat::Combat => "Combat",
        }
    }
}

/// Power stats exactly as the provider sent them.
///
/// Values are decimal strings or the sentinel `"null"`; nothing guarantees
/// they parse, so read them through [`StatBlock::value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatBlock {
    pub intelligence: String,
    pub strength: String,
    pub speed: String,
    pub durability: String,
    pub power: String,
    pub combat: String,
}

impl StatBlock {
    pub fn raw(&self, stat: Stat) -> &str {
        match stat {
            Stat::Intelligence => &self.intelligence,
            Stat::Strength => &self.strength,
            Stat::Speed => &self.speed,
            Stat::Durability => &self.durability,
            Stat::Power => &self.power,
            Stat::Combat => &self.combat,
        }
    }

    /// Numeric value of `stat`, or `None` for the sentinel, an empty string
    /// or anything else that is not a whole number.
    pub fn value(&self, stat: Stat) -> Option<u32> {
        self.raw(stat).trim().parse().ok()
    }
}

/// Moral alignment as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Alignment {
    Good,
    Bad,
    Neutral,
    /// Anything else, kept verbatim (including `""` and `"-"`).
    Other(String),
}

impl Alignment {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "good" => Alignment::Good,
            "bad" => Alignment::Bad,
            "neutral" => Alignment::Neutral,
            _ => Alignment::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Alignment::Good => "good",
            Alignment::Bad => "bad",
            Alignment::Neutral => "neutral",
            Alignment::Other(raw) => raw,
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Other(String::new())
    }
}

impl From<Alignment> for String {
    fn from(alignment: Alignment) -> Self {
        alignment.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BiographyBlock {
    /// Wire key `full-name`.
    pub full_name: String,
    /// Wire key `alter-egos`.
    pub alter_egos: String,
    pub aliases: Vec<String>,
    /// Wire key `place-of-birth`.
    pub place_of_birth: String,
    /// Wire key `first-appearance`.
    pub first_appearance: String,
    pub publisher: String,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppearanceBlock {
    pub gender: String,
    pub race: String,
    /// Same height in several units, e.g. `["6'2", "188 cm"]`.
    pub height: Vec<String>,
    pub weight: Vec<String>,
    pub eye_color: String,
    pub hair_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkBlock {
    pub occupation: String,
    pub base: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionsBlock {
    pub group_affiliation: String,
    pub relatives: String,
}
