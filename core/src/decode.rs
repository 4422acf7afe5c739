//! Wire schema and decoder for superhero API payloads.
//!
//! # Design
//! The wire structs below mirror the JSON exactly and are private; the public
//! records in `types` are built from them with plain `From` impls. Only
//! `id`, `name` and `image.url` (plus `response` and `results` for a search)
//! are mandatory. Every other field tolerates both an absent key and a JSON
//! `null`, which the provider sends freely.
//!
//! The body is parsed into a `serde_json::Value` first so an in-band provider
//! error (`{"response":"error","error":"..."}`) is reported as such instead of
//! as a missing `results` field.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DecodeError;
use crate::types::{
    Alignment, AppearanceBlock, BiographyBlock, ConnectionsBlock, HeroDetail, HeroSummary, SearchResult, StatBlock,
    WorkBlock,
};

/// Decode the body of a name search.
pub fn decode_search_result(bytes: &[u8]) -> Result<SearchResult, DecodeError> {
    let value = parse_envelope(bytes)?;
    let wire: WireSearchResult = serde_json::from_value(value)?;
    let items = wire
        .results
        .into_iter()
        .map(HeroSummary::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SearchResult {
        status: wire.response,
        items,
    })
}

/// Decode the body of an id lookup.
pub fn decode_hero_detail(bytes: &[u8]) -> Result<HeroDetail, DecodeError> {
    let value = parse_envelope(bytes)?;
    let wire: WireHeroDetail = serde_json::from_value(value)?;
    HeroDetail::try_from(wire)
}

fn parse_envelope(bytes: &[u8]) -> Result<Value, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    match provider_error(&value) {
        Some(message) => Err(DecodeError::Provider(message)),
        None => Ok(value),
    }
}

fn provider_error(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if object.get("response")?.as_str()? != "error" {
        return None;
    }
    let message = object
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unspecified error");
    Some(message.to_string())
}

/// Treat `null` like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn require_id(id: String) -> Result<String, DecodeError> {
    if id.trim().is_empty() {
        return Err(DecodeError::MissingField("id".to_string()));
    }
    Ok(id)
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct WireSearchResult {
    response: String,
    results: Vec<WireHeroSummary>,
}

#[derive(Deserialize)]
struct WireImage {
    url: String,
}

#[derive(Deserialize)]
struct WireHeroSummary {
    id: String,
    name: String,
    image: WireImage,
}

#[derive(Deserialize)]
struct WireHeroDetail {
    id: String,
    name: String,
    image: WireImage,
    #[serde(default, deserialize_with = "null_as_default")]
    powerstats: WirePowerstats,
    #[serde(default, deserialize_with = "null_as_default")]
    biography: WireBiography,
    #[serde(default, deserialize_with = "null_as_default")]
    appearance: WireAppearance,
    #[serde(default, deserialize_with = "null_as_default")]
    work: WireWork,
    #[serde(default, deserialize_with = "null_as_default")]
    connections: WireConnections,
}

#[derive(Deserialize, Default)]
struct WirePowerstats {
    #[serde(default, deserialize_with = "null_as_default")]
    intelligence: String,
    #[serde(default, deserialize_with = "null_as_default")]
    strength: String,
    #[serde(default, deserialize_with = "null_as_default")]
    speed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    durability: String,
    #[serde(default, deserialize_with = "null_as_default")]
    power: String,
    #[serde(default, deserialize_with = "null_as_default")]
    combat: String,
}

#[derive(Deserialize, Default)]
struct WireBiography {
    #[serde(rename = "full-name", default, deserialize_with = "null_as_default")]
    full_name: String,
    #[serde(rename = "alter-egos", default, deserialize_with = "null_as_default")]
    alter_egos: String,
    #[serde(default, deserialize_with = "null_as_default")]
    aliases: Vec<String>,
    #[serde(rename = "place-of-birth", default, deserialize_with = "null_as_default")]
    place_of_birth: String,
    #[serde(rename = "first-appearance", default, deserialize_with = "null_as_default")]
    first_appearance: String,
    #[serde(default, deserialize_with = "null_as_default")]
    publisher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    alignment: String,
}

#[derive(Deserialize, Default)]
struct WireAppearance {
    #[serde(default, deserialize_with = "null_as_default")]
    gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    race: String,
    #[serde(default, deserialize_with = "null_as_default")]
    height: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    weight: Vec<String>,
    #[serde(rename = "eye-color", default, deserialize_with = "null_as_default")]
    eye_color: String,
    #[serde(rename = "hair-color", default, deserialize_with = "null_as_default")]
    hair_color: String,
}

#[derive(Deserialize, Default)]
struct WireWork {
    #[serde(default, deserialize_with = "null_as_default")]
    occupation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    base: String,
}

#[derive(Deserialize, Default)]
struct WireConnections {
    #[serde(rename = "group-affiliation", default, deserialize_with = "null_as_default")]
    group_affiliation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    relatives: String,
}

// ---------------------------------------------------------------------------
// Wire → record
// ---------------------------------------------------------------------------

impl TryFrom<WireHeroSummary> for HeroSummary {
    type Error = DecodeError;

    fn try_from(wire: WireHeroSummary) -> Result<Self, Self::Error> {
        Ok(HeroSummary {
            id: require_id(wire.id)?,
            name: wire.name,
            image_url: wire.image.url,
        })
    }
}

impl TryFrom<WireHeroDetail> for HeroDetail {
    type Error = DecodeError;

    fn try_from(wire: WireHeroDetail) -> Result<Self, Self::Error> {
        Ok(HeroDetail {
            id: require_id(wire.id)?,
            name: wire.name,
            image_url: wire.image.url,
            stats: wire.powerstats.into(),
            biography: wire.biography.into(),
            appearance: wire.appearance.into(),
            work: WorkBlock {
                occupation: wire.work.occupation,
                base: wire.work.base,
            },
            connections: ConnectionsBlock {
                group_affiliation: wire.connections.group_affiliation,
                relatives: wire.connections.relatives,
            },
        })
    }
}

impl From<WirePowerstats> for StatBlock {
    fn from(wire: WirePowerstats) -> Self {
        StatBlock {
            intelligence: wire.intelligence,
            strength: wire.strength,
            speed: wire.speed,
            durability: wire.durability,
            power: wire.power,
            combat: wire.combat,
        }
    }
}

impl From<WireBiography> for BiographyBlock {
    fn from(wire: WireBiography) -> Self {
        BiographyBlock {
            full_name: wire.full_name,
            alter_egos: wire.alter_egos,
            aliases: wire.aliases,
            place_of_birth: wire.place_of_birth,
            first_appearance: wire.first_appearance,
            publisher: wire.publisher,
            alignment: Alignment::parse(&wire.alignment),
        }
    }
}

impl From<WireAppearance> for AppearanceBlock {
    fn from(wire: WireAppearance) -> Self {
        AppearanceBlock {
            gender: wire.gender,
            race: wire.race,
            height: wire.height,
            weight: wire.weight,
            eye_color: wire.eye_color,
            hair_color: wire.hair_color,
        }
    }
}
