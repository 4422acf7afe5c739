//! Presentation-facing projections of decoded records.
//!
//! Every function here is total and pure: no I/O, no fallible step. Screens
//! read these types and nothing else.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::types::{Alignment, HeroDetail, HeroSummary, SearchResult, Stat};

/// One row of a result list.
///
/// Two view-models are the same hero when their ids match, even if one of
/// them carries a stale name or image.
#[derive(Debug, Clone, Serialize)]
pub struct HeroViewModel {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

impl PartialEq for HeroViewModel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HeroViewModel {}

impl Hash for HeroViewModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl From<&HeroSummary> for HeroViewModel {
    fn from(hero: &HeroSummary) -> Self {
        Self {
            id: hero.id.clone(),
            name: hero.name.clone(),
            image_url: hero.image_url.clone(),
        }
    }
}

pub fn to_view_model(hero: &HeroSummary) -> HeroViewModel {
    HeroViewModel::from(hero)
}

/// Map every search hit, keeping the provider's order.
pub fn to_view_models(result: &SearchResult) -> Vec<HeroViewModel> {
    result.items.iter().map(HeroViewModel::from).collect()
}

/// A stat bar on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub label: String,
    pub value: u32,
}

/// A labelled text line in one of the info sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRow {
    pub label: String,
    pub value: String,
}

/// Everything the detail screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroDetailViewModel {
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// Full name, empty when unknown or identical to `name`.
    pub real_name: String,
    pub publisher: String,
    pub alignment: Alignment,
    /// Known, non-zero stats, highest first.
    pub stats: Vec<StatEntry>,
    pub biography: Vec<InfoRow>,
    pub appearance: Vec<InfoRow>,
    pub work: Vec<InfoRow>,
    pub connections: Vec<InfoRow>,
}

impl From<&HeroDetail> for HeroDetailViewModel {
    fn from(hero: &HeroDetail) -> Self {
        let bio = &hero.biography;
        let looks = &hero.appearance;

        let real_name = if bio.full_name == hero.name {
            String::new()
        } else {
            bio.full_name.clone()
        };

        Self {
            id: hero.id.clone(),
            name: hero.name.clone(),
            image_url: hero.image_url.clone(),
            real_name,
            publisher: bio.publisher.clone(),
            alignment: bio.alignment.clone(),
            stats: ranked_stats(hero),
            biography: rows([
                ("Full Name", bio.full_name.clone()),
                ("Place of Birth", bio.place_of_birth.clone()),
                ("First Appearance", bio.first_appearance.clone()),
                ("Aliases", bio.aliases.join(", ")),
            ]),
            appearance: rows([
                ("Gender", looks.gender.clone()),
                ("Race", looks.race.clone()),
                ("Height", looks.height.join(" / ")),
                ("Weight", looks.weight.join(" / ")),
                ("Eye Color", looks.eye_color.clone()),
                ("Hair Color", looks.hair_color.clone()),
            ]),
            work: rows([
                ("Occupation", hero.work.occupation.clone()),
                ("Base", hero.work.base.clone()),
            ]),
            connections: rows([
                ("Group Affiliation", hero.connections.group_affiliation.clone()),
                ("Relatives", hero.connections.relatives.clone()),
            ]),
        }
    }
}

pub fn to_detail_view_model(hero: &HeroDetail) -> HeroDetailViewModel {
    HeroDetailViewModel::from(hero)
}

fn ranked_stats(hero: &HeroDetail) -> Vec<StatEntry> {
    let mut stats: Vec<StatEntry> = Stat::ALL
        .iter()
        .filter_map(|&stat| {
            let value = hero.stats.value(stat).filter(|v| *v > 0)?;
            Some(StatEntry {
                label: stat.label().to_string(),
                value,
            })
        })
        .collect();
    stats.sort_by(|a, b| match b.value.cmp(&a.value) {
        Ordering::Equal => a.label.cmp(&b.label),
        other => other,
    });
    stats
}

// Empty values are dropped, not rendered as blanks.
fn rows<const N: usize>(items: [(&str, String); N]) -> Vec<InfoRow> {
    items
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| InfoRow {
            label: label.to_string(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppearanceBlock, BiographyBlock, ConnectionsBlock, StatBlock, WorkBlock};
    use std::collections::HashSet;

    fn summary(id: &str, name: &str) -> HeroSummary {
        HeroSummary {
            id: id.to_string(),
            name: name.to_string(),
            image_url: format!("http://x/{id}.jpg"),
        }
    }

    fn detail() -> HeroDetail {
        HeroDetail {
            id: "70".to_string(),
            name: "Batman".to_string(),
            image_url: "http://x/70.jpg".to_string(),
            stats: StatBlock {
                intelligence: "100".to_string(),
                strength: "26".to_string(),
                speed: "null".to_string(),
                durability: "50".to_string(),
                power: "0".to_string(),
                combat: "100".to_string(),
            },
            biography: BiographyBlock {
                full_name: "Bruce Wayne".to_string(),
                aliases: vec!["Insider".to_string(), "Matches Malone".to_string()],
                publisher: "DC Comics".to_string(),
                alignment: Alignment::Good,
                ..BiographyBlock::default()
            },
            appearance: AppearanceBlock {
                gender: "Male".to_string(),
                height: vec!["6'2".to_string(), "188 cm".to_string()],
                ..AppearanceBlock::default()
            },
            work: WorkBlock {
                occupation: "Businessman".to_string(),
                base: String::new(),
            },
            connections: ConnectionsBlock::default(),
        }
    }

    #[test]
    fn equality_is_by_id_only() {
        let fresh = to_view_model(&summary("70", "Batman"));
        let stale = to_view_model(&summary("70", "The Bat"));
        assert_eq!(fresh, stale);
        assert_ne!(fresh, to_view_model(&summary("69", "Batman")));

        let set: HashSet<HeroViewModel> = [fresh, stale].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn mapping_is_deterministic() {
        let hero = summary("70", "Batman");
        let a = to_view_model(&hero);
        let b = to_view_model(&hero);
        assert_eq!(a, b);
        assert_eq!(a.name, b.name);
        assert_eq!(a.image_url, b.image_url);
    }

    #[test]
    fn search_mapping_keeps_order() {
        let result = SearchResult {
            status: "success".to_string(),
            items: vec![summary("2", "B"), summary("1", "A")],
        };
        let ids: Vec<String> = to_view_models(&result).into_iter().map(|v| v.id).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn stats_drop_unknown_and_zero_and_rank_descending() {
        let vm = to_detail_view_model(&detail());
        let stats: Vec<(&str, u32)> = vm.stats.iter().map(|s| (s.label.as_str(), s.value)).collect();
        assert_eq!(
            stats,
            [("Combat", 100), ("Intelligence", 100), ("Durability", 50), ("Strength", 26)]
        );
    }

    #[test]
    fn info_sections_skip_empty_values() {
        let vm = to_detail_view_model(&detail());
        assert_eq!(
            vm.biography,
            [
                InfoRow {
                    label: "Full Name".to_string(),
                    value: "Bruce Wayne".to_string()
                },
                InfoRow {
                    label: "Aliases".to_string(),
                    value: "Insider, Matches Malone".to_string()
                },
            ]
        );
        assert_eq!(vm.appearance.len(), 2);
        assert_eq!(vm.appearance[1].value, "6'2 / 188 cm");
        assert_eq!(vm.work.len(), 1);
        assert!(vm.connections.is_empty());
    }

    #[test]
    fn real_name_hidden_when_same_as_name() {
        let mut hero = detail();
        assert_eq!(to_detail_view_model(&hero).real_name, "Bruce Wayne");

        hero.biography.full_name = "Batman".to_string();
        assert_eq!(to_detail_view_model(&hero).real_name, "");
    }
}
