//! The upstream catalog schema.
//!
//! Only the fields we normalize are described here. Everything else in the
//! upstream payload is ignored, so schema changes stay contained in this
//! module.
use crate::pokemon::{self, Moves, Stat, Tenths, Type};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub id: pokemon::Id,
    pub name: String,
    /// Decimeters.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    #[serde(default)]
    pub sprites: Option<Sprites>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
}

impl Pokemon {
    pub fn parse(json: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(json)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_: Resource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: Resource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub move_: Resource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub name: String,
}

impl Sprites {
    /// The front sprite, falling back to the official artwork.
    pub fn preferred(self) -> Option<String> {
        let non_empty = |url: Option<String>| url.filter(|url| !url.is_empty());

        non_empty(self.front_default).or_else(|| {
            non_empty(
                self.other?
                    .official_artwork
                    .and_then(|artwork| artwork.front_default),
            )
        })
    }
}

impl From<Pokemon> for pokemon::Pokemon {
    fn from(pokemon: Pokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name,
            sprite: pokemon
                .sprites
                .and_then(Sprites::preferred)
                .unwrap_or_default(),
            types: pokemon
                .types
                .into_iter()
                .map(|slot| Type::new(slot.type_.name))
                .collect(),
            height: Tenths(pokemon.height),
            weight: Tenths(pokemon.weight),
            stats: pokemon
                .stats
                .into_iter()
                .map(|entry| Stat {
                    name: entry.stat.name,
                    value: entry.base_stat,
                })
                .collect(),
            moves: pokemon
                .moves
                .into_iter()
                .map(|entry| entry.move_.name)
                .collect::<Moves>(),
        }
    }
}
