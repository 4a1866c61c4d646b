use crate::Pokemon;
use crate::pokemon::{self, Type};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The maximum amount of members in a [`Team`].
pub const CAPACITY: usize = 6;

/// A persisted team member.
///
/// Only the fields needed to render a slot are kept; stats, size and moves
/// are dropped on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: pokemon::Id,
    pub name: String,
    pub sprite: String,
    pub types: Vec<Type>,
}

impl From<&Pokemon> for Member {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
            sprite: pokemon.sprite.clone(),
            types: pokemon.types.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    members: Vec<Member>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= CAPACITY
    }

    pub fn contains(&self, id: pokemon::Id) -> bool {
        self.members.iter().any(|member| member.id == id)
    }

    pub fn add(&mut self, pokemon: &Pokemon) -> Result<(), Error> {
        if self.is_full() {
            return Err(Error::Full);
        }

        if self.contains(pokemon.id) {
            return Err(Error::Duplicate(pokemon.id));
        }

        self.members.push(Member::from(pokemon));

        Ok(())
    }

    /// Removes every member with the given id.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: pokemon::Id) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.id != id);

        self.members.len() != before
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// All [`CAPACITY`] slots, filled ones first.
    pub fn slots(&self) -> impl Iterator<Item = Slot<'_>> {
        (0..CAPACITY).map(|index| match self.members.get(index) {
            Some(member) => Slot::Filled(member),
            None => Slot::Empty(index),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, Corrupt> {
        let members: Vec<Member> = serde_json::from_str(json)?;

        if members.len() > CAPACITY {
            return Err(Corrupt::Oversized(members.len()));
        }

        let mut ids = BTreeSet::new();

        for member in &members {
            if !ids.insert(member.id) {
                return Err(Corrupt::Duplicate(member.id));
            }
        }

        Ok(Self { members })
    }

    /// Pretty-printed JSON array of members.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.members)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Filled(&'a Member),
    Empty(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("team is full (max {CAPACITY}), remove one first")]
    Full,
    #[error("#{0} is already in your team")]
    Duplicate(pokemon::Id),
}

#[derive(Debug, thiserror::Error)]
pub enum Corrupt {
    #[error("malformed team data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("team data holds {0} members (max {CAPACITY})")]
    Oversized(usize),
    #[error("team data holds #{0} more than once")]
    Duplicate(pokemon::Id),
}
