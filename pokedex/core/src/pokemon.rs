pub mod api;

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A normalized catalog entry.
///
/// Every successful lookup produces a fresh [`Pokemon`]; nothing here is
/// ever merged with a previous result.
#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    pub id: Id,
    pub name: String,
    /// URL of the preferred artwork, or empty if upstream has none.
    pub sprite: String,
    pub types: Vec<Type>,
    pub height: Tenths,
    pub weight: Tenths,
    pub stats: Vec<Stat>,
    pub moves: Moves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Id(u32);

impl Id {
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Id {
    type Error = InvalidId;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        Self::new(number).ok_or(InvalidId)
    }
}

impl From<Id> for u32 {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifiers must be positive")]
pub struct InvalidId;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Type(String);

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An upstream integer measured in tenths of the displayed unit
/// (decimeters for height, hectograms for weight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Tenths(pub u32);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

/// The set of moves a [`Pokemon`] can learn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Moves(Arc<BTreeSet<String>>);

impl Moves {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Draws `min(amount, len)` distinct moves uniformly at random.
    ///
    /// Each call draws a brand new sample.
    pub fn sample(&self, amount: usize) -> Vec<String> {
        self.sample_with(amount, &mut rand::thread_rng())
    }

    pub fn sample_with<R: Rng + ?Sized>(&self, amount: usize, rng: &mut R) -> Vec<String> {
        let mut sample: Vec<String> = self.0.iter().cloned().choose_multiple(rng, amount);

        // `choose_multiple` does not randomize order
        sample.shuffle(rng);
        sample
    }
}

impl<S: Into<String>> FromIterator<S> for Moves {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().map(Into::into).collect()))
    }
}
