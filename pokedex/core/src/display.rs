//! Pure derivations from catalog entries and teams into display values.
use crate::team;

use std::fmt;

/// Stat values at or above this fill their bar completely.
pub const STAT_BAR_MAX: u32 = 180;

/// Amount of moves shown for a catalog entry.
pub const MOVE_SAMPLE: usize = 6;

/// Style tag of a type badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Light,
    Dark,
}

impl Badge {
    /// Total over any input; unknown types get [`Badge::Secondary`].
    pub fn for_type(type_: &str) -> Self {
        match type_ {
            "fire" | "psychic" | "fairy" => Self::Danger,
            "water" | "dragon" => Self::Primary,
            "grass" | "bug" => Self::Success,
            "electric" | "ground" => Self::Warning,
            "ice" | "flying" => Self::Info,
            "fighting" | "ghost" | "dark" => Self::Dark,
            "poison" | "rock" | "steel" => Self::Secondary,
            "normal" => Self::Light,
            _ => Self::Secondary,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fraction of a stat bar to fill, in `[0, 1]`.
pub fn stat_bar(value: u32, max: u32) -> f32 {
    if max == 0 {
        return 1.0;
    }

    value.min(max) as f32 / max as f32
}

/// Placeholder text for the slot at `index`, if it is within capacity.
pub fn placeholder(index: usize) -> Option<String> {
    (index < team::CAPACITY).then(|| format!("Empty slot #{}", index + 1))
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
