pub use pokedex_core as core;

pub mod error;
pub mod session;
pub mod storage;
pub mod team;

pub use crate::core::{Pokemon, Query, Team, display, lookup, pokemon};
pub use error::Error;
pub use session::Session;
pub use storage::Storage;
