pub mod roster;
pub mod search;

pub use roster::Roster;
pub use search::Search;
