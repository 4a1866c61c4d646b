pub mod display;
pub mod lookup;
pub mod pokemon;
pub mod team;

pub use lookup::Query;
pub use pokemon::Pokemon;
pub use team::Team;
