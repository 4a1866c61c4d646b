use rand::Rng;
use std::fmt;

/// The highest catalog number picked by [`Query::random`].
pub const MAX_ID: u32 = 1025;

/// A normalized lookup key: a name or a numeric identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    pub fn parse(input: &str) -> Option<Self> {
        let query = input.trim().to_lowercase();

        if query.is_empty() {
            return None;
        }

        Some(Self(query))
    }

    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(1..=MAX_ID).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tags each lookup so only the most recent one is ever applied.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    issued: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;

        Ticket(self.issued)
    }

    /// Invalidates every outstanding ticket.
    pub fn cancel(&mut self) {
        self.issued += 1;
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Returns the outcome only if it belongs to the latest lookup.
    pub fn settle<T>(&self, ticket: Ticket, outcome: T) -> Option<T> {
        if self.is_latest(ticket) {
            Some(outcome)
        } else {
            log::debug!("Discarding stale lookup {ticket:?}");

            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parse_normalizes_input() {
        assert_eq!(Query::parse("  Pikachu ").as_ref().map(Query::as_str), Some("pikachu"));
        assert_eq!(Query::parse("25").as_ref().map(Query::as_str), Some("25"));
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(Query::parse(""), None);
        assert_eq!(Query::parse("   "), None);
        assert_eq!(Query::parse("\t\n"), None);
    }

    #[test]
    fn random_stays_in_catalog_range() {
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..1000 {
            let query = Query::random_with(&mut rng);
            let id: u32 = query.as_str().parse().expect("numeric query");

            assert!((1..=MAX_ID).contains(&id));
        }
    }

    #[test]
    fn only_latest_ticket_settles() {
        let mut tracker = Tracker::new();

        let first = tracker.begin();
        let second = tracker.begin();

        assert_eq!(tracker.settle(first, "bulbasaur"), None);
        assert_eq!(tracker.settle(second, "ivysaur"), Some("ivysaur"));
    }

    #[test]
    fn cancel_discards_pending_lookup() {
        let mut tracker = Tracker::new();

        let ticket = tracker.begin();
        tracker.cancel();

        assert!(!tracker.is_latest(ticket));
    }
}
