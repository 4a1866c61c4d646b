pub use crate::core::team::{CAPACITY, Corrupt, Error, Member, Slot, Team};

use crate::pokemon;
use crate::{Pokemon, Storage};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Storage key of the persisted team.
pub const KEY: &str = "pokedex_team_v1";

/// File name used by [`Store::export`].
pub const EXPORT_FILE: &str = "team.json";

/// The team of the user, written through to [`Storage`] on every change.
///
/// The in-memory team is authoritative for the rest of the session even if
/// a write fails.
#[derive(Debug, Clone)]
pub struct Store {
    team: Team,
    storage: Storage,
    degraded: bool,
    revision: u64,
    written: Arc<Mutex<u64>>,
}

impl Store {
    /// Loads the persisted team.
    ///
    /// Missing data yields an empty team. Unreadable or corrupt data is
    /// discarded and yields an empty, degraded team.
    pub async fn load(storage: Storage) -> Self {
        let (team, degraded) = match storage.read(KEY).await {
            Ok(None) => (Team::new(), false),
            Ok(Some(json)) => match Team::from_json(&json) {
                Ok(team) => (team, false),
                Err(error) => {
                    log::warn!("Discarding stored team: {error}");

                    (Team::new(), true)
                }
            },
            Err(error) => {
                log::warn!("Stored team could not be read: {error}");

                (Team::new(), true)
            }
        };

        log::info!("Loaded team with {} members", team.len());

        Self {
            team,
            storage,
            degraded,
            revision: 0,
            written: Arc::new(Mutex::new(0)),
        }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    /// Whether stored data had to be discarded on load.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Adds the entry to the team and returns its pending write.
    ///
    /// Rejected additions leave both the team and the storage untouched.
    pub fn add(
        &mut self,
        pokemon: &Pokemon,
    ) -> Result<impl Future<Output = Result<(), crate::Error>> + use<>, Error> {
        self.team.add(pokemon)?;

        Ok(self.save())
    }

    pub fn remove(
        &mut self,
        id: pokemon::Id,
    ) -> impl Future<Output = Result<(), crate::Error>> + use<> {
        let _ = self.team.remove(id);

        self.save()
    }

    pub fn clear(&mut self) -> impl Future<Output = Result<(), crate::Error>> + use<> {
        self.team.clear();

        self.save()
    }

    /// Writes the whole team to storage.
    ///
    /// Writes are serialized; a write never replaces one issued after it.
    pub fn save(&mut self) -> impl Future<Output = Result<(), crate::Error>> + use<> {
        self.revision += 1;

        let revision = self.revision;
        let json = self.team.to_json();
        let storage = self.storage.clone();
        let written = self.written.clone();

        async move {
            let json = json?;
            let mut latest = written.lock().await;

            if *latest > revision {
                log::debug!("Skipping outdated team write (revision {revision})");
                return Ok(());
            }

            storage
                .write(KEY, &json)
                .await
                .map_err(|error| crate::Error::StorageWriteFailed(Arc::new(error)))?;

            *latest = revision;

            Ok(())
        }
    }

    /// Writes the team as pretty-printed JSON to `<directory>/team.json`.
    pub fn export(
        &self,
        directory: &Path,
    ) -> impl Future<Output = Result<PathBuf, crate::Error>> + use<> {
        let json = self.team.to_json();
        let directory = directory.to_path_buf();

        async move {
            let json = json?;
            let path = directory.join(EXPORT_FILE);

            let export = async {
                fs::create_dir_all(&directory).await?;
                fs::write(&path, json).await
            };

            export
                .await
                .map_err(|error| crate::Error::ExportFailed(Arc::new(error)))?;

            log::info!("Exported team to {}", path.display());

            Ok(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{Moves, Tenths, Type};

    fn pokemon(id: u32, name: &str) -> Pokemon {
        Pokemon {
            id: pokemon::Id::new(id).expect("positive id"),
            name: name.to_owned(),
            sprite: String::new(),
            types: vec![Type::new("normal")],
            height: Tenths(10),
            weight: Tenths(100),
            stats: Vec::new(),
            moves: Moves::default(),
        }
    }

    fn id(number: u32) -> pokemon::Id {
        pokemon::Id::new(number).expect("positive id")
    }

    async fn stored(storage: &Storage) -> Option<Team> {
        let json = storage.read(KEY).await.expect("read storage")?;

        Some(Team::from_json(&json).expect("valid team"))
    }

    #[tokio::test]
    async fn first_run_is_empty() {
        let directory = tempfile::tempdir().expect("create temp dir");
        let store = Store::load(Storage::new(directory.path())).await;

        assert!(store.team().is_empty());
        assert!(!store.is_degraded());
    }

    #[tokio::test]
    async fn corrupt_data_is_discarded() {
        for corrupt in ["definitely not json", r#"{ "id": 25 }"#, "[{ \"id\": 0 }]"] {
            let directory = tempfile::tempdir().expect("create temp dir");
            let storage = Storage::new(directory.path());
            storage.write(KEY, corrupt).await.expect("write");

            let store = Store::load(storage).await;

            assert!(store.team().is_empty());
            assert!(store.is_degraded());
        }
    }

    #[tokio::test]
    async fn mutations_write_through() {
        let directory = tempfile::tempdir().expect("create temp dir");
        let storage = Storage::new(directory.path());
        let mut store = Store::load(storage.clone()).await;

        store
            .add(&pokemon(25, "pikachu"))
            .expect("room in team")
            .await
            .expect("save team");
        store
            .add(&pokemon(133, "eevee"))
            .expect("room in team")
            .await
            .expect("save team");

        assert_eq!(stored(&storage).await.as_ref(), Some(store.team()));

        let reloaded = Store::load(storage.clone()).await;
        assert_eq!(reloaded.team(), store.team());

        store.remove(id(25)).await.expect("save team");
        let team = stored(&storage).await.expect("stored team");
        assert_eq!(team.members().len(), 1);
        assert_eq!(team.members()[0].name, "eevee");

        store.clear().await.expect("save team");
        assert_eq!(stored(&storage).await, Some(Team::new()));
    }

    #[tokio::test]
    async fn rejected_additions_do_not_write() {
        let directory = tempfile::tempdir().expect("create temp dir");
        let storage = Storage::new(directory.path());
        let mut store = Store::load(storage.clone()).await;

        store
            .add(&pokemon(25, "pikachu"))
            .expect("room in team")
            .await
            .expect("save team");

        assert!(matches!(
            store.add(&pokemon(25, "pikachu")),
            Err(Error::Duplicate(_))
        ));
        assert_eq!(store.team().len(), 1);

        for number in 26..=30 {
            store
                .add(&pokemon(number, "filler"))
                .expect("room in team")
                .await
                .expect("save team");
        }

        storage.write(KEY, "sentinel").await.expect("write");

        assert!(matches!(store.add(&pokemon(31, "extra")), Err(Error::Full)));
        assert_eq!(store.team().len(), 6);
        assert_eq!(
            storage.read(KEY).await.expect("read").as_deref(),
            Some("sentinel")
        );
    }

    #[tokio::test]
    async fn removing_absent_member_is_a_no_op() {
        let directory = tempfile::tempdir().expect("create temp dir");
        let storage = Storage::new(directory.path());
        let mut store = Store::load(storage.clone()).await;

        store
            .add(&pokemon(1, "bulbasaur"))
            .expect("room in team")
            .await
            .expect("save team");

        store.remove(id(999)).await.expect("save team");

        assert_eq!(store.team().len(), 1);
        assert_eq!(stored(&storage).await.as_ref(), Some(store.team()));
    }

    #[tokio::test]
    async fn outdated_writes_are_skipped() {
        let directory = tempfile::tempdir().expect("create temp dir");
        let storage = Storage::new(directory.path());
        let mut store = Store::load(storage.clone()).await;

        let first = store.add(&pokemon(1, "bulbasaur")).expect("room in team");
        let second = store.add(&pokemon(4, "charmander")).expect("room in team");

        second.await.expect("save team");
        first.await.expect("save team");

        let team = stored(&storage).await.expect("stored team");
        assert_eq!(team.len(), 2);
    }

    #[tokio::test]
    async fn failed_writes_keep_memory_state() {
        let directory = tempfile::tempdir().expect("create temp dir");
        let blocker = directory.path().join("blocker");
        std::fs::write(&blocker, "").expect("create file");

        // A file where the storage directory should be
        let mut store = Store::load(Storage::new(&blocker)).await;

        let result = store.add(&pokemon(25, "pikachu")).expect("room in team").await;

        assert!(matches!(result, Err(crate::Error::StorageWriteFailed(_))));
        assert_eq!(store.team().len(), 1);
    }

    #[tokio::test]
    async fn export_writes_pretty_json() {
        let directory = tempfile::tempdir().expect("create temp dir");
        let mut store = Store::load(Storage::new(directory.path().join("data"))).await;

        store
            .add(&pokemon(25, "pikachu"))
            .expect("room in team")
            .await
            .expect("save team");

        let path = store
            .export(&directory.path().join("exports"))
            .await
            .expect("export team");

        assert!(path.ends_with("exports/team.json"));

        let contents = std::fs::read_to_string(&path).expect("read export");
        assert_eq!(Team::from_json(&contents).expect("valid team"), *store.team());
        assert!(contents.contains("\n  {"));
    }
}
