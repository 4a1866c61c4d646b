use crate::core::pokemon::api;
use crate::{Error, Pokemon, Query};

use bytes::Bytes;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://pokeapi.co/api/v2/pokemon/";
pub const DEFAULT_RETRIES: usize = 2;

/// A connection to the catalog service.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    base: reqwest::Url,
    retries: usize,
}

impl Session {
    pub fn new(base: &str) -> Result<Self, Error> {
        let base = reqwest::Url::parse(base)
            .map_err(|error| Error::InvalidUrl(format!("{base} ({error})")))?;

        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(base.to_string()));
        }

        log::info!("Catalog session started ({base})");

        Ok(Self {
            client: CLIENT.clone(),
            base,
            retries: DEFAULT_RETRIES,
        })
    }

    /// The catalog URL every query is resolved against.
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    pub fn retries(self, retries: usize) -> Self {
        Self { retries, ..self }
    }

    /// Looks up a catalog entry by name or numeric id.
    ///
    /// Blank input fails with [`Error::InvalidInput`] without touching the
    /// network.
    pub async fn lookup(&self, query: &str) -> Result<Pokemon, Error> {
        let query = Query::parse(query).ok_or(Error::InvalidInput)?;

        self.fetch(&query).await
    }

    pub async fn fetch(&self, query: &Query) -> Result<Pokemon, Error> {
        let url = self.url(query);

        log::info!("Looking up: {url}");
        let response = retry(self.retries, || self.client.get(url.clone()).send()).await?;

        let not_found = || Error::NotFound {
            query: query.to_string(),
        };

        if !response.status().is_success() {
            log::warn!("Lookup of {query} failed with {}", response.status());

            return Err(not_found());
        }

        let body = response.bytes().await?;

        let pokemon = api::Pokemon::parse(&body).map_err(|error| {
            log::warn!("Malformed catalog entry for {query}: {error}");

            not_found()
        })?;

        Ok(pokemon.into())
    }

    pub async fn download(&self, url: &str) -> Result<Bytes, Error> {
        log::info!("Downloading sprite: {url}");
        let response = retry(self.retries, || self.client.get(url).send()).await?;

        Ok(response.error_for_status()?.bytes().await?)
    }

    fn url(&self, query: &Query) -> reqwest::Url {
        let mut url = self.base.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            let _ = segments.pop_if_empty().push(query.as_str());
        }

        url
    }
}

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Build reqwest client")
});

async fn retry<T, E, F>(mut retries: usize, f: impl Fn() -> F) -> Result<T, E>
where
    E: fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    loop {
        match f().await {
            Ok(response) => break Ok(response),
            Err(error) => {
                if retries > 0 {
                    log::warn!(
                        "{error} ({retries} {} left)",
                        if retries == 1 { "retry" } else { "retries" }
                    );
                    retries -= 1;
                } else {
                    break Err(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_appends_encoded_query() {
        let session = Session::new(DEFAULT_URL).expect("valid url");

        let url = session.url(&Query::parse("Pikachu").expect("non-empty"));
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/pikachu");

        let url = session.url(&Query::parse("mr mime/x").expect("non-empty"));
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/mr%20mime%2Fx");
    }

    #[test]
    fn url_without_trailing_slash() {
        let session = Session::new("http://localhost:8080/pokemon").expect("valid url");

        let url = session.url(&Query::parse("25").expect("non-empty"));
        assert_eq!(url.as_str(), "http://localhost:8080/pokemon/25");
    }

    #[test]
    fn rejects_invalid_base() {
        assert!(matches!(Session::new("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(
            Session::new("mailto:ash@example.com"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn blank_lookup_never_hits_the_network() {
        // Nothing listens on port 9; any request would fail as RequestFailed
        let session = Session::new("http://127.0.0.1:9/").expect("valid url").retries(0);

        assert!(matches!(session.lookup("").await, Err(Error::InvalidInput)));
        assert!(matches!(session.lookup("   ").await, Err(Error::InvalidInput)));
    }
}
