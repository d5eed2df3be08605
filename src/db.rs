pub mod archive;
pub mod records;
pub mod summaries;

use mongodb::{Client, Database};

use crate::{
    db::{archive::Archive, records::Records, summaries::Summaries},
    prelude::*,
};

/// Connection to the backing time-series store.
#[must_use]
#[derive(Clone)]
pub struct Db {
    inner: Database,
}

impl Db {
    /// Connect to the store with the specified URI.
    ///
    /// The URI *must* specify the database name.
    #[instrument(skip_all)]
    pub async fn with_uri(uri: impl AsRef<str>) -> Result<Self> {
        let inner = Client::with_uri_str(uri)
            .await?
            .default_database()
            .context("MongoDB URI does not define the default database")?;
        Ok(Self { inner })
    }

    /// Compacted meter readings, the core's read path.
    pub fn records(&self) -> Records {
        Records::new(&self.inner)
    }

    /// Daily day/night rollups written by the upstream summarizer.
    pub fn summaries(&self) -> Summaries {
        Summaries::new(&self.inner)
    }

    /// Compressed named payloads; write-only from here.
    pub fn archive(&self) -> Archive {
        Archive::new(&self.inner)
    }
}
