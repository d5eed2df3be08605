use std::io::Write;

use bson::{Binary, doc, spec::BinarySubtype};
use flate2::{Compression, write::GzEncoder};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// A named compressed payload, e.g. an exported CSV kept for later download.
#[derive(Serialize, Deserialize)]
struct Entry {
    #[serde(rename = "_id")]
    name: String,

    payload: Binary,
}

/// Write side of the archive collection; not on the core's read path.
#[must_use]
pub struct Archive(Collection<Entry>);

impl Archive {
    const COLLECTION_NAME: &'static str = "archive";

    pub(super) fn new(database: &Database) -> Self {
        Self(database.collection(Self::COLLECTION_NAME))
    }

    /// Gzip the contents and upsert them under `<name>.gz`.
    #[instrument(skip_all, fields(name = name, size = contents.len()))]
    pub async fn put(&self, name: &str, contents: &[u8]) -> Result {
        info!("archiving…");
        let entry = Entry {
            name: format!("{name}.gz"),
            payload: Binary { subtype: BinarySubtype::Generic, bytes: gzip(contents)? },
        };
        self.0
            .replace_one(doc! { "_id": &entry.name }, &entry)
            .upsert(true)
            .await
            .context("failed to archive the payload")?;
        Ok(())
    }
}

fn gzip(contents: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(contents).context("failed to compress the payload")?;
    encoder.finish().context("failed to compress the payload")
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::GzDecoder;

    use super::*;

    #[test]
    fn gzip_round_trips() -> Result {
        let payload = b"Timestamp,Watts\n995,50\n";
        let compressed = gzip(payload)?;
        let mut decompressed = Vec::new();
        GzDecoder::new(compressed.as_slice()).read_to_end(&mut decompressed)?;
        assert_eq!(decompressed, payload);
        Ok(())
    }
}
