// Seeding a store from an external list of users

use crate::jsonl;
use crate::notify::Notifier;
use crate::record::{Record, RecordKind};
use crate::store::Store;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const DEFAULT_SEED_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Generic user as returned by the seed source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedUser {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeedUser {
    pub fn new(id: u64, name: &str, username: &str, email: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            completed: false,
            extra: Map::new(),
        }
    }

    fn into_record<K: RecordKind>(self, category: &str) -> Record<K> {
        let mut record = Record::new(self.id, self.name, self.username, self.email, self.completed, category);
        record.extra = self.extra;
        record
    }
}

/// Where seed users come from
pub trait SeedSource {
    /// Human-readable origin, for logs
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Vec<SeedUser>>;
}

/// One blocking GET returning a JSON array
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSeedSource {
    /// The request waits for as long as the source takes; no timeout is set
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, url: url.into() })
    }
}

impl SeedSource for HttpSeedSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<SeedUser>> {
        debug!(url = %self.url, "Fetching seed users");
        let users = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("Request to {} failed", self.url))?
            .error_for_status()
            .with_context(|| format!("Seed source {} returned an error status", self.url))?
            .json::<Vec<SeedUser>>()
            .context("Failed to decode seed users")?;
        Ok(users)
    }
}

/// Seed users read from a local JSONL file
#[derive(Debug, Clone)]
pub struct JsonlSeedSource {
    path: PathBuf,
}

impl JsonlSeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for JsonlSeedSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<SeedUser>> {
        jsonl::read_jsonl(&self.path)
    }
}

/// Fixed in-memory list of seed users
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource(pub Vec<SeedUser>);

impl SeedSource for StaticSeedSource {
    fn describe(&self) -> String {
        format!("{} static users", self.0.len())
    }

    fn fetch(&self) -> Result<Vec<SeedUser>> {
        Ok(self.0.clone())
    }
}

/// Category given to the seed user at 0-based `position`
pub fn derive_category<K: RecordKind>(position: usize) -> &'static str {
    K::CATEGORY_VALUES[position % K::CATEGORY_VALUES.len()]
}

/// Turn fetched users into records, assigning categories by position
pub fn to_records<K: RecordKind>(users: Vec<SeedUser>) -> Vec<Record<K>> {
    users
        .into_iter()
        .enumerate()
        .map(|(i, user)| user.into_record(derive_category::<K>(i)))
        .collect()
}

/// Replace `store` with records fetched from `source`.
///
/// On failure the store is left untouched; either way the outcome is
/// reported to `notifier`. Returns the number of records loaded.
pub fn load<K: RecordKind>(store: &mut Store<K>, source: &dyn SeedSource, notifier: &dyn Notifier) -> Result<usize> {
    match source.fetch() {
        Ok(users) => {
            let records = to_records::<K>(users);
            let count = records.len();
            store.set_all(records);
            info!(collection = K::COLLECTION, source = %source.describe(), count, "Seeded store");
            notifier.success(&format!("{}s loaded successfully", K::DISPLAY_NAME));
            Ok(count)
        }
        Err(e) => {
            warn!(collection = K::COLLECTION, source = %source.describe(), error = ?e, "Seeding failed");
            notifier.error(&format!("Failed to load {}s", K::DISPLAY_NAME.to_lowercase()));
            Err(e.wrap_err(format!("Failed to seed {}", K::COLLECTION)))
        }
    }
}
