//! Static asset inventory keyed by the original host identifier.

use crate::errors::HostFlowError;
use crate::model::InventoryEntry;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const DELIMITER: u8 = b';';

/// One row of the inventory file. Legacy localized headers are accepted as aliases.
#[derive(Debug, Deserialize)]
struct InventoryRow {
    #[serde(alias = "Código")]
    code: String,
    #[serde(default, alias = "Local")]
    location: Option<String>,
    #[serde(default, alias = "Prédio")]
    building: Option<String>,
    #[serde(default, alias = "Andar")]
    floor: Option<String>,
    #[serde(default, alias = "Escritório")]
    office: Option<String>,
    #[serde(default, alias = "Obsoleto")]
    obsolete: Option<String>,
    #[serde(default, alias = "Anotação")]
    note: Option<String>,
}

impl From<InventoryRow> for InventoryEntry {
    fn from(row: InventoryRow) -> Self {
        let clean = |field: Option<String>| field.filter(|value| !value.trim().is_empty());
        Self {
            location: clean(row.location),
            building: clean(row.building),
            floor: clean(row.floor),
            office: clean(row.office),
            obsolete: clean(row.obsolete),
            note: clean(row.note),
        }
    }
}

/// In-memory inventory lookup
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: HashMap<String, InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `;`-delimited inventory with a header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, HostFlowError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if !headers.iter().any(|h| h == "code" || h == "Código") {
            return Err(HostFlowError::Inventory(
                "inventory header has no host code column".to_string(),
            ));
        }

        let mut inventory = Self::new();
        for row in csv_reader.deserialize::<InventoryRow>() {
            let row = row?;
            let code = row.code.trim().to_string();
            if code.is_empty() {
                continue;
            }
            inventory.insert(code, row.into());
        }
        Ok(inventory)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, HostFlowError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let inventory = Self::from_csv_reader(file)?;
        info!("Loaded {} inventory entries from {}", inventory.len(), path.display());
        Ok(inventory)
    }

    pub fn insert(&mut self, host: impl Into<String>, entry: InventoryEntry) {
        self.entries.insert(host.into(), entry);
    }

    /// Entry for `host`; a missing key yields an entry with every field not found
    pub fn lookup(&self, host: &str) -> InventoryEntry {
        match self.entries.get(host) {
            Some(entry) => entry.clone(),
            None => {
                debug!(host, "no inventory entry");
                InventoryEntry::not_found()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
