use crate::dimension::{self, BoundarySpec};
use crate::domain::model::{MetObject, StoredObject};
use crate::domain::ports::{ObjectStore, Storage};
use crate::utils::error::{EtlError, Result};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

pub const TABLE_FILE: &str = "met_objects.csv";

const COLUMNS: [&str; 6] = ["id", "dim", "height", "width", "depth", "weight"];

#[derive(Debug, Default)]
struct Table {
    rows: Vec<StoredObject>,
    by_id: HashMap<u64, usize>,
}

impl Table {
    fn from_rows(rows: Vec<StoredObject>) -> Result<Self> {
        let mut table = Table::default();
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    fn push(&mut self, row: StoredObject) -> Result<()> {
        if self.by_id.contains_key(&row.id) {
            return Err(duplicate_id(row.id));
        }
        self.by_id.insert(row.id, self.rows.len());
        self.rows.push(row);
        Ok(())
    }

    /// Rejects the batch if any id is already stored or repeats within it.
    fn check_new_ids(&self, rows: &[StoredObject]) -> Result<()> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in rows {
            if self.by_id.contains_key(&row.id) || !seen.insert(row.id) {
                return Err(duplicate_id(row.id));
            }
        }
        Ok(())
    }
}

fn duplicate_id(id: u64) -> EtlError {
    EtlError::StoreError {
        message: format!("duplicate object id {}", id),
    }
}

/// The `met_objects` table kept in memory and persisted as one CSV file
/// through a [`Storage`]. `init` rewrites the file, inserts append to it.
pub struct CsvObjectStore<S: Storage> {
    storage: S,
    table: RwLock<Table>,
}

impl<S: Storage> CsvObjectStore<S> {
    /// Empty store; nothing is written until [`ObjectStore::init`] or an insert.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            table: RwLock::new(Table::default()),
        }
    }

    /// Load the table written by a previous import.
    pub async fn open(storage: S) -> Result<Self> {
        if !storage.exists(TABLE_FILE).await {
            return Err(EtlError::StoreError {
                message: format!("{} not found, run an import first", TABLE_FILE),
            });
        }

        let data = storage.read_file(TABLE_FILE).await?;
        let rows = decode_rows(&data)?;
        tracing::debug!("Loaded {} stored objects", rows.len());

        Ok(Self {
            storage,
            table: RwLock::new(Table::from_rows(rows)?),
        })
    }

    async fn write_header(&self) -> Result<()> {
        let data = encode_rows(&[], true)?;
        self.storage.write_file(TABLE_FILE, &data).await
    }
}

fn decode_rows(data: &[u8]) -> Result<Vec<StoredObject>> {
    let mut reader = csv::Reader::from_reader(data);
    let rows = reader
        .deserialize::<StoredObject>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn encode_rows(rows: &[StoredObject], with_header: bool) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    if with_header {
        writer.write_record(COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| EtlError::StoreError {
        message: format!("failed to flush table: {}", e),
    })
}

impl<S: Storage> ObjectStore for CsvObjectStore<S> {
    async fn init(&self) -> Result<()> {
        let mut table = self.table.write().await;
        self.write_header().await?;
        *table = Table::default();
        tracing::debug!("Initialized empty {}", TABLE_FILE);
        Ok(())
    }

    async fn batch_insert(&self, objects: &[MetObject]) -> Result<usize> {
        tracing::info!("Insert data batch ... size={}", objects.len());

        let rows: Vec<StoredObject> = objects
            .iter()
            .filter_map(|object| {
                let row = StoredObject::from_object(object);
                if row.is_none() {
                    tracing::warn!("Object {} has no parsed dimension, not stored", object.id);
                }
                row
            })
            .collect();

        let mut table = self.table.write().await;
        table.check_new_ids(&rows)?;

        // disk first, so a failed write leaves the in-memory table untouched
        let with_header = !self.storage.exists(TABLE_FILE).await;
        let data = encode_rows(&rows, with_header)?;
        self.storage.append_file(TABLE_FILE, &data).await?;

        let inserted = rows.len();
        for row in rows {
            table.push(row)?;
        }
        Ok(inserted)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<StoredObject>> {
        let table = self.table.read().await;
        Ok(table.by_id.get(&id).map(|&i| table.rows[i].clone()))
    }

    async fn list_fitting(&self, boundary: &BoundarySpec, limit: usize) -> Result<Vec<StoredObject>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|row| dimension::fits(&row.measurement(), boundary))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.read().await.rows.len())
    }
}
