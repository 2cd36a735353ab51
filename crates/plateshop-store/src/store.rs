//! The CSV-backed record store.
//!
//! Every operation parses the whole file. Mutations rebuild the full table in
//! memory and replace the file by writing a sibling temp file and renaming it
//! over the original. A store-wide mutex serializes read-modify-write cycles
//! so concurrent writers cannot lose each other's updates.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::record::{FieldMap, Record};
use crate::schema::{Schema, sanitize_key};

/// Rows written to a freshly created store.
const SEED_ROWS: [[&str; 5]; 3] = [
    [
        "HR01AB1234",
        "Premium VIP number for cars",
        "₹50000",
        "In Stock",
        "https://placehold.co/300x200/ff0000/ffffff?text=HR1234",
    ],
    [
        "DL0CBA5678",
        "Fancy bike number, unique series",
        "₹25000",
        "In Stock",
        "https://placehold.co/300x200/00ff00/000000?text=DL5678",
    ],
    [
        "CH01XYZ9999",
        "Exclusive Chandigarh series",
        "₹75000",
        "Sold Out",
        "https://placehold.co/300x200/0000ff/ffffff?text=CH9999",
    ],
];

type Row = Vec<String>;

/// Product collection persisted as one CSV file.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Open the store at `path`, creating it with seed records if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        store.seed_if_missing()?;
        Ok(store)
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record, keyed by sanitized column name, in file order.
    pub fn list_all(&self) -> Result<Vec<Record>> {
        let (schema, rows) = self.read_table()?;
        Ok(rows
            .iter()
            .map(|row| Record::from_row(&schema, row.iter().map(String::as_str)))
            .collect())
    }

    /// Number of records currently in the file.
    pub fn count(&self) -> Result<usize> {
        Ok(self.read_table()?.1.len())
    }

    /// Append a record and rewrite the file.
    ///
    /// Each column is filled from `fields` by sanitized-key lookup; missing
    /// fields become empty strings. A file without a header row gets the
    /// declared [`FIELDS`](crate::FIELDS) schema.
    pub fn append(&self, fields: &FieldMap) -> Result<Record> {
        let _guard = self.lock();
        let (schema, mut rows) = self.read_table()?;
        let schema = if schema.is_empty() {
            Schema::declared()
        } else {
            schema
        };

        let incoming: FieldMap = fields
            .iter()
            .map(|(k, v)| (sanitize_key(k), v.clone()))
            .collect();
        for key in incoming.keys() {
            if schema.position(key).is_none() {
                log::warn!("Field '{key}' not found in product columns, ignoring");
            }
        }

        let row: Row = schema
            .keys()
            .map(|key| incoming.get(&key).cloned().unwrap_or_default())
            .collect();
        let record = Record::from_row(&schema, row.iter().map(String::as_str));
        rows.push(row);

        self.write_table(&schema, &rows)?;
        log::info!("Appended product at row {}", rows.len() - 1);
        Ok(record)
    }

    /// Overwrite the matching cells of the record at `index`.
    ///
    /// Field names are matched against columns by sanitized comparison and
    /// unmatched names are ignored. Fails with [`Error::NotFound`] without
    /// touching the file when `index` is outside `[0, len)`.
    pub fn update_at(&self, index: i64, fields: &FieldMap) -> Result<Record> {
        let _guard = self.lock();
        let (schema, mut rows) = self.read_table()?;
        let len = rows.len();
        let row = usize::try_from(index)
            .ok()
            .and_then(|i| rows.get_mut(i))
            .ok_or(Error::NotFound { index, len })?;

        for (key, value) in fields {
            match schema.position(key) {
                Some(col) => row[col] = value.clone(),
                None => log::warn!("Field '{key}' not found in product columns, ignoring"),
            }
        }
        let record = Record::from_row(&schema, row.iter().map(String::as_str));

        self.write_table(&schema, &rows)?;
        log::info!("Updated product at row {index}");
        Ok(record)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn seed_if_missing(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let rows: Vec<Row> = SEED_ROWS
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        self.write_table(&Schema::declared(), &rows)?;
        log::info!("Created default product file at {}", self.path.display());
        Ok(())
    }

    fn read_table(&self) -> Result<(Schema, Vec<Row>)> {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| Error::parse(&self.path, e))?;
        let schema = Schema::from_headers(headers.iter());

        let mut rows: Vec<Row> = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| Error::parse(&self.path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok((schema, rows))
    }

    fn write_table(&self, schema: &Schema, rows: &[Row]) -> Result<()> {
        let bytes = serialize(schema, rows).map_err(|e| Error::parse(&self.path, e))?;

        let tmp_path = self.path.with_extension("csv.tmp");
        fs::write(&tmp_path, bytes).map_err(|e| Error::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(Error::io(&self.path, e));
        }
        Ok(())
    }
}

fn serialize(schema: &Schema, rows: &[Row]) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(schema.columns())?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
