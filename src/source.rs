use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{ReconError, Result};
use crate::table::RawTable;

/// Supplies named tables to a reconciliation run.
pub trait RecordSource {
    fn load_table(&self, name: &str) -> Result<RawTable>;
}

/// A company store on disk: one `<NAME>.csv` per table.
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn table_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }
}

impl RecordSource for CsvDirSource {
    fn load_table(&self, name: &str) -> Result<RawTable> {
        let path = self.table_path(name);
        log::info!("Loading {name} from {}...", path.display());
        if !path.is_file() {
            return Err(ReconError::DataUnavailable(format!(
                "{name} not found at {}",
                path.display()
            )));
        }
        let file = std::fs::File::open(&path).map_err(|e| {
            ReconError::DataUnavailable(format!("{name} at {}: {e}", path.display()))
        })?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(std::io::BufReader::new(file));

        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        log::info!("Loading {name} from {}...done", path.display());
        log::debug!("{name}: {} rows", rows.len());

        Ok(RawTable {
            name: name.to_string(),
            headers,
            rows,
        })
    }
}

/// Tables held in memory, keyed by name.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: HashMap<String, RawTable>,
}

#[allow(dead_code)]
impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: RawTable) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }
}

impl RecordSource for MemorySource {
    fn load_table(&self, name: &str) -> Result<RawTable> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| ReconError::DataUnavailable(format!("{name} not in source")))
    }
}
