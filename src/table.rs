use crate::error::{ReconError, Result};

/// A table as handed over by a record source: header names plus text cells.
/// An empty cell is null.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    #[allow(dead_code)]
    pub fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    #[allow(dead_code)]
    pub fn push_row(&mut self, cells: &[&str]) {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
    }

    #[allow(dead_code)]
    pub fn with_row(mut self, cells: &[&str]) -> Self {
        self.push_row(cells);
        self
    }

    pub fn column(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| ReconError::SchemaMismatch {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Resolve every required column up front, failing on the first missing one.
    pub fn columns(&self, names: &[&str]) -> Result<Vec<usize>> {
        names.iter().map(|name| self.column(name)).collect()
    }
}

/// Cell text, or `None` for an empty or missing (short row) cell.
pub fn cell(row: &[String], col: usize) -> Option<&str> {
    row.get(col).map(|c| c.trim()).filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lookup() {
        let table = RawTable::new("TRN", &["TRNNO", "TRNDATE"]);
        assert_eq!(table.column("TRNDATE").unwrap(), 1);
        assert_eq!(table.columns(&["TRNDATE", "TRNNO"]).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_missing_column_is_schema_mismatch() {
        let table = RawTable::new("TRM", &["TRNNO"]);
        match table.columns(&["TRNNO", "REMARK"]) {
            Err(ReconError::SchemaMismatch { table, column }) => {
                assert_eq!(table, "TRM");
                assert_eq!(column, "REMARK");
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_cell_nulls() {
        let row = vec!["T1".to_string(), "  ".to_string()];
        assert_eq!(cell(&row, 0), Some("T1"));
        assert_eq!(cell(&row, 1), None);
        assert_eq!(cell(&row, 5), None);
    }
}
