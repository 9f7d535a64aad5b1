use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ReconError, Result};
use crate::models::{ChequeRecord, DateWindow, Dated, LedgerTxn, TxnMemo};
use crate::source::RecordSource;
use crate::table::{cell, RawTable};

pub const TRN_TABLE: &str = "TRN";
pub const TRM_TABLE: &str = "TRM";
pub const TRN_CHEQUE_TABLE: &str = "TRN_CHEQUE";

const TRN_COLUMNS: &[&str] = &[
    "TRNTYPE", "TRNNO", "TRNDATE", "ACCTNO", "ACCTNAME", "SUBACCT", "SUBNAME", "DEPT_NO",
    "DEPT_NAME", "DR_AMT", "CR_AMT", "NAME", "ATCI", "ATCC", "DE", "DSN", "PayType",
];

const TRM_COLUMNS: &[&str] = &[
    "TRNTYPE", "TRNNO", "TRNDATE", "REMARK", "OTHER_01", "OTHER_02", "OTHER_03", "NAME",
];

const TRN_CHEQUE_COLUMNS: &[&str] = &[
    "TRNTYPE", "TRNNO", "TRNDATE", "PAYEE", "ACCTNO", "CHEQUENO", "CHEQUEDATE", "AMOUNT",
];

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Blank cells are zero. Accepts thousands separators and `(123.45)` negatives.
pub fn parse_amount(raw: Option<&str>) -> Option<f64> {
    let Some(raw) = raw else {
        return Some(0.0);
    };
    let s = raw.replace(',', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y/%m/%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Reads typed cells out of one row, reporting failures against the table.
pub(crate) struct RowReader<'a> {
    table: &'a RawTable,
    names: &'a [&'a str],
    cols: &'a [usize],
    row_no: usize,
    row: &'a [String],
}

impl<'a> RowReader<'a> {
    pub(crate) fn new(
        table: &'a RawTable,
        names: &'a [&'a str],
        cols: &'a [usize],
        row_no: usize,
    ) -> Self {
        Self {
            table,
            names,
            cols,
            row_no,
            row: &table.rows[row_no],
        }
    }

    pub(crate) fn text(&self, i: usize) -> Option<String> {
        cell(self.row, self.cols[i]).map(str::to_string)
    }

    pub(crate) fn code(&self, i: usize) -> String {
        self.text(i).unwrap_or_default()
    }

    pub(crate) fn amount(&self, i: usize) -> Result<f64> {
        let raw = cell(self.row, self.cols[i]);
        parse_amount(raw).ok_or_else(|| self.invalid(i, raw))
    }

    pub(crate) fn row_no(&self) -> usize {
        self.row_no
    }

    /// `None` for a blank cell; an unparseable one is an error.
    pub(crate) fn optional_date(&self, i: usize) -> Result<Option<NaiveDate>> {
        match cell(self.row, self.cols[i]) {
            None => Ok(None),
            Some(raw) => parse_date(raw)
                .map(Some)
                .ok_or_else(|| self.invalid(i, Some(raw))),
        }
    }

    fn invalid(&self, i: usize, raw: Option<&str>) -> ReconError {
        ReconError::InvalidValue {
            table: self.table.name.clone(),
            column: self.names[i].to_string(),
            row: self.row_no + 1,
            value: raw.unwrap_or("").to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Rows the builder skips (`Ok(None)`) are those without a date; they can
/// never fall inside a window.
fn project<T>(
    table: &RawTable,
    names: &[&str],
    build: impl Fn(&RowReader) -> Result<Option<T>>,
) -> Result<Vec<T>> {
    let cols = table.columns(names)?;
    let mut rows = Vec::with_capacity(table.rows.len());
    for row_no in 0..table.rows.len() {
        if let Some(row) = build(&RowReader::new(table, names, &cols, row_no))? {
            rows.push(row);
        }
    }
    let skipped = table.rows.len() - rows.len();
    if skipped > 0 {
        log::debug!("{}: skipped {skipped} rows without a date", table.name);
    }
    Ok(rows)
}

pub fn project_ledger(table: &RawTable) -> Result<Vec<LedgerTxn>> {
    project(table, TRN_COLUMNS, |r| {
        let Some(trn_date) = r.optional_date(2)? else {
            return Ok(None);
        };
        Ok(Some(LedgerTxn {
            trn_type: r.code(0),
            trn_no: r.code(1),
            trn_date,
            acct_no: r.code(3),
            acct_name: r.text(4),
            sub_acct: r.code(5),
            sub_name: r.text(6),
            dept_no: r.text(7),
            dept_name: r.text(8),
            dr_amt: r.amount(9)?,
            cr_amt: r.amount(10)?,
            name: r.text(11),
            atci: r.text(12),
            atcc: r.text(13),
            de: r.text(14),
            dsn: r.text(15),
            pay_type: r.text(16),
        }))
    })
}

pub fn project_memos(table: &RawTable) -> Result<Vec<TxnMemo>> {
    project(table, TRM_COLUMNS, |r| {
        let Some(trn_date) = r.optional_date(2)? else {
            return Ok(None);
        };
        Ok(Some(TxnMemo {
            trn_type: r.code(0),
            trn_no: r.code(1),
            trn_date,
            remark: r.text(3),
            other_01: r.text(4),
            other_02: r.text(5),
            other_03: r.text(6),
            name: r.text(7),
        }))
    })
}

pub fn project_cheques(table: &RawTable) -> Result<Vec<ChequeRecord>> {
    project(table, TRN_CHEQUE_COLUMNS, |r| {
        let Some(trn_date) = r.optional_date(2)? else {
            return Ok(None);
        };
        Ok(Some(ChequeRecord {
            source_row: r.row_no(),
            trn_type: r.code(0),
            trn_no: r.code(1),
            trn_date,
            payee: r.text(3),
            acct_no: r.code(4),
            cheque_no: r.text(5),
            cheque_date: r.optional_date(6)?,
            amount: r.amount(7)?,
        }))
    })
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Keep rows inside the window, ordered by (date, transaction number).
/// The sort is stable, so equal keys keep their source order.
pub fn filter_window<T: Dated>(rows: Vec<T>, window: &DateWindow) -> Vec<T> {
    let mut kept: Vec<T> = rows
        .into_iter()
        .filter(|row| window.contains(row.date()))
        .collect();
    kept.sort_by(|a, b| (a.date(), a.trn_no()).cmp(&(b.date(), b.trn_no())));
    kept
}

pub struct RecordSets {
    pub ledger: Vec<LedgerTxn>,
    pub memos: Vec<TxnMemo>,
    pub cheques: Vec<ChequeRecord>,
}

pub fn load_record_sets(source: &dyn RecordSource, window: &DateWindow) -> Result<RecordSets> {
    let trn = source.load_table(TRN_TABLE)?;
    let trm = source.load_table(TRM_TABLE)?;
    let cheque = source.load_table(TRN_CHEQUE_TABLE)?;

    log::info!("Filtering {} to {}..{}...", TRN_TABLE, window.start, window.end);
    let sets = RecordSets {
        ledger: filter_window(project_ledger(&trn)?, window),
        memos: filter_window(project_memos(&trm)?, window),
        cheques: filter_window(project_cheques(&cheque)?, window),
    };
    log::debug!(
        "In window: {} ledger, {} memo, {} cheque rows",
        sets.ledger.len(),
        sets.memos.len(),
        sets.cheques.len()
    );
    Ok(sets)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn trn_table() -> RawTable {
        RawTable::new(TRN_TABLE, TRN_COLUMNS)
    }

    pub fn trm_table() -> RawTable {
        RawTable::new(TRM_TABLE, TRM_COLUMNS)
    }

    pub fn cheque_table() -> RawTable {
        RawTable::new(TRN_CHEQUE_TABLE, TRN_CHEQUE_COLUMNS)
    }

    /// TRN row with only the fields the pipeline reads.
    pub fn trn_row(
        trn_type: &str,
        trn_no: &str,
        date: &str,
        acct: &str,
        sub: &str,
        dr: &str,
        cr: &str,
    ) -> Vec<String> {
        [
            trn_type, trn_no, date, acct, "Cash", sub, "", "", "", dr, cr, "", "", "", "", "", "",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect()
    }

    pub fn trm_row(trn_no: &str, date: &str, other_01: &str, other_03: &str, name: &str) -> Vec<String> {
        ["", trn_no, date, "", other_01, "", other_03, name]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    pub fn cheque_row(
        trn_no: &str,
        date: &str,
        payee: &str,
        acct: &str,
        cheque_no: &str,
        amount: &str,
    ) -> Vec<String> {
        ["", trn_no, date, payee, acct, cheque_no, "", amount]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }
}
