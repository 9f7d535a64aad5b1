use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::models::{GwLedgerRow, ReconciledRow, ReconciledTable};

/// `<output_dir>/<company>_gl_data.csv`
pub fn export_path(output_dir: &Path, company: &str) -> PathBuf {
    output_dir.join(format!("{company}_gl_data.csv"))
}

fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Serialize)]
struct LedgerRecord<'a> {
    #[serde(rename = "ID")]
    id: usize,
    #[serde(rename = "TRNTYPE")]
    trn_type: &'a str,
    #[serde(rename = "TRNNO")]
    trn_no: &'a str,
    #[serde(rename = "TRNDATE")]
    trn_date: String,
    #[serde(rename = "ACCTNO")]
    acct_no: &'a str,
    #[serde(rename = "ACCTNAME")]
    acct_name: Option<&'a str>,
    #[serde(rename = "SUBACCT")]
    sub_acct: &'a str,
    #[serde(rename = "SUBNAME")]
    sub_name: Option<&'a str>,
    #[serde(rename = "DEPT_NO")]
    dept_no: Option<&'a str>,
    #[serde(rename = "DEPT_NAME")]
    dept_name: Option<&'a str>,
    #[serde(rename = "DR_AMT")]
    dr_amt: f64,
    #[serde(rename = "CR_AMT")]
    cr_amt: f64,
    #[serde(rename = "NAME")]
    name: Option<&'a str>,
    #[serde(rename = "ATCI")]
    atci: Option<&'a str>,
    #[serde(rename = "ATCC")]
    atcc: Option<&'a str>,
    #[serde(rename = "DE")]
    de: Option<&'a str>,
    #[serde(rename = "DSN")]
    dsn: Option<&'a str>,
    #[serde(rename = "PayType")]
    pay_type: Option<&'a str>,
    #[serde(rename = "TRNTYPE_TRM")]
    trn_type_trm: Option<&'a str>,
    #[serde(rename = "REMARK")]
    remark: Option<&'a str>,
    #[serde(rename = "OTHER_01")]
    other_01: Option<&'a str>,
    #[serde(rename = "OTHER_02")]
    other_02: Option<&'a str>,
    #[serde(rename = "OTHER_03")]
    other_03: Option<&'a str>,
    #[serde(rename = "NAME_TRM")]
    name_trm: Option<&'a str>,
    #[serde(rename = "PAYEE")]
    payee: Option<&'a str>,
    #[serde(rename = "YEAR")]
    year: i32,
    #[serde(rename = "MONTH")]
    month: u32,
    #[serde(rename = "NET_AMT")]
    net_amt: f64,
    #[serde(rename = "CASH_TRN_REF")]
    cash_trn_ref: Option<&'a str>,
    #[serde(rename = "ID_CHK")]
    id_chk: Option<usize>,
    #[serde(rename = "TRNTYPE_CHK")]
    trn_type_chk: Option<&'a str>,
    #[serde(rename = "TRNNO_CHK")]
    trn_no_chk: Option<&'a str>,
    #[serde(rename = "PAYEE_CHK")]
    payee_chk: Option<&'a str>,
    #[serde(rename = "ACCTNO_CHK")]
    acct_no_chk: Option<&'a str>,
    #[serde(rename = "CHEQUENO")]
    cheque_no: Option<&'a str>,
    #[serde(rename = "CHEQUEDATE")]
    cheque_date: Option<String>,
    #[serde(rename = "AMOUNT")]
    amount: f64,
    #[serde(rename = "Duplicate Entry?")]
    duplicate_entry: &'static str,
    #[serde(rename = "Duplicate Cheque Entry?")]
    duplicate_cheque_entry: &'static str,
    #[serde(rename = "CR_AMT_2")]
    cr_amt_2: f64,
    #[serde(rename = "TRANSACTION REFERENCE")]
    transaction_reference: &'a str,
}

impl<'a> From<&'a ReconciledRow> for LedgerRecord<'a> {
    fn from(row: &'a ReconciledRow) -> Self {
        let txn = &row.ledger.txn;
        let memo = row.ledger.memo.as_ref();
        let cheque = row.cheque.as_ref();
        Self {
            id: row.ledger.id,
            trn_type: &txn.trn_type,
            trn_no: &txn.trn_no,
            trn_date: day(txn.trn_date),
            acct_no: &txn.acct_no,
            acct_name: txn.acct_name.as_deref(),
            sub_acct: &txn.sub_acct,
            sub_name: txn.sub_name.as_deref(),
            dept_no: txn.dept_no.as_deref(),
            dept_name: txn.dept_name.as_deref(),
            dr_amt: txn.dr_amt,
            cr_amt: txn.cr_amt,
            name: txn.name.as_deref(),
            atci: txn.atci.as_deref(),
            atcc: txn.atcc.as_deref(),
            de: txn.de.as_deref(),
            dsn: txn.dsn.as_deref(),
            pay_type: txn.pay_type.as_deref(),
            trn_type_trm: memo.map(|m| m.trn_type.as_str()),
            remark: memo.and_then(|m| m.remark.as_deref()),
            other_01: memo.and_then(|m| m.other_01.as_deref()),
            other_02: memo.and_then(|m| m.other_02.as_deref()),
            other_03: memo.and_then(|m| m.other_03.as_deref()),
            name_trm: memo.and_then(|m| m.name.as_deref()),
            payee: row.payee.as_deref(),
            year: row.ledger.year,
            month: row.ledger.month,
            net_amt: row.net_amount_corrected,
            cash_trn_ref: row.ledger.cash_transaction_key.as_deref(),
            id_chk: cheque.map(|c| c.id_chk),
            trn_type_chk: cheque.map(|c| c.cheque.trn_type.as_str()),
            trn_no_chk: cheque.map(|c| c.cheque.trn_no.as_str()),
            payee_chk: cheque.and_then(|c| c.cheque.payee.as_deref()),
            acct_no_chk: cheque.map(|c| c.cheque.acct_no.as_str()),
            cheque_no: cheque.and_then(|c| c.cheque.cheque_no.as_deref()),
            cheque_date: cheque.and_then(|c| c.cheque.cheque_date).map(day),
            amount: row.amount,
            duplicate_entry: flag(row.is_duplicate_ledger),
            duplicate_cheque_entry: flag(row.is_duplicate_cheque),
            cr_amt_2: row.credit_amount_resolved,
            transaction_reference: &row.transaction_reference,
        }
    }
}

#[derive(Serialize)]
struct GwRecord<'a> {
    trndate: String,
    trnno: Option<&'a str>,
    subacct: &'a str,
    payee: Option<&'a str>,
    dr_amt: f64,
    cr_amt: f64,
    #[serde(rename = "net_")]
    net: f64,
}

impl<'a> From<&'a GwLedgerRow> for GwRecord<'a> {
    fn from(row: &'a GwLedgerRow) -> Self {
        Self {
            trndate: day(row.trndate),
            trnno: row.trnno.as_deref(),
            subacct: &row.subacct,
            payee: row.payee.as_deref(),
            dr_amt: row.dr_amt,
            cr_amt: row.cr_amt,
            net: row.net,
        }
    }
}

const LEDGER_HEADERS: &[&str] = &[
    "ID", "TRNTYPE", "TRNNO", "TRNDATE", "ACCTNO", "ACCTNAME", "SUBACCT", "SUBNAME", "DEPT_NO",
    "DEPT_NAME", "DR_AMT", "CR_AMT", "NAME", "ATCI", "ATCC", "DE", "DSN", "PayType",
    "TRNTYPE_TRM", "REMARK", "OTHER_01", "OTHER_02", "OTHER_03", "NAME_TRM", "PAYEE", "YEAR",
    "MONTH", "NET_AMT", "CASH_TRN_REF", "ID_CHK", "TRNTYPE_CHK", "TRNNO_CHK", "PAYEE_CHK",
    "ACCTNO_CHK", "CHEQUENO", "CHEQUEDATE", "AMOUNT", "Duplicate Entry?",
    "Duplicate Cheque Entry?", "CR_AMT_2", "TRANSACTION REFERENCE",
];

const GW_HEADERS: &[&str] = &["trndate", "trnno", "subacct", "payee", "dr_amt", "cr_amt", "net_"];

/// Serialize the table as CSV. The header row is written even when empty.
pub fn write_csv<W: Write>(table: &ReconciledTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    match table {
        ReconciledTable::Ledger(rows) => {
            wtr.write_record(LEDGER_HEADERS)?;
            for row in rows {
                wtr.serialize(LedgerRecord::from(row))?;
            }
        }
        ReconciledTable::Gw(rows) => {
            wtr.write_record(GW_HEADERS)?;
            for row in rows {
                wtr.serialize(GwRecord::from(row))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write to a temporary sibling and rename, so a failed run leaves no file.
pub fn write_table(table: &ReconciledTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("csv.tmp");
    log::info!("Writing {}...", path.display());
    let result = std::fs::File::create(&tmp)
        .map_err(Into::into)
        .and_then(|file| write_csv(table, std::io::BufWriter::new(file)))
        .and_then(|()| std::fs::rename(&tmp, path).map_err(Into::into));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    log::info!("Writing {}...done", path.display());
    Ok(())
}
