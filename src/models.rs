use chrono::NaiveDate;

/// Account code of the cash account; only cash postings correlate to cheques.
pub const CASH_ACCOUNT: &str = "1001";

/// Transaction type whose reference comes from the memo instead of the cheque.
/// The code is opaque; its meaning is not documented by the ledger system.
pub const MEMO_REFERENCE_TYPE: &str = "03";

/// Company whose store holds a single pre-joined ledger table.
pub const GW_COMPANY: &str = "GW";

/// Inclusive date range of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One ledger posting (TRN).
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTxn {
    pub trn_type: String,
    pub trn_no: String,
    pub trn_date: NaiveDate,
    pub acct_no: String,
    pub acct_name: Option<String>,
    pub sub_acct: String,
    pub sub_name: Option<String>,
    pub dept_no: Option<String>,
    pub dept_name: Option<String>,
    pub dr_amt: f64,
    pub cr_amt: f64,
    pub name: Option<String>,
    pub atci: Option<String>,
    pub atcc: Option<String>,
    pub de: Option<String>,
    pub dsn: Option<String>,
    pub pay_type: Option<String>,
}

/// Memo attached to a transaction (TRM).
#[derive(Debug, Clone, PartialEq)]
pub struct TxnMemo {
    pub trn_type: String,
    pub trn_no: String,
    pub trn_date: NaiveDate,
    pub remark: Option<String>,
    pub other_01: Option<String>,
    pub other_02: Option<String>,
    pub other_03: Option<String>,
    pub name: Option<String>,
}

/// A cheque payment (TRN_CHEQUE).
#[derive(Debug, Clone, PartialEq)]
pub struct ChequeRecord {
    /// Row position in the raw TRN_CHEQUE table, before filtering.
    pub source_row: usize,
    pub trn_type: String,
    pub trn_no: String,
    pub trn_date: NaiveDate,
    pub payee: Option<String>,
    pub acct_no: String,
    pub cheque_no: Option<String>,
    pub cheque_date: Option<NaiveDate>,
    pub amount: f64,
}

/// Rows the loader filters and sorts by (date, transaction number).
pub trait Dated {
    fn date(&self) -> NaiveDate;
    fn trn_no(&self) -> &str;
}

impl Dated for LedgerTxn {
    fn date(&self) -> NaiveDate {
        self.trn_date
    }
    fn trn_no(&self) -> &str {
        &self.trn_no
    }
}

impl Dated for TxnMemo {
    fn date(&self) -> NaiveDate {
        self.trn_date
    }
    fn trn_no(&self) -> &str {
        &self.trn_no
    }
}

impl Dated for ChequeRecord {
    fn date(&self) -> NaiveDate {
        self.trn_date
    }
    fn trn_no(&self) -> &str {
        &self.trn_no
    }
}

/// Ledger posting with its memo and the fields derived from both.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedLedgerRow {
    /// Ordinal in the memo join result; identity for duplicate detection.
    pub id: usize,
    pub txn: LedgerTxn,
    pub memo: Option<TxnMemo>,
    pub payee: Option<String>,
    pub year: i32,
    pub month: u32,
    /// Debit minus credit before any duplicate correction.
    pub net_amount: f64,
    pub cash_transaction_key: Option<String>,
}

/// Cheque with its correlation key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedCheque {
    pub id_chk: usize,
    pub cheque: ChequeRecord,
    pub cash_transaction_key: String,
}

/// Output of the cheque join, before duplicate resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedRow {
    pub ledger: JoinedLedgerRow,
    pub cheque: Option<KeyedCheque>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledRow {
    /// Ledger side with debit/credit zeroed when the row is a duplicate.
    pub ledger: JoinedLedgerRow,
    pub cheque: Option<KeyedCheque>,
    /// Cheque amount, zero when absent or a duplicate cheque.
    pub amount: f64,
    pub is_duplicate_ledger: bool,
    pub is_duplicate_cheque: bool,
    pub credit_amount_resolved: f64,
    pub net_amount_corrected: f64,
    pub transaction_reference: String,
    pub payee: Option<String>,
}

/// Projection of the pre-joined GW ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct GwLedgerRow {
    pub trndate: NaiveDate,
    pub trnno: Option<String>,
    pub subacct: String,
    pub payee: Option<String>,
    pub dr_amt: f64,
    pub cr_amt: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReconciledTable {
    Ledger(Vec<ReconciledRow>),
    Gw(Vec<GwLedgerRow>),
}

impl ReconciledTable {
    pub fn len(&self) -> usize {
        match self {
            Self::Ledger(rows) => rows.len(),
            Self::Gw(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
