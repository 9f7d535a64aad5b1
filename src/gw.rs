use chrono::Datelike;

use crate::error::Result;
use crate::loader::RowReader;
use crate::models::{DateWindow, GwLedgerRow, CASH_ACCOUNT};
use crate::source::RecordSource;

pub const GW_TABLE: &str = "GW";

pub const GW_COLUMNS: &[&str] = &["trndate", "trnno", "subacct", "payee", "dr_amt", "cr_amt", "net_"];

/// Cash-account postings of the pre-joined GW ledger inside `window`,
/// in source order.
pub fn bank_recon_ledger(source: &dyn RecordSource, window: &DateWindow) -> Result<Vec<GwLedgerRow>> {
    let table = source.load_table(GW_TABLE)?;
    let cols = table.columns(GW_COLUMNS)?;

    log::info!("Filtering {GW_TABLE} to {}..{}...", window.start, window.end);
    let mut rows = Vec::new();
    for row_no in 0..table.rows.len() {
        let r = RowReader::new(&table, GW_COLUMNS, &cols, row_no);
        let Some(trndate) = r.optional_date(0)? else {
            continue;
        };
        let subacct = r.code(2);
        // Always true for a real date; kept as an explicit guard.
        let month_ok = trndate.month() <= 12;
        if !(month_ok && subacct == CASH_ACCOUNT && window.contains(trndate)) {
            continue;
        }
        rows.push(GwLedgerRow {
            trndate,
            trnno: r.text(1),
            subacct,
            payee: r.text(3),
            dr_amt: r.amount(4)?,
            cr_amt: r.amount(5)?,
            net: r.amount(6)?,
        });
    }
    log::info!("Filtering {GW_TABLE} to {}..{}...done", window.start, window.end);
    log::debug!("{GW_TABLE}: {} of {} rows kept", rows.len(), table.rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::error::ReconError;
    use crate::models::ReconciledTable;
    use crate::reconciler::reconcile;
    use crate::source::MemorySource;
    use crate::table::RawTable;

    fn january() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        )
    }

    fn gw_source() -> MemorySource {
        let table = RawTable::new(
            GW_TABLE,
            &["trndate", "trnno", "acctno", "subacct", "payee", "dr_amt", "cr_amt", "net_"],
        )
        .with_row(&["2023-01-10", "G1", "1001", "1001", "Acme", "0", "100", "-100"])
        .with_row(&["2023-01-11", "G2", "1001", "2002", "Acme", "0", "100", "-100"])
        .with_row(&["2023-02-01", "G3", "1001", "1001", "Acme", "0", "5", "-5"])
        .with_row(&["2023-01-31", "G4", "1001", "1001", "", "20", "0", "20"]);
        MemorySource::new().with_table(table)
    }

    #[test]
    fn test_keeps_cash_subaccount_in_window() {
        let rows = bank_recon_ledger(&gw_source(), &january()).unwrap();
        let numbers: Vec<_> = rows.iter().map(|r| r.trnno.as_deref().unwrap()).collect();
        assert_eq!(numbers, vec!["G1", "G4"]);
        assert_eq!(rows[0].net, -100.0);
        assert_eq!(rows[1].payee, None);
    }

    #[test]
    fn test_other_subaccount_excluded() {
        let rows = bank_recon_ledger(&gw_source(), &january()).unwrap();
        assert!(rows.iter().all(|r| r.subacct == CASH_ACCOUNT));
        assert!(!rows.iter().any(|r| r.trnno.as_deref() == Some("G2")));
    }

    #[test]
    fn test_reconcile_routes_gw_company() {
        match reconcile("GW", &january(), &gw_source()).unwrap() {
            ReconciledTable::Gw(rows) => assert_eq!(rows.len(), 2),
            ReconciledTable::Ledger(_) => panic!("GW must not use the three-table join"),
        }
    }

    #[test]
    fn test_blank_trndate_is_skipped() {
        let source = MemorySource::new().with_table(
            RawTable::new(GW_TABLE, GW_COLUMNS)
                .with_row(&["", "G0", "1001", "Acme", "0", "1", "-1"])
                .with_row(&["2023-01-10", "G1", "1001", "Acme", "0", "100", "-100"]),
        );
        let rows = bank_recon_ledger(&source, &january()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trnno.as_deref(), Some("G1"));
    }

    #[test]
    fn test_unparseable_trndate_is_an_error() {
        let source = MemorySource::new().with_table(
            RawTable::new(GW_TABLE, GW_COLUMNS).with_row(&["someday", "G0", "1001", "", "0", "1", "-1"]),
        );
        assert!(matches!(
            bank_recon_ledger(&source, &january()),
            Err(ReconError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_gw_table() {
        let source = MemorySource::new();
        assert!(matches!(
            bank_recon_ledger(&source, &january()),
            Err(ReconError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_missing_gw_column() {
        let source = MemorySource::new().with_table(RawTable::new(GW_TABLE, &["trndate", "trnno"]));
        assert!(matches!(
            bank_recon_ledger(&source, &january()),
            Err(ReconError::SchemaMismatch { .. })
        ));
    }
}
