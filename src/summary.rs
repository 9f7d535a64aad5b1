use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::ReconciledTable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthTotals {
    pub year: i32,
    pub month: u32,
    pub rows: usize,
    pub debit: f64,
    pub credit: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub rows: usize,
    pub duplicate_ledger: usize,
    pub duplicate_cheque: usize,
    pub months: Vec<MonthTotals>,
    pub total_net: f64,
}

/// Per-month totals of an exported table. Credits are the resolved credits.
pub fn summarize(table: &ReconciledTable) -> Summary {
    let mut months: BTreeMap<(i32, u32), MonthTotals> = BTreeMap::new();
    let mut summary = Summary {
        rows: table.len(),
        ..Default::default()
    };

    let mut add = |year: i32, month: u32, debit: f64, credit: f64, net: f64| {
        let totals = months.entry((year, month)).or_insert_with(|| MonthTotals {
            year,
            month,
            ..Default::default()
        });
        totals.rows += 1;
        totals.debit += debit;
        totals.credit += credit;
        totals.net += net;
    };

    match table {
        ReconciledTable::Ledger(rows) => {
            for row in rows {
                add(
                    row.ledger.year,
                    row.ledger.month,
                    row.ledger.txn.dr_amt,
                    row.credit_amount_resolved,
                    row.net_amount_corrected,
                );
            }
            summary.duplicate_ledger = rows.iter().filter(|r| r.is_duplicate_ledger).count();
            summary.duplicate_cheque = rows.iter().filter(|r| r.is_duplicate_cheque).count();
        }
        ReconciledTable::Gw(rows) => {
            for row in rows {
                add(
                    row.trndate.year(),
                    row.trndate.month(),
                    row.dr_amt,
                    row.cr_amt,
                    row.net,
                );
            }
        }
    }

    summary.months = months.into_values().collect();
    summary.total_net = summary.months.iter().map(|m| m.net).sum();
    summary
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::GwLedgerRow;

    fn gw(date: (i32, u32, u32), dr: f64, cr: f64) -> GwLedgerRow {
        GwLedgerRow {
            trndate: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            trnno: None,
            subacct: "1001".to_string(),
            payee: None,
            dr_amt: dr,
            cr_amt: cr,
            net: dr - cr,
        }
    }

    #[test]
    fn test_months_in_order() {
        let table = ReconciledTable::Gw(vec![
            gw((2023, 2, 3), 0.0, 10.0),
            gw((2022, 12, 30), 5.0, 0.0),
            gw((2023, 2, 9), 1.0, 0.0),
        ]);
        let summary = summarize(&table);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.months.len(), 2);
        assert_eq!((summary.months[0].year, summary.months[0].month), (2022, 12));
        assert_eq!(summary.months[1].rows, 2);
        assert_eq!(summary.months[1].credit, 10.0);
        assert_eq!(summary.months[1].net, -9.0);
        assert_eq!(summary.total_net, -4.0);
    }

    #[test]
    fn test_empty() {
        let summary = summarize(&ReconciledTable::Ledger(Vec::new()));
        assert_eq!(summary, Summary::default());
    }
}
