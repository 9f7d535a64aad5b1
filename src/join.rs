use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::coalesce::coalesce;
use crate::models::{
    ChequeRecord, CorrelatedRow, JoinedLedgerRow, KeyedCheque, LedgerTxn, TxnMemo, CASH_ACCOUNT,
};

/// Correlation key of a ledger posting: present only for credits to the cash account.
pub fn ledger_cash_key(txn: &LedgerTxn) -> Option<String> {
    (txn.acct_no == CASH_ACCOUNT && txn.cr_amt != 0.0)
        .then(|| format!("{}{}", txn.trn_no, txn.sub_acct))
}

pub fn cheque_cash_key(cheque: &ChequeRecord) -> String {
    format!("{}{}", cheque.trn_no, cheque.acct_no)
}

/// Left-join ledger postings to memos on (number, date).
///
/// Each posting appears exactly once. If several memos share a key the
/// first one in loader order is used.
pub fn join_memos(ledger: &[LedgerTxn], memos: &[TxnMemo]) -> Vec<JoinedLedgerRow> {
    let mut by_key: HashMap<(&str, NaiveDate), &TxnMemo> = HashMap::new();
    for memo in memos {
        by_key
            .entry((memo.trn_no.as_str(), memo.trn_date))
            .or_insert(memo);
    }

    ledger
        .iter()
        .enumerate()
        .map(|(id, txn)| {
            let memo = by_key
                .get(&(txn.trn_no.as_str(), txn.trn_date))
                .map(|m| (*m).clone());
            let payee = memo
                .as_ref()
                .and_then(|m| coalesce([m.other_01.clone(), m.name.clone()]));
            JoinedLedgerRow {
                id,
                year: txn.trn_date.year(),
                month: txn.trn_date.month(),
                net_amount: txn.dr_amt - txn.cr_amt,
                cash_transaction_key: ledger_cash_key(txn),
                payee,
                memo,
                txn: txn.clone(),
            }
        })
        .collect()
}

/// Key every cheque; its identity is its row in the raw table.
pub fn key_cheques(cheques: &[ChequeRecord]) -> Vec<KeyedCheque> {
    cheques
        .iter()
        .map(|cheque| KeyedCheque {
            id_chk: cheque.source_row,
            cash_transaction_key: cheque_cash_key(cheque),
            cheque: cheque.clone(),
        })
        .collect()
}

/// Left-join ledger rows to cheques on (cash key, date).
///
/// A ledger row matching several cheques is repeated once per cheque, in
/// cheque order. A row without a key never matches.
pub fn correlate_cheques(ledger: Vec<JoinedLedgerRow>, cheques: &[KeyedCheque]) -> Vec<CorrelatedRow> {
    let mut by_key: HashMap<(String, NaiveDate), Vec<&KeyedCheque>> = HashMap::new();
    for cheque in cheques {
        by_key
            .entry((cheque.cash_transaction_key.clone(), cheque.cheque.trn_date))
            .or_default()
            .push(cheque);
    }

    let mut rows = Vec::with_capacity(ledger.len());
    for row in ledger {
        let matches: &[&KeyedCheque] = match &row.cash_transaction_key {
            Some(key) => by_key
                .get(&(key.clone(), row.txn.trn_date))
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => &[],
        };
        if matches.is_empty() {
            rows.push(CorrelatedRow { ledger: row, cheque: None });
            continue;
        }
        for cheque in matches {
            rows.push(CorrelatedRow {
                ledger: row.clone(),
                cheque: Some((*cheque).clone()),
            });
        }
    }
    log::debug!("Cheque join produced {} rows", rows.len());
    rows
}
