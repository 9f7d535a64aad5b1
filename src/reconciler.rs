use std::collections::HashSet;

use crate::coalesce::coalesce;
use crate::error::Result;
use crate::gw;
use crate::join::{correlate_cheques, join_memos, key_cheques};
use crate::loader::load_record_sets;
use crate::models::{
    CorrelatedRow, DateWindow, ReconciledRow, ReconciledTable, GW_COMPANY, MEMO_REFERENCE_TYPE,
};
use crate::source::RecordSource;

/// Reconcile one company's ledger against its cheque records for `window`.
///
/// The GW company is served from its pre-joined ledger instead of the
/// three-table join. Either the whole table is returned or an error.
pub fn reconcile(
    company: &str,
    window: &DateWindow,
    source: &dyn RecordSource,
) -> Result<ReconciledTable> {
    if company == GW_COMPANY {
        return gw::bank_recon_ledger(source, window).map(ReconciledTable::Gw);
    }

    let sets = load_record_sets(source, window)?;

    log::info!("Reconciling {company}...");
    let joined = join_memos(&sets.ledger, &sets.memos);
    let keyed = key_cheques(&sets.cheques);
    let rows = resolve_duplicates(correlate_cheques(joined, &keyed));
    log::info!("Reconciling {company}...done");
    log::debug!("{company}: {} rows with non-zero net", rows.len());

    Ok(ReconciledTable::Ledger(rows))
}

/// Flag every repeat of an identity after its first appearance.
/// Rows without an identity are never flagged.
fn flag_repeats(ids: impl Iterator<Item = Option<usize>>) -> Vec<bool> {
    let mut seen = HashSet::new();
    ids.map(|id| id.is_some_and(|id| !seen.insert(id)))
        .collect()
}

/// Undo the cheque join's fan-out, recompute net amounts, and drop rows
/// that net to zero.
pub fn resolve_duplicates(rows: Vec<CorrelatedRow>) -> Vec<ReconciledRow> {
    let ledger_repeats = flag_repeats(rows.iter().map(|r| Some(r.ledger.id)));
    let cheque_repeats = flag_repeats(rows.iter().map(|r| r.cheque.as_ref().map(|c| c.id_chk)));

    rows.into_iter()
        .zip(ledger_repeats)
        .zip(cheque_repeats)
        .map(|((row, dup_ledger), dup_cheque)| resolve_row(row, dup_ledger, dup_cheque))
        .filter(|row| row.net_amount_corrected != 0.0)
        .collect()
}

fn resolve_row(row: CorrelatedRow, is_duplicate_ledger: bool, is_duplicate_cheque: bool) -> ReconciledRow {
    let CorrelatedRow { mut ledger, cheque } = row;

    if is_duplicate_ledger {
        ledger.txn.dr_amt = 0.0;
        ledger.txn.cr_amt = 0.0;
    }

    let amount = match &cheque {
        Some(keyed) if !is_duplicate_cheque => keyed.cheque.amount,
        _ => 0.0,
    };
    let cheque_no = cheque.as_ref().and_then(|c| c.cheque.cheque_no.clone());

    // A cheque number means the cheque side governs, even at zero.
    let credit_amount_resolved = if amount != 0.0 || cheque_no.is_some() {
        amount
    } else {
        ledger.txn.cr_amt
    };
    let net_amount_corrected = ledger.txn.dr_amt - credit_amount_resolved;

    let reference = if ledger.txn.trn_type == MEMO_REFERENCE_TYPE {
        ledger.memo.as_ref().and_then(|m| m.other_03.clone())
    } else {
        cheque_no
    };
    let transaction_reference = coalesce([reference, Some(String::new())]).unwrap_or_default();

    let payee = coalesce([
        cheque.as_ref().and_then(|c| c.cheque.payee.clone()),
        ledger.payee.clone(),
    ]);

    ReconciledRow {
        ledger,
        cheque,
        amount,
        is_duplicate_ledger,
        is_duplicate_cheque,
        credit_amount_resolved,
        net_amount_corrected,
        transaction_reference,
        payee,
    }
}
