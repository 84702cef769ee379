//! CSV export
//!
//! Writes a user's transactions in a spreadsheet-friendly layout.

use std::collections::HashMap;
use std::io::Write;

use crate::error::FinbudResult;
use crate::models::UserId;
use crate::storage::RecordStore;

const TRANSACTION_HEADER: [&str; 6] = ["date", "type", "amount", "category", "merchant", "description"];

/// Export every transaction of `user`, most recent first
///
/// Returns the number of rows written (header excluded).
pub fn export_transactions_csv<W: Write>(
    store: &dyn RecordStore,
    user: UserId,
    writer: W,
) -> FinbudResult<usize> {
    let category_names: HashMap<_, _> = store
        .list_categories(user)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let transactions = store.list_transactions(user)?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TRANSACTION_HEADER)?;

    for txn in &transactions {
        let category = txn
            .category_id
            .and_then(|id| category_names.get(&id).cloned())
            .unwrap_or_default();

        csv.write_record([
            txn.transaction_date.to_string(),
            txn.kind.to_string(),
            format!("{:.2}", txn.amount.as_f64()),
            category,
            txn.merchant.clone().unwrap_or_default(),
            txn.description.clone().unwrap_or_default(),
        ])?;
    }

    csv.flush()?;
    Ok(transactions.len())
}
