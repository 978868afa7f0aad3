//! Actions exchanged between the controller and the account search effects.

use serde::Serialize;

use crate::domain::paging::{FetchRequest, LedgerSearch};
use crate::domain::search::SearchResult;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum AccountAction {
    /// Search across all accounts.
    #[serde(rename = "[Account] Search")]
    Search(FetchRequest),
    /// Search limited to the accounts of one ledger.
    #[serde(rename = "[Account] Search By Ledger")]
    SearchByLedger(LedgerSearch),
    /// Outcome of either search kind. Failed searches carry an empty result.
    #[serde(rename = "[Account] Search Complete")]
    SearchComplete(SearchResult),
}
