use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountState, AccountType, LedgerId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub identifier: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub ledger: LedgerId,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub state: AccountState,
    #[serde(default)]
    pub created_on: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_modified_on: Option<NaiveDateTime>,
}

/// One page of accounts as returned by the accounting backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountPage {
    pub accounts: Vec<Account>,
    pub total_elements: usize,
    pub total_pages: usize,
}
