use serde::{Deserialize, Serialize};

use crate::domain::account::{Account, AccountPage};

/// Normalized outcome of a search, used for successes and failures alike.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T = Account> {
    pub elements: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> SearchResult<T> {
    /// The fallback emitted when a search fails.
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            total_elements: 0,
            total_pages: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T> Default for SearchResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<AccountPage> for SearchResult<Account> {
    fn from(page: AccountPage) -> Self {
        Self {
            elements: page.accounts,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AccountType, LedgerId};

    fn account(identifier: &str) -> Account {
        Account {
            identifier: identifier.to_string(),
            name: format!("Account {identifier}"),
            account_type: AccountType::Asset,
            ledger: LedgerId::new("1000").unwrap(),
            balance: 0.0,
            state: Default::default(),
            created_on: None,
            last_modified_on: None,
        }
    }

    #[test]
    fn account_page_maps_field_for_field() {
        let page = AccountPage {
            accounts: vec![account("x"), account("y")],
            total_elements: 2,
            total_pages: 1,
        };

        let result = SearchResult::from(page.clone());

        assert_eq!(result.elements, page.accounts);
        assert_eq!(result.total_elements, 2);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn empty_result_has_zero_totals() {
        let result: SearchResult = SearchResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.total_elements, 0);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result, SearchResult::default());
    }
}
