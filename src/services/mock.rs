//! Mock collaborators for isolating the table and effects in tests.

use futures::future::BoxFuture;
use mockall::mock;

use crate::domain::account::AccountPage;
use crate::domain::paging::FetchRequest;
use crate::domain::types::LedgerId;
use crate::services::{AccountingService, ServiceResult, Translator};

mock! {
    pub Accounting {}

    impl AccountingService for Accounting {
        fn fetch_accounts(
            &self,
            request: FetchRequest,
        ) -> BoxFuture<'static, ServiceResult<AccountPage>>;
        fn fetch_accounts_of_ledger(
            &self,
            ledger_id: LedgerId,
            request: FetchRequest,
        ) -> BoxFuture<'static, ServiceResult<AccountPage>>;
    }
}

mock! {
    pub Localization {}

    impl Translator for Localization {
        fn resolve(&self, key: &str) -> BoxFuture<'static, String>;
    }
}
