//! Collaborators of the account search slice and the effects driving them.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::account::AccountPage;
use crate::domain::paging::FetchRequest;
use crate::domain::types::LedgerId;
use crate::repository::errors::RepositoryError;

pub mod accounting;
pub mod effects;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod search;
pub mod translate;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Backend answering account searches.
///
/// Returned futures own everything they need so that callers can spawn them.
pub trait AccountingService: Send + Sync {
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

/// Localization lookup resolving a message key to display text.
pub trait Translator: Send + Sync {
    fn resolve(&self, key: &str) -> BoxFuture<'static, String>;
}
