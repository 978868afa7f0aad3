//! Accounting backend answering searches from an [`AccountReader`].

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use crate::domain::account::AccountPage;
use crate::domain::paging::{FetchRequest, PageRequest};
use crate::domain::types::LedgerId;
use crate::repository::{AccountListQuery, AccountReader};
use crate::services::{AccountingService, ServiceResult};

pub struct RepositoryAccountingService<R> {
    repo: Arc<R>,
    latency: Duration,
}

impl<R> RepositoryAccountingService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            latency: Duration::ZERO,
        }
    }

    /// Delays every answer, simulating a remote backend.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Runs one query and shapes the outcome like the remote backend's page.
fn load_page<R>(repo: &R, query: AccountListQuery) -> ServiceResult<AccountPage>
where
    R: AccountReader + ?Sized,
{
    let page_size = query
        .pagination
        .map(|page| PageRequest::new(page.page_index, page.size))
        .transpose()?
        .map(|page| page.size);

    let (total, accounts) = repo.list_accounts(query).map_err(|err| {
        log::error!("Failed to list accounts: {err}");
        err
    })?;

    let total_pages = match page_size {
        Some(size) => total.div_ceil(size),
        None if total > 0 => 1,
        None => 0,
    };

    Ok(AccountPage {
        accounts,
        total_elements: total,
        total_pages,
    })
}

impl<R> RepositoryAccountingService<R>
where
    R: AccountReader + Send + Sync + 'static,
{
    fn run(&self, query: AccountListQuery) -> BoxFuture<'static, ServiceResult<AccountPage>> {
        let repo = Arc::clone(&self.repo);
        let latency = self.latency;

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            load_page(repo.as_ref(), query)
        })
    }
}

impl<R> AccountingService for RepositoryAccountingService<R>
where
    R: AccountReader + Send + Sync + 'static,
{
    fn fetch_accounts(
        &self,
        request: FetchRequest,
    ) -> BoxFuture<'static, ServiceResult<AccountPage>> {
        self.run(AccountListQuery::from(request))
    }

    fn fetch_accounts_of_ledger(
        &self,
        ledger_id: LedgerId,
        request: FetchRequest,
    ) -> BoxFuture<'static, ServiceResult<AccountPage>> {
        self.run(AccountListQuery::from(request).ledger(ledger_id))
    }
}
