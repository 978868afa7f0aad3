//! Account search effects: one debounced pipeline per search kind.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::paging::{FetchRequest, LedgerSearch};
use crate::dto::actions::AccountAction;
use crate::services::AccountingService;
use crate::services::search::{DebounceOptions, SearchPipeline};

/// Routes search actions to independent pipelines for unscoped and
/// ledger-scoped searches. Both pipelines report through the same
/// [`AccountAction::SearchComplete`] action.
pub struct AccountSearchEffects {
    service: Arc<dyn AccountingService>,
    options: DebounceOptions,
}

impl AccountSearchEffects {
    pub fn new(service: Arc<dyn AccountingService>, options: DebounceOptions) -> Self {
        Self { service, options }
    }

    /// Starts both pipelines and the router feeding them.
    ///
    /// Actions other than the two search kinds are ignored. The returned task
    /// finishes once `actions` closes and both pipelines have drained.
    pub fn spawn(
        self,
        mut actions: mpsc::UnboundedReceiver<AccountAction>,
        completions: mpsc::UnboundedSender<AccountAction>,
    ) -> JoinHandle<()> {
        let (search_tx, search_rx) = mpsc::unbounded_channel::<FetchRequest>();
        let (ledger_tx, ledger_rx) = mpsc::unbounded_channel::<LedgerSearch>();

        let service = Arc::clone(&self.service);
        let search = SearchPipeline::new("search", self.options, move |request: FetchRequest| {
            service.fetch_accounts(request)
        })
        .spawn(search_rx, completions.clone());

        let service = Arc::clone(&self.service);
        let search_by_ledger =
            SearchPipeline::new("search_by_ledger", self.options, move |payload: LedgerSearch| {
                service.fetch_accounts_of_ledger(payload.ledger_id, payload.fetch_request)
            })
            .spawn(ledger_rx, completions);

        tokio::spawn(async move {
            while let Some(action) = actions.recv().await {
                let delivered = match action {
                    AccountAction::Search(request) => search_tx.send(request).is_ok(),
                    AccountAction::SearchByLedger(payload) => ledger_tx.send(payload).is_ok(),
                    AccountAction::SearchComplete(_) => true,
                };
                if !delivered {
                    log::warn!("Search pipeline stopped, dropping action");
                }
            }

            drop(search_tx);
            drop(ledger_tx);

            for (name, pipeline) in [("search", search), ("search_by_ledger", search_by_ledger)] {
                if let Err(err) = pipeline.await {
                    log::error!("Pipeline {name} terminated abnormally: {err}");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::account::AccountPage;
    use crate::domain::paging::{PageRequest, SortRequest};
    use crate::domain::search::SearchResult;
    use crate::domain::types::{ColumnName, LedgerId, SortDirection};
    use crate::services::mock::MockAccounting;

    fn request() -> FetchRequest {
        FetchRequest::new(
            PageRequest::new(0, 10).unwrap(),
            SortRequest::new(ColumnName::new("identifier").unwrap(), SortDirection::Asc),
        )
    }

    fn empty_page() -> AccountPage {
        AccountPage {
            accounts: Vec::new(),
            total_elements: 0,
            total_pages: 0,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ledger_search_is_routed_to_the_ledger_endpoint() {
        let mut service = MockAccounting::new();
        service.expect_fetch_accounts().never();
        service
            .expect_fetch_accounts_of_ledger()
            .withf(|ledger_id, _| ledger_id.as_str() == "2000")
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(empty_page()) }));

        let (actions, actions_rx) = mpsc::unbounded_channel();
        let (completions_tx, mut completions) = mpsc::unbounded_channel();
        let effects = AccountSearchEffects::new(Arc::new(service), DebounceOptions::default())
            .spawn(actions_rx, completions_tx);

        actions
            .send(AccountAction::SearchByLedger(LedgerSearch {
                ledger_id: LedgerId::new("2000").unwrap(),
                fetch_request: request(),
            }))
            .unwrap();

        match completions.recv().await {
            Some(AccountAction::SearchComplete(result)) => {
                assert_eq!(result, SearchResult::empty())
            }
            other => panic!("unexpected completion {other:?}"),
        }

        drop(actions);
        effects.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn completions_sent_back_in_are_ignored() {
        let mut service = MockAccounting::new();
        service.expect_fetch_accounts().never();
        service.expect_fetch_accounts_of_ledger().never();

        let (actions, actions_rx) = mpsc::unbounded_channel();
        let (completions_tx, mut completions) = mpsc::unbounded_channel();
        let effects = AccountSearchEffects::new(Arc::new(service), DebounceOptions::default())
            .spawn(actions_rx, completions_tx);

        actions
            .send(AccountAction::SearchComplete(SearchResult::empty()))
            .unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(actions);

        effects.await.unwrap();
        assert!(completions.recv().await.is_none());
    }
}
