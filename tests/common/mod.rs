#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use fims_accounts::domain::account::{Account, AccountPage};
use fims_accounts::domain::paging::{FetchRequest, LedgerSearch, PageRequest, SortRequest};
use fims_accounts::domain::search::SearchResult;
use fims_accounts::domain::types::{AccountType, ColumnName, LedgerId, SortDirection};
use fims_accounts::dto::actions::AccountAction;
use fims_accounts::services::effects::AccountSearchEffects;
use fims_accounts::services::search::DebounceOptions;
use fims_accounts::services::{AccountingService, ServiceError, ServiceResult};

/// How the fake backend answers one search term.
#[derive(Clone)]
pub enum Answer {
    Page(AccountPage),
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    All(String),
    Ledger(String, String),
}

/// Backend fake answering by search term after a configurable delay.
#[derive(Clone, Default)]
pub struct FakeAccounting {
    answers: Arc<Mutex<HashMap<String, (Duration, Answer)>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeAccounting {
    pub fn answer(&self, term: &str, delay: Duration, answer: Answer) {
        self.answers
            .lock()
            .unwrap()
            .insert(term.to_string(), (delay, answer));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, request: &FetchRequest) -> BoxFuture<'static, ServiceResult<AccountPage>> {
        let term = request.search_term.clone().unwrap_or_default();
        let (delay, answer) = self
            .answers
            .lock()
            .unwrap()
            .get(&term)
            .cloned()
            .unwrap_or_else(|| (Duration::ZERO, Answer::Page(page_of(&[&term]))));

        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match answer {
                Answer::Page(page) => Ok(page),
                Answer::Fail => Err(ServiceError::Unavailable("backend down".to_string())),
            }
        })
    }
}

impl AccountingService for FakeAccounting {
    fn fetch_accounts(
        &self,
        request: FetchRequest,
    ) -> BoxFuture<'static, ServiceResult<AccountPage>> {
        let term = request.search_term.clone().unwrap_or_default();
        self.calls.lock().unwrap().push(Call::All(term));
        self.respond(&request)
    }

    fn fetch_accounts_of_ledger(
        &self,
        ledger_id: LedgerId,
        request: FetchRequest,
    ) -> BoxFuture<'static, ServiceResult<AccountPage>> {
        let term = request.search_term.clone().unwrap_or_default();
        self.calls
            .lock()
            .unwrap()
            .push(Call::Ledger(ledger_id.into_inner(), term));
        self.respond(&request)
    }
}

pub fn account(identifier: &str) -> Account {
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

pub fn page_of(identifiers: &[&str]) -> AccountPage {
    AccountPage {
        accounts: identifiers.iter().map(|id| account(id)).collect(),
        total_elements: identifiers.len(),
        total_pages: usize::from(!identifiers.is_empty()),
    }
}

pub fn request(term: &str) -> FetchRequest {
    FetchRequest::new(
        PageRequest::new(0, 10).unwrap(),
        SortRequest::new(ColumnName::new("identifier").unwrap(), SortDirection::Asc),
    )
    .search(term)
}

pub fn ledger_request(ledger: &str, term: &str) -> LedgerSearch {
    LedgerSearch {
        ledger_id: LedgerId::new(ledger).unwrap(),
        fetch_request: request(term),
    }
}

pub struct Harness {
    pub actions: mpsc::UnboundedSender<AccountAction>,
    pub completions: mpsc::UnboundedReceiver<AccountAction>,
    pub effects: JoinHandle<()>,
}

pub fn start(service: FakeAccounting, options: DebounceOptions) -> Harness {
    let (actions, actions_rx) = mpsc::unbounded_channel();
    let (completions_tx, completions) = mpsc::unbounded_channel();
    let effects =
        AccountSearchEffects::new(Arc::new(service), options).spawn(actions_rx, completions_tx);

    Harness {
        actions,
        completions,
        effects,
    }
}

impl Harness {
    pub fn dispatch(&self, action: AccountAction) {
        self.actions.send(action).unwrap();
    }

    /// Next completion, or `None` if nothing arrives within `within`.
    pub async fn next_result(&mut self, within: Duration) -> Option<SearchResult> {
        match tokio::time::timeout(within, self.completions.recv()).await {
            Ok(Some(AccountAction::SearchComplete(result))) => Some(result),
            Ok(Some(other)) => panic!("unexpected action {other:?}"),
            Ok(None) | Err(_) => None,
        }
    }

    /// Identifiers of the next completion's rows.
    pub async fn next_completion(&mut self, within: Duration) -> Option<Vec<String>> {
        let result = self.next_result(within).await?;
        Some(
            result
                .elements
                .into_iter()
                .map(|account| account.identifier)
                .collect(),
        )
    }
}
