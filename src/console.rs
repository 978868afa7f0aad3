//! Console driver wiring the table, the search effects and stdin together.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::components::column::{ColumnSpec, resolve_columns};
use crate::components::data_table::DataTable;
use crate::domain::account::Account;
use crate::domain::paging::LedgerSearch;
use crate::domain::types::{ColumnName, LedgerId};
use crate::dto::actions::AccountAction;
use crate::dto::table::{PageChangeEvent, TableEvent};
use crate::forms::console::ConsoleCommand;
use crate::models::config::AppConfig;
use crate::repository::memory::InMemoryAccountRepository;
use crate::services::Translator;
use crate::services::accounting::RepositoryAccountingService;
use crate::services::effects::AccountSearchEffects;
use crate::services::translate::CatalogTranslator;

/// Columns shown for accounts, labelled by message keys.
pub fn account_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("identifier", "ACCOUNT.IDENTIFIER"),
        ColumnSpec::new("name", "ACCOUNT.NAME"),
        ColumnSpec::new("type", "ACCOUNT.TYPE"),
        ColumnSpec::new("ledger", "ACCOUNT.LEDGER"),
        ColumnSpec::new("balance", "ACCOUNT.BALANCE"),
        ColumnSpec::new("state", "ACCOUNT.STATE"),
    ]
}

fn cell(account: &Account, column: &str) -> String {
    match column {
        "identifier" => account.identifier.clone(),
        "name" => account.name.clone(),
        "type" => account.account_type.to_string(),
        "ledger" => account.ledger.to_string(),
        "balance" => format!("{:.2}", account.balance),
        "state" => account.state.to_string(),
        _ => String::new(),
    }
}

/// Outer controller: turns commands into table gestures, dispatches search
/// actions and keeps the latest result on the table.
pub struct ConsoleController<W> {
    table: DataTable<Account>,
    ledger: Option<LedgerId>,
    actions: mpsc::UnboundedSender<AccountAction>,
    out: W,
}

impl<W: Write> ConsoleController<W> {
    pub fn new(
        table: DataTable<Account>,
        actions: mpsc::UnboundedSender<AccountAction>,
        out: W,
    ) -> Self {
        Self {
            table,
            ledger: None,
            actions,
            out,
        }
    }

    pub fn table(&self) -> &DataTable<Account> {
        &self.table
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Applies one command. Returns `false` once the user asked to quit.
    pub fn handle(&mut self, command: ConsoleCommand) -> std::io::Result<bool> {
        let first_page = PageChangeEvent {
            page: 1,
            page_size: self.table.current_page().size,
        };

        let event = match command {
            ConsoleCommand::Quit => return Ok(false),
            ConsoleCommand::Search(term) => {
                self.table.set_search_term(term);
                self.table.on_page_change(first_page)
            }
            ConsoleCommand::Ledger(ledger) => {
                self.ledger = ledger;
                self.table.on_page_change(first_page)
            }
            ConsoleCommand::Page(event) => self.table.on_page_change(event),
            ConsoleCommand::Sort(event) => self.table.on_sort_change(event),
            ConsoleCommand::Open(position) => {
                let row = position
                    .checked_sub(1)
                    .and_then(|index| self.table.data().elements.get(index))
                    .cloned();
                match row {
                    Some(row) => self.table.on_action_cell_click(row),
                    None => {
                        writeln!(self.out, "no row #{position} on this page")?;
                        return Ok(true);
                    }
                }
            }
        };

        self.dispatch(event)?;
        Ok(true)
    }

    fn dispatch(&mut self, event: TableEvent<Account>) -> std::io::Result<()> {
        match event {
            TableEvent::Fetch(fetch_request) => {
                let action = match &self.ledger {
                    Some(ledger_id) => AccountAction::SearchByLedger(LedgerSearch {
                        ledger_id: ledger_id.clone(),
                        fetch_request,
                    }),
                    None => AccountAction::Search(fetch_request),
                };
                self.table.set_loading(true);
                if self.actions.send(action).is_err() {
                    log::error!("Search effects are not running");
                }
            }
            TableEvent::ActionCellClick(account) => {
                let json = serde_json::to_string_pretty(&account).map_err(std::io::Error::other)?;
                writeln!(self.out, "{json}")?;
            }
        }
        Ok(())
    }

    /// Stores a completed search on the table and prints the page.
    pub fn on_action(&mut self, action: AccountAction) -> std::io::Result<()> {
        if let AccountAction::SearchComplete(result) = action {
            self.table.set_loading(false);
            self.table.set_data(result);
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> std::io::Result<()> {
        if !self.table.has_data() {
            writeln!(self.out, "no accounts found")?;
            return Ok(());
        }

        let header: Vec<&str> = self.table.columns().iter().map(|c| c.label.as_str()).collect();
        writeln!(self.out, "#  | {} | {}", header.join(" | "), self.table.action_column_label)?;

        for (index, account) in self.table.data().elements.iter().enumerate() {
            let cells: Vec<String> = self
                .table
                .columns()
                .iter()
                .map(|column| cell(account, &column.name))
                .collect();
            writeln!(self.out, "{:<2} | {}", index + 1, cells.join(" | "))?;
        }

        let pager = self.table.pager();
        let links: Vec<String> = pager
            .links
            .iter()
            .map(|link| match link {
                Some(page) if *page == pager.page => format!("[{page}]"),
                Some(page) => page.to_string(),
                None => "…".to_string(),
            })
            .collect();
        writeln!(
            self.out,
            "{} accounts, page {}/{}: {}",
            self.table.data().total_elements,
            pager.page,
            pager.total_pages,
            links.join(" ")
        )?;
        Ok(())
    }
}

/// Loads accounts and translations, starts the effects and serves stdin
/// until it closes or the user quits.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let repo = InMemoryAccountRepository::from_file(&config.accounts_path)
        .map_err(|e| std::io::Error::other(format!("Failed to load accounts: {e}")))?;
    log::info!("Loaded {} accounts from {}", repo.len(), config.accounts_path);

    let translator = match &config.translations_path {
        Some(path) => CatalogTranslator::from_file(path)
            .map_err(|e| std::io::Error::other(format!("Failed to load translations: {e}")))?,
        None => CatalogTranslator::default(),
    };

    let service = RepositoryAccountingService::new(Arc::new(repo))
        .with_latency(config.backend_latency());

    let (actions_tx, actions_rx) = mpsc::unbounded_channel();
    let (completions_tx, mut completions_rx) = mpsc::unbounded_channel();
    let effects = AccountSearchEffects::new(Arc::new(service), config.debounce())
        .spawn(actions_rx, completions_tx);

    let mut table = DataTable::new().with_page_sizes(config.page_sizes.clone());
    table.sortable = true;
    table.pageable = true;
    match ColumnName::new(config.default_sort_column.as_str()) {
        Ok(column) => table.set_sort_by(column),
        Err(err) => log::warn!("Ignoring default sort column: {err}"),
    }
    table.set_columns(resolve_columns(&translator, account_columns()).await);
    table.action_column_label = translator.resolve(&table.action_column_label).await;

    let mut controller = ConsoleController::new(table, actions_tx, std::io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    log::info!(
        "Ready: search <term> | ledger <id>|- | page <n> [size] | sort <column> [asc|desc] \
         | open <row> | quit"
    );

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let size = controller.table().current_page().size;
                match ConsoleCommand::parse(&line, size) {
                    Ok(command) => {
                        if !controller.handle(command)? {
                            break;
                        }
                    }
                    Err(err) => log::warn!("{err}"),
                }
            }
            Some(action) = completions_rx.recv() => controller.on_action(action)?,
        }
    }

    // Closing the action stream lets in-flight searches finish and the
    // effects task end.
    drop(controller);
    if let Err(err) = effects.await {
        log::error!("Search effects terminated abnormally: {err}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::SearchResult;
    use crate::domain::types::AccountType;
    use crate::dto::table::{SortChangeEvent, SortingOrder};

    fn account(identifier: &str) -> Account {
        Account {
            identifier: identifier.to_string(),
            name: format!("Account {identifier}"),
            account_type: AccountType::Revenue,
            ledger: LedgerId::new("4000").unwrap(),
            balance: 10.0,
            state: Default::default(),
            created_on: None,
            last_modified_on: None,
        }
    }

    fn controller() -> (
        ConsoleController<Vec<u8>>,
        mpsc::UnboundedReceiver<AccountAction>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ConsoleController::new(DataTable::new(), tx, Vec::new()), rx)
    }

    #[test]
    fn search_resets_to_the_first_page() {
        let (mut controller, mut rx) = controller();
        controller
            .handle(ConsoleCommand::Page(PageChangeEvent {
                page: 3,
                page_size: 10,
            }))
            .unwrap();
        rx.try_recv().unwrap();

        controller
            .handle(ConsoleCommand::Search(Some("cash".to_string())))
            .unwrap();

        match rx.try_recv().unwrap() {
            AccountAction::Search(request) => {
                assert_eq!(request.page.page_index, 0);
                assert_eq!(request.search_term.as_deref(), Some("cash"));
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert!(controller.table().loading());
    }

    #[test]
    fn ledger_scope_switches_the_action_kind() {
        let (mut controller, mut rx) = controller();
        let ledger = LedgerId::new("2000").unwrap();

        controller
            .handle(ConsoleCommand::Ledger(Some(ledger.clone())))
            .unwrap();
        controller
            .handle(ConsoleCommand::Sort(SortChangeEvent {
                name: "name".to_string(),
                order: SortingOrder::Descending,
            }))
            .unwrap();

        rx.try_recv().unwrap();
        match rx.try_recv().unwrap() {
            AccountAction::SearchByLedger(payload) => {
                assert_eq!(payload.ledger_id, ledger);
                assert_eq!(payload.fetch_request.sort.sort_column.as_str(), "name");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn completion_updates_the_table_and_prints_rows() {
        let (mut controller, _rx) = controller();
        controller.table.set_columns(vec![crate::components::column::Column {
            name: "identifier".to_string(),
            label: "Account".to_string(),
            tooltip: "Account".to_string(),
            sortable: true,
        }]);

        controller
            .on_action(AccountAction::SearchComplete(SearchResult {
                elements: vec![account("4001"), account("4002")],
                total_elements: 2,
                total_pages: 1,
            }))
            .unwrap();

        assert!(controller.table().has_data());
        assert!(!controller.table().loading());
        let printed = String::from_utf8(controller.into_output()).unwrap();
        assert!(printed.contains("4001"));
        assert!(printed.contains("2 accounts, page 1/1"));
    }

    #[test]
    fn open_prints_the_selected_account() {
        let (mut controller, mut rx) = controller();
        controller.table.set_data(SearchResult {
            elements: vec![account("4001")],
            total_elements: 1,
            total_pages: 1,
        });

        assert!(controller.handle(ConsoleCommand::Open(1)).unwrap());
        assert!(controller.handle(ConsoleCommand::Open(5)).unwrap());
        assert!(rx.try_recv().is_err());

        let printed = String::from_utf8(controller.into_output()).unwrap();
        assert!(printed.contains("\"identifier\": \"4001\""));
        assert!(printed.contains("no row #5"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut controller, _rx) = controller();
        assert!(!controller.handle(ConsoleCommand::Quit).unwrap());
    }
}
