//! Line-oriented commands read by the console driver.

use std::str::FromStr;

use validator::Validate;

use crate::domain::types::LedgerId;
use crate::dto::table::{PageChangeEvent, SortChangeEvent, SortingOrder};
use crate::forms::FormError;

#[derive(Debug, Validate)]
pub struct PageForm {
    #[validate(range(min = 1))]
    pub page: usize,
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,
}

impl TryFrom<PageForm> for PageChangeEvent {
    type Error = FormError;

    fn try_from(form: PageForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            page: form.page,
            page_size: form.page_size,
        })
    }
}

#[derive(Debug, Validate)]
pub struct SortForm {
    #[validate(length(min = 1, max = 64))]
    pub column: String,
    pub order: SortingOrder,
}

impl TryFrom<SortForm> for SortChangeEvent {
    type Error = FormError;

    fn try_from(form: SortForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: form.column,
            order: form.order,
        })
    }
}

#[derive(Debug, PartialEq)]
pub enum ConsoleCommand {
    /// Sets or clears the search term.
    Search(Option<String>),
    /// Scopes searches to a ledger, or back to all accounts.
    Ledger(Option<LedgerId>),
    Page(PageChangeEvent),
    Sort(SortChangeEvent),
    /// Opens the row at a one-based position of the current page.
    Open(usize),
    Quit,
}

fn parse_number(raw: &str) -> Result<usize, FormError> {
    raw.parse()
        .map_err(|_| FormError::InvalidNumber(raw.to_string()))
}

fn parse_order(raw: Option<&str>) -> Result<SortingOrder, FormError> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("ascending") | Some("asc") => Ok(SortingOrder::Ascending),
        Some("descending") | Some("desc") => Ok(SortingOrder::Descending),
        Some(other) => Err(FormError::InvalidOrder(other.to_string())),
    }
}

impl ConsoleCommand {
    /// Parses `page <n> [size]`; the size defaults to `current_size`.
    fn page(args: &[&str], current_size: usize) -> Result<Self, FormError> {
        let page = args
            .first()
            .ok_or(FormError::MissingArgument("page"))
            .and_then(|raw| parse_number(raw))?;
        let page_size = match args.get(1) {
            Some(raw) => parse_number(raw)?,
            None => current_size,
        };

        let event = PageChangeEvent::try_from(PageForm { page, page_size })?;
        Ok(Self::Page(event))
    }

    /// Parses a line, using `current_size` when a page command omits the size.
    pub fn parse(line: &str, current_size: usize) -> Result<Self, FormError> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Err(FormError::MissingArgument("command"));
        };
        let args: Vec<&str> = parts.collect();

        match command.to_ascii_lowercase().as_str() {
            "search" => {
                let term = args.join(" ");
                Ok(Self::Search(Some(term).filter(|t| !t.is_empty())))
            }
            "ledger" => match args.first() {
                None | Some(&"-") => Ok(Self::Ledger(None)),
                Some(raw) => LedgerId::new(*raw)
                    .map(|id| Self::Ledger(Some(id)))
                    .map_err(|_| FormError::InvalidLedgerId),
            },
            "page" => Self::page(&args, current_size),
            "sort" => {
                let column = args
                    .first()
                    .ok_or(FormError::MissingArgument("column"))?
                    .to_string();
                let order = parse_order(args.get(1).copied())?;
                let event = SortChangeEvent::try_from(SortForm { column, order })?;
                Ok(Self::Sort(event))
            }
            "open" => {
                let row = args
                    .first()
                    .ok_or(FormError::MissingArgument("row"))
                    .and_then(|raw| parse_number(raw))?;
                Ok(Self::Open(row))
            }
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(FormError::UnknownCommand(other.to_string())),
        }
    }
}

impl FromStr for ConsoleCommand {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, crate::components::data_table::PAGE_SIZES[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_joins_the_remaining_words() {
        let command: ConsoleCommand = "search petty cash".parse().unwrap();
        assert_eq!(command, ConsoleCommand::Search(Some("petty cash".to_string())));

        let command: ConsoleCommand = "search".parse().unwrap();
        assert_eq!(command, ConsoleCommand::Search(None));
    }

    #[test]
    fn page_defaults_to_the_current_size() {
        let command = ConsoleCommand::parse("page 3", 15).unwrap();
        assert_eq!(
            command,
            ConsoleCommand::Page(PageChangeEvent {
                page: 3,
                page_size: 15
            })
        );
    }

    #[test]
    fn page_zero_fails_validation() {
        let result = ConsoleCommand::parse("page 0 10", 10);
        assert!(matches!(result, Err(FormError::Validation(_))));

        let result = ConsoleCommand::parse("page 1 500", 10);
        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn sort_order_defaults_to_ascending() {
        let command: ConsoleCommand = "sort name".parse().unwrap();
        assert_eq!(
            command,
            ConsoleCommand::Sort(SortChangeEvent {
                name: "name".to_string(),
                order: SortingOrder::Ascending,
            })
        );

        let result: Result<ConsoleCommand, _> = "sort name sideways".parse();
        assert!(matches!(result, Err(FormError::InvalidOrder(_))));
    }

    #[test]
    fn ledger_dash_clears_the_scope() {
        let command: ConsoleCommand = "ledger -".parse().unwrap();
        assert_eq!(command, ConsoleCommand::Ledger(None));

        let command: ConsoleCommand = "ledger 1000".parse().unwrap();
        assert_eq!(
            command,
            ConsoleCommand::Ledger(Some(LedgerId::new("1000").unwrap()))
        );
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let result: Result<ConsoleCommand, _> = "delete 1001".parse();
        assert!(matches!(result, Err(FormError::UnknownCommand(_))));
        assert!(matches!(
            "open x".parse::<ConsoleCommand>(),
            Err(FormError::InvalidNumber(_))
        ));
    }
}
