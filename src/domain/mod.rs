//! Domain values shared by the table component and the search services.

pub mod account;
pub mod paging;
pub mod search;
pub mod types;
