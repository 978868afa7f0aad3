//! DTO modules that bridge the table, the controller and the effects.

pub mod actions;
pub mod table;
