//! Account search slice of an accounting back office: a paginated, sortable
//! data table and the effects that debounce searches and dispatch them to the
//! accounting backend.

pub mod components;
pub mod console;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

pub use console::run;
