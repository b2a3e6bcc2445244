//! Terminal front end: each submodule renders one command.

pub mod convert;
pub mod loan;
pub mod rates;
pub mod refresh;
pub mod setup;
pub mod ui;
