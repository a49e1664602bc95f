//! Debug console log (dbgcon)
//!
//! The log store behind a debugger's interactive console: program output,
//! structured values, collapsible groups, and the inputs and results of
//! evaluated expressions, kept in a bounded list that observers can watch.
//!
//! [`repl::ReplModel`] is the store. [`transcript`] replays recorded
//! sessions into it and [`export`] renders it as plain text.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod repl;
pub mod transcript;
