//! Static HTML to backend framework project converter.
//!
//! Takes a folder of HTML templates plus an assets folder and lays them out
//! the way a target web framework (Laravel, Django, Flask, Symfony, …)
//! expects: views and partials under the framework's template directories,
//! asset references rewritten to the framework's helper syntax, and the
//! build manifests (`package.json`, `gulpfile.js`, `vite.config.js`, …)
//! needed to build the result.
//!
//! The public API is organised into these layers:
//!
//! - **[`profiles`]**: the closed registry of target framework profiles
//! - **[`classify`]**: page/partial classification and destination naming
//! - **[`rewrite`]**: pure text rewriting of links, assets and includes
//! - **[`emit`]**: the run orchestration that plans, checks and writes files
//! - **[`commands`]**: CLI-level glue between arguments and the emitter
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod emit;
pub mod error;
pub mod logging;
pub mod profiles;
pub mod rewrite;
