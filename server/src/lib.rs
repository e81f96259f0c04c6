//! # Todo Server
//!
//! A single-user todo list: a persistent list of text items with a completed
//! flag, served as a JSON API and a server-rendered page.
//!
//! ## Architecture
//!
//! ```text
//! browser ──► /api/todos[/:id] ──► api::todos ──┐
//!                                               ├──► Arc<dyn TodoStore> ──► SQLite file
//! browser ──► /  ───────────────► page::index ──┘
//! ```
//!
//! The store is opened once at startup and injected through [`AppState`];
//! handlers hold no state of their own between requests.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod page;
pub mod server;

pub use config::Config;
pub use server::{build_router, AppState, Application};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
