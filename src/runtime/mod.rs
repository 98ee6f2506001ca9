//! Console transport: reads inbound messages from stdin, dispatches them to a
//! pool of handler threads and prints replies on stdout. Logs go to stderr.

use std::sync::Arc;

use crate::commands::CommandHandler;
use crate::store::PlaylistStore;

mod event_loop;
mod parse;
mod startup;

pub use event_loop::{format_reply, serve};
pub use parse::{ParseError, USAGE, parse_line};
pub use startup::{init_tracing, load_settings};


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let settings = load_settings();

    let store = PlaylistStore::open_shared(&settings.store)?;
    let workers = settings.runtime.workers;
    tracing::info!(
        store = %store.path().display(),
        workers,
        operator = settings.admin.operator_id,
        "squonk ready, reading commands from stdin"
    );
    if settings.admin.operator_id == 0 {
        tracing::warn!("admin.operator_id is not set; privileged commands are disabled");
    }

    let handler = Arc::new(CommandHandler::new(settings, store));
    let handled = serve(handler, workers, std::io::stdin().lock(), std::io::stdout())?;

    tracing::info!(handled, "input closed, shutting down");
    Ok(())
}
