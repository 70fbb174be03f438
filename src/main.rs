use punchlist::commands::Cli;
use punchlist::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    if let Err(err) = Cli::menu() {
        if is_debug_mode() {
            tracing::error!("{:#}", err);
        } else {
            eprintln!("{:#}", err);
        }
        std::process::exit(1);
    }
}

/// Installs a subscriber only in debug mode; otherwise messages go straight to the console.
fn init_tracing() {
    if !is_debug_mode() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("punchlist=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
