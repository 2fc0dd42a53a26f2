//! Main application entry point (native).
//!
//! Usage: `scribbly [config.json] [script.json]`. Without a script the
//! built-in demo session runs.

use scribbly_app::{App, AppResult, ShortcutRegistry};
use std::path::PathBuf;

fn main() {
    env_logger::init();
    log::info!("Starting Scribbly");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let config = App::load_config(args.next().as_deref())?;
    let script = match args.next() {
        Some(path) => App::load_script(&path)?,
        None => {
            ShortcutRegistry::print_all();
            App::demo_script()
        }
    };

    let mut app = App::new(&config)?;
    app.run(&script)
}
