mod app;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use color_eyre::Result;
use smart_ambulance::cli::CliArgs;
use smart_ambulance::config::init_app_config;
use smart_ambulance::logging::{init_logging, LogTarget};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    // Without a terminal there is nothing to draw on
    let interactive = args.is_interactive() && is_terminal();
    init_logging(&LogTarget::for_run(interactive, &args.log_file))?;

    let config = init_app_config()?;
    let mut app = App::new(config)?;

    if args.check {
        return event::run_health_check(&app).await;
    }

    if !interactive {
        return event::run_headless(&mut app, args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
