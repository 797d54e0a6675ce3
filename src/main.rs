// src/main.rs
use clap::Parser;

use filekeep::cli::{Args, Commands};
use filekeep::commands::{
    App, handle_classify, handle_config, handle_items, handle_list, handle_paths, handle_styles,
    handle_watch,
};
use filekeep::logging;
use filekeep::paths::{APP_NAME, AppPaths};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let paths = AppPaths::resolve(APP_NAME)?;
    let app = App::new(paths)?;
    let _log_handle = logging::init(&app.paths, &app.config.logging)?;

    let result = match args.command {
        Commands::Classify { paths } => handle_classify(&app, &paths),
        Commands::List {
            dir,
            recursive,
            all,
            summary,
        } => handle_list(&app, &dir, recursive, all, summary).await,
        Commands::Watch {
            dir,
            interval_ms,
            all,
            track,
        } => handle_watch(&app, &dir, interval_ms, all, track).await,
        Commands::Items { action } => handle_items(&app, action),
        Commands::Paths => handle_paths(&app),
        Commands::Styles { name } => handle_styles(&app, name.as_deref()),
        Commands::Config => handle_config(&app),
    };

    if let Err(e) = &result {
        log::error!("{:#}", e);
    }

    result
}
