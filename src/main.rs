use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};

use emx_export::{notes_path, Cli, Command, ResolveContext};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let ctx = ResolveContext::new(notes_path(cli.home.as_deref()));
    let vault = cli.vault.as_deref();
    let caps = cli.caps.as_deref();

    let result = match cli.command {
        Command::Export { note_name, output, flags } => {
            cmd::export::run(&ctx, vault, caps, note_name, output, flags).await
        }
        Command::Embeds { note_name, flags } => {
            cmd::embeds::run(&ctx, vault, caps, note_name, flags, cli.json).await
        }
        Command::Index { note_name } => cmd::index::run(&ctx, vault, caps, note_name, cli.json).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

mod cmd {
    pub mod embeds;
    pub mod export;
    pub mod index;
    pub mod resolve;
}
