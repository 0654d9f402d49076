// ShadeCom - Motorized window shade control client
mod cli;
mod core;
mod domain;
mod infrastructure;

use clap::Parser;
use cli::args::Args;
use cli::commands::execute_command;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match execute_command(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
