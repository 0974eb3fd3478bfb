use anyhow::Result;
use clap::Parser;

use lifemap::cli::handlers::{self, CommandContext, TimelineParams};
use lifemap::cli::{Cli, Commands};
use lifemap::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let overrides = cli.overrides();

    match cli.command {
        Commands::Init => handlers::handle_init(overrides),
        Commands::Timeline {
            category,
            status,
            kind,
            json,
        } => {
            let ctx = CommandContext::new(overrides)?;
            handlers::handle_timeline(
                &ctx,
                TimelineParams {
                    category,
                    status,
                    kind,
                    json,
                },
            )
        }
        Commands::Categories { json } => {
            let ctx = CommandContext::new(overrides)?;
            handlers::handle_categories(&ctx, json)
        }
        Commands::Serve { port } => {
            let ctx = CommandContext::new(overrides)?;
            handlers::handle_serve(ctx, port)
        }
        Commands::Doctor => handlers::handle_doctor(overrides),
    }
}
