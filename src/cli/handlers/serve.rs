use anyhow::Result;

use crate::web::run_server;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, port: u16) -> Result<()> {
    println!("Serving timeline on http://localhost:{}", port);

    tokio::runtime::Runtime::new()?.block_on(async { run_server(ctx.ingest, port).await })?;
    Ok(())
}
