pub mod sync;

use clap::Parser;

pub fn run() -> eyre::Result<()> {
    dotenv::dotenv().ok();

    let command = sync::Command::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(command.execute())
}
