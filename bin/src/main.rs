use anyhow::Result;

mod cli;
mod jsonio;

fn main() -> Result<()> {
    cli::run()
}
