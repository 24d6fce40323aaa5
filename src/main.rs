use anyhow::Result;
use clap::Parser;
use worktabs::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level takes precedence, then RUST_LOG, then config (applied below)
    worktabs::debug::init_log_bridge(cli.log_level);

    let config = cli::load_config(cli.config.as_deref())?;
    worktabs::debug::apply_config_level(config.log_level);
    log::info!("Starting worktabs");

    let stdout = std::io::stdout();
    let result = cli::run(cli.command, &config, &mut stdout.lock());
    log::logger().flush();
    result
}
