mod cli;
mod platform;

use std::io::{self, Read};

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;

use platform::config::{load_config, AppConfig};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let file_config = load_config(args.config.as_deref()).context("loading configuration")?;
    let config = AppConfig::resolve(file_config, &args).context("resolving configuration")?;

    if args.print {
        engine_logging::initialize(LogDestination::Terminal, LevelFilter::Warn);
        let text = match args.text.clone() {
            Some(text) => text,
            None => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading text from stdin")?;
                buf
            }
        };
        let mut stdout = io::stdout().lock();
        return platform::print::run(&config, &text, args.ids, &mut stdout);
    }

    engine_logging::initialize(LogDestination::File(&config.log_file), LevelFilter::Info);
    engine_info!(
        "Starting tokviz backend={} log_file={:?}",
        config.backend,
        config.log_file
    );
    platform::run_app(config)
}
