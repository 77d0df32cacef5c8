use clap::Parser;

mod cli;
mod commands;
mod config;
mod shell;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::AppConfig::resolve(&cli);
    init_logging(&config.log.level);
    commands::run(cli, config)
}

fn init_logging(level: &str) {
    let level = level.parse::<tracing::Level>().unwrap_or_else(|_| {
        eprintln!("unknown log level {level:?}, falling back to ERROR");
        tracing::Level::ERROR
    });
    tracing_subscriber::fmt().with_max_level(level).init();
}
