use clap::Parser;

mod cli;
mod commands;
mod exit_codes;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let exit_code = match cli.command {
        cli::Command::Monitor(args) => commands::monitor::execute(args).await,
        cli::Command::Convert(args) => commands::convert::execute(args),
        cli::Command::List(args) => commands::list::execute(args),
    };

    std::process::exit(exit_code);
}
