use anyhow::Result;
use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing_subscriber::{fmt, EnvFilter};

use intuition_query::IntuitionClient;

mod commands;
mod config;
mod output;

const EXAMPLES: &str = "\
Examples:
    intuition --search \"Uniswap\"
    intuition --atom-id 12345
    intuition --address 0x1234abcd...
    intuition --account 0x1234abcd5678ef901234abcd5678ef901234abcd
    intuition --triples-about 12345
    intuition --trust-score 12345 --format text
    intuition --search \"Uniswap\" --testnet";

#[derive(Parser)]
#[command(
    name = "intuition",
    version,
    about = "Query the Intuition knowledge graph and read its stakes as trust signals",
    after_help = EXAMPLES,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "json")]
    format: output::OutputFormat,

    /// Maximum number of results
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    #[command(flatten)]
    network: config::NetworkArgs,

    #[command(flatten)]
    query: commands::QueryArgs,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(commands::Commands::Mcp) = &cli.command {
        return commands::mcp::run(&cli.network);
    }

    if cli.query.is_empty() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "one of --search, --atom-id, --address, --account, --triples-about, \
                 --positions or --trust-score is required",
            )
            .exit();
    }

    let client = IntuitionClient::new(cli.network.client_config())?;
    commands::dispatch(&cli.query, &client, cli.limit, cli.format)
}
