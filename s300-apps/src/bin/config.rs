use anyhow::Result;
use clap::Parser;
use schemars::schema_for;
use tracing::debug;

#[derive(Debug, Parser)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// Generate JSON schema for the node config file.
    Schema,
    /// Print the default node config as TOML.
    Default,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    debug!(?args);

    match args.command {
        Command::Schema => {
            let schema = schema_for!(s300_apps::NodeConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Default => {
            print!("{}", toml::to_string(&s300_apps::NodeConfig::default())?);
        }
    }
    Ok(())
}
