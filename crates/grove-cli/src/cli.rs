use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "grove",
    about = "Grove: planting intents, confirmations, and proofs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the Grove HTTP server
    Serve(ServeArgs),
    /// Run create → confirm → proof against an in-process ledger
    Demo(DemoArgs),
    /// Print or write the default configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Overrides `bind_addr` from the configuration
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Args)]
pub struct DemoArgs {
    /// TOML configuration file supplying the ledger section
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["grove", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.config.is_none());
            assert!(args.bind.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "grove", "serve", "--config", "grove.toml", "--bind", "0.0.0.0:8080",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("grove.toml")));
            assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_demo() {
        let cli = Cli::try_parse_from(["grove", "demo"]).unwrap();
        assert!(matches!(cli.command, Command::Demo(_)));
    }

    #[test]
    fn parse_config_output() {
        let cli = Cli::try_parse_from(["grove", "config", "-o", "out.toml"]).unwrap();
        if let Command::Config(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("out.toml")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["grove", "--verbose", "demo"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["grove", "--format", "json", "demo"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["grove"]).is_err());
    }
}
