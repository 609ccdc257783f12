use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use grove_ledger::{Confirmation, InMemoryLedger, LedgerConfig, LedgerReader, LedgerWriter};
use grove_server::{GroveServer, ServerConfig};
use grove_types::{IntentId, Proof};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Demo(args) => cmd_demo(args, &cli.format),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address: {bind}"))?;
    }

    println!(
        "Grove server on {} (project: {})",
        config.bind_addr.to_string().bold(),
        config.ledger.project.cyan()
    );
    GroveServer::new(config)
        .context("failed to build server")?
        .serve()
        .await?;
    Ok(())
}

/// Everything the demo walk-through produced.
struct DemoReport {
    intent_id: IntentId,
    first: Confirmation,
    replay: Confirmation,
    proof: Proof,
    links_valid: bool,
}

fn run_demo(config: LedgerConfig) -> anyhow::Result<DemoReport> {
    config.validate()?;
    let ledger = InMemoryLedger::new(config);

    let intent_id = ledger.create_intent(Some("grove-cli".into()))?;
    let first = ledger.confirm_intent(&intent_id, Some("grove-cli".into()))?;
    let replay = ledger.confirm_intent(&intent_id, Some("grove-cli".into()))?;
    let proof = ledger.proof(&first.order_id)?;
    let links_valid = ledger.validate_links()?.is_valid();

    Ok(DemoReport {
        intent_id,
        first,
        replay,
        proof,
        links_valid,
    })
}

fn cmd_demo(args: DemoArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let report = run_demo(config.ledger)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.proof)?);
        }
        OutputFormat::Text => {
            println!(
                "{} Intent created: {}",
                "✓".green().bold(),
                report.intent_id.to_string().yellow()
            );
            println!(
                "{} Confirmed as planting {}",
                "✓".green().bold(),
                report.first.order_id.to_string().yellow()
            );
            let replay = if report.replay.order_id == report.first.order_id {
                "same planting".green()
            } else {
                "DIFFERENT planting".red()
            };
            println!("{} Retry returned {}", "✓".green().bold(), replay);
            println!();
            println!("Proof for {}", report.proof.planting_id.to_string().bold());
            println!("  Project:     {}", report.proof.project.cyan());
            println!("  Planted at:  {}", report.proof.planted_at);
            println!(
                "  Coordinates: {:.5}, {:.5}",
                report.proof.coordinates[0], report.proof.coordinates[1]
            );
            println!("  Message:     {}", report.proof.message);
            let links = if report.links_valid { "✓".green() } else { "✗".red() };
            println!("\nLedger links {links}");
        }
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let rendered = ServerConfig::default().to_toml_string()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} Wrote default configuration to {}",
                "✓".green(),
                path.display().to_string().bold()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
