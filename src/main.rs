mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use workflow::FetchWorkflow;

fn main() -> Result<()> {
    mcfetch::logging::initialize();
    let cli = parse_cli();
    let settings = settings::load(&cli)?;

    if cli.print_config {
        settings.print_summary();
    }

    let outcome = FetchWorkflow::new(settings, cli.kind.into()).run()?;

    match cli.output {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
