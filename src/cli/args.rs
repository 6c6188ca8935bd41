use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use mcfetch::fetch::FetchKind;

/// Command-line arguments for the fetch driver.
#[derive(Debug, Parser)]
#[command(
    name = "mcfetch",
    about = "Check the status of nearby or saved soft-serve machines",
    version
)]
pub struct CliArgs {
    /// Which query to run.
    #[arg(value_enum, default_value_t = KindArg::Nearby)]
    pub kind: KindArg,

    /// Path to a markers.json dataset.
    #[arg(long, env = "MCFETCH_MARKERS")]
    pub markers: Option<PathBuf>,

    /// Latitude for nearby lookups.
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude for nearby lookups.
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Explicit configuration file path.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format for the final result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Print the resolved configuration before fetching.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Nearby,
    Saved,
}

impl From<KindArg> for FetchKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Nearby => Self::Nearby,
            KindArg::Saved => Self::Saved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

pub fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("mcfetch").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_to_a_nearby_plain_fetch() {
        let cli = parse(&[]);
        assert_eq!(cli.kind, KindArg::Nearby);
        assert_eq!(cli.output, OutputFormat::Plain);
        assert!(!cli.print_config);
    }

    #[test]
    fn parses_saved_kind_and_json_output() {
        let cli = parse(&["saved", "--output", "json"]);
        assert_eq!(cli.kind, KindArg::Saved);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn accepts_negative_coordinates() {
        let cli = parse(&["nearby", "--latitude", "-33.87", "--longitude", "151.2"]);
        assert_eq!(cli.latitude, Some(-33.87));
        assert_eq!(cli.longitude, Some(151.2));
    }
}
