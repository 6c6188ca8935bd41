mod args;
mod output;

pub use args::{CliArgs, KindArg, OutputFormat, parse_cli};
pub use output::{print_json, print_plain};
