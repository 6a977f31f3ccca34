//! Command-line argument definitions

use std::collections::BTreeMap;

use clap::Args;

/// Parse a `key=value` plugin input
pub fn parse_input(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing input name in '{}'", raw));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Plugin inputs shared by the decision commands
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Plugin input as key=value (repeatable)
    #[arg(long = "input", value_name = "KEY=VALUE", value_parser = parse_input)]
    pub inputs: Vec<(String, String)>,
}

impl InputArgs {
    /// Later occurrences of a key win
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.inputs.iter().cloned().collect()
    }
}

/// Arguments for the sanitize command
///
/// The sanitizer declares no plugin inputs, so `--input` is not accepted.
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Host file record (JSON); `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub file: String,
}

/// Arguments for the order command
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Host file record (JSON); `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub file: String,

    #[command(flatten)]
    pub inputs: InputArgs,
}

/// Arguments for the check-size command
#[derive(Args, Debug)]
pub struct CheckSizeArgs {
    /// File record of the processed file
    #[arg(long, requires = "original", conflicts_with_all = ["new_size", "original_size"])]
    pub file: Option<String>,

    /// File record of the original library file
    #[arg(long, requires = "file")]
    pub original: Option<String>,

    /// Size of the processed file in MB
    #[arg(long, requires = "original_size")]
    pub new_size: Option<f64>,

    /// Size of the original file in MB
    #[arg(long, requires = "new_size")]
    pub original_size: Option<f64>,

    #[command(flatten)]
    pub inputs: InputArgs,
}

/// Arguments for the details command
#[derive(Args, Debug)]
pub struct DetailsArgs {
    /// Plugin id, e.g. order_streams_and_transcode
    pub plugin: String,
}
