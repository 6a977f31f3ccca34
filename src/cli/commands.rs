//! Command implementations

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::app::AppContainer;
use crate::cli::args::{CheckSizeArgs, DetailsArgs, OrderArgs, SanitizeArgs};
use crate::domain::plugins::{details as plugin_details, PluginId};

/// Execute the sanitize command
pub fn sanitize(container: &dyn AppContainer, args: SanitizeArgs) -> Result<()> {
    info!(file = %args.file, "Starting sanitize decision");

    let result = container
        .sanitize_interactor()
        .execute(&args.file)
        .with_context(|| format!("Sanitize failed for '{}'", args.file))?;

    print_json(&result)
}

/// Execute the order command
pub fn order(container: &dyn AppContainer, args: OrderArgs) -> Result<()> {
    info!(file = %args.file, "Starting order decision");

    let result = container
        .order_interactor()
        .execute(&args.file, &args.inputs.to_map())
        .with_context(|| format!("Order failed for '{}'", args.file))?;

    print_json(&result)
}

/// Execute the check-size command
pub fn check_size(container: &dyn AppContainer, args: CheckSizeArgs) -> Result<()> {
    let inputs = args.inputs.to_map();
    let interactor = container.size_check_interactor();

    let result = match (&args.file, &args.original, args.new_size, args.original_size) {
        (Some(file), Some(original), _, _) => interactor
            .execute(file, original, &inputs)
            .with_context(|| format!("Size check failed for '{}'", file))?,
        (_, _, Some(new_size), Some(original_size)) => interactor
            .check_sizes(new_size, original_size, &inputs)
            .context("Size check failed")?,
        _ => bail!("Provide either --file and --original, or --new-size and --original-size"),
    };

    print_json(&result)
}

/// Execute the details command
pub fn details(args: DetailsArgs) -> Result<()> {
    let plugin = PluginId::parse(&args.plugin)?;
    print_json(&plugin_details(plugin))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
