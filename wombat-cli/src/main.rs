//! Wombat CLI
//!
//! Compiles CSS selectors to XPath 1.0 expressions on the command line,
//! one expression per line, for piping into whatever evaluates the XPath.

use anyhow::Result;
use clap::Parser;
use wombat_css::CssSelector;

/// Compile CSS selectors to XPath 1.0 expressions.
#[derive(Parser)]
#[command(name = "wombat", version, about)]
struct Cli {
    /// Selectors to compile, one XPath per line of output
    #[arg(required = true)]
    selectors: Vec<String>,

    /// Emit one JSON object ({"css": ..., "xpath": ...}) per selector
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    for selector in &cli.selectors {
        let compiled = CssSelector::parse(selector)?;
        if cli.json {
            println!("{}", serde_json::to_string(&compiled)?);
        } else {
            println!("{compiled}");
        }
    }

    Ok(())
}
