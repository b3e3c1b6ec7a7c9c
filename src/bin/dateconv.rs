//! Print a `YYYY-MM-DD` date as an RFC 1123 timestamp for a post's `date:` line

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "dateconv")]
#[command(version)]
#[command(about = "Convert YYYY-MM-DD to an RFC 1123 timestamp", long_about = None)]
struct Cli {
    /// Date to convert, e.g. 2006-01-02
    date: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stamp = deftly::helpers::date_to_rfc1123(&cli.date)
        .with_context(|| format!("invalid date {:?}, expected YYYY-MM-DD", cli.date))?;
    println!("{}", stamp);
    Ok(())
}
