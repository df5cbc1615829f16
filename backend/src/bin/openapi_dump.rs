//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use clap::Parser;
use starter::doc::ApiDoc;
use utoipa::OpenApi;

/// Command-line options for the dump.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the OpenAPI document as JSON")]
struct Cli {
    /// Indent the output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let json = if cli.pretty {
        doc.to_pretty_json()
    } else {
        doc.to_json()
    }
    .map_err(io::Error::other)?;
    writeln!(io::stdout().lock(), "{json}")
}
