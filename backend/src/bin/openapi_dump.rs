//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use roster::ApiDoc;
use utoipa::OpenApi;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi().to_pretty_json()?;
    writeln!(io::stdout().lock(), "{json}")?;
    Ok(())
}
