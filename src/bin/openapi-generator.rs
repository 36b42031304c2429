//! Print the OpenAPI document of the HTTP API as pretty JSON.

use anyhow::Context;
use tictactoe_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi()
        .to_pretty_json()
        .context("serializing OpenAPI document")?;
    println!("{doc}");
    Ok(())
}
