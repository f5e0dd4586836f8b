//! Generate Go model structs from the `definitions` of a Swagger document.
//!
//! The pipeline is a single synchronous pass:
//! load ([`loader`]) → map ([`mapper`]) → render ([`render`]) →
//! format ([`gofmt`]) → write ([`output`]). The first error aborts the run.
pub mod cli;
pub mod config;
pub mod error;
pub mod gofmt;
pub mod ir;
pub mod loader;
pub mod mapper;
pub mod output;
pub mod path_de;
pub mod render;
pub mod swagger;

pub use config::{Config, OutputMode, Source};
pub use error::{Error, Result};

use tracing::info;

/// Run the whole pipeline for one configuration.
pub fn run(config: &Config) -> Result<()> {
    info!(source = %config.source, "loading spec");
    let spec = loader::fetch_spec(&config.source)?;
    let source = generate(&spec)?;
    output::write_output(source.as_bytes(), &config.output)
}

/// Map, render and format a decoded spec into `models.go` source text.
pub fn generate(spec: &swagger::Spec) -> Result<String> {
    let model = mapper::ModelsMapper::new(&spec.definitions).template_model();
    let rendered = render::render(&model)?;
    gofmt::format_source(&rendered)
}
