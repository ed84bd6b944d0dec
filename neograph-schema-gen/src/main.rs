//! neograph-schema-gen: Generate an augmented GraphQL schema from a type graph
//!
//! Reads a JSON type graph document (types, fields, relationships and
//! `@filterable` arguments) and writes the generated SDL:
//! - Output types, sort and pagination options
//! - `Where` and aggregation filter inputs
//! - Relay connections
//! - Mutation inputs and responses
//! - Subscription events and filters (with `--subscriptions`)

use std::path::PathBuf;

use clap::Parser;
use neograph_schema::{AugmentOptions, TypeGraph, TypeGraphDefinition};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "neograph-schema-gen")]
#[command(about = "Generate an augmented GraphQL schema from an annotated type graph")]
struct Args {
    /// Type graph document (JSON)
    input: PathBuf,

    /// Output SDL file path; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate subscription types even if the document does not enable them
    #[arg(long)]
    subscriptions: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn options(&self, features: AugmentOptions) -> AugmentOptions {
        if self.subscriptions {
            features.with_subscriptions()
        } else {
            features
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let source = std::fs::read_to_string(&args.input)?;
    let definition = TypeGraphDefinition::from_json(&source)?;
    let options = args.options(definition.features);

    let graph = TypeGraph::new(definition.types)?;
    let schema = neograph_schema::augment(&graph, options)?;
    let sdl = schema.to_string();

    match &args.output {
        Some(path) => {
            std::fs::write(path, &sdl)?;
            info!(
                output = %path.display(),
                types = schema.len(),
                subscriptions = options.subscriptions,
                "schema written"
            );
        }
        None => print!("{}", sdl),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["neograph-schema-gen", "movies.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("movies.json"));
        assert!(args.output.is_none());
        assert!(!args.subscriptions);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_parse_output_and_flags() {
        let args = Args::try_parse_from([
            "neograph-schema-gen",
            "movies.json",
            "-o",
            "schema.graphql",
            "--subscriptions",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("schema.graphql")));
        assert!(args.subscriptions);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["neograph-schema-gen"]).is_err());
    }

    #[test]
    fn test_subscriptions_flag_overrides_features() {
        let forced = Args::try_parse_from(["neograph-schema-gen", "in.json", "--subscriptions"]).unwrap();
        assert!(forced.options(AugmentOptions::default()).subscriptions);

        let plain = Args::try_parse_from(["neograph-schema-gen", "in.json"]).unwrap();
        assert!(!plain.options(AugmentOptions::default()).subscriptions);
        assert!(plain.options(AugmentOptions::default().with_subscriptions()).subscriptions);
    }
}
