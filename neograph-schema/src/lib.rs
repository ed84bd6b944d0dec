//! neograph-schema
//!
//! Directive-driven GraphQL schema augmentation for relationship graphs.
//!
//! Takes a type graph whose fields carry `@filterable` capability data and
//! produces the full generated schema: output types, `Where` filters,
//! aggregation filters, Relay connections, mutation inputs and subscription
//! events.
//!
//! Pipeline:
//! - [`ir`]: the validated input type graph
//! - [`capability`]: effective `byValue`/`byAggregate` per field
//! - [`generate`]: synthesizers, one [`generate::Fragment`] each
//! - [`assembler`]: merge, prune and check fragments
//! - [`printer`]: SDL output via `Display`
//!
//! ```no_run
//! use neograph_schema::{AugmentOptions, TypeGraph, TypeGraphDefinition};
//!
//! let definition = TypeGraphDefinition::from_json(r#"{"types": []}"#)?;
//! let graph = TypeGraph::new(definition.types)?;
//! let schema = neograph_schema::augment(&graph, AugmentOptions::default())?;
//! println!("{}", schema);
//! # Ok::<(), neograph_schema::AugmentError>(())
//! ```

#![deny(missing_docs)]

pub mod assembler;
pub mod capability;
mod error;
pub mod generate;
pub mod ir;
pub mod naming;
pub mod options;
mod printer;
pub mod schema;

#[cfg(test)]
mod tests;

pub use capability::{CapabilityMap, FilterCapability};
pub use error::AugmentError;
pub use generate::SchemaAugmenter;
pub use ir::{TypeGraph, TypeGraphDefinition};
pub use options::AugmentOptions;
pub use schema::GeneratedSchema;

/// Augment `graph` with the given options
///
/// Shorthand for `SchemaAugmenter::new(options).augment(graph)`.
pub fn augment(graph: &TypeGraph, options: AugmentOptions) -> Result<GeneratedSchema, AugmentError> {
    SchemaAugmenter::new(options).augment(graph)
}
