//! Schema synthesis
//!
//! Each synthesizer reads the type graph and the resolved capabilities and
//! returns a [`Fragment`]: the type definitions and root fields it
//! contributes. Synthesizers share no mutable state; the assembler merges
//! their fragments afterwards.
//!
//! - `object`: output types, options/sort inputs, query root fields
//! - `where_input`: `<Type>Where` filters
//! - `aggregation`: aggregation filter inputs and aggregation selections
//! - `connection`: Relay connections and connection filters
//! - `mutation`: create/update/delete inputs and mutation root fields
//! - `subscription`: subscription filters, events and root fields

pub mod aggregation;
pub mod connection;
pub mod mutation;
pub mod object;
pub mod subscription;
pub mod where_input;

use std::collections::HashSet;

use tracing::{debug, info, instrument};

use crate::assembler;
use crate::capability::{self, CapabilityMap};
use crate::error::AugmentError;
use crate::ir::{ScalarField, ScalarType, TypeGraph, TypeKind};
use crate::options::AugmentOptions;
use crate::schema::{
    FieldDefinition, GeneratedSchema, InputObjectType, ObjectType, ScalarDefinition,
    TypeDefinition, TypeRef,
};

/// Reason attached to every negated filter (`_NOT`, `_NOT_IN`, ...)
pub const NEGATION_DEPRECATION: &str =
    "Negation filters will be deprecated, use the NOT operator to achieve the same behavior";

/// Reason attached to legacy string aggregation filters without `_LENGTH`
pub const LENGTH_DEPRECATION: &str =
    "Please use the explicit _LENGTH version for string aggregation.";

/// Reason attached to aggregation filters without an aggregating function
pub const NON_AGGREGATING_DEPRECATION: &str =
    "Aggregation filters that are not relying on an aggregating function will be deprecated.";

/// Root operation a generated field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RootOperation {
    /// `Query`
    Query,
    /// `Mutation`
    Mutation,
    /// `Subscription`
    Subscription,
}

impl RootOperation {
    /// Name of the root type
    pub fn type_name(&self) -> &'static str {
        match self {
            RootOperation::Query => "Query",
            RootOperation::Mutation => "Mutation",
            RootOperation::Subscription => "Subscription",
        }
    }
}

/// A field to be placed on a root type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootField {
    /// Target root type
    pub operation: RootOperation,
    /// The field
    pub field: FieldDefinition,
}

/// What one synthesizer contributes to the schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Type definitions, possibly shared with other fragments
    pub types: Vec<TypeDefinition>,
    /// Root fields
    pub root_fields: Vec<RootField>,
}

impl Fragment {
    /// An empty fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type definition
    pub fn push(&mut self, definition: impl Into<TypeDefinition>) {
        self.types.push(definition.into());
    }

    /// Add a root field
    pub fn push_root(&mut self, operation: RootOperation, field: FieldDefinition) {
        self.root_fields.push(RootField { operation, field });
    }

    /// Append another fragment
    pub fn extend(&mut self, other: Fragment) {
        self.types.extend(other.types);
        self.root_fields.extend(other.root_fields);
    }

    /// Look up a contributed definition by name
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Look up a contributed input object
    pub fn input_object(&self, name: &str) -> Option<&InputObjectType> {
        match self.get(name) {
            Some(TypeDefinition::InputObject(t)) => Some(t),
            _ => None,
        }
    }

    /// Look up a contributed object type
    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        match self.get(name) {
            Some(TypeDefinition::Object(t)) => Some(t),
            _ => None,
        }
    }

    /// Root fields contributed to `operation`
    pub fn root_fields(&self, operation: RootOperation) -> impl Iterator<Item = &FieldDefinition> {
        self.root_fields
            .iter()
            .filter(move |r| r.operation == operation)
            .map(|r| &r.field)
    }
}

macro_rules! impl_into_definition {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<crate::schema::$ty> for TypeDefinition {
                fn from(t: crate::schema::$ty) -> Self {
                    TypeDefinition::$variant(t)
                }
            }
        )*
    };
}

impl_into_definition!(
    ObjectType => Object,
    InterfaceType => Interface,
    InputObjectType => InputObject,
    EnumType => Enum,
    UnionType => Union,
    ScalarDefinition => Scalar,
);

/// Read-only inputs shared by every synthesizer during one run
#[derive(Debug, Clone, Copy)]
pub struct SynthesisContext<'a> {
    /// The type graph
    pub graph: &'a TypeGraph,
    /// Resolved filter capabilities
    pub capabilities: &'a CapabilityMap,
    /// Generation options
    pub options: &'a AugmentOptions,
}

/// Output type of a declared scalar field
pub(crate) fn scalar_type_ref(field: &ScalarField) -> TypeRef {
    let mut ty = TypeRef::named(field.scalar.name());
    if field.list {
        ty = ty.non_null().list();
    }
    if field.required {
        ty = ty.non_null();
    }
    ty
}

/// `scalar` definition for custom scalars, `None` for built-ins
pub(crate) fn custom_scalar(scalar: ScalarType) -> Option<ScalarDefinition> {
    let description = match scalar {
        ScalarType::BigInt => {
            "A BigInt value up to 64 bits in size, which can be a number or a string if used inline, or a string only if used as a variable. Always returned as a string."
        }
        ScalarType::DateTime => "A date and time, represented as an ISO-8601 string",
        _ => return None,
    };
    Some(ScalarDefinition {
        name: scalar.name().to_string(),
        description: Some(description.to_string()),
    })
}

/// Runs every synthesizer over a type graph and assembles the result
#[derive(Debug, Clone, Default)]
pub struct SchemaAugmenter {
    options: AugmentOptions,
}

impl SchemaAugmenter {
    /// An augmenter with the given options
    pub fn new(options: AugmentOptions) -> Self {
        Self { options }
    }

    /// Produce the augmented schema for `graph`
    #[instrument(skip_all, fields(types = graph.types().count(), subscriptions = self.options.subscriptions))]
    pub fn augment(&self, graph: &TypeGraph) -> Result<GeneratedSchema, AugmentError> {
        let capabilities = capability::resolve_all(graph);
        let ctx = SynthesisContext {
            graph,
            capabilities: &capabilities,
            options: &self.options,
        };

        let fragments = synthesize(&ctx)?;
        let schema = assembler::assemble(graph, fragments)?;

        info!(generated_types = schema.len(), "schema augmented");
        Ok(schema)
    }
}

/// Run every synthesizer and collect their fragments
///
/// Fails with [`AugmentError::ReservedTypeName`] when a generated type would
/// take the name of a declared type other than the one it describes.
pub fn synthesize(ctx: &SynthesisContext<'_>) -> Result<Vec<Fragment>, AugmentError> {
    let declared: HashSet<&str> = ctx.graph.types().map(|t| t.name.as_str()).collect();
    let mut fragments = Vec::new();

    for node in ctx.graph.types() {
        debug!(type_name = %node.name, kind = ?node.kind, "synthesizing");

        let mut generated = vec![where_input::synthesize_where(ctx, node)?];
        generated.push(mutation::synthesize_mutations(ctx, node)?);

        if node.kind == TypeKind::Object {
            generated.push(connection::synthesize_connections(ctx, node)?);
            generated.push(aggregation::synthesize_aggregate_selections(ctx, node)?);
            for (field, edge) in node.relationship_fields() {
                if let Some(fragment) =
                    aggregation::synthesize_aggregate_inputs(ctx, node, field, edge)?
                {
                    generated.push(fragment);
                }
            }
        }

        if ctx.options.subscriptions {
            generated.push(subscription::synthesize_subscriptions(ctx, node)?);
        }

        let output = object::synthesize_object(ctx, node)?;
        check_declared_names(&declared, &output, Some(&node.name))?;
        fragments.push(output);
        for fragment in generated {
            check_declared_names(&declared, &fragment, None)?;
            fragments.push(fragment);
        }
    }

    Ok(fragments)
}

/// Only the output type of a declared type may carry its name
fn check_declared_names(
    declared: &HashSet<&str>,
    fragment: &Fragment,
    own: Option<&str>,
) -> Result<(), AugmentError> {
    for definition in &fragment.types {
        let name = definition.name();
        if declared.contains(name) && own != Some(name) {
            return Err(AugmentError::ReservedTypeName {
                type_name: name.to_string(),
                reason: "collides with a type generated from another declaration".to_string(),
            });
        }
    }
    Ok(())
}

/// Run `f` against a context built from `graph` with the given options
#[cfg(test)]
pub(crate) fn with_context<R>(
    graph: &TypeGraph,
    options: AugmentOptions,
    f: impl FnOnce(&SynthesisContext<'_>) -> R,
) -> R {
    let capabilities = capability::resolve_all(graph);
    let ctx = SynthesisContext {
        graph,
        capabilities: &capabilities,
        options: &options,
    };
    f(&ctx)
}
