//! Filter capability resolution
//!
//! Turns the `@filterable` directive data on each field into the effective
//! `{ by_value, by_aggregate }` pair every synthesizer reads. Resolution is
//! total: it never fails and unknown directive input has already been dropped
//! by the decoder.

use std::collections::HashMap;

use tracing::debug;

use crate::ir::{FieldKind, FieldNode, TypeGraph, TypeKind, TypeNode};

/// Effective filter capability of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCapability {
    /// Value filters (`_IN`, `_CONTAINS`, quantifiers, ...) are generated
    pub by_value: bool,
    /// Aggregation filters are generated
    pub by_aggregate: bool,
}

impl Default for FilterCapability {
    fn default() -> Self {
        Self {
            by_value: DEFAULT_BY_VALUE,
            by_aggregate: DEFAULT_BY_AGGREGATE,
        }
    }
}

/// `byValue` without a directive, or with a bare one
const DEFAULT_BY_VALUE: bool = true;

/// `byAggregate` without a directive, or with a bare one
const DEFAULT_BY_AGGREGATE: bool = false;

/// A flag a directive with arguments leaves out
const OMITTED_FLAG: bool = true;

/// Resolve the capability of `field`, declared on `owner`
pub fn resolve(graph: &TypeGraph, owner: &TypeNode, field: &FieldNode) -> FilterCapability {
    let mut capability = match field.filterable {
        None => FilterCapability::default(),
        Some(directive) if directive.is_bare() => FilterCapability::default(),
        Some(directive) => FilterCapability {
            by_value: directive.by_value.unwrap_or(OMITTED_FLAG),
            by_aggregate: directive.by_aggregate.unwrap_or(OMITTED_FLAG),
        },
    };

    if capability.by_aggregate && aggregates_over_abstract(graph, owner, field) {
        debug!(
            type_name = %owner.name,
            field = %field.name,
            "byAggregate downgraded: aggregation is undefined over interfaces and unions"
        );
        capability.by_aggregate = false;
    }

    capability
}

fn aggregates_over_abstract(graph: &TypeGraph, owner: &TypeNode, field: &FieldNode) -> bool {
    match &field.kind {
        FieldKind::Scalar(_) => owner.is_abstract(),
        FieldKind::Relationship(edge) => graph
            .get(&edge.target)
            .is_none_or(|target| target.kind != TypeKind::Object),
    }
}

/// Resolved capabilities of every field in a graph
#[derive(Debug, Clone, Default)]
pub struct CapabilityMap {
    entries: HashMap<(String, String), FilterCapability>,
}

impl CapabilityMap {
    /// Capability of `type_name.field_name`; unknown fields get the defaults
    pub fn get(&self, type_name: &str, field_name: &str) -> FilterCapability {
        self.entries
            .get(&(type_name.to_string(), field_name.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Capability of a field of `owner`
    pub fn of(&self, owner: &TypeNode, field: &FieldNode) -> FilterCapability {
        self.get(&owner.name, &field.name)
    }

    /// Number of resolved fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve every field of every type once
pub fn resolve_all(graph: &TypeGraph) -> CapabilityMap {
    let mut entries = HashMap::new();
    for node in graph.types() {
        for field in &node.fields {
            entries.insert(
                (node.name.clone(), field.name.clone()),
                resolve(graph, node, field),
            );
        }
    }
    CapabilityMap { entries }
}
