//! Schema assembly
//!
//! Merges synthesizer fragments into one [`GeneratedSchema`]:
//! 1. Definitions are merged by name; identical duplicates collapse
//! 2. Root fields are gathered into `Query`, `Mutation` and `Subscription`
//! 3. Aggregation filters over interface or union targets are dropped
//! 4. Empty omit-when-empty inputs are dropped, cascading to a fixed point
//! 5. Every reference is checked against the final type map

use std::collections::{BTreeMap, BTreeSet, HashSet};

use once_cell::sync::Lazy;
use tracing::{debug, instrument};

use crate::error::AugmentError;
use crate::generate::{Fragment, RootOperation};
use crate::ir::TypeGraph;
use crate::naming::RelationshipNames;
use crate::schema::{FieldDefinition, GeneratedSchema, ObjectType, TypeDefinition};

/// Scalars every GraphQL schema has without declaring them
static BUILTIN_SCALARS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["ID", "String", "Int", "Float", "Boolean"].into_iter().collect());

type TypeMap = BTreeMap<String, TypeDefinition>;

/// Merge `fragments` into the final schema for `graph`
#[instrument(skip_all, fields(fragments = fragments.len()))]
pub fn assemble(graph: &TypeGraph, fragments: Vec<Fragment>) -> Result<GeneratedSchema, AugmentError> {
    let mut types = TypeMap::new();
    let mut roots: BTreeMap<RootOperation, Vec<FieldDefinition>> = BTreeMap::new();

    for fragment in fragments {
        for definition in fragment.types {
            merge_definition(&mut types, definition)?;
        }
        for root in fragment.root_fields {
            merge_root_field(roots.entry(root.operation).or_default(), root.operation, root.field)?;
        }
    }

    for (operation, fields) in roots {
        if fields.is_empty() {
            continue;
        }
        let mut object = ObjectType::new(operation.type_name());
        object.fields = fields;
        merge_definition(&mut types, TypeDefinition::Object(object))?;
    }

    exclude_abstract_aggregations(graph, &mut types);
    prune_empty_inputs(&mut types);

    for definition in types.values_mut() {
        definition.sort_members();
    }
    check_references(&types)?;

    Ok(GeneratedSchema::from_types(types))
}

fn merge_definition(types: &mut TypeMap, mut definition: TypeDefinition) -> Result<(), AugmentError> {
    definition.sort_members();
    match types.get(definition.name()) {
        None => {
            types.insert(definition.name().to_string(), definition);
            Ok(())
        }
        Some(existing) if *existing == definition => Ok(()),
        Some(_) => Err(AugmentError::ConflictingDefinition(definition.name().to_string())),
    }
}

fn merge_root_field(
    fields: &mut Vec<FieldDefinition>,
    operation: RootOperation,
    mut field: FieldDefinition,
) -> Result<(), AugmentError> {
    field.arguments.sort_by(|a, b| a.name.cmp(&b.name));
    match fields.iter().find(|f| f.name == field.name) {
        None => {
            fields.push(field);
            Ok(())
        }
        Some(existing) if *existing == field => Ok(()),
        Some(_) => Err(AugmentError::ConflictingDefinition(format!(
            "{}.{}",
            operation.type_name(),
            field.name
        ))),
    }
}

/// Drop aggregation filters of relationships whose target is abstract
///
/// Synthesizers never produce them for such relationships; this also holds
/// when one was produced speculatively.
fn exclude_abstract_aggregations(graph: &TypeGraph, types: &mut TypeMap) {
    let mut removed = BTreeSet::new();

    for node in graph.objects() {
        for (field, edge) in node.relationship_fields() {
            let abstract_target = graph.get(&edge.target).is_none_or(|t| t.is_abstract());
            if !abstract_target {
                continue;
            }
            let names = RelationshipNames::new(&node.name, &field.name);
            for name in [names.aggregate_input(), names.node_aggregation_where_input()] {
                if types.remove(&name).is_some() {
                    debug!(type_name = %name, "dropped aggregation filter over abstract target");
                    removed.insert(name);
                }
            }
        }
    }

    if !removed.is_empty() {
        remove_references(types, &removed);
    }
}

/// Drop omit-when-empty inputs holding nothing but combinators, then
/// everything that pointed at them, until nothing changes
fn prune_empty_inputs(types: &mut TypeMap) {
    loop {
        let empty: BTreeSet<String> = types
            .values()
            .filter_map(|definition| match definition {
                TypeDefinition::InputObject(input)
                    if input.omit_when_empty && input.has_only_combinators() =>
                {
                    Some(input.name.clone())
                }
                _ => None,
            })
            .collect();

        if empty.is_empty() {
            return;
        }

        for name in &empty {
            debug!(type_name = %name, "omitting empty input");
            types.remove(name);
        }
        remove_references(types, &empty);
    }
}

/// Remove fields, arguments and union members typed with a removed type
fn remove_references(types: &mut TypeMap, removed: &BTreeSet<String>) {
    let gone = |name: &str| removed.contains(name);

    for definition in types.values_mut() {
        match definition {
            TypeDefinition::InputObject(input) => {
                input.fields.retain(|f| !gone(f.ty.base_name()));
            }
            TypeDefinition::Object(ObjectType { fields, .. })
            | TypeDefinition::Interface(crate::schema::InterfaceType { fields, .. }) => {
                fields.retain(|f| !gone(f.ty.base_name()));
                for field in fields {
                    field.arguments.retain(|a| !gone(a.ty.base_name()));
                }
            }
            TypeDefinition::Union(union) => union.members.retain(|m| !gone(m)),
            TypeDefinition::Enum(_) | TypeDefinition::Scalar(_) => {}
        }
    }
}

fn check_references(types: &TypeMap) -> Result<(), AugmentError> {
    for definition in types.values() {
        for name in definition.referenced_types() {
            if !types.contains_key(name) && !BUILTIN_SCALARS.contains(name) {
                return Err(AugmentError::DanglingReference {
                    type_name: name.to_string(),
                    referenced_by: definition.name().to_string(),
                });
            }
        }
    }
    Ok(())
}
