//! Aggregation filters and aggregation selections
//!
//! Filters: `<Source><Rel>AggregateInput` and
//! `<Source><Rel>NodeAggregationWhereInput`, generated only for relationships
//! with `byAggregate` whose target is a concrete object type.
//!
//! Selections: `<Type>AggregateSelection` for every object type and
//! `<Source><Target><Rel>AggregationSelection` for every relationship with a
//! concrete target, built from the shared `<Scalar>AggregateSelection*`
//! objects.

use tracing::debug;

use crate::error::AugmentError;
use crate::generate::{
    Fragment, LENGTH_DEPRECATION, NON_AGGREGATING_DEPRECATION, SynthesisContext,
};
use crate::ir::{FieldNode, RelationshipEdge, RelationshipTarget, ScalarField, ScalarType, TypeNode};
use crate::naming::{self, RelationshipNames};
use crate::schema::{FieldDefinition, InputObjectType, InputValue, ObjectType, TypeRef};

/// Comparison suffixes of every aggregation filter
const OPERATORS: [&str; 5] = ["EQUAL", "GT", "GTE", "LT", "LTE"];

/// Comparisons on the relationship count
const COUNT_FILTERS: [&str; 5] = ["count", "count_GT", "count_GTE", "count_LT", "count_LTE"];

/// Build the aggregation filter inputs of `source.field`
///
/// Returns `None` when the relationship has no `byAggregate` capability or
/// its target is an interface or a union.
pub fn synthesize_aggregate_inputs(
    ctx: &SynthesisContext<'_>,
    source: &TypeNode,
    field: &FieldNode,
    edge: &RelationshipEdge,
) -> Result<Option<Fragment>, AugmentError> {
    if !ctx.capabilities.of(source, field).by_aggregate {
        return Ok(None);
    }

    let target = match ctx.graph.target(edge)? {
        RelationshipTarget::Concrete(target) => target,
        RelationshipTarget::Interface { interface: abstract_target, .. }
        | RelationshipTarget::Union { union: abstract_target, .. } => {
            debug!(
                type_name = %source.name,
                field = %field.name,
                target = %abstract_target.name,
                "no aggregation filters over abstract target"
            );
            return Ok(None);
        }
    };

    let names = RelationshipNames::new(&source.name, &field.name);
    let mut fragment = Fragment::new();

    let mut aggregate = InputObjectType::new(names.aggregate_input()).with_combinators();
    for name in COUNT_FILTERS {
        aggregate = aggregate.field(InputValue::new(name, TypeRef::named("Int")));
    }

    let node_fields: Vec<InputValue> = aggregatable_scalars(target)
        .filter(|(f, _)| ctx.capabilities.of(target, f).by_aggregate)
        .flat_map(|(f, s)| aggregation_filter_fields(&f.name, s.scalar))
        .collect();

    if node_fields.is_empty() {
        debug!(
            type_name = %source.name,
            field = %field.name,
            "target has no aggregatable fields, node filter omitted"
        );
    } else {
        let node_where = names.node_aggregation_where_input();
        fragment.push(
            InputObjectType::new(&node_where)
                .with_combinators()
                .fields(node_fields),
        );
        aggregate = aggregate.field(InputValue::new("node", TypeRef::named(node_where)));
    }

    fragment.push(aggregate);
    Ok(Some(fragment))
}

/// Non-list scalar fields an aggregation function applies to
fn aggregatable_scalars(node: &TypeNode) -> impl Iterator<Item = (&FieldNode, &ScalarField)> {
    node.scalar_fields()
        .filter(|(_, s)| !s.list && s.scalar.is_aggregatable())
}

/// Aggregating functions with a filter family per scalar, and the type the
/// function yields
fn filter_functions(scalar: ScalarType) -> &'static [(&'static str, ScalarType)] {
    match scalar {
        ScalarType::String => &[
            ("AVERAGE_LENGTH", ScalarType::Float),
            ("LONGEST_LENGTH", ScalarType::Int),
            ("SHORTEST_LENGTH", ScalarType::Int),
        ],
        ScalarType::Int => &[
            ("AVERAGE", ScalarType::Float),
            ("MAX", ScalarType::Int),
            ("MIN", ScalarType::Int),
            ("SUM", ScalarType::Int),
        ],
        ScalarType::Float => &[
            ("AVERAGE", ScalarType::Float),
            ("MAX", ScalarType::Float),
            ("MIN", ScalarType::Float),
            ("SUM", ScalarType::Float),
        ],
        ScalarType::BigInt => &[
            ("AVERAGE", ScalarType::BigInt),
            ("MAX", ScalarType::BigInt),
            ("MIN", ScalarType::BigInt),
            ("SUM", ScalarType::BigInt),
        ],
        ScalarType::DateTime => &[("MAX", ScalarType::DateTime), ("MIN", ScalarType::DateTime)],
        ScalarType::Id | ScalarType::Boolean => &[],
    }
}

fn family(
    fields: &mut Vec<InputValue>,
    prefix: &str,
    ty: ScalarType,
    deprecation: Option<&str>,
) {
    for op in OPERATORS {
        let mut value = InputValue::new(format!("{}_{}", prefix, op), TypeRef::named(ty.name()));
        if let Some(reason) = deprecation {
            value = value.deprecated(reason);
        }
        fields.push(value);
    }
}

/// Aggregation filter fields of one scalar field of the target type
pub(crate) fn aggregation_filter_fields(name: &str, scalar: ScalarType) -> Vec<InputValue> {
    let mut fields = Vec::new();

    for (function, ty) in filter_functions(scalar) {
        family(&mut fields, &format!("{}_{}", name, function), *ty, None);
    }

    match scalar {
        ScalarType::String => {
            for (function, ty) in [
                ("AVERAGE", ScalarType::Float),
                ("LONGEST", ScalarType::Int),
                ("SHORTEST", ScalarType::Int),
            ] {
                family(
                    &mut fields,
                    &format!("{}_{}", name, function),
                    ty,
                    Some(LENGTH_DEPRECATION),
                );
            }
            // bare comparisons: equality on the value, ordering on its length
            for op in OPERATORS {
                let ty = if op == "EQUAL" { ScalarType::String } else { ScalarType::Int };
                fields.push(
                    InputValue::new(format!("{}_{}", name, op), TypeRef::named(ty.name()))
                        .deprecated(NON_AGGREGATING_DEPRECATION),
                );
            }
        }
        ScalarType::Id => fields.push(
            InputValue::new(format!("{}_EQUAL", name), TypeRef::named(ScalarType::Id.name()))
                .deprecated(NON_AGGREGATING_DEPRECATION),
        ),
        ScalarType::Int | ScalarType::Float | ScalarType::BigInt | ScalarType::DateTime => {
            family(&mut fields, name, scalar, Some(NON_AGGREGATING_DEPRECATION));
        }
        ScalarType::Boolean => {}
    }

    fields
}

/// `<Scalar>AggregateSelection{NonNullable,Nullable}` for one scalar field
fn selection_object(field: &ScalarField) -> ObjectType {
    let scalar = field.scalar;
    let suffix = if field.required { "NonNullable" } else { "Nullable" };
    let name = format!("{}AggregateSelection{}", scalar.name(), suffix);

    let members: &[(&str, ScalarType)] = match scalar {
        ScalarType::Id => &[("longest", ScalarType::Id), ("shortest", ScalarType::Id)],
        ScalarType::String => &[
            ("longest", ScalarType::String),
            ("shortest", ScalarType::String),
        ],
        ScalarType::Int => &[
            ("average", ScalarType::Float),
            ("max", ScalarType::Int),
            ("min", ScalarType::Int),
            ("sum", ScalarType::Int),
        ],
        ScalarType::Float => &[
            ("average", ScalarType::Float),
            ("max", ScalarType::Float),
            ("min", ScalarType::Float),
            ("sum", ScalarType::Float),
        ],
        ScalarType::BigInt => &[
            ("average", ScalarType::BigInt),
            ("max", ScalarType::BigInt),
            ("min", ScalarType::BigInt),
            ("sum", ScalarType::BigInt),
        ],
        ScalarType::DateTime => &[("max", ScalarType::DateTime), ("min", ScalarType::DateTime)],
        ScalarType::Boolean => &[],
    };

    members
        .iter()
        .fold(ObjectType::new(name), |object, (member, ty)| {
            let ty = TypeRef::named(ty.name());
            let ty = if field.required { ty.non_null() } else { ty };
            object.field(FieldDefinition::new(*member, ty))
        })
}

/// Fields selecting aggregates over the scalars of `node`, with the
/// selection objects they return
fn selection_fields(node: &TypeNode, fragment: &mut Fragment) -> Vec<FieldDefinition> {
    aggregatable_scalars(node)
        .map(|(field, scalar)| {
            let selection = selection_object(scalar);
            let ty = TypeRef::named(&selection.name).non_null();
            fragment.push(selection);
            FieldDefinition::new(&field.name, ty)
        })
        .collect()
}

/// Build `<Type>AggregateSelection` and the per-relationship aggregation
/// selections of an object type
pub fn synthesize_aggregate_selections(
    ctx: &SynthesisContext<'_>,
    node: &TypeNode,
) -> Result<Fragment, AugmentError> {
    let mut fragment = Fragment::new();

    let mut selection = ObjectType::new(naming::aggregate_selection(&node.name))
        .field(FieldDefinition::new("count", TypeRef::named("Int").non_null()));
    for field in selection_fields(node, &mut fragment) {
        selection = selection.field(field);
    }
    fragment.push(selection);

    for (field, edge) in node.relationship_fields() {
        let RelationshipTarget::Concrete(target) = ctx.graph.target(edge)? else {
            continue;
        };

        let mut aggregation = ObjectType::new(naming::relationship_aggregation_selection(
            &node.name,
            &target.name,
            &field.name,
        ))
        .field(FieldDefinition::new("count", TypeRef::named("Int").non_null()));

        let node_fields = selection_fields(target, &mut fragment);
        if !node_fields.is_empty() {
            let node_selection = naming::relationship_node_aggregate_selection(
                &node.name,
                &target.name,
                &field.name,
            );
            let mut node_object = ObjectType::new(&node_selection);
            for f in node_fields {
                node_object = node_object.field(f);
            }
            fragment.push(node_object);
            aggregation =
                aggregation.field(FieldDefinition::new("node", TypeRef::named(node_selection)));
        }

        fragment.push(aggregation);
    }

    Ok(fragment)
}
