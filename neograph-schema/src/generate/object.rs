//! Output types, sort/options inputs and query root fields
//!
//! Generates:
//! - The augmented output type of every declared type (relationship fields
//!   gain `directed`/`options`/`where` arguments plus `<r>Connection` and
//!   `<r>Aggregate` siblings)
//! - `<Type>Options`, `<Type>Sort` and the `SortDirection` enum
//! - `QueryOptions` for relationships to unions
//! - `scalar` definitions for the custom scalars in use
//! - `Query.<types>` and `Query.<types>Aggregate`

use crate::error::AugmentError;
use crate::generate::{Fragment, RootOperation, SynthesisContext, custom_scalar, scalar_type_ref};
use crate::ir::{
    Cardinality, FieldNode, RelationshipEdge, RelationshipTarget, ScalarField, TypeKind, TypeNode,
};
use crate::naming::{self, RelationshipNames};
use crate::schema::{
    EnumType, EnumValue, FieldDefinition, InputObjectType, InputValue, InterfaceType, ObjectType,
    TypeRef, UnionType,
};

/// Name of the sort direction enum
pub const SORT_DIRECTION: &str = "SortDirection";

/// Name of the options input used for relationships to unions
pub const QUERY_OPTIONS: &str = "QueryOptions";

/// Scalar fields a `<Type>Sort` input can order by
pub(crate) fn sortable_fields(node: &TypeNode) -> impl Iterator<Item = (&FieldNode, &ScalarField)> {
    node.scalar_fields().filter(|(_, s)| !s.list)
}

/// Whether `target` gets a `<Type>Sort` input
pub(crate) fn is_sortable(target: &RelationshipTarget<'_>) -> bool {
    match target {
        RelationshipTarget::Concrete(node) | RelationshipTarget::Interface { interface: node, .. } => {
            sortable_fields(node).next().is_some()
        }
        RelationshipTarget::Union { .. } => false,
    }
}

/// Build the output type, options and query root fields of `node`
pub fn synthesize_object(
    ctx: &SynthesisContext<'_>,
    node: &TypeNode,
) -> Result<Fragment, AugmentError> {
    let mut fragment = Fragment::new();

    for (_, scalar) in node.scalar_fields() {
        if let Some(definition) = custom_scalar(scalar.scalar) {
            fragment.push(definition);
        }
    }

    match node.kind {
        TypeKind::Object => {
            let mut object = ObjectType::new(&node.name);
            object.implements = node.implements.clone();
            for (field, scalar) in node.scalar_fields() {
                object = object.field(FieldDefinition::new(&field.name, scalar_type_ref(scalar)));
            }
            for (field, edge) in node.relationship_fields() {
                let target = ctx.graph.target(edge)?;
                if matches!(target, RelationshipTarget::Union { .. }) {
                    fragment.push(query_options());
                }
                for definition in relationship_fields(node, field, edge, &target) {
                    object = object.field(definition);
                }
            }
            fragment.push(object);
            push_options(&mut fragment, node);
            push_query_fields(&mut fragment, node);
        }
        TypeKind::Interface => {
            fragment.push(InterfaceType {
                name: node.name.clone(),
                description: None,
                fields: node
                    .scalar_fields()
                    .map(|(field, scalar)| FieldDefinition::new(&field.name, scalar_type_ref(scalar)))
                    .collect(),
            });
            push_options(&mut fragment, node);
        }
        TypeKind::Union => fragment.push(UnionType {
            name: node.name.clone(),
            description: None,
            members: node.members.clone(),
        }),
    }

    Ok(fragment)
}

fn directed() -> InputValue {
    InputValue::new("directed", TypeRef::named("Boolean")).with_default("true")
}

fn relationship_fields(
    source: &TypeNode,
    field: &FieldNode,
    edge: &RelationshipEdge,
    target: &RelationshipTarget<'_>,
) -> Vec<FieldDefinition> {
    let names = RelationshipNames::new(&source.name, &field.name);
    let target_name = target.name();

    let ty = match edge.cardinality() {
        Cardinality::Many => TypeRef::list_of(target_name).non_null(),
        Cardinality::One if edge.required => TypeRef::named(target_name).non_null(),
        Cardinality::One => TypeRef::named(target_name),
    };
    let options = match target {
        RelationshipTarget::Union { .. } => QUERY_OPTIONS.to_string(),
        RelationshipTarget::Concrete(_) | RelationshipTarget::Interface { .. } => {
            naming::options(target_name)
        }
    };

    let mut fields = vec![
        FieldDefinition::new(&field.name, ty)
            .argument(directed())
            .argument(InputValue::new("options", TypeRef::named(options)))
            .argument(InputValue::new(
                "where",
                TypeRef::named(naming::where_input(target_name)),
            )),
    ];

    let mut connection = FieldDefinition::new(
        format!("{}Connection", field.name),
        TypeRef::named(names.connection()).non_null(),
    )
    .argument(InputValue::new("after", TypeRef::named("String")))
    .argument(directed())
    .argument(InputValue::new("first", TypeRef::named("Int")))
    .argument(InputValue::new(
        "where",
        TypeRef::named(names.connection_where()),
    ));
    if is_sortable(target) {
        connection = connection.argument(InputValue::new(
            "sort",
            TypeRef::list_of(names.connection_sort()),
        ));
    }
    fields.push(connection);

    if let RelationshipTarget::Concrete(target) = target {
        fields.push(
            FieldDefinition::new(
                format!("{}Aggregate", field.name),
                TypeRef::named(naming::relationship_aggregation_selection(
                    &source.name,
                    &target.name,
                    &field.name,
                )),
            )
            .argument(directed())
            .argument(InputValue::new(
                "where",
                TypeRef::named(naming::where_input(&target.name)),
            )),
        );
    }

    fields
}

fn sort_direction() -> EnumType {
    EnumType {
        name: SORT_DIRECTION.to_string(),
        description: None,
        values: vec![
            EnumValue::new("ASC").described("Sort by field values in ascending order."),
            EnumValue::new("DESC").described("Sort by field values in descending order."),
        ],
    }
}

fn query_options() -> InputObjectType {
    InputObjectType::new(QUERY_OPTIONS)
        .field(InputValue::new("limit", TypeRef::named("Int")))
        .field(InputValue::new("offset", TypeRef::named("Int")))
}

/// `<Type>Options`, plus `<Type>Sort` when the type has sortable fields
fn push_options(fragment: &mut Fragment, node: &TypeNode) {
    let plural = naming::upper_plural(&node.name);
    let mut options = InputObjectType::new(naming::options(&node.name))
        .field(InputValue::new("limit", TypeRef::named("Int")))
        .field(InputValue::new("offset", TypeRef::named("Int")));

    let sort_fields: Vec<InputValue> = sortable_fields(node)
        .map(|(field, _)| InputValue::new(&field.name, TypeRef::named(SORT_DIRECTION)))
        .collect();

    if !sort_fields.is_empty() {
        let sort_name = naming::sort(&node.name);
        fragment.push(sort_direction());
        fragment.push(
            InputObjectType::new(&sort_name)
                .described(format!(
                    "Fields to sort {} by. The order in which sorts are applied is not guaranteed when specifying many fields in one {} object.",
                    plural, sort_name
                ))
                .fields(sort_fields),
        );
        options = options.field(
            InputValue::new("sort", TypeRef::list_of(&sort_name)).described(format!(
                "Specify one or more {} objects to sort {} by. The sorts will be applied in the order in which they are arranged in the array.",
                sort_name, plural
            )),
        );
    }

    fragment.push(options);
}

fn push_query_fields(fragment: &mut Fragment, node: &TypeNode) {
    let plural = naming::plural(&node.name);
    let where_input = TypeRef::named(naming::where_input(&node.name));

    fragment.push_root(
        RootOperation::Query,
        FieldDefinition::new(&plural, TypeRef::list_of(&node.name).non_null())
            .argument(InputValue::new(
                "options",
                TypeRef::named(naming::options(&node.name)),
            ))
            .argument(InputValue::new("where", where_input.clone())),
    );
    fragment.push_root(
        RootOperation::Query,
        FieldDefinition::new(
            format!("{}Aggregate", plural),
            TypeRef::named(naming::aggregate_selection(&node.name)).non_null(),
        )
        .argument(InputValue::new("where", where_input)),
    );
}
