//! Mutation inputs and mutation root fields
//!
//! Mutation inputs are generated for every relationship regardless of its
//! filter capability: `byValue: false` removes filters, never the ability to
//! create, connect or delete related nodes.
//!
//! Per relationship `<Source>.<rel>` (per member for union targets):
//! - `FieldInput`, `ConnectFieldInput`, `CreateFieldInput`
//! - `UpdateFieldInput`, `UpdateConnectionInput`
//! - `DeleteFieldInput`, `DisconnectFieldInput`
//!
//! Per type: `CreateInput`, `UpdateInput`, `ConnectWhere` and, for types with
//! relationships, `ConnectInput`, `DisconnectInput`, `DeleteInput` and
//! `RelationInput`.

use crate::error::AugmentError;
use crate::generate::{Fragment, RootOperation, SynthesisContext, scalar_type_ref};
use crate::ir::{
    Cardinality, FieldNode, RelationshipEdge, RelationshipTarget, ScalarField, ScalarType,
    TypeKind, TypeNode,
};
use crate::naming::{self, RelationshipNames};
use crate::schema::{FieldDefinition, InputObjectType, InputValue, ObjectType, TypeRef};

/// `[T!]` for list relationships, `T` otherwise
fn per_cardinality(edge: &RelationshipEdge, name: impl Into<String>) -> TypeRef {
    match edge.cardinality() {
        Cardinality::Many => TypeRef::list_of(name),
        Cardinality::One => TypeRef::named(name),
    }
}

/// Build the mutation inputs, responses and root fields of `node`
pub fn synthesize_mutations(
    ctx: &SynthesisContext<'_>,
    node: &TypeNode,
) -> Result<Fragment, AugmentError> {
    let mut fragment = Fragment::new();
    match node.kind {
        TypeKind::Object => object_mutations(ctx, node, &mut fragment)?,
        TypeKind::Interface => interface_inputs(ctx, node, &mut fragment),
        TypeKind::Union => {}
    }
    Ok(fragment)
}

fn connect_where(node: &TypeNode) -> InputObjectType {
    InputObjectType::new(naming::connect_where(&node.name)).field(InputValue::new(
        "node",
        TypeRef::named(naming::where_input(&node.name)).non_null(),
    ))
}

fn create_scalar_fields(node: &TypeNode) -> Vec<InputValue> {
    node.scalar_fields()
        .map(|(field, scalar)| InputValue::new(&field.name, scalar_type_ref(scalar)))
        .collect()
}

fn update_scalar_fields(node: &TypeNode) -> Vec<InputValue> {
    let mut fields = Vec::new();
    for (field, scalar) in node.scalar_fields() {
        fields.push(InputValue::new(
            &field.name,
            scalar_type_ref(&ScalarField {
                required: false,
                ..*scalar
            }),
        ));
        fields.extend(update_operators(&field.name, scalar));
    }
    fields
}

/// In-place update operators: arithmetic on numbers, push/pop on lists
fn update_operators(name: &str, field: &ScalarField) -> Vec<InputValue> {
    let scalar = field.scalar.name();
    if field.list {
        return vec![
            InputValue::new(format!("{}_POP", name), TypeRef::named("Int")),
            InputValue::new(format!("{}_PUSH", name), TypeRef::list_of(scalar)),
        ];
    }
    let operators: &[&str] = match field.scalar {
        ScalarType::Int | ScalarType::BigInt => &["INCREMENT", "DECREMENT"],
        ScalarType::Float => &["ADD", "SUBTRACT", "MULTIPLY", "DIVIDE"],
        ScalarType::Id | ScalarType::String | ScalarType::Boolean | ScalarType::DateTime => &[],
    };
    operators
        .iter()
        .map(|op| InputValue::new(format!("{}_{}", name, op), TypeRef::named(scalar)))
        .collect()
}

fn interface_inputs(ctx: &SynthesisContext<'_>, node: &TypeNode, fragment: &mut Fragment) {
    fragment.push(connect_where(node));
    fragment.push(InputObjectType::new(naming::update_input(&node.name)).fields(update_scalar_fields(node)));

    let implementations = ctx.graph.implementations(&node.name);
    if !implementations.is_empty() {
        fragment.push(InputObjectType::new(naming::create_input(&node.name)).fields(
            implementations.iter().map(|t| {
                InputValue::new(&t.name, TypeRef::named(naming::create_input(&t.name)))
            }),
        ));
    }
}

/// Inputs of one relationship towards one concrete or interface target
struct NestedInputs<'a> {
    names: RelationshipNames,
    edge: &'a RelationshipEdge,
    target: &'a TypeNode,
    creatable: bool,
}

impl NestedInputs<'_> {
    fn push(&self, fragment: &mut Fragment) {
        let names = &self.names;
        let edge = self.edge;
        let target = &self.target.name;
        let nested = self.target.has_relationships();
        let connection_where = TypeRef::named(names.connection_where());

        let mut connect = InputObjectType::new(names.connect_field_input())
            .field(InputValue::new("where", TypeRef::named(naming::connect_where(target))));
        let mut delete = InputObjectType::new(names.delete_field_input())
            .field(InputValue::new("where", connection_where.clone()));
        let mut disconnect = InputObjectType::new(names.disconnect_field_input())
            .field(InputValue::new("where", connection_where.clone()));
        if nested {
            connect = connect.field(InputValue::new(
                "connect",
                per_cardinality(edge, naming::connect_input(target)),
            ));
            delete = delete.field(InputValue::new(
                "delete",
                TypeRef::named(naming::delete_input(target)),
            ));
            disconnect = disconnect.field(InputValue::new(
                "disconnect",
                TypeRef::named(naming::disconnect_input(target)),
            ));
        }
        fragment.push(connect);
        fragment.push(delete);
        fragment.push(disconnect);

        let mut field_input = InputObjectType::new(names.field_input()).field(InputValue::new(
            "connect",
            per_cardinality(edge, names.connect_field_input()),
        ));
        let mut update = InputObjectType::new(names.update_field_input())
            .field(InputValue::new("connect", per_cardinality(edge, names.connect_field_input())))
            .field(InputValue::new("delete", per_cardinality(edge, names.delete_field_input())))
            .field(InputValue::new(
                "disconnect",
                per_cardinality(edge, names.disconnect_field_input()),
            ))
            .field(InputValue::new(
                "update",
                TypeRef::named(names.update_connection_input()),
            ))
            .field(InputValue::new("where", connection_where));

        if self.creatable {
            fragment.push(InputObjectType::new(names.create_field_input()).field(InputValue::new(
                "node",
                TypeRef::named(naming::create_input(target)).non_null(),
            )));
            let create = InputValue::new("create", per_cardinality(edge, names.create_field_input()));
            field_input = field_input.field(create.clone());
            update = update.field(create);
        }

        fragment.push(field_input);
        fragment.push(update);
        fragment.push(
            InputObjectType::new(names.update_connection_input())
                .field(InputValue::new("node", TypeRef::named(naming::update_input(target)))),
        );
    }
}

/// Relationship fields of the source-level inputs
#[derive(Default)]
struct SourceInputs {
    create: Vec<InputValue>,
    update: Vec<InputValue>,
    connect: Vec<InputValue>,
    disconnect: Vec<InputValue>,
    delete: Vec<InputValue>,
    relation: Vec<InputValue>,
}

impl SourceInputs {
    fn add_direct(&mut self, field: &FieldNode, edge: &RelationshipEdge, names: &RelationshipNames, creatable: bool) {
        let name = field.name.as_str();
        self.create.push(InputValue::new(name, TypeRef::named(names.field_input())));
        self.update.push(InputValue::new(name, per_cardinality(edge, names.update_field_input())));
        self.connect.push(InputValue::new(name, per_cardinality(edge, names.connect_field_input())));
        self.disconnect.push(InputValue::new(
            name,
            per_cardinality(edge, names.disconnect_field_input()),
        ));
        self.delete.push(InputValue::new(name, per_cardinality(edge, names.delete_field_input())));
        if creatable {
            self.relation.push(InputValue::new(name, per_cardinality(edge, names.create_field_input())));
        }
    }

    /// Per-member wrappers for a relationship to a union
    fn add_union(
        &mut self,
        fragment: &mut Fragment,
        field: &FieldNode,
        edge: &RelationshipEdge,
        names: &RelationshipNames,
        members: &[&TypeNode],
    ) {
        let wrapper = |name: String, member_type: &dyn Fn(&RelationshipNames) -> TypeRef| {
            members.iter().fold(InputObjectType::new(name), |input, member| {
                input.field(InputValue::new(&member.name, member_type(&names.member(&member.name))))
            })
        };

        let create = wrapper(names.union_create_input(), &|n: &RelationshipNames| TypeRef::named(n.field_input()));
        let update = wrapper(names.union_update_input(), &|n: &RelationshipNames| {
            per_cardinality(edge, n.update_field_input())
        });
        let connect = wrapper(names.union_connect_input(), &|n: &RelationshipNames| {
            per_cardinality(edge, n.connect_field_input())
        });
        let disconnect = wrapper(names.union_disconnect_input(), &|n: &RelationshipNames| {
            per_cardinality(edge, n.disconnect_field_input())
        });
        let delete = wrapper(names.union_delete_input(), &|n: &RelationshipNames| {
            per_cardinality(edge, n.delete_field_input())
        });
        let relation = wrapper(names.create_field_input(), &|n: &RelationshipNames| {
            per_cardinality(edge, n.create_field_input())
        });

        let name = field.name.as_str();
        for (list, input) in [
            (&mut self.create, create),
            (&mut self.update, update),
            (&mut self.connect, connect),
            (&mut self.disconnect, disconnect),
            (&mut self.delete, delete),
            (&mut self.relation, relation),
        ] {
            list.push(InputValue::new(name, TypeRef::named(&input.name)));
            fragment.push(input);
        }
    }
}

fn object_mutations(
    ctx: &SynthesisContext<'_>,
    node: &TypeNode,
    fragment: &mut Fragment,
) -> Result<(), AugmentError> {
    let mut inputs = SourceInputs::default();

    for (field, edge) in node.relationship_fields() {
        let names = RelationshipNames::new(&node.name, &field.name);
        match ctx.graph.target(edge)? {
            RelationshipTarget::Concrete(target) => {
                inputs.add_direct(field, edge, &names, true);
                NestedInputs { names, edge, target, creatable: true }.push(fragment);
            }
            RelationshipTarget::Interface { interface, implementations } => {
                let creatable = !implementations.is_empty();
                inputs.add_direct(field, edge, &names, creatable);
                NestedInputs { names, edge, target: interface, creatable }.push(fragment);
            }
            RelationshipTarget::Union { members, .. } => {
                inputs.add_union(fragment, field, edge, &names, &members);
                for member in members {
                    NestedInputs {
                        names: names.member(&member.name),
                        edge,
                        target: member,
                        creatable: true,
                    }
                    .push(fragment);
                }
            }
        }
    }

    fragment.push(connect_where(node));
    fragment.push(
        InputObjectType::new(naming::create_input(&node.name))
            .fields(create_scalar_fields(node))
            .fields(inputs.create),
    );
    fragment.push(
        InputObjectType::new(naming::update_input(&node.name))
            .fields(update_scalar_fields(node))
            .fields(inputs.update),
    );

    let has_relationships = node.has_relationships();
    let has_relation_input = !inputs.relation.is_empty();
    if has_relationships {
        fragment.push(InputObjectType::new(naming::connect_input(&node.name)).fields(inputs.connect));
        fragment.push(InputObjectType::new(naming::disconnect_input(&node.name)).fields(inputs.disconnect));
        fragment.push(InputObjectType::new(naming::delete_input(&node.name)).fields(inputs.delete));
        if has_relation_input {
            fragment.push(InputObjectType::new(naming::relation_input(&node.name)).fields(inputs.relation));
        }
    }

    push_responses(fragment, node);
    push_root_fields(fragment, node, has_relationships, has_relation_input);
    Ok(())
}

fn info_types() -> [ObjectType; 3] {
    let count = |name: &str| FieldDefinition::new(name, TypeRef::named("Int").non_null());
    [
        ObjectType::new("CreateInfo")
            .described("Information about the number of nodes and relationships created during a create mutation")
            .field(count("nodesCreated"))
            .field(count("relationshipsCreated")),
        ObjectType::new("DeleteInfo")
            .described("Information about the number of nodes and relationships deleted during a delete mutation")
            .field(count("nodesDeleted"))
            .field(count("relationshipsDeleted")),
        ObjectType::new("UpdateInfo")
            .described("Information about the number of nodes and relationships created and deleted during an update mutation")
            .field(count("nodesCreated"))
            .field(count("nodesDeleted"))
            .field(count("relationshipsCreated"))
            .field(count("relationshipsDeleted")),
    ]
}

fn push_responses(fragment: &mut Fragment, node: &TypeNode) {
    for info in info_types() {
        fragment.push(info);
    }
    let plural = naming::plural(&node.name);
    let nodes = || FieldDefinition::new(&plural, TypeRef::list_of(&node.name).non_null());

    fragment.push(
        ObjectType::new(naming::create_mutation_response(&node.name))
            .field(FieldDefinition::new("info", TypeRef::named("CreateInfo").non_null()))
            .field(nodes()),
    );
    fragment.push(
        ObjectType::new(naming::update_mutation_response(&node.name))
            .field(FieldDefinition::new("info", TypeRef::named("UpdateInfo").non_null()))
            .field(nodes()),
    );
}

fn push_root_fields(
    fragment: &mut Fragment,
    node: &TypeNode,
    has_relationships: bool,
    has_relation_input: bool,
) {
    let plural = naming::upper_plural(&node.name);
    let where_input = || InputValue::new("where", TypeRef::named(naming::where_input(&node.name)));
    let named = |arg: &str, ty: String| InputValue::new(arg, TypeRef::named(ty));

    fragment.push_root(
        RootOperation::Mutation,
        FieldDefinition::new(
            format!("create{}", plural),
            TypeRef::named(naming::create_mutation_response(&node.name)).non_null(),
        )
        .argument(InputValue::new(
            "input",
            TypeRef::list_of(naming::create_input(&node.name)).non_null(),
        )),
    );

    let mut delete = FieldDefinition::new(
        format!("delete{}", plural),
        TypeRef::named("DeleteInfo").non_null(),
    )
    .argument(where_input());

    let mut update = FieldDefinition::new(
        format!("update{}", plural),
        TypeRef::named(naming::update_mutation_response(&node.name)).non_null(),
    )
    .argument(named("update", naming::update_input(&node.name)))
    .argument(where_input());

    if has_relationships {
        delete = delete.argument(named("delete", naming::delete_input(&node.name)));
        update = update
            .argument(named("connect", naming::connect_input(&node.name)))
            .argument(named("delete", naming::delete_input(&node.name)))
            .argument(named("disconnect", naming::disconnect_input(&node.name)));
        if has_relation_input {
            update = update.argument(named("create", naming::relation_input(&node.name)));
        }
    }

    fragment.push_root(RootOperation::Mutation, delete);
    fragment.push_root(RootOperation::Mutation, update);
}
