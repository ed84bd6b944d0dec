//! Relay connections
//!
//! Generates:
//! - `PageInfo`
//! - `<Types>Connection` / `<Type>Edge` and the `Query.<types>Connection` root field
//! - `<Source><Rel>Connection` / `<Source><Rel>Relationship` per relationship
//! - `<Source><Rel>ConnectionWhere` (per member for union targets)
//! - `<Source><Rel>ConnectionSort` when the target can be sorted

use crate::error::AugmentError;
use crate::generate::object::is_sortable;
use crate::generate::{Fragment, NEGATION_DEPRECATION, RootOperation, SynthesisContext};
use crate::ir::{RelationshipTarget, TypeNode};
use crate::naming::{self, RelationshipNames};
use crate::schema::{FieldDefinition, InputObjectType, InputValue, ObjectType, TypeRef};

/// Name of the Relay page info type
pub const PAGE_INFO: &str = "PageInfo";

fn page_info() -> ObjectType {
    ObjectType::new(PAGE_INFO)
        .described("Pagination information (Relay)")
        .field(FieldDefinition::new("endCursor", TypeRef::named("String")))
        .field(FieldDefinition::new("hasNextPage", TypeRef::named("Boolean").non_null()))
        .field(FieldDefinition::new("hasPreviousPage", TypeRef::named("Boolean").non_null()))
        .field(FieldDefinition::new("startCursor", TypeRef::named("String")))
}

/// `{ edges: [<edge>!]!, pageInfo: PageInfo!, totalCount: Int! }`
fn connection_object(name: String, edge: &str) -> ObjectType {
    ObjectType::new(name)
        .field(FieldDefinition::new("edges", TypeRef::list_of(edge).non_null()))
        .field(FieldDefinition::new("pageInfo", TypeRef::named(PAGE_INFO).non_null()))
        .field(FieldDefinition::new("totalCount", TypeRef::named("Int").non_null()))
}

/// `{ cursor: String!, node: <node>! }`
fn edge_object(name: &str, node: &str) -> ObjectType {
    ObjectType::new(name)
        .field(FieldDefinition::new("cursor", TypeRef::named("String").non_null()))
        .field(FieldDefinition::new("node", TypeRef::named(node).non_null()))
}

/// `AND`/`OR`/`NOT`, `node` and the deprecated `node_NOT`
fn node_connection_where(name: String, target: &str) -> InputObjectType {
    let node_where = TypeRef::named(naming::where_input(target));
    InputObjectType::new(name)
        .with_combinators()
        .field(InputValue::new("node", node_where.clone()))
        .field(InputValue::new("node_NOT", node_where).deprecated(NEGATION_DEPRECATION))
}

/// Build the root and relationship connections of an object type
pub fn synthesize_connections(
    ctx: &SynthesisContext<'_>,
    node: &TypeNode,
) -> Result<Fragment, AugmentError> {
    let mut fragment = Fragment::new();
    fragment.push(page_info());

    let connection = naming::root_connection(&node.name);
    let edge = naming::edge(&node.name);
    fragment.push(connection_object(connection.clone(), &edge));
    fragment.push(edge_object(&edge, &node.name));

    let mut root = FieldDefinition::new(
        format!("{}Connection", naming::plural(&node.name)),
        TypeRef::named(&connection).non_null(),
    )
    .argument(InputValue::new("after", TypeRef::named("String")))
    .argument(InputValue::new("first", TypeRef::named("Int")))
    .argument(InputValue::new(
        "where",
        TypeRef::named(naming::where_input(&node.name)),
    ));
    if is_sortable(&RelationshipTarget::Concrete(node)) {
        root = root.argument(InputValue::new(
            "sort",
            TypeRef::named(naming::sort(&node.name)).list(),
        ));
    }
    fragment.push_root(RootOperation::Query, root);

    for (field, edge) in node.relationship_fields() {
        let target = ctx.graph.target(edge)?;
        let names = RelationshipNames::new(&node.name, &field.name);

        let relationship = names.relationship();
        fragment.push(connection_object(names.connection(), &relationship));
        fragment.push(edge_object(&relationship, target.name()));

        match &target {
            RelationshipTarget::Concrete(t) | RelationshipTarget::Interface { interface: t, .. } => {
                fragment.push(node_connection_where(names.connection_where(), &t.name));
            }
            RelationshipTarget::Union { members, .. } => {
                let mut wrapper = InputObjectType::new(names.connection_where());
                for member in members {
                    let member_where = names.member(&member.name).connection_where();
                    fragment.push(node_connection_where(member_where.clone(), &member.name));
                    wrapper = wrapper.field(InputValue::new(&member.name, TypeRef::named(member_where)));
                }
                fragment.push(wrapper);
            }
        }

        if is_sortable(&target) {
            fragment.push(
                InputObjectType::new(names.connection_sort())
                    .field(InputValue::new("node", TypeRef::named(naming::sort(target.name())))),
            );
        }
    }

    Ok(fragment)
}
