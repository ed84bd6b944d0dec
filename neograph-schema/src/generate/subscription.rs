//! Subscription events and subscription filters
//!
//! Generates, when subscriptions are enabled:
//! - The `EventType` enum and `<Type>EventPayload` types (an interface for
//!   interfaces, a union for unions)
//! - `<Type>CreatedEvent`, `<Type>UpdatedEvent`, `<Type>DeletedEvent` and,
//!   for types with relationships, the relationship events
//! - `<Type>SubscriptionWhere` and the relationship subscription filters
//! - `Subscription` root fields
//!
//! Every subscription filter is marked omit-when-empty: the assembler drops
//! it when it ends up with nothing but `AND`/`OR`/`NOT`, together with every
//! field and argument pointing at it.

use crate::error::AugmentError;
use crate::generate::where_input::scalar_filter_fields;
use crate::generate::{Fragment, RootOperation, SynthesisContext, scalar_type_ref};
use crate::ir::{RelationshipTarget, TypeKind, TypeNode};
use crate::naming::{self, RelationshipNames};
use crate::schema::{
    EnumType, EnumValue, FieldDefinition, InputObjectType, InputValue, InterfaceType, ObjectType,
    TypeRef, UnionType,
};

/// Name of the event kind enum
pub const EVENT_TYPE: &str = "EventType";

fn event_type() -> EnumType {
    EnumType {
        name: EVENT_TYPE.to_string(),
        description: None,
        values: [
            "CREATE",
            "CREATE_RELATIONSHIP",
            "DELETE",
            "DELETE_RELATIONSHIP",
            "UPDATE",
        ]
        .into_iter()
        .map(EnumValue::new)
        .collect(),
    }
}

/// Build the subscription types and root fields of `node`
pub fn synthesize_subscriptions(
    ctx: &SynthesisContext<'_>,
    node: &TypeNode,
) -> Result<Fragment, AugmentError> {
    let mut fragment = Fragment::new();

    match node.kind {
        TypeKind::Object => {
            fragment.push(event_type());
            fragment.push(payload_object(node));
            fragment.push(subscription_where(ctx, node));
            push_node_events(&mut fragment, node);
            if node.has_relationships() {
                push_relationship_events(ctx, &mut fragment, node)?;
            }
        }
        TypeKind::Interface => {
            fragment.push(InterfaceType {
                name: naming::event_payload(&node.name),
                description: None,
                fields: payload_fields(node),
            });
            fragment.push(subscription_where(ctx, node));
        }
        TypeKind::Union => fragment.push(UnionType {
            name: naming::event_payload(&node.name),
            description: None,
            members: node.members.iter().map(|m| naming::event_payload(m)).collect(),
        }),
    }

    Ok(fragment)
}

fn payload_fields(node: &TypeNode) -> Vec<FieldDefinition> {
    node.scalar_fields()
        .map(|(field, scalar)| FieldDefinition::new(&field.name, scalar_type_ref(scalar)))
        .collect()
}

fn payload_object(node: &TypeNode) -> ObjectType {
    let mut payload = ObjectType::new(naming::event_payload(&node.name));
    payload.implements = node.implements.iter().map(|i| naming::event_payload(i)).collect();
    payload.fields = payload_fields(node);
    payload
}

/// `<Type>SubscriptionWhere`: scalar value filters only
fn subscription_where(ctx: &SynthesisContext<'_>, node: &TypeNode) -> InputObjectType {
    node.scalar_fields()
        .filter(|(field, _)| ctx.capabilities.of(node, field).by_value)
        .fold(
            InputObjectType::new(naming::subscription_where(&node.name))
                .with_combinators()
                .omitted_when_empty(),
            |input, (field, scalar)| input.fields(scalar_filter_fields(&field.name, scalar)),
        )
}

fn event_fields(object: ObjectType) -> ObjectType {
    object
        .field(FieldDefinition::new("event", TypeRef::named(EVENT_TYPE).non_null()))
        .field(FieldDefinition::new("timestamp", TypeRef::named("Float").non_null()))
}

fn push_node_events(fragment: &mut Fragment, node: &TypeNode) {
    let name = &node.name;
    let payload = || TypeRef::named(naming::event_payload(name)).non_null();
    let lower = naming::lower_first(name);
    let filter = naming::subscription_where(name);

    let events = [
        (
            "Created",
            event_fields(ObjectType::new(naming::event(name, "Created")))
                .field(FieldDefinition::new(format!("created{}", name), payload())),
        ),
        (
            "Updated",
            event_fields(ObjectType::new(naming::event(name, "Updated")))
                .field(FieldDefinition::new("previousState", payload()))
                .field(FieldDefinition::new(format!("updated{}", name), payload())),
        ),
        (
            "Deleted",
            event_fields(ObjectType::new(naming::event(name, "Deleted")))
                .field(FieldDefinition::new(format!("deleted{}", name), payload())),
        ),
    ];

    for (kind, event) in events {
        fragment.push_root(
            RootOperation::Subscription,
            FieldDefinition::new(
                format!("{}{}", lower, kind),
                TypeRef::named(&event.name).non_null(),
            )
            .argument(InputValue::new("where", TypeRef::named(&filter))),
        );
        fragment.push(event);
    }
}

fn push_relationship_events(
    ctx: &SynthesisContext<'_>,
    fragment: &mut Fragment,
    node: &TypeNode,
) -> Result<(), AugmentError> {
    let name = &node.name;
    let lower = naming::lower_first(name);
    let connected = naming::connected_relationships(name);
    let relationships_where = naming::relationships_subscription_where(name);

    let mut connected_relationships = ObjectType::new(&connected);
    let mut relationships_filter = InputObjectType::new(&relationships_where).omitted_when_empty();

    for (field, edge) in node.relationship_fields() {
        let target = ctx.graph.target(edge)?;
        let names = RelationshipNames::new(name, &field.name);

        fragment.push(ObjectType::new(names.connected_relationship()).field(FieldDefinition::new(
            "node",
            TypeRef::named(naming::event_payload(target.name())).non_null(),
        )));
        connected_relationships = connected_relationships.field(FieldDefinition::new(
            &field.name,
            TypeRef::named(names.connected_relationship()),
        ));

        if !ctx.capabilities.of(node, field).by_value {
            continue;
        }

        let mut filter = InputObjectType::new(names.relationship_subscription_where()).omitted_when_empty();
        match &target {
            RelationshipTarget::Concrete(t) | RelationshipTarget::Interface { interface: t, .. } => {
                filter = filter.field(InputValue::new(
                    "node",
                    TypeRef::named(naming::subscription_where(&t.name)),
                ));
            }
            RelationshipTarget::Union { members, .. } => {
                for member in members {
                    let member_where = names.member(&member.name).member_subscription_where();
                    fragment.push(
                        InputObjectType::new(&member_where)
                            .omitted_when_empty()
                            .field(InputValue::new(
                                "node",
                                TypeRef::named(naming::subscription_where(&member.name)),
                            )),
                    );
                    filter = filter.field(InputValue::new(&member.name, TypeRef::named(member_where)));
                }
            }
        }
        relationships_filter = relationships_filter.field(InputValue::new(
            &field.name,
            TypeRef::named(&filter.name),
        ));
        fragment.push(filter);
    }

    fragment.push(connected_relationships);
    fragment.push(relationships_filter);

    for (kind, relationship_field, filter_name) in [
        (
            "RelationshipCreated",
            "createdRelationship",
            naming::relationship_created_subscription_where(name),
        ),
        (
            "RelationshipDeleted",
            "deletedRelationship",
            naming::relationship_deleted_subscription_where(name),
        ),
    ] {
        let event = event_fields(ObjectType::new(naming::event(name, kind)))
            .field(FieldDefinition::new(
                &lower,
                TypeRef::named(naming::event_payload(name)).non_null(),
            ))
            .field(FieldDefinition::new(
                relationship_field,
                TypeRef::named(&connected).non_null(),
            ))
            .field(FieldDefinition::new(
                "relationshipFieldName",
                TypeRef::named("String").non_null(),
            ));

        fragment.push(
            InputObjectType::new(&filter_name)
                .with_combinators()
                .omitted_when_empty()
                .field(InputValue::new(&lower, TypeRef::named(naming::subscription_where(name))))
                .field(InputValue::new(
                    relationship_field,
                    TypeRef::named(&relationships_where),
                )),
        );
        fragment.push_root(
            RootOperation::Subscription,
            FieldDefinition::new(
                format!("{}{}", lower, kind),
                TypeRef::named(&event.name).non_null(),
            )
            .argument(InputValue::new("where", TypeRef::named(filter_name))),
        );
        fragment.push(event);
    }

    Ok(())
}
