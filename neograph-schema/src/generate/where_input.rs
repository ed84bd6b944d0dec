//! `<Type>Where` filter inputs
//!
//! Generates, per declared type:
//! - Value filters for every scalar field with `byValue`
//! - Quantified relationship and connection filters for relationships with `byValue`
//! - `<relationship>Aggregate` for relationships with `byAggregate` and a concrete target
//! - `typename_IN` and the `<Interface>Implementation` enum for interfaces
//! - One field per member for unions
//!
//! The combinators `AND`/`OR`/`NOT` are always present, so a `Where` input is
//! never empty and never pruned.

use tracing::debug;

use crate::error::AugmentError;
use crate::generate::{Fragment, NEGATION_DEPRECATION, SynthesisContext};
use crate::ir::{
    Cardinality, FieldNode, RelationshipEdge, RelationshipTarget, ScalarField, ScalarType,
    TypeKind, TypeNode,
};
use crate::naming::{self, RelationshipNames};
use crate::schema::{EnumType, EnumValue, InputObjectType, InputValue, TypeRef};

/// Build the `Where` input of `node`
pub fn synthesize_where(
    ctx: &SynthesisContext<'_>,
    node: &TypeNode,
) -> Result<Fragment, AugmentError> {
    let mut fragment = Fragment::new();
    let mut input = InputObjectType::new(naming::where_input(&node.name)).with_combinators();

    if node.kind == TypeKind::Union {
        for member in &node.members {
            input = input.field(InputValue::new(
                member,
                TypeRef::named(naming::where_input(member)),
            ));
        }
        fragment.push(input);
        return Ok(fragment);
    }

    for (field, scalar) in node.scalar_fields() {
        if ctx.capabilities.of(node, field).by_value {
            input = input.fields(scalar_filter_fields(&field.name, scalar));
        }
    }

    for (field, edge) in node.relationship_fields() {
        let capability = ctx.capabilities.of(node, field);
        let target = ctx.graph.target(edge)?;

        if capability.by_value {
            input = input.fields(relationship_filter_fields(field, edge, &target));
        }
        if capability.by_aggregate && !target.is_abstract() {
            let names = RelationshipNames::new(&node.name, &field.name);
            input = input.field(InputValue::new(
                format!("{}Aggregate", field.name),
                TypeRef::named(names.aggregate_input()),
            ));
        }
    }

    if node.kind == TypeKind::Interface {
        let implementations = ctx.graph.implementations(&node.name);
        if implementations.is_empty() {
            debug!(interface = %node.name, "no implementations, typename_IN skipped");
        } else {
            let enum_name = naming::implementation_enum(&node.name);
            fragment.push(EnumType {
                name: enum_name.clone(),
                description: None,
                values: implementations
                    .iter()
                    .map(|t| EnumValue::new(&t.name))
                    .collect(),
            });
            input = input.field(InputValue::new("typename_IN", TypeRef::list_of(enum_name)));
        }
    }

    fragment.push(input);
    Ok(fragment)
}

fn negated(name: String, ty: TypeRef) -> InputValue {
    InputValue::new(name, ty).deprecated(NEGATION_DEPRECATION)
}

/// Value filter fields of one scalar field
///
/// Shared with the subscription filters, which carry the same scalar
/// operators but nothing else.
pub(crate) fn scalar_filter_fields(name: &str, field: &ScalarField) -> Vec<InputValue> {
    let scalar = field.scalar.name();
    let mut fields = Vec::new();

    if field.list {
        fields.push(InputValue::new(name, TypeRef::list_of(scalar)));
        fields.push(negated(format!("{}_NOT", name), TypeRef::list_of(scalar)));
        fields.push(InputValue::new(
            format!("{}_INCLUDES", name),
            TypeRef::named(scalar),
        ));
        fields.push(negated(
            format!("{}_NOT_INCLUDES", name),
            TypeRef::named(scalar),
        ));
        return fields;
    }

    fields.push(InputValue::new(name, TypeRef::named(scalar)));
    fields.push(negated(format!("{}_NOT", name), TypeRef::named(scalar)));

    if field.scalar == ScalarType::Boolean {
        return fields;
    }

    let item = if field.required {
        TypeRef::named(scalar).non_null()
    } else {
        TypeRef::named(scalar)
    };
    fields.push(InputValue::new(format!("{}_IN", name), item.clone().list()));
    fields.push(negated(format!("{}_NOT_IN", name), item.list()));

    if field.scalar.is_textual() {
        for op in ["CONTAINS", "STARTS_WITH", "ENDS_WITH"] {
            fields.push(InputValue::new(
                format!("{}_{}", name, op),
                TypeRef::named(scalar),
            ));
            fields.push(negated(
                format!("{}_NOT_{}", name, op),
                TypeRef::named(scalar),
            ));
        }
    }

    if field.scalar.is_comparable() {
        for op in ["GT", "GTE", "LT", "LTE"] {
            fields.push(InputValue::new(
                format!("{}_{}", name, op),
                TypeRef::named(scalar),
            ));
        }
    }

    fields
}

fn relationship_filter_fields(
    field: &FieldNode,
    edge: &RelationshipEdge,
    target: &RelationshipTarget<'_>,
) -> Vec<InputValue> {
    let names = RelationshipNames::new(&edge.source, &field.name);
    let node_where = TypeRef::named(naming::where_input(target.name()));
    let connection_where = TypeRef::named(names.connection_where());
    let name = &field.name;
    let connection = format!("{}Connection", name);

    match edge.cardinality() {
        Cardinality::One => vec![
            InputValue::new(name, node_where.clone()),
            negated(format!("{}_NOT", name), node_where),
            InputValue::new(&connection, connection_where.clone()),
            negated(format!("{}_NOT", connection), connection_where),
        ],
        Cardinality::Many => {
            let mut fields = quantified(name, &node_where);
            fields.extend(quantified(&connection, &connection_where));
            fields
        }
    }
}

/// `r`, `r_ALL`, `r_NONE`, `r_NOT`, `r_SINGLE`, `r_SOME`
fn quantified(name: &str, ty: &TypeRef) -> Vec<InputValue> {
    vec![
        InputValue::new(name, ty.clone())
            .deprecated(format!("Use `{}_SOME` instead.", name)),
        InputValue::new(format!("{}_ALL", name), ty.clone()),
        InputValue::new(format!("{}_NONE", name), ty.clone()),
        InputValue::new(format!("{}_NOT", name), ty.clone())
            .deprecated(format!("Use `{}_NONE` instead.", name)),
        InputValue::new(format!("{}_SINGLE", name), ty.clone()),
        InputValue::new(format!("{}_SOME", name), ty.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::with_context;
    use crate::ir::{Direction, FilterDirective, TypeGraph};
    use crate::options::AugmentOptions;

    fn where_of(graph: &TypeGraph, type_name: &str) -> Fragment {
        let node = graph.get(type_name).unwrap();
        with_context(graph, AugmentOptions::default(), |ctx| {
            synthesize_where(ctx, node)
        })
        .unwrap()
    }

    fn field_names(input: &InputObjectType) -> Vec<&str> {
        input.fields.iter().map(|f| f.name.as_str()).collect()
    }

    fn movies(title: FieldNode, actors: FieldNode) -> TypeGraph {
        let person = TypeNode::interface("Person").field(FieldNode::scalar("name", ScalarType::String));
        let actor = TypeNode::object("Actor")
            .implements("Person")
            .field(FieldNode::scalar("name", ScalarType::String))
            .field(FieldNode::scalar("born", ScalarType::Int).required());
        let movie = TypeNode::object("Movie")
            .field(title)
            .field(FieldNode::scalar("released", ScalarType::Boolean))
            .field(FieldNode::scalar("tags", ScalarType::String).list())
            .field(actors);
        TypeGraph::new(vec![person, actor, movie]).unwrap()
    }

    fn acted_in(target: &str) -> FieldNode {
        FieldNode::relationship("actors", target, "ACTED_IN", Direction::In)
            .list()
            .required()
    }

    #[test]
    fn test_default_scalar_filters() {
        let graph = movies(FieldNode::scalar("title", ScalarType::String), acted_in("Actor"));
        let fragment = where_of(&graph, "Movie");
        let input = fragment.input_object("MovieWhere").unwrap();

        for name in [
            "title",
            "title_IN",
            "title_CONTAINS",
            "title_STARTS_WITH",
            "title_ENDS_WITH",
        ] {
            let field = input.get_field(name).unwrap();
            assert!(field.deprecation.is_none(), "{} should not be deprecated", name);
        }
        for name in [
            "title_NOT",
            "title_NOT_IN",
            "title_NOT_CONTAINS",
            "title_NOT_STARTS_WITH",
            "title_NOT_ENDS_WITH",
        ] {
            let field = input.get_field(name).unwrap();
            assert_eq!(field.deprecation.as_deref(), Some(NEGATION_DEPRECATION));
        }
        assert_eq!(input.get_field("title_IN").unwrap().ty.to_string(), "[String]");
    }

    #[test]
    fn test_boolean_and_list_filters() {
        let graph = movies(FieldNode::scalar("title", ScalarType::String), acted_in("Actor"));
        let fragment = where_of(&graph, "Movie");
        let input = fragment.input_object("MovieWhere").unwrap();

        assert!(input.get_field("released").is_some());
        assert!(input.get_field("released_NOT").is_some());
        assert!(input.get_field("released_IN").is_none());

        assert_eq!(input.get_field("tags").unwrap().ty.to_string(), "[String!]");
        assert_eq!(input.get_field("tags_INCLUDES").unwrap().ty.to_string(), "String");
        assert!(input.get_field("tags_NOT_INCLUDES").unwrap().deprecation.is_some());
        assert!(input.get_field("tags_CONTAINS").is_none());
    }

    #[test]
    fn test_required_numeric_filters() {
        let graph = movies(FieldNode::scalar("title", ScalarType::String), acted_in("Actor"));
        let fragment = where_of(&graph, "Actor");
        let input = fragment.input_object("ActorWhere").unwrap();

        assert_eq!(input.get_field("born_IN").unwrap().ty.to_string(), "[Int!]");
        for op in ["GT", "GTE", "LT", "LTE"] {
            assert!(input.get_field(&format!("born_{}", op)).is_some());
        }
        assert!(input.get_field("born_CONTAINS").is_none());
    }

    #[test]
    fn test_by_value_false_removes_scalar_filters() {
        let graph = movies(
            FieldNode::scalar("title", ScalarType::String).filterable(FilterDirective::new(false, true)),
            acted_in("Actor"),
        );
        let fragment = where_of(&graph, "Movie");
        let input = fragment.input_object("MovieWhere").unwrap();
        assert!(field_names(input).iter().all(|n| !n.starts_with("title")));
    }

    #[test]
    fn test_many_relationship_filters() {
        let graph = movies(
            FieldNode::scalar("title", ScalarType::String),
            acted_in("Actor").filterable(FilterDirective::bare()),
        );
        let fragment = where_of(&graph, "Movie");
        let input = fragment.input_object("MovieWhere").unwrap();

        for name in [
            "actors_ALL",
            "actors_NONE",
            "actors_SINGLE",
            "actors_SOME",
            "actorsConnection_ALL",
            "actorsConnection_NONE",
            "actorsConnection_SINGLE",
            "actorsConnection_SOME",
        ] {
            assert!(input.get_field(name).is_some(), "missing {}", name);
        }
        assert_eq!(
            input.get_field("actors").unwrap().deprecation.as_deref(),
            Some("Use `actors_SOME` instead.")
        );
        assert_eq!(
            input.get_field("actorsConnection_NOT").unwrap().deprecation.as_deref(),
            Some("Use `actorsConnection_NONE` instead.")
        );
        assert_eq!(
            input.get_field("actorsConnection_SOME").unwrap().ty.to_string(),
            "MovieActorsConnectionWhere"
        );
        assert_eq!(input.get_field("actors_ALL").unwrap().ty.to_string(), "ActorWhere");
        assert!(input.get_field("actorsAggregate").is_none());
    }

    #[test]
    fn test_aggregate_field_requires_concrete_target() {
        let graph = movies(
            FieldNode::scalar("title", ScalarType::String),
            acted_in("Actor").filterable(FilterDirective::new(true, true)),
        );
        let fragment = where_of(&graph, "Movie");
        let input = fragment.input_object("MovieWhere").unwrap();
        assert_eq!(
            input.get_field("actorsAggregate").unwrap().ty.to_string(),
            "MovieActorsAggregateInput"
        );

        let graph = movies(
            FieldNode::scalar("title", ScalarType::String),
            acted_in("Person").filterable(FilterDirective::new(true, true)),
        );
        let fragment = where_of(&graph, "Movie");
        let input = fragment.input_object("MovieWhere").unwrap();
        assert!(input.get_field("actorsAggregate").is_none());
        assert!(input.get_field("actorsConnection_SOME").is_some());
        assert_eq!(input.get_field("actors_SOME").unwrap().ty.to_string(), "PersonWhere");
    }

    #[test]
    fn test_single_relationship_filters() {
        let director = FieldNode::relationship("director", "Actor", "DIRECTED", Direction::In);
        let graph = movies(FieldNode::scalar("title", ScalarType::String), director);
        let fragment = where_of(&graph, "Movie");
        let input = fragment.input_object("MovieWhere").unwrap();

        assert!(input.get_field("director").unwrap().deprecation.is_none());
        assert!(input.get_field("director_NOT").unwrap().deprecation.is_some());
        assert!(input.get_field("directorConnection").is_some());
        assert!(input.get_field("directorConnection_NOT").is_some());
        assert!(input.get_field("director_SOME").is_none());
    }

    #[test]
    fn test_combinators_always_present() {
        let off = FilterDirective::new(false, false);
        let movie = TypeNode::object("Movie")
            .field(FieldNode::scalar("title", ScalarType::String).filterable(off))
            .field(FieldNode::relationship("sequel", "Movie", "SEQUEL_OF", Direction::Out).filterable(off));
        let graph = TypeGraph::new(vec![movie]).unwrap();

        let fragment = where_of(&graph, "Movie");
        let input = fragment.input_object("MovieWhere").unwrap();
        assert_eq!(field_names(input), vec!["AND", "NOT", "OR"]);
        assert_eq!(input.get_field("AND").unwrap().ty.to_string(), "[MovieWhere!]");
        assert!(!input.omit_when_empty);
    }

    #[test]
    fn test_interface_where() {
        let graph = movies(FieldNode::scalar("title", ScalarType::String), acted_in("Actor"));
        let fragment = where_of(&graph, "Person");
        let input = fragment.input_object("PersonWhere").unwrap();
        assert_eq!(
            input.get_field("typename_IN").unwrap().ty.to_string(),
            "[PersonImplementation!]"
        );
        assert!(input.get_field("name_CONTAINS").is_some());
        assert!(fragment.get("PersonImplementation").is_some());
    }

    #[test]
    fn test_union_where() {
        let movie = TypeNode::object("Movie").field(FieldNode::scalar("title", ScalarType::String));
        let genre = TypeNode::object("Genre").field(FieldNode::scalar("name", ScalarType::String));
        let search = TypeNode::union("Search", ["Genre", "Movie"]);
        let graph = TypeGraph::new(vec![movie, genre, search]).unwrap();

        let fragment = where_of(&graph, "Search");
        let input = fragment.input_object("SearchWhere").unwrap();
        assert_eq!(input.get_field("Genre").unwrap().ty.to_string(), "GenreWhere");
        assert_eq!(input.get_field("Movie").unwrap().ty.to_string(), "MovieWhere");
    }
}
