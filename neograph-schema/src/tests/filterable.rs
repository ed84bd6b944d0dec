//! `@filterable` behaviour across the whole pipeline

use super::testkit::{INTERFACE_ACTORS, MOVIES, augment_json, graph_from_json, has_field, input};
use crate::AugmentOptions;

fn movie_graph(title: &str, movies: &str) -> String {
    format!(
        r#"{{
        "types": [
            {{"name": "Movie", "kind": "object", "fields": [
                {{"name": "title", "type": "String"{title}}},
                {{"name": "released", "type": "Int", "filterable": {{"byValue": true, "byAggregate": true}}}}
            ]}},
            {{"name": "Actor", "kind": "object", "fields": [
                {{"name": "name", "type": "String"}},
                {{"name": "movies", "list": true,
                  "relationship": {{"target": "Movie", "type": "ACTED_IN", "direction": "OUT"}}{movies}}}
            ]}}
        ]
    }}"#
    )
}

#[test]
fn test_undirected_scalar_is_value_filterable_only() {
    let schema = augment_json(&movie_graph("", r#", "filterable": {"byValue": true, "byAggregate": true}"#));

    let movie_where = input(&schema, "MovieWhere");
    for name in ["title", "title_IN", "title_CONTAINS", "title_STARTS_WITH", "title_ENDS_WITH"] {
        assert!(has_field(movie_where, name), "{} missing", name);
    }

    let node = input(&schema, "ActorMoviesNodeAggregationWhereInput");
    assert!(node.fields.iter().all(|f| !f.name.starts_with("title_")));
    assert!(has_field(node, "released_AVERAGE_EQUAL"));
}

#[test]
fn test_aggregation_only_scalar() {
    let schema = augment_json(&movie_graph(
        r#", "filterable": {"byValue": false, "byAggregate": true}"#,
        r#", "filterable": {"byValue": true, "byAggregate": true}"#,
    ));

    let movie_where = input(&schema, "MovieWhere");
    assert!(movie_where.fields.iter().all(|f| !f.name.starts_with("title")));
    assert!(has_field(movie_where, "released_GT"));

    let node = input(&schema, "ActorMoviesNodeAggregationWhereInput");
    for name in [
        "title_AVERAGE_LENGTH_EQUAL",
        "title_LONGEST_LENGTH_GTE",
        "title_SHORTEST_LENGTH_LT",
    ] {
        assert!(has_field(node, name), "{} missing", name);
    }
}

#[test]
fn test_partial_directive_enables_omitted_flag() {
    let schema = augment_json(&movie_graph(
        r#", "filterable": {"byValue": false}"#,
        r#", "filterable": {"byValue": true}"#,
    ));

    assert!(!has_field(input(&schema, "MovieWhere"), "title"));
    assert!(has_field(input(&schema, "ActorWhere"), "moviesAggregate"));

    let node = input(&schema, "ActorMoviesNodeAggregationWhereInput");
    for name in [
        "title_AVERAGE_LENGTH_EQUAL",
        "title_AVERAGE_LENGTH_GT",
        "title_AVERAGE_LENGTH_LTE",
    ] {
        assert!(has_field(node, name), "{} missing", name);
    }
}

#[test]
fn test_relationship_aggregate_requires_by_aggregate() {
    let bare = augment_json(&movie_graph("", ""));
    assert!(!has_field(input(&bare, "ActorWhere"), "moviesAggregate"));
    assert!(!bare.contains("ActorMoviesAggregateInput"));
    assert!(has_field(input(&bare, "ActorWhere"), "movies_SOME"));

    let aggregating = augment_json(&movie_graph("", r#", "filterable": {"byValue": true, "byAggregate": true}"#));
    let actor_where = input(&aggregating, "ActorWhere");
    assert_eq!(
        actor_where.get_field("moviesAggregate").unwrap().ty.to_string(),
        "ActorMoviesAggregateInput"
    );
}

#[test]
fn test_value_filters_can_be_switched_off_for_relationships() {
    let schema = augment_json(&movie_graph("", r#", "filterable": {"byValue": false, "byAggregate": true}"#));
    let actor_where = input(&schema, "ActorWhere");

    assert!(!has_field(actor_where, "movies_SOME"));
    assert!(!has_field(actor_where, "moviesConnection_SOME"));
    assert!(has_field(actor_where, "moviesAggregate"));
}

#[test]
fn test_no_aggregation_filters_over_interface_target() {
    let schema = augment_json(INTERFACE_ACTORS);
    let movie_where = input(&schema, "MovieWhere");

    assert!(!has_field(movie_where, "actorsAggregate"));
    assert!(!schema.contains("MovieActorsAggregateInput"));
    assert!(!schema.contains("MovieActorsNodeAggregationWhereInput"));
    for name in [
        "actorsConnection_ALL",
        "actorsConnection_NONE",
        "actorsConnection_SINGLE",
        "actorsConnection_SOME",
    ] {
        assert_eq!(
            movie_where.get_field(name).unwrap().ty.to_string(),
            "MovieActorsConnectionWhere"
        );
    }
    assert!(schema.object("Movie").unwrap().get_field("actorsAggregate").is_none());
}

#[test]
fn test_no_aggregation_filters_over_union_target() {
    let json = r#"{
        "types": [
            {"name": "Genre", "kind": "object", "fields": [{"name": "name", "type": "String"}]},
            {"name": "Studio", "kind": "object", "fields": [{"name": "name", "type": "String"}]},
            {"name": "Owner", "kind": "union", "members": ["Genre", "Studio"]},
            {"name": "Movie", "kind": "object", "fields": [
                {"name": "title", "type": "String"},
                {"name": "owners", "list": true,
                 "relationship": {"target": "Owner", "type": "OWNED_BY", "direction": "OUT"},
                 "filterable": {"byValue": true, "byAggregate": true}}
            ]}
        ]
    }"#;
    let schema = augment_json(json);
    let movie_where = input(&schema, "MovieWhere");

    assert!(!has_field(movie_where, "ownersAggregate"));
    assert!(!schema.contains("MovieOwnersAggregateInput"));
    assert_eq!(
        movie_where.get_field("owners_SOME").unwrap().ty.to_string(),
        "OwnerWhere"
    );

    let owner_where = input(&schema, "OwnerWhere");
    assert_eq!(owner_where.get_field("Genre").unwrap().ty.to_string(), "GenreWhere");
    assert!(has_field(owner_where, "AND"));
}

#[test]
fn test_aggregation_only_title_scenario() {
    let schema = augment_json(MOVIES);
    let node = input(&schema, "ActorMoviesNodeAggregationWhereInput");

    assert_eq!(node.get_field("title_AVERAGE_LENGTH_EQUAL").unwrap().ty.to_string(), "Float");
    assert_eq!(node.get_field("title_LONGEST_LENGTH_GT").unwrap().ty.to_string(), "Int");
    assert!(node.get_field("title_EQUAL").unwrap().deprecation.is_some());

    assert!(!has_field(input(&schema, "MovieWhere"), "title"));
    assert!(!has_field(input(&schema, "MovieWhere"), "actorsAggregate"));
}

#[test]
fn test_capabilities_are_resolved_per_field() {
    let graph = graph_from_json(MOVIES);
    let capabilities = crate::capability::resolve_all(&graph);

    let title = capabilities.get("Movie", "title");
    assert!(!title.by_value);
    assert!(title.by_aggregate);

    let actors = capabilities.get("Movie", "actors");
    assert!(actors.by_value);
    assert!(!actors.by_aggregate);

    let augmented = crate::augment(&graph, AugmentOptions::default()).unwrap();
    assert!(augmented.subscription_type().is_none());
}
