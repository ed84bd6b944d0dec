//! Helpers shared by the scenario tests

use crate::schema::{GeneratedSchema, InputObjectType};
use crate::{AugmentOptions, TypeGraph, TypeGraphDefinition};

/// Build a validated graph from a type graph document
pub(crate) fn graph_from_json(json: &str) -> TypeGraph {
    let definition = TypeGraphDefinition::from_json(json).expect("valid type graph document");
    TypeGraph::new(definition.types).expect("valid type graph")
}

/// Augment a type graph document, honouring its `features`
pub(crate) fn augment_json(json: &str) -> GeneratedSchema {
    let definition = TypeGraphDefinition::from_json(json).expect("valid type graph document");
    let options = definition.features;
    let graph = TypeGraph::new(definition.types).expect("valid type graph");
    crate::augment(&graph, options).expect("augmentation succeeds")
}

/// Augment with subscriptions forced on
pub(crate) fn augment_with_subscriptions(json: &str) -> GeneratedSchema {
    let graph = graph_from_json(json);
    crate::augment(&graph, AugmentOptions::default().with_subscriptions())
        .expect("augmentation succeeds")
}

/// Look up an input object that must exist
pub(crate) fn input<'s>(schema: &'s GeneratedSchema, name: &str) -> &'s InputObjectType {
    schema
        .input_object(name)
        .unwrap_or_else(|| panic!("input {} is missing", name))
}

/// Whether `input` has a field called `name`
pub(crate) fn has_field(input: &InputObjectType, name: &str) -> bool {
    input.get_field(name).is_some()
}

/// Movie/Actor graph: `Movie.title` aggregation-only, `Actor.movies`
/// aggregatable
pub(crate) const MOVIES: &str = r#"{
    "types": [
        {"name": "Movie", "kind": "object", "fields": [
            {"name": "title", "type": "String", "filterable": {"byValue": false, "byAggregate": true}},
            {"name": "actors", "list": true, "required": true,
             "relationship": {"target": "Actor", "type": "ACTED_IN", "direction": "IN"}}
        ]},
        {"name": "Actor", "kind": "object", "fields": [
            {"name": "name", "type": "String", "required": true},
            {"name": "movies", "list": true, "required": true,
             "relationship": {"target": "Movie", "type": "ACTED_IN", "direction": "OUT"},
             "filterable": {"byValue": true, "byAggregate": true}}
        ]}
    ],
    "features": {"subscriptions": true}
}"#;

/// Movie with an `actors` relationship to the `Person` interface
pub(crate) const INTERFACE_ACTORS: &str = r#"{
    "types": [
        {"name": "Person", "kind": "interface", "fields": [
            {"name": "name", "type": "String", "required": true}
        ]},
        {"name": "Actor", "kind": "object", "implements": ["Person"], "fields": [
            {"name": "name", "type": "String", "required": true},
            {"name": "born", "type": "Int"}
        ]},
        {"name": "Movie", "kind": "object", "fields": [
            {"name": "title", "type": "String"},
            {"name": "actors", "list": true, "required": true,
             "relationship": {"target": "Person", "type": "ACTED_IN", "direction": "IN"},
             "filterable": {"byValue": true, "byAggregate": true}}
        ]}
    ]
}"#;

/// Every shape at once: interface, union, single and list relationships,
/// custom scalars
pub(crate) const CATALOG: &str = r#"{
    "types": [
        {"name": "Person", "kind": "interface", "fields": [
            {"name": "name", "type": "String", "required": true}
        ]},
        {"name": "Actor", "kind": "object", "implements": ["Person"], "fields": [
            {"name": "name", "type": "String", "required": true},
            {"name": "born", "type": "DateTime"},
            {"name": "movies", "list": true,
             "relationship": {"target": "Movie", "type": "ACTED_IN", "direction": "OUT"}}
        ]},
        {"name": "Genre", "kind": "object", "fields": [
            {"name": "name", "type": "String", "required": true}
        ]},
        {"name": "Search", "kind": "union", "members": ["Genre", "Movie"]},
        {"name": "Movie", "kind": "object", "fields": [
            {"name": "id", "type": "ID", "required": true},
            {"name": "title", "type": "String", "filterable": {"byAggregate": true}},
            {"name": "budget", "type": "BigInt"},
            {"name": "rating", "type": "Float"},
            {"name": "tags", "type": "String", "list": true},
            {"name": "released", "type": "Boolean"},
            {"name": "cast", "list": true, "required": true,
             "relationship": {"target": "Person", "type": "ACTED_IN", "direction": "IN"}},
            {"name": "director", "required": true,
             "relationship": {"target": "Actor", "type": "DIRECTED", "direction": "IN"}},
            {"name": "related", "list": true,
             "relationship": {"target": "Search", "type": "RELATED", "direction": "OUT"}}
        ]}
    ],
    "features": {"subscriptions": true}
}"#;
