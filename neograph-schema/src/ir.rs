//! Intermediate Representation (IR) of the annotated type graph
//!
//! The IR is what the schema augmenter consumes: user-declared object types,
//! interfaces and unions, their scalar and relationship fields, and the
//! `@filterable` capability data attached to each field. Directive syntax is
//! already resolved into plain data by the time it lands here.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::AugmentError;
use crate::options::AugmentOptions;

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A concrete object type
    Object,
    /// An interface implemented by object types
    Interface,
    /// A union of object types
    Union,
}

/// Scalar types a field can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum ScalarType {
    /// `ID`
    #[serde(rename = "ID")]
    Id,
    /// `String`
    String,
    /// `Int`
    Int,
    /// `Float`
    Float,
    /// `BigInt` (custom scalar)
    BigInt,
    /// `Boolean`
    Boolean,
    /// `DateTime` (custom scalar)
    DateTime,
}

impl ScalarType {
    /// GraphQL name of the scalar
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Id => "ID",
            ScalarType::String => "String",
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
            ScalarType::BigInt => "BigInt",
            ScalarType::Boolean => "Boolean",
            ScalarType::DateTime => "DateTime",
        }
    }

    /// Whether the scalar is one of the GraphQL built-ins
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ScalarType::BigInt | ScalarType::DateTime)
    }

    /// Whether the scalar supports substring matching filters
    pub fn is_textual(&self) -> bool {
        matches!(self, ScalarType::Id | ScalarType::String)
    }

    /// Whether the scalar supports `_GT`/`_GTE`/`_LT`/`_LTE` filters
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            ScalarType::Int | ScalarType::Float | ScalarType::BigInt | ScalarType::DateTime
        )
    }

    /// Whether aggregation functions are defined over the scalar
    pub fn is_aggregatable(&self) -> bool {
        !matches!(self, ScalarType::Boolean)
    }
}

/// Direction of a relationship in the underlying graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Incoming edge
    In,
    /// Outgoing edge
    Out,
}

/// How many nodes sit at the far end of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// At most one related node
    One,
    /// A list of related nodes
    Many,
}

/// `@filterable` directive arguments as declared on a field
///
/// A missing sub-flag means the directive did not mention it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDirective {
    /// Declared `byValue`
    #[serde(default)]
    pub by_value: Option<bool>,
    /// Declared `byAggregate`
    #[serde(default)]
    pub by_aggregate: Option<bool>,
}

impl FilterDirective {
    /// A directive with both flags spelled out
    pub fn new(by_value: bool, by_aggregate: bool) -> Self {
        Self {
            by_value: Some(by_value),
            by_aggregate: Some(by_aggregate),
        }
    }

    /// A bare `@filterable` with no arguments
    pub fn bare() -> Self {
        Self::default()
    }

    /// Whether neither flag was given
    pub fn is_bare(&self) -> bool {
        self.by_value.is_none() && self.by_aggregate.is_none()
    }
}

/// A scalar field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarField {
    /// Scalar type
    pub scalar: ScalarType,
    /// Declared as a list (`[T!]`)
    pub list: bool,
    /// Declared non-null
    pub required: bool,
}

/// A relationship field edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipEdge {
    /// Owning type name, filled in when the graph is built
    pub source: String,
    /// Target type name (object, interface or union)
    pub target: String,
    /// Relationship type in the graph database (e.g. `ACTED_IN`)
    pub relationship_type: String,
    /// Edge direction
    pub direction: Direction,
    /// Declared as a list
    pub list: bool,
    /// Declared non-null
    pub required: bool,
}

impl RelationshipEdge {
    /// Cardinality inferred from the declared field type
    pub fn cardinality(&self) -> Cardinality {
        if self.list {
            Cardinality::Many
        } else {
            Cardinality::One
        }
    }
}

/// What a field holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A scalar value
    Scalar(ScalarField),
    /// A relationship to other nodes
    Relationship(RelationshipEdge),
}

/// A field of a declared type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawField")]
pub struct FieldNode {
    /// Field name, unique within its type
    pub name: String,
    /// Scalar or relationship payload
    pub kind: FieldKind,
    /// `@filterable` arguments, if the directive is present
    pub filterable: Option<FilterDirective>,
}

impl FieldNode {
    /// A nullable, non-list scalar field
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar(ScalarField {
                scalar,
                list: false,
                required: false,
            }),
            filterable: None,
        }
    }

    /// A nullable, single-valued relationship field
    pub fn relationship(
        name: impl Into<String>,
        target: impl Into<String>,
        relationship_type: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Relationship(RelationshipEdge {
                source: String::new(),
                target: target.into(),
                relationship_type: relationship_type.into(),
                direction,
                list: false,
                required: false,
            }),
            filterable: None,
        }
    }

    /// Mark the field non-null
    pub fn required(mut self) -> Self {
        match &mut self.kind {
            FieldKind::Scalar(s) => s.required = true,
            FieldKind::Relationship(r) => r.required = true,
        }
        self
    }

    /// Mark the field as a list
    pub fn list(mut self) -> Self {
        match &mut self.kind {
            FieldKind::Scalar(s) => s.list = true,
            FieldKind::Relationship(r) => r.list = true,
        }
        self
    }

    /// Attach a `@filterable` directive
    pub fn filterable(mut self, directive: FilterDirective) -> Self {
        self.filterable = Some(directive);
        self
    }

    /// Scalar payload, if this is a scalar field
    pub fn as_scalar(&self) -> Option<&ScalarField> {
        match &self.kind {
            FieldKind::Scalar(s) => Some(s),
            FieldKind::Relationship(_) => None,
        }
    }

    /// Relationship payload, if this is a relationship field
    pub fn as_relationship(&self) -> Option<&RelationshipEdge> {
        match &self.kind {
            FieldKind::Relationship(r) => Some(r),
            FieldKind::Scalar(_) => None,
        }
    }
}

/// Wire shape of a field in a type graph document
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    #[serde(rename = "type", default)]
    scalar: Option<ScalarType>,
    #[serde(default)]
    list: bool,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    relationship: Option<RawRelationship>,
    #[serde(default)]
    filterable: Option<FilterDirective>,
}

#[derive(Deserialize)]
struct RawRelationship {
    target: String,
    #[serde(rename = "type")]
    relationship_type: String,
    direction: Direction,
}

impl TryFrom<RawField> for FieldNode {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = match (raw.scalar, raw.relationship) {
            (Some(scalar), None) => FieldKind::Scalar(ScalarField {
                scalar,
                list: raw.list,
                required: raw.required,
            }),
            (None, Some(rel)) => FieldKind::Relationship(RelationshipEdge {
                source: String::new(),
                target: rel.target,
                relationship_type: rel.relationship_type,
                direction: rel.direction,
                list: raw.list,
                required: raw.required,
            }),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "field '{}' declares both a scalar type and a relationship",
                    raw.name
                ));
            }
            (None, None) => {
                return Err(format!(
                    "field '{}' declares neither a scalar type nor a relationship",
                    raw.name
                ));
            }
        };

        Ok(FieldNode {
            name: raw.name,
            kind,
            filterable: raw.filterable,
        })
    }
}

/// A user-declared type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeNode {
    /// Type name, unique in the graph
    pub name: String,
    /// Object, interface or union
    pub kind: TypeKind,
    /// Fields in declaration order (empty for unions)
    #[serde(default)]
    pub fields: Vec<FieldNode>,
    /// Implemented interfaces (object types only)
    #[serde(default)]
    pub implements: Vec<String>,
    /// Union members (unions only)
    #[serde(default)]
    pub members: Vec<String>,
}

impl TypeNode {
    /// An empty object type
    pub fn object(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Object)
    }

    /// An empty interface
    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Interface)
    }

    /// A union over the given members
    pub fn union<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = Self::with_kind(name, TypeKind::Union);
        node.members = members.into_iter().map(Into::into).collect();
        node
    }

    fn with_kind(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Append a field
    pub fn field(mut self, field: FieldNode) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare an implemented interface
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Interfaces and unions are abstract
    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Union)
    }

    /// Look up a field by name
    pub fn get_field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Scalar fields in declaration order
    pub fn scalar_fields(&self) -> impl Iterator<Item = (&FieldNode, &ScalarField)> {
        self.fields
            .iter()
            .filter_map(|f| f.as_scalar().map(|s| (f, s)))
    }

    /// Relationship fields in declaration order
    pub fn relationship_fields(&self) -> impl Iterator<Item = (&FieldNode, &RelationshipEdge)> {
        self.fields
            .iter()
            .filter_map(|f| f.as_relationship().map(|r| (f, r)))
    }

    /// Whether the type declares any relationship
    pub fn has_relationships(&self) -> bool {
        self.relationship_fields().next().is_some()
    }
}

/// The far end of a relationship, resolved against the graph
#[derive(Debug, Clone)]
pub enum RelationshipTarget<'g> {
    /// A concrete object type
    Concrete(&'g TypeNode),
    /// An interface and the objects implementing it
    Interface {
        /// The interface node
        interface: &'g TypeNode,
        /// Implementing object types in declaration order
        implementations: Vec<&'g TypeNode>,
    },
    /// A union and its members
    Union {
        /// The union node
        union: &'g TypeNode,
        /// Member object types in declaration order
        members: Vec<&'g TypeNode>,
    },
}

impl<'g> RelationshipTarget<'g> {
    /// The target's own node
    pub fn node(&self) -> &'g TypeNode {
        match self {
            RelationshipTarget::Concrete(node) => node,
            RelationshipTarget::Interface { interface, .. } => interface,
            RelationshipTarget::Union { union, .. } => union,
        }
    }

    /// Target type name
    pub fn name(&self) -> &'g str {
        &self.node().name
    }

    /// Aggregation is undefined over interfaces and unions
    pub fn is_abstract(&self) -> bool {
        !matches!(self, RelationshipTarget::Concrete(_))
    }
}

/// A type graph document, as read from JSON
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeGraphDefinition {
    /// Declared types
    pub types: Vec<TypeNode>,
    /// Generation features
    #[serde(default)]
    pub features: AugmentOptions,
}

impl TypeGraphDefinition {
    /// Decode a type graph document
    pub fn from_json(input: &str) -> Result<Self, AugmentError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Names the generated schema always owns: root types, scalars and the
/// shared pagination, sorting, event and mutation info types
const RESERVED_TYPE_NAMES: [&str; 17] = [
    "Query",
    "Mutation",
    "Subscription",
    "ID",
    "String",
    "Int",
    "Float",
    "Boolean",
    "BigInt",
    "DateTime",
    "PageInfo",
    "SortDirection",
    "QueryOptions",
    "EventType",
    "CreateInfo",
    "DeleteInfo",
    "UpdateInfo",
];

/// A validated, immutable type graph
#[derive(Debug, Clone)]
pub struct TypeGraph {
    types: Vec<TypeNode>,
    index: HashMap<String, usize>,
}

impl TypeGraph {
    /// Validate declared types and build the graph
    pub fn new(types: Vec<TypeNode>) -> Result<Self, AugmentError> {
        let mut index = HashMap::with_capacity(types.len());
        for (i, node) in types.iter().enumerate() {
            if index.insert(node.name.clone(), i).is_some() {
                return Err(AugmentError::DuplicateType(node.name.clone()));
            }
        }

        let mut graph = Self { types, index };
        graph.link_relationship_sources();
        graph.validate()?;
        Ok(graph)
    }

    fn link_relationship_sources(&mut self) {
        for node in &mut self.types {
            for field in &mut node.fields {
                if let FieldKind::Relationship(edge) = &mut field.kind {
                    edge.source = node.name.clone();
                }
            }
        }
    }

    fn validate(&self) -> Result<(), AugmentError> {
        for node in &self.types {
            if RESERVED_TYPE_NAMES.contains(&node.name.as_str()) {
                return Err(AugmentError::ReservedTypeName {
                    type_name: node.name.clone(),
                    reason: "the generated schema defines a type with this name".to_string(),
                });
            }

            let mut seen = HashSet::new();
            for field in &node.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(AugmentError::DuplicateField {
                        type_name: node.name.clone(),
                        field_name: field.name.clone(),
                    });
                }
            }

            match node.kind {
                TypeKind::Object => self.validate_object(node)?,
                TypeKind::Interface => self.validate_interface(node)?,
                TypeKind::Union => self.validate_union(node)?,
            }
        }
        Ok(())
    }

    fn validate_object(&self, node: &TypeNode) -> Result<(), AugmentError> {
        if node.scalar_fields().next().is_none() {
            return Err(AugmentError::invalid_field(
                &node.name,
                "",
                "object types must declare at least one scalar field",
            ));
        }

        for (field, edge) in node.relationship_fields() {
            if !self.index.contains_key(&edge.target) {
                return Err(AugmentError::UnknownType {
                    type_name: edge.target.clone(),
                    referenced_by: format!("{}.{}", node.name, field.name),
                });
            }
        }

        for interface_name in &node.implements {
            let interface = self.get(interface_name).ok_or_else(|| AugmentError::UnknownType {
                type_name: interface_name.clone(),
                referenced_by: node.name.clone(),
            })?;
            if interface.kind != TypeKind::Interface {
                return Err(AugmentError::InvalidImplements {
                    object: node.name.clone(),
                    interface: interface_name.clone(),
                });
            }
            for required in &interface.fields {
                if node.get_field(&required.name).is_none() {
                    return Err(AugmentError::MissingInterfaceField {
                        object: node.name.clone(),
                        interface: interface_name.clone(),
                        field: required.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_interface(&self, node: &TypeNode) -> Result<(), AugmentError> {
        if let Some((field, _)) = node.relationship_fields().next() {
            return Err(AugmentError::invalid_field(
                &node.name,
                &field.name,
                "relationships are only supported on object types",
            ));
        }
        if node.fields.is_empty() {
            return Err(AugmentError::invalid_field(
                &node.name,
                "",
                "interfaces must declare at least one field",
            ));
        }
        if !node.implements.is_empty() || !node.members.is_empty() {
            return Err(AugmentError::invalid_field(
                &node.name,
                "",
                "interfaces cannot implement interfaces or list members",
            ));
        }
        Ok(())
    }

    fn validate_union(&self, node: &TypeNode) -> Result<(), AugmentError> {
        if let Some(field) = node.fields.first() {
            return Err(AugmentError::invalid_field(
                &node.name,
                &field.name,
                "unions cannot declare fields",
            ));
        }
        if node.members.is_empty() {
            return Err(AugmentError::InvalidUnionMember {
                union: node.name.clone(),
                member: "<none>".to_string(),
            });
        }
        for member_name in &node.members {
            let member = self.get(member_name).ok_or_else(|| AugmentError::UnknownType {
                type_name: member_name.clone(),
                referenced_by: node.name.clone(),
            })?;
            if member.kind != TypeKind::Object {
                return Err(AugmentError::InvalidUnionMember {
                    union: node.name.clone(),
                    member: member_name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<&TypeNode> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    /// All types in declaration order
    pub fn types(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.iter()
    }

    /// Object types in declaration order
    pub fn objects(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.iter().filter(|t| t.kind == TypeKind::Object)
    }

    /// Object types implementing `interface`, in declaration order
    pub fn implementations(&self, interface: &str) -> Vec<&TypeNode> {
        self.objects()
            .filter(|t| t.implements.iter().any(|i| i == interface))
            .collect()
    }

    /// Resolve the far end of a relationship
    pub fn target(&self, edge: &RelationshipEdge) -> Result<RelationshipTarget<'_>, AugmentError> {
        let node = self.get(&edge.target).ok_or_else(|| AugmentError::UnknownType {
            type_name: edge.target.clone(),
            referenced_by: edge.source.clone(),
        })?;

        Ok(match node.kind {
            TypeKind::Object => RelationshipTarget::Concrete(node),
            TypeKind::Interface => RelationshipTarget::Interface {
                interface: node,
                implementations: self.implementations(&node.name),
            },
            TypeKind::Union => RelationshipTarget::Union {
                union: node,
                members: node
                    .members
                    .iter()
                    .filter_map(|m| self.get(m))
                    .collect(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> TypeNode {
        TypeNode::object("Movie").field(FieldNode::scalar("title", ScalarType::String))
    }

    #[test]
    fn test_relationship_source_is_linked() {
        let actor = TypeNode::object("Actor")
            .field(FieldNode::scalar("name", ScalarType::String).required())
            .field(
                FieldNode::relationship("movies", "Movie", "ACTED_IN", Direction::Out)
                    .list()
                    .required(),
            );
        let graph = TypeGraph::new(vec![actor, movie()]).unwrap();

        let (_, edge) = graph.get("Actor").unwrap().relationship_fields().next().unwrap();
        assert_eq!(edge.source, "Actor");
        assert_eq!(edge.cardinality(), Cardinality::Many);
    }

    #[test]
    fn test_unknown_relationship_target() {
        let actor = TypeNode::object("Actor")
            .field(FieldNode::scalar("name", ScalarType::String))
            .field(FieldNode::relationship("movies", "Film", "ACTED_IN", Direction::Out));
        let err = TypeGraph::new(vec![actor]).unwrap_err();
        assert!(matches!(err, AugmentError::UnknownType { ref type_name, .. } if type_name == "Film"));
    }

    #[test]
    fn test_duplicate_type() {
        let err = TypeGraph::new(vec![movie(), movie()]).unwrap_err();
        assert!(matches!(err, AugmentError::DuplicateType(ref name) if name == "Movie"));
    }

    #[test]
    fn test_reserved_type_names() {
        for name in ["PageInfo", "Query", "SortDirection", "DateTime", "CreateInfo"] {
            let node = TypeNode::object(name).field(FieldNode::scalar("title", ScalarType::String));
            let err = TypeGraph::new(vec![node, movie()]).unwrap_err();
            assert!(
                matches!(err, AugmentError::ReservedTypeName { ref type_name, .. } if type_name == name),
                "{} accepted",
                name
            );
        }
    }

    #[test]
    fn test_union_member_must_be_object() {
        let person = TypeNode::interface("Person").field(FieldNode::scalar("name", ScalarType::String));
        let search = TypeNode::union("Search", ["Movie", "Person"]);
        let err = TypeGraph::new(vec![movie(), person, search]).unwrap_err();
        assert!(matches!(err, AugmentError::InvalidUnionMember { ref member, .. } if member == "Person"));
    }

    #[test]
    fn test_missing_interface_field() {
        let person = TypeNode::interface("Person").field(FieldNode::scalar("name", ScalarType::String));
        let actor = TypeNode::object("Actor")
            .implements("Person")
            .field(FieldNode::scalar("born", ScalarType::Int));
        let err = TypeGraph::new(vec![person, actor]).unwrap_err();
        assert!(matches!(err, AugmentError::MissingInterfaceField { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_interface_relationships_rejected() {
        let person = TypeNode::interface("Person")
            .field(FieldNode::scalar("name", ScalarType::String))
            .field(FieldNode::relationship("movies", "Movie", "ACTED_IN", Direction::Out));
        let err = TypeGraph::new(vec![movie(), person]).unwrap_err();
        assert!(matches!(err, AugmentError::InvalidField { .. }));
    }

    #[test]
    fn test_target_resolution() {
        let person = TypeNode::interface("Person").field(FieldNode::scalar("name", ScalarType::String));
        let actor = TypeNode::object("Actor")
            .implements("Person")
            .field(FieldNode::scalar("name", ScalarType::String));
        let film = movie()
            .field(FieldNode::relationship("cast", "Person", "ACTED_IN", Direction::In).list())
            .field(FieldNode::relationship("related", "Search", "RELATED", Direction::Out));
        let search = TypeNode::union("Search", ["Actor", "Movie"]);
        let graph = TypeGraph::new(vec![person, actor, film, search]).unwrap();

        let movie = graph.get("Movie").unwrap();
        let targets: Vec<_> = movie
            .relationship_fields()
            .map(|(_, edge)| graph.target(edge).unwrap())
            .collect();

        match &targets[0] {
            RelationshipTarget::Interface { implementations, .. } => {
                assert_eq!(implementations.len(), 1);
                assert_eq!(implementations[0].name, "Actor");
            }
            other => panic!("expected interface target, got {:?}", other),
        }
        match &targets[1] {
            RelationshipTarget::Union { members, .. } => assert_eq!(members.len(), 2),
            other => panic!("expected union target, got {:?}", other),
        }
        assert!(targets.iter().all(|t| t.is_abstract()));
    }

    #[test]
    fn test_field_shape_from_json() {
        let json = r#"{
            "types": [
                {"name": "Movie", "kind": "object", "fields": [
                    {"name": "title", "type": "String", "filterable": {"byValue": false, "byAggregate": true, "future": 1}},
                    {"name": "actors", "list": true, "required": true,
                     "relationship": {"target": "Movie", "type": "SIMILAR", "direction": "OUT"}}
                ]}
            ],
            "features": {"subscriptions": true}
        }"#;
        let def = TypeGraphDefinition::from_json(json).unwrap();
        assert!(def.features.subscriptions);

        let title = &def.types[0].fields[0];
        assert_eq!(title.filterable, Some(FilterDirective::new(false, true)));
        let actors = def.types[0].fields[1].as_relationship().unwrap();
        assert_eq!(actors.direction, Direction::Out);
        assert!(actors.list && actors.required);
    }

    #[test]
    fn test_field_with_both_shapes_is_rejected() {
        let json = r#"{"types": [{"name": "Movie", "kind": "object", "fields": [
            {"name": "bad", "type": "String", "relationship": {"target": "Movie", "type": "X", "direction": "IN"}}
        ]}]}"#;
        assert!(matches!(
            TypeGraphDefinition::from_json(json),
            Err(AugmentError::Json(_))
        ));
    }
}
