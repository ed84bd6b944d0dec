//! Generated schema model
//!
//! Plain data describing the augmented schema: type definitions keyed by name,
//! their fields, arguments and type references. The assembler produces a
//! [`GeneratedSchema`]; the printer renders it as SDL.

use std::collections::BTreeMap;
use std::fmt;

/// A reference to a type, with list and non-null wrappers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A named type
    Named(String),
    /// `[T]`
    List(Box<TypeRef>),
    /// `T!`
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// `T`
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// `T!`
    pub fn non_null(self) -> Self {
        match self {
            TypeRef::NonNull(_) => self,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    /// `[T]`
    pub fn list(self) -> Self {
        TypeRef::List(Box::new(self))
    }

    /// `[T!]`
    pub fn list_of(name: impl Into<String>) -> Self {
        TypeRef::named(name).non_null().list()
    }

    /// Name of the innermost named type
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    /// Whether the outermost wrapper is non-null
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// An argument or input object field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Type
    pub ty: TypeRef,
    /// Default value, already in GraphQL literal form
    pub default_value: Option<String>,
    /// Deprecation reason
    pub deprecation: Option<String>,
}

impl InputValue {
    /// A plain input value
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty,
            default_value: None,
            deprecation: None,
        }
    }

    /// Set the default value literal
    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.default_value = Some(literal.into());
        self
    }

    /// Mark deprecated
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation = Some(reason.into());
        self
    }

    /// Attach a description
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A field of an object or interface type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Arguments
    pub arguments: Vec<InputValue>,
    /// Result type
    pub ty: TypeRef,
    /// Deprecation reason
    pub deprecation: Option<String>,
}

impl FieldDefinition {
    /// A field without arguments
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            ty,
            deprecation: None,
        }
    }

    /// Append an argument
    pub fn argument(mut self, argument: InputValue) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Attach a description
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Look up an argument by name
    pub fn get_argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// An object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Implemented interfaces
    pub implements: Vec<String>,
    /// Fields
    pub fields: Vec<FieldDefinition>,
}

impl ObjectType {
    /// An object type with no fields yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            implements: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Attach a description
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Look up a field by name
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// An interface type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceType {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Fields
    pub fields: Vec<FieldDefinition>,
}

impl InterfaceType {
    /// Look up a field by name
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Field names every filter input carries regardless of content
pub const COMBINATORS: [&str; 3] = ["AND", "NOT", "OR"];

/// An input object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Fields
    pub fields: Vec<InputValue>,
    /// Drop this input (and everything referencing it) when it has no
    /// fields besides `AND`/`OR`/`NOT`
    pub omit_when_empty: bool,
}

impl InputObjectType {
    /// An input object with no fields yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            omit_when_empty: false,
        }
    }

    /// Add `AND: [Self!]`, `OR: [Self!]` and `NOT: Self`
    pub fn with_combinators(mut self) -> Self {
        let name = self.name.clone();
        self.fields.push(InputValue::new("AND", TypeRef::list_of(&name)));
        self.fields.push(InputValue::new("NOT", TypeRef::named(&name)));
        self.fields.push(InputValue::new("OR", TypeRef::list_of(&name)));
        self
    }

    /// Mark the input for removal when it ends up with no content fields
    pub fn omitted_when_empty(mut self) -> Self {
        self.omit_when_empty = true;
        self
    }

    /// Append a field
    pub fn field(mut self, field: InputValue) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields
    pub fn fields(mut self, fields: impl IntoIterator<Item = InputValue>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Attach a description
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Look up a field by name
    pub fn get_field(&self, name: &str) -> Option<&InputValue> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether every field is a boolean combinator
    pub fn has_only_combinators(&self) -> bool {
        self.fields
            .iter()
            .all(|f| COMBINATORS.contains(&f.name.as_str()))
    }
}

/// An enum value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

impl EnumValue {
    /// A value without description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Attach a description
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An enum type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Values
    pub values: Vec<EnumValue>,
}

/// A union type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Member object types
    pub members: Vec<String>,
}

/// A custom scalar definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarDefinition {
    /// Name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Any generated type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinition {
    /// `type`
    Object(ObjectType),
    /// `interface`
    Interface(InterfaceType),
    /// `input`
    InputObject(InputObjectType),
    /// `enum`
    Enum(EnumType),
    /// `union`
    Union(UnionType),
    /// `scalar`
    Scalar(ScalarDefinition),
}

impl TypeDefinition {
    /// Type name
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(t) => &t.name,
            TypeDefinition::Interface(t) => &t.name,
            TypeDefinition::InputObject(t) => &t.name,
            TypeDefinition::Enum(t) => &t.name,
            TypeDefinition::Union(t) => &t.name,
            TypeDefinition::Scalar(t) => &t.name,
        }
    }

    /// Names of every type this definition refers to
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut names = Vec::new();
        match self {
            TypeDefinition::Object(t) => {
                names.extend(t.implements.iter().map(String::as_str));
                for field in &t.fields {
                    collect_field_refs(field, &mut names);
                }
            }
            TypeDefinition::Interface(t) => {
                for field in &t.fields {
                    collect_field_refs(field, &mut names);
                }
            }
            TypeDefinition::InputObject(t) => {
                names.extend(t.fields.iter().map(|f| f.ty.base_name()));
            }
            TypeDefinition::Union(t) => names.extend(t.members.iter().map(String::as_str)),
            TypeDefinition::Enum(_) | TypeDefinition::Scalar(_) => {}
        }
        names
    }

    /// Sort fields, arguments, values and members by name
    pub(crate) fn sort_members(&mut self) {
        match self {
            TypeDefinition::Object(t) => {
                t.implements.sort();
                sort_fields(&mut t.fields);
            }
            TypeDefinition::Interface(t) => sort_fields(&mut t.fields),
            TypeDefinition::InputObject(t) => t.fields.sort_by(|a, b| a.name.cmp(&b.name)),
            TypeDefinition::Enum(t) => t.values.sort_by(|a, b| a.name.cmp(&b.name)),
            TypeDefinition::Union(t) => t.members.sort(),
            TypeDefinition::Scalar(_) => {}
        }
    }
}

fn collect_field_refs<'a>(field: &'a FieldDefinition, names: &mut Vec<&'a str>) {
    names.push(field.ty.base_name());
    names.extend(field.arguments.iter().map(|a| a.ty.base_name()));
}

fn sort_fields(fields: &mut [FieldDefinition]) {
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    for field in fields {
        field.arguments.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

/// The augmented schema
///
/// Built once per run by the assembler; lookups by name are exact and
/// iteration is name-ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSchema {
    types: BTreeMap<String, TypeDefinition>,
}

impl GeneratedSchema {
    pub(crate) fn from_types(types: BTreeMap<String, TypeDefinition>) -> Self {
        Self { types }
    }

    /// Look up any type by name
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Whether a type with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Look up an object type
    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        match self.types.get(name) {
            Some(TypeDefinition::Object(t)) => Some(t),
            _ => None,
        }
    }

    /// Look up an interface type
    pub fn interface(&self, name: &str) -> Option<&InterfaceType> {
        match self.types.get(name) {
            Some(TypeDefinition::Interface(t)) => Some(t),
            _ => None,
        }
    }

    /// Look up an input object type
    pub fn input_object(&self, name: &str) -> Option<&InputObjectType> {
        match self.types.get(name) {
            Some(TypeDefinition::InputObject(t)) => Some(t),
            _ => None,
        }
    }

    /// Look up an enum type
    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        match self.types.get(name) {
            Some(TypeDefinition::Enum(t)) => Some(t),
            _ => None,
        }
    }

    /// Look up a union type
    pub fn union_type(&self, name: &str) -> Option<&UnionType> {
        match self.types.get(name) {
            Some(TypeDefinition::Union(t)) => Some(t),
            _ => None,
        }
    }

    /// The `Query` root type
    pub fn query_type(&self) -> Option<&ObjectType> {
        self.object("Query")
    }

    /// The `Mutation` root type
    pub fn mutation_type(&self) -> Option<&ObjectType> {
        self.object("Mutation")
    }

    /// The `Subscription` root type
    pub fn subscription_type(&self) -> Option<&ObjectType> {
        self.object("Subscription")
    }

    /// All definitions in name order
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the schema is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef::list_of("Movie").non_null();
        assert_eq!(ty.to_string(), "[Movie!]!");
        assert_eq!(ty.base_name(), "Movie");
        assert_eq!(TypeRef::named("Int").non_null().non_null().to_string(), "Int!");
    }

    #[test]
    fn test_combinators_only() {
        let input = InputObjectType::new("MovieSubscriptionWhere").with_combinators();
        assert!(input.has_only_combinators());
        let input = input.field(InputValue::new("title", TypeRef::named("String")));
        assert!(!input.has_only_combinators());
    }

    #[test]
    fn test_referenced_types() {
        let object = ObjectType::new("Movie").field(
            FieldDefinition::new("actors", TypeRef::list_of("Actor").non_null())
                .argument(InputValue::new("where", TypeRef::named("ActorWhere"))),
        );
        let def = TypeDefinition::Object(object);
        assert_eq!(def.referenced_types(), vec!["Actor", "ActorWhere"]);
    }

    #[test]
    fn test_sort_members() {
        let mut def = TypeDefinition::InputObject(
            InputObjectType::new("MovieWhere")
                .field(InputValue::new("title", TypeRef::named("String")))
                .with_combinators(),
        );
        def.sort_members();
        let TypeDefinition::InputObject(input) = def else {
            unreachable!()
        };
        let names: Vec<_> = input.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["AND", "NOT", "OR", "title"]);
    }
}
