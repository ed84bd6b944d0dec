//! SDL printing
//!
//! Renders a [`GeneratedSchema`] as schema definition language. Definitions
//! come out in name order, one blank line apart, with members already sorted
//! by the assembler, so the output is stable across runs.

use std::fmt;

use crate::schema::{
    EnumType, FieldDefinition, GeneratedSchema, InputObjectType, InputValue, InterfaceType,
    ObjectType, ScalarDefinition, TypeDefinition, UnionType,
};

impl fmt::Display for GeneratedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for definition in self.types() {
            if !first {
                f.write_str("\n")?;
            }
            first = false;
            write!(f, "{}", definition)?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDefinition::Object(t) => print_object(f, t),
            TypeDefinition::Interface(t) => print_interface(f, t),
            TypeDefinition::InputObject(t) => print_input_object(f, t),
            TypeDefinition::Enum(t) => print_enum(f, t),
            TypeDefinition::Union(t) => print_union(f, t),
            TypeDefinition::Scalar(t) => print_scalar(f, t),
        }
    }
}

fn print_object(f: &mut fmt::Formatter<'_>, object: &ObjectType) -> fmt::Result {
    print_description(f, object.description.as_deref(), "")?;
    write!(f, "type {}", object.name)?;
    if !object.implements.is_empty() {
        write!(f, " implements {}", object.implements.join(" & "))?;
    }
    f.write_str(" {\n")?;
    for field in &object.fields {
        print_field(f, field)?;
    }
    f.write_str("}\n")
}

fn print_interface(f: &mut fmt::Formatter<'_>, interface: &InterfaceType) -> fmt::Result {
    print_description(f, interface.description.as_deref(), "")?;
    writeln!(f, "interface {} {{", interface.name)?;
    for field in &interface.fields {
        print_field(f, field)?;
    }
    f.write_str("}\n")
}

fn print_input_object(f: &mut fmt::Formatter<'_>, input: &InputObjectType) -> fmt::Result {
    print_description(f, input.description.as_deref(), "")?;
    writeln!(f, "input {} {{", input.name)?;
    for field in &input.fields {
        print_description(f, field.description.as_deref(), "  ")?;
        writeln!(f, "  {}", input_value(field))?;
    }
    f.write_str("}\n")
}

fn print_enum(f: &mut fmt::Formatter<'_>, enum_type: &EnumType) -> fmt::Result {
    print_description(f, enum_type.description.as_deref(), "")?;
    writeln!(f, "enum {} {{", enum_type.name)?;
    for value in &enum_type.values {
        print_description(f, value.description.as_deref(), "  ")?;
        writeln!(f, "  {}", value.name)?;
    }
    f.write_str("}\n")
}

fn print_union(f: &mut fmt::Formatter<'_>, union: &UnionType) -> fmt::Result {
    print_description(f, union.description.as_deref(), "")?;
    writeln!(f, "union {} = {}", union.name, union.members.join(" | "))
}

fn print_scalar(f: &mut fmt::Formatter<'_>, scalar: &ScalarDefinition) -> fmt::Result {
    print_description(f, scalar.description.as_deref(), "")?;
    writeln!(f, "scalar {}", scalar.name)
}

fn print_field(f: &mut fmt::Formatter<'_>, field: &FieldDefinition) -> fmt::Result {
    print_description(f, field.description.as_deref(), "  ")?;
    write!(f, "  {}", field.name)?;
    if !field.arguments.is_empty() {
        let arguments: Vec<String> = field.arguments.iter().map(input_value).collect();
        write!(f, "({})", arguments.join(", "))?;
    }
    write!(f, ": {}", field.ty)?;
    if let Some(reason) = &field.deprecation {
        write!(f, " {}", deprecated(reason))?;
    }
    f.write_str("\n")
}

fn input_value(value: &InputValue) -> String {
    let mut out = format!("{}: {}", value.name, value.ty);
    if let Some(default) = &value.default_value {
        out.push_str(" = ");
        out.push_str(default);
    }
    if let Some(reason) = &value.deprecation {
        out.push(' ');
        out.push_str(&deprecated(reason));
    }
    out
}

fn deprecated(reason: &str) -> String {
    format!("@deprecated(reason: {})", string_literal(reason))
}

fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn print_description(
    f: &mut fmt::Formatter<'_>,
    description: Option<&str>,
    indent: &str,
) -> fmt::Result {
    let Some(description) = description else {
        return Ok(());
    };
    let escaped = description.replace("\"\"\"", "\\\"\"\"");
    if escaped.contains('\n') {
        writeln!(f, "{}\"\"\"", indent)?;
        for line in escaped.lines() {
            writeln!(f, "{}{}", indent, line)?;
        }
        writeln!(f, "{}\"\"\"", indent)
    } else {
        writeln!(f, "{}\"\"\"{}\"\"\"", indent, escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumValue, TypeRef};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_print_input_with_deprecation() {
        let input = InputObjectType::new("MovieWhere")
            .field(InputValue::new("title", TypeRef::named("String")))
            .field(
                InputValue::new("title_NOT", TypeRef::named("String"))
                    .deprecated("Negation filters will be deprecated, use the NOT operator to achieve the same behavior"),
            );
        let printed = TypeDefinition::InputObject(input).to_string();
        assert_eq!(
            printed,
            "input MovieWhere {\n  title: String\n  title_NOT: String @deprecated(reason: \"Negation filters will be deprecated, use the NOT operator to achieve the same behavior\")\n}\n"
        );
    }

    #[test]
    fn test_input_value_with_default_and_deprecation() {
        let value = InputValue::new("directed", TypeRef::named("Boolean"))
            .with_default("true")
            .deprecated("Use \"direction\" instead");
        assert_eq!(
            input_value(&value),
            "directed: Boolean = true @deprecated(reason: \"Use \\\"direction\\\" instead\")"
        );
    }

    #[test]
    fn test_print_object_with_arguments() {
        let object = ObjectType::new("Actor").field(
            FieldDefinition::new("movies", TypeRef::list_of("Movie").non_null())
                .argument(InputValue::new("directed", TypeRef::named("Boolean")).with_default("true"))
                .argument(InputValue::new("where", TypeRef::named("MovieWhere"))),
        );
        let printed = TypeDefinition::Object(object).to_string();
        assert_eq!(
            printed,
            "type Actor {\n  movies(directed: Boolean = true, where: MovieWhere): [Movie!]!\n}\n"
        );
    }

    #[test]
    fn test_print_enum_with_descriptions() {
        let sort = EnumType {
            name: "SortDirection".to_string(),
            description: None,
            values: vec![
                EnumValue::new("ASC").described("Sort by field values in ascending order."),
                EnumValue::new("DESC"),
            ],
        };
        assert_eq!(
            TypeDefinition::Enum(sort).to_string(),
            "enum SortDirection {\n  \"\"\"Sort by field values in ascending order.\"\"\"\n  ASC\n  DESC\n}\n"
        );
    }

    #[test]
    fn test_print_union_and_scalar() {
        let union = UnionType {
            name: "Search".to_string(),
            description: None,
            members: vec!["Actor".to_string(), "Movie".to_string()],
        };
        assert_eq!(TypeDefinition::Union(union).to_string(), "union Search = Actor | Movie\n");

        let scalar = ScalarDefinition {
            name: "BigInt".to_string(),
            description: Some("A 64-bit integer".to_string()),
        };
        assert_eq!(
            TypeDefinition::Scalar(scalar).to_string(),
            "\"\"\"A 64-bit integer\"\"\"\nscalar BigInt\n"
        );
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(string_literal("Use `a` \"now\""), "\"Use `a` \\\"now\\\"\"");
    }
}
