//! Deterministic names for generated types and fields
//!
//! Every generated name is derived from declared type and field names by the
//! rules in this module, so two synthesizers asking for the same concept get
//! the same name and the assembler can merge by name alone.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// `actors` -> `Actors`
pub fn upper_first(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `Movie` -> `movie`
pub fn lower_first(name: &str) -> String {
    name.to_lower_camel_case()
}

/// English plural of a single word, good enough for identifiers
fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return word.to_string();
    }
    let lower = word.to_lowercase();
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last().map(|c| c.to_ascii_lowercase());
        if before.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", word)
}

/// Root field stem of a type: `Movie` -> `movies`
pub fn plural(type_name: &str) -> String {
    pluralize(&lower_first(type_name))
}

/// Capitalized plural: `Movie` -> `Movies`
pub fn upper_plural(type_name: &str) -> String {
    upper_first(&plural(type_name))
}

/// `<Type>Where`
pub fn where_input(type_name: &str) -> String {
    format!("{}Where", type_name)
}

/// `<Type>SubscriptionWhere`
pub fn subscription_where(type_name: &str) -> String {
    format!("{}SubscriptionWhere", type_name)
}

/// `<Type>RelationshipsSubscriptionWhere`
pub fn relationships_subscription_where(type_name: &str) -> String {
    format!("{}RelationshipsSubscriptionWhere", type_name)
}

/// `<Type>RelationshipCreatedSubscriptionWhere`
pub fn relationship_created_subscription_where(type_name: &str) -> String {
    format!("{}RelationshipCreatedSubscriptionWhere", type_name)
}

/// `<Type>RelationshipDeletedSubscriptionWhere`
pub fn relationship_deleted_subscription_where(type_name: &str) -> String {
    format!("{}RelationshipDeletedSubscriptionWhere", type_name)
}

/// `<Interface>Implementation`
pub fn implementation_enum(interface: &str) -> String {
    format!("{}Implementation", interface)
}

/// `<Type>Options`
pub fn options(type_name: &str) -> String {
    format!("{}Options", type_name)
}

/// `<Type>Sort`
pub fn sort(type_name: &str) -> String {
    format!("{}Sort", type_name)
}

/// `<Type>AggregateSelection`
pub fn aggregate_selection(type_name: &str) -> String {
    format!("{}AggregateSelection", type_name)
}

/// `<Types>Connection`
pub fn root_connection(type_name: &str) -> String {
    format!("{}Connection", upper_plural(type_name))
}

/// `<Type>Edge`
pub fn edge(type_name: &str) -> String {
    format!("{}Edge", type_name)
}

/// `<Type>CreateInput`
pub fn create_input(type_name: &str) -> String {
    format!("{}CreateInput", type_name)
}

/// `<Type>UpdateInput`
pub fn update_input(type_name: &str) -> String {
    format!("{}UpdateInput", type_name)
}

/// `<Type>ConnectWhere`
pub fn connect_where(type_name: &str) -> String {
    format!("{}ConnectWhere", type_name)
}

/// `<Type>ConnectInput`
pub fn connect_input(type_name: &str) -> String {
    format!("{}ConnectInput", type_name)
}

/// `<Type>DisconnectInput`
pub fn disconnect_input(type_name: &str) -> String {
    format!("{}DisconnectInput", type_name)
}

/// `<Type>DeleteInput`
pub fn delete_input(type_name: &str) -> String {
    format!("{}DeleteInput", type_name)
}

/// `<Type>RelationInput`
pub fn relation_input(type_name: &str) -> String {
    format!("{}RelationInput", type_name)
}

/// `Create<Types>MutationResponse`
pub fn create_mutation_response(type_name: &str) -> String {
    format!("Create{}MutationResponse", upper_plural(type_name))
}

/// `Update<Types>MutationResponse`
pub fn update_mutation_response(type_name: &str) -> String {
    format!("Update{}MutationResponse", upper_plural(type_name))
}

/// `<Type>EventPayload`
pub fn event_payload(type_name: &str) -> String {
    format!("{}EventPayload", type_name)
}

/// `<Type>CreatedEvent`, `<Type>UpdatedEvent`, ...
pub fn event(type_name: &str, kind: &str) -> String {
    format!("{}{}Event", type_name, kind)
}

/// `<Type>ConnectedRelationships`
pub fn connected_relationships(type_name: &str) -> String {
    format!("{}ConnectedRelationships", type_name)
}

/// Names derived from one relationship field
///
/// The prefix is `<Source><Field>` (`Movie` + `actors` -> `MovieActors`), or
/// `<Source><Field><Member>` for the per-member branch of a union target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipNames {
    prefix: String,
}

impl RelationshipNames {
    /// Names for `source.field`
    pub fn new(source: &str, field: &str) -> Self {
        Self {
            prefix: format!("{}{}", source, upper_first(field)),
        }
    }

    /// Names for one member of a union target
    pub fn member(&self, member: &str) -> Self {
        Self {
            prefix: format!("{}{}", self.prefix, member),
        }
    }

    /// `<Source><Field>`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn with(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    /// `<Source><Field>ConnectionWhere`
    pub fn connection_where(&self) -> String {
        self.with("ConnectionWhere")
    }

    /// `<Source><Field>ConnectionSort`
    pub fn connection_sort(&self) -> String {
        self.with("ConnectionSort")
    }

    /// `<Source><Field>Connection`
    pub fn connection(&self) -> String {
        self.with("Connection")
    }

    /// `<Source><Field>Relationship`
    pub fn relationship(&self) -> String {
        self.with("Relationship")
    }

    /// `<Source><Field>AggregateInput`
    pub fn aggregate_input(&self) -> String {
        self.with("AggregateInput")
    }

    /// `<Source><Field>NodeAggregationWhereInput`
    pub fn node_aggregation_where_input(&self) -> String {
        self.with("NodeAggregationWhereInput")
    }

    /// `<Source><Field>RelationshipSubscriptionWhere`
    pub fn relationship_subscription_where(&self) -> String {
        self.with("RelationshipSubscriptionWhere")
    }

    /// `<Source><Field><Member>SubscriptionWhere`, for union members
    pub fn member_subscription_where(&self) -> String {
        self.with("SubscriptionWhere")
    }

    /// `<Source><Field>ConnectedRelationship`
    pub fn connected_relationship(&self) -> String {
        self.with("ConnectedRelationship")
    }

    /// `<Source><Field>FieldInput`
    pub fn field_input(&self) -> String {
        self.with("FieldInput")
    }

    /// `<Source><Field>ConnectFieldInput`
    pub fn connect_field_input(&self) -> String {
        self.with("ConnectFieldInput")
    }

    /// `<Source><Field>CreateFieldInput`
    pub fn create_field_input(&self) -> String {
        self.with("CreateFieldInput")
    }

    /// `<Source><Field>UpdateFieldInput`
    pub fn update_field_input(&self) -> String {
        self.with("UpdateFieldInput")
    }

    /// `<Source><Field>DeleteFieldInput`
    pub fn delete_field_input(&self) -> String {
        self.with("DeleteFieldInput")
    }

    /// `<Source><Field>DisconnectFieldInput`
    pub fn disconnect_field_input(&self) -> String {
        self.with("DisconnectFieldInput")
    }

    /// `<Source><Field>UpdateConnectionInput`
    pub fn update_connection_input(&self) -> String {
        self.with("UpdateConnectionInput")
    }

    /// `<Source><Field>CreateInput`, the per-member wrapper of a union target
    pub fn union_create_input(&self) -> String {
        self.with("CreateInput")
    }

    /// `<Source><Field>UpdateInput`, the per-member wrapper of a union target
    pub fn union_update_input(&self) -> String {
        self.with("UpdateInput")
    }

    /// `<Source><Field>ConnectInput`, the per-member wrapper of a union target
    pub fn union_connect_input(&self) -> String {
        self.with("ConnectInput")
    }

    /// `<Source><Field>DisconnectInput`, the per-member wrapper of a union target
    pub fn union_disconnect_input(&self) -> String {
        self.with("DisconnectInput")
    }

    /// `<Source><Field>DeleteInput`, the per-member wrapper of a union target
    pub fn union_delete_input(&self) -> String {
        self.with("DeleteInput")
    }
}

/// Names of the aggregation selection types of one relationship:
/// `<Source><Target><Field>AggregationSelection` and its node type
pub fn relationship_aggregation_selection(source: &str, target: &str, field: &str) -> String {
    format!("{}{}{}AggregationSelection", source, target, upper_first(field))
}

/// `<Source><Target><Field>NodeAggregateSelection`
pub fn relationship_node_aggregate_selection(source: &str, target: &str, field: &str) -> String {
    format!("{}{}{}NodeAggregateSelection", source, target, upper_first(field))
}
