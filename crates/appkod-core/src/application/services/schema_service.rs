//! Schema Service - read-only queries over the schema registry.
//!
//! Backs `appkod schema`: list the entities, describe one entity's fields.

use serde::Serialize;

use crate::{
    domain::{
        Definition, Document, Entity, EntityFamily, SchemaRegistry,
        schema::{FieldDef, ObjectRule, Presence},
    },
    error::AppkodResult,
};

/// One registry entity, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    pub name: String,
    pub family: String,
    pub fields: usize,
}

/// One field of an object entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// An entity's field table plus its cross-field rules, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescription {
    pub name: String,
    pub family: String,
    pub fields: Vec<FieldInfo>,
    pub rules: Vec<String>,
}

/// Service for schema introspection.
pub struct SchemaService {
    registry: &'static SchemaRegistry,
}

impl Default for SchemaService {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaService {
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::global(),
        }
    }

    /// List entities, optionally restricted to one family.
    pub fn list(&self, family: Option<EntityFamily>) -> Vec<EntityInfo> {
        self.registry
            .entities()
            .filter(|entity| family.is_none_or(|f| entity.family() == f))
            .map(|entity| EntityInfo {
                name: entity.to_string(),
                family: entity.family().as_str().to_string(),
                fields: self.object_fields(entity).len(),
            })
            .collect()
    }

    /// Describe the entity with the given kebab-case name.
    pub fn describe(&self, name: &str) -> AppkodResult<EntityDescription> {
        let entity = Entity::from_name(name)?;
        let (fields, rules) = match self.registry.definition_of(entity) {
            Definition::Object(object) => (
                object
                    .fields
                    .iter()
                    .map(|field| FieldInfo {
                        name: field.name.to_string(),
                        type_name: field.definition.describe(),
                        required: field.presence == Presence::Required,
                        default: match &field.presence {
                            Presence::Defaulted(value) => Some(render_default(value)),
                            _ => None,
                        },
                    })
                    .collect(),
                object.rules.iter().map(describe_rule).collect(),
            ),
            _ => (Vec::new(), Vec::new()),
        };

        Ok(EntityDescription {
            name: entity.to_string(),
            family: entity.family().as_str().to_string(),
            fields,
            rules,
        })
    }

    fn object_fields(&self, entity: Entity) -> &[FieldDef] {
        match self.registry.definition_of(entity) {
            Definition::Object(object) => &object.fields,
            _ => &[],
        }
    }
}

fn render_default(value: &Document) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.kind().to_string())
}

fn describe_rule(rule: &ObjectRule) -> String {
    match rule {
        ObjectRule::RequiredWhen {
            field,
            discriminant,
            value,
        } => format!("{field} is required when {discriminant} is '{value}'"),
        ObjectRule::ForbiddenUnless {
            field,
            discriminant,
            value,
        } => format!("{field} is only allowed when {discriminant} is '{value}'"),
        ObjectRule::ExactlyOneOf(names) => format!("exactly one of {}", names.join(", ")),
        ObjectRule::UniqueBy { list, key } => format!("{list}[].{key} must be unique"),
    }
}
