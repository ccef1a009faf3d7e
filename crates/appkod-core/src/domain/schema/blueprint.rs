//! Blueprint DSL definitions.

use super::definition::{Definition, ObjectDef, ObjectRule, Pattern, PrimitiveDef, PrimitiveKind};
use super::registry::Entity;
use crate::domain::document::MAX_EXACT_INTEGER;
use crate::domain::value_objects::{
    AuthProvider, ComponentType, DeployEnvironment, EndpointAuth, FieldType, HttpMethod, PageAuth,
    PageLayout, ReferentialAction, Region, StepAction, WorkflowTrigger,
};

pub(super) fn define(entity: Entity) -> Definition {
    let def = match entity {
        Entity::Blueprint => blueprint(),
        Entity::Database => database(),
        Entity::Table => table(),
        Entity::Field => field(),
        Entity::FieldReference => field_reference(),
        Entity::Index => index(),
        Entity::Migrations => migrations(),
        Entity::Ui => ui(),
        Entity::Page => page(),
        Entity::Seo => seo(),
        Entity::Component => component(),
        Entity::Theme => theme(),
        Entity::Api => api(),
        Entity::Endpoint => endpoint(),
        Entity::EndpointRequest => endpoint_request(),
        Entity::RateLimit => rate_limit(),
        Entity::Workflow => workflow(),
        Entity::WorkflowStep => workflow_step(),
        Entity::Auth => auth(),
        Entity::Role => role(),
        Entity::Connector => connector(),
        Entity::Deploy => deploy(),
        other => unreachable!("{other} is not a blueprint entity"),
    };
    def.into()
}

fn identifier() -> PrimitiveDef {
    PrimitiveDef::new(PrimitiveKind::String)
        .min_length(1)
        .pattern(Pattern::identifier())
}

fn absolute_path() -> PrimitiveDef {
    PrimitiveDef::new(PrimitiveKind::String)
        .min_length(1)
        .pattern(Pattern::absolute_path())
}

fn non_empty_string() -> PrimitiveDef {
    PrimitiveDef::new(PrimitiveKind::String).min_length(1)
}

/// Whole number stored as `u64` in the typed model.
fn count(min: f64) -> PrimitiveDef {
    PrimitiveDef::new(PrimitiveKind::Integer)
        .min(min)
        .max(MAX_EXACT_INTEGER)
}

fn strings() -> Definition {
    Definition::list_of(Definition::string())
}

// ── Database ─────────────────────────────────────────────────────────────────

fn field() -> ObjectDef {
    let length = || count(0.0);

    ObjectDef::new(Entity::Field)
        .required("name", identifier())
        .required("type", Definition::one_of(FieldType::NAMES))
        .defaulted("required", Definition::boolean(), false)
        .defaulted("unique", Definition::boolean(), false)
        .defaulted("primary", Definition::boolean(), false)
        .optional(
            "default",
            Definition::Union(vec![
                Definition::string(),
                Definition::number(),
                Definition::boolean(),
                Definition::null(),
            ]),
        )
        .optional("description", Definition::string())
        .optional("minLength", length())
        .optional("maxLength", length())
        .optional("min", Definition::number())
        .optional("max", Definition::number())
        .optional("pattern", Definition::string())
        .optional("references", field_reference())
        .optional("items", Definition::one_of(FieldType::NAMES))
        .rules(ObjectRule::present_iff("references", "type", "relation"))
        .rules(ObjectRule::present_iff("items", "type", "array"))
}

fn field_reference() -> ObjectDef {
    ObjectDef::new(Entity::FieldReference)
        .required("table", non_empty_string())
        .required("field", non_empty_string())
        .optional("onDelete", Definition::one_of(ReferentialAction::NAMES))
        .optional("onUpdate", Definition::one_of(ReferentialAction::NAMES))
}

fn index() -> ObjectDef {
    ObjectDef::new(Entity::Index)
        .required("name", Definition::string())
        .required("fields", strings())
        .optional("unique", Definition::boolean())
}

fn table() -> ObjectDef {
    ObjectDef::new(Entity::Table)
        .required("name", identifier())
        .optional("description", Definition::string())
        .required("fields", Definition::non_empty_list_of(field().into(), 1))
        .optional("indexes", Definition::list_of(index().into()))
        .defaulted("tenantScoped", Definition::boolean(), true)
        .defaulted("softDelete", Definition::boolean(), false)
        .defaulted("timestamps", Definition::boolean(), true)
        .rule(ObjectRule::UniqueBy {
            list: "fields",
            key: "name",
        })
}

fn migrations() -> ObjectDef {
    ObjectDef::new(Entity::Migrations)
        .defaulted("autoGenerate", Definition::boolean(), true)
        .defaulted("directory", Definition::string(), "./migrations")
}

fn database() -> ObjectDef {
    ObjectDef::new(Entity::Database)
        .required("tables", Definition::non_empty_list_of(table().into(), 1))
        .optional("migrations", migrations())
        .rule(ObjectRule::UniqueBy {
            list: "tables",
            key: "name",
        })
}

// ── UI ───────────────────────────────────────────────────────────────────────

/// Components nest through `Ref`, so every level is counted against the
/// validator's depth limit.
fn component() -> ObjectDef {
    ObjectDef::new(Entity::Component)
        .required("type", Definition::one_of(ComponentType::NAMES))
        .optional("id", Definition::string())
        .optional("source", Definition::string())
        .optional("query", Definition::record())
        .optional("columns", strings())
        .optional("children", Definition::list_of(Definition::Ref(Entity::Component)))
        .optional("className", Definition::string())
        .optional("style", Definition::string_map())
        .optional("onClick", Definition::string())
        .optional("onChange", Definition::string())
        .optional("onSubmit", Definition::string())
        .optional("props", Definition::record())
}

fn seo() -> ObjectDef {
    ObjectDef::new(Entity::Seo)
        .optional("title", Definition::string())
        .optional("description", Definition::string())
        .optional("keywords", strings())
}

fn page() -> ObjectDef {
    ObjectDef::new(Entity::Page)
        .required("path", absolute_path())
        .required("title", non_empty_string())
        .optional("description", Definition::string())
        .defaulted(
            "layout",
            Definition::one_of(PageLayout::NAMES),
            PageLayout::Default.as_str(),
        )
        .defaulted(
            "auth",
            Definition::one_of(PageAuth::NAMES),
            PageAuth::Required.as_str(),
        )
        .optional("roles", strings())
        .required(
            "components",
            Definition::non_empty_list_of(Definition::Ref(Entity::Component), 1),
        )
        .optional("seo", seo())
}

fn theme() -> ObjectDef {
    ObjectDef::new(Entity::Theme)
        .optional("colors", Definition::string_map())
        .optional("fonts", Definition::string_map())
        .optional("spacing", Definition::string_map())
}

fn ui() -> ObjectDef {
    ObjectDef::new(Entity::Ui)
        .required("pages", Definition::non_empty_list_of(page().into(), 1))
        .optional("theme", theme())
        .optional("components", Definition::map_of(Definition::Ref(Entity::Component)))
}

// ── API ──────────────────────────────────────────────────────────────────────

fn endpoint_request() -> ObjectDef {
    ObjectDef::new(Entity::EndpointRequest)
        .optional("params", Definition::string_map())
        .optional("query", Definition::string_map())
        .optional("body", Definition::record())
}

fn endpoint() -> ObjectDef {
    ObjectDef::new(Entity::Endpoint)
        .required("path", absolute_path())
        .required("method", Definition::one_of(HttpMethod::NAMES))
        .optional("description", Definition::string())
        .optional("table", non_empty_string())
        .optional("action", non_empty_string())
        .defaulted(
            "auth",
            Definition::one_of(EndpointAuth::NAMES),
            EndpointAuth::Required.as_str(),
        )
        .optional("roles", strings())
        .optional("request", endpoint_request())
        .optional("response", Definition::record())
        .defaulted("paginated", Definition::boolean(), false)
        .rule(ObjectRule::ExactlyOneOf(&["table", "action"]))
}

fn rate_limit() -> ObjectDef {
    ObjectDef::new(Entity::RateLimit)
        .defaulted("enabled", Definition::boolean(), true)
        .defaulted(
            "requests",
            count(1.0),
            100_i64,
        )
        .defaulted("window", non_empty_string(), "1m")
}

fn api() -> ObjectDef {
    ObjectDef::new(Entity::Api)
        .required("endpoints", Definition::non_empty_list_of(endpoint().into(), 1))
        .defaulted("basePath", absolute_path(), "/api")
        .defaulted("version", non_empty_string(), "v1")
        .optional("rateLimit", rate_limit())
}

// ── Workflows, auth, connectors, deploy ──────────────────────────────────────

fn workflow_step() -> ObjectDef {
    ObjectDef::new(Entity::WorkflowStep)
        .required("name", Definition::string())
        .required("action", Definition::one_of(StepAction::NAMES))
        .required("config", Definition::record())
}

fn workflow() -> ObjectDef {
    ObjectDef::new(Entity::Workflow)
        .required("name", identifier())
        .optional("description", Definition::string())
        .required("trigger", Definition::one_of(WorkflowTrigger::NAMES))
        .required("steps", Definition::list_of(workflow_step().into()))
        .optional("schedule", non_empty_string())
        .rule(ObjectRule::RequiredWhen {
            field: "schedule",
            discriminant: "trigger",
            value: "schedule",
        })
}

fn role() -> ObjectDef {
    ObjectDef::new(Entity::Role)
        .required("name", non_empty_string())
        .required("permissions", strings())
}

fn auth() -> ObjectDef {
    ObjectDef::new(Entity::Auth)
        .required(
            "providers",
            Definition::non_empty_list_of(Definition::one_of(AuthProvider::NAMES), 1),
        )
        .optional("userFields", Definition::list_of(field().into()))
        .optional("roles", Definition::list_of(role().into()))
        .defaulted("sessionDuration", Definition::string(), "7d")
        .rule(ObjectRule::UniqueBy {
            list: "roles",
            key: "name",
        })
}

fn connector() -> ObjectDef {
    ObjectDef::new(Entity::Connector)
        .required("type", non_empty_string())
        .required("config", Definition::record())
        .defaulted("enabled", Definition::boolean(), true)
}

fn deploy() -> ObjectDef {
    ObjectDef::new(Entity::Deploy)
        .defaulted(
            "environment",
            Definition::one_of(DeployEnvironment::NAMES),
            DeployEnvironment::Development.as_str(),
        )
        .defaulted(
            "region",
            Definition::one_of(Region::NAMES),
            Region::EuNorth1.as_str(),
        )
}

fn blueprint() -> ObjectDef {
    ObjectDef::new(Entity::Blueprint)
        .defaulted("version", non_empty_string(), "1.0")
        .required(
            "name",
            PrimitiveDef::new(PrimitiveKind::String)
                .min_length(1)
                .max_length(100),
        )
        .optional(
            "description",
            PrimitiveDef::new(PrimitiveKind::String).max_length(500),
        )
        .optional("author", Definition::string())
        .required("database", database())
        .required("ui", ui())
        .required("api", api())
        .optional("workflows", Definition::list_of(workflow().into()))
        .optional("auth", auth())
        .optional("connectors", Definition::list_of(connector().into()))
        .optional("deploy", deploy())
        .optional("tags", strings())
        .optional("category", Definition::string())
}

/// Default value of a `Defaulted` field, looked up by entity and key.
#[cfg(test)]
pub(crate) fn default_of(entity: Entity, key: &str) -> Option<crate::domain::Document> {
    use super::definition::Presence;

    match define(entity) {
        Definition::Object(def) => def.field_named(key).and_then(|f| match &f.presence {
            Presence::Defaulted(value) => Some(value.clone()),
            _ => None,
        }),
        _ => None,
    }
}
