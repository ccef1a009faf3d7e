//! Typed Blueprint model.
//!
//! Built only from a document that already passed structural validation, so
//! every defaulted field is present and every enum spelling is legal. Optional
//! fields are skipped when absent on serialization; re-validating the
//! serialized form yields an identical value.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::document::Document;
use crate::domain::value_objects::{
    AuthProvider, ComponentType, DeployEnvironment, EndpointAuth, FieldType, HttpMethod, PageAuth,
    PageLayout, ReferentialAction, Region, StepAction, WorkflowTrigger,
};

/// Free-form `record<string, any>` section.
pub type Record = BTreeMap<String, Document>;
pub type StringMap = BTreeMap<String, String>;

/// Keep an explicit `null` as `Some(Document::Null)` instead of `None`.
fn explicit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Document>, D::Error> {
    Document::deserialize(deserializer).map(Some)
}

// ── Root ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub version: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    pub database: Database,
    pub ui: Ui,
    pub api: Api,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflows: Option<Vec<Workflow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectors: Option<Vec<Connector>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy: Option<Deploy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Blueprint {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.database.table(name)
    }

    pub fn table_count(&self) -> usize {
        self.database.tables.len()
    }

    pub fn page_count(&self) -> usize {
        self.ui.pages.len()
    }

    pub fn endpoint_count(&self) -> usize {
        self.api.endpoints.len()
    }

    /// Role names declared under `auth.roles`, when there are any.
    pub fn declared_roles(&self) -> Option<Vec<&str>> {
        let roles = self.auth.as_ref()?.roles.as_ref()?;
        Some(roles.iter().map(|r| r.name.as_str()).collect())
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub tables: Vec<Table>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations: Option<Migrations>,
}

impl Database {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Migrations {
    pub auto_generate: bool,
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<Vec<Index>>,
    pub tenant_scoped: bool,
    pub soft_delete: bool,
    pub timestamps: bool,
}

impl Table {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub unique: bool,
    pub primary: bool,
    #[serde(
        default,
        deserialize_with = "explicit",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<FieldReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<FieldType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub table: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferentialAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
}

// ── UI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ui {
    pub pages: Vec<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Reusable components, by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<BTreeMap<String, Component>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub layout: PageLayout,
    pub auth: PageAuth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<StringMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<StringMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<StringMap>,
}

/// Recursive UI node. The tree is finite: the validator bounds its depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// A table name, or an API path when it starts with `/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Record>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StringMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_submit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Record>,
}

impl Component {
    pub fn children(&self) -> &[Component] {
        self.children.as_deref().unwrap_or_default()
    }
}

// ── API ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    pub endpoints: Vec<Endpoint>,
    pub base_path: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimit>,
}

impl Api {
    /// Whether `path` names a declared endpoint, either literally or relative
    /// to `basePath` (`/customers` under `/api` matches `/api/customers`).
    pub fn has_endpoint_path(&self, path: &str) -> bool {
        let joined = join_path(&self.base_path, path);
        self.endpoints
            .iter()
            .any(|e| e.path == path || e.path == joined)
    }
}

fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    pub auth: EndpointAuth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<EndpointRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Record>,

    pub paginated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<StringMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<StringMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub enabled: bool,
    pub requests: u64,
    pub window: String,
}

// ── Workflows, auth, connectors, deploy ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub trigger: WorkflowTrigger,
    pub steps: Vec<WorkflowStep>,
    /// Cron expression; present when `trigger` is `schedule`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
    pub action: StepAction,
    pub config: Record,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth {
    pub providers: Vec<AuthProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_fields: Option<Vec<Field>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    pub session_duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    #[serde(rename = "type")]
    pub connector_type: String,
    pub config: Record,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deploy {
    pub environment: DeployEnvironment,
    pub region: Region,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(path: &str) -> Endpoint {
        Endpoint {
            path: path.into(),
            method: HttpMethod::Get,
            description: None,
            table: Some("customers".into()),
            action: None,
            auth: EndpointAuth::Required,
            roles: None,
            request: None,
            response: None,
            paginated: false,
        }
    }

    #[test]
    fn endpoint_path_matches_literally_or_under_base_path() {
        let api = Api {
            endpoints: vec![endpoint("/api/customers")],
            base_path: "/api".into(),
            version: "v1".into(),
            rate_limit: None,
        };
        assert!(api.has_endpoint_path("/api/customers"));
        assert!(api.has_endpoint_path("/customers"));
        assert!(!api.has_endpoint_path("/orders"));
    }

    #[test]
    fn field_keeps_explicit_null_default() {
        let field: Field = serde_json::from_str(
            r#"{"name": "note", "type": "text", "required": false, "unique": false,
                "primary": false, "default": null}"#,
        )
        .unwrap();
        assert_eq!(field.default, Some(Document::Null));

        let json = serde_json::to_value(&field).unwrap();
        assert!(json.get("default").is_some_and(serde_json::Value::is_null));
        assert!(json.get("references").is_none());
    }

    #[test]
    fn component_children_default_to_empty() {
        let leaf = Component {
            component_type: ComponentType::Button,
            id: None,
            source: None,
            query: None,
            columns: None,
            children: None,
            class_name: None,
            style: None,
            on_click: Some("save".into()),
            on_change: None,
            on_submit: None,
            props: None,
        };
        let mut root = leaf.clone();
        root.component_type = ComponentType::Container;
        root.children = Some(vec![leaf.clone(), leaf]);
        assert_eq!(root.children().len(), 2);
        assert!(root.children()[0].children().is_empty());
    }
}
