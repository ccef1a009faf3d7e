//! Starter Blueprints that ship with Appkod.
//!
//! `appkod init` writes one of these. Each is stored as YAML with a
//! `{{PROJECT_NAME}}` placeholder and must validate as-is once the name is
//! filled in.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use appkod_core::{domain::Document, error::AppkodResult};

use crate::loader::DocumentFormat;

const PLACEHOLDER: &str = "{{PROJECT_NAME}}";

const BLANK: &str = r#"version: "1.0"
name: {{PROJECT_NAME}}
description: A fresh Appkod app

database:
  tables:
    - name: items
      fields:
        - { name: id, type: uuid, primary: true }
        - { name: title, type: string, required: true, maxLength: 200 }

ui:
  pages:
    - path: /
      title: Items
      components:
        - type: table
          source: items
          columns: [title]

api:
  endpoints:
    - { path: /items, method: GET, table: items, paginated: true }
    - { path: /items, method: POST, table: items }
"#;

const CRM: &str = r#"version: "1.0"
name: {{PROJECT_NAME}}
description: Customer relationship management app
category: crm
tags: [crm, sales]

database:
  tables:
    - name: companies
      description: Organisations we sell to
      fields:
        - { name: id, type: uuid, primary: true }
        - { name: name, type: string, required: true, maxLength: 200 }
        - { name: org_number, type: string, unique: true }
    - name: customers
      description: Customer records
      softDelete: true
      fields:
        - { name: id, type: uuid, primary: true }
        - { name: name, type: string, required: true, maxLength: 200 }
        - { name: email, type: email, required: true, unique: true }
        - { name: phone, type: phone }
        - name: company_id
          type: relation
          references: { table: companies, field: id, onDelete: set_null }
        - { name: created_at, type: timestamp, default: now() }
      indexes:
        - { name: customers_email_idx, fields: [email], unique: true }

ui:
  pages:
    - path: /customers
      title: Customers
      layout: dashboard
      roles: [admin, sales]
      components:
        - type: container
          children:
            - type: table
              source: customers
              columns: [name, email, phone]
            - type: button
              props: { label: New customer }
              onClick: openCustomerForm
    - path: /companies
      title: Companies
      components:
        - { type: list, source: /companies, columns: [name] }
  components:
    customerForm:
      type: form
      source: customers
      columns: [name, email, phone]

api:
  endpoints:
    - { path: /customers, method: GET, table: customers, paginated: true }
    - { path: /customers, method: POST, table: customers, roles: [admin, sales] }
    - { path: /companies, method: GET, table: companies }
    - path: /reports/weekly
      method: POST
      action: sendWeeklyReport
      roles: [admin]
  rateLimit: { requests: 300, window: 1m }

workflows:
  - name: weekly_report
    trigger: schedule
    schedule: "0 8 * * MON"
    steps:
      - { name: Count new customers, action: query, config: { table: customers } }
      - { name: Send summary, action: email, config: { to: sales@example.com } }

auth:
  providers: [email, bankid]
  roles:
    - { name: admin, permissions: ["*"] }
    - { name: sales, permissions: [customers.read, customers.write, companies.read] }

deploy:
  environment: development
  region: eu-north-1
"#;

/// A Blueprint `appkod init` can start from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StarterBlueprint {
    /// One table, one page, two endpoints.
    #[default]
    Blank,
    /// Companies and customers with roles, a workflow and reusable components.
    Crm,
}

impl StarterBlueprint {
    pub const ALL: &'static [Self] = &[Self::Blank, Self::Crm];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Crm => "crm",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Blank => "Minimal app with a single table",
            Self::Crm => "Customers and companies with roles and a weekly report",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::Blank => BLANK,
            Self::Crm => CRM,
        }
    }

    /// The starter as a document tree, named `project_name`.
    pub fn document(self, project_name: &str) -> AppkodResult<Document> {
        let text = self.substituted(project_name)?;
        DocumentFormat::Yaml.parse(&text, Path::new(self.name()))
    }

    /// The starter as text in `format`, named `project_name`.
    pub fn render(self, project_name: &str, format: DocumentFormat) -> AppkodResult<String> {
        debug!(starter = self.name(), %format, project_name, "Rendering starter blueprint");
        match format {
            DocumentFormat::Yaml => self.substituted(project_name),
            DocumentFormat::Json => format.render(&self.document(project_name)?),
        }
    }

    /// Replace the placeholder with a quoted scalar, so any name stays a string.
    fn substituted(self, project_name: &str) -> AppkodResult<String> {
        let quoted = serde_json::to_string(project_name).map_err(|e| {
            appkod_core::error::AppkodError::Internal {
                message: format!("Could not quote project name: {e}"),
            }
        })?;
        Ok(self.source().replace(PLACEHOLDER, &quoted))
    }
}

impl fmt::Display for StarterBlueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StarterBlueprint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|starter| starter.name() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|s| s.name()).collect();
                format!("unknown starter '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
