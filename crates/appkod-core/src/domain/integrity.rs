//! Referential integrity: the second pass over a structurally valid Blueprint.
//!
//! Resolves names that cross sections (tables, fields, endpoint paths, roles)
//! and reports each one that dangles. Never mutates the Blueprint. Issues come
//! out in document order: database, ui, api, then auth.

use std::collections::HashMap;

use super::entities::{Blueprint, Component, Field, Table};
use super::path::DocumentPath;
use super::report::ValidationIssue;
use super::value_objects::HttpMethod;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferentialIntegrityChecker;

impl ReferentialIntegrityChecker {
    pub const fn new() -> Self {
        Self
    }

    pub fn check(&self, blueprint: &Blueprint) -> Result<(), Vec<ValidationIssue>> {
        let mut pass = Pass {
            blueprint,
            roles: blueprint.declared_roles(),
            issues: Vec::new(),
        };

        pass.database();
        pass.ui();
        pass.api();
        pass.auth();

        if pass.issues.is_empty() {
            Ok(())
        } else {
            Err(pass.issues)
        }
    }
}

struct Pass<'a> {
    blueprint: &'a Blueprint,
    /// `None` when no `auth.roles` list exists; role checks are skipped then.
    roles: Option<Vec<&'a str>>,
    issues: Vec<ValidationIssue>,
}

impl<'a> Pass<'a> {
    fn report(&mut self, path: DocumentPath, message: String) {
        self.issues.push(ValidationIssue::referential(path, message));
    }

    fn database(&mut self) {
        let blueprint = self.blueprint;
        let tables_path = DocumentPath::root().key("database").key("tables");

        for (t, table) in blueprint.database.tables.iter().enumerate() {
            let table_path = tables_path.index(t);
            self.relations(&table.fields, &table_path.key("fields"));

            for (i, index) in table.indexes.iter().flatten().enumerate() {
                let fields_path = table_path.key("indexes").index(i).key("fields");
                for (f, name) in index.fields.iter().enumerate() {
                    if !table.has_field(name) {
                        self.report(fields_path.index(f), unknown_field(name, table));
                    }
                }
            }
        }
    }

    /// `references.table` and `references.field` of every relation field.
    fn relations(&mut self, fields: &[Field], path: &DocumentPath) {
        let blueprint = self.blueprint;
        for (i, field) in fields.iter().enumerate() {
            let Some(reference) = &field.references else {
                continue;
            };
            let reference_path = path.index(i).key("references");

            match blueprint.table(&reference.table) {
                None => self.report(
                    reference_path.key("table"),
                    format!("Unknown table '{}'", reference.table),
                ),
                Some(target) if !target.has_field(&reference.field) => self.report(
                    reference_path.key("field"),
                    unknown_field(&reference.field, target),
                ),
                Some(_) => {}
            }
        }
    }

    fn ui(&mut self) {
        let blueprint = self.blueprint;
        let ui = &blueprint.ui;
        let ui_path = DocumentPath::root().key("ui");

        for (p, page) in ui.pages.iter().enumerate() {
            let page_path = ui_path.key("pages").index(p);
            self.roles(page.roles.as_deref(), &page_path.key("roles"));

            for (c, component) in page.components.iter().enumerate() {
                self.component(component, &page_path.key("components").index(c));
            }
        }

        for (name, component) in ui.components.iter().flatten() {
            self.component(component, &ui_path.key("components").key(name.as_str()));
        }
    }

    fn component(&mut self, component: &Component, path: &DocumentPath) {
        if let Some(source) = &component.source {
            self.source(component, source, path);
        }

        for (i, child) in component.children().iter().enumerate() {
            self.component(child, &path.key("children").index(i));
        }
    }

    fn source(&mut self, component: &Component, source: &str, path: &DocumentPath) {
        let blueprint = self.blueprint;
        if source.starts_with('/') {
            if !blueprint.api.has_endpoint_path(source) {
                self.report(
                    path.key("source"),
                    format!("No endpoint declared with path '{source}'"),
                );
            }
            return;
        }

        let Some(table) = blueprint.table(source) else {
            self.report(path.key("source"), format!("Unknown table '{source}'"));
            return;
        };

        for (i, column) in component.columns.iter().flatten().enumerate() {
            if !table.has_field(column) {
                self.report(path.key("columns").index(i), unknown_field(column, table));
            }
        }
    }

    fn api(&mut self) {
        let blueprint = self.blueprint;
        let endpoints_path = DocumentPath::root().key("api").key("endpoints");
        let mut first_seen: HashMap<(HttpMethod, &str), usize> = HashMap::new();

        for (e, endpoint) in blueprint.api.endpoints.iter().enumerate() {
            let endpoint_path = endpoints_path.index(e);

            let first = *first_seen
                .entry((endpoint.method, endpoint.path.as_str()))
                .or_insert(e);
            if first != e {
                self.report(
                    endpoint_path.key("path"),
                    format!(
                        "Duplicate endpoint {} {} (first declared at {})",
                        endpoint.method,
                        endpoint.path,
                        endpoints_path.index(first)
                    ),
                );
            }

            if let Some(table) = &endpoint.table {
                if blueprint.table(table).is_none() {
                    self.report(endpoint_path.key("table"), format!("Unknown table '{table}'"));
                }
            }

            self.roles(endpoint.roles.as_deref(), &endpoint_path.key("roles"));
        }
    }

    fn auth(&mut self) {
        let blueprint = self.blueprint;
        let Some(fields) = blueprint
            .auth
            .as_ref()
            .and_then(|auth| auth.user_fields.as_deref())
        else {
            return;
        };
        self.relations(fields, &DocumentPath::root().key("auth").key("userFields"));
    }

    fn roles(&mut self, requested: Option<&[String]>, path: &DocumentPath) {
        let (Some(requested), Some(declared)) = (requested, &self.roles) else {
            return;
        };

        let unknown: Vec<(usize, String)> = requested
            .iter()
            .enumerate()
            .filter(|(_, role)| !declared.contains(&role.as_str()))
            .map(|(i, role)| (i, role.clone()))
            .collect();

        for (i, role) in unknown {
            self.report(path.index(i), format!("Unknown role '{role}'"));
        }
    }
}

fn unknown_field(field: &str, table: &Table) -> String {
    format!("Unknown field '{field}' on table '{}'", table.name)
}
