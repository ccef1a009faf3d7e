//! Integration tests for appkod-core: whole documents through the public API.

use appkod_core::domain::{
    BlueprintValidator, DEFAULT_MAX_DEPTH, Document, Entity, FieldType, IssueKind,
    ValidationReport, ValidatorOptions, validate_blueprint, validate_contract,
};

const CRM: &str = r"
version: '1.0'
name: Simple CRM
description: Customer relationship management app
database:
  tables:
    - name: customers
      description: Customer records
      fields:
        - { name: id, type: uuid, primary: true }
        - { name: name, type: string, required: true, maxLength: 200 }
        - { name: email, type: email, required: true, unique: true }
        - { name: phone, type: phone }
        - { name: created_at, type: timestamp, default: now() }
ui:
  pages:
    - path: /customers
      title: Customers
      components:
        - type: table
          source: customers
          columns: [name, email, phone, created_at]
api:
  endpoints:
    - path: /api/customers
      method: GET
      table: customers
      paginated: true
    - path: /api/customers
      method: POST
      table: customers
      request:
        body: { name: string, email: string, phone: string }
";

fn yaml(text: &str) -> Document {
    serde_yaml::from_str(text).expect("fixture is valid YAML")
}

fn crm_with(from: &str, to: &str) -> Document {
    assert!(CRM.contains(from), "fixture does not contain {from:?}");
    yaml(&CRM.replacen(from, to, 1))
}

fn failure(document: &Document) -> ValidationReport {
    validate_blueprint(document).expect_err("document should be rejected")
}

fn messages_at<'a>(report: &'a ValidationReport, path: &str) -> Vec<&'a str> {
    report
        .iter()
        .filter(|issue| issue.path.to_string() == path)
        .map(|issue| issue.message.as_str())
        .collect()
}

/// A page whose single component nests `levels` components deep in total.
fn nested_blueprint(levels: usize) -> Document {
    let mut component: Document = [("type", Document::from("card"))].into_iter().collect();
    for _ in 1..levels {
        component = [
            ("type", Document::from("container")),
            ("children", Document::from(vec![component])),
        ]
        .into_iter()
        .collect();
    }

    let mut document = yaml(CRM);
    let Document::Mapping(root) = &mut document else {
        unreachable!("fixture root is a mapping");
    };
    root.insert(
        "ui".into(),
        yaml("pages: [{ path: /, title: Deep, components: [] }]"),
    );
    if let Some(Document::Mapping(ui)) = root.get_mut("ui") {
        if let Some(Document::Sequence(pages)) = ui.get_mut("pages") {
            if let Some(Document::Mapping(page)) = pages.first_mut() {
                page.insert("components".into(), Document::from(vec![component]));
            }
        }
    }
    document
}

// ── Valid documents ──────────────────────────────────────────────────────────

#[test]
fn example_crm_is_valid_and_defaulted() {
    let blueprint = validate_blueprint(&yaml(CRM)).unwrap();

    assert_eq!(blueprint.name, "Simple CRM");
    let customers = blueprint.table("customers").unwrap();
    assert!(customers.tenant_scoped);
    assert!(!customers.soft_delete);
    assert!(customers.timestamps);

    let phone = customers.field("phone").unwrap();
    assert_eq!(phone.field_type, FieldType::Phone);
    assert!(!phone.required);
    assert!(!phone.unique);
    assert!(!phone.primary);

    assert_eq!(blueprint.api.base_path, "/api");
    assert_eq!(blueprint.api.version, "v1");
    assert!(!blueprint.api.endpoints[1].paginated);
}

#[test]
fn minimal_customer_app_is_valid() {
    let document = yaml(
        r"
name: Customers
database:
  tables:
    - name: customers
      fields:
        - { name: id, type: uuid, primary: true }
        - { name: name, type: string, required: true }
ui:
  pages:
    - path: /customers
      title: Customers
      components:
        - { type: table, source: customers, columns: [name] }
api:
  endpoints:
    - { method: GET, path: /api/customers, table: customers }
",
    );

    let blueprint = validate_blueprint(&document).unwrap();
    assert_eq!(blueprint.version, "1.0");
    assert_eq!(blueprint.ui.pages[0].layout.as_str(), "default");
}

#[test]
fn revalidating_output_is_stable() {
    let first = validate_blueprint(&yaml(CRM)).unwrap();
    let serialized = Document::from_serializable(&first).unwrap();

    let second = validate_blueprint(&serialized).unwrap();

    assert_eq!(first, second);
    assert_eq!(Document::from_serializable(&second).unwrap(), serialized);
}

#[test]
fn input_document_is_not_mutated() {
    let document = yaml(CRM);
    let before = document.clone();

    validate_blueprint(&document).unwrap();

    assert_eq!(document, before);
}

#[test]
fn json_and_yaml_inputs_agree() {
    let from_yaml = validate_blueprint(&yaml(CRM)).unwrap();
    let json = serde_json::to_string(&yaml(CRM)).unwrap();
    let from_json: Document = serde_json::from_str(&json).unwrap();

    assert_eq!(validate_blueprint(&from_json).unwrap(), from_yaml);
}

// ── Structural failures ──────────────────────────────────────────────────────

#[test]
fn missing_sections_are_reported_by_path() {
    let report = failure(&yaml("name: Empty"));

    for section in ["database", "ui", "api"] {
        assert_eq!(messages_at(&report, section), vec!["Required"], "{section}");
    }
    assert!(report.iter().all(|issue| issue.kind == IssueKind::Structural));
}

#[test]
fn non_mapping_root_is_one_issue() {
    let report = failure(&yaml("- just\n- a list\n"));

    assert_eq!(report.len(), 1);
    assert!(report.issues()[0].path.is_root());
    assert_eq!(report.issues()[0].message, "Expected object, received array");
}

#[test]
fn table_without_fields_is_rejected() {
    let report = failure(&yaml(
        r"
name: Empty table
database: { tables: [{ name: customers, fields: [] }] }
ui: { pages: [{ path: /, title: Home, components: [{ type: card }] }] }
api: { endpoints: [{ method: GET, path: /health, action: health }] }
",
    ));

    assert_eq!(
        messages_at(&report, "database.tables.0.fields"),
        vec!["Array must contain at least 1 element(s)"]
    );
}

#[test]
fn relation_without_references_is_rejected() {
    let document = crm_with(
        "- { name: phone, type: phone }",
        "- { name: owner, type: relation }",
    );

    let report = failure(&document);

    assert_eq!(
        messages_at(&report, "database.tables.0.fields.3.references"),
        vec!["Required when type is 'relation'"]
    );
}

/// A `references` block on a non-relation field would be silently ignored by
/// code generation, so it is rejected.
#[test]
fn references_on_non_relation_field_is_rejected() {
    let document = crm_with(
        "- { name: phone, type: phone }",
        "- { name: phone, type: phone, references: { table: customers, field: id } }",
    );

    let report = failure(&document);

    assert_eq!(
        messages_at(&report, "database.tables.0.fields.3.references"),
        vec!["Only allowed when type is 'relation'"]
    );
}

#[test]
fn whole_numbers_beyond_exact_range_are_structural_issues() {
    let report = failure(&crm_with("maxLength: 200", "maxLength: 10000000000000000"));
    assert_eq!(
        messages_at(&report, "database.tables.0.fields.1.maxLength"),
        vec!["Number must be less than or equal to 9007199254740991"]
    );
    assert!(report.iter().all(|issue| issue.kind == IssueKind::Structural));

    let report = failure(&crm_with(
        "paginated: true",
        "paginated: true\n      rateLimit: { requests: 10000000000000000000 }",
    ));
    assert_eq!(
        messages_at(&report, "api.endpoints.0.rateLimit.requests"),
        vec!["Number must be less than or equal to 9007199254740991"]
    );
}

#[test]
fn largest_exact_whole_number_is_accepted() {
    let document = crm_with("maxLength: 200", "maxLength: 9007199254740991");

    let blueprint = validate_blueprint(&document).expect("bound is inclusive");

    let name = blueprint.database.tables[0]
        .field("name")
        .expect("name field is declared");
    assert_eq!(name.max_length, Some(9_007_199_254_740_991));
}

#[test]
fn invalid_field_name_fails_pattern() {
    let report = failure(&crm_with("name: phone", "name: 1invalid"));

    assert_eq!(
        messages_at(&report, "database.tables.0.fields.3.name"),
        vec!["Must be valid identifier"]
    );
}

#[test]
fn endpoint_path_needs_leading_slash() {
    let report = failure(&crm_with("path: /api/customers", "path: customers"));

    assert_eq!(
        messages_at(&report, "api.endpoints.0.path"),
        vec!["Must start with /"]
    );
}

#[test]
fn enum_membership_is_case_sensitive() {
    let report = failure(&crm_with("method: GET", "method: get"));

    let messages = messages_at(&report, "api.endpoints.0.method");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Invalid enum value. Expected 'GET'"));
    assert!(messages[0].ends_with("received 'get'"));
}

#[test]
fn sibling_errors_are_all_reported_in_document_order() {
    let document = yaml(
        r"
name: ''
database: { tables: [{ name: 9lives, fields: [{ name: id, type: guid }] }] }
ui: { pages: [{ path: home, title: Home, components: [] }] }
api: { endpoints: [{ method: GET, path: /x, action: x }] }
",
    );

    let report = failure(&document);
    let paths: Vec<String> = report.iter().map(|i| i.path.to_string()).collect();

    assert_eq!(
        paths,
        vec![
            "name",
            "database.tables.0.name",
            "database.tables.0.fields.0.type",
            "ui.pages.0.path",
            "ui.pages.0.components",
        ]
    );
}

#[test]
fn structural_failure_skips_integrity_pass() {
    // The unknown table would be a referential issue; the missing title wins.
    let text = CRM
        .replacen("title: Customers", "description: untitled", 1)
        .replace("table: customers", "table: clients");
    let document = yaml(&text);

    let report = failure(&document);

    assert!(report.iter().all(|issue| issue.kind == IssueKind::Structural));
    assert!(report.has_issue_at("ui.pages.0.title"));
}

// ── Nesting depth ────────────────────────────────────────────────────────────

#[test]
fn nesting_at_the_limit_is_accepted() {
    assert!(validate_blueprint(&nested_blueprint(DEFAULT_MAX_DEPTH)).is_ok());
}

#[test]
fn nesting_past_the_limit_is_one_issue() {
    let report = failure(&nested_blueprint(500));

    assert_eq!(report.len(), 1);
    let issue = &report.issues()[0];
    assert_eq!(issue.message, "Maximum nesting depth exceeded (64)");
    let expected = format!(
        "ui.pages.0.components.0{}",
        ".children.0".repeat(DEFAULT_MAX_DEPTH)
    );
    assert_eq!(issue.path.to_string(), expected);
}

#[test]
fn depth_limit_is_configurable() {
    let validator =
        BlueprintValidator::new().with_options(ValidatorOptions::default().with_max_depth(3));

    assert!(validator.validate(&nested_blueprint(3)).is_ok());
    assert!(validator.validate(&nested_blueprint(4)).is_err());
}

// ── Referential failures ─────────────────────────────────────────────────────

#[test]
fn unknown_column_points_at_the_entry() {
    let document = yaml(
        r"
name: Customers
database:
  tables:
    - name: customers
      fields:
        - { name: id, type: uuid, primary: true }
        - { name: name, type: string, required: true }
ui:
  pages:
    - path: /customers
      title: Customers
      components:
        - { type: table, source: customers, columns: [name, email] }
api:
  endpoints:
    - { method: GET, path: /api/customers, table: customers }
",
    );

    let report = failure(&document);

    assert_eq!(report.len(), 1);
    let issue = &report.issues()[0];
    assert_eq!(issue.kind, IssueKind::Referential);
    assert_eq!(issue.path.to_string(), "ui.pages.0.components.0.columns.1");
    assert_eq!(issue.message, "Unknown field 'email' on table 'customers'");
}

#[test]
fn endpoint_table_must_exist() {
    let report = failure(&crm_with("table: customers", "table: clients"));

    assert_eq!(
        messages_at(&report, "api.endpoints.0.table"),
        vec!["Unknown table 'clients'"]
    );
}

#[test]
fn component_sources_resolve_against_tables_and_endpoints() {
    let document = crm_with(
        "columns: [name, email, phone, created_at]",
        r"columns: [name]
          children:
            - { type: list, source: /customers }
            - { type: list, source: /orders }
            - { type: detail, source: invoices }",
    );

    let report = failure(&document);
    let base = "ui.pages.0.components.0.children";

    assert!(messages_at(&report, &format!("{base}.0.source")).is_empty());
    assert_eq!(
        messages_at(&report, &format!("{base}.1.source")),
        vec!["No endpoint declared with path '/orders'"]
    );
    assert_eq!(
        messages_at(&report, &format!("{base}.2.source")),
        vec!["Unknown table 'invoices'"]
    );
}

#[test]
fn relation_targets_must_exist() {
    let document = crm_with(
        "- { name: phone, type: phone }",
        r"- { name: company, type: relation, references: { table: companies, field: id } }
        - { name: referrer, type: relation, references: { table: customers, field: uid } }",
    );

    let report = failure(&document);

    assert_eq!(
        messages_at(&report, "database.tables.0.fields.3.references.table"),
        vec!["Unknown table 'companies'"]
    );
    assert_eq!(
        messages_at(&report, "database.tables.0.fields.4.references.field"),
        vec!["Unknown field 'uid' on table 'customers'"]
    );
}

#[test]
fn roles_resolve_only_when_declared() {
    let with_roles = format!(
        "{CRM}auth:\n  providers: [email]\n  roles:\n    - {{ name: admin, permissions: ['*'] }}\n"
    );
    let document = yaml(&with_roles.replacen("paginated: true", "roles: [admin, sales]", 1));

    let report = failure(&document);
    assert_eq!(
        messages_at(&report, "api.endpoints.0.roles.1"),
        vec!["Unknown role 'sales'"]
    );

    let without_roles = CRM.replacen("paginated: true", "roles: [admin, sales]", 1);
    assert!(validate_blueprint(&yaml(&without_roles)).is_ok());
}

#[test]
fn duplicate_endpoints_are_rejected() {
    let report = failure(&crm_with("method: POST", "method: GET"));

    assert_eq!(
        messages_at(&report, "api.endpoints.1.path"),
        vec!["Duplicate endpoint GET /api/customers (first declared at api.endpoints.0)"]
    );
}

// ── Platform contracts ───────────────────────────────────────────────────────

#[test]
fn create_tenant_request_defaults() {
    let document = yaml("name: Acme AB\nslug: acme-ab\nbillingEmail: billing@acme.se\n");

    let defaulted = validate_contract(Entity::CreateTenantRequest, &document).unwrap();

    assert_eq!(defaulted.get("plan").and_then(Document::as_str), Some("free"));
    assert_eq!(defaulted.get("country").and_then(Document::as_str), Some("SE"));
}

#[test]
fn tenant_slug_and_email_formats() {
    let document = yaml("name: Acme\nslug: Acme_AB\nbillingEmail: not-an-email\n");

    let report = validate_contract(Entity::CreateTenantRequest, &document).unwrap_err();

    assert_eq!(
        messages_at(&report, "slug"),
        vec!["Must be lowercase alphanumeric with hyphens"]
    );
    assert_eq!(messages_at(&report, "billingEmail"), vec!["Invalid email"]);
}

#[test]
fn update_requests_accept_empty_documents() {
    let empty = Document::empty_mapping();

    let defaulted = validate_contract(Entity::UpdateTenantRequest, &empty).unwrap();

    assert_eq!(defaulted, empty);
}

#[test]
fn bankid_personal_number_is_twelve_digits() {
    let report = validate_contract(
        Entity::BankIdAuthRequest,
        &yaml("personalNumber: '19900101123'\nendUserIp: 10.0.0.1\n"),
    )
    .unwrap_err();

    assert_eq!(messages_at(&report, "personalNumber"), vec!["Must be 12 digits"]);
}

#[test]
fn entity_names_parse_from_kebab_case() {
    assert_eq!(
        "create-user-request".parse::<Entity>().unwrap(),
        Entity::CreateUserRequest
    );
    assert!("CreateUserRequest".parse::<Entity>().is_err());
}

#[test]
fn validators_are_shareable_across_threads() {
    let document = yaml(CRM);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| validate_blueprint(&document).is_ok()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}
