//! The schema registry: one immutable definition per named entity.

use std::sync::LazyLock;

use super::definition::Definition;
use super::{blueprint, connector, tenant, user};
use crate::domain::error::DomainError;

vocabulary! {
    /// Every structure the registry knows, by its kebab-case name.
    pub enum Entity ("schema entity") {
        // Blueprint DSL
        Blueprint => "blueprint",
        Database => "database",
        Table => "table",
        Field => "field",
        FieldReference => "field-reference",
        Index => "index",
        Migrations => "migrations",
        Ui => "ui",
        Page => "page",
        Seo => "seo",
        Component => "component",
        Theme => "theme",
        Api => "api",
        Endpoint => "endpoint",
        EndpointRequest => "endpoint-request",
        RateLimit => "rate-limit",
        Workflow => "workflow",
        WorkflowStep => "workflow-step",
        Auth => "auth",
        Role => "role",
        Connector => "connector",
        Deploy => "deploy",

        // Tenants
        Tenant => "tenant",
        TenantSettings => "tenant-settings",
        GdprSettings => "gdpr-settings",
        TenantBilling => "tenant-billing",
        BillingAddress => "billing-address",
        TenantUsage => "tenant-usage",
        CreateTenantRequest => "create-tenant-request",
        UpdateTenantRequest => "update-tenant-request",
        TenantMember => "tenant-member",
        TenantInvite => "tenant-invite",
        TenantAuditLog => "tenant-audit-log",
        Dpia => "dpia",
        DpiaRisk => "dpia-risk",

        // Users
        User => "user",
        UserProfile => "user-profile",
        UserPreferences => "user-preferences",
        UserTenantMembership => "user-tenant-membership",
        CreateUserRequest => "create-user-request",
        UpdateUserRequest => "update-user-request",
        LoginRequest => "login-request",
        LoginResponse => "login-response",
        Session => "session",
        Permission => "permission",
        RoleDefinition => "role-definition",

        // Connectors
        ConnectorCredential => "connector-credential",
        ConnectorAction => "connector-action",
        ConnectorWebhook => "connector-webhook",
        ConnectorDefinition => "connector-definition",
        ConnectorProvider => "connector-provider",
        SecurityReview => "security-review",
        ConnectorInstance => "connector-instance",
        ConnectorExecutionLog => "connector-execution-log",
        BankIdAuthRequest => "bankid-auth-request",
        BankIdRequirement => "bankid-requirement",
        BankIdAuthResponse => "bankid-auth-response",
        StripePaymentIntent => "stripe-payment-intent",
        FortnoxInvoice => "fortnox-invoice",
        FortnoxInvoiceRow => "fortnox-invoice-row",
    }
}

/// Which contract family an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityFamily {
    Blueprint,
    Tenant,
    User,
    Connector,
}

impl EntityFamily {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blueprint => "blueprint",
            Self::Tenant => "tenant",
            Self::User => "user",
            Self::Connector => "connector",
        }
    }
}

impl Entity {
    /// Resolve an entity by name, reporting unknown names as such.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        name.parse().map_err(|_| DomainError::UnknownEntity {
            name: name.to_string(),
        })
    }

    pub const fn family(self) -> EntityFamily {
        use Entity::*;
        match self {
            Blueprint | Database | Table | Field | FieldReference | Index | Migrations | Ui
            | Page | Seo | Component | Theme | Api | Endpoint | EndpointRequest | RateLimit
            | Workflow | WorkflowStep | Auth | Role | Connector | Deploy => EntityFamily::Blueprint,

            Tenant | TenantSettings | GdprSettings | TenantBilling | BillingAddress
            | TenantUsage | CreateTenantRequest | UpdateTenantRequest | TenantMember
            | TenantInvite | TenantAuditLog | Dpia | DpiaRisk => EntityFamily::Tenant,

            User | UserProfile | UserPreferences | UserTenantMembership | CreateUserRequest
            | UpdateUserRequest | LoginRequest | LoginResponse | Session | Permission
            | RoleDefinition => EntityFamily::User,

            ConnectorCredential | ConnectorAction | ConnectorWebhook | ConnectorDefinition
            | ConnectorProvider | SecurityReview | ConnectorInstance | ConnectorExecutionLog
            | BankIdAuthRequest | BankIdRequirement | BankIdAuthResponse
            | StripePaymentIntent | FortnoxInvoice | FortnoxInvoiceRow => EntityFamily::Connector,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Immutable table of definitions, indexed by [`Entity`].
#[derive(Debug)]
pub struct SchemaRegistry {
    definitions: Vec<Definition>,
}

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::build);

impl SchemaRegistry {
    /// The process-wide registry, built on first use.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    /// Build a fresh registry. Prefer [`SchemaRegistry::global`].
    pub fn build() -> Self {
        let definitions = Entity::ALL.iter().map(|e| define(*e)).collect();
        Self { definitions }
    }

    pub fn definition_of(&self, entity: Entity) -> &Definition {
        &self.definitions[entity.index()]
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        Entity::ALL.iter().copied()
    }
}

fn define(entity: Entity) -> Definition {
    match entity.family() {
        EntityFamily::Blueprint => blueprint::define(entity),
        EntityFamily::Tenant => tenant::define(entity),
        EntityFamily::User => user::define(entity),
        EntityFamily::Connector => connector::define(entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::definition::Definition;

    #[test]
    fn every_entity_has_an_object_definition() {
        let registry = SchemaRegistry::global();
        for entity in registry.entities() {
            match registry.definition_of(entity) {
                Definition::Object(def) => assert_eq!(def.entity, Some(entity)),
                other => panic!("{entity} is not an object: {other:?}"),
            }
        }
    }

    #[test]
    fn from_name_reports_unknown_entity() {
        assert_eq!(Entity::from_name("page").unwrap(), Entity::Page);
        let err = Entity::from_name("widget").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownEntity {
                name: "widget".into()
            }
        );
    }

    #[test]
    fn families() {
        assert_eq!(Entity::Component.family(), EntityFamily::Blueprint);
        assert_eq!(Entity::Dpia.family(), EntityFamily::Tenant);
        assert_eq!(Entity::Session.family(), EntityFamily::User);
        assert_eq!(Entity::BankIdAuthRequest.family(), EntityFamily::Connector);
    }
}
