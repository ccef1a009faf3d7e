//! Connector contracts. Data shapes only; no connector is ever invoked.

use super::definition::{Definition, ObjectDef, Pattern, PrimitiveDef, PrimitiveKind};
use super::registry::Entity;
use crate::domain::value_objects::{
    ConnectorAuthMethod, ConnectorCategory, ConnectorStatus, ConnectorType, ExecutionStatus,
    PricingModel,
};

pub(super) fn define(entity: Entity) -> Definition {
    let def = match entity {
        Entity::ConnectorCredential => credential(),
        Entity::ConnectorAction => action(),
        Entity::ConnectorWebhook => webhook(),
        Entity::ConnectorDefinition => definition(),
        Entity::ConnectorProvider => provider(),
        Entity::SecurityReview => security_review(),
        Entity::ConnectorInstance => instance(),
        Entity::ConnectorExecutionLog => execution_log(),
        Entity::BankIdAuthRequest => bankid_auth_request(),
        Entity::BankIdRequirement => bankid_requirement(),
        Entity::BankIdAuthResponse => bankid_auth_response(),
        Entity::StripePaymentIntent => stripe_payment_intent(),
        Entity::FortnoxInvoice => fortnox_invoice(),
        Entity::FortnoxInvoiceRow => fortnox_invoice_row(),
        other => unreachable!("{other} is not a connector entity"),
    };
    def.into()
}

fn strings() -> Definition {
    Definition::list_of(Definition::string())
}

fn credential() -> ObjectDef {
    ObjectDef::new(Entity::ConnectorCredential)
        .required("method", Definition::one_of(ConnectorAuthMethod::NAMES))
        // API key
        .optional("apiKey", Definition::string())
        .optional("apiSecret", Definition::string())
        // OAuth2
        .optional("clientId", Definition::string())
        .optional("clientSecret", Definition::string())
        .optional("accessToken", Definition::string())
        .optional("refreshToken", Definition::string())
        .optional("tokenExpiry", Definition::datetime())
        // Basic auth
        .optional("username", Definition::string())
        .optional("password", Definition::string())
        .optional("customFields", Definition::string_map())
}

fn action() -> ObjectDef {
    let rate_limit = ObjectDef::default()
        .required("requests", Definition::number())
        .required("window", Definition::string());

    ObjectDef::new(Entity::ConnectorAction)
        .required("id", Definition::string())
        .required("name", Definition::string())
        .required("description", Definition::string())
        .required("input", Definition::record())
        .required("output", Definition::record())
        .optional("rateLimit", rate_limit)
}

fn webhook() -> ObjectDef {
    ObjectDef::new(Entity::ConnectorWebhook)
        .required("id", Definition::string())
        .required("event", Definition::string())
        .required("payload", Definition::record())
        .optional("signature", Definition::string())
        .required("verified", Definition::boolean())
        .required("receivedAt", Definition::datetime())
        .optional("processedAt", Definition::datetime())
        .defaulted("retryCount", Definition::number(), 0_i64)
}

fn provider() -> ObjectDef {
    ObjectDef::new(Entity::ConnectorProvider)
        .required("name", Definition::string())
        .required("website", Definition::url())
        .optional("supportEmail", Definition::email())
        .optional("documentation", Definition::url())
}

fn security_review() -> ObjectDef {
    ObjectDef::new(Entity::SecurityReview)
        .required("reviewedAt", Definition::datetime())
        .required("reviewedBy", Definition::string())
        .required("findings", strings())
        .required("approved", Definition::boolean())
}

fn definition() -> ObjectDef {
    let pricing = ObjectDef::default()
        .required("model", Definition::one_of(PricingModel::NAMES))
        .optional("description", Definition::string());

    ObjectDef::new(Entity::ConnectorDefinition)
        .required("type", Definition::one_of(ConnectorType::NAMES))
        .required("name", Definition::string())
        .required("description", Definition::string())
        .required("category", Definition::one_of(ConnectorCategory::NAMES))
        .required("provider", provider())
        .required("authMethod", Definition::one_of(ConnectorAuthMethod::NAMES))
        .required("setupInstructions", Definition::string())
        .required("actions", Definition::list_of(action().into()))
        .required("supportsWebhooks", Definition::boolean())
        .optional("webhookEvents", strings())
        .required("gdprCompliant", Definition::boolean())
        .required("tosUrl", Definition::url())
        .required("privacyUrl", Definition::url())
        .required("euHosted", Definition::boolean())
        .required("regions", strings())
        .required("status", Definition::one_of(ConnectorStatus::NAMES))
        .optional("pricing", pricing)
        .required("version", Definition::string())
        .optional("changelog", Definition::string())
        .optional("securityReview", security_review())
}

fn instance() -> ObjectDef {
    ObjectDef::new(Entity::ConnectorInstance)
        .required("id", Definition::uuid())
        .required("tenantId", Definition::uuid())
        .required("type", Definition::one_of(ConnectorType::NAMES))
        .required("name", Definition::string())
        .optional("description", Definition::string())
        .required("credentials", credential())
        .optional("config", Definition::record())
        .required("status", Definition::one_of(ConnectorStatus::NAMES))
        .optional("lastUsedAt", Definition::datetime())
        .optional("lastErrorAt", Definition::datetime())
        .optional("lastError", Definition::string())
        .defaulted("usageCount", Definition::number(), 0_i64)
        .optional("quotaLimit", Definition::number())
        .required("createdBy", Definition::uuid())
        .required("createdAt", Definition::datetime())
        .required("updatedAt", Definition::datetime())
        .optional("dataProcessingPurpose", Definition::string())
        .optional("dpiaRequired", Definition::boolean())
}

fn execution_log() -> ObjectDef {
    ObjectDef::new(Entity::ConnectorExecutionLog)
        .required("id", Definition::uuid())
        .required("tenantId", Definition::uuid())
        .required("connectorInstanceId", Definition::uuid())
        .required("actionId", Definition::string())
        .required("startedAt", Definition::datetime())
        .optional("completedAt", Definition::datetime())
        // milliseconds
        .optional("duration", Definition::number())
        .required("status", Definition::one_of(ExecutionStatus::NAMES))
        .required("input", Definition::record())
        .optional("output", Definition::record())
        .optional("error", Definition::string())
        .required("triggeredBy", Definition::uuid())
        .optional("ipAddress", Definition::string())
        .optional("costEUR", Definition::number())
}

// ── Provider payloads ────────────────────────────────────────────────────────

fn bankid_requirement() -> ObjectDef {
    ObjectDef::new(Entity::BankIdRequirement)
        .optional("allowFingerprint", Definition::boolean())
        .optional("certificatePolicies", strings())
}

fn bankid_auth_request() -> ObjectDef {
    ObjectDef::new(Entity::BankIdAuthRequest)
        .optional(
            "personalNumber",
            PrimitiveDef::new(PrimitiveKind::String).pattern(Pattern::personal_number()),
        )
        .required("endUserIp", Definition::string())
        .optional("requirement", bankid_requirement())
}

fn bankid_auth_response() -> ObjectDef {
    ObjectDef::new(Entity::BankIdAuthResponse)
        .required("orderRef", Definition::string())
        .required("autoStartToken", Definition::string())
        .required("qrStartToken", Definition::string())
        .required("qrStartSecret", Definition::string())
}

fn stripe_payment_intent() -> ObjectDef {
    ObjectDef::new(Entity::StripePaymentIntent)
        // öre/cents
        .required(
            "amount",
            PrimitiveDef::new(PrimitiveKind::Number).above(0.0),
        )
        .defaulted("currency", Definition::string(), "SEK")
        .optional("description", Definition::string())
        .optional("metadata", Definition::string_map())
        .optional("paymentMethod", Definition::string())
        .optional("customer", Definition::string())
}

fn fortnox_invoice_row() -> ObjectDef {
    ObjectDef::new(Entity::FortnoxInvoiceRow)
        .optional("ArticleNumber", Definition::string())
        .required("Description", Definition::string())
        .required("Quantity", Definition::number())
        .required("Price", Definition::number())
        // Swedish moms
        .defaulted("VAT", Definition::number(), 25_i64)
}

fn fortnox_invoice() -> ObjectDef {
    ObjectDef::new(Entity::FortnoxInvoice)
        .required("CustomerNumber", Definition::string())
        .required("InvoiceDate", Definition::string())
        .required("DueDate", Definition::string())
        .required("InvoiceRows", Definition::list_of(fortnox_invoice_row().into()))
        .defaulted("Currency", Definition::string(), "SEK")
        .defaulted("Language", Definition::string(), "SV")
}
