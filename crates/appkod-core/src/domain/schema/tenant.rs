//! Tenant contracts: organisations, billing, membership, and compliance records.

use super::definition::{Definition, ObjectDef, Pattern, PrimitiveDef, PrimitiveKind};
use super::registry::Entity;
use crate::domain::value_objects::{
    BillingCycle, DpiaStatus, LegalBasis, MemberStatus, PaymentMethod, Region, RiskLevel,
    RiskSeverity, SubscriptionPlan, TenantStatus,
};

pub(super) fn define(entity: Entity) -> Definition {
    let def = match entity {
        Entity::Tenant => tenant(),
        Entity::TenantSettings => settings(),
        Entity::GdprSettings => gdpr_settings(),
        Entity::TenantBilling => billing(),
        Entity::BillingAddress => billing_address(),
        Entity::TenantUsage => usage(),
        Entity::CreateTenantRequest => create_request(),
        Entity::UpdateTenantRequest => update_request(),
        Entity::TenantMember => member(),
        Entity::TenantInvite => invite(),
        Entity::TenantAuditLog => audit_log(),
        Entity::Dpia => dpia(),
        Entity::DpiaRisk => dpia_risk(),
        other => unreachable!("{other} is not a tenant entity"),
    };
    def.into()
}

fn tenant_name() -> PrimitiveDef {
    PrimitiveDef::new(PrimitiveKind::String)
        .min_length(1)
        .max_length(200)
}

fn slug() -> PrimitiveDef {
    PrimitiveDef::new(PrimitiveKind::String)
        .min_length(1)
        .max_length(100)
        .pattern(Pattern::slug())
}

fn description() -> PrimitiveDef {
    PrimitiveDef::new(PrimitiveKind::String).max_length(500)
}

fn strings() -> Definition {
    Definition::list_of(Definition::string())
}

fn gdpr_settings() -> ObjectDef {
    ObjectDef::new(Entity::GdprSettings)
        .defaulted("dpaAccepted", Definition::boolean(), false)
        .optional("dpaAcceptedAt", Definition::datetime())
        .optional("dpaVersion", Definition::string())
        .optional("dataProcessingPurpose", Definition::string())
        .optional("autoDeleteAfterDays", Definition::number())
}

fn settings() -> ObjectDef {
    ObjectDef::new(Entity::TenantSettings)
        // Branding
        .optional("logo", Definition::url())
        .optional("primaryColor", Definition::string())
        .optional("customDomain", Definition::string())
        // Features
        .optional("enabledFeatures", strings())
        .optional("maxUsers", Definition::number())
        .optional("maxBlueprints", Definition::number())
        .optional("maxStorageGB", Definition::number())
        // Security
        .defaulted("requireMfa", Definition::boolean(), false)
        .optional("allowedAuthProviders", strings())
        .optional("ipWhitelist", strings())
        .defaulted("sessionTimeout", Definition::number(), 3600_i64)
        // Data residency
        .defaulted(
            "region",
            Definition::one_of(Region::NAMES),
            Region::EuNorth1.as_str(),
        )
        .defaulted("dataRetentionDays", Definition::number(), 365_i64)
        .optional("gdprSettings", gdpr_settings())
}

fn billing_address() -> ObjectDef {
    ObjectDef::new(Entity::BillingAddress)
        .required("street", Definition::string())
        .required("city", Definition::string())
        .required("postalCode", Definition::string())
        .required("country", Definition::string())
}

fn billing() -> ObjectDef {
    ObjectDef::new(Entity::TenantBilling)
        .required("plan", Definition::one_of(SubscriptionPlan::NAMES))
        .required("billingEmail", Definition::email())
        .required("subscriptionStart", Definition::datetime())
        .optional("subscriptionEnd", Definition::datetime())
        .optional("trialEnd", Definition::datetime())
        .optional("cancelAt", Definition::datetime())
        .optional("paymentMethod", Definition::one_of(PaymentMethod::NAMES))
        .defaulted(
            "billingCycle",
            Definition::one_of(BillingCycle::NAMES),
            BillingCycle::Monthly.as_str(),
        )
        // Organisationsnummer and VAT number
        .optional("orgNumber", Definition::string())
        .optional("vatNumber", Definition::string())
        .defaulted("country", Definition::string(), "SE")
        .optional("billingAddress", billing_address())
}

fn usage() -> ObjectDef {
    ObjectDef::new(Entity::TenantUsage)
        .required("periodStart", Definition::datetime())
        .required("periodEnd", Definition::datetime())
        .defaulted("apiRequests", Definition::number(), 0_i64)
        .defaulted("storageUsedGB", Definition::number(), 0_i64)
        .defaulted("buildMinutes", Definition::number(), 0_i64)
        .defaulted("activeUsers", Definition::number(), 0_i64)
        .defaulted("deploymentsCount", Definition::number(), 0_i64)
        .defaulted("estimatedCostEUR", Definition::number(), 0_i64)
        .optional("apiRequestsLimit", Definition::number())
        .optional("storageGBLimit", Definition::number())
        .optional("buildMinutesLimit", Definition::number())
}

fn tenant() -> ObjectDef {
    ObjectDef::new(Entity::Tenant)
        .required("id", Definition::uuid())
        .required("name", tenant_name())
        .required("slug", slug())
        .optional("description", description())
        .required("ownerId", Definition::uuid())
        .required("status", Definition::one_of(TenantStatus::NAMES))
        .required("settings", settings())
        .required("billing", billing())
        .optional("usage", usage())
        .required("createdAt", Definition::datetime())
        .required("updatedAt", Definition::datetime())
        .optional("lastAuditAt", Definition::datetime())
        .defaulted("dpiaCompleted", Definition::boolean(), false)
        .optional("dpiaCompletedAt", Definition::datetime())
}

fn create_request() -> ObjectDef {
    ObjectDef::new(Entity::CreateTenantRequest)
        .required("name", tenant_name())
        .required("slug", slug())
        .optional("description", description())
        .defaulted(
            "plan",
            Definition::one_of(SubscriptionPlan::NAMES),
            SubscriptionPlan::Free.as_str(),
        )
        .required("billingEmail", Definition::email())
        .optional("orgNumber", Definition::string())
        .defaulted("country", Definition::string(), "SE")
}

fn update_request() -> ObjectDef {
    ObjectDef::new(Entity::UpdateTenantRequest)
        .optional("name", tenant_name())
        .optional("description", description())
        .optional("settings", settings().partial())
        .optional("status", Definition::one_of(TenantStatus::NAMES))
}

fn member() -> ObjectDef {
    ObjectDef::new(Entity::TenantMember)
        .required("id", Definition::uuid())
        .required("tenantId", Definition::uuid())
        .required("userId", Definition::uuid())
        .required("role", Definition::string())
        .required("joinedAt", Definition::datetime())
        .optional("invitedBy", Definition::uuid())
        .required("status", Definition::one_of(MemberStatus::NAMES))
}

fn invite() -> ObjectDef {
    ObjectDef::new(Entity::TenantInvite)
        .required("id", Definition::uuid())
        .required("tenantId", Definition::uuid())
        .required("email", Definition::email())
        .required("role", Definition::string())
        .required("invitedBy", Definition::uuid())
        .required("expiresAt", Definition::datetime())
        .required("createdAt", Definition::datetime())
        .optional("acceptedAt", Definition::datetime())
        .required("token", Definition::string())
}

fn audit_log() -> ObjectDef {
    ObjectDef::new(Entity::TenantAuditLog)
        .required("id", Definition::uuid())
        .required("tenantId", Definition::uuid())
        .required("userId", Definition::uuid())
        .required("userEmail", Definition::email())
        .required("action", Definition::string())
        .required("resource", Definition::string())
        .optional("resourceId", Definition::string())
        .required("timestamp", Definition::datetime())
        .optional("ipAddress", Definition::string())
        .optional("userAgent", Definition::string())
        .optional("location", Definition::string())
        .optional("metadata", Definition::record())
        .optional("gdprLawfulBasis", Definition::string())
}

fn dpia_risk() -> ObjectDef {
    ObjectDef::new(Entity::DpiaRisk)
        .required("description", Definition::string())
        .required("severity", Definition::one_of(RiskSeverity::NAMES))
        .required("mitigation", Definition::string())
}

fn dpia() -> ObjectDef {
    ObjectDef::new(Entity::Dpia)
        .required("id", Definition::uuid())
        .required("tenantId", Definition::uuid())
        .optional("blueprintId", Definition::uuid())
        // Assessment
        .required("dataTypes", strings())
        .required("processingPurpose", Definition::string())
        .required("legalBasis", Definition::one_of(LegalBasis::NAMES))
        // Risks
        .required("riskLevel", Definition::one_of(RiskLevel::NAMES))
        .required("risks", Definition::list_of(dpia_risk().into()))
        // Compliance
        .required("dataMinimizationApplied", Definition::boolean())
        .required("purposeLimitationApplied", Definition::boolean())
        .required("retentionPeriod", Definition::string())
        .required("dataSubjectRights", strings())
        // Approval
        .required("completedBy", Definition::uuid())
        .required("completedAt", Definition::datetime())
        .optional("approvedBy", Definition::uuid())
        .optional("approvedAt", Definition::datetime())
        .required("status", Definition::one_of(DpiaStatus::NAMES))
}
