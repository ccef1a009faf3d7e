//! User contracts: accounts, sessions, and RBAC.

use super::definition::{Definition, ObjectDef, PrimitiveDef, PrimitiveKind};
use super::registry::Entity;
use crate::domain::value_objects::{
    AuthProvider, MfaMethod, PermissionAction, ThemePreference, UiLanguage, UserRole, UserStatus,
};

pub(super) fn define(entity: Entity) -> Definition {
    let def = match entity {
        Entity::User => user(),
        Entity::UserProfile => profile(),
        Entity::UserPreferences => preferences(),
        Entity::UserTenantMembership => tenant_membership(),
        Entity::CreateUserRequest => create_request(),
        Entity::UpdateUserRequest => update_request(),
        Entity::LoginRequest => login_request(),
        Entity::LoginResponse => login_response(),
        Entity::Session => session(),
        Entity::Permission => permission(),
        Entity::RoleDefinition => role_definition(),
        other => unreachable!("{other} is not a user entity"),
    };
    def.into()
}

fn bounded(min: usize, max: usize) -> PrimitiveDef {
    PrimitiveDef::new(PrimitiveKind::String)
        .min_length(min)
        .max_length(max)
}

fn profile() -> ObjectDef {
    ObjectDef::new(Entity::UserProfile)
        .required("firstName", bounded(1, 100))
        .required("lastName", bounded(1, 100))
        .optional("displayName", bounded(1, 200))
        .optional("avatar", Definition::url())
        .optional(
            "bio",
            PrimitiveDef::new(PrimitiveKind::String).max_length(500),
        )
        .optional("phone", Definition::string())
        .defaulted("timezone", Definition::string(), "Europe/Stockholm")
        .defaulted("locale", Definition::string(), "sv-SE")
}

fn preferences() -> ObjectDef {
    ObjectDef::new(Entity::UserPreferences)
        .defaulted("emailNotifications", Definition::boolean(), true)
        .defaulted("smsNotifications", Definition::boolean(), false)
        .defaulted("marketingEmails", Definition::boolean(), false)
        .defaulted(
            "theme",
            Definition::one_of(ThemePreference::NAMES),
            ThemePreference::Auto.as_str(),
        )
        .defaulted(
            "language",
            Definition::one_of(UiLanguage::NAMES),
            UiLanguage::Swedish.as_str(),
        )
}

fn tenant_membership() -> ObjectDef {
    ObjectDef::new(Entity::UserTenantMembership)
        .required("tenantId", Definition::uuid())
        .required("role", Definition::one_of(UserRole::NAMES))
        .required("joinedAt", Definition::datetime())
}

fn user() -> ObjectDef {
    ObjectDef::new(Entity::User)
        .required("id", Definition::uuid())
        .required("email", Definition::email())
        .defaulted("emailVerified", Definition::boolean(), false)
        .required("authProvider", Definition::one_of(AuthProvider::NAMES))
        .optional("authProviderId", Definition::string())
        .required("profile", profile())
        .optional("preferences", preferences())
        .defaulted(
            "status",
            Definition::one_of(UserStatus::NAMES),
            UserStatus::PendingVerification.as_str(),
        )
        .defaulted(
            "role",
            Definition::one_of(UserRole::NAMES),
            UserRole::Viewer.as_str(),
        )
        .required("tenantId", Definition::uuid())
        .optional("tenants", Definition::list_of(tenant_membership().into()))
        .required("createdAt", Definition::datetime())
        .required("updatedAt", Definition::datetime())
        .optional("lastLoginAt", Definition::datetime())
        .defaulted("mfaEnabled", Definition::boolean(), false)
        .optional("mfaMethod", Definition::one_of(MfaMethod::NAMES))
}

fn create_request() -> ObjectDef {
    ObjectDef::new(Entity::CreateUserRequest)
        .required("email", Definition::email())
        // Absent for OAuth sign-ups.
        .optional("password", bounded(8, 100))
        .defaulted(
            "authProvider",
            Definition::one_of(AuthProvider::NAMES),
            AuthProvider::Email.as_str(),
        )
        .required("profile", profile())
        .optional("tenantId", Definition::uuid())
}

fn update_request() -> ObjectDef {
    ObjectDef::new(Entity::UpdateUserRequest)
        .optional("profile", profile().partial())
        .optional("preferences", preferences().partial())
        .optional("status", Definition::one_of(UserStatus::NAMES))
        .optional("role", Definition::one_of(UserRole::NAMES))
}

fn login_request() -> ObjectDef {
    ObjectDef::new(Entity::LoginRequest)
        .required("email", Definition::email())
        .required(
            "password",
            PrimitiveDef::new(PrimitiveKind::String).min_length(1),
        )
        .optional("mfaCode", Definition::string())
}

fn login_response() -> ObjectDef {
    ObjectDef::new(Entity::LoginResponse)
        .required("user", user())
        .required("accessToken", Definition::string())
        .required("refreshToken", Definition::string())
        .required("expiresIn", Definition::number())
}

fn session() -> ObjectDef {
    ObjectDef::new(Entity::Session)
        .required("id", Definition::uuid())
        .required("userId", Definition::uuid())
        .required("tenantId", Definition::uuid())
        .required("accessToken", Definition::string())
        .required("refreshToken", Definition::string())
        .required("expiresAt", Definition::datetime())
        .required("createdAt", Definition::datetime())
        .optional("ipAddress", Definition::string())
        .optional("userAgent", Definition::string())
}

fn permission() -> ObjectDef {
    ObjectDef::new(Entity::Permission)
        .required("resource", Definition::string())
        .required("action", Definition::one_of(PermissionAction::NAMES))
        .optional("conditions", Definition::record())
}

fn role_definition() -> ObjectDef {
    ObjectDef::new(Entity::RoleDefinition)
        .required("name", Definition::one_of(UserRole::NAMES))
        .required("description", Definition::string())
        .required("permissions", Definition::list_of(permission().into()))
        .defaulted("isSystem", Definition::boolean(), false)
}
