//! Primitive type vocabulary: the closed sets of kinds a Blueprint may name.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity. Each
//! enum's `NAMES` slice is what the schema registry uses for enum membership
//! checks, so a member is added in exactly one place.
//!
//! Matching is exact and case-sensitive. `"Table"` is not a component kind.

// ── Database ─────────────────────────────────────────────────────────────────

vocabulary! {
    /// Column kinds usable in a table field.
    pub enum FieldType ("field type") {
        // Primitive types
        String => "string",
        Text => "text",
        Number => "number",
        Integer => "integer",
        Float => "float",
        Boolean => "boolean",
        Date => "date",
        DateTime => "datetime",
        Timestamp => "timestamp",
        Time => "time",

        // Special types
        Uuid => "uuid",
        Email => "email",
        Url => "url",
        Phone => "phone",
        Json => "json",
        Jsonb => "jsonb",
        Array => "array",

        // Relations
        Relation => "relation",
    }
}

impl FieldType {
    /// Only relation fields carry a `references` block.
    pub const fn is_relation(self) -> bool {
        matches!(self, Self::Relation)
    }

    /// Only array fields carry an `items` element type.
    pub const fn is_array(self) -> bool {
        matches!(self, Self::Array)
    }

    /// Whether length constraints (`minLength`/`maxLength`/`pattern`) apply.
    pub const fn is_textual(self) -> bool {
        matches!(
            self,
            Self::String | Self::Text | Self::Email | Self::Url | Self::Phone | Self::Uuid
        )
    }

    /// Whether range constraints (`min`/`max`) apply.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Integer | Self::Float)
    }
}

vocabulary! {
    /// What happens to referencing rows when the referenced row changes.
    pub enum ReferentialAction ("referential action") {
        Cascade => "cascade",
        SetNull => "set_null",
        Restrict => "restrict",
    }
}

// ── UI ───────────────────────────────────────────────────────────────────────

vocabulary! {
    /// UI component kinds.
    pub enum ComponentType ("component type") {
        // Layout
        Container => "container",
        Grid => "grid",
        Flex => "flex",
        Card => "card",

        // Data display
        Table => "table",
        List => "list",
        Detail => "detail",
        Chart => "chart",
        Metric => "metric",

        // Forms
        Form => "form",
        Input => "input",
        Select => "select",
        Checkbox => "checkbox",
        Radio => "radio",
        Textarea => "textarea",
        Datepicker => "datepicker",
        FileUpload => "file_upload",

        // Actions
        Button => "button",
        Link => "link",
        Modal => "modal",
        Drawer => "drawer",

        // Navigation
        Navbar => "navbar",
        Sidebar => "sidebar",
        Breadcrumbs => "breadcrumbs",
        Tabs => "tabs",
    }
}

/// Coarse grouping of component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentCategory {
    Layout,
    DataDisplay,
    Form,
    Action,
    Navigation,
}

impl ComponentType {
    pub const fn category(self) -> ComponentCategory {
        match self {
            Self::Container | Self::Grid | Self::Flex | Self::Card => ComponentCategory::Layout,
            Self::Table | Self::List | Self::Detail | Self::Chart | Self::Metric => {
                ComponentCategory::DataDisplay
            }
            Self::Form
            | Self::Input
            | Self::Select
            | Self::Checkbox
            | Self::Radio
            | Self::Textarea
            | Self::Datepicker
            | Self::FileUpload => ComponentCategory::Form,
            Self::Button | Self::Link | Self::Modal | Self::Drawer => ComponentCategory::Action,
            Self::Navbar | Self::Sidebar | Self::Breadcrumbs | Self::Tabs => {
                ComponentCategory::Navigation
            }
        }
    }
}

vocabulary! {
    pub enum PageLayout ("page layout") {
        Default => "default",
        Auth => "auth",
        Dashboard => "dashboard",
        Blank => "blank",
    }
}

vocabulary! {
    /// Access requirement of a page.
    pub enum PageAuth ("page auth") {
        Public => "public",
        Required => "required",
        Optional => "optional",
    }
}

// ── API ──────────────────────────────────────────────────────────────────────

vocabulary! {
    pub enum HttpMethod ("HTTP method") {
        Get => "GET",
        Post => "POST",
        Put => "PUT",
        Patch => "PATCH",
        Delete => "DELETE",
    }
}

vocabulary! {
    /// Access requirement of an endpoint. Endpoints have no `optional` mode.
    pub enum EndpointAuth ("endpoint auth") {
        Public => "public",
        Required => "required",
    }
}

// ── Workflows ────────────────────────────────────────────────────────────────

vocabulary! {
    pub enum WorkflowTrigger ("workflow trigger") {
        Manual => "manual",
        Schedule => "schedule",
        Webhook => "webhook",
        Database => "database",
    }
}

vocabulary! {
    pub enum StepAction ("workflow step action") {
        Query => "query",
        Insert => "insert",
        Update => "update",
        Delete => "delete",
        Http => "http",
        Email => "email",
        Script => "script",
    }
}

// ── Auth & deployment ────────────────────────────────────────────────────────

vocabulary! {
    pub enum AuthProvider ("auth provider") {
        Email => "email",
        Google => "google",
        BankId => "bankid",
        Github => "github",
        Microsoft => "microsoft",
    }
}

vocabulary! {
    pub enum DeployEnvironment ("deploy environment") {
        Development => "development",
        Staging => "staging",
        Production => "production",
    }
}

vocabulary! {
    /// Data-residency regions. EU only.
    pub enum Region ("region") {
        EuNorth1 => "eu-north-1",
        EuCentral1 => "eu-central-1",
    }
}

// ── Platform: tenants ────────────────────────────────────────────────────────

vocabulary! {
    pub enum TenantStatus ("tenant status") {
        Active => "active",
        Trial => "trial",
        Suspended => "suspended",
        Cancelled => "cancelled",
        Deleted => "deleted",
    }
}

vocabulary! {
    pub enum SubscriptionPlan ("subscription plan") {
        Free => "free",
        Starter => "starter",
        Professional => "professional",
        Enterprise => "enterprise",
        Custom => "custom",
    }
}

vocabulary! {
    pub enum PaymentMethod ("payment method") {
        Card => "card",
        Invoice => "invoice",
        Wire => "wire",
    }
}

vocabulary! {
    pub enum BillingCycle ("billing cycle") {
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

vocabulary! {
    pub enum MemberStatus ("member status") {
        Active => "active",
        Invited => "invited",
        Suspended => "suspended",
    }
}

vocabulary! {
    /// GDPR Article 6 lawful bases.
    pub enum LegalBasis ("legal basis") {
        Consent => "consent",
        Contract => "contract",
        LegalObligation => "legal_obligation",
        VitalInterests => "vital_interests",
        PublicTask => "public_task",
        LegitimateInterests => "legitimate_interests",
    }
}

vocabulary! {
    pub enum RiskLevel ("risk level") {
        Low => "low",
        Medium => "medium",
        High => "high",
        VeryHigh => "very_high",
    }
}

vocabulary! {
    pub enum RiskSeverity ("risk severity") {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

vocabulary! {
    pub enum DpiaStatus ("DPIA status") {
        Draft => "draft",
        PendingApproval => "pending_approval",
        Approved => "approved",
        Rejected => "rejected",
    }
}

// ── Platform: users ──────────────────────────────────────────────────────────

vocabulary! {
    pub enum UserRole ("user role") {
        Owner => "owner",
        Admin => "admin",
        Developer => "developer",
        Editor => "editor",
        Viewer => "viewer",
    }
}

vocabulary! {
    pub enum UserStatus ("user status") {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
        PendingVerification => "pending_verification",
    }
}

vocabulary! {
    pub enum ThemePreference ("theme preference") {
        Light => "light",
        Dark => "dark",
        Auto => "auto",
    }
}

vocabulary! {
    pub enum UiLanguage ("language") {
        Swedish => "sv",
        English => "en",
    }
}

vocabulary! {
    pub enum MfaMethod ("MFA method") {
        Totp => "totp",
        Sms => "sms",
        Email => "email",
    }
}

vocabulary! {
    pub enum PermissionAction ("permission action") {
        Create => "create",
        Read => "read",
        Update => "update",
        Delete => "delete",
        Execute => "execute",
    }
}

// ── Platform: connectors ─────────────────────────────────────────────────────

vocabulary! {
    pub enum ConnectorType ("connector type") {
        // Swedish/Nordic
        BankId => "bankid",
        Fortnox => "fortnox",
        Visma => "visma",
        Swish => "swish",
        Klarna => "klarna",

        // International payments
        Stripe => "stripe",
        Paypal => "paypal",

        // E-sign
        Scrive => "scrive",
        Assently => "assently",

        // Communication
        Email => "email",
        Sms => "sms",
        Slack => "slack",

        // Storage/Docs
        GoogleDrive => "google_drive",
        GoogleSheets => "google_sheets",
        Notion => "notion",
        Dropbox => "dropbox",

        Custom => "custom",
    }
}

vocabulary! {
    pub enum ConnectorStatus ("connector status") {
        Active => "active",
        Inactive => "inactive",
        Error => "error",
        PendingSetup => "pending_setup",
        Deprecated => "deprecated",
    }
}

vocabulary! {
    pub enum ConnectorCategory ("connector category") {
        Authentication => "authentication",
        Payments => "payments",
        Accounting => "accounting",
        ESign => "e_sign",
        Communication => "communication",
        Storage => "storage",
        Crm => "crm",
        Other => "other",
    }
}

vocabulary! {
    pub enum ConnectorAuthMethod ("connector auth method") {
        ApiKey => "api_key",
        OAuth2 => "oauth2",
        BasicAuth => "basic_auth",
        BearerToken => "bearer_token",
        Custom => "custom",
    }
}

vocabulary! {
    pub enum PricingModel ("pricing model") {
        Free => "free",
        Usage => "usage",
        Subscription => "subscription",
        Enterprise => "enterprise",
    }
}

vocabulary! {
    pub enum ExecutionStatus ("execution status") {
        Pending => "pending",
        Running => "running",
        Success => "success",
        Error => "error",
        Timeout => "timeout",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_display_matches_document_spelling() {
        assert_eq!(FieldType::DateTime.to_string(), "datetime");
        assert_eq!(FieldType::Relation.to_string(), "relation");
        assert_eq!(ComponentType::FileUpload.to_string(), "file_upload");
    }

    #[test]
    fn from_str_is_exact_and_case_sensitive() {
        assert_eq!("uuid".parse::<FieldType>().unwrap(), FieldType::Uuid);
        assert!("UUID".parse::<FieldType>().is_err());
        assert!("Table".parse::<ComponentType>().is_err());
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert!("get".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn unknown_member_error_lists_legal_set() {
        let err = "patch".parse::<HttpMethod>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("HTTP method"));
        assert!(message.contains("GET, POST, PUT, PATCH, DELETE"));
    }

    #[test]
    fn names_and_all_stay_aligned() {
        assert_eq!(FieldType::ALL.len(), FieldType::NAMES.len());
        for (member, name) in ComponentType::ALL.iter().zip(ComponentType::NAMES) {
            assert_eq!(member.as_str(), *name);
        }
    }

    #[test]
    fn serde_uses_document_spelling() {
        let json = serde_json::to_string(&Region::EuNorth1).unwrap();
        assert_eq!(json, "\"eu-north-1\"");
        let parsed: ReferentialAction = serde_json::from_str("\"set_null\"").unwrap();
        assert_eq!(parsed, ReferentialAction::SetNull);
    }

    #[test]
    fn component_categories() {
        assert_eq!(ComponentType::Grid.category(), ComponentCategory::Layout);
        assert_eq!(ComponentType::Table.category(), ComponentCategory::DataDisplay);
        assert_eq!(ComponentType::FileUpload.category(), ComponentCategory::Form);
        assert_eq!(ComponentType::Drawer.category(), ComponentCategory::Action);
        assert_eq!(ComponentType::Tabs.category(), ComponentCategory::Navigation);
    }

    #[test]
    fn field_type_predicates() {
        assert!(FieldType::Relation.is_relation());
        assert!(FieldType::Array.is_array());
        assert!(FieldType::Email.is_textual());
        assert!(FieldType::Float.is_numeric());
        assert!(!FieldType::Boolean.is_textual());
    }
}
