//! Structural definitions: the building blocks of the schema registry.
//!
//! A [`Definition`] describes what a legal value looks like at one position of
//! a document. Definitions compose by value; the only indirection is
//! [`Definition::Ref`], which names a registry entity and is resolved by the
//! validator when it is reached, never eagerly expanded.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::registry::Entity;
use crate::domain::document::Document;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub enum Definition {
    Primitive(PrimitiveDef),
    Enum(EnumDef),
    Object(ObjectDef),
    List(ListDef),
    /// Free-form record: any string keys, each value checked against one definition.
    Map(MapDef),
    /// First matching variant wins.
    Union(Vec<Definition>),
    Any,
    Ref(Entity),
}

impl Definition {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::String))
    }

    pub fn number() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::Number))
    }

    pub fn integer() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::Integer))
    }

    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::Boolean))
    }

    pub fn null() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::Null))
    }

    pub fn uuid() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::Uuid))
    }

    pub fn email() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::Email))
    }

    pub fn url() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::Url))
    }

    pub fn datetime() -> Self {
        Self::Primitive(PrimitiveDef::new(PrimitiveKind::DateTime))
    }

    pub fn one_of(members: &'static [&'static str]) -> Self {
        Self::Enum(EnumDef { members })
    }

    pub fn list_of(item: Definition) -> Self {
        Self::List(ListDef::of(item))
    }

    /// A list with at least `min` elements.
    pub fn non_empty_list_of(item: Definition, min: usize) -> Self {
        Self::List(ListDef::of(item).min_items(min))
    }

    pub fn map_of(value: Definition) -> Self {
        Self::Map(MapDef {
            value: Box::new(value),
        })
    }

    /// Free-form `record<string, any>`.
    pub fn record() -> Self {
        Self::map_of(Self::Any)
    }

    /// `record<string, string>`.
    pub fn string_map() -> Self {
        Self::map_of(Self::string())
    }

    /// One-line type description, used by `appkod schema`.
    pub fn describe(&self) -> String {
        match self {
            Self::Primitive(p) => p.describe(),
            Self::Enum(e) => e.members.join(" | "),
            Self::Object(o) => match o.entity {
                Some(entity) => format!("<{entity}>"),
                None => "object".into(),
            },
            Self::List(l) => format!("{}[]", l.item.describe()),
            Self::Map(m) => format!("map<{}>", m.value.describe()),
            Self::Union(variants) => variants
                .iter()
                .map(Definition::describe)
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Any => "any".into(),
            Self::Ref(entity) => format!("<{entity}>"),
        }
    }
}

impl From<PrimitiveDef> for Definition {
    fn from(def: PrimitiveDef) -> Self {
        Self::Primitive(def)
    }
}

impl From<ObjectDef> for Definition {
    fn from(def: ObjectDef) -> Self {
        Self::Object(def)
    }
}

// ── Primitives ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    /// A finite number with no fractional part.
    Integer,
    Boolean,
    Null,
    /// Hyphenated 8-4-4-4-12 hex form.
    Uuid,
    Email,
    Url,
    /// RFC 3339 in UTC (`Z` suffix).
    DateTime,
}

impl PrimitiveKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Uuid => "uuid",
            Self::Email => "email",
            Self::Url => "url",
            Self::DateTime => "datetime",
        }
    }

    /// The document kind a value must have before format checks apply.
    pub const fn document_kind(self) -> &'static str {
        match self {
            Self::String | Self::Uuid | Self::Email | Self::Url | Self::DateTime => "string",
            Self::Number | Self::Integer => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrimitiveDef {
    pub kind: PrimitiveKind,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    /// Exclusive lower bound.
    pub above: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Pattern>,
}

impl PrimitiveDef {
    pub const fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            min_length: None,
            max_length: None,
            min: None,
            above: None,
            max: None,
            pattern: None,
        }
    }

    #[must_use]
    pub const fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    #[must_use]
    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    #[must_use]
    pub const fn min(mut self, n: f64) -> Self {
        self.min = Some(n);
        self
    }

    #[must_use]
    pub const fn above(mut self, n: f64) -> Self {
        self.above = Some(n);
        self
    }

    #[must_use]
    pub const fn max(mut self, n: f64) -> Self {
        self.max = Some(n);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    fn describe(&self) -> String {
        let mut out = self.kind.name().to_string();
        let mut constraints = Vec::new();
        if let Some(n) = self.min_length {
            constraints.push(format!("minLength {n}"));
        }
        if let Some(n) = self.max_length {
            constraints.push(format!("maxLength {n}"));
        }
        if let Some(n) = self.min {
            constraints.push(format!("min {n}"));
        }
        if let Some(n) = self.above {
            constraints.push(format!("> {n}"));
        }
        if let Some(n) = self.max {
            constraints.push(format!("max {n}"));
        }
        if let Some(p) = &self.pattern {
            constraints.push(format!("pattern {}", p.as_str()));
        }
        if !constraints.is_empty() {
            out.push_str(&format!(" ({})", constraints.join(", ")));
        }
        out
    }
}

/// A compiled regex plus the message reported when it does not match.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: Cow<'static, str>,
}

impl Pattern {
    pub fn new(pattern: &str, message: impl Into<Cow<'static, str>>) -> Result<Self, DomainError> {
        let regex = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            regex,
            message: message.into(),
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// `[a-z_][a-z0-9_]*`, case-insensitive.
    pub fn identifier() -> Self {
        IDENTIFIER.clone()
    }

    pub fn absolute_path() -> Self {
        ABSOLUTE_PATH.clone()
    }

    pub fn slug() -> Self {
        SLUG.clone()
    }

    /// Swedish personal number, `YYYYMMDDXXXX`.
    pub fn personal_number() -> Self {
        PERSONAL_NUMBER.clone()
    }
}

fn builtin(pattern: &str, message: &'static str) -> Pattern {
    Pattern::new(pattern, message).expect("built-in pattern compiles")
}

static IDENTIFIER: LazyLock<Pattern> =
    LazyLock::new(|| builtin(r"(?i)^[a-z_][a-z0-9_]*$", "Must be valid identifier"));
static ABSOLUTE_PATH: LazyLock<Pattern> = LazyLock::new(|| builtin(r"^/", "Must start with /"));
static SLUG: LazyLock<Pattern> = LazyLock::new(|| {
    builtin(
        r"^[a-z0-9-]+$",
        "Must be lowercase alphanumeric with hyphens",
    )
});
static PERSONAL_NUMBER: LazyLock<Pattern> =
    LazyLock::new(|| builtin(r"^\d{12}$", "Must be 12 digits"));

// ── Enums, lists, maps ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct EnumDef {
    pub members: &'static [&'static str],
}

impl EnumDef {
    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(&value)
    }

    /// `'a' | 'b' | 'c'`
    pub fn expected(&self) -> String {
        self.members
            .iter()
            .map(|m| format!("'{m}'"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Debug, Clone)]
pub struct ListDef {
    pub item: Box<Definition>,
    pub min_items: Option<usize>,
}

impl ListDef {
    pub fn of(item: Definition) -> Self {
        Self {
            item: Box::new(item),
            min_items: None,
        }
    }

    #[must_use]
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }
}

#[derive(Debug, Clone)]
pub struct MapDef {
    pub value: Box<Definition>,
}

// ── Objects ──────────────────────────────────────────────────────────────────

/// How an object field behaves when the key is absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    /// Absent keys receive this value in the output.
    Defaulted(Document),
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub definition: Definition,
    pub presence: Presence,
}

/// Cross-field constraints checked after an object's own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRule {
    /// `field` must be present when `discriminant` equals `value`.
    RequiredWhen {
        field: &'static str,
        discriminant: &'static str,
        value: &'static str,
    },
    /// `field` may only be present when `discriminant` equals `value`.
    ForbiddenUnless {
        field: &'static str,
        discriminant: &'static str,
        value: &'static str,
    },
    /// Exactly one of the named fields is present.
    ExactlyOneOf(&'static [&'static str]),
    /// Elements of the list field `list` carry distinct string values at `key`.
    UniqueBy {
        list: &'static str,
        key: &'static str,
    },
}

impl ObjectRule {
    /// Present iff `discriminant = value`.
    pub fn present_iff(
        field: &'static str,
        discriminant: &'static str,
        value: &'static str,
    ) -> [Self; 2] {
        [
            Self::RequiredWhen {
                field,
                discriminant,
                value,
            },
            Self::ForbiddenUnless {
                field,
                discriminant,
                value,
            },
        ]
    }

    /// Rules that still make sense when every field is optional.
    const fn survives_partial(&self) -> bool {
        matches!(self, Self::ForbiddenUnless { .. } | Self::UniqueBy { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectDef {
    pub entity: Option<Entity>,
    pub fields: Vec<FieldDef>,
    pub rules: Vec<ObjectRule>,
}

impl ObjectDef {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity: Some(entity),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn required(self, name: &'static str, definition: impl Into<Definition>) -> Self {
        self.field(name, definition.into(), Presence::Required)
    }

    #[must_use]
    pub fn optional(self, name: &'static str, definition: impl Into<Definition>) -> Self {
        self.field(name, definition.into(), Presence::Optional)
    }

    #[must_use]
    pub fn defaulted(
        self,
        name: &'static str,
        definition: impl Into<Definition>,
        default: impl Into<Document>,
    ) -> Self {
        self.field(name, definition.into(), Presence::Defaulted(default.into()))
    }

    #[must_use]
    pub fn rule(mut self, rule: ObjectRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = ObjectRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Every field optional with no defaults; presence rules dropped.
    #[must_use]
    pub fn partial(mut self) -> Self {
        for field in &mut self.fields {
            field.presence = Presence::Optional;
        }
        self.rules.retain(ObjectRule::survives_partial);
        self
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field(mut self, name: &'static str, definition: Definition, presence: Presence) -> Self {
        debug_assert!(
            self.field_named(name).is_none(),
            "duplicate field '{name}' in object definition"
        );
        self.fields.push(FieldDef {
            name,
            definition,
            presence,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_pattern_is_case_insensitive() {
        let p = Pattern::identifier();
        assert!(p.is_match("Customer_Id"));
        assert!(p.is_match("_private"));
        assert!(!p.is_match("1st"));
        assert!(!p.is_match("has-dash"));
        assert_eq!(p.message(), "Must be valid identifier");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = Pattern::new("(", "x").unwrap_err();
        assert!(matches!(err, DomainError::InvalidPattern { .. }));
    }

    #[test]
    fn partial_makes_everything_optional() {
        let def = ObjectDef::new(Entity::UserPreferences)
            .required("a", Definition::string())
            .defaulted("b", Definition::boolean(), true)
            .rule(ObjectRule::ExactlyOneOf(&["a", "b"]))
            .rule(ObjectRule::UniqueBy {
                list: "items",
                key: "name",
            })
            .partial();

        assert!(def.fields.iter().all(|f| f.presence == Presence::Optional));
        assert_eq!(def.rules.len(), 1);
    }

    #[test]
    fn describe_renders_constraints() {
        let def: Definition = PrimitiveDef::new(PrimitiveKind::String)
            .min_length(1)
            .max_length(100)
            .into();
        assert_eq!(def.describe(), "string (minLength 1, maxLength 100)");
        assert_eq!(
            Definition::list_of(Definition::Ref(Entity::Component)).describe(),
            "<component>[]"
        );
        assert_eq!(Definition::one_of(&["GET", "POST"]).describe(), "GET | POST");
    }
}
