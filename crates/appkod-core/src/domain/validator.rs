//! Recursive structural validator.
//!
//! Walks a [`Document`] against a [`Definition`], checking the user's input
//! first and filling defaults in the same traversal. Issues are collected, not
//! thrown: one bad field never hides its siblings. Order is depth-first, in
//! field-declaration order, then list order. Object-level rules report after
//! the object's own fields.
//!
//! Recursion through [`Definition::Ref`] is bounded per call by
//! [`ValidatorOptions::max_depth`]. Crossing the bound yields a single
//! "Maximum nesting depth exceeded" issue at the first offending path.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

use super::document::Document;
use super::path::DocumentPath;
use super::report::{ValidationIssue, ValidationOutcome};
use super::schema::{
    Definition, EnumDef, ListDef, MapDef, ObjectDef, ObjectRule, Presence, PrimitiveDef,
    PrimitiveKind, SchemaRegistry,
};
use super::schema::registry::Entity;

pub const DEFAULT_MAX_DEPTH: usize = 64;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles")
});
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+\S*$").expect("url regex compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Maximum number of nested `Ref` re-entries (component nesting levels).
    pub max_depth: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidatorOptions {
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Stateless validator over a registry. Cheap to construct, `Copy`, and safe
/// to share between threads: each call owns its own depth counter.
#[derive(Debug, Clone, Copy)]
pub struct StructuralValidator<'r> {
    registry: &'r SchemaRegistry,
    options: ValidatorOptions,
}

impl<'r> StructuralValidator<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            options: ValidatorOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate `value` against `definition`, reporting paths relative to `path`.
    pub fn validate(
        &self,
        definition: &Definition,
        value: &Document,
        path: &DocumentPath,
    ) -> ValidationOutcome {
        let mut walk = Walk::new(self.registry, self.options.max_depth);
        let output = walk.visit(definition, value, path);

        match output {
            Some(doc) if walk.issues.is_empty() => ValidationOutcome::Valid(doc),
            _ if walk.issues.is_empty() => ValidationOutcome::Invalid(vec![
                ValidationIssue::internal("validator produced no value and no issue"),
            ]),
            _ => ValidationOutcome::Invalid(walk.issues),
        }
    }

    /// Validate a whole document against a registry entity.
    pub fn validate_entity(&self, entity: Entity, value: &Document) -> ValidationOutcome {
        self.validate(
            self.registry.definition_of(entity),
            value,
            &DocumentPath::root(),
        )
    }
}

/// Per-call traversal state.
struct Walk<'r> {
    registry: &'r SchemaRegistry,
    max_depth: usize,
    depth: usize,
    depth_reported: bool,
    issues: Vec<ValidationIssue>,
}

impl<'r> Walk<'r> {
    fn new(registry: &'r SchemaRegistry, max_depth: usize) -> Self {
        Self {
            registry,
            max_depth,
            depth: 0,
            depth_reported: false,
            issues: Vec::new(),
        }
    }

    /// Scratch walk for trying a union variant.
    fn fork(&self) -> Self {
        Self {
            registry: self.registry,
            max_depth: self.max_depth,
            depth: self.depth,
            depth_reported: self.depth_reported,
            issues: Vec::new(),
        }
    }

    fn push(&mut self, path: &DocumentPath, message: impl Into<String>) {
        self.issues
            .push(ValidationIssue::structural(path.clone(), message));
    }

    fn fail(&mut self, path: &DocumentPath, message: impl Into<String>) -> Option<Document> {
        self.push(path, message);
        None
    }

    fn visit(
        &mut self,
        definition: &Definition,
        value: &Document,
        path: &DocumentPath,
    ) -> Option<Document> {
        match definition {
            Definition::Primitive(def) => self.primitive(def, value, path),
            Definition::Enum(def) => self.enumeration(def, value, path),
            Definition::Object(def) => self.object(def, value, path),
            Definition::List(def) => self.list(def, value, path),
            Definition::Map(def) => self.map(def, value, path),
            Definition::Union(variants) => self.union(variants, value, path),
            Definition::Any => Some(value.clone()),
            Definition::Ref(entity) => self.reference(*entity, value, path),
        }
    }

    fn reference(
        &mut self,
        entity: Entity,
        value: &Document,
        path: &DocumentPath,
    ) -> Option<Document> {
        if self.depth >= self.max_depth {
            if !self.depth_reported {
                self.depth_reported = true;
                let message = format!("Maximum nesting depth exceeded ({})", self.max_depth);
                self.push(path, message);
            }
            return None;
        }

        let registry = self.registry;
        self.depth += 1;
        let output = self.visit(registry.definition_of(entity), value, path);
        self.depth -= 1;
        output
    }

    // ── Primitives ───────────────────────────────────────────────────────

    fn primitive(
        &mut self,
        def: &PrimitiveDef,
        value: &Document,
        path: &DocumentPath,
    ) -> Option<Document> {
        let before = self.issues.len();

        match (def.kind, value) {
            (PrimitiveKind::Null, Document::Null) | (PrimitiveKind::Boolean, Document::Bool(_)) => {}
            (PrimitiveKind::Number | PrimitiveKind::Integer, Document::Number(n)) => {
                self.number(def, *n, path)
            }
            (kind, Document::String(s)) if kind.document_kind() == "string" => {
                self.string(def, s, path)
            }
            (kind, other) => {
                let message = format!(
                    "Expected {}, received {}",
                    kind.document_kind(),
                    other.kind()
                );
                return self.fail(path, message);
            }
        }

        (self.issues.len() == before).then(|| value.clone())
    }

    fn number(&mut self, def: &PrimitiveDef, n: f64, path: &DocumentPath) {
        if !n.is_finite() {
            self.push(path, "Number must be finite");
            return;
        }
        if def.kind == PrimitiveKind::Integer && n.fract() != 0.0 {
            self.push(path, "Expected integer, received float");
        }
        if let Some(min) = def.min.filter(|min| n < *min) {
            self.push(path, format!("Number must be greater than or equal to {min}"));
        }
        if let Some(bound) = def.above.filter(|bound| n <= *bound) {
            self.push(path, format!("Number must be greater than {bound}"));
        }
        if let Some(max) = def.max.filter(|max| n > *max) {
            self.push(path, format!("Number must be less than or equal to {max}"));
        }
    }

    fn string(&mut self, def: &PrimitiveDef, s: &str, path: &DocumentPath) {
        let format_ok = match def.kind {
            PrimitiveKind::Uuid => is_uuid(s),
            PrimitiveKind::Email => EMAIL.is_match(s),
            PrimitiveKind::Url => URL.is_match(s),
            PrimitiveKind::DateTime => is_utc_datetime(s),
            _ => true,
        };
        if !format_ok {
            self.push(path, format!("Invalid {}", def.kind.name()));
        }

        let len = s.chars().count();
        if let Some(min) = def.min_length.filter(|min| len < *min) {
            self.push(path, format!("String must contain at least {min} character(s)"));
        }
        if let Some(max) = def.max_length.filter(|max| len > *max) {
            self.push(path, format!("String must contain at most {max} character(s)"));
        }
        if let Some(pattern) = def.pattern.as_ref().filter(|p| !p.is_match(s)) {
            self.push(path, pattern.message());
        }
    }

    fn enumeration(
        &mut self,
        def: &EnumDef,
        value: &Document,
        path: &DocumentPath,
    ) -> Option<Document> {
        match value {
            Document::String(s) if def.contains(s) => Some(value.clone()),
            Document::String(s) => {
                let message = format!(
                    "Invalid enum value. Expected {}, received '{s}'",
                    def.expected()
                );
                self.fail(path, message)
            }
            other => {
                let message = format!("Expected {}, received {}", def.expected(), other.kind());
                self.fail(path, message)
            }
        }
    }

    // ── Containers ───────────────────────────────────────────────────────

    fn object(
        &mut self,
        def: &ObjectDef,
        value: &Document,
        path: &DocumentPath,
    ) -> Option<Document> {
        let Document::Mapping(input) = value else {
            return self.fail(path, format!("Expected object, received {}", value.kind()));
        };

        let before = self.issues.len();
        let mut output = BTreeMap::new();

        for field in &def.fields {
            match (input.get(field.name), &field.presence) {
                (Some(raw), _) => {
                    if let Some(valid) = self.visit(&field.definition, raw, &path.key(field.name)) {
                        output.insert(field.name.to_string(), valid);
                    }
                }
                (None, Presence::Required) => self.push(&path.key(field.name), "Required"),
                (None, Presence::Optional) => {}
                (None, Presence::Defaulted(default)) => {
                    output.insert(field.name.to_string(), default.clone());
                }
            }
        }

        for rule in &def.rules {
            self.rule(rule, input, &output, path);
        }

        (self.issues.len() == before).then_some(Document::Mapping(output))
    }

    /// `validated` holds the fields that passed, so a discriminant that failed
    /// its own check never triggers a conditional rule.
    fn rule(
        &mut self,
        rule: &ObjectRule,
        input: &BTreeMap<String, Document>,
        validated: &BTreeMap<String, Document>,
        path: &DocumentPath,
    ) {
        let discriminant_is = |key: &str, expected: &str| -> Option<bool> {
            validated.get(key).and_then(Document::as_str).map(|v| v == expected)
        };

        match *rule {
            ObjectRule::RequiredWhen {
                field,
                discriminant,
                value,
            } => {
                if discriminant_is(discriminant, value) == Some(true) && !input.contains_key(field) {
                    self.push(
                        &path.key(field),
                        format!("Required when {discriminant} is '{value}'"),
                    );
                }
            }
            ObjectRule::ForbiddenUnless {
                field,
                discriminant,
                value,
            } => {
                if discriminant_is(discriminant, value) == Some(false) && input.contains_key(field) {
                    self.push(
                        &path.key(field),
                        format!("Only allowed when {discriminant} is '{value}'"),
                    );
                }
            }
            ObjectRule::ExactlyOneOf(fields) => {
                let present = fields.iter().filter(|f| input.contains_key(**f)).count();
                let names = fields
                    .iter()
                    .map(|f| format!("'{f}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                match present {
                    1 => {}
                    0 => self.push(path, format!("Exactly one of {names} must be set")),
                    _ => self.push(path, format!("Only one of {names} may be set")),
                }
            }
            ObjectRule::UniqueBy { list, key } => {
                let Some(items) = input.get(list).and_then(Document::as_sequence) else {
                    return;
                };
                let mut seen = HashSet::new();
                for (i, item) in items.iter().enumerate() {
                    let Some(name) = item.get(key).and_then(Document::as_str) else {
                        continue;
                    };
                    if !seen.insert(name) {
                        self.push(
                            &path.key(list).index(i).key(key),
                            format!("Duplicate {key} '{name}'"),
                        );
                    }
                }
            }
        }
    }

    fn list(&mut self, def: &ListDef, value: &Document, path: &DocumentPath) -> Option<Document> {
        let Document::Sequence(items) = value else {
            return self.fail(path, format!("Expected array, received {}", value.kind()));
        };

        let before = self.issues.len();
        if let Some(min) = def.min_items.filter(|min| items.len() < *min) {
            self.push(path, format!("Array must contain at least {min} element(s)"));
        }

        let mut output = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if let Some(valid) = self.visit(&def.item, item, &path.index(i)) {
                output.push(valid);
            }
        }

        (self.issues.len() == before).then_some(Document::Sequence(output))
    }

    fn map(&mut self, def: &MapDef, value: &Document, path: &DocumentPath) -> Option<Document> {
        let Document::Mapping(entries) = value else {
            return self.fail(path, format!("Expected object, received {}", value.kind()));
        };

        let before = self.issues.len();
        let mut output = BTreeMap::new();
        for (key, entry) in entries {
            if let Some(valid) = self.visit(&def.value, entry, &path.key(key.as_str())) {
                output.insert(key.clone(), valid);
            }
        }

        (self.issues.len() == before).then_some(Document::Mapping(output))
    }

    fn union(
        &mut self,
        variants: &[Definition],
        value: &Document,
        path: &DocumentPath,
    ) -> Option<Document> {
        for variant in variants {
            let mut attempt = self.fork();
            match attempt.visit(variant, value, path) {
                Some(valid) if attempt.issues.is_empty() => return Some(valid),
                _ => {}
            }
        }
        self.fail(path, "Invalid input")
    }
}

/// Hyphenated 8-4-4-4-12 form only; `Uuid::try_parse` alone also accepts
/// simple, braced, and URN forms.
fn is_uuid(s: &str) -> bool {
    s.len() == 36 && uuid::Uuid::try_parse(s).is_ok()
}

fn is_utc_datetime(s: &str) -> bool {
    s.ends_with('Z') && DateTime::parse_from_rfc3339(s).is_ok()
}
