//! Schema registry: composable structural definitions for every Blueprint
//! section and platform contract.

mod blueprint;
mod connector;
pub mod definition;
pub mod registry;
mod tenant;
mod user;

pub use definition::{
    Definition, EnumDef, FieldDef, ListDef, MapDef, ObjectDef, ObjectRule, Pattern, Presence,
    PrimitiveDef, PrimitiveKind,
};
pub use registry::{Entity, EntityFamily, SchemaRegistry};
