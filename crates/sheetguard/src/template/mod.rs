//! Declarative schema templates and the registry that holds them.

mod registry;
mod types;

pub use registry::TemplateRegistry;
pub use types::{
    FieldDefinition, FieldRule, FieldType, IDENTIFIER_SUFFIX, SchemaTemplate, TemplateDefinition,
};
