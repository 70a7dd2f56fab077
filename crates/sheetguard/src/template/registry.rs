//! Immutable catalog of schema templates, looked up by id.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Result, SheetguardError};

use super::types::{SchemaTemplate, TemplateDefinition};

/// Template catalog shipped with the library.
const BUILTIN_CATALOG: &str = include_str!("../../templates/builtin.json");

/// Catalog of schema templates keyed by template id.
///
/// A registry is built once (from the built-in catalog, a JSON file, or a list
/// of templates) and is never mutated afterwards. Share it between threads
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: IndexMap<String, SchemaTemplate>,
}

impl TemplateRegistry {
    /// Registry holding the built-in templates.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Build a registry from already-constructed templates.
    pub fn from_templates(templates: impl IntoIterator<Item = SchemaTemplate>) -> Result<Self> {
        let mut map = IndexMap::new();
        for template in templates {
            if map.contains_key(&template.id) {
                return Err(SheetguardError::DuplicateTemplate(template.id));
            }
            map.insert(template.id.clone(), template);
        }
        Ok(Self { templates: map })
    }

    /// Parse a JSON catalog: an array of template definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<TemplateDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Load a JSON catalog from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| SheetguardError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let definitions: Vec<TemplateDefinition> =
            serde_json::from_reader(BufReader::new(file))?;
        let registry = Self::from_definitions(definitions)?;

        tracing::debug!(
            path = %path.display(),
            templates = registry.len(),
            "loaded template catalog"
        );

        Ok(registry)
    }

    fn from_definitions(definitions: Vec<TemplateDefinition>) -> Result<Self> {
        let templates = definitions
            .into_iter()
            .map(SchemaTemplate::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::from_templates(templates)
    }

    /// Look up a template by id.
    pub fn lookup(&self, id: &str) -> Option<&SchemaTemplate> {
        self.templates.get(id)
    }

    /// Iterate templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaTemplate> {
        self.templates.values()
    }

    /// Template ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
