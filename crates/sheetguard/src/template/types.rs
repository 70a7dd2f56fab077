//! Schema template and field rule types.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetguardError};

/// Suffix marking a field whose values must be unique within a file.
pub const IDENTIFIER_SUFFIX: &str = "_ID";

/// Data type a field's values must conform to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text, checked only by pattern (if any).
    #[default]
    String,
    /// Whole numbers, optionally bounded by `min`/`max`.
    Integer,
}

impl FieldType {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }
}

/// Validation contract for one canonical field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRule {
    /// Canonical field name (e.g., "Sample_ID").
    pub name: String,
    /// Expected data type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be mapped and non-empty.
    pub required: bool,
    /// Inclusive lower bound for integer fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Inclusive upper bound for integer fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    /// Description of the field.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip)]
    matcher: Option<Regex>,
}

impl FieldRule {
    /// Create an optional field rule with no range or pattern.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            min: None,
            max: None,
            pattern: None,
            description: String::new(),
            example: None,
            matcher: None,
        }
    }

    /// Set whether the field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the inclusive minimum.
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive maximum.
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the example value.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Attach a pattern, compiling it for start-anchored matching.
    ///
    /// The pattern must match beginning at the first character of the value
    /// but need not consume the whole value unless it anchors the end itself.
    pub fn with_pattern(
        mut self,
        pattern: impl Into<String>,
    ) -> std::result::Result<Self, regex::Error> {
        let pattern = pattern.into();
        let matcher = Regex::new(&format!(r"\A(?:{pattern})"))?;
        self.pattern = Some(pattern);
        self.matcher = Some(matcher);
        Ok(self)
    }

    /// Whether duplicate values of this field are reported.
    pub fn is_identifier(&self) -> bool {
        self.name.ends_with(IDENTIFIER_SUFFIX)
    }

    /// Check a trimmed value against the pattern. Fields without a pattern match everything.
    pub fn matches_pattern(&self, value: &str) -> bool {
        self.matcher.as_ref().is_none_or(|re| re.is_match(value))
    }

    /// Whether the rule carries a pattern.
    pub fn has_pattern(&self) -> bool {
        self.matcher.is_some()
    }

    /// Regular expression the trimmed value must match from its start.
    ///
    /// Set only through [`FieldRule::with_pattern`], so it always agrees with
    /// the compiled matcher.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}

/// A named set of field rules for one sample-sheet format.
///
/// Templates are immutable once built; fields keep their declaration order,
/// which is also the order issues are reported in.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaTemplate {
    /// Template identifier (e.g., "illumina-ngs-run-v1.2").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Format version.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Sequencing platform or vendor.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub platform: String,
    /// Description of the format.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    fields: Vec<FieldRule>,
}

impl SchemaTemplate {
    /// Build a template, checking that every rule is consistent.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<FieldRule>,
    ) -> Result<Self> {
        let id = id.into();
        for field in &fields {
            check_rule(&id, field)?;
        }
        Ok(Self {
            id,
            name: name.into(),
            version: String::new(),
            platform: String::new(),
            description: String::new(),
            fields,
        })
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the platform.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Field rules in declaration order.
    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Get a field rule by canonical name.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Rules for the required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields.iter().filter(|f| f.required)
    }
}

fn check_rule(template: &str, rule: &FieldRule) -> Result<()> {
    let invalid = |message: String| SheetguardError::InvalidTemplate {
        template: template.to_string(),
        message,
    };

    if rule.name.trim().is_empty() {
        return Err(invalid("field with an empty name".to_string()));
    }
    if rule.field_type != FieldType::Integer && (rule.min.is_some() || rule.max.is_some()) {
        return Err(invalid(format!(
            "field '{}' sets a range but is of type {}",
            rule.name,
            rule.field_type.label()
        )));
    }
    if let (Some(min), Some(max)) = (rule.min, rule.max) {
        if min > max {
            return Err(invalid(format!(
                "field '{}' has minimum {} greater than maximum {}",
                rule.name, min, max
            )));
        }
    }
    Ok(())
}

/// Serialized form of a field rule, as written in a template catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Serialized form of a schema template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

impl TryFrom<TemplateDefinition> for SchemaTemplate {
    type Error = SheetguardError;

    fn try_from(def: TemplateDefinition) -> Result<Self> {
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in def.fields {
            let mut rule = FieldRule::new(field.name, field.field_type)
                .required(field.required)
                .with_description(field.description);
            rule.min = field.min;
            rule.max = field.max;
            rule.example = field.example;
            if let Some(pattern) = field.pattern {
                let name = rule.name.clone();
                rule = rule
                    .with_pattern(pattern)
                    .map_err(|source| SheetguardError::InvalidPattern {
                        template: def.id.clone(),
                        field: name,
                        source,
                    })?;
            }
            fields.push(rule);
        }

        Ok(SchemaTemplate::new(def.id, def.name, fields)?
            .with_version(def.version)
            .with_platform(def.platform)
            .with_description(def.description))
    }
}
