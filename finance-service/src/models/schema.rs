use serde::Serialize;
use serde_json::Value;

/// Field-level description of a record kind, published on `/schema` for
/// document-viewer tooling.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSchema {
    pub title: &'static str,
    pub collection: &'static str,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub required: bool,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
}

impl FieldSchema {
    pub fn required(name: &'static str, field_type: &'static str, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            required: true,
            description,
            default: None,
            allowed: None,
            minimum: None,
        }
    }

    pub fn optional(name: &'static str, field_type: &'static str, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type, description)
        }
    }

    /// A field with a default is never required from the caller.
    pub fn with_default(mut self, default: Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }

    pub fn with_allowed(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}
