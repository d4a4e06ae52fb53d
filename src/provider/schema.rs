//! Attribute schemas for the provider, resources and data sources
//!
//! A schema describes every attribute a configuration may carry. Preparing a
//! configuration against it fills in static defaults, removes duplicate set
//! elements, and reports unknown attributes, wrong types and failed
//! validators as attribute diagnostics.

use serde::Serialize;
use serde_json::{Map, Value};

use super::diagnostics::Diagnostics;

/// Value kind of an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int32,
    Float64Map,
    StringSet,
    StringList,
    SingleNested { attributes: Vec<Attribute> },
    ListNested { attributes: Vec<Attribute> },
    SetNested { attributes: Vec<Attribute> },
}

impl AttributeType {
    fn expectation(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Bool => "bool",
            AttributeType::Int32 => "number",
            AttributeType::Float64Map => "map of number",
            AttributeType::StringSet => "set of string",
            AttributeType::StringList => "list of string",
            AttributeType::SingleNested { .. } => "object",
            AttributeType::ListNested { .. } => "list of object",
            AttributeType::SetNested { .. } => "set of object",
        }
    }
}

/// Value validator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// String must be one of the listed values
    OneOf { values: Vec<&'static str> },
    /// Integer must lie in `min..=max`
    Between { min: i64, max: i64 },
}

impl Validator {
    fn check(&self, path: &str, value: &Value, diags: &mut Diagnostics) {
        match (self, value) {
            (Validator::OneOf { values }, Value::String(s)) => {
                if !values.iter().any(|v| v == s) {
                    let quoted: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
                    diags.add_attribute_error(
                        path,
                        "Invalid Attribute Value Match",
                        format!(
                            "Attribute {} value must be one of: [{}], got: {:?}",
                            path,
                            quoted.join(" "),
                            s
                        ),
                    );
                }
            }
            (Validator::Between { min, max }, Value::Number(n)) => {
                let in_range = n.as_i64().is_some_and(|v| v >= *min && v <= *max);
                if !in_range {
                    diags.add_attribute_error(
                        path,
                        "Invalid Attribute Value",
                        format!(
                            "Attribute {} value must be between {} and {}, got: {}",
                            path, min, max, n
                        ),
                    );
                }
            }
            _ => {}
        }
    }
}

/// Schema attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_replace: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            requires_replace: false,
            default: None,
            validators: Vec::new(),
            description: "",
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String)
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, AttributeType::Bool)
    }

    pub fn int32(name: &'static str) -> Self {
        Self::new(name, AttributeType::Int32)
    }

    pub fn float64_map(name: &'static str) -> Self {
        Self::new(name, AttributeType::Float64Map)
    }

    pub fn string_set(name: &'static str) -> Self {
        Self::new(name, AttributeType::StringSet)
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, AttributeType::StringList)
    }

    pub fn single_nested(name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, AttributeType::SingleNested { attributes })
    }

    pub fn list_nested(name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, AttributeType::ListNested { attributes })
    }

    pub fn set_nested(name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, AttributeType::SetNested { attributes })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    /// Static default; attributes with a default are optional and computed
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.optional = true;
        self.computed = true;
        self
    }

    pub fn one_of(mut self, values: &[&'static str]) -> Self {
        self.validators.push(Validator::OneOf {
            values: values.to_vec(),
        });
        self
    }

    pub fn between(mut self, min: i64, max: i64) -> Self {
        self.validators.push(Validator::Between { min, max });
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// Attribute schema of a provider, resource or data source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(description: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            description,
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Validate a configuration object and fill in its defaults
    pub fn prepare(&self, config: Value) -> Result<Value, Diagnostics> {
        let mut object = match config {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Diagnostics::error(
                    "Invalid configuration",
                    format!("Expected a JSON object, got: {}", other),
                ))
            }
        };

        let mut diags = Diagnostics::new();
        prepare_object(&self.attributes, &mut object, "", &mut diags);
        diags.into_result(Value::Object(object))
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn prepare_object(
    attributes: &[Attribute],
    object: &mut Map<String, Value>,
    prefix: &str,
    diags: &mut Diagnostics,
) {
    for key in object.keys() {
        if !attributes.iter().any(|a| a.name == key) {
            diags.add_attribute_error(
                join(prefix, key),
                "Unsupported argument",
                format!("An argument named {:?} is not expected here.", key),
            );
        }
    }

    for attr in attributes {
        let path = join(prefix, attr.name);
        let unset = matches!(object.get(attr.name), None | Some(Value::Null));

        if unset {
            if let Some(default) = &attr.default {
                object.insert(attr.name.to_string(), default.clone());
            } else if attr.required {
                diags.add_attribute_error(
                    &path,
                    "Missing required argument",
                    format!(
                        "The argument {:?} is required, but no definition was found.",
                        attr.name
                    ),
                );
            }
            continue;
        }

        if let Some(value) = object.get_mut(attr.name) {
            prepare_value(attr, value, &path, diags);
        }
    }
}

fn prepare_value(attr: &Attribute, value: &mut Value, path: &str, diags: &mut Diagnostics) {
    let well_typed = match (&attr.kind, &mut *value) {
        (AttributeType::String, Value::String(_)) => true,
        (AttributeType::Bool, Value::Bool(_)) => true,
        (AttributeType::Int32, Value::Number(n)) => n
            .as_i64()
            .is_some_and(|v| i32::try_from(v).is_ok()),
        (AttributeType::Float64Map, Value::Object(map)) => {
            map.values().all(|v| v.as_f64().is_some_and(f64::is_finite))
        }
        (AttributeType::StringList, Value::Array(items)) => items.iter().all(Value::is_string),
        (AttributeType::StringSet, Value::Array(items)) => {
            if items.iter().all(Value::is_string) {
                dedup(items);
                true
            } else {
                false
            }
        }
        (AttributeType::SingleNested { attributes }, Value::Object(map)) => {
            prepare_object(attributes, map, path, diags);
            true
        }
        (AttributeType::ListNested { attributes }, Value::Array(items))
        | (AttributeType::SetNested { attributes }, Value::Array(items)) => {
            if items.iter().all(Value::is_object) {
                for (i, item) in items.iter_mut().enumerate() {
                    if let Value::Object(map) = item {
                        prepare_object(attributes, map, &format!("{}[{}]", path, i), diags);
                    }
                }
                if matches!(attr.kind, AttributeType::SetNested { .. }) {
                    dedup(items);
                }
                true
            } else {
                false
            }
        }
        _ => false,
    };

    if !well_typed {
        diags.add_attribute_error(
            path,
            "Incorrect attribute value type",
            format!(
                "Inappropriate value for attribute {:?}: {} required.",
                attr.name,
                attr.kind.expectation()
            ),
        );
        return;
    }

    for validator in &attr.validators {
        validator.check(path, value, diags);
    }
}

fn dedup(items: &mut Vec<Value>) {
    let mut seen: Vec<Value> = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
