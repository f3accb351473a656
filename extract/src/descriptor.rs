//! Conversion of parsed argument literals into [`ArgumentDescriptor`]s.

use slashdoc_core::{ArgumentDescriptor, EnumEntry};

use crate::literal::Value;

/// Placeholder shown instead of template-string default values, which are
/// computed at runtime and usually too long to document.
pub const TEMPLATE_DEFAULT_PLACEHOLDER: &str = "...";

/// Builds a descriptor from an argument object literal.
///
/// Unknown keys (callbacks, `forceEnum`, ...) are ignored. Known keys with a
/// value of the wrong shape are reported as an error message.
pub(crate) fn descriptor_from_value(value: &Value) -> Result<ArgumentDescriptor, String> {
    let Value::Object(fields) = value else {
        return Err("argument literal is not an object".to_string());
    };

    let mut arg = ArgumentDescriptor::default();
    for (key, field) in fields {
        match key.as_str() {
            "name" => arg.name = Some(text_field(key, field)?),
            "description" => arg.description = Some(text_field(key, field)?),
            "typeList" => arg.type_list = Some(type_list(field)?),
            "isRequired" => arg.is_required = bool_field(key, field)?,
            "acceptsMultiple" => arg.accepts_multiple = bool_field(key, field)?,
            "defaultValue" => arg.default_value = default_value(field)?,
            "enumList" => arg.enum_list = enum_list(field)?,
            _ => {}
        }
    }
    Ok(arg)
}

fn text_field(key: &str, value: &Value) -> Result<String, String> {
    value
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| format!("'{key}' must be a string, found {}", describe(value)))
}

fn bool_field(key: &str, value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Ok(false),
        other => Err(format!("'{key}' must be a boolean, found {}", describe(other))),
    }
}

fn type_list(value: &Value) -> Result<Vec<String>, String> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        single @ (Value::Path(_) | Value::String(_)) => std::slice::from_ref(single),
        other => {
            return Err(format!(
                "'typeList' must be an array, found {}",
                describe(other)
            ));
        }
    };
    items
        .iter()
        .map(|item| match item {
            Value::Path(path) => Ok(path.clone()),
            Value::String(s) => Ok(s.clone()),
            other => Err(format!(
                "'typeList' entries must be type tags, found {}",
                describe(other)
            )),
        })
        .collect()
}

fn default_value(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Template { .. } => Ok(Some(TEMPLATE_DEFAULT_PLACEHOLDER.to_string())),
        Value::Number(n) => Ok(Some(n.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Path(p) => Ok(Some(p.clone())),
        Value::Null => Ok(None),
        other => Err(format!(
            "'defaultValue' must be a scalar, found {}",
            describe(other)
        )),
    }
}

fn enum_list(value: &Value) -> Result<Vec<EnumEntry>, String> {
    let Value::Array(items) = value else {
        return Err(format!(
            "'enumList' must be an array, found {}",
            describe(value)
        ));
    };
    items.iter().map(enum_entry).collect()
}

/// Accepts `'value'`, `['value', 'description']` and
/// `new SlashCommandEnumValue('value', 'description', ...)`.
fn enum_entry(value: &Value) -> Result<EnumEntry, String> {
    let parts: &[Value] = match value {
        Value::String(s) => return Ok(EnumEntry::new(s.clone())),
        Value::Array(parts) => parts,
        Value::Call { args, .. } => args,
        other => {
            return Err(format!(
                "'enumList' entries must be strings or enum values, found {}",
                describe(other)
            ));
        }
    };
    let Some(primary) = parts.first().and_then(Value::as_text) else {
        return Err("enum value must start with a string".to_string());
    };
    let mut entry = EnumEntry::new(primary);
    if let Some(description) = parts.get(1).and_then(Value::as_text) {
        entry = entry.with_description(description);
    }
    Ok(entry)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "an object",
        Value::Array(_) => "an array",
        Value::String(_) => "a string",
        Value::Template { .. } => "a template string",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Null => "null",
        Value::Path(_) => "an identifier",
        Value::Call { .. } => "a call expression",
        Value::Callback => "a function",
    }
}
