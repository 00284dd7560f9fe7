use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Text => Ok(render_text(&serde_json::to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// One `key: value` line per field; arrays of objects become indented
/// `k=v` lines.
fn render_text(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut lines = Vec::with_capacity(map.len());
            for (key, value) in map {
                match value {
                    Value::Array(items) if items.iter().all(Value::is_object) => {
                        lines.push(format!("{key}: {}", items.len()));
                        lines.extend(items.iter().map(|item| format!("  {}", inline(item))));
                    }
                    other => lines.push(format!("{key}: {}", scalar(other))),
                }
            }
            lines.join("\n")
        }
        Value::Array(items) => items.iter().map(inline).collect::<Vec<_>>().join("\n"),
        other => scalar(other),
    }
}

fn inline(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{key}={}", scalar(value)))
            .collect::<Vec<_>>()
            .join(" "),
        other => scalar(other),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
