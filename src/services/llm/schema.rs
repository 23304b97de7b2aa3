use schemars::{schema_for, JsonSchema};
use serde_json::Value;

/// JSON schema for `T` in the form strict structured outputs accept:
/// every object closed with `additionalProperties: false`, every property
/// listed as required, no `$ref`s, no `default` values and no numeric
/// `format` hints.
pub fn structured_schema<T: JsonSchema>() -> Value {
    let schema = schema_for!(T);
    let mut value = serde_json::to_value(schema).unwrap_or_default();

    let definitions = value.get("definitions").cloned();
    if let Some(definitions) = definitions {
        inline_refs(&mut value, &definitions);
    }
    close_objects(&mut value);

    if let Value::Object(map) = &mut value {
        map.remove("definitions");
        map.remove("$schema");
        map.remove("title");
    }

    value
}

fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&Value::String("object".to_string())) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                if let Some(Value::Object(props)) = map.get("properties") {
                    let keys = props.keys().cloned().map(Value::String).collect();
                    map.insert("required".to_string(), Value::Array(keys));
                }
            }

            map.remove("default");

            let numeric_format = map
                .get("format")
                .and_then(Value::as_str)
                .map(is_numeric_format)
                .unwrap_or(false);
            if numeric_format {
                map.remove("format");
                map.remove("minimum");
            }

            for (_, child) in map.iter_mut() {
                close_objects(child);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                close_objects(item);
            }
        }
        _ => {}
    }
}

fn is_numeric_format(format: &str) -> bool {
    format.starts_with("int") || format.starts_with("uint") || format == "double" || format == "float"
}

fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(path)) = map.get("$ref").cloned() {
                let name = path.trim_start_matches("#/definitions/");
                if let Some(definition) = definitions.get(name) {
                    *value = definition.clone();
                    inline_refs(value, definitions);
                    return;
                }
            }

            if let Some(Value::Array(all_of)) = map.get("allOf").cloned() {
                if let [single] = all_of.as_slice() {
                    *value = single.clone();
                    inline_refs(value, definitions);
                    return;
                }
            }

            for (_, child) in map.iter_mut() {
                inline_refs(child, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}
