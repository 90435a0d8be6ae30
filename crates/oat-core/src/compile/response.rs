use crate::parse::operation::Operation;
use crate::parse::response::Response;
use crate::parse::schema::Schema;
use crate::tool::ResponseTemplate;

/// Nesting levels the schema walk descends before truncating silently.
pub const MAX_SCHEMA_DEPTH: usize = 10;

const PREAMBLE: &str = "# API Response Information\n\n\
Below is the response from an API call. To help you understand the data, I've provided:\n\n\
1. A detailed description of all fields in the response structure\n\
2. The complete API response\n\n\
## Response Structure\n\n";

const CLOSING: &str = "\n## Original Response\n\n";

/// Describe the success response's fields as markdown. Returns an empty
/// template when there is no 2xx response or it declares no content.
pub fn build_response_template(operation: &Operation) -> ResponseTemplate {
    let Some(response) = success_response(operation) else {
        return ResponseTemplate::default();
    };
    if response.content.is_empty() {
        return ResponseTemplate::default();
    }

    let mut doc = String::from(PREAMBLE);
    for (content_type, media) in &response.content {
        let Some(ref schema) = media.schema else {
            continue;
        };
        doc.push_str(&format!("> Content-Type: {content_type}\n\n"));
        describe_payload(&mut doc, schema);
    }
    doc.push_str(CLOSING);

    ResponseTemplate {
        prepend_body: Some(doc),
    }
}

/// The first response, in declaration order, whose status code starts with `2`.
fn success_response(operation: &Operation) -> Option<&Response> {
    operation
        .responses
        .iter()
        .find(|(code, _)| code.starts_with('2'))
        .map(|(_, response)| response)
}

fn describe_payload(doc: &mut String, schema: &Schema) {
    if schema.is_array() {
        if let Some(ref items) = schema.items {
            doc.push_str("- **items**: Array of items (Type: array)\n");
            walk(doc, items, "items", 1);
        }
    } else if schema.is_object() {
        for (name, prop) in sorted_properties(schema) {
            push_field(doc, 0, name, prop);
            walk(doc, prop, name, 1);
        }
    }
}

/// Depth-bounded descent. Each level emits the fields one below `path`,
/// indented by `depth`.
fn walk(doc: &mut String, schema: &Schema, path: &str, depth: usize) {
    if depth > MAX_SCHEMA_DEPTH {
        log::trace!("schema walk truncated at {path}");
        return;
    }

    if schema.is_array() {
        let Some(ref items) = schema.items else {
            return;
        };
        if items.is_object() && !items.properties.is_empty() {
            for (name, prop) in sorted_properties(items) {
                let label = format!("{path}[][{name}]");
                push_field(doc, depth, &label, prop);
                walk(doc, prop, &label, depth + 1);
            }
        } else if let Some(item_type) = items.type_name() {
            doc.push_str(&format!(
                "{}- **{path}[]**: Items of type {item_type}\n",
                indent(depth)
            ));
        }
        return;
    }

    if schema.is_object() {
        for (name, prop) in sorted_properties(schema) {
            let label = format!("{path}.{name}");
            push_field(doc, depth, &label, prop);
            walk(doc, prop, &label, depth + 1);
        }
    }
}

fn push_field(doc: &mut String, depth: usize, label: &str, schema: &Schema) {
    let description = schema.description.as_deref().unwrap_or_default();
    doc.push_str(&format!("{}- **{label}**: {description}", indent(depth)));
    if let Some(type_name) = schema.type_name() {
        doc.push_str(&format!(" (Type: {type_name})"));
    }
    doc.push('\n');
}

fn sorted_properties(schema: &Schema) -> Vec<(&str, &Schema)> {
    let mut props: Vec<(&str, &Schema)> = schema
        .properties
        .iter()
        .map(|(name, prop)| (name.as_str(), prop))
        .collect();
    props.sort_by(|a, b| a.0.cmp(b.0));
    props
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
