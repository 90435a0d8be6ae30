use indexmap::IndexMap;

use crate::parse::operation::Operation;
use crate::parse::parameter::Parameter;
use crate::parse::request_body::RequestBody;
use crate::parse::schema::Schema;
use crate::tool::{ArgItems, ArgPosition, ArgProperty, Argument};

/// Build an operation's arguments: parameters first, then the properties of
/// the first request-body content type, the whole list sorted by name.
pub fn extract_args(operation: &Operation) -> Vec<Argument> {
    let mut args: Vec<Argument> = operation.parameters.iter().map(parameter_arg).collect();
    if let Some(ref body) = operation.request_body {
        args.extend(body_args(body));
    }
    sort_args(&mut args);
    args
}

/// Stable sort by name.
pub fn sort_args(args: &mut [Argument]) {
    args.sort_by(|a, b| a.name.cmp(&b.name));
}

fn parameter_arg(param: &Parameter) -> Argument {
    let schema = param.schema.as_ref();

    let items = schema
        .filter(|s| s.is_array())
        .and_then(|s| s.items.as_deref())
        .map(|items| ArgItems {
            item_type: type_string(items),
            ..Default::default()
        });

    let properties = schema
        .filter(|s| s.is_object() && !s.properties.is_empty())
        .map(|s| {
            s.properties
                .iter()
                .map(|(name, prop)| {
                    let shape = ArgProperty {
                        prop_type: type_string(prop),
                        description: prop.description.clone(),
                        ..Default::default()
                    };
                    (name.clone(), shape)
                })
                .collect()
        });

    Argument {
        name: param.name.clone(),
        description: param.description.clone().unwrap_or_default(),
        arg_type: schema
            .and_then(Schema::type_name)
            .unwrap_or_default()
            .to_string(),
        required: param.required,
        position: param.location.into(),
        enum_values: schema.map(|s| s.enum_values.clone()).unwrap_or_default(),
        items,
        properties,
    }
}

/// Only the first content type is consulted, and only an object schema
/// with properties contributes. Nested objects stay one argument each.
fn body_args(body: &RequestBody) -> Vec<Argument> {
    let Some((content_type, media)) = body.first_content() else {
        return Vec::new();
    };
    let Some(schema) = media.schema.as_ref().filter(|s| s.is_object()) else {
        log::debug!("request body {content_type} is not an object schema, no body args");
        return Vec::new();
    };
    schema
        .properties
        .iter()
        .map(|(name, prop)| body_arg(name, prop, schema.requires(name)))
        .collect()
}

fn body_arg(name: &str, prop: &Schema, required: bool) -> Argument {
    let mut arg = Argument {
        name: name.to_string(),
        description: prop.description.clone().unwrap_or_default(),
        arg_type: prop.type_name().unwrap_or_default().to_string(),
        required,
        position: ArgPosition::Body,
        enum_values: prop.enum_values.clone(),
        items: None,
        properties: None,
    };

    if prop.is_array() {
        if let Some(items) = prop.items.as_deref() {
            arg.items = Some(ArgItems {
                item_type: type_string(items),
                description: Some(items.description.clone().unwrap_or_default()),
                // Read from the array itself, where JSON Schema defines it,
                // not from the item schema.
                min_items: prop.min_items.filter(|n| *n > 0),
                properties: (items.is_object() && !items.properties.is_empty())
                    .then(|| items.properties.clone()),
            });
        }
    }

    if prop.is_object() && !prop.properties.is_empty() {
        let shape = prop
            .properties
            .iter()
            .map(|(sub_name, sub)| {
                let sub_shape = ArgProperty {
                    prop_type: type_string(sub),
                    description: Some(sub.description.clone().unwrap_or_default()),
                    default_value: sub.default_value.clone(),
                    enum_values: sub.enum_values.clone(),
                    properties: None,
                };
                (sub_name.clone(), sub_shape)
            })
            .collect();
        arg.properties = Some(shape);
    }

    if let Some(inner) = single_all_of(prop) {
        arg.arg_type = "object".to_string();
        arg.properties = Some(all_of_properties(inner));
    }

    arg
}

/// An untyped schema wrapping exactly one `allOf` member reads as that member.
fn single_all_of(schema: &Schema) -> Option<&Schema> {
    match schema.all_of.as_slice() {
        [inner] if schema.schema_type.is_none() => Some(inner),
        _ => None,
    }
}

fn all_of_properties(schema: &Schema) -> IndexMap<String, ArgProperty> {
    if !schema.is_object() {
        return IndexMap::new();
    }
    schema
        .properties
        .iter()
        .map(|(name, prop)| {
            let shape = match single_all_of(prop) {
                Some(inner) => ArgProperty {
                    prop_type: Some("object".to_string()),
                    description: prop.description.clone(),
                    properties: Some(all_of_properties(inner)),
                    ..Default::default()
                },
                None => ArgProperty {
                    prop_type: type_string(prop),
                    description: prop.description.clone(),
                    ..Default::default()
                },
            };
            (name.clone(), shape)
        })
        .collect()
}

fn type_string(schema: &Schema) -> Option<String> {
    schema.type_name().map(String::from)
}
