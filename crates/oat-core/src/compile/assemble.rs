use crate::parse::spec::OpenApiDocument;
use crate::tool::{SecuritySchemeInfo, ServerInfo, Tool, ToolSet};

/// Sort the synthesized tools by name and pair them with the server block.
/// Names are not deduplicated; collisions are only logged.
pub fn assemble(mut tools: Vec<Tool>, server: ServerInfo) -> ToolSet {
    sort_tools(&mut tools);
    for pair in tools.windows(2) {
        if pair[0].name == pair[1].name {
            log::warn!("duplicate tool name {}", pair[0].name);
        }
    }
    ToolSet { server, tools }
}

/// Stable sort by byte-wise name order. Sorting an already sorted slice
/// leaves it unchanged.
pub fn sort_tools(tools: &mut [Tool]) {
    tools.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Server block listing every declared security scheme, sorted by id.
pub fn server_info(doc: &OpenApiDocument, name: &str) -> ServerInfo {
    let mut security_schemes: Vec<SecuritySchemeInfo> = doc
        .components
        .iter()
        .flat_map(|c| &c.security_schemes)
        .map(|(id, scheme)| SecuritySchemeInfo {
            id: id.clone(),
            scheme_type: scheme.scheme_type.clone(),
            scheme: scheme.scheme.clone(),
            location: scheme.location.clone(),
            name: scheme.name.clone(),
        })
        .collect();
    security_schemes.sort_by(|a, b| a.id.cmp(&b.id));

    ServerInfo {
        name: name.to_string(),
        security_schemes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{RequestTemplate, ResponseTemplate};

    fn tool(name: &str, url: &str) -> Tool {
        Tool {
            name: name.to_string(),
            description: String::new(),
            args: vec![],
            request_template: RequestTemplate {
                url: url.to_string(),
                method: "GET".to_string(),
                headers: vec![],
                security: None,
            },
            response_template: ResponseTemplate::default(),
        }
    }

    #[test]
    fn test_sorted_byte_wise() {
        let set = assemble(
            vec![tool("listPets", "/a"), tool("Zeta", "/b"), tool("addPet", "/c")],
            ServerInfo::default(),
        );
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, ["Zeta", "addPet", "listPets"]);
    }

    #[test]
    fn test_duplicates_kept_in_input_order() {
        let set = assemble(
            vec![tool("dup", "/first"), tool("a", "/a"), tool("dup", "/second")],
            ServerInfo::default(),
        );
        assert_eq!(set.tools.len(), 3);
        assert_eq!(set.tools[1].request_template.url, "/first");
        assert_eq!(set.tools[2].request_template.url, "/second");
    }

    #[test]
    fn test_resort_is_noop() {
        let set = assemble(
            vec![tool("b", "/b"), tool("a", "/a"), tool("b", "/b2")],
            ServerInfo::default(),
        );
        let mut again = set.tools.clone();
        sort_tools(&mut again);
        assert_eq!(again, set.tools);
    }

    #[test]
    fn test_server_info_sorts_schemes() {
        let doc = crate::parse::from_yaml(
            r#"
openapi: 3.0.0
components:
  securitySchemes:
    petstore_auth:
      type: oauth2
    api_key:
      type: apiKey
      name: X-API-Key
      in: header
    basic:
      type: http
      scheme: basic
"#,
        )
        .unwrap();
        let server = server_info(&doc, "petstore");
        assert_eq!(server.name, "petstore");
        let ids: Vec<&str> = server.security_schemes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["api_key", "basic", "petstore_auth"]);
        assert_eq!(server.security_schemes[0].location.as_deref(), Some("header"));
        assert_eq!(server.security_schemes[0].name.as_deref(), Some("X-API-Key"));
        assert_eq!(server.security_schemes[1].scheme.as_deref(), Some("basic"));
    }

    #[test]
    fn test_server_info_without_components() {
        let server = server_info(&OpenApiDocument::default(), "x");
        assert!(server.security_schemes.is_empty());
    }
}
