use oat_core::compile::response::MAX_SCHEMA_DEPTH;
use oat_core::tool::{ArgPosition, Header, SecurityRef, ToolSet};
use oat_core::{CompileOptions, compile, compile_str, parse};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const TREE: &str = include_str!("fixtures/tree.json");

fn petstore() -> ToolSet {
    compile(&parse::from_yaml(PETSTORE).unwrap())
}

fn arg_names(set: &ToolSet, tool: &str) -> Vec<String> {
    set.tool(tool)
        .unwrap()
        .args
        .iter()
        .map(|a| a.name.clone())
        .collect()
}

#[test]
fn compile_petstore_tool_names() {
    let set = petstore();
    let names: Vec<&str> = set.names().collect();
    assert_eq!(
        names,
        [
            "createPet",
            "deletePet",
            "getPets_petId_",
            "getUsers_id_Orders",
            "listPets",
        ]
    );
}

#[test]
fn compile_petstore_list_pets() {
    let set = petstore();
    let tool = set.tool("listPets").unwrap();
    assert_eq!(tool.description, "List all pets");
    assert_eq!(arg_names(&set, "listPets"), ["limit", "status"]);

    let limit = tool.arg("limit").unwrap();
    assert_eq!(limit.arg_type, "integer");
    assert_eq!(
        limit.description,
        "How many items to return at one time (max 100)"
    );
    assert_eq!(limit.position, ArgPosition::Query);

    let status = tool.arg("status").unwrap();
    assert_eq!(status.arg_type, "string");
    assert_eq!(status.enum_values.len(), 3);

    let request = &tool.request_template;
    assert_eq!(request.url, "https://petstore.example.com/v1/pets");
    assert_eq!(request.method, "GET");
    assert!(request.headers.is_empty());
    assert!(request.security.is_none());
}

#[test]
fn compile_petstore_list_pets_response() {
    let set = petstore();
    let body = set
        .tool("listPets")
        .unwrap()
        .response_template
        .prepend_body
        .clone()
        .unwrap();
    let expected = "\
> Content-Type: application/json\n\n\
- **items**:  (Type: array)\n  \
- **items[][category]**:  (Type: object)\n    \
- **items[][category].id**:  (Type: integer)\n    \
- **items[][category].name**: Category name (Type: string)\n  \
- **items[][id]**: Unique id (Type: integer)\n  \
- **items[][name]**: Pet name (Type: string)\n  \
- **items[][status]**:  (Type: string)\n  \
- **items[][tags]**:  (Type: array)\n    \
- **items[][tags][]**: Items of type string\n\
- **next**: Cursor for the next page (Type: string)\n\
\n## Original Response\n\n";
    assert!(body.starts_with("# API Response Information\n\n"));
    assert!(body.ends_with(expected), "unexpected body:\n{body}");
}

#[test]
fn compile_petstore_create_pet() {
    let set = petstore();
    let tool = set.tool("createPet").unwrap();
    assert_eq!(
        arg_names(&set, "createPet"),
        ["category", "name", "photoUrls", "tag"]
    );
    for arg in &tool.args {
        assert_eq!(arg.position, ArgPosition::Body);
    }
    assert!(tool.arg("name").unwrap().required);
    assert!(!tool.arg("tag").unwrap().required);

    let category = tool.arg("category").unwrap();
    assert_eq!(category.arg_type, "object");
    let props = category.properties.as_ref().unwrap();
    assert_eq!(props["name"].description.as_deref(), Some("Category name"));

    let photos = tool.arg("photoUrls").unwrap();
    assert_eq!(photos.items.as_ref().unwrap().min_items, Some(1));

    let request = &tool.request_template;
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.headers,
        vec![Header {
            key: "Content-Type".to_string(),
            value: "application/json".to_string(),
        }]
    );
    assert_eq!(
        request.security,
        Some(SecurityRef {
            id: "petstore_auth".to_string()
        })
    );
    assert!(!tool.response_template.is_empty());
}

#[test]
fn compile_petstore_synthesized_names() {
    let set = petstore();

    let get_pet = set.tool("getPets_petId_").unwrap();
    assert_eq!(get_pet.description, "Info for a specific pet");
    // Byte-wise order puts upper-case names first.
    assert_eq!(arg_names(&set, "getPets_petId_"), ["X-Request-Id", "petId"]);
    assert_eq!(get_pet.arg("X-Request-Id").unwrap().position, ArgPosition::Header);
    assert_eq!(
        get_pet.request_template.url,
        "https://petstore.example.com/v1/pets/{petId}"
    );

    let orders = set.tool("getUsers_id_Orders").unwrap();
    assert_eq!(orders.description, "");
    assert!(orders.response_template.is_empty());
}

#[test]
fn compile_petstore_empty_templates() {
    let set = petstore();
    let delete = set.tool("deletePet").unwrap();
    assert!(delete.response_template.is_empty());
    assert_eq!(delete.request_template.method, "DELETE");
    assert_eq!(
        delete.request_template.security.as_ref().map(|s| s.id.as_str()),
        Some("api_key")
    );
}

#[test]
fn compile_petstore_server_block() {
    let set = compile_str(
        PETSTORE,
        &CompileOptions {
            server_name: "petstore".to_string(),
        },
    )
    .unwrap();
    assert_eq!(set.server.name, "petstore");
    let ids: Vec<&str> = set
        .server
        .security_schemes
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, ["api_key", "petstore_auth"]);
}

#[test]
fn compile_is_deterministic() {
    let first = serde_json::to_string(&petstore()).unwrap();
    let second = serde_json::to_string(&petstore()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn compile_output_is_sorted() {
    let set = petstore();
    for pair in set.tools.windows(2) {
        assert!(pair[0].name <= pair[1].name);
    }
    for tool in &set.tools {
        for pair in tool.args.windows(2) {
            assert!(pair[0].name <= pair[1].name, "{} args unsorted", tool.name);
        }
    }
}

#[test]
fn compile_json_wire_format() {
    let value = serde_json::to_value(petstore()).unwrap();
    let tools = value["tools"].as_array().unwrap();
    let delete = tools.iter().find(|t| t["name"] == "deletePet").unwrap();
    assert_eq!(delete["responseTemplate"], serde_json::json!({}));
    assert!(delete["requestTemplate"]["security"]["id"] == "api_key");

    let list = tools.iter().find(|t| t["name"] == "listPets").unwrap();
    assert!(list["requestTemplate"].get("security").is_none());
    assert!(list["responseTemplate"]["prependBody"].is_string());
    assert_eq!(value["server"]["securitySchemes"][0]["in"], "header");
}

#[test]
fn compile_cyclic_schema() {
    let set = compile_str(TREE, &CompileOptions::default()).unwrap();
    assert_eq!(set.server.name, "openapi-server");
    let tool = set.tool("getNode").unwrap();
    assert_eq!(tool.request_template.url, "http://localhost:8080/nodes/{nodeId}");

    let body = tool.response_template.prepend_body.as_deref().unwrap();
    assert!(body.contains(
        "- **parent**:  (Type: object)\n  \
- **parent.children**:  (Type: array)\n"
    ));
    assert!(body.contains("  - **children[][label]**: Display label (Type: string)\n"));

    // The self reference unrolls as deep as the walk reads.
    let deepest_parent = vec!["parent"; MAX_SCHEMA_DEPTH].join(".");
    assert!(body.contains(&format!(
        "- **{deepest_parent}.label**: Display label (Type: string)\n"
    )));
    assert!(body.contains(&format!("- **{deepest_parent}.parent**:  (Type: object)\n")));
    assert!(!body.contains(&format!("{deepest_parent}.parent.")));
}

#[test]
fn compile_ref_fan_out_is_bounded() {
    let mut yaml = String::from(
        "openapi: 3.0.0\npaths:\n  /s:\n    get:\n      responses:\n        '200':\n          content:\n            application/json:\n              schema:\n                $ref: '#/components/schemas/S0'\ncomponents:\n  schemas:\n",
    );
    for i in 0..22 {
        let next = format!("'#/components/schemas/S{}'", i + 1);
        yaml.push_str(&format!(
            "    S{i}:\n      type: object\n      properties:\n        a:\n          $ref: {next}\n        b:\n          $ref: {next}\n"
        ));
    }
    yaml.push_str("    S22:\n      type: string\n");

    let set = compile_str(&yaml, &CompileOptions::default()).unwrap();
    let body = set.tools[0].response_template.prepend_body.clone().unwrap();
    let fields: Vec<&str> = body.lines().filter(|line| line.contains("- **")).collect();

    // Two fields per object at every level the walk reads, all resolved.
    assert_eq!(fields.len(), (1 << (MAX_SCHEMA_DEPTH + 2)) - 2);
    assert!(fields.iter().all(|line| line.ends_with("(Type: object)")));
}

#[test]
fn compile_deep_nesting_terminates() {
    let mut yaml = String::from(
        "openapi: 3.0.0\npaths:\n  /deep:\n    get:\n      responses:\n        '200':\n          content:\n            application/json:\n              schema:\n",
    );
    let mut indent = "                ".to_string();
    for level in 1..=20 {
        yaml.push_str(&format!("{indent}type: object\n{indent}properties:\n"));
        indent.push_str("  ");
        yaml.push_str(&format!("{indent}f{level}:\n"));
        indent.push_str("  ");
    }
    yaml.push_str(&format!("{indent}type: string\n"));

    let set = compile_str(&yaml, &CompileOptions::default()).unwrap();
    let body = set.tools[0].response_template.prepend_body.clone().unwrap();
    let deepest = body
        .lines()
        .filter_map(|line| line.split("**").nth(1))
        .map(|label| label.matches('.').count())
        .max()
        .unwrap();
    assert_eq!(deepest, MAX_SCHEMA_DEPTH);
}

#[test]
fn compile_document_without_paths() {
    let set = compile_str("openapi: 3.0.0\ninfo: {title: Empty, version: '1'}\n", &CompileOptions::default())
        .unwrap();
    assert!(set.tools.is_empty());
}
