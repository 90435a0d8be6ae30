use crate::parse::operation::{HttpMethod, Operation};

/// Resolve a tool name: a non-empty `operationId` verbatim, otherwise a name
/// derived from the method and path.
pub fn tool_name(method: HttpMethod, path: &str, operation: &Operation) -> String {
    match operation.operation_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => route_to_name(method, path),
    }
}

/// Derive a name from HTTP method + path.
///
/// Separators are dropped, each `{`/`}` becomes `_`, and every segment starts
/// upper-case:
/// - `GET /pets/{petId}` → `getPets_petId_`
/// - `GET /users/{id}/orders` → `getUsers_id_Orders`
/// - `GET /` → `get`
pub fn route_to_name(method: HttpMethod, path: &str) -> String {
    let mut name = method.key().to_string();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let segment = segment.replace(['{', '}'], "_");
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}
