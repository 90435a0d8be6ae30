use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::server::Server;
use crate::tool::{Header, RequestTemplate, SecurityRef};

/// Build the HTTP call shape for an operation.
pub fn build_request_template(
    path: &str,
    method: HttpMethod,
    operation: &Operation,
    servers: &[Server],
) -> RequestTemplate {
    let base = servers.first().map(|s| s.url.as_str()).unwrap_or_default();

    let headers = operation
        .request_body
        .as_ref()
        .and_then(|body| body.first_content())
        .map(|(content_type, _)| Header {
            key: "Content-Type".to_string(),
            value: content_type.clone(),
        })
        .into_iter()
        .collect();

    RequestTemplate {
        url: join_url(base, path),
        method: method.as_str().to_string(),
        headers,
        security: first_security_scheme(operation),
    }
}

/// First scheme name of the first security requirement. Any further
/// requirements or schemes are not represented.
fn first_security_scheme(operation: &Operation) -> Option<SecurityRef> {
    let requirement = operation.security.as_ref()?.first()?;
    let (scheme, _scopes) = requirement.first()?;
    Some(SecurityRef { id: scheme.clone() })
}

/// Append `path` verbatim to the server base, collapsing doubled separators in
/// the base (the `scheme://` separator excepted).
pub fn join_url(base: &str, path: &str) -> String {
    let mut url = collapse_separators(base.trim());
    if path.starts_with('/') && url.ends_with('/') {
        url.pop();
    }
    url.push_str(path);
    url
}

fn collapse_separators(base: &str) -> String {
    let (scheme, rest) = match base.find("://") {
        Some(i) => base.split_at(i + 3),
        None => ("", base),
    };
    let mut out = String::with_capacity(base.len());
    out.push_str(scheme);
    let mut prev_slash = false;
    for ch in rest.chars() {
        if ch == '/' && prev_slash {
            continue;
        }
        prev_slash = ch == '/';
        out.push(ch);
    }
    out
}
