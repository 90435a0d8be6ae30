use crate::parse::server::Server;
use crate::tool::Tool;

use super::args::extract_args;
use super::enumerate::OperationRef;
use super::name::tool_name;
use super::request::build_request_template;
use super::response::build_response_template;

/// Turn one declared operation into a tool.
pub fn synthesize_tool(op: &OperationRef<'_>, servers: &[Server]) -> Tool {
    let name = tool_name(op.method, op.path, op.operation);
    log::debug!("{} {} -> {name}", op.method.as_str(), op.path);

    Tool {
        name,
        description: op.operation.summary.clone().unwrap_or_default(),
        args: extract_args(op.operation),
        request_template: build_request_template(op.path, op.method, op.operation, servers),
        response_template: build_response_template(op.operation),
    }
}
