//! The OpenAPI-to-tool pipeline.
//!
//! `enumerate` yields one triple per declared operation, `synthesize` turns
//! each into a [`Tool`](crate::tool::Tool) (with `request` and `response`
//! building its templates), and `assemble` sorts the result into a
//! [`ToolSet`]. Every stage is a pure function of the document.

pub mod args;
pub mod assemble;
pub mod enumerate;
pub mod name;
pub mod request;
pub mod response;
pub mod synthesize;

use crate::config::DEFAULT_SERVER_NAME;
use crate::parse::spec::OpenApiDocument;
use crate::tool::ToolSet;

use assemble::{assemble, server_info};
use enumerate::enumerate_operations;
use synthesize::synthesize_tool;

/// Options for the server block of the output.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub server_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
        }
    }
}

/// Compile a dereferenced document into a sorted tool set.
pub fn compile(doc: &OpenApiDocument) -> ToolSet {
    compile_with_options(doc, &CompileOptions::default())
}

/// Compile with an explicit server name.
pub fn compile_with_options(doc: &OpenApiDocument, options: &CompileOptions) -> ToolSet {
    let tools = enumerate_operations(doc)
        .map(|op| synthesize_tool(&op, &doc.servers))
        .collect();
    let set = assemble(tools, server_info(doc, &options.server_name));
    log::debug!(
        "compiled {} tools from {} paths",
        set.tools.len(),
        doc.paths.len()
    );
    set
}
