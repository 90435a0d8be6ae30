pub mod compile;
pub mod config;
pub mod error;
pub mod parse;
pub mod tool;

pub use compile::{CompileOptions, compile, compile_with_options};

use error::ParseError;
use tool::ToolSet;

/// Parse, dereference and compile a YAML or JSON document in one step.
/// Input starting with `{` is read as JSON, anything else as YAML.
pub fn compile_str(input: &str, options: &CompileOptions) -> Result<ToolSet, ParseError> {
    let doc = if input.trim_start().starts_with('{') {
        parse::from_json(input)?
    } else {
        parse::from_yaml(input)?
    };
    Ok(compile_with_options(&doc, options))
}
