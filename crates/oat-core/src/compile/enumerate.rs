use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::spec::OpenApiDocument;

/// One declared operation together with where it was declared.
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
}

/// Every operation in the document, paths in document order and methods in
/// [`HttpMethod::ALL`] order. Paths without a recognized method yield nothing.
pub fn enumerate_operations(doc: &OpenApiDocument) -> impl Iterator<Item = OperationRef<'_>> {
    doc.paths.iter().flat_map(|(path, item)| {
        item.operations().map(move |(method, operation)| OperationRef {
            path: path.as_str(),
            method,
            operation,
        })
    })
}
