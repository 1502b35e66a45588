//! T-SQL text scanning

mod comments;
mod exec_parser;
pub mod identifier_utils;
mod procedure_parser;

pub use comments::CommentMask;
pub use exec_parser::{extract_exec_references, ExecReferences, ExtractedExecReference};
pub use procedure_parser::{parse_procedure_declaration, ParsedDeclaration};
