// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Document model: markdown text → AST → ordered code block list.
//!
//! The flow is `parse(text) → (MdDoc, Vec<CodeBlock>)`: [`parse_markdown_doc`]
//! produces the AST, [`extract_code_blocks`] derives the executable block
//! descriptors from it, and [`Document`] packages the two behind a text snapshot it
//! owns. All ranges everywhere are UTF-8 byte offsets into that snapshot.

// Attach.
pub mod block;
pub mod document;
pub mod extract_code_blocks;
pub mod line_offsets;
pub mod md_doc_types;
pub mod parse_markdown_doc;

// Re-export.
pub use block::*;
pub use document::*;
pub use extract_code_blocks::*;
pub use line_offsets::*;
pub use md_doc_types::*;
pub use parse_markdown_doc::*;
