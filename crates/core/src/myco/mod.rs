//! Mycomarkup: tree model and parser.

/// Block and inline node types.
pub mod ast;
/// Block-level parser.
pub mod block;
/// Inline span parser.
pub mod inline;

pub use ast::{
    Block, Cell, CodeBlock, Formatted, Heading, Image, ImageEntry, LaunchPad, Link, List,
    ListItem, ListMarker, Rocket, Row, Span, StyleKind, StyleState, Table, Transclusion,
    UnknownBlock,
};
pub use block::parse_blocks;
pub use inline::parse_line;
