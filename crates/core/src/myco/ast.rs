//! Mycomarkup document tree.
//!
//! Trees are immutable once built by [`crate::myco::parse_blocks`] (or by a
//! caller constructing them directly); converters only read them.

/// Block-level Mycomarkup nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `= Heading` … `====== Heading`.
    Heading(Heading),
    /// Lines of inline text.
    Paragraph(Formatted),
    /// Fenced code block.
    CodeBlock(CodeBlock),
    /// `*`, `*.`, `*v`, `*x` list.
    List(List),
    /// `----`.
    ThematicBreak,
    /// `>`-prefixed lines.
    Quote(Vec<Block>),
    /// `table { … }`.
    Table(Table),
    /// `img { … }` single image or gallery.
    Image(Image),
    /// `=>` rocket links.
    LaunchPad(LaunchPad),
    /// `<=` embed of another document.
    Transclusion(Transclusion),
    /// A block kind this crate does not know how to convert.
    Unknown(UnknownBlock),
}

/// Inline content: one or more lines of spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formatted {
    /// Lines in source order.
    pub lines: Vec<Vec<Span>>,
}

impl Formatted {
    /// Formatted content made of a single line.
    pub fn single(line: Vec<Span>) -> Self {
        Self { lines: vec![line] }
    }
}

/// Heading with level 1-6.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub contents: Formatted,
}

/// Fenced code block.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Language tag, if any.
    pub language: Option<String>,
    /// Raw body, one `\n` after every line.
    pub contents: String,
}

impl CodeBlock {
    /// Language written by Mycomarkup when none is given.
    pub const UNSPECIFIED_LANGUAGE: &'static str = "plain";

    /// Language tag unless it is absent or the unspecified sentinel.
    pub fn explicit_language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .filter(|lang| !lang.is_empty() && *lang != Self::UNSPECIFIED_LANGUAGE)
    }
}

/// List marker, shared by every item of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `*`
    Unordered,
    /// `*.`
    Ordered,
    /// `*x` (open task)
    Todo,
    /// `*v` (finished task)
    TodoDone,
}

/// A list of items sharing one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// Marker of every item.
    pub marker: ListMarker,
    /// Items in order.
    pub items: Vec<ListItem>,
}

/// One list item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    /// Item text followed by nested lists.
    pub contents: Vec<Block>,
}

/// `table { … }` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Optional caption written after `table`.
    pub caption: Option<String>,
    /// Rows in order.
    pub rows: Vec<Row>,
}

/// Table row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// Cells in order.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Returns true if every cell of a non-empty row is a header cell.
    pub fn looks_like_thead(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|cell| cell.is_header)
    }
}

/// Table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Cell contents.
    pub contents: Vec<Block>,
    /// Number of columns spanned (at least 1).
    pub colspan: usize,
    /// `!` header cell.
    pub is_header: bool,
}

/// `img { … }` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    /// Gallery layout word after `img`, if any.
    pub layout: Option<String>,
    /// Image entries in order.
    pub entries: Vec<ImageEntry>,
}

impl Image {
    /// Returns true if the block shows exactly one image.
    pub fn has_one_image(&self) -> bool {
        self.entries.len() == 1
    }
}

/// One image of an `img` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageEntry {
    /// Image target: a document name or URL.
    pub target: String,
    /// Width as written.
    pub width: Option<String>,
    /// Height as written.
    pub height: Option<String>,
    /// Description blocks.
    pub description: Vec<Block>,
}

/// Launchpad of rocket links.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaunchPad {
    /// Rockets in order.
    pub rockets: Vec<Rocket>,
}

/// `=> address | text`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rocket {
    /// Link target.
    pub link: Link,
    /// Rocket with no address.
    pub is_empty: bool,
}

/// `<= target` embed.
///
/// Only the target is kept; the exact source line is not.
#[derive(Debug, Clone, PartialEq)]
pub struct Transclusion {
    /// Embedded document.
    pub target: String,
}

/// Block of a kind unknown to this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownBlock {
    /// Name of the kind.
    pub kind: String,
}

/// Inline spans of one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    /// Plain text.
    Text(String),
    /// Flips one style on or off.
    Toggle(StyleKind),
    /// `[[address | text]]` or an autolink.
    Link(Link),
}

/// A link with its display text.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Address as written.
    pub address: String,
    /// Text given after `|`.
    pub text: Option<String>,
}

impl Link {
    /// Text shown for the link: the explicit text, or the address.
    pub fn displayed_text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.address)
    }
}

/// Inline style kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// `**`
    Bold,
    /// `//`
    Italic,
    /// `~~`
    Strike,
    /// `` ` ``
    Mono,
    /// `^^`
    Super,
    /// `,,`
    Sub,
    /// `__`
    Underline,
    /// `++`
    Mark,
}

impl StyleKind {
    /// Number of style kinds.
    pub const COUNT: usize = 8;

    /// Canonical nesting order, outermost first.
    pub const CANONICAL_ORDER: [StyleKind; StyleKind::COUNT] = [
        StyleKind::Super,
        StyleKind::Sub,
        StyleKind::Underline,
        StyleKind::Mark,
        StyleKind::Bold,
        StyleKind::Italic,
        StyleKind::Strike,
        StyleKind::Mono,
    ];

    /// Mycomarkup delimiter.
    pub fn delimiter(self) -> &'static str {
        match self {
            StyleKind::Bold => "**",
            StyleKind::Italic => "//",
            StyleKind::Strike => "~~",
            StyleKind::Mono => "`",
            StyleKind::Super => "^^",
            StyleKind::Sub => ",,",
            StyleKind::Underline => "__",
            StyleKind::Mark => "++",
        }
    }

    fn index(self) -> usize {
        match self {
            StyleKind::Bold => 0,
            StyleKind::Italic => 1,
            StyleKind::Strike => 2,
            StyleKind::Mono => 3,
            StyleKind::Super => 4,
            StyleKind::Sub => 5,
            StyleKind::Underline => 6,
            StyleKind::Mark => 7,
        }
    }
}

/// Active styles while walking one line of spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleState {
    active: [bool; StyleKind::COUNT],
}

impl StyleState {
    /// All styles off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one style.
    pub fn toggle(&mut self, kind: StyleKind) {
        let slot = &mut self.active[kind.index()];
        *slot = !*slot;
    }

    /// Returns true if `kind` is on.
    pub fn is_active(&self, kind: StyleKind) -> bool {
        self.active[kind.index()]
    }

    /// Active styles in canonical nesting order, outermost first.
    pub fn active_in_order(&self) -> impl DoubleEndedIterator<Item = StyleKind> + '_ {
        StyleKind::CANONICAL_ORDER
            .into_iter()
            .filter(|kind| self.is_active(*kind))
    }
}
