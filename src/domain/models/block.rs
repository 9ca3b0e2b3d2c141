/// An inline fragment of a prose line. Unmatched emphasis markers never reach
/// here; they stay literal inside `Plain`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
}

/// One display block produced by the renderer. A message renders to a flat
/// ordered sequence of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Header {
        level: u8,
        text: String,
    },
    Code {
        language: String,
        code: String,
        /// ANSI-escaped highlighted text when the language tag resolved to a
        /// grammar, otherwise identical to `code`.
        markup: String,
    },
    Text(Vec<Inline>),
    Break,
}
