//! Classifier states.

use std::fmt;

/// State of the classifier between two bytes.
///
/// `StartSlash` holds a pending `/` and `SlashStarStar` a pending `*`; both
/// are released once the next byte decides what they were.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum State {
    /// Ordinary code.
    #[default]
    Start,
    /// Inside `"..."`.
    StartDquote,
    /// After `\` inside `"..."`.
    DquoteEscape,
    /// After a `/` in code.
    StartSlash,
    /// Inside `/* ... */`.
    SlashStar,
    /// After a `*` inside `/* ... */`.
    SlashStarStar,
    /// Inside `'...'`.
    StartSquote,
    /// After `\` inside `'...'`.
    SquoteEscape,
    /// Inside `// ...` up to the end of the line.
    CommentEol,
    /// End of input was seen.
    Eof,
}

impl State {
    /// Upper-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            State::Start => "START",
            State::StartDquote => "START_DQUOTE",
            State::DquoteEscape => "DQUOTE_ESCAPE",
            State::StartSlash => "START_SLASH",
            State::SlashStar => "SLASH_STAR",
            State::SlashStarStar => "SLASH_STAR_STAR",
            State::StartSquote => "START_SQUOTE",
            State::SquoteEscape => "SQUOTE_ESCAPE",
            State::CommentEol => "COMMENT_EOL",
            State::Eof => "EOF",
        }
    }

    /// The construct this state is inside of, for error messages.
    pub const fn construct(self) -> &'static str {
        match self {
            State::Start | State::StartSlash | State::Eof => "code",
            State::StartDquote | State::DquoteEscape => "string literal",
            State::StartSquote | State::SquoteEscape => "character literal",
            State::SlashStar | State::SlashStarStar => "block comment",
            State::CommentEol => "line comment",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
