//! The classifier state machine.
//!
//! Every transition is an arm of [`transition`], which maps a state and one
//! input byte to the next state and the pairs released by that byte. The
//! end marker is handled separately by [`end_of_input`].

use crate::{CharClass, ClassifyError, Lookahead, State, SuperChar};

/// Pairs released by one step: zero, one or two, in input order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Emit {
    None,
    One(SuperChar),
    Two(SuperChar, SuperChar),
}

impl Emit {
    /// Number of pairs.
    pub const fn len(self) -> usize {
        match self {
            Emit::None => 0,
            Emit::One(_) => 1,
            Emit::Two(_, _) => 2,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Emit::None)
    }

    /// Pairs in input order.
    pub fn iter(self) -> impl Iterator<Item = SuperChar> {
        let (pairs, len) = match self {
            Emit::None => ([SuperChar::EOF; 2], 0),
            Emit::One(first) => ([first, SuperChar::EOF], 1),
            Emit::Two(first, second) => ([first, second], 2),
        };
        pairs.into_iter().take(len)
    }
}

/// Result of feeding one byte to a state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: State,
    pub emit: Emit,
}

#[inline]
const fn go(next: State, emit: Emit) -> Transition {
    Transition { next, emit }
}

#[inline]
const fn pair(class: CharClass, byte: u8) -> SuperChar {
    SuperChar::new(class, byte)
}

/// How a byte seen in code opens (or doesn't open) a context.
///
/// `/` is not handled here: in code it is always buffered first.
#[inline]
const fn open(byte: u8) -> (State, SuperChar) {
    match byte {
        b'"' => (State::StartDquote, pair(CharClass::OuterString, byte)),
        b'\'' => (State::StartSquote, pair(CharClass::OuterChar, byte)),
        _ => (State::Start, SuperChar::code(byte)),
    }
}

/// Feed one byte to `state`.
pub const fn transition(state: State, byte: u8) -> Transition {
    use CharClass::{InnerChar, InnerComment, InnerString, OuterChar, OuterComment, OuterString};

    match state {
        State::Start => {
            if byte == b'/' {
                // Comment start or division: decided by the next byte.
                go(State::StartSlash, Emit::None)
            } else {
                let (next, opened) = open(byte);
                go(next, Emit::One(opened))
            }
        }

        State::StartDquote => match byte {
            b'\\' => go(State::DquoteEscape, Emit::One(pair(InnerString, byte))),
            b'"' => go(State::Start, Emit::One(pair(OuterString, byte))),
            _ => go(State::StartDquote, Emit::One(pair(InnerString, byte))),
        },

        State::DquoteEscape => go(State::StartDquote, Emit::One(pair(InnerString, byte))),

        State::StartSquote => match byte {
            b'\\' => go(State::SquoteEscape, Emit::One(pair(InnerChar, byte))),
            b'\'' => go(State::Start, Emit::One(pair(OuterChar, byte))),
            _ => go(State::StartSquote, Emit::One(pair(InnerChar, byte))),
        },

        State::SquoteEscape => go(State::StartSquote, Emit::One(pair(InnerChar, byte))),

        State::StartSlash => match byte {
            b'/' => go(
                State::CommentEol,
                Emit::Two(pair(OuterComment, b'/'), pair(OuterComment, byte)),
            ),
            b'*' => go(
                State::SlashStar,
                Emit::Two(pair(OuterComment, b'/'), pair(OuterComment, byte)),
            ),
            _ => {
                // Division. The new byte is dispatched as if seen in code,
                // so `a/"s"` still opens a string.
                let (next, opened) = open(byte);
                go(next, Emit::Two(SuperChar::code(b'/'), opened))
            }
        },

        State::SlashStar => match byte {
            // Interior `*` or the start of `*/`: decided by the next byte.
            b'*' => go(State::SlashStarStar, Emit::None),
            _ => go(State::SlashStar, Emit::One(pair(InnerComment, byte))),
        },

        State::SlashStarStar => match byte {
            b'/' => go(
                State::Start,
                Emit::Two(pair(OuterComment, b'*'), pair(OuterComment, byte)),
            ),
            // The held `*` was interior; the new one is held in its place.
            b'*' => go(State::SlashStarStar, Emit::One(pair(InnerComment, b'*'))),
            _ => go(
                State::SlashStar,
                Emit::Two(pair(InnerComment, b'*'), pair(InnerComment, byte)),
            ),
        },

        State::CommentEol => match byte {
            b'\n' => go(State::Start, Emit::One(pair(OuterComment, byte))),
            _ => go(State::CommentEol, Emit::One(pair(InnerComment, byte))),
        },

        State::Eof => go(State::Eof, Emit::None),
    }
}

/// Handle the end marker in `state`.
///
/// Returns the pairs still held by the state, or the state itself when
/// input must not end there.
pub const fn end_of_input(state: State) -> Result<Emit, State> {
    match state {
        State::Start | State::CommentEol | State::Eof => Ok(Emit::None),
        State::StartSlash => Ok(Emit::One(SuperChar::code(b'/'))),
        State::StartDquote
        | State::DquoteEscape
        | State::StartSquote
        | State::SquoteEscape
        | State::SlashStar
        | State::SlashStarStar => Err(state),
    }
}

/// Pull-based classifier over a byte stream.
///
/// Feed bytes with [`next`](Self::next) and drain the [`Lookahead`] between
/// calls. `None` is the end marker; after it the classifier stays in
/// [`State::Eof`] and every further call leaves an `Eof` pair at the back
/// of the queue.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    state: State,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            state: State::Start,
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Consume one byte (or the end marker) and append the released pairs.
    pub fn next(&mut self, input: Option<u8>, out: &mut Lookahead) -> Result<(), ClassifyError> {
        match input {
            Some(byte) if self.state != State::Eof => {
                let step = transition(self.state, byte);
                for released in step.emit.iter() {
                    out.push(released)?;
                }
                self.state = step.next;
                Ok(())
            }
            _ => self.finish(out),
        }
    }

    fn finish(&mut self, out: &mut Lookahead) -> Result<(), ClassifyError> {
        let state = self.state;
        self.state = State::Eof;

        match end_of_input(state) {
            Ok(held) => {
                for released in held.iter() {
                    out.push(released)?;
                }
                if out.back() != Some(SuperChar::EOF) {
                    out.push(SuperChar::EOF)?;
                }
                Ok(())
            }
            Err(state) => {
                out.push(SuperChar::ERR)?;
                Err(ClassifyError::Unterminated { state })
            }
        }
    }
}

#[cfg(test)]
mod tests;
