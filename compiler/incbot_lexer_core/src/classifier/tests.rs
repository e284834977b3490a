use super::*;
use crate::LOOKAHEAD;
use pretty_assertions::assert_eq;

/// Helper: classify a whole source, excluding the final `Eof` pair.
fn classify(source: &str) -> Result<Vec<SuperChar>, ClassifyError> {
    let mut classifier = Classifier::new();
    let mut queue = Lookahead::new();
    let mut out = Vec::new();
    for &byte in source.as_bytes() {
        classifier.next(Some(byte), &mut queue)?;
        while let Some(pair) = queue.pop() {
            out.push(pair);
        }
    }
    classifier.next(None, &mut queue)?;
    while let Some(pair) = queue.pop() {
        if pair.class != CharClass::Eof {
            out.push(pair);
        }
    }
    Ok(out)
}

/// Helper: one letter per byte.
///
/// `c` code, `S`/`s` outer/inner string, `Q`/`q` outer/inner char literal,
/// `M`/`m` outer/inner comment.
fn sketch(source: &str) -> String {
    classify(source)
        .unwrap()
        .iter()
        .map(|pair| match pair.class {
            CharClass::Code => 'c',
            CharClass::OuterString => 'S',
            CharClass::InnerString => 's',
            CharClass::OuterChar => 'Q',
            CharClass::InnerChar => 'q',
            CharClass::OuterComment => 'M',
            CharClass::InnerComment => 'm',
            CharClass::Eof => '$',
            CharClass::Err => '!',
        })
        .collect()
}

// ─── Transitions ───────────────────────────────────────────────

#[test]
fn start_buffers_slash() {
    assert_eq!(transition(State::Start, b'/'), go(State::StartSlash, Emit::None));
}

#[test]
fn start_opens_literals() {
    let t = transition(State::Start, b'"');
    assert_eq!(t.next, State::StartDquote);
    assert_eq!(t.emit, Emit::One(pair(CharClass::OuterString, b'"')));

    let t = transition(State::Start, b'\'');
    assert_eq!(t.next, State::StartSquote);
    assert_eq!(t.emit, Emit::One(pair(CharClass::OuterChar, b'\'')));

    let t = transition(State::Start, b'x');
    assert_eq!(t, go(State::Start, Emit::One(SuperChar::code(b'x'))));
}

#[test]
fn slash_resolves_to_two_pairs() {
    let t = transition(State::StartSlash, b'*');
    assert_eq!(t.next, State::SlashStar);
    assert_eq!(
        t.emit,
        Emit::Two(pair(CharClass::OuterComment, b'/'), pair(CharClass::OuterComment, b'*'))
    );

    let t = transition(State::StartSlash, b'/');
    assert_eq!(t.next, State::CommentEol);
    assert_eq!(t.emit.len(), 2);

    let t = transition(State::StartSlash, b' ');
    assert_eq!(t.next, State::Start);
    assert_eq!(t.emit, Emit::Two(SuperChar::code(b'/'), SuperChar::code(b' ')));
}

#[test]
fn division_followed_by_quote_opens_string() {
    let t = transition(State::StartSlash, b'"');
    assert_eq!(t.next, State::StartDquote);
    assert_eq!(
        t.emit,
        Emit::Two(SuperChar::code(b'/'), pair(CharClass::OuterString, b'"'))
    );
}

#[test]
fn escapes_return_to_literal() {
    assert_eq!(transition(State::StartDquote, b'\\').next, State::DquoteEscape);
    assert_eq!(transition(State::DquoteEscape, b'"').next, State::StartDquote);
    assert_eq!(transition(State::StartSquote, b'\\').next, State::SquoteEscape);
    assert_eq!(transition(State::SquoteEscape, b'\'').next, State::StartSquote);
}

#[test]
fn star_inside_block_comment_is_held() {
    assert_eq!(transition(State::SlashStar, b'*'), go(State::SlashStarStar, Emit::None));
    assert_eq!(
        transition(State::SlashStarStar, b'*'),
        go(State::SlashStarStar, Emit::One(pair(CharClass::InnerComment, b'*')))
    );
    assert_eq!(
        transition(State::SlashStarStar, b'x'),
        go(
            State::SlashStar,
            Emit::Two(pair(CharClass::InnerComment, b'*'), pair(CharClass::InnerComment, b'x'))
        )
    );
    assert_eq!(transition(State::SlashStarStar, b'/').next, State::Start);
}

#[test]
fn line_comment_ends_at_newline() {
    assert_eq!(
        transition(State::CommentEol, b'\n'),
        go(State::Start, Emit::One(pair(CharClass::OuterComment, b'\n')))
    );
    assert_eq!(transition(State::CommentEol, b'*').next, State::CommentEol);
}

#[test]
fn eof_state_absorbs_input() {
    assert_eq!(transition(State::Eof, b'a'), go(State::Eof, Emit::None));
}

#[test]
fn end_of_input_per_state() {
    assert_eq!(end_of_input(State::Start), Ok(Emit::None));
    assert_eq!(end_of_input(State::CommentEol), Ok(Emit::None));
    assert_eq!(
        end_of_input(State::StartSlash),
        Ok(Emit::One(SuperChar::code(b'/')))
    );
    for state in [
        State::StartDquote,
        State::DquoteEscape,
        State::StartSquote,
        State::SquoteEscape,
        State::SlashStar,
        State::SlashStarStar,
    ] {
        assert_eq!(end_of_input(state), Err(state));
    }
}

// ─── Whole inputs ──────────────────────────────────────────────

#[test]
fn plain_code() {
    assert_eq!(sketch("a = b;"), "cccccc");
}

#[test]
fn block_comment_delimiters_are_outer() {
    assert_eq!(sketch("a/*b*/c"), "cMMmMMc");
    assert_eq!(sketch("/**/"), "MMMM");
    assert_eq!(sketch("/* ** */"), "MMmmmmMM");
    assert_eq!(sketch("/*/*/"), "MMmMM");
}

#[test]
fn line_comment() {
    assert_eq!(sketch("x // y\nz"), "ccMMmmMc");
}

#[test]
fn line_comment_may_end_the_input() {
    assert_eq!(sketch("// foo is unused here"), "MMmmmmmmmmmmmmmmmmmmm");
}

#[test]
fn strings_and_chars() {
    assert_eq!(sketch(r#"f("a\"b")"#), "ccSssssSc");
    assert_eq!(sketch(r"c = '\'';"), "ccccQqqQc");
    assert_eq!(sketch(r#"'"'"#), "QqQ");
    assert_eq!(sketch(r#""/*""#), "SssS");
}

#[test]
fn division_is_code() {
    assert_eq!(sketch("a / b"), "ccccc");
    assert_eq!(sketch("a/b"), "ccc");
    assert_eq!(sketch("x/"), "cc");
}

#[test]
fn bytes_are_preserved_in_order() {
    let source = "int /* a */ x = 'y'; // \"z\"\n";
    let bytes: Vec<u8> = classify(source).unwrap().iter().map(|p| p.byte).collect();
    assert_eq!(bytes, source.as_bytes());
}

#[test]
fn unterminated_inputs_are_fatal() {
    for (source, state) in [
        ("\"abc", State::StartDquote),
        ("\"abc\\", State::DquoteEscape),
        ("'a", State::StartSquote),
        ("/* open", State::SlashStar),
        ("/* open *", State::SlashStarStar),
    ] {
        assert_eq!(
            classify(source),
            Err(ClassifyError::Unterminated { state }),
            "{source:?}"
        );
    }
}

#[test]
fn error_pair_is_queued() {
    let mut classifier = Classifier::new();
    let mut queue = Lookahead::new();
    classifier.next(Some(b'"'), &mut queue).unwrap();
    let _ = queue.pop();
    let err = classifier.next(None, &mut queue).unwrap_err();
    assert_eq!(queue.pop(), Some(SuperChar::ERR));
    assert!(err.to_string().contains("unterminated string literal"));
}

#[test]
fn eof_is_sticky() {
    let mut classifier = Classifier::new();
    let mut queue = Lookahead::new();
    classifier.next(None, &mut queue).unwrap();
    assert_eq!(classifier.state(), State::Eof);
    classifier.next(Some(b'x'), &mut queue).unwrap();
    classifier.next(None, &mut queue).unwrap();
    // One marker, not one per call.
    assert_eq!(queue.iter().collect::<Vec<_>>(), vec![SuperChar::EOF]);
}

#[test]
fn undrained_queue_overflows() {
    let mut classifier = Classifier::new();
    let mut queue = Lookahead::new();
    let mut result = Ok(());
    for &byte in b"abcdef" {
        result = classifier.next(Some(byte), &mut queue);
        if result.is_err() {
            break;
        }
    }
    assert_eq!(
        result,
        Err(ClassifyError::LookaheadFull {
            capacity: LOOKAHEAD
        })
    );
}

mod proptest_classifier {
    use super::classify;
    use crate::CharClass;
    use proptest::prelude::*;

    proptest! {
        /// Whenever classification succeeds, every input byte comes out
        /// exactly once and in order.
        #[test]
        fn bytes_round_trip(source in "[a/*\"'\\\\\n ]{0,64}") {
            if let Ok(pairs) = classify(&source) {
                let bytes: Vec<u8> = pairs.iter().map(|p| p.byte).collect();
                prop_assert_eq!(bytes, source.as_bytes().to_vec());
                prop_assert!(pairs.iter().all(|p| !p.class.is_terminal()));
            }
        }

        /// Code that contains no quote or slash is classified as code.
        #[test]
        fn plain_text_is_code(source in "[a-z0-9 ;(){}=+\n]{0,64}") {
            let pairs = classify(&source).unwrap();
            prop_assert!(pairs.iter().all(|p| p.class == CharClass::Code));
        }
    }
}
