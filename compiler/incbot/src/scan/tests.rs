use super::*;
use crate::LoadOptions;
use incbot_lexer_core::{ClassifyError, State};
use pretty_assertions::assert_eq;
use std::path::Path;

const TABLE: &str = "\
f;3;printf;stdio.h
f;3;foo;bar.h
c;3;EOF;stdio.h
k;;while;kw.h
k;;sizeof;
s;3;tm;time.h
t;3;FILE;stdio.h
t;3;size_t;stddef.h|stdlib.h
v;3;errno;errno.h
f;3;nohdr;
?;;stdio;wrong.h
?;;h;wrong.h
";

fn table() -> IdTable {
    let mut table = IdTable::new();
    table
        .load_bytes(TABLE.as_bytes(), Path::new("id-table"), LoadOptions::default())
        .unwrap();
    table
}

/// Helper: scan and render each xref as `(identifier, header, line)`.
fn refs(source: &str) -> Vec<(String, String, u32)> {
    let table = table();
    let mut out = Vec::new();
    scan_source(source.as_bytes(), &table, &mut out).unwrap();
    out.iter()
        .map(|xref| {
            (
                table.names().name_of(xref.ident).unwrap().to_owned(),
                table.strings().name_of(xref.header).unwrap().to_owned(),
                xref.line,
            )
        })
        .collect()
}

fn r(ident: &str, header: &str, line: u32) -> (String, String, u32) {
    (ident.to_owned(), header.to_owned(), line)
}

// ─── Basics ────────────────────────────────────────────────────

#[test]
fn function_call() {
    assert_eq!(refs("int x = foo(1);"), vec![r("foo", "bar.h", 1)]);
}

#[test]
fn empty_input() {
    assert_eq!(refs(""), vec![]);
}

#[test]
fn unknown_identifiers_are_ignored() {
    assert_eq!(refs("int main(void) { return bar(x); }"), vec![]);
}

#[test]
fn xref_points_at_record() {
    let table = table();
    let mut out = Vec::new();
    scan_source(b"errno = 0;", &table, &mut out).unwrap();
    let [xref] = out.as_slice() else {
        panic!("expected one xref, got {out:?}");
    };
    let record = table.record(xref.record).unwrap();
    assert_eq!(record.name, xref.ident);
    assert_eq!(record.header, xref.header);
    assert_eq!(record.kind, IdKind::VAR);
}

#[test]
fn identifier_at_end_of_input() {
    assert_eq!(refs("x = EOF"), vec![r("EOF", "stdio.h", 1)]);
}

#[test]
fn identifier_prefix_does_not_match() {
    assert_eq!(refs("printf2(x); my_errno = errno1;"), vec![]);
}

// ─── Masks ─────────────────────────────────────────────────────

#[test]
fn function_needs_parenthesis() {
    assert_eq!(refs("void *p = printf;"), vec![]);
    assert_eq!(refs("printf (\"hi\");"), vec![r("printf", "stdio.h", 1)]);
}

#[test]
fn whitespace_before_parenthesis_may_span_lines() {
    assert_eq!(refs("printf\n  (\"hi\");"), vec![r("printf", "stdio.h", 1)]);
}

#[test]
fn non_function_followed_by_parenthesis() {
    // `EOF` is a constant; a call-like use is looked up as a function.
    assert_eq!(refs("EOF(1);"), vec![]);
}

#[test]
fn keywords_are_never_recorded() {
    assert_eq!(refs("while (x) { n = sizeof(x); }"), vec![]);
}

#[test]
fn record_without_header_is_not_recorded() {
    assert_eq!(refs("nohdr();"), vec![]);
}

#[test]
fn adjacent_identifiers_are_both_read() {
    assert_eq!(
        refs("struct tm t; FILE *f; size_t n;"),
        vec![
            r("tm", "time.h", 1),
            r("FILE", "stdio.h", 1),
            r("size_t", "stddef.h|stdlib.h", 1),
        ]
    );
}

// ─── Lexical context ───────────────────────────────────────────

#[test]
fn comments_and_strings_are_ignored() {
    let source = "/* printf(x) */ s = \"foo(1)\"; c = 'h'; // errno\n";
    assert_eq!(refs(source), vec![]);
}

#[test]
fn comment_only_input() {
    assert_eq!(refs("// foo is unused here"), vec![]);
}

#[test]
fn code_after_line_comment() {
    assert_eq!(
        refs("// printf(x)\nprintf(y);"),
        vec![r("printf", "stdio.h", 2)]
    );
}

#[test]
fn division_does_not_hide_identifiers() {
    assert_eq!(refs("n = a/errno;"), vec![r("errno", "errno.h", 1)]);
}

#[test]
fn unterminated_string_is_an_error() {
    let table = table();
    let mut out = Vec::new();
    let err = scan_source(b"printf(\"oops);\n", &table, &mut out).unwrap_err();
    assert!(matches!(
        err,
        IncbotError::Classify(ClassifyError::Unterminated {
            state: State::StartDquote
        })
    ));
}

#[test]
fn unterminated_comment_is_an_error() {
    let table = table();
    let mut out = Vec::new();
    let err = scan_source(b"errno = 1; /* never closed", &table, &mut out).unwrap_err();
    assert!(matches!(err, IncbotError::Classify(_)));
}

// ─── Preprocessor ──────────────────────────────────────────────

#[test]
fn angle_include_is_skipped() {
    assert_eq!(refs("#include <stdio.h>\n"), vec![]);
}

#[test]
fn quoted_include_is_skipped() {
    assert_eq!(refs("#include \"foo.h\"\n"), vec![]);
}

#[test]
fn include_with_spaces_after_hash() {
    assert_eq!(refs("#  include <stdio.h>\n"), vec![]);
}

#[test]
fn include_line_with_trailing_comment() {
    let source = "#include <stdio.h> // for printf\nprintf(x);\n";
    assert_eq!(refs(source), vec![r("printf", "stdio.h", 2)]);
}

#[test]
fn code_after_include_is_scanned() {
    let source = "#include <stdio.h>\n#include <errno.h>\nint main() { printf(\"%d\", errno); }\n";
    assert_eq!(
        refs(source),
        vec![r("printf", "stdio.h", 3), r("errno", "errno.h", 3)]
    );
}

#[test]
fn other_directives_are_scanned() {
    assert_eq!(
        refs("#define SHOW(x) printf(\"%d\", x)\n"),
        vec![r("printf", "stdio.h", 1)]
    );
}

#[test]
fn hash_not_in_column_one_is_not_a_directive() {
    let table = table();
    let mut scanner = Scanner::new(b" #x");
    let mut out = Vec::new();
    scanner.run(&table, &mut out).unwrap();
    assert!(!scanner.in_preprocessor());

    let mut scanner = Scanner::new(b"#x");
    scanner.run(&table, &mut out).unwrap();
    assert!(scanner.in_preprocessor());
}

// ─── Line numbers ──────────────────────────────────────────────

#[test]
fn lines_are_one_based() {
    assert_eq!(
        refs("errno;\n\nprintf(x);"),
        vec![r("errno", "errno.h", 1), r("printf", "stdio.h", 3)]
    );
}

#[test]
fn line_numbers_survive_block_comments() {
    let source = "/* one\n * two\n */\nprintf(x);\n";
    assert_eq!(refs(source), vec![r("printf", "stdio.h", 4)]);
}

#[test]
fn newline_ending_identifier_is_counted_once() {
    let source = "errno\nerrno\nerrno\n";
    assert_eq!(
        refs(source),
        vec![
            r("errno", "errno.h", 1),
            r("errno", "errno.h", 2),
            r("errno", "errno.h", 3),
        ]
    );
}

#[test]
fn scanner_counts_every_line() {
    let table = table();
    let mut scanner = Scanner::new(b"a\n/* b\n*/\n\"c\"\n");
    scanner.run(&table, &mut Vec::new()).unwrap();
    assert_eq!(scanner.line(), 5);
}

#[test]
fn line_counter_saturates() {
    let table = table();
    let mut scanner = Scanner::starting_at_line(b"a\n\n\nprintf(x);\n", u32::MAX - 1);
    let mut out = Vec::new();
    scanner.run(&table, &mut out).unwrap();
    assert_eq!(scanner.line(), u32::MAX);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].line, u32::MAX);
}
