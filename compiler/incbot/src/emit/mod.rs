//! Include directive rendering.
//!
//! Cross-references are expanded to one entry per physical header (a header
//! field may list several, joined with `|`), sorted by header and then by
//! identifier, and printed as groups:
//!
//! ```text
//! #include <stdio.h>
//! // Import printf()
//! // Import constant EOF
//! ```
//!
//! Each header appears once per group listing and each identifier once per
//! header, however many times it was referenced.

use std::io::{self, Write};

use incbot_ir::SymbolId;

use crate::{IdKind, IdTable, XRef};

/// Rendering knobs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Spaces before each `// Import` line.
    pub indent: usize,
}

/// One cross-reference narrowed to a single header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry<'t> {
    header: &'t str,
    name: &'t str,
    ident: SymbolId,
    kind: IdKind,
}

/// Expand, sort and deduplicate `xrefs`.
fn entries<'t>(table: &'t IdTable, xrefs: &[XRef]) -> Vec<Entry<'t>> {
    let mut entries = Vec::with_capacity(xrefs.len());
    for xref in xrefs {
        let (Some(headers), Some(name), Some(record)) = (
            table.strings().name_of(xref.header),
            table.names().name_of(xref.ident),
            table.record(xref.record),
        ) else {
            continue;
        };
        entries.extend(
            headers
                .split('|')
                .filter(|header| !header.is_empty())
                .map(|header| Entry {
                    header,
                    name,
                    ident: xref.ident,
                    kind: record.kind,
                }),
        );
    }

    // Stable, so equal pairs keep first-seen order before dedup.
    entries.sort_by(|a, b| (a.header, a.name).cmp(&(b.header, b.name)));
    entries.dedup_by(|a, b| a.header == b.header && a.ident == b.ident);
    entries
}

fn write_annotation<W: Write>(out: &mut W, entry: &Entry<'_>, indent: usize) -> io::Result<()> {
    write!(out, "{:indent$}// Import ", "")?;
    if entry.kind.contains(IdKind::FUNCTION) {
        writeln!(out, "{}()", entry.name)
    } else if entry.kind.contains(IdKind::UNKNOWN) {
        writeln!(out, "{}", entry.name)
    } else {
        writeln!(out, "{} {}", entry.kind.word(), entry.name)
    }
}

/// Write the include groups for `xrefs`.
pub fn write_includes<W: Write>(
    out: &mut W,
    table: &IdTable,
    xrefs: &[XRef],
    options: EmitOptions,
) -> io::Result<()> {
    let mut current: Option<&str> = None;
    for entry in entries(table, xrefs) {
        if current != Some(entry.header) {
            writeln!(out, "#include <{}>", entry.header)?;
            current = Some(entry.header);
        }
        write_annotation(out, &entry, options.indent)?;
    }
    Ok(())
}
