//! Canonical formatting for the generated Go source.
//!
//! Only the subset the models template produces is understood: comment lines,
//! one `package` clause, single-line `import "path"` declarations and
//! `type Name struct { ... }` blocks whose fields are `Name Type` or an
//! embedded `Type`, plus an optional raw-string tag. Anything else is
//! rejected, as is any identifier that collides with a Go keyword. Output
//! follows gofmt layout: fields are tab-indented and aligned in columns,
//! declarations are separated by exactly one blank line and the file ends
//! with a single newline.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$").expect("identifier pattern is valid")
});

const KEYWORDS: [&str; 25] = [
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

#[derive(Debug, PartialEq, Eq)]
enum Item {
    Comment(String),
    Package(String),
    Import(String),   // quoted path
    Struct(StructDecl),
}

#[derive(Debug, PartialEq, Eq)]
struct StructDecl {
    name: String,
    fields: Vec<FieldDecl>,
}

#[derive(Debug, PartialEq, Eq)]
struct FieldDecl {
    name: Option<String>,   // None for an embedded field
    ty: String,
    tag: Option<String>,
}

impl FieldDecl {
    /// Tab-separated cells as gofmt lays them out: name, type, tag. An
    /// embedded field leaves the type column empty so its tag still lines up.
    fn cells(&self) -> Vec<&str> {
        let mut cells: Vec<&str> = Vec::with_capacity(3);
        match &self.name {
            Some(name) => cells.extend([name.as_str(), self.ty.as_str()]),
            None => {
                cells.push(self.ty.as_str());
                if self.tag.is_some() {
                    cells.push("");
                }
            }
        }
        if let Some(tag) = &self.tag {
            cells.push(tag.as_str());
        }
        cells
    }
}

/// Validate `src` and print it in canonical layout. Fails without producing
/// any output when a line falls outside the supported grammar.
pub fn format_source(src: &str) -> Result<String> {
    let items = parse(src)?;
    Ok(print(&items))
}

// ————————————————————————————————————————————————————————————————————————————
// PARSE
// ————————————————————————————————————————————————————————————————————————————

fn parse(src: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut lines = src
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut seen_package = false;
    let mut seen_decl = false;

    while let Some((line_no, line)) = lines.next() {
        let fail = |message: String| Error::Format { line: line_no, message };

        if line.starts_with("//") {
            items.push(Item::Comment(line.to_string()));
            continue;
        }

        let (keyword, rest) = split_token(line);
        match keyword {
            "package" => {
                if seen_package {
                    return Err(fail("duplicate package clause".into()));
                }
                check_ident(rest).map_err(fail)?;
                seen_package = true;
                items.push(Item::Package(rest.to_string()));
            }
            "import" => {
                if !seen_package {
                    return Err(fail("import before package clause".into()));
                }
                if seen_decl {
                    return Err(fail("import after type declaration".into()));
                }
                check_import_path(rest).map_err(fail)?;
                items.push(Item::Import(rest.to_string()));
            }
            "type" => {
                if !seen_package {
                    return Err(fail("type declaration before package clause".into()));
                }
                seen_decl = true;
                let (name, body) = split_token(rest);
                check_ident(name).map_err(fail)?;

                let opener: String = body.split_whitespace().collect();
                let fields = match opener.as_str() {
                    "struct{}" => Vec::new(),
                    "struct{" => parse_fields(&mut lines, line_no)?,
                    _ => return Err(fail(format!("expected `struct {{` after type name, found `{body}`"))),
                };
                items.push(Item::Struct(StructDecl { name: name.to_string(), fields }));
            }
            _ => return Err(fail(format!("unexpected `{line}`"))),
        }
    }

    if !seen_package {
        return Err(Error::Format { line: 1, message: "missing package clause".into() });
    }
    Ok(items)
}

fn parse_fields<'s>(
    lines: &mut impl Iterator<Item = (usize, &'s str)>,
    opened_at: usize,
) -> Result<Vec<FieldDecl>> {
    let mut fields = Vec::new();
    for (line_no, line) in lines.by_ref() {
        if line == "}" {
            return Ok(fields);
        }
        let field = parse_field(line).map_err(|message| Error::Format { line: line_no, message })?;
        fields.push(field);
    }
    Err(Error::Format { line: opened_at, message: "unterminated struct".into() })
}

fn parse_field(line: &str) -> std::result::Result<FieldDecl, String> {
    let (head, rest) = split_token(line);

    // `Type` or `Type `tag`` alone is an embedded field
    let (name, ty, tag) = if rest.is_empty() || rest.starts_with('`') {
        check_embedded_type(head)?;
        (None, head, rest)
    } else {
        check_ident(head)?;
        let (ty, tag) = split_token(rest);
        check_type(ty)?;
        (Some(head.to_string()), ty, tag)
    };

    let tag = match tag {
        "" => None,
        tag => {
            check_tag(tag)?;
            Some(tag.to_string())
        }
    };
    Ok(FieldDecl { name, ty: ty.to_string(), tag })
}

fn split_token(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim_start()),
        None => (s, ""),
    }
}

fn check_ident(ident: &str) -> std::result::Result<(), String> {
    if !IDENT.is_match(ident) {
        return Err(format!("`{ident}` is not a valid identifier"));
    }
    if KEYWORDS.contains(&ident) {
        return Err(format!("`{ident}` is a reserved keyword"));
    }
    Ok(())
}

fn check_type(ty: &str) -> std::result::Result<(), String> {
    if let Some(target) = ty.strip_prefix('*') {
        return check_type(target);
    }
    if let Some(elem) = ty.strip_prefix("[]") {
        return check_type(elem);
    }
    match ty.split_once('.') {
        Some((package, name)) => {
            check_ident(package)?;
            check_ident(name)
        }
        None => check_ident(ty),
    }
}

/// Embedded fields are `T`, `*T`, `pkg.T` or `*pkg.T`.
fn check_embedded_type(ty: &str) -> std::result::Result<(), String> {
    let named = ty.strip_prefix('*').unwrap_or(ty);
    if named.starts_with(['*', '[']) {
        return Err(format!("`{ty}` cannot be an embedded field"));
    }
    check_type(named)
}

fn check_tag(tag: &str) -> std::result::Result<(), String> {
    let inner = tag
        .strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .ok_or_else(|| format!("malformed struct tag {tag}"))?;
    if inner.contains('`') {
        return Err(format!("malformed struct tag {tag}"));
    }
    Ok(())
}

fn check_import_path(path: &str) -> std::result::Result<(), String> {
    let inner = path
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .ok_or_else(|| format!("import path {path} is not a string literal"))?;
    if inner.is_empty() || inner.contains(['"', '\\']) || inner.contains(char::is_whitespace) {
        return Err(format!("invalid import path {path}"));
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// PRINT
// ————————————————————————————————————————————————————————————————————————————

fn print(items: &[Item]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Item> = None;

    for item in items {
        if let Some(prev) = prev {
            // comments stick to what follows them, imports group together
            let tight = matches!(prev, Item::Comment(_))
                || matches!((prev, item), (Item::Import(_), Item::Import(_)));
            if !tight {
                out.push('\n');
            }
        }
        match item {
            Item::Comment(text) => {
                let _ = writeln!(out, "{text}");
            }
            Item::Package(name) => {
                let _ = writeln!(out, "package {name}");
            }
            Item::Import(path) => {
                let _ = writeln!(out, "import {path}");
            }
            Item::Struct(decl) => print_struct(&mut out, decl),
        }
        prev = Some(item);
    }
    out
}

fn print_struct(out: &mut String, decl: &StructDecl) {
    let _ = writeln!(out, "type {} struct {{", decl.name);

    let rows: Vec<Vec<&str>> = decl.fields.iter().map(FieldDecl::cells).collect();
    let mut widths: Vec<Vec<usize>> = rows.iter().map(|row| vec![0; row.len()]).collect();
    column_widths(&rows, &mut widths, 0, 0..rows.len());

    for (row, widths) in rows.iter().zip(&widths) {
        out.push('\t');
        for (col, cell) in row.iter().enumerate() {
            if col + 1 == row.len() {
                out.push_str(cell);
            } else {
                let _ = write!(out, "{cell:<width$}", width = widths[col]);
            }
        }
        out.push('\n');
    }
    out.push_str("}\n");
}

/// Column widths the way gofmt's tabwriter computes them: a column block is a
/// run of consecutive rows whose cell in that column is followed by another
/// cell; the trailing cell of a row never widens a column. Widths include one
/// space of padding, and a block of empty cells collapses to nothing.
fn column_widths(
    rows: &[Vec<&str>],
    widths: &mut [Vec<usize>],
    col: usize,
    range: std::ops::Range<usize>,
) {
    let mut i = range.start;
    while i < range.end {
        if rows[i].len() <= col + 1 {
            i += 1;
            continue;
        }
        let start = i;
        while i < range.end && rows[i].len() > col + 1 {
            i += 1;
        }

        let text = rows[start..i].iter().map(|row| row[col].chars().count()).max().unwrap_or(0);
        let width = if text == 0 { 0 } else { text + 1 };
        for row in &mut widths[start..i] {
            row[col] = width;
        }
        column_widths(rows, widths, col + 1, start..i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RAW_PET: &str = "// Code generated by swagger-structs. DO NOT EDIT.
package models


import \"time\"


type Pet struct {
\tBirthday time.Time `json:\"birthday,omitempty\"`
\tID *int64 `json:\"id,omitempty\"`
\tName string `json:\"name,omitempty\"`
}

type Tag struct {
}

";

    const PET: &str = "// Code generated by swagger-structs. DO NOT EDIT.
package models

import \"time\"

type Pet struct {
\tBirthday time.Time `json:\"birthday,omitempty\"`
\tID       *int64    `json:\"id,omitempty\"`
\tName     string    `json:\"name,omitempty\"`
}

type Tag struct {
}
";

    fn format_err(src: &str) -> (usize, String) {
        match format_source(src).unwrap_err() {
            Error::Format { line, message } => (line, message),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn aligns_fields_and_collapses_blank_lines() {
        assert_eq!(format_source(RAW_PET).unwrap(), PET);
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_source(RAW_PET).unwrap();
        assert_eq!(format_source(&once).unwrap(), once);
    }

    #[test]
    fn imports_are_grouped() {
        let src = "package models\nimport \"time\"\n\n\nimport \"fmt\"\ntype A struct{}\n";
        assert_eq!(
            format_source(src).unwrap(),
            "package models\n\nimport \"time\"\nimport \"fmt\"\n\ntype A struct {\n}\n"
        );
    }

    #[test]
    fn alignment_counts_characters_not_bytes() {
        let src = "package models\ntype A struct {\nÜber string `json:\"über\"`\nX int32 `json:\"x\"`\n}\n";
        let out = format_source(src).unwrap();
        assert!(out.contains("\tÜber string `json:\"über\"`\n"));
        assert!(out.contains("\tX    int32  `json:\"x\"`\n"));
    }

    #[test]
    fn untagged_fields_do_not_pad_trailing_type() {
        let src = "package models\ntype A struct {\nLongName string\nB int32 `json:\"b\"`\n}\n";
        let out = format_source(src).unwrap();
        assert!(out.contains("\tLongName string\n"));
        assert!(out.contains("\tB        int32 `json:\"b\"`\n"));
    }

    #[test]
    fn rejects_keyword_type_name() {
        let (line, message) = format_err("package models\n\ntype type struct {\n}\n");
        assert_eq!(line, 3);
        assert!(message.contains("reserved keyword"), "{message}");
    }

    #[test]
    fn rejects_invalid_field_identifier() {
        let (line, message) = format_err("package models\ntype A struct {\n\tFoo-bar string `json:\"foo-bar\"`\n}\n");
        assert_eq!(line, 3);
        assert!(message.contains("`Foo-bar` is not a valid identifier"), "{message}");
    }

    #[test]
    fn embedded_field_tag_lines_up_with_named_tags() {
        let src = "package models\ntype A struct {\nID int64 `json:\"id\"`\n string `json:\",omitempty\"`\n}\n";
        let out = format_source(src).unwrap();
        assert_eq!(
            out,
            "package models\n\ntype A struct {\n\tID     int64 `json:\"id\"`\n\tstring       `json:\",omitempty\"`\n}\n"
        );
        assert_eq!(format_source(&out).unwrap(), out);
    }

    #[test]
    fn lone_embedded_field_drops_the_empty_type_column() {
        let src = "package models\ntype A struct {\n*pkg.Base `json:\"base\"`\nOther\n}\n";
        let out = format_source(src).unwrap();
        assert!(out.contains("\t*pkg.Base `json:\"base\"`\n\tOther\n"), "{out}");
    }

    #[test]
    fn rejects_embedded_slice_or_double_pointer() {
        let (line, message) = format_err("package models\ntype A struct {\n\t[]string `json:\"x\"`\n}\n");
        assert_eq!(line, 3);
        assert!(message.contains("cannot be an embedded field"), "{message}");
        format_err("package models\ntype A struct {\n\t**B\n}\n");
        format_err("package models\ntype A struct {\n\tmap `json:\"m\"`\n}\n");
    }

    #[test]
    fn rejects_keyword_in_field_type() {
        let (_, message) = format_err("package models\ntype A struct {\n\tB *func `json:\"b\"`\n}\n");
        assert!(message.contains("reserved keyword"));
    }

    #[test]
    fn rejects_malformed_tags() {
        format_err("package models\ntype A struct {\n\tB string json:\"b\"\n}\n");
        format_err("package models\ntype A struct {\n\tB string `json:\"a`b\"`\n}\n");
    }

    #[test]
    fn rejects_unterminated_struct() {
        let (line, message) = format_err("package models\ntype A struct {\n\tB string\n");
        assert_eq!(line, 2);
        assert_eq!(message, "unterminated struct");
    }

    #[test]
    fn rejects_missing_or_late_package() {
        assert_eq!(format_err("// nothing here\n").1, "missing package clause");
        assert_eq!(format_err("import \"time\"\npackage models\n").0, 1);
        assert_eq!(format_err("package models\ntype A struct{}\nimport \"time\"\n").1, "import after type declaration");
    }

    #[test]
    fn rejects_stray_lines() {
        let (line, _) = format_err("package models\nvar x = 1\n");
        assert_eq!(line, 2);
    }
}
