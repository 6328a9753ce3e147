use crate::common::{DomainError, DomainResult};

use super::types::TableRole;

const BOM: char = '\u{feff}';

/// One data row as read from disk. `line` is the 1-based line in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<Option<String>>,
}

/// Untyped delimited table: a header plus rows of trimmed, possibly null, fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub role: TableRole,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Parse delimited text. The first non-blank line is the header; a leading
    /// byte-order mark is ignored and empty fields become `None`.
    /// Quoted fields may contain the delimiter but not line breaks.
    pub fn parse(role: TableRole, text: &str, delimiter: char) -> DomainResult<Self> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header_line) = lines
            .next()
            .ok_or_else(|| DomainError::schema(role, "missing header row"))?;
        let headers: Vec<String> = split_record(header_line, delimiter)
            .map_err(|reason| DomainError::schema(role, format!("unreadable header: {}", reason)))?
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (line, record) in lines {
            let fields = split_record(record, delimiter)
                .map_err(|reason| DomainError::row(role, line, reason))?;
            if fields.len() != headers.len() {
                return Err(DomainError::row(
                    role,
                    line,
                    format!("expected {} fields, found {}", headers.len(), fields.len()),
                ));
            }
            rows.push(RawRow {
                line,
                fields: fields.into_iter().map(normalize).collect(),
            });
        }

        Ok(Self { role, headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize(field: String) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn split_record(line: &str, delimiter: char) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' && field.trim().is_empty() {
            field.clear();
            in_quotes = true;
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

/// Render a table as UTF-8 text with a leading byte-order mark so spreadsheet
/// tools pick the right encoding. `None` fields are written empty.
pub fn write_delimited(headers: &[&str], rows: &[Vec<Option<String>>], delimiter: char) -> String {
    let mut out = String::new();
    out.push(BOM);
    push_record(&mut out, headers.iter().map(|h| Some(*h)), delimiter);
    for row in rows {
        push_record(&mut out, row.iter().map(|f| f.as_deref()), delimiter);
    }
    out
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = Option<&'a str>>, delimiter: char) {
    for (index, field) in fields.enumerate() {
        if index > 0 {
            out.push(delimiter);
        }
        if let Some(value) = field {
            push_field(out, value, delimiter);
        }
    }
    out.push('\n');
}

fn push_field(out: &mut String, value: &str, delimiter: char) {
    let needs_quotes = value.contains(delimiter)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if needs_quotes {
        out.push('"');
        out.push_str(&value.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(value);
    }
}
