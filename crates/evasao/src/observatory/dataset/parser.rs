use super::normalizer::strip_bom;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

/// One decoded line: header name to trimmed value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    /// Later columns win when a header name repeats.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Decodes `;`-separated text with `"` quoting into rows keyed by the
/// header line.
///
/// Lines are split before any quote handling, so a quoted field never spans
/// lines and an unterminated quote simply runs to the end of its line. Rows
/// shorter than the header are padded with empty values; surplus fields are
/// dropped.
pub fn decode(text: &str) -> Vec<RawRow> {
    let mut lines = strip_bom(text)
        .lines()
        .filter(|line| !line.trim().is_empty());

    let headers = match lines.next() {
        Some(line) => split_line(line),
        None => return Vec::new(),
    };

    let rows: Vec<RawRow> = lines
        .map(|line| {
            let mut values = split_line(line).into_iter();
            let fields = headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect();
            RawRow { fields }
        })
        .collect();

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        "decoded roster export"
    );
    rows
}

fn split_line(line: &str) -> Vec<String> {
    let tightened = tighten_quoted_fields(line);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .quote(b'"')
        .double_quote(true)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(tightened.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        Ok(false) => Vec::new(),
        Err(err) => {
            warn!(error = %err, "unable to split line, keeping it as a single field");
            vec![line.trim().to_string()]
        }
    }
}

/// Drops whitespace between a separator and an opening quote, which the
/// reader would otherwise keep as literal text in front of an unquoted
/// field. Quote state toggles on every `"`.
fn tighten_quoted_fields(line: &str) -> Cow<'_, str> {
    if !line.contains('"') {
        return Cow::Borrowed(line);
    }

    let mut tightened = String::with_capacity(line.len());
    let mut pending = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    for ch in line.chars() {
        if at_field_start {
            if ch.is_whitespace() {
                pending.push(ch);
                continue;
            }
            if ch != '"' {
                tightened.push_str(&pending);
            }
            pending.clear();
            at_field_start = false;
        }

        match ch {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => at_field_start = true,
            _ => {}
        }
        tightened.push(ch);
    }
    tightened.push_str(&pending);
    Cow::Owned(tightened)
}

#[cfg(test)]
pub(crate) fn split_line_for_tests(line: &str) -> Vec<String> {
    split_line(line)
}
