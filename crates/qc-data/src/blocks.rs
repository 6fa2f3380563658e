//! The shared `KEY: VALUE` block format.
//!
//! A file is a sequence of blocks separated by blank lines. Every line in a
//! block is a key, a colon, and a value; keys are case-insensitive and
//! stored upper-cased. Spans are byte ranges into the original source.

use std::ops::Range;

use crate::diagnostics::Diagnostic;

/// One `KEY: VALUE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Upper-cased key.
    pub key: String,
    /// Trimmed value; may be empty.
    pub value: String,
    /// Where the key appears.
    pub key_span: Range<usize>,
    /// Where the value appears (the colon, if the value is empty).
    pub value_span: Range<usize>,
}

/// A run of non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Fields in source order, without duplicate keys.
    pub fields: Vec<Field>,
    /// Span of the block's first line, used to point at the whole block.
    pub header: Range<usize>,
}

impl Block {
    /// Look up a field by (upper-case) key.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Look up a field that must be present, reporting its absence.
    pub fn require(&self, key: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<&Field> {
        let field = self.get(key);
        if field.is_none() {
            diagnostics.push(
                Diagnostic::error(self.header.clone(), format!("missing key {key}"))
                    .with_label(format!("this block has no {key} line")),
            );
        }
        field
    }

    /// Look up a required whole-number field.
    pub fn require_number(&self, key: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<u32> {
        let field = self.require(key, diagnostics)?;
        match field.value.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                diagnostics.push(
                    Diagnostic::error(
                        field.value_span.clone(),
                        format!("{key} must be a whole number"),
                    )
                    .with_label(format!("found '{}'", field.value)),
                );
                None
            }
        }
    }

    /// Warn about keys outside `known`.
    pub fn warn_unknown(&self, known: &[&str], diagnostics: &mut Vec<Diagnostic>) {
        for field in &self.fields {
            if !known.contains(&field.key.as_str()) {
                diagnostics.push(Diagnostic::warning(
                    field.key_span.clone(),
                    format!("unknown key {}", field.key),
                ));
            }
        }
    }
}

/// Split a source into blocks. Lines without a colon and repeated keys are
/// reported and skipped.
pub fn parse_blocks(source: &str) -> (Vec<Block>, Vec<Diagnostic>) {
    let mut blocks = Vec::new();
    let mut diagnostics = Vec::new();
    let mut current: Option<Block> = None;
    let mut offset = 0;

    for raw in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw.len();

        let line = raw.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            blocks.extend(current.take());
            continue;
        }

        let lead = line.len() - line.trim_start().len();
        let content_span = line_start + lead..line_start + line.trim_end().len();
        let block = current.get_or_insert_with(|| Block {
            fields: Vec::new(),
            header: content_span.clone(),
        });

        let Some(colon) = line.find(':') else {
            diagnostics.push(
                Diagnostic::error(content_span, "expected a 'KEY: VALUE' line")
                    .with_label("no colon on this line"),
            );
            continue;
        };

        let key_raw = &line[..colon];
        let key = key_raw.trim();
        let key_span = line_start + lead..line_start + key_raw.trim_end().len();
        if key.is_empty() {
            diagnostics.push(Diagnostic::error(content_span, "line has no key"));
            continue;
        }

        let rest = &line[colon + 1..];
        let value = rest.trim();
        let value_span = if value.is_empty() {
            line_start + colon..line_start + colon + 1
        } else {
            let start = line_start + colon + 1 + (rest.len() - rest.trim_start().len());
            start..start + value.len()
        };

        let key = key.to_uppercase();
        if block.get(&key).is_some() {
            diagnostics.push(
                Diagnostic::error(key_span, format!("duplicate key {key}"))
                    .with_label("already set earlier in this block"),
            );
            continue;
        }
        block.fields.push(Field {
            key,
            value: value.to_string(),
            key_span,
            value_span,
        });
    }
    blocks.extend(current);

    (blocks, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let source = "QUEST_ID: a\nTITLE: First\n\n\nquest_id: b\r\n   \nITEM_ID: c";
        let (blocks, diags) = parse_blocks(source);
        assert!(diags.is_empty());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].fields.len(), 2);
        assert_eq!(blocks[1].get("QUEST_ID").unwrap().value, "b");
        assert_eq!(blocks[2].get("ITEM_ID").unwrap().value, "c");
    }

    #[test]
    fn spans_point_into_source() {
        let source = "QUEST_ID: first_steps\n  TITLE:   First Steps  \n";
        let (blocks, _) = parse_blocks(source);
        let title = blocks[0].get("TITLE").unwrap();
        assert_eq!(&source[title.key_span.clone()], "TITLE");
        assert_eq!(&source[title.value_span.clone()], "First Steps");
        assert_eq!(&source[blocks[0].header.clone()], "QUEST_ID: first_steps");
    }

    #[test]
    fn value_may_contain_colons() {
        let (blocks, _) = parse_blocks("EFFECT: health:20\n");
        assert_eq!(blocks[0].get("EFFECT").unwrap().value, "health:20");
    }

    #[test]
    fn empty_value_points_at_colon() {
        let source = "INVENTORY:\n";
        let (blocks, _) = parse_blocks(source);
        let field = blocks[0].get("INVENTORY").unwrap();
        assert_eq!(field.value, "");
        assert_eq!(&source[field.value_span.clone()], ":");
    }

    #[test]
    fn reports_bad_lines_and_duplicates() {
        let source = "QUEST_ID: a\njust some text\nquest_id: b\n: nothing\n";
        let (blocks, diags) = parse_blocks(source);
        assert_eq!(diags.len(), 3);
        assert_eq!(diags[0].message, "expected a 'KEY: VALUE' line");
        assert_eq!(diags[1].message, "duplicate key QUEST_ID");
        assert_eq!(diags[2].message, "line has no key");
        assert_eq!(blocks[0].get("QUEST_ID").unwrap().value, "a");
    }

    #[test]
    fn require_number_reports_value_span() {
        let source = "REWARD_XP: lots\n";
        let (blocks, _) = parse_blocks(source);
        let mut diags = Vec::new();
        assert_eq!(blocks[0].require_number("REWARD_XP", &mut diags), None);
        assert_eq!(blocks[0].require_number("REWARD_GOLD", &mut diags), None);
        assert_eq!(diags.len(), 2);
        assert_eq!(&source[diags[0].span.clone()], "lots");
        assert_eq!(diags[1].message, "missing key REWARD_GOLD");
    }
}
