use regex::Regex;

use crate::ast::{Token, TokenKind};

// Consume an entire quoted tag, with backslash-escaped quotes.
const QUOTED_TAG_TOKEN: &str = r#"^"[^\\"]*(?:\\"[^\\"]*)*""#;
// A word-bounded text operator. The trailing class stands in for a
// lookahead (which the regex crate does not support): only the captured
// keyword is consumed.
const CONSUME_TEXT_OPERATOR: &str = r#"(?i)\b(and|or|not)(?:[\s"()>*]|$)"#;
// A symbol operator, matched anywhere.
const CONSUME_SYMBOL_OPERATOR: &str = r"[*>()]";

/// The btriev tokenizer.
///
/// Scans a raw query left to right, consuming exactly one token class
/// at each step: a leading quoted tag, the earliest operator match
/// (text or symbol, whichever occurs first), or the trailing remainder
/// as a final unquoted tag.
///
/// The lexer is total: any input produces a token list, and malformed
/// quoting simply falls through to the ordinary tag/operator rules.
/// Token spans are exact inclusive character offsets into the original
/// query string, independent of whitespace trimming.
pub struct Lexer {
    quoted_tag: Regex,
    text_operator: Regex,
    symbol_operator: Regex,
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

/// Byte and character lengths of the leading whitespace of `s`.
fn leading_whitespace(s: &str) -> (usize, usize) {
    let mut bytes = 0;
    let mut chars = 0;
    for ch in s.chars() {
        if !ch.is_whitespace() {
            break;
        }
        bytes += ch.len_utf8();
        chars += 1;
    }
    (bytes, chars)
}

impl Lexer {
    pub fn new() -> Self {
        // The patterns are fixed literals, so compilation cannot fail.
        Lexer {
            quoted_tag: Regex::new(QUOTED_TAG_TOKEN).unwrap(),
            text_operator: Regex::new(CONSUME_TEXT_OPERATOR).unwrap(),
            symbol_operator: Regex::new(CONSUME_SYMBOL_OPERATOR).unwrap(),
        }
    }

    /// Tokenize a raw query string.
    ///
    /// Empty or all-whitespace input yields an empty token list.
    pub fn tokenize(&self, query: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut rest = query;
        // Character offset of `rest` within the original query.
        let mut base = 0usize;

        while !rest.is_empty() {
            let (ws_bytes, ws_chars) = leading_whitespace(rest);
            let trimmed = &rest[ws_bytes..];

            // A quoted tag is only recognized at the head of the
            // remainder, after leading whitespace.
            if let Some(m) = self.quoted_tag.find(trimmed) {
                let literal = m.as_str();
                let literal_chars = literal.chars().count();
                let start = base + ws_chars;
                let value = literal[1..literal.len() - 1].replace("\\\"", "\"");
                tokens.push(Token::new(start, start + literal_chars - 1, value, TokenKind::Tag));

                rest = &trimmed[m.end()..];
                base = start + literal_chars;
                continue;
            }

            // Two independent operator patterns race; the earlier match
            // wins. Text and symbol operators cannot tie since they
            // share no characters.
            let text_match = self
                .text_operator
                .captures(rest)
                .and_then(|c| c.get(1))
                .map(|g| (g.start(), g.end()));
            let symbol_match = self.symbol_operator.find(rest).map(|m| (m.start(), m.end()));

            let operator = match (text_match, symbol_match) {
                (Some(text), Some(symbol)) => {
                    if text.0 < symbol.0 {
                        Some(text)
                    } else {
                        Some(symbol)
                    }
                }
                (Some(text), None) => Some(text),
                (None, Some(symbol)) => Some(symbol),
                (None, None) => None,
            };

            match operator {
                Some((op_start, op_end)) => {
                    self.push_trimmed_tag(&rest[..op_start], base, &mut tokens);

                    let start = base + rest[..op_start].chars().count();
                    let value = rest[op_start..op_end].to_lowercase();
                    let op_chars = value.chars().count();
                    tokens.push(Token::new(start, start + op_chars - 1, value, TokenKind::Operator));

                    rest = &rest[op_end..];
                    base = start + op_chars;
                }
                None => {
                    // No quote and no operator left: the remainder is a
                    // final tag and the scan terminates.
                    self.push_trimmed_tag(rest, base, &mut tokens);
                    break;
                }
            }
        }

        tokens
    }

    /// Emit `raw`, trimmed of surrounding whitespace, as a tag token
    /// (only if non-empty). `base` is the character offset of `raw`
    /// within the original query.
    fn push_trimmed_tag(&self, raw: &str, base: usize, tokens: &mut Vec<Token>) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }

        let (_, lead_chars) = leading_whitespace(raw);
        let start = base + lead_chars;
        let value_chars = value.chars().count();
        tokens.push(Token::new(start, start + value_chars - 1, value, TokenKind::Tag));
    }
}

#[test]
fn test_operator_race() {
    let lexer = Lexer::new();
    let tokens = lexer.tokenize("tag1 and(tag2");
    let values: Vec<&str> = tokens.iter().map(|t| t.value()).collect();
    assert_eq!(values, vec!["tag1", "and", "(", "tag2"]);
}

#[test]
fn test_offsets_are_character_based() {
    let lexer = Lexer::new();
    let tokens = lexer.tokenize("caf\u{e9} and t");
    assert_eq!(tokens[0].start(), 0);
    assert_eq!(tokens[0].end(), 3);
    assert_eq!(tokens[1].start(), 5);
    assert_eq!(tokens[1].end(), 7);
}
