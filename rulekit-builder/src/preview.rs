use crate::field::Field;
use crate::token::{Token, TokenKind};

/// Shown when there is nothing to preview.
pub const EMPTY_PREVIEW: &str = "...";

/// Human readable rendering of a token list. Pure: reads the tokens and the
/// picker options, never mutates them.
pub fn render(tokens: &[Token], fields: &[Field]) -> String {
    if tokens.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }

    tokens
        .iter()
        .map(|token| fragment(&token.kind, fields))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fragment(kind: &TokenKind, fields: &[Field]) -> String {
    match kind {
        TokenKind::Parenthesis { paren } => paren.symbol().to_string(),
        TokenKind::Logic { logic } => logic.symbol().to_uppercase(),
        TokenKind::Operator { op } => op.symbol().to_string(),
        TokenKind::Field { key: Some(key) } => {
            let label = fields
                .iter()
                .find(|field| &field.key == key)
                .map(|field| field.label.as_str())
                .unwrap_or(key.as_str());
            format!("[{}]", label)
        }
        TokenKind::Field { key: None } => "[?]".to_string(),
        TokenKind::Value { raw } | TokenKind::Constant { raw } => {
            if raw.is_empty() {
                "'?'".to_string()
            } else {
                format!("'{}'", raw)
            }
        }
    }
}
