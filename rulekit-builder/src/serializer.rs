use crate::error::SerializationError;
use crate::token::{BuilderMode, Token, TokenKind};

/// Flattens a token list into the expression string the rule engine parses.
///
/// Field keys, operators, parentheses and logic words are emitted verbatim,
/// numbers bare, other rule values single-quoted. Formula output has its
/// whitespace collapsed. Any token that cannot be written faithfully aborts
/// the whole serialization.
pub fn serialize(tokens: &[Token], mode: BuilderMode) -> Result<String, SerializationError> {
    if tokens.is_empty() {
        return Err(SerializationError::EmptyExpression);
    }

    let parts = tokens
        .iter()
        .map(emit)
        .collect::<Result<Vec<_>, _>>()?;
    let joined = parts.join(" ");

    let expression = match mode {
        BuilderMode::Rule => joined.trim().to_string(),
        BuilderMode::Formula => joined.split_whitespace().collect::<Vec<_>>().join(" "),
    };

    if expression.is_empty() {
        return Err(SerializationError::EmptyExpression);
    }
    Ok(expression)
}

fn emit(token: &Token) -> Result<String, SerializationError> {
    match &token.kind {
        TokenKind::Parenthesis { paren } => Ok(paren.symbol().to_string()),
        TokenKind::Logic { logic } => Ok(logic.symbol().to_string()),
        TokenKind::Operator { op } => Ok(op.symbol().to_string()),
        TokenKind::Field { key: Some(key) } if !key.trim().is_empty() => Ok(key.trim().to_string()),
        TokenKind::Field { .. } => Err(SerializationError::UnselectedField(token.id)),
        TokenKind::Constant { raw } => {
            if is_numeric(raw) {
                Ok(raw.trim().to_string())
            } else {
                Err(SerializationError::NonNumericLiteral {
                    id: token.id,
                    raw: raw.clone(),
                })
            }
        }
        TokenKind::Value { raw } => {
            if is_numeric(raw) {
                Ok(raw.trim().to_string())
            } else if raw.contains(['\'', '\\']) {
                Err(SerializationError::UnquotableValue {
                    id: token.id,
                    raw: raw.clone(),
                })
            } else {
                Ok(format!("'{}'", raw))
            }
        }
    }
}

/// Whether the text is a finite decimal number as a whole.
pub fn is_numeric(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty()
        && trimmed
            .parse::<f64>()
            .map(|number| number.is_finite())
            .unwrap_or(false)
}
