use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BuilderError, SerializationError};
use crate::field::Field;
use crate::preview::render;
use crate::serializer::serialize;
use crate::token::{BuilderMode, Token, TokenId, TokenKind};

/// User action against a builder, addressed by token id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BuilderCommand {
    Append { token: TokenKind },
    Remove { id: TokenId },
    Clear,
    SelectField { id: TokenId, key: Option<String> },
    SetText { id: TokenId, raw: String },
}

/// Ordered token list for one rule condition or variable formula.
///
/// Every successful mutation re-renders the preview before returning, so
/// [`ExpressionBuilder::preview`] always reflects the current list. Rejected
/// mutations change nothing.
#[derive(Debug, Clone)]
pub struct ExpressionBuilder {
    mode: BuilderMode,
    tokens: Vec<Token>,
    next_id: u64,
    fields: Vec<Field>,
    preview: String,
}

impl ExpressionBuilder {
    /// Creates an empty builder whose field pickers offer `fields`.
    pub fn new(mode: BuilderMode, fields: &[Field]) -> Self {
        let mut builder = Self {
            mode,
            tokens: Vec::new(),
            next_id: 1,
            fields: fields.to_vec(),
            preview: String::new(),
        };
        builder.rerender();
        builder
    }

    pub fn rule(fields: &[Field]) -> Self {
        Self::new(BuilderMode::Rule, fields)
    }

    pub fn formula(fields: &[Field]) -> Self {
        Self::new(BuilderMode::Formula, fields)
    }

    pub fn mode(&self) -> BuilderMode {
        self.mode
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|token| token.id == id)
    }

    /// Options currently offered by the field pickers.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Rendering of the current list.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Appends a token at the end of the list.
    pub fn append(&mut self, kind: TokenKind) -> Result<TokenId, BuilderError> {
        if !self.mode.accepts(&kind) {
            return Err(BuilderError::UnsupportedToken {
                kind: kind.type_name(),
                mode: self.mode,
            });
        }
        if let TokenKind::Field { key: Some(key) } = &kind {
            self.ensure_known_field(key)?;
        }

        let id = TokenId(self.next_id);
        self.next_id += 1;
        debug!(mode = %self.mode, token = %id, kind = kind.type_name(), "appending token");
        self.tokens.push(Token::new(id, kind));
        self.rerender();
        Ok(id)
    }

    /// Removes exactly one token, keeping the order of the others.
    pub fn remove(&mut self, id: TokenId) -> Result<Token, BuilderError> {
        let index = self.position(id)?;
        let token = self.tokens.remove(index);
        debug!(mode = %self.mode, token = %id, "removed token");
        self.rerender();
        Ok(token)
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.rerender();
    }

    /// Picks (or with `None` clears) the field of a field token.
    pub fn select_field(&mut self, id: TokenId, key: Option<&str>) -> Result<(), BuilderError> {
        if let Some(key) = key {
            self.ensure_known_field(key)?;
        }
        let index = self.position(id)?;
        match &mut self.tokens[index].kind {
            TokenKind::Field { key: selected } => *selected = key.map(str::to_string),
            other => {
                return Err(BuilderError::WrongTokenKind {
                    id,
                    expected: "field",
                    actual: other.type_name(),
                })
            }
        }
        self.rerender();
        Ok(())
    }

    /// Replaces the text typed into a value or constant token.
    pub fn set_text(&mut self, id: TokenId, text: impl Into<String>) -> Result<(), BuilderError> {
        let index = self.position(id)?;
        let expected = match self.mode {
            BuilderMode::Rule => "value",
            BuilderMode::Formula => "const",
        };
        match &mut self.tokens[index].kind {
            TokenKind::Value { raw } | TokenKind::Constant { raw } => *raw = text.into(),
            other => {
                return Err(BuilderError::WrongTokenKind {
                    id,
                    expected,
                    actual: other.type_name(),
                })
            }
        }
        self.rerender();
        Ok(())
    }

    /// Applies a command. Appends return the id of the new token.
    pub fn dispatch(&mut self, command: BuilderCommand) -> Result<Option<TokenId>, BuilderError> {
        match command {
            BuilderCommand::Append { token } => self.append(token).map(Some),
            BuilderCommand::Remove { id } => self.remove(id).map(|_| None),
            BuilderCommand::Clear => {
                self.clear();
                Ok(None)
            }
            BuilderCommand::SelectField { id, key } => {
                self.select_field(id, key.as_deref()).map(|_| None)
            }
            BuilderCommand::SetText { id, raw } => self.set_text(id, raw).map(|_| None),
        }
    }

    /// Replaces the picker options. Selections whose key disappeared are cleared.
    pub fn sync_fields(&mut self, fields: &[Field]) {
        self.fields = fields.to_vec();
        let mut cleared = 0usize;
        for token in &mut self.tokens {
            if let TokenKind::Field { key } = &mut token.kind {
                let still_known = key
                    .as_deref()
                    .map(|selected| fields.iter().any(|field| field.key == selected))
                    .unwrap_or(true);
                if !still_known {
                    *key = None;
                    cleared += 1;
                }
            }
        }
        if cleared > 0 {
            debug!(mode = %self.mode, cleared, "cleared stale field selections");
        }
        self.rerender();
    }

    /// Expression string for the current list.
    pub fn serialize(&self) -> Result<String, SerializationError> {
        serialize(&self.tokens, self.mode)
    }

    fn position(&self, id: TokenId) -> Result<usize, BuilderError> {
        self.tokens
            .iter()
            .position(|token| token.id == id)
            .ok_or(BuilderError::UnknownToken(id))
    }

    fn ensure_known_field(&self, key: &str) -> Result<(), BuilderError> {
        if self.fields.iter().any(|field| field.key == key) {
            Ok(())
        } else {
            Err(BuilderError::UnknownField(key.to_string()))
        }
    }

    fn rerender(&mut self) {
        self.preview = render(&self.tokens, &self.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{static_fields, Field};
    use crate::token::Operator;

    #[test]
    fn builds_rule_with_live_preview() {
        let mut builder = ExpressionBuilder::rule(&static_fields());
        assert_eq!(builder.preview(), "...");

        builder.append(TokenKind::field("waiting_hours")).unwrap();
        assert_eq!(builder.preview(), "[Bekleme Süresi]");
        builder.append(TokenKind::op(Operator::Gt)).unwrap();
        builder.append(TokenKind::value("5")).unwrap();

        assert_eq!(builder.preview(), "[Bekleme Süresi] > '5'");
        assert_eq!(builder.serialize().unwrap(), "waiting_hours > 5");
    }

    #[test]
    fn rejects_tokens_outside_the_mode() {
        let mut builder = ExpressionBuilder::formula(&static_fields());
        let err = builder.append(TokenKind::and()).unwrap_err();

        assert_eq!(
            err,
            BuilderError::UnsupportedToken {
                kind: "logic",
                mode: BuilderMode::Formula
            }
        );
        assert!(builder.is_empty());
        assert_eq!(builder.preview(), "...");
    }

    #[test]
    fn rejects_unknown_field_keys() {
        let mut builder = ExpressionBuilder::rule(&static_fields());
        assert_eq!(
            builder.append(TokenKind::field("nope")),
            Err(BuilderError::UnknownField("nope".into()))
        );
        assert!(builder.is_empty());
    }

    #[test]
    fn remove_deletes_only_the_addressed_token() {
        let mut builder = ExpressionBuilder::rule(&static_fields());
        let a = builder.append(TokenKind::field("urgency")).unwrap();
        let b = builder.append(TokenKind::op(Operator::Eq)).unwrap();
        let c = builder.append(TokenKind::value("HIGH")).unwrap();
        let d = builder.append(TokenKind::and()).unwrap();

        builder.remove(b).unwrap();
        let ids: Vec<_> = builder.tokens().iter().map(|token| token.id).collect();
        assert_eq!(ids, vec![a, c, d]);
        assert_eq!(builder.preview(), "[Aciliyet] 'HIGH' AND");

        assert_eq!(builder.remove(b), Err(BuilderError::UnknownToken(b)));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut builder = ExpressionBuilder::rule(&static_fields());
        let first = builder.append(TokenKind::open()).unwrap();
        builder.remove(first).unwrap();
        let second = builder.append(TokenKind::open()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn edits_through_commands() {
        let mut builder = ExpressionBuilder::rule(&static_fields());
        let field = builder
            .dispatch(BuilderCommand::Append {
                token: TokenKind::unselected_field(),
            })
            .unwrap()
            .unwrap();
        builder
            .dispatch(BuilderCommand::Append {
                token: TokenKind::op(Operator::Eq),
            })
            .unwrap();
        let value = builder
            .dispatch(BuilderCommand::Append {
                token: TokenKind::value(""),
            })
            .unwrap()
            .unwrap();

        assert_eq!(builder.preview(), "[?] == '?'");
        builder
            .dispatch(BuilderCommand::SelectField {
                id: field,
                key: Some("service".into()),
            })
            .unwrap();
        builder
            .dispatch(BuilderCommand::SetText {
                id: value,
                raw: "Paycell".into(),
            })
            .unwrap();

        assert_eq!(builder.preview(), "[Servis] == 'Paycell'");
        assert_eq!(builder.serialize().unwrap(), "service == 'Paycell'");

        assert!(matches!(
            builder.dispatch(BuilderCommand::SetText {
                id: field,
                raw: "x".into()
            }),
            Err(BuilderError::WrongTokenKind { .. })
        ));

        builder.dispatch(BuilderCommand::Clear).unwrap();
        assert_eq!(builder.preview(), "...");
    }

    #[test]
    fn set_text_names_the_literal_kind_of_the_mode() {
        let mut builder = ExpressionBuilder::formula(&static_fields());
        let field = builder.append(TokenKind::field("waiting_hours")).unwrap();

        assert_eq!(
            builder.set_text(field, "3"),
            Err(BuilderError::WrongTokenKind {
                id: field,
                expected: "const",
                actual: "field"
            })
        );

        builder.append(TokenKind::op(Operator::Mul)).unwrap();
        let constant = builder.append(TokenKind::constant("")).unwrap();
        builder.set_text(constant, "3").unwrap();
        assert_eq!(builder.serialize().unwrap(), "waiting_hours * 3");
    }

    #[test]
    fn sync_keeps_valid_selections_and_clears_stale_ones() {
        let mut fields = static_fields();
        fields.push(Field::variable("risk_score"));
        let mut builder = ExpressionBuilder::rule(&fields);
        builder.append(TokenKind::field("risk_score")).unwrap();
        builder.append(TokenKind::field("urgency")).unwrap();

        let mut relabelled = static_fields();
        relabelled[3].label = "Öncelik".into();
        builder.sync_fields(&relabelled);

        assert_eq!(builder.tokens()[0].kind, TokenKind::unselected_field());
        assert_eq!(builder.tokens()[1].kind, TokenKind::field("urgency"));
        assert_eq!(builder.preview(), "[?] [Öncelik]");
    }
}
