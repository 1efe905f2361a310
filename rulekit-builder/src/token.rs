use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokenParseError;

/// Identity of a token inside one builder. Never reused while the builder lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which expression a builder assembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderMode {
    /// Boolean rule condition: fields, quoted values, comparisons and logic words.
    Rule,
    /// Arithmetic variable formula: fields, numeric constants and arithmetic.
    Formula,
}

impl BuilderMode {
    /// Whether the palette of this mode offers the given token.
    pub fn accepts(self, kind: &TokenKind) -> bool {
        match (self, kind) {
            (_, TokenKind::Parenthesis { .. }) | (_, TokenKind::Field { .. }) => true,
            (BuilderMode::Rule, TokenKind::Logic { .. })
            | (BuilderMode::Rule, TokenKind::Operator { .. })
            | (BuilderMode::Rule, TokenKind::Value { .. }) => true,
            (BuilderMode::Formula, TokenKind::Operator { op }) => op.is_arithmetic(),
            (BuilderMode::Formula, TokenKind::Constant { .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Display for BuilderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderMode::Rule => f.write_str("rule"),
            BuilderMode::Formula => f.write_str("formula"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paren {
    #[serde(rename = "(")]
    Open,
    #[serde(rename = ")")]
    Close,
}

impl Paren {
    pub fn symbol(self) -> &'static str {
        match self {
            Paren::Open => "(",
            Paren::Close => ")",
        }
    }
}

/// Logical connective between two rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    /// Word the rule engine expects in the condition string.
    pub fn symbol(self) -> &'static str {
        match self {
            LogicOp::And => "and",
            LogicOp::Or => "or",
        }
    }
}

/// Arithmetic and comparison operators offered by the palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Rem,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl Operator {
    pub const ALL: [Operator; 11] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Rem,
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Rem
        )
    }
}

/// Payload of a token; also what a palette button asks the builder to append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenKind {
    Parenthesis { paren: Paren },
    Logic { logic: LogicOp },
    Operator { op: Operator },
    /// Field reference; `None` until the user picks a field.
    Field { key: Option<String> },
    /// Rule value, quoted unless it is numeric.
    Value { raw: String },
    /// Numeric formula constant.
    Constant { raw: String },
}

impl TokenKind {
    pub fn field(key: impl Into<String>) -> Self {
        TokenKind::Field {
            key: Some(key.into()),
        }
    }

    pub fn unselected_field() -> Self {
        TokenKind::Field { key: None }
    }

    pub fn value(raw: impl Into<String>) -> Self {
        TokenKind::Value { raw: raw.into() }
    }

    pub fn constant(raw: impl Into<String>) -> Self {
        TokenKind::Constant { raw: raw.into() }
    }

    pub fn op(op: Operator) -> Self {
        TokenKind::Operator { op }
    }

    pub fn open() -> Self {
        TokenKind::Parenthesis { paren: Paren::Open }
    }

    pub fn close() -> Self {
        TokenKind::Parenthesis {
            paren: Paren::Close,
        }
    }

    pub fn and() -> Self {
        TokenKind::Logic {
            logic: LogicOp::And,
        }
    }

    pub fn or() -> Self {
        TokenKind::Logic { logic: LogicOp::Or }
    }

    /// Palette type name, as used in token specs (`field:urgency`).
    pub fn type_name(&self) -> &'static str {
        match self {
            TokenKind::Parenthesis { .. } => "paren",
            TokenKind::Logic { .. } => "logic",
            TokenKind::Operator { .. } => "op",
            TokenKind::Field { .. } => "field",
            TokenKind::Value { .. } => "value",
            TokenKind::Constant { .. } => "const",
        }
    }
}

impl FromStr for TokenKind {
    type Err = TokenParseError;

    /// Parses a palette spec: `paren:(`, `logic:and`, `op:>=`, `field`,
    /// `field:waiting_hours`, `value:HIGH`, `const:2.5`. Bare `(`, `)`,
    /// `and`, `or` and operator symbols are accepted as shorthands.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        if let Some(kind) = shorthand(spec) {
            return Ok(kind);
        }

        let (kind, arg) = match spec.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (spec, None),
        };

        let require = |arg: Option<_>| {
            arg.ok_or_else(|| TokenParseError::MissingArgument {
                kind: kind.to_string(),
            })
        };

        match kind.to_ascii_lowercase().as_str() {
            "paren" | "parenthesis" => match require(arg)? {
                "(" => Ok(TokenKind::open()),
                ")" => Ok(TokenKind::close()),
                other => Err(TokenParseError::InvalidArgument {
                    kind: kind.to_string(),
                    value: other.to_string(),
                }),
            },
            "logic" => match require(arg)?.to_ascii_lowercase().as_str() {
                "and" => Ok(TokenKind::and()),
                "or" => Ok(TokenKind::or()),
                other => Err(TokenParseError::InvalidArgument {
                    kind: kind.to_string(),
                    value: other.to_string(),
                }),
            },
            "op" | "operator" => {
                let symbol = require(arg)?;
                Operator::from_symbol(symbol)
                    .map(TokenKind::op)
                    .ok_or_else(|| TokenParseError::InvalidArgument {
                        kind: kind.to_string(),
                        value: symbol.to_string(),
                    })
            }
            "field" => Ok(TokenKind::Field {
                key: arg.filter(|key| !key.is_empty()).map(str::to_string),
            }),
            "value" => Ok(TokenKind::value(arg.unwrap_or_default())),
            "const" | "constant" => Ok(TokenKind::constant(arg.unwrap_or_default())),
            _ => Err(TokenParseError::UnknownType(kind.to_string())),
        }
    }
}

fn shorthand(spec: &str) -> Option<TokenKind> {
    match spec {
        "(" => Some(TokenKind::open()),
        ")" => Some(TokenKind::close()),
        "and" | "AND" => Some(TokenKind::and()),
        "or" | "OR" => Some(TokenKind::or()),
        other => Operator::from_symbol(other).map(TokenKind::op),
    }
}

/// One entry of a token list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    #[serde(flatten)]
    pub kind: TokenKind,
}

impl Token {
    pub fn new(id: TokenId, kind: TokenKind) -> Self {
        Self { id, kind }
    }
}
