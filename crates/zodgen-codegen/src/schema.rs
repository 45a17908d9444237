//! Schema expression tree.
//!
//! The compiler produces these nodes instead of strings; the printer walks
//! them and decides layout. Only the expression forms a Zod schema needs
//! are represented: fluent calls on the binding, chained zero-argument
//! modifiers and literal arguments.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaExpr {
    /// `z`
    Identifier(String),
    /// `"text"`
    StringLiteral(String),
    /// `42`, `-1.5`
    NumericLiteral(String),
    /// `10n`; digits only.
    BigIntLiteral(String),
    BooleanLiteral(bool),
    /// `[a, b]`
    ArrayLiteral(Vec<SchemaExpr>),
    /// `{ key: value }` in insertion order.
    ObjectLiteral(Vec<SchemaProperty>),
    /// `receiver.method(args)`
    MethodCall {
        receiver: Box<SchemaExpr>,
        method: String,
        arguments: Vec<SchemaExpr>,
    },
    /// `base.modifier()`
    ChainedModifier {
        base: Box<SchemaExpr>,
        modifier: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaProperty {
    pub key: String,
    pub value: SchemaExpr,
}

impl SchemaExpr {
    pub fn id(name: impl Into<String>) -> Self {
        SchemaExpr::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        SchemaExpr::StringLiteral(value.into())
    }

    pub fn number(value: impl Into<String>) -> Self {
        SchemaExpr::NumericLiteral(value.into())
    }

    pub fn array(elements: Vec<SchemaExpr>) -> Self {
        SchemaExpr::ArrayLiteral(elements)
    }

    pub fn object(properties: Vec<(String, SchemaExpr)>) -> Self {
        SchemaExpr::ObjectLiteral(
            properties
                .into_iter()
                .map(|(key, value)| SchemaProperty { key, value })
                .collect(),
        )
    }

    /// `binding.method(arguments)`
    pub fn call(binding: &str, method: &str, arguments: Vec<SchemaExpr>) -> Self {
        SchemaExpr::MethodCall {
            receiver: Box::new(SchemaExpr::id(binding)),
            method: method.to_string(),
            arguments,
        }
    }

    /// `self.modifier()`
    #[must_use]
    pub fn chain(self, modifier: &str) -> Self {
        SchemaExpr::ChainedModifier {
            base: Box::new(self),
            modifier: modifier.to_string(),
        }
    }

    /// Append an argument to the outermost call of a chain.
    #[must_use]
    pub fn with_argument(self, argument: SchemaExpr) -> Self {
        match self {
            SchemaExpr::MethodCall {
                receiver,
                method,
                mut arguments,
            } => {
                arguments.push(argument);
                SchemaExpr::MethodCall {
                    receiver,
                    method,
                    arguments,
                }
            }
            SchemaExpr::ChainedModifier { base, modifier } => SchemaExpr::ChainedModifier {
                base: Box::new(base.with_argument(argument)),
                modifier,
            },
            other => other,
        }
    }

    /// Method name of the constructor call at the root of a chain.
    #[must_use]
    pub fn constructor_name(&self) -> Option<&str> {
        match self {
            SchemaExpr::MethodCall { method, .. } => Some(method),
            SchemaExpr::ChainedModifier { base, .. } => base.constructor_name(),
            _ => None,
        }
    }
}
