//! GraphQL request AST
//!
//! Node shapes for a parsed request document: operations, fragments,
//! selection sets and the value literal grammar. `Value` doubles as the
//! engine's runtime value representation, so resolvers produce and
//! consume the same type the parser emits.

use crate::error::SourcePosition;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fmt;

/// A parsed GraphQL document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Query => write!(f, "query"),
            OperationType::Mutation => write!(f, "mutation"),
            OperationType::Subscription => write!(f, "subscription"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationDefinition {
    pub operation_type: OperationType,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub variable_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
    pub position: SourcePosition,
}

impl Field {
    /// Alias if present, otherwise the field name. Keys the output object.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSpread {
    pub fragment_name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
}

/// Type reference as written in a document, e.g. `[User!]!`.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Type::Named(name) => name,
            Type::List(inner) | Type::NonNull(inner) => inner.name(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => write!(f, "{name}"),
            Type::List(inner) => write!(f, "[{inner}]"),
            Type::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
}

/// Literal and runtime values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Variable(Variable),
    IntValue(i64),
    FloatValue(f64),
    StringValue(String),
    BooleanValue(bool),
    NullValue,
    EnumValue(String),
    ListValue(Vec<Value>),
    ObjectValue(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::NullValue)
    }

    /// Field lookup on object values, used by the default resolver.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::ObjectValue(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Converts to the wire representation. Variables must already have
    /// been substituted; a leftover variable is a caller bug surfaced as
    /// null.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Variable(_) | Value::NullValue => JsonValue::Null,
            Value::IntValue(i) => JsonValue::Number((*i).into()),
            Value::FloatValue(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::StringValue(s) => JsonValue::String(s.clone()),
            Value::BooleanValue(b) => JsonValue::Bool(*b),
            Value::EnumValue(name) => JsonValue::String(name.clone()),
            Value::ListValue(items) => {
                JsonValue::Array(items.iter().map(Value::to_json).collect())
            }
            Value::ObjectValue(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::NullValue,
            JsonValue::Bool(b) => Value::BooleanValue(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::IntValue(i)
                } else {
                    Value::FloatValue(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => Value::StringValue(s),
            JsonValue::Array(items) => {
                Value::ListValue(items.into_iter().map(Value::from).collect())
            }
            JsonValue::Object(fields) => Value::ObjectValue(
                fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    /// Renders GraphQL literal notation, e.g. `{a: [1, "x"]}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Variable(var) => write!(f, "${}", var.name),
            Value::IntValue(i) => write!(f, "{i}"),
            Value::FloatValue(v) => write!(f, "{v}"),
            Value::StringValue(s) => write!(f, "{:?}", s),
            Value::BooleanValue(b) => write!(f, "{b}"),
            Value::NullValue => write!(f, "null"),
            Value::EnumValue(name) => write!(f, "{name}"),
            Value::ListValue(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::ObjectValue(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
