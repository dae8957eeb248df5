//! GraphQL type system
//!
//! In-memory representation of schema types, fields, arguments and
//! directives, plus the `Schema` registry that owns every named type.
//! Construction is two-phase: hosts register finished type definitions
//! whose field positions refer to named types through
//! `GraphQLType::Named`, then `Schema::finish` links and checks every
//! reference and folds in the introspection overlay.

use crate::ast::Value;
use crate::error::{GraphQLError, GraphQLResult};
use crate::execution::ExecutionContext;
use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Canonical resolver signature: `(parent value, coerced arguments,
/// execution context) -> value`.
pub type ResolverFn =
    dyn Fn(&Value, &HashMap<String, Value>, &ExecutionContext) -> Result<Value> + Send + Sync;

/// Callback resolving the concrete object type of an interface or union
/// value.
pub type ResolveTypeFn = fn(&Value) -> Option<String>;

/// GraphQL type information
#[derive(Debug, Clone, PartialEq)]
pub enum GraphQLType {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
    List(Box<GraphQLType>),
    NonNull(Box<GraphQLType>),
    /// Lazy reference to a named type registered in the schema. Field,
    /// argument and input-field positions use this to permit forward
    /// references; `Schema::finish` guarantees it resolves.
    Named(String),
}

impl GraphQLType {
    /// Shorthand for a lazy named reference.
    pub fn named(name: impl Into<String>) -> Self {
        GraphQLType::Named(name.into())
    }

    pub fn list(inner: GraphQLType) -> Self {
        GraphQLType::List(Box::new(inner))
    }

    pub fn non_null(inner: GraphQLType) -> Self {
        GraphQLType::NonNull(Box::new(inner))
    }

    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Scalar(s) => &s.name,
            GraphQLType::Object(o) => &o.name,
            GraphQLType::Interface(i) => &i.name,
            GraphQLType::Union(u) => &u.name,
            GraphQLType::Enum(e) => &e.name,
            GraphQLType::InputObject(io) => &io.name,
            GraphQLType::Named(name) => name,
            GraphQLType::List(inner) => inner.name(),
            GraphQLType::NonNull(inner) => inner.name(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        !matches!(self, GraphQLType::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, GraphQLType::List(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, GraphQLType::Scalar(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, GraphQLType::Object(_))
    }

    /// Strips `NonNull` and `List` wrappers.
    pub fn unwrapped(&self) -> &GraphQLType {
        match self {
            GraphQLType::List(inner) | GraphQLType::NonNull(inner) => inner.unwrapped(),
            other => other,
        }
    }
}

impl fmt::Display for GraphQLType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphQLType::List(inner) => write!(f, "[{inner}]"),
            GraphQLType::NonNull(inner) => write!(f, "{inner}!"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Scalar type definition
#[derive(Debug, Clone)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub serialize: fn(&Value) -> Result<Value>,
    pub parse_value: fn(&Value) -> Result<Value>,
    pub parse_literal: fn(&Value) -> Result<Value>,
}

impl PartialEq for ScalarType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.description == other.description
        // Note: Function pointers are not compared as they cannot be reliably compared
    }
}

impl ScalarType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            serialize: |v| Ok(v.clone()),
            parse_value: |v| Ok(v.clone()),
            parse_literal: |v| Ok(v.clone()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_serializer(mut self, serialize: fn(&Value) -> Result<Value>) -> Self {
        self.serialize = serialize;
        self
    }

    pub fn with_value_parser(mut self, parse_value: fn(&Value) -> Result<Value>) -> Self {
        self.parse_value = parse_value;
        self
    }

    pub fn with_literal_parser(mut self, parse_literal: fn(&Value) -> Result<Value>) -> Self {
        self.parse_literal = parse_literal;
        self
    }
}

/// Object type definition
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, FieldType>,
    pub interfaces: Vec<String>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: FieldType) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}

/// Field type definition
#[derive(Clone)]
pub struct FieldType {
    pub name: String,
    pub description: Option<String>,
    pub field_type: GraphQLType,
    pub arguments: IndexMap<String, ArgumentType>,
    pub deprecated: Option<String>,
    pub resolver: Option<Arc<ResolverFn>>,
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldType")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("field_type", &self.field_type)
            .field("arguments", &self.arguments)
            .field("deprecated", &self.deprecated)
            .field("resolver", &self.resolver.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.field_type == other.field_type
            && self.arguments == other.arguments
            && self.deprecated == other.deprecated
        // Note: Resolvers are not compared as they cannot be reliably compared
    }
}

impl FieldType {
    pub fn new(name: impl Into<String>, field_type: GraphQLType) -> Self {
        Self {
            name: name.into(),
            description: None,
            field_type,
            arguments: IndexMap::new(),
            deprecated: None,
            resolver: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_argument(mut self, argument: ArgumentType) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }

    pub fn with_deprecation(mut self, reason: impl Into<String>) -> Self {
        self.deprecated = Some(reason.into());
        self
    }

    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Value, &HashMap<String, Value>, &ExecutionContext) -> Result<Value>
            + Send
            + Sync
            + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }
}

/// Argument type definition
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentType {
    pub name: String,
    pub description: Option<String>,
    pub argument_type: GraphQLType,
    pub default_value: Option<Value>,
}

impl ArgumentType {
    pub fn new(name: impl Into<String>, argument_type: GraphQLType) -> Self {
        Self {
            name: name.into(),
            description: None,
            argument_type,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default_value(mut self, default_value: Value) -> Self {
        self.default_value = Some(default_value);
        self
    }
}

/// Interface type definition
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, FieldType>,
    pub resolve_type: Option<ResolveTypeFn>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
            resolve_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: FieldType) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn with_type_resolver(mut self, resolve_type: ResolveTypeFn) -> Self {
        self.resolve_type = Some(resolve_type);
        self
    }
}

/// Union type definition
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub types: Vec<String>,
    pub resolve_type: Option<ResolveTypeFn>,
}

impl UnionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            types: Vec::new(),
            resolve_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.types.push(type_name.into());
        self
    }

    pub fn with_type_resolver(mut self, resolve_type: ResolveTypeFn) -> Self {
        self.resolve_type = Some(resolve_type);
        self
    }
}

/// Enum type definition
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: IndexMap<String, EnumValue>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_value(mut self, value: EnumValue) -> Self {
        self.values.insert(value.name.clone(), value);
        self
    }
}

/// Enum value definition
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub value: Value,
    pub deprecated: Option<String>,
}

impl EnumValue {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: Value::EnumValue(name.clone()),
            name,
            description: None,
            deprecated: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deprecation(mut self, reason: impl Into<String>) -> Self {
        self.deprecated = Some(reason.into());
        self
    }
}

/// Input object type definition
#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, InputFieldType>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: InputFieldType) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }
}

/// Input field type definition
#[derive(Debug, Clone, PartialEq)]
pub struct InputFieldType {
    pub name: String,
    pub description: Option<String>,
    pub field_type: GraphQLType,
    pub default_value: Option<Value>,
}

impl InputFieldType {
    pub fn new(name: impl Into<String>, field_type: GraphQLType) -> Self {
        Self {
            name: name.into(),
            description: None,
            field_type,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default_value(mut self, default_value: Value) -> Self {
        self.default_value = Some(default_value);
        self
    }
}

/// Directive type definition
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveType {
    pub name: String,
    pub description: Option<String>,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: IndexMap<String, ArgumentType>,
}

impl DirectiveType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: Vec::new(),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: DirectiveLocation) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_argument(mut self, argument: ArgumentType) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }
}

/// Directive locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    /// Spelling used by the introspection `__DirectiveLocation` enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

/// Built-in scalar types
pub struct BuiltinScalars;

impl BuiltinScalars {
    pub fn string() -> ScalarType {
        ScalarType::new("String")
            .with_description("The `String` scalar type represents textual data, represented as UTF-8 character sequences.")
            .with_serializer(|v| match v {
                Value::StringValue(s) => Ok(Value::StringValue(s.clone())),
                Value::EnumValue(s) => Ok(Value::StringValue(s.clone())),
                _ => Err(anyhow!("Cannot serialize {v:?} as String")),
            })
            .with_value_parser(|v| match v {
                Value::StringValue(_) => Ok(v.clone()),
                _ => Err(anyhow!("Cannot parse {v:?} as String")),
            })
            .with_literal_parser(|v| match v {
                Value::StringValue(_) => Ok(v.clone()),
                _ => Err(anyhow!("Cannot parse literal {v:?} as String")),
            })
    }

    pub fn int() -> ScalarType {
        ScalarType::new("Int")
            .with_description(
                "The `Int` scalar type represents non-fractional signed whole numeric values.",
            )
            .with_serializer(|v| match v {
                Value::IntValue(i) => Ok(Value::IntValue(*i)),
                _ => Err(anyhow!("Cannot serialize {v:?} as Int")),
            })
            .with_value_parser(|v| match v {
                Value::IntValue(_) => Ok(v.clone()),
                _ => Err(anyhow!("Cannot parse {v:?} as Int")),
            })
            .with_literal_parser(|v| match v {
                Value::IntValue(_) => Ok(v.clone()),
                _ => Err(anyhow!("Cannot parse literal {v:?} as Int")),
            })
    }

    pub fn float() -> ScalarType {
        ScalarType::new("Float")
            .with_description(
                "The `Float` scalar type represents signed double-precision fractional values.",
            )
            .with_serializer(|v| match v {
                Value::FloatValue(f) => Ok(Value::FloatValue(*f)),
                Value::IntValue(i) => Ok(Value::FloatValue(*i as f64)),
                _ => Err(anyhow!("Cannot serialize {v:?} as Float")),
            })
            .with_value_parser(|v| match v {
                Value::FloatValue(_) => Ok(v.clone()),
                Value::IntValue(i) => Ok(Value::FloatValue(*i as f64)),
                _ => Err(anyhow!("Cannot parse {v:?} as Float")),
            })
            .with_literal_parser(|v| match v {
                Value::FloatValue(_) => Ok(v.clone()),
                Value::IntValue(i) => Ok(Value::FloatValue(*i as f64)),
                _ => Err(anyhow!("Cannot parse literal {v:?} as Float")),
            })
    }

    pub fn boolean() -> ScalarType {
        ScalarType::new("Boolean")
            .with_description("The `Boolean` scalar type represents `true` or `false`.")
            .with_serializer(|v| match v {
                Value::BooleanValue(b) => Ok(Value::BooleanValue(*b)),
                _ => Err(anyhow!("Cannot serialize {v:?} as Boolean")),
            })
            .with_value_parser(|v| match v {
                Value::BooleanValue(_) => Ok(v.clone()),
                _ => Err(anyhow!("Cannot parse {v:?} as Boolean")),
            })
            .with_literal_parser(|v| match v {
                Value::BooleanValue(_) => Ok(v.clone()),
                _ => Err(anyhow!("Cannot parse literal {v:?} as Boolean")),
            })
    }

    pub fn id() -> ScalarType {
        ScalarType::new("ID")
            .with_description("The `ID` scalar type represents a unique identifier.")
            .with_serializer(|v| match v {
                Value::StringValue(s) => Ok(Value::StringValue(s.clone())),
                Value::IntValue(i) => Ok(Value::StringValue(i.to_string())),
                _ => Err(anyhow!("Cannot serialize {v:?} as ID")),
            })
            .with_value_parser(|v| match v {
                Value::StringValue(_) => Ok(v.clone()),
                Value::IntValue(i) => Ok(Value::StringValue(i.to_string())),
                _ => Err(anyhow!("Cannot parse {v:?} as ID")),
            })
            .with_literal_parser(|v| match v {
                Value::StringValue(_) => Ok(v.clone()),
                Value::IntValue(i) => Ok(Value::StringValue(i.to_string())),
                _ => Err(anyhow!("Cannot parse literal {v:?} as ID")),
            })
    }
}

/// Built-in `@skip`, `@include` and `@deprecated` directives.
fn builtin_directives() -> Vec<DirectiveType> {
    vec![
        DirectiveType::new("skip")
            .with_description("Directs the executor to skip this field or fragment when the `if` argument is true.")
            .with_location(DirectiveLocation::Field)
            .with_location(DirectiveLocation::FragmentSpread)
            .with_location(DirectiveLocation::InlineFragment)
            .with_argument(ArgumentType::new(
                "if",
                GraphQLType::non_null(GraphQLType::named("Boolean")),
            )),
        DirectiveType::new("include")
            .with_description("Directs the executor to include this field or fragment only when the `if` argument is true.")
            .with_location(DirectiveLocation::Field)
            .with_location(DirectiveLocation::FragmentSpread)
            .with_location(DirectiveLocation::InlineFragment)
            .with_argument(ArgumentType::new(
                "if",
                GraphQLType::non_null(GraphQLType::named("Boolean")),
            )),
        DirectiveType::new("deprecated")
            .with_description("Marks an element of a GraphQL schema as no longer supported.")
            .with_location(DirectiveLocation::FieldDefinition)
            .with_location(DirectiveLocation::EnumValue)
            .with_argument(
                ArgumentType::new("reason", GraphQLType::named("String")).with_default_value(
                    Value::StringValue("No longer supported".to_string()),
                ),
            ),
    ]
}

/// Schema containing all types.
///
/// Read-only once `finish` has run; the executor only borrows it, so a
/// single schema can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Schema {
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    pub types: IndexMap<String, GraphQLType>,
    pub directives: IndexMap<String, DirectiveType>,
}

impl Schema {
    pub fn new() -> Self {
        let mut schema = Self {
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types: IndexMap::new(),
            directives: IndexMap::new(),
        };

        // Built-in scalar types are always available.
        for scalar in [
            BuiltinScalars::string(),
            BuiltinScalars::int(),
            BuiltinScalars::float(),
            BuiltinScalars::boolean(),
            BuiltinScalars::id(),
        ] {
            schema
                .types
                .insert(scalar.name.clone(), GraphQLType::Scalar(scalar));
        }
        for directive in builtin_directives() {
            schema.directives.insert(directive.name.clone(), directive);
        }

        schema
    }

    /// Registers a named type. Names are unique within a schema.
    pub fn add_type(&mut self, graphql_type: GraphQLType) -> GraphQLResult<()> {
        let name = graphql_type.name().to_string();
        if matches!(
            graphql_type,
            GraphQLType::List(_) | GraphQLType::NonNull(_) | GraphQLType::Named(_)
        ) {
            return Err(GraphQLError::type_system(format!(
                "Cannot register wrapper or reference type '{name}'"
            )));
        }
        if self.types.contains_key(&name) {
            return Err(GraphQLError::type_system(format!(
                "Type '{name}' is already registered"
            )));
        }
        self.types.insert(name, graphql_type);
        Ok(())
    }

    pub fn add_directive(&mut self, directive: DirectiveType) {
        self.directives.insert(directive.name.clone(), directive);
    }

    pub fn get_type(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    pub fn get_directive(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name)
    }

    pub fn set_query_type(&mut self, type_name: impl Into<String>) {
        self.query_type = Some(type_name.into());
    }

    pub fn set_mutation_type(&mut self, type_name: impl Into<String>) {
        self.mutation_type = Some(type_name.into());
    }

    pub fn set_subscription_type(&mut self, type_name: impl Into<String>) {
        self.subscription_type = Some(type_name.into());
    }

    /// Follows `Named` references until an owned definition is reached.
    pub fn resolve<'a>(&'a self, graphql_type: &'a GraphQLType) -> GraphQLResult<&'a GraphQLType> {
        let mut current = graphql_type;
        loop {
            match current {
                GraphQLType::Named(name) => {
                    current = self
                        .get_type(name)
                        .ok_or_else(|| GraphQLError::type_system(format!("Unknown type '{name}'")))?;
                }
                other => return Ok(other),
            }
        }
    }

    /// Seals the schema: installs the introspection overlay, then checks
    /// that every reachable type reference resolves, that no `NonNull`
    /// wraps another `NonNull`, and that interface and union members are
    /// of the required kinds.
    pub fn finish(mut self) -> GraphQLResult<Schema> {
        crate::introspection::install(&mut self)?;

        for root in [&self.query_type, &self.mutation_type, &self.subscription_type]
            .into_iter()
            .flatten()
        {
            if !self.types.contains_key(root) {
                return Err(GraphQLError::type_system(format!(
                    "Root type '{root}' is not registered"
                )));
            }
        }

        for (name, graphql_type) in &self.types {
            match graphql_type {
                GraphQLType::Object(object) => {
                    for field in object.fields.values() {
                        self.check_reference(&field.field_type)?;
                        for argument in field.arguments.values() {
                            self.check_reference(&argument.argument_type)?;
                        }
                    }
                    for interface in &object.interfaces {
                        match self.get_type(interface) {
                            Some(GraphQLType::Interface(_)) => {}
                            Some(_) => {
                                return Err(GraphQLError::type_system(format!(
                                    "Type '{name}' implements '{interface}' which is not an interface"
                                )))
                            }
                            None => {
                                return Err(GraphQLError::type_system(format!(
                                    "Unknown type '{interface}'"
                                )))
                            }
                        }
                    }
                }
                GraphQLType::Interface(interface) => {
                    for field in interface.fields.values() {
                        self.check_reference(&field.field_type)?;
                        for argument in field.arguments.values() {
                            self.check_reference(&argument.argument_type)?;
                        }
                    }
                }
                GraphQLType::Union(union_type) => {
                    for member in &union_type.types {
                        match self.get_type(member) {
                            Some(GraphQLType::Object(_)) => {}
                            Some(_) => {
                                return Err(GraphQLError::type_system(format!(
                                    "Union '{name}' member '{member}' is not an object type"
                                )))
                            }
                            None => {
                                return Err(GraphQLError::type_system(format!(
                                    "Unknown type '{member}'"
                                )))
                            }
                        }
                    }
                }
                GraphQLType::InputObject(input) => {
                    for field in input.fields.values() {
                        self.check_reference(&field.field_type)?;
                    }
                }
                _ => {}
            }
        }

        debug!(
            types = self.types.len(),
            directives = self.directives.len(),
            "schema construction finished"
        );
        Ok(self)
    }

    fn check_reference(&self, graphql_type: &GraphQLType) -> GraphQLResult<()> {
        match graphql_type {
            GraphQLType::Named(name) => {
                if self.types.contains_key(name) {
                    Ok(())
                } else {
                    Err(GraphQLError::type_system(format!("Unknown type '{name}'")))
                }
            }
            GraphQLType::NonNull(inner) => {
                if matches!(inner.as_ref(), GraphQLType::NonNull(_)) {
                    return Err(GraphQLError::type_system(
                        "Non-null type cannot wrap another non-null type",
                    ));
                }
                self.check_reference(inner)
            }
            GraphQLType::List(inner) => self.check_reference(inner),
            _ => Ok(()),
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scalars_are_preregistered() {
        let schema = Schema::new();
        for name in ["Int", "Float", "String", "Boolean", "ID"] {
            assert!(schema.get_type(name).is_some(), "missing scalar {name}");
        }
        assert!(schema.get_directive("skip").is_some());
        assert!(schema.get_directive("include").is_some());
    }

    #[test]
    fn id_scalar_coerces_int_to_text() {
        let GraphQLType::Scalar(id) = Schema::new().get_type("ID").unwrap().clone() else {
            panic!("expected scalar");
        };
        assert_eq!(
            (id.serialize)(&Value::IntValue(42)).unwrap(),
            Value::StringValue("42".to_string())
        );
        assert_eq!(
            (id.parse_literal)(&Value::StringValue("x".to_string())).unwrap(),
            Value::StringValue("x".to_string())
        );
    }

    #[test]
    fn float_literal_parser_accepts_int() {
        let GraphQLType::Scalar(float) = Schema::new().get_type("Float").unwrap().clone() else {
            panic!("expected scalar");
        };
        assert_eq!(
            (float.parse_literal)(&Value::IntValue(3)).unwrap(),
            Value::FloatValue(3.0)
        );
        assert!((float.parse_literal)(&Value::StringValue("3".to_string())).is_err());
    }

    #[test]
    fn duplicate_type_registration_fails() {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Object(ObjectType::new("Query")))
            .unwrap();
        let err = schema
            .add_type(GraphQLType::Object(ObjectType::new("Query")))
            .unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn finish_rejects_unresolved_references() {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Object(ObjectType::new("Query").with_field(
                FieldType::new("user", GraphQLType::named("User")),
            )))
            .unwrap();
        schema.set_query_type("Query");
        let err = schema.finish().unwrap_err();
        assert!(err.to_string().contains("Unknown type 'User'"));
    }

    #[test]
    fn finish_rejects_double_non_null() {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Object(ObjectType::new("Query").with_field(
                FieldType::new(
                    "id",
                    GraphQLType::non_null(GraphQLType::non_null(GraphQLType::named("ID"))),
                ),
            )))
            .unwrap();
        schema.set_query_type("Query");
        let err = schema.finish().unwrap_err();
        assert!(err.to_string().contains("non-null"));
    }

    #[test]
    fn finish_rejects_non_object_union_member() {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Object(
                ObjectType::new("Query")
                    .with_field(FieldType::new("it", GraphQLType::named("Thing"))),
            ))
            .unwrap();
        schema
            .add_type(GraphQLType::Union(
                UnionType::new("Thing").with_type("String"),
            ))
            .unwrap();
        schema.set_query_type("Query");
        let err = schema.finish().unwrap_err();
        assert!(err.to_string().contains("not an object type"));
    }

    #[test]
    fn field_and_argument_order_is_preserved() {
        let object = ObjectType::new("Query")
            .with_field(FieldType::new("b", GraphQLType::named("String")))
            .with_field(FieldType::new("a", GraphQLType::named("String")))
            .with_field(
                FieldType::new("c", GraphQLType::named("String"))
                    .with_argument(ArgumentType::new("z", GraphQLType::named("Int")))
                    .with_argument(ArgumentType::new("y", GraphQLType::named("Int"))),
            );
        let field_names: Vec<_> = object.fields.keys().cloned().collect();
        assert_eq!(field_names, vec!["b", "a", "c"]);
        let argument_names: Vec<_> = object.fields["c"].arguments.keys().cloned().collect();
        assert_eq!(argument_names, vec!["z", "y"]);
    }

    #[test]
    fn display_renders_wrapped_notation() {
        let ty = GraphQLType::non_null(GraphQLType::list(GraphQLType::non_null(
            GraphQLType::named("User"),
        )));
        assert_eq!(ty.to_string(), "[User!]!");
    }

    #[test]
    fn resolve_follows_named_references() {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Object(ObjectType::new("Query")))
            .unwrap();
        let reference = GraphQLType::named("Query");
        let resolved = schema.resolve(&reference).unwrap();
        assert!(resolved.is_object());
        assert!(schema.resolve(&GraphQLType::named("Nope")).is_err());
    }
}
