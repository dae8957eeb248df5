//! GraphQL query execution engine
//!
//! Walks a validated document against the schema: selects the operation,
//! coerces variables and arguments, dispatches resolvers and completes
//! values through list, non-null and abstract wrappers. Null propagation
//! is expressed with `Result` values: a failed non-null completion
//! travels upward as an `Err` until a nullable ancestor absorbs it,
//! records the message and yields `null`.

use crate::ast::{
    Definition, Directive, Document, Field, FragmentDefinition, OperationDefinition,
    OperationType, Selection, SelectionSet, Type, Value,
};
use crate::error::{GraphQLError, GraphQLResult};
use crate::parser::Parser;
use crate::types::{GraphQLType, ObjectType, Schema};
use crate::validation::Validator;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Execution context containing request-specific data
#[derive(Clone)]
pub struct ExecutionContext {
    pub variables: HashMap<String, Value>,
    pub operation_name: Option<String>,
    pub request_id: String,
    pub fragments: HashMap<String, FragmentDefinition>,
    /// Opaque host data passed through to resolvers.
    pub data: Option<Arc<dyn Any + Send + Sync>>,
    schema: Option<Arc<Schema>>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
            operation_name: None,
            request_id: uuid::Uuid::new_v4().to_string(),
            fragments: HashMap::new(),
            data: None,
            schema: None,
        }
    }

    pub fn with_variables(mut self, variables: HashMap<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Accepts a JSON object of variables, the usual transport shape.
    pub fn with_json_variables(mut self, variables: JsonValue) -> Self {
        if let JsonValue::Object(map) = variables {
            self.variables = map.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
        }
        self
    }

    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn with_data(mut self, data: Arc<dyn Any + Send + Sync>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn add_fragment(&mut self, name: String, fragment: FragmentDefinition) {
        self.fragments.insert(name, fragment);
    }

    /// Schema under execution; attached by the executor for the duration
    /// of a request so resolvers (introspection in particular) can reach
    /// type information.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("variables", &self.variables)
            .field("operation_name", &self.operation_name)
            .field("request_id", &self.request_id)
            .field("fragments", &self.fragments.keys())
            .field("data", &self.data.as_ref().map(|_| "<host data>"))
            .finish()
    }
}

/// Execution result containing data and errors
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// `None` means the request failed before execution started and the
    /// `data` key is omitted from the wire shape entirely.
    pub data: Option<JsonValue>,
    pub errors: Vec<GraphQLError>,
}

impl ExecutionResult {
    pub fn new() -> Self {
        Self {
            data: None,
            errors: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, error: GraphQLError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Wire shape: `{ data?, errors? }` with `errors` omitted when empty.
    pub fn to_json(&self) -> JsonValue {
        let mut map = JsonMap::new();
        if let Some(data) = &self.data {
            map.insert("data".to_string(), data.clone());
        }
        if !self.errors.is_empty() {
            let errors = self
                .errors
                .iter()
                .map(|error| {
                    let mut entry = JsonMap::new();
                    entry.insert(
                        "message".to_string(),
                        JsonValue::String(error.to_string()),
                    );
                    if let Some(position) = error.position() {
                        entry.insert(
                            "locations".to_string(),
                            serde_json::json!([{
                                "line": position.line,
                                "column": position.column,
                            }]),
                        );
                    }
                    JsonValue::Object(entry)
                })
                .collect();
            map.insert("errors".to_string(), JsonValue::Array(errors));
        }
        JsonValue::Object(map)
    }
}

impl Default for ExecutionResult {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for ExecutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// GraphQL query executor
pub struct QueryExecutor {
    schema: Arc<Schema>,
}

impl QueryExecutor {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Full request pipeline: parse, validate, execute.
    ///
    /// Parse and validation failures return `{ "errors": [...] }` with no
    /// `data` key; executor-level failures return `{ "data": null, ... }`.
    pub fn execute_request(&self, source: &str, context: &ExecutionContext) -> ExecutionResult {
        let document = match Parser::parse(source) {
            Ok(document) => document,
            Err(error) => {
                return ExecutionResult::new().with_error(error);
            }
        };
        let errors = Validator::new(&self.schema).validate(&document);
        if !errors.is_empty() {
            return ExecutionResult {
                data: None,
                errors,
            };
        }
        self.execute(&document, context)
    }

    /// Executes an already-validated document.
    pub fn execute(&self, document: &Document, context: &ExecutionContext) -> ExecutionResult {
        let mut context = context.clone();
        context.schema = Some(Arc::clone(&self.schema));
        self.collect_fragments(document, &mut context);

        let operation = match self.get_operation(document, &context.operation_name) {
            Ok(operation) => operation,
            Err(error) => {
                return ExecutionResult {
                    data: Some(JsonValue::Null),
                    errors: vec![error],
                }
            }
        };
        debug!(
            request_id = %context.request_id,
            operation = %operation.operation_type,
            "executing operation"
        );

        match self.coerce_variables(operation, &context.variables) {
            Ok(coerced) => context.variables = coerced,
            Err(error) => {
                return ExecutionResult {
                    data: Some(JsonValue::Null),
                    errors: vec![error],
                }
            }
        }

        let root = match self.root_object_type(operation.operation_type) {
            Ok(root) => root,
            Err(error) => {
                return ExecutionResult {
                    data: Some(JsonValue::Null),
                    errors: vec![error],
                }
            }
        };

        let mut errors = Vec::new();
        match self.execute_selection_set(
            &operation.selection_set,
            root,
            &Value::NullValue,
            &context,
            &mut errors,
        ) {
            Ok(data) => ExecutionResult {
                data: Some(JsonValue::Object(data)),
                errors,
            },
            Err(error) => {
                errors.push(error);
                ExecutionResult {
                    data: Some(JsonValue::Null),
                    errors,
                }
            }
        }
    }

    fn collect_fragments(&self, document: &Document, context: &mut ExecutionContext) {
        for definition in &document.definitions {
            if let Definition::Fragment(fragment) = definition {
                context.add_fragment(fragment.name.clone(), fragment.clone());
            }
        }
    }

    fn get_operation<'a>(
        &self,
        document: &'a Document,
        operation_name: &Option<String>,
    ) -> GraphQLResult<&'a OperationDefinition> {
        let operations: Vec<_> = document
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                Definition::Operation(operation) => Some(operation),
                _ => None,
            })
            .collect();

        match (operations.len(), operation_name) {
            (0, _) => Err(GraphQLError::execution("No operation found")),
            (1, None) => Ok(operations[0]),
            (_, Some(name)) => operations
                .iter()
                .find(|operation| operation.name.as_ref() == Some(name))
                .copied()
                .ok_or_else(|| GraphQLError::execution(format!("Operation '{name}' not found"))),
            (_, None) => Err(GraphQLError::execution(
                "Must provide operation name if query contains multiple operations",
            )),
        }
    }

    fn root_object_type(&self, operation_type: OperationType) -> GraphQLResult<&ObjectType> {
        let root_name = match operation_type {
            OperationType::Query => self.schema.query_type.as_ref(),
            OperationType::Mutation => self.schema.mutation_type.as_ref(),
            OperationType::Subscription => self.schema.subscription_type.as_ref(),
        }
        .ok_or_else(|| {
            GraphQLError::execution(format!("Schema does not support {operation_type}"))
        })?;

        match self.schema.get_type(root_name) {
            Some(GraphQLType::Object(object)) => Ok(object),
            _ => Err(GraphQLError::execution(format!(
                "Root type '{root_name}' is not an object type"
            ))),
        }
    }

    /// Coerces the request's variables against the operation's variable
    /// definitions. Missing nullable variables stay unset.
    fn coerce_variables(
        &self,
        operation: &OperationDefinition,
        provided: &HashMap<String, Value>,
    ) -> GraphQLResult<HashMap<String, Value>> {
        let mut coerced = HashMap::new();
        for definition in &operation.variable_definitions {
            let variable_type = graphql_type_from_ast(&definition.variable_type);
            if let Some(value) = provided.get(&definition.name) {
                let value = self
                    .coerce_input_value(value, &variable_type)
                    .map_err(|error| {
                        GraphQLError::execution(format!(
                            "Variable ${}: {}",
                            definition.name, error
                        ))
                    })?;
                coerced.insert(definition.name.clone(), value);
            } else if let Some(default) = &definition.default_value {
                let value = self
                    .coerce_literal_value(default, &variable_type)
                    .map_err(|error| {
                        GraphQLError::execution(format!(
                            "Variable ${}: {}",
                            definition.name, error
                        ))
                    })?;
                coerced.insert(definition.name.clone(), value);
            } else if !variable_type.is_nullable() {
                return Err(GraphQLError::execution(format!(
                    "Variable ${} is required but not provided",
                    definition.name
                )));
            }
        }
        Ok(coerced)
    }

    /// Runtime input coercion for externally supplied values.
    pub fn coerce_input_value(
        &self,
        value: &Value,
        target_type: &GraphQLType,
    ) -> anyhow::Result<Value> {
        let target_type = self
            .schema
            .resolve(target_type)
            .map_err(|error| anyhow::anyhow!("{error}"))?;
        match target_type {
            GraphQLType::NonNull(inner) => {
                if value.is_null() {
                    anyhow::bail!("Cannot coerce null to non-null type '{inner}!'");
                }
                self.coerce_input_value(value, inner)
            }
            _ if value.is_null() => Ok(Value::NullValue),
            GraphQLType::List(inner) => match value {
                Value::ListValue(items) => {
                    let coerced: anyhow::Result<Vec<Value>> = items
                        .iter()
                        .map(|item| self.coerce_input_value(item, inner))
                        .collect();
                    Ok(Value::ListValue(coerced?))
                }
                // Single values are lifted to one-element lists.
                other => Ok(Value::ListValue(vec![
                    self.coerce_input_value(other, inner)?
                ])),
            },
            GraphQLType::Scalar(scalar) => (scalar.parse_value)(value),
            GraphQLType::Enum(enum_type) => match value {
                Value::EnumValue(name) | Value::StringValue(name) => {
                    if enum_type.values.contains_key(name) {
                        Ok(Value::EnumValue(name.clone()))
                    } else {
                        anyhow::bail!(
                            "Invalid enum value '{name}' for enum type '{}'",
                            enum_type.name
                        )
                    }
                }
                other => anyhow::bail!(
                    "Cannot coerce {other:?} to enum type '{}'",
                    enum_type.name
                ),
            },
            GraphQLType::InputObject(input) => match value {
                Value::ObjectValue(provided_fields) => {
                    let mut coerced = IndexMap::new();
                    for (field_name, field_def) in &input.fields {
                        if let Some(provided) = provided_fields.get(field_name) {
                            coerced.insert(
                                field_name.clone(),
                                self.coerce_input_value(provided, &field_def.field_type)?,
                            );
                        } else if let Some(default) = &field_def.default_value {
                            coerced.insert(field_name.clone(), default.clone());
                        } else {
                            coerced.insert(field_name.clone(), Value::NullValue);
                        }
                    }
                    // Unknown input keys are ignored.
                    Ok(Value::ObjectValue(coerced))
                }
                other => anyhow::bail!(
                    "Expected input object for type '{}' but got {other:?}",
                    input.name
                ),
            },
            other => anyhow::bail!("Cannot use type '{}' as input", other.name()),
        }
    }

    /// Literal coercion for AST values (variable defaults).
    pub fn coerce_literal_value(
        &self,
        value: &Value,
        target_type: &GraphQLType,
    ) -> anyhow::Result<Value> {
        let target_type = self
            .schema
            .resolve(target_type)
            .map_err(|error| anyhow::anyhow!("{error}"))?;
        match target_type {
            GraphQLType::NonNull(inner) => {
                if value.is_null() {
                    anyhow::bail!("Cannot coerce null to non-null type '{inner}!'");
                }
                self.coerce_literal_value(value, inner)
            }
            _ if value.is_null() => Ok(Value::NullValue),
            GraphQLType::List(inner) => match value {
                Value::ListValue(items) => {
                    let coerced: anyhow::Result<Vec<Value>> = items
                        .iter()
                        .map(|item| self.coerce_literal_value(item, inner))
                        .collect();
                    Ok(Value::ListValue(coerced?))
                }
                other => Ok(Value::ListValue(vec![
                    self.coerce_literal_value(other, inner)?
                ])),
            },
            GraphQLType::Scalar(scalar) => (scalar.parse_literal)(value),
            GraphQLType::Enum(enum_type) => match value {
                Value::EnumValue(name) => {
                    if enum_type.values.contains_key(name) {
                        Ok(Value::EnumValue(name.clone()))
                    } else {
                        anyhow::bail!(
                            "Invalid enum value '{name}' for enum type '{}'",
                            enum_type.name
                        )
                    }
                }
                other => anyhow::bail!(
                    "Cannot coerce literal {other:?} to enum type '{}'",
                    enum_type.name
                ),
            },
            GraphQLType::InputObject(input) => match value {
                Value::ObjectValue(provided_fields) => {
                    let mut coerced = IndexMap::new();
                    for (field_name, field_def) in &input.fields {
                        if let Some(provided) = provided_fields.get(field_name) {
                            coerced.insert(
                                field_name.clone(),
                                self.coerce_literal_value(provided, &field_def.field_type)?,
                            );
                        } else if let Some(default) = &field_def.default_value {
                            coerced.insert(field_name.clone(), default.clone());
                        } else {
                            coerced.insert(field_name.clone(), Value::NullValue);
                        }
                    }
                    Ok(Value::ObjectValue(coerced))
                }
                other => anyhow::bail!(
                    "Expected input object literal for type '{}' but got {other:?}",
                    input.name
                ),
            },
            other => anyhow::bail!("Cannot use type '{}' as input", other.name()),
        }
    }

    fn execute_selection_set(
        &self,
        selection_set: &SelectionSet,
        object_type: &ObjectType,
        object_value: &Value,
        context: &ExecutionContext,
        errors: &mut Vec<GraphQLError>,
    ) -> GraphQLResult<JsonMap<String, JsonValue>> {
        let mut grouped: IndexMap<String, Vec<&Field>> = IndexMap::new();
        let mut visited_fragments = HashSet::new();
        self.collect_fields(
            selection_set,
            &object_type.name,
            context,
            &mut visited_fragments,
            &mut grouped,
        );

        let mut output = JsonMap::new();
        for (response_key, field_group) in grouped {
            let value =
                self.execute_field(object_type, object_value, &field_group, context, errors)?;
            output.insert(response_key, value);
        }
        Ok(output)
    }

    /// Flattens a selection set into response-key buckets, preserving
    /// first-appearance order and applying `@skip`/`@include`.
    ///
    /// Fragment spreads are recorded in the visited set but not
    /// flattened; spread resolution across definitions is out of scope.
    fn collect_fields<'d>(
        &self,
        selection_set: &'d SelectionSet,
        object_type_name: &str,
        context: &ExecutionContext,
        visited_fragments: &mut HashSet<String>,
        grouped: &mut IndexMap<String, Vec<&'d Field>>,
    ) {
        for selection in &selection_set.selections {
            match selection {
                Selection::Field(field) => {
                    if !self.should_include(&field.directives, context) {
                        continue;
                    }
                    grouped
                        .entry(field.response_key().to_string())
                        .or_default()
                        .push(field);
                }
                Selection::InlineFragment(inline) => {
                    if !self.should_include(&inline.directives, context) {
                        continue;
                    }
                    let applies = match &inline.type_condition {
                        Some(condition) => condition == object_type_name,
                        None => true,
                    };
                    if applies {
                        self.collect_fields(
                            &inline.selection_set,
                            object_type_name,
                            context,
                            visited_fragments,
                            grouped,
                        );
                    }
                }
                Selection::FragmentSpread(spread) => {
                    if !self.should_include(&spread.directives, context) {
                        continue;
                    }
                    visited_fragments.insert(spread.fragment_name.clone());
                }
            }
        }
    }

    /// A selection survives iff `include.if != false && skip.if != true`.
    fn should_include(&self, directives: &[Directive], context: &ExecutionContext) -> bool {
        let flag = |directive_name: &str| -> Option<bool> {
            let directive = directives.iter().find(|d| d.name == directive_name)?;
            let argument = directive.arguments.iter().find(|a| a.name == "if")?;
            let value = match &argument.value {
                Value::Variable(variable) => context.variables.get(&variable.name)?.clone(),
                other => other.clone(),
            };
            match value {
                Value::BooleanValue(b) => Some(b),
                _ => None,
            }
        };
        flag("include") != Some(false) && flag("skip") != Some(true)
    }

    fn execute_field(
        &self,
        parent_type: &ObjectType,
        parent_value: &Value,
        field_group: &[&Field],
        context: &ExecutionContext,
        errors: &mut Vec<GraphQLError>,
    ) -> GraphQLResult<JsonValue> {
        // The first field of the group is authoritative for arguments
        // and sub-selections.
        let field = field_group[0];

        if field.name == "__typename" {
            return Ok(JsonValue::String(parent_type.name.clone()));
        }

        let Some(field_def) = parent_type.fields.get(&field.name) else {
            return Ok(JsonValue::Null);
        };

        let arguments = match self.coerce_arguments(field, field_def, context) {
            Ok(arguments) => arguments,
            Err(error) => {
                return self.absorb_or_propagate(&field_def.field_type, error, errors);
            }
        };

        let resolved = match &field_def.resolver {
            Some(resolver) => resolver(parent_value, &arguments, context)
                .map_err(|error| GraphQLError::execution(error.to_string())),
            None => Ok(default_resolve(parent_value, &field.name)),
        };

        let resolved = match resolved {
            Ok(value) => value,
            Err(error) => {
                return self.absorb_or_propagate(&field_def.field_type, error, errors);
            }
        };

        match self.complete_value(
            &field_def.field_type,
            &resolved,
            &field.selection_set,
            context,
            errors,
        ) {
            Ok(value) => Ok(value),
            Err(error) => self.absorb_or_propagate(&field_def.field_type, error, errors),
        }
    }

    /// A nullable field absorbs a failure as `null`; a non-null field
    /// propagates it to the enclosing selection.
    fn absorb_or_propagate(
        &self,
        field_type: &GraphQLType,
        error: GraphQLError,
        errors: &mut Vec<GraphQLError>,
    ) -> GraphQLResult<JsonValue> {
        if field_type.is_nullable() {
            errors.push(error);
            Ok(JsonValue::Null)
        } else {
            Err(error)
        }
    }

    fn coerce_arguments(
        &self,
        field: &Field,
        field_def: &crate::types::FieldType,
        context: &ExecutionContext,
    ) -> GraphQLResult<HashMap<String, Value>> {
        let mut arguments = HashMap::new();
        for argument in &field.arguments {
            match &argument.value {
                Value::Variable(variable) => {
                    // Unset variables fall through to the argument default.
                    if let Some(value) = context.variables.get(&variable.name) {
                        arguments.insert(argument.name.clone(), value.clone());
                    }
                }
                other => {
                    arguments.insert(
                        argument.name.clone(),
                        self.resolve_value(other, context)?,
                    );
                }
            }
        }
        for (argument_name, argument_def) in &field_def.arguments {
            if !arguments.contains_key(argument_name) {
                if let Some(default) = &argument_def.default_value {
                    arguments.insert(argument_name.clone(), default.clone());
                }
            }
        }
        Ok(arguments)
    }

    /// Substitutes variables inside a literal value.
    fn resolve_value(&self, value: &Value, context: &ExecutionContext) -> GraphQLResult<Value> {
        match value {
            Value::Variable(variable) => context
                .variables
                .get(&variable.name)
                .cloned()
                .ok_or_else(|| {
                    GraphQLError::execution(format!(
                        "Variable '${}' is not defined",
                        variable.name
                    ))
                }),
            Value::ListValue(items) => {
                let resolved: GraphQLResult<Vec<Value>> = items
                    .iter()
                    .map(|item| self.resolve_value(item, context))
                    .collect();
                Ok(Value::ListValue(resolved?))
            }
            Value::ObjectValue(fields) => {
                let mut resolved = IndexMap::new();
                for (name, item) in fields {
                    resolved.insert(name.clone(), self.resolve_value(item, context)?);
                }
                Ok(Value::ObjectValue(resolved))
            }
            other => Ok(other.clone()),
        }
    }

    fn complete_value(
        &self,
        field_type: &GraphQLType,
        value: &Value,
        selection_set: &Option<SelectionSet>,
        context: &ExecutionContext,
        errors: &mut Vec<GraphQLError>,
    ) -> GraphQLResult<JsonValue> {
        let field_type = self.schema.resolve(field_type)?;
        match field_type {
            GraphQLType::NonNull(inner) => {
                let completed =
                    self.complete_value(inner, value, selection_set, context, errors)?;
                if completed.is_null() {
                    Err(GraphQLError::execution(
                        "Cannot return null for non-null field",
                    ))
                } else {
                    Ok(completed)
                }
            }
            _ if value.is_null() => Ok(JsonValue::Null),
            GraphQLType::List(inner) => match value {
                Value::ListValue(items) => {
                    let mut completed = Vec::with_capacity(items.len());
                    for item in items {
                        match self.complete_value(inner, item, selection_set, context, errors) {
                            Ok(value) => completed.push(value),
                            Err(error) => {
                                // A failed non-null element collapses the
                                // whole list; nullable elements degrade
                                // individually.
                                if inner.is_nullable() {
                                    errors.push(error);
                                    completed.push(JsonValue::Null);
                                } else {
                                    return Err(error);
                                }
                            }
                        }
                    }
                    Ok(JsonValue::Array(completed))
                }
                other => Err(GraphQLError::execution(format!(
                    "Expected list but got {other:?}"
                ))),
            },
            GraphQLType::Scalar(scalar) => {
                let serialized = (scalar.serialize)(value)
                    .map_err(|error| GraphQLError::execution(error.to_string()))?;
                Ok(serialized.to_json())
            }
            GraphQLType::Enum(enum_type) => match value {
                Value::EnumValue(name) | Value::StringValue(name) => {
                    if enum_type.values.contains_key(name) {
                        Ok(JsonValue::String(name.clone()))
                    } else {
                        Err(GraphQLError::execution(format!(
                            "Invalid enum value '{name}' for enum type '{}'",
                            enum_type.name
                        )))
                    }
                }
                other => Err(GraphQLError::execution(format!(
                    "Cannot coerce {other:?} to enum type '{}'",
                    enum_type.name
                ))),
            },
            GraphQLType::Object(object) => {
                let Some(selection_set) = selection_set else {
                    return Err(GraphQLError::execution(format!(
                        "Selection set required for object type '{}'",
                        object.name
                    )));
                };
                let completed =
                    self.execute_selection_set(selection_set, object, value, context, errors)?;
                Ok(JsonValue::Object(completed))
            }
            GraphQLType::Interface(_) | GraphQLType::Union(_) => {
                let concrete = self.resolve_abstract_type(field_type, value)?;
                let Some(selection_set) = selection_set else {
                    return Err(GraphQLError::execution(format!(
                        "Selection set required for abstract type '{}'",
                        field_type.name()
                    )));
                };
                let completed =
                    self.execute_selection_set(selection_set, concrete, value, context, errors)?;
                Ok(JsonValue::Object(completed))
            }
            GraphQLType::InputObject(input) => Err(GraphQLError::execution(format!(
                "Input object type '{}' cannot be used as an output type",
                input.name
            ))),
            // resolve() above eliminates Named references.
            GraphQLType::Named(name) => Err(GraphQLError::execution(format!(
                "Unresolved type reference '{name}'"
            ))),
        }
    }

    /// Determines the concrete object type of an interface or union
    /// value, via the registered `resolve_type` callback or a
    /// `__typename` tag embedded in the value.
    fn resolve_abstract_type(
        &self,
        abstract_type: &GraphQLType,
        value: &Value,
    ) -> GraphQLResult<&ObjectType> {
        let (type_name, resolver) = match abstract_type {
            GraphQLType::Interface(interface) => (&interface.name, interface.resolve_type),
            GraphQLType::Union(union_type) => (&union_type.name, union_type.resolve_type),
            other => {
                return Err(GraphQLError::execution(format!(
                    "Type '{}' is not abstract",
                    other.name()
                )))
            }
        };

        let concrete_name = resolver
            .and_then(|resolve| resolve(value))
            .or_else(|| match value.get("__typename") {
                Some(Value::StringValue(name)) => Some(name.clone()),
                _ => None,
            })
            .ok_or_else(|| {
                GraphQLError::execution(format!(
                    "Could not resolve concrete type for abstract type '{type_name}'"
                ))
            })?;

        let member_of = match abstract_type {
            GraphQLType::Union(union_type) => union_type.types.contains(&concrete_name),
            GraphQLType::Interface(interface) => match self.schema.get_type(&concrete_name) {
                Some(GraphQLType::Object(object)) => {
                    object.interfaces.contains(&interface.name)
                }
                _ => false,
            },
            _ => false,
        };
        if !member_of {
            return Err(GraphQLError::execution(format!(
                "Type '{concrete_name}' is not a possible type of '{type_name}'"
            )));
        }

        match self.schema.get_type(&concrete_name) {
            Some(GraphQLType::Object(object)) => Ok(object),
            _ => Err(GraphQLError::execution(format!(
                "Unknown type '{concrete_name}'"
            ))),
        }
    }
}

/// Default resolver: reads the field's key from an object value.
fn default_resolve(parent_value: &Value, field_name: &str) -> Value {
    parent_value
        .get(field_name)
        .cloned()
        .unwrap_or(Value::NullValue)
}

/// Maps a document type reference onto the schema's representation.
fn graphql_type_from_ast(ast_type: &Type) -> GraphQLType {
    match ast_type {
        Type::Named(name) => GraphQLType::named(name.clone()),
        Type::List(inner) => GraphQLType::list(graphql_type_from_ast(inner)),
        Type::NonNull(inner) => GraphQLType::non_null(graphql_type_from_ast(inner)),
    }
}
