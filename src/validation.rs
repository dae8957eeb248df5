//! Request validation
//!
//! Checks a parsed document against the schema before execution. The
//! validator never fails early: it walks the whole document, accumulates
//! `Validation` errors in document order and returns the list. A
//! non-empty list suppresses execution.
//!
//! Fragment spreads are collected by the executor but not flattened, so
//! their selection sets are validated only at their definition site.

use crate::ast::{
    Definition, Document, Field, OperationDefinition, OperationType, Selection, SelectionSet,
};
use crate::error::GraphQLError;
use crate::types::{GraphQLType, Schema};
use tracing::debug;

pub struct Validator<'a> {
    schema: &'a Schema,
    errors: Vec<GraphQLError>,
}

/// Introspection fields resolvable on any composite parent.
fn is_universal_introspection_field(name: &str) -> bool {
    name == "__typename"
}

impl<'a> Validator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            errors: Vec::new(),
        }
    }

    /// Runs every rule and returns the accumulated errors.
    pub fn validate(mut self, document: &Document) -> Vec<GraphQLError> {
        for definition in &document.definitions {
            match definition {
                Definition::Operation(operation) => self.validate_operation(operation),
                Definition::Fragment(fragment) => {
                    match self.schema.get_type(&fragment.type_condition) {
                        Some(condition_type) => {
                            let condition_type = condition_type.clone();
                            self.validate_selection_set(&fragment.selection_set, &condition_type);
                        }
                        None => self.error(format!(
                            "Unknown type '{}' in fragment '{}'",
                            fragment.type_condition, fragment.name
                        )),
                    }
                }
            }
        }
        debug!(errors = self.errors.len(), "validation finished");
        self.errors
    }

    fn error(&mut self, message: String) {
        self.errors.push(GraphQLError::validation(message));
    }

    fn root_type_name(&self, operation_type: OperationType) -> Option<&'a String> {
        match operation_type {
            OperationType::Query => self.schema.query_type.as_ref(),
            OperationType::Mutation => self.schema.mutation_type.as_ref(),
            OperationType::Subscription => self.schema.subscription_type.as_ref(),
        }
    }

    fn validate_operation(&mut self, operation: &OperationDefinition) {
        for variable in &operation.variable_definitions {
            let named = variable.variable_type.name();
            if self.schema.get_type(named).is_none() {
                self.error(format!(
                    "Unknown type '{}' for variable '${}'",
                    named, variable.name
                ));
            }
        }

        let Some(root_name) = self.root_type_name(operation.operation_type) else {
            self.error(format!(
                "Schema does not support {}",
                operation.operation_type
            ));
            return;
        };
        let Some(root_type) = self.schema.get_type(root_name) else {
            self.error(format!("Unknown type '{root_name}'"));
            return;
        };
        let root_type = root_type.clone();
        self.validate_selection_set(&operation.selection_set, &root_type);
    }

    fn validate_selection_set(&mut self, selection_set: &SelectionSet, parent_type: &GraphQLType) {
        for selection in &selection_set.selections {
            match selection {
                Selection::Field(field) => self.validate_field(field, parent_type),
                Selection::InlineFragment(inline) => {
                    let condition_type = match &inline.type_condition {
                        Some(condition) => match self.schema.get_type(condition) {
                            Some(t) => t.clone(),
                            None => {
                                self.error(format!(
                                    "Unknown type '{condition}' in inline fragment"
                                ));
                                continue;
                            }
                        },
                        None => parent_type.clone(),
                    };
                    self.validate_selection_set(&inline.selection_set, &condition_type);
                }
                Selection::FragmentSpread(_) => {}
            }
        }
    }

    fn validate_field(&mut self, field: &Field, parent_type: &GraphQLType) {
        if is_universal_introspection_field(&field.name) {
            return;
        }

        let field_def = match parent_type {
            GraphQLType::Object(object) => object.fields.get(&field.name),
            GraphQLType::Interface(interface) => interface.fields.get(&field.name),
            GraphQLType::Union(union_type) => {
                self.error(format!(
                    "Cannot select field '{}' on union type '{}'; use an inline fragment",
                    field.name, union_type.name
                ));
                return;
            }
            other => {
                self.error(format!(
                    "Cannot select field '{}' on non-composite type '{}'",
                    field.name,
                    other.name()
                ));
                return;
            }
        };

        let Some(field_def) = field_def else {
            self.error(format!(
                "Field '{}' does not exist on type '{}'",
                field.name,
                parent_type.name()
            ));
            return;
        };

        for argument in &field.arguments {
            if !field_def.arguments.contains_key(&argument.name) {
                self.error(format!(
                    "Unknown argument '{}' on field '{}' of type '{}'",
                    argument.name,
                    field.name,
                    parent_type.name()
                ));
            }
        }
        for (argument_name, argument_def) in &field_def.arguments {
            let required = !argument_def.argument_type.is_nullable();
            let provided = field.arguments.iter().any(|a| &a.name == argument_name);
            if required && !provided {
                self.error(format!(
                    "Missing required argument '{}' on field '{}'",
                    argument_name, field.name
                ));
            }
        }

        let field_type = field_def.field_type.clone();
        let unwrapped = match self.schema.resolve(field_type.unwrapped()) {
            Ok(t) => t.clone(),
            Err(_) => {
                // finish() guarantees this for host schemas; guard anyway.
                self.error(format!("Unknown type '{}'", field_type.unwrapped().name()));
                return;
            }
        };

        let is_composite = matches!(
            unwrapped,
            GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_)
        );
        match (&field.selection_set, is_composite) {
            (None, true) => self.error(format!(
                "Field '{}' of type '{}' must have a selection set",
                field.name, field_type
            )),
            (Some(_), false) => self.error(format!(
                "Field '{}' of type '{}' must not have a selection set",
                field.name, field_type
            )),
            (Some(selection_set), true) => {
                self.validate_selection_set(selection_set, &unwrapped);
            }
            (None, false) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::types::{ArgumentType, FieldType, ObjectType};

    fn test_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Object(
                ObjectType::new("User")
                    .with_field(FieldType::new(
                        "id",
                        GraphQLType::non_null(GraphQLType::named("ID")),
                    ))
                    .with_field(FieldType::new("name", GraphQLType::named("String"))),
            ))
            .unwrap();
        schema
            .add_type(GraphQLType::Object(
                ObjectType::new("Query")
                    .with_field(FieldType::new("hello", GraphQLType::named("String")))
                    .with_field(FieldType::new("user", GraphQLType::named("User")))
                    .with_field(
                        FieldType::new("lookup", GraphQLType::named("User")).with_argument(
                            ArgumentType::new(
                                "id",
                                GraphQLType::non_null(GraphQLType::named("ID")),
                            ),
                        ),
                    ),
            ))
            .unwrap();
        schema.set_query_type("Query");
        schema.finish().unwrap()
    }

    fn errors_for(query: &str) -> Vec<String> {
        let schema = test_schema();
        let document = Parser::parse(query).unwrap();
        Validator::new(&schema)
            .validate(&document)
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn accepts_valid_query() {
        assert!(errors_for("{ hello user { id name } }").is_empty());
    }

    #[test]
    fn reports_unknown_field() {
        let errors = errors_for("{ goodbye }");
        assert_eq!(
            errors,
            vec!["Field 'goodbye' does not exist on type 'Query'"]
        );
    }

    #[test]
    fn reports_missing_mutation_root() {
        let errors = errors_for("mutation { createUser }");
        assert_eq!(errors, vec!["Schema does not support mutation"]);
    }

    #[test]
    fn reports_unknown_variable_type() {
        let errors = errors_for("query Q($input: Missing) { hello }");
        assert_eq!(errors, vec!["Unknown type 'Missing' for variable '$input'"]);
    }

    #[test]
    fn reports_unknown_argument() {
        let errors = errors_for("{ hello(loud: true) }");
        assert_eq!(
            errors,
            vec!["Unknown argument 'loud' on field 'hello' of type 'Query'"]
        );
    }

    #[test]
    fn reports_missing_required_argument() {
        let errors = errors_for("{ lookup { id } }");
        assert_eq!(
            errors,
            vec!["Missing required argument 'id' on field 'lookup'"]
        );
    }

    #[test]
    fn requires_selection_set_on_composite_fields() {
        let errors = errors_for("{ user }");
        assert_eq!(
            errors,
            vec!["Field 'user' of type 'User' must have a selection set"]
        );
    }

    #[test]
    fn forbids_selection_set_on_leaf_fields() {
        let errors = errors_for("{ hello { length } }");
        assert_eq!(
            errors,
            vec!["Field 'hello' of type 'String' must not have a selection set"]
        );
    }

    #[test]
    fn allows_typename_everywhere_and_schema_at_root() {
        assert!(errors_for("{ __typename user { __typename } }").is_empty());
        assert!(errors_for("{ __schema { queryType { name } } }").is_empty());
        assert!(errors_for("{ __type(name: \"User\") { name } }").is_empty());
    }

    #[test]
    fn rejects_schema_field_off_root() {
        let errors = errors_for("{ user { __schema { types { name } } } }");
        assert_eq!(
            errors,
            vec!["Field '__schema' does not exist on type 'User'"]
        );
    }

    #[test]
    fn validates_fragment_definitions_against_their_condition() {
        let errors = errors_for("fragment f on User { missing } { hello }");
        assert_eq!(errors, vec!["Field 'missing' does not exist on type 'User'"]);

        let errors = errors_for("fragment f on Ghost { id } { hello }");
        assert_eq!(errors, vec!["Unknown type 'Ghost' in fragment 'f'"]);
    }

    #[test]
    fn validates_inline_fragment_conditions() {
        let errors = errors_for("{ user { ... on Ghost { id } } }");
        assert_eq!(errors, vec!["Unknown type 'Ghost' in inline fragment"]);
        assert!(errors_for("{ user { ... on User { id } } }").is_empty());
    }

    #[test]
    fn accumulates_multiple_errors_in_order() {
        let errors = errors_for("{ goodbye farewell }");
        assert_eq!(
            errors,
            vec![
                "Field 'goodbye' does not exist on type 'Query'",
                "Field 'farewell' does not exist on type 'Query'"
            ]
        );
    }
}
