//! Schema introspection overlay
//!
//! Registers the `__Schema`, `__Type`, `__Field`, `__InputValue`,
//! `__EnumValue`, `__Directive`, `__TypeKind` and `__DirectiveLocation`
//! meta types and attaches `__schema` / `__type` fields to the query
//! root. Introspection values are ordinary `ObjectValue`s carrying a
//! `__meta` tag plus the type notation they describe, so they complete
//! through the regular executor: aliases, directives and response
//! ordering need no special casing. `__typename` is answered directly by
//! the executor.

use crate::ast::Value;
use crate::error::GraphQLResult;
use crate::execution::ExecutionContext;
use crate::types::{
    ArgumentType, DirectiveType, EnumType, EnumValue, FieldType, GraphQLType, InputFieldType,
    ObjectType, Schema,
};
use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use std::collections::HashMap;

const TYPE_KINDS: [&str; 8] = [
    "SCALAR",
    "OBJECT",
    "INTERFACE",
    "UNION",
    "ENUM",
    "INPUT_OBJECT",
    "LIST",
    "NON_NULL",
];

const DIRECTIVE_LOCATIONS: [&str; 18] = [
    "QUERY",
    "MUTATION",
    "SUBSCRIPTION",
    "FIELD",
    "FRAGMENT_DEFINITION",
    "FRAGMENT_SPREAD",
    "INLINE_FRAGMENT",
    "SCHEMA",
    "SCALAR",
    "OBJECT",
    "FIELD_DEFINITION",
    "ARGUMENT_DEFINITION",
    "INTERFACE",
    "UNION",
    "ENUM",
    "ENUM_VALUE",
    "INPUT_OBJECT",
    "INPUT_FIELD_DEFINITION",
];

/// Registers the introspection types and attaches the `__schema` and
/// `__type` entry points. Runs as the first step of `Schema::finish`;
/// calling it twice is a no-op.
pub fn install(schema: &mut Schema) -> GraphQLResult<()> {
    if schema.types.contains_key("__Schema") {
        return Ok(());
    }

    schema.add_type(GraphQLType::Enum(type_kind_enum()))?;
    schema.add_type(GraphQLType::Enum(directive_location_enum()))?;
    schema.add_type(GraphQLType::Object(schema_meta_type()))?;
    schema.add_type(GraphQLType::Object(type_meta_type()))?;
    schema.add_type(GraphQLType::Object(field_meta_type()))?;
    schema.add_type(GraphQLType::Object(input_value_meta_type()))?;
    schema.add_type(GraphQLType::Object(enum_value_meta_type()))?;
    schema.add_type(GraphQLType::Object(directive_meta_type()))?;

    if let Some(root_name) = schema.query_type.clone() {
        if let Some(GraphQLType::Object(root)) = schema.types.get_mut(&root_name) {
            let schema_field = FieldType::new(
                "__schema",
                GraphQLType::non_null(GraphQLType::named("__Schema")),
            )
            .with_resolver(|_, _, _| Ok(tag("schema", &[])));
            let type_field = FieldType::new("__type", GraphQLType::named("__Type"))
                .with_argument(ArgumentType::new(
                    "name",
                    GraphQLType::non_null(GraphQLType::named("String")),
                ))
                .with_resolver(resolve_type_by_name);
            root.fields.insert("__schema".to_string(), schema_field);
            root.fields.insert("__type".to_string(), type_field);
        }
    }

    Ok(())
}

fn resolve_type_by_name(
    _parent: &Value,
    args: &HashMap<String, Value>,
    context: &ExecutionContext,
) -> Result<Value> {
    let schema = required_schema(context)?;
    let Some(Value::StringValue(name)) = args.get("name") else {
        anyhow::bail!("__type requires a 'name' argument");
    };
    if schema.get_type(name).is_some() {
        Ok(type_tag(name.clone()))
    } else {
        Ok(Value::NullValue)
    }
}

fn required_schema(context: &ExecutionContext) -> Result<&Schema> {
    context
        .schema()
        .ok_or_else(|| anyhow!("no schema attached to the execution context"))
}

// Tagged value constructors. The executor's default resolver reads the
// untagged keys directly; only computed fields carry resolvers.

fn tag(meta: &str, entries: &[(&str, Value)]) -> Value {
    let mut fields = IndexMap::new();
    fields.insert(
        "__meta".to_string(),
        Value::StringValue(meta.to_string()),
    );
    for (name, value) in entries {
        fields.insert(name.to_string(), value.clone());
    }
    Value::ObjectValue(fields)
}

fn type_tag(notation: String) -> Value {
    tag("type", &[("notation", Value::StringValue(notation))])
}

fn optional_string(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::StringValue(text.clone()),
        None => Value::NullValue,
    }
}

fn field_tag(field: &FieldType) -> Value {
    let args = field
        .arguments
        .values()
        .map(|argument| {
            input_value_tag(
                &argument.name,
                &argument.description,
                &argument.argument_type,
                argument.default_value.as_ref(),
            )
        })
        .collect();
    tag(
        "field",
        &[
            ("name", Value::StringValue(field.name.clone())),
            ("description", optional_string(&field.description)),
            ("notation", Value::StringValue(field.field_type.to_string())),
            ("args", Value::ListValue(args)),
            (
                "isDeprecated",
                Value::BooleanValue(field.deprecated.is_some()),
            ),
            ("deprecationReason", optional_string(&field.deprecated)),
        ],
    )
}

fn input_value_tag(
    name: &str,
    description: &Option<String>,
    value_type: &GraphQLType,
    default_value: Option<&Value>,
) -> Value {
    let rendered_default = match default_value {
        Some(value) => Value::StringValue(value.to_string()),
        None => Value::NullValue,
    };
    tag(
        "input_value",
        &[
            ("name", Value::StringValue(name.to_string())),
            ("description", optional_string(description)),
            ("notation", Value::StringValue(value_type.to_string())),
            ("defaultValue", rendered_default),
        ],
    )
}

fn input_field_tag(field: &InputFieldType) -> Value {
    input_value_tag(
        &field.name,
        &field.description,
        &field.field_type,
        field.default_value.as_ref(),
    )
}

fn enum_value_tag(value: &EnumValue) -> Value {
    tag(
        "enum_value",
        &[
            ("name", Value::StringValue(value.name.clone())),
            ("description", optional_string(&value.description)),
            (
                "isDeprecated",
                Value::BooleanValue(value.deprecated.is_some()),
            ),
            ("deprecationReason", optional_string(&value.deprecated)),
        ],
    )
}

fn directive_tag(directive: &DirectiveType) -> Value {
    let locations = directive
        .locations
        .iter()
        .map(|location| Value::EnumValue(location.as_str().to_string()))
        .collect();
    let args = directive
        .arguments
        .values()
        .map(|argument| {
            input_value_tag(
                &argument.name,
                &argument.description,
                &argument.argument_type,
                argument.default_value.as_ref(),
            )
        })
        .collect();
    tag(
        "directive",
        &[
            ("name", Value::StringValue(directive.name.clone())),
            ("description", optional_string(&directive.description)),
            ("locations", Value::ListValue(locations)),
            ("args", Value::ListValue(args)),
        ],
    )
}

// Notation helpers. A type tag carries the GraphQL notation of the type
// it describes, e.g. `[User!]!`; wrappers peel one layer per `ofType`.

fn notation_of(parent: &Value) -> Result<&str> {
    match parent.get("notation") {
        Some(Value::StringValue(notation)) => Ok(notation),
        _ => Err(anyhow!("introspection value is missing its type notation")),
    }
}

enum NotationShape<'a> {
    NonNull(&'a str),
    List(&'a str),
    Named(&'a str),
}

fn shape(notation: &str) -> NotationShape<'_> {
    if let Some(inner) = notation.strip_suffix('!') {
        NotationShape::NonNull(inner)
    } else if notation.starts_with('[') && notation.ends_with(']') {
        NotationShape::List(&notation[1..notation.len() - 1])
    } else {
        NotationShape::Named(notation)
    }
}

fn named_definition<'a>(schema: &'a Schema, notation: &str) -> Result<Option<&'a GraphQLType>> {
    match shape(notation) {
        NotationShape::Named(name) => schema
            .get_type(name)
            .ok_or_else(|| anyhow!("Unknown type '{name}'"))
            .map(Some),
        _ => Ok(None),
    }
}

fn include_deprecated(args: &HashMap<String, Value>) -> bool {
    matches!(args.get("includeDeprecated"), Some(Value::BooleanValue(true)))
}

// Meta type definitions.

fn type_kind_enum() -> EnumType {
    let mut kind = EnumType::new("__TypeKind")
        .with_description("An enum describing what kind of type a given `__Type` is.");
    for name in TYPE_KINDS {
        kind = kind.with_value(EnumValue::new(name));
    }
    kind
}

fn directive_location_enum() -> EnumType {
    let mut location = EnumType::new("__DirectiveLocation").with_description(
        "A Directive can be adjacent to many parts of the GraphQL language, a \
         __DirectiveLocation describes one such possible adjacencies.",
    );
    for name in DIRECTIVE_LOCATIONS {
        location = location.with_value(EnumValue::new(name));
    }
    location
}

fn schema_meta_type() -> ObjectType {
    ObjectType::new("__Schema")
        .with_description(
            "A GraphQL Schema defines the capabilities of a GraphQL server. It exposes all \
             available types and directives on the server, as well as the entry points for \
             query, mutation, and subscription operations.",
        )
        .with_field(
            FieldType::new(
                "types",
                GraphQLType::non_null(GraphQLType::list(GraphQLType::non_null(
                    GraphQLType::named("__Type"),
                ))),
            )
            .with_description("A list of all types supported by this server.")
            .with_resolver(|_, _, context| {
                let schema = required_schema(context)?;
                Ok(Value::ListValue(
                    schema
                        .types
                        .keys()
                        .map(|name| type_tag(name.clone()))
                        .collect(),
                ))
            }),
        )
        .with_field(
            FieldType::new(
                "queryType",
                GraphQLType::non_null(GraphQLType::named("__Type")),
            )
            .with_description("The type that query operations will be rooted at.")
            .with_resolver(|_, _, context| {
                let schema = required_schema(context)?;
                schema
                    .query_type
                    .clone()
                    .map(type_tag)
                    .ok_or_else(|| anyhow!("schema has no query type"))
            }),
        )
        .with_field(
            FieldType::new("mutationType", GraphQLType::named("__Type"))
                .with_resolver(|_, _, context| {
                    let schema = required_schema(context)?;
                    Ok(schema
                        .mutation_type
                        .clone()
                        .map(type_tag)
                        .unwrap_or(Value::NullValue))
                }),
        )
        .with_field(
            FieldType::new("subscriptionType", GraphQLType::named("__Type"))
                .with_resolver(|_, _, context| {
                    let schema = required_schema(context)?;
                    Ok(schema
                        .subscription_type
                        .clone()
                        .map(type_tag)
                        .unwrap_or(Value::NullValue))
                }),
        )
        .with_field(
            FieldType::new(
                "directives",
                GraphQLType::non_null(GraphQLType::list(GraphQLType::non_null(
                    GraphQLType::named("__Directive"),
                ))),
            )
            .with_description("A list of all directives supported by this server.")
            .with_resolver(|_, _, context| {
                let schema = required_schema(context)?;
                Ok(Value::ListValue(
                    schema.directives.values().map(directive_tag).collect(),
                ))
            }),
        )
}

fn type_meta_type() -> ObjectType {
    ObjectType::new("__Type")
        .with_field(
            FieldType::new(
                "kind",
                GraphQLType::non_null(GraphQLType::named("__TypeKind")),
            )
            .with_resolver(|parent, _, context| {
                let schema = required_schema(context)?;
                let notation = notation_of(parent)?;
                let kind = match shape(notation) {
                    NotationShape::NonNull(_) => "NON_NULL",
                    NotationShape::List(_) => "LIST",
                    NotationShape::Named(name) => match schema.get_type(name) {
                        Some(GraphQLType::Scalar(_)) => "SCALAR",
                        Some(GraphQLType::Object(_)) => "OBJECT",
                        Some(GraphQLType::Interface(_)) => "INTERFACE",
                        Some(GraphQLType::Union(_)) => "UNION",
                        Some(GraphQLType::Enum(_)) => "ENUM",
                        Some(GraphQLType::InputObject(_)) => "INPUT_OBJECT",
                        _ => anyhow::bail!("Unknown type '{name}'"),
                    },
                };
                Ok(Value::EnumValue(kind.to_string()))
            }),
        )
        .with_field(
            FieldType::new("name", GraphQLType::named("String")).with_resolver(
                |parent, _, _| {
                    let notation = notation_of(parent)?;
                    Ok(match shape(notation) {
                        NotationShape::Named(name) => Value::StringValue(name.to_string()),
                        _ => Value::NullValue,
                    })
                },
            ),
        )
        .with_field(
            FieldType::new("description", GraphQLType::named("String")).with_resolver(
                |parent, _, context| {
                    let schema = required_schema(context)?;
                    let description = match named_definition(schema, notation_of(parent)?)? {
                        Some(GraphQLType::Scalar(s)) => s.description.clone(),
                        Some(GraphQLType::Object(o)) => o.description.clone(),
                        Some(GraphQLType::Interface(i)) => i.description.clone(),
                        Some(GraphQLType::Union(u)) => u.description.clone(),
                        Some(GraphQLType::Enum(e)) => e.description.clone(),
                        Some(GraphQLType::InputObject(io)) => io.description.clone(),
                        _ => None,
                    };
                    Ok(optional_string(&description))
                },
            ),
        )
        .with_field(
            FieldType::new(
                "fields",
                GraphQLType::list(GraphQLType::non_null(GraphQLType::named("__Field"))),
            )
            .with_argument(ArgumentType::new(
                "includeDeprecated",
                GraphQLType::named("Boolean"),
            ))
            .with_resolver(|parent, args, context| {
                let schema = required_schema(context)?;
                let fields = match named_definition(schema, notation_of(parent)?)? {
                    Some(GraphQLType::Object(object)) => &object.fields,
                    Some(GraphQLType::Interface(interface)) => &interface.fields,
                    _ => return Ok(Value::NullValue),
                };
                let with_deprecated = include_deprecated(args);
                Ok(Value::ListValue(
                    fields
                        .values()
                        .filter(|field| !field.name.starts_with("__"))
                        .filter(|field| with_deprecated || field.deprecated.is_none())
                        .map(field_tag)
                        .collect(),
                ))
            }),
        )
        .with_field(
            FieldType::new(
                "interfaces",
                GraphQLType::list(GraphQLType::non_null(GraphQLType::named("__Type"))),
            )
            .with_resolver(|parent, _, context| {
                let schema = required_schema(context)?;
                match named_definition(schema, notation_of(parent)?)? {
                    Some(GraphQLType::Object(object)) => Ok(Value::ListValue(
                        object
                            .interfaces
                            .iter()
                            .map(|name| type_tag(name.clone()))
                            .collect(),
                    )),
                    _ => Ok(Value::NullValue),
                }
            }),
        )
        .with_field(
            FieldType::new(
                "possibleTypes",
                GraphQLType::list(GraphQLType::non_null(GraphQLType::named("__Type"))),
            )
            .with_resolver(|parent, _, context| {
                let schema = required_schema(context)?;
                match named_definition(schema, notation_of(parent)?)? {
                    Some(GraphQLType::Union(union_type)) => Ok(Value::ListValue(
                        union_type
                            .types
                            .iter()
                            .map(|name| type_tag(name.clone()))
                            .collect(),
                    )),
                    Some(GraphQLType::Interface(interface)) => {
                        let implementors = schema
                            .types
                            .values()
                            .filter_map(|candidate| match candidate {
                                GraphQLType::Object(object)
                                    if object.interfaces.contains(&interface.name) =>
                                {
                                    Some(type_tag(object.name.clone()))
                                }
                                _ => None,
                            })
                            .collect();
                        Ok(Value::ListValue(implementors))
                    }
                    _ => Ok(Value::NullValue),
                }
            }),
        )
        .with_field(
            FieldType::new(
                "enumValues",
                GraphQLType::list(GraphQLType::non_null(GraphQLType::named("__EnumValue"))),
            )
            .with_argument(ArgumentType::new(
                "includeDeprecated",
                GraphQLType::named("Boolean"),
            ))
            .with_resolver(|parent, args, context| {
                let schema = required_schema(context)?;
                match named_definition(schema, notation_of(parent)?)? {
                    Some(GraphQLType::Enum(enum_type)) => {
                        let with_deprecated = include_deprecated(args);
                        Ok(Value::ListValue(
                            enum_type
                                .values
                                .values()
                                .filter(|value| with_deprecated || value.deprecated.is_none())
                                .map(enum_value_tag)
                                .collect(),
                        ))
                    }
                    _ => Ok(Value::NullValue),
                }
            }),
        )
        .with_field(
            FieldType::new(
                "inputFields",
                GraphQLType::list(GraphQLType::non_null(GraphQLType::named("__InputValue"))),
            )
            .with_resolver(|parent, _, context| {
                let schema = required_schema(context)?;
                match named_definition(schema, notation_of(parent)?)? {
                    Some(GraphQLType::InputObject(input)) => Ok(Value::ListValue(
                        input.fields.values().map(input_field_tag).collect(),
                    )),
                    _ => Ok(Value::NullValue),
                }
            }),
        )
        .with_field(
            FieldType::new("ofType", GraphQLType::named("__Type")).with_resolver(
                |parent, _, _| {
                    let notation = notation_of(parent)?;
                    Ok(match shape(notation) {
                        NotationShape::NonNull(inner) | NotationShape::List(inner) => {
                            type_tag(inner.to_string())
                        }
                        NotationShape::Named(_) => Value::NullValue,
                    })
                },
            ),
        )
}

fn field_meta_type() -> ObjectType {
    ObjectType::new("__Field")
        .with_field(FieldType::new(
            "name",
            GraphQLType::non_null(GraphQLType::named("String")),
        ))
        .with_field(FieldType::new("description", GraphQLType::named("String")))
        .with_field(FieldType::new(
            "args",
            GraphQLType::non_null(GraphQLType::list(GraphQLType::non_null(
                GraphQLType::named("__InputValue"),
            ))),
        ))
        .with_field(
            FieldType::new("type", GraphQLType::non_null(GraphQLType::named("__Type")))
                .with_resolver(|parent, _, _| Ok(type_tag(notation_of(parent)?.to_string()))),
        )
        .with_field(FieldType::new(
            "isDeprecated",
            GraphQLType::non_null(GraphQLType::named("Boolean")),
        ))
        .with_field(FieldType::new(
            "deprecationReason",
            GraphQLType::named("String"),
        ))
}

fn input_value_meta_type() -> ObjectType {
    ObjectType::new("__InputValue")
        .with_field(FieldType::new(
            "name",
            GraphQLType::non_null(GraphQLType::named("String")),
        ))
        .with_field(FieldType::new("description", GraphQLType::named("String")))
        .with_field(
            FieldType::new("type", GraphQLType::non_null(GraphQLType::named("__Type")))
                .with_resolver(|parent, _, _| Ok(type_tag(notation_of(parent)?.to_string()))),
        )
        .with_field(FieldType::new(
            "defaultValue",
            GraphQLType::named("String"),
        ))
}

fn enum_value_meta_type() -> ObjectType {
    ObjectType::new("__EnumValue")
        .with_field(FieldType::new(
            "name",
            GraphQLType::non_null(GraphQLType::named("String")),
        ))
        .with_field(FieldType::new("description", GraphQLType::named("String")))
        .with_field(FieldType::new(
            "isDeprecated",
            GraphQLType::non_null(GraphQLType::named("Boolean")),
        ))
        .with_field(FieldType::new(
            "deprecationReason",
            GraphQLType::named("String"),
        ))
}

fn directive_meta_type() -> ObjectType {
    ObjectType::new("__Directive")
        .with_field(FieldType::new(
            "name",
            GraphQLType::non_null(GraphQLType::named("String")),
        ))
        .with_field(FieldType::new("description", GraphQLType::named("String")))
        .with_field(FieldType::new(
            "locations",
            GraphQLType::non_null(GraphQLType::list(GraphQLType::non_null(
                GraphQLType::named("__DirectiveLocation"),
            ))),
        ))
        .with_field(FieldType::new(
            "args",
            GraphQLType::non_null(GraphQLType::list(GraphQLType::non_null(
                GraphQLType::named("__InputValue"),
            ))),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::QueryExecutor;
    use serde_json::json;

    fn sample_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Enum(
                EnumType::new("Color")
                    .with_value(EnumValue::new("RED"))
                    .with_value(
                        EnumValue::new("CRIMSON").with_deprecation("use RED"),
                    ),
            ))
            .unwrap();
        schema
            .add_type(GraphQLType::Object(
                ObjectType::new("User")
                    .with_field(FieldType::new(
                        "id",
                        GraphQLType::non_null(GraphQLType::named("ID")),
                    ))
                    .with_field(FieldType::new("name", GraphQLType::named("String")))
                    .with_field(
                        FieldType::new("nickname", GraphQLType::named("String"))
                            .with_deprecation("use name"),
                    ),
            ))
            .unwrap();
        schema
            .add_type(GraphQLType::Object(
                ObjectType::new("Query")
                    .with_field(FieldType::new("user", GraphQLType::named("User")))
                    .with_field(FieldType::new(
                        "favorite",
                        GraphQLType::named("Color"),
                    )),
            ))
            .unwrap();
        schema.set_query_type("Query");
        schema.finish().unwrap()
    }

    fn run(query: &str) -> serde_json::Value {
        QueryExecutor::new(sample_schema())
            .execute_request(query, &ExecutionContext::new())
            .to_json()
    }

    #[test]
    fn schema_reports_query_root_name() {
        assert_eq!(
            run("{ __schema { queryType { name } } }"),
            json!({"data": {"__schema": {"queryType": {"name": "Query"}}}})
        );
    }

    #[test]
    fn type_by_name_round_trips() {
        assert_eq!(
            run(r#"{ __type(name: "User") { name kind } }"#),
            json!({"data": {"__type": {"name": "User", "kind": "OBJECT"}}})
        );
    }

    #[test]
    fn unknown_type_name_resolves_to_null() {
        assert_eq!(
            run(r#"{ __type(name: "Ghost") { name } }"#),
            json!({"data": {"__type": null}})
        );
    }

    #[test]
    fn fields_hide_deprecated_by_default() {
        let result = run(r#"{ __type(name: "User") { fields { name } } }"#);
        assert_eq!(
            result,
            json!({"data": {"__type": {"fields": [
                {"name": "id"}, {"name": "name"}
            ]}}})
        );

        let result =
            run(r#"{ __type(name: "User") { fields(includeDeprecated: true) { name isDeprecated deprecationReason } } }"#);
        assert_eq!(
            result["data"]["__type"]["fields"][2],
            json!({"name": "nickname", "isDeprecated": true, "deprecationReason": "use name"})
        );
    }

    #[test]
    fn enum_values_hide_deprecated_by_default() {
        let result = run(r#"{ __type(name: "Color") { enumValues { name } } }"#);
        assert_eq!(
            result,
            json!({"data": {"__type": {"enumValues": [{"name": "RED"}]}}})
        );
    }

    #[test]
    fn wrappers_expose_of_type_chains() {
        let result = run(
            r#"{ __type(name: "User") { fields { name type { kind name ofType { kind name } } } } }"#,
        );
        let id_type = &result["data"]["__type"]["fields"][0]["type"];
        assert_eq!(id_type["kind"], json!("NON_NULL"));
        assert_eq!(id_type["name"], json!(null));
        assert_eq!(id_type["ofType"], json!({"kind": "SCALAR", "name": "ID"}));
    }

    #[test]
    fn meta_entry_points_are_hidden_from_fields() {
        let result = run(r#"{ __type(name: "Query") { fields { name } } }"#);
        let names: Vec<_> = result["data"]["__type"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["user", "favorite"]);
    }

    #[test]
    fn directives_report_locations_and_args() {
        let result = run("{ __schema { directives { name locations args { name type { kind } } } } }");
        let directives = result["data"]["__schema"]["directives"].as_array().unwrap();
        let skip = directives
            .iter()
            .find(|d| d["name"] == json!("skip"))
            .unwrap();
        assert_eq!(
            skip["locations"],
            json!(["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"])
        );
        assert_eq!(skip["args"][0]["name"], json!("if"));
        assert_eq!(skip["args"][0]["type"]["kind"], json!("NON_NULL"));
    }

    #[test]
    fn schema_types_include_meta_and_user_types() {
        let result = run("{ __schema { types { name } } }");
        let names: Vec<_> = result["data"]["__schema"]["types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        for expected in ["String", "User", "Query", "__Schema", "__Type", "__TypeKind"] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn default_values_render_as_literals() {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Object(ObjectType::new("Query").with_field(
                FieldType::new("items", GraphQLType::named("String")).with_argument(
                    ArgumentType::new("limit", GraphQLType::named("Int"))
                        .with_default_value(Value::IntValue(10)),
                ),
            )))
            .unwrap();
        schema.set_query_type("Query");
        let schema = schema.finish().unwrap();
        let result = QueryExecutor::new(schema)
            .execute_request(
                r#"{ __type(name: "Query") { fields { args { name defaultValue } } } }"#,
                &ExecutionContext::new(),
            )
            .to_json();
        assert_eq!(
            result["data"]["__type"]["fields"][0]["args"][0],
            json!({"name": "limit", "defaultValue": "10"})
        );
    }

    #[test]
    fn interface_lists_possible_types() {
        let mut schema = Schema::new();
        schema
            .add_type(GraphQLType::Interface(
                crate::types::InterfaceType::new("Node").with_field(FieldType::new(
                    "id",
                    GraphQLType::non_null(GraphQLType::named("ID")),
                )),
            ))
            .unwrap();
        schema
            .add_type(GraphQLType::Object(
                ObjectType::new("Post")
                    .with_interface("Node")
                    .with_field(FieldType::new(
                        "id",
                        GraphQLType::non_null(GraphQLType::named("ID")),
                    )),
            ))
            .unwrap();
        schema
            .add_type(GraphQLType::Object(ObjectType::new("Query").with_field(
                FieldType::new("node", GraphQLType::named("Node")),
            )))
            .unwrap();
        schema.set_query_type("Query");
        let schema = schema.finish().unwrap();
        let result = QueryExecutor::new(schema)
            .execute_request(
                r#"{ __type(name: "Node") { kind possibleTypes { name } } }"#,
                &ExecutionContext::new(),
            )
            .to_json();
        assert_eq!(
            result["data"]["__type"],
            json!({"kind": "INTERFACE", "possibleTypes": [{"name": "Post"}]})
        );
    }
}
