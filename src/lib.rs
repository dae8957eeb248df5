//! # quill-gql
//!
//! An embeddable GraphQL engine. Hosts describe a schema through the
//! builder API in [`types`], then hand request strings to a
//! [`QueryExecutor`]: the engine lexes, parses and validates the
//! document and executes it against the schema, returning the familiar
//! `{ data?, errors? }` response shape. Introspection (`__schema`,
//! `__type`, `__typename`) is folded into every schema at construction
//! time.
//!
//! ```
//! use quill_gql::{
//!     ExecutionContext, FieldType, GraphQLType, ObjectType, QueryExecutor, Schema, Value,
//! };
//!
//! let mut schema = Schema::new();
//! schema
//!     .add_type(GraphQLType::Object(ObjectType::new("Query").with_field(
//!         FieldType::new("hello", GraphQLType::named("String"))
//!             .with_resolver(|_, _, _| Ok(Value::StringValue("World".to_string()))),
//!     )))
//!     .unwrap();
//! schema.set_query_type("Query");
//! let schema = schema.finish().unwrap();
//!
//! let executor = QueryExecutor::new(schema);
//! let response = executor.execute_request("{ hello }", &ExecutionContext::new());
//! assert_eq!(
//!     response.to_json(),
//!     serde_json::json!({"data": {"hello": "World"}})
//! );
//! ```
//!
//! Execution is fully synchronous: `execute_request` returns once the
//! response is materialised, resolvers run inline on the calling thread,
//! and a finished [`Schema`] is immutable and shareable across threads.

pub mod ast;
pub mod error;
pub mod execution;
pub mod introspection;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod validation;

pub use ast::{Document, Value};
pub use error::{GraphQLError, GraphQLResult, SourcePosition};
pub use execution::{ExecutionContext, ExecutionResult, QueryExecutor};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use types::{
    ArgumentType, BuiltinScalars, DirectiveLocation, DirectiveType, EnumType, EnumValue,
    FieldType, GraphQLType, InputFieldType, InputObjectType, InterfaceType, ObjectType,
    ScalarType, Schema, UnionType,
};
pub use validation::Validator;
