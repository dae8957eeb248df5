//! GraphQL request parser
//!
//! Recursive descent over the lexer's token stream with single-token
//! lookahead. Fails fast on the first unexpected token; the error
//! message carries the token's line and column.

use crate::ast::{
    Argument, Definition, Directive, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, OperationDefinition, OperationType, Selection, SelectionSet, Type, Value,
    Variable, VariableDefinition,
};
use crate::error::{GraphQLError, GraphQLResult};
use crate::lexer::{Lexer, Token, TokenKind};
use indexmap::IndexMap;
use tracing::debug;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Lexes and parses a request document in one step.
    pub fn parse(source: &str) -> GraphQLResult<Document> {
        let tokens = Lexer::tokenize(source)?;
        debug!(tokens = tokens.len(), "parsing document");
        Parser::new(tokens).parse_document()
    }

    fn current(&self) -> &Token {
        // The stream always ends with Eof, which is never consumed.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> GraphQLResult<Token> {
        let token = self.current().clone();
        if token.kind == kind {
            Ok(self.advance())
        } else {
            Err(GraphQLError::parse(
                format!("Expected {:?} but found '{}'", kind, describe(&token)),
                token.position,
            ))
        }
    }

    fn expect_name(&mut self) -> GraphQLResult<Token> {
        self.expect(TokenKind::Name)
    }

    fn expect_keyword(&mut self, keyword: &str) -> GraphQLResult<Token> {
        let token = self.current().clone();
        if token.kind == TokenKind::Name && token.value == keyword {
            Ok(self.advance())
        } else {
            Err(GraphQLError::parse(
                format!("Expected '{}' but found '{}'", keyword, describe(&token)),
                token.position,
            ))
        }
    }

    pub fn parse_document(&mut self) -> GraphQLResult<Document> {
        let mut definitions = Vec::new();
        while self.current().kind != TokenKind::Eof {
            definitions.push(self.parse_definition()?);
        }
        Ok(Document { definitions })
    }

    fn parse_definition(&mut self) -> GraphQLResult<Definition> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::LeftBrace => {
                // Anonymous shorthand query.
                let position = token.position;
                let selection_set = self.parse_selection_set()?;
                Ok(Definition::Operation(OperationDefinition {
                    operation_type: OperationType::Query,
                    name: None,
                    variable_definitions: Vec::new(),
                    directives: Vec::new(),
                    selection_set,
                    position,
                }))
            }
            TokenKind::Name => match token.value.as_str() {
                "query" => self.parse_operation(OperationType::Query),
                "mutation" => self.parse_operation(OperationType::Mutation),
                "subscription" => self.parse_operation(OperationType::Subscription),
                "fragment" => self.parse_fragment_definition(),
                _ => {
                    // Shorthand form without a leading keyword.
                    let position = token.position;
                    let selection_set = self.parse_selection_set()?;
                    Ok(Definition::Operation(OperationDefinition {
                        operation_type: OperationType::Query,
                        name: None,
                        variable_definitions: Vec::new(),
                        directives: Vec::new(),
                        selection_set,
                        position,
                    }))
                }
            },
            _ => Err(GraphQLError::parse(
                format!("Unexpected '{}' at document level", describe(&token)),
                token.position,
            )),
        }
    }

    fn parse_operation(&mut self, operation_type: OperationType) -> GraphQLResult<Definition> {
        let keyword = self.advance();
        let name = if self.current().kind == TokenKind::Name {
            Some(self.advance().value)
        } else {
            None
        };
        let variable_definitions = if self.current().kind == TokenKind::LeftParen {
            self.parse_variable_definitions()?
        } else {
            Vec::new()
        };
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        Ok(Definition::Operation(OperationDefinition {
            operation_type,
            name,
            variable_definitions,
            directives,
            selection_set,
            position: keyword.position,
        }))
    }

    fn parse_variable_definitions(&mut self) -> GraphQLResult<Vec<VariableDefinition>> {
        self.expect(TokenKind::LeftParen)?;
        let mut definitions = Vec::new();
        while self.current().kind != TokenKind::RightParen {
            self.expect(TokenKind::Dollar)?;
            let name = self.expect_name()?.value;
            self.expect(TokenKind::Colon)?;
            let variable_type = self.parse_type()?;
            let default_value = if self.current().kind == TokenKind::Equals {
                self.advance();
                Some(self.parse_value()?)
            } else {
                None
            };
            let directives = self.parse_directives()?;
            definitions.push(VariableDefinition {
                name,
                variable_type,
                default_value,
                directives,
            });
        }
        self.expect(TokenKind::RightParen)?;
        Ok(definitions)
    }

    fn parse_fragment_definition(&mut self) -> GraphQLResult<Definition> {
        let keyword = self.expect_keyword("fragment")?;
        let name_token = self.expect_name()?;
        if name_token.value == "on" {
            return Err(GraphQLError::parse(
                "Fragment name must not be 'on'",
                name_token.position,
            ));
        }
        self.expect_keyword("on")?;
        let type_condition = self.expect_name()?.value;
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        Ok(Definition::Fragment(FragmentDefinition {
            name: name_token.value,
            type_condition,
            directives,
            selection_set,
            position: keyword.position,
        }))
    }

    fn parse_selection_set(&mut self) -> GraphQLResult<SelectionSet> {
        self.expect(TokenKind::LeftBrace)?;
        let mut selections = Vec::new();
        while self.current().kind != TokenKind::RightBrace {
            selections.push(self.parse_selection()?);
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(SelectionSet { selections })
    }

    fn parse_selection(&mut self) -> GraphQLResult<Selection> {
        if self.current().kind == TokenKind::Spread {
            self.advance();
            let token = self.current().clone();
            if token.kind == TokenKind::Name && token.value != "on" {
                let fragment_name = self.advance().value;
                let directives = self.parse_directives()?;
                return Ok(Selection::FragmentSpread(FragmentSpread {
                    fragment_name,
                    directives,
                }));
            }
            let type_condition = if token.kind == TokenKind::Name {
                self.expect_keyword("on")?;
                Some(self.expect_name()?.value)
            } else {
                None
            };
            let directives = self.parse_directives()?;
            let selection_set = self.parse_selection_set()?;
            return Ok(Selection::InlineFragment(InlineFragment {
                type_condition,
                directives,
                selection_set,
            }));
        }

        let name_token = self.expect_name()?;
        let (alias, name) = if self.current().kind == TokenKind::Colon {
            self.advance();
            let actual = self.expect_name()?;
            (Some(name_token.value), actual.value)
        } else {
            (None, name_token.value)
        };
        let arguments = if self.current().kind == TokenKind::LeftParen {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let directives = self.parse_directives()?;
        let selection_set = if self.current().kind == TokenKind::LeftBrace {
            Some(self.parse_selection_set()?)
        } else {
            None
        };
        Ok(Selection::Field(Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            position: name_token.position,
        }))
    }

    fn parse_arguments(&mut self) -> GraphQLResult<Vec<Argument>> {
        self.expect(TokenKind::LeftParen)?;
        let mut arguments = Vec::new();
        while self.current().kind != TokenKind::RightParen {
            let name = self.expect_name()?.value;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_value()?;
            arguments.push(Argument { name, value });
        }
        self.expect(TokenKind::RightParen)?;
        Ok(arguments)
    }

    fn parse_directives(&mut self) -> GraphQLResult<Vec<Directive>> {
        let mut directives = Vec::new();
        while self.current().kind == TokenKind::At {
            self.advance();
            let name = self.expect_name()?.value;
            let arguments = if self.current().kind == TokenKind::LeftParen {
                self.parse_arguments()?
            } else {
                Vec::new()
            };
            directives.push(Directive { name, arguments });
        }
        Ok(directives)
    }

    fn parse_type(&mut self) -> GraphQLResult<Type> {
        let token = self.current().clone();
        let base = match token.kind {
            TokenKind::Name => Type::Named(self.advance().value),
            TokenKind::LeftBracket => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(TokenKind::RightBracket)?;
                Type::List(Box::new(inner))
            }
            _ => {
                return Err(GraphQLError::parse(
                    format!("Expected type but found '{}'", describe(&token)),
                    token.position,
                ))
            }
        };
        if self.current().kind == TokenKind::Bang {
            self.advance();
            Ok(Type::NonNull(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    fn parse_value(&mut self) -> GraphQLResult<Value> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Dollar => {
                self.advance();
                let name = self.expect_name()?.value;
                Ok(Value::Variable(Variable { name }))
            }
            TokenKind::Int => {
                self.advance();
                token.value.parse::<i64>().map(Value::IntValue).map_err(|_| {
                    GraphQLError::parse(
                        format!("Invalid integer literal '{}'", token.value),
                        token.position,
                    )
                })
            }
            TokenKind::Float => {
                self.advance();
                token
                    .value
                    .parse::<f64>()
                    .map(Value::FloatValue)
                    .map_err(|_| {
                        GraphQLError::parse(
                            format!("Invalid float literal '{}'", token.value),
                            token.position,
                        )
                    })
            }
            TokenKind::String => {
                self.advance();
                Ok(Value::StringValue(token.value))
            }
            TokenKind::Boolean => {
                self.advance();
                Ok(Value::BooleanValue(token.value == "true"))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Value::NullValue)
            }
            TokenKind::Name => {
                self.advance();
                Ok(Value::EnumValue(token.value))
            }
            TokenKind::LeftBracket => {
                self.advance();
                let mut values = Vec::new();
                while self.current().kind != TokenKind::RightBracket {
                    values.push(self.parse_value()?);
                }
                self.expect(TokenKind::RightBracket)?;
                Ok(Value::ListValue(values))
            }
            TokenKind::LeftBrace => {
                self.advance();
                let mut fields = IndexMap::new();
                while self.current().kind != TokenKind::RightBrace {
                    let name = self.expect_name()?.value;
                    self.expect(TokenKind::Colon)?;
                    let value = self.parse_value()?;
                    fields.insert(name, value);
                }
                self.expect(TokenKind::RightBrace)?;
                Ok(Value::ObjectValue(fields))
            }
            _ => Err(GraphQLError::parse(
                format!("Expected value but found '{}'", describe(&token)),
                token.position,
            )),
        }
    }
}

fn describe(token: &Token) -> String {
    if token.kind == TokenKind::Eof {
        "<end of input>".to_string()
    } else {
        token.value.clone()
    }
}
