//! Recursive-descent parser producing the positioned AST in [`crate::ast`].
//!
//! The grammar covers executable documents only (operations and fragments);
//! type-system definitions are out of scope. Parsing is fail-fast: the
//! first lexical or syntactic error aborts the parse with a [`SyntaxError`]
//! and no partial AST is produced.

use crate::ast;
use crate::Lexer;
use crate::SyntaxError;
use crate::SyntaxErrorKind;
use crate::Token;
use crate::TokenKind;
use crate::TokenStream;

/// Nesting limit for selection sets and composite input values, guarding
/// against stack exhaustion on hostile input.
const MAX_NESTING_DEPTH: usize = 64;

/// Parser configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParserOptions {
    /// When set, `#` comment lines immediately preceding an operation,
    /// fragment definition, or field are retained on the AST node.
    pub retain_comments: bool,
}

/// Parses `source` as an executable document with default options.
pub fn parse(source: &str) -> Result<ast::Document<'_>, SyntaxError> {
    parse_with_options(source, ParserOptions::default())
}

/// Parses `source` as an executable document.
pub fn parse_with_options(
    source: &str,
    options: ParserOptions,
) -> Result<ast::Document<'_>, SyntaxError> {
    Parser::new(source, options).parse_document()
}

struct Parser<'src> {
    tokens: TokenStream<'src>,
    options: ParserOptions,
    /// Current nesting depth of selection sets and composite values.
    depth: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, options: ParserOptions) -> Self {
        Self {
            tokens: TokenStream::new(Lexer::new(source)),
            options,
            depth: 0,
        }
    }

    /* Document and definitions */

    fn parse_document(mut self) -> Result<ast::Document<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        let mut definitions = vec![self.parse_definition()?];
        while !self.tokens.is_at_end()? {
            definitions.push(self.parse_definition()?);
        }
        Ok(ast::Document { definitions, loc })
    }

    fn parse_definition(&mut self) -> Result<ast::Definition<'src>, SyntaxError> {
        let token = self.tokens.peek()?;
        match &token.kind {
            TokenKind::CurlyBraceOpen => Ok(ast::Definition::Operation(
                self.parse_shorthand_query()?,
            )),
            TokenKind::Name(name) => match name.as_ref() {
                "query" => self.parse_operation(ast::OperationKind::Query),
                "mutation" => self.parse_operation(ast::OperationKind::Mutation),
                "subscription" => {
                    self.parse_operation(ast::OperationKind::Subscription)
                },
                "fragment" => Ok(ast::Definition::Fragment(
                    self.parse_fragment_definition()?,
                )),
                _ => Err(self.unexpected_token()?),
            },
            _ => Err(self.unexpected_token()?),
        }
    }

    /// Parses the shorthand form `{ ... }`, which is always a query.
    fn parse_shorthand_query(
        &mut self,
    ) -> Result<ast::OperationDefinition<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        let comment = self.take_comment()?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::OperationDefinition {
            kind: ast::OperationKind::Query,
            name: None,
            variable_definitions: Vec::new(),
            directives: Vec::new(),
            selection_set,
            comment,
            loc,
        })
    }

    fn parse_operation(
        &mut self,
        kind: ast::OperationKind,
    ) -> Result<ast::Definition<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        let comment = self.take_comment()?;
        // The operation keyword itself.
        self.tokens.consume()?;

        let name = match &self.tokens.peek()?.kind {
            TokenKind::Name(_) => Some(self.parse_name()?),
            _ => None,
        };
        let variable_definitions = self.parse_variable_definitions()?;
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::Definition::Operation(ast::OperationDefinition {
            kind,
            name,
            variable_definitions,
            directives,
            selection_set,
            comment,
            loc,
        }))
    }

    fn parse_fragment_definition(
        &mut self,
    ) -> Result<ast::FragmentDefinition<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        let comment = self.take_comment()?;
        // The `fragment` keyword.
        self.tokens.consume()?;

        let name = self.parse_fragment_name()?;
        self.expect_keyword("on")?;
        let type_condition = self.parse_name()?;
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
            comment,
            loc,
        })
    }

    /* Variable definitions and types */

    fn parse_variable_definitions(
        &mut self,
    ) -> Result<Vec<ast::VariableDefinition<'src>>, SyntaxError> {
        if !matches!(self.tokens.peek()?.kind, TokenKind::ParenOpen) {
            return Ok(Vec::new());
        }
        self.tokens.consume()?;

        // At least one definition is required between the parens.
        let mut definitions = vec![self.parse_variable_definition()?];
        while !matches!(self.tokens.peek()?.kind, TokenKind::ParenClose) {
            definitions.push(self.parse_variable_definition()?);
        }
        self.tokens.consume()?;
        Ok(definitions)
    }

    fn parse_variable_definition(
        &mut self,
    ) -> Result<ast::VariableDefinition<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        self.expect_punctuator(&TokenKind::Dollar)?;
        let name = self.parse_name()?;
        self.expect_punctuator(&TokenKind::Colon)?;
        let var_type = self.parse_type_annotation()?;

        let default_value =
            if matches!(self.tokens.peek()?.kind, TokenKind::Equals) {
                self.tokens.consume()?;
                Some(self.parse_value(true)?)
            } else {
                None
            };
        let directives = self.parse_directives(true)?;

        Ok(ast::VariableDefinition {
            name,
            var_type,
            default_value,
            directives,
            loc,
        })
    }

    fn parse_type_annotation(
        &mut self,
    ) -> Result<ast::TypeAnnotation<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        let inner = if matches!(
            self.tokens.peek()?.kind,
            TokenKind::SquareBracketOpen
        ) {
            self.tokens.consume()?;
            let item_type = self.parse_type_annotation()?;
            self.expect_punctuator(&TokenKind::SquareBracketClose)?;
            ast::TypeAnnotation::List(Box::new(item_type), loc)
        } else {
            ast::TypeAnnotation::Named(self.parse_name()?)
        };

        if matches!(self.tokens.peek()?.kind, TokenKind::Bang) {
            self.tokens.consume()?;
            Ok(ast::TypeAnnotation::NonNull(Box::new(inner), loc))
        } else {
            Ok(inner)
        }
    }

    /* Selections */

    fn parse_selection_set(
        &mut self,
    ) -> Result<ast::SelectionSet<'src>, SyntaxError> {
        self.enter_nesting()?;
        let loc = self.peek_location()?;
        self.expect_punctuator(&TokenKind::CurlyBraceOpen)?;

        let mut selections = vec![self.parse_selection()?];
        while !matches!(self.tokens.peek()?.kind, TokenKind::CurlyBraceClose) {
            selections.push(self.parse_selection()?);
        }
        self.tokens.consume()?;

        self.depth -= 1;
        Ok(ast::SelectionSet { selections, loc })
    }

    fn parse_selection(&mut self) -> Result<ast::Selection<'src>, SyntaxError> {
        if matches!(self.tokens.peek()?.kind, TokenKind::Ellipsis) {
            self.parse_fragment_selection()
        } else {
            Ok(ast::Selection::Field(self.parse_field()?))
        }
    }

    fn parse_field(&mut self) -> Result<ast::Field<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        let comment = self.take_comment()?;
        let first_name = self.parse_name()?;

        // `alias: name` vs plain `name`.
        let (alias, name) =
            if matches!(self.tokens.peek()?.kind, TokenKind::Colon) {
                self.tokens.consume()?;
                (Some(first_name), self.parse_name()?)
            } else {
                (None, first_name)
            };

        let arguments = self.parse_arguments(false)?;
        let directives = self.parse_directives(false)?;
        let selection_set =
            if matches!(self.tokens.peek()?.kind, TokenKind::CurlyBraceOpen) {
                Some(self.parse_selection_set()?)
            } else {
                None
            };

        Ok(ast::Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            comment,
            loc,
        })
    }

    /// Parses a fragment spread or inline fragment, starting at `...`.
    fn parse_fragment_selection(
        &mut self,
    ) -> Result<ast::Selection<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        self.tokens.consume()?;

        let token = self.tokens.peek()?;
        if let TokenKind::Name(name) = &token.kind
            && name.as_ref() != "on"
        {
            let fragment_name = self.parse_name()?;
            let directives = self.parse_directives(false)?;
            return Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                fragment_name,
                directives,
                loc,
            }));
        }

        let type_condition = if token.is_keyword("on") {
            self.tokens.consume()?;
            Some(self.parse_name()?)
        } else {
            None
        };
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::Selection::InlineFragment(ast::InlineFragment {
            type_condition,
            directives,
            selection_set,
            loc,
        }))
    }

    /* Arguments and directives */

    fn parse_arguments(
        &mut self,
        const_context: bool,
    ) -> Result<Vec<ast::Argument<'src>>, SyntaxError> {
        if !matches!(self.tokens.peek()?.kind, TokenKind::ParenOpen) {
            return Ok(Vec::new());
        }
        self.tokens.consume()?;

        let mut arguments = vec![self.parse_argument(const_context)?];
        while !matches!(self.tokens.peek()?.kind, TokenKind::ParenClose) {
            arguments.push(self.parse_argument(const_context)?);
        }
        self.tokens.consume()?;
        Ok(arguments)
    }

    fn parse_argument(
        &mut self,
        const_context: bool,
    ) -> Result<ast::Argument<'src>, SyntaxError> {
        let loc = self.peek_location()?;
        let name = self.parse_name()?;
        self.expect_punctuator(&TokenKind::Colon)?;
        let value = self.parse_value(const_context)?;
        Ok(ast::Argument { name, value, loc })
    }

    fn parse_directives(
        &mut self,
        const_context: bool,
    ) -> Result<Vec<ast::Directive<'src>>, SyntaxError> {
        let mut directives = Vec::new();
        while matches!(self.tokens.peek()?.kind, TokenKind::At) {
            let loc = self.peek_location()?;
            self.tokens.consume()?;
            let name = self.parse_name()?;
            let arguments = self.parse_arguments(const_context)?;
            directives.push(ast::Directive {
                name,
                arguments,
                loc,
            });
        }
        Ok(directives)
    }

    /* Values */

    /// Parses an input value literal. In a const context (default values
    /// for variables) variable references are not allowed.
    fn parse_value(
        &mut self,
        const_context: bool,
    ) -> Result<ast::Value<'src>, SyntaxError> {
        let token = self.tokens.peek()?;
        let loc = token.span.start.to_location();
        match &token.kind {
            TokenKind::Dollar if const_context => Err(self.unexpected_token()?),
            TokenKind::Dollar => {
                self.tokens.consume()?;
                let name = self.parse_name()?;
                Ok(ast::Value::Variable {
                    name: name.value,
                    loc,
                })
            },
            TokenKind::IntValue(_) => self.parse_int_value(),
            TokenKind::FloatValue(_) => self.parse_float_value(),
            TokenKind::StringValue { .. } => {
                let token = self.tokens.consume()?;
                match token.kind {
                    TokenKind::StringValue { value, block } => {
                        Ok(ast::Value::String { value, block, loc })
                    },
                    _ => unreachable!("peeked StringValue"),
                }
            },
            TokenKind::Name(name) => {
                // Classify before consuming; `true`, `false`, and `null`
                // are the only names with special meaning here.
                enum NameValue {
                    True,
                    False,
                    Null,
                    Enum,
                }
                let classified = match name.as_ref() {
                    "true" => NameValue::True,
                    "false" => NameValue::False,
                    "null" => NameValue::Null,
                    _ => NameValue::Enum,
                };
                let token = self.tokens.consume()?;
                Ok(match classified {
                    NameValue::True => {
                        ast::Value::Boolean { value: true, loc }
                    },
                    NameValue::False => {
                        ast::Value::Boolean { value: false, loc }
                    },
                    NameValue::Null => ast::Value::Null { loc },
                    NameValue::Enum => match token.kind {
                        TokenKind::Name(value) => {
                            ast::Value::Enum { value, loc }
                        },
                        _ => unreachable!("peeked Name"),
                    },
                })
            },
            TokenKind::SquareBracketOpen => {
                self.parse_list_value(const_context, loc)
            },
            TokenKind::CurlyBraceOpen => {
                self.parse_object_value(const_context, loc)
            },
            _ => Err(self.unexpected_token()?),
        }
    }

    fn parse_int_value(&mut self) -> Result<ast::Value<'src>, SyntaxError> {
        let token = self.tokens.consume()?;
        let loc = token.span.start.to_location();
        let raw = match &token.kind {
            TokenKind::IntValue(raw) => raw.as_ref(),
            _ => unreachable!("peeked IntValue"),
        };
        let value = raw.parse::<i64>().map_err(|_| {
            SyntaxError::new(
                SyntaxErrorKind::InvalidNumber,
                format!("Invalid number, integer out of range: {raw:?}."),
                token.span.start,
                self.tokens.source(),
            )
        })?;
        Ok(ast::Value::Int { value, loc })
    }

    fn parse_float_value(&mut self) -> Result<ast::Value<'src>, SyntaxError> {
        let token = self.tokens.consume()?;
        let loc = token.span.start.to_location();
        let raw = match &token.kind {
            TokenKind::FloatValue(raw) => raw.as_ref(),
            _ => unreachable!("peeked FloatValue"),
        };
        // The lexer only emits grammar-valid float text, which `f64`
        // always accepts (overflow saturates to infinity).
        let value = raw.parse::<f64>().map_err(|_| {
            SyntaxError::new(
                SyntaxErrorKind::InvalidNumber,
                format!("Invalid number, malformed float: {raw:?}."),
                token.span.start,
                self.tokens.source(),
            )
        })?;
        Ok(ast::Value::Float { value, loc })
    }

    fn parse_list_value(
        &mut self,
        const_context: bool,
        loc: crate::SourceLocation,
    ) -> Result<ast::Value<'src>, SyntaxError> {
        self.enter_nesting()?;
        self.tokens.consume()?;
        let mut items = Vec::new();
        while !matches!(self.tokens.peek()?.kind, TokenKind::SquareBracketClose)
        {
            items.push(self.parse_value(const_context)?);
        }
        self.tokens.consume()?;
        self.depth -= 1;
        Ok(ast::Value::List { items, loc })
    }

    fn parse_object_value(
        &mut self,
        const_context: bool,
        loc: crate::SourceLocation,
    ) -> Result<ast::Value<'src>, SyntaxError> {
        self.enter_nesting()?;
        self.tokens.consume()?;
        let mut fields = Vec::new();
        while !matches!(self.tokens.peek()?.kind, TokenKind::CurlyBraceClose) {
            let field_loc = self.peek_location()?;
            let name = self.parse_name()?;
            self.expect_punctuator(&TokenKind::Colon)?;
            let value = self.parse_value(const_context)?;
            fields.push(ast::ObjectField {
                name,
                value,
                loc: field_loc,
            });
        }
        self.tokens.consume()?;
        self.depth -= 1;
        Ok(ast::Value::Object { fields, loc })
    }

    /* Token-level helpers */

    fn parse_name(&mut self) -> Result<ast::Name<'src>, SyntaxError> {
        let token = self.tokens.peek()?;
        if !matches!(token.kind, TokenKind::Name(_)) {
            return Err(self.expected("Name")?);
        }
        let token = self.tokens.consume()?;
        let loc = token.span.start.to_location();
        match token.kind {
            TokenKind::Name(value) => Ok(ast::Name { value, loc }),
            _ => unreachable!("peeked Name"),
        }
    }

    /// Parses a fragment name, which may not be the keyword `on`.
    fn parse_fragment_name(&mut self) -> Result<ast::Name<'src>, SyntaxError> {
        if self.tokens.peek()?.is_keyword("on") {
            return Err(self.unexpected_token()?);
        }
        self.parse_name()
    }

    fn expect_punctuator(
        &mut self,
        kind: &TokenKind<'static>,
    ) -> Result<Token<'src>, SyntaxError> {
        if &self.tokens.peek()?.kind == kind {
            self.tokens.consume()
        } else {
            Err(self.expected(&kind.describe())?)
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), SyntaxError> {
        if self.tokens.peek()?.is_keyword(keyword) {
            self.tokens.consume()?;
            Ok(())
        } else {
            Err(self.expected(&format!("\"{keyword}\""))?)
        }
    }

    /// Builds an `Expected X, found Y.` error at the current token.
    ///
    /// Returns `Result` because inspecting the current token can itself
    /// surface a latched lexical error, which takes precedence.
    fn expected(&mut self, expected: &str) -> Result<SyntaxError, SyntaxError> {
        let token = self.tokens.peek()?;
        Ok(SyntaxError::new(
            SyntaxErrorKind::ExpectedToken,
            format!("Expected {expected}, found {}.", token.kind.describe()),
            token.span.start,
            self.tokens.source(),
        ))
    }

    /// Builds an `Unexpected X.` error at the current token.
    fn unexpected_token(&mut self) -> Result<SyntaxError, SyntaxError> {
        let token = self.tokens.peek()?;
        Ok(SyntaxError::new(
            SyntaxErrorKind::UnexpectedToken,
            format!("Unexpected {}.", token.kind.describe()),
            token.span.start,
            self.tokens.source(),
        ))
    }

    fn peek_location(&mut self) -> Result<crate::SourceLocation, SyntaxError> {
        Ok(self.tokens.peek()?.span.start.to_location())
    }

    fn enter_nesting(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            let token = self.tokens.peek()?;
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken,
                format!(
                    "Document nesting exceeds maximum depth of \
                     {MAX_NESTING_DEPTH}."
                ),
                token.span.start,
                self.tokens.source(),
            ));
        }
        Ok(())
    }

    /// Collects the comments preceding the current token into one string,
    /// when comment retention is enabled.
    fn take_comment(&mut self) -> Result<Option<String>, SyntaxError> {
        if !self.options.retain_comments {
            return Ok(None);
        }
        let token = self.tokens.peek()?;
        if token.preceding_comments.is_empty() {
            return Ok(None);
        }
        let mut text = String::new();
        for (i, comment) in token.preceding_comments.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(comment.text.as_ref());
        }
        Ok(Some(text))
    }
}
