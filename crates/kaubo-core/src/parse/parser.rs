// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Pratt parser for Kaubo source code.
//!
//! Token-driven recursive descent with precedence climbing for binary
//! operators: [`Parser::parse_expression`] reads a prefix/postfix head,
//! then folds operators whose precedence beats the current minimum,
//! recursing with the operator's own precedence (left-associative) or one
//! less (right-associative). Adding an operator touches only the tables in
//! [`super::precedence`].
//!
//! # References
//!
//! - [Pratt Parsing Made Easy](https://matklad.github.io/2020/04/13/simple-but-powerful-pratt-parsing.html)
//!
//! # Errors
//!
//! No recovery: the first error is returned with the coordinate of the
//! token that triggered it. Lexical error tokens (`Utf8Error`,
//! `InvalidToken`) surface as [`ParseErrorKind::UnexpectedToken`].
//!
//! # Listeners
//!
//! Bound [`ParseListener`]s are notified around each module, statement,
//! and expression production, in registration order, in the textual order
//! of each construct's first token. Exit callbacks receive the fully
//! built node as a shared handle.

use std::cell::RefCell;
use std::rc::Rc;

use ecow::EcoString;

use crate::ast::{ExprPtr, Expression, Module, Statement, StmtPtr};
use crate::ast_walker::ParseListener;
use crate::lex::{Coordinate, Lexer, LexerConfig, Token};
use crate::parse::{
    kaubo_lexer, precedence::is_left_associative, precedence::precedence, KauboTokenKind,
    ParseError, ParseErrorKind, ParseResult,
};

/// Shared handle to a bound listener.
pub type ListenerHandle = Rc<RefCell<dyn ParseListener>>;

/// A Pratt parser over a terminated Kaubo token stream.
///
/// The parser owns its lexer and pulls one token of lookahead. The lexer
/// must be terminated before parsing: an open stream reports "no token
/// yet" the same way as end-of-input, and the parser treats both as EOF.
pub struct Parser {
    lexer: Lexer<KauboTokenKind>,
    current: Option<Token<KauboTokenKind>>,
    last_coordinate: Coordinate,
    listeners: Vec<ListenerHandle>,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// Creates a parser over a fed and terminated lexer, priming one
    /// token of lookahead.
    #[must_use]
    pub fn new(lexer: Lexer<KauboTokenKind>) -> Self {
        let mut parser = Self {
            lexer,
            current: None,
            last_coordinate: Coordinate::default(),
            listeners: Vec::new(),
        };
        parser.consume();
        parser
    }

    /// Creates a parser over a complete source string.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        let mut lexer = kaubo_lexer(LexerConfig {
            ring_capacity: source.len().max(64),
            ..LexerConfig::default()
        });
        lexer
            .feed(source.as_bytes())
            .expect("freshly created lexer accepts input");
        lexer.terminate();
        Self::new(lexer)
    }

    /// Subscribes a listener; listeners fire in registration order.
    pub fn bind_listener(&mut self, listener: ListenerHandle) {
        self.listeners.push(listener);
    }

    /// Parses the whole token stream into a module.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse(&mut self) -> ParseResult<Rc<Module>> {
        self.notify(|l| l.on_enter_module());

        let mut statements = Vec::new();
        while self.current.is_some() {
            let statement = self.parse_statement()?;
            statements.push(statement);
            // Statement-terminating semicolons are optional here; a run of
            // extras parses as empty statements.
            self.match_kind(KauboTokenKind::Semicolon);
        }

        let module = Rc::new(Module::new(statements));
        self.notify(|l| l.on_exit_module(&module));
        Ok(module)
    }

    // ── Token plumbing ────────────────────────────────────────────────────────

    fn consume(&mut self) {
        if let Some(token) = &self.current {
            self.last_coordinate = token.coordinate();
        }
        self.current = self.lexer.next_token();
    }

    fn check(&self, kind: KauboTokenKind) -> bool {
        self.current.as_ref().is_some_and(|t| t.kind() == kind)
    }

    fn match_kind(&mut self, kind: KauboTokenKind) -> bool {
        if self.check(kind) {
            self.consume();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: KauboTokenKind, error: ParseErrorKind) -> ParseResult<()> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            Err(self.error(error))
        }
    }

    /// Coordinate for an error at the current position.
    fn here(&self) -> Coordinate {
        self.current
            .as_ref()
            .map_or(self.last_coordinate, Token::coordinate)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.here())
    }

    /// Takes the current token's text as an owned string.
    fn current_text(&self) -> EcoString {
        self.current
            .as_ref()
            .and_then(Token::text)
            .map_or_else(EcoString::new, EcoString::from)
    }

    fn notify(&self, mut f: impl FnMut(&mut dyn ParseListener)) {
        for listener in &self.listeners {
            f(&mut *listener.borrow_mut());
        }
    }

    // ── Statements ────────────────────────────────────────────────────────────

    fn parse_statement(&mut self) -> ParseResult<StmtPtr> {
        self.notify(|l| l.on_enter_statement());
        let statement = self.parse_statement_inner()?;
        self.notify(|l| l.on_exit_statement(&statement));
        Ok(statement)
    }

    fn parse_statement_inner(&mut self) -> ParseResult<StmtPtr> {
        use crate::parse::KauboTokenKind as K;
        match self.current.as_ref().map(Token::kind) {
            Some(K::LeftBrace) => self.parse_block(),
            Some(K::Var) => self.parse_var_declaration(),
            Some(K::Semicolon) => {
                self.consume();
                Ok(Rc::new(Statement::Empty))
            }
            Some(K::Return) => self.parse_return_statement(),
            Some(K::If) => self.parse_if_statement(),
            Some(K::While) => self.parse_while_loop(),
            Some(K::For) => self.parse_for_loop(),
            Some(_) => {
                let expression = self.parse_expression(0)?;
                Ok(Rc::new(Statement::Expr { expression }))
            }
            None => Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn parse_block(&mut self) -> ParseResult<StmtPtr> {
        use crate::parse::KauboTokenKind as K;
        self.expect(K::LeftBrace, ParseErrorKind::UnexpectedToken)?;

        let mut statements = Vec::new();
        while self.current.is_some() && !self.check(K::RightBrace) {
            let statement = self.parse_statement()?;
            statements.push(statement);
            self.match_kind(K::Semicolon);
        }

        self.expect(K::RightBrace, ParseErrorKind::MissingRightBrace)?;
        Ok(Rc::new(Statement::Block { statements }))
    }

    fn parse_var_declaration(&mut self) -> ParseResult<StmtPtr> {
        use crate::parse::KauboTokenKind as K;
        self.consume(); // var

        if !self.check(K::Identifier) {
            return Err(self.error(ParseErrorKind::UnexpectedToken));
        }
        let name = self.current_text();
        self.consume();

        self.expect(K::Equal, ParseErrorKind::UnexpectedToken)?;
        let initializer = self.parse_expression(0)?;
        self.expect(K::Semicolon, ParseErrorKind::UnexpectedToken)?;

        Ok(Rc::new(Statement::VarDecl { name, initializer }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<StmtPtr> {
        use crate::parse::KauboTokenKind as K;
        self.consume(); // return

        let value = if self.check(K::Semicolon) {
            None
        } else {
            Some(self.parse_expression(0)?)
        };
        self.expect(K::Semicolon, ParseErrorKind::UnexpectedToken)?;

        Ok(Rc::new(Statement::Return { value }))
    }

    fn parse_if_statement(&mut self) -> ParseResult<StmtPtr> {
        use crate::parse::KauboTokenKind as K;
        self.consume(); // if
        let condition = self.parse_expression(0)?;
        let then_block = self.parse_block()?;

        let mut elif_branches = Vec::new();
        while self.check(K::Elif) {
            self.consume();
            let elif_condition = self.parse_expression(0)?;
            let elif_block = self.parse_block()?;
            elif_branches.push((elif_condition, elif_block));
        }

        let else_block = if self.check(K::Else) {
            self.consume();
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Rc::new(Statement::If {
            condition,
            then_block,
            elif_branches,
            else_block,
        }))
    }

    fn parse_while_loop(&mut self) -> ParseResult<StmtPtr> {
        self.consume(); // while
        let condition = self.parse_expression(0)?;
        let body = self.parse_block()?;
        Ok(Rc::new(Statement::While { condition, body }))
    }

    fn parse_for_loop(&mut self) -> ParseResult<StmtPtr> {
        use crate::parse::KauboTokenKind as K;
        self.consume(); // for
        let iterator = self.parse_expression(0)?;
        self.expect(K::In, ParseErrorKind::UnexpectedToken)?;
        let iterable = self.parse_expression(0)?;
        let body = self.parse_block()?;
        Ok(Rc::new(Statement::For {
            iterator,
            iterable,
            body,
        }))
    }

    // ── Expressions ───────────────────────────────────────────────────────────

    /// The precedence climb.
    ///
    /// Reads a prefix/postfix head, then while the next token is a binary
    /// operator binding tighter than `min_precedence`, consumes it and
    /// recurses for the right operand — at the operator's own precedence
    /// for left-associative operators, one less for right-associative
    /// ones.
    fn parse_expression(&mut self, min_precedence: i32) -> ParseResult<ExprPtr> {
        use crate::parse::KauboTokenKind as K;
        self.notify(|l| l.on_enter_expr());

        let mut left = self.parse_unary()?;

        loop {
            let Some(op) = self.current.as_ref().map(Token::kind) else {
                break;
            };
            let op_precedence = precedence(op);
            if op_precedence <= min_precedence {
                break;
            }
            self.consume();

            let next_min = if is_left_associative(op) {
                op_precedence
            } else {
                op_precedence - 1
            };
            let right = self.parse_expression(next_min)?;

            // `name = value` folds to Assign; any other left-hand side
            // stays a Binary with the `=` operator.
            left = if op == K::Equal {
                match left.as_var_ref().cloned() {
                    Some(name) => Rc::new(Expression::Assign { name, value: right }),
                    None => Rc::new(Expression::Binary { left, op, right }),
                }
            } else {
                Rc::new(Expression::Binary { left, op, right })
            };
        }

        self.notify(|l| l.on_exit_expr(&left));
        Ok(left)
    }

    /// Prefix unary operators right-associate by recursion.
    fn parse_unary(&mut self) -> ParseResult<ExprPtr> {
        use crate::parse::KauboTokenKind as K;
        match self.current.as_ref().map(Token::kind) {
            Some(op @ (K::Plus | K::Minus | K::Bang)) => {
                self.consume();
                let operand = self.parse_unary()?;
                Ok(Rc::new(Expression::Unary { op, operand }))
            }
            _ => self.parse_primary(),
        }
    }

    /// A primary expression with its postfix chain applied.
    fn parse_primary(&mut self) -> ParseResult<ExprPtr> {
        let base = self.parse_primary_base()?;
        self.parse_postfix(base)
    }

    fn parse_primary_base(&mut self) -> ParseResult<ExprPtr> {
        use crate::parse::KauboTokenKind as K;
        let Some(token) = self.current.as_ref() else {
            return Err(self.error(ParseErrorKind::UnexpectedEndOfInput));
        };
        match token.kind() {
            K::Integer => self.parse_int(),
            K::String => self.parse_string(),
            K::True => {
                self.consume();
                Ok(Rc::new(Expression::LiteralTrue))
            }
            K::False => {
                self.consume();
                Ok(Rc::new(Expression::LiteralFalse))
            }
            K::Null => {
                self.consume();
                Ok(Rc::new(Expression::LiteralNull))
            }
            K::LeftBracket => self.parse_list(),
            K::LeftParen => self.parse_grouping(),
            K::Identifier => {
                let name = self.current_text();
                self.consume();
                Ok(Rc::new(Expression::VarRef { name }))
            }
            K::Pipe => self.parse_lambda(),
            _ => Err(self.error(ParseErrorKind::UnexpectedToken)),
        }
    }

    /// Member accesses and calls, applied left to right: `a.b.c()`.
    fn parse_postfix(&mut self, mut expr: ExprPtr) -> ParseResult<ExprPtr> {
        use crate::parse::KauboTokenKind as K;
        loop {
            if self.check(K::Dot) {
                self.consume();
                if !self.check(K::Identifier) {
                    return Err(self.error(ParseErrorKind::ExpectedIdentifierAfterDot));
                }
                let name = self.current_text();
                self.consume();
                expr = Rc::new(Expression::MemberAccess { object: expr, name });
            } else if self.check(K::LeftParen) {
                expr = self.parse_function_call(expr)?;
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_int(&mut self) -> ParseResult<ExprPtr> {
        let value: i64 = self
            .current
            .as_ref()
            .and_then(Token::text)
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| self.error(ParseErrorKind::InvalidNumberFormat))?;
        self.consume();
        Ok(Rc::new(Expression::LiteralInt(value)))
    }

    fn parse_string(&mut self) -> ParseResult<ExprPtr> {
        // The lexeme is raw, quotes included; strip the symmetric pair and
        // leave escape handling to consumers.
        let text = self.current_text();
        let inner = &text[1..text.len() - 1];
        let value = EcoString::from(inner);
        self.consume();
        Ok(Rc::new(Expression::LiteralString(value)))
    }

    fn parse_list(&mut self) -> ParseResult<ExprPtr> {
        use crate::parse::KauboTokenKind as K;
        self.consume(); // [

        let mut elements = Vec::new();
        while self.current.is_some() && !self.check(K::RightBracket) {
            elements.push(self.parse_expression(0)?);
            if !self.match_kind(K::Comma) {
                break;
            }
        }

        self.expect(K::RightBracket, ParseErrorKind::UnexpectedToken)?;
        Ok(Rc::new(Expression::LiteralList { elements }))
    }

    fn parse_grouping(&mut self) -> ParseResult<ExprPtr> {
        use crate::parse::KauboTokenKind as K;
        self.consume(); // (
        let inner = self.parse_expression(0)?;
        self.expect(K::RightParen, ParseErrorKind::MissingRightParen)?;
        Ok(Rc::new(Expression::Grouping { inner }))
    }

    fn parse_lambda(&mut self) -> ParseResult<ExprPtr> {
        use crate::parse::KauboTokenKind as K;
        self.expect(K::Pipe, ParseErrorKind::ExpectedPipe)?;

        let mut params = Vec::new();
        if !self.check(K::Pipe) {
            loop {
                if !self.check(K::Identifier) {
                    return Err(self.error(ParseErrorKind::ExpectedIdentifierInLambdaParams));
                }
                params.push(self.current_text());
                self.consume();

                if self.match_kind(K::Comma) {
                    continue;
                }
                if self.check(K::Pipe) {
                    break;
                }
                return Err(self.error(ParseErrorKind::ExpectedCommaOrPipeInLambda));
            }
        }
        self.expect(K::Pipe, ParseErrorKind::ExpectedPipe)?;

        if !self.check(K::LeftBrace) {
            return Err(self.error(ParseErrorKind::ExpectedLeftBraceInLambdaBody));
        }
        let body = self.parse_block()?;
        Ok(Rc::new(Expression::Lambda { params, body }))
    }

    fn parse_function_call(&mut self, callee: ExprPtr) -> ParseResult<ExprPtr> {
        use crate::parse::KauboTokenKind as K;
        self.consume(); // (

        let mut args = Vec::new();
        if !self.check(K::RightParen) {
            loop {
                args.push(self.parse_expression(0)?);
                if self.match_kind(K::Comma) {
                    continue;
                }
                if self.check(K::RightParen) {
                    break;
                }
                return Err(self.error(ParseErrorKind::ExpectedCommaOrRightParen));
            }
        }

        self.expect(K::RightParen, ParseErrorKind::MissingRightParen)?;
        Ok(Rc::new(Expression::FunctionCall { callee, args }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::KauboTokenKind as K;

    fn parse(source: &str) -> ParseResult<Rc<Module>> {
        Parser::from_source(source).parse()
    }

    fn parse_expr(source: &str) -> ExprPtr {
        let module = parse(source).expect("source should parse");
        let Statement::Expr { expression } = &*module.statements[0] else {
            panic!("expected an expression statement");
        };
        Rc::clone(expression)
    }

    fn binary_parts(expr: &Expression) -> (&ExprPtr, KauboTokenKind, &ExprPtr) {
        let Expression::Binary { left, op, right } = expr else {
            panic!("expected a binary expression, got {expr:?}");
        };
        (left, *op, right)
    }

    #[test]
    fn literals() {
        assert_eq!(*parse_expr("42;"), Expression::LiteralInt(42));
        assert_eq!(
            *parse_expr("\"hi\";"),
            Expression::LiteralString("hi".into())
        );
        assert_eq!(*parse_expr("true;"), Expression::LiteralTrue);
        assert_eq!(*parse_expr("false;"), Expression::LiteralFalse);
        assert_eq!(*parse_expr("null;"), Expression::LiteralNull);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        // 1 + 2 * 3 → 1 + (2 * 3)
        let expr = parse_expr("1 + 2 * 3;");
        let (left, op, right) = binary_parts(&expr);
        assert_eq!(op, K::Plus);
        assert_eq!(**left, Expression::LiteralInt(1));
        let (inner_left, inner_op, inner_right) = binary_parts(right);
        assert_eq!(inner_op, K::Star);
        assert_eq!(**inner_left, Expression::LiteralInt(2));
        assert_eq!(**inner_right, Expression::LiteralInt(3));

        // 1 * 2 + 3 → (1 * 2) + 3
        let expr = parse_expr("1 * 2 + 3;");
        let (left, op, right) = binary_parts(&expr);
        assert_eq!(op, K::Plus);
        assert_eq!(**right, Expression::LiteralInt(3));
        let (_, inner_op, _) = binary_parts(left);
        assert_eq!(inner_op, K::Star);
    }

    #[test]
    fn subtraction_left_associates() {
        // 1 - 2 - 3 → (1 - 2) - 3
        let expr = parse_expr("1 - 2 - 3;");
        let (left, op, right) = binary_parts(&expr);
        assert_eq!(op, K::Minus);
        assert_eq!(**right, Expression::LiteralInt(3));
        let (inner_left, inner_op, _) = binary_parts(left);
        assert_eq!(inner_op, K::Minus);
        assert_eq!(**inner_left, Expression::LiteralInt(1));
    }

    #[test]
    fn assignment_right_associates_and_folds() {
        // a = b = 1 → Assign(a, Assign(b, 1))
        let expr = parse_expr("a = b = 1;");
        let Expression::Assign { name, value } = &*expr else {
            panic!("expected assignment, got {expr:?}");
        };
        assert_eq!(name, "a");
        let Expression::Assign {
            name: inner_name,
            value: inner_value,
        } = &**value
        else {
            panic!("expected nested assignment");
        };
        assert_eq!(inner_name, "b");
        assert_eq!(**inner_value, Expression::LiteralInt(1));
    }

    #[test]
    fn assignment_to_non_variable_stays_binary() {
        let expr = parse_expr("a.b = 1;");
        let (left, op, _) = binary_parts(&expr);
        assert_eq!(op, K::Equal);
        assert!(matches!(**left, Expression::MemberAccess { .. }));
    }

    #[test]
    fn comparison_sits_below_arithmetic() {
        // 1 + 2 < 3 * 4 → (1 + 2) < (3 * 4)
        let expr = parse_expr("1 + 2 < 3 * 4;");
        let (left, op, right) = binary_parts(&expr);
        assert_eq!(op, K::Less);
        assert_eq!(binary_parts(left).1, K::Plus);
        assert_eq!(binary_parts(right).1, K::Star);
    }

    #[test]
    fn logical_operators_layer_under_comparison() {
        let expr = parse_expr("a == b and c or d;");
        let (left, op, _) = binary_parts(&expr);
        assert_eq!(op, K::Or);
        let (and_left, and_op, _) = binary_parts(left);
        assert_eq!(and_op, K::And);
        assert_eq!(binary_parts(and_left).1, K::EqualEqual);
    }

    #[test]
    fn prefix_unary_right_associates() {
        let expr = parse_expr("!!a;");
        let Expression::Unary { op, operand } = &*expr else {
            panic!("expected unary");
        };
        assert_eq!(*op, K::Bang);
        assert!(matches!(**operand, Expression::Unary { .. }));

        let expr = parse_expr("-1 + 2;");
        let (left, op, _) = binary_parts(&expr);
        assert_eq!(op, K::Plus);
        assert!(matches!(**left, Expression::Unary { .. }));
    }

    #[test]
    fn grouping_overrides_precedence() {
        let expr = parse_expr("(1 + 2) * 3;");
        let (left, op, _) = binary_parts(&expr);
        assert_eq!(op, K::Star);
        assert!(matches!(**left, Expression::Grouping { .. }));
    }

    #[test]
    fn postfix_chain_nests_left_to_right() {
        // a.b.c() → Call(Member(Member(a, b), c), [])
        let expr = parse_expr("a.b.c();");
        let Expression::FunctionCall { callee, args } = &*expr else {
            panic!("expected call, got {expr:?}");
        };
        assert!(args.is_empty());
        let Expression::MemberAccess { object, name } = &**callee else {
            panic!("expected member access");
        };
        assert_eq!(name, "c");
        let Expression::MemberAccess {
            object: inner_object,
            name: inner_name,
        } = &**object
        else {
            panic!("expected nested member access");
        };
        assert_eq!(inner_name, "b");
        assert_eq!(
            **inner_object,
            Expression::VarRef { name: "a".into() }
        );
    }

    #[test]
    fn call_arguments_parse_full_expressions() {
        let expr = parse_expr("f(1 + 2, g(3));");
        let Expression::FunctionCall { args, .. } = &*expr else {
            panic!("expected call");
        };
        assert_eq!(args.len(), 2);
        assert!(matches!(*args[0], Expression::Binary { .. }));
        assert!(matches!(*args[1], Expression::FunctionCall { .. }));
    }

    #[test]
    fn list_literals() {
        let expr = parse_expr("[1, 2, 3];");
        let Expression::LiteralList { elements } = &*expr else {
            panic!("expected list");
        };
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn lambda_in_var_decl() {
        let module = parse("var f = |x, y| { x + y; };").unwrap();
        let Statement::VarDecl { name, initializer } = &*module.statements[0] else {
            panic!("expected var declaration");
        };
        assert_eq!(name, "f");
        let Expression::Lambda { params, body } = &**initializer else {
            panic!("expected lambda initializer");
        };
        assert_eq!(params, &["x", "y"]);
        let Statement::Block { statements } = &**body else {
            panic!("expected block body");
        };
        assert_eq!(statements.len(), 1);
        let Statement::Expr { expression } = &*statements[0] else {
            panic!("expected expression statement in body");
        };
        assert_eq!(binary_parts(expression).1, K::Plus);
    }

    #[test]
    fn empty_lambda_params() {
        let expr = parse_expr("|| { 1; };");
        let Expression::Lambda { params, .. } = &*expr else {
            panic!("expected lambda");
        };
        assert!(params.is_empty());
    }

    #[test]
    fn statements_round_out_the_grammar() {
        let module = parse(
            "var x = 1;\n\
             if x > 0 { x; } elif x == 0 { 0; } else { return; }\n\
             while x < 10 { x = x + 1; }\n\
             for item in [1, 2] { item; }\n\
             return x;",
        )
        .unwrap();
        assert!(matches!(&*module.statements[0], Statement::VarDecl { .. }));
        let Statement::If {
            elif_branches,
            else_block,
            ..
        } = &*module.statements[1]
        else {
            panic!("expected if");
        };
        assert_eq!(elif_branches.len(), 1);
        assert!(else_block.is_some());
        assert!(matches!(&*module.statements[2], Statement::While { .. }));
        assert!(matches!(&*module.statements[3], Statement::For { .. }));
        assert!(matches!(&*module.statements[4], Statement::Return { .. }));
    }

    #[test]
    fn stray_semicolons_are_empty_statements() {
        let module = parse(";;1;").unwrap();
        assert!(matches!(&*module.statements[0], Statement::Empty));
        assert!(matches!(&*module.statements[1], Statement::Empty));
        assert!(matches!(&*module.statements[2], Statement::Expr { .. }));
    }

    #[test]
    fn error_coordinates_point_at_the_trigger() {
        let err = parse("var x = (1 + 2;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingRightParen);
        assert_eq!(err.coordinate, Coordinate::new(1, 15));
    }

    #[test]
    fn error_kinds() {
        let cases = [
            ("var ;", ParseErrorKind::UnexpectedToken),
            ("{ 1;", ParseErrorKind::MissingRightBrace),
            ("(1 + 2", ParseErrorKind::MissingRightParen),
            ("a.;", ParseErrorKind::ExpectedIdentifierAfterDot),
            ("|1| { };", ParseErrorKind::ExpectedIdentifierInLambdaParams),
            ("|x 1| { };", ParseErrorKind::ExpectedCommaOrPipeInLambda),
            ("|x| 1;", ParseErrorKind::ExpectedLeftBraceInLambdaBody),
            ("f(a b);", ParseErrorKind::ExpectedCommaOrRightParen),
            ("f(a,);", ParseErrorKind::UnexpectedToken),
            ("1 +", ParseErrorKind::UnexpectedEndOfInput),
            ("99999999999999999999;", ParseErrorKind::InvalidNumberFormat),
        ];
        for (source, expected) in cases {
            let err = parse(source).unwrap_err();
            assert_eq!(err.kind, expected, "source: {source:?}");
        }
    }

    #[test]
    fn lexical_error_tokens_are_unexpected() {
        let err = parse("var x = $;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn listeners_fire_in_textual_order() {
        #[derive(Default)]
        struct Recorder {
            events: Vec<String>,
        }

        impl ParseListener for Recorder {
            fn on_enter_module(&mut self) {
                self.events.push("enter module".into());
            }
            fn on_exit_module(&mut self, module: &Rc<Module>) {
                self.events.push(format!("exit module({})", module.statements.len()));
            }
            fn on_enter_statement(&mut self) {
                self.events.push("enter stmt".into());
            }
            fn on_exit_statement(&mut self, _: &StmtPtr) {
                self.events.push("exit stmt".into());
            }
        }

        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut parser = Parser::from_source("1; { 2; }");
        parser.bind_listener(recorder.clone());
        parser.parse().unwrap();

        assert_eq!(
            recorder.borrow().events,
            vec![
                "enter module",
                "enter stmt",
                "exit stmt",
                "enter stmt",      // the block
                "enter stmt",      // the inner statement
                "exit stmt",
                "exit stmt",
                "exit module(2)",
            ]
        );
    }

    #[test]
    fn listeners_may_retain_nodes() {
        #[derive(Default)]
        struct Keeper {
            expressions: Vec<ExprPtr>,
        }

        impl ParseListener for Keeper {
            fn on_exit_expr(&mut self, expression: &ExprPtr) {
                self.expressions.push(Rc::clone(expression));
            }
        }

        let keeper = Rc::new(RefCell::new(Keeper::default()));
        let mut parser = Parser::from_source("1 + 2;");
        parser.bind_listener(keeper.clone());
        let module = parser.parse().unwrap();
        drop(module);

        // The retained handles outlive the module.
        assert!(!keeper.borrow().expressions.is_empty());
        assert!(keeper
            .borrow()
            .expressions
            .iter()
            .any(|e| matches!(&**e, Expression::Binary { .. })));
    }

    #[test]
    fn parser_requires_expression_after_operator() {
        let err = parse("* 2;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }
}
