// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse listeners and shared AST walkers.
//!
//! Two ways to observe an AST:
//!
//! - [`ParseListener`] — incremental: bound to a [`crate::parse::Parser`],
//!   its callbacks fire around each production while parsing runs.
//!   `on_enter_*` fires before the first token of a production is
//!   consumed (so there is no node yet); `on_exit_*` fires with the
//!   fully-built node. Nodes arrive as shared handles, so a listener may
//!   retain them beyond the callback.
//! - [`walk_expression`] / [`walk_statement`] / [`walk_module`] — batch:
//!   pre-order recursive walks over a finished tree, calling a visitor
//!   closure on every node.
//!
//! [`AstPrinter`] is the built-in listener: it captures the module on
//! exit and renders an indented dump.

use std::fmt::Write as _;
use std::rc::Rc;

use crate::ast::{ExprPtr, Expression, Module, Statement, StmtPtr};

/// Callbacks invoked by the parser around each production.
///
/// All methods default to no-ops; implement only what you need.
/// Listeners must not assume exclusive ownership of the nodes they
/// receive — the tree is shared — and they cannot mutate it.
pub trait ParseListener {
    /// Fired before the first statement of the module is parsed.
    fn on_enter_module(&mut self) {}

    /// Fired with the finished module.
    fn on_exit_module(&mut self, module: &Rc<Module>) {
        let _ = module;
    }

    /// Fired before the first token of a statement is consumed.
    fn on_enter_statement(&mut self) {}

    /// Fired with each finished statement.
    fn on_exit_statement(&mut self, statement: &StmtPtr) {
        let _ = statement;
    }

    /// Fired before the first token of an expression is consumed.
    fn on_enter_expr(&mut self) {}

    /// Fired with each finished expression.
    fn on_exit_expr(&mut self, expression: &ExprPtr) {
        let _ = expression;
    }
}

// ── Pre-order walkers ─────────────────────────────────────────────────────────

/// Recursively walks an expression tree in pre-order, calling `f` on every
/// node before recursing into its children.
pub fn walk_expression<F>(expr: &ExprPtr, f: &mut F)
where
    F: FnMut(&ExprPtr),
{
    f(expr);
    match &**expr {
        Expression::Binary { left, right, .. } => {
            walk_expression(left, f);
            walk_expression(right, f);
        }
        Expression::Unary { operand, .. } => walk_expression(operand, f),
        Expression::Grouping { inner } => walk_expression(inner, f),
        Expression::FunctionCall { callee, args } => {
            walk_expression(callee, f);
            for arg in args {
                walk_expression(arg, f);
            }
        }
        Expression::MemberAccess { object, .. } => walk_expression(object, f),
        Expression::Assign { value, .. } => walk_expression(value, f),
        Expression::LiteralList { elements } => {
            for element in elements {
                walk_expression(element, f);
            }
        }
        // Lambda bodies are statements; walk them separately if needed.
        Expression::Lambda { .. }
        | Expression::LiteralInt(_)
        | Expression::LiteralString(_)
        | Expression::LiteralTrue
        | Expression::LiteralFalse
        | Expression::LiteralNull
        | Expression::VarRef { .. } => {}
    }
}

/// Recursively walks a statement tree in pre-order, calling `f` on every
/// statement before recursing.
pub fn walk_statement<F>(stmt: &StmtPtr, f: &mut F)
where
    F: FnMut(&StmtPtr),
{
    f(stmt);
    match &**stmt {
        Statement::Block { statements } => {
            for s in statements {
                walk_statement(s, f);
            }
        }
        Statement::If {
            then_block,
            elif_branches,
            else_block,
            ..
        } => {
            walk_statement(then_block, f);
            for (_, block) in elif_branches {
                walk_statement(block, f);
            }
            if let Some(block) = else_block {
                walk_statement(block, f);
            }
        }
        Statement::While { body, .. } | Statement::For { body, .. } => {
            walk_statement(body, f);
        }
        Statement::Expr { .. }
        | Statement::Empty
        | Statement::VarDecl { .. }
        | Statement::Return { .. } => {}
    }
}

/// Walks every statement of a module in pre-order.
pub fn walk_module<F>(module: &Module, f: &mut F)
where
    F: FnMut(&StmtPtr),
{
    for stmt in &module.statements {
        walk_statement(stmt, f);
    }
}

// ── Built-in printer ──────────────────────────────────────────────────────────

/// Listener that captures the parsed module and renders an indented dump.
///
/// ```
/// use kaubo_core::ast_walker::AstPrinter;
/// use kaubo_core::parse::Parser;
///
/// let module = Parser::from_source("var x = 1;").parse().unwrap();
/// let dump = AstPrinter::render(&module);
/// assert!(dump.contains("VarDecl: x"));
/// ```
#[derive(Debug, Default)]
pub struct AstPrinter {
    module: Option<Rc<Module>>,
}

impl AstPrinter {
    /// Creates a printer with nothing captured yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the module captured by `on_exit_module`, if parsing ran.
    #[must_use]
    pub fn module(&self) -> Option<&Rc<Module>> {
        self.module.as_ref()
    }

    /// Renders an indented dump of a module.
    #[must_use]
    pub fn render(module: &Module) -> String {
        let mut out = String::from("Module:\n");
        for stmt in &module.statements {
            Self::render_statement(stmt, 1, &mut out);
        }
        out
    }

    fn indent(depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
    }

    fn render_statement(stmt: &Statement, depth: usize, out: &mut String) {
        Self::indent(depth, out);
        match stmt {
            Statement::Expr { expression } => {
                out.push_str("ExprStmt:\n");
                Self::render_expression(expression, depth + 1, out);
            }
            Statement::Empty => out.push_str("EmptyStmt\n"),
            Statement::Block { statements } => {
                out.push_str("Block:\n");
                for s in statements {
                    Self::render_statement(s, depth + 1, out);
                }
            }
            Statement::VarDecl { name, initializer } => {
                let _ = writeln!(out, "VarDecl: {name}");
                Self::render_expression(initializer, depth + 1, out);
            }
            Statement::If {
                condition,
                then_block,
                elif_branches,
                else_block,
            } => {
                out.push_str("If:\n");
                Self::render_expression(condition, depth + 1, out);
                Self::render_statement(then_block, depth + 1, out);
                for (cond, block) in elif_branches {
                    Self::indent(depth, out);
                    out.push_str("Elif:\n");
                    Self::render_expression(cond, depth + 1, out);
                    Self::render_statement(block, depth + 1, out);
                }
                if let Some(block) = else_block {
                    Self::indent(depth, out);
                    out.push_str("Else:\n");
                    Self::render_statement(block, depth + 1, out);
                }
            }
            Statement::While { condition, body } => {
                out.push_str("While:\n");
                Self::render_expression(condition, depth + 1, out);
                Self::render_statement(body, depth + 1, out);
            }
            Statement::For {
                iterator,
                iterable,
                body,
            } => {
                out.push_str("For:\n");
                Self::render_expression(iterator, depth + 1, out);
                Self::render_expression(iterable, depth + 1, out);
                Self::render_statement(body, depth + 1, out);
            }
            Statement::Return { value } => {
                out.push_str("Return:\n");
                if let Some(value) = value {
                    Self::render_expression(value, depth + 1, out);
                }
            }
        }
    }

    fn render_expression(expr: &Expression, depth: usize, out: &mut String) {
        Self::indent(depth, out);
        match expr {
            Expression::LiteralInt(value) => {
                let _ = writeln!(out, "Int: {value}");
            }
            Expression::LiteralString(value) => {
                let _ = writeln!(out, "String: {value:?}");
            }
            Expression::LiteralTrue => out.push_str("True\n"),
            Expression::LiteralFalse => out.push_str("False\n"),
            Expression::LiteralNull => out.push_str("Null\n"),
            Expression::LiteralList { elements } => {
                out.push_str("List:\n");
                for element in elements {
                    Self::render_expression(element, depth + 1, out);
                }
            }
            Expression::VarRef { name } => {
                let _ = writeln!(out, "VarRef: {name}");
            }
            Expression::Binary { left, op, right } => {
                let _ = writeln!(out, "Binary: {op}");
                Self::render_expression(left, depth + 1, out);
                Self::render_expression(right, depth + 1, out);
            }
            Expression::Unary { op, operand } => {
                let _ = writeln!(out, "Unary: {op}");
                Self::render_expression(operand, depth + 1, out);
            }
            Expression::Grouping { inner } => {
                out.push_str("Grouping:\n");
                Self::render_expression(inner, depth + 1, out);
            }
            Expression::FunctionCall { callee, args } => {
                out.push_str("Call:\n");
                Self::render_expression(callee, depth + 1, out);
                for arg in args {
                    Self::render_expression(arg, depth + 1, out);
                }
            }
            Expression::MemberAccess { object, name } => {
                let _ = writeln!(out, "Member: {name}");
                Self::render_expression(object, depth + 1, out);
            }
            Expression::Lambda { params, body } => {
                let names: Vec<&str> = params.iter().map(ecow::EcoString::as_str).collect();
                let _ = writeln!(out, "Lambda: |{}|", names.join(", "));
                Self::render_statement(body, depth + 1, out);
            }
            Expression::Assign { name, value } => {
                let _ = writeln!(out, "Assign: {name}");
                Self::render_expression(value, depth + 1, out);
            }
        }
    }
}

impl ParseListener for AstPrinter {
    fn on_exit_module(&mut self, module: &Rc<Module>) {
        self.module = Some(Rc::clone(module));
    }
}
