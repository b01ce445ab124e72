//! Statement rendering

use crate::codemodel::{CatchClause, Statement};

use super::{Emitter, Result};

impl Emitter<'_> {
    /// A `{ ... }` block; the header is already on the current line.
    pub(super) fn block(&mut self, statements: &[Statement]) -> Result {
        self.open_block();
        self.statements(statements)?;
        self.close_block();
        Ok(())
    }

    pub(super) fn statements(&mut self, statements: &[Statement]) -> Result {
        for statement in statements {
            self.statement(statement)?;
        }
        Ok(())
    }

    pub(super) fn statement(&mut self, statement: &Statement) -> Result {
        match statement {
            Statement::Assign { .. } | Statement::VariableDecl { .. } | Statement::Expression(_) => {
                self.inline_statement(statement)?;
                self.w.line(";");
            }
            Statement::Condition {
                condition,
                then_branch,
                else_branch,
            } => {
                self.w.write("if (");
                self.condition(condition)?;
                self.w.write(")");
                self.block(then_branch)?;
                if !else_branch.is_empty() {
                    self.w.write("else");
                    self.block(else_branch)?;
                }
            }
            Statement::Iteration {
                init,
                test,
                increment,
                body,
            } => {
                self.w.write("for (");
                if let Some(init) = init {
                    self.inline_statement(init)?;
                }
                self.w.write("; ");
                if let Some(test) = test {
                    self.condition(test)?;
                }
                self.w.write("; ");
                if let Some(increment) = increment {
                    self.inline_statement(increment)?;
                }
                self.w.write(")");
                self.block(body)?;
            }
            Statement::TryCatchFinally {
                try_block,
                catches,
                finally_block,
            } => {
                self.w.write("try");
                self.block(try_block)?;
                for clause in catches {
                    self.catch_clause(clause)?;
                }
                if !finally_block.is_empty() {
                    self.w.write("finally");
                    self.block(finally_block)?;
                }
            }
            Statement::Return(value) => {
                self.w.write("return");
                if let Some(value) = value {
                    self.w.write(" ");
                    self.expression(value)?;
                }
                self.w.line(";");
            }
            Statement::Throw(value) => {
                self.w.write("throw");
                if let Some(value) = value {
                    self.w.write(" ");
                    self.expression(value)?;
                }
                self.w.line(";");
            }
            Statement::Comment { text, is_doc } => {
                let prefix = if *is_doc { "///" } else { "//" };
                self.comment_lines(prefix, text);
            }
            Statement::Snippet(text) => self.w.line(text),
            Statement::Labeled { label, statement } => {
                let label = self.identifier(label, "label")?;
                self.w.line(&format!("{}:", label));
                if let Some(statement) = statement {
                    self.statement(statement)?;
                }
            }
            Statement::Goto(label) => {
                let label = self.identifier(label, "label")?;
                self.w.line(&format!("goto {};", label));
            }
        }
        Ok(())
    }

    /// Statements that can appear inside a `for` header, without the `;`
    fn inline_statement(&mut self, statement: &Statement) -> Result {
        match statement {
            Statement::Assign { left, right } => {
                self.expression(left)?;
                self.w.write(" = ");
                self.expression(right)?;
            }
            Statement::VariableDecl { ty, name, init } => {
                self.type_ref(ty)?;
                let name = self.identifier(name, "variable")?;
                self.w.write(" ");
                self.w.write(&name);
                if let Some(init) = init {
                    self.w.write(" = ");
                    self.expression(init)?;
                }
            }
            Statement::Expression(expr) => self.expression(expr)?,
            Statement::Snippet(text) => self.w.write(text),
            other => {
                tracing::warn!(statement = ?other, "statement cannot be rendered inline, skipped");
            }
        }
        Ok(())
    }

    fn catch_clause(&mut self, clause: &CatchClause) -> Result {
        self.w.write("catch (");
        self.type_ref(&clause.exception_type)?;
        if let Some(variable) = &clause.variable {
            let variable = self.identifier(variable, "catch variable")?;
            self.w.write(" ");
            self.w.write(&variable);
        }
        self.w.write(")");
        self.block(&clause.body)
    }

    /// One comment line per text line
    pub(super) fn comment_lines(&mut self, prefix: &str, text: &str) {
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.w.line(prefix);
            } else {
                self.w.line(&format!("{} {}", prefix, line));
            }
        }
    }
}
