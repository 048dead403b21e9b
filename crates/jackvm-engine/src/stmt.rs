//! `statement` and its five alternatives (spec §4.3 grammar / "Let", "If",
//! "While", "Do", "Return" code-generation rules).

use crate::class_decl::segment_for;
use crate::{CompilationEngine, Segment};
use jackvm_lex::Keyword;
use jackvm_util::CompileResult;
use std::io::Write;

impl<W: Write> CompilationEngine<W> {
    /// `statement* ` — zero or more statements, stopping at the first
    /// token that doesn't start one (i.e. the enclosing `}`).
    pub(crate) fn compile_statements(&mut self) -> CompileResult<()> {
        loop {
            if self.peek_is_keyword(Keyword::Let) {
                self.compile_let()?;
            } else if self.peek_is_keyword(Keyword::If) {
                self.compile_if()?;
            } else if self.peek_is_keyword(Keyword::While) {
                self.compile_while()?;
            } else if self.peek_is_keyword(Keyword::Do) {
                self.compile_do()?;
            } else if self.peek_is_keyword(Keyword::Return) {
                self.compile_return()?;
            } else {
                return Ok(());
            }
        }
    }

    /// `letStmt = 'let' ID ('[' expression ']')? '=' expression ';'`
    fn compile_let(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Let)?;
        let name = self.expect_identifier()?;
        let kind = self.symbols.kind_of(&name);
        let index = self.symbols.index_of(&name);
        let segment = segment_for(kind);

        if self.peek_is_symbol('[') {
            // Array l-value (spec §4.3 "Let").
            self.writer.write_push(segment, index)?;
            self.expect_symbol('[')?;
            self.compile_expression()?;
            self.expect_symbol(']')?;
            self.writer.write_add()?;

            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;

            self.writer.write_pop(Segment::Temp, 0)?;
            self.writer.write_pop(Segment::Pointer, 1)?;
            self.writer.write_push(Segment::Temp, 0)?;
            self.writer.write_pop(Segment::That, 0)?;
        } else {
            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;
            self.writer.write_pop(segment, index)?;
        }
        Ok(())
    }

    /// `ifStmt = 'if' '(' expression ')' '{' statement* '}'
    ///           ('else' '{' statement* '}')?`
    fn compile_if(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::If)?;
        let label_else = self.next_label();
        let label_end = self.next_label();

        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;

        self.writer.write_not()?;
        self.writer.write_if_goto(&label_else)?;

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        self.writer.write_goto(&label_end)?;
        self.writer.write_label(&label_else)?;

        if self.peek_is_keyword(Keyword::Else) {
            self.expect_keyword(Keyword::Else)?;
            self.expect_symbol('{')?;
            self.compile_statements()?;
            self.expect_symbol('}')?;
        }

        self.writer.write_label(&label_end)?;
        Ok(())
    }

    /// `whileStmt = 'while' '(' expression ')' '{' statement* '}'`
    ///
    /// Label allocation order: the exit label is allocated *before* the
    /// top label (spec §4.3 design note; both orderings are correct, this
    /// is the chosen one).
    fn compile_while(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::While)?;
        let label_exit = self.next_label();
        let label_top = self.next_label();

        self.writer.write_label(&label_top)?;

        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;

        self.writer.write_not()?;
        self.writer.write_if_goto(&label_exit)?;

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        self.writer.write_goto(&label_top)?;
        self.writer.write_label(&label_exit)?;
        Ok(())
    }

    /// `doStmt = 'do' subroutineCall ';'`
    fn compile_do(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Do)?;
        self.compile_subroutine_call()?;
        self.expect_symbol(';')?;
        self.writer.write_pop(Segment::Temp, 0)?;
        Ok(())
    }

    /// `returnStmt = 'return' expression? ';'`
    fn compile_return(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Return)?;
        if self.peek_is_symbol(';') {
            self.writer.write_push(Segment::Constant, 0)?;
        } else {
            self.compile_expression()?;
        }
        self.expect_symbol(';')?;
        self.writer.write_return()?;
        Ok(())
    }
}
