//! `class`, `classVarDec`, and `subroutineDec` (spec §4.3 grammar / "Class
//! prologue" and "Subroutine entry" code-generation rules).

use crate::{CompilationEngine, Segment};
use jackvm_lex::Keyword;
use jackvm_sym::{Kind, VarKind};
use jackvm_util::CompileResult;
use std::io::Write;

/// Maps a resolved [`Kind`] to the VM segment spec §4.3's "Segment
/// mapping" names. A name that fails to resolve (`Kind::None`) has no
/// defined segment — declared-name lookup is the only check this engine
/// performs (spec §1 Non-goals exclude type checking), so this falls back
/// to `constant`, which a well-formed program never reaches.
pub(crate) fn segment_for(kind: Kind) -> Segment {
    match kind {
        Kind::Static => Segment::Static,
        Kind::Field => Segment::This,
        Kind::Argument => Segment::Argument,
        Kind::Local => Segment::Local,
        Kind::None => Segment::Constant,
    }
}

impl<W: Write> CompilationEngine<W> {
    /// `class = 'class' ID '{' classVarDec* subroutineDec* '}'`
    pub(crate) fn compile_class(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Class)?;
        self.class_name = self.expect_identifier()?;
        self.expect_symbol('{')?;

        while self.peek_is_keyword(Keyword::Static) || self.peek_is_keyword(Keyword::Field) {
            self.compile_class_var_dec()?;
        }

        while self.peek_is_keyword(Keyword::Constructor)
            || self.peek_is_keyword(Keyword::Function)
            || self.peek_is_keyword(Keyword::Method)
        {
            self.compile_subroutine()?;
        }

        self.expect_symbol('}')?;
        Ok(())
    }

    /// `classVarDec = ('static'|'field') type ID (',' ID)* ';'`
    ///
    /// Only updates the symbol table; emits no VM code (spec §4.3).
    fn compile_class_var_dec(&mut self) -> CompileResult<()> {
        self.tokens.advance();
        let kind = match self.tokens.keyword_of_current()? {
            Keyword::Static => VarKind::Static,
            Keyword::Field => VarKind::Field,
            _ => unreachable!("caller checked peek_is_keyword(Static|Field)"),
        };
        let declared_type = self.expect_type()?;
        let name = self.expect_identifier()?;
        self.symbols.define(&name, &declared_type, kind);
        while self.peek_is_symbol(',') {
            self.expect_symbol(',')?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &declared_type, kind);
        }
        self.expect_symbol(';')?;
        Ok(())
    }

    /// `subroutineDec = ('constructor'|'function'|'method') ('void'|type) ID
    /// '(' parameterList ')' subroutineBody`
    fn compile_subroutine(&mut self) -> CompileResult<()> {
        self.tokens.advance();
        let subroutine_kind = self.tokens.keyword_of_current()?;

        self.symbols.start_subroutine();
        if subroutine_kind == Keyword::Method {
            self.symbols
                .define("this", &self.class_name.clone(), VarKind::Argument);
        }

        // Return type: 'void' or a type. Neither is used in codegen (spec
        // §1 Non-goals: no type checking), but must still be consumed.
        if self.peek_is_keyword(Keyword::Void) {
            self.tokens.advance();
        } else {
            self.expect_type()?;
        }

        self.subroutine_name = self.expect_identifier()?;
        self.expect_symbol('(')?;
        self.compile_parameter_list()?;
        self.expect_symbol(')')?;

        self.compile_subroutine_body(subroutine_kind)?;
        Ok(())
    }

    /// `parameterList = ( type ID (',' type ID)* )?`
    fn compile_parameter_list(&mut self) -> CompileResult<()> {
        if self.peek_is_symbol(')') {
            return Ok(());
        }
        let declared_type = self.expect_type()?;
        let name = self.expect_identifier()?;
        self.symbols.define(&name, &declared_type, VarKind::Argument);
        while self.peek_is_symbol(',') {
            self.expect_symbol(',')?;
            let declared_type = self.expect_type()?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &declared_type, VarKind::Argument);
        }
        Ok(())
    }

    /// `subroutineBody = '{' varDec* statement* '}'`, preceded by the
    /// `function`/preamble emission spec §4.3's "Subroutine entry" rule
    /// describes (steps 4–6 happen here, once `n_locals` is known).
    fn compile_subroutine_body(&mut self, subroutine_kind: Keyword) -> CompileResult<()> {
        self.expect_symbol('{')?;

        while self.peek_is_keyword(Keyword::Var) {
            self.compile_var_dec()?;
        }

        let n_locals = self.symbols.var_count(VarKind::Local);
        self.writer
            .write_function(&format!("{}.{}", self.class_name, self.subroutine_name), n_locals)?;

        match subroutine_kind {
            Keyword::Method => {
                self.writer.write_push(Segment::Argument, 0)?;
                self.writer.write_pop(Segment::Pointer, 0)?;
            }
            Keyword::Constructor => {
                let n_fields = self.symbols.var_count(VarKind::Field);
                self.writer.write_push(Segment::Constant, n_fields as i32)?;
                self.writer.write_call("Memory.alloc", 1)?;
                self.writer.write_pop(Segment::Pointer, 0)?;
            }
            Keyword::Function => {}
            _ => unreachable!("caller checked peek_is_keyword(Constructor|Function|Method)"),
        }

        self.compile_statements()?;
        self.expect_symbol('}')?;
        Ok(())
    }

    /// `varDec = 'var' type ID (',' ID)* ';'`
    ///
    /// Only updates the symbol table; emits no VM code.
    fn compile_var_dec(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Var)?;
        let declared_type = self.expect_type()?;
        let name = self.expect_identifier()?;
        self.symbols.define(&name, &declared_type, VarKind::Local);
        while self.peek_is_symbol(',') {
            self.expect_symbol(',')?;
            let name = self.expect_identifier()?;
            self.symbols.define(&name, &declared_type, VarKind::Local);
        }
        self.expect_symbol(';')?;
        Ok(())
    }
}
