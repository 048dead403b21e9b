//! `expression`, `term`, `subroutineCall`, and `expressionList` (spec
//! §4.3 grammar / "Expression", "Term", "Subroutine call" code-generation
//! rules).
//!
//! No operator-precedence table: per spec §4.3, evaluation is strictly
//! left-associative with every operator binding equally, so
//! `compile_expression` folds left to right as operators are encountered
//! rather than building a precedence-climbing tree (contrast the
//! teacher's Pratt parser in `faxc-par::expr`, kept as reference elsewhere
//! in this workspace while this crate was built).

use crate::class_decl::segment_for;
use crate::{unexpected_token, CompilationEngine, Segment};
use jackvm_lex::{Keyword, TokenKind};
use jackvm_sym::Kind;
use jackvm_util::{CompileResult, ExpectedKind};
use std::io::Write;

impl<W: Write> CompilationEngine<W> {
    /// `expression = term (op term)*`
    pub(crate) fn compile_expression(&mut self) -> CompileResult<()> {
        self.compile_term()?;
        while self.peek_is_operator() {
            self.tokens.advance();
            let op = self.tokens.symbol_of_current()?;
            self.compile_term()?;
            match op {
                '+' => self.writer.write_add()?,
                '-' => self.writer.write_sub()?,
                '*' => self.writer.write_call("Math.multiply", 2)?,
                '/' => self.writer.write_call("Math.divide", 2)?,
                '<' => self.writer.write_lt()?,
                '>' => self.writer.write_gt()?,
                '=' => self.writer.write_eq()?,
                '&' => self.writer.write_and()?,
                '|' => self.writer.write_or()?,
                _ => unreachable!("peek_is_operator restricts op to the operator set"),
            }
        }
        Ok(())
    }

    /// True iff the next token (not yet consumed) is one of
    /// `+ - * / & | < > =` (spec §4.1 `is_operator_current`, applied here
    /// to the lookahead token rather than the just-consumed one, per the
    /// `peek`-based lookahead spec §9 sanctions).
    fn peek_is_operator(&self) -> bool {
        matches!(self.tokens.peek(), Some(jackvm_lex::Token::Symbol(c)) if jackvm_lex::OPERATOR_CHARS.contains(c))
    }

    /// ```text
    /// term = INT | STRING | keywordConst | ID
    ///      | ID '[' expression ']'
    ///      | subroutineCall
    ///      | '(' expression ')' | ('-'|'~') term
    /// ```
    fn compile_term(&mut self) -> CompileResult<()> {
        self.tokens.advance();
        let span = self.tokens.current_span();
        match self.tokens.kind_of_current() {
            Some(TokenKind::IntLiteral) => {
                let n = self.tokens.int_value_of_current()?;
                self.writer.write_push(Segment::Constant, n as i32)
            }
            Some(TokenKind::StringLiteral) => {
                let s = self.tokens.string_value_of_current()?.to_string();
                self.writer.write_push(Segment::Constant, s.len() as i32)?;
                self.writer.write_call("String.new", 1)?;
                for byte in s.bytes() {
                    self.writer.write_push(Segment::Constant, byte as i32)?;
                    self.writer.write_call("String.appendChar", 2)?;
                }
                Ok(())
            }
            Some(TokenKind::Keyword) => {
                let k = self.tokens.keyword_of_current()?;
                match k {
                    Keyword::True => {
                        self.writer.write_push(Segment::Constant, 0)?;
                        self.writer.write_not()
                    }
                    Keyword::False | Keyword::Null => self.writer.write_push(Segment::Constant, 0),
                    Keyword::This => self.writer.write_push(Segment::Pointer, 0),
                    _ => Err(unexpected_token(
                        span,
                        ExpectedKind::Described("a term"),
                        self.tokens.describe_current(),
                    )),
                }
            }
            Some(TokenKind::Symbol) => {
                let c = self.tokens.symbol_of_current()?;
                match c {
                    '(' => {
                        self.compile_expression()?;
                        self.expect_symbol(')')
                    }
                    '-' => {
                        self.compile_term()?;
                        self.writer.write_neg()
                    }
                    '~' => {
                        self.compile_term()?;
                        self.writer.write_not()
                    }
                    _ => Err(unexpected_token(
                        span,
                        ExpectedKind::Described("a term"),
                        self.tokens.describe_current(),
                    )),
                }
            }
            Some(TokenKind::Identifier) => {
                let name = self.tokens.identifier_of_current()?.to_string();
                if self.peek_is_symbol('[') {
                    // Array r-value (spec §4.3 "Term").
                    let segment = segment_for(self.symbols.kind_of(&name));
                    let index = self.symbols.index_of(&name);
                    self.writer.write_push(segment, index)?;
                    self.expect_symbol('[')?;
                    self.compile_expression()?;
                    self.expect_symbol(']')?;
                    self.writer.write_add()?;
                    self.writer.write_pop(Segment::Pointer, 1)?;
                    self.writer.write_push(Segment::That, 0)
                } else if self.peek_is_symbol('(') || self.peek_is_symbol('.') {
                    // It's a subroutine call; undo this one advance so
                    // `compile_subroutine_call` can read the identifier
                    // itself (spec §4.3 "Term": "step back ... and
                    // dispatch to subroutine call").
                    self.tokens.step_back();
                    self.compile_subroutine_call()
                } else {
                    let segment = segment_for(self.symbols.kind_of(&name));
                    let index = self.symbols.index_of(&name);
                    self.writer.write_push(segment, index)
                }
            }
            None => Err(unexpected_token(
                span,
                ExpectedKind::Described("a term"),
                self.tokens.describe_current(),
            )),
        }
    }

    /// ```text
    /// subroutineCall = ID '(' expressionList ')'
    ///                | ID '.' ID '(' expressionList ')'
    /// ```
    pub(crate) fn compile_subroutine_call(&mut self) -> CompileResult<()> {
        let n1 = self.expect_identifier()?;

        if self.peek_is_symbol('(') {
            // Method call on the current object (spec §4.3 "Subroutine
            // call"): push `this` as the hidden receiver argument.
            self.writer.write_push(Segment::Pointer, 0)?;
            self.expect_symbol('(')?;
            let count = self.compile_expression_list()?;
            self.expect_symbol(')')?;
            self.writer
                .write_call(&format!("{}.{n1}", self.class_name), count + 1)
        } else {
            self.expect_symbol('.')?;
            let n2 = self.expect_identifier()?;
            let kind = self.symbols.kind_of(&n1);
            self.expect_symbol('(')?;

            if matches!(kind, Kind::None) {
                // Unknown: a bare class-qualified function call, no
                // hidden `this` (spec §4.3 "Subroutine call").
                let count = self.compile_expression_list()?;
                self.expect_symbol(')')?;
                self.writer.write_call(&format!("{n1}.{n2}"), count)
            } else {
                // Known: `n1` is an instance variable.
                let segment = segment_for(kind);
                let index = self.symbols.index_of(&n1);
                self.writer.write_push(segment, index)?;
                let count = self.compile_expression_list()?;
                self.expect_symbol(')')?;
                let declared_type = self.symbols.type_of(&n1);
                self.writer
                    .write_call(&format!("{declared_type}.{n2}"), count + 1)
            }
        }
    }

    /// `expressionList = ( expression (',' expression)* )?` — returns the
    /// number of expressions compiled.
    fn compile_expression_list(&mut self) -> CompileResult<u16> {
        if self.peek_is_symbol(')') {
            return Ok(0);
        }
        self.compile_expression()?;
        let mut count = 1;
        while self.peek_is_symbol(',') {
            self.expect_symbol(',')?;
            self.compile_expression()?;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::compile_ok;

    #[test]
    fn static_vs_method_call_dispatch() {
        // spec §8 scenario 6: a bare `Class.sub()` call has no hidden
        // receiver; a call on a known instance variable pushes it first
        // and calls through the variable's declared type.
        let vm = compile_ok(
            "class C { field Foo obj; \
             function void f() { do Foo.bar(); do obj.baz(); return; } }",
        );
        assert_eq!(
            vm,
            "function C.f 0\n\
             call Foo.bar 0\n\
             pop temp 0\n\
             push this 0\n\
             call Foo.baz 1\n\
             pop temp 0\n\
             push constant 0\n\
             return\n"
        );
    }

    #[test]
    fn method_call_with_no_explicit_receiver_pushes_this() {
        let vm = compile_ok("class A { method void f() { do g(); return; } method void g() { return; } }");
        assert!(vm.contains("push pointer 0\ncall A.g 1\npop temp 0\n"));
    }

    #[test]
    fn expression_is_flat_left_to_right_with_no_precedence() {
        // `2 + 3 * 4` must compile as `(2 + 3) * 4`, not `2 + (3 * 4)`.
        let vm = compile_ok("class A { function int f() { return 2 + 3 * 4; } }");
        assert_eq!(
            vm,
            "function A.f 0\n\
             push constant 2\n\
             push constant 3\n\
             add\n\
             push constant 4\n\
             call Math.multiply 2\n\
             return\n"
        );
    }

    #[test]
    fn string_literal_emits_new_then_one_append_call_per_byte() {
        let vm = compile_ok("class A { function void f() { do Output.printString(\"ab\"); return; } }");
        assert!(vm.contains(
            "push constant 2\n\
             call String.new 1\n\
             push constant 97\n\
             call String.appendChar 2\n\
             push constant 98\n\
             call String.appendChar 2\n"
        ));
    }

    #[test]
    fn unary_minus_and_not_wrap_a_single_term() {
        let vm = compile_ok("class A { function int f() { return -5; } }");
        assert_eq!(vm, "function A.f 0\npush constant 5\nneg\nreturn\n");

        let vm = compile_ok("class A { function boolean f() { return ~true; } }");
        assert_eq!(
            vm,
            "function A.f 0\npush constant 0\nnot\nnot\nreturn\n"
        );
    }

    #[test]
    fn keyword_constants_true_false_null_this() {
        let vm = compile_ok("class A { function boolean f() { return false; } }");
        assert_eq!(vm, "function A.f 0\npush constant 0\nreturn\n");

        let vm = compile_ok("class A { function boolean f() { return null; } }");
        assert_eq!(vm, "function A.f 0\npush constant 0\nreturn\n");

        let vm = compile_ok("class A { method A f() { return this; } }");
        assert_eq!(
            vm,
            "function A.f 0\npush argument 0\npop pointer 0\npush pointer 0\nreturn\n"
        );
    }

    #[test]
    fn array_r_value_pops_through_pointer_one() {
        let vm =
            compile_ok("class A { function int f(Array a) { return a[1] + 2; } }");
        assert_eq!(
            vm,
            "function A.f 0\n\
             push argument 0\n\
             push constant 1\n\
             add\n\
             pop pointer 1\n\
             push that 0\n\
             push constant 2\n\
             add\n\
             return\n"
        );
    }
}
