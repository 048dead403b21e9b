//! Comment stripping (spec §4.1).
//!
//! Unlike the teacher's `skip_block_comment` (which tracks nesting depth),
//! block comments here do **not** nest: the first `*/` after a `/*` always
//! closes it, matching spec.md's explicit "nesting is not supported" and
//! known limitation 4 (an unterminated block comment silently swallows the
//! rest of the file).

use super::core::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace, line comments, and block comments in a loop until
    /// a real token could start (or the input ends).
    pub(super) fn skip_trivia(&mut self) {
        loop {
            if self.cursor.is_at_end() {
                return;
            }
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.cursor.advance();
                }
                b'/' if self.cursor.peek_at(1) == b'/' => self.skip_line_comment(),
                b'/' if self.cursor.peek_at(1) == b'*' => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
            self.cursor.advance();
        }
    }

    /// Consumes from `/*` through the next `*/`. If none is found before
    /// end of input, the rest of the file is discarded (known limitation,
    /// spec §9 item 4) — silently, with no diagnostic.
    fn skip_block_comment(&mut self) {
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'
        while !self.cursor.is_at_end() {
            if self.cursor.current() == b'*' && self.cursor.peek_at(1) == b'/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }
}
