//! The VM Writer (spec §4.4): a stateless sink over an output byte stream.
//!
//! Each call emits exactly one line. Verbs and segment names are written
//! exactly as spec §4.3/§4.4 list them; the downstream VM translator is
//! documented as tolerant of the trailing whitespace a fixed `"{} {} {}\n"`
//! template produces for zero-argument verbs, so no per-verb formatting
//! branches are needed.

use jackvm_util::{CompileError, CompileResult};
use std::io::Write;

/// The eight VM memory segments (spec glossary).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    fn as_str(self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }
}

/// Wraps an output stream, translating each code-generation call into one
/// line of VM text (spec §4.4).
pub struct VmWriter<W: Write> {
    out: W,
}

impl<W: Write> VmWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn emit(&mut self, line: &str) -> CompileResult<()> {
        writeln!(self.out, "{line}").map_err(|e| CompileError::UnwritableOutput(e.to_string()))
    }

    pub fn write_push(&mut self, segment: Segment, index: i32) -> CompileResult<()> {
        self.emit(&format!("push {} {}", segment.as_str(), index))
    }

    pub fn write_pop(&mut self, segment: Segment, index: i32) -> CompileResult<()> {
        self.emit(&format!("pop {} {}", segment.as_str(), index))
    }

    pub fn write_add(&mut self) -> CompileResult<()> {
        self.emit("add")
    }

    pub fn write_sub(&mut self) -> CompileResult<()> {
        self.emit("sub")
    }

    pub fn write_neg(&mut self) -> CompileResult<()> {
        self.emit("neg")
    }

    pub fn write_eq(&mut self) -> CompileResult<()> {
        self.emit("eq")
    }

    pub fn write_gt(&mut self) -> CompileResult<()> {
        self.emit("gt")
    }

    pub fn write_lt(&mut self) -> CompileResult<()> {
        self.emit("lt")
    }

    pub fn write_and(&mut self) -> CompileResult<()> {
        self.emit("and")
    }

    pub fn write_or(&mut self) -> CompileResult<()> {
        self.emit("or")
    }

    pub fn write_not(&mut self) -> CompileResult<()> {
        self.emit("not")
    }

    pub fn write_label(&mut self, label: &str) -> CompileResult<()> {
        self.emit(&format!("label {label}"))
    }

    pub fn write_goto(&mut self, label: &str) -> CompileResult<()> {
        self.emit(&format!("goto {label}"))
    }

    pub fn write_if_goto(&mut self, label: &str) -> CompileResult<()> {
        self.emit(&format!("if-goto {label}"))
    }

    pub fn write_call(&mut self, name: &str, nargs: u16) -> CompileResult<()> {
        self.emit(&format!("call {name} {nargs}"))
    }

    pub fn write_function(&mut self, name: &str, nlocals: u16) -> CompileResult<()> {
        self.emit(&format!("function {name} {nlocals}"))
    }

    pub fn write_return(&mut self) -> CompileResult<()> {
        self.emit("return")
    }

    /// Flushes the underlying stream. Spec §5: the output writer is closed
    /// on successful completion of `class`; flushing here lets the driver
    /// decide when the underlying file handle itself is dropped/closed.
    pub fn flush(&mut self) -> CompileResult<()> {
        self.out
            .flush()
            .map_err(|e| CompileError::UnwritableOutput(e.to_string()))
    }
}
