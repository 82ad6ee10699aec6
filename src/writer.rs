//! Two-phase CSV record writer
//!
//! [`CsvWriter`] wraps an `io::Write` sink and captures the name of each
//! field before printing a header line, then prints the CSV data rows below.
//! Names and values go through the same insertion entry point, so the code
//! that registers statistics and the code that emits them can be the same
//! call site run twice.
//!
//! Note: the first `finalize()` only flushes the header. Values pushed
//! during the header-capture pass are discarded, not buffered; the first
//! value pass is lost. Callers that need every pass can consult
//! [`CsvWriter::is_capturing_header`] and skip the work of computing values
//! until capture is over.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::warn;

use crate::Result;

/// One numeric datum for the current data row.
///
/// The set of carried types is fixed; every variant renders through its
/// type's default decimal formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
        }
    }
}

/// A single token fed to [`CsvWriter::push`]: either a field name or a
/// value for the current row.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Name(String),
    Value(Value),
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::Name(name.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::Name(name)
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Field::Value(value)
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl From<$ty> for Field {
                fn from(v: $ty) -> Self {
                    Field::Value(Value::$variant(v))
                }
            }
        )*
    };
}

value_from! {
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

/// CSV writer that captures a header before emitting data rows.
///
/// The writer starts in a capturing phase where every name token appends a
/// column and every value token is discarded. The first [`finalize`] call
/// prints the header and switches to the emitting phase, where the roles
/// flip: names are discarded and values stream straight to the sink. Each
/// later [`finalize`] call terminates one data row.
///
/// Every line, header and data alike, carries a separator after its last
/// column.
///
/// [`finalize`]: CsvWriter::finalize
///
/// # Example
///
/// ```
/// # fn main() -> statline::Result<()> {
/// use statline::CsvWriter;
///
/// let mut writer = CsvWriter::new(Vec::new());
///
/// writer.push("Bandwidth").push(0.5); // value ignored during capture
/// writer.push("Latency").push(5);
/// writer.finalize()?; // flush the header
///
/// writer.push("Bandwidth").push(1.5); // field name ignored
/// writer.push("Latency").push(15);
/// writer.finalize()?; // first data row
///
/// let sink = writer.into_inner();
/// assert_eq!(sink, b"Bandwidth,Latency,\n1.5,15,\n");
/// # Ok(())
/// # }
/// ```
pub struct CsvWriter<W: Write> {
    sink: W,
    field_names: Vec<String>,
    finalized: bool,
    idx: usize,
    write_error: Option<std::io::Error>,
}

impl<W: Write> CsvWriter<W> {
    /// Wrap a sink. The writer starts in the header-capture phase.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            field_names: Vec::new(),
            finalized: false,
            idx: 0,
            write_error: None,
        }
    }

    /// Feed one token, name or value, to the writer.
    ///
    /// What happens depends on the token kind and the current phase:
    ///
    /// - name while capturing: appended to the column list
    /// - name while emitting: discarded
    /// - value while emitting: written to the sink, followed by a separator
    /// - value while capturing: discarded (the first value pass is lost)
    ///
    /// No case raises an error; a sink write failure is held back and
    /// surfaced by the next [`finalize`](CsvWriter::finalize) call.
    pub fn push(&mut self, field: impl Into<Field>) -> &mut Self {
        match (field.into(), self.finalized) {
            (Field::Name(name), false) => self.field_names.push(name),
            (Field::Value(value), true) => {
                if self.write_error.is_none() {
                    match write!(self.sink, "{},", value) {
                        Ok(()) => self.idx += 1,
                        Err(err) => self.write_error = Some(err),
                    }
                }
            }
            // Names after the header and values before it are discarded.
            _ => {}
        }
        self
    }

    /// End the current phase or row.
    ///
    /// The first call prints every captured field name followed by a
    /// separator, terminates the line, flushes the sink, and switches the
    /// writer to the emitting phase. Every later call terminates the
    /// current data row and resets the per-row value count; if that count
    /// does not match the number of captured fields, an advisory warning is
    /// logged and the row is emitted anyway.
    ///
    /// Returns any sink error held back from earlier `push` calls.
    pub fn finalize(&mut self) -> Result<()> {
        if let Some(err) = self.write_error.take() {
            return Err(err.into());
        }

        if !self.finalized {
            for name in &self.field_names {
                write!(self.sink, "{},", name)?;
            }
            writeln!(self.sink)?;
            self.sink.flush()?;
            self.finalized = true;
        } else {
            if self.idx != self.field_names.len() {
                warn!(
                    "field/value count mismatch (fields={}, values={}), check that \
                     every value has a field name before it",
                    self.field_names.len(),
                    self.idx
                );
            }
            self.idx = 0;
            writeln!(self.sink)?;
        }
        Ok(())
    }

    /// Whether the writer is still capturing field names.
    ///
    /// True until the first [`finalize`](CsvWriter::finalize) call. Careful
    /// callers can use this to avoid computing values for the pass whose
    /// values are discarded.
    pub fn is_capturing_header(&self) -> bool {
        !self.finalized
    }

    /// Number of field names captured so far.
    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }

    /// Consume the writer and hand the sink back.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl CsvWriter<File> {
    /// Open a file sink for writing.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}
