use serde_json::{error::Category, Deserializer, Value};

/// Outcome of attempting to parse one complete value from the front of a
/// fragment.
#[derive(Debug)]
pub enum ParseOutcome {
    /// A full value was found. `consumed` is the byte offset just past the
    /// value's textual span, leading whitespace included.
    Complete { value: Value, consumed: usize },
    /// The fragment is a prefix of a valid value; more data is needed.
    Incomplete,
    /// Structural error unrelated to truncation.
    Malformed(serde_json::Error),
    /// A tokenizer failure that is neither truncation nor a syntax error.
    Failed(serde_json::Error),
}

/// Attempts to parse exactly one JSON value from the start of `fragment`.
///
/// A single pass over the tokenizer yields both the value and the offset at
/// which it ended; trailing text is left untouched for the next scan. Purely
/// a function of the fragment: no state is carried between calls and no
/// lookahead happens beyond it.
///
/// Truncation is told apart from structural corruption by the tokenizer's
/// error classification: running out of input mid-value is `Incomplete`,
/// an unexpected character is `Malformed`.
pub fn scan(fragment: &str) -> ParseOutcome {
    let mut values = Deserializer::from_str(fragment).into_iter::<Value>();
    match values.next() {
        Some(Ok(value)) => ParseOutcome::Complete {
            value,
            consumed: values.byte_offset(),
        },
        Some(Err(e)) => match e.classify() {
            Category::Eof => ParseOutcome::Incomplete,
            Category::Syntax => ParseOutcome::Malformed(e),
            _ => ParseOutcome::Failed(e),
        },
        // Nothing but whitespace left.
        None => ParseOutcome::Incomplete,
    }
}
