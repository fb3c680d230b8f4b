use serde_json::Value;
use tracing::{debug, instrument};

use crate::buffer::StreamBuffer;
use crate::retry::{RetryState, Verdict};
use crate::scanner::{scan, ParseOutcome};

/// Error type a callback may return to abort the current extraction pass.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Per-value callback, invoked synchronously in emission order.
pub type Callback = Box<dyn FnMut(&Value) -> Result<(), CallbackError> + Send>;

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The buffered text is structurally invalid, or stayed incomplete past
    /// the retry tolerance. Unrecoverable for the current buffer contents;
    /// call [`JsonStreamParser::reset`] to resynchronize.
    #[error("malformed JSON stream: {reason}")]
    MalformedStream { reason: String },
    /// A tokenizer error that is neither truncation nor a syntax error.
    #[error("tokenizer failure: {0}")]
    TokenizerFailure(serde_json::Error),
    /// The registered callback returned an error. Values consumed before the
    /// aborting entity are not rolled back; `partial` holds the ones
    /// extracted earlier in the same call.
    #[error("callback failed: {source}")]
    CallbackFailure {
        partial: Vec<Value>,
        source: CallbackError,
    },
}

pub struct ParserConfig {
    /// Buffer length at which `stream` runs an extraction pass. Also the
    /// watermark for overflow/compaction bookkeeping. This is a trigger, not
    /// a cap: a single value larger than this still buffers in full.
    pub buffer_size: usize,
    /// Consecutive incomplete-parse signals tolerated by threshold-triggered
    /// passes before the stream is declared malformed. `flush` always uses
    /// zero tolerance.
    pub allowed_incomplete_attempts: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            buffer_size: 8092,
            allowed_incomplete_attempts: 1,
        }
    }
}

/// Incremental extractor of complete top-level JSON values from a text
/// stream delivered in arbitrary, possibly mid-token chunks.
///
/// Chunks are appended with [`stream`]; each value is emitted exactly once,
/// in textual order, once its final character has arrived. A chunk boundary
/// may fall anywhere, including inside a string, number, or keyword. Calls
/// are not reentrant: concurrent use requires external serialization.
///
/// [`stream`]: JsonStreamParser::stream
pub struct JsonStreamParser {
    buffer: StreamBuffer,
    retry: RetryState,
    config: ParserConfig,
    callback: Option<Callback>,
}

impl JsonStreamParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            buffer: StreamBuffer::new(config.buffer_size),
            retry: RetryState::default(),
            config,
            callback: None,
        }
    }

    /// Registers or replaces the per-value callback. It runs synchronously
    /// inside the extraction loop, in emission order; its `Ok` value is
    /// ignored, an `Err` aborts the pass as [`StreamError::CallbackFailure`].
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Value) -> Result<(), CallbackError> + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Discards all buffered unconsumed text and zeroes retry state. Data
    /// loss is intentional: this is the way to resynchronize after a fatal
    /// error.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.retry.reset();
    }

    /// Appends a chunk and, once the buffer has reached the configured
    /// threshold, runs an extraction pass. Returns the values that became
    /// complete during this call, in textual order.
    #[instrument(skip(self, text))]
    pub fn stream(&mut self, text: &str) -> Result<Vec<Value>, StreamError> {
        if !self.buffer.is_empty() && !text.is_empty() {
            debug!(
                buffered = self.buffer.remainder(),
                chunk = text,
                "merging fragments"
            );
        }
        self.buffer.append(text);

        if self.buffer.len() < self.config.buffer_size {
            return Ok(Vec::new());
        }
        self.extract(self.config.allowed_incomplete_attempts)
    }

    /// Forces one extraction pass with zero tolerance for incomplete
    /// fragments: whatever is buffered must form complete values (plus
    /// optional trailing whitespace) or the call fails with
    /// [`StreamError::MalformedStream`]. The only way to retrieve values
    /// that never reach the size threshold.
    #[instrument(skip(self))]
    pub fn flush(&mut self) -> Result<Vec<Value>, StreamError> {
        self.extract(0)
    }

    /// The unconsumed remainder, for inspection after an error.
    pub fn buffered(&self) -> &str {
        self.buffer.remainder()
    }

    /// Backing allocation of the buffer, in bytes.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.allocated()
    }

    /// One extraction pass: scan from the front of the buffer, consuming a
    /// prefix per completed value, until the remainder is empty, incomplete
    /// within tolerance, or fatally malformed.
    fn extract(&mut self, allowed: u32) -> Result<Vec<Value>, StreamError> {
        let mut entities = Vec::new();
        loop {
            let remainder = self.buffer.remainder();
            if remainder.trim_start().is_empty() {
                break;
            }
            match scan(remainder) {
                ParseOutcome::Complete { value, consumed } => {
                    self.retry.record_success();
                    self.buffer.consume(consumed);
                    debug!(consumed, "extracted complete value");
                    if let Some(callback) = self.callback.as_mut() {
                        if let Err(source) = callback(&value) {
                            // The aborting entity stays consumed; partial
                            // progress is preserved, not rolled back.
                            return Err(StreamError::CallbackFailure {
                                partial: entities,
                                source,
                            });
                        }
                    }
                    entities.push(value);
                }
                ParseOutcome::Incomplete => match self.retry.record_incomplete(allowed) {
                    Verdict::Wait => {
                        debug!(
                            buffered = self.buffer.len(),
                            attempts = self.retry.attempts(),
                            "detected json fragment, buffering for the rest"
                        );
                        break;
                    }
                    Verdict::Exhausted => {
                        return Err(StreamError::MalformedStream {
                            reason: format!(
                                "value still incomplete after {allowed} tolerated attempt(s)"
                            ),
                        });
                    }
                },
                ParseOutcome::Malformed(e) => {
                    return Err(StreamError::MalformedStream {
                        reason: e.to_string(),
                    });
                }
                ParseOutcome::Failed(e) => return Err(StreamError::TokenizerFailure(e)),
            }
        }
        self.buffer.compact();
        Ok(entities)
    }
}

impl Default for JsonStreamParser {
    fn default() -> Self {
        Self::new()
    }
}
