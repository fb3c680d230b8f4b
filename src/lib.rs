//! # Simple JSON Stream
//!
//! Incrementally extracts complete JSON values (objects, arrays, primitives)
//! from a text stream delivered in arbitrary, possibly mid-token chunks:
//! HTTP response lines, socket reads, or any append-only feed. Chunks are
//! buffered until a value's final character arrives; callers never need to
//! know where value boundaries fall in the raw stream.
//!
//! A chunk that ends mid-value is indistinguishable from corrupt input to a
//! plain tokenizer, so the parser tolerates a bounded number of consecutive
//! "looks truncated" signals before declaring the stream malformed. Values
//! are emitted exactly once, in textual order.
//!
//! ## Example
//!
//! ```
//! use simple_json_stream::JsonStreamParser;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut parser = JsonStreamParser::new();
//!
//!     // The first chunk ends in the middle of a string.
//!     parser.stream("{\"test\": \"this is ")?;
//!     parser.stream("a test\"} [1,2,3]")?;
//!
//!     let entities = parser.flush()?;
//!     assert_eq!(entities.len(), 2);
//!     println!("{entities:?}");
//!     Ok(())
//! }
//! ```

#[cfg(test)]
mod tests;

mod buffer;
pub use buffer::*;

mod scanner;
pub use scanner::*;

mod retry;
pub use retry::*;

mod parser;
pub use parser::*;

#[cfg(feature = "http")]
mod connector;
#[cfg(feature = "http")]
pub use connector::*;
