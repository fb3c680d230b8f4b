use tracing::debug;

/// Append-only text buffer, consumed from the front as values complete.
///
/// `buffer_size` is a threshold, not a hard cap: `append` never rejects data.
/// Crossing the threshold sets a high-water flag so that [`compact`] knows to
/// release over-allocated storage once the buffer has drained back under it.
///
/// [`compact`]: StreamBuffer::compact
pub struct StreamBuffer {
    text: String,
    buffer_size: usize,
    overflowed: bool,
}

impl StreamBuffer {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            text: String::new(),
            buffer_size,
            overflowed: false,
        }
    }

    /// Adds text to the tail.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
        if self.text.len() > self.buffer_size {
            self.overflowed = true;
        }
    }

    /// The unconsumed slice. The consumed prefix is removed physically, so
    /// the remainder always starts at the first unconsumed character.
    pub fn remainder(&self) -> &str {
        &self.text
    }

    /// Removes the prefix `[0, upto)`.
    pub fn consume(&mut self, upto: usize) {
        self.text.drain(..upto);
    }

    pub fn is_over_capacity(&self) -> bool {
        self.text.len() > self.buffer_size
    }

    /// Releases over-allocated backing storage once an overflowed buffer has
    /// drained back under the threshold. No-op otherwise.
    pub fn compact(&mut self) {
        if self.overflowed && self.text.len() <= self.buffer_size {
            debug!(len = self.text.len(), "compacting drained buffer");
            self.text.shrink_to(self.buffer_size);
            self.overflowed = false;
        }
    }

    /// Discards everything, unconsumed text included.
    pub fn clear(&mut self) {
        self.text = String::new();
        self.overflowed = false;
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Bytes of backing storage currently allocated.
    pub fn allocated(&self) -> usize {
        self.text.capacity()
    }
}
