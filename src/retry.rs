/// Tells "a value is split across chunks, wait for more data" apart from
/// "this will never complete".
///
/// Counts consecutive incomplete-parse signals since the last successful
/// extraction. A single split value is expected to look malformed once per
/// extraction pass; a counter that keeps climbing means the buffered text is
/// not converging on a complete value.
#[derive(Debug, Default)]
pub struct RetryState {
    consecutive_incomplete: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Keep the remainder buffered and wait for the next chunk.
    Wait,
    /// Tolerance exhausted; the stream is considered malformed.
    Exhausted,
}

impl RetryState {
    pub fn record_success(&mut self) {
        self.consecutive_incomplete = 0;
    }

    /// Counts one more incomplete signal against `allowed`.
    pub fn record_incomplete(&mut self, allowed: u32) -> Verdict {
        if self.consecutive_incomplete < allowed {
            self.consecutive_incomplete += 1;
            Verdict::Wait
        } else {
            Verdict::Exhausted
        }
    }

    pub fn reset(&mut self) {
        self.consecutive_incomplete = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.consecutive_incomplete
    }
}
