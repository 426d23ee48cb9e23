//! Shared code-width growth rule.
//!
//! Both the encoder and the decoder insert exactly one new dictionary entry
//! per input code and must grow the code width at the same instant, or the
//! bit stream desynchronizes. Keeping the rule in one place (rather than
//! duplicating the arithmetic on both sides, the way the original Python
//! implementation this crate supersedes did — inconsistently) is what keeps
//! them in lockstep.

use crate::error::{LzwError, LzwResult};
use crate::{INITIAL_CODE_WIDTH, MAX_CODE_WIDTH};

/// Tracks the current code width as the dictionary grows.
#[derive(Debug, Clone, Copy)]
pub struct WidthTracker {
    width: u32,
}

impl WidthTracker {
    pub fn new() -> Self {
        Self {
            width: INITIAL_CODE_WIDTH,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Call once per dictionary insertion, passing the dictionary's size
    /// *after* the insertion (i.e. the code that will be assigned next).
    /// Widens by exactly one bit the moment `next_code` overflows the
    /// current width, never more than one bit per call.
    pub fn on_insert(&mut self, next_code: u32) -> LzwResult<()> {
        self.width += next_code >> self.width;
        if self.width > MAX_CODE_WIDTH {
            return Err(LzwError::CodeWidthExceeded(self.width));
        }
        Ok(())
    }
}

impl Default for WidthTracker {
    fn default() -> Self {
        Self::new()
    }
}
