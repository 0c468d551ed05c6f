//! Typing cursor for the hero headline.
//!
//! DESIGN
//! ======
//! The cursor is a plain value. Each tick consumes it and returns the next
//! cursor along with the text to show and how long to wait before ticking
//! again, so the whole animation can be stepped without a timer.
//!
//! One cycle for `"ab"`: `"a"`, `"ab"` (pause), `"a"`, `""`, then the next
//! phrase starts from its first character.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

use crate::config::TypingConfig;

/// Per-tick delays in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Hold time once a phrase is fully typed.
    pub pause_ms: u32,
}

impl From<&TypingConfig> for TypingTimings {
    fn from(config: &TypingConfig) -> Self {
        Self { type_ms: config.type_delay_ms, delete_ms: config.delete_delay_ms, pause_ms: config.pause_delay_ms }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypingCursor {
    pub phrase_index: usize,
    /// Characters of the current phrase currently shown.
    pub char_offset: usize,
    pub deleting: bool,
}

/// What one tick renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub next_delay_ms: u32,
}

impl TypingCursor {
    /// Advance one step through `phrases`.
    ///
    /// An empty phrase list renders nothing and waits `pause_ms`.
    #[must_use]
    pub fn tick(self, phrases: &[String], timings: TypingTimings) -> (Self, TypingFrame) {
        if phrases.is_empty() {
            return (Self::default(), TypingFrame { text: String::new(), next_delay_ms: timings.pause_ms });
        }
        let index = self.phrase_index % phrases.len();
        let phrase = &phrases[index];
        let len = phrase.chars().count();

        if self.deleting {
            let offset = self.char_offset.min(len).saturating_sub(1);
            let text = char_prefix(phrase, offset).to_owned();
            if offset == 0 {
                let next = Self { phrase_index: (index + 1) % phrases.len(), char_offset: 0, deleting: false };
                return (next, TypingFrame { text, next_delay_ms: timings.type_ms });
            }
            let next = Self { phrase_index: index, char_offset: offset, deleting: true };
            return (next, TypingFrame { text, next_delay_ms: timings.delete_ms });
        }

        let offset = (self.char_offset + 1).min(len);
        let text = char_prefix(phrase, offset).to_owned();
        if offset == len {
            let next = Self { phrase_index: index, char_offset: offset, deleting: true };
            return (next, TypingFrame { text, next_delay_ms: timings.pause_ms });
        }
        let next = Self { phrase_index: index, char_offset: offset, deleting: false };
        (next, TypingFrame { text, next_delay_ms: timings.type_ms })
    }
}

/// First `chars` characters of `s`.
pub fn char_prefix(s: &str, chars: usize) -> &str {
    s.char_indices().nth(chars).map_or(s, |(byte, _)| &s[..byte])
}
