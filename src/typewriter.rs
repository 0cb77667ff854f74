//! Character-by-character reveal of the generated answer shown beside the diagrams.
//!
//! Unlike the scenes this carries state across frames: the scheduler advances it once every
//! few ticks and it never rewinds on its own.

/// The full answer being revealed.
pub const GENERATED_ANSWER: &str = "Aseuro Technologies offers a comprehensive suite of IT \
consulting services, including cloud migration, DevOps automation, and digital transformation \
solutions designed for enterprise clients across various industries.";

/// Cursor appended while the reveal is incomplete.
pub const CURSOR: char = '\u{2588}';

/// Reveal state over a fixed string.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    total: usize,
    revealed: usize,
    active: bool,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(GENERATED_ANSWER)
    }
}

impl Typewriter {
    /// Active typewriter over `text` with nothing revealed.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            total,
            revealed: 0,
            active: true,
        }
    }

    /// Reveal one more character. Inactive typewriters stay at zero.
    pub fn advance(&mut self) {
        if !self.active {
            self.revealed = 0;
            return;
        }
        self.revealed = (self.revealed + 1).min(self.total);
    }

    /// Rewind to nothing revealed.
    pub fn reset(&mut self) {
        self.revealed = 0;
    }

    /// Enable or disable; disabling rewinds.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.revealed = 0;
        }
    }

    /// Whether ticks reveal characters.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Characters revealed so far.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Total characters in the text.
    pub fn len(&self) -> usize {
        self.total
    }

    /// `true` when the text is empty.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `true` once every character is shown.
    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }

    /// Revealed prefix, followed by [`CURSOR`] while incomplete.
    pub fn visible_text(&self) -> String {
        let mut out: String = self.text.chars().take(self.revealed).collect();
        if !self.is_complete() {
            out.push(CURSOR);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_with_cursor() {
        let tw = Typewriter::default();
        assert_eq!(tw.revealed(), 0);
        assert_eq!(tw.visible_text(), "\u{2588}");
    }

    #[test]
    fn advances_one_character_and_saturates() {
        let mut tw = Typewriter::new("abc");
        tw.advance();
        assert_eq!(tw.visible_text(), "a\u{2588}");
        for _ in 0..10 {
            tw.advance();
        }
        assert!(tw.is_complete());
        assert_eq!(tw.visible_text(), "abc");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut tw = Typewriter::new("→é");
        assert_eq!(tw.len(), 2);
        tw.advance();
        assert_eq!(tw.visible_text(), "→\u{2588}");
    }

    #[test]
    fn deactivation_rewinds_and_blocks_progress() {
        let mut tw = Typewriter::new("hello");
        tw.advance();
        tw.advance();
        tw.set_active(false);
        assert_eq!(tw.revealed(), 0);
        tw.advance();
        assert_eq!(tw.revealed(), 0);
        tw.set_active(true);
        tw.advance();
        assert_eq!(tw.visible_text(), "h\u{2588}");
        tw.reset();
        assert_eq!(tw.revealed(), 0);
    }

    #[test]
    fn empty_text_is_immediately_complete() {
        let tw = Typewriter::new("");
        assert!(tw.is_empty());
        assert_eq!(tw.visible_text(), "");
    }
}
