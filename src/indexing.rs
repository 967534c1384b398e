//! The subject string, as seen by the matcher.

use std::ops::Range;

/// Input is the text being matched against.
/// Positions are UTF-8 byte offsets, always on a char boundary. Building an
/// Input does no work, so it is fine to make one per exec() call.
#[derive(Debug, Copy, Clone)]
pub struct Input<'t> {
    text: &'t str,
}

impl<'t> Input<'t> {
    #[inline]
    pub fn new(text: &'t str) -> Self {
        Input { text }
    }

    /// \return the original text.
    #[inline(always)]
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// \return the length of the text in bytes. This is also the position of
    /// the end of the text.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// \return the character starting at \p pos, or None at or past the end.
    #[inline]
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..)?.chars().next()
    }

    /// \return the character ending at \p pos, or None at the start.
    #[inline]
    pub fn char_before(&self, pos: usize) -> Option<char> {
        self.text.get(..pos)?.chars().next_back()
    }

    /// \return the position just after the character at \p pos. At the end
    /// of the text this is one past the end, so a search loop can stop.
    #[inline]
    pub fn next_pos(&self, pos: usize) -> usize {
        pos + self.char_at(pos).map_or(1, char::len_utf8)
    }

    /// \return the first char boundary at or after byte offset \p offset.
    /// An offset inside a multi-byte character rounds up.
    /// Offsets past the end of the text produce len() + 1.
    pub fn index_at_or_after(&self, offset: usize) -> usize {
        if offset > self.text.len() {
            return self.text.len() + 1;
        }
        let mut pos = offset;
        while !self.text.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }

    /// \return the text covered by a range of positions.
    #[inline]
    pub fn slice(&self, r: Range<usize>) -> &'t str {
        &self.text[r]
    }
}
