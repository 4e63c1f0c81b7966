//! Code fence detection.
//!
//! Shared by the fence block rule and by the blockquote extent scan, which
//! needs to know whether a quoted line sits inside a fenced code block before
//! it lets a following unquoted line continue the quote lazily.

/// Tracks code fence state during line-by-line processing.
///
/// Code fences in `CommonMark` can use backticks or tildes (three or more).
/// The closing fence must use the same character and be at least as long
/// as the opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Character used for the current fence (backtick or tilde).
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
}

impl FenceTracker {
    pub(crate) fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Feed one line. Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        if let Some(fence_char) = self.fence_char {
            if is_fence_line(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
                return true;
            }
            false
        } else if let Some(open) = detect_fence(trimmed) {
            self.fence_char = Some(open.marker);
            self.fence_len = open.len;
            true
        } else {
            false
        }
    }
}

/// An opening fence found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FenceOpen<'a> {
    pub(crate) marker: char,
    pub(crate) len: usize,
    /// Untrimmed text after the fence characters.
    pub(crate) info: &'a str,
}

/// Detect if a line starts a code fence.
///
/// Backtick fences may not carry a backtick in their info string.
pub(crate) fn detect_fence(trimmed: &str) -> Option<FenceOpen<'_>> {
    let marker = trimmed.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }

    let len = trimmed.bytes().take_while(|&b| b == marker as u8).count();
    if len < 3 {
        return None;
    }

    let info = &trimmed[len..];
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some(FenceOpen { marker, len, info })
}

/// Check if a line is a valid closing fence: same character, at least as long
/// as the opening fence, only whitespace after it.
pub(crate) fn is_fence_line(trimmed: &str, expected_char: char, min_len: usize) -> bool {
    if !trimmed.starts_with(expected_char) {
        return false;
    }

    let count = trimmed
        .bytes()
        .take_while(|&b| b == expected_char as u8)
        .count();
    if count < min_len {
        return false;
    }

    trimmed[count..].chars().all(char::is_whitespace)
}
