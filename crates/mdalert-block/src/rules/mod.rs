//! Built-in block rules.
//!
//! Each rule has the [`BlockRule`](crate::BlockRule) signature and is
//! registered by [`BlockParser::commonmark`](crate::BlockParser::commonmark)
//! in the order `code, fence, blockquote, hr, list, heading, paragraph`.

pub(crate) mod blockquote;
pub(crate) mod code;
pub(crate) mod fence;
pub(crate) mod heading;
pub(crate) mod hr;
pub(crate) mod list;
pub(crate) mod paragraph;

pub use blockquote::blockquote;
pub use code::code;
pub use fence::fence;
pub use heading::heading;
pub use hr::hr;
pub use list::list;
pub use paragraph::paragraph;
