//! Annotation block locator — two-state scanner over one file's text.
//!
//! A block starts at `/*JSON` and ends at the first `*/` after it. Blocks do
//! not nest. A sentinel with no terminator is a terminal error state: the
//! scan yields the error once and then stops.

use crate::error::ParseError;

pub const SENTINEL: &str = "/*JSON";
pub const TERMINATOR: &str = "*/";

/// Raw text of one block, between sentinel and terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Byte offset of the sentinel in the file.
    pub offset: usize,
    pub body: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingStart,
    /// `start` is the sentinel offset, `body` the first byte after it.
    InBlock { start: usize, body: usize },
    Done,
}

/// Lazy, finite sequence of blocks in one file.
#[derive(Debug)]
pub struct Blocks<'a> {
    file: &'a str,
    text: &'a str,
    cursor: usize,
    state: State,
}

/// Start a fresh scan of `text`. `file` is only used in error reports.
pub fn blocks<'a>(file: &'a str, text: &'a str) -> Blocks<'a> {
    Blocks {
        file,
        text,
        cursor: 0,
        state: State::SeekingStart,
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Result<RawBlock<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::SeekingStart => match self.text[self.cursor..].find(SENTINEL) {
                    Some(rel) => {
                        let start = self.cursor + rel;
                        self.state = State::InBlock {
                            start,
                            body: start + SENTINEL.len(),
                        };
                    }
                    None => {
                        self.state = State::Done;
                        return None;
                    }
                },
                State::InBlock { start, body } => match self.text[body..].find(TERMINATOR) {
                    Some(rel) => {
                        let end = body + rel;
                        self.cursor = end + TERMINATOR.len();
                        self.state = State::SeekingStart;
                        return Some(Ok(RawBlock {
                            offset: start,
                            body: &self.text[body..end],
                        }));
                    }
                    None => {
                        self.state = State::Done;
                        return Some(Err(ParseError::Unterminated {
                            file: self.file.to_string(),
                            offset: start,
                        }));
                    }
                },
                State::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_blocks_in_order() {
        let text = "int a;\n/*JSON{\"type\":\"class\"}*/\nint b;\n/*JSON{ }\ntext\n*/";
        let found: Vec<_> = blocks("a.c", text).collect::<Result<_, _>>().unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].offset, 7);
        assert_eq!(found[0].body, "{\"type\":\"class\"}");
        assert_eq!(found[1].body, "{ }\ntext\n");
    }

    #[test]
    fn plain_comments_are_ignored() {
        let text = "/* not a block */\n// JSON\n";
        assert_eq!(blocks("a.c", text).count(), 0);
    }

    #[test]
    fn terminator_search_starts_after_sentinel() {
        // "/*JSON*/" must not treat the "*" of the sentinel as part of the terminator.
        let text = "/*JSON*/";
        let found: Vec<_> = blocks("a.c", text).collect::<Result<_, _>>().unwrap();
        assert_eq!(found[0].body, "");
    }

    #[test]
    fn unterminated_block_is_terminal() {
        let text = "/*JSON{\"type\":\"method\"}*/\n/*JSON{\"type\":\"class\"}\n";
        let mut scan = blocks("w.c", text);
        assert!(scan.next().unwrap().is_ok());
        assert_eq!(
            scan.next(),
            Some(Err(ParseError::Unterminated {
                file: "w.c".to_string(),
                offset: 26,
            }))
        );
        assert_eq!(scan.next(), None);
    }

    #[test]
    fn scan_is_restartable() {
        let text = "/*JSON{}*/ /*JSON{}*/";
        assert_eq!(blocks("a.c", text).count(), 2);
        assert_eq!(blocks("a.c", text).count(), 2);
    }
}
