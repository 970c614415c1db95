//! Conditions reported while scanning and resolving annotation blocks.

use thiserror::Error;

/// A scan-level failure. Aborts the rest of the file it occurred in; other
/// files are unaffected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// `/*JSON` with no `*/` before end of file.
    #[error("{file}:{offset}: annotation block is never terminated")]
    Unterminated { file: String, offset: usize },

    /// The block body could not be coerced into a key/value object.
    #[error("{file}:{offset}: malformed record: {reason}")]
    MalformedRecord {
        file: String,
        offset: usize,
        reason: String,
    },
}

/// A resolution-level condition. Never fatal: the affected record is dropped
/// and the run carries on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("missing owner for {member}, expected {owner}")]
    UnresolvedOwner { member: String, owner: String },

    /// A second class/library with an already registered name. Members keep
    /// attaching to the first one.
    #[error("duplicate owner {owner}, keeping the first declaration")]
    DuplicateOwner { owner: String },
}
