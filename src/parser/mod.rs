//! Parser module — locate annotation blocks in a file and parse each one.

pub mod locator;
pub mod record;
pub mod synthetic;

use crate::error::ParseError;
use crate::model::{AnnotationRecord, Discovery};
use tracing::debug;

/// Everything recovered from one file.
#[derive(Debug, Default)]
pub struct FileScan {
    pub records: Vec<AnnotationRecord>,
    /// The error that stopped the scan early, if any. Records found before it
    /// are kept.
    pub error: Option<ParseError>,
}

/// Scan one source file. `file_index` is the file's position in the sorted
/// input list and becomes the first half of every record's discovery key.
pub fn parse_file(file: &str, file_index: usize, content: &str) -> FileScan {
    let mut scan = FileScan::default();

    for block in locator::blocks(file, content) {
        let parsed = block.and_then(|raw| {
            let discovery = Discovery {
                file: file_index,
                offset: raw.offset,
            };
            record::parse_record(file, discovery, raw.body)
        });
        let mut rec = match parsed {
            Ok(rec) => rec,
            Err(e) => {
                scan.error = Some(e);
                break;
            }
        };

        if let Err(field) = synthetic::attach(&mut rec) {
            debug!(
                "{}:{}: {} record has no {}; no declaration derived",
                file,
                rec.discovery.offset,
                rec.kind.as_str(),
                field
            );
        }
        scan.records.push(rec);
    }

    debug!("{}: {} annotation block(s)", file, scan.records.len());
    scan
}
