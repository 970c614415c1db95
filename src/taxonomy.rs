//! Member taxonomy: rank each member kind and order an owner's members.

use crate::model::{AnnotationRecord, RecordKind};
use std::cmp::Ordering;
use std::fmt;

/// Rank of a member kind within its owner block. Lower sorts first.
pub fn rank(kind: &RecordKind) -> u8 {
    match kind {
        RecordKind::StaticProperty => 0,
        RecordKind::Property => 1,
        RecordKind::Constructor => 2,
        RecordKind::Event => 3,
        RecordKind::Method => 4,
        RecordKind::StaticMethod => 5,
        _ => 6,
    }
}

/// `(rank, name)` composite key. Ranks are single digits, so comparing the
/// `Display` form as a string gives the same order as comparing the tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey<'a> {
    pub rank: u8,
    pub name: &'a str,
}

impl fmt::Display for SortKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.name)
    }
}

pub fn sort_key(record: &AnnotationRecord) -> SortKey<'_> {
    SortKey {
        rank: rank(&record.kind),
        name: record.name_or_empty(),
    }
}

/// Total order over members: sort key first, discovery order on ties.
pub fn compare(a: &AnnotationRecord, b: &AnnotationRecord) -> Ordering {
    sort_key(a)
        .cmp(&sort_key(b))
        .then_with(|| a.discovery.cmp(&b.discovery))
}

pub fn sort_members(members: &mut [AnnotationRecord]) {
    members.sort_by(compare);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Discovery;

    fn member(kind: &str, name: &str, offset: usize) -> AnnotationRecord {
        let mut r = AnnotationRecord::new(RecordKind::from_tag(kind), Discovery { file: 0, offset });
        r.name = Some(name.to_string());
        r
    }

    fn names(members: &[AnnotationRecord]) -> Vec<String> {
        members
            .iter()
            .map(|m| format!("{}:{}", m.kind.as_str(), m.name_or_empty()))
            .collect()
    }

    #[test]
    fn kinds_sort_in_fixed_order() {
        let mut members = vec![
            member("function", "a", 0),
            member("staticmethod", "a", 1),
            member("method", "a", 2),
            member("event", "a", 3),
            member("constructor", "a", 4),
            member("property", "a", 5),
            member("staticproperty", "a", 6),
        ];
        sort_members(&mut members);
        assert_eq!(
            names(&members),
            vec![
                "staticproperty:a",
                "property:a",
                "constructor:a",
                "event:a",
                "method:a",
                "staticmethod:a",
                "function:a",
            ]
        );
    }

    #[test]
    fn name_breaks_ties_within_a_rank() {
        let mut members = vec![member("method", "spin", 0), member("method", "setColor", 1)];
        sort_members(&mut members);
        assert_eq!(names(&members), vec!["method:setColor", "method:spin"]);
    }

    #[test]
    fn discovery_breaks_full_ties_regardless_of_input_order() {
        let mut members = vec![member("method", "draw", 50), member("method", "draw", 10)];
        sort_members(&mut members);
        assert_eq!(members[0].discovery.offset, 10);
        assert_eq!(members[1].discovery.offset, 50);
    }

    #[test]
    fn display_form_sorts_like_the_tuple() {
        let a = member("property", "zoom", 0);
        let b = member("event", "area", 0);
        assert_eq!(sort_key(&a).to_string(), "1zoom");
        assert_eq!(
            sort_key(&a).cmp(&sort_key(&b)),
            sort_key(&a).to_string().cmp(&sort_key(&b).to_string())
        );
    }
}
