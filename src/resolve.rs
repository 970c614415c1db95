//! Ownership resolver: attach member records to their class or library.
//!
//! Only renderable records take part. A class or library without a
//! declaration never becomes an owner, so its members are reported as
//! unresolved like any other orphan.

use crate::error::Diagnostic;
use crate::model::*;
use crate::taxonomy;
use std::collections::HashMap;
use tracing::debug;

/// Group records into owners and free-standing declarations.
///
/// Records may arrive in any order; they are put in discovery order first so
/// the result only depends on file order and byte offsets.
pub fn resolve(mut records: Vec<AnnotationRecord>) -> (Document, Vec<Diagnostic>) {
    records.sort_by_key(|r| r.discovery);

    let mut diagnostics = Vec::new();
    let mut owners: Vec<Owner> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    let mut members: Vec<AnnotationRecord> = Vec::new();
    let mut free: Vec<AnnotationRecord> = Vec::new();

    for record in records {
        if !record.is_renderable() {
            debug!(
                "dropping {} {} without declaration",
                record.kind.as_str(),
                record.name_or_empty()
            );
            continue;
        }

        if record.kind.is_owner() {
            let name = record.name_or_empty().to_string();
            if by_name.contains_key(&name) {
                diagnostics.push(Diagnostic::DuplicateOwner { owner: name });
                continue;
            }
            by_name.insert(name, owners.len());
            owners.push(Owner {
                record,
                members: Vec::new(),
            });
        } else if record.owner.is_some() {
            members.push(record);
        } else {
            free.push(record);
        }
    }

    // Owners are all registered before any member is attached, so a member
    // may precede its owner in the scan.
    for member in members {
        let owner_name = member.owner.as_deref().unwrap_or_default();
        match by_name.get(owner_name) {
            Some(&index) => owners[index].members.push(member),
            None => diagnostics.push(Diagnostic::UnresolvedOwner {
                member: member.name_or_empty().to_string(),
                owner: owner_name.to_string(),
            }),
        }
    }

    for owner in &mut owners {
        taxonomy::sort_members(&mut owner.members);
    }

    (Document { owners, free }, diagnostics)
}
