//! Directory path resolution against path table records

use super::PathTableRecord;

/// Record number of the root directory
const ROOT_RECORD: u16 = 1;

/// Resolve a `/`-separated directory path to its path table record
///
/// Each component is matched, ignoring ASCII case, against the records whose
/// parent is the directory matched so far, starting at the root. Empty
/// components (leading, trailing or doubled slashes) are skipped, so an
/// empty path resolves to the root. When several records share a parent and
/// name, the first in table order wins.
pub fn resolve_directory<'a>(
    records: &'a [PathTableRecord],
    path: &str,
) -> Option<&'a PathTableRecord> {
    let mut current = records.iter().find(|r| r.record_index == ROOT_RECORD)?;

    for component in path.split('/').filter(|c| !c.is_empty()) {
        let parent = current.record_index;
        current = match records.iter().find(|r| {
            r.parent_record_index == parent && r.name.eq_ignore_ascii_case(component)
        }) {
            Some(record) => record,
            None => {
                log::debug!("No directory {:?} under path table record {}", component, parent);
                return None;
            }
        };
    }

    Some(current)
}
