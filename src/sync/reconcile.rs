use crate::records::{LocalRecordRef, RemoteRecordRef};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleRecord {
    pub remote: RemoteRecordRef,
    pub delete_id: String,
}

/// Diffs a view export against the records a run just uploaded.
///
/// Only paths the run touched are pruned. A remote record whose path has no
/// local record at all is left alone, so a record whose namespace was renamed
/// locally stays on Gridly under its old path.
pub struct Reconciler {
    use_combined_namespace_id: bool,
}

impl Reconciler {
    pub fn new(use_combined_namespace_id: bool) -> Self {
        Self {
            use_combined_namespace_id,
        }
    }

    pub fn stale_records(
        &self,
        remote: &[RemoteRecordRef],
        local: &[LocalRecordRef],
    ) -> Vec<StaleRecord> {
        let mut ids_by_path: HashMap<&str, HashSet<&str>> = HashMap::new();
        for record in local {
            ids_by_path
                .entry(record.path.as_str())
                .or_default()
                .insert(record.id.as_str());
        }

        let mut stale = Vec::new();
        for record in remote {
            let Some(ids) = ids_by_path.get(record.path.as_str()) else {
                continue;
            };
            if ids.contains(record.match_key(self.use_combined_namespace_id)) {
                continue;
            }

            let delete_id = record.delete_id(self.use_combined_namespace_id);
            tracing::debug!(
                id = %record.id,
                path = %record.path,
                delete_id = %delete_id,
                "No local match for Gridly record, marking for deletion"
            );
            stale.push(StaleRecord {
                remote: record.clone(),
                delete_id,
            });
        }

        tracing::info!(
            remote = remote.len(),
            local = local.len(),
            stale = stale.len(),
            "Reconciled Gridly records"
        );
        stale
    }

    pub fn delete_ids(&self, remote: &[RemoteRecordRef], local: &[LocalRecordRef]) -> Vec<String> {
        self.stale_records(remote, local)
            .into_iter()
            .map(|s| s.delete_id)
            .collect()
    }
}
