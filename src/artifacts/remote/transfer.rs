use crate::areas::database::Database;
use crate::artifacts::objects::object_type::ObjectType;
use derive_new::new;

/// Number of objects a transfer actually wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferStats {
    pub blobs: usize,
    pub commits: usize,
}

/// Copies every object the target store lacks from the source store
///
/// Each copy is independent and idempotent, so an interrupted transfer can
/// simply be run again. Blobs go first so that no commit lands in the
/// target before the contents it refers to.
#[derive(new)]
pub struct Transfer<'d> {
    source: &'d Database,
    target: &'d Database,
}

impl Transfer<'_> {
    pub fn copy_missing(&self) -> anyhow::Result<TransferStats> {
        let mut stats = TransferStats::default();

        for object_type in ObjectType::all() {
            for object_id in self.source.list(object_type)? {
                if self.target.copy_from(self.source, object_type, &object_id)? {
                    match object_type {
                        ObjectType::Blob => stats.blobs += 1,
                        ObjectType::Commit => stats.commits += 1,
                    }
                }
            }
        }

        tracing::debug!(
            blobs = stats.blobs,
            commits = stats.commits,
            from = %self.source.objects_path().display(),
            to = %self.target.objects_path().display(),
            "transferred objects"
        );

        Ok(stats)
    }
}
