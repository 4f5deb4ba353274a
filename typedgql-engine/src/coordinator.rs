//! File-change reaction layer.

use std::collections::BTreeSet;
use std::path::Path;

use typedgql_core::is_operation_file;

use crate::error::Result;
use crate::writer::{DeclarationWriter, PassReport};

/// Outbound signals to the dev-time host.
///
/// The coordinator calls these synchronously, after its own state transition
/// is complete, so an implementation observing a signal can assume the
/// schema document, export list, and artifacts are already up to date.
pub trait ReloadNotifier {
    /// A previously transformed file's output is stale and must be
    /// recomputed by the host.
    fn invalidate(&self, id: &str);

    /// Everything derived from the schema is stale; the host should reload
    /// wholesale.
    fn full_reload(&self);
}

/// Reacts to file-change events on top of a [`DeclarationWriter`].
///
/// Tracks which files the host's live transform has processed since the
/// last schema load; on a schema change every tracked file is signalled
/// stale and the set is cleared before a fresh full pass runs.
pub struct ChangeCoordinator<N> {
    writer: DeclarationWriter,
    transformed: BTreeSet<String>,
    notifier: N,
}

impl<N: ReloadNotifier> ChangeCoordinator<N> {
    pub fn new(writer: DeclarationWriter, notifier: N) -> Self {
        Self {
            writer,
            transformed: BTreeSet::new(),
            notifier,
        }
    }

    pub fn writer(&self) -> &DeclarationWriter {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut DeclarationWriter {
        &mut self.writer
    }

    /// Record that the host's transform path processed `id`. The set is
    /// only consulted for invalidation signalling on schema change, never
    /// by the declaration pipeline itself.
    pub fn file_transformed(&mut self, id: &str) {
        self.transformed.insert(id.to_string());
    }

    #[cfg(test)]
    fn transformed_len(&self) -> usize {
        self.transformed.len()
    }

    /// Dispatch a raw change notification for a normalized path.
    ///
    /// Returns `Some(report)` when the change triggered a full pass, `None`
    /// when it was handled per-file or ignored.
    pub fn handle_change(&mut self, path: &str, root: &Path) -> Result<Option<PassReport>> {
        if self.writer.store().is_schema_file(path) {
            return self.schema_changed(root).map(Some);
        }
        self.operation_file_changed(path)?;
        Ok(None)
    }

    /// React to a schema-file change: reload the document, signal every
    /// tracked file stale, clear the set, re-run the full pass, then signal
    /// a full reload.
    ///
    /// A reload failure propagates before any signal fires, leaving the
    /// previous document, exports, and artifacts untouched.
    pub fn schema_changed(&mut self, root: &Path) -> Result<PassReport> {
        self.writer.store_mut().reload()?;

        for id in std::mem::take(&mut self.transformed) {
            self.notifier.invalidate(&id);
        }

        let report = self.writer.write_all(root)?;
        self.notifier.full_reload();
        Ok(report)
    }

    /// React to a single operation file's change: regenerate exactly that
    /// file's artifact. Paths that are not operation files, fail the
    /// include/exclude predicate, or arrive while generation is disabled
    /// are ignored.
    pub fn operation_file_changed(&mut self, path: &str) -> Result<()> {
        if !self.writer.generate_declarations()
            || !is_operation_file(path)
            || !self.writer.should_process(path)
        {
            return Ok(());
        }
        self.writer.write_operation_declaration(path)
    }
}
