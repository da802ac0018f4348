//! Recycling
//!
//! Recycled objects move under the TrashBin with every link cut. Their ids
//! keep resolving until `empty_trash` frees the slots; after that they read
//! as stale and never alias a newer object.

use crate::core::types::ObjectId;
use crate::world::World;

impl World {
    /// Retire `id` and its subtree. Roots cannot be recycled.
    pub fn recycle(&mut self, id: ObjectId) -> bool {
        if self.is_root(id) || !self.contains(id) || self.is_recycled(id) {
            return false;
        }

        let doomed = self.subtree(id);
        for obj in doomed.iter().rev() {
            self.clear_references_to(*obj);
            self.clear_outgoing(*obj);
            self.detach_minds(*obj);
            if let Some(o) = self.objects.get_mut(*obj) {
                o.busy_until = None;
                o.busy_command.clear();
            }
        }

        let trash = self.trash_bin();
        self.detach(id);
        self.attach(id, trash);
        tracing::debug!(%id, count = doomed.len(), "recycled");
        true
    }

    /// Free everything in the TrashBin; returns how many objects went
    pub fn empty_trash(&mut self) -> usize {
        let trash = self.trash_bin();
        let mut doomed = self.subtree(trash);
        doomed.retain(|id| *id != trash);
        for id in &doomed {
            self.objects.remove(*id);
        }
        if let Some(bin) = self.objects.get_mut(trash) {
            bin.contents.clear();
        }
        if !doomed.is_empty() {
            tracing::debug!(count = doomed.len(), "trash emptied");
        }
        doomed.len()
    }
}
