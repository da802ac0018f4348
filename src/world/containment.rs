//! Containment tree
//!
//! Every object except the two roots has exactly one parent, and appears
//! exactly once in that parent's contents. `attach`/`detach` are the only
//! code paths that edit either side.

use ahash::AHashSet;

use crate::core::types::ObjectId;
use crate::world::World;

impl World {
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.get(id).and_then(|obj| obj.parent())
    }

    /// Direct children in insertion order; empty for a stale id
    pub fn contents(&self, id: ObjectId) -> &[ObjectId] {
        self.get(id).map(|obj| obj.contents()).unwrap_or(&[])
    }

    /// True if `id` is `ancestor` or lies anywhere beneath it
    pub fn is_within(&self, id: ObjectId, ancestor: ObjectId) -> bool {
        let mut cursor = Some(id);
        let mut steps = 0;
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.object_count() {
                tracing::warn!(%id, "containment cycle detected");
                return false;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut chain = Vec::new();
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            if chain.contains(&current) {
                break;
            }
            chain.push(current);
            cursor = self.parent(current);
        }
        chain
    }

    /// `root` and everything beneath it, pre-order
    pub fn subtree(&self, root: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.contents(current).iter().rev().copied());
        }
        out
    }

    /// Nearest animate strict ancestor
    pub fn carrier(&self, id: ObjectId) -> Option<ObjectId> {
        self.ancestors(id)
            .into_iter()
            .find(|a| self.get(*a).is_some_and(|obj| obj.is_animate()))
    }

    /// Sitting in the TrashBin, waiting to be freed
    pub fn is_recycled(&self, id: ObjectId) -> bool {
        id != self.trash_bin() && self.is_within(id, self.trash_bin())
    }

    /// Append `id` to `parent`'s contents; `id` must be detached
    pub(crate) fn attach(&mut self, id: ObjectId, parent: ObjectId) {
        debug_assert!(self.parent(id).is_none());
        if let Some(obj) = self.objects.get_mut(id) {
            obj.parent = Some(parent);
        }
        if let Some(p) = self.objects.get_mut(parent) {
            p.contents.push(id);
        }
    }

    pub(crate) fn detach(&mut self, id: ObjectId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.objects.get_mut(parent) {
            p.contents.retain(|c| *c != id);
        }
        if let Some(obj) = self.objects.get_mut(id) {
            obj.parent = None;
        }
    }

    /// Describe every broken containment or back-link invariant
    ///
    /// An empty result means the world is consistent.
    pub fn verify(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (id, obj) in self.objects.iter() {
            match obj.parent() {
                None if !self.is_root(id) => problems.push(format!("{id} has no parent")),
                None => {}
                Some(parent) => match self.get(parent) {
                    None => problems.push(format!("{id} has stale parent {parent}")),
                    Some(p) => {
                        let count = p.contents().iter().filter(|c| **c == id).count();
                        if count != 1 {
                            problems.push(format!(
                                "{id} appears {count} times in contents of {parent}"
                            ));
                        }
                    }
                },
            }

            let mut seen = AHashSet::new();
            for child in obj.contents() {
                if !seen.insert(*child) {
                    problems.push(format!("{child} listed twice in {id}"));
                }
                if self.parent(*child) != Some(id) {
                    problems.push(format!("{child} in contents of {id} but parented elsewhere"));
                }
            }

            if !self.is_root(id) {
                let top = self.ancestors(id).last().copied();
                if !top.is_some_and(|t| self.is_root(t)) {
                    problems.push(format!("{id} does not reach a root"));
                }
            }

            for (act, target) in obj.acts().iter() {
                if let Some(target) = target {
                    match self.get(target) {
                        None => problems.push(format!("{id} {act:?} targets stale {target}")),
                        Some(t) if !t.touching().contains(&id) => problems.push(format!(
                            "{target} missing back-link to {id} for {act:?}"
                        )),
                        Some(_) => {}
                    }
                    if act.is_equipment() && !self.is_within(target, id) {
                        problems.push(format!("{id} {act:?} target {target} is not carried"));
                    }
                }
            }

            for toucher in obj.touching() {
                if !self.get(*toucher).is_some_and(|t| t.acts().targets(id)) {
                    problems.push(format!("{id} lists {toucher} as toucher without a slot"));
                }
            }
        }

        problems
    }
}
