//! Busy timers
//!
//! An object may be busy until a tick; when the clock reaches that tick the
//! object's follow-up command is handed back to the caller to run.

use crate::core::types::{ObjectId, Tick};
use crate::world::World;

impl World {
    /// Advance the clock one tick
    pub fn advance_tick(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    /// Busy for `ticks`; `command` runs when the timer lapses (the configured
    /// default when `None`)
    pub fn set_busy(&mut self, id: ObjectId, ticks: u64, command: Option<&str>) -> bool {
        let until = self.current_tick.saturating_add(ticks);
        let default = self.config().default_busy_command.clone();
        let Some(obj) = self.objects.get_mut(id) else {
            return false;
        };
        obj.busy_until = Some(until);
        obj.busy_command = command.map(str::to_string).unwrap_or(default);
        true
    }

    pub fn is_busy(&self, id: ObjectId) -> bool {
        self.get(id)
            .and_then(|obj| obj.busy_until())
            .is_some_and(|until| until > self.current_tick)
    }

    /// Ticks left, 0 when idle or lapsed
    pub fn busy_remaining(&self, id: ObjectId) -> u64 {
        self.get(id)
            .and_then(|obj| obj.busy_until())
            .map(|until| until.saturating_sub(self.current_tick))
            .unwrap_or(0)
    }

    pub fn clear_busy(&mut self, id: ObjectId) {
        if let Some(obj) = self.objects.get_mut(id) {
            obj.busy_until = None;
            obj.busy_command.clear();
        }
    }

    /// Lapsed timers, earliest deadline first; each is cleared as returned
    pub fn due_activities(&mut self) -> Vec<(ObjectId, String)> {
        let now = self.current_tick;
        let mut due: Vec<(Tick, ObjectId)> = self
            .objects
            .iter()
            .filter_map(|(id, obj)| obj.busy_until().filter(|t| *t <= now).map(|t| (t, id)))
            .collect();
        due.sort();

        due.into_iter()
            .filter_map(|(_, id)| {
                let obj = self.objects.get_mut(id)?;
                obj.busy_until = None;
                Some((id, std::mem::take(&mut obj.busy_command)))
            })
            .collect()
    }
}
