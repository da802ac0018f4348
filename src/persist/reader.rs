//! Save reader
//!
//! Pass 1 walks the file depth-first, allocating an object the first time a
//! number is seen, whether as a definition or as an action target. Pass 2
//! runs over the objects in post-order once every number is bound: it
//! rebuilds back-links and restarts busy timers.

use std::path::Path;

use ahash::{AHashMap, AHashSet};

use crate::actions::Act;
use crate::core::config::UnknownTokenPolicy;
use crate::core::error::{MudError, Result};
use crate::core::types::ObjectId;
use crate::entity::{Attribute, DamagePools, Gender, Position};
use crate::persist::format::{error_at, split_pair, Cursor, SAVE_VERSION, VERSION_BUSY, VERSION_TOKENS};
use crate::skills::SkillId;
use crate::world::World;

/// Where the first object in the file goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    /// Overwrite this existing object and append the loaded children to it
    Into(ObjectId),
    /// Create a new object inside this parent
    Under(ObjectId),
}

/// Fields read for one object before they are applied
struct Record {
    short_desc: String,
    name: String,
    desc: String,
    long_desc: String,
    numeric: [i32; 13],
    gender: Gender,
    position: Position,
    skills: Vec<(SkillId, i32)>,
    acts: Vec<(Act, Option<ObjectId>)>,
    busy_command: String,
    quantity: i32,
}

/// Loader that rebuilds a subtree from save text
pub struct SaveLoader<'w> {
    world: &'w mut World,
    policy: UnknownTokenPolicy,
    version: u32,
    bound: Option<ObjectId>,
    numbers: AHashMap<u32, ObjectId>,
    defined: AHashSet<u32>,
    /// Every object this load allocated, in allocation order
    created: Vec<ObjectId>,
    /// Post-order list of loaded objects with their saved busy ticks
    fixups: Vec<(ObjectId, u64)>,
    warnings: usize,
}

impl<'w> SaveLoader<'w> {
    pub fn new(world: &'w mut World) -> Self {
        let policy = world.config().unknown_token_policy;
        Self {
            world,
            policy,
            version: SAVE_VERSION,
            bound: None,
            numbers: AHashMap::new(),
            defined: AHashSet::new(),
            created: Vec::new(),
            fixups: Vec::new(),
            warnings: 0,
        }
    }

    /// Override the configured unknown-token policy for this loader
    pub fn with_policy(mut self, policy: UnknownTokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Drift tolerated by the last load
    pub fn warnings(&self) -> usize {
        self.warnings
    }

    /// Version tag of the last file read
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Load save text, returning the object the first record landed in
    ///
    /// A failed load removes everything it allocated. With
    /// `LoadTarget::Into` the target's own fields may already be updated.
    pub fn load_from_str(&mut self, text: &str, target: LoadTarget) -> Result<ObjectId> {
        self.numbers.clear();
        self.defined.clear();
        self.created.clear();
        self.fixups.clear();
        self.bound = None;
        self.warnings = 0;

        let result = self.read_document(text, target);
        if result.is_err() {
            self.rollback();
        }
        result
    }

    /// Load a save file from disk; a missing or unreadable file is `MudError::Io`
    pub fn load_from_file(&mut self, path: &Path, target: LoadTarget) -> Result<ObjectId> {
        let content = std::fs::read_to_string(path)?;
        self.load_from_str(&content, target)
    }

    fn read_document(&mut self, text: &str, target: LoadTarget) -> Result<ObjectId> {
        let (bound, parent) = match target {
            LoadTarget::Into(id) => (Some(id), None),
            LoadTarget::Under(parent) => (None, Some(parent)),
        };
        let anchor = bound.or(parent).unwrap_or_else(|| self.world.universe());
        if !self.world.contains(anchor) {
            return Err(MudError::StaleObject(anchor));
        }
        self.bound = bound;

        let mut cursor = Cursor::new(text);
        let header = cursor.next_line()?;
        let version = u32::from_str_radix(header.trim(), 16)
            .map_err(|_| error_at(1, format!("bad version tag '{header}'")))?;
        if version == 0 || version > SAVE_VERSION {
            return Err(MudError::UnsupportedVersion(version));
        }
        self.version = version;

        let root = self.read_object(&mut cursor, parent, bound)?;
        if !cursor.at_end() {
            tracing::warn!(line = cursor.line(), "trailing data after last object ignored");
            self.warnings += 1;
        }
        self.drop_undefined(cursor.line())?;
        self.finish();

        tracing::info!(
            version,
            objects = self.defined.len(),
            warnings = self.warnings,
            "save loaded"
        );
        Ok(root)
    }

    // === PASS 1 ===

    fn read_object(
        &mut self,
        cursor: &mut Cursor<'_>,
        parent: Option<ObjectId>,
        bind: Option<ObjectId>,
    ) -> Result<ObjectId> {
        let at = cursor.line();
        let number: u32 = cursor.next_number("object number")?;
        if number == 0 {
            return Err(error_at(at, "object number 0 is reserved"));
        }
        if !self.defined.insert(number) {
            return Err(error_at(at, format!("object {number} defined twice")));
        }
        let id = match bind {
            Some(existing) => {
                self.numbers.insert(number, existing);
                existing
            }
            None => self.object_for(number),
        };

        let record = self.read_record(cursor)?;
        let remaining = if self.version >= VERSION_BUSY {
            let at = cursor.line();
            let word = cursor.next_word()?;
            word.parse::<u64>()
                .map_err(|_| error_at(at, format!("bad busy ticks '{word}'")))?
        } else {
            0
        };
        let busy_command = if self.version >= VERSION_BUSY {
            cursor.text_field()?
        } else {
            String::new()
        };
        let quantity = if self.version >= VERSION_TOKENS {
            cursor.next_number("quantity")?
        } else {
            record.quantity
        };

        self.apply(
            id,
            Record {
                busy_command,
                quantity,
                ..record
            },
        )?;
        if let Some(parent) = parent {
            self.world.attach(id, parent);
        }

        let children: usize = cursor.next_number("child count")?;
        for _ in 0..children {
            self.read_object(cursor, Some(id), None)?;
        }
        self.fixups.push((id, remaining));
        Ok(id)
    }

    /// Text, numeric, position, skill and action fields of one object
    fn read_record(&mut self, cursor: &mut Cursor<'_>) -> Result<Record> {
        let short_desc = cursor.text_field()?;
        let name = cursor.text_field()?;
        let desc = cursor.text_field()?;
        let long_desc = cursor.text_field()?;

        let at = cursor.line();
        let line = cursor.next_line()?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 14 {
            return Err(error_at(
                at,
                format!("expected 14 numeric fields, found {}", fields.len()),
            ));
        }
        let mut numeric = [0i32; 13];
        for (slot, field) in numeric
            .iter_mut()
            .zip(fields[..4].iter().chain(&fields[5..]))
        {
            *slot = field
                .parse()
                .map_err(|_| error_at(at, format!("bad number '{field}'")))?;
        }
        let mut code = fields[4].chars();
        let gender = match (code.next(), code.next()) {
            (Some(c), None) => Gender::from_code(c),
            _ => None,
        };
        let gender = match gender {
            Some(g) => g,
            None => {
                self.unknown("gender", fields[4], at)?;
                Gender::None
            }
        };

        let at = cursor.line();
        let token = cursor.next_line()?.trim();
        let position = if self.version >= VERSION_TOKENS {
            Position::from_token(token)
        } else {
            token.parse::<i64>().ok().and_then(Position::from_raw)
        };
        let position = match position {
            Some(p) => p,
            None => {
                self.unknown("position", token, at)?;
                Position::None
            }
        };

        let mut quantity = 1;
        let mut skills = Vec::new();
        let count: usize = cursor.next_number("skill count")?;
        for _ in 0..count {
            let at = cursor.line();
            let line = cursor.next_line()?;
            let (skill_name, value) = split_pair(line)
                .ok_or_else(|| error_at(at, format!("expected Name:value, found '{line}'")))?;
            let value: i32 = value
                .parse()
                .map_err(|_| error_at(at, format!("bad skill value '{value}'")))?;
            // v1 kept the stack size in the skill table
            if self.version < VERSION_TOKENS && skill_name.trim().eq_ignore_ascii_case("quantity") {
                quantity = value;
                continue;
            }
            match SkillId::from_name(skill_name) {
                Some(skill) => skills.push((skill, value)),
                None => self.unknown("skill", skill_name, at)?,
            }
        }

        let mut acts = Vec::new();
        let count: usize = cursor.next_number("action count")?;
        for _ in 0..count {
            let at = cursor.line();
            let line = cursor.next_line()?;
            let (token, number) = split_pair(line)
                .ok_or_else(|| error_at(at, format!("expected TOKEN:number, found '{line}'")))?;
            let number: u32 = number
                .parse()
                .map_err(|_| error_at(at, format!("bad action target '{number}'")))?;
            let Some(act) = Act::from_token(token.trim()) else {
                self.unknown("action", token, at)?;
                continue;
            };
            if act == Act::None {
                continue;
            }
            let target = if number == 0 {
                None
            } else {
                Some(self.object_for(number))
            };
            if target.is_none() && act.is_equipment() {
                tracing::warn!(line = at, ?act, "equipment slot without a target dropped");
                self.warnings += 1;
                continue;
            }
            acts.push((act, target));
        }

        Ok(Record {
            short_desc,
            name,
            desc,
            long_desc,
            numeric,
            gender,
            position,
            skills,
            acts,
            busy_command: String::new(),
            quantity,
        })
    }

    fn apply(&mut self, id: ObjectId, record: Record) -> Result<()> {
        let obj = self
            .world
            .objects
            .get_mut(id)
            .ok_or(MudError::StaleObject(id))?;
        let [weight, volume, size, value, attrs @ .., stun, phys, stru] = record.numeric;

        obj.set_short_desc(record.short_desc);
        obj.set_name(record.name);
        obj.set_desc(record.desc);
        obj.set_long_desc(record.long_desc);
        obj.set_weight(weight);
        obj.set_volume(volume);
        obj.set_size(size);
        obj.set_value(value);
        obj.set_gender(record.gender);
        for (attribute, value) in Attribute::ALL.into_iter().zip(attrs) {
            obj.set_attribute(attribute, value);
        }
        obj.restore_pools(DamagePools { stun, phys, stru });
        obj.force_position(record.position);
        for (skill, value) in record.skills {
            obj.set_skill(skill, value);
        }
        for (act, target) in record.acts {
            obj.acts.set(act, target);
        }
        obj.busy_command = record.busy_command;
        obj.set_quantity(record.quantity);
        Ok(())
    }

    /// Object bound to a save number, allocated on first sight
    fn object_for(&mut self, number: u32) -> ObjectId {
        if let Some(id) = self.numbers.get(&number) {
            return *id;
        }
        let id = self.world.alloc_detached();
        self.numbers.insert(number, id);
        self.created.push(id);
        id
    }

    fn unknown(&mut self, kind: &'static str, token: &str, line: usize) -> Result<()> {
        match self.policy {
            UnknownTokenPolicy::Strict => Err(MudError::UnknownToken {
                kind,
                token: token.to_string(),
                line,
            }),
            UnknownTokenPolicy::Warn => {
                tracing::warn!(kind, token, line, "unknown token defaulted");
                self.warnings += 1;
                Ok(())
            }
        }
    }

    // === PASS 2 ===

    /// Numbers used as targets but never defined
    fn drop_undefined(&mut self, line: usize) -> Result<()> {
        let missing: Vec<(u32, ObjectId)> = self
            .numbers
            .iter()
            .filter(|(number, _)| !self.defined.contains(*number))
            .map(|(number, id)| (*number, *id))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        if self.policy == UnknownTokenPolicy::Strict {
            let mut numbers: Vec<u32> = missing.iter().map(|(n, _)| *n).collect();
            numbers.sort_unstable();
            return Err(error_at(
                line,
                format!("objects {numbers:?} referenced but never defined"),
            ));
        }

        let gone: AHashSet<ObjectId> = missing.iter().map(|(_, id)| *id).collect();
        for (number, _) in &missing {
            tracing::warn!(number, "referenced object never defined; links dropped");
            self.warnings += 1;
            self.numbers.remove(number);
        }
        let holders: Vec<ObjectId> = self.fixups.iter().map(|(id, _)| *id).collect();
        self.strip_acts_to(&holders, &gone);
        for id in &gone {
            self.world.objects.remove(*id);
        }
        self.created.retain(|id| !gone.contains(id));
        Ok(())
    }

    fn finish(&mut self) {
        let now = self.world.current_tick;
        let fixups = std::mem::take(&mut self.fixups);

        for (id, remaining) in &fixups {
            let Some(obj) = self.world.objects.get_mut(*id) else {
                continue;
            };
            obj.busy_until =
                (*remaining > 0 || !obj.busy_command.is_empty()).then(|| now + *remaining);
            let targets: Vec<ObjectId> = obj.acts().iter().filter_map(|(_, t)| t).collect();
            for target in targets {
                if let Some(t) = self.world.objects.get_mut(target) {
                    if !t.touching.contains(id) {
                        t.touching.push(*id);
                    }
                }
            }
        }

        // equipment that is not actually carried does not survive the load
        for (id, _) in &fixups {
            self.world.release_uncarried(*id);
        }
        self.fixups = fixups;
    }

    fn rollback(&mut self) {
        let gone: AHashSet<ObjectId> = self.created.iter().copied().collect();
        if let Some(root) = self.bound {
            self.strip_acts_to(&[root], &gone);
        }
        for id in self.created.drain(..).rev() {
            self.world.detach(id);
            self.world.objects.remove(id);
        }
        tracing::debug!(removed = gone.len(), "failed load rolled back");
    }

    fn strip_acts_to(&mut self, holders: &[ObjectId], gone: &AHashSet<ObjectId>) {
        for holder in holders {
            let Some(obj) = self.world.objects.get_mut(*holder) else {
                continue;
            };
            let doomed: Vec<Act> = obj
                .acts()
                .iter()
                .filter(|(_, t)| t.is_some_and(|t| gone.contains(&t)))
                .map(|(act, _)| act)
                .collect();
            for act in doomed {
                obj.acts.remove(act);
            }
        }
    }
}
