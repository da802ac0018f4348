//! The world context
//!
//! Owns every object, the two sentinel roots, the attached minds, the dice
//! stream and the config. Built once at startup and passed explicitly to
//! everything that needs it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::WorldConfig;
use crate::core::error::{MudError, Result};
use crate::core::types::{ObjectId, Tick};
use crate::entity::{Arena, GameObject};
use crate::mind::MindSlot;
use crate::skills::SkillId;

pub struct World {
    pub(crate) objects: Arena<GameObject>,
    universe: ObjectId,
    trash: ObjectId,
    pub(crate) minds: Vec<Option<MindSlot>>,
    pub current_tick: Tick,
    /// Dice stream (deterministic for a given seed)
    pub rng: ChaCha8Rng,
    config: WorldConfig,
}

impl World {
    /// Build an empty world holding only the Universe and TrashBin roots
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;

        let mut objects = Arena::new();
        let mut universe_obj = GameObject::new("the Universe");
        universe_obj.set_name("universe");
        let mut trash_obj = GameObject::new("the Trash Bin");
        trash_obj.set_name("trash bin");

        let universe = objects.insert(universe_obj);
        let trash = objects.insert(trash_obj);
        if !objects.contains(universe) || !objects.contains(trash) || universe == trash {
            return Err(MudError::RootsUnavailable);
        }

        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        tracing::debug!(seed = config.rng_seed, "world created");

        Ok(Self {
            objects,
            universe,
            trash,
            minds: Vec::new(),
            current_tick: 0,
            rng,
            config,
        })
    }

    /// Default config with a specific dice seed
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::new(WorldConfig {
            rng_seed: seed,
            ..WorldConfig::default()
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Reseed the dice stream
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn universe(&self) -> ObjectId {
        self.universe
    }

    pub fn trash_bin(&self) -> ObjectId {
        self.trash
    }

    pub fn is_root(&self, id: ObjectId) -> bool {
        id == self.universe || id == self.trash
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains(id)
    }

    /// Live objects, roots included
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.ids()
    }

    /// Create an object inside `parent`
    pub fn create(&mut self, parent: ObjectId, short_desc: &str) -> Result<ObjectId> {
        self.create_from(parent, GameObject::new(short_desc))
    }

    /// Insert a prepared object inside `parent`
    ///
    /// Relationship fields of `object` are reset; the new object starts with
    /// no contents, links or minds. The TrashBin and recycled objects read
    /// as stale parents.
    pub fn create_from(&mut self, parent: ObjectId, object: GameObject) -> Result<ObjectId> {
        let retired = parent == self.trash_bin() || self.is_recycled(parent);
        if !self.objects.contains(parent) || retired {
            return Err(MudError::StaleObject(parent));
        }
        let id = self.objects.insert(object.detached_copy());
        self.attach(id, parent);
        Ok(id)
    }

    /// Allocate an object with no parent; the loader attaches it later
    pub(crate) fn alloc_detached(&mut self) -> ObjectId {
        self.objects.insert(GameObject::default())
    }

    /// Unopposed check for `id` using the world dice
    pub fn roll(&mut self, id: ObjectId, skill: SkillId, target: i32) -> Option<i32> {
        let obj = self.objects.get(id)?;
        Some(obj.roll(skill, target, &self.config, &mut self.rng))
    }

    /// Contested check between two objects using the world dice
    pub fn opposed_roll(
        &mut self,
        attacker: ObjectId,
        skill: SkillId,
        defender: ObjectId,
        defender_skill: SkillId,
        bias: i32,
    ) -> Option<i32> {
        let a = self.objects.get(attacker)?;
        let d = self.objects.get(defender)?;
        Some(a.opposed_roll(skill, d, defender_skill, bias, &self.config, &mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_has_two_roots() {
        let world = World::new(WorldConfig::default()).unwrap();
        assert_eq!(world.object_count(), 2);
        assert_ne!(world.universe(), world.trash_bin());
        assert!(world.get(world.universe()).unwrap().parent().is_none());
        assert!(world.is_root(world.trash_bin()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            min_target_number: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(World::new(config), Err(MudError::InvalidConfig(_))));
    }

    #[test]
    fn test_create_attaches_to_parent() {
        let mut world = World::with_seed(1).unwrap();
        let room = world.create(world.universe(), "a small room").unwrap();
        assert_eq!(world.get(room).unwrap().parent(), Some(world.universe()));
        assert_eq!(world.contents(world.universe()), &[room]);
    }

    #[test]
    fn test_create_in_trash_fails() {
        let mut world = World::with_seed(1).unwrap();
        let bin = world.trash_bin();
        assert!(matches!(world.create(bin, "a rag"), Err(MudError::StaleObject(_))));

        let room = world.create(world.universe(), "a room").unwrap();
        let crate_id = world.create(room, "a crate").unwrap();
        assert!(world.recycle(crate_id));
        let before = world.object_count();
        assert!(matches!(
            world.create(crate_id, "a nail"),
            Err(MudError::StaleObject(id)) if id == crate_id
        ));
        assert_eq!(world.object_count(), before);
        assert_eq!(world.empty_trash(), 1);
        assert!(world.verify().is_empty());
    }

    #[test]
    fn test_create_in_stale_parent_fails() {
        let mut world = World::with_seed(1).unwrap();
        let room = world.create(world.universe(), "a room").unwrap();
        world.recycle(room);
        world.empty_trash();
        assert!(matches!(
            world.create(room, "a ghost"),
            Err(MudError::StaleObject(_))
        ));
    }

    #[test]
    fn test_world_roll_uses_seed() {
        let mut a = World::with_seed(77).unwrap();
        let mut b = World::with_seed(77).unwrap();
        let ra = a.create(a.universe(), "a thief").unwrap();
        let rb = b.create(b.universe(), "a thief").unwrap();
        a.get_mut(ra).unwrap().set_skill(SkillId::Stealth, 5);
        b.get_mut(rb).unwrap().set_skill(SkillId::Stealth, 5);

        for _ in 0..10 {
            assert_eq!(a.roll(ra, SkillId::Stealth, 4), b.roll(rb, SkillId::Stealth, 4));
        }
    }
}
