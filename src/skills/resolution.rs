//! Skill checks
//!
//! `roll` and `opposed_roll` are the only dice entry points; combat,
//! stealth against perception, lock picking and every other contested check
//! go through them.

use rand::Rng;

use crate::core::config::WorldConfig;
use crate::entity::GameObject;
use crate::skills::{count_successes, SkillId};

impl GameObject {
    /// Effective rating for a skill
    ///
    /// A stored value wins. An untrained skill falls back to its linked
    /// attribute plus the category bump; properties without a linked
    /// attribute read 0.
    pub fn skill_target(&self, skill: SkillId) -> i32 {
        if self.has_skill(skill) {
            return self.skill(skill);
        }
        match skill.linked_attribute() {
            Some(attribute) => {
                (self.attribute(attribute) + skill.category().default_bump()).max(0)
            }
            None => 0,
        }
    }

    /// Added to every target number while wounded
    pub fn wound_penalty(&self, config: &WorldConfig) -> i32 {
        self.pools().wound_penalty(&config.wound_tiers)
    }

    /// Unopposed check: successes rolling `skill` against `target`
    pub fn roll<R: Rng + ?Sized>(
        &self,
        skill: SkillId,
        target: i32,
        config: &WorldConfig,
        rng: &mut R,
    ) -> i32 {
        let dice = self.skill_target(skill);
        let target = target.max(config.min_target_number) + self.wound_penalty(config);
        count_successes(rng, dice, target)
    }

    /// Contested check: attacker successes minus defender successes
    ///
    /// Each side's target number is the other side's rating; `bias` favours
    /// the attacker (lowering their target, raising the defender's).
    pub fn opposed_roll<R: Rng + ?Sized>(
        &self,
        skill: SkillId,
        defender: &GameObject,
        defender_skill: SkillId,
        bias: i32,
        config: &WorldConfig,
        rng: &mut R,
    ) -> i32 {
        let attacker_target = defender.skill_target(defender_skill) - bias;
        let defender_target = self.skill_target(skill) + bias;
        let attacker_successes = self.roll(skill, attacker_target, config, rng);
        let defender_successes = defender.roll(defender_skill, defender_target, config, rng);
        attacker_successes - defender_successes
    }
}
