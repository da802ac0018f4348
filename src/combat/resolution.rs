//! Combat exchange resolution
//!
//! One exchange is one opposed roll. The attacker's skill comes from the
//! wielded weapon (or fists/feet), the defender parries with a weapon they
//! know or falls back to Shields, Dodge, then Acrobatics. Reach difference
//! becomes the bias. A positive net lands on a location from the weighted
//! table, armor there rolls to soak successes, and the rest become a wound.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::Act;
use crate::combat::armor::mitigate;
use crate::combat::body_zone::HitLocation;
use crate::combat::constants::{MAX_REACH_BIAS, REACH_BIAS_PER_STEP};
use crate::combat::weapons::WeaponProfile;
use crate::combat::wounds::Wound;
use crate::core::types::ObjectId;
use crate::entity::{Attribute, DamageKind, GameObject};
use crate::skills::SkillId;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("combatant {0} does not exist")]
    Stale(ObjectId),
    #[error("cannot fight oneself")]
    SelfTarget,
    #[error("attacker is {0:?}")]
    Incapacitated(Act),
}

/// Result of an exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeResult {
    pub attack_skill: SkillId,
    pub defense_skill: SkillId,
    /// Reach advantage in the attacker's favour (negative: defender's)
    pub bias: i32,
    /// Attacker successes minus defender successes
    pub net_successes: i32,
    /// Drawn only when the net is positive
    pub location: Option<HitLocation>,
    /// Successes soaked by armor at the location
    pub mitigated: i32,
    /// Present when successes survived the armor
    pub wound: Option<Wound>,
}

impl ExchangeResult {
    pub fn is_hit(&self) -> bool {
        self.wound.is_some()
    }
}

/// Skill the defender answers with
///
/// A trained weapon skill matching what they wield; otherwise a worn
/// shield with the off hand free (or gripping it), then trained Dodge,
/// then trained Acrobatics. Untrained Dodge is the last resort.
pub fn defense_skill(world: &World, defender: ObjectId) -> Option<SkillId> {
    let obj = world.get(defender)?;
    let profile = WeaponProfile::of(world, defender)?;
    if profile.weapon_type.is_some() && obj.has_skill(profile.skill) {
        return Some(profile.skill);
    }
    if let Some(shield) = obj.act_target(Act::WearShield) {
        let off_hand = obj.act_target(Act::Hold);
        if off_hand.is_none() || off_hand == Some(shield) {
            return Some(SkillId::Shields);
        }
    }
    for skill in [SkillId::Dodge, SkillId::Acrobatics] {
        if obj.has_skill(skill) {
            return Some(skill);
        }
    }
    Some(SkillId::Dodge)
}

/// Bias from reach, capped both ways
pub fn reach_bias(attacker_reach: i32, defender_reach: i32) -> i32 {
    ((attacker_reach - defender_reach) * REACH_BIAS_PER_STEP).clamp(-MAX_REACH_BIAS, MAX_REACH_BIAS)
}

/// Force of a blow: Strength plus weapon force, plus the grip bonus
pub fn blow_force(attacker: &GameObject, profile: &WeaponProfile, two_handed_bonus: i32) -> i32 {
    let bonus = if profile.two_handed_grip {
        two_handed_bonus
    } else {
        0
    };
    attacker.attribute(Attribute::Strength) + profile.force + bonus
}

/// Resolve one attack from `attacker` on `defender`
///
/// A defender who is asleep or incapacitated rolls no defense; the attack
/// is then an unopposed roll against the minimum target number.
pub fn resolve_exchange(
    world: &mut World,
    attacker: ObjectId,
    defender: ObjectId,
) -> Result<ExchangeResult, CombatError> {
    if attacker == defender {
        return Err(CombatError::SelfTarget);
    }
    let a = world.get(attacker).ok_or(CombatError::Stale(attacker))?;
    if let Some(state) = a.incapacitation() {
        return Err(CombatError::Incapacitated(state));
    }
    let d = world.get(defender).ok_or(CombatError::Stale(defender))?;
    let defenseless = !d.is_conscious();

    let attack = WeaponProfile::of(world, attacker).ok_or(CombatError::Stale(attacker))?;
    let defense = WeaponProfile::of(world, defender).ok_or(CombatError::Stale(defender))?;
    let defense_skill = defense_skill(world, defender).ok_or(CombatError::Stale(defender))?;
    let bias = reach_bias(attack.reach, defense.reach);
    let force = blow_force(a, &attack, world.config().two_handed_bonus);

    let net_successes = if defenseless {
        let min = world.config().min_target_number;
        world.roll(attacker, attack.skill, min).unwrap_or(0)
    } else {
        world
            .opposed_roll(attacker, attack.skill, defender, defense_skill, bias)
            .unwrap_or(0)
    };

    let mut result = ExchangeResult {
        attack_skill: attack.skill,
        defense_skill,
        bias,
        net_successes,
        location: None,
        mitigated: 0,
        wound: None,
    };
    if net_successes <= 0 {
        tracing::trace!(%attacker, %defender, net_successes, "miss");
        return Ok(result);
    }

    let location = HitLocation::sample(&mut world.rng);
    result.location = Some(location);
    result.mitigated = mitigate(world, defender, location, force);
    let remaining = net_successes - result.mitigated;
    if remaining <= 0 {
        tracing::trace!(%attacker, %defender, location = location.name(), "absorbed by armor");
        return Ok(result);
    }

    let kind = if attack.is_armed() {
        DamageKind::Phys
    } else {
        DamageKind::Stun
    };
    let stage = attack.severity + location.stage_modifier();
    result.wound = world.wound(defender, kind, force, stage, remaining, Some(location));

    tracing::debug!(
        %attacker,
        %defender,
        net_successes,
        location = location.name(),
        "hit"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::weapons::WeaponType;

    struct Duel {
        world: World,
        a: ObjectId,
        b: ObjectId,
    }

    fn duel(seed: u64) -> Duel {
        let mut world = World::with_seed(seed).unwrap();
        let room = world.create(world.universe(), "a pit").unwrap();
        let a = world.create(room, "a swordsman").unwrap();
        {
            let o = world.get_mut(a).unwrap();
            o.set_attribute(Attribute::Body, 4);
            o.set_attribute(Attribute::Strength, 6);
            o.set_skill(SkillId::LongBlades, 3);
        }
        let sword = world.create(a, "a longsword").unwrap();
        {
            let s = world.get_mut(sword).unwrap();
            s.set_skill(SkillId::WeaponType, WeaponType::LongBlades.code());
            s.set_skill(SkillId::WeaponForce, 2);
            s.set_skill(SkillId::WeaponSeverity, 1);
        }
        world.wield(a, sword).unwrap();

        let b = world.create(room, "a dodger").unwrap();
        {
            let o = world.get_mut(b).unwrap();
            o.set_attribute(Attribute::Body, 4);
            o.set_skill(SkillId::Dodge, 2);
        }
        Duel { world, a, b }
    }

    #[test]
    fn test_skills_and_bias() {
        let mut d = duel(1);
        let result = resolve_exchange(&mut d.world, d.a, d.b).unwrap();
        assert_eq!(result.attack_skill, SkillId::LongBlades);
        assert_eq!(result.defense_skill, SkillId::Dodge);
        // long blade reach 2 against bare hands
        assert_eq!(result.bias, 2);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let mut first = duel(99);
        let mut second = duel(99);
        for _ in 0..5 {
            let r1 = resolve_exchange(&mut first.world, first.a, first.b).unwrap();
            let r2 = resolve_exchange(&mut second.world, second.a, second.b).unwrap();
            assert_eq!(r1, r2);
        }
        assert_eq!(
            first.world.get(first.b).unwrap().pools(),
            second.world.get(second.b).unwrap().pools()
        );
    }

    #[test]
    fn test_location_only_on_positive_net() {
        let mut d = duel(7);
        for _ in 0..30 {
            let result = resolve_exchange(&mut d.world, d.a, d.b).unwrap();
            assert_eq!(result.location.is_some(), result.net_successes > 0);
            if let Some(wound) = &result.wound {
                assert_eq!(wound.kind, DamageKind::Phys);
                assert!(wound.applied >= 0);
            }
            if d.world.get(d.b).unwrap().is_dead() {
                break;
            }
        }
    }

    #[test]
    fn test_unarmed_deals_stun() {
        let mut d = duel(3);
        d.world.stop_act(d.a, Act::Wield);
        for _ in 0..30 {
            let result = resolve_exchange(&mut d.world, d.a, d.b).unwrap();
            assert_eq!(result.attack_skill, SkillId::Punching);
            if let Some(wound) = result.wound {
                assert_eq!(wound.kind, DamageKind::Stun);
            }
        }
        assert_eq!(d.world.get(d.b).unwrap().phys(), 0);
    }

    #[test]
    fn test_defense_fallbacks() {
        let mut d = duel(1);
        assert_eq!(defense_skill(&d.world, d.b), Some(SkillId::Dodge));

        d.world.get_mut(d.b).unwrap().set_skill(SkillId::Dodge, 0);
        d.world.get_mut(d.b).unwrap().set_skill(SkillId::Acrobatics, 4);
        assert_eq!(defense_skill(&d.world, d.b), Some(SkillId::Acrobatics));

        let buckler = d.world.create(d.b, "a buckler").unwrap();
        d.world
            .get_mut(buckler)
            .unwrap()
            .set_skill(SkillId::WearableOn(Act::WearShield), 1);
        d.world.wear(d.b, buckler).unwrap();
        assert_eq!(defense_skill(&d.world, d.b), Some(SkillId::Shields));

        // the swordsman parries with the blade they know
        assert_eq!(defense_skill(&d.world, d.a), Some(SkillId::LongBlades));
    }

    #[test]
    fn test_shield_needs_free_off_hand() {
        let mut d = duel(1);
        let shield = d.world.create(d.b, "a round shield").unwrap();
        d.world
            .get_mut(shield)
            .unwrap()
            .set_skill(SkillId::WearableOn(Act::WearShield), 1);
        d.world.wear(d.b, shield).unwrap();
        assert_eq!(defense_skill(&d.world, d.b), Some(SkillId::Shields));

        // gripping the shield itself still counts
        d.world.hold(d.b, shield).unwrap();
        assert_eq!(defense_skill(&d.world, d.b), Some(SkillId::Shields));

        let torch = d.world.create(d.b, "a torch").unwrap();
        d.world.hold(d.b, torch).unwrap();
        assert_eq!(defense_skill(&d.world, d.b), Some(SkillId::Dodge));

        let result = resolve_exchange(&mut d.world, d.b, d.a).unwrap();
        assert_eq!(result.attack_skill, SkillId::Kicking);
    }

    #[test]
    fn test_two_handed_grip_adds_force() {
        let d = duel(1);
        let a = d.world.get(d.a).unwrap();
        let mut profile = WeaponProfile::of(&d.world, d.a).unwrap();
        assert_eq!(blow_force(a, &profile, 1), 8);
        profile.two_handed_grip = true;
        assert_eq!(blow_force(a, &profile, 1), 9);
    }

    #[test]
    fn test_incapacitated_attacker_refused() {
        let mut d = duel(1);
        d.world.hit_stun(d.a, 10);
        assert_eq!(
            resolve_exchange(&mut d.world, d.a, d.b),
            Err(CombatError::Incapacitated(Act::Unconscious))
        );
        assert_eq!(resolve_exchange(&mut d.world, d.b, d.b), Err(CombatError::SelfTarget));
    }

    #[test]
    fn test_reach_bias_capped() {
        assert_eq!(reach_bias(4, 0), 3);
        assert_eq!(reach_bias(0, 4), -3);
        assert_eq!(reach_bias(2, 1), 1);
    }
}
