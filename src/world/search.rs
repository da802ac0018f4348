//! Neighbourhood search and visibility
//!
//! `pick_objects` walks a bounded neighbourhood around the searcher in zone
//! order (self, internal, nearby, adjacent), keeps what is visible and
//! passes the filters, and matches the query against names. Finding nothing
//! is an ordinary empty result.

use std::ops::{BitAnd, BitOr, BitOrAssign};

use ahash::AHashSet;

use crate::actions::Act;
use crate::core::types::ObjectId;
use crate::skills::SkillId;
use crate::world::World;

/// Search zones, filters and vision channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LocMask(u32);

impl LocMask {
    pub const NONE: LocMask = LocMask(0);

    // zones
    pub const SELF: LocMask = LocMask(1 << 0);
    pub const INTERNAL: LocMask = LocMask(1 << 1);
    pub const NEARBY: LocMask = LocMask(1 << 2);
    pub const ADJACENT: LocMask = LocMask(1 << 3);

    // filters
    pub const NOTWORN: LocMask = LocMask(1 << 8);
    pub const FIXED: LocMask = LocMask(1 << 9);
    pub const ALIVE: LocMask = LocMask(1 << 10);
    pub const CONSCIOUS: LocMask = LocMask(1 << 11);

    // vision channels
    pub const DARK: LocMask = LocMask(1 << 16);
    pub const HEAT: LocMask = LocMask(1 << 17);
    pub const NINJA: LocMask = LocMask(1 << 18);

    /// Self, inventory and the room: the usual "here"
    pub const HERE: LocMask = LocMask(0b0111);
    pub const ALL_ZONES: LocMask = LocMask(0b1111);

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: LocMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: LocMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LocMask {
    type Output = LocMask;

    fn bitor(self, rhs: LocMask) -> LocMask {
        LocMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for LocMask {
    fn bitor_assign(&mut self, rhs: LocMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LocMask {
    type Output = LocMask;

    fn bitand(self, rhs: LocMask) -> LocMask {
        LocMask(self.0 & rhs.0)
    }
}

/// Parsed search text: `sword`, `2.sword`, `all.sword`, `all`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Query<'a> {
    words: &'a str,
    ordinal: Option<usize>,
    all: bool,
}

impl<'a> Query<'a> {
    fn parse(text: &'a str) -> Query<'a> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("all") {
            return Query {
                words: "",
                ordinal: None,
                all: true,
            };
        }
        if let Some((head, rest)) = text.split_once('.') {
            if head.eq_ignore_ascii_case("all") {
                return Query {
                    words: rest.trim(),
                    ordinal: None,
                    all: true,
                };
            }
            if let Ok(n) = head.parse::<usize>() {
                if n >= 1 {
                    return Query {
                        words: rest.trim(),
                        ordinal: Some(n),
                        all: false,
                    };
                }
            }
        }
        Query {
            words: text,
            ordinal: None,
            all: false,
        }
    }
}

/// Light state of a location as seen by one searcher
#[derive(Debug, Clone, Copy)]
struct Lighting {
    dark: bool,
}

impl World {
    /// Vision channels a searcher has innately
    pub fn vision_channels(&self, searcher: ObjectId) -> LocMask {
        let mut mask = LocMask::NONE;
        if let Some(obj) = self.get(searcher) {
            if obj.has_skill(SkillId::DarkVision) {
                mask |= LocMask::DARK;
            }
            if obj.has_skill(SkillId::HeatVision) {
                mask |= LocMask::HEAT;
            }
        }
        mask
    }

    /// A Dark location is lit if it, or anything within two levels of it,
    /// is a light source
    pub fn is_dark(&self, location: ObjectId) -> bool {
        let Some(loc) = self.get(location) else {
            return false;
        };
        if !loc.has_skill(SkillId::Dark) || loc.has_skill(SkillId::LightSource) {
            return false;
        }
        let lit = loc.contents().iter().any(|child| {
            self.get(*child).is_some_and(|c| {
                c.has_skill(SkillId::LightSource)
                    || c.contents().iter().any(|g| {
                        self.get(*g)
                            .is_some_and(|gc| gc.has_skill(SkillId::LightSource))
                    })
            })
        });
        !lit
    }

    fn is_visible(&self, id: ObjectId, lighting: Lighting, mask: LocMask) -> bool {
        let Some(obj) = self.get(id) else {
            return false;
        };
        if mask.contains(LocMask::NINJA) {
            return true;
        }
        if obj.has_skill(SkillId::Hidden) {
            return false;
        }
        if !lighting.dark {
            return true;
        }
        mask.contains(LocMask::DARK)
            || (mask.contains(LocMask::HEAT) && obj.is_animate())
            || obj.has_skill(SkillId::LightSource)
    }

    fn passes_filters(&self, id: ObjectId, mask: LocMask) -> bool {
        let Some(obj) = self.get(id) else {
            return false;
        };
        if mask.contains(LocMask::FIXED) && !obj.has_skill(SkillId::Fixed) {
            return false;
        }
        if mask.contains(LocMask::ALIVE) && !obj.is_alive() {
            return false;
        }
        if mask.contains(LocMask::CONSCIOUS) && !(obj.is_animate() && obj.is_conscious()) {
            return false;
        }
        if mask.contains(LocMask::NOTWORN) && self.is_equipped(id) {
            return false;
        }
        true
    }

    /// Worn, wielded or held by whoever carries it
    pub fn is_equipped(&self, id: ObjectId) -> bool {
        self.parent(id).is_some_and(|p| {
            self.get(p).is_some_and(|owner| {
                owner
                    .acts()
                    .slots_targeting(id)
                    .iter()
                    .any(Act::is_equipment)
            })
        })
    }

    /// Children of `container`, descending through open or transparent
    /// inanimate containers
    fn visible_contents(&self, container: ObjectId, out: &mut Vec<ObjectId>) {
        for child in self.contents(container) {
            out.push(*child);
            if let Some(obj) = self.get(*child) {
                if obj.is_see_through() && !obj.is_animate() && !obj.contents().is_empty() {
                    self.visible_contents(*child, out);
                }
            }
        }
    }

    /// Ordered, de-duplicated candidates with the lighting of their zone
    fn neighbourhood(&self, searcher: ObjectId, mask: LocMask) -> Vec<(ObjectId, Lighting)> {
        let mut seen = AHashSet::new();
        let mut out = Vec::new();
        let lit = Lighting { dark: false };

        let mut push_all = |ids: Vec<ObjectId>, lighting: Lighting, out: &mut Vec<(ObjectId, Lighting)>| {
            for id in ids {
                if seen.insert(id) {
                    out.push((id, lighting));
                }
            }
        };

        if mask.contains(LocMask::SELF) {
            push_all(vec![searcher], lit, &mut out);
        }
        if mask.contains(LocMask::INTERNAL) {
            let mut inner = Vec::new();
            self.visible_contents(searcher, &mut inner);
            push_all(inner, lit, &mut out);
        }

        let Some(room) = self.parent(searcher) else {
            return out;
        };
        let room_light = Lighting {
            dark: self.is_dark(room),
        };

        if mask.contains(LocMask::NEARBY) {
            let mut nearby = Vec::new();
            for sibling in self.contents(room) {
                if *sibling == searcher {
                    continue;
                }
                nearby.push(*sibling);
                if let Some(obj) = self.get(*sibling) {
                    if obj.is_see_through() && !obj.is_animate() {
                        self.visible_contents(*sibling, &mut nearby);
                    }
                }
            }
            push_all(nearby, room_light, &mut out);
        }

        if mask.contains(LocMask::ADJACENT) {
            for sibling in self.contents(room).to_vec() {
                let Some(obj) = self.get(sibling) else {
                    continue;
                };
                let Some(link) = obj.act_target(Act::SpecialLinked) else {
                    continue;
                };
                if !obj.is_see_through() {
                    continue;
                }
                let Some(far_room) = self.parent(link) else {
                    continue;
                };
                if far_room == room {
                    continue;
                }
                let far_light = Lighting {
                    dark: self.is_dark(far_room),
                };
                let mut far = Vec::new();
                self.visible_contents(far_room, &mut far);
                push_all(far, far_light, &mut out);
            }
        }

        out
    }

    /// Every match for `query` in search order
    ///
    /// `2.sword` yields only the second sword, `all.sword` every sword,
    /// `all` everything in the zones, and `me`/`self` the searcher itself.
    pub fn pick_objects(&self, searcher: ObjectId, query: &str, mask: LocMask) -> Vec<ObjectId> {
        if !self.contains(searcher) {
            return Vec::new();
        }
        let trimmed = query.trim();
        if trimmed.eq_ignore_ascii_case("me") || trimmed.eq_ignore_ascii_case("self") {
            return vec![searcher];
        }

        let query = Query::parse(trimmed);
        if query.words.is_empty() && !query.all {
            return Vec::new();
        }
        let mask = mask | self.vision_channels(searcher);

        let matches = self
            .neighbourhood(searcher, mask)
            .into_iter()
            .filter(|(id, lighting)| *id == searcher || self.is_visible(*id, *lighting, mask))
            .filter(|(id, _)| self.passes_filters(*id, mask))
            .filter(|(id, _)| {
                query.words.is_empty() || self.get(*id).is_some_and(|obj| obj.matches(query.words))
            })
            .map(|(id, _)| id);

        match query.ordinal {
            Some(n) => matches.skip(n - 1).take(1).collect(),
            None => matches.collect(),
        }
    }

    /// First match, or the ordinal'th for `N.name`
    pub fn pick_object(&self, searcher: ObjectId, query: &str, mask: LocMask) -> Option<ObjectId> {
        self.pick_objects(searcher, query, mask).into_iter().next()
    }
}
