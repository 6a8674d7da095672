use fnv::FnvHashMap;

/// Effect families rate-limited independently of each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    BassBurst,
    MidBurst,
    HighBurst,
    Meteor,
    Supernova,
    ShipBattle,
    CameraShift,
}

/// Earliest time (engine seconds) at which each category may fire again.
/// Categories never armed are always ready.
#[derive(Clone, Debug, Default)]
pub struct Cooldowns {
    next_allowed: FnvHashMap<EffectCategory, f64>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ready(&self, category: EffectCategory, now: f64) -> bool {
        self.next_allowed
            .get(&category)
            .map_or(true, |&t| now >= t)
    }

    /// Block `category` until `until`.
    pub fn arm(&mut self, category: EffectCategory, until: f64) {
        self.next_allowed.insert(category, until);
    }

    /// Check and re-arm in one call: returns true and blocks the category for
    /// `cooldown` seconds if it was ready.
    pub fn try_fire(&mut self, category: EffectCategory, now: f64, cooldown: f64) -> bool {
        if !self.ready(category, now) {
            return false;
        }
        self.arm(category, now + cooldown);
        true
    }

    pub fn next_allowed(&self, category: EffectCategory) -> Option<f64> {
        self.next_allowed.get(&category).copied()
    }
}
