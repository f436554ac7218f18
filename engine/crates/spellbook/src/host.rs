use std::sync::{Arc, Mutex, MutexGuard};

use crate::formula::{fail_severity_from_percent, failure_rate_to_int};
use crate::god::{str_to_god, God};
use crate::religion;
use crate::spell::{self, SpellFlags, SpellType};

/// Outcome of a spell cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastResult {
    /// The spell went off; `affected` counts the monsters it reached.
    Success { affected: usize },
    /// The spell cannot be cast this way; nothing happened.
    Abort,
}

/// Queries the scripting layer forwards to the game engine.
///
/// Only the caster-dependent queries are required; static spell data and
/// deity rules fall back to the engine tables.
pub trait SpellHost: Send {
    fn spell_by_name(&self, name: &str) -> SpellType {
        spell::spell_by_name(name)
    }

    fn god_by_name(&self, name: &str) -> God {
        str_to_god(name)
    }

    fn is_memorised(&self, spell: SpellType) -> bool;

    fn spell_difficulty(&self, spell: SpellType) -> i32 {
        spell::spell_difficulty(spell)
    }

    fn spell_mana(&self, spell: SpellType) -> i32 {
        spell::spell_mana(spell)
    }

    fn spell_power_cap(&self, spell: SpellType) -> i32 {
        spell::spell_power_cap(spell)
    }

    fn spell_flags(&self, spell: SpellType) -> SpellFlags {
        spell::get_spell_flags(spell)
    }

    /// Effective power for the current caster, capped at the spell's
    /// power cap.
    fn calc_spell_power(&self, spell: SpellType, apply_intel: bool) -> i32;

    fn spell_range(&self, spell: SpellType, power: i32) -> i32;

    /// Raw failure value before conversion to a percentage.
    fn spell_fail(&self, spell: SpellType) -> i32;

    fn fail_severity(&self, spell: SpellType) -> i32 {
        fail_severity_from_percent(failure_rate_to_int(self.spell_fail(spell)))
    }

    fn spell_hunger(&self, spell: SpellType) -> i32;

    /// The caster's current deity.
    fn religion(&self) -> God;

    fn god_likes_spell(&self, spell: SpellType, god: God) -> bool {
        religion::god_likes_spell(spell, god)
    }

    fn god_hates_spell(&self, spell: SpellType, god: God) -> bool {
        religion::god_hates_spell(spell, god)
    }

    fn god_loathes_spell(&self, spell: SpellType, god: God) -> bool {
        religion::god_loathes_spell(spell, god)
    }

    /// Cast an area spell at everything in the caster's line of sight.
    fn cast_los_attack(&mut self, spell: SpellType, power: i32) -> CastResult;
}

/// A host shared between the game loop and a script engine. Every query
/// locks for its own duration only.
impl<H: SpellHost> SpellHost for Arc<Mutex<H>> {
    fn spell_by_name(&self, name: &str) -> SpellType {
        lock(self).spell_by_name(name)
    }

    fn god_by_name(&self, name: &str) -> God {
        lock(self).god_by_name(name)
    }

    fn is_memorised(&self, spell: SpellType) -> bool {
        lock(self).is_memorised(spell)
    }

    fn spell_difficulty(&self, spell: SpellType) -> i32 {
        lock(self).spell_difficulty(spell)
    }

    fn spell_mana(&self, spell: SpellType) -> i32 {
        lock(self).spell_mana(spell)
    }

    fn spell_power_cap(&self, spell: SpellType) -> i32 {
        lock(self).spell_power_cap(spell)
    }

    fn spell_flags(&self, spell: SpellType) -> SpellFlags {
        lock(self).spell_flags(spell)
    }

    fn calc_spell_power(&self, spell: SpellType, apply_intel: bool) -> i32 {
        lock(self).calc_spell_power(spell, apply_intel)
    }

    fn spell_range(&self, spell: SpellType, power: i32) -> i32 {
        lock(self).spell_range(spell, power)
    }

    fn spell_fail(&self, spell: SpellType) -> i32 {
        lock(self).spell_fail(spell)
    }

    fn fail_severity(&self, spell: SpellType) -> i32 {
        lock(self).fail_severity(spell)
    }

    fn spell_hunger(&self, spell: SpellType) -> i32 {
        lock(self).spell_hunger(spell)
    }

    fn religion(&self) -> God {
        lock(self).religion()
    }

    fn god_likes_spell(&self, spell: SpellType, god: God) -> bool {
        lock(self).god_likes_spell(spell, god)
    }

    fn god_hates_spell(&self, spell: SpellType, god: God) -> bool {
        lock(self).god_hates_spell(spell, god)
    }

    fn god_loathes_spell(&self, spell: SpellType, god: God) -> bool {
        lock(self).god_loathes_spell(spell, god)
    }

    fn cast_los_attack(&mut self, spell: SpellType, power: i32) -> CastResult {
        lock(self).cast_los_attack(spell, power)
    }
}

// A panicked script call must not wedge the host for the game loop.
fn lock<H>(host: &Mutex<H>) -> MutexGuard<'_, H> {
    host.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
