use bitflags::bitflags;
use strum::{EnumIter, IntoEnumIterator};

use crate::names::normalise_name;

bitflags! {
    /// Schools of magic a spell belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpellSchools: u16 {
        const CONJURATION   = 0x0001;
        const HEXES         = 0x0002;
        const CHARMS        = 0x0004;
        const FIRE          = 0x0008;
        const ICE           = 0x0010;
        const TRANSMUTATION = 0x0020;
        const NECROMANCY    = 0x0040;
        const SUMMONING     = 0x0080;
        const DIVINATION    = 0x0100;
        const TRANSLOCATION = 0x0200;
        const POISON        = 0x0400;
        const EARTH         = 0x0800;
        const AIR           = 0x1000;
    }
}

bitflags! {
    /// Targeting and behaviour flags attached to each spell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpellFlags: u32 {
        /// Aimed either at a direction or at a target.
        const DIR_OR_TARGET    = 0x0001;
        /// Aimed at a monster.
        const TARGET           = 0x0002;
        /// Aimed at a map cell.
        const GRID             = 0x0004;
        /// Aimed in a direction only.
        const DIR              = 0x0008;
        /// Aimed at an object on the floor.
        const TARG_OBJ         = 0x0010;
        const UNHOLY           = 0x0020;
        const UNCLEAN          = 0x0040;
        const CHAOTIC          = 0x0080;
        const HASTY            = 0x0100;
        const CORPSE_VIOLATING = 0x0200;
        const FIRE_OR_LIGHT    = 0x0400;
        const DESTRUCTIVE      = 0x0800;
        const AREA             = 0x1000;
    }
}

impl SpellSchools {
    /// Lowercase school names, used as skill keys.
    pub fn skill_names(self) -> impl Iterator<Item = String> {
        self.iter_names().map(|(name, _)| name.to_ascii_lowercase())
    }
}

/// Spell identifiers known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum SpellType {
    NoSpell,
    MagicDart,
    Freeze,
    FlameTongue,
    Pain,
    Corona,
    Apportation,
    SummonSmallMammal,
    Blink,
    Passwall,
    Swiftness,
    CorpseRot,
    ConjureFlame,
    MephiticCloud,
    StoneArrow,
    OzocubusArmour,
    Confuse,
    SpectralWeapon,
    StickyFlame,
    IskenderunsMysticBlast,
    OlgrebsToxicRadiance,
    Polymorph,
    AnimateDead,
    LeesRapidDeconstruction,
    LightningBolt,
    Fireball,
    BoltOfFire,
    BoltOfCold,
    OzocubusRefrigeration,
    ChainLightning,
    Necromutation,
    Shatter,
}

/// Static description of a spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellData {
    pub title: &'static str,
    pub schools: SpellSchools,
    pub flags: SpellFlags,
    pub level: i32,
    pub power_cap: i32,
    pub min_range: i32,
    pub max_range: i32,
}

const fn spell(
    title: &'static str,
    schools: SpellSchools,
    flags: SpellFlags,
    level: i32,
    power_cap: i32,
    min_range: i32,
    max_range: i32,
) -> SpellData {
    SpellData {
        title,
        schools,
        flags,
        level,
        power_cap,
        min_range,
        max_range,
    }
}

use SpellFlags as F;
use SpellSchools as S;

impl SpellType {
    pub fn data(self) -> SpellData {
        match self {
            SpellType::NoSpell => spell("no spell", S::empty(), F::empty(), 0, 0, 0, 0),
            SpellType::MagicDart => spell("Magic Dart", S::CONJURATION, F::DIR_OR_TARGET, 1, 25, 7, 7),
            SpellType::Freeze => spell("Freeze", S::ICE, F::TARGET, 1, 25, 1, 1),
            SpellType::FlameTongue => spell(
                "Flame Tongue",
                S::CONJURATION.union(S::FIRE),
                F::DIR_OR_TARGET.union(F::FIRE_OR_LIGHT),
                1,
                40,
                1,
                4,
            ),
            SpellType::Pain => spell("Pain", S::NECROMANCY, F::TARGET.union(F::UNHOLY), 1, 25, 5, 5),
            SpellType::Corona => spell(
                "Corona",
                S::HEXES,
                F::DIR_OR_TARGET.union(F::FIRE_OR_LIGHT),
                1,
                50,
                7,
                7,
            ),
            SpellType::Apportation => spell(
                "Apportation",
                S::TRANSLOCATION,
                F::TARG_OBJ.union(F::GRID),
                1,
                50,
                7,
                7,
            ),
            SpellType::SummonSmallMammal => {
                spell("Summon Small Mammal", S::SUMMONING, F::empty(), 1, 25, 0, 0)
            }
            SpellType::Blink => spell("Blink", S::TRANSLOCATION, F::empty(), 2, 0, 0, 0),
            SpellType::Passwall => spell("Passwall", S::EARTH, F::DIR, 2, 120, 1, 7),
            SpellType::Swiftness => spell("Swiftness", S::AIR, F::HASTY, 2, 100, 0, 0),
            SpellType::CorpseRot => spell(
                "Corpse Rot",
                S::NECROMANCY.union(S::AIR),
                F::AREA.union(F::UNCLEAN).union(F::CORPSE_VIOLATING),
                2,
                60,
                0,
                0,
            ),
            SpellType::ConjureFlame => spell(
                "Conjure Flame",
                S::CONJURATION.union(S::FIRE),
                F::GRID.union(F::FIRE_OR_LIGHT),
                3,
                100,
                5,
                5,
            ),
            SpellType::MephiticCloud => spell(
                "Mephitic Cloud",
                S::CONJURATION.union(S::POISON).union(S::AIR),
                F::TARGET.union(F::AREA),
                3,
                100,
                4,
                4,
            ),
            SpellType::StoneArrow => spell(
                "Stone Arrow",
                S::CONJURATION.union(S::EARTH),
                F::DIR_OR_TARGET,
                3,
                50,
                7,
                7,
            ),
            SpellType::OzocubusArmour => spell(
                "Ozocubu's Armour",
                S::CHARMS.union(S::ICE),
                F::empty(),
                3,
                100,
                0,
                0,
            ),
            SpellType::Confuse => spell("Confuse", S::HEXES, F::DIR_OR_TARGET, 3, 100, 6, 6),
            SpellType::SpectralWeapon => spell(
                "Spectral Weapon",
                S::HEXES.union(S::CHARMS),
                F::empty(),
                3,
                100,
                0,
                0,
            ),
            SpellType::StickyFlame => spell(
                "Sticky Flame",
                S::CONJURATION.union(S::FIRE),
                F::DIR_OR_TARGET.union(F::FIRE_OR_LIGHT),
                4,
                100,
                1,
                1,
            ),
            SpellType::IskenderunsMysticBlast => spell(
                "Iskenderun's Mystic Blast",
                S::CONJURATION,
                F::DIR_OR_TARGET,
                4,
                100,
                5,
                5,
            ),
            SpellType::OlgrebsToxicRadiance => spell(
                "Olgreb's Toxic Radiance",
                S::POISON,
                F::AREA.union(F::DESTRUCTIVE),
                4,
                100,
                0,
                0,
            ),
            SpellType::Polymorph => spell(
                "Polymorph",
                S::TRANSMUTATION.union(S::HEXES),
                F::DIR_OR_TARGET.union(F::CHAOTIC),
                4,
                200,
                6,
                6,
            ),
            SpellType::AnimateDead => spell(
                "Animate Dead",
                S::NECROMANCY,
                F::AREA.union(F::UNHOLY).union(F::CORPSE_VIOLATING),
                4,
                0,
                0,
                0,
            ),
            SpellType::LeesRapidDeconstruction => spell(
                "Lee's Rapid Deconstruction",
                S::EARTH,
                F::GRID.union(F::DESTRUCTIVE),
                5,
                200,
                4,
                4,
            ),
            SpellType::LightningBolt => spell(
                "Lightning Bolt",
                S::CONJURATION.union(S::AIR),
                F::DIR_OR_TARGET,
                5,
                200,
                4,
                7,
            ),
            SpellType::Fireball => spell(
                "Fireball",
                S::CONJURATION.union(S::FIRE),
                F::TARGET.union(F::AREA).union(F::FIRE_OR_LIGHT),
                5,
                200,
                5,
                5,
            ),
            SpellType::BoltOfFire => spell(
                "Bolt of Fire",
                S::CONJURATION.union(S::FIRE),
                F::DIR_OR_TARGET.union(F::FIRE_OR_LIGHT),
                6,
                200,
                7,
                7,
            ),
            SpellType::BoltOfCold => spell(
                "Bolt of Cold",
                S::CONJURATION.union(S::ICE),
                F::DIR_OR_TARGET,
                6,
                200,
                7,
                7,
            ),
            SpellType::OzocubusRefrigeration => spell(
                "Ozocubu's Refrigeration",
                S::ICE,
                F::AREA.union(F::DESTRUCTIVE),
                6,
                200,
                0,
                0,
            ),
            SpellType::ChainLightning => spell(
                "Chain Lightning",
                S::CONJURATION.union(S::AIR),
                F::AREA.union(F::DESTRUCTIVE),
                8,
                200,
                0,
                0,
            ),
            SpellType::Necromutation => spell(
                "Necromutation",
                S::TRANSMUTATION.union(S::NECROMANCY),
                F::UNHOLY,
                8,
                200,
                0,
                0,
            ),
            SpellType::Shatter => spell(
                "Shatter",
                S::EARTH,
                F::AREA.union(F::DESTRUCTIVE),
                9,
                200,
                0,
                0,
            ),
        }
    }

    pub fn title(self) -> &'static str {
        self.data().title
    }

    pub fn flags(self) -> SpellFlags {
        self.data().flags
    }

    pub fn schools(self) -> SpellSchools {
        self.data().schools
    }

    /// Every real spell, excluding the `NoSpell` sentinel.
    pub fn all() -> impl Iterator<Item = SpellType> {
        SpellType::iter().filter(|s| *s != SpellType::NoSpell)
    }

    pub fn is_real(self) -> bool {
        self != SpellType::NoSpell
    }
}

/// Resolve a spell from its title. Case, apostrophes, underscores and
/// repeated whitespace are ignored. Unknown names give `NoSpell`.
pub fn spell_by_name(name: &str) -> SpellType {
    let wanted = normalise_name(name);
    if wanted.is_empty() {
        return SpellType::NoSpell;
    }
    SpellType::all()
        .find(|s| normalise_name(s.title()) == wanted)
        .unwrap_or(SpellType::NoSpell)
}

pub fn spell_difficulty(spell: SpellType) -> i32 {
    spell.data().level
}

/// Mana cost equals spell level.
pub fn spell_mana(spell: SpellType) -> i32 {
    spell.data().level
}

pub fn spell_power_cap(spell: SpellType) -> i32 {
    spell.data().power_cap
}

pub fn get_spell_flags(spell: SpellType) -> SpellFlags {
    spell.flags()
}

pub fn get_spell_schools(spell: SpellType) -> SpellSchools {
    spell.schools()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_punctuation() {
        assert_eq!(spell_by_name("Magic Dart"), SpellType::MagicDart);
        assert_eq!(spell_by_name("magic dart"), SpellType::MagicDart);
        assert_eq!(spell_by_name("MAGIC_DART"), SpellType::MagicDart);
        assert_eq!(
            spell_by_name("ozocubus refrigeration"),
            SpellType::OzocubusRefrigeration
        );
        assert_eq!(
            spell_by_name("  Olgreb's   Toxic  Radiance "),
            SpellType::OlgrebsToxicRadiance
        );
    }

    #[test]
    fn unknown_names_are_no_spell() {
        assert_eq!(spell_by_name("Magic"), SpellType::NoSpell);
        assert_eq!(spell_by_name(""), SpellType::NoSpell);
        assert_eq!(spell_by_name("no spell"), SpellType::NoSpell);
    }

    #[test]
    fn titles_are_unique_after_normalising() {
        let mut seen = std::collections::HashSet::new();
        for s in SpellType::all() {
            assert!(seen.insert(normalise_name(s.title())), "{:?}", s);
            assert_eq!(spell_by_name(s.title()), s);
        }
    }

    #[test]
    fn table_is_consistent() {
        for s in SpellType::all() {
            let d = s.data();
            assert!((1..=9).contains(&d.level), "{:?}", s);
            assert!(d.min_range <= d.max_range, "{:?}", s);
            assert!(!d.schools.is_empty(), "{:?}", s);
        }
    }

    #[test]
    fn no_spell_is_all_zero() {
        let d = SpellType::NoSpell.data();
        assert_eq!(spell_difficulty(SpellType::NoSpell), 0);
        assert_eq!(spell_mana(SpellType::NoSpell), 0);
        assert_eq!(d.power_cap, 0);
        assert!(get_spell_flags(SpellType::NoSpell).is_empty());
        assert!(get_spell_schools(SpellType::NoSpell).is_empty());
    }

    #[test]
    fn school_skill_names() {
        let names: Vec<String> = (SpellSchools::CONJURATION | SpellSchools::ICE)
            .skill_names()
            .collect();
        assert_eq!(names, vec!["conjuration".to_string(), "ice".to_string()]);
    }
}
