use crate::god::God;
use crate::spell::{SpellFlags, SpellSchools, SpellType};

/// Trog forbids all spellcasting.
pub fn god_hates_spellcasting(god: God) -> bool {
    god == God::Trog
}

/// Vehumet backs conjurations and destructive magic.
pub fn vehumet_supports_spell(spell: SpellType) -> bool {
    spell.is_real()
        && (spell.schools().contains(SpellSchools::CONJURATION)
            || spell.flags().contains(SpellFlags::DESTRUCTIVE))
}

fn is_evil_spell(spell: SpellType) -> bool {
    spell.flags().contains(SpellFlags::UNHOLY)
        || spell.schools().contains(SpellSchools::NECROMANCY)
}

pub fn god_likes_spell(spell: SpellType, god: God) -> bool {
    match god {
        God::Vehumet => vehumet_supports_spell(spell),
        God::Kikubaaqudgha => spell.schools().contains(SpellSchools::NECROMANCY),
        _ => false,
    }
}

pub fn god_hates_spell(spell: SpellType, god: God) -> bool {
    if !spell.is_real() {
        return false;
    }
    if god_hates_spellcasting(god) {
        return true;
    }
    let flags = spell.flags();
    if god.is_good() && is_evil_spell(spell) {
        return true;
    }
    match god {
        God::Zin => flags.intersects(SpellFlags::UNCLEAN | SpellFlags::CHAOTIC),
        God::Cheibriados => flags.contains(SpellFlags::HASTY),
        God::Fedhas => flags.contains(SpellFlags::CORPSE_VIOLATING),
        God::Dithmenos => flags.contains(SpellFlags::FIRE_OR_LIGHT),
        _ => false,
    }
}

/// Spells whose casting gets the caster excommunicated.
pub fn god_loathes_spell(spell: SpellType, god: God) -> bool {
    if !spell.is_real() {
        return false;
    }
    if god_hates_spellcasting(god) {
        return true;
    }
    spell == SpellType::Necromutation && god.is_good()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehumet_likes_destruction() {
        assert!(god_likes_spell(SpellType::MagicDart, God::Vehumet));
        assert!(god_likes_spell(SpellType::OzocubusRefrigeration, God::Vehumet));
        assert!(!god_likes_spell(SpellType::Blink, God::Vehumet));
        assert!(!god_likes_spell(SpellType::NoSpell, God::Vehumet));
    }

    #[test]
    fn kiku_likes_necromancy() {
        assert!(god_likes_spell(SpellType::Pain, God::Kikubaaqudgha));
        assert!(!god_likes_spell(SpellType::Fireball, God::Kikubaaqudgha));
        assert!(!god_likes_spell(SpellType::Pain, God::Okawaru));
    }

    #[test]
    fn hated_spells() {
        assert!(god_hates_spell(SpellType::Pain, God::TheShiningOne));
        assert!(god_hates_spell(SpellType::CorpseRot, God::Zin));
        assert!(god_hates_spell(SpellType::Polymorph, God::Zin));
        assert!(!god_hates_spell(SpellType::Polymorph, God::Elyvilon));
        assert!(god_hates_spell(SpellType::Swiftness, God::Cheibriados));
        assert!(god_hates_spell(SpellType::AnimateDead, God::Fedhas));
        assert!(god_hates_spell(SpellType::Fireball, God::Dithmenos));
        assert!(god_hates_spell(SpellType::Blink, God::Trog));
        assert!(!god_hates_spell(SpellType::Fireball, God::NoGod));
        assert!(!god_hates_spell(SpellType::NoSpell, God::Trog));
    }

    #[test]
    fn loathed_spells() {
        assert!(god_loathes_spell(SpellType::Necromutation, God::Zin));
        assert!(!god_loathes_spell(SpellType::Necromutation, God::Kikubaaqudgha));
        assert!(god_loathes_spell(SpellType::MagicDart, God::Trog));
        assert!(!god_loathes_spell(SpellType::Pain, God::Elyvilon));
    }
}
