use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SpellbookError;
use crate::formula::{self, stepdown};
use crate::god::God;
use crate::host::{CastResult, SpellHost};
use crate::rng::SpellRng;
use crate::spell::{get_spell_schools, spell_by_name, SpellType};

/// Failure added per spell level.
const LEVEL_DIFFICULTY: [i32; 10] = [0, 3, 15, 35, 70, 100, 150, 200, 260, 330];
/// Hunger cost per spell level before skill reduction.
const BASE_HUNGER: [i32; 9] = [50, 100, 150, 250, 400, 550, 700, 850, 1000];

const SPELLCASTING: &str = "spellcasting";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared distance, saturating for far-apart points.
    pub fn distance2(self, other: Coord) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub position: Coord,
    pub hp: i32,
    #[serde(default)]
    pub cold_resistant: bool,
    #[serde(default)]
    pub poison_resistant: bool,
    /// Accumulated poison level.
    #[serde(default)]
    pub poison: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Monster {
    pub fn alive(&self) -> bool {
        self.hp > 0
    }
}

/// On-disk description of a caster and their surroundings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSheet {
    pub name: String,
    pub intelligence: i32,
    /// Skill levels keyed by school name, plus `spellcasting`.
    pub skills: BTreeMap<String, i32>,
    pub armour_penalty: i32,
    pub religion: God,
    /// Titles of memorised spells.
    pub memorised: Vec<String>,
    pub vision: i32,
    pub hp: i32,
    pub position: Coord,
    pub cold_resistant: bool,
    pub monsters: Vec<Monster>,
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self {
            name: "Adventurer".to_string(),
            intelligence: 10,
            skills: BTreeMap::new(),
            armour_penalty: 0,
            religion: God::NoGod,
            memorised: Vec::new(),
            vision: 7,
            hp: 20,
            position: Coord::default(),
            cold_resistant: false,
            monsters: Vec::new(),
        }
    }
}

/// Reference spell host backed by a character sheet.
#[derive(Debug, Clone)]
pub struct Character {
    sheet: CharacterSheet,
    memorised: HashSet<SpellType>,
    rng: SpellRng,
}

impl Character {
    pub fn new(sheet: CharacterSheet, seed: u64) -> Self {
        let mut memorised = HashSet::new();
        for title in &sheet.memorised {
            match spell_by_name(title) {
                SpellType::NoSpell => warn!(spell = title.as_str(), "unknown memorised spell"),
                spell => {
                    memorised.insert(spell);
                }
            }
        }
        Self {
            sheet,
            memorised,
            rng: SpellRng::new(seed),
        }
    }

    pub fn from_json(source: &str, seed: u64) -> Result<Self, SpellbookError> {
        let sheet: CharacterSheet = serde_json::from_str(source)?;
        Ok(Self::new(sheet, seed))
    }

    /// Load a character sheet from a JSON file.
    pub fn load(path: &Path, seed: u64) -> Result<Self, SpellbookError> {
        let source = std::fs::read_to_string(path)?;
        let character = Self::from_json(&source, seed)?;
        info!(
            name = character.sheet.name.as_str(),
            spells = character.memorised.len(),
            monsters = character.sheet.monsters.len(),
            "character loaded from {}",
            path.display()
        );
        Ok(character)
    }

    pub fn sheet(&self) -> &CharacterSheet {
        &self.sheet
    }

    pub fn hp(&self) -> i32 {
        self.sheet.hp
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.sheet.monsters
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    fn skill(&self, name: &str) -> i32 {
        self.sheet.skills.get(name).copied().unwrap_or(0)
    }

    /// (sum of school skills, number of schools)
    fn school_skills(&self, spell: SpellType) -> (i32, i32) {
        get_spell_schools(spell)
            .skill_names()
            .fold((0i32, 0i32), |(sum, n), name| {
                (sum.saturating_add(self.skill(&name)), n + 1)
            })
    }

    fn can_see(&self, pos: Coord) -> bool {
        let radius = i64::from(self.sheet.vision);
        self.sheet.position.distance2(pos) <= radius * radius + 1
    }

    fn targets_in_sight(&self) -> Vec<usize> {
        self.sheet
            .monsters
            .iter()
            .enumerate()
            .filter(|(_, m)| m.alive() && m.visible && self.can_see(m.position))
            .map(|(i, _)| i)
            .collect()
    }

    fn refrigerate(&mut self, power: i32) -> usize {
        let sides = 5 + power / 10;
        let mut affected = 0;
        for idx in self.targets_in_sight() {
            if self.sheet.monsters[idx].cold_resistant {
                continue;
            }
            let damage = self.rng.dice(3, sides);
            let mon = &mut self.sheet.monsters[idx];
            mon.hp = mon.hp.saturating_sub(damage);
            affected += 1;
            debug!(monster = mon.name.as_str(), damage, hp = mon.hp, "frozen");
        }
        if !self.sheet.cold_resistant {
            let damage = self.rng.dice(3, sides);
            self.sheet.hp = self.sheet.hp.saturating_sub(damage);
            debug!(damage, hp = self.sheet.hp, "caster caught in refrigeration");
        }
        affected
    }

    fn irradiate(&mut self, power: i32) -> usize {
        let levels = 1 + power / 30;
        let sides = power / 20 + 2;
        let mut affected = 0;
        for idx in self.targets_in_sight() {
            if self.sheet.monsters[idx].poison_resistant {
                continue;
            }
            let damage = self.rng.rnd(sides);
            let mon = &mut self.sheet.monsters[idx];
            mon.poison = mon.poison.saturating_add(levels);
            mon.hp = mon.hp.saturating_sub(damage);
            affected += 1;
            debug!(monster = mon.name.as_str(), damage, poison = mon.poison, "poisoned");
        }
        affected
    }
}

impl SpellHost for Character {
    fn is_memorised(&self, spell: SpellType) -> bool {
        self.memorised.contains(&spell)
    }

    fn calc_spell_power(&self, spell: SpellType, apply_intel: bool) -> i32 {
        if !spell.is_real() {
            return 0;
        }
        let (school_sum, schools) = self.school_skills(spell);
        let mut power = self.skill(SPELLCASTING).saturating_mul(50);
        if schools > 0 {
            power = power.saturating_add(school_sum.saturating_mul(200) / schools);
        }
        if apply_intel {
            power = power.saturating_mul(self.sheet.intelligence) / 10;
        }
        stepdown(power / 100, 50).min(spell.data().power_cap)
    }

    fn spell_range(&self, spell: SpellType, power: i32) -> i32 {
        formula::spell_range(&spell.data(), power, self.sheet.vision)
    }

    fn spell_fail(&self, spell: SpellType) -> i32 {
        if !spell.is_real() {
            return 0;
        }
        let (school_sum, schools) = self.school_skills(spell);
        let average = if schools > 0 { school_sum / schools } else { 0 };
        let level = spell.data().level.clamp(0, 9) as usize;
        let chance = 60i32
            .saturating_sub(average.saturating_mul(6))
            .saturating_sub(self.skill(SPELLCASTING).saturating_mul(2))
            .saturating_sub(self.sheet.intelligence.saturating_mul(2))
            .saturating_add(LEVEL_DIFFICULTY[level])
            .saturating_add(self.sheet.armour_penalty);
        chance.clamp(0, 100)
    }

    fn spell_hunger(&self, spell: SpellType) -> i32 {
        let level = spell.data().level;
        if !(1..=9).contains(&level) {
            return 0;
        }
        let hunger = BASE_HUNGER[(level - 1) as usize]
            .saturating_sub(self.skill(SPELLCASTING).saturating_mul(self.sheet.intelligence));
        hunger.max(0)
    }

    fn religion(&self) -> God {
        self.sheet.religion
    }

    fn cast_los_attack(&mut self, spell: SpellType, power: i32) -> CastResult {
        let power = power.max(0);
        let affected = match spell {
            SpellType::OzocubusRefrigeration => self.refrigerate(power),
            SpellType::OlgrebsToxicRadiance => self.irradiate(power),
            other => {
                warn!(spell = other.title(), "not a line-of-sight attack spell");
                return CastResult::Abort;
            }
        };
        info!(spell = spell.title(), power, affected, "area spell cast");
        CastResult::Success { affected }
    }
}
