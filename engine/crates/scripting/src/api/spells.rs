//! Client-side `spells` library: read-only spell queries for macros.
//!
//! Every function takes a spell name first. Names that do not resolve fall
//! through as `NoSpell`, so a typo reads as zero/false rather than raising.

use std::sync::Arc;

use mlua::{FromLua, Lua, MultiValue, Result as LuaResult, Table};
use spellbook::formula::{failure_rate_to_int, hunger_bars, power_to_barcount};
use spellbook::{God, SpellFlags, SpellHost, SpellType};
use tracing::debug;

use super::with_host;

type NumberQuery = fn(&dyn SpellHost, SpellType) -> i32;
type GodQuery = fn(&dyn SpellHost, SpellType, God) -> bool;

fn resolve(host: &dyn SpellHost, name: &str) -> SpellType {
    let spell = host.spell_by_name(name);
    if spell == SpellType::NoSpell {
        debug!(target: "lua_script", name, "unknown spell name");
    }
    spell
}

fn add_number(lua: &Lua, table: &Table, name: &str, query: NumberQuery) -> LuaResult<()> {
    let f = lua.create_function(move |lua, spell_name: String| {
        with_host(lua, |host| query(host, resolve(host, &spell_name)))
    })?;
    table.set(name, f)
}

fn add_flag(lua: &Lua, table: &Table, name: &str, flag: SpellFlags) -> LuaResult<()> {
    let f = lua.create_function(move |lua, spell_name: String| {
        with_host(lua, |host| host.spell_flags(resolve(host, &spell_name)).contains(flag))
    })?;
    table.set(name, f)
}

/// `fn(spell [, god])`; without a god the caster's own religion is used.
/// A second argument that is present must be a string, so `nil` is an error.
fn add_god(lua: &Lua, table: &Table, name: &'static str, query: GodQuery) -> LuaResult<()> {
    let f = lua.create_function(move |lua, (spell_name, mut rest): (String, MultiValue)| {
        let god_name = match rest.pop_front() {
            Some(value) => Some(String::from_lua(value, lua).map_err(|e| {
                mlua::Error::BadArgument {
                    to: Some(format!("spells.{}", name)),
                    pos: 2,
                    name: None,
                    cause: Arc::new(e),
                }
            })?),
            None => None,
        };
        with_host(lua, |host| {
            let spell = resolve(host, &spell_name);
            let god = match &god_name {
                Some(god_name) => host.god_by_name(god_name),
                None => host.religion(),
            };
            query(host, spell, god)
        })
    })?;
    table.set(name, f)
}

/// Register the global `spells` table for macro scripts.
pub fn register_spells_api(lua: &Lua) -> LuaResult<()> {
    let spells = lua.create_table()?;

    let memorised = lua.create_function(|lua, spell_name: String| {
        with_host(lua, |host| host.is_memorised(resolve(host, &spell_name)))
    })?;
    spells.set("memorised", memorised)?;

    add_number(lua, &spells, "level", |h, s| h.spell_difficulty(s))?;
    add_number(lua, &spells, "mana_cost", |h, s| h.spell_mana(s))?;
    add_number(lua, &spells, "range", |h, s| {
        h.spell_range(s, h.calc_spell_power(s, true))
    })?;
    add_number(lua, &spells, "max_range", |h, s| {
        h.spell_range(s, h.spell_power_cap(s))
    })?;
    add_number(lua, &spells, "min_range", |h, s| h.spell_range(s, 0))?;
    add_number(lua, &spells, "fail", |h, s| failure_rate_to_int(h.spell_fail(s)))?;
    add_number(lua, &spells, "fail_severity", |h, s| h.fail_severity(s))?;
    add_number(lua, &spells, "hunger", |h, s| hunger_bars(h.spell_hunger(s)))?;
    add_number(lua, &spells, "power", |h, s| {
        power_to_barcount(h.calc_spell_power(s, true))
    })?;
    add_number(lua, &spells, "max_power", |h, s| {
        power_to_barcount(h.spell_power_cap(s))
    })?;

    add_flag(lua, &spells, "dir_or_target", SpellFlags::DIR_OR_TARGET)?;
    add_flag(lua, &spells, "target", SpellFlags::TARGET)?;
    add_flag(lua, &spells, "grid", SpellFlags::GRID)?;
    add_flag(lua, &spells, "dir", SpellFlags::DIR)?;
    add_flag(lua, &spells, "targ_obj", SpellFlags::TARG_OBJ)?;

    add_god(lua, &spells, "god_likes", |h, s, g| h.god_likes_spell(s, g))?;
    add_god(lua, &spells, "god_hates", |h, s, g| h.god_hates_spell(s, g))?;
    add_god(lua, &spells, "god_loathes", |h, s, g| h.god_loathes_spell(s, g))?;

    lua.globals().set("spells", spells)?;
    Ok(())
}
