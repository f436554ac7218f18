//! Dungeon-side `spells` library: area spells cast on the caster's behalf
//! by level scripts.

use mlua::{Function, Lua, Result as LuaResult};
use spellbook::{CastResult, SpellType};
use tracing::debug;

use super::with_host_mut;

fn los_attack(lua: &Lua, spell: SpellType) -> LuaResult<Function> {
    lua.create_function(move |lua, power: i32| {
        let result = with_host_mut(lua, |host| host.cast_los_attack(spell, power))?;
        if result == CastResult::Abort {
            debug!(target: "lua_script", spell = spell.title(), power, "cast aborted");
        }
        Ok(())
    })
}

/// Register the global `spells` table for dungeon scripts.
pub fn register_cast_api(lua: &Lua) -> LuaResult<()> {
    let spells = lua.create_table()?;
    spells.set(
        "refrigeration",
        los_attack(lua, SpellType::OzocubusRefrigeration)?,
    )?;
    spells.set(
        "toxic_radiance",
        los_attack(lua, SpellType::OlgrebsToxicRadiance)?,
    )?;
    lua.globals().set("spells", spells)?;
    Ok(())
}
