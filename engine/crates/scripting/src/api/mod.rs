pub mod cast;
pub mod log;
pub mod spells;

use mlua::{Lua, Result as LuaResult};
use spellbook::SpellHost;

/// The spell host a Lua state forwards to, kept in Lua app data.
pub struct HostSlot(pub Box<dyn SpellHost>);

fn no_host() -> mlua::Error {
    mlua::Error::runtime("no spell host attached")
}

pub(crate) fn with_host<R>(lua: &Lua, f: impl FnOnce(&dyn SpellHost) -> R) -> LuaResult<R> {
    let slot = lua.app_data_ref::<HostSlot>().ok_or_else(no_host)?;
    Ok(f(slot.0.as_ref()))
}

pub(crate) fn with_host_mut<R>(
    lua: &Lua,
    f: impl FnOnce(&mut dyn SpellHost) -> R,
) -> LuaResult<R> {
    let mut slot = lua.app_data_mut::<HostSlot>().ok_or_else(no_host)?;
    Ok(f(slot.0.as_mut()))
}
