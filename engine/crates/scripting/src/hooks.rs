use mlua::{Function, Lua, RegistryKey, Result as LuaResult};

/// Lua callbacks registered by macro scripts.
#[derive(Default)]
pub struct HookRegistry {
    /// on_init callbacks, called once after scripts load
    pub on_init: Vec<RegistryKey>,
    /// on_turn callbacks, called with (turn_number) every player turn
    pub on_turn: Vec<RegistryKey>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init_count(&self) -> usize {
        self.on_init.len()
    }

    pub fn on_turn_count(&self) -> usize {
        self.on_turn.len()
    }
}

fn push_hook(
    lua: &Lua,
    func: Function,
    slot: fn(&mut HookRegistry) -> &mut Vec<RegistryKey>,
) -> LuaResult<()> {
    let key = lua.create_registry_value(func)?;
    let mut hooks = lua
        .app_data_mut::<HookRegistry>()
        .ok_or_else(|| mlua::Error::runtime("hook registry not installed"))?;
    slot(&mut hooks).push(key);
    Ok(())
}

/// Register hooks.* on the Lua global table. The HookRegistry itself lives
/// in Lua app data.
pub fn register_hooks_api(lua: &Lua) -> LuaResult<()> {
    let hooks_table = lua.create_table()?;

    // hooks.on_init(fn)
    let on_init_fn =
        lua.create_function(|lua, func: Function| push_hook(lua, func, |h| &mut h.on_init))?;
    hooks_table.set("on_init", on_init_fn)?;

    // hooks.on_turn(fn)
    let on_turn_fn =
        lua.create_function(|lua, func: Function| push_hook(lua, func, |h| &mut h.on_turn))?;
    hooks_table.set("on_turn", on_turn_fn)?;

    lua.globals().set("hooks", hooks_table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::{create_sandboxed_lua, ScriptConfig};

    fn lua_with_hooks() -> Lua {
        let lua = create_sandboxed_lua(&ScriptConfig::default()).unwrap();
        lua.set_app_data(HookRegistry::new());
        register_hooks_api(&lua).unwrap();
        lua
    }

    #[test]
    fn registers_callbacks() {
        let lua = lua_with_hooks();
        lua.load(
            r#"
            hooks.on_init(function() end)
            hooks.on_turn(function(turn) end)
            hooks.on_turn(function(turn) end)
        "#,
        )
        .exec()
        .unwrap();

        let hooks = lua.app_data_ref::<HookRegistry>().unwrap();
        assert_eq!(hooks.on_init_count(), 1);
        assert_eq!(hooks.on_turn_count(), 2);
    }

    #[test]
    fn non_function_is_rejected() {
        let lua = lua_with_hooks();
        assert!(lua.load("hooks.on_turn(42)").exec().is_err());
    }
}
