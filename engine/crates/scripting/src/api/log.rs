use mlua::{Lua, Result as LuaResult};
use tracing::Level;

fn emit(level: Level, msg: &str) {
    match level {
        Level::ERROR => tracing::error!(target: "lua_script", "{}", msg),
        Level::WARN => tracing::warn!(target: "lua_script", "{}", msg),
        Level::INFO => tracing::info!(target: "lua_script", "{}", msg),
        Level::DEBUG => tracing::debug!(target: "lua_script", "{}", msg),
        _ => tracing::trace!(target: "lua_script", "{}", msg),
    }
}

/// Register log.* so macros can write to the host's tracing output.
pub fn register_log_api(lua: &Lua) -> LuaResult<()> {
    let log_table = lua.create_table()?;
    for (name, level) in [
        ("error", Level::ERROR),
        ("warn", Level::WARN),
        ("info", Level::INFO),
        ("debug", Level::DEBUG),
        ("trace", Level::TRACE),
    ] {
        let f = lua.create_function(move |_lua, msg: String| {
            emit(level, &msg);
            Ok(())
        })?;
        log_table.set(name, f)?;
    }
    lua.globals().set("log", log_table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::{create_sandboxed_lua, ScriptConfig};

    #[test]
    fn every_level_is_callable() {
        let lua = create_sandboxed_lua(&ScriptConfig::default()).unwrap();
        register_log_api(&lua).unwrap();
        lua.load(
            r#"
            log.error("e")
            log.warn("w")
            log.info("i")
            log.debug("d")
            log.trace("t")
            log.info(12)
        "#,
        )
        .exec()
        .unwrap();
    }

    #[test]
    fn missing_message_is_an_error() {
        let lua = create_sandboxed_lua(&ScriptConfig::default()).unwrap();
        register_log_api(&lua).unwrap();
        assert!(lua.load("log.info()").exec().is_err());
    }
}
