use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use mlua::{Lua, VmState};

use crate::error::ScriptError;

/// Limits applied to every script VM.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    /// Memory limit in bytes (default 16 MB).
    pub memory_limit: usize,
    /// Interrupt budget per execution (default 1_000_000).
    pub instruction_limit: u32,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            memory_limit: 16 * 1024 * 1024,
            instruction_limit: 1_000_000,
        }
    }
}

/// Create a Luau VM in sandbox mode with memory and instruction limits.
pub fn create_sandboxed_lua(config: &ScriptConfig) -> Result<Lua, ScriptError> {
    let lua = Lua::new();
    lua.sandbox(true)?;
    lua.set_memory_limit(config.memory_limit)?;
    reset_instruction_counter(&lua, config);
    Ok(lua)
}

/// Install a fresh interrupt counter. Called before each script run so a
/// long session does not exhaust a single budget. Past the limit the
/// running chunk fails with `InstructionLimitExceeded`.
pub fn reset_instruction_counter(lua: &Lua, config: &ScriptConfig) {
    let limit = config.instruction_limit;
    let counter = Arc::new(AtomicU32::new(0));
    lua.set_interrupt(move |_| {
        if counter.fetch_add(1, Ordering::Relaxed) >= limit {
            return Err(mlua::Error::external(ScriptError::InstructionLimitExceeded));
        }
        Ok(VmState::Continue)
    });
}
