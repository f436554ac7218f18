pub mod api;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod sandbox;

pub use engine::{ScriptEngine, ScriptRealm};
pub use error::ScriptError;
pub use hooks::HookRegistry;
pub use sandbox::ScriptConfig;

pub use mlua;
pub use spellbook;
