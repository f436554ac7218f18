use std::path::Path;
use std::time::Instant;

use mlua::{FromLuaMulti, Function, IntoLuaMulti, Lua, RegistryKey};
use observability::RunMetrics;
use serde::Deserialize;
use spellbook::SpellHost;
use tracing::{debug, info, warn};

use crate::api::cast::register_cast_api;
use crate::api::log::register_log_api;
use crate::api::spells::register_spells_api;
use crate::api::HostSlot;
use crate::error::ScriptError;
use crate::hooks::{self, HookRegistry};
use crate::sandbox::{self, ScriptConfig};

/// Which flavour of `spells` library a VM exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptRealm {
    /// Player macros: read-only spell queries.
    #[default]
    Client,
    /// Level scripts: area spell casts.
    Dungeon,
}

/// A sandboxed Lua VM with the spell bindings installed.
pub struct ScriptEngine {
    lua: Lua,
    config: ScriptConfig,
    realm: ScriptRealm,
    script_count: usize,
}

impl ScriptEngine {
    pub fn new(config: ScriptConfig, realm: ScriptRealm) -> Result<Self, ScriptError> {
        let lua = sandbox::create_sandboxed_lua(&config)?;

        lua.set_app_data(HookRegistry::new());
        hooks::register_hooks_api(&lua)?;
        register_log_api(&lua)?;
        match realm {
            ScriptRealm::Client => register_spells_api(&lua)?,
            ScriptRealm::Dungeon => register_cast_api(&lua)?,
        }

        info!(
            ?realm,
            "ScriptEngine initialized (memory_limit={}KB, instruction_limit={})",
            config.memory_limit / 1024,
            config.instruction_limit
        );

        Ok(Self {
            lua,
            config,
            realm,
            script_count: 0,
        })
    }

    pub fn realm(&self) -> ScriptRealm {
        self.realm
    }

    pub fn script_count(&self) -> usize {
        self.script_count
    }

    /// Attach the engine the `spells` functions forward to, replacing any
    /// previous host.
    pub fn attach_host<H: SpellHost + 'static>(&mut self, host: H) {
        if self.lua.set_app_data(HostSlot(Box::new(host))).is_some() {
            debug!("replaced previously attached spell host");
        }
    }

    pub fn detach_host(&mut self) -> Option<Box<dyn SpellHost>> {
        self.lua.remove_app_data::<HostSlot>().map(|slot| slot.0)
    }

    pub fn has_host(&self) -> bool {
        self.lua.app_data_ref::<HostSlot>().is_some()
    }

    /// Load and execute a script. Scripts usually just register hooks.
    pub fn load_script(&mut self, name: &str, source: &str) -> Result<(), ScriptError> {
        sandbox::reset_instruction_counter(&self.lua, &self.config);

        self.lua
            .load(source)
            .set_name(name)
            .exec()
            .map_err(|e| ScriptError::Load(format!("{}: {}", name, e)))?;

        self.script_count += 1;
        info!(script = name, "Script loaded successfully");
        Ok(())
    }

    /// Load all .lua and .luau files from a directory, in file name order.
    pub fn load_directory(&mut self, path: &Path) -> Result<usize, ScriptError> {
        if !path.is_dir() {
            return Err(ScriptError::Load(format!(
                "not a directory: {}",
                path.display()
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "lua" || ext == "luau")
                    .unwrap_or(false)
            })
            .collect();
        entries.sort();

        for file_path in &entries {
            let name = file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown");
            let source = std::fs::read_to_string(file_path)?;
            self.load_script(name, &source)?;
        }

        Ok(entries.len())
    }

    /// Evaluate a chunk and convert its return values.
    pub fn eval<T: FromLuaMulti>(&self, source: &str) -> Result<T, ScriptError> {
        sandbox::reset_instruction_counter(&self.lua, &self.config);
        Ok(self.lua.load(source).set_name("eval").eval()?)
    }

    pub fn hook_counts(&self) -> (usize, usize) {
        self.lua
            .app_data_ref::<HookRegistry>()
            .map(|h| (h.on_init_count(), h.on_turn_count()))
            .unwrap_or((0, 0))
    }

    /// Run all on_init hooks.
    pub fn run_on_init(&self) -> Result<RunMetrics, ScriptError> {
        self.run_hooks("on_init", |h| &h.on_init, ())
    }

    /// Run all on_turn hooks with the current turn number.
    pub fn run_on_turn(&self, turn: u64) -> Result<RunMetrics, ScriptError> {
        self.run_hooks("on_turn", |h| &h.on_turn, turn)
    }

    /// A failing callback is logged and counted; the remaining callbacks
    /// still run.
    fn run_hooks<A: IntoLuaMulti + Clone>(
        &self,
        event: &'static str,
        select: fn(&HookRegistry) -> &Vec<RegistryKey>,
        args: A,
    ) -> Result<RunMetrics, ScriptError> {
        let start = Instant::now();

        // Resolve callbacks up front so hooks may register more hooks.
        let callbacks = {
            let hooks = self
                .lua
                .app_data_ref::<HookRegistry>()
                .ok_or(ScriptError::HooksMissing)?;
            select(&hooks)
                .iter()
                .map(|key| self.lua.registry_value::<Function>(key))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut errors = 0;
        for func in &callbacks {
            // Each callback gets its own budget.
            sandbox::reset_instruction_counter(&self.lua, &self.config);
            if let Err(e) = func.call::<()>(args.clone()) {
                warn!("{} hook error: {}", event, e);
                errors += 1;
            }
        }

        Ok(RunMetrics {
            event,
            hooks: callbacks.len(),
            errors,
            duration_us: start.elapsed().as_micros(),
        })
    }
}
