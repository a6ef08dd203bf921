//! Lua scripting runtime resource.
//!
//! Owns the interpreter state explicitly: every caller that needs to read a
//! script value borrows a [`LuaRuntime`]; there is no global interpreter.
//! The runtime exposes an `engine` table so scripts can log through the
//! game's logger.
//!
//! # Example
//!
//! ```lua
//! -- assets/scripts/game.lua
//! engine.log_info("loading settings")
//! title = "Starscroller"
//! scroll_speed = 500
//! ship = { frames = 4, fps = 20, speed = 2 }
//! ```

use log::{error, info, warn};
use mlua::prelude::*;
use serde::de::DeserializeOwned;

use crate::error::ScriptError;

/// Resource holding the Lua interpreter state.
///
/// Not `Send`: the Lua state must stay on the main thread.
pub struct LuaRuntime {
    lua: Lua,
}

impl LuaRuntime {
    /// Creates a new Lua runtime and registers the base engine API.
    ///
    /// # Errors
    ///
    /// Returns an error if Lua initialization or API registration fails.
    pub fn new() -> LuaResult<Self> {
        let lua = Lua::new();

        let runtime = Self { lua };
        runtime.register_base_api()?;

        Ok(runtime)
    }

    /// Registers the base `engine` table with logging functions.
    fn register_base_api(&self) -> LuaResult<()> {
        let engine = self.lua.create_table()?;

        // engine.log(message) - General purpose logging
        engine.set(
            "log",
            self.lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        engine.set(
            "log_info",
            self.lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        engine.set(
            "log_warn",
            self.lua.create_function(|_, msg: String| {
                warn!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        engine.set(
            "log_error",
            self.lua.create_function(|_, msg: String| {
                error!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        self.lua.globals().set("engine", engine)?;

        Ok(())
    }

    /// Loads and executes a Lua script from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the script has syntax/runtime errors.
    pub fn run_script(&self, path: &str) -> LuaResult<()> {
        let script = std::fs::read_to_string(path)
            .map_err(|e| LuaError::ExternalError(std::sync::Arc::new(e)))?;
        self.exec(&script, path)
    }

    /// Executes a chunk of Lua source, naming it `name` in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error on syntax or runtime errors.
    pub fn exec(&self, source: &str, name: &str) -> LuaResult<()> {
        self.lua.load(source).set_name(name).exec()
    }

    /// Reports the outcome of an interpreter call.
    ///
    /// On failure the interpreter's message is logged and `false` is returned;
    /// the caller decides whether to continue.
    pub fn check_status<T>(&self, result: &LuaResult<T>) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                error!(target: "lua", "{}", e);
                false
            }
        }
    }

    fn global(&self, name: &str) -> Result<LuaValue, ScriptError> {
        match self.lua.globals().get::<LuaValue>(name)? {
            LuaValue::Nil => Err(ScriptError::Missing {
                name: name.to_string(),
            }),
            value => Ok(value),
        }
    }

    /// Reads the integer global `name`.
    ///
    /// Floats are rejected even when integral: `x = 42.0` is not an integer.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Missing`] if the global is nil, [`ScriptError::WrongType`]
    /// for any non-integer value.
    pub fn read_int(&self, name: &str) -> Result<i64, ScriptError> {
        match self.global(name)? {
            LuaValue::Integer(value) => Ok(value),
            other => Err(ScriptError::WrongType {
                name: name.to_string(),
                expected: "integer",
                found: other.type_name(),
            }),
        }
    }

    /// Reads the string global `name`.
    ///
    /// Numbers are accepted and converted the way Lua's `tostring` would.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Missing`] if the global is nil, [`ScriptError::WrongType`]
    /// for tables, booleans, functions and the like.
    pub fn read_string(&self, name: &str) -> Result<String, ScriptError> {
        let value = self.global(name)?;
        let found = value.type_name();
        match value {
            LuaValue::String(_) | LuaValue::Integer(_) | LuaValue::Number(_) => {
                match self.lua.coerce_string(value)? {
                    Some(s) => Ok(s.to_string_lossy()),
                    None => Err(ScriptError::WrongType {
                        name: name.to_string(),
                        expected: "string",
                        found,
                    }),
                }
            }
            _ => Err(ScriptError::WrongType {
                name: name.to_string(),
                expected: "string",
                found,
            }),
        }
    }

    /// Deserializes the table global `name` into `T`.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Missing`] if nil, [`ScriptError::WrongType`] if not a
    /// table, [`ScriptError::Lua`] if the table does not match `T`.
    pub fn read_table<T: DeserializeOwned>(&self, name: &str) -> Result<T, ScriptError> {
        let value = self.global(name)?;
        if !matches!(value, LuaValue::Table(_)) {
            return Err(ScriptError::WrongType {
                name: name.to_string(),
                expected: "table",
                found: value.type_name(),
            });
        }
        Ok(self.lua.from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn runtime_with(source: &str) -> LuaRuntime {
        let rt = LuaRuntime::new().expect("lua runtime");
        rt.exec(source, "test").expect("script runs");
        rt
    }

    #[test]
    fn reads_integer_global() {
        let rt = runtime_with("score = 42");
        assert_eq!(rt.read_int("score").unwrap(), 42);
    }

    #[test]
    fn reads_string_global() {
        let rt = runtime_with(r#"title = "Game""#);
        assert_eq!(rt.read_string("title").unwrap(), "Game");
    }

    #[test]
    fn int_read_of_string_is_wrong_type() {
        let rt = runtime_with(r#"title = "Game""#);
        match rt.read_int("title") {
            Err(ScriptError::WrongType { expected, found, .. }) => {
                assert_eq!(expected, "integer");
                assert_eq!(found, "string");
            }
            other => panic!("expected WrongType, got {other:?}"),
        }
    }

    #[test]
    fn int_read_rejects_float() {
        let rt = runtime_with("speed = 42.0");
        assert!(matches!(
            rt.read_int("speed"),
            Err(ScriptError::WrongType { .. })
        ));
    }

    #[test]
    fn missing_global_is_reported() {
        let rt = runtime_with("");
        assert!(matches!(
            rt.read_int("nope"),
            Err(ScriptError::Missing { .. })
        ));
        assert!(matches!(
            rt.read_string("nope"),
            Err(ScriptError::Missing { .. })
        ));
    }

    #[test]
    fn string_read_coerces_numbers() {
        let rt = runtime_with("score = 42");
        assert_eq!(rt.read_string("score").unwrap(), "42");
    }

    #[test]
    fn string_read_rejects_tables_and_booleans() {
        let rt = runtime_with("t = {} flag = true");
        assert!(matches!(
            rt.read_string("t"),
            Err(ScriptError::WrongType { found: "table", .. })
        ));
        assert!(matches!(
            rt.read_string("flag"),
            Err(ScriptError::WrongType { found: "boolean", .. })
        ));
    }

    #[test]
    fn check_status_reports_failures() {
        let rt = runtime_with("");
        let ok = rt.exec("x = 1", "ok");
        assert!(rt.check_status(&ok));
        let bad = rt.exec("this is not lua", "bad");
        assert!(!rt.check_status(&bad));
        let boom = rt.exec("error('boom')", "boom");
        assert!(!rt.check_status(&boom));
    }

    #[test]
    fn engine_log_functions_are_callable() {
        let rt = runtime_with("");
        let result = rt.exec(
            r#"engine.log("a") engine.log_info("b") engine.log_warn("c") engine.log_error("d")"#,
            "log",
        );
        assert!(rt.check_status(&result));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ship {
        frames: u32,
        fps: f32,
    }

    #[test]
    fn reads_table_into_struct() {
        let rt = runtime_with("ship = { frames = 4, fps = 20 }");
        let ship: Ship = rt.read_table("ship").unwrap();
        assert_eq!(ship, Ship { frames: 4, fps: 20.0 });
        assert!(matches!(
            rt.read_table::<Ship>("missing"),
            Err(ScriptError::Missing { .. })
        ));
    }

    #[test]
    fn run_script_reports_missing_file() {
        let rt = runtime_with("");
        let result = rt.run_script("/no/such/script.lua");
        assert!(!rt.check_status(&result));
    }
}
