//! Tool registry: ordered name → handler mapping and the `invoke` dispatcher.
//!
//! Dispatch is stateless: look up the tool, resolve every declared parameter
//! (supplied value coerced, else default, else error), run the handler.
//! Argument names the tool does not declare are ignored.

use crate::tools::catalog::{ParamType, ToolEntry};
use crate::types::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Handler invoked with the fully resolved argument map.
pub type ToolHandler = Box<dyn Fn(Map<String, Value>) -> Result<Value> + Send + Sync>;

struct RegisteredTool {
    entry: ToolEntry,
    handler: ToolHandler,
}

/// Registered tools, kept in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool with an untyped handler.
    pub fn register(&mut self, entry: ToolEntry, handler: ToolHandler) -> Result<()> {
        if entry.name.is_empty() {
            return Err(Error::validation("Tool name cannot be empty"));
        }
        if self.index.contains_key(&entry.name) {
            return Err(Error::validation(format!(
                "Tool already registered: {}",
                entry.name
            )));
        }
        self.index.insert(entry.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool { entry, handler });
        Ok(())
    }

    /// Register a tool whose handler takes a typed options struct.
    ///
    /// The resolved argument map is deserialized into `P`; the handler's
    /// return value is serialized back to JSON.
    pub fn register_typed<P, R, F>(&mut self, entry: ToolEntry, handler: F) -> Result<()>
    where
        P: DeserializeOwned,
        R: Serialize,
        F: Fn(P) -> Result<R> + Send + Sync + 'static,
    {
        let tool = entry.name.clone();
        let wrapped: ToolHandler = Box::new(move |args| {
            let params: P = serde_json::from_value(Value::Object(args)).map_err(|e| {
                Error::internal(format!("{} arguments do not fit handler: {}", tool, e))
            })?;
            let output = handler(params)?;
            Ok(serde_json::to_value(output)?)
        });
        self.register(entry, wrapped)
    }

    /// Get a tool entry by name.
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&i| &self.tools[i].entry)
    }

    /// Check if a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.entry.name.as_str()).collect()
    }

    /// Tool entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &ToolEntry> {
        self.tools.iter().map(|t| &t.entry)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Call a tool by exact name with a JSON object of arguments.
    ///
    /// `null` arguments are treated as an empty object.
    pub fn invoke(&self, name: &str, args: &Value) -> Result<Value> {
        let tool = self
            .index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| Error::unknown_operation(name))?;

        let resolved = resolve_args(&tool.entry, args)?;
        tracing::debug!(tool = name, "invoking tool");
        (tool.handler)(resolved)
    }
}

/// Build the argument map a handler sees: one entry per declared parameter.
pub fn resolve_args(entry: &ToolEntry, args: &Value) -> Result<Map<String, Value>> {
    let empty = Map::new();
    let supplied = match args {
        Value::Null => &empty,
        Value::Object(map) => map,
        _ => {
            return Err(Error::type_mismatch(
                "arguments",
                "object",
                "arguments must be a JSON object",
            ))
        }
    };

    let mut resolved = Map::new();
    for param in &entry.parameters {
        let value = match supplied.get(&param.name) {
            Some(value) => param.param_type.coerce(value).map_err(|msg| {
                Error::type_mismatch(&param.name, param.param_type.display_name(), msg)
            })?,
            None => match (&param.default, &param.param_type) {
                (Some(default), _) => default.clone(),
                (None, ParamType::Optional(_)) => Value::Null,
                (None, _) => return Err(Error::missing_parameter(&entry.name, &param.name)),
            },
        };
        resolved.insert(param.name.clone(), value);
    }
    Ok(resolved)
}
