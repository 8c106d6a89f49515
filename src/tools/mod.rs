//! Tool infrastructure: catalog metadata, argument coercion, registry and
//! dispatch, and the expense tools themselves.

pub mod catalog;
pub mod expense_tools;
pub mod registry;

pub use catalog::{ParamDef, ParamType, ToolEntry};
pub use registry::{ToolHandler, ToolRegistry};
