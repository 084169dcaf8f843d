//! Agent definitions loaded from source documents.
//!
//! Each `*.md` file under the source agents directory describes one agent: a
//! header block with `name`, `description` and optional settings, followed by
//! free-form instructions that may mention other agents as `@name`.
//!
//! Definitions are immutable once loaded. Exports build new documents from
//! them and never write back into a definition.

mod definition;
mod loader;


pub use definition::{AgentDefinition, DefinitionError};
pub use loader::load_agents;
