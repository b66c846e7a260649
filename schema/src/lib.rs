// Shared type definitions for the move resolution engine.
// This crate contains the static enums and move-table descriptors that are
// shared between the engine and anything that authors or inspects move data.

// Re-export the main types
pub use battle_data::*;
pub use move_types::*;

pub mod battle_data;
pub mod move_types;
