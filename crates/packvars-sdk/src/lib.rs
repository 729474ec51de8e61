//! Shared types for packvars
//!
//! This crate holds the types that sit at the boundary of the variable core:
//!
//! - **Ids**: [`PackId`] and [`VariableId`], typed keys for variable sets
//! - **Variables**: [`Variable`] and its typed [`VariableValue`]
//! - **Source locations**: [`SourceRange`] for pointing diagnostics at declarations
//! - **Diagnostics**: the accumulating [`Diagnostics`] list
//! - **Packs**: the [`Pack`] dependency tree and its [`PackMetadata`]

pub mod diagnostic;
pub mod error;
pub mod id;
pub mod manifest;
pub mod pack;
pub mod source;
pub mod value;
pub mod variable;

pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use id::{PackId, VariableId};
pub use manifest::PackManifest;
pub use pack::{AppMetadata, CURRENT_PACK_KEY, Pack, PackInfo, PackMetadata};
pub use source::{Pos, SourceRange};
pub use value::{VariableType, VariableValue};
pub use variable::Variable;
