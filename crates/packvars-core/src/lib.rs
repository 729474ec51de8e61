//! Variable core for packvars
//!
//! Takes the variables produced by the configuration parser, in either the
//! legacy or the unified layout, and turns them into what the template
//! renderer consumes:
//!
//! - **Store**: [`ParsedVariables`] loads one variable set and exposes a
//!   unified view regardless of the layout it was given
//! - **Template contexts**: [`ParsedVariables::to_template_context`] nests
//!   pack data along the pack dependency tree
//! - **Legacy maps**: [`ParsedVariables::to_legacy_value_map`] builds the flat
//!   map used by legacy templates
//! - **Override files**: [`ParsedVariables::as_override_file`] writes a
//!   deterministic, reloadable dump of the variables
//!
//! Value conversion problems never abort these operations. They come back as
//! [`Diagnostics`](packvars_sdk::Diagnostics) next to the partial result.
//!
//! # Example
//!
//! ```
//! use packvars_core::{ParsedVariables, parse_override_file};
//! use packvars_sdk::Pack;
//!
//! let vars = parse_override_file("vars.toml", "app.port = 8080\n").unwrap();
//! let mut store = ParsedVariables::new();
//! store.load_unified(&vars).unwrap();
//!
//! let pack = Pack::new("app");
//! let (context, diags) = store.to_template_context(&pack);
//! assert!(diags.is_empty());
//! assert_eq!(context.current().vars["port"], 8080);
//! ```

pub mod context;
pub mod convert;
pub mod error;
pub mod flatten;
pub mod input;
pub mod normalize;
pub mod override_file;
pub mod parsed;

pub use context::{PackData, TemplateContext};
pub use convert::{ValueMap, convert_value, convert_variables};
pub use error::{ConversionError, Error, Result, VariableShape};
pub use input::{merge_unified, parse_legacy_json, parse_override_file};
pub use normalize::normalize_legacy;
pub use packvars_sdk::CURRENT_PACK_KEY;
pub use parsed::{LegacyVariables, PackVariables, ParsedVariables, UnifiedVariables};
