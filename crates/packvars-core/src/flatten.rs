//! Flat value map for the legacy template convention
//!
//! Legacy templates see a single two-level map, pack name to variable name
//! to value, with no dependency nesting.

use packvars_sdk::Diagnostics;
use serde_json::Value;

use crate::convert::{ValueMap, convert_variables};
use crate::parsed::ParsedVariables;

impl ParsedVariables {
    /// Build the flat pack-name to values map used by legacy templates.
    ///
    /// Every loaded pack gets an entry, even when none of its variables
    /// could be converted. Conversion failures are reported in the returned
    /// diagnostics, pack by pack in name order.
    pub fn to_legacy_value_map(&self) -> (ValueMap, Diagnostics) {
        let vars = self.unified_view();
        let mut out = ValueMap::new();
        let mut diags = Diagnostics::new();

        let mut packs: Vec<_> = vars.keys().collect();
        packs.sort();

        for pack in packs {
            let (values, conversion_diags) = convert_variables(&vars[pack]);
            diags.append(conversion_diags);
            out.insert(pack.to_string(), Value::Object(values));
        }

        (out, diags)
    }
}
