use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Immutable rule configuration consulted for every record.
///
/// The date format is not configurable; billing dates are always `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRuleSet {
    pub allowed_product_lines: BTreeSet<String>,
    pub allowed_currencies: BTreeSet<String>,
}

impl Default for ValidationRuleSet {
    fn default() -> Self {
        Self {
            allowed_product_lines: ["Bakery", "Meat", "Dairy"]
                .into_iter()
                .map(String::from)
                .collect(),
            allowed_currencies: ["USD", "MXN", "CAD"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
