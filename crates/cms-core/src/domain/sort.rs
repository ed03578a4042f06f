//! Sort specification passed to repository listings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub descending: bool,
}

impl SortOrder {
    pub fn asc(property: &str) -> Self {
        Self { property: property.to_string(), descending: false }
    }
}

/// Ordered list of sort orders; repositories reject properties they cannot sort on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub orders: Vec<SortOrder>,
}

impl SortSpec {
    /// The order every menu listing is read in.
    pub fn priority_asc() -> Self {
        Self { orders: vec![SortOrder::asc("priority")] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_asc() {
        let spec = SortSpec::priority_asc();
        assert_eq!(spec.orders, vec![SortOrder { property: "priority".into(), descending: false }]);
        assert!(!spec.orders[0].descending);
    }
}
