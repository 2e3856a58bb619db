use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{invalid_category_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Economy,
    Premium,
    Xl,
}

impl Category {
    /// Display order of the ride tiers.
    pub const ALL: [Category; 3] = [Category::Economy, Category::Premium, Category::Xl];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Premium => "premium",
            Self::Xl => "xl",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Economy
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|category| category.name() == s)
            .copied()
            .ok_or_else(invalid_category_error)
    }
}

#[test]
fn parse_known_categories() {
    for category in Category::ALL {
        assert_eq!(category.name().parse::<Category>().unwrap(), category);
    }
}

#[test]
fn parse_unknown_category() {
    use crate::error::INVALID_CATEGORY;

    let err = "luxury".parse::<Category>().unwrap_err();
    assert_eq!(err.code, INVALID_CATEGORY);
    assert_eq!(err.message, "Invalid category");

    // names are case sensitive on the wire
    assert!("Economy".parse::<Category>().is_err());
}

#[test]
fn serde_uses_wire_names() {
    assert_eq!(serde_json::to_string(&Category::Xl).unwrap(), "\"xl\"");
    assert_eq!(
        serde_json::from_str::<Category>("\"premium\"").unwrap(),
        Category::Premium
    );
}
