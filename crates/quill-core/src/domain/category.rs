use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Forex,
    Psychology,
    Risk,
    Analysis,
    Education,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Forex,
        Category::Psychology,
        Category::Risk,
        Category::Analysis,
        Category::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Forex => "forex",
            Category::Psychology => "psychology",
            Category::Risk => "risk",
            Category::Analysis => "analysis",
            Category::Education => "education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Case-sensitive: `"Forex"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}
