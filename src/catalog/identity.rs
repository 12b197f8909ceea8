use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::order::CATEGORY_PRECEDENCE;

/// Stable identifier for one fragment, expected to equal its filename stem.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(pub String);

/// Template grouping mirrored from the fragment schema.
///
/// Known variants keep serialization consistent with the catalog's category
/// names; `Other` preserves fragments whose category is not in the fixed
/// precedence list: they are accepted and sort after all known categories.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TemplateCategory {
    Development,
    Ai,
    Cloud,
    DevOps,
    Database,
    Network,
    CiCd,
    Other(String),
}

impl Serialize for TemplateCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TemplateCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl TemplateCategory {
    pub fn as_str(&self) -> &str {
        match self {
            TemplateCategory::Development => "Development",
            TemplateCategory::Ai => "AI",
            TemplateCategory::Cloud => "Cloud",
            TemplateCategory::DevOps => "DevOps",
            TemplateCategory::Database => "Database",
            TemplateCategory::Network => "Network",
            TemplateCategory::CiCd => "CI/CD",
            TemplateCategory::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "Development" => TemplateCategory::Development,
            "AI" => TemplateCategory::Ai,
            "Cloud" => TemplateCategory::Cloud,
            "DevOps" => TemplateCategory::DevOps,
            "Database" => TemplateCategory::Database,
            "Network" => TemplateCategory::Network,
            "CI/CD" => TemplateCategory::CiCd,
            other => TemplateCategory::Other(other.to_string()),
        }
    }

    /// Position in the fixed precedence list; categories not in the list rank
    /// after every listed one.
    pub fn rank(&self) -> usize {
        CATEGORY_PRECEDENCE
            .iter()
            .position(|name| *name == self.as_str())
            .unwrap_or(CATEGORY_PRECEDENCE.len())
    }
}
