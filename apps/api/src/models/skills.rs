use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The fixed set of skill categories known to the lexicon.
///
/// Declaration order is load-bearing: it is the lexicon's category order,
/// and `BTreeMap<SkillCategory, _>` iteration follows it. Priority orders
/// that differ from this one (pros, gaps, interview scan, ...) are spelled
/// out as explicit constants where they are used.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    Frontend,
    Backend,
    CloudDevops,
    Data,
    Testing,
    Security,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 8] = [
        SkillCategory::Languages,
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::CloudDevops,
        SkillCategory::Data,
        SkillCategory::Testing,
        SkillCategory::Security,
        SkillCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Languages => "languages",
            SkillCategory::Frontend => "frontend",
            SkillCategory::Backend => "backend",
            SkillCategory::CloudDevops => "cloud_devops",
            SkillCategory::Data => "data",
            SkillCategory::Testing => "testing",
            SkillCategory::Security => "security",
            SkillCategory::Other => "other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category skill terms. Invariant: every `SkillCategory` is present
/// as a key and every value is sorted ascending with no duplicates.
///
/// The invariant is enforced at every construction site, including
/// deserialization (missing categories are reinstated as empty lists).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillSet(BTreeMap<SkillCategory, Vec<String>>);

impl SkillSet {
    /// A skill set with every category present and empty.
    pub fn empty() -> Self {
        let mut map = BTreeMap::new();
        for category in SkillCategory::ALL {
            map.insert(category, Vec::new());
        }
        SkillSet(map)
    }

    pub fn get(&self, category: SkillCategory) -> &[String] {
        self.0
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replaces a category's terms, sorting and deduplicating.
    pub fn set(&mut self, category: SkillCategory, mut terms: Vec<String>) {
        terms.sort();
        terms.dedup();
        self.0.insert(category, terms);
    }

    /// True when no category holds any term.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Iterates categories in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &[String])> {
        self.0.iter().map(|(c, v)| (*c, v.as_slice()))
    }
}

impl Default for SkillSet {
    fn default() -> Self {
        SkillSet::empty()
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = BTreeMap::<SkillCategory, Vec<String>>::deserialize(deserializer)?;
        for category in SkillCategory::ALL {
            let terms = map.entry(category).or_default();
            terms.sort();
            terms.dedup();
        }
        Ok(SkillSet(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_every_category() {
        let set = SkillSet::empty();
        for category in SkillCategory::ALL {
            assert!(set.get(category).is_empty());
        }
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_sorts_and_dedups() {
        let mut set = SkillSet::empty();
        set.set(
            SkillCategory::Backend,
            vec!["flask".into(), "django".into(), "flask".into()],
        );
        assert_eq!(set.get(SkillCategory::Backend), ["django", "flask"]);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_deserialize_reinstates_missing_categories() {
        let set: SkillSet = serde_json::from_str(r#"{"backend": ["fastapi"]}"#).unwrap();
        assert_eq!(set.get(SkillCategory::Backend), ["fastapi"]);
        for category in SkillCategory::ALL {
            if category != SkillCategory::Backend {
                assert!(set.get(category).is_empty(), "{category} not reinstated");
            }
        }
    }

    #[test]
    fn test_category_serde_names_are_snake_case() {
        let json = serde_json::to_string(&SkillCategory::CloudDevops).unwrap();
        assert_eq!(json, r#""cloud_devops""#);
        let parsed: SkillCategory = serde_json::from_str(r#""cloud_devops""#).unwrap();
        assert_eq!(parsed, SkillCategory::CloudDevops);
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let set = SkillSet::empty();
        let order: Vec<SkillCategory> = set.iter().map(|(c, _)| c).collect();
        assert_eq!(order, SkillCategory::ALL);
    }
}
