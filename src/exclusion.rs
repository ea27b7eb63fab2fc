//! Exclusion of parts from criticality selection.
//!
//! Parts can be excluded by name, by title, or by any of their module names.
//! Names match case-insensitively. Module keys are additionally normalized by
//! removing whitespace and expanded with the `Module` prefix, so `Engines`,
//! `Module Engines` and `ModuleEngines` all exclude a part carrying `ModuleEngines`.

use crate::types::PartSnapshot;
use std::collections::HashSet;

/// Conventional prefix of module names.
pub const MODULE_PREFIX: &str = "module";

/// Splits a comma-separated list: trims items, drops empty ones, lower-cases,
/// and removes duplicates while keeping first-seen order.
#[must_use]
pub fn parse_list(list: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    list.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Lower-cases and strips all whitespace from a module label.
#[must_use]
pub fn normalize_module(label: &str) -> String {
    label.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect()
}

/// Set of excluded names and modules plus the enable flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionConfig {
    /// When false, nothing is excluded.
    pub enabled: bool,
    names: HashSet<String>,
    modules: HashSet<String>,
}

impl ExclusionConfig {
    /// Creates a disabled, empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from user-editable comma-separated lists.
    #[must_use]
    pub fn from_lists(enabled: bool, names: &str, modules: &str) -> Self {
        let mut config = Self { enabled, ..Self::default() };
        for name in parse_list(names) {
            config.add_name(&name);
        }
        for module in parse_list(modules) {
            config.add_module(&module);
        }
        config
    }

    /// Adds an excluded part name or title.
    pub fn add_name(&mut self, name: &str) {
        let key = name.trim().to_lowercase();
        if !key.is_empty() {
            self.names.insert(key);
        }
    }

    /// Adds an excluded module, in both its short and `Module`-prefixed forms.
    pub fn add_module(&mut self, module: &str) {
        let key = normalize_module(module);
        if key.is_empty() {
            return;
        }
        match key.strip_prefix(MODULE_PREFIX) {
            Some(short) if !short.is_empty() => {
                self.modules.insert(short.to_string());
            }
            _ => {
                self.modules.insert(format!("{MODULE_PREFIX}{key}"));
            }
        }
        self.modules.insert(key);
    }

    /// True if `name` (already any case) is in the name set.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        !name.is_empty() && self.names.contains(&name.to_lowercase())
    }

    /// True if `module` matches any excluded module key.
    #[must_use]
    pub fn contains_module(&self, module: &str) -> bool {
        self.modules.contains(&normalize_module(module))
    }

    /// Number of name keys.
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of module keys, including expanded forms.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}

/// Returns whether `part` must be ignored.
///
/// Always false while the configuration is disabled.
#[must_use]
pub fn is_excluded(part: &PartSnapshot, config: &ExclusionConfig) -> bool {
    if !config.enabled {
        return false;
    }

    config.contains_name(&part.name)
        || config.contains_name(&part.title)
        || part.modules.iter().any(|module| config.contains_module(module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityId;

    fn part() -> PartSnapshot {
        PartSnapshot::new(EntityId(1), 0.0, (300.0, 1000.0), (300.0, 1000.0))
            .with_name("heatShield2")
            .with_title("Heat Shield (2.5m)")
            .with_module("ModuleAblator")
            .with_module("ModuleDecouple")
    }

    #[test]
    fn test_parse_list_trims_lowercases_dedupes() {
        assert_eq!(parse_list(" Foo, bar ,,FOO, Baz "), vec!["foo", "bar", "baz"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ,").is_empty());
    }

    #[test]
    fn test_normalize_module() {
        assert_eq!(normalize_module("Module Ablator"), "moduleablator");
        assert_eq!(normalize_module("  ablator "), "ablator");
    }

    #[test]
    fn test_disabled_never_excludes() {
        let config = ExclusionConfig::from_lists(false, "heatShield2", "ModuleAblator");
        assert!(!is_excluded(&part(), &config));
    }

    #[test]
    fn test_excluded_by_name_case_insensitive() {
        let config = ExclusionConfig::from_lists(true, "HEATSHIELD2", "");
        assert!(is_excluded(&part(), &config));
    }

    #[test]
    fn test_excluded_by_title() {
        let config = ExclusionConfig::from_lists(true, "heat shield (2.5m)", "");
        assert!(is_excluded(&part(), &config));
    }

    #[test]
    fn test_excluded_by_short_module_name() {
        let config = ExclusionConfig::from_lists(true, "", "ablator");
        assert!(is_excluded(&part(), &config));
    }

    #[test]
    fn test_excluded_by_prefixed_module_name() {
        for entry in ["ModuleAblator", "Module Ablator", "moduleablator"] {
            let config = ExclusionConfig::from_lists(true, "", entry);
            assert!(is_excluded(&part(), &config), "{entry} should exclude");
        }
    }

    #[test]
    fn test_prefixed_entry_expands_to_short_form() {
        let config = ExclusionConfig::from_lists(true, "", "Module foo");
        assert!(config.contains_module("foo"));
        assert!(config.contains_module("ModuleFoo"));
        assert_eq!(config.module_count(), 2);
    }

    #[test]
    fn test_bare_prefix_is_kept_as_is() {
        let config = ExclusionConfig::from_lists(true, "", "Module");
        assert!(config.contains_module("module"));
        assert!(config.contains_module("modulemodule"));
    }

    #[test]
    fn test_no_match_is_not_excluded() {
        let config = ExclusionConfig::from_lists(true, "fuelTank", "ModuleEngines");
        assert!(!is_excluded(&part(), &config));
    }

    #[test]
    fn test_empty_name_never_matches() {
        let mut config = ExclusionConfig::new();
        config.enabled = true;
        config.add_name("   ");
        let nameless = PartSnapshot::new(EntityId(2), 0.0, (1.0, 2.0), (1.0, 2.0));

        assert_eq!(config.name_count(), 0);
        assert!(!is_excluded(&nameless, &config));
    }
}
