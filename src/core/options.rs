//! Package options: the caller-facing configuration surface of a recipe.
//!
//! An `OptionSet` is a string-keyed mapping of resolved option values,
//! immutable once resolved for a given build. Absent options mean "use
//! the underlying build tool's default" and contribute nothing to the
//! translated flag set.
//!
//! Every recipe declares an `OptionSchema` up front; resolution validates
//! the caller's values against it eagerly, so dynamic name-based lookups
//! later in translation can rely on every expected key existing.

use std::collections::BTreeMap;

use crate::util::ConfigError;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean toggle.
    Bool(bool),
    /// Enumerated or free-form string.
    Str(String),
}

impl OptionValue {
    /// Get the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Str(_) => None,
        }
    }

    /// Get the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Bool(_) => None,
            OptionValue::Str(s) => Some(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

/// A resolved set of package options.
///
/// Iteration order is the lexicographic order of option names, which keeps
/// flag translation deterministic across invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: BTreeMap<String, OptionValue>,
}

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        OptionSet::default()
    }

    /// Set an option value, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`OptionSet::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up an option value. `None` means the option is absent.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Look up a boolean option. Absent or non-boolean yields `None`.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    /// Look up a string option. Absent or non-string yields `None`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    /// Check whether a boolean option is present and set to true.
    pub fn is_true(&self, name: &str) -> bool {
        self.get_bool(name) == Some(true)
    }

    /// Check whether an option is present at all.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove an option, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.values.remove(name)
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of set options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The domain of values an option may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionDomain {
    /// `true` / `false`.
    Bool,
    /// One of a fixed set of strings.
    Enum(Vec<String>),
    /// Any free-form string.
    Any,
}

impl OptionDomain {
    /// Enumerated domain from static string values.
    pub fn one_of(values: &[&str]) -> Self {
        OptionDomain::Enum(values.iter().map(|s| s.to_string()).collect())
    }

    fn check(&self, name: &str, value: &OptionValue) -> Result<(), ConfigError> {
        match (self, value) {
            (OptionDomain::Bool, OptionValue::Bool(_)) => Ok(()),
            (OptionDomain::Bool, OptionValue::Str(s)) => Err(ConfigError::InvalidOptionValue {
                name: name.to_string(),
                reason: format!("expected a boolean, got `{}`", s),
            }),
            (OptionDomain::Enum(allowed), OptionValue::Str(s)) => {
                if allowed.iter().any(|a| a == s) {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidOptionValue {
                        name: name.to_string(),
                        reason: format!("`{}` is not one of: {}", s, allowed.join(", ")),
                    })
                }
            }
            (OptionDomain::Enum(_), OptionValue::Bool(b)) => {
                Err(ConfigError::InvalidOptionValue {
                    name: name.to_string(),
                    reason: format!("expected an enumerated string, got `{}`", b),
                })
            }
            (OptionDomain::Any, OptionValue::Str(_)) => Ok(()),
            (OptionDomain::Any, OptionValue::Bool(b)) => Err(ConfigError::InvalidOptionValue {
                name: name.to_string(),
                reason: format!("expected a string, got `{}`", b),
            }),
        }
    }
}

/// Declaration of a single option: its domain and its default.
///
/// A default of `None` means the option is unset unless the caller
/// provides it, which leaves the underlying tool's own default in force.
#[derive(Debug, Clone)]
pub struct OptionDecl {
    pub domain: OptionDomain,
    pub default: Option<OptionValue>,
}

/// The declared option surface of a recipe for one package version.
///
/// Insertion order is preserved so schema listings are stable, but
/// validation and resolution work by explicit name lookup.
#[derive(Debug, Clone, Default)]
pub struct OptionSchema {
    decls: Vec<(String, OptionDecl)>,
}

impl OptionSchema {
    /// Create an empty schema (for recipes with no options).
    pub fn new() -> Self {
        OptionSchema::default()
    }

    /// Declare an option with a domain and no default (unset by default).
    pub fn declare(&mut self, name: impl Into<String>, domain: OptionDomain) {
        self.decls.push((
            name.into(),
            OptionDecl {
                domain,
                default: None,
            },
        ));
    }

    /// Declare an option with a domain and a default value.
    pub fn declare_with_default(
        &mut self,
        name: impl Into<String>,
        domain: OptionDomain,
        default: impl Into<OptionValue>,
    ) {
        self.decls.push((
            name.into(),
            OptionDecl {
                domain,
                default: Some(default.into()),
            },
        ));
    }

    /// Remove an option from the schema, e.g. when a package version does
    /// not support it. Returns whether the option was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.decls.len();
        self.decls.retain(|(n, _)| n != name);
        before != self.decls.len()
    }

    /// Check whether an option is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.decls.iter().any(|(n, _)| n == name)
    }

    /// Look up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&OptionDecl> {
        self.decls.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// Iterate over declared option names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.decls.iter().map(|(n, _)| n.as_str())
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Check if the schema declares no options.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Validate caller-supplied options and overlay them on the declared
    /// defaults, producing the resolved option set for the build.
    ///
    /// Fails on unknown option names and on values outside their declared
    /// domain. Declared options without a default and without a supplied
    /// value stay absent from the result.
    pub fn resolve(&self, package: &str, supplied: &OptionSet) -> Result<OptionSet, ConfigError> {
        for (name, value) in supplied.iter() {
            let decl = self
                .get(name)
                .ok_or_else(|| ConfigError::UnknownOption {
                    package: package.to_string(),
                    name: name.to_string(),
                })?;
            decl.domain.check(name, value)?;
        }

        let mut resolved = OptionSet::new();
        for (name, decl) in &self.decls {
            if let Some(value) = supplied.get(name) {
                resolved.set(name.clone(), value.clone());
            } else if let Some(default) = &decl.default {
                resolved.set(name.clone(), default.clone());
            }
        }
        Ok(resolved)
    }
}
