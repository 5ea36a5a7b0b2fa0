//! The translated build-configuration flag set.
//!
//! A `FlagSet` is the output side of a recipe: CMake cache variables (or
//! preprocessor definitions) keyed by name. Insertion order is preserved
//! so the rendered command line is stable for a given option set.

/// An ordered set of build flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    entries: Vec<(String, String)>,
}

impl FlagSet {
    /// Create an empty flag set.
    pub fn new() -> Self {
        FlagSet::default()
    }

    /// Set a flag, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Set a boolean flag as `ON` / `OFF`.
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.set(name, if value { "ON" } else { "OFF" });
    }

    /// Set a semicolon-joined list flag. Empty iterators set nothing, so
    /// an empty list never produces an empty-valued flag.
    pub fn set_list<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(";");
        if !joined.is_empty() {
            self.set(name, joined);
        }
    }

    /// Look up a flag value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a flag is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterate over (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another flag set into this one. Later values win.
    pub fn extend(&mut self, other: &FlagSet) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Render as CMake `-D<name>=<value>` cache arguments.
    pub fn to_cache_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(n, v)| format!("-D{}={}", n, v))
            .collect()
    }

    /// Render as preprocessor `-D<name>=<value>` compiler arguments,
    /// joined with spaces for embedding in a flags variable.
    pub fn to_define_flags(&self) -> String {
        self.entries
            .iter()
            .map(|(n, v)| {
                if v.is_empty() {
                    format!("-D{}", n)
                } else {
                    format!("-D{}={}", n, v)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut flags = FlagSet::new();
        flags.set("FMT_DOC", "OFF");
        flags.set("FMT_INSTALL", "ON");
        flags.set("FMT_TEST", "OFF");

        let names: Vec<_> = flags.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["FMT_DOC", "FMT_INSTALL", "FMT_TEST"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut flags = FlagSet::new();
        flags.set("A", "1");
        flags.set("B", "2");
        flags.set("A", "3");

        assert_eq!(flags.get("A"), Some("3"));
        assert_eq!(flags.len(), 2);
        let names: Vec<_> = flags.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_set_list_no_trailing_separator() {
        let mut flags = FlagSet::new();
        flags.set_list("BOOST_INCLUDE_LIBRARIES", ["json", "system"]);
        assert_eq!(flags.get("BOOST_INCLUDE_LIBRARIES"), Some("json;system"));
    }

    #[test]
    fn test_set_list_empty_sets_nothing() {
        let mut flags = FlagSet::new();
        flags.set_list("BOOST_EXCLUDE_LIBRARIES", Vec::<String>::new());
        assert!(!flags.contains("BOOST_EXCLUDE_LIBRARIES"));
    }

    #[test]
    fn test_cache_args() {
        let mut flags = FlagSet::new();
        flags.set_bool("BENCHMARK_ENABLE_TESTING", false);
        flags.set("CMAKE_BUILD_TYPE", "Release");

        assert_eq!(
            flags.to_cache_args(),
            vec![
                "-DBENCHMARK_ENABLE_TESTING=OFF".to_string(),
                "-DCMAKE_BUILD_TYPE=Release".to_string(),
            ]
        );
    }

    #[test]
    fn test_define_flags() {
        let mut defines = FlagSet::new();
        defines.set("BOOST_ASIO_NO_DEPRECATED", "1");
        defines.set("BOOST_SYSTEM_USE_UTF8", "1");

        assert_eq!(
            defines.to_define_flags(),
            "-DBOOST_ASIO_NO_DEPRECATED=1 -DBOOST_SYSTEM_USE_UTF8=1"
        );
    }
}
