//! Add-ons: optional feature modules that gate parts of the schema.
//!
//! A database is opened with a fixed set of active add-ons. Migration
//! steps and catalog tables tagged with an inactive add-on are skipped.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::validate::normalize_addon;

/// An optional feature module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddOn {
    WooCommerce,
}

impl AddOn {
    /// Every known add-on, in declaration order.
    pub const ALL: &'static [AddOn] = &[AddOn::WooCommerce];

    /// Wire name used on the command line and in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WooCommerce => "WC",
        }
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AddOn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let canonical = normalize_addon(s)
            .map_err(|(name, suggestion)| Error::UnknownAddOn { name, suggestion })?;

        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(&canonical))
            .ok_or_else(|| Error::UnknownAddOn {
                name: s.to_string(),
                suggestion: None,
            })
    }
}

impl Serialize for AddOn {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// The add-ons active for one database handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOnSet(BTreeSet<AddOn>);

impl AddOnSet {
    /// No add-ons: only the core schema.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Every known add-on.
    #[must_use]
    pub fn all() -> Self {
        AddOn::ALL.iter().copied().collect()
    }

    /// Parse a list of names, rejecting unknown ones.
    ///
    /// Each entry may itself be comma separated, so `["WC,woo"]` and
    /// `["WC", "woo"]` are equivalent. Blank entries are ignored.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut set = BTreeSet::new();
        for entry in names {
            for name in entry.as_ref().split(',') {
                if name.trim().is_empty() {
                    continue;
                }
                set.insert(name.parse::<AddOn>()?);
            }
        }
        Ok(Self(set))
    }

    #[must_use]
    pub fn contains(&self, addon: AddOn) -> bool {
        self.0.contains(&addon)
    }

    /// Whether something gated on `addon` is enabled. Ungated is always on.
    #[must_use]
    pub fn allows(&self, addon: Option<AddOn>) -> bool {
        addon.is_none_or(|a| self.contains(a))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AddOn> + '_ {
        self.0.iter().copied()
    }

    /// Wire names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|a| a.name()).collect()
    }
}

impl FromIterator<AddOn> for AddOnSet {
    fn from_iter<I: IntoIterator<Item = AddOn>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for AddOnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }
        f.write_str(&self.names().join(","))
    }
}

impl Serialize for AddOnSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_name_and_synonyms() {
        assert_eq!("WC".parse::<AddOn>().unwrap(), AddOn::WooCommerce);
        assert_eq!("woocommerce".parse::<AddOn>().unwrap(), AddOn::WooCommerce);
        assert_eq!("Woo".parse::<AddOn>().unwrap(), AddOn::WooCommerce);
    }

    #[test]
    fn test_parse_unknown_addon() {
        let err = "shop".parse::<AddOn>().unwrap_err();
        assert!(matches!(err, Error::UnknownAddOn { ref name, .. } if name == "shop"));
    }

    #[test]
    fn test_set_parse_comma_separated() {
        let set = AddOnSet::parse(&["WC,woo", ""]).unwrap();
        assert!(set.contains(AddOn::WooCommerce));
        assert_eq!(set.names(), vec!["WC"]);

        assert!(AddOnSet::parse(&["WC", "nope"]).is_err());
    }

    #[test]
    fn test_allows_ungated_always() {
        let none = AddOnSet::none();
        assert!(none.allows(None));
        assert!(!none.allows(Some(AddOn::WooCommerce)));
        assert!(AddOnSet::all().allows(Some(AddOn::WooCommerce)));
    }

    #[test]
    fn test_display() {
        assert_eq!(AddOnSet::none().to_string(), "(none)");
        assert_eq!(AddOnSet::all().to_string(), "WC");
    }
}
