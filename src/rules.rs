//! Brand rule tables.
//!
//! A [`BrandRule`] pairs a brand name with a regular expression over a
//! [`NormalizedNumber`]. A [`RuleSet`] is an ordered, immutable list of rules
//! evaluated first-match-wins. The default table lives in [`DEFAULT_CATALOG`]
//! as plain data, so brands can be added or reordered without touching the
//! matching code.
//!
//! # Overlaps
//!
//! Elo enumerates BINs that also satisfy the broader Visa (`4011`, `4576`,
//! `438935`, `451416`) and Aura (`5067`, `504175`) patterns. Elo is listed
//! first so its explicit BINs win. This is a deliberate choice: with Visa
//! ahead of Elo, a Luhn-valid 16-digit `4011...` or `4576...` number would
//! classify as Visa instead. Keep Elo first when editing the table.

use crate::error::RuleError;
use crate::normalize::NormalizedNumber;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Default brand table in evaluation order: `(name, pattern)`.
///
/// | Brand | Rule |
/// |---|---|
/// | Elo | 636368, 438935, 504175, 451416, 636297 (up to 16 digits); 5067, 4576, 4011 (up to 16 digits) |
/// | HiperCard | 606282 with 16 or 19 digits; 3841 with 19 digits |
/// | Visa | 4, 13 or 16 digits |
/// | MasterCard | 51-55 or 2221-2720, 16 digits |
/// | American Express | 34, 37, 15 digits |
/// | Diners Club | 300-305, 36, 38, 14 digits |
/// | Discover | 6011, 65, 16 digits |
/// | enRoute | 2014, 2149, 15 digits |
/// | JCB | 35, 16 digits |
/// | Voyager | 8699, 16 digits |
/// | Aura | 50, 16 digits |
pub const DEFAULT_CATALOG: &[(&str, &str)] = &[
    (
        "Elo",
        r"^(?:(?:636368|438935|504175|451416|636297)[0-9]{0,10}|(?:5067|4576|4011)[0-9]{0,12})$",
    ),
    (
        "HiperCard",
        r"^(?:606282[0-9]{10}(?:[0-9]{3})?|3841[0-9]{15})$",
    ),
    ("Visa", r"^4[0-9]{12}(?:[0-9]{3})?$"),
    (
        "MasterCard",
        r"^(?:5[1-5][0-9]{14}|2(?:22[1-9]|2[3-9][0-9]|[3-6][0-9]{2}|7[01][0-9]|720)[0-9]{12})$",
    ),
    ("American Express", r"^3[47][0-9]{13}$"),
    ("Diners Club", r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$"),
    ("Discover", r"^6(?:011|5[0-9]{2})[0-9]{12}$"),
    ("enRoute", r"^2(?:014|149)[0-9]{11}$"),
    ("JCB", r"^35[0-9]{14}$"),
    ("Voyager", r"^8699[0-9]{12}$"),
    ("Aura", r"^50[0-9]{14}$"),
];

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from_specs(DEFAULT_CATALOG.iter().copied())
        .expect("default brand catalog must compile")
});

/// A named structural pattern identifying one card brand.
#[derive(Clone)]
pub struct BrandRule {
    name: String,
    pattern: Regex,
}

impl BrandRule {
    /// Compiles a rule.
    ///
    /// The pattern should be anchored (`^...$`); it is applied to the whole
    /// digit string as-is.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, RuleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RuleError::EmptyName);
        }
        let pattern = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            name: name.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { name, pattern })
    }

    /// Brand name reported on a match.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source text of the pattern.
    #[inline]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns true if the number satisfies this rule.
    #[inline]
    pub fn matches(&self, number: &NormalizedNumber) -> bool {
        self.pattern.is_match(number.as_str())
    }
}

impl fmt::Debug for BrandRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrandRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl PartialEq for BrandRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.pattern.as_str() == other.pattern.as_str()
    }
}

impl Eq for BrandRule {}

/// Ordered, immutable set of brand rules.
///
/// Cloning is cheap: rules are shared behind an `Arc`, so one table can
/// back any number of classifiers and threads.
///
/// # Example
///
/// ```
/// use card_classifier::rules::RuleSet;
/// use card_classifier::normalize::NormalizedNumber;
///
/// let rules = RuleSet::default();
/// let number = NormalizedNumber::try_from("4111111111111111").unwrap();
/// assert_eq!(rules.first_match(&number).map(|r| r.name()), Some("Visa"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Arc<[BrandRule]>,
}

impl RuleSet {
    /// Creates a rule set from already-compiled rules, keeping their order.
    ///
    /// Fails with [`RuleError::DuplicateBrand`] if two rules share a name.
    pub fn new(rules: Vec<BrandRule>) -> Result<Self, RuleError> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.name == rule.name) {
                return Err(RuleError::DuplicateBrand(rule.name.clone()));
            }
        }
        Ok(Self {
            rules: rules.into(),
        })
    }

    /// Compiles `(name, pattern)` pairs into a rule set.
    pub fn from_specs<'a, I>(specs: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = specs
            .into_iter()
            .map(|(name, pattern)| BrandRule::new(name, pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    /// The shared default 11-brand catalog.
    #[inline]
    pub fn default_catalog() -> Self {
        DEFAULT_RULES.clone()
    }

    /// Starts a builder seeded with no rules.
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Starts a builder seeded with this set's rules.
    pub fn to_builder(&self) -> RuleSetBuilder {
        RuleSetBuilder {
            rules: self.rules.to_vec(),
        }
    }

    /// First rule, in table order, that matches the number.
    pub fn first_match(&self, number: &NormalizedNumber) -> Option<&BrandRule> {
        self.rules.iter().find(|rule| {
            let hit = rule.matches(number);
            tracing::trace!(brand = rule.name(), hit, "brand rule evaluated");
            hit
        })
    }

    /// Every rule that matches the number, in table order.
    ///
    /// More than one item means the table has an overlap for this number.
    pub fn matching<'a>(
        &'a self,
        number: &'a NormalizedNumber,
    ) -> impl Iterator<Item = &'a BrandRule> + 'a {
        self.rules.iter().filter(move |rule| rule.matches(number))
    }

    /// Looks up a rule by brand name.
    pub fn get(&self, name: &str) -> Option<&BrandRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Brand names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(BrandRule::name)
    }

    /// Iterates over the rules in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, BrandRule> {
        self.rules.iter()
    }

    /// Number of rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set has no rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_catalog()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a BrandRule;
    type IntoIter = std::slice::Iter<'a, BrandRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Builder for reduced or extended rule tables.
///
/// # Example
///
/// ```
/// use card_classifier::rules::RuleSet;
///
/// let rules = RuleSet::default()
///     .to_builder()
///     .without("Elo")
///     .rule("Test Brand", r"^9[0-9]{15}$")
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert!(rules.get("Elo").is_none());
/// assert_eq!(rules.names().last(), Some("Test Brand"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSetBuilder {
    rules: Vec<BrandRule>,
}

impl RuleSetBuilder {
    /// Compiles and appends a rule.
    pub fn rule(mut self, name: impl Into<String>, pattern: &str) -> Result<Self, RuleError> {
        self.rules.push(BrandRule::new(name, pattern)?);
        Ok(self)
    }

    /// Appends an already-compiled rule.
    pub fn push(mut self, rule: BrandRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Inserts a compiled rule at `index`, clamped to the end.
    pub fn insert(mut self, index: usize, rule: BrandRule) -> Self {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
        self
    }

    /// Drops every rule with the given brand name.
    pub fn without(mut self, name: &str) -> Self {
        self.rules.retain(|r| r.name != name);
        self
    }

    /// Finishes the table.
    pub fn build(self) -> Result<RuleSet, RuleError> {
        RuleSet::new(self.rules)
    }
}

#[cfg(feature = "rules-json")]
mod json {
    //! JSON rule tables: `[{"name": "Visa", "pattern": "^4[0-9]{15}$"}, ...]`.

    use super::{BrandRule, RuleSet};
    use crate::error::RuleError;
    use serde::Deserialize;
    use std::path::Path;

    #[derive(Deserialize)]
    struct JsonRule {
        name: String,
        pattern: String,
    }

    impl RuleSet {
        /// Parses a JSON rule table, keeping document order.
        pub fn from_json(json: &str) -> Result<Self, RuleError> {
            let entries: Vec<JsonRule> =
                serde_json::from_str(json).map_err(|e| RuleError::Parse(e.to_string()))?;

            let rules = entries
                .into_iter()
                .map(|entry| BrandRule::new(entry.name, &entry.pattern))
                .collect::<Result<Vec<_>, _>>()?;

            tracing::debug!(rules = rules.len(), "loaded brand rules from JSON");
            Self::new(rules)
        }

        /// Reads and parses a JSON rule table file.
        pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RuleError> {
            let content = std::fs::read_to_string(path)?;
            Self::from_json(&content)
        }
    }
}
