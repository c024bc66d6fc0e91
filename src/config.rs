//! Match configuration
//!
//! Two gap policies decide the shape of the result:
//!
//! | Option | `any` (default) | `non-negative` |
//! |--------|-----------------|----------------|
//! | `occurrence_gap` | occurrences may share target positions | occurrences use disjoint positions |
//! | `element_gap` | pattern elements match in any relative order | positions strictly ascend |
//!
//! Three flags decide element equality: `ensure_hashable`, `use_custom_str`
//! and `float_precision`.

use core::str::FromStr;

use crate::error::{Error, Result};

/// Gap policy between consecutive elements or consecutive occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GapPolicy {
    /// No constraint.
    #[default]
    Any,
    /// Positions must move forward.
    NonNegative,
}

impl GapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapPolicy::Any => "any",
            GapPolicy::NonNegative => "non-negative",
        }
    }

    /// Parse a policy for the named option, reporting the option on failure.
    pub fn parse_for(option: &'static str, value: &str) -> Result<Self> {
        match value.trim() {
            "any" => Ok(GapPolicy::Any),
            "non-negative" => Ok(GapPolicy::NonNegative),
            other => Err(Error::InvalidGap {
                option,
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for GapPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GapPolicy::parse_for("gap policy", s)
    }
}

/// Matching configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MatchConfig {
    pub occurrence_gap: GapPolicy,
    pub element_gap: GapPolicy,
    /// Convert lists, sets and maps into hashable keys instead of failing.
    pub ensure_hashable: bool,
    /// Compare elements by their canonical string form.
    pub use_custom_str: bool,
    /// Round floats half-to-even at this many decimals before comparing.
    pub float_precision: Option<u32>,
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occurrence_gap(mut self, gap: GapPolicy) -> Self {
        self.occurrence_gap = gap;
        self
    }

    pub fn with_element_gap(mut self, gap: GapPolicy) -> Self {
        self.element_gap = gap;
        self
    }

    pub fn with_ensure_hashable(mut self, on: bool) -> Self {
        self.ensure_hashable = on;
        self
    }

    pub fn with_custom_str(mut self, on: bool) -> Self {
        self.use_custom_str = on;
        self
    }

    pub fn with_float_precision(mut self, precision: Option<u32>) -> Self {
        self.float_precision = precision;
        self
    }

    /// Build a configuration from `(name, value)` option pairs.
    ///
    /// Options not given keep their defaults.
    ///
    /// # Example
    /// ```
    /// use alice_seqmatch::{GapPolicy, MatchConfig};
    ///
    /// let config = MatchConfig::from_options([
    ///     ("occurrence_gap", "non-negative"),
    ///     ("float_precision", "3"),
    /// ])
    /// .unwrap();
    /// assert_eq!(config.occurrence_gap, GapPolicy::NonNegative);
    /// assert_eq!(config.float_precision, Some(3));
    /// ```
    pub fn from_options<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in options {
            let value = value.as_ref();
            match name.as_ref() {
                "occurrence_gap" => {
                    config.occurrence_gap = GapPolicy::parse_for("occurrence_gap", value)?
                }
                "element_gap" => config.element_gap = GapPolicy::parse_for("element_gap", value)?,
                "ensure_hashable" => config.ensure_hashable = parse_flag("ensure_hashable", value)?,
                "use_custom_str" => config.use_custom_str = parse_flag("use_custom_str", value)?,
                "float_precision" => config.float_precision = parse_precision(value)?,
                other => return Err(Error::Config(format!("unrecognized option {other:?}"))),
            }
        }
        Ok(config)
    }

    #[inline]
    pub(crate) fn ordered_elements(&self) -> bool {
        self.element_gap == GapPolicy::NonNegative
    }

    #[inline]
    pub(crate) fn disjoint_occurrences(&self) -> bool {
        self.occurrence_gap == GapPolicy::NonNegative
    }
}

fn parse_flag(option: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::Config(format!(
            "{option} expects true or false, got {other:?}"
        ))),
    }
}

fn parse_precision(value: &str) -> Result<Option<u32>> {
    match value.trim() {
        "" | "none" => Ok(None),
        digits => digits.parse::<u32>().map(Some).map_err(|_| {
            Error::Config(format!(
                "float_precision expects a non-negative integer, got {digits:?}"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_policy_parse() {
        assert_eq!("any".parse::<GapPolicy>(), Ok(GapPolicy::Any));
        assert_eq!(
            "non-negative".parse::<GapPolicy>(),
            Ok(GapPolicy::NonNegative)
        );
        assert!(matches!(
            "positive".parse::<GapPolicy>(),
            Err(Error::InvalidGap { .. })
        ));
        assert_eq!(GapPolicy::NonNegative.as_str(), "non-negative");
    }

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.occurrence_gap, GapPolicy::Any);
        assert_eq!(config.element_gap, GapPolicy::Any);
        assert!(!config.ensure_hashable);
        assert!(!config.use_custom_str);
        assert_eq!(config.float_precision, None);
    }

    #[test]
    fn test_from_options() {
        let config = MatchConfig::from_options([
            ("occurrence_gap", "non-negative"),
            ("element_gap", "non-negative"),
            ("ensure_hashable", "true"),
            ("use_custom_str", "false"),
            ("float_precision", "2"),
        ])
        .unwrap();

        assert_eq!(
            config,
            MatchConfig::new()
                .with_occurrence_gap(GapPolicy::NonNegative)
                .with_element_gap(GapPolicy::NonNegative)
                .with_ensure_hashable(true)
                .with_float_precision(Some(2))
        );
    }

    #[test]
    fn test_from_options_rejects_bad_values() {
        let err = MatchConfig::from_options([("element_gap", "backwards")]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidGap {
                option: "element_gap",
                value: "backwards".into()
            }
        );

        assert!(matches!(
            MatchConfig::from_options([("float_precision", "-1")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            MatchConfig::from_options([("ensure_hashable", "yes please")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            MatchConfig::from_options([("custom_objects", "true")]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_precision_none() {
        let config = MatchConfig::from_options([("float_precision", "none")]).unwrap();
        assert_eq!(config.float_precision, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_config() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"occurrence_gap":"non-negative","float_precision":3}"#)
                .unwrap();
        assert_eq!(config.occurrence_gap, GapPolicy::NonNegative);
        assert_eq!(config.element_gap, GapPolicy::Any);
        assert_eq!(config.float_precision, Some(3));

        assert!(serde_json::from_str::<MatchConfig>(r#"{"element_gap":"sideways"}"#).is_err());
        assert!(serde_json::from_str::<MatchConfig>(r#"{"unknown":true}"#).is_err());

        let json = serde_json::to_string(&GapPolicy::NonNegative).unwrap();
        assert_eq!(json, "\"non-negative\"");
    }
}
