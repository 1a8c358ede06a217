use crate::error::ReportError;
use std::collections::BTreeMap;

/// Dropdown label meaning "do not filter on this column".
pub const ALL_SENTINEL: &str = "(All)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    All,
    Eq(String),
}

impl FilterValue {
    /// `None`, blank input and [`ALL_SENTINEL`] all mean no filter.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection.map(str::trim) {
            None | Some("") | Some(ALL_SENTINEL) => FilterValue::All,
            Some(value) => FilterValue::Eq(value.to_string()),
        }
    }
}

/// The filter selections for one report run, keyed by filter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    entries: BTreeMap<String, FilterValue>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, selection: Option<&str>) -> Self {
        self.set(key, selection);
        self
    }

    pub fn set(&mut self, key: &str, selection: Option<&str>) {
        self.entries
            .insert(key.trim().to_string(), FilterValue::from_selection(selection));
    }

    /// Builds a spec from `key=value` arguments.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spec = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                ReportError::invalid_filter(pair, "expected KEY=VALUE")
            })?;
            if key.trim().is_empty() {
                return Err(ReportError::invalid_filter(pair, "empty filter name"));
            }
            spec.set(key, Some(value));
        }
        Ok(spec)
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.get(key)
    }

    /// Every key the caller mentioned, including "no filter" entries.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys carrying an actual value, sentinel entries skipped.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(key, value)| match value {
            FilterValue::Eq(v) => Some((key.as_str(), v.as_str())),
            FilterValue::All => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}
