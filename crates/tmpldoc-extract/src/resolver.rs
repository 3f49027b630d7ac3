//! Fuzzy cross-referencing between parameters and environment variables
//!
//! The same logical setting is often spelled differently in the parameter
//! list and in a container's environment (`HTTPS_NAME` vs `EAP_HTTPS_NAME`,
//! `$JWS_ADMIN` vs `JWS_ADMIN`). Names are therefore matched loosely: equal
//! names match, and otherwise a name with its first character(s) stripped
//! only has to be contained in the other name.

use tmpldoc_core::{Catalog, EnvVar, Parameter};

use crate::row::PLACEHOLDER;

/// Field fetched from a matched candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Value,
    Description,
}

/// A record that can be looked up by name
pub trait Candidate {
    fn name(&self) -> &str;

    fn field(&self, field: Field) -> Option<String>;
}

impl Candidate for EnvVar {
    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Name => Some(self.name.clone()),
            // valueFrom references are never followed
            Field::Value => self.value.as_ref().map(ToString::to_string),
            Field::Description => None,
        }
    }
}

impl Candidate for Parameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Name => Some(self.name.clone()),
            Field::Value => self.value.as_ref().map(ToString::to_string),
            Field::Description => self.description.clone(),
        }
    }
}

/// Name matching strategy, parameterized by how many leading characters are stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatcher {
    strip: usize,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::stripping(1)
    }
}

impl NameMatcher {
    /// Match names after stripping `strip` leading characters from either side
    pub const fn stripping(strip: usize) -> Self {
        Self { strip }
    }

    pub fn strip(&self) -> usize {
        self.strip
    }

    /// Whether `candidate` refers to the same setting as `target`
    ///
    /// True when the names are equal, when `target` minus its stripped
    /// prefix occurs inside `candidate`, or when `candidate` minus its
    /// stripped prefix occurs inside `target`. A name no longer than the
    /// stripped prefix reduces to the empty string, which occurs everywhere.
    pub fn matches(&self, target: &str, candidate: &str) -> bool {
        target == candidate
            || candidate.contains(strip_chars(target, self.strip))
            || target.contains(strip_chars(candidate, self.strip))
    }
}

fn strip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// Looks up a field of the first candidate matching a name
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    catalog: &'a Catalog,
    matcher: NameMatcher,
}

impl<'a> FieldResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            matcher: NameMatcher::default(),
        }
    }

    pub fn with_matcher(mut self, matcher: NameMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// The first candidate whose name matches `target`
    pub fn find<'c, C, I>(&self, candidates: I, target: &str) -> Option<&'c C>
    where
        C: Candidate + 'c,
        I: IntoIterator<Item = &'c C>,
    {
        candidates
            .into_iter()
            .find(|c| self.matcher.matches(target, c.name()))
    }

    /// Resolve `field` for `target`
    ///
    /// Returns the field of the first matching candidate. When nothing
    /// matches, or the match does not carry the field, a `Value` lookup
    /// falls back to the catalog's parameter defaults. Anything else
    /// resolves to the placeholder.
    pub fn resolve<'c, C, I>(&self, candidates: I, target: &str, field: Field) -> String
    where
        C: Candidate + 'c,
        I: IntoIterator<Item = &'c C>,
    {
        if let Some(found) = self.find(candidates, target).and_then(|c| c.field(field)) {
            return found;
        }

        if field == Field::Value
            && let Some(default) = self.catalog.parameter_default(target)
        {
            return default.to_string();
        }

        PLACEHOLDER.to_string()
    }
}
