//! Search request URL decomposition.
//!
//! Splits a Bundle request URL into its path and an insertion-ordered,
//! multi-valued map of query parameters. Parameter names and values are
//! percent-decoded; repeated parameters keep every value in order.

use url::{Url, form_urlencoded};

/// Returns the base name of a search parameter, i.e. the name with any
/// `:modifier` suffix removed.
///
/// ```
/// use helios_search_gate::query::base_name;
///
/// assert_eq!(base_name("code:text"), "code");
/// assert_eq!(base_name("date"), "date");
/// ```
pub fn base_name(name: &str) -> &str {
    name.split_once(':').map_or(name, |(base, _)| base)
}

/// Query parameters of a request, grouped by name in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an (undecoded) query string without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            params.append(name.into_owned(), value.into_owned());
        }
        params
    }

    /// Appends a value to the named parameter.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.params.push((name, vec![value])),
        }
    }

    /// Returns all values of the named parameter.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the distinct parameter names, modifiers included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(n, _)| n.as_str())
    }

    /// Returns each parameter name with all of its values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params
            .iter()
            .map(|(n, values)| (n.as_str(), values.as_slice()))
    }

    /// Returns one `(name, value)` pair per value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .flat_map(|(n, values)| values.iter().map(move |v| (n.as_str(), v.as_str())))
    }

    /// Returns the number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A Bundle request URL split into path and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// The path component, undecoded.
    pub path: String,
    /// The decoded query parameters.
    pub params: QueryParams,
}

impl ParsedRequest {
    /// Decomposes a request URL.
    ///
    /// Relative URLs such as `Condition?_summary=count` yield the path
    /// `Condition`. Absolute URLs yield their full path including the leading
    /// `/`, so `http://host/fhir/Condition` has the path `/fhir/Condition`.
    /// Fragments are ignored.
    pub fn parse(url: &str) -> Self {
        if let Ok(absolute) = Url::parse(url) {
            return Self {
                path: absolute.path().to_string(),
                params: absolute.query().map(QueryParams::parse).unwrap_or_default(),
            };
        }

        let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };

        Self {
            path: path.to_string(),
            params: query.map(QueryParams::parse).unwrap_or_default(),
        }
    }

    /// Returns true if this request is the capability statement probe.
    pub fn is_metadata(&self) -> bool {
        self.path == crate::catalog::METADATA_PATH
    }
}
