//! Named routes and their reversal into paths.

use blog_core::DomainError;
use blog_core::domain::POST_DETAIL_ROUTE;
use blog_core::ports::UrlResolver;

/// Path pattern of the public post page.
pub const POST_DETAIL_PATH: &str = "/blog/{slug}/";

/// Named path patterns with `{param}` placeholders.
#[derive(Debug, Clone)]
pub struct RouteTable {
    prefix: String,
    routes: Vec<(&'static str, &'static str)>,
}

impl RouteTable {
    /// Routes served by this application, resolved under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            routes: vec![(POST_DETAIL_ROUTE, POST_DETAIL_PATH)],
        }
    }
}

impl UrlResolver for RouteTable {
    fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, DomainError> {
        let (_, pattern) = self
            .routes
            .iter()
            .find(|(route, _)| *route == name)
            .ok_or_else(|| DomainError::NoReverseMatch(name.to_string()))?;

        let no_match = || DomainError::NoReverseMatch(format!("{name} with arguments {params:?}"));

        let mut path = self.prefix.clone();
        let mut rest = *pattern;
        while let Some(open) = rest.find('{') {
            let close = rest[open..].find('}').ok_or_else(no_match)? + open;
            let key = &rest[open + 1..close];
            let value = params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .filter(|v| !v.is_empty() && !v.contains('/'))
                .ok_or_else(no_match)?;

            path.push_str(&rest[..open]);
            path.push_str(value);
            rest = &rest[close + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }
}
