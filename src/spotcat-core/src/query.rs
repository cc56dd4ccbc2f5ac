//! Generic field/value search queries and their translation into the
//! remote search grammar.

use serde::{Deserialize, Serialize};

/// Field carrying explicit URI candidates instead of search terms.
pub const URI_FIELD: &str = "uri";

/// Ordered mapping from field name to one or more values.
///
/// Field order is significant: translation emits tokens in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    fields: Vec<(String, Vec<String>)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends values to `field`, creating it at the end if it is new.
    pub fn with<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.push(field, values);
        self
    }

    pub fn push<I, V>(&mut self, field: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let field = field.into();
        let values = values.into_iter().map(Into::into);
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => existing.extend(values),
            None => self.fields.push((field, values.collect())),
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, values)| values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, values)| values.is_empty())
    }

    /// URI candidates given through the `uri` field.
    pub fn uris(&self) -> &[String] {
        self.get(URI_FIELD).unwrap_or(&[])
    }
}

impl<F, V> FromIterator<(F, V)> for SearchQuery
where
    F: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (F, V)>>(iter: T) -> Self {
        let mut query = Self::new();
        for (field, value) in iter {
            query.push(field, [value]);
        }
        query
    }
}

/// Remote grammar field name for a generic field; `None` drops the field.
fn remote_field(field: &str) -> Option<&str> {
    match field {
        // The remote grammar cannot tell album artists from track artists.
        "albumartist" => Some("artist"),
        "track_name" => Some("track"),
        "date" => Some("year"),
        "track_no" => None,
        other => Some(other),
    }
}

/// Leading year of a possibly partial date such as `1999-03-01` or `1999`.
fn leading_year(date: &str) -> Option<i32> {
    date.split('-').next()?.trim().parse().ok()
}

/// Renders `query` in the remote search grammar.
///
/// Returns an empty string when nothing searchable remains, in which case the
/// caller must not issue a remote request.
pub fn translate(query: &SearchQuery) -> String {
    let mut tokens = Vec::new();
    for (field, values) in query.iter() {
        let Some(field) = remote_field(field) else {
            continue;
        };
        for value in values {
            match field {
                "any" => tokens.push(value.clone()),
                "year" => match leading_year(value) {
                    Some(year) => tokens.push(format!("year:{year}")),
                    None => tracing::debug!(date = %value, "skipping unparseable date"),
                },
                _ => tokens.push(format!("{field}:\"{value}\"")),
            }
        }
    }
    tokens.join(" ")
}
