use crate::constants::header;
use indexmap::IndexMap;

/// Response headers in emission order.
pub type Headers = IndexMap<String, String>;

#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self::with_capacity(6)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts `name`, merging into the existing value when it is `Vary`.
    pub(crate) fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        if name.eq_ignore_ascii_case(header::VARY) {
            self.add_vary(value);
        } else {
            self.headers.insert(name, value.into());
        }
    }

    pub(crate) fn add_vary<S: Into<String>>(&mut self, value: S) {
        let incoming = value.into();
        let mut entries: Vec<String> = self
            .headers
            .get(header::VARY)
            .map(|existing| {
                existing
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        for part in incoming.split(',').map(str::trim) {
            if part.is_empty()
                || entries
                    .iter()
                    .any(|existing| existing.eq_ignore_ascii_case(part))
            {
                continue;
            }
            entries.push(part.to_string());
        }

        if entries.is_empty() {
            return;
        }

        self.headers
            .insert(header::VARY.to_string(), entries.join(", "));
    }

    pub(crate) fn extend(&mut self, other: HeaderCollection) {
        for (name, value) in other.headers {
            self.push(name, value);
        }
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
