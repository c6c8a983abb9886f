//! Embed URL and `<iframe>` snippet construction.

/// Attribute list that keeps insertion order; setting an existing key replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.0.push((key.to_string(), value.to_string())),
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn merged(&self, overrides: &Attributes) -> Attributes {
        let mut merged = self.clone();
        for (k, v) in &overrides.0 {
            merged.set(k, v);
        }
        merged
    }

    fn to_query(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn to_html(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!(" {k}=\"{v}\""))
            .collect()
    }
}

/// Per-provider defaults applied before caller options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedDefaults {
    pub url_attributes: Attributes,
    pub iframe_attributes: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Prefix for the scheme-relative embed URL, e.g. `"https"`.
    pub url_scheme: Option<String>,
    pub url_attributes: Attributes,
    pub iframe_attributes: Attributes,
}

impl EmbedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_scheme(mut self, scheme: &str) -> Self {
        self.url_scheme = Some(scheme.to_string());
        self
    }

    pub fn url_attribute(mut self, key: &str, value: &str) -> Self {
        self.url_attributes.set(key, value);
        self
    }

    pub fn iframe_attribute(mut self, key: &str, value: &str) -> Self {
        self.iframe_attributes.set(key, value);
        self
    }
}

pub fn embed_code(embed_url: &str, defaults: &EmbedDefaults, options: &EmbedOptions) -> String {
    let url_attributes = defaults.url_attributes.merged(&options.url_attributes);
    let iframe_attributes = defaults.iframe_attributes.merged(&options.iframe_attributes);

    let mut src = match &options.url_scheme {
        Some(scheme) => format!("{scheme}:{embed_url}"),
        None => embed_url.to_string(),
    };
    if !url_attributes.is_empty() {
        src.push(if embed_url.contains('?') { '&' } else { '?' });
        src.push_str(&url_attributes.to_query());
    }

    format!(
        "<iframe src=\"{src}\" frameborder=\"0\"{}></iframe>",
        iframe_attributes.to_html()
    )
}
