//! Helpers for pulling data out of provider HTML pages.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

lazy_static! {
    static ref META_SELECTOR: Selector = Selector::parse("meta").expect("valid selector");
}

/// The `<meta>` tags of a page, keyed by `property`, `name` or `itemprop`.
pub struct MetaTags {
    tags: Vec<(String, String)>,
}

impl MetaTags {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let tags = document
            .select(&META_SELECTOR)
            .filter_map(|node| {
                let el = node.value();
                let key = el
                    .attr("property")
                    .or_else(|| el.attr("name"))
                    .or_else(|| el.attr("itemprop"))?;
                let content = el.attr("content")?;
                Some((key.to_string(), content.to_string()))
            })
            .collect();
        MetaTags { tags }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }
}

/// Extracts the JSON object assigned to `variable` in an inline script,
/// e.g. `var ytInitialData = {...};`.
pub fn embedded_json(html: &str, variable: &str) -> Option<Value> {
    let pattern = Regex::new(&format!(r"{}\s*=\s*\{{", regex::escape(variable))).ok()?;
    let found = pattern.find(html)?;
    // start at the opening brace
    let rest = &html[found.end() - 1..];
    serde_json::Deserializer::from_str(rest)
        .into_iter::<Value>()
        .next()?
        .ok()
        .filter(Value::is_object)
}

/// Depth-first search for the first value stored under `key`.
pub fn find_first<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|v| find_first(v, key))),
        Value::Array(items) => items.iter().find_map(|v| find_first(v, key)),
        _ => None,
    }
}

/// Every value stored under `key`, in document order for arrays.
pub fn find_all<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect(value, key, &mut found);
    found
}

fn collect<'a>(value: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    found.push(v);
                } else {
                    collect(v, key, found);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect(v, key, found)),
        _ => {}
    }
}

/// YouTube renders text either as `simpleText` or as a list of `runs`.
pub fn text_of(value: &Value) -> Option<String> {
    if let Some(text) = value["simpleText"].as_str() {
        return Some(text.to_string());
    }
    let runs = value["runs"].as_array()?;
    let text: String = runs.iter().filter_map(|r| r["text"].as_str()).collect();
    Some(text)
}
