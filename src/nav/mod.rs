//! Navigation manifest URL rewriting.

use serde_yaml::{Mapping, Value};

pub const DEFAULT_BASE_URL: &str = "https://jupyterbook.org/stable";

const URL_KEY: &str = "url";

/// Prefix every site-relative `url` entry with `base_url`.
///
/// A mapping entry is rewritten when its key is `url` and its value is a
/// string starting with `/`. Everything else keeps its shape and order.
pub fn rewrite_urls(value: Value, base_url: &str) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| {
                    let value = match (&key, value) {
                        (Value::String(k), Value::String(v)) if k == URL_KEY && v.starts_with('/') => {
                            Value::String(format!("{}{}", base_url, v))
                        }
                        (_, value) => rewrite_urls(value, base_url),
                    };
                    (key, value)
                })
                .collect::<Mapping>(),
        ),
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| rewrite_urls(item, base_url))
                .collect(),
        ),
        Value::Tagged(mut tagged) => {
            tagged.value = rewrite_urls(tagged.value, base_url);
            Value::Tagged(tagged)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_rewrites_relative_url() {
        let out = rewrite_urls(yaml("url: /guide"), DEFAULT_BASE_URL);
        assert_eq!(out, yaml("url: https://jupyterbook.org/stable/guide"));
    }

    #[test]
    fn test_leaves_absolute_and_other_keys() {
        let input = yaml(
            r#"
title: /not-a-url-key
url: https://example.com/x
link: /also-untouched
"#,
        );
        assert_eq!(rewrite_urls(input.clone(), DEFAULT_BASE_URL), input);
    }

    #[test]
    fn test_rewrites_nested_sequences() {
        let input = yaml(
            r#"
nav:
  - title: Guide
    url: /guide
    children:
      - title: Install
        url: /guide/install
  - title: Blog
    url: https://blog.example.com
"#,
        );
        let expected = yaml(
            r#"
nav:
  - title: Guide
    url: https://jupyterbook.org/stable/guide
    children:
      - title: Install
        url: https://jupyterbook.org/stable/guide/install
  - title: Blog
    url: https://blog.example.com
"#,
        );
        assert_eq!(rewrite_urls(input, DEFAULT_BASE_URL), expected);
    }

    #[test]
    fn test_non_string_url_values_recurse() {
        let input = yaml("url:\n  url: /inner\n");
        let expected = yaml("url:\n  url: https://jupyterbook.org/stable/inner\n");
        assert_eq!(rewrite_urls(input, DEFAULT_BASE_URL), expected);
    }

    #[test]
    fn test_preserves_key_order() {
        let input = yaml("zeta: 1\nurl: /a\nalpha: 2\n");
        let out = rewrite_urls(input, "https://x");
        let keys: Vec<_> = out
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["zeta", "url", "alpha"]);
        assert_eq!(out["url"].as_str(), Some("https://x/a"));
    }

    #[test]
    fn test_second_pass_is_stable() {
        let once = rewrite_urls(yaml("url: /guide"), DEFAULT_BASE_URL);
        let twice = rewrite_urls(once.clone(), DEFAULT_BASE_URL);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(rewrite_urls(Value::Null, DEFAULT_BASE_URL), Value::Null);
        assert_eq!(
            rewrite_urls(Value::String("/x".into()), DEFAULT_BASE_URL),
            Value::String("/x".into())
        );
    }
}
