//! Late-binding attribute expressions
//!
//! Property values such as the filter profile name may reference work item
//! attributes using `${attribute.name}` syntax. References are resolved per
//! item at process time; a plain string resolves to itself.

use std::collections::HashMap;

use regex::Regex;

/// Resolve `${key}` references in `template` against `attributes`.
///
/// Missing attributes resolve to the empty string. A template without any
/// reference is returned unchanged.
pub fn resolve(template: &str, attributes: &HashMap<String, String>) -> String {
    if !template.contains("${") {
        return template.to_string();
    }

    // Attribute names may contain dots, e.g. `philter.context`.
    let reference = Regex::new(r"\$\{([A-Za-z0-9._-]+)\}").expect("valid expression regex");

    reference
        .replace_all(template, |caps: &regex::Captures<'_>| {
            attributes.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Whether a property value contains at least one attribute reference.
pub fn is_expression(template: &str) -> bool {
    template.contains("${")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_string_passes_through() {
        assert_eq!(resolve("default", &HashMap::new()), "default");
    }

    #[test]
    fn test_single_reference() {
        let attributes = attrs(&[("profile", "medical")]);
        assert_eq!(resolve("${profile}", &attributes), "medical");
    }

    #[test]
    fn test_dotted_attribute_name() {
        let attributes = attrs(&[("philter.profile", "hipaa")]);
        assert_eq!(resolve("${philter.profile}", &attributes), "hipaa");
    }

    #[test]
    fn test_missing_attribute_resolves_empty() {
        assert_eq!(resolve("${absent}", &HashMap::new()), "");
    }

    #[test]
    fn test_mixed_template() {
        let attributes = attrs(&[("env", "prod")]);
        assert_eq!(resolve("profile-${env}", &attributes), "profile-prod");
    }

    #[test]
    fn test_is_expression() {
        assert!(is_expression("${profile}"));
        assert!(!is_expression("text/plain"));
    }
}
