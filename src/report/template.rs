//! `{{placeholder}}` substitution in user-supplied report templates.

use std::collections::BTreeMap;

/// Substitute every known `{{key}}` occurrence with its rendered value.
///
/// Unknown keys are left in place so a typo in a template shows up verbatim in
/// the report instead of silently disappearing. [`unresolved_keys`] lists them
/// for a pre-render warning.
pub fn substitute(template: &str, placeholders: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match placeholders.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated opener: keep the remainder verbatim.
                out.push_str("{{");
                rest = after;
                break;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Placeholder keys referenced by the template but absent from the map.
pub fn unresolved_keys<'a>(
    template: &'a str,
    placeholders: &BTreeMap<String, String>,
) -> Vec<&'a str> {
    let mut missing = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else { break };
        let key = &after[..end];
        if !placeholders.contains_key(key) && !missing.contains(&key) {
            missing.push(key);
        }
        rest = &after[end + 2..];
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_known_keys() {
        let m = map(&[("Run A:val:Max force", "1.25 kN")]);
        let out = substitute("<td>{{Run A:val:Max force}}</td>", &m);
        assert_eq!(out, "<td>1.25 kN</td>");
    }

    #[test]
    fn substitutes_repeated_occurrences() {
        let m = map(&[("a", "X")]);
        assert_eq!(substitute("{{a}} and {{a}}", &m), "X and X");
    }

    #[test]
    fn unknown_keys_are_left_intact() {
        let m = map(&[("a", "X")]);
        assert_eq!(substitute("{{a}} {{typo}}", &m), "X {{typo}}");
    }

    #[test]
    fn unterminated_opener_is_kept_verbatim() {
        let m = map(&[("a", "X")]);
        assert_eq!(substitute("{{a}} tail {{broken", &m), "X tail {{broken");
    }

    #[test]
    fn reports_unresolved_keys_once() {
        let m = map(&[("a", "X")]);
        let missing = unresolved_keys("{{a}} {{b}} {{b}} {{c}}", &m);
        assert_eq!(missing, vec!["b", "c"]);
    }

    #[test]
    fn plain_text_passes_through() {
        let m = map(&[]);
        assert_eq!(substitute("no placeholders here", &m), "no placeholders here");
    }
}
