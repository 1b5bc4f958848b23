//! Default property names for untagged fields

/// Prefix given to every derived property name.
pub const DEFAULT_NAMESPACE: &str = "og";

/// Convert a mixed or Pascal case identifier into lower snake case.
///
/// A delimiter is inserted before an uppercase letter only when it starts a
/// new word. A run of uppercase letters is one word (an acronym) and is only
/// split from a following word that continues in lowercase:
/// - `SiteName` -> `site_name`
/// - `ID` -> `id`
/// - `URLPath` -> `url_path`
///
/// Input that is already snake case comes back unchanged.
pub fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.push(c);
            continue;
        }

        let starts_word = match i.checked_sub(1).map(|p| chars[p]) {
            None | Some('_') => false,
            Some(prev) if prev.is_uppercase() => chars
                .get(i + 1)
                .is_some_and(|next| next.is_lowercase()),
            Some(_) => true,
        };
        if starts_word {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Property name used for a field that carries no explicit tag.
pub fn default_property_name(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    format!("{}:{}", DEFAULT_NAMESPACE, to_snake_case(ident))
}
