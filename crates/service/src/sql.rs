//! Small helpers shared by the sea-orm repositories.

/// `%value%` for a LIKE match, with the wildcards in `value` escaped so a
/// search for "50%" matches literally.
pub(crate) fn like_contains(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// "name second_name patronymic" of the `actor` table, skipping a null patronymic.
pub(crate) const ACTOR_FULL_NAME_LIKE: &str =
    r#"concat_ws(' ', "actor"."name", "actor"."second_name", "actor"."patronymic") LIKE $1"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_contains("Film"), "%Film%");
        assert_eq!(like_contains("50%_off"), r"%50\%\_off%");
        assert_eq!(like_contains(r"a\b"), r"%a\\b%");
        assert_eq!(like_contains(""), "%%");
    }
}
