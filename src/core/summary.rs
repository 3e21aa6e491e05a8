pub const DEFAULT_SUMMARY_LIMIT: usize = 3;

/// "a, b, c, +2 more" style text for the first `limit` names.
pub fn items_summary<S: AsRef<str>>(names: &[S], limit: usize) -> String {
    items_summary_by(names, limit, |name| name.as_ref())
}

pub fn items_summary_by<T, F>(items: &[T], limit: usize, name: F) -> String
where
    F: Fn(&T) -> &str,
{
    let shown = items
        .iter()
        .take(limit)
        .map(|item| name(item))
        .collect::<Vec<_>>()
        .join(", ");
    let remaining = items.len().saturating_sub(limit);

    match (remaining, shown.is_empty()) {
        (0, _) => shown,
        (n, true) => format!("+{} more", n),
        (n, false) => format!("{}, +{} more", shown, n),
    }
}
