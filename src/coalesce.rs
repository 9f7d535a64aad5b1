/// First non-null candidate wins; later candidates are never inspected.
pub fn coalesce<T>(candidates: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    candidates.into_iter().flatten().next()
}
