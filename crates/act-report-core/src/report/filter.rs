use super::ReportFragment;

/// A rule is implemented when its report records at least one assertion.
///
/// An empty `@graph` is not implemented.
pub fn is_implemented(fragment: &ReportFragment) -> bool {
    fragment.document().assertion_count() > 0
}
