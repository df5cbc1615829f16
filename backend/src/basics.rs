//! Small helpers shipped with the template.

/// Add two integers, saturating at the `i64` bounds.
///
/// # Examples
/// ```
/// use starter::basics::add;
///
/// assert_eq!(add(2, 3), 5);
/// assert_eq!(add(-1, 1), 0);
/// ```
#[must_use]
pub const fn add(a: i64, b: i64) -> i64 {
    a.saturating_add(b)
}

/// Add two integers, returning `None` on overflow.
#[must_use]
pub const fn checked_add(a: i64, b: i64) -> Option<i64> {
    a.checked_add(b)
}

/// Build a greeting for `name`.
///
/// # Examples
/// ```
/// use starter::basics::greet;
///
/// assert_eq!(greet("Alice"), "Hello, Alice!");
/// ```
#[must_use]
pub fn greet(name: &str) -> String {
    format!("Hello, {name}!")
}

/// Greeting used when no name is supplied.
#[must_use]
pub fn greet_world() -> String {
    greet("World")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, 3, 5)]
    #[case(-1, 1, 0)]
    #[case(0, 0, 0)]
    #[case(i64::MAX, 1, i64::MAX)]
    fn add_sums_and_saturates(#[case] a: i64, #[case] b: i64, #[case] expected: i64) {
        assert_eq!(add(a, b), expected);
    }

    #[rstest]
    fn checked_add_reports_overflow() {
        assert_eq!(checked_add(2, 3), Some(5));
        assert_eq!(checked_add(i64::MAX, 1), None);
    }

    #[rstest]
    #[case("Alice", "Hello, Alice!")]
    #[case("开发者", "Hello, 开发者!")]
    #[case("", "Hello, !")]
    fn greet_formats_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(greet(name), expected);
    }

    #[rstest]
    fn greet_world_uses_default_name() {
        assert_eq!(greet_world(), "Hello, World!");
    }
}
