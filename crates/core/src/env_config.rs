//! `FAUNA_*` settings read from the process environment.

use std::fmt::Display;
use std::str::FromStr;

const PREFIX: &str = "FAUNA_";

fn var_name(key: &str) -> String {
    format!("{PREFIX}{key}")
}

/// Trimmed value of `FAUNA_<key>`. Unset and blank both read as `None`.
pub fn fauna_var(key: &str) -> Option<String> {
    let value = std::env::var(var_name(key)).ok()?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Numeric `FAUNA_<key>` setting, clamped to at least `floor`.
///
/// Unset or blank gives `default`. A value that does not parse falls back to
/// `default` and one below `floor` is raised to it; both are logged.
pub fn fauna_setting<T>(key: &str, default: T, floor: T) -> T
where
    T: FromStr + Display + PartialOrd + Copy,
{
    let Some(raw) = fauna_var(key) else {
        return default;
    };
    let var = var_name(key);
    match raw.parse::<T>() {
        Ok(value) if value < floor => {
            tracing::warn!(var, value = %value, floor = %floor, "setting below minimum, clamping");
            floor
        },
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(var, value = %raw, default = %default, "invalid setting, using default");
            default
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a distinct key, so parallel test threads never touch the
    // same variable.
    fn set(key: &str, value: &str) {
        unsafe { std::env::set_var(var_name(key), value) };
    }

    fn unset(key: &str) {
        unsafe { std::env::remove_var(var_name(key)) };
    }

    #[test]
    fn var_is_prefixed_and_trimmed() {
        set("TEST_DB_PATH", "  /tmp/zoo.db ");
        assert_eq!(fauna_var("TEST_DB_PATH").as_deref(), Some("/tmp/zoo.db"));
        unset("TEST_DB_PATH");
        assert_eq!(fauna_var("TEST_DB_PATH"), None);
    }

    #[test]
    fn blank_var_is_none() {
        set("TEST_BLANK", "   ");
        assert_eq!(fauna_var("TEST_BLANK"), None);
        unset("TEST_BLANK");
    }

    #[test]
    fn setting_parses_value() {
        set("TEST_POOL_SIZE", " 4 ");
        assert_eq!(fauna_setting::<u32>("TEST_POOL_SIZE", 8, 1), 4);
        unset("TEST_POOL_SIZE");
    }

    #[test]
    fn setting_clamps_to_floor() {
        set("TEST_TIMEOUT_ZERO", "0");
        assert_eq!(fauna_setting::<u64>("TEST_TIMEOUT_ZERO", 10, 1), 1);
        unset("TEST_TIMEOUT_ZERO");
    }

    #[test]
    fn setting_falls_back_on_garbage() {
        set("TEST_TIMEOUT_GARBAGE", "ten");
        assert_eq!(fauna_setting::<u64>("TEST_TIMEOUT_GARBAGE", 10, 1), 10);
        unset("TEST_TIMEOUT_GARBAGE");
    }

    #[test]
    fn setting_missing_uses_default() {
        unset("TEST_MISSING");
        assert_eq!(fauna_setting::<u32>("TEST_MISSING", 8, 1), 8);
    }
}
