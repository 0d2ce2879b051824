use crate::{Map, TypedAccessor, Value};

/// Label given to accessors over the process environment.
pub const ENV_LABEL: &str = "env";

/// Snapshots the process environment as a flat mapping of strings.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub fn env_map() -> Map {
    let map: Map = std::env::vars_os()
        .filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            let value = value.into_string().ok()?;
            Some((key, Value::String(value)))
        })
        .collect();
    tracing::debug!(count = map.len(), "captured environment snapshot");
    map
}

impl TypedAccessor<'static> {
    /// Creates an accessor over a snapshot of the process environment,
    /// labeled [`ENV_LABEL`].
    ///
    /// ```
    /// use dragon_access::TypedAccessor;
    ///
    /// let env = TypedAccessor::from_env();
    /// let workers = env.get_number_or("APP_WORKERS", 4)?;
    /// assert!(workers >= 0.0);
    /// # Ok::<(), dragon_access::AccessError>(())
    /// ```
    pub fn from_env() -> Self {
        TypedAccessor::from_owned_map(ENV_LABEL, env_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_sees_process_variables() {
        std::env::set_var("DRAGON_ACCESS_TEST_FROM_ENV", "17");
        let env = TypedAccessor::from_env();

        assert_eq!(env.label(), ENV_LABEL);
        assert_eq!(env.get_number("DRAGON_ACCESS_TEST_FROM_ENV").unwrap(), 17.0);
        let err = env.get_string("DRAGON_ACCESS_TEST_SURELY_UNSET").unwrap_err();
        assert_eq!(err.label(), "env");
    }

    #[test]
    fn test_env_map_holds_strings() {
        std::env::set_var("DRAGON_ACCESS_TEST_ENV_MAP", "true");
        let map = env_map();
        assert_eq!(map.get("DRAGON_ACCESS_TEST_ENV_MAP"), Some(&Value::from("true")));
    }
}
