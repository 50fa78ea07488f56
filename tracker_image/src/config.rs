//! Resolves the image build configuration from the environment.
//!
//! Each value is taken from its environment variable when that variable is set to a non-empty
//! value, and falls back to a fixed default otherwise. Values are not validated and are passed to
//! the build tool verbatim.

use std::ffi::{OsStr, OsString};

use log::debug;

pub const USER_UID_VAR: &str = "TORRUST_TRACKER_USER_UID";
pub const DEFAULT_USER_UID: &str = "1000";
/// Name of the build-time variable in the Containerfile that receives the user id.
pub const USER_UID_BUILD_ARG: &str = "UID";

pub const RUN_AS_USER_VAR: &str = "TORRUST_TRACKER_RUN_AS_USER";
pub const DEFAULT_RUN_AS_USER: &str = "appuser";
/// Name of the build-time variable in the Containerfile that receives the username.
pub const RUN_AS_USER_BUILD_ARG: &str = "RUN_AS_USER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub user_uid: OsString,
    pub run_as_user: OsString,
}

impl BuildConfig {
    /// Resolves the configuration through `lookup`, which maps a variable name to its value if the
    /// variable is set.
    pub fn resolve<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        Self {
            user_uid: resolve_var(&mut lookup, USER_UID_VAR, DEFAULT_USER_UID),
            run_as_user: resolve_var(&mut lookup, RUN_AS_USER_VAR, DEFAULT_RUN_AS_USER),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var_os(name))
    }

    pub fn build_args(&self) -> [(&'static str, &OsStr); 2] {
        [
            (USER_UID_BUILD_ARG, self.user_uid.as_os_str()),
            (RUN_AS_USER_BUILD_ARG, self.run_as_user.as_os_str()),
        ]
    }
}

fn resolve_var<F>(lookup: &mut F, name: &str, default: &str) -> OsString
where
    F: FnMut(&str) -> Option<OsString>,
{
    match lookup(name).filter(|value| !value.is_empty()) {
        Some(value) => {
            debug!("{name} set to {value:?}");
            value
        }
        None => {
            debug!("{name} not set, defaulting to {default:?}");
            default.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve(vars: &[(&str, &str)]) -> BuildConfig {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        BuildConfig::resolve(|name| vars.get(name).map(OsString::from))
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[]);
        assert_eq!(config.user_uid, "1000");
        assert_eq!(config.run_as_user, "appuser");
    }

    #[test]
    fn test_user_uid_override() {
        let config = resolve(&[(USER_UID_VAR, "2000")]);
        assert_eq!(config.user_uid, "2000");
        assert_eq!(config.run_as_user, "appuser");
    }

    #[test]
    fn test_run_as_user_override() {
        let config = resolve(&[(RUN_AS_USER_VAR, "svc")]);
        assert_eq!(config.user_uid, "1000");
        assert_eq!(config.run_as_user, "svc");
    }

    #[test]
    fn test_empty_override_falls_back_to_default() {
        let config = resolve(&[(USER_UID_VAR, ""), (RUN_AS_USER_VAR, "")]);
        assert_eq!(config, resolve(&[]));
    }

    #[test]
    fn test_override_is_not_validated() {
        let config = resolve(&[(USER_UID_VAR, "not a number"), (RUN_AS_USER_VAR, " ")]);
        assert_eq!(config.user_uid, "not a number");
        assert_eq!(config.run_as_user, " ");
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        let config = resolve(&[("UID", "0"), ("RUN_AS_USER", "root")]);
        assert_eq!(config, resolve(&[]));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let vars = [(USER_UID_VAR, "2000"), (RUN_AS_USER_VAR, "svc")];
        assert_eq!(resolve(&vars), resolve(&vars));
    }

    #[test]
    fn test_each_variable_is_looked_up_once() {
        let mut lookups = Vec::new();
        BuildConfig::resolve(|name| {
            lookups.push(name.to_owned());
            None
        });
        assert_eq!(lookups, [USER_UID_VAR, RUN_AS_USER_VAR]);
    }

    #[test]
    fn test_build_args() {
        let config = resolve(&[(RUN_AS_USER_VAR, "svc")]);
        assert_eq!(
            config.build_args(),
            [
                (USER_UID_BUILD_ARG, OsStr::new("1000")),
                (RUN_AS_USER_BUILD_ARG, OsStr::new("svc")),
            ]
        );
    }
}
