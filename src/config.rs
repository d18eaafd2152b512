//! Environment configuration.
//!
//! All keys share the `PRS_` prefix. Values are trimmed and empty values
//! count as missing.

use anyhow::Result;

pub const ENV_ORG: &str = "PRS_GITHUB_ORG";
pub const ENV_TEAM: &str = "PRS_GITHUB_TEAM";
pub const ENV_USERS: &str = "PRS_GITHUB_USERS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub github_org: Option<String>,
    pub github_team: Option<String>,
    pub github_users: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let github_users: Vec<String> = get(ENV_USERS)
            .map(|users| {
                users
                    .split(',')
                    .map(str::trim)
                    .filter(|login| !login.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            github_org: get(ENV_ORG),
            github_team: get(ENV_TEAM),
            github_users,
        }
    }

    /// The organisation to search, preferring an explicit override.
    pub fn resolve_org(&self, override_org: Option<&str>) -> Result<String> {
        match override_org.map(str::trim).filter(|org| !org.is_empty()) {
            Some(org) => Ok(org.to_string()),
            None => self
                .github_org
                .clone()
                .ok_or_else(|| anyhow::anyhow!("required key {} missing value", ENV_ORG)),
        }
    }

    /// The logins to search for. Explicit logins win over configured ones.
    pub fn resolve_logins(&self, explicit: &[String]) -> Vec<String> {
        if explicit.is_empty() {
            self.github_users.clone()
        } else {
            explicit.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_reads_all_keys() {
        let config = config_from(&[
            (ENV_ORG, "acme"),
            (ENV_TEAM, "platform"),
            (ENV_USERS, "dan, rich ,,alice"),
        ]);

        assert_eq!(config.github_org.as_deref(), Some("acme"));
        assert_eq!(config.github_team.as_deref(), Some("platform"));
        assert_eq!(config.github_users, vec!["dan", "rich", "alice"]);
    }

    #[test]
    fn test_blank_values_are_missing() {
        let config = config_from(&[(ENV_ORG, "   "), (ENV_USERS, "")]);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_org() {
        let config = config_from(&[(ENV_ORG, "acme")]);
        assert_eq!(config.resolve_org(None).unwrap(), "acme");
        assert_eq!(config.resolve_org(Some("other")).unwrap(), "other");
        assert_eq!(config.resolve_org(Some(" ")).unwrap(), "acme");

        let err = Config::default().resolve_org(None).unwrap_err();
        assert_eq!(err.to_string(), "required key PRS_GITHUB_ORG missing value");
    }

    #[test]
    fn test_resolve_logins() {
        let config = config_from(&[(ENV_USERS, "dan")]);
        assert_eq!(config.resolve_logins(&[]), vec!["dan"]);
        assert_eq!(
            config.resolve_logins(&["rich".to_string()]),
            vec!["rich"]
        );
    }
}
