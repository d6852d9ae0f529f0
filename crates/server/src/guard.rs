//! Direct-access protection for configuration sources

use percent_encoding::percent_decode_str;
use std::path::Path;
use types::{CompanionError, Result};

/// Dotenv file read at startup; never served
const DOTENV_FILE: &str = ".env";

/// Rejects requests whose target is one of the protected resources.
///
/// Matching is by file name, so a configuration file is refused wherever it
/// sits under a served directory.
#[derive(Debug, Clone)]
pub struct DirectAccessGuard {
    protected: Vec<String>,
}

impl DirectAccessGuard {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut protected: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.is_empty())
            .collect();
        protected.sort();
        protected.dedup();
        Self { protected }
    }

    /// Protect the loaded configuration file and the dotenv file
    pub fn for_config_file(config_path: &Path) -> Self {
        let config_name = config_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new([config_name, DOTENV_FILE.to_string()])
    }

    pub fn protected(&self) -> &[String] {
        &self.protected
    }

    /// Whether a request path targets a protected resource.
    ///
    /// Any segment naming a protected file matches, so trailing `.` or `..`
    /// segments that the static file service would normalise away cannot
    /// hide the target. Trailing dots and spaces are ignored, as Windows
    /// file systems do.
    pub fn is_protected(&self, request_path: &str) -> bool {
        let decoded = percent_decode_str(request_path).decode_utf8_lossy();
        decoded
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .any(|segment| {
                self.protected
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(segment.trim_end_matches(['.', ' '])))
            })
    }

    pub fn check(&self, request_path: &str) -> Result<()> {
        if self.is_protected(request_path) {
            return Err(CompanionError::Forbidden {
                resource: request_path.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> DirectAccessGuard {
        DirectAccessGuard::for_config_file(Path::new("/etc/companionx/config.yaml"))
    }

    #[test]
    fn test_protected_names() {
        assert_eq!(guard().protected(), &[".env".to_string(), "config.yaml".to_string()]);
    }

    #[test]
    fn test_direct_requests_are_protected() {
        let guard = guard();
        assert!(guard.is_protected("/config.yaml"));
        assert!(guard.is_protected("/config/config.yaml"));
        assert!(guard.is_protected("/CONFIG.YAML"));
        assert!(guard.is_protected("/config%2Eyaml"));
        assert!(guard.is_protected("/static/..%2Fconfig.yaml"));
        assert!(guard.is_protected("/config.yaml/"));
        assert!(guard.is_protected("/.env"));
    }

    #[test]
    fn test_dot_segments_do_not_hide_target() {
        let guard = guard();
        assert!(guard.is_protected("/config.yaml/."));
        assert!(guard.is_protected("/config.yaml/%2E"));
        assert!(guard.is_protected("/config.yaml/./"));
        assert!(guard.is_protected("/config.yaml/.."));
        assert!(guard.is_protected("/.env/."));
        assert!(guard.is_protected("/static/./config.yaml"));
        assert!(guard.is_protected("/config.yaml."));
    }

    #[test]
    fn test_other_requests_pass() {
        let guard = guard();
        assert!(!guard.is_protected("/"));
        assert!(!guard.is_protected("/healthz"));
        assert!(!guard.is_protected("/config.yaml.bak"));
        assert!(!guard.is_protected("/consultants_near_me"));
        assert!(guard.check("/status").is_ok());
    }

    #[test]
    fn test_check_reports_forbidden() {
        let err = guard().check("/config.yaml").unwrap_err();
        assert!(matches!(err, CompanionError::Forbidden { .. }));
    }
}
