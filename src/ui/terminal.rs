use is_terminal::IsTerminal;

/// Environment variables set by common CI providers
const CI_MARKERS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE", "JENKINS_HOME"];

/// Locale variables in lookup order
const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];

/// What stdout can display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
}

impl TerminalCapabilities {
    /// Derive capabilities from an environment lookup and the TTY state
    fn probe(env: impl Fn(&str) -> Option<String>, is_tty: bool) -> Self {
        let dumb = env("TERM").is_some_and(|t| t.eq_ignore_ascii_case("dumb"));
        let no_color = env("NO_COLOR").is_some_and(|v| !v.is_empty());

        // the first locale variable that is set decides
        let locale = LOCALE_VARS.iter().find_map(|key| env(key));
        let ascii_locale = locale
            .map(|l| l.eq_ignore_ascii_case("c") || l.eq_ignore_ascii_case("posix"))
            .unwrap_or(false);

        Self {
            is_tty,
            supports_color: is_tty && !dumb && !no_color,
            supports_unicode: !dumb && !ascii_locale,
            is_ci: CI_MARKERS.iter().any(|key| env(key).is_some()),
        }
    }
}

pub fn detect_capabilities() -> TerminalCapabilities {
    TerminalCapabilities::probe(
        |key| std::env::var(key).ok(),
        std::io::stdout().is_terminal(),
    )
}
