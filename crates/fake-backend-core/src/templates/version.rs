//! Version comparison for CLI and template compatibility

use semver::Version;

/// Compare the CLI version against the version a template was built for.
/// Returns an advisory warning when the CLI is older than the template
/// expects; unparseable versions never warn.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = Version::parse(cli_version).ok()?;
    let template_ver = Version::parse(template_version).ok()?;

    if cli_ver < template_ver {
        Some(format!(
            "This template expects CLI version {} or newer, you are running {}.\n\
             Consider updating: {}",
            template_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install fake-backend-tools --force";

    #[test]
    fn test_older_cli_warns() {
        let warning = check_compatibility("0.1.0", "0.2.0", UPGRADE);
        let warning = warning.unwrap();
        assert!(warning.contains("0.2.0"));
        assert!(warning.contains(UPGRADE));
    }

    #[test]
    fn test_equal_versions_do_not_warn() {
        assert!(check_compatibility("0.1.0", "0.1.0", UPGRADE).is_none());
    }

    #[test]
    fn test_newer_cli_does_not_warn() {
        assert!(check_compatibility("0.2.0", "0.1.0", UPGRADE).is_none());
    }

    #[test]
    fn test_unparseable_versions_never_warn() {
        assert!(check_compatibility("not-a-version", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("0.1.0", "latest", UPGRADE).is_none());
    }
}
