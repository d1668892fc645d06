//! Configuration file utilities

/// Supported package managers in order of preference
const PACKAGE_MANAGERS: &[(&str, &str)] = &[("npm", "npm install"), ("yarn", "yarn install")];

/// Detect the available package manager and return its install command
pub fn detect_install_command() -> &'static str {
    for (binary, command) in PACKAGE_MANAGERS {
        if std::process::Command::new(binary)
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
        {
            return command;
        }
    }
    // Default to npm if nothing detected (will fail at runtime with helpful error)
    PACKAGE_MANAGERS[0].1
}
