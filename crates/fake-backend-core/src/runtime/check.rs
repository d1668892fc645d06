//! Runtime detection for the generated Node.js server

use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(binary: &str, display_name: &'static str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name: display_name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: display_name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", "npm")
}

/// Check if Yarn is available
pub fn check_yarn() -> RuntimeInfo {
    probe("yarn", "Yarn")
}

/// Check everything the generated server needs to run.
///
/// Always advisory: the scaffolded project is plain files, so a missing
/// runtime never blocks generation. Node.js is always reported; package
/// managers only when present.
pub fn check_server_runtimes() -> Vec<RuntimeInfo> {
    let mut results = vec![check_node()];

    for pm in [check_npm(), check_yarn()] {
        if pm.available {
            results.push(pm);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_reports_unavailable() {
        let info = probe("definitely-not-a-real-binary-name", "Nope");
        assert!(!info.available);
        assert!(info.version.is_none());
    }

    #[test]
    fn test_server_runtimes_always_report_node() {
        let results = check_server_runtimes();
        assert_eq!(results[0].name, "Node.js");
    }
}
