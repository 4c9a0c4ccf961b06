use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Crates the pure layers must never depend on.
const IO_CRATES: &[&str] = &["tokio", "sqlx", "axum", "reqwest", "tower", "tower-http"];

/// (crate, forbidden dependencies)
fn layer_rules() -> Vec<(&'static str, Vec<&'static str>)> {
    let mut domain = vec!["regionmap-shared", "regionmap-engine", "regionmap-editor"];
    domain.extend_from_slice(IO_CRATES);
    let mut shared = vec!["regionmap-engine", "regionmap-editor"];
    shared.extend_from_slice(IO_CRATES);
    vec![
        ("regionmap-domain", domain),
        ("regionmap-shared", shared),
        ("regionmap-editor", vec!["regionmap-engine", "sqlx", "axum"]),
        ("regionmap-engine", vec!["regionmap-editor", "reqwest"]),
    ]
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    /// `null` for normal dependencies, `"dev"` or `"build"` otherwise
    kind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let mut violations = Vec::new();
    for (crate_name, forbidden) in layer_rules() {
        let Some(package) = metadata.packages.iter().find(|p| p.name == crate_name) else {
            violations.push(format!("{crate_name}: package not found in workspace"));
            continue;
        };
        for dep in package
            .dependencies
            .iter()
            .filter(|d| d.kind.as_deref() != Some("dev"))
        {
            if forbidden.contains(&dep.name.as_str()) {
                violations.push(format!("{crate_name} must not depend on {}", dep.name));
            }
        }
    }

    if let Some(domain) = metadata
        .packages
        .iter()
        .find(|p| p.name == "regionmap-domain")
    {
        let src = domain
            .manifest_path
            .parent()
            .map(|dir| dir.join("src"))
            .context("domain manifest has no parent directory")?;
        violations.extend(scan_for_io_imports(&src)?);
    }

    if violations.is_empty() {
        println!("arch-check: ok");
        return Ok(());
    }
    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} architecture violation(s)", violations.len())
}

/// Flag `use tokio::...` style imports in a pure crate, even behind a feature.
fn scan_for_io_imports(dir: &Path) -> anyhow::Result<Vec<String>> {
    let pattern = format!(r"\b(?:use\s+)?({})::", IO_CRATES.join("|").replace('-', "_"));
    let re = regex_lite::Regex::new(&pattern).context("building import pattern")?;

    let mut violations = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(path) = pending.pop() {
        for entry in std::fs::read_dir(&path).with_context(|| format!("reading {}", path.display()))? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            for (line_no, line) in source.lines().enumerate() {
                if let Some(found) = re.captures(line).and_then(|c| c.get(1)) {
                    violations.push(format!(
                        "{}:{} references {}",
                        path.display(),
                        line_no + 1,
                        found.as_str()
                    ));
                }
            }
        }
    }
    Ok(violations)
}
