//! Project version lookup from the host build's manifest.

use std::fs;
use std::path::Path;

use anyhow::Context;

pub const CARGO_MANIFEST: &str = "Cargo.toml";
pub const NPM_MANIFEST: &str = "package.json";

/// Version declared by the first manifest found in `root`.
///
/// `Cargo.toml` is checked before `package.json`. A package inheriting its
/// version from the workspace resolves to `workspace.package.version`.
pub fn detect_version(root: &Path) -> anyhow::Result<Option<String>> {
    let cargo = root.join(CARGO_MANIFEST);
    if cargo.is_file() {
        let raw = fs::read_to_string(&cargo)
            .with_context(|| format!("failed to read {}", cargo.display()))?;
        let version = cargo_version(&raw)
            .with_context(|| format!("failed to parse {}", cargo.display()))?;
        if version.is_some() {
            return Ok(version);
        }
    }

    let npm = root.join(NPM_MANIFEST);
    if npm.is_file() {
        let raw = fs::read_to_string(&npm)
            .with_context(|| format!("failed to read {}", npm.display()))?;
        return npm_version(&raw).with_context(|| format!("failed to parse {}", npm.display()));
    }

    Ok(None)
}

fn cargo_version(raw: &str) -> anyhow::Result<Option<String>> {
    let manifest: toml::Table = raw.parse()?;

    let workspace_version = || {
        manifest
            .get("workspace")
            .and_then(|workspace| workspace.get("package"))
            .and_then(|package| package.get("version"))
            .and_then(toml::Value::as_str)
            .map(str::to_string)
    };

    match manifest
        .get("package")
        .and_then(|package| package.get("version"))
    {
        Some(toml::Value::String(version)) => Ok(Some(version.clone())),
        Some(toml::Value::Table(inherit))
            if inherit.get("workspace").and_then(toml::Value::as_bool) == Some(true) =>
        {
            Ok(workspace_version())
        }
        Some(other) => anyhow::bail!("package.version has unexpected type {}", other.type_str()),
        None => Ok(workspace_version()),
    }
}

fn npm_version(raw: &str) -> anyhow::Result<Option<String>> {
    let manifest: serde_json::Value = serde_json::from_str(raw)?;
    Ok(manifest
        .get("version")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string))
}
