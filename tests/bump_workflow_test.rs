// tests/bump_workflow_test.rs
use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use tpie_release::cli::bump::{run_version_bump, BumpOptions};
use tpie_release::config::Config;
use tpie_release::domain::{Manifest, VersionToken};
use tpie_release::ui::FixedVersion;
use tpie_release::{ReleaseError, ValidationError};

const CSPROJ: &str = r#"<Project Sdk="Dalamud.NET.Sdk/12.0.2">
  <PropertyGroup>
    <Authors>k8thekat</Authors>
    <Version>1.2.0.0</Version>
    <AssemblyVersion>1.2.0.0</AssemblyVersion>
    <FileVersion>1.2.0.0</FileVersion>
    <InformationalVersion>1.2.0.0</InformationalVersion>
  </PropertyGroup>
</Project>
"#;

const MANIFEST: &str = r#"[
    {
        "Author": "k8thekat",
        "Name": "TPie-Plus",
        "Punchline": "Ring menus.",
        "Description": "Customizable ring menus for actions, items and macros.",
        "Changelog": "",
        "IsHide": "False",
        "InternalName": "TPie-Plus",
        "AssemblyVersion": "1.1.0.0",
        "TestingAssemblyVersion": "1.1.0.0",
        "ApplicableVersion": "1.1.0.0",
        "DalamudApiLevel": 12,
        "DownloadCount": 42,
        "LastUpdate": 1700000000,
        "DownloadLinkInstall": "https://github.com/k8thekat/TPie-Plus/releases/download/1.1.0.0/latest.zip",
        "DownloadLinkUpdate": "https://github.com/k8thekat/TPie-Plus/releases/download/1.1.0.0/latest.zip",
        "Tags": [
            "ring",
            "hotbar"
        ],
        "IconUrl": "https://raw.githubusercontent.com/k8thekat/TPie-Plus/main/icon.png"
    }
]"#;

struct Fixture {
    _dir: TempDir,
    config: Config,
}

fn fixture(csproj: &str, manifest: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.paths.descriptor = dir.path().join("TPie-Plus.csproj");
    config.paths.manifest = dir.path().join("pluginmaster.json");
    config.paths.changelog = dir.path().join("CHANGELOG.md");
    fs::write(&config.paths.descriptor, csproj).unwrap();
    fs::write(&config.paths.manifest, manifest).unwrap();
    Fixture { _dir: dir, config }
}

fn options() -> BumpOptions {
    BumpOptions {
        dry_run: false,
        timestamp: 1760000000,
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_bump_rewrites_descriptor_and_manifest() {
    let fx = fixture(CSPROJ, MANIFEST);
    let prompt = FixedVersion("1.3.0.0".to_string());

    let outcome = run_version_bump(&fx.config, &prompt, &options()).unwrap();
    assert_eq!(outcome.previous, "1.2.0.0");
    assert_eq!(outcome.version, "1.3.0.0");
    assert!(outcome.written);

    let csproj = read(&fx.config.paths.descriptor);
    assert_eq!(csproj, CSPROJ.replace("1.2.0.0", "1.3.0.0"));
    for token in VersionToken::DESCRIPTOR_FIELDS {
        assert_eq!(token.extract(&csproj), Some("1.3.0.0"));
    }

    let manifest = Manifest::parse(&read(&fx.config.paths.manifest)).unwrap();
    let record = manifest.record();
    assert_eq!(record.assembly_version(), "1.3.0.0");
    assert_eq!(record.str_field("ApplicableVersion"), Some("1.3.0.0"));
    assert_eq!(record.str_field("TestingAssemblyVersion"), Some("1.3.0.0"));
    assert_eq!(record.get("LastUpdate"), Some(&json!(1760000000)));
    assert_eq!(
        record.str_field("DownloadLinkInstall"),
        Some("https://github.com/k8thekat/TPie-Plus/releases/download/1.3.0.0/latest.zip")
    );
    assert_eq!(
        record.get("DownloadLinkUpdate"),
        record.get("DownloadLinkInstall")
    );
    assert_eq!(record.get("DownloadCount"), Some(&json!(42)));
    assert_eq!(record.get("Tags"), Some(&json!(["ring", "hotbar"])));
}

#[test]
fn test_bump_accepts_loosely_typed_manifest() {
    let manifest = r#"[
    {
        "Name": "TPie-Plus",
        "RepoUrl": "https://github.com/k8thekat/TPie-Plus",
        "Changelog": null,
        "IsHide": false,
        "AssemblyVersion": "1.1.0.0",
        "LastUpdate": "1700000000",
        "Tags": null
    }
]"#;
    let fx = fixture(CSPROJ, manifest);
    let prompt = FixedVersion("1.3.0.0".to_string());

    let outcome = run_version_bump(&fx.config, &prompt, &options()).unwrap();
    assert!(outcome.written);

    let written = read(&fx.config.paths.manifest);
    assert!(written.starts_with(
        "[\n    {\n        \"Name\": \"TPie-Plus\",\n        \"RepoUrl\": \"https://github.com/k8thekat/TPie-Plus\",\n        \"Changelog\": null,"
    ));
    assert!(written.contains("\"LastUpdate\": 1760000000"));
    assert!(written.contains("\"Tags\": null"));
    assert!(!written.contains("IconUrl"));
}

#[test]
fn test_bump_keeps_manifest_layout() {
    let fx = fixture(CSPROJ, MANIFEST);
    let prompt = FixedVersion("1.3.0.0".to_string());
    run_version_bump(&fx.config, &prompt, &options()).unwrap();

    let expected = MANIFEST
        .replace("1.1.0.0", "1.3.0.0")
        .replace("1700000000", "1760000000");
    assert_eq!(read(&fx.config.paths.manifest), expected);
}

#[test]
fn test_empty_version_writes_nothing() {
    let fx = fixture(CSPROJ, MANIFEST);
    let prompt = FixedVersion("   ".to_string());

    let err = run_version_bump(&fx.config, &prompt, &options()).unwrap_err();
    assert!(matches!(
        err,
        ReleaseError::Validation(ValidationError::EmptyVersion)
    ));
    assert_eq!(read(&fx.config.paths.descriptor), CSPROJ);
    assert_eq!(read(&fx.config.paths.manifest), MANIFEST);
}

#[test]
fn test_manifest_unchanged_writes_nothing() {
    let fx = fixture(CSPROJ, MANIFEST);
    let prompt = FixedVersion("1.1.0.0".to_string());

    let err = run_version_bump(&fx.config, &prompt, &options()).unwrap_err();
    match err.as_validation() {
        Some(ValidationError::ManifestUnchanged { current, new }) => {
            assert_eq!(current, "1.1.0.0");
            assert_eq!(new, "1.1.0.0");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(read(&fx.config.paths.descriptor), CSPROJ);
    assert_eq!(read(&fx.config.paths.manifest), MANIFEST);
}

#[test]
fn test_descriptor_unchanged_writes_nothing() {
    let fx = fixture(CSPROJ, MANIFEST);
    let prompt = FixedVersion("1.2.0.0".to_string());

    let err = run_version_bump(&fx.config, &prompt, &options()).unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::DescriptorUnchanged { .. })
    ));
    assert_eq!(read(&fx.config.paths.descriptor), CSPROJ);
    assert_eq!(read(&fx.config.paths.manifest), MANIFEST);
}

#[test]
fn test_missing_manifest_is_fatal_before_prompt() {
    let fx = fixture(CSPROJ, MANIFEST);
    fs::remove_file(&fx.config.paths.manifest).unwrap();
    let prompt = FixedVersion("1.3.0.0".to_string());

    match run_version_bump(&fx.config, &prompt, &options()).unwrap_err() {
        ReleaseError::MissingFile { path } => assert_eq!(path, fx.config.paths.manifest),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(read(&fx.config.paths.descriptor), CSPROJ);
}

#[test]
fn test_dry_run_writes_nothing() {
    let fx = fixture(CSPROJ, MANIFEST);
    let prompt = FixedVersion("1.3.0.0".to_string());
    let options = BumpOptions {
        dry_run: true,
        timestamp: 1760000000,
    };

    let outcome = run_version_bump(&fx.config, &prompt, &options).unwrap();
    assert!(!outcome.written);
    assert_eq!(read(&fx.config.paths.descriptor), CSPROJ);
    assert_eq!(read(&fx.config.paths.manifest), MANIFEST);
}

#[test]
fn test_descriptor_without_version_fields() {
    let fx = fixture("<Project />\n", MANIFEST);
    let prompt = FixedVersion("1.3.0.0".to_string());

    let err = run_version_bump(&fx.config, &prompt, &options()).unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::NoVersionField { .. })
    ));
}
