//! Deployment config loading and environment construction

use std::fs;
use std::path::Path;

use deploy_core::{DeployConfig, Error, ProviderKind};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

const YAML: &str = "\
sources:
  control:
    remote: https://git.example.com/control.git
    basedir: /etc/puppetlabs/code/environments
    prefix: true
    provider: librarian
  hiera:
    remote: https://git.example.com/hiera.git
    basedir: /etc/puppetlabs/code/hieradata
";

const TOML: &str = r#"
[sources.control]
remote = "https://git.example.com/control.git"
basedir = "/etc/puppetlabs/code/environments"
prefix = true
provider = "librarian"

[sources.hiera]
remote = "https://git.example.com/hiera.git"
basedir = "/etc/puppetlabs/code/hieradata"
"#;

fn write_config(dir: &TempDir, file: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, content).unwrap();
    path
}

#[rstest]
#[case("deploy.yaml", YAML)]
#[case("deploy.toml", TOML)]
fn test_load_sources(#[case] file: &str, #[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let config = DeployConfig::load(&write_config(&dir, file, content)).unwrap();

    let control = config.source("control").unwrap();
    assert_eq!(control.remote, "https://git.example.com/control.git");
    assert!(control.prefix);
    assert_eq!(control.provider, ProviderKind::Librarian);

    let hiera = config.source("hiera").unwrap();
    assert!(!hiera.prefix);
    assert_eq!(hiera.provider, ProviderKind::Puppetfile);
}

#[test]
fn test_prefixed_source_environment() {
    let dir = TempDir::new().unwrap();
    let config = DeployConfig::load(&write_config(&dir, "deploy.yaml", YAML)).unwrap();

    let env = config.environment("control", "feature/x").unwrap();

    assert_eq!(env.dirname(), "control_feature_x");
    assert_eq!(env.source_name(), "control");
    assert_eq!(env.provider_kind(), ProviderKind::Librarian);
    assert_eq!(
        env.full_path(),
        Path::new("/etc/puppetlabs/code/environments/control_feature_x")
    );
}

#[test]
fn test_unprefixed_source_environment() {
    let dir = TempDir::new().unwrap();
    let config = DeployConfig::load(&write_config(&dir, "deploy.yaml", YAML)).unwrap();

    let env = config.environment("hiera", "production").unwrap();

    assert_eq!(env.dirname(), "production");
    assert_eq!(env.source_name(), "");
    assert_eq!(env.remote(), "https://git.example.com/hiera.git");
}

#[test]
fn test_unknown_source() {
    let config = DeployConfig::default();

    let result = config.environment("control", "production");

    assert!(matches!(result, Err(Error::UnknownSource { name }) if name == "control"));
}

#[test]
fn test_invalid_provider_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "deploy.yaml",
        "sources:\n  control:\n    remote: r\n    basedir: /tmp\n    provider: bundler\n",
    );

    let result = DeployConfig::load(&path);

    assert!(matches!(result, Err(Error::Fs(deploy_fs::Error::ConfigParse { .. }))));
}
