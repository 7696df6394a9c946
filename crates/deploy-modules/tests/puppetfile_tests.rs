use std::path::PathBuf;

use deploy_modules::{Error, Puppetfile};
use deploy_test_utils::puppetfile::write_puppetfile;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

const CONTROL_PUPPETFILE: &str = "\
forge 'https://forge.example.com'

mod 'puppetlabs/stdlib', '4.25.1'
mod 'puppetlabs-concat'

mod 'apache',
  :git => 'https://example.com/puppet-apache.git',
  :tag => 'v2.1.0'
";

fn summary(puppetfile: &Puppetfile) -> Vec<(String, String, String)> {
    puppetfile
        .modules()
        .iter()
        .map(|m| (m.title().to_string(), m.name().to_string(), m.version()))
        .collect()
}

#[test]
fn test_load_declared_modules_in_order() {
    let temp = TempDir::new().unwrap();
    write_puppetfile(temp.path(), CONTROL_PUPPETFILE);

    let mut puppetfile = Puppetfile::new(temp.path(), None, None);
    puppetfile.load().unwrap();

    assert_eq!(
        summary(&puppetfile),
        vec![
            ("puppetlabs/stdlib".into(), "stdlib".into(), "4.25.1".into()),
            ("puppetlabs-concat".into(), "concat".into(), "latest".into()),
            ("apache".into(), "apache".into(), "v2.1.0".into()),
        ]
    );
    assert_eq!(puppetfile.forge(), Some("https://forge.example.com"));
    assert_eq!(puppetfile.moduledir(), temp.path().join("modules"));
}

#[test]
fn test_missing_puppetfile_loads_empty() {
    let temp = TempDir::new().unwrap();
    let mut puppetfile = Puppetfile::new(temp.path(), None, None);

    assert!(!puppetfile.exists());
    puppetfile.load().unwrap();
    assert!(puppetfile.modules().is_empty());
}

#[test]
fn test_relative_moduledir_declaration() {
    let temp = TempDir::new().unwrap();
    write_puppetfile(temp.path(), "moduledir 'thirdparty'\nmod 'puppetlabs/stdlib'\n");

    let mut puppetfile = Puppetfile::new(temp.path(), None, None);
    puppetfile.load().unwrap();

    assert_eq!(puppetfile.moduledir(), temp.path().join("thirdparty"));
}

#[test]
fn test_custom_puppetfile_path() {
    let temp = TempDir::new().unwrap();
    let alt = temp.path().join("config");
    write_puppetfile(&alt, "mod 'puppetlabs/stdlib'\n");

    let mut puppetfile = Puppetfile::new(
        temp.path(),
        Some(PathBuf::from("/opt/modules")),
        Some(PathBuf::from("config/Puppetfile")),
    );
    puppetfile.load().unwrap();

    assert_eq!(puppetfile.modules().len(), 1);
    assert_eq!(puppetfile.moduledir(), PathBuf::from("/opt/modules"));
}

#[test]
fn test_reload_replaces_modules() {
    let temp = TempDir::new().unwrap();
    write_puppetfile(temp.path(), "mod 'puppetlabs/stdlib'\nmod 'puppetlabs/concat'\n");
    let mut puppetfile = Puppetfile::new(temp.path(), None, None);
    puppetfile.load().unwrap();

    write_puppetfile(temp.path(), "mod 'puppetlabs/stdlib'\n");
    puppetfile.load().unwrap();

    assert_eq!(puppetfile.modules().len(), 1);
}

#[test]
fn test_unsupported_option_reports_line() {
    let temp = TempDir::new().unwrap();
    write_puppetfile(temp.path(), "mod 'puppetlabs/stdlib'\nmod 'x/y', :svn => 'https://svn'\n");

    let mut puppetfile = Puppetfile::new(temp.path(), None, None);
    let err = puppetfile.load().unwrap_err();

    match err {
        Error::ManifestParse { line, message, .. } => {
            assert_eq!(line, 2);
            assert!(message.contains(":svn"), "got: {message}");
        }
        other => panic!("expected ManifestParse, got {other:?}"),
    }
}

#[test]
fn test_forge_module_without_owner_rejected() {
    let temp = TempDir::new().unwrap();
    write_puppetfile(temp.path(), "mod 'stdlib'\n");

    let mut puppetfile = Puppetfile::new(temp.path(), None, None);

    assert!(matches!(puppetfile.load(), Err(Error::ManifestParse { line: 1, .. })));
}

#[rstest]
#[case("../x")]
#[case("a/../b")]
#[case("a/b/c")]
#[case("evil/../../../outside")]
fn test_module_title_with_path_components_rejected(#[case] title: &str) {
    let temp = TempDir::new().unwrap();
    write_puppetfile(
        temp.path(),
        &format!("mod 'apache', :git => 'https://example.com/apache.git'\nmod '{title}', :git => 'https://example.com/evil.git'\n"),
    );

    let mut puppetfile = Puppetfile::new(temp.path(), None, None);
    let err = puppetfile.load().unwrap_err();

    match err {
        Error::ManifestParse { line, message, .. } => {
            assert_eq!(line, 2);
            assert!(message.contains(title), "got: {message}");
        }
        other => panic!("expected ManifestParse, got {other:?}"),
    }
}

#[test]
fn test_forge_title_with_path_components_rejected() {
    let temp = TempDir::new().unwrap();
    write_puppetfile(temp.path(), "mod 'acme/../../pwn'\n");

    let mut puppetfile = Puppetfile::new(temp.path(), None, None);

    assert!(matches!(puppetfile.load(), Err(Error::ManifestParse { line: 1, .. })));
    assert!(puppetfile.modules().is_empty());
}
