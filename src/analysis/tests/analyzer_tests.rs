use super::{project, write};
use crate::analysis::{AnalysisError, Language, ProjectAnalyzer, ProjectType};
use crate::config::AnalysisConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_missing_root_is_an_error() {
    let result = ProjectAnalyzer::new("/nonexistent/path/for/analysis").analyze();
    assert!(matches!(result, Err(AnalysisError::UnreadableRoot { .. })));
}

#[test]
fn test_file_root_is_an_error() {
    let temp_dir = project(&[("app.py", "print(1)")]);
    let result = ProjectAnalyzer::new(temp_dir.path().join("app.py")).analyze();
    assert!(matches!(result, Err(AnalysisError::NotADirectory(_))));
}

#[test]
fn test_empty_project_is_unknown() {
    let temp_dir = TempDir::new().unwrap();
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    assert_eq!(profile.project_type, ProjectType::Unknown);
    assert_eq!(profile.primary_language, Language::Unknown);
    assert!(profile.files.is_empty());
    assert!(profile.build_requirements.tools.is_empty());
    assert!(profile.build_requirements.commands.is_empty());
}

#[test]
fn test_type_and_language_are_independent() {
    let temp_dir = project(&[
        ("package.json", r#"{"dependencies": {"express": "4"}}"#),
        ("scripts/seed.py", "print('seed')"),
    ]);
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    assert_eq!(profile.project_type, ProjectType::Nodejs);
    assert_eq!(profile.primary_language, Language::Python);
    assert_eq!(profile.build_requirements.commands, vec!["npm install"]);
}

#[test]
fn test_primary_language_is_first_known_file() {
    let temp_dir = project(&[
        ("a.go", "package main"),
        ("b/c.py", "print('c')"),
        ("Jakefile", "const task = require('jake').task;"),
    ]);
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    let known: Vec<Language> = profile
        .files
        .iter()
        .map(|file| file.language)
        .filter(|language| language.is_known())
        .collect();
    assert_eq!(known.len(), 3);
    assert_eq!(profile.primary_language, known[0]);
}

#[test]
fn test_hidden_entries_are_skipped() {
    let temp_dir = project(&[
        (".git/config", "url = git@host:1234/repo"),
        (".cache/tool.py", "port = 1"),
        (".eslintrc.js", "module.exports = {}"),
        ("src/main.go", "package main"),
    ]);
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    let paths: Vec<&Path> = profile.files.iter().map(|f| f.path.as_path()).collect();
    assert_eq!(paths, vec![Path::new("src/main.go")]);
    assert!(profile.ports.is_empty());
    assert_eq!(profile.primary_language, Language::Go);
}

#[test]
fn test_entry_points_are_source_files() {
    let temp_dir = project(&[
        ("README.md", "# demo"),
        ("app.rb", "puts 1"),
        ("tests/test_app.rb", "puts 2"),
        ("package.json", "{}"),
    ]);
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    let mut entry_points = profile.entry_points.clone();
    entry_points.sort();
    assert_eq!(
        entry_points,
        vec![PathBuf::from("app.rb"), PathBuf::from("tests/test_app.rb")]
    );
}

#[test]
fn test_ports_from_yaml_and_source() {
    let temp_dir = project(&[
        ("config/app.yml", "server:\n  port: 8080\n"),
        ("server.js", "const PORT = 3000;\napp.listen(PORT);"),
        ("notes.md", "port = 9999"),
    ]);
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    assert!(profile.ports.contains(&8080));
    assert!(profile.ports.contains(&3000));
    assert!(!profile.ports.contains(&9999));
}

#[test]
fn test_environment_from_root_env_files() {
    let temp_dir = project(&[
        (".env", "SECRET_KEY=abc=def\nDEBUG=true\n"),
        (".env.example", "DEBUG=false\n"),
    ]);
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    assert_eq!(profile.environment["SECRET_KEY"], "abc=def");
    assert_eq!(profile.environment["DEBUG"], "false");
}

#[test]
fn test_binary_files_classified_by_extension_only() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("blob"),
        [0x7f, b'E', b'L', b'F', 2, 1, 1, 0, 0, 0, 0, 0, b'f', b'n', b' '],
    )
    .unwrap();
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    assert_eq!(profile.files.len(), 1);
    assert_eq!(profile.files[0].language, Language::Unknown);
}

#[test]
fn test_undecodable_bytes_do_not_abort() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "requirements.txt", "django\n");
    fs::write(temp_dir.path().join("legacy.py"), b"# caf\xe9\nPORT = 8000\n").unwrap();
    let profile = ProjectAnalyzer::new(temp_dir.path()).analyze().unwrap();

    assert!(profile.ports.contains(&8000));
    assert!(profile.dependencies.contains("django"));
}

#[test]
fn test_exclude_and_size_limit() {
    let temp_dir = project(&[
        ("vendor/lib/util.js", "const port = 1111;"),
        ("big.conf", "listen\nport = 2222\n"),
        ("main.py", "port = 3333"),
    ]);
    let options = AnalysisConfig {
        max_file_bytes: 11,
        exclude: vec!["vendor/**".to_string()],
    };
    let profile = ProjectAnalyzer::with_options(temp_dir.path(), options)
        .analyze()
        .unwrap();

    assert!(profile.files.iter().all(|f| !f.path.starts_with("vendor")));
    // big.conf is over the limit and contributes no ports
    assert!(!profile.ports.contains(&2222));
    assert!(profile.ports.contains(&3333));
}
