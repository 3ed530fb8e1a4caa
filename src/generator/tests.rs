use super::*;
use crate::analysis::{BuildRequirements, FileRecord, Language, ProjectType};
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

fn profile(project_type: ProjectType, files: &[&str], deps: &[&str]) -> ProjectProfile {
    ProjectProfile {
        primary_language: Language::Unknown,
        project_type,
        dependencies: deps.iter().map(|d| d.to_string()).collect(),
        entry_points: Vec::new(),
        ports: BTreeSet::new(),
        environment: BTreeMap::new(),
        build_requirements: BuildRequirements::default(),
        files: files
            .iter()
            .map(|path| FileRecord {
                path: PathBuf::from(path),
                language: Language::Unknown,
                dependencies: Vec::new(),
            })
            .collect(),
    }
}

fn content(artifacts: &[Artifact], kind: ArtifactKind) -> &str {
    &artifacts.iter().find(|a| a.kind == kind).unwrap().content
}

#[test]
fn test_framework_rule_order() {
    let py = |deps: &[&str]| Framework::detect(&profile(ProjectType::Python, &["requirements.txt"], deps));
    assert_eq!(py(&["Django==4.2"]), Framework::Django);
    assert_eq!(py(&["flask", "fastapi"]), Framework::Flask);
    assert_eq!(py(&["fastapi", "uvicorn"]), Framework::FastApi);
    assert_eq!(py(&["requests"]), Framework::Unknown);

    let js = |deps: &[&str]| Framework::detect(&profile(ProjectType::Nodejs, &["package.json"], deps));
    assert_eq!(js(&["next", "react"]), Framework::NextJs);
    assert_eq!(js(&["react", "react-dom"]), Framework::React);
    assert_eq!(js(&["vue"]), Framework::Vue);
    assert_eq!(js(&["express"]), Framework::Express);
}

#[test]
fn test_framework_needs_root_marker() {
    let nested = profile(ProjectType::Unknown, &["api/requirements.txt"], &["flask"]);
    assert_eq!(Framework::detect(&nested), Framework::Unknown);

    // falls through to the node rules when no python rule matches
    let mixed = profile(
        ProjectType::Nodejs,
        &["package.json", "requirements.txt"],
        &["requests", "express"],
    );
    assert_eq!(Framework::detect(&mixed), Framework::Express);
}

#[test]
fn test_artifact_order_and_names() {
    let artifacts = ArtifactGenerator::new().generate(
        &profile(ProjectType::Unknown, &[], &[]),
        &GenerationConfig::default(),
    );
    let names: Vec<&str> = artifacts.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Dockerfile", "docker-compose.yml", ".dockerignore"]);
}

#[test]
fn test_unknown_project_dockerfile() {
    let artifacts = ArtifactGenerator::new().generate(
        &profile(ProjectType::Unknown, &["README.md"], &[]),
        &GenerationConfig::default(),
    );

    assert_eq!(
        content(&artifacts, ArtifactKind::Dockerfile),
        r#"FROM ubuntu:latest
WORKDIR /app

COPY . .

ENV HOST=0.0.0.0
ENV PORT=5000
EXPOSE 5000

CMD ["echo", "Please customize this Dockerfile for your project"]
"#
    );
    let expected: String = BASELINE_IGNORE.iter().map(|p| format!("{}\n", p)).collect();
    assert_eq!(content(&artifacts, ArtifactKind::DockerIgnore), expected);
}

#[test]
fn test_unsupported_types_use_generic_image() {
    for project_type in [ProjectType::Java, ProjectType::Go, ProjectType::Rust] {
        assert_eq!(select_base(project_type), (Template::Generic, GENERIC_IMAGE));
    }
    assert_eq!(select_base(ProjectType::Python).1, "python:3.9-slim");
    assert_eq!(select_base(ProjectType::Nodejs).1, "node:16-alpine");
}

#[test]
fn test_nextjs_dockerfile_ends_with_build_and_start() {
    let artifacts = ArtifactGenerator::new().generate(
        &profile(ProjectType::Nodejs, &["package.json"], &["next", "react"]),
        &GenerationConfig::default(),
    );
    let dockerfile = content(&artifacts, ArtifactKind::Dockerfile);

    assert!(dockerfile.starts_with("FROM node:16-alpine\n"));
    let tail: Vec<&str> = dockerfile.lines().rev().take(2).collect();
    assert_eq!(tail, vec![r#"CMD ["npm", "start", "--", "-p", "5000"]"#, "RUN npm run build"]);
}

#[test]
fn test_python_commands_per_framework() {
    let config = GenerationConfig {
        host: "127.0.0.1".to_string(),
        port: "8000".to_string(),
        ..GenerationConfig::default()
    };
    let last_line = |files: &[&str], deps: &[&str]| {
        let artifacts =
            ArtifactGenerator::new().generate(&profile(ProjectType::Python, files, deps), &config);
        content(&artifacts, ArtifactKind::Dockerfile)
            .lines()
            .last()
            .unwrap()
            .to_string()
    };

    assert_eq!(
        last_line(&["requirements.txt"], &["flask"]),
        r#"CMD ["gunicorn", "--bind", "127.0.0.1:8000", "--workers", "4", "--timeout", "120", "app:app"]"#
    );
    assert_eq!(
        last_line(&["requirements.txt"], &["fastapi"]),
        r#"CMD ["uvicorn", "main:app", "--host", "127.0.0.1", "--port", "8000"]"#
    );
    assert_eq!(
        last_line(&["requirements.txt", "mysite/wsgi.py"], &["django"]),
        r#"CMD ["gunicorn", "--bind", "127.0.0.1:8000", "--workers", "4", "--timeout", "120", "mysite.wsgi:application"]"#
    );
    assert_eq!(last_line(&["requirements.txt"], &[]), r#"CMD ["python", "app.py"]"#);
}

#[test]
fn test_django_collects_static_before_run() {
    let artifacts = ArtifactGenerator::new().generate(
        &profile(ProjectType::Python, &["requirements.txt"], &["django"]),
        &GenerationConfig::default(),
    );
    let dockerfile = content(&artifacts, ArtifactKind::Dockerfile);

    assert!(dockerfile.contains("RUN python manage.py collectstatic --noinput\n"));
    assert!(dockerfile.ends_with("\"wsgi:application\"]\n"));
}

#[test]
fn test_expose_uses_config_not_detected_ports() {
    let mut detected = profile(ProjectType::Nodejs, &["package.json"], &["express"]);
    detected.ports.insert(8080);
    let config = GenerationConfig {
        port: "4000".to_string(),
        ..GenerationConfig::default()
    };
    let artifacts = ArtifactGenerator::new().generate(&detected, &config);

    for artifact in &artifacts {
        assert!(!artifact.content.contains("8080"), "{} leaked a detected port", artifact.name());
    }
    let dockerfile = content(&artifacts, ArtifactKind::Dockerfile);
    assert!(dockerfile.lines().any(|line| line == "EXPOSE 4000"));
    assert!(dockerfile.ends_with("CMD [\"node\", \"app.js\", \"--port\", \"4000\"]\n"));
}

#[test]
fn test_compose_without_database() {
    let artifacts = ArtifactGenerator::new().generate(
        &profile(ProjectType::Nodejs, &["package.json"], &["vue"]),
        &GenerationConfig::default(),
    );

    assert_eq!(
        content(&artifacts, ArtifactKind::Compose),
        r#"version: '3.8'

services:
  app:
    build: .
    ports:
      - "5000:5000"
    environment:
      - HOST=0.0.0.0
      - PORT=5000
    networks:
      - app-network

networks:
  app-network:
    driver: bridge
"#
    );
}

#[test]
fn test_compose_with_postgres_sidecar() {
    let artifacts = ArtifactGenerator::new().generate(
        &profile(ProjectType::Python, &["requirements.txt"], &["fastapi"]),
        &GenerationConfig::default(),
    );
    let compose: serde_yaml::Value =
        serde_yaml::from_str(content(&artifacts, ArtifactKind::Compose)).unwrap();

    let db = &compose["services"]["db"];
    assert_eq!(db["image"].as_str(), Some(DATABASE_IMAGE));
    let db_env: Vec<&str> = db["environment"]
        .as_sequence()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(db_env, vec!["POSTGRES_USER=app", "POSTGRES_PASSWORD=app", "POSTGRES_DB=app"]);

    let app = &compose["services"]["app"];
    assert_eq!(app["depends_on"][0].as_str(), Some("db"));
    assert_eq!(app["ports"][0].as_str(), Some("5000:5000"));
    assert!(compose["volumes"].get("db-data").is_some());
    assert_eq!(compose["networks"]["app-network"]["driver"].as_str(), Some("bridge"));
}

#[test]
fn test_ignore_extensions() {
    let django = ignore::render(Framework::Django);
    assert!(django.ends_with("*.swo\nstaticfiles\nmedia\n*.sqlite3\n"));

    let react = ignore::render(Framework::React);
    assert!(react.ends_with("*.swo\n.next\ncoverage\n"));
    assert_eq!(react.lines().filter(|l| *l == "build").count(), 1);

    assert_eq!(ignore::render(Framework::Express), ignore::render(Framework::Unknown));
}

#[test]
fn test_generation_is_idempotent() {
    let mut p = profile(ProjectType::Python, &["requirements.txt", "app/wsgi.py"], &["django", "psycopg2"]);
    p.ports.extend([8000, 5432]);
    p.environment.insert("DEBUG".to_string(), "1".to_string());
    let config = GenerationConfig::default();
    let generator = ArtifactGenerator::new();

    assert_eq!(generator.generate(&p, &config), generator.generate(&p, &config));
}
