use super::framework::Framework;
use crate::analysis::{ProjectProfile, ProjectType};
use crate::config::GenerationConfig;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Python,
    JavaScript,
    Generic,
}

pub struct BaseImage {
    pub project_type: ProjectType,
    pub template: Template,
    pub image: &'static str,
}

pub const BASE_IMAGES: &[BaseImage] = &[
    BaseImage {
        project_type: ProjectType::Python,
        template: Template::Python,
        image: "python:3.9-slim",
    },
    BaseImage {
        project_type: ProjectType::Nodejs,
        template: Template::JavaScript,
        image: "node:16-alpine",
    },
];

pub const GENERIC_IMAGE: &str = "ubuntu:latest";

pub fn select_base(project_type: ProjectType) -> (Template, &'static str) {
    BASE_IMAGES
        .iter()
        .find(|base| base.project_type == project_type)
        .map(|base| (base.template, base.image))
        .unwrap_or((Template::Generic, GENERIC_IMAGE))
}

pub fn render(profile: &ProjectProfile, framework: Framework, config: &GenerationConfig) -> String {
    let (template, image) = select_base(profile.project_type);
    let mut lines = vec![format!("FROM {}", image), "WORKDIR /app".to_string(), String::new()];

    match template {
        Template::Python => python(&mut lines, profile, framework, config),
        Template::JavaScript => javascript(&mut lines, framework, config),
        Template::Generic => generic(&mut lines, config),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn runtime_env(lines: &mut Vec<String>, config: &GenerationConfig) {
    lines.push(format!("ENV HOST={}", config.host));
    lines.push(format!("ENV PORT={}", config.port));
    lines.push(format!("EXPOSE {}", config.port));
}

fn python(
    lines: &mut Vec<String>,
    profile: &ProjectProfile,
    framework: Framework,
    config: &GenerationConfig,
) {
    let bind = format!("{}:{}", config.host, config.port);

    lines.extend(
        [
            "# Copy requirements first to leverage Docker cache",
            "COPY requirements.txt .",
            "RUN pip install --no-cache-dir -r requirements.txt",
            "",
            "COPY . .",
            "",
        ]
        .map(String::from),
    );

    if framework == Framework::Django {
        lines.push("RUN python manage.py collectstatic --noinput".to_string());
        lines.push(String::new());
    }

    lines.extend(
        [
            "RUN chown -R nobody:nogroup /app",
            "USER nobody",
            "",
        ]
        .map(String::from),
    );
    runtime_env(lines, config);
    lines.push(String::new());

    let cmd = match framework {
        Framework::Django => format!(
            r#"CMD ["gunicorn", "--bind", "{}", "--workers", "4", "--timeout", "120", "{}"]"#,
            bind,
            wsgi_application(profile)
        ),
        Framework::Flask => format!(
            r#"CMD ["gunicorn", "--bind", "{}", "--workers", "4", "--timeout", "120", "app:app"]"#,
            bind
        ),
        Framework::FastApi => format!(
            r#"CMD ["uvicorn", "main:app", "--host", "{}", "--port", "{}"]"#,
            config.host, config.port
        ),
        _ => r#"CMD ["python", "app.py"]"#.to_string(),
    };
    lines.push(cmd);
}

fn javascript(lines: &mut Vec<String>, framework: Framework, config: &GenerationConfig) {
    lines.extend(
        [
            "# Install dependencies",
            "COPY package*.json ./",
            "RUN npm install",
            "",
            "COPY . .",
            "",
        ]
        .map(String::from),
    );
    runtime_env(lines, config);
    lines.push(String::new());

    let port = &config.port;
    match framework {
        Framework::NextJs | Framework::React => {
            lines.push("RUN npm run build".to_string());
            lines.push(format!(r#"CMD ["npm", "start", "--", "-p", "{}"]"#, port));
        }
        Framework::Vue => {
            lines.push("RUN npm run build".to_string());
            lines.push(format!(r#"CMD ["npm", "run", "serve", "--", "--port", "{}"]"#, port));
        }
        Framework::Express => {
            lines.push(format!(r#"CMD ["node", "app.js", "--port", "{}"]"#, port));
        }
        _ => {
            lines.push(format!(r#"CMD ["npm", "start", "--", "-p", "{}"]"#, port));
        }
    }
}

fn generic(lines: &mut Vec<String>, config: &GenerationConfig) {
    lines.push("COPY . .".to_string());
    lines.push(String::new());
    runtime_env(lines, config);
    lines.push(String::new());
    lines.push(r#"CMD ["echo", "Please customize this Dockerfile for your project"]"#.to_string());
}

/// `pkg/wsgi.py` → `pkg.wsgi:application`, from the first wsgi module scanned.
fn wsgi_application(profile: &ProjectProfile) -> String {
    profile
        .files
        .iter()
        .map(|file| file.path.as_path())
        .find(|path| path.file_name().and_then(|n| n.to_str()) == Some("wsgi.py"))
        .map(module_path)
        .unwrap_or_else(|| "wsgi".to_string())
        + ":application"
}

fn module_path(path: &Path) -> String {
    path.with_extension("")
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join(".")
}
