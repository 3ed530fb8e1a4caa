use super::framework::Framework;

pub const BASELINE_IGNORE: &[&str] = &[
    ".git",
    ".gitignore",
    ".env",
    "node_modules",
    "__pycache__",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".Python",
    "env",
    "venv",
    ".venv",
    "pip-log.txt",
    "pip-delete-this-directory.txt",
    ".tox",
    ".coverage",
    ".coverage.*",
    ".cache",
    "nosetests.xml",
    "coverage.xml",
    "*.cover",
    "*.log",
    ".pytest_cache",
    ".DS_Store",
    "dist",
    "build",
    "*.egg-info",
    ".idea",
    ".vscode",
    "*.swp",
    "*.swo",
];

pub const DJANGO_IGNORE: &[&str] = &["staticfiles", "media", "*.sqlite3"];
pub const FRONTEND_IGNORE: &[&str] = &["build", "dist", ".next", "coverage"];

pub fn extra_patterns(framework: Framework) -> &'static [&'static str] {
    if framework == Framework::Django {
        DJANGO_IGNORE
    } else if framework.is_frontend() {
        FRONTEND_IGNORE
    } else {
        &[]
    }
}

pub fn render(framework: Framework) -> String {
    let mut patterns: Vec<&str> = BASELINE_IGNORE.to_vec();
    for pattern in extra_patterns(framework) {
        if !patterns.contains(pattern) {
            patterns.push(*pattern);
        }
    }

    let mut out = patterns.join("\n");
    out.push('\n');
    out
}
