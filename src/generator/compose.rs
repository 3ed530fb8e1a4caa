use super::framework::Framework;
use crate::config::GenerationConfig;

pub const DATABASE_IMAGE: &str = "postgres:13";
pub const DATABASE_URL: &str = "postgresql://app:app@db:5432/app";

pub fn render(framework: Framework, config: &GenerationConfig) -> String {
    let with_db = framework.wants_database();
    let port = &config.port;

    let mut lines = vec![
        "version: '3.8'".to_string(),
        String::new(),
        "services:".to_string(),
        "  app:".to_string(),
        "    build: .".to_string(),
        "    ports:".to_string(),
        format!("      - \"{}:{}\"", port, port),
        "    environment:".to_string(),
        format!("      - HOST={}", config.host),
        format!("      - PORT={}", port),
    ];
    if with_db {
        lines.push(format!("      - DATABASE_URL={}", DATABASE_URL));
        lines.push("    depends_on:".to_string());
        lines.push("      - db".to_string());
    }
    lines.push("    networks:".to_string());
    lines.push("      - app-network".to_string());

    if with_db {
        lines.extend(
            [
                "  db:".to_string(),
                format!("    image: {}", DATABASE_IMAGE),
                "    environment:".to_string(),
                "      - POSTGRES_USER=app".to_string(),
                "      - POSTGRES_PASSWORD=app".to_string(),
                "      - POSTGRES_DB=app".to_string(),
                "    volumes:".to_string(),
                "      - db-data:/var/lib/postgresql/data".to_string(),
                "    networks:".to_string(),
                "      - app-network".to_string(),
            ],
        );
    }

    lines.extend(
        ["", "networks:", "  app-network:", "    driver: bridge"].map(String::from),
    );

    if with_db {
        lines.extend(["", "volumes:", "  db-data:"].map(String::from));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
