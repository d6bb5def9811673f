use comicd_dispatch::GithubConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the GitHub token have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    /// Reserved for a shutdown-with-drain phase.
    #[allow(dead_code)]
    pub shutdown_timeout_secs: u64,
    /// Directory with the built front end; served as the router fallback
    /// when it exists (default: `static`).
    pub static_dir: String,
    /// GitHub Actions dispatch settings (token, repo, workflow, ref).
    pub github: GithubConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `STATIC_DIR`           | `static`                   |
    /// | `GITHUB_API_BASE`      | `https://api.github.com`   |
    /// | `GITHUB_TOKEN`         | (required)                 |
    /// | `GITHUB_REPO`          | (required, `owner/repo`)   |
    /// | `GITHUB_WORKFLOW`      | `download.yml`             |
    /// | `GITHUB_REF`           | `main`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());

        let github = GithubConfig {
            api_base: std::env::var("GITHUB_API_BASE")
                .unwrap_or_else(|_| "https://api.github.com".into()),
            token: std::env::var("GITHUB_TOKEN").expect("GITHUB_TOKEN must be set"),
            repo: std::env::var("GITHUB_REPO").expect("GITHUB_REPO must be set (owner/repo)"),
            workflow: std::env::var("GITHUB_WORKFLOW").unwrap_or_else(|_| "download.yml".into()),
            ref_name: std::env::var("GITHUB_REF").unwrap_or_else(|_| "main".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            static_dir,
            github,
        }
    }
}
