use clap::Parser;
use nutriguard_core::domain::common::{
    DatabaseConfig, LLMConfig, NutriguardConfig, ObjectStorageConfig, TokenConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub object_storage: ObjectStorageArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub tokens: TokenArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "postgres")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "nutriguard")]
    pub name: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ObjectStorageArgs {
    #[arg(
        long = "object-storage-endpoint",
        env = "OBJECT_STORAGE_ENDPOINT",
        default_value = "localhost:9000"
    )]
    pub endpoint: String,

    #[arg(
        long = "object-storage-region",
        env = "OBJECT_STORAGE_REGION",
        default_value = "us-east-1"
    )]
    pub region: String,

    #[arg(long = "object-storage-access-key", env = "OBJECT_STORAGE_ACCESS_KEY")]
    pub access_key: String,

    #[arg(long = "object-storage-secret-key", env = "OBJECT_STORAGE_SECRET_KEY")]
    pub secret_key: String,

    #[arg(
        long = "object-storage-bucket",
        env = "OBJECT_STORAGE_BUCKET",
        default_value = "ingredients"
    )]
    pub bucket: String,

    #[arg(
        long = "object-storage-use-ssl",
        env = "OBJECT_STORAGE_USE_SSL",
        default_value_t = false
    )]
    pub use_ssl: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LLMArgs {
    #[arg(long = "llm-base-url", env = "LLM_BASE_URL", default_value = "http://localhost:11434")]
    pub base_url: String,

    #[arg(long = "llm-model", env = "LLM_MODEL", default_value = "qwen3-vl:4b")]
    pub model: String,

    #[arg(long = "llm-timeout-seconds", env = "LLM_TIMEOUT_SECONDS", default_value_t = 430)]
    pub timeout_seconds: u64,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TokenArgs {
    #[arg(
        long = "access-token-expire-minutes",
        env = "ACCESS_TOKEN_EXPIRE_MINUTES",
        default_value_t = 15
    )]
    pub access_token_expire_minutes: i64,

    #[arg(
        long = "refresh-token-expire-days",
        env = "REFRESH_TOKEN_EXPIRE_DAYS",
        default_value_t = 7
    )]
    pub refresh_token_expire_days: i64,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for NutriguardConfig {
    fn from(args: Args) -> Self {
        NutriguardConfig {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                base_url: args.llm.base_url,
                model: args.llm.model,
                timeout_seconds: args.llm.timeout_seconds,
            },
            object_storage: ObjectStorageConfig {
                endpoint: args.object_storage.endpoint,
                region: args.object_storage.region,
                access_key: args.object_storage.access_key,
                secret_key: args.object_storage.secret_key,
                bucket_name: args.object_storage.bucket,
                use_ssl: args.object_storage.use_ssl,
            },
            tokens: TokenConfig {
                access_token_ttl_minutes: args.tokens.access_token_expire_minutes,
                refresh_token_ttl_days: args.tokens.refresh_token_expire_days,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "nutriguard-api",
            "--object-storage-access-key",
            "key",
            "--object-storage-secret-key",
            "secret",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_the_deployed_setup() {
        let config = NutriguardConfig::from(parse(&[]));

        assert_eq!(config.object_storage.bucket_name, "ingredients");
        assert_eq!(config.llm.model, "qwen3-vl:4b");
        assert_eq!(config.llm.timeout_seconds, 430);
        assert_eq!(config.tokens.access_token_ttl_minutes, 15);
        assert_eq!(config.tokens.refresh_token_ttl_days, 7);
    }

    #[test]
    fn allowed_origins_are_comma_separated() {
        let args = parse(&[
            "--server-allowed-origins",
            "http://a.test,http://b.test",
        ]);

        assert_eq!(args.server.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }
}
