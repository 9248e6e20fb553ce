use tracing::{Level, event};

/// Process-wide configuration, sourced from the environment.
///
/// One config, one store client per run, shared by every task.
#[derive(Debug)]
pub(crate) struct Config {
    pub store: StoreConfig,
    pub global: GlobalConfig,
    pub client: reqwest::Client,
}
impl Config {
    pub fn create() -> Result<Config, Box<dyn std::error::Error>> {
        let url = match std::env::var("SUPABASE_URL") {
            Ok(x) => x,
            Err(e) => {
                event!(Level::ERROR, "SUPABASE_URL is not set in the environment: {e}");
                return Err(Box::new(e));
            }
        };
        let key = match std::env::var("SUPABASE_KEY") {
            Ok(x) => x,
            Err(e) => {
                event!(Level::ERROR, "SUPABASE_KEY is not set in the environment: {e}");
                return Err(Box::new(e));
            }
        };
        let log_level =
            std::env::var("STAFF_ADMIN_LOG").unwrap_or_else(|_| "info".to_string());

        let store = StoreConfig {
            // the store routes live under /rest/v1; keep the base bare
            url: url.trim_end_matches('/').to_string(),
            key,
        };
        let client = crate::store::create_client(&store)?;

        Ok(Config {
            store,
            global: GlobalConfig { log_level },
            client,
        })
    }
}

#[derive(Debug)]
pub(crate) struct GlobalConfig {
    pub log_level: String,
}

pub(crate) struct StoreConfig {
    pub url: String,
    pub key: String,
}
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("key", &"[redacted]")
            .finish()
    }
}
