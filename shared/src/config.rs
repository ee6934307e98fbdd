use dotenv::dotenv;

pub struct Config {
    pub api_key: String,
    pub provider: String,
    pub host: String,
    pub port: u16,
    pub cache_ttl_ms: u64,
    pub demo_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(Config {
            api_key: std::env::var("FX_API_KEY").unwrap_or_else(|_| "demo".to_string()),
            provider: std::env::var("FX_PROVIDER")
                .unwrap_or_else(|_| "alpha_vantage".to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            cache_ttl_ms: std::env::var("CACHE_TTL_MS")
                .unwrap_or_else(|_| "60000".to_string())
                .parse()
                .unwrap_or(60_000),
            demo_mode: std::env::var("DEMO_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        })
    }
}
