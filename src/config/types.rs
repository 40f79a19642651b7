use serde::Deserialize;

/// Browser user agent sent to the movie chart, which rejects bare clients
const DEFAULT_MOVIE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/88.0.4324.146 Safari/537.36";

/// Main configuration structure for Topshelf
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    pub books: SourceSettings,
    pub movies: SourceSettings,
}

impl Config {
    /// The built-in configuration matching the real chart sites
    ///
    /// Used when the binary is run without a config file. Pacing windows
    /// differ per source because the sites tolerate different request rates.
    pub fn builtin() -> Self {
        Self {
            http: HttpConfig::default(),
            books: SourceSettings {
                enabled: true,
                start_page: 1,
                end_page: 25,
                pacing_min_ms: 1000,
                pacing_max_ms: 2000,
                base_url: "http://bang.dangdang.com".to_string(),
                output_path: "book.json".to_string(),
                user_agent: None,
            },
            movies: SourceSettings {
                enabled: true,
                start_page: 1,
                end_page: 10,
                pacing_min_ms: 2000,
                pacing_max_ms: 4000,
                base_url: "https://movie.douban.com".to_string(),
                output_path: "movies.json".to_string(),
                user_agent: Some(DEFAULT_MOVIE_USER_AGENT.to_string()),
            },
        }
    }
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Overall request timeout (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-seconds")]
    pub connect_timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
        }
    }
}

/// Per-source crawl settings
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// Whether this source is crawled at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// First page index, 1-based, inclusive
    #[serde(rename = "start-page")]
    pub start_page: u32,

    /// Last page index, inclusive
    #[serde(rename = "end-page")]
    pub end_page: u32,

    /// Lower bound of the randomized inter-request delay (milliseconds)
    #[serde(rename = "pacing-min-ms")]
    pub pacing_min_ms: u64,

    /// Upper bound of the randomized inter-request delay (milliseconds)
    #[serde(rename = "pacing-max-ms")]
    pub pacing_max_ms: u64,

    /// Site root the URL template is built on; overridable for tests
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Where the listing JSON is written
    #[serde(rename = "output-path")]
    pub output_path: String,

    /// User agent header, for sources that require one
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl SourceSettings {
    /// The user agent, falling back to the browser default
    pub fn user_agent_or_default(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_MOVIE_USER_AGENT.to_string())
    }
}
