use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sitegrade")]
#[command(about = "A keyword-aware SEO and performance auditing service", long_about = None)]
pub struct Cli {
    /// Address to bind the HTTP server to (default: 127.0.0.1)
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on (default: 8080)
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// SQLite database URL for analysis history
    #[arg(long, default_value = "sqlite:sitegrade.db")]
    pub database_url: String,

    /// PageSpeed API endpoint base (defaults to the public Google endpoint)
    #[arg(long)]
    pub pagespeed_endpoint: Option<String>,

    /// PageSpeed API key
    #[arg(long)]
    pub pagespeed_api_key: Option<String>,

    /// Page fetch timeout in seconds (default: 10)
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout: u64,

    /// Performance audit timeout in seconds (default: 30)
    #[arg(long, default_value_t = 30)]
    pub audit_timeout: u64,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}
