use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-demo")]
#[command(about = "An interactive console for a product catalog demo API")]
pub struct AppArgs {
    #[arg(
        long,
        help = "Base URL of the catalog service (or set CATALOG_DEMO_URL)"
    )]
    pub base_url: Option<String>,

    #[arg(
        long,
        default_value_t = 10,
        help = "Keep-alive ping interval in seconds"
    )]
    pub ping_interval: u64,

    #[arg(long, help = "Disable the background keep-alive ping")]
    pub no_ping: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}
