use clap::Parser;
use std::net::SocketAddr;
use url::Url;

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long)]
    #[arg(default_value = "0.0.0.0:3030")]
    pub listen_address: SocketAddr,
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<Url>,
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: Option<String>,
    #[arg(long)]
    #[arg(default_value = "upload_data")]
    pub annotations_table: String,
    #[arg(long, allow_negative_numbers = true)]
    #[arg(default_value_t = 31.1417539449555)]
    pub initial_lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    #[arg(default_value_t = 481.4964079856873)]
    pub initial_lng: f64,
    #[arg(long)]
    #[arg(default_value_t = 13)]
    pub initial_zoom: u8,
    #[arg(long)]
    #[arg(default_value = "/auth/login")]
    pub login_url: String,
    /// Show a freshly submitted annotation right away instead of after the next reload.
    #[arg(long)]
    pub append_submitted_markers: bool,
    #[arg(long)]
    #[arg(default_value_t = 3600)]
    pub view_idle_timeout_secs: u64,
    #[arg(long)]
    #[arg(default_value_t = 10_000)]
    pub max_mounted_views: usize,
    #[arg(long = "allowed-origin")]
    #[arg(default_values_t = [
        String::from("http://127.0.0.1:3030"),
        String::from("http://localhost:3030"),
    ])]
    pub allowed_origins: Vec<String>,
}
