use clap::Parser;
use snip_shortener::AllocationSettings;
use snip_telemetry::LogFormat;
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SNIP_GATEWAY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "SNIP_GATEWAY_BASE_URL";
pub const MAX_ALLOCATION_ATTEMPTS_ENV: &str = "SNIP_GATEWAY_MAX_ALLOCATION_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "SNIP_GATEWAY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "snip-gateway", about = "HTTP front end for the Snip URL shortener")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public origin that short URLs are built from.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Candidate codes tried per shortening request before failing.
    #[arg(
        long,
        env = MAX_ALLOCATION_ATTEMPTS_ENV,
        default_value_t = AllocationSettings::DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub max_allocation_attempts: u32,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}
