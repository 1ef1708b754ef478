//! Server configuration from command-line flags and environment variables.

use std::net::SocketAddr;

use clap::Parser;

use crate::task::services::CompletionPolicy;

/// Charity hub HTTP server.
#[derive(Parser, Debug, Clone)]
#[command(name = "charity-hub", about = "Task matching server for charities and benefactors")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "CHARITY_HUB_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// `PostgreSQL` connection URL. The in-memory store is used when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "CHARITY_HUB_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// Who may mark an assigned task as done.
    #[arg(
        long,
        env = "CHARITY_HUB_COMPLETION_POLICY",
        value_enum,
        default_value_t = CompletionPolicy::Any
    )]
    pub completion_policy: CompletionPolicy,
}
