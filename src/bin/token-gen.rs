use anyhow::{Context, Result};
use clap::Parser;
use volunteer_api::config::Config;
use volunteer_api::services::auth::{Role, build_token_issuer};

/// Mint an HS256 access token accepted by the API's bearer authentication.
///
/// - Signs `{sub, role, email?, iat, exp, jti}` with JWT_SECRET (read from env / .env)
/// - Lifetime defaults to JWT_EXPIRES, like tokens issued by the API itself
/// - Prints the token, or a ready-to-paste `Authorization` header with `--header`
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (user id) placed in `sub`
    #[arg(long)]
    sub: String,

    /// coordinator | volunteer
    #[arg(long)]
    role: Role,

    /// Optional email claim
    #[arg(long)]
    email: Option<String>,

    /// Lifetime in seconds (overrides JWT_EXPIRES)
    #[arg(long)]
    ttl: Option<u64>,

    /// Print `Authorization: Bearer <token>` instead of the bare token
    #[arg(long, default_value_t = false)]
    header: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?;
    let mut issuer = build_token_issuer(&config).context("JWT_SECRET is not set")?;
    if let Some(ttl) = args.ttl {
        issuer = issuer.with_ttl(ttl);
    }

    let token = issuer
        .issue(&args.sub, args.role, args.email.as_deref())
        .context("failed to sign token")?;

    if args.header {
        println!("Authorization: Bearer {token}");
    } else {
        println!("{token}");
    }
    Ok(())
}
