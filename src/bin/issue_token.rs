//! Print a bearer token for local development.
//!
//! Usage:
//!     JWT_SECRET=... cargo run --bin issue_token -- [user-id] [name] [avatar-url]
//!
//! A fresh user id is generated when none is given. Tokens are valid for
//! seven days.

use posts_api::presentation::http::middleware::user::issue_user_token;
use uuid::Uuid;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| anyhow::anyhow!("Missing required environment variable: JWT_SECRET"))?;

    let mut args = std::env::args().skip(1);
    let user_id = match args.next() {
        Some(raw) => Uuid::parse_str(&raw)?,
        None => Uuid::now_v7(),
    };
    let name = args.next();
    let avatar = args.next();

    let token = issue_user_token(&secret, user_id, name, avatar, chrono::Duration::days(7))?;

    println!("user: {}", user_id);
    println!("Authorization: Bearer {}", token);
    Ok(())
}
