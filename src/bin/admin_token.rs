use clap::Parser;
use lawfirm_content_be::services::admin_auth::{ADMIN_ROLE, AdminAuth};

/// Mints a bearer token for the moderation endpoints.
#[derive(Parser)]
#[command(name = "admin_token")]
#[command(about = "Issue an admin token signed with ADMIN_JWT_SECRET", long_about = None)]
struct Cli {
    /// Who the token is for (stored as `sub`)
    subject: String,

    /// Lifetime in hours
    #[arg(long, default_value_t = 12)]
    hours: i64,

    /// Signing secret; falls back to ADMIN_JWT_SECRET from the environment or .env
    #[arg(long, env = "ADMIN_JWT_SECRET", hide_env_values = true)]
    secret: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if cli.hours <= 0 {
        return Err("--hours must be positive".into());
    }

    let auth = AdminAuth::new(&cli.secret);
    let token = auth.issue(&cli.subject, ADMIN_ROLE, chrono::Duration::hours(cli.hours))?;
    println!("{}", token);
    Ok(())
}
