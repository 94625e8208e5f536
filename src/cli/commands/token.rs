use chrono::{TimeZone, Utc};
use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims, TokenVerifier};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a bearer token for a user")]
    Issue {
        #[arg(long, help = "User id to use as the token subject (random if omitted)")]
        user: Option<String>,
        #[arg(long, help = "Validity in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },

    #[command(about = "Check a bearer token's signature and expiry")]
    Verify {
        #[arg(help = "Token to verify")]
        token: String,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;

    match cmd {
        TokenCommands::Issue { user, hours } => {
            let user_id = user
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            let claims = Claims::new(user_id.as_str(), hours.unwrap_or(security.jwt_expiry_hours))?;
            let token = generate_jwt(&claims, &security.jwt_secret)?;

            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    "Token issued",
                    Some(json!({ "token": token, "user_id": user_id, "exp": claims.exp })),
                ),
                // Bare token on stdout so it can be captured by scripts
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
        TokenCommands::Verify { token } => {
            let claims = TokenVerifier::new(&security.jwt_secret).verify(&token)?;
            let user_id = claims.subject().unwrap_or_default();
            let expires = Utc
                .timestamp_opt(claims.exp, 0)
                .single()
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| claims.exp.to_string());

            output_success(
                &output_format,
                &format!("Token valid for user {} until {}", user_id, expires),
                Some(json!({ "user_id": user_id, "exp": claims.exp })),
            )
        }
    }
}
