use chrono::Utc;
use clap::Subcommand;
use serde_json::json;
use std::io::{self, BufRead, Write};

use crate::auth::claims::peek_claims;
use crate::auth::LOGIN_PATH;
use crate::cli::config::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login and store the session token")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and clear the stored token")]
    Logout,

    #[command(about = "Verify the stored token and show session status")]
    Status,

    #[command(about = "Show the logged-in username")]
    Whoami,
}

fn prompt_password(username: &str) -> anyhow::Result<String> {
    eprint!("Password for {}: ", username);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn handle(cmd: AuthCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password(&username)?,
            };

            let outcome = ctx.session.login(&username, &password).await;
            if !outcome.success {
                return Err(anyhow::anyhow!(outcome.error.unwrap_or_else(|| "Login failed".to_string())));
            }

            let redirect = ctx.session.take_redirect();
            output_success(
                &output_format,
                &format!("Logged in as '{}'", username),
                Some(json!({
                    "username": username,
                    "message": outcome.message,
                    "redirect": redirect,
                })),
            )
        }
        AuthCommands::Logout => {
            ctx.session.logout().await;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let token = ctx.session.token();
            let state = ctx.session.init().await;
            let claims = token.as_deref().and_then(peek_claims);
            let expires_at = claims.as_ref().and_then(|c| c.expires_at());
            let expired = claims.as_ref().map(|c| c.is_expired_at(Utc::now())).unwrap_or(false);

            let status = json!({
                "authenticated": state.authenticated,
                "username": state.username(),
                "expires_at": expires_at,
                "expired": expired,
                "api_url": ctx.api().base_url(),
                "session_file": ctx.token_store.path().display().to_string(),
            });

            output_with(&output_format, &status, || {
                if state.authenticated {
                    println!("Authenticated as {}", state.username().unwrap_or("-"));
                    if let Some(exp) = expires_at {
                        println!("Token expires: {}", exp.format("%Y-%m-%d %H:%M:%S UTC"));
                    }
                } else if token.is_some() {
                    if expired {
                        println!("Stored token has expired and has been cleared");
                    } else {
                        println!("Stored session was rejected and has been cleared");
                    }
                    println!("Login again with 'folio auth login <username>' ({})", LOGIN_PATH);
                } else {
                    println!("Not logged in");
                }
                println!("API: {}", ctx.api().base_url());
            })
        }
        AuthCommands::Whoami => {
            ctx.require_admin("/admin").await?;
            let state = ctx.session.get_state();
            let username = state.username().unwrap_or_default().to_string();
            output_with(&output_format, &json!({ "username": username }), || println!("{}", username))
        }
    }
}
