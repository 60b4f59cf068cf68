//! fleetdeck-cli: command-line admin console for the fleetdeck API
//!
//! Thin frontend over fleetdeck-core: authenticates against the server and
//! prints resource records as JSON.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, bail};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fleetdeck_core::auth::{AuthClient, LoginRequest};
use fleetdeck_core::config::Config;
use fleetdeck_core::devices::DeviceClient;
use fleetdeck_core::errors::ApiError;
use fleetdeck_core::groups::GroupClient;
use fleetdeck_core::policies::PolicyClient;
use fleetdeck_core::session::{FileTokenStore, SessionStore};
use fleetdeck_core::users::{CreateUserRequest, UserClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is reserved for resource output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "fleetdeck_cli=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}, using defaults", e);
        Config::default()
    });

    let token_path = config
        .token_path()
        .context("no config directory available")?;
    let session = Arc::new(SessionStore::new(Arc::new(FileTokenStore::new(token_path))));

    let http = fleetdeck_core::http::build_client(&config.api)?;
    let base_url = config.api.base_url.as_str();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");

    match command {
        "login" => {
            let principal = arg(&args, 1, "principal")?;
            let password = prompt_password()?;

            let auth = AuthClient::new(http, base_url, Arc::clone(&session));
            auth.login(&LoginRequest {
                principal_name: principal.to_string(),
                password,
            })
            .await
            .map_err(report)?;

            let display = session
                .identity()
                .and_then(|id| id.name.or(id.principal_name))
                .unwrap_or_else(|| principal.to_string());
            println!("Logged in as {display}");
        }

        "logout" => {
            session.logout();
            println!("Logged out");
        }

        "whoami" => {
            if !session.is_authenticated() {
                bail!("not logged in");
            }
            session.populate_identity();
            match session.identity() {
                Some(identity) => {
                    print_claim("name", identity.name);
                    print_claim("principal", identity.principal_name);
                    print_claim("organization", identity.organization);
                    print_claim("audience", identity.audience);
                }
                None => println!("Logged in, but the token claims could not be decoded"),
            }
        }

        "devices" => {
            let client = DeviceClient::new(http, base_url, session);
            print_list(client.list_all().await.map_err(report)?)?;
        }

        "device" => {
            let id = arg(&args, 1, "id")?;
            let client = DeviceClient::new(http, base_url, session);
            print_record(client.get_by_id(id).await.map_err(report)?, "device", id)?;
        }

        "device-info" => {
            let id = arg(&args, 1, "id")?;
            let client = DeviceClient::new(http, base_url, session);
            print_record(
                client.get_info_by_id(id).await.map_err(report)?,
                "device",
                id,
            )?;
        }

        "device-scope" => {
            let id = arg(&args, 1, "id")?;
            let client = DeviceClient::new(http, base_url, session);
            print_record(
                client.get_scope_by_id(id).await.map_err(report)?,
                "device",
                id,
            )?;
        }

        "groups" => {
            let client = GroupClient::new(http, base_url, session);
            print_list(client.list_all().await.map_err(report)?)?;
        }

        "group" => {
            let id = arg(&args, 1, "id")?;
            let client = GroupClient::new(http, base_url, session);
            print_record(client.get_by_id(id).await.map_err(report)?, "group", id)?;
        }

        "policies" => {
            let client = PolicyClient::new(http, base_url, session);
            print_list(client.list_all().await.map_err(report)?)?;
        }

        "policy" => {
            let id = arg(&args, 1, "id")?;
            let client = PolicyClient::new(http, base_url, session);
            print_record(client.get_by_id(id).await.map_err(report)?, "policy", id)?;
        }

        "users" => {
            let client = UserClient::new(http, base_url, session);
            print_list(client.list_all().await.map_err(report)?)?;
        }

        "user" => {
            let id = arg(&args, 1, "id")?;
            let client = UserClient::new(http, base_url, session);
            print_record(client.get_by_id(id).await.map_err(report)?, "user", id)?;
        }

        "create-user" => {
            let principal = arg(&args, 1, "principal")?;
            let full_name = args[2..].join(" ");
            if full_name.is_empty() {
                bail!("missing <full name> argument");
            }
            let password = prompt_password()?;

            let client = UserClient::new(http, base_url, session);
            client
                .create(&CreateUserRequest {
                    principal_name: principal.to_string(),
                    full_name,
                    password,
                })
                .await
                .map_err(report)?;
            println!("User {principal} created");
        }

        "help" | "--help" | "-h" => usage(),

        other => {
            usage();
            bail!("unknown command: {other}");
        }
    }

    Ok(())
}

fn usage() {
    eprintln!(
        "fleetdeck-cli - admin console for the fleetdeck API

Usage: fleetdeck-cli <command> [args]

Session:
  login <principal>                log in (password read from stdin)
  logout                           drop the stored session
  whoami                           show the identity held in the session

Resources:
  devices                          list devices
  device <id>                      show one device
  device-info <id>                 show a device's extended information
  device-scope <id>                show the groups/policies applied to a device
  groups | group <id>              list groups / show one group
  policies | policy <id>           list policies / show one policy
  users | user <id>                list users / show one user
  create-user <principal> <name>   create a user (password read from stdin)"
    );
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .with_context(|| format!("missing <{name}> argument"))
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

/// Attach a login hint to auth-class failures.
fn report(err: ApiError) -> anyhow::Error {
    if err.is_auth() {
        anyhow::anyhow!("{err} (try `fleetdeck-cli login <principal>`)")
    } else {
        anyhow::anyhow!(err)
    }
}

fn print_list(values: Vec<serde_json::Value>) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Array(values))?
    );
    Ok(())
}

fn print_record(
    value: Option<serde_json::Value>,
    kind: &str,
    id: &str,
) -> anyhow::Result<()> {
    match value {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        None => bail!("{kind} {id} not found"),
    }
}

fn print_claim(label: &str, value: Option<String>) {
    println!("{label}: {}", value.as_deref().unwrap_or("-"));
}
