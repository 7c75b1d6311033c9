use anyhow::{Context, Result};
use clap::Parser;
use fcm_relay::fcm::{FcmMessage, FcmService, Notification};
use fcm_relay::service::MessagingService;
use serde_json::Value;
use std::collections::HashMap;

/// fcm-relay - send push messages over Firebase Cloud Messaging
///
/// The FCM server key is read from --server-key or the FCM_SERVER_KEY
/// environment variable.
///
/// Examples:
///   fcm-relay send --token <DEVICE> --title "Hello"
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// FCM endpoint URL (defaults to the public send endpoint)
    #[arg(long = "endpoint", value_name = "URL", global = true)]
    pub endpoint: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Send a push message to a device
    Send(SendArgs),

    /// Send a raw data payload with build instructions
    Raw(RawArgs),
}

#[derive(clap::Args, Debug)]
pub struct SendArgs {
    /// FCM server key (also via FCM_SERVER_KEY)
    #[arg(long = "server-key", short = 'k', env = "FCM_SERVER_KEY", value_name = "KEY")]
    pub server_key: String,

    /// Target device registration token
    #[arg(long, value_name = "TOKEN")]
    pub token: String,

    /// Notification title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Notification body
    #[arg(long, value_name = "TEXT")]
    pub body: Option<String>,

    /// Data map as a JSON object
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,

    /// Message priority (e.g. "high")
    #[arg(long, value_name = "PRIORITY")]
    pub priority: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RawArgs {
    /// FCM server key (also via FCM_SERVER_KEY)
    #[arg(long = "server-key", short = 'k', env = "FCM_SERVER_KEY", value_name = "KEY")]
    pub server_key: String,

    /// Message type tag
    #[arg(long = "message-type", value_name = "TYPE")]
    pub message_type: String,

    /// Customer identifier
    #[arg(long = "customer-id", value_name = "ID")]
    pub customer_id: String,

    /// Target device registration token
    #[arg(long, value_name = "TOKEN")]
    pub token: String,

    /// Payload as a JSON value
    #[arg(long, value_name = "JSON")]
    pub payload: String,

    /// Build instruction as a JSON value (repeatable)
    #[arg(long = "build-instruction", value_name = "JSON")]
    pub build_instructions: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Send(args) => send(args, cli.endpoint).await?,
        Commands::Raw(args) => raw(args, cli.endpoint).await?,
    }
    Ok(())
}

async fn send(args: SendArgs, endpoint: Option<String>) -> Result<()> {
    let service = FcmService::new(reqwest::Client::new(), args.server_key, endpoint);

    let data: HashMap<String, Value> = match args.data {
        Some(raw) => {
            serde_json::from_str(&raw).context("Failed to parse --data as a JSON object")?
        }
        None => HashMap::new(),
    };

    let notification = args.title.map(|title| Notification {
        title,
        body: args.body,
    });

    let mut message = FcmMessage::new(args.token);
    message.notification = notification;
    message.data = data;
    message.priority = args.priority;

    service.send_message(Box::new(message)).await
}

async fn raw(args: RawArgs, endpoint: Option<String>) -> Result<()> {
    let service = FcmService::new(reqwest::Client::new(), args.server_key, endpoint);

    let payload: Value =
        serde_json::from_str(&args.payload).context("Failed to parse --payload as JSON")?;
    let build_instructions: Vec<Value> = args
        .build_instructions
        .iter()
        .map(|raw| serde_json::from_str(raw))
        .collect::<Result<_, _>>()
        .context("Failed to parse --build-instruction as JSON")?;

    service
        .send_raw(
            &args.message_type,
            &args.customer_id,
            &args.token,
            payload,
            build_instructions,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_send_parsing() {
        let cli = Cli::try_parse_from([
            "fcm-relay",
            "send",
            "--server-key",
            "key",
            "--token",
            "device",
            "--title",
            "Hello",
        ])
        .unwrap();
        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.token, "device");
                assert_eq!(args.title, Some("Hello".to_string()));
                assert_eq!(args.body, None);
            }
            _ => panic!("Expected Send command"),
        }
        assert_eq!(cli.endpoint, None);
    }

    #[test]
    fn test_cli_raw_parsing() {
        let cli = Cli::try_parse_from([
            "fcm-relay",
            "raw",
            "--server-key",
            "key",
            "--message-type",
            "build",
            "--customer-id",
            "c-1",
            "--token",
            "device",
            "--payload",
            "{}",
            "--build-instruction",
            "\"fetch\"",
            "--build-instruction",
            "\"compile\"",
        ])
        .unwrap();
        match cli.command {
            Commands::Raw(args) => {
                assert_eq!(args.message_type, "build");
                assert_eq!(args.customer_id, "c-1");
                assert_eq!(args.build_instructions.len(), 2);
            }
            _ => panic!("Expected Raw command"),
        }
    }

    #[test]
    fn test_cli_global_endpoint_parsing() {
        let cli = Cli::try_parse_from([
            "fcm-relay",
            "--endpoint",
            "http://localhost:9999",
            "send",
            "--server-key",
            "key",
            "--token",
            "device",
        ])
        .unwrap();
        assert_eq!(cli.endpoint, Some("http://localhost:9999".to_string()));
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["fcm-relay", "--token", "device"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_send_requires_token() {
        let result = Cli::try_parse_from(["fcm-relay", "send", "--server-key", "key"]);
        assert!(result.is_err());
    }
}
