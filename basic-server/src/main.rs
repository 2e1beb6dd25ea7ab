use std::sync::Arc;
use std::{env, path, process::ExitCode};
use tracing::{error, info};

use chatrelay::app::install_crypto_provider;
use chatrelay::error::{ClResult, Error};
use chatrelay::{AppBuilder, FanOut};
use chatrelay_push::send::DEFAULT_ENDPOINT;
use chatrelay_push::{http, FcmClient, LoggingObserver, NotificationTemplate};
use chatrelay_push::{ServiceAccountKey, ServiceAccountTokenProvider};
use chatrelay_subscriber_adapter_memory::SubscriberAdapterMemory;

pub struct Config {
	pub listen: String,
	pub credentials: path::PathBuf,
	pub project_id: Option<String>,
	pub endpoint: String,
	pub fan_out: FanOut,
	pub notification: NotificationTemplate,
}

fn flag(name: &str) -> bool {
	matches!(env::var(name).as_deref(), Ok("1" | "true" | "yes"))
}

impl Config {
	fn from_env() -> ClResult<Self> {
		let defaults = NotificationTemplate::default();
		let link = match env::var("NOTIFY_LINK") {
			Ok(link) if link.is_empty() => None,
			Ok(link) => Some(link.into()),
			Err(_) => defaults.link,
		};

		Ok(Config {
			listen: env::var("LISTEN").unwrap_or("0.0.0.0:3000".to_string()),
			credentials: path::PathBuf::from(
				env::var("FCM_CREDENTIALS").unwrap_or("./service-account.json".to_string()),
			),
			project_id: env::var("FCM_PROJECT_ID").ok().filter(|id| !id.is_empty()),
			endpoint: env::var("FCM_ENDPOINT")
				.unwrap_or(DEFAULT_ENDPOINT.to_string()),
			fan_out: env::var("FAN_OUT").as_deref().unwrap_or("each").parse()?,
			notification: NotificationTemplate {
				title: env::var("NOTIFY_TITLE").map(Into::into).unwrap_or(defaults.title),
				body: env::var("NOTIFY_BODY").map(Into::into).unwrap_or(defaults.body),
				link,
				data_type: env::var("NOTIFY_DATA_TYPE")
					.map(Into::into)
					.unwrap_or(defaults.data_type),
				platform_overrides: flag("NOTIFY_PLATFORM_OVERRIDES"),
			},
		})
	}
}

async fn run(config: Config) -> ClResult<()> {
	let key = ServiceAccountKey::load(&config.credentials).await?;
	let Some(project_id) = config.project_id.or_else(|| key.project_id.clone()) else {
		return Err(Error::ConfigError(
			"No project id: set FCM_PROJECT_ID or use a key file with project_id".into(),
		));
	};
	info!(
		client_email = %key.client_email,
		project_id = %project_id,
		"Loaded service account"
	);

	install_crypto_provider()?;
	let token_provider = ServiceAccountTokenProvider::new(&key, http::new_client())?;
	let fcm_client =
		FcmClient::new(http::new_client(), &config.endpoint, &project_id, Arc::new(token_provider));
	info!(send_url = %fcm_client.send_url(), "Push delivery configured");

	let mut builder = AppBuilder::new();
	builder
		.listen(config.listen)
		.fan_out(config.fan_out)
		.notification(config.notification)
		.subscriber_adapter(Arc::new(SubscriberAdapterMemory::new()))
		.push_transport(Arc::new(fcm_client))
		.dispatch_observer(Arc::new(LoggingObserver));
	builder.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_target(false)
		.init();

	let res = match Config::from_env() {
		Ok(config) => run(config).await,
		Err(err) => Err(err),
	};
	match res {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("FATAL: {}", err);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
