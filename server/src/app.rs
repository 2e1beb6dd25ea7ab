//! App state and builder

use std::sync::Arc;

use crate::prelude::*;
use crate::routes;
use chatrelay_push::{
	DispatchObserver, LoggingObserver, NotificationTemplate, PushDispatcher, PushTransport,
};
use chatrelay_types::subscriber_adapter::SubscriberAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How a chat message is fanned out to the other subscribers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FanOut {
	/// One notification to every other subscriber
	#[default]
	EachRecipient,
	/// Legacy behaviour: one notification per other subscriber, all of them
	/// addressed to the first one. Kept only for clients that relied on it.
	FirstRecipient,
}

impl std::str::FromStr for FanOut {
	type Err = Error;

	fn from_str(s: &str) -> ClResult<Self> {
		match s {
			"each" | "each-recipient" => Ok(FanOut::EachRecipient),
			"first" | "first-recipient" | "legacy" => Ok(FanOut::FirstRecipient),
			_ => Err(Error::ConfigError(format!("Unknown fan-out mode: {}", s))),
		}
	}
}

/// Install the process-wide rustls crypto provider if none is set yet.
///
/// Outbound HTTPS clients need it, so call this before creating any.
pub fn install_crypto_provider() -> ClResult<()> {
	if rustls::crypto::CryptoProvider::get_default().is_some() {
		return Ok(());
	}
	rustls::crypto::CryptoProvider::install_default(rustls::crypto::aws_lc_rs::default_provider())
		.map_err(|e| {
			error!("FATAL: Failed to install default crypto provider: {:?}", e);
			Error::Internal("Failed to install default crypto provider".to_string())
		})
}

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub subscriber_adapter: Arc<dyn SubscriberAdapter>,
	pub dispatcher: PushDispatcher,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub subscriber_adapter: Option<Arc<dyn SubscriberAdapter>>,
	pub push_transport: Option<Arc<dyn PushTransport>>,
	pub dispatch_observer: Option<Arc<dyn DispatchObserver>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	pub fan_out: FanOut,
	/// Content of every push notification
	pub notification: NotificationTemplate,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "0.0.0.0:3000".into(),
				fan_out: FanOut::default(),
				notification: NotificationTemplate::default(),
			},
			adapters: Adapters {
				subscriber_adapter: None,
				push_transport: None,
				dispatch_observer: None,
			},
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn fan_out(&mut self, fan_out: FanOut) -> &mut Self {
		self.opts.fan_out = fan_out;
		self
	}
	pub fn notification(&mut self, notification: NotificationTemplate) -> &mut Self {
		self.opts.notification = notification;
		self
	}

	// Adapters
	pub fn subscriber_adapter(
		&mut self,
		subscriber_adapter: Arc<dyn SubscriberAdapter>,
	) -> &mut Self {
		self.adapters.subscriber_adapter = Some(subscriber_adapter);
		self
	}
	pub fn push_transport(&mut self, push_transport: Arc<dyn PushTransport>) -> &mut Self {
		self.adapters.push_transport = Some(push_transport);
		self
	}
	/// Receives every push outcome. Defaults to [`LoggingObserver`].
	pub fn dispatch_observer(&mut self, observer: Arc<dyn DispatchObserver>) -> &mut Self {
		self.adapters.dispatch_observer = Some(observer);
		self
	}

	/// Assemble the app state and start the push dispatcher.
	///
	/// Fails with `Error::Internal` outside a tokio runtime.
	pub fn build(self) -> ClResult<App> {
		let Some(subscriber_adapter) = self.adapters.subscriber_adapter else {
			error!("FATAL: No subscriber adapter configured");
			return Err(Error::Internal("No subscriber adapter configured".to_string()));
		};
		let Some(push_transport) = self.adapters.push_transport else {
			error!("FATAL: No push transport configured");
			return Err(Error::Internal("No push transport configured".to_string()));
		};
		let observer =
			self.adapters.dispatch_observer.unwrap_or_else(|| Arc::new(LoggingObserver));

		let dispatcher = PushDispatcher::start(push_transport, observer)?;
		info!(fan_out = ?self.opts.fan_out, "Push dispatcher started");

		Ok(Arc::new(AppState { opts: self.opts, subscriber_adapter, dispatcher }))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("Chat relay V{}", VERSION);

		install_crypto_provider()?;
		let app = self.build()?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await.map_err(|e| {
			error!("FATAL: Cannot listen on {}: {}", app.opts.listen, e);
			e
		})?;
		info!("Listening on HTTP {}", app.opts.listen);

		axum::serve(listener, router).await?;
		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
