//! Bearer token lifecycle: lazy fetch, single-flight refresh, and generation tracking.
//!
//! The manager caches at most one [`AccessToken`]. Every installed token bumps a generation
//! counter so a caller that saw generation `g` rejected can ask for a refresh that only reaches
//! the auth endpoint when nobody else has already replaced `g`. Network refreshes serialize on an
//! async mutex; the cache itself sits behind a `parking_lot` lock that is never held across
//! `.await`.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// crates.io
use http::header::{ACCEPT, AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ApiCredentials, TokenResponse},
	config::ClientConfig,
	error::ConfigError,
	obs,
	transport::ApiHttpClient,
};

/// Token snapshot paired with the generation it was installed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedToken {
	/// Bearer token.
	pub token: AccessToken,
	/// Generation counter value when the token was installed.
	pub generation: u64,
}

#[derive(Debug, Default)]
struct TokenState {
	token: Option<AccessToken>,
	generation: u64,
}
impl TokenState {
	fn snapshot(&self) -> Option<CachedToken> {
		self.token.clone().map(|token| CachedToken { token, generation: self.generation })
	}

	fn install(&mut self, token: AccessToken) -> CachedToken {
		self.generation += 1;
		self.token = Some(token.clone());

		CachedToken { token, generation: self.generation }
	}
}

/// Owns the client's bearer token and talks to the auth endpoint.
pub struct TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	token_url: Url,
	credentials: ApiCredentials,
	state: RwLock<TokenState>,
	refresh_guard: AsyncMutex<()>,
	fetches: AtomicU64,
}
impl<C> TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a manager that authenticates with the credentials and auth endpoint from `config`.
	pub fn new(http_client: impl Into<Arc<C>>, config: &ClientConfig) -> Self {
		Self {
			http_client: http_client.into(),
			token_url: config.token_url(),
			credentials: config.credentials.clone(),
			state: RwLock::new(TokenState::default()),
			refresh_guard: AsyncMutex::new(()),
			fetches: AtomicU64::new(0),
		}
	}

	/// Returns the cached token without contacting the auth endpoint.
	pub fn cached(&self) -> Option<CachedToken> {
		self.state.read().snapshot()
	}

	/// Returns the cached token, fetching one first when none is cached.
	///
	/// Concurrent first calls share one auth request.
	pub async fn get_token(&self) -> Result<CachedToken> {
		if let Some(current) = self.cached() {
			return Ok(current);
		}

		let _singleflight = self.refresh_guard.lock().await;

		if let Some(current) = self.cached() {
			return Ok(current);
		}

		self.fetch_and_install().await
	}

	/// Unconditionally fetches a new token and replaces the cached one.
	pub async fn refresh_token(&self) -> Result<CachedToken> {
		let _singleflight = self.refresh_guard.lock().await;

		self.fetch_and_install().await
	}

	/// Replaces the token observed at `generation`.
	///
	/// When another caller has already installed a newer token, that token is returned and the
	/// auth endpoint is not contacted.
	pub async fn refresh_stale(&self, generation: u64) -> Result<CachedToken> {
		let _singleflight = self.refresh_guard.lock().await;

		if let Some(current) = self.cached().filter(|current| current.generation != generation) {
			return Ok(current);
		}

		self.fetch_and_install().await
	}

	/// Installs an externally obtained token without contacting the auth endpoint.
	pub fn seed_token(&self, token: AccessToken) -> CachedToken {
		self.state.write().install(token)
	}

	/// Drops the cached token so the next call re-authenticates.
	pub fn clear(&self) {
		let mut state = self.state.write();

		state.token = None;
		state.generation += 1;
	}

	/// Number of requests sent to the auth endpoint so far.
	pub fn fetch_count(&self) -> u64 {
		self.fetches.load(Ordering::Relaxed)
	}

	async fn fetch_and_install(&self) -> Result<CachedToken> {
		let token = self.fetch().await?;

		Ok(self.state.write().install(token))
	}

	async fn fetch(&self) -> Result<AccessToken> {
		let request = http::Request::post(self.token_url.as_str())
			.header(AUTHORIZATION, self.credentials.basic_auth_header())
			.header(ACCEPT, "application/json")
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		self.fetches.fetch_add(1, Ordering::Relaxed);

		let result = match self.http_client.execute(request).await {
			Ok(response) => {
				let status = response.status();

				if !status.is_success() {
					Err(Error::token_unavailable(Some(status.as_u16())))
				} else {
					match TokenResponse::parse(response.body()) {
						Ok(body) => body
							.into_token()
							.ok_or_else(|| Error::token_unavailable(Some(status.as_u16()))),
						Err(e) => Err(Error::token_unavailable_with(Some(status.as_u16()), e)),
					}
				}
			},
			Err(e) => Err(Error::token_unavailable_with(None, e)),
		};

		obs::record_token_fetch(result.is_ok());
		obs::emit_token_fetch(result.as_ref().err().and_then(Error::status), result.is_ok());

		result
	}
}
impl<C> Debug for TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.read();

		f.debug_struct("TokenManager")
			.field("token_url", &self.token_url.as_str())
			.field("credentials", &self.credentials)
			.field("token_cached", &state.token.is_some())
			.field("generation", &state.generation)
			.finish()
	}
}
