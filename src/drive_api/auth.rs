use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, warn};
use yup_oauth2::authenticator_delegate::InstalledFlowDelegate;
use yup_oauth2::{ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use crate::error::{Error, Result};

/// Full read/write access to the user's Drive.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Token as persisted in the token store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl StoredToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|at| at <= Utc::now()).unwrap_or(false)
    }
}

/// The active OAuth2 session. Built once at startup and handed by reference
/// to every Drive call.
pub struct CredentialHandle {
    secret: ApplicationSecret,
    token: Option<StoredToken>,
}

impl CredentialHandle {
    pub fn new(secret: ApplicationSecret) -> Self {
        Self {
            secret,
            token: None,
        }
    }

    pub fn attach(&mut self, token: StoredToken) {
        self.token = Some(token);
    }

    pub fn secret(&self) -> &ApplicationSecret {
        &self.secret
    }

    pub fn token(&self) -> Option<&StoredToken> {
        self.token.as_ref()
    }

    pub fn access_token(&self) -> Result<&str> {
        self.token
            .as_ref()
            .map(|t| t.access_token.as_str())
            .ok_or_else(|| Error::Authentication("No token attached to credential".to_string()))
    }
}

// Token persistence, mockable for tests
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// `Ok(None)` when nothing has been cached yet.
    fn load(&self) -> Result<Option<StoredToken>>;
    fn save(&self, token: &StoredToken) -> Result<()>;
    /// Returns whether a cached token existed.
    fn clear(&self) -> Result<bool>;
}

/// Plain JSON file next to the working directory (`token.json` by default).
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<StoredToken>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::TokenStore(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let token = serde_json::from_str(&contents).map_err(|e| {
            Error::TokenStore(format!("Malformed token file {}: {}", self.path.display(), e))
        })?;
        Ok(Some(token))
    }

    fn save(&self, token: &StoredToken) -> Result<()> {
        let json = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, json).map_err(|e| {
            Error::TokenStore(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::TokenStore(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

// Operator interaction, mockable for tests
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    fn show(&self, message: &str);
    fn read_line(&self, message: &str) -> std::io::Result<String>;
}

pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn show(&self, message: &str) {
        println!("{}", message);
    }

    fn read_line(&self, message: &str) -> std::io::Result<String> {
        print!("{}", message);
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(line)
    }
}

/// Presents the authorization URL and collects the pasted code.
pub struct PromptDelegate {
    prompt: Arc<dyn Prompt>,
}

impl PromptDelegate {
    pub fn new(prompt: Arc<dyn Prompt>) -> Self {
        Self { prompt }
    }
}

impl InstalledFlowDelegate for PromptDelegate {
    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        need_code: bool,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<String, String>> + Send + 'a>> {
        Box::pin(async move {
            self.prompt
                .show(&format!("Authorize this app by visiting this url: {}", url));
            if !need_code {
                return Ok(String::new());
            }

            let prompt = self.prompt.clone();
            let line = tokio::task::spawn_blocking(move || {
                prompt.read_line("Enter the code from that page here: ")
            })
            .await
            .map_err(|e| e.to_string())?
            .map_err(|e| e.to_string())?;

            let code = line.trim();
            if code.is_empty() {
                Err("No authorization code entered".to_string())
            } else {
                Ok(code.to_string())
            }
        })
    }
}

// Interactive code exchange, mockable for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OAuthFlow: Send + Sync {
    async fn perform_flow(
        &self,
        secret: ApplicationSecret,
        scopes: Vec<String>,
    ) -> Result<StoredToken>;
}

/// yup-oauth2 installed flow in out-of-band mode: the operator opens the URL
/// and pastes the code back.
pub struct RealOAuthFlow {
    prompt: Arc<dyn Prompt>,
}

impl RealOAuthFlow {
    pub fn new(prompt: Arc<dyn Prompt>) -> Self {
        Self { prompt }
    }
}

#[async_trait]
impl OAuthFlow for RealOAuthFlow {
    async fn perform_flow(
        &self,
        secret: ApplicationSecret,
        scopes: Vec<String>,
    ) -> Result<StoredToken> {
        let auth =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::Interactive)
                .flow_delegate(Box::new(PromptDelegate::new(self.prompt.clone())))
                .build()
                .await
                .map_err(|e| {
                    Error::Authentication(format!("Failed to build authenticator: {}", e))
                })?;

        let scopes_refs: Vec<&str> = scopes.iter().map(|s| s.as_str()).collect();
        let access = auth
            .token(&scopes_refs)
            .await
            .map_err(|e| Error::Authentication(format!("Token exchange failed: {}", e)))?;

        let access_token = access
            .token()
            .ok_or_else(|| Error::Authentication("Token response had no access token".to_string()))?
            .to_string();
        let expires_at = access
            .expiration_time()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.unix_timestamp(), 0));

        Ok(StoredToken {
            access_token,
            expires_at,
            scopes,
        })
    }
}

/// Reads the `installed` client id/secret pair.
pub async fn load_client_secret(path: &Path) -> Result<ApplicationSecret> {
    yup_oauth2::read_application_secret(path)
        .await
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Loads the client secret and produces a credential, prompting the operator
/// only when no token has been cached.
pub async fn obtain_credential(
    credentials_path: &Path,
    token_path: &Path,
) -> Result<CredentialHandle> {
    let secret = load_client_secret(credentials_path).await?;
    let store = FileTokenStore::new(token_path);
    let flow = RealOAuthFlow::new(Arc::new(StdinPrompt));

    obtain_credential_with(secret, &store, &flow).await
}

pub async fn obtain_credential_with<S: TokenStore + ?Sized, O: OAuthFlow + ?Sized>(
    secret: ApplicationSecret,
    store: &S,
    flow: &O,
) -> Result<CredentialHandle> {
    let mut credential = CredentialHandle::new(secret);

    // A cached token is used as-is, without a refresh or a validity probe
    if let Some(token) = store.load()? {
        if token.is_expired() {
            warn!(
                expires_at = ?token.expires_at,
                "Cached token has expired; Drive calls will likely be rejected. Run with --clear-token to re-authorize."
            );
        }
        debug!("Using cached token");
        credential.attach(token);
        return Ok(credential);
    }

    info!("No cached token, starting interactive authorization");
    let token = flow
        .perform_flow(credential.secret().clone(), vec![DRIVE_SCOPE.to_string()])
        .await?;

    store.save(&token)?;
    info!("Token stored");

    credential.attach(token);
    Ok(credential)
}
