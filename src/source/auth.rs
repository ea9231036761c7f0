// src/source/auth.rs
//! Google OAuth access tokens for the Sheets source.
//!
//! Two strategies:
//! - service account: sign a JWT assertion with the key's private key and
//!   trade it for an access token;
//! - authorized-user `token.json`: reuse the stored token, refreshing it and
//!   rewriting the file when it has (nearly) expired.

use std::{fs, path::{Path, PathBuf}};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::consts::*;
use crate::config::options::CredentialSource;
use crate::error::{Error, Result};

pub trait TokenProvider {
    fn access_token(&mut self) -> Result<String>;
}

/// Pick the provider matching the configured credentials.
pub fn from_credentials(creds: &CredentialSource) -> Result<Box<dyn TokenProvider>> {
    let provider: Box<dyn TokenProvider> = match creds {
        CredentialSource::ServiceAccountJson(json) => {
            Box::new(ServiceAccount::new(ServiceAccountKey::from_json(json)?))
        }
        CredentialSource::ServiceAccountFile(path) => {
            Box::new(ServiceAccount::new(ServiceAccountKey::from_file(path)?))
        }
        CredentialSource::TokenFile(path) => Box::new(TokenFile::load(path)?),
    };
    Ok(provider)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

fn post_token_form(token_uri: &str, form: &[(&str, &str)]) -> Result<TokenResponse> {
    debug!(token_uri, "requesting access token");
    let resp = ureq::post(token_uri)
        .send_form(form)
        .map_err(|e| Error::http(token_uri, e))?;
    resp.into_json::<TokenResponse>().map_err(|e| Error::Http {
        url: s!(token_uri),
        message: format!("unreadable token response: {e}"),
    })
}

/* ---------------- Service account ---------------- */

#[derive(Clone, Debug, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    s!(DEFAULT_TOKEN_URI)
}

#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl ServiceAccountKey {
    pub fn from_json(text: &str) -> Result<Self> {
        let key: Self = serde_json::from_str(text)
            .map_err(|e| Error::Credentials(format!("service account JSON: {e}")))?;
        if key.client_email.trim().is_empty() || key.private_key.trim().is_empty() {
            return Err(Error::Credentials(s!(
                "service account JSON needs client_email and private_key"
            )));
        }
        Ok(key)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text)
    }

    pub fn claims(&self, now: i64) -> Claims {
        Claims {
            iss: self.client_email.clone(),
            scope: s!(SHEETS_SCOPE),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }

    /// RS256-signed assertion for the JWT bearer grant.
    pub fn assertion(&self, now: i64) -> Result<String> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| Error::Credentials(format!("private_key: {e}")))?;
        Ok(jsonwebtoken::encode(&Header::new(Algorithm::RS256), &self.claims(now), &key)?)
    }
}

pub struct ServiceAccount {
    key: ServiceAccountKey,
    cached: Option<(String, DateTime<Utc>)>,
}

impl ServiceAccount {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self { key, cached: None }
    }
}

impl TokenProvider for ServiceAccount {
    fn access_token(&mut self) -> Result<String> {
        let now = Utc::now();
        if let Some((token, expiry)) = &self.cached {
            if !expires_soon(*expiry, now) {
                return Ok(token.clone());
            }
        }

        let assertion = self.key.assertion(now.timestamp())?;
        let resp = post_token_form(
            &self.key.token_uri,
            &[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())],
        )?;

        let ttl = resp.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        self.cached = Some((resp.access_token.clone(), now + Duration::seconds(ttl)));
        Ok(resp.access_token)
    }
}

fn expires_soon(expiry: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expiry - Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) <= now
}

/* ---------------- Authorized-user token file ---------------- */

/// Shape of an authorized-user `token.json`. Unknown keys (scopes, account,
/// …) round-trip untouched.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StoredToken {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredToken {
    /// No expiry recorded means the token is taken as still valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|exp| expires_soon(exp, now))
    }

    fn refresh_form(&self) -> Result<Vec<(&'static str, &str)>> {
        let refresh = self.refresh_token.as_deref().ok_or_else(|| {
            Error::Credentials(s!("stored token has expired and has no refresh_token"))
        })?;
        let mut form = vec![("grant_type", "refresh_token"), ("refresh_token", refresh)];
        if let Some(id) = self.client_id.as_deref() {
            form.push(("client_id", id));
        }
        if let Some(secret) = self.client_secret.as_deref() {
            form.push(("client_secret", secret));
        }
        Ok(form)
    }

    fn apply(&mut self, resp: TokenResponse, now: DateTime<Utc>) {
        self.token = resp.access_token;
        self.expiry = resp.expires_in.map(|secs| now + Duration::seconds(secs));
    }
}

pub struct TokenFile {
    path: PathBuf,
    stored: StoredToken,
}

impl TokenFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let stored = serde_json::from_str(&text)
            .map_err(|e| Error::Credentials(format!("{}: {e}", path.display())))?;
        Ok(Self { path: path.to_path_buf(), stored })
    }

    fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.stored)?;
        fs::write(&self.path, text).map_err(|e| Error::io(&self.path, e))
    }
}

impl TokenProvider for TokenFile {
    fn access_token(&mut self) -> Result<String> {
        let now = Utc::now();
        if !self.stored.is_expired(now) {
            return Ok(self.stored.token.clone());
        }

        debug!(path = %self.path.display(), "stored token expired, refreshing");
        let resp = {
            let form = self.stored.refresh_form()?;
            post_token_form(&self.stored.token_uri, &form)?
        };
        self.stored.apply(resp, now);
        self.save()?;
        Ok(self.stored.token.clone())
    }
}
