use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    extract::CookieJar,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rollcall_member::Member;
use rollcall_shared::{Error, Identity};
use serde::{Deserialize, Serialize};

use crate::{config::IdentityConfig, error::ApiError, routes::AppState};

pub const AUTH_COOKIE_NAME: &str = "auth_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Claims {
    /// Tokens without an email claim carry the address in `sub`.
    fn into_identity(self) -> Identity {
        Identity::new(self.email.unwrap_or(self.sub), self.name)
    }
}

/// Issues a token the way the identity provider does. Used by tooling and tests.
pub fn generate_token(
    config: &IdentityConfig,
    email: &str,
    name: Option<&str>,
    lifetime_secs: u64,
) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + lifetime_secs,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: email.to_owned(),
        email: Some(email.to_owned()),
        name: name.map(str::to_owned),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn verify_token(config: &IdentityConfig, token: &str) -> Result<Identity, Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("rejected identity token: {e}");
        Error::Unauthenticated
    })?;

    Ok(token_data.claims.into_identity())
}

/// Verified caller identity. Read from a bearer token, or the `auth_token`
/// cookie when no Authorization header is sent.
pub struct Authenticated(pub Identity);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_owned());

        let token = match bearer {
            Some(token) => token,
            None => {
                let jar = CookieJar::from_request_parts(parts, state)
                    .await
                    .map_err(|_| Error::Unauthenticated)?;

                jar.get(AUTH_COOKIE_NAME)
                    .map(|cookie| cookie.value().to_owned())
                    .ok_or(Error::Unauthenticated)?
            }
        };

        let identity = verify_token(&state.config.identity, &token)?;

        Ok(Authenticated(identity))
    }
}

/// Caller whose member record carries the officer role.
pub struct Officer(pub Member);

impl FromRequestParts<AppState> for Officer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(identity) = Authenticated::from_request_parts(parts, state).await?;

        let Some(member) = state.member_command.find_by_email(&identity.email).await? else {
            return Err(Error::Forbidden.into());
        };

        if !member.is_officer() {
            tracing::info!(member_id = %member.id, "officer route refused");
            return Err(Error::Forbidden.into());
        }

        Ok(Officer(member))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_config() -> IdentityConfig {
        IdentityConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "rollcall-auth".to_owned(),
            audience: "rollcall".to_owned(),
        }
    }

    #[test]
    fn test_token_round_trip_keeps_identity() {
        let config = identity_config();
        let token = generate_token(&config, "Alice@Example.com", Some("Alice"), 3600).unwrap();

        let identity = verify_token(&config, &token).unwrap();

        assert_eq!(identity.email, "Alice@Example.com");
        assert_eq!(identity.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_token_with_other_secret_is_rejected() {
        let config = identity_config();
        let token = generate_token(&config, "alice@example.com", None, 3600).unwrap();

        let other = IdentityConfig {
            secret: "another_secret_key_minimum_32_characters".to_owned(),
            ..identity_config()
        };

        assert!(matches!(
            verify_token(&other, &token),
            Err(Error::Unauthenticated)
        ));
    }

    #[test]
    fn test_token_for_other_audience_is_rejected() {
        let config = identity_config();
        let token = generate_token(&config, "alice@example.com", None, 3600).unwrap();

        let other = IdentityConfig {
            audience: "billing".to_owned(),
            ..identity_config()
        };

        assert!(verify_token(&other, &token).is_err());
    }
}
