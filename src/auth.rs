use crate::error::Error;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use std::collections::HashMap;
use std::future::{Ready, ready};

/// The authenticated caller a record belongs to. Only ever produced by a
/// `TokenVerifier`; handlers receive it as an extractor argument and never
/// see the raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

/// Seam to the external identity provider. The service only needs one
/// operation: resolve a bearer token to the owner it authenticates.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<OwnerId>;
}

/// Token verifier backed by a fixed token-to-owner table from configuration.
/// Suitable for service-to-service deployments and tests; an identity
/// provider integration plugs in behind the same trait.
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Option<OwnerId> {
        self.tokens.get(token).map(|owner| OwnerId(owner.clone()))
    }
}

impl FromRequest for OwnerId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(owner_from_request(req))
    }
}

fn owner_from_request(req: &HttpRequest) -> Result<OwnerId, Error> {
    let verifier = req
        .app_data::<web::Data<dyn TokenVerifier>>()
        .ok_or(Error::Unauthorized)?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(Error::Unauthorized)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(Error::Unauthorized)?;

    verifier.verify(token).ok_or(Error::Unauthorized)
}
