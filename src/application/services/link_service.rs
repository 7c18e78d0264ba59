//! Link creation and retrieval service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_alias};
use crate::utils::url_normalizer::normalize_url;
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

/// Maximum random-code attempts before giving up on creation.
const MAX_ATTEMPTS: usize = 10;

/// Service for creating and retrieving short links.
///
/// Handles URL normalization, alias validation, and collision-retried code
/// generation. The repository owns atomicity of the uniqueness check; this
/// service only decides how to react to a conflict.
pub struct LinkService<L: LinkRepository + ?Sized> {
    links: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(links: Arc<L>) -> Self {
        Self { links }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `owner_id` - Identifier of the creating user
    /// - `url` - Destination URL (scheme optional, `https://` assumed)
    /// - `custom_alias` - Optional caller-chosen short code
    /// - `expires_at` - Optional expiry instant; `None` means the link never
    ///   expires
    ///
    /// # Code selection
    ///
    /// - A custom alias is validated and used as-is; if any link (active or
    ///   not) already holds it, the call fails with a conflict. Retired
    ///   codes are never reissued.
    /// - Otherwise a random 12-character code is generated, retrying on
    ///   collision up to 10 times before failing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or alias is invalid.
    /// Returns [`AppError::Conflict`] if the alias is taken or generation
    /// is exhausted.
    pub async fn create_link(
        &self,
        owner_id: String,
        url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        let normalized_url = normalize_url(&url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(alias) = custom_alias {
            validate_alias(&alias)?;

            if self.links.code_exists(&alias).await? {
                return Err(alias_taken(&alias));
            }

            let new_link = NewLink {
                code: alias.clone(),
                original_url: normalized_url,
                owner_id,
                expires_at,
            };

            // A racing creator can still win between the existence check and
            // the insert; surface that as the same alias-taken conflict.
            return self
                .links
                .create(new_link)
                .await
                .map_err(|e| match e {
                    AppError::Conflict { .. } => alias_taken(&alias),
                    other => other,
                });
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code();
            let new_link = NewLink {
                code,
                original_url: normalized_url.clone(),
                owner_id: owner_id.clone(),
                expires_at,
            };

            match self.links.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    debug!(attempt, "generated code collided, retrying");
                }
                Err(other) => return Err(other),
            }
        }

        Err(AppError::conflict(
            "Failed to generate a unique code",
            json!({ "reason": "generation_exhausted", "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Lists an owner's links, newest first.
    ///
    /// An owner with no links gets an empty list, not an error.
    pub async fn list_links(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        self.links.find_by_owner(owner_id).await
    }
}

fn alias_taken(alias: &str) -> AppError {
    AppError::conflict(
        "Custom alias already in use",
        json!({ "reason": "alias_taken", "alias": alias }),
    )
}
