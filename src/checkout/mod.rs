//! Turns the cart into an order message handed to the producer's WhatsApp.
//!
//! Checkout resolves the seller of the *first* cart line and sends the whole
//! order to that seller. Carts mixing producers are still sent to one
//! recipient; a warning is logged when that happens.

pub mod directory;
pub mod launcher;
pub mod message;

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::cart::{CartLine, CartStore};

use self::{
    directory::{SellerDirectory, StockOwner},
    launcher::{DeepLinkLauncher, LaunchError},
    message::{compose_order_message, normalize_phone, whatsapp_deep_link},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Could not find the seller for this order")]
    SellerLookupFailed,

    #[error("The seller has no phone number registered")]
    MissingContactInfo,

    #[error("WhatsApp is not available on this device")]
    ExternalAppUnavailable,

    #[error("Could not send the order: {0}")]
    HandoffError(String),

    #[error("A checkout is already in progress")]
    CheckoutInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    Idle,
    Resolving,
    Composing,
    HandoffRequested,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub attempt_id: Uuid,
    pub recipient: Option<String>,
    pub phone: String,
    pub message: String,
    pub deep_link: String,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// Nothing in the cart; no lookup and no handoff happened.
    EmptyCart,
    HandedOff(CheckoutReceipt),
}

struct Recipient {
    name: Option<String>,
    phone: String,
}

/// Holds the phase for the lifetime of one checkout and puts it back to
/// `Idle` on every exit path.
struct PhaseGuard<'a> {
    phase: &'a Mutex<CheckoutPhase>,
}

impl<'a> PhaseGuard<'a> {
    fn acquire(phase: &'a Mutex<CheckoutPhase>) -> Option<Self> {
        let mut current = phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != CheckoutPhase::Idle {
            return None;
        }
        *current = CheckoutPhase::Resolving;
        Some(Self { phase })
    }

    fn advance(&self, next: CheckoutPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.advance(CheckoutPhase::Idle);
    }
}

pub struct CheckoutComposer {
    directory: Arc<dyn SellerDirectory>,
    launcher: Arc<dyn DeepLinkLauncher>,
    country_code: String,
    phase: Mutex<CheckoutPhase>,
}

impl fmt::Debug for CheckoutComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutComposer")
            .field("country_code", &self.country_code)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl CheckoutComposer {
    pub fn new(
        directory: Arc<dyn SellerDirectory>,
        launcher: Arc<dyn DeepLinkLauncher>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            launcher,
            country_code: country_code.into(),
            phase: Mutex::new(CheckoutPhase::Idle),
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends the current cart to its seller. On success the cart is closed
    /// but keeps its lines.
    pub async fn checkout(&self, cart: &CartStore) -> Result<CheckoutOutcome, CheckoutError> {
        let guard = PhaseGuard::acquire(&self.phase).ok_or(CheckoutError::CheckoutInProgress)?;

        let snapshot = cart.snapshot();
        let Some(first) = snapshot.lines().first() else {
            tracing::debug!("checkout skipped, cart is empty");
            return Ok(CheckoutOutcome::EmptyCart);
        };

        let attempt_id = Uuid::new_v4();
        tracing::info!(
            %attempt_id,
            product_id = %first.product.id,
            lines = snapshot.lines().len(),
            "checkout started"
        );
        warn_on_mixed_producers(attempt_id, snapshot.lines());

        let owner = self
            .directory
            .stock_owner(&first.product.id)
            .await
            .map_err(|err| {
                tracing::warn!(%attempt_id, error = %err, "seller lookup failed");
                CheckoutError::SellerLookupFailed
            })?
            .ok_or_else(|| {
                tracing::warn!(%attempt_id, product_id = %first.product.id, "stock entry not found");
                CheckoutError::SellerLookupFailed
            })?;
        let recipient = self.recipient_of(attempt_id, owner)?;

        guard.advance(CheckoutPhase::Composing);
        let message = compose_order_message(recipient.name.as_deref(), snapshot.lines(), snapshot.total());
        let deep_link = whatsapp_deep_link(&recipient.phone, &message);

        guard.advance(CheckoutPhase::HandoffRequested);
        self.launcher.open(&deep_link).await.map_err(|err| match err {
            LaunchError::Unavailable { scheme } => {
                tracing::warn!(%attempt_id, %scheme, "messaging app unavailable");
                CheckoutError::ExternalAppUnavailable
            }
            LaunchError::Failed(reason) => {
                tracing::error!(%attempt_id, %reason, "deep link handoff failed");
                CheckoutError::HandoffError(reason)
            }
        })?;

        cart.close_cart();
        tracing::info!(%attempt_id, "checkout handed off");

        Ok(CheckoutOutcome::HandedOff(CheckoutReceipt {
            attempt_id,
            recipient: recipient.name,
            phone: recipient.phone,
            message,
            deep_link,
            requested_at: Utc::now(),
        }))
    }

    fn recipient_of(&self, attempt_id: Uuid, owner: StockOwner) -> Result<Recipient, CheckoutError> {
        let Some(producer) = owner.producer else {
            tracing::warn!(%attempt_id, stock_id = owner.stock_id, "stock entry has no producer");
            return Err(CheckoutError::SellerLookupFailed);
        };
        let name = producer.name().map(str::to_string);

        let phone = producer
            .user
            .and_then(|user| user.phone)
            .and_then(|raw| normalize_phone(&raw, &self.country_code))
            .ok_or_else(|| {
                tracing::warn!(%attempt_id, producer_id = producer.producer_id, "producer has no phone");
                CheckoutError::MissingContactInfo
            })?;

        Ok(Recipient { name, phone })
    }
}

fn warn_on_mixed_producers(attempt_id: Uuid, lines: &[CartLine]) {
    let Some((first, rest)) = lines.split_first() else {
        return;
    };
    let others = rest
        .iter()
        .filter(|line| line.product.producer != first.product.producer)
        .count();
    if others > 0 {
        tracing::warn!(
            %attempt_id,
            recipient = %first.product.producer,
            other_lines = others,
            "cart mixes producers, whole order goes to the first line's seller"
        );
    }
}
