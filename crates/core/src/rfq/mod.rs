pub mod clock;
pub mod message;

use serde::Serialize;
use tracing::{info, warn};

use crate::cart::{CartRepository, CartStore};
use crate::config::RfqConfig;
use crate::domain::cart::Cart;
use crate::domain::contact::RfqContactInfo;
use crate::effects::SideEffect;
use crate::errors::{ApplicationError, DomainError};

pub use clock::{Clock, FixedClock, SystemClock};
pub use message::{deep_link, format_rfq_date, product_section, render_message, RfqNumber};

/// Result of a successful RFQ: the rendered message and what the page must do with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RfqSubmission {
    pub rfq_number: RfqNumber,
    pub date: String,
    pub message: String,
    pub deep_link: String,
    pub effects: Vec<SideEffect>,
}

pub struct RfqComposer<C = SystemClock> {
    config: RfqConfig,
    clock: C,
}

impl RfqComposer<SystemClock> {
    pub fn new(config: RfqConfig) -> Self {
        Self { config, clock: SystemClock }
    }
}

impl<C: Clock> RfqComposer<C> {
    pub fn with_clock(config: RfqConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Validates the contact fields, then the cart, and renders the message.
    /// Pure apart from reading the clock.
    pub fn compose(
        &self,
        contact: &RfqContactInfo,
        cart: &Cart,
    ) -> Result<RfqSubmission, DomainError> {
        let contact = contact.validate()?;
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let now = self.clock.now();
        let rfq_number = RfqNumber::from_timestamp_millis(now.timestamp_millis());
        let date = format_rfq_date(&now);
        let message = render_message(&rfq_number, &date, &contact, cart.items());
        let deep_link =
            deep_link(&self.config.messaging_base_url, &self.config.business_handle, &message);

        Ok(RfqSubmission {
            rfq_number,
            date,
            message,
            effects: vec![SideEffect::OpenExternalLink { url: deep_link.clone() }],
            deep_link,
        })
    }

    /// Reads the stored cart and composes the RFQ. With `clear_cart_after_submit`
    /// the cart is emptied and a delayed redirect to the catalog is appended.
    pub fn place_rfq<R: CartRepository>(
        &self,
        store: &CartStore<R>,
        contact: &RfqContactInfo,
    ) -> Result<RfqSubmission, ApplicationError> {
        let cart = store.get_cart()?;
        let mut submission = match self.compose(contact, &cart) {
            Ok(submission) => submission,
            Err(error) => {
                warn!(
                    event_name = "rfq.validation.failed",
                    reason = %error,
                    focus = error.focus_field().map(|field| field.input_id()).unwrap_or("none"),
                    "rfq submission rejected"
                );
                return Err(error.into());
            }
        };

        if self.config.clear_cart_after_submit {
            let cleared = store.clear_cart()?;
            submission.effects.extend(cleared.effects);
            submission.effects.push(SideEffect::Redirect {
                url: self.config.redirect_url.clone(),
                after_ms: self.config.redirect_delay_ms,
            });
        }

        info!(
            event_name = "rfq.composed",
            rfq_number = %submission.rfq_number,
            line_count = cart.items().len(),
            item_count = cart.item_count(),
            cart_cleared = self.config.clear_cart_after_submit,
            "rfq message composed"
        );

        Ok(submission)
    }
}
