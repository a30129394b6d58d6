pub mod cart;
pub mod config;
pub mod currency;
pub mod domain;
pub mod effects;
pub mod errors;
pub mod rfq;

pub use cart::{
    apply, CartBadge, CartCommand, CartLine, CartListing, CartOutcome, CartRepository, CartStore,
    SlotWrite,
};
pub use currency::{format_amount, format_currency, line_price_display, PRICE_ON_REQUEST};
pub use domain::cart::{AddToCart, Cart, CartItem, CartTotals, ModelCode};
pub use domain::contact::{ContactField, RfqContactInfo};
pub use effects::SideEffect;
pub use errors::{ApplicationError, DomainError};
pub use rfq::{Clock, FixedClock, RfqComposer, RfqNumber, RfqSubmission, SystemClock};
