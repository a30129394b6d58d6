use serde::Serialize;

/// Work the hosting page performs after a cart or RFQ command. Commands never
/// touch the page themselves; they hand these back in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SideEffect {
    /// Transient toast; dismissed by the host after `dismiss_after_ms`.
    Notify { title: String, body: String, dismiss_after_ms: u64 },
    /// Re-render the floating cart button and header badge.
    RefreshCartBadge { item_count: u64 },
    /// Re-render the cart listing if the cart page is showing.
    RefreshCartListing,
    /// Open `url` in a new browsing context.
    OpenExternalLink { url: String },
    Redirect { url: String, after_ms: u64 },
}
