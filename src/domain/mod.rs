//! Dealer, review and session state, independent of the UI and the HTTP client.

pub mod app_state;
pub mod dealer_page;
pub mod entities;
pub mod session;

pub use app_state::{AppState, PersistedState};
pub use dealer_page::{DealerPageState, FetchTicket, PageView, ReviewsView};
pub use entities::{parse_purchase_date, Dealer, Review, Sentiment};
pub use session::{SessionStore, USERNAME_KEY};
