pub mod review_card;
pub mod sentiment_icon;
pub mod toast;
