pub const APP_NAME: &str = "Dealership Reviews";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_label() -> String {
    format!("v{APP_VERSION}")
}

/// Sent with every backend request.
pub fn user_agent() -> String {
    format!("dealership-reviews/{APP_VERSION}")
}
