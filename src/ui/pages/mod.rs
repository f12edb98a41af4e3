pub mod dealer;
pub mod dealers;
pub mod login;
pub mod settings;

pub use dealer::DealerPage;
pub use dealers::DealersPage;
pub use login::LoginPage;
pub use settings::SettingsPage;
