//! Shared UI crate for esgview. Views, dashboard widgets and the KPI logic
//! behind them live here; the `web` and `desktop` crates only add routing.

pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    mod notice;
    pub use notice::{Notice, NoticeBanner};
}

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}
