//! Reusable UI pieces shared across pages.
//!
//! Besides the page chrome (header, icons, error page), this holds the loader
//! views that render the loading store and the first-paint splash.

pub mod error_template;
pub mod header;
pub mod icons;
pub mod loader;
pub mod sections;
pub mod splash;
