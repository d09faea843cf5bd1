//! Coordination of the site-wide loading indicators.
//!
//! Two independent pieces live here:
//!
//! - the loading store (`provide_loading` / `use_loading`), a shared
//!   last-write-wins flag with a message and display options, fed by
//!   `use_component_loading` and `use_data_loading`;
//! - the initial loader (`provide_initial_loading` / `use_initial_loading`),
//!   a one-shot splash covering first paint.
//!
//! The store keeps no count of outstanding work: two overlapping busy sources
//! share one flag, and whichever clears it first hides the loader.

pub mod component_loading;
pub mod data_loading;
pub mod error;
pub mod guard;
pub mod initial;
pub mod options;
pub mod sink;
pub mod state;
pub mod store;

pub use component_loading::{COMPONENT_LOADER_OPTIONS, ComponentLoading, use_component_loading};
pub use data_loading::{DEFAULT_FETCH_MESSAGE, DataLoading, run_with_loader, use_data_loading};
pub use error::LoadingError;
pub use guard::LoadingGuard;
pub use initial::{
    InitialLoad, InitialLoadEvent, InitialLoadPhase, InitialLoadTimings, InitialLoading,
    provide_initial_loading, try_use_initial_loading, use_initial_loading,
};
pub use options::{LoaderOptions, LoaderOptionsPatch, LoaderPosition, LoaderSize};
pub use sink::LoadingSink;
pub use state::{DEFAULT_MESSAGE, LoadingState};
pub use store::{LoadingStore, provide_loading, try_use_loading, use_loading};
