//! # Showroom TUI
//!
//! A terminal catalog navigator for a component kit. The catalog is shown as
//! one long virtualized list of sections and their use cases. Handset and web
//! platforms navigate it through a drawer menu; TV-class platforms get a card
//! grid with a per-section detail view and back handling. Deep links of the
//! form `showroom://components?queryIndex=<section>&itemIndex=<slug>` jump
//! straight to a section or use case.
//!
//! ## Architecture
//!
//! Every UI element is a component that handles events and renders itself
//! against the shared [`app::App`] state, returning effects for the runtime
//! to apply. Scrolling always goes through a [`scroll::ScrollCoordinator`],
//! which recovers from requests to not-yet-measured rows with a single
//! delayed retry.

mod app;
pub mod drawer;
pub mod scroll;
pub mod showroom;
pub mod tv;
mod ui;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use showroom_registry::{DeepLinkParams, DemoCatalog};
use showroom_types::Platform;

pub use drawer::{DrawerController, DrawerState};
pub use scroll::{ScrollCoordinator, ScrollOutcome, VirtualSectionList};
pub use showroom::DemoShowroomScreen;
pub use tv::{BackHandling, BackSignalSource, TvFocusController};

/// How the showroom should start.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub platform: Platform,
    /// Deep link applied once the screen is mounted.
    pub initial_link: Option<DeepLinkParams>,
    pub retry_delay: Duration,
    pub animate: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            initial_link: None,
            retry_delay: Duration::from_millis(50),
            animate: true,
        }
    }
}

/// Runs the showroom until the user quits.
///
/// # Errors
///
/// Fails when the terminal cannot be put into (or restored from) raw mode
/// or the alternate screen, or when drawing fails.
pub async fn run(catalog: Arc<DemoCatalog>, options: RunOptions) -> Result<()> {
    ui::runtime::run_app(catalog, options).await
}
