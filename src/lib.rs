//! # folio
//!
//! Client-side behavior for an academic portfolio site: a cursor-following
//! spotlight, a particle background that scatters around the pointer, tab
//! and category widgets, and a browser for a publication list served by a
//! backend API.
//!
//! This crate is platform independent. Everything that touches a page goes
//! through small adapter traits ([`FieldCanvas`], [`TargetStyler`],
//! [`BrowserView`], [`HttpClient`], [`FrameScheduler`]), so the math and the
//! state machines run and test natively. The `folio-web` crate binds them to
//! the DOM.
//!
//! ## Cursor field
//!
//! ```ignore
//! use folio::prelude::*;
//!
//! let mut field = CursorField::new(
//!     Vec2::new(1280.0, 720.0),
//!     SpotlightConfig::default(),
//!     FieldConfig::default(),
//! );
//!
//! field.handle_event(PointerEvent::Moved(Vec2::new(300.0, 200.0)));
//!
//! // Once per display frame:
//! field.frame(dt, &targets, &mut canvas, &mut styler, &mut scheduler);
//! ```
//!
//! ## Publications
//!
//! ```ignore
//! let mut browser = PublicationBrowser::new(client, view, BrowserConfig::default());
//! browser.start().await?;
//! browser.filter_by_year("2021");
//! browser.refresh().await?;
//! ```
//!
//! | Piece | Module |
//! |-------|--------|
//! | Spotlight attraction and glow | [`spotlight`] |
//! | Particle repulsion and relaxation | [`field`] |
//! | Per-frame context | [`animator`] |
//! | Fetch, group, filter, render | [`publications`] |
//! | Tabs and category filter | [`widgets`] |

pub mod animator;
pub mod config;
pub mod error;
pub mod field;
pub mod input;
pub mod publications;
pub mod render;
pub mod scheduler;
pub mod spotlight;
pub mod target;
pub mod time;
pub mod widgets;

pub use animator::CursorField;
pub use config::{DomConfig, FolioConfig};
pub use error::{ConfigError, FetchError};
pub use field::{FieldConfig, Particle, ParticleField, Repulsor};
pub use glam::Vec2;
pub use input::{PointerEvent, PointerInput};
pub use publications::{BrowserConfig, BrowserView, HttpClient, PublicationBrowser};
pub use render::{Color, FieldCanvas, Shadow, TargetStyler};
pub use scheduler::{FrameScheduler, ManualScheduler};
pub use spotlight::{GlowEffect, Spotlight, SpotlightConfig, SpotlightFrame, TargetEffect};
pub use target::{Rect, Target};
pub use widgets::{CategoryFilter, TabSet};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use folio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animator::CursorField;
    pub use crate::config::{DomConfig, FolioConfig};
    pub use crate::error::FetchError;
    pub use crate::field::FieldConfig;
    pub use crate::input::PointerEvent;
    pub use crate::publications::{
        BrowserConfig, BrowserView, HttpClient, HttpResponse, Phase, PublicationBrowser, YearFilter,
    };
    pub use crate::render::{Color, FieldCanvas, TargetStyler};
    pub use crate::scheduler::{FrameScheduler, ManualScheduler};
    pub use crate::spotlight::{GlowEffect, SpotlightConfig};
    pub use crate::target::{Rect, Target};
    pub use crate::time::FrameClock;
    pub use crate::widgets::{CategoryFilter, TabSet};
    pub use crate::Vec2;
}
