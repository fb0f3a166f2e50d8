//! Optional feature-gated extensions for ZoomGrid.
//!
//! Each module is behind a Cargo feature flag and can be enabled
//! independently. Extensions plug into a grid through
//! [`ZoomGrid::add_extension`](zoomgrid_core::ZoomGrid::add_extension) and
//! observe it only through lifecycle hooks and dispatched events.
//!
//! # Available Features
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `transparency` | [`transparency`] | Opacity ramps tracking each cell's progress |
//! | `highlight` | [`highlight`] | Hover highlight with click-to-focus (depends on transparency) |
//! | `container-fade` | [`container_fade`] | Fade the grid out after pointer inactivity (depends on transparency) |
//! | `restore-button` | [`restore_button`] | "Close" link over the focused cell |
//! | `frame` | [`frame`] | Eight-part decorative frame and scroll division per cell |
//! | `disable-folded-links` | [`disable_folded_links`] | Suppress link activation in unfocused cells |
//! | `max-child-width` | [`max_child_width`] | Fix descendant widths to the focused content width |
//! | `unfocused-hide` | [`unfocused_hide`] | Show selected descendants only in the settled focused cell |
//! | `gallery` | [`gallery`] | Build a grid from a list of image links |
//!
//! Extensions that depend on another one check for it at registration and
//! fail with [`ExtensionError::Requires`](zoomgrid_core::ExtensionError::Requires)
//! if it is missing, so register dependencies first.

#![forbid(unsafe_code)]

#[cfg(feature = "transparency")]
pub mod transparency;

#[cfg(feature = "highlight")]
pub mod highlight;

#[cfg(feature = "container-fade")]
pub mod container_fade;

#[cfg(feature = "restore-button")]
pub mod restore_button;

#[cfg(feature = "frame")]
pub mod frame;

#[cfg(feature = "disable-folded-links")]
pub mod disable_folded_links;

#[cfg(feature = "max-child-width")]
pub mod max_child_width;

#[cfg(feature = "unfocused-hide")]
pub mod unfocused_hide;

#[cfg(feature = "gallery")]
pub mod gallery;

#[cfg(feature = "container-fade")]
pub use container_fade::{ContainerFade, ContainerFadeConfig};
#[cfg(feature = "disable-folded-links")]
pub use disable_folded_links::DisableFoldedLinks;
#[cfg(feature = "frame")]
pub use frame::{Frame, FrameConfig};
#[cfg(feature = "gallery")]
pub use gallery::create_for_gallery;
#[cfg(feature = "highlight")]
pub use highlight::{Highlight, HighlightConfig, HighlightMode};
#[cfg(feature = "max-child-width")]
pub use max_child_width::{ChildWidthRule, MaxChildWidth, MaxChildWidthConfig};
#[cfg(feature = "restore-button")]
pub use restore_button::RestoreButton;
#[cfg(feature = "transparency")]
pub use transparency::{Transparency, TransparencyConfig};
#[cfg(feature = "unfocused-hide")]
pub use unfocused_hide::UnfocusedHide;
