//! Scroll-driven scene state
//!
//! Everything here is platform-free and advanced by explicit frame times:
//! - Scroll offset → section index, which closes the menu, retargets the
//!   group transforms and drops the avatar into its Falling clip
//! - Menu flag → camera pan
//! - Carousel selection, hover tilt and tag layout for the project cards

pub mod background;
pub mod camera;
pub mod carousel;
pub mod character;
pub mod composer;
pub mod float;
pub mod groups;
pub mod picking;
pub mod scroll;
pub mod section;
pub mod state;
pub mod tags;
pub mod tilt;
pub mod timer;

pub use background::{BackgroundTimeline, parse_hex_color};
pub use camera::{Camera, CameraRig};
pub use carousel::{CardPose, ProjectCarousel};
pub use character::{CharacterAnimation, CharacterAnimator};
pub use composer::SceneComposer;
pub use float::{FloatingShape, ShapeKind};
pub use groups::{SceneGroup, TransformTarget, ViewportY, target_for};
pub use scroll::ScrollTracker;
pub use section::{SectionChange, SectionIndex, SectionResolver, resolve_section};
pub use state::{CarouselCommand, FrameInput, Portfolio, SceneEvent};
pub use tags::{PlacedTag, TagLayout};
pub use tilt::Tilt;
pub use timer::{TimerId, Timers};
