//! # Reveal
//!
//! Viewport-triggered, one-shot animations.
//!
//! Every animated element walks the [`RevealState`] machine
//! `Pending -> Visible -> Animating -> Done` exactly once:
//!
//! * [`Counters`] count `.counter[data-count]` values up from zero.
//! * [`ProgressBars`] fill `.progress-bar[data-width]` bars and tick their
//!   percentage labels.
//!
//! Visibility is not pushed: the host calls `take_visible` after the page
//! loads and after each scroll, then runs `animate` for the returned elements.

mod counter;
mod progress;
mod state;

pub use counter::{Counters, counter_frames, parse_count};
pub use progress::{ProgressBars, percent_labels};
pub use state::{RevealError, RevealErrorExt, RevealSet, RevealState};
