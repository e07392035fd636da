use crate::behaviors::Behaviors;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

/// Every tunable of the page behavior layer.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FolioConfigInner {
    pub behaviors: Behaviors,
    pub selectors: SelectorConfig,
    pub navigation: NavigationConfig,
    pub typing: TypingConfig,
    pub counters: CounterConfig,
    pub progress: ProgressConfig,
    pub contact: ContactConfig,
    pub scroll_animations: ScrollAnimationConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into behaviors.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct FolioConfig {
    #[serde(flatten, default)]
    inner: Arc<FolioConfigInner>,
}

impl Deref for FolioConfig {
    type Target = FolioConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for FolioConfig {
    fn deref_mut(&mut self) -> &mut FolioConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Element ids and lookup classes the page layout must expose.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub navbar_id: String,
    pub navbar_class: String,
    pub nav_link_class: String,
    pub collapse_class: String,
    pub section_tag: String,
    pub typed_name_id: String,
    pub typed_title_id: String,
    pub counter_class: String,
    pub counter_attribute: String,
    pub skill_card_class: String,
    pub progress_bar_class: String,
    pub progress_attribute: String,
    pub skill_percent_class: String,
    pub form_id: String,
    pub name_field_id: String,
    pub email_field_id: String,
    pub message_field_id: String,
    pub name_error_id: String,
    pub email_error_id: String,
    pub message_error_id: String,
    pub status_id: String,
    pub submit_id: String,
    pub submit_label_class: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Delay between page load and the navbar entrance mark.
    pub entrance_delay_ms: u64,
    /// Scroll offset from which the navbar is styled as scrolled.
    pub scrolled_threshold: f64,
    /// Added to the scroll offset before probing which section is in view.
    pub active_offset: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub start_delay_ms: u64,
    pub name_text: String,
    pub name_interval_ms: u64,
    pub pause_ms: u64,
    pub title_text: String,
    pub title_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u64,
    pub frame_ms: u64,
    /// Visible fraction of the element that triggers the animation.
    pub threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub start_delay_ms: u64,
    pub steps: u32,
    pub step_interval_ms: u64,
    pub threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub name_min_chars: usize,
    pub message_min_chars: usize,
    pub email_pattern: String,
    pub name_error: String,
    pub email_error: String,
    pub message_error: String,
    pub invalid_status: String,
    pub success_status: String,
    pub default_label: String,
    pub sending_label: String,
    pub sent_label: String,
    pub send_delay_ms: u64,
    pub restore_delay_ms: u64,
}

/// Options handed to the scroll-animation library, when the page ships one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollAnimationConfig {
    pub duration_ms: u64,
    pub easing: String,
    pub once: bool,
    pub offset: u32,
}

// --- Durations ---

impl NavigationConfig {
    #[must_use]
    pub const fn entrance_delay(&self) -> Duration {
        Duration::from_millis(self.entrance_delay_ms)
    }
}

impl TypingConfig {
    #[must_use]
    pub const fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    #[must_use]
    pub const fn name_interval(&self) -> Duration {
        Duration::from_millis(self.name_interval_ms)
    }

    #[must_use]
    pub const fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    #[must_use]
    pub const fn title_interval(&self) -> Duration {
        Duration::from_millis(self.title_interval_ms)
    }
}

impl CounterConfig {
    #[must_use]
    pub const fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// How much a counter grows per frame to reach `target` in `duration_ms`.
    #[must_use]
    pub fn step_for(&self, target: i64) -> f64 {
        let frames = self.duration_ms as f64 / self.frame_ms.max(1) as f64;
        target as f64 / frames
    }
}

impl ProgressConfig {
    #[must_use]
    pub const fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    #[must_use]
    pub const fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

impl ContactConfig {
    #[must_use]
    pub const fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }

    #[must_use]
    pub const fn restore_delay(&self) -> Duration {
        Duration::from_millis(self.restore_delay_ms)
    }
}

// --- Default ---

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            navbar_id: "mainNavbar".to_owned(),
            navbar_class: "navbar".to_owned(),
            nav_link_class: "nav-link".to_owned(),
            collapse_class: "navbar-collapse".to_owned(),
            section_tag: "section".to_owned(),
            typed_name_id: "typed-name".to_owned(),
            typed_title_id: "typed-title".to_owned(),
            counter_class: "counter".to_owned(),
            counter_attribute: "data-count".to_owned(),
            skill_card_class: "skill-card".to_owned(),
            progress_bar_class: "progress-bar".to_owned(),
            progress_attribute: "data-width".to_owned(),
            skill_percent_class: "skill-percent".to_owned(),
            form_id: "contactForm".to_owned(),
            name_field_id: "contactName".to_owned(),
            email_field_id: "contactEmail".to_owned(),
            message_field_id: "contactMessage".to_owned(),
            name_error_id: "nameError".to_owned(),
            email_error_id: "emailError".to_owned(),
            message_error_id: "messageError".to_owned(),
            status_id: "formStatus".to_owned(),
            submit_id: "submitBtn".to_owned(),
            submit_label_class: "btn-text".to_owned(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { entrance_delay_ms: 100, scrolled_threshold: 50.0, active_offset: 120.0 }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 600,
            name_text: "Muhammad Kashan".to_owned(),
            name_interval_ms: 80,
            pause_ms: 400,
            title_text: "Entry-Level Full Stack Web Developer".to_owned(),
            title_interval_ms: 60,
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { duration_ms: 1500, frame_ms: 16, threshold: 0.5 }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { start_delay_ms: 500, steps: 30, step_interval_ms: 50, threshold: 0.3 }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            message_min_chars: 10,
            email_pattern: r"^[^\s@\x{FEFF}]+@[^\s@\x{FEFF}]+\.[^\s@\x{FEFF}]+$".to_owned(),
            name_error: "Name must be at least 2 characters.".to_owned(),
            email_error: "Please enter a valid email address.".to_owned(),
            message_error: "Message must be at least 10 characters.".to_owned(),
            invalid_status: "Please fix the errors below.".to_owned(),
            success_status: "Thank you! Your message has been sent successfully.".to_owned(),
            default_label: "Send Message".to_owned(),
            sending_label: "Sending...".to_owned(),
            sent_label: "Sent!".to_owned(),
            send_delay_ms: 800,
            restore_delay_ms: 2500,
        }
    }
}

impl Default for ScrollAnimationConfig {
    fn default() -> Self {
        Self { duration_ms: 700, easing: "ease-out-cubic".to_owned(), once: true, offset: 80 }
    }
}
