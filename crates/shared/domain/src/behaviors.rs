use crate::constants::{
    CONTACT, COUNTERS, NAVIGATION, PROGRESS, SCROLL_ANIMATIONS, SMOOTH_SCROLL, TYPING,
};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// The set of page behaviors a host wires up.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Behaviors: u32 {
        const NAVIGATION = 1 << 0;
        const SMOOTH_SCROLL = 1 << 1;
        const TYPING = 1 << 2;
        const COUNTERS = 1 << 3;
        const PROGRESS = 1 << 4;
        const CONTACT = 1 << 5;
        const SCROLL_ANIMATIONS = 1 << 6;

        const ALL = Self::NAVIGATION.bits()
            | Self::SMOOTH_SCROLL.bits()
            | Self::TYPING.bits()
            | Self::COUNTERS.bits()
            | Self::PROGRESS.bits()
            | Self::CONTACT.bits()
            | Self::SCROLL_ANIMATIONS.bits();
    }
}

impl Default for Behaviors {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<&str> for Behaviors {
    fn from(s: &str) -> Self {
        match s.trim() {
            NAVIGATION => Self::NAVIGATION,
            SMOOTH_SCROLL => Self::SMOOTH_SCROLL,
            TYPING => Self::TYPING,
            COUNTERS => Self::COUNTERS,
            PROGRESS => Self::PROGRESS,
            CONTACT => Self::CONTACT,
            SCROLL_ANIMATIONS => Self::SCROLL_ANIMATIONS,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl From<u32> for Behaviors {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for Behaviors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

/// Accepted spellings: raw bits, a list of names, or a comma separated string
/// (the form environment overrides arrive in).
#[derive(Deserialize)]
#[serde(untagged)]
enum BehaviorsRepr {
    Bits(u32),
    Names(Vec<String>),
    Joined(String),
}

impl<'de> Deserialize<'de> for Behaviors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match BehaviorsRepr::deserialize(deserializer)? {
            BehaviorsRepr::Bits(bits) => Self::from(bits),
            BehaviorsRepr::Names(names) => {
                names.iter().fold(Self::empty(), |acc, name| acc | Self::from(name.as_str()))
            },
            BehaviorsRepr::Joined(joined) => {
                joined.split(',').fold(Self::empty(), |acc, name| acc | Self::from(name))
            },
        })
    }
}
