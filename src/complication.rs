//! Complication slots and their data
//!
//! The face has four fixed slots. Each slot has an id the host uses to
//! address it and a list of data shapes it accepts.

use heapless::String;

/// Capacity of the text fields carried in a [`ComplicationData`].
pub const TEXT_LEN: usize = 32;

/// Data shapes a complication slot can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComplicationType {
    /// Slot was cleared by the provider
    Empty,
    /// Provider has nothing to show right now
    NoData,
    /// Single icon
    Icon,
    /// A few characters, optionally with an icon
    ShortText,
    /// A line of text, optionally with an icon and title
    LongText,
}

/// Location of a complication slot on the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComplicationLocation {
    /// Top of the face, left of the date.
    HeadLeft,
    /// Top of the face, right of the date, aligned with the end of the date.
    HeadRight,
    /// The largest open space, in the center.
    Center,
    /// Anchored to the bottom of the face.
    Bottom,
}

impl ComplicationLocation {
    /// All slots in declaration order.
    pub const ALL: [ComplicationLocation; 4] = [
        ComplicationLocation::HeadLeft,
        ComplicationLocation::HeadRight,
        ComplicationLocation::Center,
        ComplicationLocation::Bottom,
    ];

    /// Id the host uses for this slot.
    pub const fn id(self) -> u8 {
        match self {
            ComplicationLocation::HeadLeft => 0,
            ComplicationLocation::HeadRight => 1,
            ComplicationLocation::Center => 2,
            ComplicationLocation::Bottom => 3,
        }
    }

    /// Data shapes this slot accepts.
    pub const fn supported_types(self) -> &'static [ComplicationType] {
        match self {
            ComplicationLocation::HeadLeft
            | ComplicationLocation::HeadRight
            | ComplicationLocation::Bottom => {
                &[ComplicationType::Icon, ComplicationType::ShortText]
            }
            ComplicationLocation::Center => &[ComplicationType::Icon, ComplicationType::LongText],
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|location| location.id() == id)
    }

    /// Position of this slot in [`Self::ALL`].
    pub(crate) const fn index(self) -> usize {
        self.id() as usize
    }
}

/// Ids of all slots, in declaration order.
pub fn complication_ids() -> [u8; 4] {
    ComplicationLocation::ALL.map(ComplicationLocation::id)
}

/// Accepted data shapes of all slots, parallel to [`complication_ids`].
pub fn supported_types() -> [&'static [ComplicationType]; 4] {
    ComplicationLocation::ALL.map(ComplicationLocation::supported_types)
}

/// Built-in data providers the host can attach to a slot by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemProvider {
    StepCount,
    WatchBattery,
    Date,
    Time,
    DayOfWeek,
}

/// Payload pushed into a slot by the host.
///
/// Stored as-is; nothing checks it against the slot's accepted types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplicationData {
    kind: ComplicationType,
    text: Option<String<TEXT_LEN>>,
    title: Option<String<TEXT_LEN>>,
    icon: Option<char>,
}

impl ComplicationData {
    pub fn empty() -> Self {
        Self::of_kind(ComplicationType::Empty)
    }

    pub fn no_data() -> Self {
        Self::of_kind(ComplicationType::NoData)
    }

    pub fn icon(icon: char) -> Self {
        Self {
            icon: Some(icon),
            ..Self::of_kind(ComplicationType::Icon)
        }
    }

    /// Short text, truncated to [`TEXT_LEN`] bytes on a char boundary.
    pub fn short_text(text: &str) -> Self {
        Self {
            text: Some(truncated(text)),
            ..Self::of_kind(ComplicationType::ShortText)
        }
    }

    /// Long text, truncated to [`TEXT_LEN`] bytes on a char boundary.
    pub fn long_text(text: &str) -> Self {
        Self {
            text: Some(truncated(text)),
            ..Self::of_kind(ComplicationType::LongText)
        }
    }

    pub fn with_icon(mut self, icon: char) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(truncated(title));
        self
    }

    pub fn kind(&self) -> ComplicationType {
        self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn icon_glyph(&self) -> Option<char> {
        self.icon
    }

    fn of_kind(kind: ComplicationType) -> Self {
        Self {
            kind,
            text: None,
            title: None,
            icon: None,
        }
    }
}

fn truncated(text: &str) -> String<TEXT_LEN> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
