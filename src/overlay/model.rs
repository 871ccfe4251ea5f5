use std::fmt;

use crate::foundation::error::{ReelError, ReelResult};

/// Maximum overlay length, counted in characters (not bytes).
pub const MAX_OVERLAY_CHARS: usize = 200;

/// Font size bounds accepted by the render service for explicit overrides.
pub const MIN_FONT_SIZE: u32 = 36;
/// See [`MIN_FONT_SIZE`].
pub const MAX_FONT_SIZE: u32 = 72;

/// Canvas region holding at most one overlay.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Above the video band.
    Top,
    /// Below the video band.
    Bottom,
}

impl Zone {
    /// Top first.
    pub const ALL: [Zone; 2] = [Zone::Top, Zone::Bottom];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Zone {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(ReelError::validation(format!(
                "unknown zone '{other}' (expected 'top' or 'bottom')"
            ))),
        }
    }
}

/// User-authored text bound to a zone. `font_size`, `x` and `y` are optional
/// overrides in reel-canvas pixels; absent values are derived by the compositor.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextOverlay {
    /// Raw text as typed, possibly blank.
    pub text: String,
    /// Zone the overlay occupies.
    pub zone: Zone,
    /// Font size override, within [`MIN_FONT_SIZE`]..=[`MAX_FONT_SIZE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Left edge override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// Top edge override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

impl TextOverlay {
    /// Overlay without overrides.
    pub fn new(zone: Zone, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            zone,
            font_size: None,
            x: None,
            y: None,
        }
    }

    /// Empty and whitespace-only overlays keep their zone but render nothing.
    pub fn is_visible(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Checks the text length and the font size override.
    pub fn validate(&self) -> ReelResult<()> {
        check_text_len(&self.text)?;
        if let Some(size) = self.font_size
            && !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size)
        {
            return Err(ReelError::validation(format!(
                "font_size {size} outside {MIN_FONT_SIZE}..={MAX_FONT_SIZE} for zone '{}'",
                self.zone
            )));
        }
        Ok(())
    }
}

/// Fails with [`ReelError::TextTooLong`] above [`MAX_OVERLAY_CHARS`] characters.
pub fn check_text_len(text: &str) -> ReelResult<()> {
    let len = text.chars().count();
    if len > MAX_OVERLAY_CHARS {
        return Err(ReelError::TextTooLong {
            len,
            max: MAX_OVERLAY_CHARS,
        });
    }
    Ok(())
}

/// Zone-partitioned overlay collection: never two overlays in the same zone.
///
/// Serialized as the wire array (top first, then bottom); deserializing an array with a
/// duplicated zone or an invalid overlay fails.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(into = "Vec<TextOverlay>", try_from = "Vec<TextOverlay>")]
pub struct OverlaySet {
    slots: [Option<TextOverlay>; 2],
}

impl OverlaySet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay in `zone`, if any.
    pub fn get(&self, zone: Zone) -> Option<&TextOverlay> {
        self.slots[zone.slot()].as_ref()
    }

    /// Whether `zone` holds an overlay.
    pub fn is_occupied(&self, zone: Zone) -> bool {
        self.get(zone).is_some()
    }

    /// Number of occupied zones.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// No zone is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overlays in zone order, top first.
    pub fn iter(&self) -> impl Iterator<Item = &TextOverlay> {
        self.slots.iter().flatten()
    }

    /// Inserts into an empty zone. On error the set is unchanged.
    pub fn insert(&mut self, overlay: TextOverlay) -> ReelResult<()> {
        let slot = &mut self.slots[overlay.zone.slot()];
        if slot.is_some() {
            return Err(ReelError::ZoneOccupied(overlay.zone));
        }
        overlay.validate()?;
        *slot = Some(overlay);
        Ok(())
    }

    /// Replaces the text of an existing overlay, keeping its overrides.
    /// Returns whether the text actually changed.
    pub fn set_text(&mut self, zone: Zone, text: impl Into<String>) -> ReelResult<bool> {
        let text = text.into();
        check_text_len(&text)?;
        let overlay = self.slots[zone.slot()]
            .as_mut()
            .ok_or(ReelError::ZoneEmpty(zone))?;
        if overlay.text == text {
            return Ok(false);
        }
        overlay.text = text;
        Ok(true)
    }

    /// Empties `zone`, returning what it held.
    pub fn remove(&mut self, zone: Zone) -> Option<TextOverlay> {
        self.slots[zone.slot()].take()
    }

    /// Overlays that should reach the render service: everything with visible text.
    pub fn visible(&self) -> Vec<TextOverlay> {
        self.iter().filter(|o| o.is_visible()).cloned().collect()
    }
}

impl From<OverlaySet> for Vec<TextOverlay> {
    fn from(value: OverlaySet) -> Self {
        value.slots.into_iter().flatten().collect()
    }
}

impl TryFrom<Vec<TextOverlay>> for OverlaySet {
    type Error = ReelError;

    fn try_from(value: Vec<TextOverlay>) -> Result<Self, Self::Error> {
        let mut set = OverlaySet::new();
        for overlay in value {
            set.insert(overlay)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/model.rs"]
mod tests;
