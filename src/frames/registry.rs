use std::{fmt, str::FromStr};

use crate::{
    foundation::error::{ReelError, ReelResult},
    frames::geometry::{FrameGeometry, RenderGeometry},
};

/// Identity of a compositing style. Wire values are the SCREAMING_SNAKE_CASE names.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameVariantId {
    /// Video band centered with equal black space above and below. Backend default.
    #[default]
    CenterStrip,
    /// Centered band on dark gray, bounded by two white divider lines.
    DividerFrame,
    /// Band pushed lower, leaving a taller top text zone.
    LowerAnchor,
}

impl FrameVariantId {
    /// Registry order.
    pub const ALL: [FrameVariantId; 3] = [
        FrameVariantId::CenterStrip,
        FrameVariantId::DividerFrame,
        FrameVariantId::LowerAnchor,
    ];

    /// Wire id, e.g. `DIVIDER_FRAME`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CenterStrip => "CENTER_STRIP",
            Self::DividerFrame => "DIVIDER_FRAME",
            Self::LowerAnchor => "LOWER_ANCHOR",
        }
    }

    /// Registry entry with display metadata.
    pub fn variant(self) -> &'static FrameVariant {
        match self {
            Self::CenterStrip => &REGISTRY[0],
            Self::DividerFrame => &REGISTRY[1],
            Self::LowerAnchor => &REGISTRY[2],
        }
    }

    /// Shorthand for [`FrameGeometry::for_variant`].
    pub fn geometry(self) -> FrameGeometry {
        FrameGeometry::for_variant(self)
    }

    /// Shorthand for [`RenderGeometry::for_variant`].
    pub fn render_geometry(self) -> RenderGeometry {
        RenderGeometry::for_variant(self)
    }
}

impl fmt::Display for FrameVariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameVariantId {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ReelError::UnknownFrameVariant(s.to_string()))
    }
}

/// A selectable frame style with its display metadata.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FrameVariant {
    /// Wire identity.
    pub id: FrameVariantId,
    /// Human-readable name.
    pub name: &'static str,
    /// One-line description for pickers.
    pub description: &'static str,
}

static REGISTRY: [FrameVariant; 3] = [
    FrameVariant {
        id: FrameVariantId::CenterStrip,
        name: "Center Strip",
        description: "Clean, minimal layout with video perfectly centered",
    },
    FrameVariant {
        id: FrameVariantId::DividerFrame,
        name: "Divider Frame",
        description: "Professional editorial style with divider lines",
    },
    FrameVariant {
        id: FrameVariantId::LowerAnchor,
        name: "Lower Anchor",
        description: "Cinematic layout with video anchored lower",
    },
];

/// All frame variants, in display order.
pub fn list_variants() -> &'static [FrameVariant] {
    &REGISTRY
}

/// Looks up a variant by its wire id.
pub fn variant_for(id: &str) -> ReelResult<&'static FrameVariant> {
    Ok(id.parse::<FrameVariantId>()?.variant())
}

/// Preview geometry for a wire id. Unknown ids are an error, never a fallback.
pub fn geometry_for(id: &str) -> ReelResult<FrameGeometry> {
    Ok(id.parse::<FrameVariantId>()?.geometry())
}

/// Render-service pixel geometry for a wire id.
pub fn render_geometry_for(id: &str) -> ReelResult<RenderGeometry> {
    Ok(id.parse::<FrameVariantId>()?.render_geometry())
}

#[cfg(test)]
#[path = "../../tests/unit/frames/registry.rs"]
mod tests;
