//! Selection state enums.

use serde::{Deserialize, Serialize};

/// Which way the arrow between the two panels points.
///
/// This is the whole selection state of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArrowDirection {
    /// Arrow points into the right panel (the left panel was selected).
    #[default]
    PointingRight,
    /// Arrow points into the left panel (the right panel was selected).
    PointingLeft,
}

impl ArrowDirection {
    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            ArrowDirection::PointingRight => ArrowDirection::PointingLeft,
            ArrowDirection::PointingLeft => ArrowDirection::PointingRight,
        }
    }

    /// The panel the arrow points into. That panel is drawn dark.
    pub fn target_panel(self) -> Panel {
        match self {
            ArrowDirection::PointingRight => Panel::Right,
            ArrowDirection::PointingLeft => Panel::Left,
        }
    }

    /// The panel whose selection produces this direction.
    pub fn selected_panel(self) -> Panel {
        self.target_panel().other()
    }

    /// Get display name for this direction.
    pub fn name(self) -> &'static str {
        match self {
            ArrowDirection::PointingRight => "Pointing right",
            ArrowDirection::PointingLeft => "Pointing left",
        }
    }
}

/// Which polygon family a mask is built from.
///
/// `RightSide` masks carry their notch on the panel's left edge and belong
/// to the right-hand panel; `LeftSide` masks are the horizontal mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowPosition {
    LeftSide,
    RightSide,
}

/// One of the two panels of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    Left,
    Right,
}

impl Panel {
    /// Both panels, left first.
    pub const ALL: [Panel; 2] = [Panel::Left, Panel::Right];

    /// The other panel.
    pub fn other(self) -> Self {
        match self {
            Panel::Left => Panel::Right,
            Panel::Right => Panel::Left,
        }
    }

    /// Mask family used to clip this panel.
    pub fn position(self) -> ArrowPosition {
        match self {
            Panel::Left => ArrowPosition::LeftSide,
            Panel::Right => ArrowPosition::RightSide,
        }
    }

    /// Direction a tap on this panel selects: the arrow points away from it.
    pub fn direction_on_tap(self) -> ArrowDirection {
        match self {
            Panel::Left => ArrowDirection::PointingRight,
            Panel::Right => ArrowDirection::PointingLeft,
        }
    }

    /// Array index (left = 0, right = 1).
    pub fn index(self) -> usize {
        match self {
            Panel::Left => 0,
            Panel::Right => 1,
        }
    }

    /// Get display name for this panel.
    pub fn name(self) -> &'static str {
        match self {
            Panel::Left => "Left",
            Panel::Right => "Right",
        }
    }
}
