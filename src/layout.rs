use crate::animation::FLIGHT_DURATION;
use crate::engine::{Point, Size};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

// Stroke colors are fixed; everything a page might want to tweak lives in
// `Layout`.
pub const OUTLINE_COLOR: &str = "#1f2937";
pub const ARROW_COLOR: &str = "#374151";
pub const HIGHLIGHT_COLOR: &str = "rgba(255, 255, 255, 0.3)";

const REST_COLORS: [&str; 4] = ["#fbbf24", "#3b82f6", "#ef4444", "#10b981"]; // amber, blue, red, green
const HIT_COLOR: &str = "#6b7280"; // gray

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SlotColors {
    pub rest: String,
    pub hit: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArrowSize {
    /// body length, measured back from the head's base
    pub length: f64,
    /// body thickness
    pub thickness: f64,
    pub head_length: f64,
    pub head_half_width: f64,
}

impl Default for ArrowSize {
    fn default() -> Self {
        ArrowSize {
            length: 40.0,
            thickness: 8.0,
            head_length: 20.0,
            head_half_width: 12.0,
        }
    }
}

/// Static scene configuration. One slot per palette entry: slot `i` gets a
/// target at (`target_column`, `first_row + i * row_spacing`) and an arrow
/// resting at (`launch_column`, same row).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Layout {
    pub surface: Size,
    pub target_column: f64,
    pub first_row: f64,
    pub row_spacing: f64,
    pub radius: f64,
    pub launch_column: f64,
    /// gap between a target's edge and where its arrow stops
    pub clearance: f64,
    pub arrow: ArrowSize,
    pub palette: Vec<SlotColors>,
    /// milliseconds
    pub flight_duration: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            surface: Size {
                width: 600.0,
                height: 400.0,
            },
            target_column: 80.0,
            first_row: 80.0,
            row_spacing: 80.0,
            radius: 30.0,
            launch_column: 520.0,
            clearance: 10.0,
            arrow: ArrowSize::default(),
            palette: REST_COLORS
                .iter()
                .map(|rest| SlotColors {
                    rest: rest.to_string(),
                    hit: HIT_COLOR.to_string(),
                })
                .collect(),
            flight_duration: FLIGHT_DURATION,
        }
    }
}

impl Layout {
    pub fn slots(&self) -> usize {
        self.palette.len()
    }

    pub fn target_center(&self, slot: usize) -> Point {
        Point::new(self.target_column, self.row(slot))
    }

    pub fn launch_point(&self, slot: usize) -> Point {
        Point::new(self.launch_column, self.row(slot))
    }

    fn row(&self, slot: usize) -> f64 {
        self.first_row + slot as f64 * self.row_spacing
    }

    /// A scene that can't be drawn or animated is refused up front
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.palette.is_empty(), "Layout needs at least one slot");
        ensure!(
            self.radius > 0.0,
            "Target radius must be positive, got {}",
            self.radius
        );
        ensure!(
            self.flight_duration > 0.0,
            "Flight duration must be positive, got {}",
            self.flight_duration
        );
        ensure!(
            self.clearance >= 0.0,
            "Clearance can't be negative, got {}",
            self.clearance
        );
        ensure!(
            self.arrow.length > 0.0
                && self.arrow.thickness > 0.0
                && self.arrow.head_length > 0.0
                && self.arrow.head_half_width > 0.0,
            "Arrow dimensions must be positive, got {:?}",
            self.arrow
        );
        ensure!(
            self.surface.width > 0.0 && self.surface.height > 0.0,
            "Surface must have an area, got {:?}",
            self.surface
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_the_demo_page() {
        let layout = Layout::default();
        assert_eq!(layout.slots(), 4);
        assert_eq!(layout.target_center(0), Point::new(80.0, 80.0));
        assert_eq!(layout.target_center(3), Point::new(80.0, 320.0));
        assert_eq!(layout.launch_point(2), Point::new(520.0, 240.0));
        assert_eq!(layout.palette[1].rest, "#3b82f6");
        assert!(layout.palette.iter().all(|colors| colors.hit == HIT_COLOR));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn validate_rejects_broken_layouts() {
        let empty = Layout {
            palette: Vec::new(),
            ..Layout::default()
        };
        assert!(empty.validate().is_err());

        let flat = Layout {
            radius: 0.0,
            ..Layout::default()
        };
        let message = flat.validate().unwrap_err().to_string();
        assert!(message.contains("radius"), "{}", message);

        let instant = Layout {
            flight_duration: 0.0,
            ..Layout::default()
        };
        assert!(instant.validate().is_err());

        let stubby = Layout {
            arrow: ArrowSize {
                thickness: -1.0,
                ..ArrowSize::default()
            },
            ..Layout::default()
        };
        assert!(stubby.validate().is_err());
    }
}
