//! Visual encoding - color, size, opacity, and typography from graph position.
//!
//! Everything here is a pure function of its inputs and the encoding table,
//! so a renderer that re-renders the same filtered graph sees identical
//! attributes every time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::graph::EdgeKind;

/// An opaque sRGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form with an alpha suffix, e.g. `#4ade8080`.
    pub fn with_alpha(&self, opacity: f32) -> String {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("{}{:02x}", self, alpha)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| format!("expected #rrggbb, got '{}'", s))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("bad color '{}': {}", s, e))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Styling of prerequisite edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrerequisiteEdgeConfig {
    pub width: f32,
    /// Width when the endpoints are more than one level apart.
    pub skip_width: f32,
    /// Color when the edge runs from a lower to a higher level.
    pub forward_color: Rgb,
    /// Color for same-level or downward edges.
    pub color: Rgb,
    pub opacity: f32,
}

impl Default for PrerequisiteEdgeConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            skip_width: 3.0,
            forward_color: Rgb::new(0x44, 0x44, 0x44),
            color: Rgb::new(0x66, 0x66, 0x66),
            opacity: 0.6,
        }
    }
}

/// Styling of related edges. Never level-dependent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedEdgeConfig {
    pub width: f32,
    pub color: Rgb,
    pub opacity: f32,
}

impl Default for RelatedEdgeConfig {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Rgb::new(0x99, 0x99, 0x99),
            opacity: 0.4,
        }
    }
}

/// Lookup tables driving the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Node color per level, index 0 = level 1.
    pub palette: Vec<Rgb>,

    /// Color for levels outside the palette.
    pub fallback_color: Rgb,

    /// Node size per level; lower levels are larger.
    pub level_sizes: Vec<f32>,

    /// Size multiplier for supplementary concepts.
    pub extended_scale: f32,

    /// Size multiplier for adjacent-context concepts.
    pub adjacent_scale: f32,

    /// Opacity of adjacent-context concepts.
    pub adjacent_opacity: f32,

    /// Border width drawn around supplementary concepts.
    pub extended_border_width: f32,

    /// Label font size per level, decreasing.
    pub font_sizes: Vec<f32>,

    /// Weight for level 1 labels.
    pub emphasis_font_weight: u16,

    pub font_weight: u16,

    pub prerequisite: PrerequisiteEdgeConfig,

    pub related: RelatedEdgeConfig,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            palette: vec![
                Rgb::new(0x4a, 0xde, 0x80),
                Rgb::new(0x60, 0xa5, 0xfa),
                Rgb::new(0xfb, 0xbf, 0x24),
                Rgb::new(0xf8, 0x71, 0x71),
            ],
            fallback_color: Rgb::new(0x6b, 0x72, 0x80),
            level_sizes: vec![8.0, 7.0, 6.0, 5.0],
            extended_scale: 0.8,
            adjacent_scale: 0.6,
            adjacent_opacity: 0.3,
            extended_border_width: 2.0,
            font_sizes: vec![14.0, 12.0, 11.0, 10.0],
            emphasis_font_weight: 700,
            font_weight: 400,
            prerequisite: PrerequisiteEdgeConfig::default(),
            related: RelatedEdgeConfig::default(),
        }
    }
}

impl EncodingConfig {
    /// Check table shapes and value ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.palette.is_empty() {
            return Err("encoding.palette must not be empty".into());
        }
        if self.level_sizes.is_empty() || self.level_sizes.iter().any(|s| *s <= 0.0) {
            return Err("encoding.level_sizes must be non-empty and positive".into());
        }
        if self.font_sizes.is_empty() || self.font_sizes.iter().any(|s| *s <= 0.0) {
            return Err("encoding.font_sizes must be non-empty and positive".into());
        }
        for (name, scale) in [
            ("extended_scale", self.extended_scale),
            ("adjacent_scale", self.adjacent_scale),
        ] {
            if !(scale > 0.0 && scale <= 1.0) {
                return Err(format!("encoding.{} must be in (0, 1]", name));
            }
        }
        for (name, opacity) in [
            ("adjacent_opacity", self.adjacent_opacity),
            ("prerequisite.opacity", self.prerequisite.opacity),
            ("related.opacity", self.related.opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(format!("encoding.{} must be in [0, 1]", name));
            }
        }
        Ok(())
    }
}

/// Encoded attributes of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub color: Rgb,
    pub size: f32,
    pub opacity: f32,
    pub font_size: f32,
    pub font_weight: u16,
    /// Dashed border width; zero for core concepts.
    pub border_width: f32,
}

/// Encoded attributes of one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub width: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub dashed: bool,
    /// Draw an arrowhead at the target.
    pub directed: bool,
}

/// Maps graph position to visual attributes.
#[derive(Debug, Clone, Default)]
pub struct VisualEncoder {
    config: EncodingConfig,
}

impl VisualEncoder {
    pub fn new(config: EncodingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncodingConfig {
        &self.config
    }

    /// Per-level table entry, or `fallback` for levels outside the table.
    fn level_entry<T: Copy>(table: &[T], level: u8, fallback: T) -> T {
        usize::from(level)
            .checked_sub(1)
            .and_then(|i| table.get(i))
            .copied()
            .unwrap_or(fallback)
    }

    pub fn node_color(&self, level: u8) -> Rgb {
        Self::level_entry(&self.config.palette, level, self.config.fallback_color)
    }

    pub fn node_size(&self, level: u8, is_extended: bool, is_adjacent: bool) -> f32 {
        let smallest = self.config.level_sizes.last().copied().unwrap_or(1.0);
        let mut size = Self::level_entry(&self.config.level_sizes, level, smallest);
        if is_extended {
            size *= self.config.extended_scale;
        }
        if is_adjacent {
            size *= self.config.adjacent_scale;
        }
        size
    }

    pub fn node_opacity(&self, is_adjacent: bool) -> f32 {
        if is_adjacent {
            self.config.adjacent_opacity
        } else {
            1.0
        }
    }

    pub fn font_size(&self, level: u8) -> f32 {
        let smallest = self.config.font_sizes.last().copied().unwrap_or(10.0);
        Self::level_entry(&self.config.font_sizes, level, smallest)
    }

    pub fn font_weight(&self, level: u8) -> u16 {
        if level == 1 {
            self.config.emphasis_font_weight
        } else {
            self.config.font_weight
        }
    }

    /// Encode a node from its level and flags.
    pub fn encode_node(&self, level: u8, is_adjacent: bool, is_extended: bool) -> NodeStyle {
        NodeStyle {
            color: self.node_color(level),
            size: self.node_size(level, is_extended, is_adjacent),
            opacity: self.node_opacity(is_adjacent),
            font_size: self.font_size(level),
            font_weight: self.font_weight(level),
            border_width: if is_extended {
                self.config.extended_border_width
            } else {
                0.0
            },
        }
    }

    /// Encode an edge from its kind and endpoint levels.
    ///
    /// Related edges ignore levels entirely. Edge opacity never depends on
    /// whether an endpoint is adjacent context.
    pub fn encode_edge(&self, kind: EdgeKind, source_level: u8, target_level: u8) -> EdgeStyle {
        match kind {
            EdgeKind::Prerequisite => {
                let cfg = &self.config.prerequisite;
                EdgeStyle {
                    width: if source_level.abs_diff(target_level) > 1 {
                        cfg.skip_width
                    } else {
                        cfg.width
                    },
                    color: if source_level < target_level {
                        cfg.forward_color
                    } else {
                        cfg.color
                    },
                    opacity: cfg.opacity,
                    dashed: false,
                    directed: true,
                }
            }
            EdgeKind::Related => {
                let cfg = &self.config.related;
                EdgeStyle {
                    width: cfg.width,
                    color: cfg.color,
                    opacity: cfg.opacity,
                    dashed: true,
                    directed: false,
                }
            }
        }
    }
}
