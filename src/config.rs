use crate::fade::FadeMethod;
use crate::foundation::core::{BezPath, Rgba8};
use crate::foundation::error::{TrailError, TrailResult};
use crate::motion::MotionKind;
use serde::{Deserialize, Serialize};

/// Target redraw rate in frames per second.
///
/// The timer interval is `1000 / fps` whole milliseconds, so 30 fps ticks every 33 ms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FrameRate(u32);

impl FrameRate {
    /// Rates offered by the frame-rate picker.
    pub const CHOICES: [u32; 3] = [10, 30, 60];

    /// Create a validated frame rate. The resulting interval must be at least 1 ms.
    pub fn new(fps: u32) -> TrailResult<Self> {
        if fps == 0 {
            return Err(TrailError::validation("frame rate must be > 0"));
        }
        if fps > 1000 {
            return Err(TrailError::validation(
                "frame rate must be <= 1000 (frame interval must be > 0 ms)",
            ));
        }
        Ok(Self(fps))
    }

    /// Frames per second.
    pub fn fps(self) -> u32 {
        self.0
    }

    /// Timer interval in whole milliseconds.
    pub fn interval_ms(self) -> u32 {
        1000 / self.0
    }

    /// Timer interval as a [`std::time::Duration`].
    pub fn interval(self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(self.interval_ms()))
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(30)
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = TrailError;

    fn try_from(fps: u32) -> TrailResult<Self> {
        Self::new(fps)
    }
}

impl From<FrameRate> for u32 {
    fn from(v: FrameRate) -> Self {
        v.0
    }
}

/// How long a stamp stays visible in the trail buffer, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TrailLength(u32);

impl TrailLength {
    /// Lengths offered by the trail-length picker.
    pub const CHOICES: [u32; 3] = [1, 3, 5];

    /// Create a validated trail length.
    pub fn new(secs: u32) -> TrailResult<Self> {
        if secs == 0 {
            return Err(TrailError::validation("trail length must be > 0 seconds"));
        }
        Ok(Self(secs))
    }

    /// Length in seconds.
    pub fn secs(self) -> u32 {
        self.0
    }
}

impl Default for TrailLength {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u32> for TrailLength {
    type Error = TrailError;

    fn try_from(secs: u32) -> TrailResult<Self> {
        Self::new(secs)
    }
}

impl From<TrailLength> for u32 {
    fn from(v: TrailLength) -> Self {
        v.0
    }
}

/// Named colors offered by the color pickers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// `#000000`
    Black,
    /// `#FFFFFF`
    White,
    /// `#63B5B5`, the default trail color.
    Teal,
    /// `#FCEE03`, the default echo color.
    Yellow,
    /// `#FF0000`
    Red,
    /// `#00FF00`
    Green,
    /// `#0000FF`
    Blue,
    /// `#FFA500`
    Orange,
    /// `#800080`
    Purple,
    /// `#808080`
    Gray,
}

impl Palette {
    /// Every palette entry in picker order.
    pub const ALL: [Palette; 10] = [
        Palette::Black,
        Palette::White,
        Palette::Teal,
        Palette::Yellow,
        Palette::Red,
        Palette::Green,
        Palette::Blue,
        Palette::Orange,
        Palette::Purple,
        Palette::Gray,
    ];

    /// Opaque color for this entry.
    pub fn color(self) -> Rgba8 {
        match self {
            Palette::Black => Rgba8::rgb(0x00, 0x00, 0x00),
            Palette::White => Rgba8::rgb(0xFF, 0xFF, 0xFF),
            Palette::Teal => Rgba8::rgb(0x63, 0xB5, 0xB5),
            Palette::Yellow => Rgba8::rgb(0xFC, 0xEE, 0x03),
            Palette::Red => Rgba8::rgb(0xFF, 0x00, 0x00),
            Palette::Green => Rgba8::rgb(0x00, 0xFF, 0x00),
            Palette::Blue => Rgba8::rgb(0x00, 0x00, 0xFF),
            Palette::Orange => Rgba8::rgb(0xFF, 0xA5, 0x00),
            Palette::Purple => Rgba8::rgb(0x80, 0x00, 0x80),
            Palette::Gray => Rgba8::rgb(0x80, 0x80, 0x80),
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let p = match name.as_str() {
            "black" => Palette::Black,
            "white" => Palette::White,
            "teal" => Palette::Teal,
            "yellow" => Palette::Yellow,
            "red" => Palette::Red,
            "green" => Palette::Green,
            "blue" => Palette::Blue,
            "orange" => Palette::Orange,
            "purple" => Palette::Purple,
            "gray" | "grey" => Palette::Gray,
            _ => return None,
        };
        Some(p)
    }
}

/// Parse `#RRGGBB`, `#RRGGBBAA` or a [`Palette`] name.
pub fn parse_color(s: &str) -> TrailResult<Rgba8> {
    if let Some(p) = Palette::from_name(s) {
        return Ok(p.color());
    }

    let s = s.trim();
    let hex = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> TrailResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| TrailError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !hex.is_ascii() {
        return Err(TrailError::validation(format!("invalid color \"{s}\"")));
    }
    match hex.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        )),
        _ => Err(TrailError::validation(format!(
            "color \"{s}\" must be #RRGGBB, #RRGGBBAA or a palette name"
        ))),
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }
}

/// Immutable configuration snapshot read by every tick and redraw.
///
/// Changes never mutate a snapshot in place: the `with_*` builders return a new one which the
/// session swaps in under its buffer lock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrailConfig {
    /// Target redraw rate.
    pub frame_rate: FrameRate,
    /// Trail persistence in seconds.
    pub trail_length: TrailLength,
    /// Color the trail fades toward and buffers are cleared to on resize.
    pub background: Rgba8,
    /// Stamp color in the trail buffer.
    pub trail_color: Rgba8,
    /// Stamp color in the echo buffer.
    pub echo_color: Rgba8,
    /// Trail fade algorithm.
    pub fade: FadeMethod,
    /// Motion model driving the object.
    pub motion: MotionKind,
    /// Optional SVG path data overriding the motion model's default outline.
    pub outline: Option<String>,
    /// Seed for the random walk. `None` draws a seed from the OS.
    pub seed: Option<u64>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            frame_rate: FrameRate::default(),
            trail_length: TrailLength::default(),
            background: Palette::Black.color(),
            trail_color: Palette::Teal.color(),
            echo_color: Palette::Yellow.color(),
            fade: FadeMethod::ColorMatrix,
            motion: MotionKind::RandomWalk,
            outline: None,
            seed: None,
        }
    }
}

impl TrailConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(s: &str) -> TrailResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| TrailError::validation(format!("invalid trail config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants that deserialization cannot express on its own.
    pub fn validate(&self) -> TrailResult<()> {
        if self.frame_rate.interval_ms() == 0 {
            return Err(TrailError::validation("frame interval must be > 0 ms"));
        }
        if self.trail_length.secs() == 0 {
            return Err(TrailError::validation("trail length must be > 0 seconds"));
        }
        self.outline_path().map(|_| ())
    }

    /// Number of frames spanning one trail length: `trail_ms / interval_ms`, at least 1.
    pub fn trail_frames(&self) -> u32 {
        crate::fade::trail_frames(self.trail_length.secs(), self.frame_rate.interval_ms())
    }

    /// Object outline in logical units, centred on the origin.
    pub fn outline_path(&self) -> TrailResult<BezPath> {
        let d = match &self.outline {
            Some(d) => d.as_str(),
            None => self.motion.default_outline(),
        };
        parse_outline(d)
    }

    /// Snapshot with a different frame rate.
    pub fn with_frame_rate(&self, frame_rate: FrameRate) -> Self {
        Self {
            frame_rate,
            ..self.clone()
        }
    }

    /// Snapshot with a different trail length.
    pub fn with_trail_length(&self, trail_length: TrailLength) -> Self {
        Self {
            trail_length,
            ..self.clone()
        }
    }

    /// Snapshot with a different background color.
    pub fn with_background(&self, background: Rgba8) -> Self {
        Self {
            background,
            ..self.clone()
        }
    }

    /// Snapshot with a different trail color.
    pub fn with_trail_color(&self, trail_color: Rgba8) -> Self {
        Self {
            trail_color,
            ..self.clone()
        }
    }

    /// Snapshot with a different echo color.
    pub fn with_echo_color(&self, echo_color: Rgba8) -> Self {
        Self {
            echo_color,
            ..self.clone()
        }
    }

    /// Snapshot with a different fade algorithm.
    pub fn with_fade(&self, fade: FadeMethod) -> Self {
        Self {
            fade,
            ..self.clone()
        }
    }

    /// Snapshot with a different motion model.
    pub fn with_motion(&self, motion: MotionKind) -> Self {
        Self {
            motion,
            ..self.clone()
        }
    }
}

/// Parse SVG path data into a closed outline.
pub fn parse_outline(d: &str) -> TrailResult<BezPath> {
    let path = BezPath::from_svg(d.trim())
        .map_err(|e| TrailError::validation(format!("invalid outline path data: {e}")))?;
    if path.elements().is_empty() {
        return Err(TrailError::validation("outline path data is empty"));
    }
    Ok(path)
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
