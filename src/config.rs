use std::io::Read;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GradientError;
use crate::gradient::{ControlPoint, Gradient};

/// Gradient definition as read from JSON, colors given as hex codes:
///
/// ```json
/// { "stops": [ { "color": "#c8d2d2", "position": 0.0 },
///              { "color": "#00aeac", "position": 0.5 } ] }
/// ```
///
/// Colors are written back as `#rrggbbaa`, so saving a config rounds every
/// channel to the nearest 1/255. Positions round-trip exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradientConfig {
    pub stops: Vec<ControlPoint>,
}

impl GradientConfig {
    pub fn from_json(json: &str) -> Result<Self, GradientError> {
        let config: Self = serde_json::from_str(json)?;
        debug!("parsed gradient config with {} stops", config.stops.len());
        Ok(config)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, GradientError> {
        let config: Self = serde_json::from_reader(reader)?;
        debug!("read gradient config with {} stops", config.stops.len());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GradientError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn build(&self) -> Result<Gradient, GradientError> {
        Gradient::new(&self.stops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    const SAMPLE: &str = r##"{
        "stops": [
            { "color": "#c8d2d2", "position": 0.0 },
            { "color": "#00aeac", "position": 0.5 },
            { "color": "#643363", "position": 0.91 }
        ]
    }"##;

    #[test]
    fn parses_hex_stops() -> anyhow::Result<()> {
        let config = GradientConfig::from_json(SAMPLE)?;
        assert_eq!(config.stops.len(), 3);
        assert_eq!(config.stops[1].color, Color::rgba8(0, 174, 172, 255));
        assert_eq!(config.stops[2].position, 0.91);

        let table = config.build()?;
        assert_eq!(table[0], Color::rgba8(200, 210, 210, 255));
        assert_eq!(table[232], Color::rgba8(100, 51, 99, 255));
        Ok(())
    }

    #[test]
    fn reader_and_writer_agree() -> anyhow::Result<()> {
        let config = GradientConfig::from_reader(SAMPLE.as_bytes())?;
        let again = GradientConfig::from_json(&config.to_json()?)?;
        assert_eq!(again.stops, config.stops);
        Ok(())
    }

    #[test]
    fn saved_colors_are_quantized_to_8_bits() -> anyhow::Result<()> {
        let config = GradientConfig {
            stops: vec![ControlPoint::new(Color::rgb(0.33, 0.0, 0.0), 0.25)],
        };
        let json = config.to_json()?;
        assert!(json.contains("#540000ff"), "{json}");

        let again = GradientConfig::from_json(&json)?;
        assert_eq!(again.stops[0].color.red(), 84.0 / 255.0);
        assert_eq!(again.stops[0].position, 0.25);
        Ok(())
    }

    #[test]
    fn bad_color_is_a_config_error() {
        let err = GradientConfig::from_json(r#"{"stops":[{"color":"red","position":0}]}"#)
            .unwrap_err();
        assert!(matches!(err, GradientError::Config(_)));
        assert!(err.to_string().contains("invalid color"));
    }

    #[test]
    fn empty_stops_fail_to_build() -> anyhow::Result<()> {
        let config = GradientConfig::from_json(r#"{"stops":[]}"#)?;
        assert!(matches!(config.build(), Err(GradientError::Empty)));
        Ok(())
    }
}
