use log::warn;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

const CONFIG_PATH: &str = "sysfolio.ini";

// --- Minimal INI reader ---
#[derive(Debug, Default)]
pub struct SimpleIni {
    sections: HashMap<String, HashMap<String, String>>,
}

impl SimpleIni {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content);
        Ok(())
    }

    pub fn parse(&mut self, content: &str) {
        self.sections.clear();

        let mut current_section: Option<String> = None;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Section header: [SectionName]
            if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
                let name = &line[1..line.len() - 1];
                let section = name.trim().to_string();
                current_section = Some(section.clone());
                self.sections.entry(section).or_default();
                continue;
            }

            // Key/value pair: key=value
            if let Some(eq_idx) = line.find('=') {
                let (key_raw, value_raw) = line.split_at(eq_idx);
                let key = key_raw.trim();
                if key.is_empty() {
                    continue;
                }
                // Skip '=' and trim whitespace from the value.
                let value = value_raw[1..].trim().to_string();
                let section = current_section.clone().unwrap_or_default();
                self.sections
                    .entry(section)
                    .or_default()
                    .insert(key.to_string(), value);
            }
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section).and_then(|s| s.get(key)).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    pub const fn as_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

/// Runtime configuration. The animation numbers are tuning constants, not
/// contracts; they ship with the observed defaults but can be overridden from
/// `sysfolio.ini`.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub display_width: u32,
    pub display_height: u32,
    pub log_level: LogLevel,

    /// Edge length of one rain cell in pixels (also the column stride).
    pub rain_symbol_px: u32,
    /// Fixed tick cadence of the rain, in milliseconds.
    pub rain_tick_ms: u64,
    /// Alpha of the black overlay composited before each tick's glyphs.
    pub rain_fade_alpha: f32,
    /// Per-tick odds that a column past the bottom keeps falling instead of
    /// recycling. 0.975 leaves a ~2.5% recycle chance per tick.
    pub rain_keep_odds: f32,
    /// Recycled columns respawn at a random row in [-ceiling, 0).
    pub rain_spawn_ceiling: i32,
    /// Brightness of the rain layer when composited under the page.
    pub rain_layer_opacity: f32,

    /// How long the glitch flourish stays up after a section switch.
    pub glitch_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_width: 1280,
            display_height: 720,
            log_level: LogLevel::Warn,
            rain_symbol_px: 14,
            rain_tick_ms: 33,
            rain_fade_alpha: 0.05,
            rain_keep_odds: 0.975,
            rain_spawn_ceiling: 100,
            rain_layer_opacity: 0.30,
            glitch_duration_ms: 1000,
        }
    }
}

static CONFIG: std::sync::LazyLock<Mutex<Config>> =
    std::sync::LazyLock::new(|| Mutex::new(Config::default()));

fn create_default_config_file() -> Result<(), std::io::Error> {
    let d = Config::default();
    let content = format!(
        "[Display]\n\
         Width={}\n\
         Height={}\n\
         \n\
         [Options]\n\
         LogLevel={}\n\
         \n\
         [Rain]\n\
         SymbolPx={}\n\
         TickMs={}\n\
         FadeAlpha={}\n\
         KeepOdds={}\n\
         SpawnCeiling={}\n\
         LayerOpacity={}\n\
         \n\
         [Glitch]\n\
         DurationMs={}\n",
        d.display_width,
        d.display_height,
        d.log_level.as_str(),
        d.rain_symbol_px,
        d.rain_tick_ms,
        d.rain_fade_alpha,
        d.rain_keep_odds,
        d.rain_spawn_ceiling,
        d.rain_layer_opacity,
        d.glitch_duration_ms,
    );
    std::fs::write(CONFIG_PATH, content)
}

fn apply(conf: &SimpleIni, cfg: &mut Config) {
    let default = Config::default();

    cfg.display_width = conf
        .get("Display", "Width")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default.display_width);
    cfg.display_height = conf
        .get("Display", "Height")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default.display_height);
    cfg.log_level = conf
        .get("Options", "LogLevel")
        .and_then(|v| LogLevel::from_str(&v).ok())
        .unwrap_or(default.log_level);

    cfg.rain_symbol_px = conf
        .get("Rain", "SymbolPx")
        .and_then(|v| v.parse::<u32>().ok())
        .map(|v| v.clamp(4, 128))
        .unwrap_or(default.rain_symbol_px);
    cfg.rain_tick_ms = conf
        .get("Rain", "TickMs")
        .and_then(|v| v.parse::<u64>().ok())
        .map(|v| v.clamp(1, 1000))
        .unwrap_or(default.rain_tick_ms);
    cfg.rain_fade_alpha = conf
        .get("Rain", "FadeAlpha")
        .and_then(|v| v.parse::<f32>().ok())
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(default.rain_fade_alpha);
    cfg.rain_keep_odds = conf
        .get("Rain", "KeepOdds")
        .and_then(|v| v.parse::<f32>().ok())
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(default.rain_keep_odds);
    cfg.rain_spawn_ceiling = conf
        .get("Rain", "SpawnCeiling")
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default.rain_spawn_ceiling);
    cfg.rain_layer_opacity = conf
        .get("Rain", "LayerOpacity")
        .and_then(|v| v.parse::<f32>().ok())
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(default.rain_layer_opacity);

    cfg.glitch_duration_ms = conf
        .get("Glitch", "DurationMs")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default.glitch_duration_ms);
}

pub fn load() {
    if !Path::new(CONFIG_PATH).exists()
        && let Err(e) = create_default_config_file()
    {
        warn!("Failed to create default config file: {e}");
    }

    let mut conf = SimpleIni::new();
    match conf.load(CONFIG_PATH) {
        Ok(()) => {
            let mut cfg = CONFIG.lock().unwrap();
            apply(&conf, &mut cfg);
        }
        Err(e) => {
            warn!("Could not read {CONFIG_PATH} ({e}); using defaults");
        }
    }
}

pub fn get() -> Config {
    *CONFIG.lock().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let mut ini = SimpleIni::new();
        ini.parse("[Rain]\nSymbolPx=20\n");
        let mut cfg = Config::default();
        apply(&ini, &mut cfg);
        assert_eq!(cfg.rain_symbol_px, 20);
        assert_eq!(cfg.rain_tick_ms, 33);
        assert_eq!(cfg.display_width, 1280);
        assert_eq!(cfg.glitch_duration_ms, 1000);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut ini = SimpleIni::new();
        ini.parse("[Rain]\nFadeAlpha=7.5\nKeepOdds=-1\nSymbolPx=1\n[Display]\nWidth=0\n");
        let mut cfg = Config::default();
        apply(&ini, &mut cfg);
        assert_eq!(cfg.rain_fade_alpha, 1.0);
        assert_eq!(cfg.rain_keep_odds, 0.0);
        assert_eq!(cfg.rain_symbol_px, 4);
        assert_eq!(cfg.display_width, 1280);
    }

    #[test]
    fn ini_parsing_ignores_comments_and_junk() {
        let mut ini = SimpleIni::new();
        ini.parse("; comment\n# also comment\n[Options]\nLogLevel = info\nnoequals\n");
        assert_eq!(ini.get("Options", "LogLevel").as_deref(), Some("info"));
        assert_eq!(ini.get("Options", "noequals"), None);
        let mut cfg = Config::default();
        apply(&ini, &mut cfg);
        assert_eq!(cfg.log_level, LogLevel::Info);
    }
}
