use crate::xlib::Color;

use toml::Table;

use std::env;
use std::fs;

// gruvbox-flavored 16 color palette
const DEFAULT_COLORS: [&str; 16] = [
    "28-28-28", // black
    "cc-24-1d", // red
    "98-97-1a", // green
    "d6-5d-0e", // brown
    "45-85-88", // blue
    "b1-62-86", // magneta
    "83-a5-98", // cyan
    "eb-db-b2", // white
    "92-83-74", // bright black
    "fb-49-34", // bright red
    "b8-bb-26", // bright green
    "fa-bd-2f", // bright yellow
    "8e-c0-7c", // bright blue
    "d3-86-9b", // bright magneta
    "7d-b3-a4", // bright cyan
    "fb-f1-c7", // bright white
];

const DEFAULT_FG: &str = "d7-e0-da";
const DEFAULT_BG: &str = "0d-16-17";


pub struct Config {
    pub colors: Vec<Color>,
    pub fg: Color,
    pub bg: Color,
    pub font: String,
    pub font_size: usize,
    pub scrollback: usize,
    pub bell: String,
    pub icon: String,
    pub sync_title: bool,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let home = env::var("HOME")?;

        match fs::read_to_string(format!("{}/.config/lumen/config.toml", home)) {
            Ok(content) => Config::from_table(content.parse::<Table>()?),
            Err(_) => Config::from_table(Table::new()),
        }
    }

    pub fn from_table(table: Table) -> Result<Config, Box<dyn std::error::Error>> {
        Ok(Config {
            colors: Self::get_colors(&table)?,
            fg: Color::from_str(&Self::get_str(&table, "foreground", DEFAULT_FG))?,
            bg: Color::from_str(&Self::get_str(&table, "background", DEFAULT_BG))?,
            font: Self::get_str(&table, "font", "DejaVu Sans Mono"),
            font_size: Self::get_int(&table, "font_size", 11),
            scrollback: Self::get_int(&table, "scrollback", 400),
            bell: Self::get_str(&table, "bell", "assets/bell.wav"),
            icon: Self::get_str(&table, "icon", "assets/icon.ff"),
            sync_title: Self::get_bool(&table, "sync_title", true),
        })
    }

    // a short user palette keeps the default tail so indexed lookups stay in range
    fn get_colors(table: &Table) -> Result<Vec<Color>, Box<dyn std::error::Error>> {
        let mut entries = table.get("colors")
            .and_then(|colors| colors.as_array())
            .map(|colors| {
                colors.iter()
                    .filter_map(|color| color.as_str())
                    .map(|color| color.to_string())
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default();

        for default in DEFAULT_COLORS.iter().skip(entries.len()) {
            entries.push(default.to_string());
        }

        let mut colors: Vec<Color> = Vec::new();

        for entry in entries.iter().take(DEFAULT_COLORS.len()) {
            colors.push(Color::from_str(entry)?);
        }

        Ok(colors)
    }

    fn get_str(table: &Table, key: &str, default: &str) -> String {
        table.get(key).map_or(default, |value| value.as_str().unwrap_or(default)).to_string()
    }

    fn get_int(table: &Table, key: &str, default: usize) -> usize {
        table.get(key).map_or(default, |value| value.as_integer().map_or(default as i64, |value| value.max(0)) as usize)
    }

    fn get_bool(table: &Table, key: &str, default: bool) -> bool {
        table.get(key).map_or(default, |value| value.as_bool().unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_table(Table::new()).unwrap();

        assert_eq!(config.colors.len(), 16);
        assert_eq!(config.fg, Color::new(0xd7, 0xe0, 0xda));
        assert_eq!(config.bg, Color::new(0x0d, 0x16, 0x17));
        assert_eq!(config.font, "DejaVu Sans Mono");
        assert_eq!(config.font_size, 11);
        assert_eq!(config.scrollback, 400);
        assert!(config.sync_title);
    }

    #[test]
    fn overrides() {
        let table = r#"
            foreground = "ff-ff-ff"
            background = "00-00-00"
            font = "Iosevka Nerd Font Mono"
            font_size = 14
            scrollback = 2000
            bell = "/usr/share/sounds/bell.wav"
            sync_title = false
        "#.parse::<Table>().unwrap();

        let config = Config::from_table(table).unwrap();

        assert_eq!(config.fg, Color::new(0xff, 0xff, 0xff));
        assert_eq!(config.bg, Color::new(0, 0, 0));
        assert_eq!(config.font, "Iosevka Nerd Font Mono");
        assert_eq!(config.font_size, 14);
        assert_eq!(config.scrollback, 2000);
        assert_eq!(config.bell, "/usr/share/sounds/bell.wav");
        assert!(!config.sync_title);
    }

    #[test]
    fn short_palette_keeps_default_tail() {
        let table = r#"colors = ["ff-00-00", "00-ff-00"]"#.parse::<Table>().unwrap();

        let config = Config::from_table(table).unwrap();

        assert_eq!(config.colors.len(), 16);
        assert_eq!(config.colors[0], Color::new(0xff, 0, 0));
        assert_eq!(config.colors[1], Color::new(0, 0xff, 0));
        assert_eq!(config.colors[2], Color::from_str(DEFAULT_COLORS[2]).unwrap());
        assert_eq!(config.colors[15], Color::from_str(DEFAULT_COLORS[15]).unwrap());
    }

    #[test]
    fn invalid_color_fails() {
        let table = r#"foreground = "zz-00-00""#.parse::<Table>().unwrap();

        assert!(Config::from_table(table).is_err());
    }

    #[test]
    fn wrong_types_fall_back() {
        let table = r#"
            font_size = "big"
            sync_title = 3
        "#.parse::<Table>().unwrap();

        let config = Config::from_table(table).unwrap();

        assert_eq!(config.font_size, 11);
        assert!(config.sync_title);
    }

    #[test]
    fn color_parsing() {
        assert_eq!(Color::from_str("ff-80-00").unwrap(), Color::new(0xff, 0x80, 0));
        assert_eq!(Color::from_str("").unwrap(), Color::new(0, 0, 0));
        assert!(Color::from_str("ff-80").is_err());
        assert!(Color::from_str("gg-00-00").is_err());
    }
}
