use crate::config::Config;
use crate::pty::Pty;
use crate::icon;
use crate::xlib;

use arboard::Clipboard;
use log::{error, info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, source::Source};
use nix::libc;

use std::io::{self, Read, ErrorKind, Write};
use std::time::{Duration, Instant};
use std::os::fd::AsRawFd;
use std::sync::Arc;
use std::fs::File;
use std::{env, mem, thread};

const BASE_TITLE: &str = "lumen";

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 500;

const FONT_SIZE_MIN: usize = 6;
const FONT_SIZE_MAX: usize = 72;

const SCROLL_LINES: i64 = 3;


struct Cell {
    width: i32,
    height: i32,
    ascent: i32,
}

#[derive(Debug)]
pub struct Window {
    pub width: u32,
    pub height: u32,
}

struct Font {
    handle: *mut x11::xft::XftFont,
    size: usize,
}

#[derive(Clone, Copy)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Clone, Copy)]
struct Selection {
    start: Position,
    end: Position,
    selecting: bool,
}

impl Selection {
    fn is_empty(&self) -> bool {
        self.start.x == self.end.x && self.start.y == self.end.y
    }

    fn normalized(&self) -> (Position, Position) {
        if (self.start.y, self.start.x) <= (self.end.y, self.end.x) {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

struct Sound {
    data: Arc<Vec<u8>>
}

impl AsRef<[u8]> for Sound {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Sound {
    pub fn load(file: &str) -> Result<Sound, Box<dyn std::error::Error>> {
        let mut bell: Vec<u8> = Vec::new();

        File::open(file)?.read_to_end(&mut bell)?;

        Ok(Sound {
            data: Arc::new(bell),
        })
    }

    pub fn decoder(&self) -> Result<Decoder<io::Cursor<Sound>>, Box<dyn std::error::Error>> {
        Ok(Decoder::new(io::Cursor::new(Sound { data: self.data.clone(), }))?)
    }
}

struct Audio {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    bell: Sound,
}

impl Audio {
    fn new(bell: &str) -> Result<Audio, Box<dyn std::error::Error>> {
        let (_stream, stream_handle) = OutputStream::try_default()?;

        Ok(Audio {
            _stream,
            stream_handle,
            bell: Sound::load(bell)?,
        })
    }

    fn ring(&self) {
        match self.bell.decoder() {
            Ok(bell) => {
                if let Err(err) = self.stream_handle.play_raw(bell.convert_samples()) {
                    warn!("failed to play bell: {}", err);
                }
            },
            Err(err) => warn!("failed to decode bell: {}", err),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Shortcut {
    Copy,
    Paste,
    IncreaseFont,
    DecreaseFont,
    ResetFont,
}

// the modifier mask has to be exactly ctrl+alt, shift drops the match
fn shortcut(state: u32, keysym: u32) -> Option<Shortcut> {
    let mask = state & (x11::xlib::ControlMask | x11::xlib::Mod1Mask | x11::xlib::ShiftMask);

    if mask != (x11::xlib::ControlMask | x11::xlib::Mod1Mask) {
        return None;
    }

    match keysym {
        x11::keysym::XK_v => Some(Shortcut::Paste),
        x11::keysym::XK_c => Some(Shortcut::Copy),
        x11::keysym::XK_plus | x11::keysym::XK_equal | x11::keysym::XK_KP_Add => Some(Shortcut::IncreaseFont),
        x11::keysym::XK_minus | x11::keysym::XK_KP_Subtract => Some(Shortcut::DecreaseFont),
        x11::keysym::XK_0 | x11::keysym::XK_KP_0 => Some(Shortcut::ResetFont),
        _ => None,
    }
}

fn clamp_font_size(size: usize) -> usize {
    size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX)
}

fn indexed_color(config: &Config, index: u8) -> xlib::Color {
    match index {
        0..=15 => config.colors[index as usize],
        // 6x6x6 color cube
        16..=231 => {
            let index = index as u64 - 16;
            let level = |component: u64| if component == 0 { 0 } else { component * 40 + 55 };

            xlib::Color::new(level(index / 36), level((index / 6) % 6), level(index % 6))
        },
        // grayscale ramp
        232..=255 => {
            let gray = (index as u64 - 232) * 10 + 8;

            xlib::Color::new(gray, gray, gray)
        },
    }
}

fn cell_color(config: &Config, color: vt100::Color, default: xlib::Color) -> xlib::Color {
    match color {
        vt100::Color::Default => default,
        vt100::Color::Idx(index) => indexed_color(config, index),
        vt100::Color::Rgb(r, g, b) => xlib::Color::new(r as u64, g as u64, b as u64),
    }
}

pub struct Terminal {
    display: xlib::Display,
    parser: vt100::Parser,
    selection: Selection,
    window: Window,
    font: Font,
    cell: Cell,
    pty: Option<Pty>,
    clipboard: Option<Clipboard>,
    audio: Option<Audio>,
    scroll: usize,
    bells: usize,
    title: String,
    refresh: bool,
    focused: bool,
    running: bool,
    config: Config,
}

impl Terminal {
    pub fn new(command: Option<String>) -> Result<Terminal, Box<dyn std::error::Error>> {
        let config = Config::load()?;

        let mut display = xlib::Display::open(WINDOW_WIDTH, WINDOW_HEIGHT)?;

        let handle = display.load_font(&format!("{}:size={}", config.font, config.font_size))?;
        let (width, height, ascent) = display.font_metrics(handle);

        let window_attr = display.get_window_attributes();
        let window = Window {
            width: window_attr.width as u32,
            height: window_attr.height as u32,
        };

        let cell = Cell { width, height, ascent };

        let columns = (window.width as i32 / cell.width).max(1) as u16;
        let rows = (window.height as i32 / cell.height).max(1) as u16;

        let shell = env::var("SHELL").unwrap_or_else(|_| String::from("/bin/sh"));

        let pty = match Pty::new(&shell, command.as_deref()) {
            Ok(mut pty) => {
                pty.resize(columns, rows)?;

                Some(pty)
            },
            Err(err) => {
                error!("failed to spawn {}: {}", shell, err);

                None
            },
        };

        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                warn!("clipboard unavailable: {}", err);

                None
            },
        };

        let audio = match Audio::new(&config.bell) {
            Ok(audio) => Some(audio),
            Err(err) => {
                warn!("failed to load bell {}: {}", config.bell, err);

                None
            },
        };

        match icon::load(&config.icon) {
            Ok(data) => display.set_icon(&data)?,
            Err(err) => warn!("failed to load icon {}: {}", config.icon, err),
        }

        Ok(Terminal {
            parser: vt100::Parser::new(rows, columns, config.scrollback),
            font: Font { handle, size: config.font_size },
            display,
            selection: Selection {
                start: Position { x: 0, y: 0 },
                end: Position { x: 0, y: 0 },
                selecting: false,
            },
            window,
            cell,
            pty,
            clipboard,
            audio,
            scroll: 0,
            bells: 0,
            title: String::new(),
            refresh: true,
            focused: true,
            running: true,
            config,
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.display.set_window_name(BASE_TITLE);
        self.display.define_cursor();
        self.display.select_input();
        self.display.map_window();
        self.display.flush();

        if let Some(pty) = &self.pty {
            unsafe {
                let flags = libc::fcntl(pty.file.as_raw_fd(), libc::F_GETFL, 0) | libc::O_NONBLOCK;

                libc::fcntl(pty.file.as_raw_fd(), libc::F_SETFL, flags);
            }
        }

        while self.running {
            let render_time = Instant::now();

            self.reap_child()?;
            self.read_tty()?;

            if let Some(events) = self.display.poll_event() {
                for event in events {
                    self.handle_event(event)?;
                }
            }

            self.sync_title();
            self.sync_bell();

            if self.refresh {
                self.draw()?;
            }

            thread::sleep(Duration::from_millis(8 - render_time.elapsed().subsec_millis().min(8) as u64));
        }

        Ok(())
    }

    fn reap_child(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(pty) = &mut self.pty {
            if let Some(status) = pty.child.try_wait()? {
                info!("shell exited: {}", status);

                self.running = false;
            }
        }

        Ok(())
    }

    fn read_tty(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(pty) = &mut self.pty else { return Ok(()) };

        let mut buffer: Vec<u8> = vec![0; 4096];

        // drain what is ready without starving the event loop on floods
        for _ in 0..64 {
            match pty.file.read(&mut buffer) {
                Ok(0) => break,
                Ok(bytes) => {
                    self.parser.process(&buffer[..bytes]);

                    self.refresh = true;
                },
                Err(err) => {
                    match err.kind() {
                        ErrorKind::WouldBlock | ErrorKind::Interrupted => break,
                        _ => return Err(Box::new(err)),
                    }
                },
            }
        }

        Ok(())
    }

    fn write_tty_raw(&mut self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(pty) = &mut self.pty {
            if !content.is_empty() {
                pty.file.write_all(content.as_bytes())?;
            }
        }

        Ok(())
    }

    fn write_tty(&mut self, event: x11::xlib::XKeyEvent, keysym: u32) -> Result<(), Box<dyn std::error::Error>> {
        let application = self.parser.screen().application_cursor();

        match keysym {
            x11::keysym::XK_Up => self.write_tty_raw(if application { "\x1bOA" } else { "\x1b[A" }),
            x11::keysym::XK_Down => self.write_tty_raw(if application { "\x1bOB" } else { "\x1b[B" }),
            x11::keysym::XK_Right => self.write_tty_raw(if application { "\x1bOC" } else { "\x1b[C" }),
            x11::keysym::XK_Left => self.write_tty_raw(if application { "\x1bOD" } else { "\x1b[D" }),
            x11::keysym::XK_Home => self.write_tty_raw("\x1b[H"),
            x11::keysym::XK_End => self.write_tty_raw("\x1b[F"),
            x11::keysym::XK_Prior => self.write_tty_raw("\x1b[5~"),
            x11::keysym::XK_Next => self.write_tty_raw("\x1b[6~"),
            x11::keysym::XK_Delete => self.write_tty_raw("\x1b[3~"),
            x11::keysym::XK_BackSpace => self.write_tty_raw("\x7f"),
            x11::keysym::XK_Escape => self.write_tty_raw("\x1b"),
            _ => {
                let content = self.display.lookup_string(event)?
                    .chars()
                    .filter(|c| *c != '\0')
                    .collect::<String>();

                self.write_tty_raw(&content)
            },
        }
    }

    fn key_press(&mut self, event: x11::xlib::XKeyEvent) -> Result<(), Box<dyn std::error::Error>> {
        let keysym = self.display.keycode_to_keysym(event.keycode as u8) as u32;

        if let Some(shortcut) = shortcut(event.state, keysym) {
            return self.dispatch(shortcut);
        }

        // typing snaps the view back to the bottom
        if self.scroll != 0 {
            self.scroll = 0;

            self.parser.set_scrollback(0);

            self.refresh = true;
        }

        self.write_tty(event, keysym)
    }

    fn dispatch(&mut self, shortcut: Shortcut) -> Result<(), Box<dyn std::error::Error>> {
        match shortcut {
            Shortcut::Copy => self.copy_selection(),
            Shortcut::Paste => self.paste(),
            Shortcut::IncreaseFont => self.set_font_size(self.font.size + 1),
            Shortcut::DecreaseFont => self.set_font_size(self.font.size.saturating_sub(1)),
            Shortcut::ResetFont => self.set_font_size(self.config.font_size),
        }
    }

    fn copy_selection(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(clipboard) = &mut self.clipboard else { return Ok(()) };

        if self.selection.is_empty() {
            return Ok(());
        }

        let screen = self.parser.screen();
        let (rows, columns) = screen.size();
        let (start, end) = self.selection.normalized();

        let contents = screen.contents_between(
            start.y.clamp(0, rows as i32 - 1) as u16,
            start.x.clamp(0, columns as i32) as u16,
            end.y.clamp(0, rows as i32 - 1) as u16,
            end.x.clamp(0, columns as i32) as u16,
        );

        if !contents.is_empty() {
            clipboard.set_text(contents)?;
        }

        Ok(())
    }

    fn paste(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let text = match &mut self.clipboard {
            Some(clipboard) => match clipboard.get_text() {
                Ok(text) => text,
                Err(err) => {
                    warn!("clipboard read failed: {}", err);

                    return Ok(());
                },
            },
            None => return Ok(()),
        };

        if text.is_empty() {
            return Ok(());
        }

        if self.parser.screen().bracketed_paste() {
            self.write_tty_raw(&format!("\x1b[200~{}\x1b[201~", text))
        } else {
            self.write_tty_raw(&text)
        }
    }

    fn set_font_size(&mut self, size: usize) -> Result<(), Box<dyn std::error::Error>> {
        let size = clamp_font_size(size);

        if size == self.font.size {
            return Ok(());
        }

        let handle = self.display.load_font(&format!("{}:size={}", self.config.font, size))?;

        self.display.unload_font(self.font.handle);

        let (width, height, ascent) = self.display.font_metrics(handle);

        self.font = Font { handle, size };
        self.cell = Cell { width, height, ascent };

        self.resize_grid()?;

        self.refresh = true;

        Ok(())
    }

    fn scroll_view(&mut self, lines: i64) {
        let scroll = (self.scroll as i64 + lines).clamp(0, self.config.scrollback as i64) as usize;

        if scroll != self.scroll {
            self.scroll = scroll;

            self.parser.set_scrollback(scroll);

            self.refresh = true;
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>> {
        self.window = Window { width, height };

        self.display.resize_back_buffer(&self.window);
        self.resize_grid()?;

        self.refresh = true;

        Ok(())
    }

    fn resize_grid(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let columns = (self.window.width as i32 / self.cell.width).max(1) as u16;
        let rows = (self.window.height as i32 / self.cell.height).max(1) as u16;

        self.parser.set_size(rows, columns);

        if let Some(pty) = &mut self.pty {
            pty.resize(columns, rows)?;
        }

        Ok(())
    }

    fn sync_title(&mut self) {
        if !self.config.sync_title {
            return;
        }

        let title = self.parser.screen().title().to_string();

        if title != self.title {
            if title.is_empty() {
                self.display.set_window_name(BASE_TITLE);
            } else {
                self.display.set_window_name(&title);
            }

            self.title = title;
        }
    }

    fn sync_bell(&mut self) {
        let count = self.parser.screen().audible_bell_count();

        if count > self.bells {
            self.bells = count;

            if let Some(audio) = &self.audio {
                audio.ring();
            }
        }
    }

    fn handle_event(&mut self, event: x11::xlib::XEvent) -> Result<(), Box<dyn std::error::Error>> {
        match unsafe { event.type_ } {
            x11::xlib::KeyPress => {
                self.key_press(unsafe { event.key })?;
            },
            x11::xlib::ClientMessage => {
                if self.display.is_delete_event(unsafe { &event.client_message }) {
                    self.running = false;
                }
            },
            x11::xlib::ButtonPress => {
                match unsafe { event.button.button } {
                    x11::xlib::Button4 => self.scroll_view(SCROLL_LINES),
                    x11::xlib::Button5 => self.scroll_view(-SCROLL_LINES),
                    x11::xlib::Button1 => {
                        let position = Position {
                            x: unsafe { event.button.x } / self.cell.width,
                            y: unsafe { event.button.y } / self.cell.height,
                        };

                        self.selection = Selection {
                            start: position,
                            end: position,
                            selecting: true,
                        };

                        self.refresh = true;
                    },
                    _ => {},
                }
            },
            x11::xlib::ButtonRelease => {
                match unsafe { event.button.button } {
                    x11::xlib::Button1 => {
                        self.selection.selecting = false;
                    },
                    _ => {},
                }
            },
            x11::xlib::MotionNotify => {
                if self.selection.selecting {
                    self.selection.end = Position {
                        x: unsafe { event.motion.x } / self.cell.width,
                        y: unsafe { event.motion.y } / self.cell.height,
                    };

                    self.refresh = true;
                }
            },
            x11::xlib::ConfigureNotify => {
                let width = unsafe { event.configure.width } as u32;
                let height = unsafe { event.configure.height } as u32;

                if width != self.window.width || height != self.window.height {
                    self.resize(width, height)?;
                }
            },
            x11::xlib::Expose => self.refresh = true,
            x11::xlib::VisibilityNotify => self.refresh = true,
            x11::xlib::FocusIn => {
                self.focused = true;
                self.refresh = true;
            },
            x11::xlib::FocusOut => {
                self.focused = false;
                self.refresh = true;
            },
            _ => {},
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.display.draw_rec(0, 0, self.window.width, self.window.height, self.config.bg);

        let screen = self.parser.screen();
        let (rows, columns) = screen.size();

        for row in 0..rows {
            for column in 0..columns {
                let Some(cell) = screen.cell(row, column) else { continue };

                if cell.is_wide_continuation() {
                    continue;
                }

                let width = if cell.is_wide() { self.cell.width as u32 * 2 } else { self.cell.width as u32 };

                let x = column as i32 * self.cell.width;
                let y = row as i32 * self.cell.height;

                let mut fg = cell_color(&self.config, cell.fgcolor(), self.config.fg);
                let mut bg = cell_color(&self.config, cell.bgcolor(), self.config.bg);

                if cell.inverse() {
                    mem::swap(&mut fg, &mut bg);
                }

                if bg != self.config.bg {
                    self.display.draw_rec(x, y, width, self.cell.height as u32, bg);
                }

                let contents = cell.contents();

                if !contents.is_empty() {
                    let color = self.display.xft_color(fg)?;

                    self.display.xft_draw_string(&contents, x, y, width, self.cell.height as u32, self.cell.ascent, self.font.handle, &color);
                }

                if cell.underline() {
                    self.display.draw_rec(x, y + self.cell.ascent + 1, width, 1, fg);
                }
            }
        }

        if !self.selection.is_empty() {
            let (start, end) = self.selection.normalized();

            if start.y == end.y {
                self.display.outline_rec(
                    start.x * self.cell.width,
                    start.y * self.cell.height,
                    (end.x - start.x) as u32 * self.cell.width as u32,
                    self.cell.height as u32,
                    self.config.fg,
                );
            } else {
                for y in start.y..end.y + 1 {
                    if y == start.y {
                        self.display.outline_rec(
                            start.x * self.cell.width,
                            y * self.cell.height,
                            ((self.window.width as i32 / self.cell.width) - start.x).max(0) as u32 * self.cell.width as u32,
                            self.cell.height as u32,
                            self.config.fg,
                        );
                    } else if y == end.y {
                        self.display.outline_rec(
                            0,
                            y * self.cell.height,
                            end.x.max(0) as u32 * self.cell.width as u32,
                            self.cell.height as u32,
                            self.config.fg,
                        );
                    } else {
                        self.display.outline_rec(
                            0,
                            y * self.cell.height,
                            self.window.width,
                            self.cell.height as u32,
                            self.config.fg,
                        );
                    }
                }
            }
        }

        if self.scroll == 0 && !screen.hide_cursor() {
            let (row, column) = screen.cursor_position();

            let x = column as i32 * self.cell.width;
            let y = row as i32 * self.cell.height;

            if self.focused {
                self.display.draw_rec(x, y, self.cell.width as u32, self.cell.height as u32, self.config.fg);
            } else {
                self.display.outline_rec(x, y, self.cell.width as u32 - 1, self.cell.height as u32 - 1, self.config.fg);
            }
        }

        self.display.swap_buffers(&self.window);

        self.refresh = false;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use toml::Table;

    const CTRL_ALT: u32 = x11::xlib::ControlMask | x11::xlib::Mod1Mask;

    #[test]
    fn shortcut_table() {
        assert_eq!(shortcut(CTRL_ALT, x11::keysym::XK_v), Some(Shortcut::Paste));
        assert_eq!(shortcut(CTRL_ALT, x11::keysym::XK_c), Some(Shortcut::Copy));
        assert_eq!(shortcut(CTRL_ALT, x11::keysym::XK_equal), Some(Shortcut::IncreaseFont));
        assert_eq!(shortcut(CTRL_ALT, x11::keysym::XK_plus), Some(Shortcut::IncreaseFont));
        assert_eq!(shortcut(CTRL_ALT, x11::keysym::XK_minus), Some(Shortcut::DecreaseFont));
        assert_eq!(shortcut(CTRL_ALT, x11::keysym::XK_0), Some(Shortcut::ResetFont));
        assert_eq!(shortcut(CTRL_ALT, x11::keysym::XK_x), None);
    }

    #[test]
    fn shortcut_requires_exact_modifiers() {
        assert_eq!(shortcut(0, x11::keysym::XK_v), None);
        assert_eq!(shortcut(x11::xlib::ControlMask, x11::keysym::XK_v), None);
        assert_eq!(shortcut(x11::xlib::Mod1Mask, x11::keysym::XK_c), None);
        assert_eq!(shortcut(CTRL_ALT | x11::xlib::ShiftMask, x11::keysym::XK_v), None);
    }

    #[test]
    fn shortcut_ignores_lock_modifiers() {
        // caps lock and num lock are outside the mask
        assert_eq!(shortcut(CTRL_ALT | x11::xlib::LockMask, x11::keysym::XK_v), Some(Shortcut::Paste));
        assert_eq!(shortcut(CTRL_ALT | x11::xlib::Mod2Mask, x11::keysym::XK_c), Some(Shortcut::Copy));
    }

    #[test]
    fn font_size_clamping() {
        assert_eq!(clamp_font_size(11), 11);
        assert_eq!(clamp_font_size(0), FONT_SIZE_MIN);
        assert_eq!(clamp_font_size(5), FONT_SIZE_MIN);
        assert_eq!(clamp_font_size(400), FONT_SIZE_MAX);
    }

    #[test]
    fn palette_colors() {
        let config = Config::from_table(Table::new()).unwrap();

        assert_eq!(indexed_color(&config, 0), config.colors[0]);
        assert_eq!(indexed_color(&config, 9), config.colors[9]);
        assert_eq!(indexed_color(&config, 15), config.colors[15]);
    }

    #[test]
    fn color_cube() {
        let config = Config::from_table(Table::new()).unwrap();

        assert_eq!(indexed_color(&config, 16), xlib::Color::new(0, 0, 0));
        assert_eq!(indexed_color(&config, 196), xlib::Color::new(255, 0, 0));
        assert_eq!(indexed_color(&config, 46), xlib::Color::new(0, 255, 0));
        assert_eq!(indexed_color(&config, 21), xlib::Color::new(0, 0, 255));
        assert_eq!(indexed_color(&config, 231), xlib::Color::new(255, 255, 255));
    }

    #[test]
    fn grayscale_ramp() {
        let config = Config::from_table(Table::new()).unwrap();

        assert_eq!(indexed_color(&config, 232), xlib::Color::new(8, 8, 8));
        assert_eq!(indexed_color(&config, 255), xlib::Color::new(238, 238, 238));
    }

    #[test]
    fn cell_color_mapping() {
        let config = Config::from_table(Table::new()).unwrap();

        assert_eq!(cell_color(&config, vt100::Color::Default, config.fg), config.fg);
        assert_eq!(cell_color(&config, vt100::Color::Idx(1), config.fg), config.colors[1]);
        assert_eq!(cell_color(&config, vt100::Color::Rgb(1, 2, 3), config.fg), xlib::Color::new(1, 2, 3));
    }

    #[test]
    fn selection_normalization() {
        let selection = Selection {
            start: Position { x: 7, y: 4 },
            end: Position { x: 2, y: 1 },
            selecting: false,
        };

        let (start, end) = selection.normalized();

        assert_eq!((start.x, start.y), (2, 1));
        assert_eq!((end.x, end.y), (7, 4));

        let backwards = Selection {
            start: Position { x: 9, y: 3 },
            end: Position { x: 1, y: 3 },
            selecting: false,
        };

        let (start, end) = backwards.normalized();

        assert_eq!((start.x, end.x), (1, 9));
    }

    #[test]
    fn empty_selection() {
        let selection = Selection {
            start: Position { x: 3, y: 2 },
            end: Position { x: 3, y: 2 },
            selecting: false,
        };

        assert!(selection.is_empty());
    }
}
