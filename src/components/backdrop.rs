use std::time::SystemTime;

use rand::prelude::*;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::StatefulWidget,
};

use crate::{
    constants::backdrop,
    engine::{Place, Rgb, Season, WorldTheme},
};

/// Seasonal particle field plus a place silhouette over a sky gradient.
/// The theme is owned by whoever drives the game state and swapped in here
/// whenever it changes.
#[derive(Debug, Clone)]
pub struct BackdropState {
    speed: f32, // Particle drop speed: rows per second
    density: f32,
    last_time: SystemTime,
    particles: Vec<Vec<usize>>,
    width: usize,
    height: usize,
    pub theme: WorldTheme,
}

impl BackdropState {
    pub fn new(speed: f32, density: f32, theme: WorldTheme) -> Self {
        Self {
            speed,
            density,
            last_time: SystemTime::now(),
            particles: Vec::new(),
            width: 0,
            height: 0,
            theme,
        }
    }

    fn get_delta_time(&self, now: SystemTime) -> f32 {
        now.duration_since(self.last_time).unwrap_or_default().as_secs_f32()
    }

    fn sample(&self, rng: &mut ThreadRng) -> usize {
        let glyphs = particle_set(self.theme.season);
        let u: f32 = rng.gen();
        if u > self.density {
            glyphs.len()
        } else {
            rng.gen_range(0..glyphs.len())
        }
    }

    fn update(&mut self, area: Rect) -> Vec<String> {
        let width = area.width as usize;
        let height = area.height as usize;

        let mut rng = thread_rng();

        // Adjust size if size changed
        if width < self.width {
            // Trim out of bound
            self.particles = self
                .particles
                .iter()
                .map(|row| row.clone().into_iter().take(width).collect::<Vec<_>>())
                .collect::<Vec<_>>();
        } else if width > self.width {
            // Pad new space
            self.particles = self
                .particles
                .iter()
                .map(|row| {
                    let mut row = row.clone();
                    row.extend(std::iter::repeat_with(|| self.sample(&mut rng)).take(width - self.width));
                    row
                })
                .collect::<Vec<_>>();
        }

        if height < self.height {
            for _ in 0..(self.height - height) {
                self.particles.pop();
            }
        } else {
            for _ in 0..(height - self.height) {
                let new_row = std::iter::repeat_n(3usize, width).collect::<Vec<_>>();
                self.particles.push(new_row);
            }
        }

        self.width = width;
        self.height = height;

        let now = SystemTime::now();
        let dt = self.get_delta_time(now);

        if dt >= 1.0 / self.speed {
            self.last_time = now;

            let new_row = std::iter::repeat_with(|| self.sample(&mut rng)).take(width).collect();
            self.particles = {
                let mut particles = vec![new_row];
                particles.extend(self.particles.iter().map(|row| row.clone()).take(height.saturating_sub(1)));
                particles
            };
        }

        let glyphs = particle_set(self.theme.season);
        self.particles
            .iter()
            .map(|row| {
                row.clone()
                    .into_iter()
                    .map(|index| if index >= glyphs.len() { ' ' } else { glyphs[index] })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
    }

    pub fn sky_area(&self, area: Rect) -> Rect {
        let sky_height = area.height.saturating_sub(backdrop::GROUND_HEIGHT);
        Rect { height: sky_height, ..area }
    }
}

#[derive(Debug, Default)]
pub struct Backdrop;

impl Backdrop {
    fn render_silhouette(&self, area: Rect, buf: &mut Buffer, state: &BackdropState) {
        let lines: Vec<&str> = silhouette(state.theme.place).lines().filter(|s| !s.is_empty()).collect();
        let num_lines = lines.len() as u16;
        if num_lines > area.height {
            return;
        }

        let top = area.y + area.height - num_lines;
        let fg = dim(state.theme.ground, 0.6);
        let style = Style::default().fg(fg);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let x = area.x + col as u16;
                if ch == ' ' || x >= area.x + area.width {
                    continue;
                }
                buf.set_string(x, top + row as u16, ch.to_string(), style);
            }
        }
    }

    fn render_ground(&self, area: Rect, buf: &mut Buffer, state: &BackdropState) {
        let ground_string = std::iter::repeat_n('#', area.width as usize).collect::<String>();
        let style = Style::default().fg(to_color(state.theme.ground)).bg(dim(state.theme.ground, 0.35));
        for row in 0..area.height {
            buf.set_string(area.x, area.y + row, &ground_string, style);
        }
    }

    fn render_sky(&self, area: Rect, buf: &mut Buffer, state: &mut BackdropState) {
        let rows = state.update(area);
        let (top, bottom) = state.theme.sky;
        let span = rows.len().max(2) - 1;
        for (row, line) in rows.iter().enumerate() {
            let t = row as f32 / span as f32;
            let style = Style::default().fg(Color::White).bg(lerp(top, bottom, t));
            buf.set_string(area.x, area.y + row as u16, line, style);
        }
    }
}

impl StatefulWidget for Backdrop {
    type State = BackdropState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut BackdropState)
    where
        Self: Sized,
    {
        let [sky_area, ground_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(backdrop::GROUND_HEIGHT)]).areas(area);

        self.render_sky(sky_area, buf, state);
        self.render_silhouette(sky_area, buf, state);
        self.render_ground(ground_area, buf, state);
    }
}

fn particle_set(season: Season) -> [char; 3] {
    match season {
        Season::Winter => backdrop::WINTER_PARTICLES,
        Season::Spring => backdrop::SPRING_PARTICLES,
        Season::Summer => backdrop::SUMMER_PARTICLES,
        Season::Fall => backdrop::FALL_PARTICLES,
    }
}

fn silhouette(place: Place) -> &'static str {
    match place {
        Place::Countryside => backdrop::COUNTRYSIDE_SILHOUETTE,
        Place::City => backdrop::CITY_SILHOUETTE,
        Place::Highway => backdrop::HIGHWAY_SILHOUETTE,
        Place::Woods => backdrop::WOODS_SILHOUETTE,
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn lerp(a: Rgb, b: Rgb, t: f32) -> Color {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn dim(rgb: Rgb, factor: f32) -> Color {
    let scale = |x: u8| (x as f32 * factor) as u8;
    Color::Rgb(scale(rgb.0), scale(rgb.1), scale(rgb.2))
}
