use std::collections::HashMap;

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    components::backdrop::{Backdrop, BackdropState},
    config::PageKeyBindings,
    constants::backdrop,
    engine::{
        difficulty::RANDOM_AFTER,
        process_input, process_tick,
        types::{BIRD_SIZE, BIRD_X, PIPE_WIDTH, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH},
        FileScoreStore, GameInput, Phase, ScoreStore, WorldState,
    },
};

const PIPE_COLOR: Color = Color::LightGreen;
const BIRD_COLOR: Color = Color::Yellow;

pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    world: WorldState,
    rng: StdRng,
    store: FileScoreStore,
    backdrop_state: BackdropState,
}

impl GamePage {
    pub fn new() -> Self {
        let mut rng = StdRng::from_entropy();
        let store = FileScoreStore::new();
        let world = WorldState::new(store.load(), &mut rng);
        let backdrop_state =
            BackdropState::new(backdrop::PARTICLE_SPEED, backdrop::PARTICLE_DENSITY, world.theme);

        GamePage { action_tx: None, keymap: PageKeyBindings::default(), world, rng, store, backdrop_state }
    }

    fn draw_pipes(&self, buf: &mut Buffer, canvas: Rect) {
        let sx = canvas.width as f32 / PLAYFIELD_WIDTH;
        let sy = canvas.height as f32 / PLAYFIELD_HEIGHT;
        let style = Style::default().fg(PIPE_COLOR);

        for obstacle in self.world.obstacles.iter() {
            let left = canvas.x as i32 + (obstacle.x * sx).round() as i32;
            let right = canvas.x as i32 + ((obstacle.x + PIPE_WIDTH) * sx).round() as i32;
            let left = left.clamp(canvas.x as i32, (canvas.x + canvas.width) as i32) as u16;
            let right = right.clamp(canvas.x as i32, (canvas.x + canvas.width) as i32) as u16;
            if right <= left {
                continue;
            }

            let gap_top_row = canvas.y + (obstacle.gap_top * sy) as u16;
            let gap_bottom_row = canvas.y + ((obstacle.gap_top + obstacle.gap_size) * sy) as u16;
            let column = "█".repeat((right - left) as usize);

            for y in canvas.y..canvas.y + canvas.height {
                if y < gap_top_row || y >= gap_bottom_row {
                    buf.set_string(left, y, &column, style);
                }
            }
        }
    }

    fn draw_bird(&self, buf: &mut Buffer, canvas: Rect) {
        let sx = canvas.width as f32 / PLAYFIELD_WIDTH;
        let sy = canvas.height as f32 / PLAYFIELD_HEIGHT;

        let x = canvas.x + (((BIRD_X + BIRD_SIZE / 2.0) * sx) as u16).min(canvas.width.saturating_sub(1));
        let y = canvas.y + (((self.world.bird_y + BIRD_SIZE / 2.0) * sy) as u16).min(canvas.height.saturating_sub(1));

        buf.set_string(x, y, "◉", Style::default().fg(BIRD_COLOR).bold());
    }

    fn draw_hud(&self, buf: &mut Buffer, canvas: Rect) {
        let left = format!(" SCORE {:03}  BEST {:03} ", self.world.score, self.world.high_score);
        buf.set_string(canvas.x, canvas.y, &left, Style::default().fg(Color::White).bold());

        let right = if self.world.total_passed >= RANDOM_AFTER {
            " LVL RNG! ".to_string()
        } else {
            format!(" LVL {}/10 ", self.world.level)
        };
        let x = canvas.x + canvas.width.saturating_sub(right.len() as u16);
        buf.set_string(x, canvas.y, &right, Style::default().fg(Color::Magenta).bold());
    }

    fn draw_overlay(&self, f: &mut Frame<'_>, canvas: Rect, lines: Vec<Line<'_>>) {
        let height = lines.len() as u16 + 4;
        let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 8;

        let [area] = Layout::vertical([Constraint::Length(height)]).flex(layout::Flex::Center).areas(canvas);
        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(layout::Flex::Center).areas(area);

        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .padding(Padding::symmetric(3, 1))
                .style(Style::default().bg(Color::Black)),
        );
        f.render_widget(paragraph, area);
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Tick => {
                process_tick(&mut self.world, &mut self.rng, &mut self.store);
                self.backdrop_state.theme = self.world.theme;
            },
            Command::Game(GameAction::Flap) if action.state != ActionState::End => {
                process_input(&mut self.world, GameInput::Flap, &mut self.rng);
            },
            Command::Game(GameAction::Restart) => {
                process_input(&mut self.world, GameInput::Restart, &mut self.rng);
            },
            Command::Game(GameAction::Leave) => return Ok(Some(act!(Command::GoHome))),
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_stateful_widget(Backdrop::default(), rect, &mut self.backdrop_state);
        let canvas = self.backdrop_state.sky_area(rect);

        let buf = f.buffer_mut();
        self.draw_pipes(buf, canvas);
        self.draw_bird(buf, canvas);
        self.draw_hud(buf, canvas);

        match self.world.phase {
            Phase::Start => {
                self.draw_overlay(
                    f,
                    canvas,
                    vec![
                        Line::from("RETRO BREAK").style(Style::default().fg(Color::Yellow).bold()),
                        Line::from(""),
                        Line::from("Press Space to flap"),
                        Line::from(format!("Best: {}", self.world.high_score)),
                    ],
                );
            },
            Phase::GameOver => {
                self.draw_overlay(
                    f,
                    canvas,
                    vec![
                        Line::from("GAME OVER").style(Style::default().fg(Color::Red).bold()),
                        Line::from(""),
                        Line::from(format!("Score: {}", self.world.score)),
                        Line::from(format!("Best: {}", self.world.high_score)),
                        Line::from(""),
                        Line::from("R to restart, Esc for menu"),
                    ],
                );
            },
            Phase::Playing => {},
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_on_start_screen_is_inert() {
        let mut page = GamePage::new();
        let before = page.world.clone();
        page.update(act!(Command::Tick)).unwrap();
        assert_eq!(page.world, before);
    }

    #[test]
    fn test_flap_starts_a_run() {
        let mut page = GamePage::new();
        assert_eq!(page.world.phase, Phase::Start);
        page.update(act!(Command::Game(GameAction::Flap))).unwrap();
        assert_eq!(page.world.phase, Phase::Playing);
    }

    #[test]
    fn test_leave_routes_back_home() {
        let mut page = GamePage::new();
        let action = page.update(act!(Command::Game(GameAction::Leave))).unwrap();
        assert_eq!(action.unwrap().command, Command::GoHome);
    }
}
