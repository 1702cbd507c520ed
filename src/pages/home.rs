use std::collections::HashMap;

use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, Command, HomeAction},
    components::backdrop::{Backdrop, BackdropState},
    config::PageKeyBindings,
    constants::{backdrop, TITLE_TEXT},
    engine::{generate_theme, FileScoreStore, ScoreStore},
};

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum OptionItem {
    Start,
    Quit,
}

#[derive(Builder)]
pub struct HomePage {
    #[builder(default)]
    pub action_tx: Option<UnboundedSender<Action>>,
    #[builder(default)]
    pub keymap: PageKeyBindings,
    backdrop_state: BackdropState,
    options: Vec<(OptionItem, &'static str)>,
    selected_option_index: usize,
    high_score: u32,
}

impl HomePage {
    pub fn new() -> Self {
        let theme = generate_theme(&mut rand::thread_rng());
        HomePageBuilder::default()
            .backdrop_state(BackdropState::new(backdrop::PARTICLE_SPEED, backdrop::PARTICLE_DENSITY, theme))
            .options(vec![(OptionItem::Start, "Start playing"), (OptionItem::Quit, "Quit")])
            .selected_option_index(0)
            .high_score(FileScoreStore::new().load())
            .build()
            .unwrap()
    }

    pub fn up(&mut self) {
        if self.selected_option_index > 0 {
            self.selected_option_index -= 1;
        }
    }

    pub fn down(&mut self) {
        if self.selected_option_index < self.options.len() - 1 {
            self.selected_option_index += 1;
        }
    }

    fn select(&self) -> Option<Action> {
        let (item, _) = self.options[self.selected_option_index];
        match item {
            OptionItem::Start => Some(act!(Command::StartGame)),
            OptionItem::Quit => Some(act!(Command::Quit)),
        }
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
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
            Command::Home(command) => match command {
                HomeAction::Up => self.up(),
                HomeAction::Down => self.down(),
                HomeAction::Select => return Ok(self.select()),
            },
            // Coming back from a run, the best may have just improved.
            Command::GoHome => self.high_score = FileScoreStore::new().load(),
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_stateful_widget(Backdrop::default(), rect, &mut self.backdrop_state);
        let rect = self.backdrop_state.sky_area(rect);

        let title_lines: Vec<&str> = TITLE_TEXT.lines().filter(|s| !s.is_empty()).collect();
        let num_title_lines = title_lines.len() as u16;

        let num_options = self.options.len() as u16;
        let option_height = num_options * 2 - 1;

        let [title_area, option_area, best_area] = Layout::vertical(vec![
            Constraint::Length(num_title_lines),
            Constraint::Length(option_height),
            Constraint::Length(1),
        ])
        .flex(layout::Flex::SpaceAround)
        .areas(rect);

        // Draw title
        let lines = title_lines.iter().map(|line| Line::from(*line)).collect::<Vec<_>>();
        let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::Yellow)).alignment(Alignment::Center);
        f.render_widget(paragraph, title_area);

        // Draw options
        let option_titles = self.options.iter().map(|(_, title)| *title).collect::<Vec<_>>();
        let max_option_len = option_titles.iter().map(|title| title.len()).max().unwrap_or(0) as u16;

        // Pad option titles
        let option_titles = option_titles
            .into_iter()
            .map(|title| {
                let title = title.to_string();
                let pad_len = max_option_len as usize - title.len();
                let front_pad = " ".repeat(2);
                let back_pad = " ".repeat(pad_len + 2);
                [front_pad, title, back_pad].concat()
            })
            .collect::<Vec<_>>();

        let [option_area] = Layout::horizontal(vec![Constraint::Length(max_option_len + (2 * 2))])
            .flex(layout::Flex::SpaceAround)
            .areas(option_area);

        let lines = option_titles
            .iter()
            .enumerate()
            .map(|(index, title)| {
                Line::from(title.as_str()).style({
                    if index == self.selected_option_index {
                        Style::default().bg(Color::Cyan).fg(Color::Black)
                    } else {
                        Style::default()
                    }
                })
            })
            .collect::<Vec<_>>();
        // Insert empty lines
        let lines = {
            let len = lines.len();
            let mut new_lines = vec![];
            for (index, line) in lines.into_iter().enumerate() {
                new_lines.push(line);
                if index < len - 1 {
                    new_lines.push(Line::from(""));
                }
            }
            new_lines
        };

        let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::White)).alignment(Alignment::Left);
        f.render_widget(paragraph, option_area);

        // Persisted best
        let best = Paragraph::new(format!("Best score: {}", self.high_score))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(best, best_area);

        Ok(())
    }
}
