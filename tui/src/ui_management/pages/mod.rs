use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::Backend, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, Screen, State};

use self::{
    disconnected_page::DisconnectedPage, error_page::ErrorPage, game_page::GamePage,
    loader_page::LoaderPage, player_form_page::PlayerFormPage, results_page::ResultsPage,
    topics_page::TopicsPage, waiting_page::WaitingPage,
};

use super::components::{Component, ComponentRender};

mod disconnected_page;
mod error_page;
mod game_page;
mod layout;
mod loader_page;
mod player_form_page;
mod results_page;
mod topics_page;
mod waiting_page;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActivePage {
    Loader,
    Topics,
    PlayerForm,
    Waiting,
    Game,
    Results,
    Disconnected,
    Error,
}

struct Props {
    active_page: ActivePage,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            active_page: match state.screen {
                Screen::Loader => ActivePage::Loader,
                Screen::Topics => ActivePage::Topics,
                Screen::PlayerForm => ActivePage::PlayerForm,
                Screen::Waiting => ActivePage::Waiting,
                Screen::Game => ActivePage::Game,
                Screen::Results(_) => ActivePage::Results,
                Screen::Disconnected => ActivePage::Disconnected,
                Screen::Error { .. } => ActivePage::Error,
            },
        }
    }
}

pub struct AppRouter {
    action_tx: UnboundedSender<Action>,
    props: Props,
    //
    loader_page: LoaderPage,
    topics_page: TopicsPage,
    player_form_page: PlayerFormPage,
    waiting_page: WaitingPage,
    game_page: GamePage,
    results_page: ResultsPage,
    disconnected_page: DisconnectedPage,
    error_page: ErrorPage,
}

impl AppRouter {
    fn get_active_page_component(&self) -> &dyn Component {
        match self.props.active_page {
            ActivePage::Loader => &self.loader_page,
            ActivePage::Topics => &self.topics_page,
            ActivePage::PlayerForm => &self.player_form_page,
            ActivePage::Waiting => &self.waiting_page,
            ActivePage::Game => &self.game_page,
            ActivePage::Results => &self.results_page,
            ActivePage::Disconnected => &self.disconnected_page,
            ActivePage::Error => &self.error_page,
        }
    }

    fn get_active_page_component_mut(&mut self) -> &mut dyn Component {
        match self.props.active_page {
            ActivePage::Loader => &mut self.loader_page,
            ActivePage::Topics => &mut self.topics_page,
            ActivePage::PlayerForm => &mut self.player_form_page,
            ActivePage::Waiting => &mut self.waiting_page,
            ActivePage::Game => &mut self.game_page,
            ActivePage::Results => &mut self.results_page,
            ActivePage::Disconnected => &mut self.disconnected_page,
            ActivePage::Error => &mut self.error_page,
        }
    }
}

impl Component for AppRouter {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            //
            loader_page: LoaderPage::new(state, action_tx.clone()),
            topics_page: TopicsPage::new(state, action_tx.clone()),
            player_form_page: PlayerFormPage::new(state, action_tx.clone()),
            waiting_page: WaitingPage::new(state, action_tx.clone()),
            game_page: GamePage::new(state, action_tx.clone()),
            results_page: ResultsPage::new(state, action_tx.clone()),
            disconnected_page: DisconnectedPage::new(state, action_tx.clone()),
            error_page: ErrorPage::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            action_tx: self.action_tx,
            props: Props::from(state),
            //
            loader_page: self.loader_page.move_with_state(state),
            topics_page: self.topics_page.move_with_state(state),
            player_form_page: self.player_form_page.move_with_state(state),
            waiting_page: self.waiting_page.move_with_state(state),
            game_page: self.game_page.move_with_state(state),
            results_page: self.results_page.move_with_state(state),
            disconnected_page: self.disconnected_page.move_with_state(state),
            error_page: self.error_page.move_with_state(state),
        }
    }

    // route all functions to the active page
    fn name(&self) -> &str {
        self.get_active_page_component().name()
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl+C leaves the app from every page, text inputs included
        if key.kind == KeyEventKind::Press
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('c')
        {
            let _ = self.action_tx.send(Action::Exit);
            return;
        }

        self.get_active_page_component_mut().handle_key_event(key)
    }
}

impl ComponentRender<()> for AppRouter {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: ()) {
        match self.props.active_page {
            ActivePage::Loader => self.loader_page.render(frame, props),
            ActivePage::Topics => self.topics_page.render(frame, props),
            ActivePage::PlayerForm => self.player_form_page.render(frame, props),
            ActivePage::Waiting => self.waiting_page.render(frame, props),
            ActivePage::Game => self.game_page.render(frame, props),
            ActivePage::Results => self.results_page.render(frame, props),
            ActivePage::Disconnected => self.disconnected_page.render(frame, props),
            ActivePage::Error => self.error_page.render(frame, props),
        }
    }
}
