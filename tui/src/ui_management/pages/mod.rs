use crossterm::event::KeyEvent;
use ratatui::{prelude::Backend, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

use self::{join_page::JoinPage, room_page::RoomPage};

use super::components::{Component, ComponentRender};

mod join_page;
mod room_page;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActivePage {
    JoinPage,
    RoomPage,
}

struct Props {
    active_page: ActivePage,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            active_page: match state.joined_room {
                Some(_) => ActivePage::RoomPage,
                None => ActivePage::JoinPage,
            },
        }
    }
}

pub struct AppRouter {
    props: Props,
    //
    join_page: JoinPage,
    room_page: RoomPage,
}

impl AppRouter {
    fn get_active_page_component(&self) -> &dyn Component {
        match self.props.active_page {
            ActivePage::JoinPage => &self.join_page,
            ActivePage::RoomPage => &self.room_page,
        }
    }

    fn get_active_page_component_mut(&mut self) -> &mut dyn Component {
        match self.props.active_page {
            ActivePage::JoinPage => &mut self.join_page,
            ActivePage::RoomPage => &mut self.room_page,
        }
    }
}

impl Component for AppRouter {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            props: Props::from(state),
            //
            join_page: JoinPage::new(state, action_tx.clone()),
            room_page: RoomPage::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            props: Props::from(state),
            //
            join_page: self.join_page.move_with_state(state),
            room_page: self.room_page.move_with_state(state),
        }
    }

    // route all functions to the active page
    fn name(&self) -> &str {
        self.get_active_page_component().name()
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        self.get_active_page_component_mut().handle_key_event(key)
    }
}

impl ComponentRender<()> for AppRouter {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: ()) {
        match self.props.active_page {
            ActivePage::JoinPage => self.join_page.render(frame, props),
            ActivePage::RoomPage => self.room_page.render(frame, props),
        }
    }
}
