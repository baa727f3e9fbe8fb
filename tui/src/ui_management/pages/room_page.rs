use comms::room::{TransportType, UserType};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, JoinedRoom, State};
use crate::ui_management::components::{
    usage::{usage_to_text, HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

struct Props {
    username: String,
    user_type: Option<UserType>,
    transport_type: Option<TransportType>,
    joined_room: Option<JoinedRoom>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            username: state.username.clone(),
            user_type: state.user_type,
            transport_type: state.transport_type,
            joined_room: state.joined_room.clone(),
        }
    }
}

/// RoomPage shows the room the user ended up in
pub struct RoomPage {
    /// Action sender
    action_tx: UnboundedSender<Action>,
    /// State Mapped RoomPage Props
    props: Props,
}

impl Component for RoomPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        RoomPage {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        RoomPage {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Room Page"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('l') => {
                let _ = self.action_tx.send(Action::LeaveRoom);
            }
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(Action::Exit);
            }
            _ => {}
        }
    }
}

impl HasUsageInfo for RoomPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: None,
            lines: vec![
                UsageInfoLine::new(&["l"], "leave the room"),
                UsageInfoLine::new(&["q", "Ctrl+C"], "quit"),
            ],
        }
    }
}

impl ComponentRender<()> for RoomPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let [_, vertical_centered, _] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Ratio(1, 4),
                    Constraint::Min(1),
                    Constraint::Ratio(1, 4),
                ]
                .as_ref(),
            )
            .split(frame.size())
        else {
            panic!("The main layout should have 3 chunks")
        };

        let [_, both_centered, _] = *Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Ratio(1, 4),
                    Constraint::Min(1),
                    Constraint::Ratio(1, 4),
                ]
                .as_ref(),
            )
            .split(vertical_centered)
        else {
            panic!("The horizontal layout should have 3 chunks")
        };

        let [container_room, container_usage] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(3)].as_ref())
            .split(both_centered)
        else {
            panic!("The room layout should have 2 chunks")
        };

        let (room, capacity) = match self.props.joined_room.as_ref() {
            Some(joined_room) => (joined_room.room.clone(), joined_room.capacity.to_string()),
            None => (String::from("-"), String::from("-")),
        };

        let details = Paragraph::new(Text::from(vec![
            Line::from(vec![
                "Room: ".into(),
                Span::styled(room, Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec!["Capacity: ".into(), capacity.into()]),
            Line::from(format!(
                "Transport: {}",
                self.props
                    .transport_type
                    .map(|transport_type| transport_type.to_string())
                    .unwrap_or_else(|| String::from("-"))
            )),
            Line::from(format!(
                "Riding as {} ({})",
                self.props.username,
                self.props
                    .user_type
                    .map(|user_type| user_type.to_string())
                    .unwrap_or_else(|| String::from("-"))
            )),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .fg(Color::Green)
                .title("Joined"),
        );
        frame.render_widget(details, container_room);

        let usage = Paragraph::new(usage_to_text(self.usage_info()))
            .block(Block::default().borders(Borders::ALL).title("Usage"));
        frame.render_widget(usage, container_usage);
    }
}
