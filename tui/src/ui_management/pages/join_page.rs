use comms::room::{TransportType, UserType};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, Notice, NoticeKind, PendingRequest, State};
use crate::ui_management::components::{
    input_box::{self, InputBox},
    option_bar::{cycle, options_line},
    usage::{usage_to_text, HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

pub const NO_ROOMS_AVAILABLE_MESSAGE: &str = "No available rooms for this transport type. Please try another type or wait for a driver to create a room.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Username,
    Role,
    Transport,
    RoomName,
}

struct Props {
    server_url: String,
    user_type: Option<UserType>,
    transport_type: Option<TransportType>,
    is_creating_room: bool,
    pending_request: Option<PendingRequest>,
    no_rooms_available: bool,
    notice: Option<Notice>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            server_url: state.server_url.clone(),
            user_type: state.user_type,
            transport_type: state.transport_type,
            is_creating_room: state.is_creating_room,
            pending_request: state.pending_request,
            no_rooms_available: state.no_rooms_available,
            notice: state.notice.clone(),
        }
    }
}

/// JoinPage collects the username, role and transport type, then finds or creates a room
pub struct JoinPage {
    /// Action sender
    action_tx: UnboundedSender<Action>,
    /// State Mapped JoinPage Props
    props: Props,
    // Internal State
    /// Field receiving the key presses
    pub focused: Field,
    // Child Components
    pub username_input: InputBox,
    pub room_name_input: InputBox,
}

impl JoinPage {
    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Username, Field::Role, Field::Transport];
        if self.props.is_creating_room {
            fields.push(Field::RoomName);
        }

        fields
    }

    fn move_focus(&mut self, forward: bool) {
        if let Some(next) = cycle(&self.fields(), Some(self.focused), forward) {
            self.focused = next;
        }
    }

    fn is_loading(&self) -> bool {
        self.props.pending_request.is_some()
    }

    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Join for passengers, create mode then create for drivers.
    /// Without a role the join request is sent so the missing selection gets reported.
    fn submit(&self) {
        match (self.props.user_type, self.props.is_creating_room) {
            (Some(UserType::Driver), true) => self.send(Action::CreateRoom),
            (Some(UserType::Driver), false) => self.send(Action::StartRoomCreation),
            _ => self.send(Action::JoinRandomRoom),
        }
    }

    fn handle_field_key_event(&mut self, key: KeyEvent) {
        let forward = match key.code {
            KeyCode::Right => Some(true),
            KeyCode::Left => Some(false),
            _ => None,
        };

        match self.focused {
            Field::Username => {
                let before = self.username_input.text().to_owned();
                self.username_input.handle_key_event(key);
                if before != self.username_input.text() {
                    self.send(Action::SetUsername {
                        username: self.username_input.text().to_owned(),
                    });
                }
            }
            Field::RoomName => {
                let before = self.room_name_input.text().to_owned();
                self.room_name_input.handle_key_event(key);
                if before != self.room_name_input.text() {
                    self.send(Action::SetRoomDisplayName {
                        name: self.room_name_input.text().to_owned(),
                    });
                }
            }
            Field::Role => {
                if let Some(user_type) = forward
                    .and_then(|forward| cycle(&UserType::ALL, self.props.user_type, forward))
                {
                    self.send(Action::SelectUserType { user_type });
                }
            }
            Field::Transport => {
                if let Some(transport_type) = forward.and_then(|forward| {
                    cycle(&TransportType::ALL, self.props.transport_type, forward)
                }) {
                    self.send(Action::SelectTransportType { transport_type });
                }
            }
        }
    }

    fn border_color(&self, field: Field) -> Color {
        match (self.is_loading(), self.focused == field) {
            (true, _) => Color::DarkGray,
            (false, true) => Color::Yellow,
            (false, false) => Color::Reset,
        }
    }

    fn primary_action_label(&self) -> &'static str {
        match (self.props.pending_request, self.props.user_type, self.props.is_creating_room) {
            (Some(PendingRequest::RandomRoom), _, _) => "Finding room...",
            (Some(PendingRequest::CreateRoom), _, _) => "Creating...",
            (None, Some(UserType::Driver), true) => "Create & Join Room",
            (None, Some(UserType::Driver), false) => "Create New Room",
            (None, _, _) => "Join Random Room",
        }
    }
}

impl Component for JoinPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let mut username_input = InputBox::new(state, action_tx.clone());
        username_input.set_text(&state.username);

        JoinPage {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            focused: Field::Username,
            username_input,
            room_name_input: InputBox::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let props = Props::from(state);
        let mut room_name_input = self.room_name_input.move_with_state(state);
        // the room name starts empty every time creation mode is entered or left
        if props.is_creating_room != self.props.is_creating_room {
            room_name_input.reset();
        }

        let mut page = JoinPage {
            props,
            room_name_input,
            username_input: self.username_input.move_with_state(state),
            ..self
        };
        if page.focused == Field::RoomName && !page.props.is_creating_room {
            page.focused = Field::Transport;
        }

        page
    }

    fn name(&self) -> &str {
        "Join Page"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.send(Action::Exit);
            return;
        }

        // a notice blocks everything until it is dismissed
        if self.props.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.send(Action::DismissNotice);
            }
            return;
        }

        // controls are disabled while a request is in flight
        if self.is_loading() {
            return;
        }

        match key.code {
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc if self.props.is_creating_room => {
                self.send(Action::CancelRoomCreation)
            }
            _ => self.handle_field_key_event(key),
        }
    }
}

impl HasUsageInfo for JoinPage {
    fn usage_info(&self) -> UsageInfo {
        if self.props.notice.is_some() {
            return UsageInfo {
                description: None,
                lines: vec![UsageInfoLine::new(&["Enter", "Esc"], "dismiss")],
            };
        }

        let mut lines = vec![
            UsageInfoLine::new(&["Tab", "Shift+Tab"], "move between fields"),
            UsageInfoLine::new(&["Left", "Right"], "change role or transport"),
            UsageInfoLine::new(&["Enter"], self.primary_action_label()),
        ];
        if self.props.is_creating_room {
            lines.push(UsageInfoLine::new(&["Esc"], "cancel"));
        }
        lines.push(UsageInfoLine::new(&["Ctrl+C"], "quit"));

        UsageInfo {
            description: None,
            lines,
        }
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_notice<B: Backend>(frame: &mut Frame<B>, notice: &Notice) {
    let (title, color) = match notice.kind {
        NoticeKind::Validation => ("Check your selections", Color::Yellow),
        NoticeKind::Rejection => ("Server said no", Color::Red),
        NoticeKind::TransportFailure => ("Something went wrong", Color::Red),
    };

    let area = centered_rect(60, 7, frame.size());
    let popup = Paragraph::new(Text::from(vec![
        Line::from(notice.message.clone()),
        Line::from(""),
        Line::from(vec!["Press ".into(), "<Enter>".bold(), " to continue.".into()]),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .fg(color)
            .title(title),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

impl ComponentRender<()> for JoinPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let [_, centered, _] = *Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Ratio(1, 6),
                    Constraint::Min(40),
                    Constraint::Ratio(1, 6),
                ]
                .as_ref(),
            )
            .split(frame.size())
        else {
            panic!("The horizontal layout should have 3 chunks")
        };

        let [container_title, container_username, container_role, container_transport, container_room_name, container_banner, container_usage, container_server] =
            *Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(2),
                        Constraint::Length(3),
                        Constraint::Length(3),
                        Constraint::Length(3),
                        Constraint::Length(if self.props.is_creating_room { 3 } else { 0 }),
                        Constraint::Length(4),
                        Constraint::Min(4),
                        Constraint::Length(1),
                    ]
                    .as_ref(),
                )
                .split(centered)
        else {
            panic!("The join page layout should have 8 chunks")
        };

        let title = Paragraph::new(Line::from("DriveChat@kmitl".bold()))
            .alignment(Alignment::Center);
        frame.render_widget(title, container_title);

        let editable = !self.is_loading() && self.props.notice.is_none();

        self.username_input.render(
            frame,
            input_box::RenderProps {
                title: String::from("Username"),
                placeholder: "Enter your username",
                area: container_username,
                border_color: self.border_color(Field::Username),
                show_cursor: editable && self.focused == Field::Username,
            },
        );

        let role = Paragraph::new(options_line(
            &UserType::ALL,
            self.props.user_type,
            !self.is_loading(),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .fg(self.border_color(Field::Role))
                .title("Role"),
        );
        frame.render_widget(role, container_role);

        let transport = Paragraph::new(options_line(
            &TransportType::ALL,
            self.props.transport_type,
            !self.is_loading(),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .fg(self.border_color(Field::Transport))
                .title(match self.props.transport_type {
                    Some(transport_type) => {
                        format!("Transport (up to {} people)", transport_type.capacity())
                    }
                    None => String::from("Transport"),
                }),
        );
        frame.render_widget(transport, container_transport);

        if self.props.is_creating_room {
            self.room_name_input.render(
                frame,
                input_box::RenderProps {
                    title: String::from("Create New Room"),
                    placeholder: "Enter room name",
                    area: container_room_name,
                    border_color: self.border_color(Field::RoomName),
                    show_cursor: editable && self.focused == Field::RoomName,
                },
            );
        }

        if self.props.no_rooms_available && self.props.user_type == Some(UserType::Passenger) {
            let banner = Paragraph::new(NO_ROOMS_AVAILABLE_MESSAGE)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(banner, container_banner);
        }

        let usage = Paragraph::new(usage_to_text(self.usage_info()))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Usage"));
        frame.render_widget(usage, container_usage);

        let server = Paragraph::new(Line::from(vec![
            "Server: ".into(),
            Span::styled(
                self.props.server_url.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]));
        frame.render_widget(server, container_server);

        if let Some(notice) = self.props.notice.as_ref() {
            render_notice(frame, notice);
        }
    }
}
