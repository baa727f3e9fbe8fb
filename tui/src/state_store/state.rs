use std::fmt;

use comms::{
    request::{CreateRoomRequest, RandomRoomQuery},
    response::{CreateRoomOutcome, RandomRoomOutcome},
    room::{TransportType, UserType},
};

pub const JOIN_ROOM_FAILED_MESSAGE: &str = "Error joining room. Please try again.";
pub const CREATE_ROOM_FAILED_MESSAGE: &str = "Error creating room. Please try again.";

/// Reasons a request is refused before it ever reaches the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Joining needs a username, a role and a transport type
    IncompleteJoinSelection,
    /// Only drivers with a username and a transport type may create rooms
    NotAllowedToCreate,
    /// The room name is empty or whitespace
    MissingRoomName,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormError::IncompleteJoinSelection => {
                "Please enter a username, select your role, and select a transport type"
            }
            FormError::NotAllowedToCreate => {
                "Only drivers can create rooms. Please check your selections."
            }
            FormError::MissingRoomName => "Please enter a room name",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Rejection,
    TransportFailure,
}

/// A message that blocks the form until the user dismisses it
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Notice {
            kind,
            message: message.into(),
        }
    }
}

/// The request currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    RandomRoom,
    CreateRoom,
}

/// The room the user ended up in
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRoom {
    pub room: String,
    pub capacity: u32,
}

/// State holds the state of the application
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Backend the requests go to, shown in the footer
    pub server_url: String,
    pub username: String,
    /// Driver or passenger, unset until the user picks one
    pub user_type: Option<UserType>,
    pub transport_type: Option<TransportType>,
    /// Name typed for a room about to be created
    pub room_display_name: String,
    /// Drivers switch the form into creation mode before naming the room
    pub is_creating_room: bool,
    /// Set for the duration of a request, doubles as the loading flag
    pub pending_request: Option<PendingRequest>,
    /// The last random room lookup came back empty
    pub no_rooms_available: bool,
    pub notice: Option<Notice>,
    pub joined_room: Option<JoinedRoom>,
}

impl Default for State {
    fn default() -> Self {
        State::new(comms::transport::client::DEFAULT_SERVER_URL, "")
    }
}

impl State {
    pub fn new(server_url: &str, username: &str) -> Self {
        State {
            server_url: String::from(server_url),
            username: String::from(username),
            user_type: None,
            transport_type: None,
            room_display_name: String::new(),
            is_creating_room: false,
            pending_request: None,
            no_rooms_available: false,
            notice: None,
            joined_room: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn set_username(&mut self, username: String) {
        self.username = username;
    }

    pub fn select_user_type(&mut self, user_type: UserType) {
        self.user_type = Some(user_type);
        if user_type == UserType::Passenger {
            self.transport_type = None;
        }
        self.is_creating_room = false;
        self.no_rooms_available = false;
    }

    pub fn select_transport_type(&mut self, transport_type: TransportType) {
        self.transport_type = Some(transport_type);
        self.no_rooms_available = false;
    }

    /// Switches drivers into creation mode with an empty room name
    pub fn start_room_creation(&mut self) {
        if self.user_type != Some(UserType::Driver) || self.is_loading() {
            return;
        }

        self.is_creating_room = true;
        self.room_display_name.clear();
    }

    pub fn cancel_room_creation(&mut self) {
        if self.is_loading() {
            return;
        }

        self.is_creating_room = false;
        self.room_display_name.clear();
    }

    pub fn set_room_display_name(&mut self, name: String) {
        self.room_display_name = name;
    }

    /// Builds the random room query, or the reason it can not be sent yet
    pub fn random_room_query(&self) -> Result<RandomRoomQuery, FormError> {
        match (self.username.is_empty(), self.transport_type, self.user_type) {
            (false, Some(transport_type), Some(user_type)) => Ok(RandomRoomQuery {
                transport_type,
                user_type,
            }),
            _ => Err(FormError::IncompleteJoinSelection),
        }
    }

    /// Builds the room creation request, or the reason it can not be sent yet
    pub fn create_room_request(&self) -> Result<CreateRoomRequest, FormError> {
        let transport_type = match (self.username.is_empty(), self.transport_type, self.user_type) {
            (false, Some(transport_type), Some(UserType::Driver)) => transport_type,
            _ => return Err(FormError::NotAllowedToCreate),
        };

        if self.room_display_name.trim().is_empty() {
            return Err(FormError::MissingRoomName);
        }

        Ok(CreateRoomRequest::new(
            &self.room_display_name,
            transport_type,
            UserType::Driver,
        ))
    }

    pub fn show_form_error(&mut self, err: FormError) {
        self.notice = Some(Notice::new(NoticeKind::Validation, err.to_string()));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn mark_request_start(&mut self, request: PendingRequest) {
        self.pending_request = Some(request);
    }

    /// Processes the result of a random room request to change the state of the application
    pub fn process_random_room_result(&mut self, result: anyhow::Result<RandomRoomOutcome>) {
        self.pending_request = None;

        match result {
            Ok(RandomRoomOutcome::Found { room, capacity }) => {
                self.joined_room = Some(JoinedRoom { room, capacity });
            }
            Ok(RandomRoomOutcome::NoneAvailable) => {
                self.no_rooms_available = true;
            }
            Err(_) => {
                self.notice = Some(Notice::new(
                    NoticeKind::TransportFailure,
                    JOIN_ROOM_FAILED_MESSAGE,
                ));
            }
        }
    }

    /// Processes the result of a room creation request. `room` is the display name
    /// the request was sent with.
    pub fn process_create_room_result(
        &mut self,
        room: &str,
        result: anyhow::Result<CreateRoomOutcome>,
    ) {
        self.pending_request = None;

        match result {
            Ok(CreateRoomOutcome::Created { capacity }) => {
                self.joined_room = Some(JoinedRoom {
                    room: String::from(room),
                    capacity,
                });
                self.is_creating_room = false;
            }
            Ok(CreateRoomOutcome::Rejected { detail }) => {
                self.notice = Some(Notice::new(NoticeKind::Rejection, detail));
            }
            Err(_) => {
                self.notice = Some(Notice::new(
                    NoticeKind::TransportFailure,
                    CREATE_ROOM_FAILED_MESSAGE,
                ));
            }
        }
    }

    /// Goes back to the form, keeping the selections made so far
    pub fn leave_room(&mut self) {
        self.joined_room = None;
        self.no_rooms_available = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger_ready() -> State {
        let mut state = State::new("http://localhost:8000", "nok");
        state.select_user_type(UserType::Passenger);
        state.select_transport_type(TransportType::Bus);
        state
    }

    fn driver_ready(room_name: &str) -> State {
        let mut state = State::new("http://localhost:8000", "somchai");
        state.select_user_type(UserType::Driver);
        state.select_transport_type(TransportType::Location);
        state.start_room_creation();
        state.set_room_display_name(String::from(room_name));
        state
    }

    #[test]
    fn test_random_room_query_requires_every_selection() {
        let mut state = State::default();
        assert_eq!(
            state.random_room_query(),
            Err(FormError::IncompleteJoinSelection)
        );

        state.set_username("nok".into());
        state.select_user_type(UserType::Passenger);
        assert_eq!(
            state.random_room_query(),
            Err(FormError::IncompleteJoinSelection)
        );

        state.select_transport_type(TransportType::Car);
        assert_eq!(
            state.random_room_query(),
            Ok(RandomRoomQuery {
                transport_type: TransportType::Car,
                user_type: UserType::Passenger,
            })
        );

        state.set_username(String::new());
        assert!(state.random_room_query().is_err());
    }

    #[test]
    fn test_create_room_request_only_for_drivers() {
        let mut state = passenger_ready();
        state.set_room_display_name("Morning Bus".into());
        assert_eq!(
            state.create_room_request(),
            Err(FormError::NotAllowedToCreate)
        );

        let state = driver_ready("   ");
        assert_eq!(state.create_room_request(), Err(FormError::MissingRoomName));

        let state = driver_ready(" Campus Loop ");
        assert_eq!(
            state.create_room_request(),
            Ok(CreateRoomRequest {
                room_name: " Campus Loop ".into(),
                transport_type: TransportType::Location,
                capacity: 10,
                creator_type: UserType::Driver,
                display_name: " Campus Loop ".into(),
            })
        );
    }

    #[test]
    fn test_selecting_passenger_clears_transport_and_creation_mode() {
        let mut state = driver_ready("Campus Loop");
        state.no_rooms_available = true;

        state.select_user_type(UserType::Passenger);

        assert_eq!(state.transport_type, None);
        assert!(!state.is_creating_room);
        assert!(!state.no_rooms_available);
    }

    #[test]
    fn test_selecting_transport_clears_no_rooms_flag() {
        let mut state = passenger_ready();
        state.no_rooms_available = true;

        state.select_transport_type(TransportType::Bike);

        assert!(!state.no_rooms_available);
        assert_eq!(state.transport_type, Some(TransportType::Bike));
    }

    #[test]
    fn test_only_drivers_enter_creation_mode() {
        let mut state = passenger_ready();
        state.start_room_creation();
        assert!(!state.is_creating_room);

        let mut state = driver_ready("Campus Loop");
        assert!(state.is_creating_room);
        state.cancel_room_creation();
        assert!(!state.is_creating_room);
        assert!(state.room_display_name.is_empty());
    }

    #[test]
    fn test_cancel_ignored_while_loading() {
        let mut state = driver_ready("Campus Loop");
        state.mark_request_start(PendingRequest::CreateRoom);

        state.cancel_room_creation();

        assert!(state.is_creating_room);
        assert_eq!(state.room_display_name, "Campus Loop");
    }

    #[test]
    fn test_random_room_found_joins() {
        let mut state = passenger_ready();
        state.mark_request_start(PendingRequest::RandomRoom);
        assert!(state.is_loading());

        state.process_random_room_result(Ok(RandomRoomOutcome::Found {
            room: "kmitl-bus-1".into(),
            capacity: 15,
        }));

        assert!(!state.is_loading());
        assert_eq!(
            state.joined_room,
            Some(JoinedRoom {
                room: "kmitl-bus-1".into(),
                capacity: 15,
            })
        );
        assert!(!state.no_rooms_available);
    }

    #[test]
    fn test_random_room_absent_flags_no_rooms() {
        let mut state = passenger_ready();
        state.mark_request_start(PendingRequest::RandomRoom);

        state.process_random_room_result(Ok(RandomRoomOutcome::NoneAvailable));

        assert!(!state.is_loading());
        assert!(state.no_rooms_available);
        assert_eq!(state.joined_room, None);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_random_room_transport_failure() {
        let mut state = passenger_ready();
        state.mark_request_start(PendingRequest::RandomRoom);

        state.process_random_room_result(Err(anyhow::anyhow!("connection refused")));

        assert!(!state.is_loading());
        assert_eq!(state.joined_room, None);
        assert_eq!(
            state.notice,
            Some(Notice::new(
                NoticeKind::TransportFailure,
                JOIN_ROOM_FAILED_MESSAGE
            ))
        );
    }

    #[test]
    fn test_create_room_outcomes() {
        let mut state = driver_ready("Campus Loop");
        state.mark_request_start(PendingRequest::CreateRoom);
        state.process_create_room_result(
            "Campus Loop",
            Ok(CreateRoomOutcome::Rejected {
                detail: "Room already exists".into(),
            }),
        );
        assert!(!state.is_loading());
        assert!(state.is_creating_room);
        assert_eq!(
            state.notice.as_ref().map(|notice| notice.message.as_str()),
            Some("Room already exists")
        );

        state.dismiss_notice();
        state.mark_request_start(PendingRequest::CreateRoom);
        state.process_create_room_result("Campus Loop", Ok(CreateRoomOutcome::Created { capacity: 10 }));
        assert!(!state.is_loading());
        assert!(!state.is_creating_room);
        assert_eq!(
            state.joined_room,
            Some(JoinedRoom {
                room: "Campus Loop".into(),
                capacity: 10,
            })
        );
    }

    #[test]
    fn test_leave_room_keeps_selections() {
        let mut state = passenger_ready();
        state.process_random_room_result(Ok(RandomRoomOutcome::Found {
            room: "kmitl-bus-1".into(),
            capacity: 15,
        }));

        state.leave_room();

        assert_eq!(state.joined_room, None);
        assert_eq!(state.user_type, Some(UserType::Passenger));
        assert_eq!(state.transport_type, Some(TransportType::Bus));
        assert_eq!(state.username, "nok");
    }
}
