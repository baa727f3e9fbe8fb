use std::{future::Future, pin::Pin};

use anyhow::Context;
use comms::{
    request::{CreateRoomRequest, RandomRoomQuery},
    response::{CreateRoomOutcome, RandomRoomOutcome},
    transport::client::RoomsApi,
};
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use crate::{Interrupted, Terminator};

use super::{action::Action, PendingRequest, State};

/// A request the form decided to send
enum Request {
    RandomRoom(RandomRoomQuery),
    CreateRoom(CreateRoomRequest),
}

/// What came back from the server for a [Request]
enum RequestResult {
    RandomRoom(anyhow::Result<RandomRoomOutcome>),
    CreateRoom {
        room: String,
        result: anyhow::Result<CreateRoomOutcome>,
    },
}

type InFlight<'a> = Pin<Box<dyn Future<Output = RequestResult> + Send + 'a>>;

fn dispatch<A: RoomsApi>(rooms_api: &A, request: Request) -> InFlight<'_> {
    match request {
        Request::RandomRoom(query) => Box::pin(async move {
            RequestResult::RandomRoom(rooms_api.random_room(&query).await)
        }),
        Request::CreateRoom(request) => Box::pin(async move {
            let result = rooms_api.create_room(&request).await;

            RequestResult::CreateRoom {
                room: request.display_name,
                result,
            }
        }),
    }
}

// resolves with the in flight request, or never when there is none
async fn wait_for(in_flight: &mut Option<InFlight<'_>>) -> RequestResult {
    match in_flight.as_mut() {
        Some(request) => request.await,
        None => std::future::pending().await,
    }
}

pub struct StateStore {
    state_tx: UnboundedSender<State>,
    initial_state: State,
}

impl StateStore {
    pub fn new(initial_state: State) -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (
            StateStore {
                state_tx,
                initial_state,
            },
            state_rx,
        )
    }

    fn publish(&self, state: &State) -> anyhow::Result<()> {
        self.state_tx
            .send(state.clone())
            .context("the ui is no longer listening for state updates")
    }
}

impl StateStore {
    pub async fn main_loop<A: RoomsApi>(
        self,
        rooms_api: A,
        mut terminator: Terminator,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        let mut state = self.initial_state.clone();
        // at most one request is in flight, it is dropped on shutdown
        let mut in_flight: Option<InFlight<'_>> = None;

        // the initial state once
        self.publish(&state)?;

        let result = loop {
            tokio::select! {
                // Handle the actions coming from the UI,
                // a request they trigger is polled by the branch below
                Some(action) = action_rx.recv() => match action {
                    Action::Exit => {
                        let _ = terminator.terminate(Interrupted::UserInt);

                        break Interrupted::UserInt;
                    },
                    action => {
                        if let Some(request) = handle_action(&mut state, action) {
                            in_flight = Some(dispatch(&rooms_api, request));
                        }
                    },
                },
                // The server answered the request in flight
                result = wait_for(&mut in_flight) => {
                    in_flight = None;
                    process_request_result(&mut state, result);
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                }
            }

            self.publish(&state)?;
        };

        Ok(result)
    }
}

/// Applies an action to the state. Returns the request to send, if the action needs one.
fn handle_action(state: &mut State, action: Action) -> Option<Request> {
    // while a request is in flight the form is disabled, only the notice can be touched
    if state.is_loading() && !matches!(action, Action::DismissNotice) {
        tracing::debug!(?action, "ignoring action while a request is in flight");
        return None;
    }

    match action {
        Action::SetUsername { username } => state.set_username(username),
        Action::SelectUserType { user_type } => state.select_user_type(user_type),
        Action::SelectTransportType { transport_type } => {
            state.select_transport_type(transport_type)
        }
        Action::StartRoomCreation => state.start_room_creation(),
        Action::CancelRoomCreation => state.cancel_room_creation(),
        Action::SetRoomDisplayName { name } => state.set_room_display_name(name),
        Action::DismissNotice => state.dismiss_notice(),
        Action::LeaveRoom => {
            if let Some(joined_room) = state.joined_room.as_ref() {
                tracing::info!(room = %joined_room.room, "leaving room");
            }
            state.leave_room();
        }
        Action::JoinRandomRoom => match state.random_room_query() {
            Ok(query) => {
                state.mark_request_start(PendingRequest::RandomRoom);
                return Some(Request::RandomRoom(query));
            }
            Err(err) => state.show_form_error(err),
        },
        Action::CreateRoom => match state.create_room_request() {
            Ok(request) => {
                state.mark_request_start(PendingRequest::CreateRoom);
                return Some(Request::CreateRoom(request));
            }
            Err(err) => state.show_form_error(err),
        },
        Action::Exit => (),
    }

    None
}

fn process_request_result(state: &mut State, result: RequestResult) {
    match result {
        RequestResult::RandomRoom(result) => {
            match &result {
                Ok(outcome) => tracing::info!(?outcome, "random room lookup finished"),
                Err(err) => tracing::error!(error = ?err, "error joining random room"),
            }

            state.process_random_room_result(result);
        }
        RequestResult::CreateRoom { room, result } => {
            match &result {
                Ok(outcome) => tracing::info!(%room, ?outcome, "room creation finished"),
                Err(err) => tracing::error!(error = ?err, "error creating room"),
            }

            state.process_create_room_result(&room, result);
        }
    }
}
