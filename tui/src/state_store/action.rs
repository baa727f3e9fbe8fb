use comms::room::{TransportType, UserType};

#[derive(Debug, Clone)]
pub enum Action {
    SetUsername { username: String },
    SelectUserType { user_type: UserType },
    SelectTransportType { transport_type: TransportType },
    StartRoomCreation,
    CancelRoomCreation,
    SetRoomDisplayName { name: String },
    JoinRandomRoom,
    CreateRoom,
    DismissNotice,
    LeaveRoom,
    Exit,
}
