use std::{collections::HashMap, net::SocketAddr};

use comms::{
    request::{CreateRoomRequest, RandomRoomQuery},
    response::{CreateRoomOutcome, RandomRoomOutcome},
    room::{TransportType, UserType},
    transport::client::{RoomsApi, RoomsClient},
};
use warp::{http::StatusCode, Filter, Reply};

// starts a stand-in backend on a random local port and returns its address
fn spawn_backend() -> SocketAddr {
    let random_room = warp::path!("rooms" / "random")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|query: HashMap<String, String>| {
            let transport_type = query.get("transport_type").map(String::as_str);
            let user_type = query.get("user_type").map(String::as_str);

            match (transport_type, user_type) {
                // only one bus room is open, and only passengers are matched into it
                (Some("bus"), Some("passenger")) => {
                    warp::reply::json(&serde_json::json!({ "room": "kmitl-bus-1", "capacity": 15 }))
                }
                // the backend forgot the capacity for bikes
                (Some("bike"), Some("passenger")) => {
                    warp::reply::json(&serde_json::json!({ "room": "bike-7" }))
                }
                _ => warp::reply::json(&serde_json::json!({ "room": null })),
            }
        });

    let create_room = warp::path!("rooms")
        .and(warp::post())
        .and(warp::body::json())
        .map(|request: CreateRoomRequest| match request.room_name.as_str() {
            "taken" => warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "detail": "Room already exists" })),
                StatusCode::BAD_REQUEST,
            )
            .into_response(),
            "teapot" => warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": "no detail here" })),
                StatusCode::IM_A_TEAPOT,
            )
            .into_response(),
            // a proxy error page instead of a json body
            "broken" => warp::reply::with_status("<html>boom</html>", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            _ => warp::reply::json(&serde_json::json!({ "capacity": request.capacity }))
                .into_response(),
        });

    let (addr, server) =
        warp::serve(random_room.or(create_room)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    addr
}

fn client_for(addr: SocketAddr) -> RoomsClient {
    RoomsClient::new(&format!("http://{}/", addr))
}

#[tokio::test]
async fn assert_random_room_found() {
    let client = client_for(spawn_backend());

    let outcome = client
        .random_room(&RandomRoomQuery {
            transport_type: TransportType::Bus,
            user_type: UserType::Passenger,
        })
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RandomRoomOutcome::Found {
            room: "kmitl-bus-1".into(),
            capacity: 15,
        }
    );
}

#[tokio::test]
async fn assert_random_room_without_capacity_uses_table() {
    let client = client_for(spawn_backend());

    let outcome = client
        .random_room(&RandomRoomQuery {
            transport_type: TransportType::Bike,
            user_type: UserType::Passenger,
        })
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RandomRoomOutcome::Found {
            room: "bike-7".into(),
            capacity: 2,
        }
    );
}

#[tokio::test]
async fn assert_random_room_none_available() {
    let client = client_for(spawn_backend());

    let outcome = client
        .random_room(&RandomRoomQuery {
            transport_type: TransportType::Car,
            user_type: UserType::Passenger,
        })
        .await
        .unwrap();

    assert_eq!(outcome, RandomRoomOutcome::NoneAvailable);
}

#[tokio::test]
async fn assert_create_room_outcomes() {
    let client = client_for(spawn_backend());

    let created = client
        .create_room(&CreateRoomRequest::new(
            "Morning Car",
            TransportType::Car,
            UserType::Driver,
        ))
        .await
        .unwrap();
    assert_eq!(created, CreateRoomOutcome::Created { capacity: 4 });

    let rejected = client
        .create_room(&CreateRoomRequest::new(
            "taken",
            TransportType::Car,
            UserType::Driver,
        ))
        .await
        .unwrap();
    assert_eq!(
        rejected,
        CreateRoomOutcome::Rejected {
            detail: "Room already exists".into(),
        }
    );

    let rejected_without_detail = client
        .create_room(&CreateRoomRequest::new(
            "teapot",
            TransportType::Car,
            UserType::Driver,
        ))
        .await
        .unwrap();
    assert_eq!(
        rejected_without_detail,
        CreateRoomOutcome::Rejected {
            detail: "I'm a teapot".into(),
        }
    );
}

#[tokio::test]
async fn assert_unreadable_rejection_is_an_error() {
    let client = client_for(spawn_backend());

    let result = client
        .create_room(&CreateRoomRequest::new(
            "broken",
            TransportType::Bus,
            UserType::Driver,
        ))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn assert_unreachable_server_is_an_error() {
    // grab a free port and release it so nothing is listening there
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client_for(addr);

    let result = client
        .random_room(&RandomRoomQuery {
            transport_type: TransportType::Bus,
            user_type: UserType::Passenger,
        })
        .await;
    assert!(result.is_err());

    let result = client
        .create_room(&CreateRoomRequest::new(
            "Evening Bus",
            TransportType::Bus,
            UserType::Driver,
        ))
        .await;
    assert!(result.is_err());
}
