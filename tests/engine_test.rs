use chrono::{DateTime, Duration, TimeZone, Utc};
use encomienda_tracking::clients::{ParcelStoreClient, PointClient};
use encomienda_tracking::framework::mock::MockClient;
use encomienda_tracking::framework::FrameworkError;
use encomienda_tracking::model::{
    Contact, Operator, OperatorId, Parcel, ParcelId, ParcelRecord, ParcelRegistration,
    ParcelState, Point, PointCreate, PointId, PointKind, RetrievalProof, TrackingCode,
    TransitionEvent,
};
use encomienda_tracking::parcel_actor::ParcelError;
use encomienda_tracking::tracking::{
    AdvanceRequest, CasOutcome, Clock, LifecycleEngine, LookupResolver, ParcelStore,
    TrackingError,
};
use encomienda_tracking::{parcel_actor, point_actor};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Clock that only moves when told to.
struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn at(start: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(start)))
    }

    fn set(&self, at: DateTime<Utc>) {
        *self.0.lock().unwrap() = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

fn registered_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
}

struct Stores {
    parcels: Arc<ParcelStoreClient>,
    points: Arc<PointClient>,
    lima: PointId,
    tarapoto: PointId,
}

/// Pattern 1: real actors, no mocks.
async fn stores() -> Stores {
    let (parcel_actor, parcel_client) = parcel_actor::new(32);
    tokio::spawn(parcel_actor.run(()));
    let (point_actor, point_client) = point_actor::new(32);
    tokio::spawn(point_actor.run(()));

    let points = Arc::new(PointClient::new(point_client));
    let lima = points
        .add_point(PointCreate {
            name: "Lima".into(),
            city: "Lima".into(),
            kind: PointKind::Terminal,
        })
        .await
        .unwrap();
    let tarapoto = points
        .add_point(PointCreate {
            name: "Tarapoto".into(),
            city: "Tarapoto".into(),
            kind: PointKind::Agency,
        })
        .await
        .unwrap();

    Stores {
        parcels: Arc::new(ParcelStoreClient::new(parcel_client)),
        points,
        lima,
        tarapoto,
    }
}

impl Stores {
    fn engine(&self) -> LifecycleEngine<ParcelStoreClient, PointClient> {
        LifecycleEngine::new(self.parcels.clone(), self.points.clone())
    }

    async fn register_to(&self, code: &str, destination: PointId) -> ParcelId {
        self.parcels
            .register(ParcelRegistration {
                tracking_code: code.into(),
                origin: self.lima,
                destination,
                description: "Encomienda".into(),
                weight_kg: 2.0,
                sender: Contact::new("Rosa Quispe", "987654321"),
                recipient: Contact::new("Luis Pinedo", "912345678"),
                registered_at: registered_at(),
            })
            .await
            .unwrap()
    }

    async fn register(&self, code: &str) -> ParcelId {
        self.register_to(code, self.tarapoto).await
    }

    async fn walk_to_arrival(&self, id: ParcelId) {
        let admin = Operator::administrative("admin");
        let engine = self.engine();
        for _ in 0..3 {
            engine.advance(id, &admin, AdvanceRequest::new()).await.unwrap();
        }
    }

    async fn record(&self, id: ParcelId) -> ParcelRecord {
        self.parcels.record(id).await.unwrap().unwrap()
    }
}

fn proof() -> AdvanceRequest {
    AdvanceRequest::new().with_proof(RetrievalProof::new("DNI 44556677"))
}

#[tokio::test]
async fn test_full_lifecycle_then_terminal_rejection() {
    let s = stores().await;
    let id = s.register("ENC-1").await;
    let at_tarapoto = Operator::at_point("op-tarapoto", s.tarapoto);
    let engine = s.engine();

    s.walk_to_arrival(id).await;
    engine.advance(id, &at_tarapoto, proof()).await.unwrap();

    for _ in 0..2 {
        let err = engine.advance(id, &at_tarapoto, proof()).await.unwrap_err();
        assert_eq!(
            err,
            TrackingError::NoFurtherTransition {
                tracking_code: s.record(id).await.parcel.tracking_code,
                state: ParcelState::Retrieved,
            }
        );
        assert!(!err.is_retryable());
    }

    let record = s.record(id).await;
    let path: Vec<(ParcelState, ParcelState)> =
        record.events.iter().map(|event| (event.from, event.to)).collect();
    assert_eq!(
        path,
        vec![
            (ParcelState::Registered, ParcelState::InWarehouse),
            (ParcelState::InWarehouse, ParcelState::InTransit),
            (ParcelState::InTransit, ParcelState::ArrivedAtDestination),
            (ParcelState::ArrivedAtDestination, ParcelState::Retrieved),
        ]
    );
}

#[tokio::test]
async fn test_handover_authorization_matrix() {
    let s = stores().await;
    let engine = s.engine();

    let foreign = s.register("ENC-FOREIGN").await;
    s.walk_to_arrival(foreign).await;
    let err = engine
        .advance(foreign, &Operator::at_point("op-lima", s.lima), proof())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TrackingError::NotAuthorizedForDestination { ref destination_name, .. }
            if destination_name == "Tarapoto"
    ));
    assert_eq!(s.record(foreign).await.events.len(), 3);

    let local = s.register("ENC-LOCAL").await;
    s.walk_to_arrival(local).await;
    let outcome = engine
        .advance(local, &Operator::at_point("op-tarapoto", s.tarapoto), proof())
        .await
        .unwrap();
    assert_eq!(outcome.parcel.state, ParcelState::Retrieved);
    assert_eq!(outcome.event.point, Some(s.tarapoto));

    let admin = s.register("ENC-ADMIN").await;
    s.walk_to_arrival(admin).await;
    let outcome = engine
        .advance(admin, &Operator::administrative("admin"), proof())
        .await
        .unwrap();
    assert_eq!(outcome.parcel.state, ParcelState::Retrieved);
    assert_eq!(outcome.event.point, None);
}

#[tokio::test]
async fn test_earlier_steps_need_no_authorization() {
    let s = stores().await;
    let id = s.register("ENC-1").await;
    let engine = s.engine();

    // Anyone may move a parcel up to its arrival, wherever they stand.
    let at_tarapoto = Operator::at_point("op-tarapoto", s.tarapoto);
    let at_lima = Operator::at_point("op-lima", s.lima);
    engine.advance(id, &at_tarapoto, AdvanceRequest::new()).await.unwrap();
    engine.advance(id, &at_lima, AdvanceRequest::new()).await.unwrap();
    let outcome = engine.advance(id, &at_lima, AdvanceRequest::new()).await.unwrap();
    assert_eq!(outcome.parcel.state, ParcelState::ArrivedAtDestination);
}

#[tokio::test]
async fn test_retrieval_requires_non_blank_proof() {
    let s = stores().await;
    let id = s.register("ENC-1").await;
    s.walk_to_arrival(id).await;
    let at_tarapoto = Operator::at_point("op-tarapoto", s.tarapoto);
    let engine = s.engine();

    let missing = engine
        .advance(id, &at_tarapoto, AdvanceRequest::new())
        .await
        .unwrap_err();
    assert_eq!(missing, TrackingError::MissingRetrievalProof);
    assert!(missing.is_retryable());

    let blank = engine
        .advance(
            id,
            &at_tarapoto,
            AdvanceRequest::new().with_proof(RetrievalProof::new("   ")),
        )
        .await
        .unwrap_err();
    assert_eq!(blank, TrackingError::MissingRetrievalProof);
    assert_eq!(s.record(id).await.parcel.state, ParcelState::ArrivedAtDestination);

    let outcome = engine.advance(id, &at_tarapoto, proof()).await.unwrap();
    assert_eq!(
        outcome.event.retrieval_proof,
        Some(RetrievalProof::new("DNI 44556677"))
    );
}

#[tokio::test]
async fn test_wrong_point_is_reported_before_missing_proof() {
    let s = stores().await;
    let id = s.register("ENC-1").await;
    s.walk_to_arrival(id).await;

    let err = s
        .engine()
        .advance(id, &Operator::at_point("op-lima", s.lima), AdvanceRequest::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackingError::NotAuthorizedForDestination { .. }));
}

#[tokio::test]
async fn test_unknown_destination_named_by_id() {
    let s = stores().await;
    let id = s.register_to("ENC-1", PointId(99)).await;
    s.walk_to_arrival(id).await;

    let err = s
        .engine()
        .advance(id, &Operator::at_point("op-lima", s.lima), proof())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TrackingError::NotAuthorizedForDestination {
            destination: PointId(99),
            destination_name: "point_99".into(),
        }
    );
}

#[tokio::test]
async fn test_proof_ignored_and_blank_note_dropped_before_handover() {
    let s = stores().await;
    let id = s.register("ENC-1").await;
    let at_lima = Operator::at_point("op-lima", s.lima);

    let outcome = s
        .engine()
        .advance(
            id,
            &at_lima,
            AdvanceRequest::new()
                .with_note("   ")
                .with_proof(RetrievalProof::new("DNI 1")),
        )
        .await
        .unwrap();
    assert_eq!(outcome.event.note, None);
    assert_eq!(outcome.event.retrieval_proof, None);
    assert_eq!(outcome.event.operator, OperatorId("op-lima".into()));
}

#[tokio::test]
async fn test_unknown_parcel_is_not_found() {
    let s = stores().await;
    let err = s
        .engine()
        .advance(ParcelId(404), &Operator::administrative("admin"), AdvanceRequest::new())
        .await
        .unwrap_err();
    assert_eq!(err, TrackingError::NotFound);
}

#[tokio::test]
async fn test_event_times_follow_state_order_under_clock_skew() {
    let s = stores().await;
    let id = s.register("ENC-1").await;
    let clock = ManualClock::at(registered_at() + Duration::hours(3));
    let engine = s.engine().with_clock(clock.clone());
    let admin = Operator::administrative("admin");

    let first = engine.advance(id, &admin, AdvanceRequest::new()).await.unwrap();
    assert_eq!(first.event.at, registered_at() + Duration::hours(3));

    // A station whose clock runs an hour behind.
    clock.set(registered_at() + Duration::hours(2));
    let second = engine.advance(id, &admin, AdvanceRequest::new()).await.unwrap();
    assert!(second.event.at > first.event.at);

    let record = s.record(id).await;
    assert_eq!(record.events[1].at, second.event.at);
}

/// N operators scan the same parcel at once: the trail never forks.
#[tokio::test]
async fn test_concurrent_advances_never_fork_the_trail() {
    let s = stores().await;
    let id = s.register("ENC-RACE").await;
    let engine = s.engine();

    let mut handles = Vec::new();
    for i in 0..16 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            let operator = Operator::administrative(format!("admin-{i}"));
            engine.advance(id, &operator, proof()).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(TrackingError::ConcurrentModification { .. })
            | Err(TrackingError::NoFurtherTransition { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let record = s.record(id).await;
    assert_eq!(record.events.len(), successes);
    let sources: HashSet<ParcelState> = record.events.iter().map(|event| event.from).collect();
    assert_eq!(sources.len(), record.events.len(), "two events share a source state");
    for (i, event) in record.events.iter().enumerate() {
        assert_eq!(event.from, ParcelState::SEQUENCE[i]);
    }
    assert_eq!(record.parcel.state, ParcelState::SEQUENCE[successes]);
}

/// Same expected state from every task: exactly one wins.
#[tokio::test]
async fn test_compare_and_append_has_exactly_one_winner() {
    let s = stores().await;
    let id = s.register("ENC-RACE").await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let parcels = s.parcels.clone();
        handles.push(tokio::spawn(async move {
            let event = TransitionEvent {
                parcel_id: id,
                from: ParcelState::Registered,
                to: ParcelState::InWarehouse,
                at: Utc::now(),
                operator: OperatorId(format!("op-{i}")),
                point: None,
                note: None,
                retrieval_proof: None,
            };
            parcels
                .compare_and_append(id, ParcelState::Registered, event)
                .await
                .unwrap()
        }));
    }

    let mut applied = 0;
    for handle in handles {
        match handle.await.unwrap() {
            CasOutcome::Applied { .. } => applied += 1,
            CasOutcome::Conflict { actual } => assert_eq!(actual, ParcelState::InWarehouse),
        }
    }
    assert_eq!(applied, 1);
    assert_eq!(s.record(id).await.events.len(), 1);
}

/// Pattern 3: mocked store to inject the failure a healthy actor never produces.
#[tokio::test]
async fn test_unreachable_store_is_transport_failure() {
    let mut parcels = MockClient::<ParcelRecord>::new();
    parcels
        .expect_get(ParcelId(1))
        .return_err(FrameworkError::ActorClosed);
    let points = MockClient::<Point>::new();

    let engine = LifecycleEngine::new(
        Arc::new(ParcelStoreClient::new(parcels.client())),
        Arc::new(PointClient::new(points.client())),
    );
    let err = engine
        .advance(ParcelId(1), &Operator::administrative("admin"), AdvanceRequest::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TrackingError::TransportFailure(_)));
    assert!(err.is_retryable());
    parcels.verify();
    points.verify();
}

fn mocked_record(state: ParcelState) -> ParcelRecord {
    ParcelRecord {
        parcel: Parcel {
            id: ParcelId(1),
            tracking_code: TrackingCode::normalize("ENC-1").unwrap(),
            origin: PointId(1),
            destination: PointId(2),
            state,
            description: "Caja de libros".into(),
            weight_kg: 4.5,
            sender: Contact::new("Rosa Quispe", "987654321"),
            recipient: Contact::new("Luis Pinedo", "912345678"),
            registered_at: registered_at(),
        },
        events: Vec::new(),
    }
}

/// Pattern 3: an unreachable store is an outage, never an unknown code.
#[tokio::test]
async fn test_lookup_outage_is_not_reported_as_unknown_code() {
    let mut parcels = MockClient::<ParcelRecord>::new();
    parcels
        .expect_lookup(TrackingCode::normalize("ENC-1").unwrap())
        .return_err(FrameworkError::ActorClosed);

    let resolver = LookupResolver::new(Arc::new(ParcelStoreClient::new(parcels.client())));
    let err = resolver.resolve(" enc-1 ").await.unwrap_err();

    assert!(matches!(err, TrackingError::TransportFailure(_)));
    assert!(err.is_retryable());
    parcels.verify();
}

/// Pattern 3: a store that answers with a refusal is not worth retrying.
#[tokio::test]
async fn test_store_refusal_is_final() {
    let mut parcels = MockClient::<ParcelRecord>::new();
    parcels
        .expect_get(ParcelId(1))
        .return_ok(Some(mocked_record(ParcelState::Registered)));
    parcels
        .expect_action(ParcelId(1))
        .return_err(FrameworkError::EntityError(Box::new(
            ParcelError::IllegalTransition {
                from: ParcelState::Registered,
                to: ParcelState::InTransit,
            },
        )));
    let points = MockClient::<Point>::new();

    let engine = LifecycleEngine::new(
        Arc::new(ParcelStoreClient::new(parcels.client())),
        Arc::new(PointClient::new(points.client())),
    );
    let err = engine
        .advance(ParcelId(1), &Operator::administrative("admin"), AdvanceRequest::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TrackingError::StoreRejected(_)));
    assert!(!err.is_retryable());
    parcels.verify();
    points.verify();
}
