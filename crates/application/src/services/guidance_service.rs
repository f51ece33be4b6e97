//! Guidance service - sequences the pipeline stages into a run
//!
//! A run moves through
//! `Idle → AcquiringLocation → ResolvingAddress → RequestingRecommendation
//! → ResolvingPlace → ComputingRoute → Done`. Only the recommendation stage
//! can end a run early (`Errored`). Starting a new run cancels the previous
//! one, whose result is then discarded (`Superseded`).

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::entities::GuidanceResult;
use domain::value_objects::GeoLocation;
use parking_lot::{Mutex, RwLock};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::pipeline_context::PipelineContext;
use crate::ports::RecommendationRequest;
use crate::services::address_resolver::AddressResolver;
use crate::services::location_source::LocationSource;
use crate::services::outcome::GuidanceFailure;
use crate::services::place_resolver::PlaceResolver;
use crate::services::route_computer::RouteComputer;
use crate::services::shelter_recommender::ShelterRecommender;

/// Where the latest run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// No run started yet
    Idle,
    /// Reading the device position
    AcquiringLocation,
    /// Turning coordinates into an address
    ResolvingAddress,
    /// Waiting for the backend's recommendation
    RequestingRecommendation,
    /// Looking up the recommended facility
    ResolvingPlace,
    /// Computing the walking route
    ComputingRoute,
    /// Finished with a result
    Done,
    /// Ended by a terminal failure
    Errored,
    /// Cancelled before finishing
    Superseded,
}

impl PipelineState {
    /// Whether a run in this state has finished
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Errored | Self::Superseded)
    }

    /// Stable name for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AcquiringLocation => "acquiring_location",
            Self::ResolvingAddress => "resolving_address",
            Self::RequestingRecommendation => "requesting_recommendation",
            Self::ResolvingPlace => "resolving_place",
            Self::ComputingRoute => "computing_route",
            Self::Done => "done",
            Self::Errored => "errored",
            Self::Superseded => "superseded",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a guidance run ended
#[derive(Debug, Clone, PartialEq)]
pub enum GuidanceOutcome {
    /// A result is available, possibly degraded
    Done(GuidanceResult),
    /// The recommendation could not be obtained
    Errored(GuidanceFailure),
    /// A newer run replaced this one; its result was discarded
    Superseded {
        /// Generation of the discarded run
        generation: u64,
    },
}

impl GuidanceOutcome {
    /// The result, if the run finished
    #[must_use]
    pub const fn result(&self) -> Option<&GuidanceResult> {
        match self {
            Self::Done(result) => Some(result),
            _ => None,
        }
    }

    /// Terminal state corresponding to this outcome
    #[must_use]
    pub const fn state(&self) -> PipelineState {
        match self {
            Self::Done(_) => PipelineState::Done,
            Self::Errored(_) => PipelineState::Errored,
            Self::Superseded { .. } => PipelineState::Superseded,
        }
    }
}

/// Runs the guidance pipeline
///
/// Stages run strictly one after another. Every collaborator call is raced
/// against the run's cancellation token, and staleness is checked between
/// stages.
pub struct GuidanceService {
    location: LocationSource,
    address: AddressResolver,
    recommender: ShelterRecommender,
    places: PlaceResolver,
    routes: RouteComputer,
    generation: AtomicU64,
    active: Mutex<Option<CancellationToken>>,
    state: RwLock<(u64, PipelineState)>,
    last_position: RwLock<Option<GeoLocation>>,
}

impl fmt::Debug for GuidanceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuidanceService")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("state", &self.current_state())
            .field("last_position", &self.last_known_position())
            .finish_non_exhaustive()
    }
}

impl GuidanceService {
    /// Create a new guidance service from its stages
    #[must_use]
    pub fn new(
        location: LocationSource,
        address: AddressResolver,
        recommender: ShelterRecommender,
        places: PlaceResolver,
        routes: RouteComputer,
    ) -> Self {
        Self {
            location,
            address,
            recommender,
            places,
            routes,
            generation: AtomicU64::new(0),
            active: Mutex::new(None),
            state: RwLock::new((0, PipelineState::Idle)),
            last_position: RwLock::new(None),
        }
    }

    /// State of the most recently started run
    #[must_use]
    pub fn current_state(&self) -> PipelineState {
        self.state.read().1
    }

    /// Last position read live from the sensor, if any
    #[must_use]
    pub fn last_known_position(&self) -> Option<GeoLocation> {
        *self.last_position.read()
    }

    /// Generation of the most recently started run
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a new run, cancelling the previous one
    pub fn begin_run(&self, token: SecretString) -> PipelineContext {
        let cancellation = CancellationToken::new();
        let mut active = self.active.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = active.replace(cancellation.clone()) {
            previous.cancel();
        }
        self.claim_state(generation);
        drop(active);

        let ctx = PipelineContext::new(generation, token, cancellation);
        debug!(run_id = %ctx.run_id(), generation, "Guidance run started");
        ctx
    }

    /// Cancel the active run, if any
    pub fn cancel_active(&self) {
        if let Some(active) = self.active.lock().take() {
            active.cancel();
        }
    }

    /// Begin a run and drive it to completion
    pub async fn start_evacuation(&self, token: SecretString) -> GuidanceOutcome {
        let ctx = self.begin_run(token);
        self.run(&ctx).await
    }

    /// Drive a run to completion
    #[instrument(skip(self, ctx), fields(run_id = %ctx.run_id(), generation = ctx.generation()))]
    pub async fn run(&self, ctx: &PipelineContext) -> GuidanceOutcome {
        let result = self.execute(ctx).await;

        let outcome = if self.is_stale(ctx) {
            info!("Guidance run superseded");
            GuidanceOutcome::Superseded {
                generation: ctx.generation(),
            }
        } else {
            match result {
                Ok(result) => {
                    info!(
                        facility = %result.place.name,
                        routed = result.route.is_some(),
                        degradations = result.degradations.len(),
                        "Guidance run finished"
                    );
                    GuidanceOutcome::Done(result)
                },
                Err(failure) => {
                    error!(failure = failure.tag(), %failure, "Guidance run errored");
                    GuidanceOutcome::Errored(failure)
                },
            }
        };

        self.set_state(ctx, outcome.state());
        outcome
    }

    async fn execute(&self, ctx: &PipelineContext) -> Result<GuidanceResult, GuidanceFailure> {
        let mut degradations = Vec::new();

        self.enter(ctx, PipelineState::AcquiringLocation)?;
        let (coordinates, degradation) = Self::guard(ctx, self.location.acquire())
            .await?
            .into_parts()?;
        let is_live = degradation.is_none();
        if is_live {
            *self.last_position.write() = Some(coordinates);
        }
        degradations.extend(degradation);

        self.enter(ctx, PipelineState::ResolvingAddress)?;
        let (address, degradation) = Self::guard(ctx, self.address.resolve(coordinates, is_live))
            .await?
            .into_parts()?;
        degradations.extend(degradation);

        self.enter(ctx, PipelineState::RequestingRecommendation)?;
        let request = RecommendationRequest::new(address, coordinates);
        let recommendation = self.recommender.recommend(&request, ctx.token());
        let (facility_name, _) = Self::guard(ctx, recommendation).await?.into_parts()?;

        self.enter(ctx, PipelineState::ResolvingPlace)?;
        let (place, degradation) = Self::guard(ctx, self.places.resolve_by_name(&facility_name))
            .await?
            .into_parts()?;
        degradations.extend(degradation);

        self.enter(ctx, PipelineState::ComputingRoute)?;
        let route_stage = self.routes.compute_walking_route(Some(coordinates), &place);
        let (route, degradation) = Self::guard(ctx, route_stage).await?.into_parts()?;
        degradations.extend(degradation);

        Ok(GuidanceResult::new(place, route).with_degradations(degradations))
    }

    /// Race a stage against cancellation
    async fn guard<T>(
        ctx: &PipelineContext,
        stage: impl Future<Output = T>,
    ) -> Result<T, GuidanceFailure> {
        tokio::select! {
            biased;
            () = ctx.cancellation_token().cancelled() => Err(GuidanceFailure::Cancelled),
            output = stage => Ok(output),
        }
    }

    fn enter(&self, ctx: &PipelineContext, state: PipelineState) -> Result<(), GuidanceFailure> {
        if self.is_stale(ctx) {
            return Err(GuidanceFailure::Cancelled);
        }
        debug!(state = state.as_str(), "Entering stage");
        self.set_state(ctx, state);
        Ok(())
    }

    fn is_stale(&self, ctx: &PipelineContext) -> bool {
        ctx.is_cancelled() || ctx.generation() != self.generation.load(Ordering::SeqCst)
    }

    /// Hand the state to `generation` as `Idle`; an older generation never
    /// takes it back
    fn claim_state(&self, generation: u64) {
        let mut current = self.state.write();
        if generation >= current.0 {
            *current = (generation, PipelineState::Idle);
        }
    }

    /// Record `state` unless a newer run owns the state
    fn set_state(&self, ctx: &PipelineContext, state: PipelineState) {
        let mut current = self.state.write();
        if current.0 == ctx.generation() {
            *current = (ctx.generation(), state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use domain::entities::{Degradation, ResolvedPlace, RouteInfo};
    use domain::value_objects::Address;

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{
        MockDirectionsPort, MockGeocodingPort, MockPlaceSearchPort, MockPositioningPort,
        MockRecommendationPort, PlaceCandidate, PositioningError, RecommendationFailure,
        RecommendationPort, RecommendationResponse,
    };

    fn token() -> SecretString {
        SecretString::from("id-token".to_string())
    }

    fn sports_center_location() -> GeoLocation {
        GeoLocation::new(35.7018, 139.7007).unwrap()
    }

    fn live_sensor(times: usize) -> MockPositioningPort {
        let mut sensor = MockPositioningPort::new();
        sensor
            .expect_current_position()
            .times(times)
            .returning(|| Ok(GeoLocation::shinjuku()));
        sensor
    }

    fn denied_sensor() -> MockPositioningPort {
        let mut sensor = MockPositioningPort::new();
        sensor
            .expect_current_position()
            .returning(|| Err(PositioningError::PermissionDenied));
        sensor
    }

    fn shinjuku_geocoder(times: usize) -> MockGeocodingPort {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_reverse_geocode()
            .times(times)
            .returning(|_| Ok(vec!["東京都新宿区西新宿1丁目".to_string()]));
        geocoder
    }

    fn recommends(name: &'static str, times: usize) -> MockRecommendationPort {
        let mut port = MockRecommendationPort::new();
        port.expect_recommend()
            .times(times)
            .returning(move |_, _| Ok(RecommendationResponse::new(name)));
        port
    }

    fn finds_sports_center(times: usize) -> MockPlaceSearchPort {
        let mut search = MockPlaceSearchPort::new();
        search.expect_find_place().times(times).returning(|_| {
            Ok(vec![PlaceCandidate::new(
                "Shinjuku Sports Center",
                Some("3-5-1 Okubo, Shinjuku City, Tokyo".to_string()),
                Some(sports_center_location()),
            )])
        });
        search
    }

    fn walks_820m(times: usize) -> MockDirectionsPort {
        let mut directions = MockDirectionsPort::new();
        directions
            .expect_walking_route()
            .times(times)
            .returning(|_, _| Ok(vec![RouteInfo::new("820m", "11 min")]));
        directions
    }

    fn never_searched() -> MockPlaceSearchPort {
        let mut search = MockPlaceSearchPort::new();
        search.expect_find_place().times(0);
        search
    }

    fn never_routed() -> MockDirectionsPort {
        let mut directions = MockDirectionsPort::new();
        directions.expect_walking_route().times(0);
        directions
    }

    fn service(
        sensor: Option<MockPositioningPort>,
        geocoder: MockGeocodingPort,
        recommendation: impl RecommendationPort + 'static,
        search: MockPlaceSearchPort,
        directions: MockDirectionsPort,
    ) -> GuidanceService {
        let location = match sensor {
            Some(sensor) => LocationSource::new(Arc::new(sensor)),
            None => LocationSource::without_sensor(),
        };
        GuidanceService::new(
            location,
            AddressResolver::new(Arc::new(geocoder)),
            ShelterRecommender::new(Arc::new(recommendation)),
            PlaceResolver::new(Arc::new(search)),
            RouteComputer::new(Arc::new(directions)),
        )
    }

    #[tokio::test]
    async fn shinjuku_full_success() {
        let mut recommendation = MockRecommendationPort::new();
        recommendation
            .expect_recommend()
            .withf(|request, _| {
                request.address.as_ref().map(Address::as_str) == Some("東京都新宿区西新宿1丁目")
                    && request.coordinates == Some(GeoLocation::shinjuku())
            })
            .times(1)
            .returning(|_, _| Ok(RecommendationResponse::new("Shinjuku Sports Center")));

        let service = service(
            Some(live_sensor(1)),
            shinjuku_geocoder(1),
            recommendation,
            finds_sports_center(1),
            walks_820m(1),
        );

        let outcome = service.start_evacuation(token()).await;

        let result = outcome.result().unwrap();
        assert_eq!(result.place.name, "Shinjuku Sports Center");
        assert!(result.place.has_known_address());
        assert_eq!(result.route, Some(RouteInfo::new("820m", "11 min")));
        assert!(!result.is_degraded());
        assert_eq!(service.current_state(), PipelineState::Done);
        assert_eq!(service.last_known_position(), Some(GeoLocation::shinjuku()));
    }

    #[tokio::test]
    async fn denied_location_and_unknown_place() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_reverse_geocode().times(0);

        let mut recommendation = MockRecommendationPort::new();
        recommendation
            .expect_recommend()
            .withf(|request, _| {
                request.address == Some(Address::shinjuku())
                    && request.coordinates == Some(GeoLocation::shinjuku())
            })
            .times(1)
            .returning(|_, _| Ok(RecommendationResponse::new("Toyama Park")));

        let mut search = MockPlaceSearchPort::new();
        search.expect_find_place().times(1).returning(|_| Ok(vec![]));

        let service = service(
            Some(denied_sensor()),
            geocoder,
            recommendation,
            search,
            never_routed(),
        );

        let outcome = service.start_evacuation(token()).await;

        let result = outcome.result().unwrap();
        assert_eq!(result.place, ResolvedPlace::name_only("Toyama Park"));
        assert_eq!(result.route, None);
        assert_eq!(
            result.degradations,
            vec![
                Degradation::SensorUnavailable,
                Degradation::PlaceNotFound,
                Degradation::RouteSkipped,
            ]
        );
        assert_eq!(service.last_known_position(), None);
    }

    #[tokio::test]
    async fn backend_500_errors_without_place_or_route_calls() {
        let mut recommendation = MockRecommendationPort::new();
        recommendation.expect_recommend().times(1).returning(|_, _| {
            Err(RecommendationFailure::Transport {
                status: Some(500),
                message: "Internal Server Error".to_string(),
            })
        });

        let service = service(
            Some(live_sensor(1)),
            shinjuku_geocoder(1),
            recommendation,
            never_searched(),
            never_routed(),
        );

        let outcome = service.start_evacuation(token()).await;

        assert!(matches!(
            outcome,
            GuidanceOutcome::Errored(GuidanceFailure::RecommendationTransportError {
                status: Some(500),
                ..
            })
        ));
        assert_eq!(service.current_state(), PipelineState::Errored);
    }

    #[tokio::test]
    async fn missing_facility_field_errors() {
        let mut recommendation = MockRecommendationPort::new();
        recommendation.expect_recommend().times(1).returning(|_, _| {
            Err(RecommendationFailure::Contract {
                field: "facility_name".to_string(),
                message: "Response is missing field 'facility_name'".to_string(),
            })
        });

        let service = service(
            Some(live_sensor(1)),
            shinjuku_geocoder(1),
            recommendation,
            never_searched(),
            never_routed(),
        );

        let outcome = service.start_evacuation(token()).await;

        let GuidanceOutcome::Errored(failure) = outcome else {
            panic!("expected errored run");
        };
        assert_eq!(failure.tag(), "recommendation_contract_error");
        assert_eq!(failure.user_message(), crate::RECOMMENDATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn route_failure_keeps_place() {
        let mut directions = MockDirectionsPort::new();
        directions
            .expect_walking_route()
            .times(1)
            .returning(|_, _| Err(ApplicationError::ExternalService("NOT_FOUND".to_string())));

        let service = service(
            Some(live_sensor(1)),
            shinjuku_geocoder(1),
            recommends("Shinjuku Sports Center", 1),
            finds_sports_center(1),
            directions,
        );

        let outcome = service.start_evacuation(token()).await;

        let result = outcome.result().unwrap();
        assert_eq!(result.route, None);
        assert_eq!(result.place.coordinates, Some(sports_center_location()));
        assert_eq!(result.degradations, vec![Degradation::RouteUnavailable]);
    }

    #[tokio::test]
    async fn identical_collaborators_give_identical_results() {
        let service = service(
            Some(live_sensor(2)),
            shinjuku_geocoder(2),
            recommends("Shinjuku Sports Center", 2),
            finds_sports_center(2),
            walks_820m(2),
        );

        let first = service.start_evacuation(token()).await;
        let second = service.start_evacuation(token()).await;

        assert!(first.result().is_some());
        assert_eq!(first, second);
        assert_eq!(service.current_generation(), 2);
    }

    #[tokio::test]
    async fn every_location_failure_still_sends_a_usable_request() {
        #[derive(Clone, Copy)]
        enum Sensor {
            Live,
            Denied,
            Absent,
        }
        #[derive(Clone, Copy)]
        enum Geocoder {
            Found,
            Empty,
            Failing,
        }

        for sensor in [Sensor::Live, Sensor::Denied, Sensor::Absent] {
            for geocoder_mode in [Geocoder::Found, Geocoder::Empty, Geocoder::Failing] {
                let sensor = match sensor {
                    Sensor::Live => Some(live_sensor(1)),
                    Sensor::Denied => Some(denied_sensor()),
                    Sensor::Absent => None,
                };

                let mut geocoder = MockGeocodingPort::new();
                geocoder
                    .expect_reverse_geocode()
                    .times(0..=1)
                    .returning(move |_| match geocoder_mode {
                        Geocoder::Found => Ok(vec!["西新宿".to_string()]),
                        Geocoder::Empty => Ok(vec![]),
                        Geocoder::Failing => Err(ApplicationError::RateLimited),
                    });

                let mut recommendation = MockRecommendationPort::new();
                recommendation
                    .expect_recommend()
                    .withf(|request, _| {
                        !request.is_empty()
                            && request
                                .address
                                .as_ref()
                                .is_some_and(|a| !a.as_str().trim().is_empty())
                            && request.coordinates.is_some()
                    })
                    .times(1)
                    .returning(|_, _| Ok(RecommendationResponse::new("Toyama Park")));

                let mut search = MockPlaceSearchPort::new();
                search.expect_find_place().returning(|_| Ok(vec![]));

                let service = service(sensor, geocoder, recommendation, search, never_routed());

                let outcome = service.start_evacuation(token()).await;
                assert!(outcome.result().is_some());
            }
        }
    }

    #[tokio::test]
    async fn stale_context_is_superseded_without_calls() {
        let mut sensor = MockPositioningPort::new();
        sensor.expect_current_position().times(0);
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_reverse_geocode().times(0);

        let service = service(
            Some(sensor),
            geocoder,
            recommends("unused", 0),
            never_searched(),
            never_routed(),
        );

        let first = service.begin_run(token());
        let second = service.begin_run(token());

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        let outcome = service.run(&first).await;
        assert_eq!(outcome, GuidanceOutcome::Superseded { generation: 1 });
        assert_eq!(service.current_state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn late_claim_from_older_run_keeps_newer_state() {
        let service = service(
            Some(live_sensor(1)),
            shinjuku_geocoder(1),
            recommends("Shinjuku Sports Center", 1),
            finds_sports_center(1),
            walks_820m(1),
        );

        let first = service.begin_run(token());
        let second = service.begin_run(token());
        // The older run's state write lands after the newer one.
        service.claim_state(first.generation());

        let outcome = service.run(&second).await;
        assert!(matches!(outcome, GuidanceOutcome::Done(_)));
        assert_eq!(service.current_state(), PipelineState::Done);
    }

    #[test]
    fn concurrent_begin_runs_leave_state_on_newest_generation() {
        let service = service(
            None,
            MockGeocodingPort::new(),
            recommends("unused", 0),
            never_searched(),
            never_routed(),
        );

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        let _ = service.begin_run(token());
                    }
                });
            }
        });

        assert_eq!(service.current_generation(), 400);
        assert_eq!(*service.state.read(), (400, PipelineState::Idle));
    }

    #[tokio::test]
    async fn cancel_active_supersedes_run() {
        let service = service(
            None,
            MockGeocodingPort::new(),
            recommends("unused", 0),
            never_searched(),
            never_routed(),
        );

        let ctx = service.begin_run(token());
        service.cancel_active();

        let outcome = service.run(&ctx).await;
        assert_eq!(outcome, GuidanceOutcome::Superseded { generation: 1 });
        assert_eq!(service.current_state(), PipelineState::Superseded);
    }

    /// Never answers the first request; answers every later one
    struct FirstCallStalls {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecommendationPort for FirstCallStalls {
        async fn recommend(
            &self,
            _request: &RecommendationRequest,
            _token: &SecretString,
        ) -> Result<RecommendationResponse, RecommendationFailure> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::future::pending::<()>().await;
            }
            Ok(RecommendationResponse::new("Shinjuku Sports Center"))
        }
    }

    #[tokio::test]
    async fn newer_run_supersedes_in_flight_run() {
        let service = Arc::new(service(
            Some(live_sensor(2)),
            shinjuku_geocoder(2),
            FirstCallStalls {
                calls: AtomicUsize::new(0),
            },
            finds_sports_center(1),
            walks_820m(1),
        ));

        let first = service.begin_run(token());
        let in_flight = Arc::clone(&service);
        let handle = tokio::spawn(async move { in_flight.run(&first).await });

        while service.current_state() != PipelineState::RequestingRecommendation {
            tokio::task::yield_now().await;
        }

        let second = service.start_evacuation(token()).await;
        let first_outcome = handle.await.unwrap();

        assert_eq!(first_outcome, GuidanceOutcome::Superseded { generation: 1 });
        assert!(matches!(second, GuidanceOutcome::Done(_)));
        assert_eq!(service.current_state(), PipelineState::Done);
        assert_eq!(service.current_generation(), 2);
    }

    #[test]
    fn pipeline_state_names() {
        assert_eq!(PipelineState::RequestingRecommendation.to_string(), "requesting_recommendation");
        assert!(PipelineState::Superseded.is_terminal());
        assert!(!PipelineState::ComputingRoute.is_terminal());
    }
}
