//! Request handler definitions
//!
//! Every league route and its handler lives here. Keep the handlers thin: parse the request, call the engine API and
//! shape the response. Business rules belong in `pcl_engine`.
//!
//! Handlers run on actix worker threads, and each worker serves its requests one after the other. Never block in a
//! handler. Database and vendor calls are async, so awaiting them lets the worker pick up other requests meanwhile:
//!
//! ```nocompile
//!     async fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Stalls every request queued on this worker
//!         tokio::time::sleep(Duration::from_secs(5)).await; // <-- Fine
//!     }
//! ```
//!
//! Unless noted otherwise, routes are mounted under the `/api` scope, which requires a valid access token.
use actix_web::{get, http::StatusCode, post, web, HttpResponse, Responder};
use chrono::Utc;
use log::*;
use pcl_engine::{
    db_types::{
        NewClub,
        NewContract,
        NewMatch,
        NewStadium,
        NewTeam,
        NewTournament,
        PlayerProfile,
        RefereeProfile,
        StaffProfile,
        UserId,
        UserProfile,
        UserRole,
    },
    helpers::{calculate_payment_breakdown, verify_payment_signature},
    pcl_api::payment_objects::{NewOrderRequest, WebhookEvent},
    traits::{
        AccountApiError,
        AccountManagement,
        ContractManagement,
        IdentityVerifier,
        KycManagement,
        LeagueManagement,
        MatchManagement,
        NotificationApiError,
        NotificationManagement,
        ObjectStore,
        PaymentGatewayDatabase,
        PaymentGatewayError,
        PaymentProvider,
        PushSender,
    },
    AccountApi,
    ContractApi,
    KycApi,
    LeagueApi,
    MatchApi,
    NotificationApi,
    PaymentFlowApi,
};
use serde_json::{json, Value};

use crate::{
    auth::JwtClaims,
    config::{RazorpayConfig, ServerOptions},
    data_objects::{
        AadhaarOtpRequest,
        BankAccountRequest,
        BreakdownRequest,
        CancelMatchRequest,
        ClubReviewRequest,
        ContactRequest,
        DocumentsUploadRequest,
        JsonResponse,
        OtpVerificationRequest,
        PaymentStatusQuery,
        PushNotificationRequest,
        PushTokenRequest,
        SignContractRequest,
        SquadRequest,
        TerminateContractRequest,
        UserStatusRequest,
        VerifyPaymentRequest,
    },
    errors::{AuthError, ServerError},
    helpers::decode_documents,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal requires [$($roles:ty),*]) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
                impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name)
                        .wrap($crate::middleware::AclMiddlewareFactory::new(&[$($roles),+]));
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires [$($roles:ty),*])  => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds)++ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::AclMiddlewareFactory::new(&[$($roles),+]));
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

/// Backends that can serve the match routes.
pub trait MatchBackend: MatchManagement + LeagueManagement {}
impl<T: MatchManagement + LeagueManagement> MatchBackend for T {}

/// Backends that can serve the contract routes.
pub trait ContractBackend: ContractManagement + LeagueManagement {}
impl<T: ContractManagement + LeagueManagement> ContractBackend for T {}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Accounts  ----------------------------------------------------
route!(current_user => Get "/user" impl AccountManagement);
/// The caller's user record. Callers that have not completed sign-up get a 401.
pub async fn current_user<B: AccountManagement>(
    claims: JwtClaims,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET user for {}", claims.sub);
    let user = api.user(&claims.sub).await?.ok_or_else(|| {
        debug!("💻️ No user record for {}", claims.sub);
        ServerError::AuthenticationError(AuthError::Unauthorized)
    })?;
    Ok(HttpResponse::Ok().json(user))
}

route!(dashboard => Get "/dashboard" impl AccountManagement);
pub async fn dashboard<B: AccountManagement>(
    claims: JwtClaims,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET dashboard for {}", claims.sub);
    let route = api.dashboard(&claims.sub, claims.role).await?;
    Ok(HttpResponse::Ok().json(route))
}

route!(update_profile => Post "/profile" impl AccountManagement);
/// Creates or updates the caller's user record. The role is always the one in the access token.
pub async fn update_profile<B: AccountManagement>(
    claims: JwtClaims,
    body: web::Json<UserProfile>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST profile for {}", claims.sub);
    let user = api.update_profile(&claims.sub, claims.role, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

//----------------------------------------------   Clubs  ----------------------------------------------------
route!(create_club => Post "/clubs" impl LeagueManagement where requires [UserRole::ClubOwner]);
pub async fn create_club<B: LeagueManagement>(
    claims: JwtClaims,
    body: web::Json<NewClub>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST create club for {}", claims.sub);
    let club = api.create_club(&claims.sub, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(club))
}

route!(clubs => Get "/clubs" impl LeagueManagement);
pub async fn clubs<B: LeagueManagement>(api: web::Data<LeagueApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET clubs");
    let clubs = api.clubs().await?;
    Ok(HttpResponse::Ok().json(clubs))
}

route!(club => Get "/clubs/{id}" impl LeagueManagement);
pub async fn club<B: LeagueManagement>(
    path: web::Path<i64>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let club_id = path.into_inner();
    trace!("💻️ GET club {club_id}");
    let club = api.club(club_id).await?;
    Ok(HttpResponse::Ok().json(club))
}

route!(update_club => Put "/clubs/{id}" impl LeagueManagement where requires [UserRole::ClubOwner]);
pub async fn update_club<B: LeagueManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<NewClub>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let club_id = path.into_inner();
    debug!("💻️ PUT club {club_id} by {}", claims.sub);
    let club = api.update_club(&claims.sub, club_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(club))
}

//----------------------------------------------   Admin  ----------------------------------------------------
route!(clubs_for_review => Get "/admin/clubs/pending" impl LeagueManagement where requires [UserRole::Admin]);
pub async fn clubs_for_review<B: LeagueManagement>(
    claims: JwtClaims,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET clubs awaiting review for {}", claims.sub);
    let clubs = api.clubs_for_review().await?;
    Ok(HttpResponse::Ok().json(clubs))
}

route!(review_club => Post "/admin/clubs/{id}/review" impl LeagueManagement where requires [UserRole::Admin]);
/// Approves or rejects a club's registration documents.
pub async fn review_club<B: LeagueManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<ClubReviewRequest>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let club_id = path.into_inner();
    debug!("💻️ POST review of club {club_id} by {}", claims.sub);
    let club = api.review_club(club_id, body.approved).await?;
    Ok(HttpResponse::Ok().json(club))
}

route!(set_user_status => Post "/admin/users/{id}/status" impl AccountManagement where requires [UserRole::Admin]);
pub async fn set_user_status<B: AccountManagement>(
    claims: JwtClaims,
    path: web::Path<String>,
    body: web::Json<UserStatusRequest>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = UserId::from(path.into_inner());
    debug!("💻️ POST status of user {user_id} by {}", claims.sub);
    let user = api.set_user_active(&user_id, body.is_active).await.map_err(|e| match e {
        AccountApiError::UserNotFound(id) => ServerError::NoRecordFound(format!("User {id} does not exist")),
        e => e.into(),
    })?;
    Ok(HttpResponse::Ok().json(user))
}

//----------------------------------------------   Teams  ----------------------------------------------------
route!(create_team => Post "/clubs/{id}/teams" impl LeagueManagement where requires [UserRole::ClubOwner]);
pub async fn create_team<B: LeagueManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<NewTeam>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let club_id = path.into_inner();
    debug!("💻️ POST team for club {club_id} by {}", claims.sub);
    let team = api.create_team(&claims.sub, club_id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(team))
}

route!(teams_for_club => Get "/clubs/{id}/teams" impl LeagueManagement);
pub async fn teams_for_club<B: LeagueManagement>(
    path: web::Path<i64>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let club_id = path.into_inner();
    trace!("💻️ GET teams for club {club_id}");
    let teams = api.teams_for_club(club_id).await?;
    Ok(HttpResponse::Ok().json(teams))
}

route!(add_to_squad => Post "/teams/{id}/squad" impl LeagueManagement where requires [UserRole::ClubOwner]);
pub async fn add_to_squad<B: LeagueManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<SquadRequest>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let team_id = path.into_inner();
    let player_id = body.player_id;
    debug!("💻️ POST player {player_id} to squad of team {team_id} by {}", claims.sub);
    api.add_to_squad(&claims.sub, team_id, player_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Player {player_id} added to the squad"))))
}

//----------------------------------------------   Profiles  ----------------------------------------------------
route!(upsert_player => Post "/players" impl LeagueManagement where requires [UserRole::Player]);
pub async fn upsert_player<B: LeagueManagement>(
    claims: JwtClaims,
    body: web::Json<PlayerProfile>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST player profile for {}", claims.sub);
    let player = api.upsert_player(&claims.sub, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(player))
}

route!(my_player_profile => Get "/players/me" impl LeagueManagement);
pub async fn my_player_profile<B: LeagueManagement>(
    claims: JwtClaims,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET player profile for {}", claims.sub);
    let player = api
        .player_for_user(&claims.sub)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("Player profile not found".into()))?;
    Ok(HttpResponse::Ok().json(player))
}

route!(scoutable_players => Get "/players/scout" impl LeagueManagement);
pub async fn scoutable_players<B: LeagueManagement>(
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET scoutable players");
    let players = api.scoutable_players().await?;
    Ok(HttpResponse::Ok().json(players))
}

route!(upsert_referee => Post "/referees" impl LeagueManagement where requires [UserRole::Referee]);
pub async fn upsert_referee<B: LeagueManagement>(
    claims: JwtClaims,
    body: web::Json<RefereeProfile>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST referee profile for {}", claims.sub);
    let referee = api.upsert_referee(&claims.sub, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(referee))
}

route!(upsert_staff => Post "/staff" impl LeagueManagement where requires [UserRole::Staff]);
pub async fn upsert_staff<B: LeagueManagement>(
    claims: JwtClaims,
    body: web::Json<StaffProfile>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST staff profile for {}", claims.sub);
    let staff = api.upsert_staff(&claims.sub, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(staff))
}

//----------------------------------------------   Stadiums  ----------------------------------------------------
route!(create_stadium => Post "/stadiums" impl LeagueManagement where requires [UserRole::StadiumOwner]);
pub async fn create_stadium<B: LeagueManagement>(
    claims: JwtClaims,
    body: web::Json<NewStadium>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST stadium for {}", claims.sub);
    let stadium = api.create_stadium(&claims.sub, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(stadium))
}

route!(stadiums => Get "/stadiums" impl LeagueManagement);
pub async fn stadiums<B: LeagueManagement>(api: web::Data<LeagueApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET stadiums");
    let stadiums = api.stadiums().await?;
    Ok(HttpResponse::Ok().json(stadiums))
}

route!(stadium => Get "/stadiums/{id}" impl LeagueManagement);
pub async fn stadium<B: LeagueManagement>(
    path: web::Path<i64>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let stadium_id = path.into_inner();
    trace!("💻️ GET stadium {stadium_id}");
    let stadium =
        api.stadium(stadium_id).await?.ok_or_else(|| ServerError::NoRecordFound("Stadium not found".into()))?;
    Ok(HttpResponse::Ok().json(stadium))
}

//----------------------------------------------   Tournaments  ----------------------------------------------------
route!(create_tournament => Post "/tournaments" impl LeagueManagement where requires [UserRole::ClubOwner]);
pub async fn create_tournament<B: LeagueManagement>(
    claims: JwtClaims,
    body: web::Json<NewTournament>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST tournament by {}", claims.sub);
    let tournament = api.create_tournament(&claims.sub, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(tournament))
}

route!(tournaments => Get "/tournaments" impl LeagueManagement);
pub async fn tournaments<B: LeagueManagement>(api: web::Data<LeagueApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET tournaments");
    let tournaments = api.tournaments().await?;
    Ok(HttpResponse::Ok().json(tournaments))
}

//----------------------------------------------   Contact  ----------------------------------------------------
route!(submit_contact => Post "/api/contact" impl LeagueManagement);
/// The public contact form. This route is mounted outside the authenticated `/api` scope.
pub async fn submit_contact<B: LeagueManagement>(
    body: web::Json<ContactRequest>,
    api: web::Data<LeagueApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ POST contact form");
    let submission = api.submit_contact(body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Your message has been received. We will get back to you within 24-48 hours.",
        "submission_id": submission.id,
    })))
}

//----------------------------------------------   Payments  ----------------------------------------------------
#[post("/payments/breakdown")]
pub async fn payment_breakdown(body: web::Json<BreakdownRequest>) -> impl Responder {
    let BreakdownRequest { stadium_fee, referee_fee, staff_fee } = body.into_inner();
    trace!("💻️ POST payment breakdown for fees {stadium_fee}, {referee_fee}, {staff_fee}");
    HttpResponse::Ok().json(calculate_payment_breakdown(stadium_fee, referee_fee, staff_fee))
}

route!(create_order => Post "/razorpay/create-order" impl PaymentGatewayDatabase, PaymentProvider);
/// Opens a checkout order with the payment gateway. A payment record is stored for orders that pay for a match.
pub async fn create_order<B, P>(
    body: web::Json<NewOrderRequest>,
    api: web::Data<PaymentFlowApi<B>>,
    provider: web::Data<P>,
) -> Result<HttpResponse, ServerError>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    let request = body.into_inner();
    debug!("💻️ POST create order for receipt {:?}", request.receipt);
    let order = api.create_order(provider.as_ref(), request).await.map_err(|e| match e {
        PaymentGatewayError::ProviderError(message) => {
            error!("💸️ Could not create a gateway order. {message}");
            ServerError::custom(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to create order", "message": message }),
            )
        },
        e => e.into(),
    })?;
    Ok(HttpResponse::Ok().json(order))
}

/// Checks the checkout signature the client received from the gateway after payment.
#[post("/razorpay/verify-payment")]
pub async fn verify_payment(
    body: web::Json<VerifyPaymentRequest>,
    config: web::Data<RazorpayConfig>,
) -> Result<HttpResponse, ServerError> {
    let VerifyPaymentRequest { razorpay_order_id, razorpay_payment_id, razorpay_signature } = body.into_inner();
    let fields = (razorpay_order_id, razorpay_payment_id, razorpay_signature);
    let (Some(order_id), Some(payment_id), Some(signature)) = fields else {
        return Err(ServerError::ValidationError("Missing required fields for payment verification".into()));
    };
    if !config.key_secret.is_set() {
        error!("💸️ Cannot verify payment {payment_id}. The Razorpay key secret is not configured.");
        return Err(ServerError::custom(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Server configuration error" }),
        ));
    }
    if verify_payment_signature(config.key_secret.reveal(), &order_id, &payment_id, &signature) {
        debug!("💸️ Payment {payment_id} for order {order_id} verified");
        Ok(HttpResponse::Ok().json(json!({
            "verified": true,
            "order_id": order_id,
            "payment_id": payment_id,
            "message": "Payment verified successfully",
        })))
    } else {
        warn!("💸️ Invalid payment signature for order {order_id}");
        Ok(HttpResponse::BadRequest().json(json!({ "verified": false, "error": "Invalid payment signature" })))
    }
}

route!(payment_status => Get "/payments/check-status" impl PaymentGatewayDatabase);
pub async fn payment_status<B: PaymentGatewayDatabase>(
    query: web::Query<PaymentStatusQuery>,
    api: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = query
        .into_inner()
        .payment_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ServerError::ValidationError("Missing payment_id parameter".into()))?;
    trace!("💻️ GET payment status for {id}");
    let Some(payment) = api.payment_status(&id).await? else {
        return Ok(HttpResponse::NotFound().json(json!({
            "status": "not_found",
            "message": "Payment record not found - webhook may not have processed yet",
        })));
    };
    Ok(HttpResponse::Ok().json(json!({
        "id": payment.id,
        "status": payment.status,
        "razorpay_payment_id": payment.razorpay_payment_id,
        "razorpay_order_id": payment.razorpay_order_id,
        "completed_at": payment.completed_at,
        "amount": payment.amount,
        "message": format!("Payment status: {}", payment.status),
    })))
}

route!(pending_payouts => Get "/payouts/pending" impl PaymentGatewayDatabase);
pub async fn pending_payouts<B: PaymentGatewayDatabase>(
    claims: JwtClaims,
    api: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET pending payouts for {}", claims.sub);
    let payouts = api.pending_payouts(&claims.sub).await?;
    Ok(HttpResponse::Ok().json(payouts))
}

//----------------------------------------------   Webhooks  ----------------------------------------------------
route!(razorpay_webhook => Post "/razorpay" impl PaymentGatewayDatabase);
/// Razorpay webhook receiver. It is mounted under `/api/webhooks`, behind the webhook signature middleware rather
/// than the access token check.
pub async fn razorpay_webhook<B: PaymentGatewayDatabase>(
    body: web::Json<Value>,
    api: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let event = WebhookEvent::from_payload(&body);
    info!("💸️ Received Razorpay webhook: {}", event.name());
    api.process_webhook(event).await.map_err(|e| {
        error!("💸️ Webhook processing failed. {e}");
        ServerError::custom(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Webhook processing failed" }))
    })?;
    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}

//----------------------------------------------   KYC  ----------------------------------------------------
route!(player_generate_otp => Post "/kyc/player/generate-otp" impl KycManagement, IdentityVerifier);
pub async fn player_generate_otp<B, V>(
    claims: JwtClaims,
    body: web::Json<AadhaarOtpRequest>,
    api: web::Data<KycApi<B>>,
    verifier: web::Data<V>,
) -> Result<HttpResponse, ServerError>
where
    B: KycManagement,
    V: IdentityVerifier,
{
    debug!("💻️ POST player Aadhaar OTP request for {}", claims.sub);
    let request_id =
        api.request_player_otp(verifier.as_ref(), &claims.sub, body.aadhaar_number.as_deref()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "request_id": request_id,
        "message": "OTP sent successfully to your registered mobile number",
    })))
}

route!(player_verify_otp => Post "/kyc/player/verify-otp" impl KycManagement, IdentityVerifier);
pub async fn player_verify_otp<B, V>(
    claims: JwtClaims,
    body: web::Json<OtpVerificationRequest>,
    api: web::Data<KycApi<B>>,
    verifier: web::Data<V>,
) -> Result<HttpResponse, ServerError>
where
    B: KycManagement,
    V: IdentityVerifier,
{
    debug!("💻️ POST player Aadhaar OTP verification for {}", claims.sub);
    let data = api
        .verify_player_otp(verifier.as_ref(), &claims.sub, body.request_id.as_deref(), body.otp.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Aadhaar verified successfully", "data": data })))
}

route!(club_request_otp => Post "/kyc/request-aadhaar-otp" impl KycManagement, IdentityVerifier);
pub async fn club_request_otp<B, V>(
    claims: JwtClaims,
    body: web::Json<AadhaarOtpRequest>,
    api: web::Data<KycApi<B>>,
    verifier: web::Data<V>,
) -> Result<HttpResponse, ServerError>
where
    B: KycManagement,
    V: IdentityVerifier,
{
    debug!("💻️ POST club owner Aadhaar OTP request for {}", claims.sub);
    let request_id = api
        .request_club_otp(verifier.as_ref(), &claims.sub, body.club_id, body.aadhaar_number.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "request_id": request_id,
        "message": "OTP sent to registered mobile number",
    })))
}

route!(club_verify_otp => Post "/kyc/verify-aadhaar-otp" impl KycManagement, IdentityVerifier);
pub async fn club_verify_otp<B, V>(
    claims: JwtClaims,
    body: web::Json<OtpVerificationRequest>,
    api: web::Data<KycApi<B>>,
    verifier: web::Data<V>,
) -> Result<HttpResponse, ServerError>
where
    B: KycManagement,
    V: IdentityVerifier,
{
    debug!("💻️ POST club owner Aadhaar OTP verification for {}", claims.sub);
    let req = body.into_inner();
    let data = api
        .verify_club_otp(verifier.as_ref(), &claims.sub, req.request_id.as_deref(), req.otp.as_deref(), req.club_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Aadhaar verified successfully", "data": data })))
}

route!(upload_documents => Post "/kyc/documents-upload" impl KycManagement, ObjectStore);
pub async fn upload_documents<B, S>(
    claims: JwtClaims,
    body: web::Json<DocumentsUploadRequest>,
    api: web::Data<KycApi<B>>,
    store: web::Data<S>,
) -> Result<HttpResponse, ServerError>
where
    B: KycManagement,
    S: ObjectStore,
{
    let req = body.into_inner();
    debug!("💻️ POST {} KYC documents for club {:?} by {}", req.documents.len(), req.club_id, claims.sub);
    let documents = decode_documents(&req.documents)?;
    let result = api.upload_club_documents(store.as_ref(), &claims.sub, req.club_id, documents).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Documents uploaded successfully",
        "documents": result.documents,
        "status": result.status(),
    })))
}

route!(add_payout_account => Post "/kyc/payout-accounts" impl KycManagement);
pub async fn add_payout_account<B: KycManagement>(
    claims: JwtClaims,
    body: web::Json<BankAccountRequest>,
    api: web::Data<KycApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST payout account for {}", claims.sub);
    let account = api.add_payout_account(&claims.sub, body.account()).await?;
    Ok(HttpResponse::Created().json(account))
}

route!(payout_accounts => Get "/kyc/payout-accounts" impl KycManagement);
pub async fn payout_accounts<B: KycManagement>(
    claims: JwtClaims,
    api: web::Data<KycApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET payout accounts for {}", claims.sub);
    let accounts = api.payout_accounts(&claims.sub).await?;
    Ok(HttpResponse::Ok().json(accounts))
}

route!(update_bank_account => Post "/kyc/update-bank-account" impl KycManagement);
pub async fn update_bank_account<B: KycManagement>(
    claims: JwtClaims,
    body: web::Json<BankAccountRequest>,
    api: web::Data<KycApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST update bank account {:?} for {}", body.account_id, claims.sub);
    let account = api.update_payout_account(&claims.sub, body.account_id, body.account()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Bank account updated. Status reset to pending for re-verification.",
        "account": account,
    })))
}

route!(verify_bank_account => Post "/kyc/verify-bank-account" impl KycManagement, IdentityVerifier);
pub async fn verify_bank_account<B, V>(
    claims: JwtClaims,
    body: web::Json<BankAccountRequest>,
    api: web::Data<KycApi<B>>,
    verifier: web::Data<V>,
) -> Result<HttpResponse, ServerError>
where
    B: KycManagement,
    V: IdentityVerifier,
{
    debug!("💻️ POST verify bank account {:?} for {}", body.account_id, claims.sub);
    let outcome = api.verify_bank_account(verifier.as_ref(), &claims.sub, body.account_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "status": outcome.status,
        "message": outcome.message(),
        "details": outcome.details,
    })))
}

//----------------------------------------------   Matches  ----------------------------------------------------
route!(create_match => Post "/matches" impl MatchBackend where requires [UserRole::ClubOwner]);
pub async fn create_match<B: MatchBackend>(
    claims: JwtClaims,
    body: web::Json<NewMatch>,
    api: web::Data<MatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST create match by {}", claims.sub);
    let new_match = api.create_match(&claims.sub, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(new_match))
}

route!(cancel_match => Post "/matches/cancel" impl MatchBackend);
pub async fn cancel_match<B: MatchBackend>(
    claims: JwtClaims,
    body: web::Json<CancelMatchRequest>,
    api: web::Data<MatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST cancel match {:?} by {}", body.match_id, claims.sub);
    let cancelled = api.cancel_match(&claims.sub, body.match_id, body.reason.as_deref()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Match canceled successfully",
        "match": {
            "id": cancelled.id,
            "status": cancelled.status,
            "canceled_at": cancelled.canceled_at,
            "reason": cancelled.cancellation_reason,
        }
    })))
}

route!(fetch_match => Get "/matches/{id}" impl MatchBackend);
pub async fn fetch_match<B: MatchBackend>(
    path: web::Path<i64>,
    api: web::Data<MatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let match_id = path.into_inner();
    trace!("💻️ GET match {match_id}");
    let found = api.fetch_match(match_id).await?.ok_or_else(|| ServerError::NoRecordFound("Match not found".into()))?;
    Ok(HttpResponse::Ok().json(found))
}

route!(refund_quote => Get "/matches/{id}/refund-quote" impl MatchBackend);
/// The refund the match payer would receive if the match were cancelled now.
pub async fn refund_quote<B: MatchBackend>(
    path: web::Path<i64>,
    api: web::Data<MatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let match_id = path.into_inner();
    trace!("💻️ GET refund quote for match {match_id}");
    let quote = api.refund_quote(match_id, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(quote))
}

//----------------------------------------------   Contracts  ----------------------------------------------------
route!(create_contract => Post "/contracts" impl ContractBackend where requires [UserRole::ClubOwner]);
pub async fn create_contract<B: ContractBackend>(
    claims: JwtClaims,
    body: web::Json<NewContract>,
    api: web::Data<ContractApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST create contract by {}", claims.sub);
    let contract = api.create_contract(&claims.sub, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(contract))
}

route!(my_contracts => Get "/contracts" impl ContractBackend);
pub async fn my_contracts<B: ContractBackend>(
    claims: JwtClaims,
    api: web::Data<ContractApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET contracts for {}", claims.sub);
    let contracts = api.contracts_for(&claims.sub).await?;
    Ok(HttpResponse::Ok().json(contracts))
}

route!(sign_contract => Post "/contracts/{id}/sign" impl ContractBackend where requires [UserRole::Player]);
pub async fn sign_contract<B: ContractBackend>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<SignContractRequest>,
    api: web::Data<ContractApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let contract_id = path.into_inner();
    debug!("💻️ POST sign contract {contract_id} by {}", claims.sub);
    let contract = api.sign_contract(&claims.sub, contract_id, body.signature.as_deref()).await?;
    Ok(HttpResponse::Ok().json(contract))
}

route!(terminate_contract => Post "/contracts/{id}/terminate" impl ContractBackend where requires [UserRole::ClubOwner]);
pub async fn terminate_contract<B: ContractBackend>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<TerminateContractRequest>,
    api: web::Data<ContractApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let contract_id = path.into_inner();
    debug!("💻️ POST terminate contract {contract_id} by {}", claims.sub);
    let contract = api.terminate_contract(&claims.sub, contract_id, body.reason.as_deref()).await?;
    Ok(HttpResponse::Ok().json(contract))
}

//----------------------------------------------   Notifications  ----------------------------------------------------
route!(notifications => Get "/notifications" impl NotificationManagement);
pub async fn notifications<B: NotificationManagement>(
    claims: JwtClaims,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET notifications for {}", claims.sub);
    let notifications = api.notifications(&claims.sub).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

route!(mark_notification_read => Post "/notifications/{id}/read" impl NotificationManagement);
pub async fn mark_notification_read<B: NotificationManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    trace!("💻️ POST mark notification {id} read for {}", claims.sub);
    let notification = api.mark_read(&claims.sub, id).await?;
    Ok(HttpResponse::Ok().json(notification))
}

route!(register_push_token => Post "/notifications/tokens" impl NotificationManagement);
pub async fn register_push_token<B: NotificationManagement>(
    claims: JwtClaims,
    body: web::Json<PushTokenRequest>,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST push token for {}", claims.sub);
    let token = api.register_token(&claims.sub, body.token.as_deref(), body.platform.as_deref()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "token_id": token.id })))
}

route!(send_push => Post "/notifications/push" impl NotificationManagement, PushSender);
pub async fn send_push<B, P>(
    claims: JwtClaims,
    body: web::Json<PushNotificationRequest>,
    api: web::Data<NotificationApi<B>>,
    sender: web::Data<P>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError>
where
    B: NotificationManagement,
    P: PushSender,
{
    debug!("💻️ POST push notification by {}", claims.sub);
    if !options.push_enabled {
        return Err(NotificationApiError::PushUnavailable("No FCM service account is configured".into()).into());
    }
    let report = api.send_push(sender.as_ref(), body.into_inner().into()).await?;
    if report.results.is_empty() && report.errors.is_empty() {
        return Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "sent_count": 0,
            "message": "No active tokens found",
        })));
    }
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "sent_count": report.sent_count,
        "error_count": report.error_count,
        "results": report.results,
        "errors": report.errors,
    })))
}
