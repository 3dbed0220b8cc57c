use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use pcl_engine::{
    events::EventProducers,
    AccountApi,
    ContractApi,
    KycApi,
    LeagueApi,
    MatchApi,
    NotificationApi,
    PaymentFlowApi,
    SqliteDatabase,
};

use crate::{
    auth::TokenValidator,
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    expiry_worker::start_expiry_worker,
    integrations::{
        cashfree::CashfreeClient,
        fcm::FcmClient,
        push::create_push_event_handlers,
        razorpay::RazorpayClient,
        storage::StorageClient,
    },
    middleware::{HmacMiddlewareFactory, JwtMiddlewareFactory, RAZORPAY_SIGNATURE_HEADER},
    routes::{
        health,
        payment_breakdown,
        verify_payment,
        AddPayoutAccountRoute,
        AddToSquadRoute,
        CancelMatchRoute,
        ClubRequestOtpRoute,
        ClubRoute,
        ClubVerifyOtpRoute,
        ClubsForReviewRoute,
        ClubsRoute,
        CreateClubRoute,
        CreateContractRoute,
        CreateMatchRoute,
        CreateOrderRoute,
        CreateStadiumRoute,
        CreateTeamRoute,
        CreateTournamentRoute,
        CurrentUserRoute,
        DashboardRoute,
        FetchMatchRoute,
        MarkNotificationReadRoute,
        MyContractsRoute,
        MyPlayerProfileRoute,
        NotificationsRoute,
        PaymentStatusRoute,
        PayoutAccountsRoute,
        PendingPayoutsRoute,
        PlayerGenerateOtpRoute,
        PlayerVerifyOtpRoute,
        RazorpayWebhookRoute,
        RefundQuoteRoute,
        RegisterPushTokenRoute,
        ReviewClubRoute,
        ScoutablePlayersRoute,
        SendPushRoute,
        SetUserStatusRoute,
        SignContractRoute,
        StadiumRoute,
        StadiumsRoute,
        SubmitContactRoute,
        TeamsForClubRoute,
        TerminateContractRoute,
        TournamentsRoute,
        UpdateBankAccountRoute,
        UpdateClubRoute,
        UpdateProfileRoute,
        UploadDocumentsRoute,
        UpsertPlayerRoute,
        UpsertRefereeRoute,
        UpsertStaffRoute,
        VerifyBankAccountRoute,
    },
};

const MAX_DB_CONNECTIONS: u32 = 25;

/// Vendor clients shared by every worker.
#[derive(Clone)]
struct Integrations {
    razorpay: RazorpayClient,
    cashfree: CashfreeClient,
    fcm: FcmClient,
    storage: StorageClient,
}

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, MAX_DB_CONNECTIONS)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(format!("Could not migrate the database. {e}")))?;
    let fcm = FcmClient::new(config.fcm.clone());
    let producers = if fcm.is_configured() {
        let handlers = create_push_event_handlers(db.clone(), fcm.clone(), config.event_buffer_size);
        let producers = handlers.producers();
        handlers.start_handlers().await;
        info!("📲️ Push notification handlers started");
        producers
    } else {
        EventProducers::default()
    };
    let integrations = Integrations {
        razorpay: RazorpayClient::new(config.razorpay.clone()),
        cashfree: CashfreeClient::new(config.cashfree.clone())
            .map_err(|e| ServerError::InitializeError(format!("Could not create the Cashfree client. {e}")))?,
        fcm,
        storage: StorageClient::new(config.storage.clone()),
    };
    // The worker runs for the lifetime of the server
    let _worker = start_expiry_worker(db.clone(), config.otp_request_timeout);
    let srv = create_server_instance(config, db, producers, integrations)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
    integrations: Integrations,
) -> Result<Server, ServerError> {
    let options = ServerOptions::from_config(&config);
    let validator = TokenValidator::new(&config.auth);
    let srv = HttpServer::new(move || {
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into());
        let query_config = web::QueryConfig::default()
            .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("pcl::access_log"))
            .app_data(json_config)
            .app_data(query_config)
            .app_data(web::Data::new(AccountApi::new(db.clone())))
            .app_data(web::Data::new(LeagueApi::new(db.clone())))
            .app_data(web::Data::new(PaymentFlowApi::new(db.clone(), producers.clone())))
            .app_data(web::Data::new(KycApi::new(db.clone())))
            .app_data(web::Data::new(MatchApi::new(db.clone(), producers.clone())))
            .app_data(web::Data::new(ContractApi::new(db.clone(), producers.clone())))
            .app_data(web::Data::new(NotificationApi::new(db.clone())))
            .app_data(web::Data::new(integrations.razorpay.clone()))
            .app_data(web::Data::new(integrations.cashfree.clone()))
            .app_data(web::Data::new(integrations.fcm.clone()))
            .app_data(web::Data::new(integrations.storage.clone()))
            .app_data(web::Data::new(config.razorpay.clone()))
            .app_data(web::Data::new(options));
        // Routes that require an access token
        let api_scope = web::scope("/api")
            .wrap(JwtMiddlewareFactory::new(validator.clone()))
            .service(CurrentUserRoute::<SqliteDatabase>::new())
            .service(DashboardRoute::<SqliteDatabase>::new())
            .service(UpdateProfileRoute::<SqliteDatabase>::new())
            .service(CreateClubRoute::<SqliteDatabase>::new())
            .service(ClubsRoute::<SqliteDatabase>::new())
            .service(ClubRoute::<SqliteDatabase>::new())
            .service(UpdateClubRoute::<SqliteDatabase>::new())
            .service(ClubsForReviewRoute::<SqliteDatabase>::new())
            .service(ReviewClubRoute::<SqliteDatabase>::new())
            .service(SetUserStatusRoute::<SqliteDatabase>::new())
            .service(CreateTeamRoute::<SqliteDatabase>::new())
            .service(TeamsForClubRoute::<SqliteDatabase>::new())
            .service(AddToSquadRoute::<SqliteDatabase>::new())
            .service(UpsertPlayerRoute::<SqliteDatabase>::new())
            .service(MyPlayerProfileRoute::<SqliteDatabase>::new())
            .service(ScoutablePlayersRoute::<SqliteDatabase>::new())
            .service(UpsertRefereeRoute::<SqliteDatabase>::new())
            .service(UpsertStaffRoute::<SqliteDatabase>::new())
            .service(CreateStadiumRoute::<SqliteDatabase>::new())
            .service(StadiumsRoute::<SqliteDatabase>::new())
            .service(StadiumRoute::<SqliteDatabase>::new())
            .service(CreateTournamentRoute::<SqliteDatabase>::new())
            .service(TournamentsRoute::<SqliteDatabase>::new())
            .service(payment_breakdown)
            .service(verify_payment)
            .service(CreateOrderRoute::<SqliteDatabase, RazorpayClient>::new())
            .service(PaymentStatusRoute::<SqliteDatabase>::new())
            .service(PendingPayoutsRoute::<SqliteDatabase>::new())
            .service(PlayerGenerateOtpRoute::<SqliteDatabase, CashfreeClient>::new())
            .service(PlayerVerifyOtpRoute::<SqliteDatabase, CashfreeClient>::new())
            .service(ClubRequestOtpRoute::<SqliteDatabase, CashfreeClient>::new())
            .service(ClubVerifyOtpRoute::<SqliteDatabase, CashfreeClient>::new())
            .service(UploadDocumentsRoute::<SqliteDatabase, StorageClient>::new())
            .service(AddPayoutAccountRoute::<SqliteDatabase>::new())
            .service(PayoutAccountsRoute::<SqliteDatabase>::new())
            .service(UpdateBankAccountRoute::<SqliteDatabase>::new())
            .service(VerifyBankAccountRoute::<SqliteDatabase, CashfreeClient>::new())
            .service(CreateMatchRoute::<SqliteDatabase>::new())
            // Must precede the `/matches/{id}` routes
            .service(CancelMatchRoute::<SqliteDatabase>::new())
            .service(FetchMatchRoute::<SqliteDatabase>::new())
            .service(RefundQuoteRoute::<SqliteDatabase>::new())
            .service(CreateContractRoute::<SqliteDatabase>::new())
            .service(MyContractsRoute::<SqliteDatabase>::new())
            .service(SignContractRoute::<SqliteDatabase>::new())
            .service(TerminateContractRoute::<SqliteDatabase>::new())
            .service(NotificationsRoute::<SqliteDatabase>::new())
            .service(MarkNotificationReadRoute::<SqliteDatabase>::new())
            .service(RegisterPushTokenRoute::<SqliteDatabase>::new())
            .service(SendPushRoute::<SqliteDatabase, FcmClient>::new());
        // Webhooks are authenticated by their signature, not by an access token
        let webhook_scope = web::scope("/api/webhooks")
            .wrap(HmacMiddlewareFactory::new(
                RAZORPAY_SIGNATURE_HEADER,
                config.razorpay.webhook_secret.clone(),
                config.razorpay.hmac_checks,
            ))
            .service(RazorpayWebhookRoute::<SqliteDatabase>::new());
        // Public and webhook routes are registered ahead of the `/api` scope, which would otherwise claim their paths
        app.service(health)
            .service(SubmitContactRoute::<SqliteDatabase>::new())
            .service(webhook_scope)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
