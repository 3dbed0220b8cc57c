use chrono::{Duration, Utc};
use log::*;
use pcl_engine::{db_types::AadhaarRequest, KycApi, SqliteDatabase};
use tokio::task::JoinHandle;

/// Starts the Aadhaar OTP request expiry worker. Do not await the returned JoinHandle, as it will run indefinitely.
pub fn start_expiry_worker(db: SqliteDatabase, otp_request_timeout: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(std::time::Duration::from_secs(60));
        let api = KycApi::new(db);
        info!("🕰️ Aadhaar OTP request expiry worker started");
        loop {
            timer.tick().await;
            trace!("🕰️ Running Aadhaar OTP request expiry job");
            let cutoff = Utc::now() - otp_request_timeout;
            match api.expire_requests(cutoff).await {
                Ok(expired) if expired.is_empty() => trace!("🕰️ No OTP requests expired"),
                Ok(expired) => debug!("🕰️ Expired OTP requests: {}", request_list(&expired)),
                Err(e) => error!("🕰️ Error running Aadhaar OTP request expiry job: {e}"),
            }
        }
    })
}

fn request_list(requests: &[AadhaarRequest]) -> String {
    requests
        .iter()
        .map(|r| format!("[{}] user: {} created: {}", r.request_id, r.user_id, r.created_at))
        .collect::<Vec<String>>()
        .join(", ")
}
