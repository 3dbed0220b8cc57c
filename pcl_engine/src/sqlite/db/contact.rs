use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{ContactSubmission, NewContactSubmission};

pub async fn insert_submission(
    submission: NewContactSubmission,
    conn: &mut SqliteConnection,
) -> Result<ContactSubmission, sqlx::Error> {
    let submission: ContactSubmission = sqlx::query_as(
        r#"
            INSERT INTO contact_submissions (name, email, subject, message, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *;
        "#,
    )
    .bind(submission.name.trim())
    .bind(submission.email.trim())
    .bind(submission.subject.trim())
    .bind(submission.message.trim())
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Contact submission #{} stored", submission.id);
    Ok(submission)
}
