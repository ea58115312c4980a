use std::env;

use chrono::{Duration, DurationRound, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use salesops_backend::dto::justcall_dto::InboundReplyEvent;
use salesops_backend::models::outbound_message::{
    CreateOutboundMessage, OutboundMessage, STATE_CONFIRMED, STATE_SENT,
};
use salesops_backend::models::reply_log::{
    ReplyLog, KIND_NON_AFFIRMATIVE, KIND_ORPHAN_AFFIRMATIVE,
};
use salesops_backend::services::confirmation_service::{ConfirmationOutcome, ConfirmationService};
use salesops_backend::services::message_service::MessageService;

async fn setup_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to create test pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

// Each test works against its own recipient number so runs don't step on
// each other's rows.
fn unique_number() -> String {
    let n = Uuid::new_v4().as_u128() % 100_000_000;
    format!("+4790{:08}", n)
}

async fn insert_outbound(messages: &MessageService, recipient: &str) -> OutboundMessage {
    messages
        .create(CreateOutboundMessage {
            provider_message_id: format!("pm-{}", Uuid::new_v4()),
            recipient_address: recipient.to_string(),
            sender_address: "+4740000000".to_string(),
            template_body: "Hi [customer_name]".to_string(),
            rendered_body: "Hi Ola".to_string(),
            user_id: None,
        })
        .await
        .expect("failed to insert outbound message")
}

fn reply_from(sender: &str, body: &str) -> InboundReplyEvent {
    InboundReplyEvent {
        provider_event_id: format!("evt-{}", Uuid::new_v4()),
        sender_address: sender.to_string(),
        body: body.to_string(),
        // Truncated to what timestamptz round-trips.
        received_at: Utc::now()
            .duration_trunc(Duration::microseconds(1))
            .expect("truncate timestamp"),
    }
}

async fn reply_logs_for(pool: &PgPool, sender: &str) -> Vec<ReplyLog> {
    sqlx::query_as::<_, ReplyLog>(
        r#"
        SELECT * FROM reply_logs
        WHERE sender_address = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(sender)
    .fetch_all(pool)
    .await
    .expect("failed to fetch reply logs")
}

#[tokio::test]
async fn affirmative_reply_confirms_candidate_and_sets_all_reply_fields() {
    let pool = setup_pool().await;
    let messages = MessageService::new(pool.clone());
    let confirmations = ConfirmationService::new(pool.clone());

    let recipient = unique_number();
    let sent = insert_outbound(&messages, &recipient).await;
    assert_eq!(sent.confirmation_state, STATE_SENT);
    assert!(sent.confirmed_at.is_none());
    assert!(sent.confirmation_reply_body.is_none());
    assert!(sent.confirmation_reply_provider_id.is_none());

    let reply = reply_from(&recipient, "Ok!");
    let outcome = confirmations
        .apply(Some(&sent), &reply, true)
        .await
        .expect("apply failed");
    assert_eq!(outcome, ConfirmationOutcome::Confirmed);

    let updated = messages
        .get(sent.id)
        .await
        .expect("fetch failed")
        .expect("message gone");
    assert_eq!(updated.confirmation_state, STATE_CONFIRMED);
    assert_eq!(updated.confirmed_at, Some(reply.received_at));
    assert_eq!(updated.confirmation_reply_body.as_deref(), Some("Ok!"));
    assert_eq!(
        updated.confirmation_reply_provider_id.as_deref(),
        Some(reply.provider_event_id.as_str())
    );
}

#[tokio::test]
async fn second_confirmation_is_detected_noop_keeping_first_reply() {
    let pool = setup_pool().await;
    let messages = MessageService::new(pool.clone());
    let confirmations = ConfirmationService::new(pool.clone());

    let recipient = unique_number();
    let sent = insert_outbound(&messages, &recipient).await;

    let first = reply_from(&recipient, "yes");
    let outcome = confirmations
        .apply(Some(&sent), &first, true)
        .await
        .expect("first apply failed");
    assert_eq!(outcome, ConfirmationOutcome::Confirmed);

    let second = reply_from(&recipient, "ok");
    let outcome = confirmations
        .apply(Some(&sent), &second, true)
        .await
        .expect("second apply failed");
    assert_eq!(outcome, ConfirmationOutcome::AlreadyConfirmed);

    let updated = messages
        .get(sent.id)
        .await
        .expect("fetch failed")
        .expect("message gone");
    assert_eq!(updated.confirmation_state, STATE_CONFIRMED);
    assert_eq!(updated.confirmation_reply_body.as_deref(), Some("yes"));
    assert_eq!(
        updated.confirmation_reply_provider_id.as_deref(),
        Some(first.provider_event_id.as_str())
    );
}

#[tokio::test]
async fn orphan_affirmative_reply_is_logged_without_touching_outbound_messages() {
    let pool = setup_pool().await;
    let confirmations = ConfirmationService::new(pool.clone());

    let sender = unique_number();
    let reply = reply_from(&sender, "ok");
    let outcome = confirmations
        .apply(None, &reply, true)
        .await
        .expect("apply failed");
    assert_eq!(outcome, ConfirmationOutcome::OrphanLogged);

    let logs = reply_logs_for(&pool, &sender).await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, KIND_ORPHAN_AFFIRMATIVE);
    assert_eq!(logs[0].body, "ok");
    assert_eq!(logs[0].candidate_message_id, None);

    // No outbound record is fabricated for the orphan.
    let count: (i64,) = sqlx::query_as(
        r#"SELECT COUNT(*) FROM outbound_messages WHERE recipient_address = $1"#,
    )
    .bind(&sender)
    .fetch_one(&pool)
    .await
    .expect("count failed");
    assert_eq!(count.0, 0);
}

#[tokio::test]
async fn non_affirmative_reply_is_logged_referencing_candidate_without_state_change() {
    let pool = setup_pool().await;
    let messages = MessageService::new(pool.clone());
    let confirmations = ConfirmationService::new(pool.clone());

    let recipient = unique_number();
    let sent = insert_outbound(&messages, &recipient).await;

    let reply = reply_from(&recipient, "maybe later");
    let outcome = confirmations
        .apply(Some(&sent), &reply, false)
        .await
        .expect("apply failed");
    assert_eq!(outcome, ConfirmationOutcome::ReplyLogged);

    let logs = reply_logs_for(&pool, &recipient).await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, KIND_NON_AFFIRMATIVE);
    assert_eq!(logs[0].body, "maybe later");
    assert_eq!(logs[0].candidate_message_id, Some(sent.id));

    let untouched = messages
        .get(sent.id)
        .await
        .expect("fetch failed")
        .expect("message gone");
    assert_eq!(untouched.confirmation_state, STATE_SENT);
    assert!(untouched.confirmed_at.is_none());
    assert!(untouched.confirmation_reply_body.is_none());
    assert!(untouched.confirmation_reply_provider_id.is_none());
}
