use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wordwise_types::{AppEvent, AppResponse};

use crate::controller::{Reply, Request};
use crate::session::{Session, SessionError};
use crate::state::AppState;

/// App's main loop.
///
/// Each request runs on its own task so unrelated words proceed in parallel;
/// the session's key locks order the ones that collide.
pub async fn event_loop(
    state: Arc<AppState>,
    requests: AsyncReceiver<Request>,
    replies: AsyncSender<Reply>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    {
        let config = state.config.read().await;
        tracing::info!(
            "[EVENT_LOOP] Daily goal {}, translating to {:?}",
            config.study.daily_goal,
            config.translator.translates_on_lookup().then_some(&config.translator.to_lang)
        );
    }

    let mut in_flight = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Waiting for events");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            received = requests.recv() => {
                let Ok(request) = received else {
                    tracing::debug!("[EVENT_LOOP] Request channel closed");
                    break;
                };

                tracing::debug!(
                    "[EVENT_LOOP] Request {} {:?}",
                    request.id,
                    std::mem::discriminant(&request.event)
                );

                while let Some(joined) = in_flight.try_join_next() {
                    if let Err(e) = joined {
                        tracing::error!("event task failed: {e}");
                    }
                }

                let session = state.session.clone();
                let replies = replies.clone();
                in_flight.spawn(async move {
                    let response = handle_event(&session, request.event).await;
                    if let Err(e) = replies.send(Reply { id: request.id, response }).await {
                        tracing::warn!("reply {} dropped: {e}", request.id);
                    }
                });
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            tracing::error!("event task failed: {e}");
        }
    }

    Ok(())
}

pub async fn handle_event(session: &Session, event: AppEvent) -> AppResponse {
    let result = match event {
        AppEvent::Lookup { word, context } => session
            .lookup(&word, context)
            .await
            .map(|outcome| AppResponse::Lookup(Box::new(outcome))),
        AppEvent::GetDueReview => session.due_review().await.map(AppResponse::Review),
        AppEvent::SubmitReviewGrade { word, grade } => session
            .submit_review_grade(&word, grade)
            .await
            .map(AppResponse::GradeRecorded),
        AppEvent::GenerateQuiz(quiz_type) => {
            session.generate_quiz(quiz_type).await.map(AppResponse::Quiz)
        }
        AppEvent::SubmitQuizAnswer { word, correct } => session
            .submit_quiz_answer(&word, correct)
            .await
            .map(|(totals, award)| AppResponse::QuizAnswered { totals, award }),
        AppEvent::GetMastery(word) => session
            .mastery(&word)
            .await
            .map(|score| AppResponse::Mastery { word, score }),
        AppEvent::GetProgress => session
            .progress()
            .await
            .map(|snapshot| AppResponse::Progress(Box::new(snapshot))),
        AppEvent::ExportAll => session.export_all().await.map(AppResponse::Export),
        AppEvent::ToggleFavorite(word) => session
            .toggle_favorite(&word)
            .await
            .map(|favorite| AppResponse::Favorite { word, favorite }),
        AppEvent::GetFavorites => session.favorites().await.map(AppResponse::Favorites),
        AppEvent::GetHistory => session.history().await.map(AppResponse::History),
        AppEvent::GetWordOfDay => session.word_of_day().await.map(AppResponse::WordOfDay),
        AppEvent::GetDailyGoal => session.daily_goal().await.map(AppResponse::DailyGoal),
        AppEvent::GetStrength => session.strength().await.map(AppResponse::Strength),
        AppEvent::Translate { word, lang } => session
            .translate(&word, &lang)
            .await
            .map(|text| AppResponse::Translation { word, lang, text }),
        AppEvent::ResetWord(word) => session.reset_word(&word).await.map(|_| AppResponse::Reset),
        AppEvent::Reset => session.reset().await.map(|_| AppResponse::Reset),
    };

    result.unwrap_or_else(into_response)
}

fn into_response(error: SessionError) -> AppResponse {
    if error.is_empty_pool() {
        tracing::debug!("Empty pool: {error}");
        AppResponse::Empty(error.to_string())
    } else {
        tracing::warn!("Request failed: {error}");
        AppResponse::Error(error.to_string())
    }
}
