use chrono::Duration;

use qrfeed_domain::sentiment::Sentiment;
use qrfeed_feedback::error::FeedbackServiceError;
use qrfeed_feedback::handlers::feedback::{
    SubmitFeedbackRequest, get_feedback, list_all_feedback, list_feedback_by_sentiment,
    list_qr_feedback, list_recent_feedback, submit_feedback,
};
use qrfeed_feedback::handlers::qr_code::list_qr_codes;
use qrfeed_feedback::usecase::feedback::{SubmitFeedbackInput, SubmitFeedbackUseCase};
use qrfeed_testing::fixture::reference_now;

use crate::helpers::{FailingAnalyzer, issue, test_state};

fn request(qr_id: impl ToString, rating: i64, comment: &str) -> SubmitFeedbackRequest {
    SubmitFeedbackRequest {
        qr_id: qr_id.to_string(),
        rating,
        comment: comment.to_owned(),
    }
}

#[tokio::test]
async fn should_store_classified_feedback() {
    let (state, _clock) = test_state();
    let code = issue(&state, "Table 1", 24, 2).await;

    let stored = submit_feedback(
        &state,
        request(code.id, 5, "Loved the atmosphere and the food was great"),
    )
    .await
    .unwrap();

    assert_eq!(stored.qr_id, code.id.to_string());
    assert_eq!(stored.rating.get(), 5);
    assert_eq!(stored.sentiment, Sentiment::Positive);
    assert_eq!(stored.created_at, reference_now());

    let fetched = get_feedback(&state, &stored.id.to_string()).await.unwrap();
    assert_eq!(fetched.id, stored.id);
    assert_eq!(fetched.comment, "Loved the atmosphere and the food was great");
}

#[tokio::test]
async fn should_accept_empty_comment_as_neutral() {
    let (state, _clock) = test_state();
    let code = issue(&state, "Table 1", 24, 2).await;

    let stored = submit_feedback(&state, request(code.id, 3, "")).await.unwrap();

    assert_eq!(stored.sentiment, Sentiment::Neutral);
    assert_eq!(stored.comment, "");
}

#[tokio::test]
async fn should_reject_out_of_range_rating_without_storing() {
    let (state, _clock) = test_state();
    let code = issue(&state, "Table 1", 24, 2).await;

    for rating in [0, 6, -1] {
        let err = submit_feedback(&state, request(code.id, rating, "ok"))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedbackServiceError::InvalidRating), "rating {rating}");
    }

    assert!(list_all_feedback(&state).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_store_feedback_for_orphan_qr_id() {
    let (state, _clock) = test_state();
    issue(&state, "Table 1", 24, 2).await;

    let stored = submit_feedback(&state, request("table-one", 4, "nice"))
        .await
        .unwrap();

    assert_eq!(stored.qr_id, "table-one");
    let all = list_all_feedback(&state).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, stored.id);

    let for_orphan = list_qr_feedback(&state, "table-one").await.unwrap();
    assert_eq!(for_orphan.len(), 1);
    assert!(
        list_qr_codes(&state)
            .await
            .unwrap()
            .iter()
            .all(|code| code.id.to_string() != stored.qr_id),
        "orphan id never matches an issued code"
    );
}

#[tokio::test]
async fn should_list_all_feedback_identically_between_writes() {
    let (state, clock) = test_state();
    let code = issue(&state, "Table 1", 24, 5).await;
    for (rating, comment) in [(5, "Great"), (2, "Slow service"), (3, "Fine")] {
        submit_feedback(&state, request(code.id, rating, comment)).await.unwrap();
        clock.advance(Duration::minutes(1));
    }

    let first: Vec<_> = list_all_feedback(&state)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    let second: Vec<_> = list_all_feedback(&state)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[tokio::test]
async fn should_not_find_unknown_feedback() {
    let (state, _clock) = test_state();

    let err = get_feedback(&state, &uuid::Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = get_feedback(&state, "garbage").await.unwrap_err();
    assert!(matches!(err, FeedbackServiceError::FeedbackNotFound));
}

#[tokio::test]
async fn should_list_feedback_per_qr_code_and_sentiment() {
    let (state, _clock) = test_state();
    let table = issue(&state, "Table 1", 24, 5).await;
    let room = issue(&state, "Room 12", 24, 5).await;

    submit_feedback(&state, request(table.id, 5, "Great service")).await.unwrap();
    submit_feedback(&state, request(table.id, 1, "Terrible wait")).await.unwrap();
    submit_feedback(&state, request(room.id, 3, "It was fine")).await.unwrap();

    let for_table = list_qr_feedback(&state, &table.id.to_string()).await.unwrap();
    assert_eq!(for_table.len(), 2);
    assert!(for_table.iter().all(|f| f.qr_id == table.id.to_string()));

    let negative = list_feedback_by_sentiment(&state, "NEGATIVE").await.unwrap();
    assert_eq!(negative.len(), 1);
    assert_eq!(negative[0].comment, "Terrible wait");

    let err = list_feedback_by_sentiment(&state, "angry").await.unwrap_err();
    assert!(matches!(err, FeedbackServiceError::InvalidFilter(_)));
}

#[tokio::test]
async fn should_list_recent_feedback_newest_first() {
    let (state, clock) = test_state();
    let code = issue(&state, "Table 1", 24, 5).await;

    for comment in ["first", "second", "third"] {
        submit_feedback(&state, request(code.id, 4, comment)).await.unwrap();
        clock.advance(Duration::minutes(5));
    }

    let recent = list_recent_feedback(&state, 2).await.unwrap();
    let comments: Vec<_> = recent.iter().map(|f| f.comment.as_str()).collect();
    assert_eq!(comments, vec!["third", "second"]);
}

#[tokio::test]
async fn should_store_neutral_feedback_when_classifier_is_down() {
    let (state, _clock) = test_state();
    let code = issue(&state, "Table 1", 24, 2).await;

    let usecase = SubmitFeedbackUseCase {
        feedback: state.feedback_repo(),
        analyzer: FailingAnalyzer,
        clock: state.clock(),
        classify_timeout: state.config.sentiment_timeout,
    };
    let stored = usecase
        .execute(SubmitFeedbackInput {
            qr_id: code.id.to_string(),
            rating: 2,
            comment: "The service was terrible".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(stored.sentiment, Sentiment::Neutral);
    let all = list_all_feedback(&state).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].sentiment, Sentiment::Neutral);
}
