//! `POST /comments/{id}/reply` scenarios.

use blog_api_suite::api::{PageQuery, unauthenticated};
use blog_api_suite::assertions::{
    CountSnapshot, assert_access_denied_raw, assert_api_error, assert_api_success, assert_count,
    fetch_exact, fetch_single,
};
use blog_api_suite::db::{CountQuery, DbComment, Table, queries};
use blog_api_suite::fixtures::{BannedAccount, CommentHandle, Session};
use blog_api_suite::routes::Endpoint;
use blog_api_suite::schema::{Comment, find_comment};
use blog_api_suite::telemetry::{KnownIssue, Stage, known_issue, step};
use blog_api_suite::transport::Query;
use rstest::rstest;
use serde::Serialize;
use serde_json::{Value, json};
use test_data::security::{
    SQLI_COMMENT_OUT, SQLI_DROP_TABLE, SQLI_OR_TAUTOLOGY, SQLI_QUOTED_TAUTOLOGY, XSS_IMG_ONERROR,
    XSS_SCRIPT_TAG, XSS_SVG_SCRIPT,
};
use test_data::{RawPayload, ReplyComment};
use uuid::Uuid;

mod support;

use support::{live, module_token, require};

const REPLY_MAX_LEN: usize = 255;

fn comment_fixture(session: &Session) -> CommentHandle {
    step(Stage::Prepare, || require(session.create_comment(), "comment"))
}

fn comment_row(session: &Session, id: &str) -> DbComment {
    fetch_single(
        session.sql(),
        queries::COMMENT_BY_ID,
        &[&id],
        &format!("comment {id}"),
    )
}

/// Replies to `parent_id` and returns the created reply.
fn reply_ok<B: Serialize>(
    session: &Session,
    token: &str,
    parent_id: &str,
    payload: &B,
) -> Comment {
    let response = step(Stage::Execute, || {
        require(session.comments().reply(token, parent_id, payload), "reply")
    });
    step(Stage::ValidateApi, || {
        assert_api_success(&response).response_data.clone()
    })
}

/// Top-level comments of the post, as the detail endpoint lists them.
fn comment_tree(session: &Session, handle: &CommentHandle) -> Vec<Comment> {
    let exchange = require(
        session
            .posts()
            .detail(&handle.token, &handle.post_id, &PageQuery::default()),
        "post detail",
    );
    assert_api_success(&exchange.response)
        .response_data
        .comments
        .clone()
}

/// Replies to `parent_id` and asserts no reply was stored under `counted`.
fn assert_reply_rejected<B: Serialize>(
    session: &Session,
    token: &str,
    parent_id: &str,
    counted: CountQuery,
    payload: &B,
    expected: &[&str],
) {
    let replies = step(Stage::Prepare, || CountSnapshot::take(session.sql(), counted));
    let response = step(Stage::Execute, || {
        require(session.comments().reply(token, parent_id, payload), "reply")
    });
    step(Stage::ValidateApi, || assert_api_error(&response, expected));
    step(Stage::ValidateDb, || {
        replies.assert_unchanged(session.sql(), "rejected reply was stored");
    });
}

#[rstest]
fn reply_comment(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    let payload = ReplyComment::random();

    let reply = reply_ok(session, &handle.token, &handle.comment_id, &payload);

    step(Stage::ValidateApi, || {
        let tree = comment_tree(session, &handle);
        let located = find_comment(&tree, &reply.id).expect("reply listed on the post");
        assert_eq!(located.parent_id, Some(handle.comment_id.as_str()));
    });

    step(Stage::ValidateDb, || {
        let row = comment_row(session, &reply.id);
        assert_eq!(row.text, payload.text());
        assert_eq!(row.parent_id.as_deref(), Some(handle.comment_id.as_str()));
        assert_eq!(row.post_id, handle.post_id);
        assert_eq!(row.text, reply.text);
    });
}

#[rstest]
fn reply_to_reply_nested(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);

    let chain = step(Stage::Execute, || {
        let mut chain = vec![handle.comment_id.clone()];
        for text in ["First level reply", "Second level reply", "Third level reply"] {
            let parent = chain.last().cloned().unwrap_or_default();
            let reply = reply_ok(session, &handle.token, &parent, &ReplyComment::new(text));
            chain.push(reply.id);
        }
        chain
    });

    step(Stage::ValidateApi, || {
        let tree = comment_tree(session, &handle);
        for (depth, pair) in chain.windows(2).enumerate() {
            let [parent, child] = pair else { continue };
            let located = find_comment(&tree, child)
                .unwrap_or_else(|| panic!("reply {child} missing from the tree"));
            assert_eq!(located.parent_id, Some(parent.as_str()));
            assert_eq!(located.depth, depth + 1);
        }
    });

    step(Stage::ValidateDb, || {
        for pair in chain.windows(2) {
            let [parent, child] = pair else { continue };
            let row = comment_row(session, child);
            assert_eq!(row.parent_id.as_ref(), Some(parent));
        }
    });
}

#[rstest]
fn reply_comment_special_symbols(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    let text = "🔥 Привет <b>друг</b> & welcome!";

    let payload = ReplyComment::new(text);
    let reply = reply_ok(session, &handle.token, &handle.comment_id, &payload);

    step(Stage::ValidateDb, || {
        let row = comment_row(session, &reply.id);
        assert_eq!(row.text, text);
        assert_eq!(row.text, reply.text);
    });
}

#[rstest]
fn reply_comment_multiple_replies(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    let texts = ["Первый ответ", "Второй ответ", "Третий ответ"];

    let reply_ids: Vec<String> = step(Stage::Execute, || {
        texts
            .iter()
            .map(|text| {
                let payload = ReplyComment::new(*text);
                reply_ok(session, &handle.token, &handle.comment_id, &payload).id
            })
            .collect()
    });

    step(Stage::ValidateApi, || {
        let tree = comment_tree(session, &handle);
        let parent = find_comment(&tree, &handle.comment_id).expect("parent listed on the post");
        assert_eq!(parent.comment.replies.len(), texts.len());
        for id in &reply_ids {
            assert!(
                parent.comment.replies.iter().any(|reply| &reply.id == id),
                "reply {id} not attached to its parent"
            );
        }
    });

    step(Stage::ValidateDb, || {
        let expected = i64::try_from(texts.len()).expect("small count");
        let replies = CountQuery::replies_to(&handle.comment_id);
        assert_count(session.sql(), &replies, expected);
        for id in &reply_ids {
            let row = comment_row(session, id);
            assert_eq!(row.parent_id.as_ref(), Some(&handle.comment_id));
        }
    });
}

#[rstest]
#[case::single_char("A".to_owned(), Some(KnownIssue::DocIssue))]
#[case::max_len("B".repeat(REPLY_MAX_LEN), None)]
fn reply_comment_text_boundary_valid(
    live: Option<&'static Session>,
    #[case] text: String,
    #[case] issue: Option<KnownIssue>,
) {
    let Some(session) = live else { return };
    if let Some(known) = issue {
        known_issue(known, "single-character reply is accepted");
    }
    let handle = comment_fixture(session);

    let payload = ReplyComment::new(text.as_str());
    let reply = reply_ok(session, &handle.token, &handle.comment_id, &payload);

    step(Stage::ValidateDb, || {
        let row = comment_row(session, &reply.id);
        assert_eq!(row.text, text);
        assert_eq!(reply.text, row.text);
    });
}

#[rstest]
#[case::too_short(String::new())]
#[case::too_long("C".repeat(REPLY_MAX_LEN + 1))]
fn reply_comment_boundary_invalid(live: Option<&'static Session>, #[case] text: String) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    assert_reply_rejected(
        session,
        &handle.token,
        &handle.comment_id,
        CountQuery::replies_to(&handle.comment_id),
        &ReplyComment::new(text),
        &["validation error"],
    );
}

#[rstest]
fn reply_comment_invalid_token(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    assert_reply_rejected(
        session,
        "invalid.token.value",
        &handle.comment_id,
        CountQuery::replies_to(&handle.comment_id),
        &ReplyComment::new("Test text"),
        &["access denied"],
    );

    let replies = CountSnapshot::take(session.sql(), CountQuery::replies_to(&handle.comment_id));
    let anonymous = step(Stage::Execute, || {
        require(
            unauthenticated(
                session.http(),
                Endpoint::ReplyComment,
                Some(&handle.comment_id),
                Query::new(),
            ),
            "reply without token",
        )
    });
    step(Stage::ValidateApi, || {
        let body: Value = serde_json::from_str(&anonymous.raw.body).expect("JSON body");
        assert_access_denied_raw(&body);
    });
    step(Stage::ValidateDb, || {
        replies.assert_unchanged(session.sql(), "anonymous reply was stored");
    });
}

#[rstest]
#[case::unknown_uuid(Uuid::new_v4().to_string())]
#[case::numeric("123".to_owned())]
#[case::word("abc".to_owned())]
#[case::empty(String::new())]
#[case::symbols("!@#".to_owned())]
fn reply_comment_invalid_parent_id(live: Option<&'static Session>, #[case] parent_id: String) {
    let Some(session) = live else { return };
    let token = module_token(session);
    assert_reply_rejected(
        session,
        &token,
        &parent_id,
        Table::Comments.all(),
        &ReplyComment::new("Trying to reply to invalid parentCommentId"),
        &["parent comment not found", "an error occurred"],
    );
}

#[rstest]
#[case::missing_text(json!({}))]
#[case::text_null(json!({"text": null}))]
#[case::text_object(json!({"text": {}}))]
#[case::text_list(json!({"text": []}))]
fn reply_comment_invalid_body(live: Option<&'static Session>, #[case] payload: Value) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    assert_reply_rejected(
        session,
        &handle.token,
        &handle.comment_id,
        CountQuery::replies_to(&handle.comment_id),
        &RawPayload::new(payload),
        &["an error occurred"],
    );
}

#[rstest]
fn reply_comment_rejects_hostile_text(
    live: Option<&'static Session>,
    #[values(
        XSS_SCRIPT_TAG,
        XSS_IMG_ONERROR,
        XSS_SVG_SCRIPT,
        SQLI_DROP_TABLE,
        SQLI_OR_TAUTOLOGY,
        SQLI_QUOTED_TAUTOLOGY,
        SQLI_COMMENT_OUT
    )]
    text: &str,
) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    assert_reply_rejected(
        session,
        &handle.token,
        &handle.comment_id,
        CountQuery::replies_to(&handle.comment_id),
        &ReplyComment::new(text),
        &["access denied"],
    );
}

#[rstest]
fn reply_comment_with_unexpected_fields(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    let text = "Reply with extra fields";
    let payload = RawPayload::new(json!({
        "text": text,
        "foo": "bar",
        "id": 123,
        "extra": {"a": 1, "b": [1, 2, 3]},
    }));

    let reply = reply_ok(session, &handle.token, &handle.comment_id, &payload);

    step(Stage::ValidateDb, || {
        let rows: Vec<DbComment> = fetch_exact(
            session.sql(),
            queries::COMMENT_BY_ID,
            &[&reply.id],
            1,
            "reply with extra fields",
        );
        assert!(rows.iter().all(|row| row.text == text && row.id == reply.id));
    });
}

#[rstest]
fn reply_comment_banned_account(
    live: Option<&'static Session>,
    #[values(BannedAccount::User, BannedAccount::Admin)] account: BannedAccount,
) {
    let Some(session) = live else { return };
    let handle = comment_fixture(session);
    let banned = step(Stage::Prepare, || {
        require(session.banned_token(account), "banned token")
    });
    assert_reply_rejected(
        session,
        &banned,
        &handle.comment_id,
        CountQuery::replies_to(&handle.comment_id),
        &ReplyComment::random(),
        &["user is banned"],
    );
}
