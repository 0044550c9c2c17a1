//! Admin lookup, ban and unban scenarios.
//!
//! Scenarios that ban someone always create their own target. The session
//! admin is never banned.

use blog_api_suite::api::unauthenticated;
use blog_api_suite::assertions::{
    assert_api_error, assert_api_success, assert_user_not_created, error_matches, fetch_exact,
    fetch_single, fetch_single_user,
};
use blog_api_suite::db::{DbUser, queries};
use blog_api_suite::fixtures::Session;
use blog_api_suite::routes::Endpoint;
use blog_api_suite::telemetry::{Stage, step};
use blog_api_suite::transport::Query;
use chrono::{DateTime, Utc};
use rstest::rstest;
use test_data::RegisterUser;

mod support;

use support::{live, module_token, require};

const BAN_SECONDS: u64 = 60;
const MISSING_USER_ID: i64 = 999_999;

/// One of the four admin operations, for authorisation checks.
#[derive(Debug, Clone, Copy)]
enum AdminCall {
    ProfileById,
    ProfileByEmail,
    Ban,
    Unban,
}

impl AdminCall {
    const fn endpoint(self) -> Endpoint {
        match self {
            Self::ProfileById => Endpoint::AdminUserById,
            Self::ProfileByEmail => Endpoint::AdminUserByEmail,
            Self::Ban => Endpoint::BanUser,
            Self::Unban => Endpoint::UnbanUser,
        }
    }

    /// Sends the call and returns the error text, or `None` on success.
    fn error_text(
        self,
        session: &Session,
        target: &RegisterUser,
        target_id: i64,
        token: Option<&str>,
    ) -> Option<String> {
        let id = target_id.to_string();
        let Some(bearer) = token else {
            let (param, query) = match self {
                Self::ProfileById => (id.as_str(), Query::new()),
                Self::Ban => (target.email(), Query::new().param("forSeconds", BAN_SECONDS)),
                Self::ProfileByEmail | Self::Unban => (target.email(), Query::new()),
            };
            let exchange = require(
                unauthenticated(session.http(), self.endpoint(), Some(param), query),
                "anonymous admin call",
            );
            return exchange.response.error().map(|err| err.error.clone());
        };
        let admin = session.admin();
        let error = match self {
            Self::ProfileById => require(admin.user_by_id(bearer, &id), "user by id")
                .error()
                .cloned(),
            Self::ProfileByEmail => require(admin.user_by_email(bearer, target.email()), "by email")
                .error()
                .cloned(),
            Self::Ban => require(admin.ban(bearer, target.email(), BAN_SECONDS), "ban")
                .error()
                .cloned(),
            Self::Unban => require(admin.unban(bearer, target.email()), "unban")
                .error()
                .cloned(),
        };
        error.map(|err| err.error)
    }
}

fn user_by_id(session: &Session, id: i64) -> DbUser {
    fetch_single(session.sql(), queries::USER_BY_ID, &[&id], &format!("user {id}"))
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .unwrap_or_else(|err| panic!("bannedUntil {raw:?} is not RFC 3339: {err}"))
        .with_timezone(&Utc)
}

// -----------------------------------------------------------------------------
// Positive
// -----------------------------------------------------------------------------

#[rstest]
fn get_user_profile_by_id(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    let (user, user_id) = step(Stage::Prepare, || {
        require(session.created_user_with_id(), "user with id")
    });

    let response = step(Stage::Execute, || {
        require(session.admin().user_by_id(&admin_token, user_id), "user by id")
    });

    let profile = step(Stage::ValidateApi, || {
        let profile = assert_api_success(&response).response_data.clone();
        assert_eq!(profile.id, user_id);
        assert_eq!(profile.username, user.username());
        assert_eq!(profile.email, user.email());
        profile
    });

    step(Stage::ValidateDb, || {
        let db_user = user_by_id(session, user_id);
        assert_eq!(db_user.id, profile.id);
        assert_eq!(db_user.username, profile.username);
        assert_eq!(db_user.email, profile.email);
    });
}

#[rstest]
fn get_user_profile_by_email(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    let user = step(Stage::Prepare, || require(session.create_user(), "create user").payload);

    let response = step(Stage::Execute, || {
        require(
            session.admin().user_by_email(&admin_token, user.email()),
            "user by email",
        )
    });

    let profile = step(Stage::ValidateApi, || {
        let profile = assert_api_success(&response).response_data.clone();
        assert_eq!(profile.email, user.email());
        assert_eq!(profile.username, user.username());
        profile
    });

    step(Stage::ValidateDb, || {
        let db_user = fetch_single_user(session.sql(), user.email(), None);
        assert_eq!(db_user.email, profile.email);
        assert_eq!(db_user.username, profile.username);
    });
}

#[rstest]
fn ban_user(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    let user = step(Stage::Prepare, || require(session.create_user(), "create user").payload);

    let response = step(Stage::Execute, || {
        require(
            session.admin().ban(&admin_token, user.email(), BAN_SECONDS),
            "ban",
        )
    });

    let banned_until = step(Stage::ValidateApi, || {
        let envelope = assert_api_success(&response);
        assert_eq!(envelope.message, "User banned");
        assert!(
            !envelope.response_data.banned_until.is_empty(),
            "bannedUntil missing in {envelope:?}"
        );
        parse_timestamp(&envelope.response_data.banned_until)
    });

    step(Stage::ValidateDb, || {
        let db_user = fetch_single_user(session.sql(), user.email(), None);
        assert_eq!(
            db_user.banned_until,
            Some(banned_until),
            "API bannedUntil must match the database"
        );
    });
}

#[rstest]
fn ban_already_banned_user(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    let (user, first, first_db) = step(Stage::Prepare, || {
        let user = require(session.create_user(), "create user").payload;
        let banned = require(session.admin().ban(&admin_token, user.email(), 600), "first ban");
        let first = assert_api_success(&banned).response_data.banned_until.clone();
        let first_db = fetch_single_user(session.sql(), user.email(), None)
            .banned_until
            .expect("first ban should set banned_until");
        (user, first, first_db)
    });

    let second = step(Stage::Execute, || {
        require(
            session.admin().ban(&admin_token, user.email(), BAN_SECONDS),
            "second ban",
        )
    });

    step(Stage::ValidateApi, || {
        let envelope = assert_api_success(&second);
        assert_ne!(
            envelope.response_data.banned_until, first,
            "bannedUntil did not change"
        );
    });

    step(Stage::ValidateDb, || {
        let second_db = fetch_single_user(session.sql(), user.email(), None)
            .banned_until
            .expect("second ban should keep banned_until set");
        assert_ne!(second_db, first_db, "banned_until did not change");
    });
}

#[rstest]
fn ban_another_admin(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    let other = step(Stage::Prepare, || require(session.create_admin_user(), "other admin"));

    let response = step(Stage::Execute, || {
        require(
            session
                .admin()
                .ban(&admin_token, other.payload.email(), BAN_SECONDS),
            "ban admin",
        )
    });

    step(Stage::ValidateApi, || {
        assert!(!assert_api_success(&response).response_data.banned_until.is_empty());
    });
    step(Stage::ValidateDb, || {
        let db_user = fetch_single_user(session.sql(), other.payload.email(), None);
        assert!(db_user.banned_until.is_some(), "other admin should be banned");
    });
}

#[rstest]
fn unban_user(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    let user = step(Stage::Prepare, || {
        let user = require(session.create_user(), "create user").payload;
        let ban = require(
            session.admin().ban(&admin_token, user.email(), BAN_SECONDS),
            "ban",
        );
        assert_eq!(assert_api_success(&ban).message, "User banned");
        user
    });

    let response = step(Stage::Execute, || {
        require(session.admin().unban(&admin_token, user.email()), "unban")
    });

    step(Stage::ValidateApi, || {
        let envelope = assert_api_success(&response);
        assert_eq!(envelope.message, "User unbanned");
        assert_eq!(envelope.response_data.banned_until, None);
    });
    step(Stage::ValidateDb, || {
        let db_user = fetch_single_user(session.sql(), user.email(), None);
        assert_eq!(db_user.banned_until, None, "banned_until should be null");
    });
}

#[rstest]
fn admin_can_ban_self(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin = step(Stage::Prepare, || require(session.create_admin_user(), "admin"));

    let response = step(Stage::Execute, || {
        require(
            session
                .admin()
                .ban(&admin.token, admin.payload.email(), BAN_SECONDS),
            "self ban",
        )
    });

    step(Stage::ValidateApi, || {
        assert!(!assert_api_success(&response).response_data.banned_until.is_empty());
    });
    step(Stage::ValidateDb, || {
        let db_user = fetch_single_user(session.sql(), admin.payload.email(), None);
        assert!(db_user.banned_until.is_some(), "admin should be banned");
    });
}

// -----------------------------------------------------------------------------
// Authorisation
// -----------------------------------------------------------------------------

fn assert_admin_call_denied(session: &Session, call: AdminCall, token: Option<&str>) {
    let (target, target_id) = step(Stage::Prepare, || {
        require(session.created_user_with_id(), "target user")
    });
    let before = user_by_id(session, target_id).banned_until;

    let error = step(Stage::Execute, || {
        call.error_text(session, &target, target_id, token)
    });

    step(Stage::ValidateApi, || {
        let message = error.unwrap_or_else(|| panic!("{call:?} succeeded without admin rights"));
        assert!(
            error_matches(&message, &["access denied"]),
            "{call:?} failed with {message:?} instead of access denied"
        );
    });
    step(Stage::ValidateDb, || {
        assert_eq!(
            user_by_id(session, target_id).banned_until,
            before,
            "banned_until changed"
        );
    });
}

#[rstest]
fn admin_methods_without_token(
    live: Option<&'static Session>,
    #[values(
        AdminCall::ProfileById,
        AdminCall::ProfileByEmail,
        AdminCall::Ban,
        AdminCall::Unban
    )]
    call: AdminCall,
) {
    let Some(session) = live else { return };
    assert_admin_call_denied(session, call, None);
}

#[rstest]
fn admin_methods_with_user_token(
    live: Option<&'static Session>,
    #[values(
        AdminCall::ProfileById,
        AdminCall::ProfileByEmail,
        AdminCall::Ban,
        AdminCall::Unban
    )]
    call: AdminCall,
) {
    let Some(session) = live else { return };
    let user_token = module_token(session);
    assert_admin_call_denied(session, call, Some(&user_token));
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[rstest]
fn get_user_profile_with_invalid_id(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");

    let missing = step(Stage::Execute, || {
        require(
            session.admin().user_by_id(&admin_token, MISSING_USER_ID),
            "missing id",
        )
    });
    step(Stage::ValidateApi, || {
        assert_api_error(&missing, &["user not found"]);
    });
    step(Stage::ValidateDb, || {
        fetch_exact::<DbUser>(
            session.sql(),
            queries::USER_BY_ID,
            &[&MISSING_USER_ID],
            0,
            "missing user id",
        );
    });

    let malformed = step(Stage::Execute, || {
        require(session.admin().user_by_id(&admin_token, "abc"), "malformed id")
    });
    step(Stage::ValidateApi, || {
        assert_api_error(&malformed, &["an error occurred"]);
    });
}

#[rstest]
#[case::nonexistent("nonexistent_email_1337_1488_666_228@example.com")]
#[case::malformed("invalid-email")]
fn get_user_profile_by_invalid_email(live: Option<&'static Session>, #[case] email: &str) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    assert_user_not_created(session.sql(), Some(email), None, "user exists before lookup");

    let response = step(Stage::Execute, || {
        require(session.admin().user_by_email(&admin_token, email), "by email")
    });

    step(Stage::ValidateDb, || {
        assert_user_not_created(session.sql(), Some(email), None, "lookup created a user");
    });
    step(Stage::ValidateApi, || {
        assert_api_error(&response, &["user not found"]);
    });
}

#[rstest]
#[case::nonexistent("nonexistent_email_1337_1488_666_228@example.com")]
#[case::malformed("invalid-email")]
fn ban_and_unban_invalid_email(live: Option<&'static Session>, #[case] email: &str) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    assert_user_not_created(session.sql(), Some(email), None, "user exists before ban");

    let ban = step(Stage::Execute, || {
        require(session.admin().ban(&admin_token, email, BAN_SECONDS), "ban")
    });
    step(Stage::ValidateDb, || {
        assert_user_not_created(session.sql(), Some(email), None, "ban created a user");
    });
    step(Stage::ValidateApi, || assert_api_error(&ban, &["user not found"]));

    let unban = step(Stage::Execute, || {
        require(session.admin().unban(&admin_token, email), "unban")
    });
    step(Stage::ValidateDb, || {
        assert_user_not_created(session.sql(), Some(email), None, "unban created a user");
    });
    step(Stage::ValidateApi, || assert_api_error(&unban, &["user not found"]));
}

#[rstest]
fn ban_with_invalid_duration(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    let user = step(Stage::Prepare, || require(session.create_user(), "create user").payload);
    let before = fetch_single_user(session.sql(), user.email(), None).banned_until;

    let responses = step(Stage::Execute, || {
        ["-10", "0", "sixty"].map(|seconds| {
            require(
                session.admin().ban(&admin_token, user.email(), seconds),
                "ban with invalid duration",
            )
        })
    });

    step(Stage::ValidateDb, || {
        let after = fetch_single_user(session.sql(), user.email(), None).banned_until;
        assert_eq!(after, before, "banned_until changed");
    });
    step(Stage::ValidateApi, || {
        for response in &responses {
            assert_api_error(response, &["an error occurred"]);
        }
    });
}

#[rstest]
fn unban_not_banned_user(live: Option<&'static Session>) {
    let Some(session) = live else { return };
    let admin_token = require(session.admin_token(), "admin token");
    let user = step(Stage::Prepare, || {
        let user = require(session.create_user(), "create user").payload;
        let db_user = fetch_single_user(session.sql(), user.email(), None);
        assert_eq!(db_user.banned_until, None, "fresh user should not be banned");
        user
    });

    let response = step(Stage::Execute, || {
        require(session.admin().unban(&admin_token, user.email()), "unban")
    });

    step(Stage::ValidateDb, || {
        let db_user = fetch_single_user(session.sql(), user.email(), None);
        assert_eq!(db_user.banned_until, None);
    });
    step(Stage::ValidateApi, || {
        assert_api_error(&response, &["user is not banned"]);
    });
}
