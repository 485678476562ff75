//! Proto conversion helpers
//!
//! Domain outcomes → `rpc::login` messages. Requests need no conversion: their
//! fields are passed to the domain service as-is.

use core_grpc::conversions::datetime_to_timestamp;
use domain_users::{AuthOutcome, UserPage, UserSummary};
use rpc::login::{Response as ProtoResponse, User as ProtoUser, Users as ProtoUsers};

pub fn auth_outcome_to_proto(outcome: AuthOutcome) -> ProtoResponse {
    ProtoResponse {
        success: outcome.success,
        id: if outcome.success { outcome.id } else { 0 },
    }
}

/// Mutations only report success; `id` stays zero.
pub fn success_to_proto(success: bool) -> ProtoResponse {
    ProtoResponse { success, id: 0 }
}

pub fn user_to_proto(user: UserSummary) -> ProtoUser {
    ProtoUser {
        id: user.id,
        login: user.login,
        registered_at: datetime_to_timestamp(user.registered_at),
    }
}

/// GetUsers carries no total
pub fn users_to_proto(users: Vec<UserSummary>) -> ProtoUsers {
    ProtoUsers {
        list: users.into_iter().map(user_to_proto).collect(),
        total: 0,
    }
}

pub fn page_to_proto(page: UserPage) -> ProtoUsers {
    ProtoUsers {
        list: page.list.into_iter().map(user_to_proto).collect(),
        total: page.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_rejected_outcome_has_zero_id() {
        let proto = auth_outcome_to_proto(AuthOutcome {
            success: false,
            id: 12,
        });
        assert!(!proto.success);
        assert_eq!(proto.id, 0);

        let proto = auth_outcome_to_proto(AuthOutcome::accepted(12));
        assert!(proto.success);
        assert_eq!(proto.id, 12);
    }

    #[test]
    fn test_page_to_proto() {
        let page = UserPage {
            list: vec![UserSummary {
                id: 1,
                login: "alice".to_string(),
                registered_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            }],
            total: 42,
        };

        let proto = page_to_proto(page);
        assert_eq!(proto.total, 42);
        assert_eq!(proto.list[0].login, "alice");
        assert_eq!(proto.list[0].registered_at, 1_700_000_000);
    }
}
