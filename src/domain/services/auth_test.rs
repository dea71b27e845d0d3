use super::AuthState;
use crate::domain::models::UserIdentity;

fn identity() -> UserIdentity {
    return UserIdentity {
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    };
}

// One test for the whole lifecycle: the store is process-wide state and
// parallel test threads would observe each other's writes.
#[test]
fn it_tracks_the_signed_in_identity_lifecycle() {
    assert!(AuthState::current().is_none());
    assert!(AuthState::require().is_err());

    AuthState::sign_in(identity());
    assert_eq!(AuthState::current(), Some(identity()));
    assert_eq!(AuthState::require().unwrap().email, "ada@example.com");
    assert_eq!(AuthState::require().unwrap().display_name(), "Ada Lovelace");

    AuthState::sign_out();
    assert!(AuthState::current().is_none());
}
