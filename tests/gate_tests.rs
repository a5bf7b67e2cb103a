use axum::http::StatusCode;
use campus_portal::{
    auth::IdentityProvider,
    gate::{Decision, FORBIDDEN_MESSAGE, Requirement, check, evaluate},
    models::{Principal, Role},
    routes::NamedRoute,
};
use uuid::Uuid;

// --- Test Identity ---

/// A hand-built identity so each input combination can be set directly.
struct FakeIdentity {
    authenticated: bool,
    principal: Option<Principal>,
}

impl IdentityProvider for FakeIdentity {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn current_principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

fn principal(role: Role) -> Principal {
    Principal {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role,
    }
}

fn signed_in(role: Role) -> FakeIdentity {
    FakeIdentity {
        authenticated: true,
        principal: Some(principal(role)),
    }
}

const ROLES: [Role; 2] = [Role::Administrator, Role::Student];

fn forbidden() -> Decision {
    Decision::RejectWith {
        status: StatusCode::FORBIDDEN,
        message: FORBIDDEN_MESSAGE,
    }
}

// --- Tests ---

#[test]
fn test_unauthenticated_redirects_to_login_for_every_role() {
    let anonymous = FakeIdentity {
        authenticated: false,
        principal: None,
    };
    for required in ROLES {
        assert_eq!(
            evaluate(&anonymous, required),
            Decision::RedirectTo(NamedRoute::Login)
        );
    }
}

#[test]
fn test_unauthenticated_ignores_a_stale_principal() {
    // The role check must never run without a session, even if a principal is lying around.
    for held in ROLES {
        let stale = FakeIdentity {
            authenticated: false,
            principal: Some(principal(held)),
        };
        for required in ROLES {
            assert_eq!(
                evaluate(&stale, required),
                Decision::RedirectTo(NamedRoute::Login)
            );
        }
    }
}

#[test]
fn test_matching_role_continues() {
    for role in ROLES {
        assert_eq!(evaluate(&signed_in(role), role), Decision::Continue);
    }
}

#[test]
fn test_student_is_forbidden_from_admin_gate() {
    assert_eq!(
        evaluate(&signed_in(Role::Student), Role::Administrator),
        forbidden()
    );
}

#[test]
fn test_admin_does_not_inherit_student_access() {
    assert_eq!(
        evaluate(&signed_in(Role::Administrator), Role::Student),
        forbidden()
    );
}

#[test]
fn test_forbidden_carries_403_and_message() {
    match evaluate(&signed_in(Role::Student), Role::Administrator) {
        Decision::RejectWith { status, message } => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(message, "Unauthorized access.");
        }
        other => panic!("expected RejectWith, got {other:?}"),
    }
}

#[test]
fn test_authenticated_without_principal_is_forbidden() {
    // An unrecognised stored role leaves the session without a principal.
    let unknown_role = FakeIdentity {
        authenticated: true,
        principal: None,
    };
    for required in ROLES {
        assert_eq!(evaluate(&unknown_role, required), forbidden());
    }
}

#[test]
fn test_evaluate_is_deterministic() {
    let identities = [
        FakeIdentity {
            authenticated: false,
            principal: None,
        },
        signed_in(Role::Administrator),
        signed_in(Role::Student),
        FakeIdentity {
            authenticated: true,
            principal: None,
        },
    ];

    for identity in &identities {
        for required in ROLES {
            let first = evaluate(identity, required);
            let second = evaluate(identity, required);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_check_role_requirement_matches_evaluate() {
    for held in ROLES {
        let identity = signed_in(held);
        for required in ROLES {
            assert_eq!(
                check(&identity, Requirement::Role(required)),
                evaluate(&identity, required)
            );
        }
    }
}

#[test]
fn test_check_authenticated_requirement_skips_role() {
    for role in ROLES {
        assert!(check(&signed_in(role), Requirement::Authenticated).is_continue());
    }

    let unknown_role = FakeIdentity {
        authenticated: true,
        principal: None,
    };
    assert!(check(&unknown_role, Requirement::Authenticated).is_continue());

    let anonymous = FakeIdentity {
        authenticated: false,
        principal: None,
    };
    assert_eq!(
        check(&anonymous, Requirement::Authenticated),
        Decision::RedirectTo(NamedRoute::Login)
    );
}
