//! Token codec tests
//!
//! Round-trip, tamper, and expiry behavior of the signed identity token

use exam_system::auth::jwt::{Claims, JwtService};
use exam_system::error::AppError;
use exam_system::models::user::{Role, User};

const SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

fn service() -> JwtService {
    JwtService::new(SECRET, 3600)
}

fn sample_user(role: Role) -> User {
    User {
        id: 42,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        password_hash: "unused".to_string(),
        role,
        created_at: chrono::Utc::now(),
    }
}

/// Replace one character of a token section with a different one
fn flip_char(s: &str, idx: usize) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

#[test]
fn test_round_trip_preserves_claim() {
    let service = service();
    let user = sample_user(Role::Student);

    let token = service.issue_token(&user).unwrap();
    let claims = service.verify_token(&token).unwrap();

    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.name, user.name);
    assert_eq!(claims.role, Role::Student);
    assert!(claims.exp - claims.iat == 3600);
}

#[test]
fn test_tampered_payload_is_rejected() {
    let service = service();
    let token = service.issue_token(&sample_user(Role::Student)).unwrap();

    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);

    // Flip one byte in the middle of the payload
    let tampered_payload = flip_char(parts[1], parts[1].len() / 2);
    let tampered = format!("{}.{}.{}", parts[0], tampered_payload, parts[2]);

    assert!(matches!(
        service.verify_token(&tampered),
        Err(AppError::Unauthorized)
    ));
}

#[test]
fn test_tampered_signature_is_rejected() {
    let service = service();
    let token = service.issue_token(&sample_user(Role::Admin)).unwrap();

    let parts: Vec<&str> = token.split('.').collect();
    let tampered_sig = flip_char(parts[2], parts[2].len() / 2);
    let tampered = format!("{}.{}.{}", parts[0], parts[1], tampered_sig);

    assert!(matches!(
        service.verify_token(&tampered),
        Err(AppError::Unauthorized)
    ));
}

#[test]
fn test_expired_token_fails_even_with_valid_signature() {
    let service = service();

    // Hand-encode a claim whose expiry is well past the validation leeway,
    // signed with the correct secret
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "42".to_string(),
        email: "alice@example.com".to_string(),
        name: "Alice".to_string(),
        role: Role::Student,
        iat: now - 7200,
        exp: now - 3600,
    };

    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(matches!(
        service.verify_token(&token),
        Err(AppError::TokenExpired)
    ));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let issuer = JwtService::new(SECRET, 3600);
    let verifier = JwtService::new("another-secret-key-also-32-chars-long!", 3600);

    let token = issuer.issue_token(&sample_user(Role::Admin)).unwrap();

    assert!(matches!(
        verifier.verify_token(&token),
        Err(AppError::Unauthorized)
    ));
}

#[test]
fn test_malformed_token_is_rejected() {
    let service = service();

    assert!(matches!(
        service.verify_token("not.a.jwt"),
        Err(AppError::Unauthorized)
    ));
    assert!(matches!(
        service.verify_token(""),
        Err(AppError::Unauthorized)
    ));
}

#[test]
fn test_unknown_role_in_claim_is_rejected() {
    // A signed token whose role is outside the closed enum must fail to
    // decode, even though the signature is valid
    #[derive(serde::Serialize)]
    struct RawClaims {
        sub: String,
        email: String,
        name: String,
        role: String,
        iat: i64,
        exp: i64,
    }

    let now = chrono::Utc::now().timestamp();
    let raw = RawClaims {
        sub: "42".to_string(),
        email: "alice@example.com".to_string(),
        name: "Alice".to_string(),
        role: "superuser".to_string(),
        iat: now,
        exp: now + 3600,
    };

    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &raw,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(matches!(
        service().verify_token(&token),
        Err(AppError::Unauthorized)
    ));
}
