use chrono::{TimeZone, Utc};
use std::sync::Arc;
use wallet_core::{
    account::Registration, clock::ManualClock, config::WalletConfig, error::WalletError,
    service::WalletService,
};

// ── Test helpers ────────────────────────────────────────────────────────────

fn make_service() -> WalletService {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    ));
    WalletService::in_memory(WalletConfig::default(), clock).unwrap()
}

fn register(service: &WalletService, email: &str, phone: &str) -> String {
    service
        .register(&Registration {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: phone.into(),
            password: "s3cret".into(),
            referrer_id: None,
        })
        .unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Registration with a referrer links the new account and credits the
/// referrer exactly once: count +1, balance +1000.
#[test]
fn referral_at_registration_credits_referrer() {
    let service = make_service();
    let referrer = register(&service, "ref@example.com", "555-0001");

    let new_id = service
        .register(&Registration {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            phone: "555-0002".into(),
            password: "pw".into(),
            referrer_id: Some(referrer.clone()),
        })
        .unwrap();

    let new_account = service.account(&new_id).unwrap();
    assert_eq!(new_account.referred_by.as_deref(), Some(referrer.as_str()));

    let ref_account = service.account(&referrer).unwrap();
    assert_eq!(ref_account.referrals_count, 1);
    assert_eq!(ref_account.balance, 1000.0);
}

/// An unknown referrer fails the registration and no account is created.
#[test]
fn unknown_referrer_fails_registration() {
    let service = make_service();

    let err = service
        .register(&Registration {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            phone: "555-0002".into(),
            password: "pw".into(),
            referrer_id: Some("no-such-account".into()),
        })
        .unwrap_err();

    assert!(matches!(err, WalletError::NotFound(_)), "got {err:?}");
    assert_eq!(service.store().account_count().unwrap(), 0);
}

/// The standalone referral operation succeeds once; a second attempt for
/// the same target fails and leaves every counter untouched.
#[test]
fn second_referral_for_same_target_is_rejected() {
    let service = make_service();
    let referrer = register(&service, "ref@example.com", "555-0001");
    let other = register(&service, "other@example.com", "555-0002");
    let target = register(&service, "target@example.com", "555-0003");

    service.link_referral(&target, &referrer).unwrap();
    let err = service.link_referral(&target, &other).unwrap_err();
    assert!(matches!(err, WalletError::AlreadyReferred(_)), "got {err:?}");

    let ref_account = service.account(&referrer).unwrap();
    assert_eq!(ref_account.referrals_count, 1);
    assert_eq!(ref_account.balance, 1000.0);

    let other_account = service.account(&other).unwrap();
    assert_eq!(other_account.referrals_count, 0);
    assert_eq!(other_account.balance, 0.0);

    // The original linkage stands.
    let target_account = service.account(&target).unwrap();
    assert_eq!(target_account.referred_by, Some(referrer));
}

/// Linking to a referrer that does not exist fails with NotFound and
/// leaves the target unlinked.
#[test]
fn referral_requires_existing_referrer() {
    let service = make_service();
    let target = register(&service, "target@example.com", "555-0003");

    let err = service.link_referral(&target, "ghost").unwrap_err();
    assert!(matches!(err, WalletError::NotFound(_)), "got {err:?}");
    assert_eq!(service.account(&target).unwrap().referred_by, None);
}

/// Linking an unknown target fails with NotFound.
#[test]
fn referral_requires_existing_target() {
    let service = make_service();
    let referrer = register(&service, "ref@example.com", "555-0001");

    let err = service.link_referral("ghost", &referrer).unwrap_err();
    assert!(matches!(err, WalletError::NotFound(_)), "got {err:?}");
}
