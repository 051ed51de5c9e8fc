//! # Lifecycle Waiter Tests
//!
//! Drives the state waiter against a scripted in-memory store, checking the
//! exact number of polls issued for each outcome. Time is paused, so the
//! poll intervals resolve instantly and deterministically.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use secrets_manager_client::client::requests::{
    SecretAction, SecretMetadataPatch, SecretPrototype, SecretVersionMetadataPatch,
    SecretVersionPrototype,
};
use secrets_manager_client::client::responses::{Secret, SecretMaterial, SecretVersion};
use secrets_manager_client::error::StoreError;
use secrets_manager_client::store::SecretStore;
use secrets_manager_client::waiter::{StateWaiter, WaitError};
use secrets_manager_client::SecretState;

const SECRET_ID: &str = "b49ad24d-81d4-5ebc-b9b9-b0937d1c84d5";

/// Store stub that replays a fixed sequence of get-secret outcomes
struct ScriptedStore {
    script: Mutex<VecDeque<Result<Secret, StoreError>>>,
    calls: AtomicUsize,
}

impl ScriptedStore {
    fn new(script: Vec<Result<Secret, StoreError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for ScriptedStore {
    async fn get_secret(&self, _secret_id: &str) -> Result<Secret, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("waiter polled past the end of the script")
    }

    async fn create_secret(&self, _prototype: &SecretPrototype) -> Result<Secret, StoreError> {
        unimplemented!("not exercised by waiter tests")
    }

    async fn update_secret_metadata(
        &self,
        _secret_id: &str,
        _patch: &SecretMetadataPatch,
    ) -> Result<Secret, StoreError> {
        unimplemented!("not exercised by waiter tests")
    }

    async fn create_secret_version(
        &self,
        _secret_id: &str,
        _prototype: &SecretVersionPrototype,
    ) -> Result<SecretVersion, StoreError> {
        unimplemented!("not exercised by waiter tests")
    }

    async fn update_secret_version_metadata(
        &self,
        _secret_id: &str,
        _version_id: &str,
        _patch: &SecretVersionMetadataPatch,
    ) -> Result<SecretVersion, StoreError> {
        unimplemented!("not exercised by waiter tests")
    }

    async fn delete_secret(&self, _secret_id: &str) -> Result<(), StoreError> {
        unimplemented!("not exercised by waiter tests")
    }

    async fn create_secret_action(
        &self,
        _secret_id: &str,
        _action: &SecretAction,
    ) -> Result<(), StoreError> {
        unimplemented!("not exercised by waiter tests")
    }
}

fn secret_in_state(state: SecretState) -> Secret {
    Secret {
        id: SECRET_ID.to_string(),
        name: "example".to_string(),
        description: None,
        secret_group_id: None,
        labels: Vec::new(),
        state: state.code(),
        state_description: state,
        crn: None,
        created_by: None,
        created_at: None,
        updated_at: None,
        versions_total: None,
        rotation: None,
        material: SecretMaterial::Arbitrary {
            payload: None,
            expiration_date: None,
        },
    }
}

fn not_found() -> StoreError {
    StoreError::NotFound {
        id: SECRET_ID.to_string(),
    }
}

fn fast_waiter() -> StateWaiter {
    StateWaiter::until_active()
        .poll_interval(Duration::from_secs(1))
        .timeout(Duration::from_secs(60))
}

#[tokio::test(start_paused = true)]
async fn test_pending_then_active_succeeds() {
    let store = ScriptedStore::new(vec![
        Ok(secret_in_state(SecretState::PreActivation)),
        Ok(secret_in_state(SecretState::PreActivation)),
        Ok(secret_in_state(SecretState::Active)),
    ]);

    let secret = fast_waiter().wait(&store, SECRET_ID).await.unwrap();

    assert_eq!(secret.state_description, SecretState::Active);
    // one poll per pending observation, plus the terminal one
    assert_eq!(store.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_destroyed_fails_immediately() {
    let store = ScriptedStore::new(vec![
        Ok(secret_in_state(SecretState::PreActivation)),
        Ok(secret_in_state(SecretState::Destroyed)),
    ]);

    let err = fast_waiter().wait(&store, SECRET_ID).await.unwrap_err();

    assert!(matches!(
        err,
        WaitError::FailureState {
            state: SecretState::Destroyed,
            ..
        }
    ));
    assert!(err.to_string().contains("destroyed"));
    assert_eq!(store.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_not_found_fatal_on_first_poll() {
    // the trailing entry proves no further polls happen after the 404
    let store = ScriptedStore::new(vec![
        Err(not_found()),
        Ok(secret_in_state(SecretState::Active)),
    ]);

    let err = fast_waiter().wait(&store, SECRET_ID).await.unwrap_err();

    assert!(matches!(err, WaitError::Gone { .. }));
    assert_eq!(store.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_not_found_fatal_mid_wait() {
    let store = ScriptedStore::new(vec![
        Ok(secret_in_state(SecretState::PreActivation)),
        Err(not_found()),
    ]);

    let err = fast_waiter().wait(&store, SECRET_ID).await.unwrap_err();

    assert!(matches!(err, WaitError::Gone { .. }));
    assert_eq!(store.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_after_exactly_two_polls() {
    // 2-interval deadline at 1-interval spacing: the third poll would land
    // on the deadline, so the wait must give up after the second
    let store = ScriptedStore::new(vec![
        Ok(secret_in_state(SecretState::PreActivation)),
        Ok(secret_in_state(SecretState::PreActivation)),
        Ok(secret_in_state(SecretState::Active)),
    ]);
    let waiter = StateWaiter::until_active()
        .poll_interval(Duration::from_secs(1))
        .timeout(Duration::from_secs(2));

    let err = waiter.wait(&store, SECRET_ID).await.unwrap_err();

    assert!(matches!(err, WaitError::Timeout { .. }));
    assert!(err.to_string().contains("active"));
    assert!(err.to_string().contains("pre_activation"));
    assert_eq!(store.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_other_store_errors_propagate_unretried() {
    let store = ScriptedStore::new(vec![Err(StoreError::Api {
        status: 500,
        message: "internal error".to_string(),
    })]);

    let err = fast_waiter().wait(&store, SECRET_ID).await.unwrap_err();

    match err {
        WaitError::Store(StoreError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected propagated API error, got: {other}"),
    }
    assert_eq!(store.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_dns_order_settles_in_pre_activation() {
    // manual-DNS public certificates do not auto-advance; creation is done
    // once the secret is observable in pre_activation
    let store = ScriptedStore::new(vec![Ok(secret_in_state(SecretState::PreActivation))]);
    let waiter = StateWaiter::until_ordered().poll_interval(Duration::from_secs(1));

    let secret = waiter.wait(&store, SECRET_ID).await.unwrap();

    assert_eq!(secret.state_description, SecretState::PreActivation);
    assert_eq!(store.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unlisted_state_is_treated_as_pending() {
    let store = ScriptedStore::new(vec![
        Ok(secret_in_state(SecretState::Suspended)),
        Ok(secret_in_state(SecretState::Active)),
    ]);

    let secret = fast_waiter().wait(&store, SECRET_ID).await.unwrap();

    assert_eq!(secret.state_description, SecretState::Active);
    assert_eq!(store.calls(), 2);
}
