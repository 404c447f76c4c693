//! End-to-end authentication scenarios: an honest prover through all five
//! rounds, a prover with the wrong seed, and the session-store lifecycle
//! around them.

use chrono::Duration;
use rand::rngs::OsRng;

use giza_auth::{
    complete_handshake, register, start_handshake, Prover, SessionStore, VerifierSession,
    MAX_ROUNDS,
};
use giza_core::{SessionError, SessionId};
use giza_crypto::{EcdhSession, KeyPair};
use giza_graph::derive_secret_graph;

/// Drive one full round between a prover and its verifier session,
/// returning the round outcome.
fn play_round(
    prover: &mut Prover,
    store: &mut SessionStore<VerifierSession>,
    id: &SessionId,
) -> giza_auth::RoundOutcome {
    let commitment = prover.commit(&mut OsRng).unwrap();
    let session = store.get_mut(id).unwrap();
    let challenge = session.challenge(commitment.graph, &mut OsRng).unwrap();
    let response = prover.respond(challenge).unwrap();
    let session = store.get_mut(id).unwrap();
    session
        .verify_response(&response.original, &response.permutation, challenge)
        .unwrap()
}

#[test]
fn honest_prover_authenticates_in_five_rounds() {
    let keypair = KeyPair::generate().unwrap();
    let record = register(b"abc", 8, &keypair);

    let mut store = SessionStore::new(Duration::minutes(5));
    let id = SessionId::new();
    store.insert(
        id.clone(),
        VerifierSession::new(id.clone(), record.graph_commitment_hash, 8),
    );

    let mut prover = Prover::from_seed(b"abc", 8);
    for round in 0..MAX_ROUNDS {
        let outcome = play_round(&mut prover, &mut store, &id);
        assert!(outcome.round_valid, "round {round} should verify");
        assert_eq!(outcome.rounds_remaining, MAX_ROUNDS - round - 1);
    }

    let session = store.get_mut(&id).unwrap();
    let completion = session.completion();
    assert!(completion.complete);
    assert!(completion.authenticated);
}

#[test]
fn wrong_seed_prover_is_rejected() {
    let keypair = KeyPair::generate().unwrap();
    let record = register(b"abc", 8, &keypair);

    let mut store = SessionStore::new(Duration::minutes(5));
    let id = SessionId::new();
    store.insert(
        id.clone(),
        VerifierSession::new(id.clone(), record.graph_commitment_hash, 8),
    );

    // The impostor derives a different secret graph, so its revealed
    // original never hashes to the registered commitment.
    let mut impostor = Prover::from_seed(b"not the seed", 8);
    let mut any_failed = false;
    for _ in 0..MAX_ROUNDS {
        let outcome = play_round(&mut impostor, &mut store, &id);
        any_failed |= !outcome.round_valid;
    }
    assert!(any_failed);

    let session = store.get_mut(&id).unwrap();
    let completion = session.completion();
    assert!(completion.complete);
    assert!(!completion.authenticated);
}

#[test]
fn failed_round_never_aborts_the_session() {
    let record_hash = derive_secret_graph(b"abc", 8).commitment_hash();
    let mut store = SessionStore::new(Duration::minutes(5));
    let id = SessionId::new();
    store.insert(
        id.clone(),
        VerifierSession::new(id.clone(), record_hash, 8),
    );

    let mut impostor = Prover::from_seed(b"impostor", 8);
    // Every round is accepted as a message exchange even though the
    // session is doomed after the first failure.
    for _ in 0..MAX_ROUNDS {
        play_round(&mut impostor, &mut store, &id);
    }
    assert!(store.get_mut(&id).unwrap().is_complete());
}

#[test]
fn unknown_session_id_is_a_hard_error() {
    let mut store: SessionStore<VerifierSession> = SessionStore::new(Duration::minutes(5));
    assert!(matches!(
        store.get_mut(&SessionId::new()),
        Err(SessionError::NotFound(_))
    ));
}

#[test]
fn expired_session_forces_a_restart() {
    let record_hash = derive_secret_graph(b"abc", 8).commitment_hash();
    let mut store = SessionStore::new(Duration::seconds(-1));
    let id = SessionId::new();
    store.insert(
        id.clone(),
        VerifierSession::new(id.clone(), record_hash, 8),
    );
    assert!(matches!(
        store.get_mut(&id),
        Err(SessionError::Expired(_))
    ));
    // The eviction happened; the id is now simply unknown.
    assert!(matches!(
        store.get_mut(&id),
        Err(SessionError::NotFound(_))
    ));
}

#[test]
fn teardown_of_one_session_leaves_others_intact() {
    let record_hash = derive_secret_graph(b"abc", 8).commitment_hash();
    let mut store = SessionStore::new(Duration::minutes(5));
    let doomed = SessionId::new();
    let healthy = SessionId::new();
    store.insert(
        doomed.clone(),
        VerifierSession::new(doomed.clone(), record_hash, 8),
    );
    store.insert(
        healthy.clone(),
        VerifierSession::new(healthy.clone(), record_hash, 8),
    );

    // Tear the first session down mid-round.
    let mut prover = Prover::from_seed(b"abc", 8);
    let commitment = prover.commit(&mut OsRng).unwrap();
    store
        .get_mut(&doomed)
        .unwrap()
        .challenge(commitment.graph, &mut OsRng)
        .unwrap();
    store.remove(&doomed);

    // The other session completes normally.
    let mut prover = Prover::from_seed(b"abc", 8);
    for _ in 0..MAX_ROUNDS {
        let outcome = play_round(&mut prover, &mut store, &healthy);
        assert!(outcome.round_valid);
    }
    assert!(store.get_mut(&healthy).unwrap().completion().authenticated);
}

#[test]
fn zkp_and_ecdh_sessions_compose() {
    // A full login: derive a confidential channel, then authenticate.
    let mut handshakes = SessionStore::new(Duration::minutes(5));
    let hs_id = SessionId::new();
    let server_pub = start_handshake(&mut handshakes, hs_id.clone()).unwrap();

    let mut client = EcdhSession::new().unwrap();
    let client_pub = client.public_key();
    let client_key = client.key_with(&server_pub).unwrap().clone();
    let server_key = complete_handshake(&mut handshakes, &hs_id, &client_pub).unwrap();
    assert_eq!(client_key, server_key);

    let record_hash = derive_secret_graph(b"login-seed", 8).commitment_hash();
    let mut sessions = SessionStore::new(Duration::minutes(5));
    let zkp_id = SessionId::new();
    sessions.insert(
        zkp_id.clone(),
        VerifierSession::new(zkp_id.clone(), record_hash, 8),
    );
    let mut prover = Prover::from_seed(b"login-seed", 8);
    for _ in 0..MAX_ROUNDS {
        assert!(play_round(&mut prover, &mut sessions, &zkp_id).round_valid);
    }
    assert!(sessions.get_mut(&zkp_id).unwrap().completion().authenticated);
}
