//! End-to-end tests through the `dsacrypt` facade

use std::sync::Arc;
use std::thread;

use dsacrypt::params::traditional::dsa::{DSA_JWK_ALG_DS160, DSA_JWK_KTY};
use dsacrypt::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const DS160_FIRSTSEED: &str = "dd2551b8043b9169b4d5a344be2e873f6d18f5ef";

fn ds160() -> Arc<DomainParameters> {
    let seed = Seed::new(hex::decode(DS160_FIRSTSEED).unwrap()).unwrap();
    DomainParameterGenerator::new(1024, 160, HashId::Sha1)
        .unwrap()
        .generate_from_seed(&seed)
        .unwrap()
}

#[test]
fn test_ds160_lifecycle() {
    let domain = ds160();
    assert_eq!(domain.algorithm_name(), "DS160");
    assert_eq!(domain.p().bits(), 1024);
    assert_eq!(domain.q().bits(), 160);

    let mut rng = ChaCha20Rng::seed_from_u64(160);
    let (private_key, public_key) =
        generate_key_pair(&domain, true, &[KeyUsage::Sign, KeyUsage::Verify], &mut rng).unwrap();

    let signature = sign(&private_key, b"lifecycle", HashId::Sha1, None, &mut rng).unwrap();
    assert!(verify(&public_key, b"lifecycle", HashId::Sha1, &signature).unwrap());

    // Fixed-width encoding survives the byte round trip
    let encoded = signature.to_fixed_bytes(20).unwrap();
    assert_eq!(encoded.len(), 40);
    let decoded = DsaSignature::from_bytes(&encoded).unwrap();
    assert!(verify(&public_key, b"lifecycle", HashId::Sha1, &decoded).unwrap());
}

#[test]
fn test_ds160_jwk_exchange() {
    let domain = ds160();
    let mut rng = ChaCha20Rng::seed_from_u64(161);
    let (private_key, public_key) =
        generate_key_pair(&domain, false, &[KeyUsage::Sign, KeyUsage::Verify], &mut rng).unwrap();

    let json = match public_key.export(ExportFormat::Jwk).unwrap() {
        ExportedKey::Jwk(jwk) => {
            assert_eq!(jwk.kty, DSA_JWK_KTY);
            assert_eq!(jwk.alg, DSA_JWK_ALG_DS160);
            assert_eq!(jwk.algorithm, "DS160");
            assert!(jwk.hash.is_none() && jwk.l.is_none() && jwk.n.is_none());
            jwk.to_json().unwrap()
        }
        other => panic!("unexpected export {:?}", other),
    };

    // The receiving side only sees JSON
    let received = PublicKey::from_jwk(&DsaJwk::from_json(&json).unwrap()).unwrap();
    assert_eq!(received.domain().algorithm_name(), "DS160");
    assert!(received.domain().verify_provenance());

    let signature = sign(&private_key, b"exchange", HashId::Sha1, None, &mut rng).unwrap();
    assert!(verify(&received, b"exchange", HashId::Sha1, &signature).unwrap());
    assert!(!verify(&received, b"exchanged", HashId::Sha1, &signature).unwrap());
}

#[test]
fn test_signature_trait_through_prelude() {
    let domain = ds160();
    let mut rng = ChaCha20Rng::seed_from_u64(162);

    let keypair = Dsa::keypair(&domain, &mut rng).unwrap();
    let public_key = Dsa::public_key(&keypair);
    let secret_key = Dsa::secret_key(&keypair);

    let signature = Dsa::sign(b"trait", &secret_key, &mut rng).unwrap();
    Dsa::verify(b"trait", &signature, &public_key).unwrap();

    match Dsa::verify(b"tampered", &signature, &public_key) {
        Err(Error::InvalidSignature { .. }) => {}
        other => panic!("unexpected verification result {:?}", other),
    }
}

#[test]
fn test_keys_shared_across_threads() {
    let domain = ds160();
    let mut rng = ChaCha20Rng::seed_from_u64(163);
    let (private_key, public_key) =
        generate_key_pair(&domain, true, &[KeyUsage::Sign, KeyUsage::Verify], &mut rng).unwrap();
    let private_key = Arc::new(private_key);
    let public_key = Arc::new(public_key);

    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            let private_key = Arc::clone(&private_key);
            let public_key = Arc::clone(&public_key);
            thread::spawn(move || {
                let mut rng = ChaCha20Rng::seed_from_u64(1000 + i);
                let message = format!("message {}", i);
                let signature =
                    sign(&private_key, message.as_bytes(), HashId::Sha1, None, &mut rng).unwrap();
                verify(&public_key, message.as_bytes(), HashId::Sha1, &signature).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_generation_cancelled_from_another_thread() {
    let token = CancellationToken::new();
    let worker_token = token.clone();

    let worker = thread::spawn(move || {
        let mut rng = ChaCha20Rng::seed_from_u64(3072);
        DomainParameterGenerator::new(3072, 256, HashId::Sha256)
            .unwrap()
            .with_cancellation(&worker_token)
            .generate(&mut rng)
    });
    token.cancel();

    match worker.join().unwrap() {
        Err(dsacrypt::sign::Error::Cancelled(_)) => {}
        other => panic!("expected cancellation, got {:?}", other.map(|d| d.l())),
    }
}

#[test]
fn test_provable_prime_from_random_seed() {
    let mut rng = ChaCha20Rng::seed_from_u64(256);
    let prime = ShaweTaylor::new(HashId::Sha256)
        .generate_random(256, &mut rng)
        .unwrap();

    assert_eq!(prime.prime.bits(), 256);
    assert!(num_bigint_dig::prime::probably_prime(&prime.prime, 20));
}
