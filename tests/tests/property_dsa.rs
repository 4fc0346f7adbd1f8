//! Property-based tests for DSA signing and verification

use std::sync::Arc;

use dsacrypt_algorithms::{HashId, Seed};
use dsacrypt_api::SignatureBytes;
use dsacrypt_sign::traditional::dsa::{
    generate_key_pair, sign, verify, DomainParameters, DsaSignature, KeyUsage, PrivateKey,
    PublicKey,
};
use num_bigint_dig::BigUint;
use once_cell::sync::Lazy;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// 512/160 SHA-1 domain shared by every case
static DOMAIN: Lazy<Arc<DomainParameters>> = Lazy::new(|| {
    let seed = Seed::new(hex::decode("c8e5a93b17d04f6e2a9b58c3d1f07e64b2a5c938").unwrap()).unwrap();
    DomainParameters::generate_from_seed(512, 160, HashId::Sha1, &seed).unwrap()
});

static KEYS: Lazy<(PrivateKey, PublicKey)> = Lazy::new(|| {
    let mut rng = ChaCha20Rng::seed_from_u64(512);
    generate_key_pair(&DOMAIN, true, &[KeyUsage::Sign, KeyUsage::Verify], &mut rng).unwrap()
});

fn hash_id() -> impl Strategy<Value = HashId> {
    prop::sample::select(HashId::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn signatures_verify_and_detect_tampering(
        message in prop::collection::vec(any::<u8>(), 1..=256),
        flip in any::<prop::sample::Index>(),
        bit in 0u8..8,
        hash in hash_id(),
        rng_seed in any::<u64>()
    ) {
        let (private_key, public_key) = &*KEYS;
        let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);

        let signature = sign(private_key, &message, hash, None, &mut rng).unwrap();
        prop_assert!(verify(public_key, &message, hash, &signature).unwrap());

        let mut tampered = message.clone();
        let i = flip.index(tampered.len());
        tampered[i] ^= 1 << bit;
        prop_assert!(!verify(public_key, &tampered, hash, &signature).unwrap());
    }

    #[test]
    fn flipping_a_signature_bit_fails_verification(
        message in prop::collection::vec(any::<u8>(), 0..=64),
        in_s in any::<bool>(),
        bit in 0usize..160,
        rng_seed in any::<u64>()
    ) {
        let (private_key, public_key) = &*KEYS;
        let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
        let signature = sign(private_key, &message, HashId::Sha1, None, &mut rng).unwrap();

        // r || s as two 20-byte halves
        let mut bytes = signature.to_fixed_bytes(20).unwrap();
        let offset = if in_s { 20 } else { 0 };
        bytes[offset + bit / 8] ^= 1 << (bit % 8);
        let tampered = DsaSignature::from_bytes(&bytes).unwrap();

        prop_assert_ne!(&tampered, &signature);
        prop_assert_eq!(verify(public_key, &message, HashId::Sha1, &tampered), Ok(false));
    }

    #[test]
    fn fixed_k_signatures_are_deterministic(
        message in prop::collection::vec(any::<u8>(), 0..=64),
        k_bytes in prop::collection::vec(any::<u8>(), 1..=19)
    ) {
        let (private_key, public_key) = &*KEYS;
        let k = BigUint::from_bytes_be(&k_bytes);
        prop_assume!(k > BigUint::from(0u8));

        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let first = sign(private_key, &message, HashId::Sha1, Some(&k), &mut rng).unwrap();
        let second = sign(private_key, &message, HashId::Sha1, Some(&k), &mut rng).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert!(verify(public_key, &message, HashId::Sha1, &first).unwrap());
    }

    #[test]
    fn signature_bytes_roundtrip(
        r_bytes in prop::collection::vec(any::<u8>(), 1..=20),
        s_bytes in prop::collection::vec(any::<u8>(), 1..=20)
    ) {
        let signature = DsaSignature::new(
            BigUint::from_bytes_be(&r_bytes),
            BigUint::from_bytes_be(&s_bytes),
        );

        let decoded = DsaSignature::from_bytes(&signature.to_fixed_bytes(20).unwrap()).unwrap();
        prop_assert_eq!(decoded, signature);
    }

    #[test]
    fn out_of_range_signatures_are_rejected(
        message in prop::collection::vec(any::<u8>(), 0..=64),
        extra in prop::collection::vec(any::<u8>(), 0..=8)
    ) {
        let (_, public_key) = &*KEYS;
        let q = DOMAIN.q();

        // r >= q
        let r = q + BigUint::from_bytes_be(&extra);
        let signature = DsaSignature::new(r, BigUint::from(1u8));
        prop_assert!(!verify(public_key, &message, HashId::Sha1, &signature).unwrap());
    }
}
