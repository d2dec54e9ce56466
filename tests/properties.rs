use proptest::prelude::*;
use simple_jwt::{
	Algorithm,
	ClaimMap,
	ClaimValue,
	ErrorKind,
	HmacTokenCreator,
	HmacTokenResolver,
	TokenCreator,
	TokenPayload,
	TokenResolver,
};

fn algorithm() -> impl Strategy<Value = Algorithm> {
	prop_oneof![Just(Algorithm::HS256), Just(Algorithm::HS384), Just(Algorithm::HS512)]
}

fn claim_value() -> impl Strategy<Value = ClaimValue> {
	prop_oneof![
		Just(ClaimValue::Null),
		any::<bool>().prop_map(ClaimValue::Bool),
		any::<i64>().prop_map(ClaimValue::Integer),
		// Quarters print and parse back exactly.
		(-1_000_000i32..1_000_000).prop_map(|n| ClaimValue::Float(f64::from(n) / 4.0)),
		".{0,24}".prop_map(ClaimValue::String),
	]
}

fn custom_claims() -> impl Strategy<Value = ClaimMap> {
	prop::collection::btree_map("[a-z_]{4,12}", claim_value(), 0..8)
}

fn payload(claims: &ClaimMap) -> TokenPayload {
	claims.iter().fold(TokenPayload::new().with_subject("subject"), |payload, (name, value)| {
		payload.with_claim(name.as_str(), value.clone()).unwrap()
	})
}

fn secret(algorithm: Algorithm, seed: u8) -> Vec<u8> {
	(0..algorithm.min_secret_length()).map(|i| seed.wrapping_add(i as u8)).collect()
}

proptest! {
	#[test]
	fn custom_claims_round_trip(algorithm in algorithm(), seed in any::<u8>(), claims in custom_claims()) {
		let secret = secret(algorithm, seed);
		let creator = HmacTokenCreator::new(algorithm, "issuer", &secret).unwrap();
		let resolver = HmacTokenResolver::new(algorithm, &secret).unwrap();

		let token = creator.sign(&payload(&claims)).unwrap();
		prop_assert_eq!(resolver.payload(&token).unwrap(), claims);
	}

	#[test]
	fn signing_is_deterministic(algorithm in algorithm(), seed in any::<u8>(), claims in custom_claims()) {
		let secret = secret(algorithm, seed);
		let first = HmacTokenCreator::new(algorithm, "issuer", &secret).unwrap();
		let second = HmacTokenCreator::new(algorithm, "issuer", &secret).unwrap();
		prop_assert_eq!(first.sign(&payload(&claims)).unwrap(), second.sign(&payload(&claims)).unwrap());
	}

	#[test]
	fn tampering_is_detected(algorithm in algorithm(), claims in custom_claims(), position in any::<prop::sample::Index>(), replacement in "[A-Za-z0-9_-]") {
		let secret = secret(algorithm, 7);
		let creator = HmacTokenCreator::new(algorithm, "issuer", &secret).unwrap();
		let resolver = HmacTokenResolver::new(algorithm, &secret).unwrap();
		let token = creator.sign(&payload(&claims)).unwrap();

		// Only touch the payload and signature segments.
		let start = token.find('.').unwrap() + 1;
		let index = start + position.index(token.len() - start);
		prop_assume!(token.as_bytes()[index] != b'.');
		prop_assume!(token[index..index + 1] != replacement);

		let mut tampered = token.clone();
		tampered.replace_range(index..index + 1, &replacement);
		let error = resolver.verify(&tampered).unwrap_err();
		prop_assert!(matches!(error.kind(), ErrorKind::Verification | ErrorKind::Decode));
	}
}
