use assert2::assert;
use simple_jwt::codec::{decode_base64, encode_base64};
use simple_jwt::{
	Algorithm,
	Error,
	ErrorKind,
	HmacTokenCreator,
	HmacTokenResolver,
	TokenCreator,
	TokenPayload,
	TokenResolver,
};

fn decode_segment(segment: &str) -> String {
	String::from_utf8(decode_base64(segment.as_bytes()).unwrap()).unwrap()
}

#[test]
fn sign_and_verify_onixbyte_token() {
	let secret = "a".repeat(32);
	let creator = HmacTokenCreator::new(Algorithm::HS256, "onixbyte", &secret).unwrap();
	let resolver = HmacTokenResolver::new(Algorithm::HS256, &secret).unwrap();

	let token = creator.sign(&TokenPayload::new().with_subject("user-1")).unwrap();
	let parts: Vec<&str> = token.split('.').collect();
	assert!(parts.len() == 3);
	assert!(decode_segment(parts[0]) == r#"{"alg":"HS256","typ":"JWT"}"#);
	assert!(decode_segment(parts[1]) == r#"{"iss":"onixbyte","sub":"user-1"}"#);

	assert!(let Ok(()) = resolver.verify(&token));

	// Flip the last character of the payload segment.
	let mut tampered: Vec<String> = parts.iter().map(|x| x.to_string()).collect();
	let last = tampered[1].pop().unwrap();
	tampered[1].push(if last == 'A' { 'B' } else { 'A' });
	let tampered = tampered.join(".");
	let error = resolver.verify(&tampered).unwrap_err();
	assert!(error.kind() == ErrorKind::Verification);
	assert!(let Error::InvalidSignature = error);
}

#[test]
fn key_length_is_enforced() {
	assert!(let Err(Error::WeakSecret(_)) = HmacTokenCreator::new(Algorithm::HS256, "onixbyte", [b'a'; 16]));
	assert!(let Err(Error::WeakSecret(_)) = HmacTokenResolver::new(Algorithm::HS256, [b'a'; 16]));
	assert!(let Ok(_) = HmacTokenCreator::new(Algorithm::HS256, "onixbyte", [b'a'; 32]));
	assert!(let Ok(_) = HmacTokenResolver::new(Algorithm::HS256, [b'a'; 32]));
}

#[test]
fn registered_claim_names_are_reserved() {
	let error = TokenPayload::new().with_claim("iss", "x").unwrap_err();
	assert!(error.kind() == ErrorKind::ClaimNaming);
}

#[test]
fn malformed_tokens_are_rejected() {
	let resolver = HmacTokenResolver::new(Algorithm::HS256, "a".repeat(32)).unwrap();
	assert!(let Err(Error::MalformedToken(_)) = resolver.verify("abc.def"));
	assert!(let Err(Error::MalformedToken(_)) = resolver.verify("a.b.c.d"));
}

#[test]
fn unsigned_algorithm_is_rejected() {
	let secret = "a".repeat(32);
	let resolver = HmacTokenResolver::new(Algorithm::HS256, &secret).unwrap();

	// A valid HS256 MAC does not make a token claiming "none" acceptable.
	let header = encode_base64(br#"{"alg":"none","typ":"JWT"}"#);
	let payload = encode_base64(br#"{"sub":"user-1"}"#);
	let signature = encode_base64(&simple_jwt::hmac::sign(Algorithm::HS256, secret.as_bytes(), header.as_bytes(), payload.as_bytes()).unwrap());
	let token = format!("{}.{}.{}", header, payload, signature);

	assert!(let Err(Error::AlgorithmMismatch(_)) = resolver.verify(&token));
	assert!(let Err(Error::AlgorithmMismatch(_)) = resolver.payload(&token));
}

#[test]
fn non_finite_floats_are_rejected() {
	let error = TokenPayload::new().with_claim("f", f64::NAN).unwrap_err();
	assert!(let Error::InvalidClaim(_) = error);
}
