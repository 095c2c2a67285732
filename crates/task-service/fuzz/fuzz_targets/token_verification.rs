#![no_main]

use libfuzzer_sys::fuzz_target;
use task_service::crypto::verify_jwt;

const SECRET: &[u8] = b"fuzz-secret";

fuzz_target!(|data: &[u8]| {
    if let Ok(token) = std::str::from_utf8(data) {
        // Must never panic, and random input must never verify
        if let Ok(claims) = verify_jwt(token, SECRET) {
            panic!("fuzz input verified as {:?}", claims.role);
        }
    }
});
