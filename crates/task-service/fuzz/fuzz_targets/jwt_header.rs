#![no_main]

use common::jwt::{extract_alg, extract_bearer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = extract_alg(s);
        let _ = extract_bearer(s);
    }
});
