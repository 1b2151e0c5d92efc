//! Fuzz target: config blob decode.
//!
//! The NVS config blob crosses a trust boundary (flash contents survive
//! firmware upgrades and power loss mid-commit). Decoding arbitrary bytes
//! must never panic; a valid decode must re-encode.
//!
//! cargo fuzz run fuzz_config_decode

#![no_main]

use garage_shutter::config::ShutterConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = postcard::from_bytes::<ShutterConfig>(data) {
        // Anything that decoded must serialize back without error.
        let bytes = postcard::to_allocvec(&config).expect("re-encode of decoded config");
        let again: ShutterConfig =
            postcard::from_bytes(&bytes).expect("decode of re-encoded config");
        assert_eq!(again, config);
    }
});
