#![no_main]

use libfuzzer_sys::fuzz_target;
use relog_core::config::RelogConfig;
use relog_parser::ParserConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(config) = RelogConfig::parse(content) {
            let _ = config.validate();
            let _ = ParserConfig::from_core(&config.parser).validate();
        }
    }
});
