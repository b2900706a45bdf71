#![no_main]

use std::mem::MaybeUninit;

use libfuzzer_sys::fuzz_target;
use parsetime::Parser;

fuzz_target!(|data: &[u8]| {
    // The first four bytes pick a base offset, the rest is the input.
    let (offset, input) = match data {
        [a, b, c, d, rest @ ..] => (i32::from_le_bytes([*a, *b, *c, *d]) % 86_400, rest),
        _ => (0, data),
    };
    let Ok(ts) = Parser::new().base_offset(offset).parse_bytes(input) else {
        return;
    };

    let mut buf = MaybeUninit::uninit();
    let text = ts.format(&mut buf);
    if let Ok(again) = parsetime::parse(text) {
        assert_eq!(ts, again, "{text}");
    } else {
        // Only instants outside the four digit years fail to re-parse.
        assert!(text.starts_with('-') || text.starts_with('+'), "{text}");
    }
});
