#![no_main]

use holler::{Error, Request};
use libfuzzer_sys::fuzz_target;

/// A request read in full, where more input in the same read would have
/// overrun its content-length.
fn complete_body(r: &Request) -> bool {
    r.is_done() && r.expected_body_len().map_or(true, |n| n == r.body().len())
}

fuzz_target!(|data: &[u8]| {
    let Some((&split, data)) = data.split_first() else {
        return;
    };

    let whole = holler::read_request(data);

    // The same bytes in two reads must give the same outcome.
    let split = (split as usize).min(data.len());
    let (a, b) = data.split_at(split);
    let chunked = holler::read_request(std::io::Read::chain(a, b));

    match (whole, chunked) {
        (Ok(w), Ok(c)) => {
            assert_eq!(w.line(), c.line());
            assert_eq!(w.headers(), c.headers());
            assert_eq!(w.body(), c.body());
        }
        (Err(_), Err(_)) => {}
        // Reading stops at a complete request. Bytes after the body only
        // count when they arrive in the same read as the body.
        (Ok(r), Err(Error::BodyExceedsContentLength { .. }))
        | (Err(Error::BodyExceedsContentLength { .. }), Ok(r)) => {
            assert!(complete_body(&r), "{:?}", r);
        }
        (w, c) => panic!("outcome differs: {:?} vs {:?}", w.is_ok(), c.is_ok()),
    }
});
